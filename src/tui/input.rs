use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    /// Keep the current item
    Keep,
    /// Trash the current item
    Trash,
    /// Undo the last trash action
    Undo,
    /// Open the trash review screen
    Review,
    /// Open the current item externally
    Open,
    /// Start the session over from the full list
    Reset,
    /// Toggle the help overlay
    Help,
    /// Confirm a pending commit
    Confirm,
    /// Cancel a pending commit
    Cancel,
    /// Move the review selection down
    SelectNext,
    /// Move the review selection up
    SelectPrevious,
    /// Un-trash the selected review item
    Restore,
    /// No action
    None,
}

/// Key mapping for the sorting view.
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::Quit,

        // Swipe right to keep, left to trash
        (KeyCode::Right, KeyModifiers::NONE) => KeyAction::Keep,
        (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::Keep,
        (KeyCode::Left, KeyModifiers::NONE) => KeyAction::Trash,
        (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::Trash,

        (KeyCode::Char('u'), KeyModifiers::NONE) => KeyAction::Undo,
        (KeyCode::Char('z'), KeyModifiers::CONTROL) => KeyAction::Undo,

        (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Review,
        (KeyCode::Char('o'), KeyModifiers::NONE) => KeyAction::Open,
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => KeyAction::Reset,
        (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::Help,

        _ => KeyAction::None,
    }
}

/// Key mapping while the commit confirmation dialog is up.
pub fn handle_confirm_input(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        (KeyCode::Char('y'), KeyModifiers::NONE) => KeyAction::Confirm,
        (KeyCode::Char('Y'), KeyModifiers::SHIFT) => KeyAction::Confirm,
        (KeyCode::Enter, KeyModifiers::NONE) => KeyAction::Confirm,

        (KeyCode::Char('n'), KeyModifiers::NONE) => KeyAction::Cancel,
        (KeyCode::Char('N'), KeyModifiers::SHIFT) => KeyAction::Cancel,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::Cancel,

        _ => KeyAction::None,
    }
}

/// Key mapping for the trash review screen.
pub fn handle_review_input(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        (KeyCode::Down, KeyModifiers::NONE) => KeyAction::SelectNext,
        (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::SelectNext,
        (KeyCode::Up, KeyModifiers::NONE) => KeyAction::SelectPrevious,
        (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::SelectPrevious,

        // Un-trash the selected item
        (KeyCode::Char('u'), KeyModifiers::NONE) => KeyAction::Restore,
        (KeyCode::Char('x'), KeyModifiers::NONE) => KeyAction::Restore,

        // Proceed to commit
        (KeyCode::Enter, KeyModifiers::NONE) => KeyAction::Confirm,
        (KeyCode::Char('d'), KeyModifiers::NONE) => KeyAction::Confirm,

        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::Cancel,
        (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,

        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_quit() {
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Quit);

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key), KeyAction::Quit);
    }

    #[test]
    fn test_key_keep_and_trash() {
        let key = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Keep);

        let key = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Keep);

        let key = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Trash);

        let key = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Trash);
    }

    #[test]
    fn test_key_undo() {
        let key = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Undo);

        let key = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key), KeyAction::Undo);
    }

    #[test]
    fn test_key_review_and_reset() {
        let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Review);

        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key), KeyAction::Reset);
    }

    #[test]
    fn test_key_none() {
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::None);
    }

    #[test]
    fn test_confirm_keys() {
        let key = KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE);
        assert_eq!(handle_confirm_input(key), KeyAction::Confirm);

        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(handle_confirm_input(key), KeyAction::Confirm);

        let key = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        assert_eq!(handle_confirm_input(key), KeyAction::Cancel);

        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handle_confirm_input(key), KeyAction::Cancel);

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handle_confirm_input(key), KeyAction::None);
    }

    #[test]
    fn test_review_keys() {
        let key = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(handle_review_input(key), KeyAction::SelectNext);

        let key = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(handle_review_input(key), KeyAction::SelectPrevious);

        let key = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::NONE);
        assert_eq!(handle_review_input(key), KeyAction::Restore);

        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(handle_review_input(key), KeyAction::Confirm);

        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handle_review_input(key), KeyAction::Cancel);
    }
}
