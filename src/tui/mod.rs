// Terminal interface: the swipe card, review screen, and overlays
pub mod colors;
pub mod input;

pub use colors::*;
pub use input::{handle_confirm_input, handle_key_event, handle_review_input, KeyAction};

use crate::committer::CommitOutcome;
use crate::domain::{SorterSession, SweepStats};
use crate::preview::{PreviewManager, PreviewState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

/// UI view state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Welcome screen shown until the tutorial flag is set
    Welcome,
    /// Main card view
    Sorting,
    /// Help overlay visible
    Help,
    /// Trash batch review before commit
    Review,
    /// Commit confirmation dialog (the consent step)
    ConfirmCommit,
    /// Final summary after commit or quit
    Summary,
}

/// Renders the sorting view: progress header, media card, key hints.
pub fn render_sorting(frame: &mut Frame, session: &SorterSession, previews: &mut PreviewManager) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header with progress
            Constraint::Min(0),    // Card
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], session);
    render_card(frame, chunks[1], session, previews);
    render_footer(frame, chunks[2]);
}

fn render_header(frame: &mut Frame, area: Rect, session: &SorterSession) {
    let stats = session.stats();
    let decided = stats.kept + stats.trashed;

    let block = Block::default()
        .title(" picsweep ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let label = Line::from(vec![
        Span::styled(
            format!("{} / {}", decided, stats.total),
            Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   kept {}", stats.kept),
            Style::default().fg(ACCENT_KEEP),
        ),
        Span::styled(
            format!("   trashed {}", stats.trashed),
            Style::default().fg(ACCENT_TRASH),
        ),
        Span::styled(
            format!("   undo depth {}", session.ledger_depth()),
            Style::default().fg(TEXT_SECONDARY),
        ),
    ]);
    frame.render_widget(Paragraph::new(label), rows[0]);

    let ratio = if stats.total == 0 {
        0.0
    } else {
        decided as f64 / stats.total as f64
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(ACCENT_KEEP))
        .ratio(ratio.clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, rows[1]);
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    session: &SorterSession,
    previews: &mut PreviewManager,
) {
    let Some(item) = session.current() else {
        let done = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "All sorted",
                Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press r to review the trash batch",
                Style::default().fg(TEXT_SECONDARY),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(done, area);
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", item.name))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(inner);

    let preview_area = chunks[0];
    match previews.preview_for(item, preview_area.width, preview_area.height) {
        PreviewState::Ready(preview) => {
            let lines: Vec<Line> = preview.lines.clone();
            frame.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                preview_area,
            );
        }
        PreviewState::Placeholder(text) => {
            frame.render_widget(
                Paragraph::new(Span::styled(text, Style::default().fg(TEXT_SECONDARY)))
                    .alignment(Alignment::Center),
                preview_area,
            );
        }
        PreviewState::Error(err) => {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("preview unavailable: {err}"),
                    Style::default().fg(ACCENT_TRASH),
                ))
                .alignment(Alignment::Center),
                preview_area,
            );
        }
    }

    let meta = Line::from(vec![
        Span::styled(item.media_type.label(), Style::default().fg(ACCENT_HIGHLIGHT)),
        Span::styled(
            format!("  {}  ", format_size(item.size)),
            Style::default().fg(TEXT_PRIMARY),
        ),
        Span::styled(
            format!("{}  ", item.captured_at.format("%Y-%m-%d %H:%M")),
            Style::default().fg(TEXT_SECONDARY),
        ),
        Span::styled(item.folder.clone(), Style::default().fg(TEXT_SECONDARY)),
    ]);
    frame.render_widget(
        Paragraph::new(meta).alignment(Alignment::Center),
        chunks[1],
    );
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled(" \u{2190} ", Style::default().fg(ACCENT_TRASH)),
        Span::raw("trash  "),
        Span::styled("\u{2192} ", Style::default().fg(ACCENT_KEEP)),
        Span::raw("keep  "),
        Span::styled("u ", Style::default().fg(ACCENT_HIGHLIGHT)),
        Span::raw("undo  "),
        Span::styled("r ", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("review  "),
        Span::styled("o ", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("open  "),
        Span::styled("? ", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("help  "),
        Span::styled("q ", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("quit"),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(TEXT_SECONDARY));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(hints).alignment(Alignment::Center), inner);
}

/// Renders the trash review screen. `selected` indexes into the trashed
/// batch; un-trashing goes through the session, not the undo ledger.
pub fn render_review(frame: &mut Frame, session: &SorterSession, selected: usize) {
    let area = centered_rect(70, 80, frame.area());
    frame.render_widget(Clear, area);

    let stats = session.stats();
    let title = format!(
        " Trash batch \u{2014} {} items, {} ",
        stats.trashed,
        format_size(stats.trashed_bytes)
    );
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_TRASH))
        .style(Style::default().bg(BG_DARK));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(inner);

    if session.trashed().is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Nothing marked for deletion",
                Style::default().fg(TEXT_SECONDARY),
            ))
            .alignment(Alignment::Center),
            chunks[0],
        );
    } else {
        let items: Vec<ListItem> = session
            .trashed()
            .iter()
            .map(|item| {
                ListItem::new(Line::from(vec![
                    Span::styled(item.name.clone(), Style::default().fg(TEXT_PRIMARY)),
                    Span::styled(
                        format!("  {}  {}", format_size(item.size), item.folder),
                        Style::default().fg(TEXT_SECONDARY),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(ACCENT_HIGHLIGHT)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("\u{203a} ");

        let mut state = ListState::default();
        state.select(Some(selected.min(session.trashed().len().saturating_sub(1))));
        frame.render_stateful_widget(list, chunks[0], &mut state);
    }

    let hints = Line::from(vec![
        Span::styled("u ", Style::default().fg(ACCENT_KEEP)),
        Span::raw("un-trash  "),
        Span::styled("Enter ", Style::default().fg(ACCENT_TRASH)),
        Span::raw("delete batch  "),
        Span::styled("Esc ", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("back"),
    ]);
    frame.render_widget(Paragraph::new(hints).alignment(Alignment::Center), chunks[1]);
}

/// Renders the commit confirmation dialog. This is the consent step: the
/// batch is only handed to the committer after a yes here.
pub fn render_confirm_commit(frame: &mut Frame, stats: &SweepStats, use_trash: bool) {
    let area = centered_rect(55, 35, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Confirm deletion ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_TRASH))
        .style(Style::default().bg(BG_DARK));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let destination = if use_trash {
        "to the system trash bin"
    } else {
        "permanently"
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("Remove "),
            Span::styled(
                format!("{} items", stats.trashed),
                Style::default().fg(ACCENT_TRASH).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" ({}) {destination}?", format_size(stats.trashed_bytes))),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "y / Enter to confirm   n / Esc to cancel",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

/// Renders the final summary, including the commit result when one exists.
pub fn render_summary(frame: &mut Frame, stats: &SweepStats, outcome: Option<&CommitOutcome>) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Session complete ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("   Reviewed:  "),
            Span::styled(
                format!("{}", stats.kept + stats.trashed),
                Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" of {}", stats.total), Style::default().fg(TEXT_SECONDARY)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("   \u{2713} ", Style::default().fg(ACCENT_KEEP)),
            Span::raw("Kept:     "),
            Span::styled(
                format!("{}", stats.kept),
                Style::default().fg(ACCENT_KEEP).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("   \u{2717} ", Style::default().fg(ACCENT_TRASH)),
            Span::raw("Trashed:  "),
            Span::styled(
                format!("{}", stats.trashed),
                Style::default().fg(ACCENT_TRASH).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    if let Some(outcome) = outcome {
        lines.push(Line::from(""));
        let style = if outcome.is_partial() {
            Style::default().fg(ACCENT_TRASH)
        } else {
            Style::default().fg(ACCENT_KEEP)
        };
        lines.push(Line::from(Span::styled(
            format!("   {}", outcome.summary()),
            style.add_modifier(Modifier::BOLD),
        )));
        if outcome.is_partial() {
            lines.push(Line::from(Span::styled(
                "   failed items stay in the batch for a retry",
                Style::default().fg(TEXT_SECONDARY),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to exit",
        Style::default().fg(TEXT_SECONDARY),
    )));

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().fg(TEXT_PRIMARY)),
        inner,
    );
}

/// Renders the help overlay.
pub fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect(50, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Keyboard shortcuts",
            Style::default().fg(ACCENT_HIGHLIGHT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  \u{2192} or k ", Style::default().fg(ACCENT_KEEP)),
            Span::raw("  keep this item"),
        ]),
        Line::from(vec![
            Span::styled("  \u{2190} or t ", Style::default().fg(ACCENT_TRASH)),
            Span::raw("  trash this item"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  u      ", Style::default().fg(ACCENT_HIGHLIGHT)),
            Span::raw("  undo last trash"),
        ]),
        Line::from(vec![
            Span::styled("  r      ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("  review trash batch"),
        ]),
        Line::from(vec![
            Span::styled("  o      ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("  open in external viewer"),
        ]),
        Line::from(vec![
            Span::styled("  Ctrl+S ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("  start over (reshuffles)"),
        ]),
        Line::from(vec![
            Span::styled("  q      ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("  quit"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(TEXT_PRIMARY)),
        inner,
    );
}

/// Renders the first-launch welcome overlay.
pub fn render_welcome_overlay(frame: &mut Frame) {
    let area = centered_rect(75, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_HIGHLIGHT))
        .style(Style::default().bg(BG_DARK));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to picsweep",
            Style::default().fg(ACCENT_HIGHLIGHT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Your photos and videos come up one at a time."),
        Line::from("Swipe right to keep, left to trash."),
        Line::from(""),
        Line::from("Nothing is deleted until you review the batch"),
        Line::from("and confirm, and every trash action can be undone"),
        Line::from("until then."),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to start sorting",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(TEXT_PRIMARY)),
        inner,
    );
}

/// Centers a `percent_x` by `percent_y` rectangle inside `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Human-readable byte size.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
