use picsweep::cli::{AppConfig, Args};
use picsweep::committer::{CommitOutcome, DeletionCommitter, LocalCommitter};
use picsweep::domain::{MediaId, MediaType, SorterSession};
use picsweep::preview::PreviewManager;
use picsweep::settings::AppSettings;
use picsweep::tui::{
    handle_confirm_input, handle_key_event, handle_review_input, render_confirm_commit,
    render_help_overlay, render_review, render_sorting, render_summary, render_welcome_overlay,
    KeyAction, ViewState,
};
use picsweep::viewed::ViewedLedger;
use picsweep::{CatalogCache, FsCatalog, SweepError};

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::{Builder, Env, Target};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs;
use std::sync::Arc;
use std::{io, time::Duration};

/// Warnings go to a log file: raw mode owns the terminal, so stderr
/// output mid-session would be lost or garbled.
fn init_logger() {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));

    if let Some(path) = dirs::data_dir().map(|d| d.join("picsweep").join("picsweep.log")) {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(file) = fs::File::options().create(true).append(true).open(&path) {
            builder.target(Target::Pipe(Box::new(file)));
        }
    }

    let _ = builder.try_init();
}

fn main() -> io::Result<()> {
    init_logger();
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let config: AppConfig = args.into();
    run_app_with_config(&config)
}

/// Runs the application with configuration
pub fn run_app_with_config(config: &AppConfig) -> io::Result<()> {
    let settings = AppSettings::load().unwrap_or_else(|e| {
        eprintln!("Warning: failed to load settings: {}", e);
        AppSettings::default()
    });

    let mut viewed = ViewedLedger::load().unwrap_or_else(|e| {
        eprintln!("Warning: failed to load viewed ledger: {}", e);
        ViewedLedger::default()
    });

    // The library scan is the one slow operation; it runs once through the
    // cache and off the interactive path.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let cache = CatalogCache::new(Arc::new(FsCatalog::new(&config.directory)));

    let mut session = SorterSession::new();
    session.begin_loading();

    let fetched = match runtime.block_on(cache.fetch()) {
        Ok(items) => items.as_ref().clone(),
        Err(err) => return exit_for_load_error(err, config),
    };

    let items = if config.include_viewed {
        fetched
    } else {
        let remaining = viewed.filter_unviewed(fetched);
        if remaining.is_empty() {
            println!(
                "Every day in {} has already been reviewed.",
                config.directory.display()
            );
            println!("Rerun with --include-viewed to go through them again.");
            return Ok(());
        }
        remaining
    };

    if let Err(err) = session.load(items, config.order) {
        return exit_for_load_error(err, config);
    }

    if config.dry_run {
        println!("[DRY RUN] Nothing will be deleted");
        println!("   Found {} items to review", session.queue().len());
        println!("   Press Enter to continue...");
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
    }

    let committer = LocalCommitter::with_dry_run(config.dry_run);
    let mut previews = PreviewManager::new();
    let mut settings = settings;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(
        &mut terminal,
        &mut session,
        &mut previews,
        &committer,
        config,
        &mut settings,
    );

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Everything presented this session is excluded from future loads.
    let decided = session.position().min(session.queue().len());
    viewed.record_items(&session.queue()[..decided]);
    if let Err(e) = viewed.save() {
        eprintln!("Warning: failed to save viewed ledger: {}", e);
    }

    let stats = session.stats();
    if config.dry_run {
        println!("\n[DRY RUN] Complete");
        println!("   Would have kept: {} items", stats.kept);
        println!("   Would have trashed: {} items", stats.trashed);
    } else {
        println!("Kept {}, trashed {}", stats.kept, stats.trashed);
    }

    result
}

fn exit_for_load_error(err: SweepError, config: &AppConfig) -> io::Result<()> {
    match err {
        SweepError::NoMediaFound => {
            println!("No media found in {}", config.directory.display());
        }
        SweepError::PermissionDenied(detail) => {
            eprintln!("Error: permission denied while scanning: {}", detail);
            std::process::exit(1);
        }
        other => {
            eprintln!("Error: {}", other);
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Main application loop
fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    session: &mut SorterSession,
    previews: &mut PreviewManager,
    committer: &LocalCommitter,
    config: &AppConfig,
    settings: &mut AppSettings,
) -> io::Result<()> {
    let use_trash = settings.sync_file_to_trash_bin && !config.permanent;
    let should_show_welcome = config.show_welcome || !settings.tutorial_completed;

    let mut view_state = if should_show_welcome {
        ViewState::Welcome
    } else {
        ViewState::Sorting
    };
    let mut review_selected: usize = 0;
    let mut outcome: Option<CommitOutcome> = None;
    let mut autoplayed: Option<MediaId> = None;

    loop {
        terminal.draw(|frame| {
            render_sorting(frame, session, previews);
            match view_state {
                ViewState::Welcome => render_welcome_overlay(frame),
                ViewState::Help => render_help_overlay(frame),
                ViewState::Review => render_review(frame, session, review_selected),
                ViewState::ConfirmCommit => {
                    render_confirm_commit(frame, &session.stats(), use_trash)
                }
                ViewState::Summary => render_summary(frame, &session.stats(), outcome.as_ref()),
                ViewState::Sorting => {}
            }
        })?;

        if view_state == ViewState::Sorting {
            maybe_autoplay(session, settings, &mut autoplayed);
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        match view_state {
            ViewState::Welcome => {
                view_state = ViewState::Sorting;
                settings.tutorial_completed = true;
                if let Err(e) = settings.save() {
                    log::warn!("failed to save settings: {e}");
                }
            }

            ViewState::Help => {
                let action = handle_key_event(key);
                if matches!(action, KeyAction::Help | KeyAction::Quit | KeyAction::None) {
                    view_state = ViewState::Sorting;
                }
            }

            ViewState::Summary => break,

            ViewState::ConfirmCommit => match handle_confirm_input(key) {
                KeyAction::Confirm => {
                    outcome = commit_batch(session, committer, use_trash);
                    view_state = ViewState::Summary;
                }
                KeyAction::Cancel => {
                    view_state = ViewState::Review;
                }
                _ => {}
            },

            ViewState::Review => match handle_review_input(key) {
                KeyAction::SelectNext => {
                    if review_selected + 1 < session.trashed().len() {
                        review_selected += 1;
                    }
                }
                KeyAction::SelectPrevious => {
                    review_selected = review_selected.saturating_sub(1);
                }
                KeyAction::Restore => {
                    if let Some(item) = session.trashed().get(review_selected) {
                        let id = item.id.clone();
                        session.remove_from_trashed(&id);
                        if review_selected >= session.trashed().len() {
                            review_selected = session.trashed().len().saturating_sub(1);
                        }
                    }
                }
                KeyAction::Confirm => {
                    if session.trashed().is_empty() {
                        view_state = ViewState::Summary;
                    } else if config.skip_confirm || committer.is_dry_run() {
                        outcome = commit_batch(session, committer, use_trash);
                        view_state = ViewState::Summary;
                    } else {
                        view_state = ViewState::ConfirmCommit;
                    }
                }
                KeyAction::Cancel => {
                    view_state = ViewState::Sorting;
                }
                KeyAction::Quit => {
                    view_state = ViewState::Summary;
                }
                _ => {}
            },

            ViewState::Sorting => match handle_key_event(key) {
                KeyAction::Quit => {
                    if !session.trashed().is_empty() {
                        // An uncommitted batch forces a pass through review.
                        review_selected = 0;
                        view_state = ViewState::Review;
                    } else {
                        let stats = session.stats();
                        if stats.kept > 0 {
                            view_state = ViewState::Summary;
                        } else {
                            break;
                        }
                    }
                }
                KeyAction::Keep => {
                    session.keep_current();
                }
                KeyAction::Trash => {
                    session.trash_current();
                }
                KeyAction::Undo => {
                    session.undo_last_trash();
                }
                KeyAction::Review => {
                    review_selected = 0;
                    view_state = ViewState::Review;
                }
                KeyAction::Reset => {
                    if session.reset().is_ok() {
                        previews.clear();
                        autoplayed = None;
                    }
                }
                KeyAction::Open => {
                    if let Some(item) = session.current() {
                        if let Err(e) = open::that_detached(&item.path) {
                            log::warn!("failed to open {}: {e}", item.name);
                        }
                    }
                }
                KeyAction::Help => {
                    view_state = ViewState::Help;
                }
                _ => {}
            },
        }
    }

    Ok(())
}

/// Hands video cards to the external player once per item when autoplay
/// is enabled.
fn maybe_autoplay(
    session: &SorterSession,
    settings: &AppSettings,
    autoplayed: &mut Option<MediaId>,
) {
    if !settings.autoplay_videos {
        return;
    }
    let Some(item) = session.current() else {
        return;
    };
    if item.media_type != MediaType::Video || autoplayed.as_ref() == Some(&item.id) {
        return;
    }
    if let Err(e) = open::that_detached(&item.path) {
        log::warn!("autoplay failed for {}: {e}", item.name);
    }
    *autoplayed = Some(item.id.clone());
}

/// Runs the consent + delete sequence over the current trash batch.
/// Successfully removed items leave the batch; failures stay for a retry.
/// Undo history is stale after a commit, so it is dropped here.
fn commit_batch(
    session: &mut SorterSession,
    committer: &LocalCommitter,
    use_trash: bool,
) -> Option<CommitOutcome> {
    let batch = session.trashed().to_vec();
    let consent = committer.request_consent(&batch, use_trash)?;
    let outcome = committer.delete_batch(&consent, &batch);

    let succeeded: Vec<MediaId> = batch
        .iter()
        .filter(|item| !outcome.failed.contains(&item.id))
        .map(|item| item.id.clone())
        .collect();
    session.mark_committed(&succeeded);
    session.clear_undo_ledger();

    Some(outcome)
}
