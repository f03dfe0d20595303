use std::{
    path::Path,
    sync::{mpsc, Arc, RwLock},
    thread,
    time::Duration,
};

use anyhow::{anyhow, bail};
use clap::Parser;
use inquire::error::InquireResult;

mod app;
mod assistant;
mod bookmarks;
mod catalog;
mod cli;
mod config;
mod filter;
mod lock;
mod notifications;
mod prefs;
mod search;
mod storage;
#[cfg(test)]
mod tests;
mod timer;
mod web;

use app::{App, AppError, SectionView};
use bookmarks::BookmarkStore;
use config::Config;
use lock::FileLock;
use search::{ActionSink, UiAction};

fn base_path() -> anyhow::Result<String> {
    if let Ok(dir) = std::env::var("CUHUB_DIR") {
        return Ok(dir);
    }

    let home = homedir::my_home()?.ok_or_else(|| anyhow!("could not resolve home directory"))?;
    Ok(home.join(".cuhub").to_string_lossy().into_owned())
}

fn print_section(view: &SectionView) {
    println!("{} — {}", view.title, view.subtitle);
    println!(
        "filters: {}  (active: {})",
        view.filters.join(" | "),
        view.active_filter
    );
    println!();

    if view.items.is_empty() {
        println!("No items match your filter.");
        return;
    }

    for (idx, item) in view.items.iter().enumerate() {
        println!("{:>2}. {}", idx + 1, item.title);
        println!("    {}", item.desc);
        println!("    {}", item.meta);
    }
}

fn print_bookmarks(store: &BookmarkStore) {
    let bookmarks = store.list();

    if bookmarks.is_empty() {
        println!("No Bookmarks Yet — save your favorite items for quick access");
        return;
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&bookmarks).expect("bookmarks are serializable")
    );
}

/// The terminal rendering surface: executes search-hit and assistant
/// follow-up actions by printing the requested view.
struct CliSurface<'a> {
    app: &'a mut App,
}

impl ActionSink for CliSurface<'_> {
    fn invoke(&mut self, action: UiAction) -> anyhow::Result<()> {
        match action {
            UiAction::OpenSection(category) => {
                let view = self.app.open_section(category);
                print_section(&view);
            }
            UiAction::OpenBookmarks => print_bookmarks(self.app.bookmarks()),
            UiAction::ToggleAssistant => {
                if self.app.toggle_assistant() {
                    println!("AI Assistant ready!");
                } else {
                    println!("AI Assistant closed");
                }
            }
        }

        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    let base_path = base_path()?;
    let config = Arc::new(RwLock::new(Config::load_with(&base_path)));
    let storage = Arc::new(storage::BackendLocal::new(&base_path)?);
    let mut app = App::new(config.clone(), storage);

    match args.command {
        cli::Command::Daemon {} => {
            let _lock = FileLock::try_acquire(Path::new(&base_path))?;
            web::start_daemon(app);
            Ok(())
        }

        cli::Command::Home {} => {
            println!("{}", app.greeting());

            if let Some(count) = app.bookmarks().badge() {
                println!("{count} bookmarked items");
            }
            if let Some(unread) = app.notifications().badge() {
                println!("{unread} unread notifications");
            }

            Ok(())
        }

        cli::Command::Browse { section, filter } => {
            match app.section_for_token(&section, filter.as_deref()) {
                Ok(view) => print_section(&view),
                // unrecognized tokens are ignored, not errors
                Err(AppError::UnknownSection(token)) => {
                    log::debug!("ignoring unknown section token: {token}");
                }
                Err(err) => bail!(err),
            }

            Ok(())
        }

        cli::Command::Search {
            query,
            open,
            interactive,
        } => {
            if interactive {
                let window = config.read().unwrap().search_debounce();
                let debouncer = timer::Debouncer::new(window, |query: String| {
                    let matches = search::search(&query, search::SEARCH_INDEX);

                    if matches.is_empty() {
                        println!("No results found for \"{}\"", query.trim());
                        return;
                    }

                    for entry in &matches {
                        println!("{}  {} — {}", entry.icon, entry.title, entry.desc);
                    }
                });

                for line in std::io::stdin().lines() {
                    let line = line?;
                    // empty query closes the results panel: drop the pending evaluation
                    if line.trim().is_empty() {
                        debouncer.cancel();
                        continue;
                    }
                    debouncer.call(line);
                }

                return Ok(());
            }

            let Some(query) = query else {
                return Ok(());
            };

            if query.trim().is_empty() {
                return Ok(());
            }

            let matches = app.search(&query);

            if open {
                if let Some(entry) = matches.first() {
                    println!("Opening {}...", entry.title);
                    let action = entry.action;
                    CliSurface { app: &mut app }.invoke(action)?;
                }
                return Ok(());
            }

            if matches.is_empty() {
                println!("No results found for \"{}\"", query.trim());
                return Ok(());
            }

            for entry in &matches {
                println!("{}  {} — {}", entry.icon, entry.title, entry.desc);
            }

            Ok(())
        }

        cli::Command::Bookmark { action } => {
            let _lock = FileLock::acquire_blocking(Path::new(&base_path))?;

            match action {
                cli::BookmarkArgs::Add { section, position } => {
                    let category = match section.parse::<catalog::Category>() {
                        Ok(category) => category,
                        Err(_) => {
                            log::debug!("ignoring unknown section token: {section}");
                            return Ok(());
                        }
                    };

                    let item = position
                        .checked_sub(1)
                        .and_then(|idx| catalog::items(category).get(idx));

                    let Some(item) = item else {
                        println!("No item at position {position} in {category}");
                        return Ok(());
                    };

                    match app.add_bookmark(item) {
                        Ok(bookmark) => {
                            println!("Bookmark added!");
                            println!(
                                "{}",
                                serde_json::to_string_pretty(&bookmark)
                                    .expect("bookmark is serializable")
                            );
                        }
                        Err(AppError::AlreadyBookmarked) => println!("Already bookmarked"),
                        Err(err) => bail!(err),
                    }

                    Ok(())
                }

                cli::BookmarkArgs::Remove { id } => {
                    app.bookmarks().remove(id);
                    println!("Bookmark removed");
                    Ok(())
                }

                cli::BookmarkArgs::List {} => {
                    print_bookmarks(app.bookmarks());
                    Ok(())
                }

                cli::BookmarkArgs::Clear { yes } => {
                    let count = app.bookmarks().count();

                    if count == 0 {
                        println!("No Bookmarks Yet — save your favorite items for quick access");
                        return Ok(());
                    }

                    if !yes {
                        match inquire::prompt_confirmation(format!(
                            "Are you sure you want to remove all {count} bookmarks?"
                        )) {
                            InquireResult::Ok(true) => {}
                            InquireResult::Ok(false) => return Ok(()),
                            InquireResult::Err(err) => bail!("An error occurred: {}", err),
                        }
                    }

                    let removed = app.bookmarks().clear();
                    println!("{removed} bookmarks removed");
                    Ok(())
                }
            }
        }

        cli::Command::Ask { message } => {
            let reply_delay = config.read().unwrap().reply_delay();
            let follow_up_delay = config.read().unwrap().follow_up_delay();

            let (tx, rx) = mpsc::channel::<UiAction>();
            let reply = app.ask(&message, move |action| {
                let _ = tx.send(action);
            });

            // simulated "thinking" pause before the canned reply
            thread::sleep(reply_delay);
            println!("{}", reply.text);

            if reply.follow_up.is_some() {
                if let Ok(action) = rx.recv_timeout(follow_up_delay + Duration::from_millis(500)) {
                    println!();
                    CliSurface { app: &mut app }.invoke(action)?;
                }
            }

            Ok(())
        }

        cli::Command::Notifications { action } => {
            match action {
                None | Some(cli::NotificationArgs::List {}) => {
                    for notif in app.notifications().items() {
                        let marker = if notif.unread { "●" } else { " " };
                        println!(
                            "{marker} #{} {}  {} ({})",
                            notif.id, notif.icon, notif.text, notif.time
                        );
                    }
                    if let Some(unread) = app.notifications().badge() {
                        println!("\n{unread} unread");
                    }
                }
                Some(cli::NotificationArgs::Read { id }) => {
                    if app.notifications_mut().mark_read(id) {
                        println!("Notification marked as read");
                    }
                }
                Some(cli::NotificationArgs::ReadAll {}) => {
                    app.notifications_mut().mark_all_read();
                    println!("All notifications marked as read");
                }
            }

            Ok(())
        }

        cli::Command::Theme { theme } => {
            let _lock = FileLock::acquire_blocking(Path::new(&base_path))?;

            match theme.as_deref() {
                None => println!("{}", app.prefs().theme()),
                Some("toggle") => {
                    let theme = app.prefs_mut().toggle_theme();
                    println!("{theme} mode activated");
                }
                Some(raw) => match raw.parse() {
                    Ok(theme) => {
                        app.prefs_mut().set_theme(theme);
                        println!("{theme} mode activated");
                    }
                    Err(prefs::UnknownTheme(token)) => {
                        log::debug!("ignoring unknown theme token: {token}");
                    }
                },
            }

            Ok(())
        }
    }
}
