use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum BookmarkArgs {
    /// Save a catalog item, addressed by section token and list position
    Add {
        /// Section token (rides, marketplace, lost-found, notes, events, complaints)
        section: String,

        /// 1-based item position as shown by `browse`
        position: usize,
    },
    /// Remove a bookmark by id
    Remove {
        id: u64,
    },
    /// List saved bookmarks
    List {},
    /// Remove every bookmark
    Clear {
        /// Auto confirm
        #[clap(short, long, default_value = "false")]
        yes: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum NotificationArgs {
    /// Show all notifications
    List {},
    /// Mark one notification as read
    Read {
        id: u32,
    },
    /// Mark every notification as read
    ReadAll {},
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the dashboard header: greeting and badge counters
    Home {},

    /// Open a section of the campus catalog
    Browse {
        /// Section token (rides, marketplace, lost-found, notes, events, complaints)
        section: String,

        /// Narrow the list with a filter chip token
        #[clap(short, long)]
        filter: Option<String>,
    },

    /// Search the portal index
    Search {
        /// Query text; omit together with --interactive to search as you type
        query: Option<String>,

        /// Invoke the first match instead of printing results
        #[clap(long, default_value = "false")]
        open: bool,

        /// Read queries line by line from stdin, debounced
        #[clap(short, long, default_value = "false")]
        interactive: bool,
    },

    /// Manage saved bookmarks
    Bookmark {
        #[clap(subcommand)]
        action: BookmarkArgs,
    },

    /// Ask the campus assistant
    Ask {
        message: String,
    },

    /// Show or update notifications
    Notifications {
        #[clap(subcommand)]
        action: Option<NotificationArgs>,
    },

    /// Show or switch the color theme (light, dark, toggle)
    Theme {
        theme: Option<String>,
    },

    /// Start cuhub as a service.
    Daemon {},
}
