pub mod errors;

pub use errors::AppError;

use std::sync::{Arc, RwLock};

use chrono::{Local, Timelike};
use serde::Serialize;

use crate::{
    assistant::{AssistantSession, Reply},
    bookmarks::{Bookmark, BookmarkStore},
    catalog::{self, Category, Item, Section},
    config::Config,
    filter,
    notifications::NotificationCenter,
    prefs::Preferences,
    search::{self, SearchEntry, UiAction},
    storage::StorageManager,
};

/// A rendered section: router configuration plus the (possibly narrowed)
/// catalog slice. This is what surfaces display.
#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub category: Category,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub filters: &'static [&'static str],
    pub active_filter: String,
    pub action_label: &'static str,
    pub items: Vec<Item>,
}

/// The hub session. Owns every piece of mutable state the portal has;
/// surfaces receive exactly the accessors they need, nothing is ambient.
pub struct App {
    config: Arc<RwLock<Config>>,
    bookmarks: BookmarkStore,
    notifications: NotificationCenter,
    prefs: Preferences,
    assistant: AssistantSession,
}

impl App {
    pub fn new(config: Arc<RwLock<Config>>, storage: Arc<dyn StorageManager>) -> Self {
        App {
            bookmarks: BookmarkStore::load(storage.clone()),
            prefs: Preferences::load(storage),
            notifications: NotificationCenter::seeded(),
            assistant: AssistantSession::default(),
            config,
        }
    }

    pub fn config(&self) -> Arc<RwLock<Config>> {
        self.config.clone()
    }

    /// Opens a section with its default (first, "show all") filter chip.
    pub fn open_section(&self, category: Category) -> SectionView {
        self.open_section_filtered(category, None)
    }

    /// Opens a section with a filter chip active. `None` (or an unknown
    /// chip token matching nothing) keeps the empty-state obligation with
    /// the surface; the view itself just carries the narrowed items.
    pub fn open_section_filtered(&self, category: Category, chip: Option<&str>) -> SectionView {
        let section = Section::of(category);
        let active_filter = chip.unwrap_or(section.filters[0]).to_string();

        SectionView {
            category,
            title: section.title,
            subtitle: section.subtitle,
            filters: section.filters,
            action_label: section.action_label,
            items: filter::filter(catalog::items(category), &active_filter),
            active_filter,
        }
    }

    /// Router entry for raw tokens. Unrecognized tokens come back as
    /// `UnknownSection`; callers treat that as a no-op.
    pub fn section_for_token(
        &self,
        token: &str,
        chip: Option<&str>,
    ) -> Result<SectionView, AppError> {
        let category: Category = token
            .parse()
            .map_err(|_| AppError::UnknownSection(token.to_string()))?;
        Ok(self.open_section_filtered(category, chip))
    }

    pub fn search(&self, query: &str) -> Vec<SearchEntry> {
        search::search(query, search::SEARCH_INDEX)
    }

    pub fn greeting(&self) -> String {
        let name = self.config.read().unwrap().display_name.clone();
        greeting_for(Local::now().hour(), &name)
    }

    /// Submits a message to the assistant, opening it if needed. The
    /// follow-up (when the canned reply has one) is scheduled after the
    /// configured delay and delivered through `on_follow_up`; it is
    /// cancelled by `close_assistant` or a newer submit.
    pub fn ask<F>(&mut self, input: &str, on_follow_up: F) -> Reply
    where
        F: FnOnce(UiAction) + Send + 'static,
    {
        if !self.assistant.is_open() {
            self.assistant.toggle();
        }

        let delay = self.config.read().unwrap().follow_up_delay();
        self.assistant.submit(input, delay, on_follow_up)
    }

    pub fn toggle_assistant(&mut self) -> bool {
        self.assistant.toggle()
    }

    pub fn close_assistant(&mut self) {
        self.assistant.close();
    }

    pub fn assistant_open(&self) -> bool {
        self.assistant.is_open()
    }

    pub fn bookmarks(&self) -> &BookmarkStore {
        &self.bookmarks
    }

    /// Bookmarks an item, returning the stored record.
    pub fn add_bookmark(&self, item: &Item) -> Result<Bookmark, AppError> {
        if !self.bookmarks.add(item) {
            return Err(AppError::AlreadyBookmarked);
        }

        self.bookmarks
            .list()
            .last()
            .cloned()
            .ok_or_else(|| AppError::Other(anyhow::anyhow!("bookmark missing after add")))
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn prefs_mut(&mut self) -> &mut Preferences {
        &mut self.prefs
    }
}

/// Time-of-day greeting line for the dashboard header.
pub fn greeting_for(hour: u32, name: &str) -> String {
    let salutation = if (12..18).contains(&hour) {
        "Good Afternoon"
    } else if hour >= 18 {
        "Good Evening"
    } else {
        "Good Morning"
    };

    format!("{salutation}, {name}")
}
