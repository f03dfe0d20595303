use serde::{Deserialize, Serialize};

use crate::catalog::Category;

/// What a search hit (or an assistant follow-up) asks the surface to do.
/// Plain data, no callable code; execution goes through [`ActionSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "category", rename_all = "snake_case")]
pub enum UiAction {
    OpenSection(Category),
    OpenBookmarks,
    ToggleAssistant,
}

/// The single execution capability a surface offers for [`UiAction`]s.
pub trait ActionSink {
    fn invoke(&mut self, action: UiAction) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchEntry {
    pub key: &'static str,
    pub title: &'static str,
    pub desc: &'static str,
    pub icon: &'static str,
    pub action: UiAction,
}

pub const SEARCH_INDEX: &[SearchEntry] = &[
    SearchEntry {
        key: "lost found",
        title: "Lost & Found",
        desc: "Search lost items on campus",
        icon: "🔍",
        action: UiAction::OpenSection(Category::LostFound),
    },
    SearchEntry {
        key: "ride share jaipur",
        title: "Ride Share",
        desc: "Find rides to Jaipur & more",
        icon: "🚗",
        action: UiAction::OpenSection(Category::Rides),
    },
    SearchEntry {
        key: "marketplace buy sell",
        title: "Marketplace",
        desc: "Buy & sell items",
        icon: "🛒",
        action: UiAction::OpenSection(Category::Marketplace),
    },
    SearchEntry {
        key: "notes pyq study",
        title: "Notes & PYQs",
        desc: "Access study materials",
        icon: "📚",
        action: UiAction::OpenSection(Category::Notes),
    },
    SearchEntry {
        key: "event workshop",
        title: "Events & Clubs",
        desc: "Workshops & activities",
        icon: "🎉",
        action: UiAction::OpenSection(Category::Events),
    },
    SearchEntry {
        key: "complaint issue",
        title: "Complaints",
        desc: "Register campus issues",
        icon: "⚠️",
        action: UiAction::OpenSection(Category::Complaints),
    },
    SearchEntry {
        key: "ai assistant help",
        title: "AI Assistant",
        desc: "Chat with AI",
        icon: "🤖",
        action: UiAction::ToggleAssistant,
    },
    SearchEntry {
        key: "bookmark favorite",
        title: "Bookmarks",
        desc: "Your saved items",
        icon: "⭐",
        action: UiAction::OpenBookmarks,
    },
];

/// Matches a query against the index. Empty or whitespace-only queries
/// return nothing (the caller closes the results panel). Matches keep the
/// index's original order; there is no ranking.
pub fn search(query: &str, index: &[SearchEntry]) -> Vec<SearchEntry> {
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        return vec![];
    }

    index
        .iter()
        .filter(|entry| {
            entry.key.contains(&query)
                || entry.title.to_lowercase().contains(&query)
                || entry.desc.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}
