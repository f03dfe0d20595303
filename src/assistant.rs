use std::time::Duration;

use serde::Serialize;

use crate::{
    catalog::Category,
    search::UiAction,
    timer::Deferred,
};

/// A canned assistant reply, plus the section the assistant wants opened
/// once the follow-up delay elapses.
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub text: String,
    pub follow_up: Option<UiAction>,
}

impl Reply {
    fn new(text: &str, follow_up: Option<UiAction>) -> Self {
        Reply {
            text: text.to_string(),
            follow_up,
        }
    }
}

const RIDE_REPLY: &str = "I found 6 available rides! The next ride to Jaipur is at 5:30 PM \
    with 2 seats available for ₹80 per seat. Opening Rides section...";
const NOTES_REPLY: &str =
    "Great! We have the latest TOC PYQs for 2024 with complete solutions. Opening Notes & PYQs section...";
const EVENT_REPLY: &str =
    "Exciting events coming up! Tomorrow there's an AI/ML Workshop at 4 PM. Opening Events section...";
const HELP_REPLY: &str = "I'm your CURAJ AI Assistant! I can help you with:\n• Finding rides\n\
    • Browsing marketplace\n• Accessing notes and PYQs\n• Checking events\n• Filing complaints\n\n\
    What would you like to explore?";
const MARKETPLACE_REPLY: &str = "Opening Marketplace for you!";
const LOST_FOUND_REPLY: &str = "Let me check Lost & Found for you!";
const DEFAULT_REPLY: &str =
    "I can help you navigate CU Hub! Try asking about rides, notes, events, or marketplace items. 😊";

/// The keyword → response table. A static lookup, first match wins.
pub fn reply_for(input: &str) -> Reply {
    let text = input.trim().to_lowercase();

    if text.contains("ride") || text.contains("jaipur") {
        Reply::new(RIDE_REPLY, Some(UiAction::OpenSection(Category::Rides)))
    } else if text.contains("note") || text.contains("pyq") {
        Reply::new(NOTES_REPLY, Some(UiAction::OpenSection(Category::Notes)))
    } else if text.contains("event") || text.contains("workshop") {
        Reply::new(EVENT_REPLY, Some(UiAction::OpenSection(Category::Events)))
    } else if text.contains("help") {
        Reply::new(HELP_REPLY, None)
    } else if text.contains("marketplace") {
        Reply::new(
            MARKETPLACE_REPLY,
            Some(UiAction::OpenSection(Category::Marketplace)),
        )
    } else if text.contains("lost") || text.contains("found") {
        Reply::new(
            LOST_FOUND_REPLY,
            Some(UiAction::OpenSection(Category::LostFound)),
        )
    } else {
        Reply::new(DEFAULT_REPLY, None)
    }
}

/// One assistant conversation. Holds the handle of the pending follow-up so
/// closing the widget (or submitting again) invalidates it instead of
/// letting it fire into a view that no longer exists.
#[derive(Default)]
pub struct AssistantSession {
    open: bool,
    pending: Option<Deferred>,
}

impl AssistantSession {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        if self.open {
            self.close();
        } else {
            self.open = true;
        }
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }

    /// Submits a message. The reply comes back immediately for the surface
    /// to deliver after its reply delay; a follow-up action, if any, is
    /// scheduled here and handed to `on_follow_up` once the delay elapses.
    /// A newer submit replaces (cancels) a still-pending follow-up.
    pub fn submit<F>(&mut self, input: &str, follow_up_delay: Duration, on_follow_up: F) -> Reply
    where
        F: FnOnce(UiAction) + Send + 'static,
    {
        let reply = reply_for(input);

        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }

        if let Some(action) = reply.follow_up {
            self.pending = Some(Deferred::spawn(follow_up_delay, move || {
                on_follow_up(action)
            }));
        }

        reply
    }
}
