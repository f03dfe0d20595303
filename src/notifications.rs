use serde::Serialize;

/// A single notification. The `time` field is a display string from the
/// seed data, like the rest of the sample content.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: u32,
    pub icon: String,
    pub text: String,
    pub time: String,
    pub unread: bool,
}

fn notification(id: u32, icon: &str, text: &str, time: &str, unread: bool) -> Notification {
    Notification {
        id,
        icon: icon.to_string(),
        text: text.to_string(),
        time: time.to_string(),
        unread,
    }
}

/// Owns the notification list for one session. Process-lifetime only.
pub struct NotificationCenter {
    items: Vec<Notification>,
}

impl NotificationCenter {
    pub fn seeded() -> Self {
        NotificationCenter {
            items: vec![
                notification(
                    1,
                    "🚗",
                    "New ride to Jaipur available at 5:30 PM",
                    "5 min ago",
                    true,
                ),
                notification(2, "📚", "TOC PYQs for Semester 4 uploaded", "1 hour ago", true),
                notification(
                    3,
                    "🎉",
                    "Tech Fest registration starts next week",
                    "2 hours ago",
                    false,
                ),
                notification(
                    4,
                    "🛒",
                    "Your listing received 3 new inquiries",
                    "3 hours ago",
                    false,
                ),
            ],
        }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Marks one notification read. Returns true when it was unread.
    pub fn mark_read(&mut self, id: u32) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(notif) if notif.unread => {
                notif.unread = false;
                true
            }
            _ => false,
        }
    }

    /// Marks everything read; returns how many flipped.
    pub fn mark_all_read(&mut self) -> usize {
        let mut flipped = 0;
        for notif in self.items.iter_mut().filter(|n| n.unread) {
            notif.unread = false;
            flipped += 1;
        }
        flipped
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| n.unread).count()
    }

    /// Unread count for the badge; None means the badge is hidden.
    pub fn badge(&self) -> Option<usize> {
        match self.unread_count() {
            0 => None,
            n => Some(n),
        }
    }
}
