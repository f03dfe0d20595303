use std::{collections::HashMap, fmt::Display, str::FromStr};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A catalog entry. Immutable sample data; never mutated after seeding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    pub desc: String,
    pub meta: String,
}

fn item(title: &str, desc: &str, meta: &str) -> Item {
    Item {
        title: title.to_string(),
        desc: desc.to_string(),
        meta: meta.to_string(),
    }
}

/// The six content domains of the hub. Tokens are the stable identifier
/// strings consumed by the section router; anything else fails to parse and
/// callers treat that as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Rides,
    Marketplace,
    LostFound,
    Notes,
    Events,
    Complaints,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Rides,
        Category::Marketplace,
        Category::LostFound,
        Category::Notes,
        Category::Events,
        Category::Complaints,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Category::Rides => "rides",
            Category::Marketplace => "marketplace",
            Category::LostFound => "lost-found",
            Category::Notes => "notes",
            Category::Events => "events",
            Category::Complaints => "complaints",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[derive(thiserror::Error, Debug)]
#[error("unknown category token: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rides" => Ok(Category::Rides),
            "marketplace" => Ok(Category::Marketplace),
            "lost-found" => Ok(Category::LostFound),
            "notes" => Ok(Category::Notes),
            "events" => Ok(Category::Events),
            "complaints" => Ok(Category::Complaints),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Per-category display configuration for the section router. The first
/// filter label is the default-active "show all" chip.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub filters: &'static [&'static str],
    pub action_label: &'static str,
}

impl Section {
    pub fn of(category: Category) -> &'static Section {
        match category {
            Category::Rides => &Section {
                title: "Ride Share",
                subtitle: "Available rides with verified students",
                filters: &["All Rides", "Jaipur", "Station", "Bus Stand"],
                action_label: "Post New Ride",
            },
            Category::Marketplace => &Section {
                title: "Marketplace",
                subtitle: "Latest listings from campus",
                filters: &["All Items", "Books", "Electronics", "Stationery"],
                action_label: "List Item for Sale",
            },
            Category::LostFound => &Section {
                title: "Lost & Found",
                subtitle: "Recently reported items",
                filters: &["All", "Lost", "Found", "Today"],
                action_label: "Report Lost/Found Item",
            },
            Category::Notes => &Section {
                title: "Notes & PYQs",
                subtitle: "Recently uploaded study materials",
                filters: &["All", "Notes", "PYQs", "Semester 4"],
                action_label: "Upload Notes/PYQs",
            },
            Category::Events => &Section {
                title: "Events & Clubs",
                subtitle: "Upcoming campus events",
                filters: &["All", "Workshops", "Hackathons", "Meetups"],
                action_label: "Create Event",
            },
            Category::Complaints => &Section {
                title: "Complaints & Issues",
                subtitle: "Current complaint status",
                filters: &["All", "Pending", "In Progress", "Resolved"],
                action_label: "File New Complaint",
            },
        }
    }
}

/// Returns the static catalog slice for a category.
pub fn items(category: Category) -> &'static [Item] {
    &CATALOG[&category]
}

static CATALOG: Lazy<HashMap<Category, Vec<Item>>> = Lazy::new(|| {
    let mut catalog = HashMap::new();

    catalog.insert(
        Category::Rides,
        vec![
            item(
                "Campus → Jaipur",
                "5:30 PM · 2 seats available",
                "₹80 per seat · Dishant Tailor",
            ),
            item(
                "Campus → Railway Station",
                "4:00 PM · 1 seat available",
                "₹40 per seat · Anil Kumawat",
            ),
            item(
                "Campus → Jaipur",
                "6:15 PM · 3 seats available",
                "₹90 per seat · Yash Agarwal",
            ),
            item(
                "Campus → Bus Stand",
                "3:45 PM · 2 seats available",
                "₹30 per seat · Mr. Sahani",
            ),
            item(
                "Campus → Ajmer",
                "7:00 AM · 2 seats available",
                "₹120 per seat · Vikas Kumar",
            ),
            item(
                "Campus → Shopping Mall",
                "2:30 PM · 3 seats available",
                "₹25 per seat · Priya Singh",
            ),
        ],
    );

    catalog.insert(
        Category::Marketplace,
        vec![
            item(
                "Casio FX-991ES Calculator",
                "Like new condition · Used for 1 semester",
                "₹400 · CSE 2nd Year",
            ),
            item(
                "Data Structures Book by Karumanchi",
                "Excellent condition · No marks",
                "₹250 · 3rd Year Student",
            ),
            item(
                "Laptop Stand Adjustable",
                "Barely used · Perfect condition",
                "₹350 · MBA Student",
            ),
            item(
                "Engineering Drawing Kit",
                "Complete set with compass",
                "₹200 · 1st Year",
            ),
            item(
                "TI-84 Plus Calculator",
                "Great condition · With manual",
                "₹800 · Final Year",
            ),
        ],
    );

    catalog.insert(
        Category::LostFound,
        vec![
            item(
                "Blue Water Bottle",
                "Found near Library Block A",
                "Reported today at 2:30 PM",
            ),
            item(
                "Black Notebook with Red Cover",
                "Found in Canteen",
                "Reported yesterday",
            ),
            item("Lost: Silver Watch", "Near Sports Ground", "Lost on Monday"),
            item("Found: USB Drive 32GB", "In Computer Lab 3", "Reported today"),
            item("Lost: Blue Backpack", "Contains textbooks", "Lost near Hostel B"),
        ],
    );

    catalog.insert(
        Category::Notes,
        vec![
            item(
                "TOC PYQs 2024",
                "Complete with solutions · Semester 4",
                "Uploaded by seniors · 156 downloads",
            ),
            item(
                "DSA Complete Notes",
                "Handwritten notes with diagrams",
                "Uploaded 2 days ago · 89 downloads",
            ),
            item(
                "DBMS Tutorial Series",
                "Complete SQL and NoSQL notes",
                "Uploaded last week · 234 downloads",
            ),
            item(
                "Computer Networks PYQs",
                "Last 5 years papers",
                "Uploaded 1 week ago · 178 downloads",
            ),
            item(
                "Operating Systems Notes",
                "Process, threads, scheduling",
                "Uploaded 3 days ago · 145 downloads",
            ),
        ],
    );

    catalog.insert(
        Category::Events,
        vec![
            item(
                "AI/ML Workshop",
                "Hands-on machine learning session",
                "Tomorrow 4 PM · Seminar Hall",
            ),
            item(
                "CodeStorm Hackathon 2024",
                "48-hour coding competition",
                "Next Week · Main Hall",
            ),
            item(
                "Tech Talk: Web3 & Blockchain",
                "Guest lecture by industry expert",
                "Friday 3 PM · Auditorium",
            ),
            item(
                "Photography Club Meetup",
                "Portfolio review session",
                "Sunday 11 AM · Campus Garden",
            ),
            item(
                "Robotics Workshop",
                "Build your first robot",
                "Saturday 2 PM · Lab 4",
            ),
        ],
    );

    catalog.insert(
        Category::Complaints,
        vec![
            item(
                "WiFi Issue – Hostel B5",
                "Slow internet connection in rooms",
                "Status: In Progress · 2 days old",
            ),
            item(
                "Mess Food Quality",
                "Quality concerns during dinner",
                "Status: Under Review · 1 day old",
            ),
            item(
                "Library AC Not Working",
                "Reading hall is too hot",
                "Status: Resolved · Today",
            ),
            item(
                "Streetlight Problem",
                "Lights not working near Block C",
                "Status: Pending · 3 days old",
            ),
            item(
                "Water Shortage in Hostel A",
                "No water supply in morning",
                "Status: In Progress · Today",
            ),
        ],
    );

    catalog
});

/// Process-wide keyboard commands. Consuming surfaces install the bindings
/// and are responsible for suppressing the platform default on intercept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UiCommand {
    FocusSearch,
    ToggleAssistant,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Shortcut {
    pub keys: &'static str,
    pub command: UiCommand,
}

pub const SHORTCUTS: &[Shortcut] = &[
    Shortcut {
        keys: "mod+k",
        command: UiCommand::FocusSearch,
    },
    Shortcut {
        keys: "mod+/",
        command: UiCommand::ToggleAssistant,
    },
];
