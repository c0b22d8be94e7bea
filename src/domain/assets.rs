//! List Appearance
//!
//! Icon and color selectors a list can carry.

use serde::{Deserialize, Serialize};

/// Icon shown next to a list name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ListIcon {
    #[default]
    Cart,
    Store,
    Home,
    Party,
    Star,
    Heart,
    Camping,
    Work,
    Gift,
    Restaurant,
    Coffee,
    Plane,
    Car,
    Fitness,
    Pet,
    Baby,
    Garden,
    Book,
    Music,
    Celebration,
}

impl ListIcon {
    pub const ALL: [ListIcon; 20] = [
        ListIcon::Cart,
        ListIcon::Store,
        ListIcon::Home,
        ListIcon::Party,
        ListIcon::Star,
        ListIcon::Heart,
        ListIcon::Camping,
        ListIcon::Work,
        ListIcon::Gift,
        ListIcon::Restaurant,
        ListIcon::Coffee,
        ListIcon::Plane,
        ListIcon::Car,
        ListIcon::Fitness,
        ListIcon::Pet,
        ListIcon::Baby,
        ListIcon::Garden,
        ListIcon::Book,
        ListIcon::Music,
        ListIcon::Celebration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListIcon::Cart => "cart",
            ListIcon::Store => "store",
            ListIcon::Home => "home",
            ListIcon::Party => "party",
            ListIcon::Star => "star",
            ListIcon::Heart => "heart",
            ListIcon::Camping => "camping",
            ListIcon::Work => "work",
            ListIcon::Gift => "gift",
            ListIcon::Restaurant => "restaurant",
            ListIcon::Coffee => "coffee",
            ListIcon::Plane => "plane",
            ListIcon::Car => "car",
            ListIcon::Fitness => "fitness",
            ListIcon::Pet => "pet",
            ListIcon::Baby => "baby",
            ListIcon::Garden => "garden",
            ListIcon::Book => "book",
            ListIcon::Music => "music",
            ListIcon::Celebration => "celebration",
        }
    }

    pub fn from_key(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|icon| icon.as_str() == s)
            .unwrap_or_default()
    }
}

impl From<String> for ListIcon {
    fn from(s: String) -> Self {
        ListIcon::from_key(&s)
    }
}

/// Accent color of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ListColor {
    #[default]
    Blue,
    Green,
    Purple,
    Orange,
    Pink,
    Teal,
    Red,
    Yellow,
    Indigo,
    Gray,
}

impl ListColor {
    pub const ALL: [ListColor; 10] = [
        ListColor::Blue,
        ListColor::Green,
        ListColor::Purple,
        ListColor::Orange,
        ListColor::Pink,
        ListColor::Teal,
        ListColor::Red,
        ListColor::Yellow,
        ListColor::Indigo,
        ListColor::Gray,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListColor::Blue => "blue",
            ListColor::Green => "green",
            ListColor::Purple => "purple",
            ListColor::Orange => "orange",
            ListColor::Pink => "pink",
            ListColor::Teal => "teal",
            ListColor::Red => "red",
            ListColor::Yellow => "yellow",
            ListColor::Indigo => "indigo",
            ListColor::Gray => "gray",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            ListColor::Blue => "#3B82F6",
            ListColor::Green => "#22C55E",
            ListColor::Purple => "#A855F7",
            ListColor::Orange => "#F97316",
            ListColor::Pink => "#EC4899",
            ListColor::Teal => "#14B8A6",
            ListColor::Red => "#EF4444",
            ListColor::Yellow => "#EAB308",
            ListColor::Indigo => "#6366F1",
            ListColor::Gray => "#6B7280",
        }
    }

    pub fn from_key(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .unwrap_or_default()
    }
}

impl From<String> for ListColor {
    fn from(s: String) -> Self {
        ListColor::from_key(&s)
    }
}
