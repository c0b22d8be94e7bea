//! Section Entity
//!
//! The fixed set of store sections items are grouped into.

use serde::{Deserialize, Serialize};

/// Store section an item is filed under
///
/// Declaration order is display order. Unknown or missing values
/// deserialize to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum SectionKey {
    Produce,
    Dairy,
    MeatSeafood,
    Bakery,
    Frozen,
    CannedGoods,
    Snacks,
    Beverages,
    CondimentsSauces,
    PastaGrains,
    Baking,
    BreakfastCereal,
    HouseholdCleaning,
    HealthPersonalCare,
    /// Fallback section
    #[default]
    Other,
}

impl SectionKey {
    /// All sections in display order
    pub const ALL: [SectionKey; 15] = [
        SectionKey::Produce,
        SectionKey::Dairy,
        SectionKey::MeatSeafood,
        SectionKey::Bakery,
        SectionKey::Frozen,
        SectionKey::CannedGoods,
        SectionKey::Snacks,
        SectionKey::Beverages,
        SectionKey::CondimentsSauces,
        SectionKey::PastaGrains,
        SectionKey::Baking,
        SectionKey::BreakfastCereal,
        SectionKey::HouseholdCleaning,
        SectionKey::HealthPersonalCare,
        SectionKey::Other,
    ];

    pub const FALLBACK: SectionKey = SectionKey::Other;

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Produce => "produce",
            SectionKey::Dairy => "dairy",
            SectionKey::MeatSeafood => "meat-seafood",
            SectionKey::Bakery => "bakery",
            SectionKey::Frozen => "frozen",
            SectionKey::CannedGoods => "canned-goods",
            SectionKey::Snacks => "snacks",
            SectionKey::Beverages => "beverages",
            SectionKey::CondimentsSauces => "condiments-sauces",
            SectionKey::PastaGrains => "pasta-grains",
            SectionKey::Baking => "baking",
            SectionKey::BreakfastCereal => "breakfast-cereal",
            SectionKey::HouseholdCleaning => "household-cleaning",
            SectionKey::HealthPersonalCare => "health-personal-care",
            SectionKey::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SectionKey::Produce => "Produce",
            SectionKey::Dairy => "Dairy",
            SectionKey::MeatSeafood => "Meat & Seafood",
            SectionKey::Bakery => "Bakery",
            SectionKey::Frozen => "Frozen",
            SectionKey::CannedGoods => "Canned Goods",
            SectionKey::Snacks => "Snacks",
            SectionKey::Beverages => "Beverages",
            SectionKey::CondimentsSauces => "Condiments & Sauces",
            SectionKey::PastaGrains => "Pasta & Grains",
            SectionKey::Baking => "Baking",
            SectionKey::BreakfastCereal => "Breakfast & Cereal",
            SectionKey::HouseholdCleaning => "Household & Cleaning",
            SectionKey::HealthPersonalCare => "Health & Personal Care",
            SectionKey::Other => "Other",
        }
    }

    /// Parse a storage key, falling back to `Other`
    pub fn from_key(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .unwrap_or(Self::FALLBACK)
    }

    /// Match a display name case-insensitively
    pub fn from_display_name(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|section| section.display_name().eq_ignore_ascii_case(s))
    }
}

impl From<String> for SectionKey {
    fn from(s: String) -> Self {
        SectionKey::from_key(&s)
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_keys_round_trip() {
        for section in SectionKey::ALL {
            assert_eq!(SectionKey::from_key(section.as_str()), section);
        }
        assert_eq!(SectionKey::from_key("toys"), SectionKey::Other);
    }

    #[test]
    fn test_display_name_match_ignores_case() {
        assert_eq!(SectionKey::from_display_name("meat & seafood"), Some(SectionKey::MeatSeafood));
        assert_eq!(SectionKey::from_display_name("  DAIRY\n"), Some(SectionKey::Dairy));
        assert_eq!(SectionKey::from_display_name("Dairy products"), None);
    }

    #[test]
    fn test_section_serialization() {
        let json = serde_json::to_string(&SectionKey::CondimentsSauces).unwrap();
        assert_eq!(json, "\"condiments-sauces\"");

        let parsed: SectionKey = serde_json::from_str("\"breakfast-cereal\"").unwrap();
        assert_eq!(parsed, SectionKey::BreakfastCereal);

        let unknown: SectionKey = serde_json::from_str("\"spaceship-parts\"").unwrap();
        assert_eq!(unknown, SectionKey::Other);
    }
}
