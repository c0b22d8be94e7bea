//! Autocomplete
//!
//! Prefix suggestions ranked by how often an item was added before.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::domain::{SectionKey, ShoppingList};

/// Normalized item name -> observation count
pub type ItemFrequency = BTreeMap<String, u32>;

/// Minimum typed characters before suggestions appear
pub const MIN_PREFIX_CHARS: usize = 2;
/// Maximum number of suggestions returned
pub const MAX_SUGGESTIONS: usize = 8;

/// Entry of the built-in reference list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonItem {
    pub name: &'static str,
    pub section: SectionKey,
}

impl CommonItem {
    const fn new(name: &'static str, section: SectionKey) -> Self {
        Self { name, section }
    }
}

/// Lower-case and trim an item name
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Count each normalized item name once per list, over all lists (archived included)
pub fn build_frequency_from_lists(lists: &[ShoppingList]) -> ItemFrequency {
    let mut frequency = ItemFrequency::new();
    for list in lists {
        let mut seen_in_list = HashSet::new();
        for item in &list.items {
            let name = normalize_name(&item.name);
            if seen_in_list.insert(name.clone()) {
                *frequency.entry(name).or_insert(0) += 1;
            }
        }
    }
    frequency
}

/// Merge stored history with counts derived from the lists, keeping the larger count
pub fn aggregate_item_frequency(stored: &ItemFrequency, lists: &[ShoppingList]) -> ItemFrequency {
    let mut aggregated = stored.clone();
    for (name, count) in build_frequency_from_lists(lists) {
        let entry = aggregated.entry(name).or_insert(0);
        *entry = (*entry).max(count);
    }
    aggregated
}

pub fn increment_item_frequency(frequency: &mut ItemFrequency, name: &str) {
    let name = normalize_name(name);
    if name.is_empty() {
        return;
    }
    *frequency.entry(name).or_insert(0) += 1;
}

/// Section of a built-in item, if `name` is one
pub fn common_item_section(name: &str) -> Option<SectionKey> {
    let name = normalize_name(name);
    COMMON_ITEMS
        .iter()
        .find(|item| item.name.to_lowercase() == name)
        .map(|item| item.section)
}

fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Suggestions for a typed prefix.
///
/// Ranked by descending frequency, ties broken alphabetically.
pub fn get_suggestions(input: &str, frequency: &ItemFrequency) -> Vec<String> {
    let prefix = normalize_name(input);
    if prefix.chars().count() < MIN_PREFIX_CHARS {
        return Vec::new();
    }

    let canonical: BTreeMap<String, &'static str> = COMMON_ITEMS
        .iter()
        .map(|item| (item.name.to_lowercase(), item.name))
        .collect();

    let mut candidates: BTreeSet<String> = COMMON_ITEMS.iter().map(|item| item.name.to_string()).collect();
    for name in frequency.keys() {
        match canonical.get(name) {
            Some(original) => candidates.insert(original.to_string()),
            None => candidates.insert(capitalize_first(name)),
        };
    }

    let mut matching: Vec<(u32, String, String)> = candidates
        .into_iter()
        .filter_map(|name| {
            let lower = name.to_lowercase();
            if !lower.starts_with(&prefix) {
                return None;
            }
            let count = frequency.get(&lower).copied().unwrap_or(0);
            Some((count, lower, name))
        })
        .collect();

    matching.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)).then_with(|| a.2.cmp(&b.2)));

    matching
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, _, name)| name)
        .collect()
}

/// Built-in reference list of everyday grocery items
pub static COMMON_ITEMS: &[CommonItem] = &[
    // Produce
    CommonItem::new("Apple", SectionKey::Produce),
    CommonItem::new("Banana", SectionKey::Produce),
    CommonItem::new("Orange", SectionKey::Produce),
    CommonItem::new("Lemon", SectionKey::Produce),
    CommonItem::new("Lime", SectionKey::Produce),
    CommonItem::new("Grapefruit", SectionKey::Produce),
    CommonItem::new("Grape", SectionKey::Produce),
    CommonItem::new("Strawberry", SectionKey::Produce),
    CommonItem::new("Blueberry", SectionKey::Produce),
    CommonItem::new("Raspberry", SectionKey::Produce),
    CommonItem::new("Blackberry", SectionKey::Produce),
    CommonItem::new("Watermelon", SectionKey::Produce),
    CommonItem::new("Cantaloupe", SectionKey::Produce),
    CommonItem::new("Honeydew", SectionKey::Produce),
    CommonItem::new("Peach", SectionKey::Produce),
    CommonItem::new("Nectarine", SectionKey::Produce),
    CommonItem::new("Plum", SectionKey::Produce),
    CommonItem::new("Pear", SectionKey::Produce),
    CommonItem::new("Cherry", SectionKey::Produce),
    CommonItem::new("Mango", SectionKey::Produce),
    CommonItem::new("Pineapple", SectionKey::Produce),
    CommonItem::new("Kiwi", SectionKey::Produce),
    CommonItem::new("Avocado", SectionKey::Produce),
    CommonItem::new("Tomato", SectionKey::Produce),
    CommonItem::new("Cucumber", SectionKey::Produce),
    CommonItem::new("Carrot", SectionKey::Produce),
    CommonItem::new("Celery", SectionKey::Produce),
    CommonItem::new("Lettuce", SectionKey::Produce),
    CommonItem::new("Spinach", SectionKey::Produce),
    CommonItem::new("Kale", SectionKey::Produce),
    CommonItem::new("Broccoli", SectionKey::Produce),
    CommonItem::new("Cauliflower", SectionKey::Produce),
    CommonItem::new("Bell pepper", SectionKey::Produce),
    CommonItem::new("Onion", SectionKey::Produce),
    CommonItem::new("Garlic", SectionKey::Produce),
    CommonItem::new("Potato", SectionKey::Produce),
    CommonItem::new("Sweet potato", SectionKey::Produce),
    CommonItem::new("Mushroom", SectionKey::Produce),
    CommonItem::new("Zucchini", SectionKey::Produce),
    CommonItem::new("Squash", SectionKey::Produce),
    CommonItem::new("Eggplant", SectionKey::Produce),
    CommonItem::new("Asparagus", SectionKey::Produce),
    CommonItem::new("Green bean", SectionKey::Produce),
    CommonItem::new("Corn", SectionKey::Produce),
    CommonItem::new("Cabbage", SectionKey::Produce),
    CommonItem::new("Radish", SectionKey::Produce),
    CommonItem::new("Beet", SectionKey::Produce),
    CommonItem::new("Ginger", SectionKey::Produce),
    CommonItem::new("Cilantro", SectionKey::Produce),
    CommonItem::new("Basil", SectionKey::Produce),
    CommonItem::new("Parsley", SectionKey::Produce),

    // Dairy
    CommonItem::new("Milk", SectionKey::Dairy),
    CommonItem::new("Butter", SectionKey::Dairy),
    CommonItem::new("Cheese", SectionKey::Dairy),
    CommonItem::new("Cheddar cheese", SectionKey::Dairy),
    CommonItem::new("Mozzarella cheese", SectionKey::Dairy),
    CommonItem::new("Parmesan cheese", SectionKey::Dairy),
    CommonItem::new("Cream cheese", SectionKey::Dairy),
    CommonItem::new("Sour cream", SectionKey::Dairy),
    CommonItem::new("Yogurt", SectionKey::Dairy),
    CommonItem::new("Greek yogurt", SectionKey::Dairy),
    CommonItem::new("Cottage cheese", SectionKey::Dairy),
    CommonItem::new("Heavy cream", SectionKey::Dairy),
    CommonItem::new("Half and half", SectionKey::Dairy),
    CommonItem::new("Egg", SectionKey::Dairy),

    // MeatSeafood
    CommonItem::new("Chicken breast", SectionKey::MeatSeafood),
    CommonItem::new("Chicken thigh", SectionKey::MeatSeafood),
    CommonItem::new("Ground beef", SectionKey::MeatSeafood),
    CommonItem::new("Ground turkey", SectionKey::MeatSeafood),
    CommonItem::new("Steak", SectionKey::MeatSeafood),
    CommonItem::new("Pork chop", SectionKey::MeatSeafood),
    CommonItem::new("Bacon", SectionKey::MeatSeafood),
    CommonItem::new("Sausage", SectionKey::MeatSeafood),
    CommonItem::new("Hot dog", SectionKey::MeatSeafood),
    CommonItem::new("Ham", SectionKey::MeatSeafood),
    CommonItem::new("Deli turkey", SectionKey::MeatSeafood),
    CommonItem::new("Deli ham", SectionKey::MeatSeafood),
    CommonItem::new("Salmon", SectionKey::MeatSeafood),
    CommonItem::new("Tuna", SectionKey::MeatSeafood),
    CommonItem::new("Shrimp", SectionKey::MeatSeafood),
    CommonItem::new("Tilapia", SectionKey::MeatSeafood),
    CommonItem::new("Cod", SectionKey::MeatSeafood),

    // Bakery
    CommonItem::new("Bread", SectionKey::Bakery),
    CommonItem::new("Whole wheat bread", SectionKey::Bakery),
    CommonItem::new("Sourdough bread", SectionKey::Bakery),
    CommonItem::new("Bagel", SectionKey::Bakery),
    CommonItem::new("English muffin", SectionKey::Bakery),
    CommonItem::new("Tortilla", SectionKey::Bakery),
    CommonItem::new("Pita bread", SectionKey::Bakery),
    CommonItem::new("Croissant", SectionKey::Bakery),
    CommonItem::new("Roll", SectionKey::Bakery),
    CommonItem::new("Baguette", SectionKey::Bakery),
    CommonItem::new("Muffin", SectionKey::Bakery),
    CommonItem::new("Donut", SectionKey::Bakery),
    CommonItem::new("Cookie", SectionKey::Bakery),
    CommonItem::new("Brownie", SectionKey::Bakery),
    CommonItem::new("Cake", SectionKey::Bakery),
    CommonItem::new("Pie", SectionKey::Bakery),

    // Frozen
    CommonItem::new("Frozen pizza", SectionKey::Frozen),
    CommonItem::new("Frozen vegetable", SectionKey::Frozen),
    CommonItem::new("Frozen fruit", SectionKey::Frozen),
    CommonItem::new("Ice cream", SectionKey::Frozen),
    CommonItem::new("Frozen waffle", SectionKey::Frozen),
    CommonItem::new("Frozen meal", SectionKey::Frozen),
    CommonItem::new("Frozen chicken nugget", SectionKey::Frozen),
    CommonItem::new("Frozen fish fillet", SectionKey::Frozen),
    CommonItem::new("Popsicle", SectionKey::Frozen),

    // CannedGoods
    CommonItem::new("Canned tomato", SectionKey::CannedGoods),
    CommonItem::new("Canned bean", SectionKey::CannedGoods),
    CommonItem::new("Canned corn", SectionKey::CannedGoods),
    CommonItem::new("Canned tuna", SectionKey::CannedGoods),
    CommonItem::new("Canned soup", SectionKey::CannedGoods),
    CommonItem::new("Canned chicken", SectionKey::CannedGoods),
    CommonItem::new("Canned fruit", SectionKey::CannedGoods),
    CommonItem::new("Canned vegetable", SectionKey::CannedGoods),
    CommonItem::new("Canned salmon", SectionKey::CannedGoods),
    CommonItem::new("Canned chili", SectionKey::CannedGoods),

    // Snacks
    CommonItem::new("Chips", SectionKey::Snacks),
    CommonItem::new("Potato chip", SectionKey::Snacks),
    CommonItem::new("Tortilla chip", SectionKey::Snacks),
    CommonItem::new("Popcorn", SectionKey::Snacks),
    CommonItem::new("Pretzel", SectionKey::Snacks),
    CommonItem::new("Cracker", SectionKey::Snacks),
    CommonItem::new("Granola bar", SectionKey::Snacks),
    CommonItem::new("Protein bar", SectionKey::Snacks),
    CommonItem::new("Trail mix", SectionKey::Snacks),
    CommonItem::new("Nut", SectionKey::Snacks),
    CommonItem::new("Almond", SectionKey::Snacks),
    CommonItem::new("Peanut", SectionKey::Snacks),
    CommonItem::new("Cashew", SectionKey::Snacks),
    CommonItem::new("Walnut", SectionKey::Snacks),
    CommonItem::new("Peanut butter", SectionKey::Snacks),
    CommonItem::new("Dried fruit", SectionKey::Snacks),
    CommonItem::new("Raisin", SectionKey::Snacks),
    CommonItem::new("Candy", SectionKey::Snacks),
    CommonItem::new("Chocolate", SectionKey::Snacks),

    // Beverages
    CommonItem::new("Coffee", SectionKey::Beverages),
    CommonItem::new("Ground coffee", SectionKey::Beverages),
    CommonItem::new("Coffee pod", SectionKey::Beverages),
    CommonItem::new("Tea", SectionKey::Beverages),
    CommonItem::new("Green tea", SectionKey::Beverages),
    CommonItem::new("Black tea", SectionKey::Beverages),
    CommonItem::new("Herbal tea", SectionKey::Beverages),
    CommonItem::new("Orange juice", SectionKey::Beverages),
    CommonItem::new("Apple juice", SectionKey::Beverages),
    CommonItem::new("Cranberry juice", SectionKey::Beverages),
    CommonItem::new("Lemonade", SectionKey::Beverages),
    CommonItem::new("Soda", SectionKey::Beverages),
    CommonItem::new("Sparkling water", SectionKey::Beverages),
    CommonItem::new("Bottled water", SectionKey::Beverages),
    CommonItem::new("Sports drink", SectionKey::Beverages),
    CommonItem::new("Energy drink", SectionKey::Beverages),
    CommonItem::new("Almond milk", SectionKey::Beverages),
    CommonItem::new("Oat milk", SectionKey::Beverages),
    CommonItem::new("Soy milk", SectionKey::Beverages),

    // CondimentsSauces
    CommonItem::new("Ketchup", SectionKey::CondimentsSauces),
    CommonItem::new("Mustard", SectionKey::CondimentsSauces),
    CommonItem::new("Mayonnaise", SectionKey::CondimentsSauces),
    CommonItem::new("Relish", SectionKey::CondimentsSauces),
    CommonItem::new("Salsa", SectionKey::CondimentsSauces),
    CommonItem::new("Hot sauce", SectionKey::CondimentsSauces),
    CommonItem::new("Soy sauce", SectionKey::CondimentsSauces),
    CommonItem::new("Teriyaki sauce", SectionKey::CondimentsSauces),
    CommonItem::new("BBQ sauce", SectionKey::CondimentsSauces),
    CommonItem::new("Salad dressing", SectionKey::CondimentsSauces),
    CommonItem::new("Ranch dressing", SectionKey::CondimentsSauces),
    CommonItem::new("Italian dressing", SectionKey::CondimentsSauces),
    CommonItem::new("Olive oil", SectionKey::CondimentsSauces),
    CommonItem::new("Vegetable oil", SectionKey::CondimentsSauces),
    CommonItem::new("Canola oil", SectionKey::CondimentsSauces),
    CommonItem::new("Vinegar", SectionKey::CondimentsSauces),
    CommonItem::new("Balsamic vinegar", SectionKey::CondimentsSauces),
    CommonItem::new("Honey", SectionKey::CondimentsSauces),
    CommonItem::new("Maple syrup", SectionKey::CondimentsSauces),
    CommonItem::new("Pasta sauce", SectionKey::CondimentsSauces),
    CommonItem::new("Marinara sauce", SectionKey::CondimentsSauces),

    // PastaGrains
    CommonItem::new("Pasta", SectionKey::PastaGrains),
    CommonItem::new("Spaghetti", SectionKey::PastaGrains),
    CommonItem::new("Penne pasta", SectionKey::PastaGrains),
    CommonItem::new("Macaroni", SectionKey::PastaGrains),
    CommonItem::new("Lasagna noodle", SectionKey::PastaGrains),
    CommonItem::new("Rice", SectionKey::PastaGrains),
    CommonItem::new("White rice", SectionKey::PastaGrains),
    CommonItem::new("Brown rice", SectionKey::PastaGrains),
    CommonItem::new("Jasmine rice", SectionKey::PastaGrains),
    CommonItem::new("Quinoa", SectionKey::PastaGrains),
    CommonItem::new("Oatmeal", SectionKey::PastaGrains),
    CommonItem::new("Couscous", SectionKey::PastaGrains),

    // Baking
    CommonItem::new("Flour", SectionKey::Baking),
    CommonItem::new("All-purpose flour", SectionKey::Baking),
    CommonItem::new("Whole wheat flour", SectionKey::Baking),
    CommonItem::new("Sugar", SectionKey::Baking),
    CommonItem::new("Brown sugar", SectionKey::Baking),
    CommonItem::new("Powdered sugar", SectionKey::Baking),
    CommonItem::new("Baking powder", SectionKey::Baking),
    CommonItem::new("Baking soda", SectionKey::Baking),
    CommonItem::new("Vanilla extract", SectionKey::Baking),
    CommonItem::new("Yeast", SectionKey::Baking),
    CommonItem::new("Cornstarch", SectionKey::Baking),
    CommonItem::new("Chocolate chip", SectionKey::Baking),
    CommonItem::new("Cocoa powder", SectionKey::Baking),

    // BreakfastCereal
    CommonItem::new("Cereal", SectionKey::BreakfastCereal),
    CommonItem::new("Oat cereal", SectionKey::BreakfastCereal),
    CommonItem::new("Corn flakes", SectionKey::BreakfastCereal),
    CommonItem::new("Granola", SectionKey::BreakfastCereal),
    CommonItem::new("Pancake mix", SectionKey::BreakfastCereal),
    CommonItem::new("Syrup", SectionKey::BreakfastCereal),

    // HouseholdCleaning
    CommonItem::new("Paper towel", SectionKey::HouseholdCleaning),
    CommonItem::new("Toilet paper", SectionKey::HouseholdCleaning),
    CommonItem::new("Tissue", SectionKey::HouseholdCleaning),
    CommonItem::new("Dish soap", SectionKey::HouseholdCleaning),
    CommonItem::new("Laundry detergent", SectionKey::HouseholdCleaning),
    CommonItem::new("Fabric softener", SectionKey::HouseholdCleaning),
    CommonItem::new("Trash bag", SectionKey::HouseholdCleaning),
    CommonItem::new("All-purpose cleaner", SectionKey::HouseholdCleaning),
    CommonItem::new("Glass cleaner", SectionKey::HouseholdCleaning),
    CommonItem::new("Disinfectant wipe", SectionKey::HouseholdCleaning),
    CommonItem::new("Sponge", SectionKey::HouseholdCleaning),
    CommonItem::new("Aluminum foil", SectionKey::HouseholdCleaning),
    CommonItem::new("Plastic wrap", SectionKey::HouseholdCleaning),
    CommonItem::new("Ziploc bag", SectionKey::HouseholdCleaning),

    // HealthPersonalCare
    CommonItem::new("Toothpaste", SectionKey::HealthPersonalCare),
    CommonItem::new("Toothbrush", SectionKey::HealthPersonalCare),
    CommonItem::new("Dental floss", SectionKey::HealthPersonalCare),
    CommonItem::new("Shampoo", SectionKey::HealthPersonalCare),
    CommonItem::new("Conditioner", SectionKey::HealthPersonalCare),
    CommonItem::new("Body wash", SectionKey::HealthPersonalCare),
    CommonItem::new("Bar soap", SectionKey::HealthPersonalCare),
    CommonItem::new("Deodorant", SectionKey::HealthPersonalCare),
    CommonItem::new("Razor", SectionKey::HealthPersonalCare),
    CommonItem::new("Shaving cream", SectionKey::HealthPersonalCare),
    CommonItem::new("Sunscreen", SectionKey::HealthPersonalCare),
    CommonItem::new("Lotion", SectionKey::HealthPersonalCare),
    CommonItem::new("Band-aid", SectionKey::HealthPersonalCare),
    CommonItem::new("Vitamin", SectionKey::HealthPersonalCare),
    CommonItem::new("Pain reliever", SectionKey::HealthPersonalCare),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GroceryItem, ListColor, ListIcon};

    fn freq(entries: &[(&str, u32)]) -> ItemFrequency {
        entries.iter().map(|(name, count)| (name.to_string(), *count)).collect()
    }

    fn list_of(names: &[&str]) -> ShoppingList {
        let items = names.iter().map(|name| GroceryItem::new(*name)).collect();
        ShoppingList::new("Test", items, ListIcon::Cart, ListColor::Blue)
    }

    #[test]
    fn test_short_prefix_has_no_suggestions() {
        let frequency = freq(&[("banana", 10)]);
        assert!(get_suggestions("b", &frequency).is_empty());
        assert!(get_suggestions("  b ", &frequency).is_empty());
        assert!(get_suggestions("", &frequency).is_empty());
    }

    #[test]
    fn test_frequency_then_alphabetical_order() {
        let frequency = freq(&[("zz banana", 5), ("zz apple", 5), ("zz carrot", 2)]);
        let suggestions = get_suggestions("ZZ", &frequency);
        assert_eq!(suggestions, vec!["Zz apple", "Zz banana", "Zz carrot"]);
    }

    #[test]
    fn test_common_items_keep_canonical_casing() {
        let frequency = freq(&[("bagel", 5), ("banana", 5), ("basil", 2)]);
        let suggestions = get_suggestions("ba", &frequency);
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(&suggestions[..3], &["Bagel", "Banana", "Basil"]);
        // Zero-count common items follow alphabetically
        assert_eq!(suggestions[3], "Bacon");
    }

    #[test]
    fn test_custom_item_capitalized() {
        let frequency = freq(&[("kombucha", 1)]);
        assert_eq!(get_suggestions("kom", &frequency), vec!["Kombucha"]);
    }

    #[test]
    fn test_build_frequency_counts_once_per_list() {
        let lists = vec![
            list_of(&["Milk", " milk ", "Eggs"]),
            list_of(&["MILK"]),
        ];
        let frequency = build_frequency_from_lists(&lists);
        assert_eq!(frequency.get("milk"), Some(&2));
        assert_eq!(frequency.get("eggs"), Some(&1));
    }

    #[test]
    fn test_aggregate_takes_maximum() {
        let stored = freq(&[("milk", 7), ("tea", 1)]);
        let lists = vec![list_of(&["Milk", "Tea"]), list_of(&["Tea"]), list_of(&["Tea", "Jam"])];
        let aggregated = aggregate_item_frequency(&stored, &lists);
        assert_eq!(aggregated.get("milk"), Some(&7));
        assert_eq!(aggregated.get("tea"), Some(&3));
        assert_eq!(aggregated.get("jam"), Some(&1));
    }

    #[test]
    fn test_increment_normalizes() {
        let mut frequency = ItemFrequency::new();
        increment_item_frequency(&mut frequency, "  Greek Yogurt ");
        increment_item_frequency(&mut frequency, "greek yogurt");
        increment_item_frequency(&mut frequency, "   ");
        assert_eq!(frequency.get("greek yogurt"), Some(&2));
        assert_eq!(frequency.len(), 1);
    }

    #[test]
    fn test_common_item_section() {
        assert_eq!(common_item_section("bbq sauce"), Some(SectionKey::CondimentsSauces));
        assert_eq!(common_item_section("Mystery box"), None);
    }
}
