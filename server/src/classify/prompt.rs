//! Prompt construction and reply interpretation

use grocery_ai::SectionKey;

const PROMPT_HEAD: &str = "Classify the following grocery item into one of these categories: ";
const PROMPT_TAIL: &str = ". Respond with only the category name, nothing else. Item: ";

/// Display names of every section, comma separated, in display order
pub fn category_list() -> String {
    SectionKey::ALL
        .iter()
        .map(|s| s.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn build_prompt(item: &str) -> String {
    format!("{}{}{}{}", PROMPT_HEAD, category_list(), PROMPT_TAIL, item)
}

/// Map a model reply to a section; anything unrecognized is `Other`.
pub fn parse_reply(reply: &str) -> SectionKey {
    let cleaned = reply
        .trim()
        .trim_end_matches('.')
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '`' || c == '*')
        .trim();
    SectionKey::from_display_name(cleaned).unwrap_or(SectionKey::FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_every_category_in_order() {
        let prompt = build_prompt("milk");
        assert!(prompt.starts_with(
            "Classify the following grocery item into one of these categories: Produce, Dairy, Meat & Seafood, "
        ));
        assert!(prompt.contains("Health & Personal Care, Other. Respond with only the category name"));
        assert!(prompt.ends_with("Item: milk"));
    }

    #[test]
    fn test_parse_reply_is_lenient_about_whitespace_and_case() {
        assert_eq!(parse_reply("Dairy"), SectionKey::Dairy);
        assert_eq!(parse_reply("  dairy\n"), SectionKey::Dairy);
        assert_eq!(parse_reply("MEAT & SEAFOOD"), SectionKey::MeatSeafood);
        assert_eq!(parse_reply("\"Bakery\"."), SectionKey::Bakery);
    }

    #[test]
    fn test_parse_reply_falls_back_to_other() {
        assert_eq!(parse_reply("I think this is dairy"), SectionKey::Other);
        assert_eq!(parse_reply(""), SectionKey::Other);
        assert_eq!(parse_reply("Deli"), SectionKey::Other);
    }
}
