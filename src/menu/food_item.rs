use std::{borrow::Cow, sync::OnceLock};

use indexmap::IndexSet;
use regex::Regex;

use super::{FoodItem, MenuVocabulary};

/// Collapse whitespace runs to a single space and trim the ends
pub fn normalize_whitespace(s: &str) -> Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s+").expect("regex should be valid"));
    re.replace_all(s.trim(), " ")
}

fn calorie_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "cal" must not end a longer word: "(350cal)" and "(low cal)" match, "(Local)" does not
    RE.get_or_init(|| {
        Regex::new(r"(?i)\(((?:[^()]*[^()\p{L}])?)\s*cal(?:ories)?\s*\)").expect("regex should be valid")
    })
}

/// Position of the first calorie annotation in the text, with the calories it holds
pub fn find_calories(text: &str) -> Option<(std::ops::Range<usize>, Option<u32>)> {
    let captures = calorie_pattern().captures(text)?;
    let whole = captures.get(0)?;
    let digits: String = captures.get(1)?.as_str().chars().filter(char::is_ascii_digit).collect();
    Some((whole.range(), digits.parse().ok()))
}

/// Parse one menu line with the default vocabulary.
///
/// ```
/// use dining_menu::menu::parse_food_item;
///
/// let item = parse_food_item("Grilled Chicken Breast (350 cal)", "Entrees").unwrap();
/// assert_eq!(item.name, "Grilled Chicken Breast");
/// assert_eq!(item.calories, Some(350));
/// assert!(parse_food_item("Select your dining hall", "").is_none());
/// ```
pub fn parse_food_item(line: &str, station: &str) -> Option<FoodItem> {
    static DEFAULT: OnceLock<MenuVocabulary> = OnceLock::new();
    parse_food_item_with(line, station, DEFAULT.get_or_init(MenuVocabulary::default))
}

/// Parse one menu line into a [`FoodItem`], or `None` when it is not food.
pub fn parse_food_item_with(line: &str, station: &str, vocabulary: &MenuVocabulary) -> Option<FoodItem> {
    let undecorated: String = line.chars().filter(|c| !vocabulary.decorations.contains(c)).collect();
    let text = normalize_whitespace(&undecorated);

    if vocabulary.is_noise(&text) {
        return None;
    }

    let (name, calories) = match find_calories(&text) {
        Some((range, calories)) => {
            let without = format!("{} {}", &text[..range.start], &text[range.end..]);
            (normalize_whitespace(&without).into_owned(), calories)
        }
        None => (text.to_string(), None),
    };

    let (name, description) = split_description(name, vocabulary.min_split_length);

    let lower = text.to_lowercase();
    let dietary_tags: IndexSet<String> = vocabulary
        .dietary_tags
        .iter()
        .filter(|tag| lower.contains(&tag.to_lowercase()))
        .cloned()
        .collect();

    Some(FoodItem { name, calories, description, station: station.to_string(), dietary_tags })
}

/// "Stir Fry, with rice" becomes ("Stir Fry", Some("with rice")) when the name is long enough
fn split_description(name: String, min_split_length: usize) -> (String, Option<String>) {
    if name.chars().count() <= min_split_length {
        return (name, None);
    }
    match name.split_once(',') {
        Some((head, tail)) => {
            let tail = tail.trim().trim_start_matches(',').trim();
            let description = (!tail.is_empty()).then(|| tail.to_string());
            (head.trim().to_string(), description)
        }
        None => (name, None),
    }
}
