use serde::{Deserialize, Serialize};

/// Keyword lists driving segmentation, classification and item parsing.
///
/// These are tuned to one site's wording and are meant to be replaced
/// through configuration when the site changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuVocabulary {
    /// A line containing any of these opens the menu section
    pub start_markers: Vec<String>,

    /// A line containing any of these closes the menu section
    pub stop_markers: Vec<String>,

    /// Phrases identifying station headers
    pub station_phrases: Vec<String>,

    /// Lines beginning with any of these are instructions, not food
    pub noise_prefixes: Vec<String>,

    /// Dietary tags detected in item text, reported in this order
    pub dietary_tags: Vec<String>,

    /// Items whose station or text contains one of these are express items
    pub express_markers: Vec<String>,

    /// Characters stripped from item text before parsing
    pub decorations: Vec<char>,

    /// Shortest line, in chars, considered as a food item
    pub min_line_length: usize,

    /// Longest line, in chars, considered as a station header
    pub max_station_length: usize,

    /// Names must be longer than this, in chars, to be split at a comma
    pub min_split_length: usize,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for MenuVocabulary {
    fn default() -> Self {
        Self {
            start_markers: strings(&["menu", "entree", "entrée", "breakfast", "brunch", "lunch", "dinner", "cal)"]),
            stop_markers: strings(&[
                "copyright",
                "©",
                "privacy",
                "accessibility",
                "terms of use",
                "all rights reserved",
                "land acknowledgement",
            ]),
            station_phrases: strings(&[
                "express meals",
                "vegan meal",
                "vegetarian meal",
                "halal meal",
                "entrees",
                "entrées",
                "main plate",
                "station",
                "salad bar",
                "soup of the day",
                "desserts",
                "sides",
            ]),
            noise_prefixes: strings(&["select", "pick", "remember", "note:", "choose", "click", "please"]),
            dietary_tags: strings(&["vegan", "vegetarian", "gluten-free", "dairy-free", "organic", "local", "halal"]),
            express_markers: strings(&["express", "cash"]),
            decorations: vec!['*', '®', '™'],
            min_line_length: 3,
            max_station_length: 40,
            min_split_length: 10,
        }
    }
}

/// True when `needle` occurs in `haystack` without a letter or digit glued to either end
fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

impl MenuVocabulary {
    /// Case-insensitive containment against any of the needles
    pub(crate) fn contains_any(haystack: &str, needles: &[String]) -> bool {
        let haystack = haystack.to_lowercase();
        needles.iter().any(|needle| haystack.contains(&needle.to_lowercase()))
    }

    pub fn is_start(&self, line: &str) -> bool {
        Self::contains_any(line, &self.start_markers)
    }

    pub fn is_stop(&self, line: &str) -> bool {
        Self::contains_any(line, &self.stop_markers)
    }

    /// Whole-word match, so "Cash Only" counts and "Cashew" does not
    pub fn is_express(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.express_markers.iter().any(|marker| contains_word(&lower, &marker.to_lowercase()))
    }

    /// Too short, or instructional text such as "Select your dining hall"
    pub fn is_noise(&self, line: &str) -> bool {
        if line.chars().count() < self.min_line_length {
            return true;
        }
        let lower = line.to_lowercase();
        self.noise_prefixes.iter().any(|prefix| {
            let prefix = prefix.to_lowercase();
            match lower.strip_prefix(&prefix) {
                // whole-word match, so "Pickled Beets" is not "pick"
                Some(rest) => {
                    !prefix.ends_with(char::is_alphanumeric) || !rest.starts_with(char::is_alphanumeric)
                }
                None => false,
            }
        })
    }

    /// Station phrase present and short enough to be a header
    pub fn is_station_header(&self, line: &str) -> bool {
        line.chars().count() <= self.max_station_length && Self::contains_any(line, &self.station_phrases)
    }
}
