use indexmap::IndexSet;

use super::food_item::{find_calories, normalize_whitespace, parse_food_item_with};
use super::{FoodItem, MenuVocabulary};

/// Stations and items found in a run of menu lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuListing {
    pub stations: IndexSet<String>,
    pub items: Vec<FoodItem>,
}

/// How a single line was read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Station(String),
    Item(String),
    Noise,
}

/// Classify one line on its own, without regard to the lines around it
pub fn classify_line(line: &str, vocabulary: &MenuVocabulary) -> LineKind {
    let line = normalize_whitespace(line);

    // an annotated line is always food, even when it mentions a station word
    if vocabulary.is_station_header(&line) && find_calories(&line).is_none() {
        LineKind::Station(line.into_owned())
    } else if vocabulary.is_noise(&line) {
        LineKind::Noise
    } else {
        LineKind::Item(line.into_owned())
    }
}

/// Group item lines under the most recent station header.
///
/// Items appearing before any header get an empty station.
pub fn classify<'a, I>(lines: I, vocabulary: &MenuVocabulary) -> MenuListing
where
    I: IntoIterator<Item = &'a str>,
{
    let (listing, _) = lines.into_iter().fold(
        (MenuListing::default(), String::new()),
        |(mut listing, station), line| match classify_line(line, vocabulary) {
            LineKind::Station(header) => {
                listing.stations.insert(header.clone());
                (listing, header)
            }
            LineKind::Item(text) => {
                if let Some(item) = parse_food_item_with(&text, &station, vocabulary) {
                    listing.items.push(item);
                }
                (listing, station)
            }
            LineKind::Noise => (listing, station),
        },
    );
    listing
}
