//! Menu text extraction and parsing
//!
//! Turns the rendered text of a menu page into a [`MenuResult`]:
//! - [`segment`]: cut out the menu section window between start and stop markers
//! - [`classify`]: fold lines into station headers and food items
//! - [`food_item`]: parse one line into name, calories, description and dietary tags
//!
//! All keyword lists live in [`MenuVocabulary`] so they can be swapped through configuration.

pub mod classify;
pub mod food_item;
pub mod model;
pub mod segment;
pub mod vocabulary;

pub use classify::{LineKind, MenuListing, classify, classify_line};
pub use food_item::{parse_food_item, parse_food_item_with};
pub use model::{FoodItem, MenuResult, MenuSelection, today_label};
pub use segment::menu_section;
pub use vocabulary::MenuVocabulary;

use crate::error::{Result, ScrapeError};

/// Build the menu for a selection out of the page's rendered text
pub fn extract_menu(selection: &MenuSelection, page_text: &str, vocabulary: &MenuVocabulary) -> Result<MenuResult> {
    if page_text.trim().is_empty() {
        return Err(ScrapeError::ExtractionFailed("page has no rendered text".to_string()));
    }

    let section = menu_section(page_text.lines(), vocabulary);
    if section.is_empty() {
        return Err(ScrapeError::ExtractionFailed(format!(
            "no menu section found for {} / {} / {}",
            selection.dining_hall, selection.date, selection.meal
        )));
    }
    log::debug!("Menu section spans {} lines", section.len());

    let MenuListing { stations, items } = classify(section, vocabulary);
    let (express_items, items): (Vec<FoodItem>, Vec<FoodItem>) =
        items.into_iter().partition(|item| is_express_item(item, vocabulary));

    log::info!("Parsed {} items and {} express items across {} stations", items.len(), express_items.len(), stations.len());

    Ok(MenuResult { selection: selection.clone(), stations, items, express_items })
}

/// True once the menu section holds a station header or a calorie-annotated line.
///
/// The filter widget's own labels ("Today's Menu", "Lunch") already open the
/// section, so a non-empty section alone does not mean the menu has rendered.
pub fn has_menu_content(page_text: &str, vocabulary: &MenuVocabulary) -> bool {
    menu_section(page_text.lines(), vocabulary).into_iter().any(|line| {
        let line = food_item::normalize_whitespace(line);
        food_item::find_calories(&line).is_some() || vocabulary.is_station_header(&line)
    })
}

fn is_express_item(item: &FoodItem, vocabulary: &MenuVocabulary) -> bool {
    vocabulary.is_express(&item.station)
        || vocabulary.is_express(&item.name)
        || item.description.as_deref().is_some_and(|d| vocabulary.is_express(d))
}
