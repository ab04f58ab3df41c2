use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// What the user asked for: a dining hall, a date label and a meal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSelection {
    pub dining_hall: String,

    /// Human-readable date label, e.g. "Fri, Sep 13"
    pub date: String,

    pub meal: String,
}

impl MenuSelection {
    pub fn new(dining_hall: impl Into<String>, date: impl Into<String>, meal: impl Into<String>) -> Self {
        Self { dining_hall: dining_hall.into(), date: date.into(), meal: meal.into() }
    }

    /// Selection dated today, formatted like the site's day buttons
    pub fn for_today(dining_hall: impl Into<String>, meal: impl Into<String>) -> Self {
        Self::new(dining_hall, today_label(), meal)
    }

    /// The part of the date the day buttons are matched against.
    ///
    /// "Fri, Sep 13" becomes "Sep 13"; labels without a comma are used as is.
    pub fn date_label(&self) -> &str {
        match self.date.split_once(',') {
            Some((_, rest)) => rest.trim(),
            None => self.date.trim(),
        }
    }
}

/// Today's date as "Fri, Sep 13"
pub fn today_label() -> String {
    chrono::Local::now().format("%a, %b %d").to_string()
}

/// One parsed menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub calories: Option<u32>,
    pub description: Option<String>,

    /// Label of the station the item was listed under, empty if none was seen
    pub station: String,

    #[serde(default)]
    pub dietary_tags: IndexSet<String>,
}

impl FoodItem {
    /// Items whose name vanished once the calorie annotation was removed
    pub fn is_low_confidence(&self) -> bool {
        self.name.is_empty()
    }
}

/// Structured menu for one selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuResult {
    #[serde(flatten)]
    pub selection: MenuSelection,

    pub stations: IndexSet<String>,
    pub items: Vec<FoodItem>,
    pub express_items: Vec<FoodItem>,
}

impl MenuResult {
    pub fn total_items(&self) -> usize {
        self.items.len() + self.express_items.len()
    }

    /// Regular items listed under the given station
    pub fn items_at<'a>(&'a self, station: &'a str) -> impl Iterator<Item = &'a FoodItem> + 'a {
        self.items.iter().filter(move |item| item.station == station)
    }
}
