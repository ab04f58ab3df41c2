use crate::driver::Locator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three filter selections made on the menu page, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    DiningHall,
    Date,
    Meal,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DiningHall => "dining hall",
            Self::Date => "date",
            Self::Meal => "meal",
        })
    }
}

/// One way of turning a requested value into a locator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// Elements matching a CSS selector whose text contains the value
    Css { selector: String },

    /// Elements whose own text contains the value
    Text,

    AriaLabel,

    ValueAttribute,

    /// Class attribute containing the value as a slug ("Ban Righ Hall" -> "ban-righ-hall")
    ClassSlug,

    /// Id attribute containing the value as a slug
    IdSlug,
}

fn slug(value: &str) -> String {
    value.trim().to_lowercase().replace(' ', "-")
}

impl Strategy {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css { selector: selector.into() }
    }

    pub fn locator(&self, value: &str) -> Locator {
        match self {
            Self::Css { selector } => Locator::css_with_text(selector.clone(), value),
            Self::Text => Locator::text(value),
            Self::AriaLabel => Locator::attribute("aria-label", value),
            Self::ValueAttribute => Locator::attribute("value", value),
            Self::ClassSlug => Locator::attribute("class", slug(value)),
            Self::IdSlug => Locator::attribute("id", slug(value)),
        }
    }

    /// Locator listing every option this strategy could choose from, if it has one
    pub fn listing(&self) -> Option<Locator> {
        match self {
            Self::Css { selector } => Some(Locator::css(selector.clone())),
            _ => None,
        }
    }

    /// Default fallback chain: the site's own filter widget first, then generic matches
    pub fn defaults_for(stage: Stage) -> Vec<Self> {
        let widget = match stage {
            Stage::DiningHall => "label[for^='edit-dining-hall']",
            Stage::Date => "a.menu-filter__day[role='button']",
            Stage::Meal => "a.menu-filter__meal[role='button']",
        };
        vec![
            Self::css(widget),
            Self::Text,
            Self::AriaLabel,
            Self::ValueAttribute,
            Self::ClassSlug,
            Self::IdSlug,
        ]
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css { selector } => write!(f, "css {}", selector),
            Self::Text => f.write_str("text"),
            Self::AriaLabel => f.write_str("aria-label"),
            Self::ValueAttribute => f.write_str("value attribute"),
            Self::ClassSlug => f.write_str("class slug"),
            Self::IdSlug => f.write_str("id slug"),
        }
    }
}
