use crate::driver::{Locator, WaitPolicy};
use crate::error::{Result, ScrapeError};
use crate::menu::MenuVocabulary;
use crate::scrape::{Stage, Strategy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_MENU_URL: &str = "https://www.queensu.ca/food/eat-now/todays-menu";

/// Ordered selection strategies for each stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageStrategies {
    pub dining_hall: Vec<Strategy>,
    pub date: Vec<Strategy>,
    pub meal: Vec<Strategy>,
}

impl StageStrategies {
    pub fn for_stage(&self, stage: Stage) -> &[Strategy] {
        match stage {
            Stage::DiningHall => &self.dining_hall,
            Stage::Date => &self.date,
            Stage::Meal => &self.meal,
        }
    }
}

impl Default for StageStrategies {
    fn default() -> Self {
        Self {
            dining_hall: Strategy::defaults_for(Stage::DiningHall),
            date: Strategy::defaults_for(Stage::Date),
            meal: Strategy::defaults_for(Stage::Meal),
        }
    }
}

/// Everything site-specific about a scrape.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// url = "https://example.edu/menu"
///
/// [wait]
/// timeout_ms = 20000
/// poll_interval_ms = 500
///
/// [vocabulary]
/// express_markers = ["grab and go"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Menu page URL
    pub url: String,

    /// Polling policy for the anchor, selections and menu content
    pub wait: WaitPolicy,

    /// Shorter policy for the optional cookie banner
    pub cookie_wait: WaitPolicy,

    /// Element that must appear for the page to count as loaded
    pub anchor: Option<Locator>,

    /// Cookie consent overlay, dismissed when present
    pub cookie_banner: Option<Locator>,

    /// Accept controls tried in order on the cookie overlay
    pub cookie_accept: Vec<Locator>,

    pub strategies: StageStrategies,

    pub vocabulary: MenuVocabulary,

    /// Directory for diagnostic screenshots, none taken when unset
    pub screenshot_dir: Option<PathBuf>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_MENU_URL.to_string(),
            wait: WaitPolicy::default(),
            cookie_wait: WaitPolicy::new(Duration::from_secs(10), Duration::from_millis(250)),
            anchor: Some(Locator::css(".menu-filter")),
            cookie_banner: Some(Locator::id("QUURcookieDisclosureDiv")),
            cookie_accept: vec![
                Locator::css_with_text("button", "Accept"),
                Locator::css_with_text("button", "Agree"),
                Locator::attribute("aria-label", "accept"),
            ],
            strategies: StageStrategies::default(),
            vocabulary: MenuVocabulary::default(),
            screenshot_dir: None,
        }
    }
}

impl ScrapeConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ScrapeError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScrapeError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Builder method: set the menu URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Builder method: use one polling policy for every wait
    pub fn with_wait(mut self, wait: WaitPolicy) -> Self {
        self.wait = wait;
        self.cookie_wait = wait;
        self
    }

    /// Builder method: set the screenshot directory
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = Some(dir.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(ScrapeError::InvalidConfig("url must not be empty".to_string()));
        }

        for (name, policy) in [("wait", &self.wait), ("cookie_wait", &self.cookie_wait)] {
            if policy.timeout_ms == 0 || policy.poll_interval_ms == 0 {
                return Err(ScrapeError::InvalidConfig(format!("{} needs a non-zero timeout and poll interval", name)));
            }
        }

        for stage in [Stage::DiningHall, Stage::Date, Stage::Meal] {
            if self.strategies.for_stage(stage).is_empty() {
                return Err(ScrapeError::InvalidConfig(format!("no selection strategies for {}", stage)));
            }
        }

        Ok(())
    }
}
