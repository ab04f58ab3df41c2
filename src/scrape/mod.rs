//! Scrape pipeline
//!
//! Navigator → rendered text → [`crate::menu::extract_menu`] → [`MenuResult`].
//! Every step runs once; the first failure ends the attempt.

pub mod navigator;
pub mod strategy;

pub use navigator::Navigator;
pub use strategy::{Stage, Strategy};

use crate::browser::{BrowserSession, LaunchOptions};
use crate::config::ScrapeConfig;
use crate::driver::{PageDriver, poll_until};
use crate::error::{Result, ScrapeError};
use crate::menu::{MenuResult, MenuSelection, extract_menu, has_menu_content};
use serde::Serialize;

/// Option texts visible for each stage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AvailableOptions {
    pub dining_halls: Vec<String>,
    pub dates: Vec<String>,
    pub meals: Vec<String>,
}

/// Runs one scrape against a page driver
pub struct MenuScraper<'a, D: PageDriver + ?Sized> {
    driver: &'a D,
    config: &'a ScrapeConfig,
}

impl<'a, D: PageDriver + ?Sized> MenuScraper<'a, D> {
    pub fn new(driver: &'a D, config: &'a ScrapeConfig) -> Self {
        Self { driver, config }
    }

    fn navigator(&self) -> Navigator<'a, D> {
        Navigator::new(self.driver, self.config)
    }

    /// Load the page, make the three selections and parse the menu
    pub fn scrape(&self, selection: &MenuSelection) -> Result<MenuResult> {
        let navigator = self.navigator();
        log::info!("Loading {} menu for {} - {}", selection.dining_hall, selection.date, selection.meal);

        navigator.open()?;
        navigator.dismiss_cookie_banner();

        navigator.select(Stage::DiningHall, &selection.dining_hall)?;
        navigator.select(Stage::Date, selection.date_label())?;
        navigator.select(Stage::Meal, &selection.meal)?;

        let page_text = self.wait_for_menu_text()?;
        let result = extract_menu(selection, &page_text, &self.config.vocabulary)?;
        navigator.save_screenshot("final_menu.png");

        Ok(result)
    }

    /// Poll the rendered text until the menu itself, not just the filter labels, has rendered
    fn wait_for_menu_text(&self) -> Result<String> {
        log::info!("Extracting menu information");
        let mut text = String::new();
        let mut reads = 0;

        let waited = poll_until(&self.config.wait, "menu content", || {
            text = self.driver.rendered_text()?;
            reads += 1;
            Ok(has_menu_content(&text, &self.config.vocabulary))
        });
        log::debug!("Menu text read {} time(s)", reads);

        match waited {
            Ok(()) => Ok(text),
            Err(e) if e.is_timeout() => Err(ScrapeError::ExtractionFailed(format!(
                "no station header or calorie annotation appeared in the menu section: {}",
                e
            ))),
            Err(e) => Err(ScrapeError::ExtractionFailed(format!("page text unavailable: {}", e))),
        }
    }

    /// Load the page and list what can be selected at each stage
    pub fn available_options(&self) -> Result<AvailableOptions> {
        let navigator = self.navigator();
        navigator.open()?;
        navigator.dismiss_cookie_banner();

        Ok(AvailableOptions {
            dining_halls: navigator.available_for(Stage::DiningHall),
            dates: navigator.available_for(Stage::Date),
            meals: navigator.available_for(Stage::Meal),
        })
    }
}

/// Launch a browser, run `run` against it and close the browser whatever the outcome
pub fn with_session<T>(options: LaunchOptions, run: impl FnOnce(&BrowserSession) -> Result<T>) -> Result<T> {
    let session = BrowserSession::launch(options)?;
    let outcome = run(&session);
    if let Err(e) = session.close() {
        log::warn!("Failed to close browser cleanly: {}", e);
    }
    outcome
}

/// Scrape one menu in a fresh browser session
pub fn scrape_menu(options: LaunchOptions, config: &ScrapeConfig, selection: &MenuSelection) -> Result<MenuResult> {
    config.validate()?;
    with_session(options, |session| MenuScraper::new(session, config).scrape(selection))
}

/// List the selectable options in a fresh browser session
pub fn list_options(options: LaunchOptions, config: &ScrapeConfig) -> Result<AvailableOptions> {
    config.validate()?;
    with_session(options, |session| MenuScraper::new(session, config).available_options())
}
