//! # dining-menu
//!
//! Scrape a university dining-hall menu page with Chrome via the DevTools Protocol (CDP)
//! and turn its rendered text into structured stations and food items.
//!
//! ## Features
//!
//! - **Menu parsing**: segment page text into a menu window, group lines under station headers,
//!   parse items into name, calories, description and dietary tags
//! - **Browser Session Management**: launch a Chrome/Chromium instance per scrape
//! - **Selection strategies**: pick dining hall, date and meal through ordered fallback locators
//! - **Reporting**: console rendering plus JSON or text output
//!
//! ## CLI
//!
//! ```bash
//! # Prompt for dining hall and meal, scrape today's menu
//! cargo run --bin dining-menu
//!
//! # Non-interactive, with a visible browser
//! cargo run --bin dining-menu -- --hall "Ban Righ Hall" --meal Dinner --headed
//! ```
//!
//! ## Library Usage
//!
//! ### Scraping a menu
//!
//! ```rust,no_run
//! use dining_menu::{LaunchOptions, MenuSelection, ScrapeConfig, scrape_menu};
//!
//! # fn main() -> dining_menu::Result<()> {
//! let selection = MenuSelection::for_today("Leonard Hall", "Lunch");
//! let menu = scrape_menu(LaunchOptions::default(), &ScrapeConfig::default(), &selection)?;
//!
//! println!("Found {} items", menu.total_items());
//! # Ok(())
//! # }
//! ```
//!
//! ### Parsing text without a browser
//!
//! ```rust
//! use dining_menu::menu::{MenuVocabulary, extract_menu};
//! use dining_menu::MenuSelection;
//!
//! # fn main() -> dining_menu::Result<()> {
//! let page = "Lunch\nEntrees\nGrilled Chicken Breast (350 cal)\nPrivacy";
//! let selection = MenuSelection::new("Leonard Hall", "Fri, Sep 13", "Lunch");
//! let menu = extract_menu(&selection, page, &MenuVocabulary::default())?;
//!
//! assert_eq!(menu.items_at("Entrees").next().unwrap().calories, Some(350));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`menu`]: text segmentation, classification and food-item parsing
//! - [`driver`]: the [`PageDriver`] trait, locators and bounded polling
//! - [`browser`]: headless_chrome implementation of the driver
//! - [`scrape`]: navigator and the end-to-end scrape pipeline
//! - [`config`]: site configuration, loadable from TOML
//! - [`report`]: console rendering and file output
//! - [`error`]: error types and result aliases

pub mod browser;
pub mod config;
pub mod driver;
pub mod error;
pub mod menu;
pub mod report;
pub mod scrape;

pub use browser::{BrowserSession, LaunchOptions};
pub use config::ScrapeConfig;
pub use driver::{FoundElement, Locator, PageDriver, WaitPolicy};
pub use error::{Result, ScrapeError};
pub use menu::{FoodItem, MenuResult, MenuSelection, parse_food_item};
pub use report::OutputFormat;
pub use scrape::{AvailableOptions, MenuScraper, Stage, Strategy, list_options, scrape_menu};
