use crate::config::ScrapeConfig;
use crate::driver::{FoundElement, PageDriver, poll_until, visible_texts};
use crate::error::{Result, ScrapeError};
use crate::scrape::{Stage, Strategy};
use std::path::PathBuf;

/// Drives the filter widgets of the menu page through a [`PageDriver`]
pub struct Navigator<'a, D: PageDriver + ?Sized> {
    driver: &'a D,
    config: &'a ScrapeConfig,
}

impl<'a, D: PageDriver + ?Sized> Navigator<'a, D> {
    pub fn new(driver: &'a D, config: &'a ScrapeConfig) -> Self {
        Self { driver, config }
    }

    /// Load the menu page and wait for its anchor element
    pub fn open(&self) -> Result<()> {
        log::info!("Loading {}", self.config.url);
        self.driver.navigate(&self.config.url).map_err(|e| match e {
            ScrapeError::NavigationFailed(_) => e,
            other => ScrapeError::NavigationFailed(format!("Failed to load {}: {}", self.config.url, other)),
        })?;

        if let Some(anchor) = &self.config.anchor {
            self.driver.wait_for_visible(anchor, &self.config.wait).map_err(|e| {
                if e.is_timeout() {
                    ScrapeError::NavigationFailed(format!("{} never appeared on {}: {}", anchor, self.config.url, e))
                } else {
                    e
                }
            })?;
        }

        log::info!("Page loaded");
        Ok(())
    }

    /// Accept the cookie overlay if one shows up.
    ///
    /// Returns whether something was clicked; failures are logged, never returned.
    pub fn dismiss_cookie_banner(&self) -> bool {
        let Some(banner) = &self.config.cookie_banner else {
            return false;
        };

        log::debug!("Checking for cookie popup");
        if let Err(e) = self.driver.wait_for_visible(banner, &self.config.cookie_wait) {
            log::debug!("No cookie popup found: {}", e);
            return false;
        }

        for locator in &self.config.cookie_accept {
            match self.driver.find_visible(locator) {
                Ok(found) => {
                    if let Some(button) = found.first() {
                        match self.driver.click(button) {
                            Ok(()) => {
                                log::info!("Cookie popup accepted");
                                return true;
                            }
                            Err(e) => log::warn!("Could not click cookie button {}: {}", locator, e),
                        }
                    }
                }
                Err(e) => log::debug!("Cookie button lookup {} failed: {}", locator, e),
            }
        }

        log::warn!("Cookie popup present but no accept button could be clicked");
        false
    }

    /// Pick `value` for a stage by trying each strategy in order until one finds a visible element.
    ///
    /// The whole chain is retried until the wait policy runs out; the first match is clicked.
    pub fn select(&self, stage: Stage, value: &str) -> Result<FoundElement> {
        let strategies = self.config.strategies.for_stage(stage);
        log::info!("Selecting {}: {}", stage, value);

        let mut chosen: Option<(FoundElement, &Strategy)> = None;
        let waited = poll_until(&self.config.wait, &format!("{} '{}'", stage, value), || {
            chosen = self.first_match(strategies, value);
            Ok(chosen.is_some())
        });

        match (waited, chosen) {
            (Ok(()), Some((element, strategy))) => {
                self.driver.click(&element).map_err(|e| {
                    ScrapeError::ElementNotFound(format!("Could not click {} '{}' found via {}: {}", stage, value, strategy, e))
                })?;
                log::info!("Selected {} '{}' via {}", stage, element.text, strategy);
                Ok(element)
            }
            (Err(e), _) if !e.is_timeout() => Err(e),
            _ => Err(self.selection_failure(stage, value, strategies)),
        }
    }

    fn first_match<'s>(&self, strategies: &'s [Strategy], value: &str) -> Option<(FoundElement, &'s Strategy)> {
        for strategy in strategies {
            let locator = strategy.locator(value);
            match self.driver.find_visible(&locator) {
                Ok(found) => {
                    if let Some(element) = found.into_iter().next() {
                        return Some((element, strategy));
                    }
                    log::debug!("No visible match for {}", locator);
                }
                Err(e) => log::debug!("Strategy {} failed: {}", strategy, e),
            }
        }
        None
    }

    fn selection_failure(&self, stage: Stage, value: &str, strategies: &[Strategy]) -> ScrapeError {
        let available = self.available_for(stage);
        if available.is_empty() {
            log::warn!("No {} options visible", stage);
        } else {
            log::warn!("Available {} options: {}", stage, available.join(", "));
        }
        self.save_screenshot("available_options.png");

        ScrapeError::SelectionFailed {
            stage,
            value: value.to_string(),
            tried: strategies.iter().map(ToString::to_string).collect(),
            available,
        }
    }

    /// Option texts currently visible for a stage, from its listing strategies
    pub fn available_for(&self, stage: Stage) -> Vec<String> {
        let found: Vec<FoundElement> = self
            .config
            .strategies
            .for_stage(stage)
            .iter()
            .filter_map(Strategy::listing)
            .filter_map(|locator| self.driver.find_visible(&locator).ok())
            .flatten()
            .collect();
        visible_texts(&found)
    }

    /// Write a screenshot into the configured directory; returns the path when one was written
    pub fn save_screenshot(&self, file_name: &str) -> Option<PathBuf> {
        let dir = self.config.screenshot_dir.as_ref()?;
        let path = dir.join(file_name);

        let written = self
            .driver
            .screenshot()
            .and_then(|png| std::fs::create_dir_all(dir).and_then(|_| std::fs::write(&path, png)).map_err(ScrapeError::from));

        match written {
            Ok(()) => {
                log::info!("Screenshot saved to {}", path.display());
                Some(path)
            }
            Err(e) => {
                log::warn!("Could not save screenshot {}: {}", path.display(), e);
                None
            }
        }
    }
}
