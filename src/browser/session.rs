use crate::{browser::config::LaunchOptions,
            driver::{FoundElement, Locator, PageDriver},
            error::{Result, ScrapeError}};
use headless_chrome::{Browser, Tab, protocol::cdp::Page::CaptureScreenshotFormatOption};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Browser session that owns a Chrome/Chromium instance and the tab being scraped
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance; dropping it shuts Chrome down
    browser: Browser,

    /// Tab all page operations run in
    tab: Arc<Tab>,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // One scrape can sit in bounded waits for a while; keep the browser alive meanwhile
        launch_opts.idle_browser_timeout = Duration::from_secs(10 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        launch_opts.sandbox = options.sandbox;

        let browser = Browser::new(launch_opts).map_err(|e| ScrapeError::LaunchFailed(e.to_string()))?;

        let tab = browser.new_tab().map_err(|e| ScrapeError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        if let Some(user_agent) = &options.user_agent {
            tab.set_user_agent(user_agent, Some("en-US,en"), None)
                .map_err(|e| ScrapeError::LaunchFailed(format!("Failed to set user agent: {}", e)))?;
        }

        log::debug!("Browser launched (headless: {})", options.headless);
        Ok(Self { browser, tab })
    }

    /// Get the tab the session works in
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab
            .wait_until_navigated()
            .map_err(|e| ScrapeError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Evaluate a script and return its value, `Null` when it produced none
    pub fn evaluate(&self, js: &str) -> Result<serde_json::Value> {
        let result = self.tab.evaluate(js, false).map_err(|e| ScrapeError::EvaluationFailed(e.to_string()))?;
        Ok(result.value.unwrap_or(serde_json::Value::Null))
    }

    /// Close the tab; the browser process itself exits when the session is dropped
    pub fn close(&self) -> Result<()> {
        self.tab
            .close(false)
            .map_err(|e| ScrapeError::EvaluationFailed(format!("Failed to close tab: {}", e)))?;
        Ok(())
    }
}

/// Script returning the visible elements for a locator as a JSON string
fn find_visible_script(locator: &Locator) -> Result<String> {
    let locator_json = serde_json::to_string(locator)?;
    Ok(include_str!("find_visible.js").replace("__LOCATOR__", &locator_json))
}

fn click_script(handle: usize) -> String {
    format!(
        r#"
        (function() {{
            const el = document.querySelector('[data-menu-scrape-handle="{handle}"]');
            if (!el) {{
                return false;
            }}
            el.scrollIntoView({{ block: "center" }});
            el.click();
            return true;
        }})()
        "#
    )
}

impl PageDriver for BrowserSession {
    fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| ScrapeError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        self.wait_for_navigation()
    }

    fn find_visible(&self, locator: &Locator) -> Result<Vec<FoundElement>> {
        let value = self.evaluate(&find_visible_script(locator)?)?;

        // The script returns a JSON string, so it is decoded twice
        let json_str: String = serde_json::from_value(value)
            .map_err(|e| ScrapeError::EvaluationFailed(format!("Element lookup returned no JSON string: {}", e)))?;

        serde_json::from_str(&json_str)
            .map_err(|e| ScrapeError::EvaluationFailed(format!("Failed to parse element lookup result: {}", e)))
    }

    fn click(&self, element: &FoundElement) -> Result<()> {
        let clicked = self.evaluate(&click_script(element.handle))?;

        if clicked.as_bool().unwrap_or(false) {
            Ok(())
        } else {
            Err(ScrapeError::ElementNotFound(format!(
                "Element '{}' (handle {}) is no longer on the page",
                element.text, element.handle
            )))
        }
    }

    fn rendered_text(&self) -> Result<String> {
        let value = self.evaluate("document.body ? document.body.innerText : ''")?;

        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ScrapeError::EvaluationFailed("Page body text is not a string".to_string()))
    }

    fn screenshot(&self) -> Result<Vec<u8>> {
        self.tab
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| ScrapeError::EvaluationFailed(format!("Failed to capture screenshot: {}", e)))
    }
}
