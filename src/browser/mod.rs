//! Chrome/Chromium session management
//!
//! [`BrowserSession`] is the production [`crate::driver::PageDriver`]: it launches a browser
//! through headless_chrome and answers element lookups by evaluating a script in the page.

pub mod config;
pub mod session;

pub use config::{DEFAULT_USER_AGENT, LaunchOptions};
pub use session::BrowserSession;
