//! Console rendering and file output for scraped menus

use crate::error::{Result, ScrapeError};
use crate::menu::{FoodItem, MenuResult};
use crate::scrape::AvailableOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// File format for saved menus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            other => Err(ScrapeError::InvalidConfig(format!("Unknown output format '{}'", other))),
        }
    }
}

fn item_lines(item: &FoodItem) -> Vec<String> {
    let calories = item.calories.map(|c| format!(" ({} cal)", c)).unwrap_or_default();
    let mut lines = vec![format!("• {}{}", item.name, calories)];
    if let Some(description) = &item.description {
        lines.push(format!("  {}", description));
    }
    if !item.dietary_tags.is_empty() {
        let tags: Vec<&str> = item.dietary_tags.iter().map(String::as_str).collect();
        lines.push(format!("  [{}]", tags.join(", ")));
    }
    lines
}

/// Human-readable menu: express meals first, then the main menu grouped by station
pub fn render_text(result: &MenuResult) -> String {
    let selection = &result.selection;
    let mut lines = vec![
        format!("{} - {} - {}", selection.dining_hall, selection.date, selection.meal),
        "=".repeat(70),
    ];

    if !result.express_items.is_empty() {
        lines.extend(["\nEXPRESS MEALS:".to_string(), "-".repeat(40)]);
        lines.extend(result.express_items.iter().flat_map(item_lines));
    }

    if !result.items.is_empty() {
        lines.extend(["\nMAIN MENU:".to_string(), "-".repeat(40)]);

        // items listed before any station header
        lines.extend(result.items_at("").flat_map(item_lines));
        for station in &result.stations {
            let items: Vec<String> = result.items_at(station).flat_map(item_lines).collect();
            if !items.is_empty() {
                lines.push(format!("\n[{}]", station));
                lines.extend(items);
            }
        }
    }

    if !result.stations.is_empty() {
        let stations: Vec<&str> = result.stations.iter().map(String::as_str).collect();
        lines.push(format!("\nStations: {}", stations.join(", ")));
    }
    lines.push(format!("Total items found: {}", result.total_items()));

    lines.join("\n") + "\n"
}

/// Lists the options a page offers for each selection stage
pub fn render_options(options: &AvailableOptions) -> String {
    let sections = [
        ("AVAILABLE DINING HALLS", &options.dining_halls),
        ("AVAILABLE DATES", &options.dates),
        ("AVAILABLE MEALS", &options.meals),
    ];

    sections
        .iter()
        .map(|(title, values)| {
            let body = if values.is_empty() {
                "(none visible)\n".to_string()
            } else {
                values.iter().map(|value| format!("- {}\n", value)).collect()
            };
            format!("=== {} ===\n{}\n", title, body)
        })
        .collect()
}

/// Write the menu to `path`, replacing any existing file
pub fn save(result: &MenuResult, path: impl AsRef<Path>, format: OutputFormat) -> Result<()> {
    let path = path.as_ref();
    let content = match format {
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
        OutputFormat::Text => render_text(result),
    };
    std::fs::write(path, content)?;
    log::info!("Menu saved to {}", path.display());
    Ok(())
}
