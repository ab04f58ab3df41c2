//! dining-menu CLI
//!
//! Scrapes one dining-hall menu and saves it. Dining hall and meal are prompted for
//! when not given on the command line; the date defaults to today.

use anyhow::Context;
use clap::Parser;
use dining_menu::{LaunchOptions, MenuSelection, OutputFormat, ScrapeConfig, list_options, menu::today_label,
                  report, scrape_menu};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "dining-menu", version, about = "Scrape a dining-hall menu into structured data")]
struct Cli {
    /// Dining hall, e.g. "Ban Righ Hall" (prompted when omitted)
    #[arg(long)]
    hall: Option<String>,

    /// Meal: Breakfast, Lunch, Dinner... (prompted when omitted)
    #[arg(long)]
    meal: Option<String>,

    /// Date label as shown on the site, e.g. "Fri, Sep 13" (defaults to today)
    #[arg(long)]
    date: Option<String>,

    /// TOML file overriding the site configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to save the menu
    #[arg(long, default_value = "detailed_menu_data.json")]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Chrome/Chromium binary to use
    #[arg(long)]
    chrome_path: Option<PathBuf>,

    /// Save diagnostic screenshots into this directory
    #[arg(long)]
    screenshot_dir: Option<PathBuf>,

    /// Only list the dining halls, dates and meals the page offers
    #[arg(long)]
    list_options: bool,
}

fn prompt(label: &str, default: &str) -> anyhow::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let answer = line.trim();
    Ok(if answer.is_empty() { default.to_string() } else { answer.to_string() })
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => ScrapeConfig::from_toml_file(path).with_context(|| format!("loading {}", path.display()))?,
        None => ScrapeConfig::default(),
    };
    if let Some(dir) = cli.screenshot_dir {
        config = config.with_screenshot_dir(dir);
    }

    let mut options = LaunchOptions::new().headless(!cli.headed);
    if let Some(path) = cli.chrome_path {
        options = options.chrome_path(path);
    }

    if cli.list_options {
        let available = list_options(options, &config)?;
        print!("{}", report::render_options(&available));
        return Ok(());
    }

    println!("Dining Hall Menu Scraper");
    println!("{}", "=".repeat(50));

    let dining_hall = match cli.hall {
        Some(hall) => hall,
        None => prompt("Enter dining hall (e.g., 'Ban Righ Hall', 'Leonard Hall'): ", "Leonard Hall")?,
    };
    let meal = match cli.meal {
        Some(meal) => meal,
        None => prompt("Enter meal (Breakfast/Lunch/Dinner): ", "Lunch")?,
    };
    let date = cli.date.unwrap_or_else(today_label);
    let selection = MenuSelection::new(dining_hall, date, meal);

    println!("\nScraping {} for {} - {}...", selection.dining_hall, selection.date, selection.meal);

    let menu = scrape_menu(options, &config, &selection)?;
    print!("\n{}", report::render_text(&menu));

    report::save(&menu, &cli.output, cli.format)?;
    println!("\nRaw data saved to '{}'", cli.output.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
