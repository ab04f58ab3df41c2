use dining_menu::{FoundElement, Locator, MenuScraper, MenuSelection, PageDriver, Result, ScrapeConfig, ScrapeError,
                  Stage, Strategy, WaitPolicy};
use std::cell::{Cell, RefCell};
use std::time::Duration;

/// An element on the fake page
struct FakeElement {
    handle: usize,
    text: String,
    /// Locators this element answers to
    matches: Vec<Locator>,
    /// Page text appended once the element is clicked
    reveals: Option<String>,
}

/// Page driver backed by a scripted in-memory page
#[derive(Default)]
struct FakePage {
    elements: Vec<FakeElement>,
    base_text: String,
    revealed: RefCell<Vec<String>>,
    clicks: RefCell<Vec<String>>,
    navigated: RefCell<Vec<String>>,
    lookups: RefCell<Vec<Locator>>,
    fail_navigation: bool,
    fail_clicks: bool,
    /// Revealed text stays hidden for this many reads of the page text
    render_delay: usize,
    reads: Cell<usize>,
}

impl FakePage {
    fn element(mut self, text: &str, matches: Vec<Locator>) -> Self {
        let handle = self.elements.len() + 1;
        self.elements.push(FakeElement { handle, text: text.to_string(), matches, reveals: None });
        self
    }

    fn revealing(mut self, text: &str) -> Self {
        if let Some(last) = self.elements.last_mut() {
            last.reveals = Some(text.to_string());
        }
        self
    }

    fn text(mut self, text: &str) -> Self {
        self.base_text = text.to_string();
        self
    }

    fn delayed(mut self, reads: usize) -> Self {
        self.render_delay = reads;
        self
    }

    fn clicked(&self) -> Vec<String> {
        self.clicks.borrow().clone()
    }
}

impl PageDriver for FakePage {
    fn navigate(&self, url: &str) -> Result<()> {
        if self.fail_navigation {
            return Err(ScrapeError::NavigationFailed(format!("Failed to navigate to {}", url)));
        }
        self.navigated.borrow_mut().push(url.to_string());
        Ok(())
    }

    fn find_visible(&self, locator: &Locator) -> Result<Vec<FoundElement>> {
        self.lookups.borrow_mut().push(locator.clone());
        Ok(self
            .elements
            .iter()
            .filter(|e| e.matches.contains(locator))
            .map(|e| FoundElement { handle: e.handle, text: e.text.clone() })
            .collect())
    }

    fn click(&self, element: &FoundElement) -> Result<()> {
        let target = self
            .elements
            .iter()
            .find(|e| e.handle == element.handle)
            .ok_or_else(|| ScrapeError::ElementNotFound(element.text.clone()))?;
        if self.fail_clicks {
            return Err(ScrapeError::ElementNotFound(format!("handle {} is detached", element.handle)));
        }
        self.clicks.borrow_mut().push(target.text.clone());
        if let Some(text) = &target.reveals {
            self.revealed.borrow_mut().push(text.clone());
        }
        Ok(())
    }

    fn rendered_text(&self) -> Result<String> {
        self.reads.set(self.reads.get() + 1);
        let mut text = self.base_text.clone();
        if self.reads.get() <= self.render_delay {
            return Ok(text);
        }
        for chunk in self.revealed.borrow().iter() {
            text.push('\n');
            text.push_str(chunk);
        }
        Ok(text)
    }

    fn screenshot(&self) -> Result<Vec<u8>> {
        Ok(b"\x89PNG fake".to_vec())
    }
}

const MENU_TEXT: &str = "\
Lunch
Express Meals
Chicken Caesar Wrap (520 cal)
Entrees
Grilled Chicken Breast (350 cal)
Vegan Meal
Vegan Tofu Stir Fry, with rice and vegetables (410 cal)
Express Meals
Copyright Queen's University";

fn fast_config() -> ScrapeConfig {
    ScrapeConfig::default()
        .with_url("https://dining.example.edu/menu")
        .with_wait(WaitPolicy::new(Duration::from_millis(30), Duration::from_millis(1)))
}

fn hall_widget(value: &str) -> Locator {
    Strategy::defaults_for(Stage::DiningHall)[0].locator(value)
}

fn day_widget(value: &str) -> Locator {
    Strategy::defaults_for(Stage::Date)[0].locator(value)
}

fn meal_widget(value: &str) -> Locator {
    Strategy::defaults_for(Stage::Meal)[0].locator(value)
}

fn listing(stage: Stage) -> Locator {
    Strategy::defaults_for(stage)[0].listing().unwrap()
}

/// The full site: anchor, cookie banner, three filter widgets and a menu behind the meal button
fn site() -> FakePage {
    FakePage::default()
        .text("Skip to main content\nToday's specials are posted daily")
        .element("", vec![Locator::css(".menu-filter")])
        .element("We use cookies", vec![Locator::id("QUURcookieDisclosureDiv")])
        .element("Accept", vec![Locator::css_with_text("button", "Accept")])
        .element("Ban Righ Hall", vec![hall_widget("Ban Righ Hall"), listing(Stage::DiningHall)])
        .element("Leonard Hall", vec![hall_widget("Leonard Hall"), listing(Stage::DiningHall)])
        .element("Fri, Sep 13", vec![day_widget("Sep 13"), listing(Stage::Date)])
        .element("Lunch", vec![meal_widget("Lunch"), listing(Stage::Meal)])
        .revealing(MENU_TEXT)
}

#[test]
fn test_scrape_happy_path() {
    let page = site();
    let config = fast_config();
    let selection = MenuSelection::new("Leonard Hall", "Fri, Sep 13", "Lunch");

    let menu = MenuScraper::new(&page, &config).scrape(&selection).unwrap();

    assert_eq!(page.navigated.borrow().as_slice(), ["https://dining.example.edu/menu"]);
    assert_eq!(page.clicked(), vec!["Accept", "Leonard Hall", "Fri, Sep 13", "Lunch"]);

    assert_eq!(menu.selection, selection);
    assert_eq!(menu.stations.iter().collect::<Vec<_>>(), vec!["Express Meals", "Entrees", "Vegan Meal"]);
    assert_eq!(menu.express_items.len(), 1);
    assert_eq!(menu.express_items[0].name, "Chicken Caesar Wrap");

    let stir_fry = menu.items.iter().find(|i| i.name == "Vegan Tofu Stir Fry").unwrap();
    assert_eq!(stir_fry.calories, Some(410));
    assert_eq!(stir_fry.description.as_deref(), Some("with rice and vegetables"));
    assert_eq!(stir_fry.station, "Vegan Meal");
    assert!(stir_fry.dietary_tags.contains("vegan"));
}

#[test]
fn test_unknown_hall_fails_with_available_options() {
    let page = site();
    let config = fast_config();
    let selection = MenuSelection::new("Nowhere Hall", "Fri, Sep 13", "Lunch");

    let err = MenuScraper::new(&page, &config).scrape(&selection).unwrap_err();

    match err {
        ScrapeError::SelectionFailed { stage, value, tried, available } => {
            assert_eq!(stage, Stage::DiningHall);
            assert_eq!(value, "Nowhere Hall");
            assert_eq!(tried.len(), 6);
            assert_eq!(available, vec!["Ban Righ Hall", "Leonard Hall"]);
        }
        other => panic!("Expected selection failure, got {other:?}"),
    }

    // later stages are never attempted
    assert_eq!(page.clicked(), vec!["Accept"]);
}

#[test]
fn test_missing_meal_aborts_before_extraction() {
    let page = site();
    let config = fast_config();
    let selection = MenuSelection::new("Ban Righ Hall", "Fri, Sep 13", "Supper");

    let err = MenuScraper::new(&page, &config).scrape(&selection).unwrap_err();

    assert!(matches!(err, ScrapeError::SelectionFailed { stage: Stage::Meal, .. }));
    assert!(err.to_string().contains("'Supper'"));
    assert_eq!(page.clicked(), vec!["Accept", "Ban Righ Hall", "Fri, Sep 13"]);
}

#[test]
fn test_strategies_fall_back_in_order() {
    // no filter widgets, only an element matching on aria-label
    let page = FakePage::default()
        .element("", vec![Locator::css(".menu-filter")])
        .element("hall icon", vec![Locator::attribute("aria-label", "Leonard Hall")])
        .element("Sep 13", vec![Locator::text("Sep 13")])
        .element("Lunch", vec![Locator::text("Lunch")])
        .revealing(MENU_TEXT);
    let config = fast_config();

    MenuScraper::new(&page, &config).scrape(&MenuSelection::new("Leonard Hall", "Fri, Sep 13", "Lunch")).unwrap();

    let lookups = page.lookups.borrow();
    let widget = lookups.iter().position(|l| *l == hall_widget("Leonard Hall")).unwrap();
    let text = lookups.iter().position(|l| *l == Locator::text("Leonard Hall")).unwrap();
    let aria = lookups.iter().position(|l| *l == Locator::attribute("aria-label", "Leonard Hall")).unwrap();
    assert!(widget < text && text < aria);
    assert!(!lookups.contains(&Locator::attribute("value", "Leonard Hall")));
    assert_eq!(page.clicked()[0], "hall icon");
}

#[test]
fn test_missing_cookie_banner_is_not_an_error() {
    let page = FakePage::default()
        .element("", vec![Locator::css(".menu-filter")])
        .element("Leonard Hall", vec![hall_widget("Leonard Hall")])
        .element("Fri, Sep 13", vec![day_widget("Sep 13")])
        .element("Lunch", vec![meal_widget("Lunch")])
        .revealing(MENU_TEXT);
    let config = fast_config();

    let menu = MenuScraper::new(&page, &config).scrape(&MenuSelection::new("Leonard Hall", "Fri, Sep 13", "Lunch")).unwrap();

    assert_eq!(menu.total_items(), 4);
    assert!(!page.clicked().contains(&"Accept".to_string()));
}

#[test]
fn test_missing_anchor_is_navigation_failure() {
    let page = FakePage::default().element("Leonard Hall", vec![hall_widget("Leonard Hall")]);
    let config = fast_config();

    let err = MenuScraper::new(&page, &config).scrape(&MenuSelection::new("Leonard Hall", "Fri, Sep 13", "Lunch")).unwrap_err();

    match err {
        ScrapeError::NavigationFailed(message) => assert!(message.contains(".menu-filter")),
        other => panic!("Expected navigation failure, got {other:?}"),
    }
    assert!(page.clicked().is_empty());
}

#[test]
fn test_navigation_error_propagates() {
    let page = FakePage { fail_navigation: true, ..Default::default() };
    let config = fast_config();

    let err = MenuScraper::new(&page, &config).scrape(&MenuSelection::new("Leonard Hall", "Fri, Sep 13", "Lunch")).unwrap_err();
    assert!(matches!(err, ScrapeError::NavigationFailed(_)));
}

#[test]
fn test_menu_never_appearing_is_extraction_failure() {
    let page = FakePage::default()
        .text("Home\nAbout")
        .element("", vec![Locator::css(".menu-filter")])
        .element("Leonard Hall", vec![hall_widget("Leonard Hall")])
        .element("Fri, Sep 13", vec![day_widget("Sep 13")])
        .element("Lunch", vec![meal_widget("Lunch")]);
    let config = fast_config();

    let err = MenuScraper::new(&page, &config).scrape(&MenuSelection::new("Leonard Hall", "Fri, Sep 13", "Lunch")).unwrap_err();
    assert!(matches!(err, ScrapeError::ExtractionFailed(_)));
}

#[test]
fn test_available_options() {
    let page = site();
    let config = fast_config();

    let options = MenuScraper::new(&page, &config).available_options().unwrap();

    assert_eq!(options.dining_halls, vec!["Ban Righ Hall", "Leonard Hall"]);
    assert_eq!(options.dates, vec!["Fri, Sep 13"]);
    assert_eq!(options.meals, vec!["Lunch"]);
}

#[test]
fn test_screenshots_written_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let page = site();
    let config = fast_config().with_screenshot_dir(dir.path());

    MenuScraper::new(&page, &config).scrape(&MenuSelection::new("Leonard Hall", "Fri, Sep 13", "Lunch")).unwrap();
    assert!(dir.path().join("final_menu.png").exists());

    let failing = MenuSelection::new("Nowhere Hall", "Fri, Sep 13", "Lunch");
    assert!(MenuScraper::new(&site(), &config).scrape(&failing).is_err());
    assert!(dir.path().join("available_options.png").exists());
}

#[test]
fn test_waits_for_menu_behind_filter_labels() {
    // the filter widget already shows "Today's Menu" and the meal names
    let page = FakePage::default()
        .text("Today's Menu\nLeonard Hall\nFri, Sep 13\nBreakfast\nLunch\nDinner")
        .element("", vec![Locator::css(".menu-filter")])
        .element("Leonard Hall", vec![hall_widget("Leonard Hall")])
        .element("Fri, Sep 13", vec![day_widget("Sep 13")])
        .element("Lunch", vec![meal_widget("Lunch")])
        .revealing("Entrees\nGrilled Chicken Breast (350 cal)\nVegan Meal\nVegan Tofu Stir Fry, with rice and vegetables (410 cal)\nPrivacy")
        .delayed(2);
    let config = fast_config();

    let menu = MenuScraper::new(&page, &config).scrape(&MenuSelection::new("Leonard Hall", "Fri, Sep 13", "Lunch")).unwrap();

    assert_eq!(page.reads.get(), 3);
    assert_eq!(menu.stations.iter().collect::<Vec<_>>(), vec!["Entrees", "Vegan Meal"]);
    assert_eq!(menu.items_at("Entrees").next().map(|i| i.name.as_str()), Some("Grilled Chicken Breast"));
}

#[test]
fn test_filter_labels_alone_are_extraction_failure() {
    let page = FakePage::default()
        .text("Today's Menu\nLeonard Hall\nFri, Sep 13\nBreakfast\nLunch\nDinner")
        .element("", vec![Locator::css(".menu-filter")])
        .element("Leonard Hall", vec![hall_widget("Leonard Hall")])
        .element("Fri, Sep 13", vec![day_widget("Sep 13")])
        .element("Lunch", vec![meal_widget("Lunch")]);
    let config = fast_config();

    let err = MenuScraper::new(&page, &config).scrape(&MenuSelection::new("Leonard Hall", "Fri, Sep 13", "Lunch")).unwrap_err();

    assert!(matches!(err, ScrapeError::ExtractionFailed(_)));
    assert!(page.reads.get() > 1);
}

#[test]
fn test_click_failure_names_stage_and_value() {
    let page = FakePage { fail_clicks: true, ..site() };
    let config = fast_config();

    let err = MenuScraper::new(&page, &config).scrape(&MenuSelection::new("Leonard Hall", "Fri, Sep 13", "Lunch")).unwrap_err();

    let message = err.to_string();
    assert!(matches!(err, ScrapeError::ElementNotFound(_)));
    assert!(message.contains("dining hall"));
    assert!(message.contains("'Leonard Hall'"));
    assert!(message.contains("detached"));
}
