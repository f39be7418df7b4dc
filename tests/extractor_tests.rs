use eventscrape::events::extractor::{extract_events, EventExtractor};
use eventscrape::events::model::{EventField, EventRecord, NO_DESCRIPTION, NO_TITLE};
use eventscrape::events::selector::{ClassMatch, SelectorConfig, SelectorRule};
use pretty_assertions::assert_eq;

const EVENTS_PAGE: &str = r#"
<!DOCTYPE html>
<html>
  <body>
    <section class="grid gap-4">
      <div class="flex flex-col w-full event-card">
        <h2>Beach Cleanup</h2>
        <time datetime="2025-06-01">June 1</time>
        <p class="tracking-tight text-sm">Help clean the shore</p>
        <a href="https://www.newyorkcares.org/projects/beach-cleanup">Details</a>
      </div>
      <div class="flex flex-col w-full event-card">
        <h2>Food Pantry Shift</h2>
        <time datetime="2025-06-02">June 2</time>
        <p class="tracking-tight text-sm">Sort and pack donations</p>
        <a href="https://www.newyorkcares.org/projects/food-pantry">Details</a>
      </div>
      <div class="flex flex-col w-full event-card">
        <h2>Reading Buddies</h2>
        <time datetime="2025-06-03">June 3</time>
        <p class="tracking-tight text-sm">Read with second graders</p>
        <a href="https://www.newyorkcares.org/projects/reading-buddies">Details</a>
      </div>
    </section>
  </body>
</html>
"#;

fn card_selectors() -> SelectorConfig {
    SelectorConfig {
        container: SelectorRule::new("div")
            .with_class(ClassMatch::Token("event-card".to_string())),
        title: Some(SelectorRule::new("h2").into()),
        date: Some(SelectorRule::new("time").into()),
        description: Some(
            SelectorRule::new("p")
                .with_class(ClassMatch::Token("tracking-tight".to_string()))
                .into(),
        ),
        link: Some(SelectorRule::new("a").with_attribute("href").into()),
    }
}

#[test_log::test]
fn should_extract_single_fully_populated_event() {
    let html = r#"
        <div class="event-card">
          <h2>Beach Cleanup</h2>
          <time>June 1</time>
          <p class="tracking-tight">Help clean the shore</p>
        </div>"#;

    let events = extract_events(html, &card_selectors(), None).unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Beach Cleanup");
    assert_eq!(events[0].date, "June 1");
    assert_eq!(events[0].description, "Help clean the shore");
}

#[test_log::test]
fn should_extract_one_record_per_container() {
    let events = extract_events(EVENTS_PAGE, &card_selectors(), None).unwrap();

    assert_eq!(
        events,
        vec![
            EventRecord::new(
                "Beach Cleanup".to_string(),
                "June 1".to_string(),
                "Help clean the shore".to_string(),
                Some("https://www.newyorkcares.org/projects/beach-cleanup".to_string()),
            ),
            EventRecord::new(
                "Food Pantry Shift".to_string(),
                "June 2".to_string(),
                "Sort and pack donations".to_string(),
                Some("https://www.newyorkcares.org/projects/food-pantry".to_string()),
            ),
            EventRecord::new(
                "Reading Buddies".to_string(),
                "June 3".to_string(),
                "Read with second graders".to_string(),
                Some("https://www.newyorkcares.org/projects/reading-buddies".to_string()),
            ),
        ]
    );
}

#[test_log::test]
fn when_no_container_matches_should_return_no_events() {
    let selectors = SelectorConfig {
        container: SelectorRule::new("article"),
        ..card_selectors()
    };

    let events = extract_events(EVENTS_PAGE, &selectors, None).unwrap();

    assert!(events.is_empty());
}

#[test_log::test]
fn when_page_is_empty_should_return_no_events() {
    let events = extract_events("", &card_selectors(), None).unwrap();

    assert!(events.is_empty());
}

#[test_log::test]
fn when_markup_is_malformed_should_not_fail() {
    let html = r#"<div class="event-card"><h2>Unclosed <p class="tracking-tight">text</div></div></span><<>"#;

    let events = extract_events(html, &card_selectors(), None).unwrap();

    assert_eq!(events.len(), 1);
}

#[test_log::test]
fn when_title_is_missing_should_use_placeholder_and_keep_other_fields() {
    let html = r#"
        <div class="event-card">
          <time>June 1</time>
          <p class="tracking-tight">Help clean the shore</p>
          <a href="https://example.com/beach">Details</a>
        </div>"#;

    let events = extract_events(html, &card_selectors(), None).unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, NO_TITLE);
    assert_eq!(events[0].date, "June 1");
    assert_eq!(events[0].description, "Help clean the shore");
    assert_eq!(events[0].link.as_deref(), Some("https://example.com/beach"));
    assert_eq!(events[0].missing_fields, vec![EventField::Title]);
}

#[test_log::test]
fn a_missing_field_should_only_degrade_its_own_record() {
    let html = r#"
        <div class="event-card"><h2>First</h2><time>June 1</time></div>
        <div class="event-card">
          <h2>Second</h2>
          <time>June 2</time>
          <p class="tracking-tight">Complete</p>
          <a href="/second">Details</a>
        </div>"#;

    let events = extract_events(html, &card_selectors(), None).unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].description, NO_DESCRIPTION);
    assert_eq!(events[0].link, None);
    assert_eq!(
        events[0].missing_fields,
        vec![EventField::Description, EventField::Link]
    );
    assert!(events[1].is_complete());
}

#[test_log::test]
fn should_match_containers_by_exact_class_attribute() {
    let html = r#"
        <div class="flex flex-col w-full"><h2>Exact</h2></div>
        <div class="flex flex-col w-full extra"><h2>Extra class</h2></div>"#;
    let selectors = SelectorConfig {
        container: SelectorRule::new("div")
            .with_class(ClassMatch::Exact("flex flex-col w-full".to_string())),
        ..card_selectors()
    };

    let events = extract_events(html, &selectors, None).unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Exact");
}

#[test_log::test]
fn should_match_containers_by_any_class_token() {
    let html = r#"
        <div class="flex"><h2>One</h2></div>
        <div class="grid flex"><h2>Two</h2></div>
        <div class="flexbox"><h2>Not a token match</h2></div>"#;
    let selectors = SelectorConfig {
        container: SelectorRule::new("div").with_class(ClassMatch::Token("flex".to_string())),
        ..card_selectors()
    };

    let titles: Vec<String> = extract_events(html, &selectors, None)
        .unwrap()
        .into_iter()
        .map(|event| event.title)
        .collect();

    assert_eq!(titles, vec!["One", "Two"]);
}

#[test_log::test]
fn should_match_containers_having_all_classes() {
    let html = r#"
        <div class="w-full flex"><h2>Both</h2></div>
        <div class="flex"><h2>Only one</h2></div>"#;
    let selectors = SelectorConfig {
        container: SelectorRule::new("div").with_class(ClassMatch::All(vec![
            "flex".to_string(),
            "w-full".to_string(),
        ])),
        ..card_selectors()
    };

    let events = extract_events(html, &selectors, None).unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Both");
}

#[test_log::test]
fn should_match_containers_by_class_substring() {
    let html = r#"
        <div class="project-card__title-section"><h2>Card</h2></div>
        <div class="sidebar"><h2>Sidebar</h2></div>"#;
    let selectors = SelectorConfig {
        container: SelectorRule::new("div")
            .with_class(ClassMatch::Contains("project-card".to_string())),
        ..card_selectors()
    };

    let events = extract_events(html, &selectors, None).unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Card");
}

#[test_log::test]
fn should_match_utility_classes_with_brackets() {
    let html = r#"
        <div class="event-card">
          <a class="font-sans font-medium text-[23px] normal-case leading-tight tracking-[-.92px] text-dark-1" href="/x">Tailwind title</a>
        </div>"#;
    let selectors = SelectorConfig {
        title: Some(
            SelectorRule::new("a")
                .with_class(ClassMatch::Token("text-[23px]".to_string()))
                .into(),
        ),
        ..card_selectors()
    };

    let events = extract_events(html, &selectors, None).unwrap();

    assert_eq!(events[0].title, "Tailwind title");
}

#[test_log::test]
fn extracting_twice_should_give_identical_results() {
    let extractor = EventExtractor::new(&card_selectors()).unwrap();

    let first = extractor.extract(EVENTS_PAGE, None);
    let second = extractor.extract(EVENTS_PAGE, None);

    assert_eq!(first, second);
    assert_eq!(format!("{:?}", first), format!("{:?}", second));
}

#[test_log::test]
fn default_selectors_should_match_newyorkcares_cards() {
    let html = r#"
        <div class="project-card__title-section flex">
          <a class="font-sans font-medium text-[23px] normal-case leading-tight tracking-[-.92px] text-dark-1"
             href="/projects/park-cleanup">Park Cleanup</a>
          <time>Sat, Jun 7</time>
          <p class="tracking-tight">Rake leaves and plant bulbs</p>
        </div>"#;
    let base = reqwest::Url::parse("https://www.newyorkcares.org/home").unwrap();

    let events = extract_events(html, &SelectorConfig::default(), Some(&base)).unwrap();

    assert_eq!(
        events,
        vec![EventRecord::new(
            "Park Cleanup".to_string(),
            "Sat, Jun 7".to_string(),
            "Rake leaves and plant bulbs".to_string(),
            Some("https://www.newyorkcares.org/projects/park-cleanup".to_string()),
        )]
    );
}
