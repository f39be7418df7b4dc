use super::model::{EventField, EventRecord, NO_DATE, NO_DESCRIPTION, NO_TITLE};
use super::selector::{FieldRule, ParseError, SelectorConfig};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("Failed to create whitespace regex");
}

/// Turns a page into [`EventRecord`]s using a [`SelectorConfig`].
///
/// Selectors are compiled once, up front, so a bad rule is reported before
/// any page is fetched. Extraction itself never fails: html5ever recovers
/// from malformed markup, and a field that can't be found gets its
/// placeholder instead of dropping the record.
#[derive(Debug)]
pub struct EventExtractor {
    container: Selector,
    title: Option<TextField>,
    date: Option<TextField>,
    description: Option<TextField>,
    link: Option<LinkField>,
}

#[derive(Debug)]
struct TextField {
    selector: Selector,
    placeholder: Option<String>,
}

#[derive(Debug)]
struct LinkField {
    selector: Selector,
    attribute: String,
    placeholder: Option<String>,
}

impl TextField {
    fn compile(field: &'static str, rule: &FieldRule) -> Result<Self, ParseError> {
        Ok(Self {
            selector: rule.rule.compile(field)?,
            placeholder: rule.placeholder.clone(),
        })
    }
}

impl EventExtractor {
    pub fn new(config: &SelectorConfig) -> Result<Self, ParseError> {
        let link = match &config.link {
            Some(rule) => Some(LinkField {
                selector: rule.rule.compile("link")?,
                attribute: rule.link_attribute().to_string(),
                placeholder: rule.placeholder.clone(),
            }),
            None => None,
        };

        Ok(Self {
            container: config.container.compile("container")?,
            title: config
                .title
                .as_ref()
                .map(|rule| TextField::compile("title", rule))
                .transpose()?,
            date: config
                .date
                .as_ref()
                .map(|rule| TextField::compile("date", rule))
                .transpose()?,
            description: config
                .description
                .as_ref()
                .map(|rule| TextField::compile("description", rule))
                .transpose()?,
            link,
        })
    }

    /// Relative links are resolved against `base_url` when one is given.
    pub fn extract(&self, html: &str, base_url: Option<&Url>) -> Vec<EventRecord> {
        let document = Html::parse_document(html);

        document
            .select(&self.container)
            .map(|container| self.extract_event(container, base_url))
            .collect()
    }

    fn extract_event(&self, container: ElementRef, base_url: Option<&Url>) -> EventRecord {
        let mut missing_fields = Vec::new();

        let title = find_text(container, self.title.as_ref()).unwrap_or_else(|| {
            missing_fields.push(EventField::Title);
            placeholder(self.title.as_ref(), NO_TITLE)
        });
        let date = find_text(container, self.date.as_ref()).unwrap_or_else(|| {
            missing_fields.push(EventField::Date);
            placeholder(self.date.as_ref(), NO_DATE)
        });
        let description = find_text(container, self.description.as_ref()).unwrap_or_else(|| {
            missing_fields.push(EventField::Description);
            placeholder(self.description.as_ref(), NO_DESCRIPTION)
        });
        let link = match self.find_link(container, base_url) {
            Some(link) => Some(link),
            None => {
                missing_fields.push(EventField::Link);
                self.link
                    .as_ref()
                    .and_then(|field| field.placeholder.clone())
            }
        };

        EventRecord {
            title,
            date,
            description,
            link,
            missing_fields,
        }
    }

    fn find_link(&self, container: ElementRef, base_url: Option<&Url>) -> Option<String> {
        let field = self.link.as_ref()?;
        let href = container
            .select(&field.selector)
            .find_map(|element| element.value().attr(&field.attribute))?
            .trim();

        if href.is_empty() {
            return None;
        }

        match base_url.and_then(|base| base.join(href).ok()) {
            Some(resolved) => Some(resolved.to_string()),
            None => Some(href.to_string()),
        }
    }
}

/// Shorthand for compiling `config` and extracting from a single page.
pub fn extract_events(
    html: &str,
    config: &SelectorConfig,
    base_url: Option<&Url>,
) -> Result<Vec<EventRecord>, ParseError> {
    Ok(EventExtractor::new(config)?.extract(html, base_url))
}

fn find_text(container: ElementRef, field: Option<&TextField>) -> Option<String> {
    let element = container.select(&field?.selector).next()?;

    Some(normalize_text(element))
}

fn placeholder(field: Option<&TextField>, default: &str) -> String {
    field
        .and_then(|field| field.placeholder.clone())
        .unwrap_or_else(|| default.to_string())
}

fn normalize_text(element: ElementRef) -> String {
    let text = element.text().collect::<String>();

    WHITESPACE.replace_all(text.trim(), " ").to_string()
}
