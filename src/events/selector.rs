use scraper::Selector;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_LINK_ATTRIBUTE: &str = "href";

/// Which fields to pull out of a page, and how to find them.
///
/// Only `container` is required. A field without a rule is never looked up
/// and always ends up with its placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectorConfig {
    pub container: SelectorRule,
    #[serde(default)]
    pub title: Option<FieldRule>,
    #[serde(default)]
    pub date: Option<FieldRule>,
    #[serde(default)]
    pub description: Option<FieldRule>,
    /// `attribute` on this rule doubles as the attribute the link is read from.
    #[serde(default)]
    pub link: Option<FieldRule>,
}

impl Default for SelectorConfig {
    /// Matches the event cards on newyorkcares.org
    fn default() -> Self {
        Self {
            container: SelectorRule::new("div")
                .with_class(ClassMatch::Token("project-card__title-section".to_string())),
            title: Some(
                SelectorRule::new("a")
                    .with_class(ClassMatch::All(vec![
                        "font-sans".to_string(),
                        "text-dark-1".to_string(),
                    ]))
                    .into(),
            ),
            date: Some(SelectorRule::new("time").into()),
            description: Some(
                SelectorRule::new("p")
                    .with_class(ClassMatch::Token("tracking-tight".to_string()))
                    .into(),
            ),
            link: Some(
                SelectorRule::new("a")
                    .with_attribute(DEFAULT_LINK_ATTRIBUTE)
                    .into(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldRule {
    #[serde(flatten)]
    pub rule: SelectorRule,
    /// Overrides the built-in placeholder for this field
    #[serde(default)]
    pub placeholder: Option<String>,
}

impl FieldRule {
    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn link_attribute(&self) -> &str {
        self.rule
            .attribute
            .as_deref()
            .unwrap_or(DEFAULT_LINK_ATTRIBUTE)
    }
}

impl From<SelectorRule> for FieldRule {
    fn from(rule: SelectorRule) -> Self {
        Self {
            rule,
            placeholder: None,
        }
    }
}

/// A tag name plus optional predicates on its `class` and attributes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectorRule {
    pub tag: String,
    #[serde(default)]
    pub class: Option<ClassMatch>,
    /// The element must carry this attribute
    #[serde(default)]
    pub attribute: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassMatch {
    /// The whole `class` attribute, as written in the markup
    Exact(String),
    /// A single class out of the class list
    Token(String),
    /// Every one of these classes, in any order
    All(Vec<String>),
    /// A substring of the `class` attribute
    Contains(String),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid tag '{tag}' in the {field} selector")]
    InvalidTag { field: &'static str, tag: String },
    #[error("invalid class '{value}' in the {field} selector: {reason}")]
    InvalidClass {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
    #[error("invalid attribute name '{attribute}' in the {field} selector")]
    InvalidAttribute {
        field: &'static str,
        attribute: String,
    },
    #[error("{field} selector '{css}' could not be parsed: {reason}")]
    InvalidSelector {
        field: &'static str,
        css: String,
        reason: String,
    },
}

impl SelectorRule {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            class: None,
            attribute: None,
        }
    }

    pub fn with_class(mut self, class: ClassMatch) -> Self {
        self.class = Some(class);
        self
    }

    pub fn with_attribute(mut self, attribute: &str) -> Self {
        self.attribute = Some(attribute.to_string());
        self
    }

    /// Renders the rule as a CSS selector. Class values go through quoted
    /// attribute selectors, so utility classes like `text-[23px]` need no
    /// escaping from the caller.
    pub fn to_css(&self, field: &'static str) -> Result<String, ParseError> {
        let tag = self.tag.trim();

        if !is_valid_tag(tag) {
            return Err(ParseError::InvalidTag {
                field,
                tag: self.tag.clone(),
            });
        }

        let mut css = tag.to_ascii_lowercase();

        match &self.class {
            None => {}
            Some(ClassMatch::Exact(value)) => {
                let value = non_empty_class(field, value)?;
                css.push_str(&format!("[class=\"{}\"]", escape(value)));
            }
            Some(ClassMatch::Token(value)) => {
                css.push_str(&token_predicate(field, value)?);
            }
            Some(ClassMatch::All(values)) => {
                if values.is_empty() {
                    return Err(ParseError::InvalidClass {
                        field,
                        value: String::new(),
                        reason: "at least one class is required",
                    });
                }

                for value in values {
                    css.push_str(&token_predicate(field, value)?);
                }
            }
            Some(ClassMatch::Contains(value)) => {
                let value = non_empty_class(field, value)?;
                css.push_str(&format!("[class*=\"{}\"]", escape(value)));
            }
        }

        if let Some(attribute) = &self.attribute {
            if !is_valid_attribute(attribute) {
                return Err(ParseError::InvalidAttribute {
                    field,
                    attribute: attribute.clone(),
                });
            }

            css.push_str(&format!("[{}]", attribute));
        }

        Ok(css)
    }

    pub fn compile(&self, field: &'static str) -> Result<Selector, ParseError> {
        let css = self.to_css(field)?;

        Selector::parse(&css).map_err(|err| ParseError::InvalidSelector {
            field,
            reason: err.to_string(),
            css: css.clone(),
        })
    }
}

fn token_predicate(field: &'static str, value: &str) -> Result<String, ParseError> {
    let value = non_empty_class(field, value)?;

    if value.chars().any(char::is_whitespace) {
        return Err(ParseError::InvalidClass {
            field,
            value: value.to_string(),
            reason: "a single class cannot contain whitespace, use 'exact' or 'all'",
        });
    }

    Ok(format!("[class~=\"{}\"]", escape(value)))
}

fn non_empty_class<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ParseError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ParseError::InvalidClass {
            field,
            value: value.to_string(),
            reason: "class cannot be empty",
        });
    }

    Ok(trimmed)
}

fn is_valid_tag(tag: &str) -> bool {
    if tag == "*" {
        return true;
    }

    let mut chars = tag.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
        }
        _ => false,
    }
}

fn is_valid_attribute(attribute: &str) -> bool {
    let mut chars = attribute.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        }
        _ => false,
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
