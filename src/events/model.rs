use std::fmt::{Display, Formatter};

pub const NO_TITLE: &str = "No title found";
pub const NO_DATE: &str = "No date found";
pub const NO_DESCRIPTION: &str = "No description available";

/// One event as found on the page.
///
/// Fields that couldn't be found hold a placeholder and are listed in
/// `missing_fields`, so a partially matched card still produces a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub title: String,
    pub date: String,
    pub description: String,
    pub link: Option<String>,
    pub missing_fields: Vec<EventField>,
}

impl EventRecord {
    pub fn new(title: String, date: String, description: String, link: Option<String>) -> Self {
        Self {
            title,
            date,
            description,
            link,
            missing_fields: Vec::new(),
        }
    }

    pub fn is_missing(&self, field: EventField) -> bool {
        self.missing_fields.contains(&field)
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields.is_empty()
    }
}

impl Display for EventRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.title,
            self.date,
            self.description,
            self.link.as_deref().unwrap_or("-")
        )
    }
}

#[derive(
    strum::IntoStaticStr, strum::Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[strum(serialize_all = "snake_case")]
pub enum EventField {
    Title,
    Date,
    Description,
    Link,
}
