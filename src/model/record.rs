use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of the wanted-person dataset.
///
/// The schema differs between dataset revisions, so the record keeps every
/// field it was given and resolves logical attributes through [`aliases`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

/// Logical attributes a record can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    FirstName,
    LastName,
    Patronymic,
    BirthDate,
    Category,
    Restraint,
    Article,
}

/// Candidate field names per attribute, highest priority first.
pub mod aliases {
    use super::Attribute;

    pub const FIRST_NAME: &[&str] = &["FIRST_NAME_U", "FIRST_NAME", "first_name"];
    pub const LAST_NAME: &[&str] = &["LAST_NAME_U", "LAST_NAME", "last_name"];
    pub const PATRONYMIC: &[&str] = &["MIDDLE_NAME_U", "PATRONYMIC", "patronymic"];
    pub const BIRTH_DATE: &[&str] = &["BIRTH_DATE", "birth_date", "BIRTHDAY"];
    pub const CATEGORY: &[&str] = &["CATEGORY", "category"];
    pub const RESTRAINT: &[&str] = &["RESTRAINT", "restraint"];
    pub const ARTICLE: &[&str] = &["ARTICLE_CRIM", "article_crim"];

    pub fn for_attribute(attr: Attribute) -> &'static [&'static str] {
        match attr {
            Attribute::FirstName => FIRST_NAME,
            Attribute::LastName => LAST_NAME,
            Attribute::Patronymic => PATRONYMIC,
            Attribute::BirthDate => BIRTH_DATE,
            Attribute::Category => CATEGORY,
            Attribute::Restraint => RESTRAINT,
            Attribute::Article => ARTICLE,
        }
    }
}

impl Record {
    /// First non-empty string among the attribute's candidate fields.
    ///
    /// Null, non-string and whitespace-only values count as absent.
    pub fn get(&self, attr: Attribute) -> Option<&str> {
        aliases::for_attribute(attr).iter().find_map(|key| {
            self.0
                .get(*key)
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
        })
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
