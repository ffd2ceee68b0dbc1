use crate::model::query::Query;
use crate::model::record::{Attribute, Record};

use super::{date, normalize};

/// The four identity fields in comparison form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityKey {
    pub first_name: String,
    pub last_name: String,
    pub patronymic: String,
    pub birth_date: String,
}

impl IdentityKey {
    pub fn from_query(q: &Query) -> Self {
        Self {
            first_name: normalize::normalize(&q.first_name),
            last_name: normalize::normalize(&q.last_name),
            patronymic: normalize::normalize(&q.patronymic),
            birth_date: date::translate(&q.birth_date),
        }
    }

    /// All four fields must agree. The birth date is checked first since it
    /// rules out most records.
    pub fn matches(&self, r: &Record) -> bool {
        date::translate_opt(r.get(Attribute::BirthDate)) == self.birth_date
            && normalize::normalize_opt(r.get(Attribute::LastName)) == self.last_name
            && normalize::normalize_opt(r.get(Attribute::FirstName)) == self.first_name
            && normalize::normalize_opt(r.get(Attribute::Patronymic)) == self.patronymic
    }
}

/// First record, in dataset order, whose identity equals the query's.
///
/// A birth date that was typed but cannot be read matches nothing, so it can
/// never pair up with a record that lacks a birth date.
pub fn find_match<'a>(query: &Query, records: &'a [Record]) -> Option<&'a Record> {
    let key = IdentityKey::from_query(query);
    if key.birth_date.is_empty() && !query.birth_date.trim().is_empty() {
        return None;
    }
    records.iter().find(|r| key.matches(r))
}
