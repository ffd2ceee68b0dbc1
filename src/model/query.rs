/// The four identity fields a user wants checked.
///
/// Only built from a complete [`QueryDraft`], so a partially filled query can
/// never reach the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub first_name: String,
    pub last_name: String,
    pub patronymic: String,
    /// As typed by the user, expected `DD.MM.YYYY`.
    pub birth_date: String,
}

/// Collection order of the query fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Patronymic,
    BirthDate,
}

impl Field {
    pub fn next(self) -> Option<Field> {
        match self {
            Field::FirstName => Some(Field::LastName),
            Field::LastName => Some(Field::Patronymic),
            Field::Patronymic => Some(Field::BirthDate),
            Field::BirthDate => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub patronymic: Option<String>,
    pub birth_date: Option<String>,
}

impl QueryDraft {
    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Patronymic => &mut self.patronymic,
            Field::BirthDate => &mut self.birth_date,
        };
        *slot = Some(value);
    }

    /// Returns the finished query, or `None` while any field is missing.
    pub fn complete(&self) -> Option<Query> {
        Some(Query {
            first_name: self.first_name.clone()?,
            last_name: self.last_name.clone()?,
            patronymic: self.patronymic.clone()?,
            birth_date: self.birth_date.clone()?,
        })
    }
}
