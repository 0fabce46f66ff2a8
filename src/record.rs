//! The view of a citation the reconciler works on: an ordered list of named fields.

/// What a field's value is supposed to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Date,
    Year,
    Month,
    Day,
}

const DATE_KEYS: &[&str] = &[
    "dato",
    "utgivelsesdato",
    "date",
    "laydate",
    "arkivdato",
    "archivedate",
    "arkivdatum",
    "besøksdato",
    "accessdate",
    "hämtdatum",
    "urldate",
];
const YEAR_KEYS: &[&str] = &["utgivelsesår", "år", "year"];
const MONTH_KEYS: &[&str] = &["måned", "month"];
const DAY_KEYS: &[&str] = &["dag", "day"];

/// Date fields that describe when the work was published, as opposed to when it was archived or
/// accessed. Only these may absorb a separate year field.
const PUBLICATION_KEYS: &[&str] = &["dato", "utgivelsesdato", "date"];

impl Role {
    pub fn of_key(key: &str) -> Option<Role> {
        if DATE_KEYS.contains(&key) {
            Some(Role::Date)
        } else if YEAR_KEYS.contains(&key) {
            Some(Role::Year)
        } else if MONTH_KEYS.contains(&key) {
            Some(Role::Month)
        } else if DAY_KEYS.contains(&key) {
            Some(Role::Day)
        } else {
            None
        }
    }
}

pub fn is_publication_date(key: &str) -> bool {
    PUBLICATION_KEYS.contains(&key)
}

/// Key of the date field a year field's value moves to: `date` next to the English `year`,
/// `dato` otherwise.
pub fn date_key_for(year_key: &str) -> &'static str {
    if year_key == "year" { "date" } else { "dato" }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    pub value: String,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn role(&self) -> Option<Role> {
        Role::of_key(&self.key)
    }
}

/// Anything that holds named fields: a parsed bibliography entry, a JSON object, a template.
pub trait FieldStore {
    /// Current fields, in document order.
    fn fields(&self) -> Vec<Field>;

    /// Overwrite `key`, or add it if missing.
    fn set(&mut self, key: &str, value: &str);

    /// Remove `key`. Removing a missing key does nothing.
    fn remove(&mut self, key: &str);
}

/// Fields of `store` with the given role, in document order.
pub fn fields_with_role(store: &dyn FieldStore, role: Role) -> Vec<Field> {
    store
        .fields()
        .into_iter()
        .filter(|f| f.role() == Some(role))
        .collect()
}

/// A plain in-memory record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldStore for Record {
    fn fields(&self) -> Vec<Field> {
        self.fields.clone()
    }

    fn set(&mut self, key: &str, value: &str) {
        match self.fields.iter_mut().find(|f| f.key == key) {
            Some(f) => f.value = value.to_string(),
            None => self.fields.push(Field::new(key, value)),
        }
    }

    fn remove(&mut self, key: &str) {
        self.fields.retain(|f| f.key != key);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.set(&k.into(), &v.into());
        }
        record
    }
}
