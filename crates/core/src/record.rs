use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// One unnormalized spreadsheet row, keyed by header text as written.
///
/// Keys keep the order of their first insertion; inserting an existing key
/// replaces its value.
pub type RawRow = IndexMap<String, String>;

/// The six canonical record attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Gender,
    Address,
    Mobile,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 6] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Gender,
        Field::Address,
        Field::Mobile,
    ];

    /// Canonical (stored) name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Gender => "gender",
            Field::Address => "address",
            Field::Mobile => "mobile",
        }
    }

    /// Match an exact canonical name. Case-sensitive.
    pub fn from_canonical(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A personal record as persisted in the store.
///
/// `extra` holds keys that did not map to a canonical field. They are kept
/// and stored, but nothing in recordbook reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub address: String,
    pub mobile: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Record {
    /// Get a canonical field value.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Gender => &self.gender,
            Field::Address => &self.address,
            Field::Mobile => &self.mobile,
        }
    }

    /// Mutable access to a canonical field value.
    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Gender => &mut self.gender,
            Field::Address => &mut self.address,
            Field::Mobile => &mut self.mobile,
        }
    }

    /// Overwrite a canonical field value.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    /// Canonical fields paired with their values, in form order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    /// Derived display name: `firstName + " " + lastName`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A record echoed back by the store together with its assigned id.
///
/// Serializes with a derived `name` for display. The name is never part of
/// the stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub id: String,
    pub record: Record,
}

impl StoredRecord {
    pub fn new(id: impl Into<String>, record: Record) -> Self {
        Self {
            id: id.into(),
            record,
        }
    }

    /// See [`Record::display_name`].
    pub fn name(&self) -> String {
        self.record.display_name()
    }
}

/// Keys the display view owns: the id, the derived name and the canonical
/// fields. Extras with these keys are left out of the view.
fn is_display_key(key: &str) -> bool {
    key == "id" || key == "name" || Field::from_canonical(key).is_some()
}

impl Serialize for StoredRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extras: Vec<(&String, &String)> = self
            .record
            .extra
            .iter()
            .filter(|(key, _)| !is_display_key(key))
            .collect();

        let mut map = serializer.serialize_map(Some(extras.len() + Field::ALL.len() + 2))?;
        for (key, value) in extras {
            map.serialize_entry(key, value)?;
        }
        for (field, value) in self.record.fields() {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.serialize_entry("name", &self.name())?;
        map.serialize_entry("id", &self.id)?;
        map.end()
    }
}
