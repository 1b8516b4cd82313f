//! Maps spreadsheet headers onto canonical record fields.
//!
//! A header is reduced to its ASCII letters, lowercased, and looked up in
//! a fixed alias table, so `First Name`, `first_name` and `FIRSTNAME` all land
//! in [`Field::FirstName`]. Headers that do not match keep their original
//! text and end up in [`Record::extra`].

use crate::record::{Field, RawRow, Record};
use std::collections::HashMap;
use std::sync::OnceLock;

static ALIASES: OnceLock<HashMap<&'static str, Field>> = OnceLock::new();

fn aliases() -> &'static HashMap<&'static str, Field> {
    ALIASES.get_or_init(|| {
        HashMap::from([
            ("firstname", Field::FirstName),
            ("lastname", Field::LastName),
            ("email", Field::Email),
            ("gender", Field::Gender),
            ("address", Field::Address),
            ("phone", Field::Mobile),
        ])
    })
}

/// Reduce a header to its alias lookup key: lowercase ASCII letters only.
fn lookup_key(header: &str) -> String {
    header
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Resolve a header through the alias table.
///
/// # Examples
///
/// ```
/// use recordbook_core::{lookup_alias, Field};
///
/// assert_eq!(lookup_alias("FIRST_NAME"), Some(Field::FirstName));
/// assert_eq!(lookup_alias("Phone #"), Some(Field::Mobile));
/// assert_eq!(lookup_alias("Mobile"), None);
/// ```
pub fn lookup_alias(header: &str) -> Option<Field> {
    aliases().get(lookup_key(header).as_str()).copied()
}

/// Normalize one raw row into a [`Record`]. Never fails.
///
/// Later keys overwrite earlier ones that resolve to the same field. A key
/// missing from the alias table but spelled exactly like a canonical field
/// (`mobile`, `lastName`) still writes that field.
pub fn normalize(row: &RawRow) -> Record {
    let mut record = Record::default();

    for (key, value) in row {
        match lookup_alias(key).or_else(|| Field::from_canonical(key)) {
            Some(field) => record.set(field, value.clone()),
            None => {
                record.extra.insert(key.clone(), value.clone());
            }
        }
    }

    record
}

/// Normalize a sequence of rows, preserving order.
pub fn normalize_all<'a, I>(rows: I) -> Vec<Record>
where
    I: IntoIterator<Item = &'a RawRow>,
{
    rows.into_iter().map(normalize).collect()
}
