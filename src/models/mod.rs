//! Records mirrored from the backend's JSON responses.
//!
//! DESIGN
//! ======
//! Models decode leniently: every field has a default and numeric fields
//! accept numbers or numeric strings, so a partially populated row still
//! renders. Each listable record implements [`Resource`], which is all the
//! generic CRUD page needs to fetch, tabulate and edit it.


pub mod alimento;
pub mod animal;
pub mod clinico;
pub mod dashboard;
pub mod dieta;
pub mod empleado;
pub mod entrada;
pub mod limpieza;
pub mod rrhh;
pub mod usuario;

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Characters left unescaped in a path segment or query value.
pub(crate) const URL_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Backend record identifier. Arrives as a JSON number or string and is
/// sent back in the same form. Equality only looks at the text.
#[derive(Clone, Debug, Default)]
pub struct RecordId {
    text: String,
    numeric: bool,
}

impl RecordId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The id percent-encoded for use as one URL path segment.
    #[must_use]
    pub fn path_segment(&self) -> String {
        utf8_percent_encode(&self.text, URL_COMPONENT).to_string()
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for RecordId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RecordId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self { text: value.to_owned(), numeric: false }
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self { text: value, numeric: false }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self { text: value.to_string(), numeric: true }
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.text.parse::<i64>() {
            Ok(n) if self.numeric => serializer.serialize_i64(n),
            _ => serializer.serialize_str(&self.text),
        }
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<Loose>::deserialize(deserializer)? {
            Some(Loose::Int(n)) => Self::from(n),
            raw => Self::from(raw.and_then(Loose::into_text).unwrap_or_default()),
        })
    }
}

/// Scalar that may come back as a string, number or bool.
#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Loose {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Int(n) => Some(n.to_string()),
            Self::Float(n) => Some(fmt_number(n)),
            Self::Bool(b) => Some(b.to_string()),
            Self::Text(s) => Some(s),
        }
    }

    fn into_f64(self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(n) => Some(n as f64),
            Self::Float(n) => Some(n),
            Self::Bool(_) => None,
            Self::Text(s) => s.trim().replace(',', ".").parse().ok(),
        }
    }

    fn into_bool(self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(b),
            Self::Int(n) => Some(n != 0),
            Self::Float(n) => Some(n != 0.0),
            Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "si" | "sí" => Some(true),
                "false" | "0" | "no" => Some(false),
                _ => None,
            },
        }
    }
}

/// Lenient field deserializers used through `deserialize_with`.
pub(crate) mod de {
    use super::Loose;
    use serde::{Deserialize, Deserializer};

    pub fn opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Ok(Option::<Loose>::deserialize(deserializer)?.and_then(Loose::into_f64))
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn opt_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        Ok(Option::<Loose>::deserialize(deserializer)?
            .and_then(Loose::into_f64)
            .filter(|n| n.is_finite())
            .map(|n| n.round() as i64))
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        Ok(opt_i64(deserializer)?.unwrap_or(0))
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(Option::<Loose>::deserialize(deserializer)?
            .and_then(Loose::into_text)
            .unwrap_or_default())
    }

    pub fn opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<Loose>::deserialize(deserializer)?
            .and_then(Loose::into_text)
            .filter(|s| !s.is_empty()))
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(Option::<Loose>::deserialize(deserializer)?
            .and_then(Loose::into_bool)
            .unwrap_or(false))
    }
}

/// Render a number the way a form input shows it: no trailing `.0`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn fmt_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

pub(crate) fn fmt_opt_number(n: Option<f64>) -> String {
    n.map(fmt_number).unwrap_or_default()
}

pub(crate) fn fmt_money(n: Option<f64>) -> String {
    n.map(|v| format!("${v:.2}")).unwrap_or_default()
}

/// Keep only the `YYYY-MM-DD` prefix of a timestamp.
#[must_use]
pub fn date_only(raw: &str) -> &str {
    raw.get(..10)
        .filter(|prefix| prefix.as_bytes().get(4) == Some(&b'-'))
        .unwrap_or(raw)
}

pub(crate) fn fmt_yes_no(value: bool) -> String {
    let text = if value { "Sí" } else { "No" };
    text.to_owned()
}

/// How a form input is rendered and how its text becomes JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    /// Password input: never prefilled, omitted from bodies when blank.
    Secret,
    /// JSON number; integral values are sent as integers.
    Number,
    /// Foreign key: integer when numeric, string otherwise.
    Reference,
    /// `YYYY-MM-DD`.
    Date,
    /// `HH:MM`.
    Time,
    Select(&'static [(&'static str, &'static str)]),
    Flag,
}

/// One editable input of a resource form (or one filter control).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// JSON key in request bodies and records.
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    #[must_use]
    pub const fn required(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind, required: true }
    }

    #[must_use]
    pub const fn optional(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind, required: false }
    }
}

/// A table column: header plus a cell formatter.
pub struct Column<R> {
    pub header: &'static str,
    pub cell: fn(&R) -> String,
}

impl<R> Column<R> {
    #[must_use]
    pub const fn new(header: &'static str, cell: fn(&R) -> String) -> Self {
        Self { header, cell }
    }
}

/// A record type served by a REST collection endpoint.
pub trait Resource: Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection path, e.g. `/api/animales`.
    const ENDPOINT: &'static str;
    /// Page heading.
    const TITLE: &'static str;
    /// Singular noun used in dialog titles and notices.
    const NOUN: &'static str;

    fn id(&self) -> &RecordId;

    fn columns() -> Vec<Column<Self>>;

    fn fields() -> &'static [FieldSpec];

    /// Query-string filters shown above the table.
    fn filters() -> &'static [FieldSpec] {
        &[]
    }

    /// Path and query of the list request for the given filter values.
    fn list_request(query: Vec<(String, String)>) -> (String, Vec<(String, String)>) {
        (Self::ENDPOINT.to_owned(), query)
    }

    /// Path of a single record.
    fn item_path(id: &RecordId) -> String {
        format!("{}/{}", Self::ENDPOINT, id.path_segment())
    }
}

pub(crate) const ESTADO_REGISTRO: &[(&str, &str)] = &[
    ("pendiente", "Pendiente"),
    ("aprobada", "Aprobada"),
    ("rechazada", "Rechazada"),
];
