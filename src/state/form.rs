//! Text buffer behind a resource form or a filter bar.
//!
//! Inputs hold strings. Conversion to JSON happens once, on submit, driven
//! by each field's [`FieldKind`].

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::models::{FieldKind, FieldSpec, date_only, fmt_number};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("El campo {0} es obligatorio")]
    Missing(&'static str),
    #[error("El campo {0} debe ser numérico")]
    NotANumber(&'static str),
    #[error("El campo {0} tiene un valor no permitido")]
    InvalidOption(&'static str),
}

/// Whether a body creates a record or replaces an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyMode {
    /// Blank optional fields are left out.
    Create,
    /// Blank optional fields are sent as `null` so they can be cleared.
    Update,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormBuffer {
    values: BTreeMap<String, String>,
}

impl FormBuffer {
    /// Empty inputs for `fields`. Flags start checked.
    #[must_use]
    pub fn blank(fields: &[FieldSpec]) -> Self {
        let values = fields
            .iter()
            .map(|field| {
                let initial = if field.kind == FieldKind::Flag { "true" } else { "" };
                (field.key.to_owned(), initial.to_owned())
            })
            .collect();
        Self { values }
    }

    /// Inputs prefilled from an existing record.
    #[must_use]
    pub fn from_record<R: Serialize>(record: &R, fields: &[FieldSpec]) -> Self {
        let Ok(value) = serde_json::to_value(record) else {
            log::warn!("record could not be serialized for editing");
            return Self::blank(fields);
        };
        let values = fields
            .iter()
            .map(|field| {
                let raw = value.get(field.key).unwrap_or(&Value::Null);
                (field.key.to_owned(), input_text(field.kind, raw))
            })
            .collect();
        Self { values }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map_or("", String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_owned(), value.into());
    }

    pub fn clear(&mut self) {
        self.values.values_mut().for_each(String::clear);
    }

    /// Check required fields, numbers and select options.
    ///
    /// # Errors
    ///
    /// Returns the first failing field in declaration order.
    pub fn validate(&self, fields: &[FieldSpec]) -> Result<(), FormError> {
        for field in fields {
            let text = self.get(field.key).trim();
            if text.is_empty() {
                if field.required && field.kind != FieldKind::Flag {
                    return Err(FormError::Missing(field.label));
                }
                continue;
            }
            match field.kind {
                FieldKind::Number if parse_number(text).is_none() => {
                    return Err(FormError::NotANumber(field.label));
                }
                FieldKind::Select(options) if !options.iter().any(|(value, _)| *value == text) => {
                    return Err(FormError::InvalidOption(field.label));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Validate and build the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] when validation fails.
    pub fn to_body(&self, fields: &[FieldSpec], mode: BodyMode) -> Result<Value, FormError> {
        self.validate(fields)?;
        let mut body = Map::new();
        for field in fields {
            let text = self.get(field.key).trim();
            let value = match field.kind {
                FieldKind::Flag => Value::Bool(text == "true"),
                _ if text.is_empty() => match (mode, field.kind) {
                    (BodyMode::Update, kind) if kind != FieldKind::Secret => Value::Null,
                    _ => continue,
                },
                FieldKind::Number => parse_number(text).ok_or(FormError::NotANumber(field.label))?,
                FieldKind::Reference => text
                    .parse::<i64>()
                    .map_or_else(|_| Value::String(text.to_owned()), Value::from),
                FieldKind::Date => Value::String(date_only(text).to_owned()),
                FieldKind::Text
                | FieldKind::LongText
                | FieldKind::Secret
                | FieldKind::Time
                | FieldKind::Select(_) => Value::String(text.to_owned()),
            };
            body.insert(field.key.to_owned(), value);
        }
        Ok(Value::Object(body))
    }

    /// Non-blank filter values as query pairs, in `filters` order.
    #[must_use]
    pub fn to_query(&self, filters: &[FieldSpec]) -> Vec<(String, String)> {
        filters
            .iter()
            .filter_map(|field| {
                let text = self.get(field.key).trim();
                (!text.is_empty()).then(|| (field.key.to_owned(), text.to_owned()))
            })
            .collect()
    }
}

/// Integral values become JSON integers; decimal commas are accepted.
fn parse_number(text: &str) -> Option<Value> {
    let normalized = text.replace(',', ".");
    if let Ok(n) = normalized.parse::<i64>() {
        return Some(Value::from(n));
    }
    let n: f64 = normalized.parse().ok()?;
    Number::from_f64(n).map(Value::Number)
}

fn input_text(kind: FieldKind, raw: &Value) -> String {
    match (kind, raw) {
        (FieldKind::Secret, _) | (_, Value::Null) => String::new(),
        (FieldKind::Flag, Value::Bool(b)) => b.to_string(),
        (FieldKind::Date, Value::String(s)) => date_only(s).to_owned(),
        (FieldKind::Time, Value::String(s)) => s.get(..5).filter(|hm| hm.contains(':')).unwrap_or(s).to_owned(),
        (_, Value::String(s)) => s.clone(),
        (_, Value::Number(n)) => n.as_i64().map_or_else(|| n.as_f64().map(fmt_number).unwrap_or_default(), |i| i.to_string()),
        (_, Value::Bool(b)) => b.to_string(),
        (_, other) => other.to_string(),
    }
}
