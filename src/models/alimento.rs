//! Food inventory (`/api/alimentos`).

#[cfg(test)]
#[path = "alimento_test.rs"]
mod alimento_test;

use serde::{Deserialize, Serialize};

use super::{Column, FieldKind, FieldSpec, RecordId, Resource, de, fmt_opt_number};

pub const TIPO_ALIMENTO: &[(&str, &str)] = &[
    ("carne", "Carne"),
    ("pescado", "Pescado"),
    ("fruta", "Fruta"),
    ("verdura", "Verdura"),
    ("forraje", "Forraje"),
    ("concentrado", "Concentrado"),
    ("suplemento", "Suplemento"),
];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("nombre", "Nombre", FieldKind::Text),
    FieldSpec::optional("tipo", "Tipo", FieldKind::Select(TIPO_ALIMENTO)),
    FieldSpec::required("stock_actual", "Stock actual", FieldKind::Number),
    FieldSpec::required("stock_minimo", "Stock mínimo", FieldKind::Number),
    FieldSpec::optional("unidad_medida", "Unidad", FieldKind::Text),
    FieldSpec::optional("proveedor", "Proveedor", FieldKind::Text),
    FieldSpec::optional("fecha_vencimiento", "Vencimiento", FieldKind::Date),
];

const FILTERS: &[FieldSpec] = &[FieldSpec::optional("tipo", "Tipo", FieldKind::Select(TIPO_ALIMENTO))];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Alimento {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default, deserialize_with = "de::text")]
    pub nombre: String,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub tipo: Option<String>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub stock_actual: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub stock_minimo: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub unidad_medida: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub proveedor: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub fecha_vencimiento: Option<String>,
}

impl Alimento {
    /// Stock at or below the reorder threshold.
    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        match (self.stock_actual, self.stock_minimo) {
            (Some(actual), Some(minimo)) => actual <= minimo,
            _ => false,
        }
    }
}

impl Resource for Alimento {
    const ENDPOINT: &'static str = "/api/alimentos";
    const TITLE: &'static str = "Inventario de alimentos";
    const NOUN: &'static str = "alimento";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Nombre", |a: &Self| a.nombre.clone()),
            Column::new("Tipo", |a: &Self| a.tipo.clone().unwrap_or_default()),
            Column::new("Stock", |a: &Self| {
                let unit = a.unidad_medida.as_deref().unwrap_or("");
                format!("{} {unit}", fmt_opt_number(a.stock_actual)).trim().to_owned()
            }),
            Column::new("Mínimo", |a: &Self| fmt_opt_number(a.stock_minimo)),
            Column::new("Estado", |a: &Self| if a.is_low_stock() { "Stock bajo" } else { "OK" }.to_owned()),
            Column::new("Proveedor", |a: &Self| a.proveedor.clone().unwrap_or_default()),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn filters() -> &'static [FieldSpec] {
        FILTERS
    }
}
