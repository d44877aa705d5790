//! Ticket sales (`/api/entradas`) and their aggregate statistics.

use serde::{Deserialize, Serialize};

use super::{Column, FieldKind, FieldSpec, RecordId, Resource, date_only, de, fmt_money};

pub const TIPO_ENTRADA: &[(&str, &str)] = &[
    ("adulto", "Adulto"),
    ("nino", "Niño"),
    ("adulto_mayor", "Adulto mayor"),
    ("estudiante", "Estudiante"),
];

pub const METODO_PAGO: &[(&str, &str)] = &[
    ("efectivo", "Efectivo"),
    ("tarjeta", "Tarjeta"),
    ("transferencia", "Transferencia"),
];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("tipo", "Tipo", FieldKind::Select(TIPO_ENTRADA)),
    FieldSpec::required("cantidad", "Cantidad", FieldKind::Number),
    FieldSpec::required("precio_unitario", "Precio unitario", FieldKind::Number),
    FieldSpec::optional("metodo_pago", "Método de pago", FieldKind::Select(METODO_PAGO)),
    FieldSpec::optional("fecha_venta", "Fecha de venta", FieldKind::Date),
];

const FILTERS: &[FieldSpec] = &[
    FieldSpec::optional("fecha", "Fecha", FieldKind::Date),
    FieldSpec::optional("tipo", "Tipo", FieldKind::Select(TIPO_ENTRADA)),
];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Entrada {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default, deserialize_with = "de::text")]
    pub tipo: String,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub cantidad: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub precio_unitario: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub fecha_venta: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub metodo_pago: Option<String>,
}

impl Entrada {
    /// Sale total, computed from quantity and price when the server omits it.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_or_computed(&self) -> Option<f64> {
        self.total.or_else(|| {
            let cantidad = self.cantidad?;
            Some(cantidad as f64 * self.precio_unitario?)
        })
    }
}

impl Resource for Entrada {
    const ENDPOINT: &'static str = "/api/entradas";
    const TITLE: &'static str = "Venta de entradas";
    const NOUN: &'static str = "venta";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Fecha", |e: &Self| e.fecha_venta.as_deref().map(date_only).unwrap_or_default().to_owned()),
            Column::new("Tipo", |e: &Self| e.tipo.replace('_', " ")),
            Column::new("Cantidad", |e: &Self| e.cantidad.map(|c| c.to_string()).unwrap_or_default()),
            Column::new("Precio", |e: &Self| fmt_money(e.precio_unitario)),
            Column::new("Total", |e: &Self| fmt_money(e.total_or_computed())),
            Column::new("Pago", |e: &Self| e.metodo_pago.clone().unwrap_or_default()),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn filters() -> &'static [FieldSpec] {
        FILTERS
    }
}

/// Per-type breakdown inside [`EntradaEstadisticas`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VentasPorTipo {
    #[serde(default, deserialize_with = "de::text")]
    pub tipo: String,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub cantidad: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub total: Option<f64>,
}

/// Payload of `/api/entradas/estadisticas`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntradaEstadisticas {
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub total_entradas: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub ingresos_totales: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub entradas_hoy: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub ingresos_hoy: Option<f64>,
    #[serde(default)]
    pub por_tipo: Vec<VentasPorTipo>,
}
