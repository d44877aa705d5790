//! Dashboard aggregates: counters plus two chart datasets.
//!
//! The push channel sends stats either flat (the shape the page renders) or
//! nested per domain. Both decode into the flat [`DashboardStats`].

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{de, fmt_number};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "de::count")]
    pub total_animales: i64,
    #[serde(default, deserialize_with = "de::count")]
    pub total_empleados: i64,
    #[serde(default, deserialize_with = "de::count")]
    pub empleados_activos: i64,
    #[serde(default, deserialize_with = "de::count")]
    pub visitantes_hoy: i64,
    #[serde(default, deserialize_with = "de::count")]
    pub visitantes_ayer: i64,
    #[serde(default, deserialize_with = "de::count")]
    pub alertas_medicas: i64,
    #[serde(default, deserialize_with = "de::count")]
    pub tareas_limpieza_activas: i64,
}

#[derive(Debug, Default, Deserialize)]
struct NestedStats {
    #[serde(default)]
    animales: NestedAnimales,
    #[serde(default)]
    empleados: NestedEmpleados,
    #[serde(default)]
    visitantes: NestedVisitantes,
    #[serde(default)]
    limpiezas: NestedLimpiezas,
}

#[derive(Debug, Default, Deserialize)]
struct NestedAnimales {
    #[serde(default, deserialize_with = "de::count")]
    total: i64,
    #[serde(default, deserialize_with = "de::count")]
    enfermos: i64,
}

#[derive(Debug, Default, Deserialize)]
struct NestedEmpleados {
    #[serde(default, deserialize_with = "de::count")]
    total: i64,
    #[serde(default, deserialize_with = "de::count")]
    activos: i64,
}

#[derive(Debug, Default, Deserialize)]
struct NestedVisitantes {
    #[serde(default, deserialize_with = "de::count")]
    hoy: i64,
    #[serde(default, deserialize_with = "de::count")]
    ayer: i64,
}

#[derive(Debug, Default, Deserialize)]
struct NestedLimpiezas {
    #[serde(default, deserialize_with = "de::count")]
    activas: i64,
}

impl From<NestedStats> for DashboardStats {
    fn from(nested: NestedStats) -> Self {
        Self {
            total_animales: nested.animales.total,
            total_empleados: nested.empleados.total,
            empleados_activos: nested.empleados.activos,
            visitantes_hoy: nested.visitantes.hoy,
            visitantes_ayer: nested.visitantes.ayer,
            alertas_medicas: nested.animales.enfermos,
            tareas_limpieza_activas: nested.limpiezas.activas,
        }
    }
}

const NESTED_KEYS: [&str; 4] = ["animales", "empleados", "visitantes", "limpiezas"];

impl DashboardStats {
    /// Decode a stats payload, optionally wrapped in `{stats: ...}`.
    ///
    /// Returns `None` when the payload is not an object.
    #[must_use]
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let inner = payload.get("stats").unwrap_or(payload);
        let object = inner.as_object()?;
        let nested = NESTED_KEYS
            .iter()
            .any(|key| object.get(*key).is_some_and(Value::is_object));
        if nested {
            serde_json::from_value::<NestedStats>(inner.clone())
                .ok()
                .map(Self::from)
        } else {
            serde_json::from_value(inner.clone()).ok()
        }
    }

    /// Signed day-over-day visitor change in percent, when yesterday had visitors.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn visitor_trend_pct(&self) -> Option<f64> {
        if self.visitantes_ayer == 0 {
            return None;
        }
        let delta = (self.visitantes_hoy - self.visitantes_ayer) as f64;
        Some(delta / self.visitantes_ayer as f64 * 100.0)
    }
}

/// One chart dataset: parallel labels and values.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl ChartSeries {
    /// Decode `{labels, data}` or a list of `{label|nombre|fecha, value|total|cantidad}` points.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => {
                let labels = map.get("labels")?.as_array()?;
                let data = map
                    .get("data")
                    .or_else(|| map.get("values"))?
                    .as_array()?;
                Some(Self {
                    labels: labels.iter().map(label_text).collect(),
                    data: data.iter().map(|v| number(v).unwrap_or(0.0)).collect(),
                })
            }
            Value::Array(points) => {
                let mut series = Self::default();
                for point in points {
                    let label = ["label", "nombre", "especie", "fecha", "dia"]
                        .iter()
                        .find_map(|k| point.get(*k))
                        .map(label_text)?;
                    let value = ["value", "total", "cantidad", "count"]
                        .iter()
                        .find_map(|k| point.get(*k))
                        .and_then(number)
                        .unwrap_or(0.0);
                    series.labels.push(label);
                    series.data.push(value);
                }
                Some(series)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Largest value, used to scale bars.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }
}

fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), fmt_number),
        other => other.to_string(),
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// The two dashboard charts. Each may be absent from a partial update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartsUpdate {
    /// Visitors per day.
    pub visitantes: Option<ChartSeries>,
    /// Animals per species.
    pub especies: Option<ChartSeries>,
}

impl ChartsUpdate {
    /// Decode a charts payload, optionally wrapped in `{charts: ...}`.
    #[must_use]
    pub fn from_payload(payload: &Value) -> Self {
        let inner = payload.get("charts").unwrap_or(payload);
        Self {
            visitantes: inner
                .get("visitantes")
                .or_else(|| inner.get("visitorsChart"))
                .and_then(ChartSeries::from_value),
            especies: inner
                .get("especies")
                .or_else(|| inner.get("speciesChart"))
                .and_then(ChartSeries::from_value),
        }
    }
}

/// Initial snapshot from `GET /api/dashboard/data`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub charts: ChartsUpdate,
}

impl DashboardSnapshot {
    #[must_use]
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            stats: DashboardStats::from_payload(payload).unwrap_or_default(),
            charts: ChartsUpdate::from_payload(payload),
        }
    }
}

/// Server-generated spreadsheet reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportKind {
    Animales,
    Empleados,
    Alimentos,
    Entradas,
    Limpieza,
    Tratamientos,
}

impl ReportKind {
    pub const ALL: [Self; 6] = [
        Self::Animales,
        Self::Empleados,
        Self::Alimentos,
        Self::Entradas,
        Self::Limpieza,
        Self::Tratamientos,
    ];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Animales => "animales",
            Self::Empleados => "empleados",
            Self::Alimentos => "alimentos",
            Self::Entradas => "entradas",
            Self::Limpieza => "limpieza",
            Self::Tratamientos => "tratamientos",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Animales => "Animales",
            Self::Empleados => "Empleados",
            Self::Alimentos => "Alimentos",
            Self::Entradas => "Entradas",
            Self::Limpieza => "Limpieza",
            Self::Tratamientos => "Tratamientos",
        }
    }

    /// File name offered to the browser download.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("reporte_{}.xlsx", self.slug())
    }
}
