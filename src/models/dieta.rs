//! Feeding schedules (`/api/dietas`) and their execution log.

#[cfg(test)]
#[path = "dieta_test.rs"]
mod dieta_test;

use serde::{Deserialize, Serialize};

use super::{Column, FieldKind, FieldSpec, RecordId, Resource, de, fmt_opt_number, fmt_yes_no};

pub const FRECUENCIA: &[(&str, &str)] = &[
    ("diaria", "Diaria"),
    ("dos_veces_dia", "Dos veces al día"),
    ("semanal", "Semanal"),
];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("animal_id", "Animal", FieldKind::Reference),
    FieldSpec::required("alimento_id", "Alimento", FieldKind::Reference),
    FieldSpec::required("cantidad", "Cantidad", FieldKind::Number),
    FieldSpec::required("hora", "Hora", FieldKind::Time),
    FieldSpec::optional("frecuencia", "Frecuencia", FieldKind::Select(FRECUENCIA)),
    FieldSpec::optional("activo", "Activa", FieldKind::Flag),
];

const FILTERS: &[FieldSpec] = &[FieldSpec::optional("animal_id", "Animal (id)", FieldKind::Reference)];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HorarioAlimentacion {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub animal_id: RecordId,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub animal_nombre: Option<String>,
    #[serde(default)]
    pub alimento_id: RecordId,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub alimento_nombre: Option<String>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub cantidad: Option<f64>,
    #[serde(default, deserialize_with = "de::text")]
    pub hora: String,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub frecuencia: Option<String>,
    #[serde(default, deserialize_with = "de::flag")]
    pub activo: bool,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub ultima_ejecucion: Option<String>,
}

impl Resource for HorarioAlimentacion {
    const ENDPOINT: &'static str = "/api/dietas";
    const TITLE: &'static str = "Dietas y horarios de alimentación";
    const NOUN: &'static str = "horario";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Animal", |h: &Self| {
                h.animal_nombre
                    .clone()
                    .unwrap_or_else(|| h.animal_id.to_string())
            }),
            Column::new("Alimento", |h: &Self| {
                h.alimento_nombre
                    .clone()
                    .unwrap_or_else(|| h.alimento_id.to_string())
            }),
            Column::new("Cantidad", |h: &Self| fmt_opt_number(h.cantidad)),
            Column::new("Hora", |h: &Self| h.hora.get(..5).unwrap_or(&h.hora).to_owned()),
            Column::new("Frecuencia", |h: &Self| h.frecuencia.clone().unwrap_or_default()),
            Column::new("Activa", |h: &Self| fmt_yes_no(h.activo)),
            Column::new("Última ejecución", |h: &Self| h.ultima_ejecucion.clone().unwrap_or_default()),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn filters() -> &'static [FieldSpec] {
        FILTERS
    }

    /// Filtering by animal switches to the per-animal endpoint.
    fn list_request(query: Vec<(String, String)>) -> (String, Vec<(String, String)>) {
        let (animal, rest): (Vec<_>, Vec<_>) = query.into_iter().partition(|(key, _)| key == "animal_id");
        match animal.into_iter().map(|(_, id)| id.trim().to_owned()).find(|id| !id.is_empty()) {
            Some(id) => (Self::por_animal_path(&RecordId::from(id)), rest),
            None => (Self::ENDPOINT.to_owned(), rest),
        }
    }
}

impl HorarioAlimentacion {
    #[must_use]
    pub fn por_animal_path(animal_id: &RecordId) -> String {
        format!("{}/animal/{}", Self::ENDPOINT, animal_id.path_segment())
    }
}

/// Payload of `/api/dietas/ejecuciones/estadisticas`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EjecucionEstadisticas {
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub ejecutadas_hoy: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub pendientes_hoy: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub total_ejecuciones: Option<i64>,
}

/// Body of `POST /api/dietas/:id/ejecutar`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EjecucionDieta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cantidad_suministrada: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
}
