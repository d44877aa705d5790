//! Medical treatments (`/api/clinico/tratamientos`).

use serde::{Deserialize, Serialize};

use super::{Column, FieldKind, FieldSpec, RecordId, Resource, date_only, de};

pub const ESTADO_TRATAMIENTO: &[(&str, &str)] = &[
    ("activo", "Activo"),
    ("finalizado", "Finalizado"),
    ("suspendido", "Suspendido"),
];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("animal_id", "Animal", FieldKind::Reference),
    FieldSpec::required("diagnostico", "Diagnóstico", FieldKind::LongText),
    FieldSpec::required("medicamento", "Medicamento", FieldKind::Text),
    FieldSpec::optional("dosis", "Dosis", FieldKind::Text),
    FieldSpec::required("fecha_inicio", "Inicio", FieldKind::Date),
    FieldSpec::optional("fecha_fin", "Fin", FieldKind::Date),
    FieldSpec::optional("veterinario", "Veterinario", FieldKind::Text),
    FieldSpec::required("estado", "Estado", FieldKind::Select(ESTADO_TRATAMIENTO)),
];

const FILTERS: &[FieldSpec] = &[FieldSpec::optional("estado", "Estado", FieldKind::Select(ESTADO_TRATAMIENTO))];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tratamiento {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub animal_id: RecordId,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub animal_nombre: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub diagnostico: String,
    #[serde(default, deserialize_with = "de::text")]
    pub medicamento: String,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub dosis: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub fecha_inicio: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub fecha_fin: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub veterinario: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub estado: String,
}

impl Resource for Tratamiento {
    const ENDPOINT: &'static str = "/api/clinico/tratamientos";
    const TITLE: &'static str = "Clínica: tratamientos";
    const NOUN: &'static str = "tratamiento";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Animal", |t: &Self| {
                t.animal_nombre
                    .clone()
                    .unwrap_or_else(|| t.animal_id.to_string())
            }),
            Column::new("Diagnóstico", |t: &Self| t.diagnostico.clone()),
            Column::new("Medicamento", |t: &Self| t.medicamento.clone()),
            Column::new("Dosis", |t: &Self| t.dosis.clone().unwrap_or_default()),
            Column::new("Inicio", |t: &Self| t.fecha_inicio.as_deref().map(date_only).unwrap_or_default().to_owned()),
            Column::new("Estado", |t: &Self| t.estado.clone()),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn filters() -> &'static [FieldSpec] {
        FILTERS
    }
}
