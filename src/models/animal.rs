//! Animals housed in the park (`/api/animales`).

use serde::{Deserialize, Serialize};

use super::{Column, FieldKind, FieldSpec, RecordId, Resource, de};

pub const SEXO: &[(&str, &str)] = &[("macho", "Macho"), ("hembra", "Hembra")];

pub const ESTADO_SALUD: &[(&str, &str)] = &[
    ("saludable", "Saludable"),
    ("enfermo", "Enfermo"),
    ("en_tratamiento", "En tratamiento"),
    ("cuarentena", "Cuarentena"),
];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("nombre", "Nombre", FieldKind::Text),
    FieldSpec::required("especie", "Especie", FieldKind::Text),
    FieldSpec::optional("edad", "Edad (años)", FieldKind::Number),
    FieldSpec::optional("sexo", "Sexo", FieldKind::Select(SEXO)),
    FieldSpec::required("estado_salud", "Estado de salud", FieldKind::Select(ESTADO_SALUD)),
    FieldSpec::optional("habitat", "Hábitat", FieldKind::Text),
    FieldSpec::optional("fecha_ingreso", "Fecha de ingreso", FieldKind::Date),
    FieldSpec::optional("observaciones", "Observaciones", FieldKind::LongText),
];

const FILTERS: &[FieldSpec] = &[
    FieldSpec::optional("especie", "Especie", FieldKind::Text),
    FieldSpec::optional("estado_salud", "Estado de salud", FieldKind::Select(ESTADO_SALUD)),
];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default, deserialize_with = "de::text")]
    pub nombre: String,
    #[serde(default, deserialize_with = "de::text")]
    pub especie: String,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub edad: Option<i64>,
    #[serde(default, deserialize_with = "de::text")]
    pub sexo: String,
    #[serde(default, deserialize_with = "de::text")]
    pub estado_salud: String,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub habitat: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub fecha_ingreso: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub observaciones: Option<String>,
}

impl Animal {
    /// Whether the animal currently needs veterinary attention.
    #[must_use]
    pub fn needs_attention(&self) -> bool {
        matches!(self.estado_salud.as_str(), "enfermo" | "en_tratamiento" | "cuarentena")
    }
}

impl Resource for Animal {
    const ENDPOINT: &'static str = "/api/animales";
    const TITLE: &'static str = "Animales";
    const NOUN: &'static str = "animal";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Nombre", |a: &Self| a.nombre.clone()),
            Column::new("Especie", |a: &Self| a.especie.clone()),
            Column::new("Edad", |a: &Self| a.edad.map(|e| e.to_string()).unwrap_or_default()),
            Column::new("Sexo", |a: &Self| a.sexo.clone()),
            Column::new("Salud", |a: &Self| a.estado_salud.replace('_', " ")),
            Column::new("Hábitat", |a: &Self| a.habitat.clone().unwrap_or_default()),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn filters() -> &'static [FieldSpec] {
        FILTERS
    }
}
