//! Cleaning tasks (`/api/limpieza`) and the staff available to take them.

use serde::{Deserialize, Serialize};

use super::{Column, FieldKind, FieldSpec, RecordId, Resource, date_only, de};

pub const TURNO: &[(&str, &str)] = &[("manana", "Mañana"), ("tarde", "Tarde"), ("noche", "Noche")];

pub const ESTADO_TAREA: &[(&str, &str)] = &[
    ("pendiente", "Pendiente"),
    ("en_progreso", "En progreso"),
    ("completada", "Completada"),
];

pub const PRIORIDAD: &[(&str, &str)] = &[("baja", "Baja"), ("media", "Media"), ("alta", "Alta")];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("area", "Área", FieldKind::Text),
    FieldSpec::optional("descripcion", "Descripción", FieldKind::LongText),
    FieldSpec::required("empleado_id", "Empleado", FieldKind::Reference),
    FieldSpec::required("fecha", "Fecha", FieldKind::Date),
    FieldSpec::optional("turno", "Turno", FieldKind::Select(TURNO)),
    FieldSpec::required("estado", "Estado", FieldKind::Select(ESTADO_TAREA)),
    FieldSpec::optional("prioridad", "Prioridad", FieldKind::Select(PRIORIDAD)),
];

const FILTERS: &[FieldSpec] = &[
    FieldSpec::optional("estado", "Estado", FieldKind::Select(ESTADO_TAREA)),
    FieldSpec::optional("fecha", "Fecha", FieldKind::Date),
];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TareaLimpieza {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default, deserialize_with = "de::text")]
    pub area: String,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub empleado_id: RecordId,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub empleado_nombre: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub fecha: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub turno: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub estado: String,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub prioridad: Option<String>,
}

impl TareaLimpieza {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.estado != "completada"
    }
}

impl Resource for TareaLimpieza {
    const ENDPOINT: &'static str = "/api/limpieza";
    const TITLE: &'static str = "Tareas de limpieza";
    const NOUN: &'static str = "tarea";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Área", |t: &Self| t.area.clone()),
            Column::new("Empleado", |t: &Self| {
                t.empleado_nombre
                    .clone()
                    .unwrap_or_else(|| t.empleado_id.to_string())
            }),
            Column::new("Fecha", |t: &Self| t.fecha.as_deref().map(date_only).unwrap_or_default().to_owned()),
            Column::new("Turno", |t: &Self| t.turno.clone().unwrap_or_default()),
            Column::new("Prioridad", |t: &Self| t.prioridad.clone().unwrap_or_default()),
            Column::new("Estado", |t: &Self| t.estado.replace('_', " ")),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn filters() -> &'static [FieldSpec] {
        FILTERS
    }
}

/// Row of `/api/limpieza/empleados/disponibles`, used to fill the assignee select.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmpleadoDisponible {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default, deserialize_with = "de::text")]
    pub nombre: String,
    #[serde(default, deserialize_with = "de::text")]
    pub apellido: String,
}

impl EmpleadoDisponible {
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.nombre, self.apellido).trim().to_owned()
    }
}
