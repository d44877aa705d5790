//! HR records under `/api/rrhh`: vacations, absences, discounts and bonuses.

use serde::{Deserialize, Serialize};

use super::{Column, ESTADO_REGISTRO, FieldKind, FieldSpec, RecordId, Resource, date_only, de, fmt_money, fmt_yes_no};

fn employee_cell(nombre: Option<&String>, id: &RecordId) -> String {
    nombre.cloned().unwrap_or_else(|| id.to_string())
}

fn date_cell(raw: Option<&String>) -> String {
    raw.map(|d| date_only(d).to_owned()).unwrap_or_default()
}

const VACACION_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("empleado_id", "Empleado", FieldKind::Reference),
    FieldSpec::required("fecha_inicio", "Desde", FieldKind::Date),
    FieldSpec::required("fecha_fin", "Hasta", FieldKind::Date),
    FieldSpec::optional("motivo", "Motivo", FieldKind::LongText),
    FieldSpec::required("estado", "Estado", FieldKind::Select(ESTADO_REGISTRO)),
];

const VACACION_FILTERS: &[FieldSpec] = &[FieldSpec::optional("estado", "Estado", FieldKind::Select(ESTADO_REGISTRO))];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vacacion {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub empleado_id: RecordId,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub empleado_nombre: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub fecha_inicio: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub fecha_fin: Option<String>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub dias: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub motivo: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub estado: String,
}

impl Resource for Vacacion {
    const ENDPOINT: &'static str = "/api/rrhh/vacaciones";
    const TITLE: &'static str = "Vacaciones";
    const NOUN: &'static str = "vacación";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Empleado", |v: &Self| employee_cell(v.empleado_nombre.as_ref(), &v.empleado_id)),
            Column::new("Desde", |v: &Self| date_cell(v.fecha_inicio.as_ref())),
            Column::new("Hasta", |v: &Self| date_cell(v.fecha_fin.as_ref())),
            Column::new("Días", |v: &Self| v.dias.map(|d| d.to_string()).unwrap_or_default()),
            Column::new("Estado", |v: &Self| v.estado.clone()),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        VACACION_FIELDS
    }

    fn filters() -> &'static [FieldSpec] {
        VACACION_FILTERS
    }
}

const INASISTENCIA_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("empleado_id", "Empleado", FieldKind::Reference),
    FieldSpec::required("fecha", "Fecha", FieldKind::Date),
    FieldSpec::optional("motivo", "Motivo", FieldKind::LongText),
    FieldSpec::optional("justificada", "Justificada", FieldKind::Flag),
];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Inasistencia {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub empleado_id: RecordId,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub empleado_nombre: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub fecha: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub motivo: Option<String>,
    #[serde(default, deserialize_with = "de::flag")]
    pub justificada: bool,
}

impl Resource for Inasistencia {
    const ENDPOINT: &'static str = "/api/rrhh/inasistencias";
    const TITLE: &'static str = "Inasistencias";
    const NOUN: &'static str = "inasistencia";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Empleado", |i: &Self| employee_cell(i.empleado_nombre.as_ref(), &i.empleado_id)),
            Column::new("Fecha", |i: &Self| date_cell(i.fecha.as_ref())),
            Column::new("Motivo", |i: &Self| i.motivo.clone().unwrap_or_default()),
            Column::new("Justificada", |i: &Self| fmt_yes_no(i.justificada)),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        INASISTENCIA_FIELDS
    }
}

const AJUSTE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("empleado_id", "Empleado", FieldKind::Reference),
    FieldSpec::required("monto", "Monto", FieldKind::Number),
    FieldSpec::required("motivo", "Motivo", FieldKind::Text),
    FieldSpec::required("fecha", "Fecha", FieldKind::Date),
];

/// Salary discount.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Descuento {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub empleado_id: RecordId,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub empleado_nombre: Option<String>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub monto: Option<f64>,
    #[serde(default, deserialize_with = "de::text")]
    pub motivo: String,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub fecha: Option<String>,
}

impl Resource for Descuento {
    const ENDPOINT: &'static str = "/api/rrhh/descuentos";
    const TITLE: &'static str = "Descuentos";
    const NOUN: &'static str = "descuento";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Empleado", |d: &Self| employee_cell(d.empleado_nombre.as_ref(), &d.empleado_id)),
            Column::new("Monto", |d: &Self| fmt_money(d.monto)),
            Column::new("Motivo", |d: &Self| d.motivo.clone()),
            Column::new("Fecha", |d: &Self| date_cell(d.fecha.as_ref())),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        AJUSTE_FIELDS
    }
}

/// Salary bonus.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bono {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub empleado_id: RecordId,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub empleado_nombre: Option<String>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub monto: Option<f64>,
    #[serde(default, deserialize_with = "de::text")]
    pub motivo: String,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub fecha: Option<String>,
}

impl Resource for Bono {
    const ENDPOINT: &'static str = "/api/rrhh/bonos";
    const TITLE: &'static str = "Bonos";
    const NOUN: &'static str = "bono";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Empleado", |b: &Self| employee_cell(b.empleado_nombre.as_ref(), &b.empleado_id)),
            Column::new("Monto", |b: &Self| fmt_money(b.monto)),
            Column::new("Motivo", |b: &Self| b.motivo.clone()),
            Column::new("Fecha", |b: &Self| date_cell(b.fecha.as_ref())),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        AJUSTE_FIELDS
    }
}
