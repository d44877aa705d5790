//! Staff records (`/api/empleados`).

use serde::{Deserialize, Serialize};

use super::{Column, FieldKind, FieldSpec, RecordId, Resource, de, fmt_money};

pub const DEPARTAMENTO: &[(&str, &str)] = &[
    ("cuidado_animal", "Cuidado animal"),
    ("veterinaria", "Veterinaria"),
    ("limpieza", "Limpieza"),
    ("taquilla", "Taquilla"),
    ("administracion", "Administración"),
    ("rrhh", "Recursos humanos"),
];

pub const ESTADO_EMPLEADO: &[(&str, &str)] = &[("activo", "Activo"), ("inactivo", "Inactivo")];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("nombre", "Nombre", FieldKind::Text),
    FieldSpec::required("apellido", "Apellido", FieldKind::Text),
    FieldSpec::optional("email", "Email", FieldKind::Text),
    FieldSpec::optional("telefono", "Teléfono", FieldKind::Text),
    FieldSpec::required("cargo", "Cargo", FieldKind::Text),
    FieldSpec::required("departamento", "Departamento", FieldKind::Select(DEPARTAMENTO)),
    FieldSpec::optional("salario", "Salario", FieldKind::Number),
    FieldSpec::optional("fecha_contratacion", "Fecha de contratación", FieldKind::Date),
    FieldSpec::required("estado", "Estado", FieldKind::Select(ESTADO_EMPLEADO)),
];

const FILTERS: &[FieldSpec] = &[
    FieldSpec::optional("departamento", "Departamento", FieldKind::Select(DEPARTAMENTO)),
    FieldSpec::optional("estado", "Estado", FieldKind::Select(ESTADO_EMPLEADO)),
];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Empleado {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default, deserialize_with = "de::text")]
    pub nombre: String,
    #[serde(default, deserialize_with = "de::text")]
    pub apellido: String,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub telefono: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub cargo: String,
    #[serde(default, deserialize_with = "de::text")]
    pub departamento: String,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub salario: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub fecha_contratacion: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub estado: String,
}

impl Empleado {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.nombre, self.apellido).trim().to_owned()
    }
}

impl Resource for Empleado {
    const ENDPOINT: &'static str = "/api/empleados";
    const TITLE: &'static str = "Empleados";
    const NOUN: &'static str = "empleado";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Nombre", |e: &Self| e.full_name()),
            Column::new("Cargo", |e: &Self| e.cargo.clone()),
            Column::new("Departamento", |e: &Self| e.departamento.replace('_', " ")),
            Column::new("Email", |e: &Self| e.email.clone().unwrap_or_default()),
            Column::new("Salario", |e: &Self| fmt_money(e.salario)),
            Column::new("Estado", |e: &Self| e.estado.clone()),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn filters() -> &'static [FieldSpec] {
        FILTERS
    }
}
