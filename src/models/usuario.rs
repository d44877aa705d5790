//! Console users (`/api/usuarios`) and the login profile blob.

use serde::{Deserialize, Serialize};

use super::{Column, FieldKind, FieldSpec, RecordId, Resource, de, fmt_yes_no};

pub const ROLES: &[(&str, &str)] = &[
    ("admin", "Administrador"),
    ("veterinario", "Veterinario"),
    ("cuidador", "Cuidador"),
    ("limpieza", "Limpieza"),
    ("taquilla", "Taquilla"),
    ("rrhh", "Recursos humanos"),
];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("nombre", "Nombre", FieldKind::Text),
    FieldSpec::required("email", "Email", FieldKind::Text),
    FieldSpec::optional("password", "Contraseña", FieldKind::Secret),
    FieldSpec::required("rol", "Rol", FieldKind::Select(ROLES)),
    FieldSpec::optional("activo", "Activo", FieldKind::Flag),
];

const FILTERS: &[FieldSpec] = &[FieldSpec::optional("rol", "Rol", FieldKind::Select(ROLES))];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Usuario {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default, deserialize_with = "de::text")]
    pub nombre: String,
    #[serde(default, deserialize_with = "de::text")]
    pub email: String,
    #[serde(default, deserialize_with = "de::text")]
    pub rol: String,
    #[serde(default, deserialize_with = "de::flag")]
    pub activo: bool,
}

impl Resource for Usuario {
    const ENDPOINT: &'static str = "/api/usuarios";
    const TITLE: &'static str = "Usuarios";
    const NOUN: &'static str = "usuario";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Nombre", |u: &Self| u.nombre.clone()),
            Column::new("Email", |u: &Self| u.email.clone()),
            Column::new("Rol", |u: &Self| u.rol.clone()),
            Column::new("Activo", |u: &Self| fmt_yes_no(u.activo)),
        ]
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn filters() -> &'static [FieldSpec] {
        FILTERS
    }
}

/// Body of `PUT /api/usuarios/:id/role`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoleChange<'a> {
    pub rol: &'a str,
}

/// Denormalized profile stored next to the token after login.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default, deserialize_with = "de::text")]
    pub nombre: String,
    #[serde(default, deserialize_with = "de::text")]
    pub email: String,
    #[serde(default, deserialize_with = "de::text")]
    pub rol: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// `data` of a successful login response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LoginData {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}
