//! Typed REST calls against the zoo backend.
//!
//! Every authenticated call carries `Authorization: Bearer <token>` from the
//! session. Without a valid token the call fails with
//! [`ApiError::Unauthorized`] before touching the network, so a missing
//! session and a 401 are handled the same way by pages.
//!
//! ERROR HANDLING
//! ==============
//! Status classification happens once in [`classify`]: 2xx passes, 401 is
//! `Unauthorized`, anything else is `Status` with the server's message when
//! the body carries one. Unparseable bodies become `InvalidResponse`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use percent_encoding::utf8_percent_encode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::envelope::{ListResult, record_payload, rejection, server_message};
use super::http::{ApiRequest, ApiResponse, Method, Transport};
use crate::error::ApiError;
use crate::models::{RecordId, URL_COMPONENT};
use crate::models::dashboard::{DashboardSnapshot, ReportKind};
use crate::models::dieta::{EjecucionDieta, EjecucionEstadisticas};
use crate::models::entrada::EntradaEstadisticas;
use crate::models::limpieza::EmpleadoDisponible;
use crate::models::usuario::{LoginData, LoginRequest, RoleChange, UserProfile};
use crate::session::Session;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const ME_PATH: &str = "/api/auth/me";
pub const DASHBOARD_DATA_PATH: &str = "/api/dashboard/data";
pub const ENTRADAS_STATS_PATH: &str = "/api/entradas/estadisticas";
pub const EMPLEADOS_DISPONIBLES_PATH: &str = "/api/limpieza/empleados/disponibles";
pub const EJECUCIONES_STATS_PATH: &str = "/api/dietas/ejecuciones/estadisticas";

pub(crate) fn ejecutar_dieta_path(id: &RecordId) -> String {
    format!("/api/dietas/{}/ejecutar", id.path_segment())
}

pub(crate) fn usuario_role_path(id: &RecordId) -> String {
    format!("/api/usuarios/{}/role", id.path_segment())
}

pub(crate) fn report_path(kind: ReportKind) -> String {
    format!("/api/dashboard/reports/{}/excel", kind.slug())
}

fn encode(raw: &str) -> String {
    utf8_percent_encode(raw, URL_COMPONENT).to_string()
}

/// Join base, path and a percent-encoded query string. Blank values are skipped.
pub(crate) fn build_url(base: &str, path: &str, query: &[(String, String)]) -> String {
    let pairs: Vec<String> = query
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| format!("{}={}", encode(key), encode(value.trim())))
        .collect();
    if pairs.is_empty() {
        format!("{base}{path}")
    } else {
        format!("{base}{path}?{}", pairs.join("&"))
    }
}

fn classify(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    if response.status == 401 {
        return Err(ApiError::Unauthorized);
    }
    let message = serde_json::from_slice::<Value>(&response.body)
        .ok()
        .as_ref()
        .and_then(server_message);
    Err(ApiError::Status { status: response.status, message })
}

/// Parse a JSON body. An empty body (e.g. 204) reads as `null`.
fn parse_json(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Auth {
    Bearer,
    Anonymous,
}

/// REST client bound to one base URL and session. Clones share both.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Rc<str>,
    session: Session,
    transport: Rc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: &str, session: Session, transport: Rc<dyn Transport>) -> Self {
        Self { base_url: Rc::from(base_url.trim_end_matches('/')), session, transport }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
        auth: Auth,
    ) -> Result<ApiResponse, ApiError> {
        let bearer = match auth {
            Auth::Bearer => Some(self.session.token().ok_or(ApiError::Unauthorized)?),
            Auth::Anonymous => None,
        };
        let request = ApiRequest { method, url: build_url(&self.base_url, path, query), bearer, body };
        let response = self.transport.send(request).await.map_err(|e| {
            log::warn!("{} {path} failed: {e}", method.as_str());
            ApiError::from(e)
        })?;
        classify(response).inspect_err(|e| log::warn!("{} {path}: {e}", method.as_str()))
    }

    async fn mutate(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, ApiError> {
        let response = self.send(method, path, &[], body, Auth::Bearer).await?;
        let value = parse_json(&response.body)?;
        if let Some(rejected) = rejection(&value) {
            return Err(ApiError::Status { status: response.status, message: rejected.message });
        }
        Ok(record_payload(value))
    }

    /// GET a collection, normalized to a [`ListResult`].
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx statuses and non-JSON bodies.
    pub async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<ListResult<T>, ApiError> {
        let response = self.send(Method::Get, path, query, None, Auth::Bearer).await?;
        Ok(ListResult::from_value(parse_json(&response.body)?))
    }

    /// GET a single record or stats object, unwrapping `{success, data}`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx statuses and bodies that do not decode as `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::Get, path, &[], None, Auth::Bearer).await?;
        decode(record_payload(parse_json(&response.body)?))
    }

    /// POST a new record.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx statuses and `success: false` bodies.
    pub async fn create(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.mutate(Method::Post, path, Some(body)).await
    }

    /// PUT an existing record.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx statuses and `success: false` bodies.
    pub async fn update(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.mutate(Method::Put, path, Some(body)).await
    }

    /// DELETE a record.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx statuses and `success: false` bodies.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.mutate(Method::Delete, path, None).await.map(|_| ())
    }

    /// GET a binary body as-is.
    ///
    /// # Errors
    ///
    /// Fails on transport errors and non-2xx statuses.
    pub async fn download(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.send(Method::Get, path, &[], None, Auth::Bearer).await?;
        Ok(response.body)
    }

    /// Exchange credentials for a token. Does not touch the session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for rejected credentials (including 401
    /// remapped to a status with the server's message) and
    /// [`ApiError::InvalidResponse`] when the body carries no token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginData, ApiError> {
        let body = serde_json::to_value(LoginRequest { email, password })?;
        let response = match self.send(Method::Post, LOGIN_PATH, &[], Some(body), Auth::Anonymous).await {
            Err(ApiError::Unauthorized) => {
                return Err(ApiError::Status { status: 401, message: None });
            }
            other => other?,
        };
        let value = parse_json(&response.body)?;
        if let Some(rejected) = rejection(&value) {
            return Err(ApiError::Status { status: response.status, message: rejected.message });
        }
        let data: LoginData = decode(record_payload(value))?;
        match data.token.as_deref() {
            Some(token) if !token.trim().is_empty() => Ok(data),
            _ => Err(ApiError::InvalidResponse("login response has no token".to_owned())),
        }
    }

    /// Profile of the logged-in user.
    ///
    /// # Errors
    ///
    /// Fails like [`ApiClient::fetch`].
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        let response = self.send(Method::Get, ME_PATH, &[], None, Auth::Bearer).await?;
        let payload = record_payload(parse_json(&response.body)?);
        let user = match payload {
            Value::Object(mut map) if map.contains_key("user") => map.remove("user").unwrap_or(Value::Null),
            other => other,
        };
        decode(user)
    }

    /// Initial dashboard stats and charts.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx statuses and non-JSON bodies.
    pub async fn dashboard(&self) -> Result<DashboardSnapshot, ApiError> {
        let response = self.send(Method::Get, DASHBOARD_DATA_PATH, &[], None, Auth::Bearer).await?;
        let payload = record_payload(parse_json(&response.body)?);
        Ok(DashboardSnapshot::from_payload(&payload))
    }

    /// Spreadsheet bytes of one report.
    ///
    /// # Errors
    ///
    /// Fails like [`ApiClient::download`].
    pub async fn report(&self, kind: ReportKind) -> Result<Vec<u8>, ApiError> {
        self.download(&report_path(kind)).await
    }

    /// # Errors
    ///
    /// Fails like [`ApiClient::fetch`].
    pub async fn entradas_estadisticas(&self) -> Result<EntradaEstadisticas, ApiError> {
        self.fetch(ENTRADAS_STATS_PATH).await
    }

    /// Cleaning staff free for the given filters (`fecha`, `turno`).
    ///
    /// # Errors
    ///
    /// Fails like [`ApiClient::list`].
    pub async fn empleados_disponibles(
        &self,
        query: &[(String, String)],
    ) -> Result<Vec<EmpleadoDisponible>, ApiError> {
        Ok(self.list(EMPLEADOS_DISPONIBLES_PATH, query).await?.into_vec())
    }

    /// # Errors
    ///
    /// Fails like [`ApiClient::fetch`].
    pub async fn ejecuciones_estadisticas(&self) -> Result<EjecucionEstadisticas, ApiError> {
        self.fetch(EJECUCIONES_STATS_PATH).await
    }

    /// Record that a feeding schedule was carried out.
    ///
    /// # Errors
    ///
    /// Fails like [`ApiClient::create`].
    pub async fn ejecutar_dieta(&self, id: &RecordId, ejecucion: &EjecucionDieta) -> Result<(), ApiError> {
        let body = serde_json::to_value(ejecucion)?;
        self.create(&ejecutar_dieta_path(id), body).await.map(|_| ())
    }

    /// # Errors
    ///
    /// Fails like [`ApiClient::update`].
    pub async fn cambiar_rol(&self, id: &RecordId, rol: &str) -> Result<(), ApiError> {
        let body = serde_json::to_value(RoleChange { rol })?;
        self.update(&usuario_role_path(id), body).await.map(|_| ())
    }
}
