//! Unverified decoding of the bearer token payload.
//!
//! Only the middle segment is read. The signature segment is ignored, which
//! is why every type here carries an "untrusted" or "hint" name.

#[cfg(test)]
#[path = "claims_test.rs"]
mod claims_test;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_DISPLAY_NAME: &str = "Usuario";

/// base64url with optional padding, as JWT payloads are produced in practice.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClaimsError {
    #[error("token has no payload segment")]
    MissingPayload,
    #[error("payload is not valid base64")]
    Base64,
    #[error("payload is not a JSON claims object: {0}")]
    Json(String),
}

/// Claims read from a token payload. Nothing here has been verified.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UntrustedClaims {
    /// Expiry in epoch seconds.
    #[serde(default)]
    pub exp: Option<f64>,
    #[serde(default)]
    pub rol: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, rename = "userId")]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub sub: Option<Value>,
}

impl UntrustedClaims {
    /// Decode the payload segment of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`ClaimsError`] when the token has no payload segment, the
    /// segment is not base64, or the bytes are not a JSON claims object.
    pub fn decode(token: &str) -> Result<Self, ClaimsError> {
        let segment = token
            .split('.')
            .nth(1)
            .filter(|s| !s.is_empty())
            .ok_or(ClaimsError::MissingPayload)?;
        // Tolerate payloads encoded with the standard alphabet.
        let normalized: String = segment
            .chars()
            .map(|c| match c {
                '+' => '-',
                '/' => '_',
                other => other,
            })
            .collect();
        let bytes = PAYLOAD_ENGINE
            .decode(normalized.as_bytes())
            .map_err(|_| ClaimsError::Base64)?;
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(object @ Value::Object(_)) => {
                serde_json::from_value(object).map_err(|e| ClaimsError::Json(e.to_string()))
            }
            Ok(other) => Err(ClaimsError::Json(format!("expected an object, got {other}"))),
            Err(e) => Err(ClaimsError::Json(e.to_string())),
        }
    }

    /// A payload without `exp` counts as expired.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        match self.exp {
            Some(exp) if exp.is_finite() => exp * 1000.0 < now_ms as f64,
            _ => true,
        }
    }

    /// Subject identifier from `id`, `userId` or `sub`, in that order.
    #[must_use]
    pub fn subject(&self) -> Option<String> {
        [&self.id, &self.user_id, &self.sub]
            .into_iter()
            .flatten()
            .find_map(value_as_id)
    }

    #[must_use]
    pub fn role_hint(&self) -> Option<RoleHint> {
        self.rol
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(RoleHint::new)
    }

    #[must_use]
    pub fn display_identity(&self) -> DisplayIdentity {
        DisplayIdentity {
            id: self.subject(),
            email: self.email.clone(),
            rol: self.role_hint(),
            nombre: self
                .nombre
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_owned()),
        }
    }
}

fn value_as_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Role claim as shown to the UI. Not an authorization decision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleHint(String);

impl RoleHint {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn kind(&self) -> RoleKind {
        RoleKind::parse(&self.0)
    }
}

/// Known role families used to pick which menu entries to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleKind {
    Admin,
    Veterinario,
    Cuidador,
    Limpieza,
    Taquilla,
    Rrhh,
    Other,
}

impl RoleKind {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" | "administrador" | "superadmin" => Self::Admin,
            "veterinario" | "veterinaria" | "vet" => Self::Veterinario,
            "cuidador" | "cuidadora" | "zoologo" => Self::Cuidador,
            "limpieza" | "mantenimiento" | "conserje" => Self::Limpieza,
            "taquilla" | "taquillero" | "ventas" => Self::Taquilla,
            "rrhh" | "recursos_humanos" | "recursos humanos" => Self::Rrhh,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrador",
            Self::Veterinario => "Veterinario",
            Self::Cuidador => "Cuidador",
            Self::Limpieza => "Limpieza",
            Self::Taquilla => "Taquilla",
            Self::Rrhh => "Recursos Humanos",
            Self::Other => "Usuario",
        }
    }
}

/// Identity assembled from unverified claims, for display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayIdentity {
    pub id: Option<String>,
    pub email: Option<String>,
    pub rol: Option<RoleHint>,
    pub nombre: String,
}
