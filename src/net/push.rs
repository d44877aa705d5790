//! socket.io over engine.io v4 text framing, and the dashboard events it carries.
//!
//! Only the text subset the dashboard needs is handled:
//!
//! ```text
//! 0{...}            engine.io open
//! 2 / 3             ping / pong
//! 40                socket.io connect (default namespace)
//! 42["name",data]   socket.io event
//! ```

#[cfg(test)]
#[path = "push_test.rs"]
mod push_test;

use serde_json::Value;

use crate::models::dashboard::{ChartsUpdate, DashboardStats};

pub const DASHBOARD_UPDATE_EVENT: &str = "dashboard-update";
pub const CHARTS_UPDATE_EVENT: &str = "charts-update";

/// Reply to an engine.io ping.
pub const PONG: &str = "3";
/// Join the default socket.io namespace.
pub const CONNECT: &str = "40";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PacketError {
    #[error("empty packet")]
    Empty,
    #[error("unknown packet type {0:?}")]
    UnknownType(String),
    #[error("malformed event packet: {0}")]
    MalformedEvent(String),
}

/// A decoded text packet.
#[derive(Clone, Debug, PartialEq)]
pub enum Packet {
    Open,
    Close,
    Ping,
    Pong,
    Noop,
    Connect,
    Disconnect,
    ConnectError(String),
    Event { name: String, data: Value },
    /// Acks and other socket.io packets the console never uses.
    Ignored,
}

/// Decode one engine.io text packet.
///
/// # Errors
///
/// Returns [`PacketError`] for empty input, unknown packet types, or event
/// packets whose body is not a `["name", ...]` array.
pub fn decode(text: &str) -> Result<Packet, PacketError> {
    let mut chars = text.chars();
    let kind = chars.next().ok_or(PacketError::Empty)?;
    let rest = chars.as_str();
    match kind {
        '0' => Ok(Packet::Open),
        '1' => Ok(Packet::Close),
        '2' => Ok(Packet::Ping),
        '3' => Ok(Packet::Pong),
        '4' => decode_socket(rest),
        '5' | '6' => Ok(Packet::Noop),
        other => Err(PacketError::UnknownType(other.to_string())),
    }
}

fn decode_socket(body: &str) -> Result<Packet, PacketError> {
    let mut chars = body.chars();
    let kind = chars.next().ok_or(PacketError::Empty)?;
    let rest = strip_ack_id(strip_namespace(chars.as_str()));
    match kind {
        '0' => Ok(Packet::Connect),
        '1' => Ok(Packet::Disconnect),
        '2' => decode_event(rest),
        '4' => Ok(Packet::ConnectError(error_message(rest))),
        '3' | '5' | '6' => Ok(Packet::Ignored),
        other => Err(PacketError::UnknownType(format!("4{other}"))),
    }
}

/// Drop a leading `/namespace,` if present.
fn strip_namespace(body: &str) -> &str {
    if body.starts_with('/') {
        body.split_once(',').map_or("", |(_, rest)| rest)
    } else {
        body
    }
}

fn strip_ack_id(body: &str) -> &str {
    body.trim_start_matches(|c: char| c.is_ascii_digit())
}

fn decode_event(body: &str) -> Result<Packet, PacketError> {
    let value: Value = serde_json::from_str(body).map_err(|e| PacketError::MalformedEvent(e.to_string()))?;
    let Value::Array(mut items) = value else {
        return Err(PacketError::MalformedEvent("event body is not an array".to_owned()));
    };
    if items.is_empty() {
        return Err(PacketError::MalformedEvent("event has no name".to_owned()));
    }
    let name = match items.remove(0) {
        Value::String(name) => name,
        other => return Err(PacketError::MalformedEvent(format!("event name is {other}"))),
    };
    let data = if items.is_empty() { Value::Null } else { items.remove(0) };
    Ok(Packet::Event { name, data })
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| body.to_owned())
}

/// Dashboard-relevant push events.
#[derive(Clone, Debug, PartialEq)]
pub enum PushEvent {
    DashboardUpdate(DashboardStats),
    ChartsUpdate(ChartsUpdate),
}

impl PushEvent {
    /// Interpret a named event. Unknown names and undecodable stats yield `None`.
    #[must_use]
    pub fn from_event(name: &str, data: &Value) -> Option<Self> {
        match name {
            DASHBOARD_UPDATE_EVENT => DashboardStats::from_payload(data).map(Self::DashboardUpdate),
            CHARTS_UPDATE_EVENT => Some(Self::ChartsUpdate(ChartsUpdate::from_payload(data))),
            _ => None,
        }
    }
}
