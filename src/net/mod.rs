//! Networking: REST calls and the dashboard push channel.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` is the transport seam, `envelope` normalizes response shapes,
//! `api` issues typed REST calls, `push` frames socket.io text packets and
//! `live_feed` owns the single push-channel connection.

pub mod api;
pub mod envelope;
pub mod http;
pub mod live_feed;
pub mod push;
