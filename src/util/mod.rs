//! Routing guard and browser helpers.

#[cfg(feature = "csr")]
pub mod download;
pub mod route;
