//! Browser session: persisted bearer token and the claims decoded from it.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route guards, the navigation shell, the user menu and every page controller
//! read identity through one [`Session`] object provided via context. The
//! store and clock are injected so tests can run against memory and a fixed
//! time.
//!
//! TRUST BOUNDARY
//! ==============
//! Claims are decoded without verifying the token signature. They are typed
//! as [`UntrustedClaims`], [`RoleHint`] and [`DisplayIdentity`] and may only
//! decide what the UI shows. The backend remains the sole authority on what a
//! caller is allowed to do.

pub mod accessor;
pub mod claims;
pub mod clock;
pub mod store;

pub use accessor::Session;
pub use claims::{ClaimsError, DisplayIdentity, RoleHint, RoleKind, UntrustedClaims};
pub use clock::{Clock, SystemClock};
pub use store::{MemoryStore, TokenStore};
