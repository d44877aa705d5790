//! Navigation seam and the login guard for protected routes.
//!
//! The guard reads only the local session. It decides what the browser
//! renders, never what the backend allows.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

use std::rc::Rc;

use crate::session::Session;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Client-side navigation.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Navigator backed by a closure, typically wrapping `use_navigate()`.
#[derive(Clone)]
pub struct FnNavigator(Rc<dyn Fn(&str)>);

impl FnNavigator {
    pub fn new(navigate: impl Fn(&str) + 'static) -> Self {
        Self(Rc::new(navigate))
    }
}

impl Navigator for FnNavigator {
    fn navigate(&self, path: &str) {
        (self.0)(path);
    }
}

/// What a route should do for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    Render,
    Redirect(&'static str),
}

/// Protected pages render only with a valid session.
#[must_use]
pub fn protected_access(session: &Session) -> RouteAccess {
    if session.is_authenticated() {
        RouteAccess::Render
    } else {
        RouteAccess::Redirect(LOGIN_PATH)
    }
}

/// The login page sends an already-authenticated user home.
#[must_use]
pub fn login_access(session: &Session) -> RouteAccess {
    if session.is_authenticated() {
        RouteAccess::Redirect(HOME_PATH)
    } else {
        RouteAccess::Render
    }
}
