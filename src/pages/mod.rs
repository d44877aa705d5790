//! Route-level screens and the controllers behind them.
//!
//! ARCHITECTURE
//! ============
//! Controllers (`crud::CrudPage`, `login`, `dashboard::DashboardController`)
//! hold the async orchestration and write state through
//! [`StateHandle`](crate::state::StateHandle). Components own the signals,
//! wire controllers to DOM events and delegate rendering to `components`.

pub mod alimentos;
pub mod animales;
pub mod clinico;
pub mod crud;
pub mod dashboard;
pub mod dietas;
pub mod empleados;
pub mod entradas;
pub mod limpieza;
pub mod login;
pub mod resource;
pub mod rrhh;
pub mod usuarios;

use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::use_services;
use crate::error::{ApiError, SESSION_EXPIRED_MESSAGE};
use crate::net::api::ApiClient;
use crate::state::notify::{Notices, Notify, Severity};
use crate::util::route::{FnNavigator, LOGIN_PATH, Navigator};

/// Collaborators every page controller needs. Clones share them.
#[derive(Clone)]
pub struct PageServices {
    pub api: ApiClient,
    pub notices: Rc<dyn Notify>,
    pub navigator: Rc<dyn Navigator>,
}

impl PageServices {
    pub fn new(api: ApiClient, notices: Rc<dyn Notify>, navigator: Rc<dyn Navigator>) -> Self {
        Self { api, notices, navigator }
    }

    pub fn notify(&self, severity: Severity, message: impl Into<String>) {
        self.notices.notify(severity, message.into());
    }

    /// Drop the session, tell the user and go to the login page.
    pub fn expire_session(&self) {
        self.api.session().clear();
        self.notify(Severity::Error, SESSION_EXPIRED_MESSAGE);
        self.navigator.navigate(LOGIN_PATH);
    }

    /// Local catch for a failed call: a 401 ends the session, anything else
    /// becomes an error notice.
    pub fn report(&self, err: &ApiError) {
        if err.is_session_expired() {
            self.expire_session();
        } else {
            self.notify(Severity::Error, err.user_message());
        }
    }

    /// Unwrap a call result, reporting the failure.
    pub fn settle<T>(&self, result: Result<T, ApiError>) -> Option<T> {
        result.map_err(|e| self.report(&e)).ok()
    }

    /// Without a valid session, redirect and return `false`.
    pub fn require_session(&self) -> bool {
        if self.api.session().is_authenticated() {
            true
        } else {
            self.navigator.navigate(LOGIN_PATH);
            false
        }
    }
}

/// Services wired to the router and the shared toast signal.
pub fn use_page_services() -> PageServices {
    let notices = expect_context::<RwSignal<Notices>>();
    let navigate = use_navigate();
    let navigator = FnNavigator::new(move |path| navigate(path, NavigateOptions::default()));
    PageServices::new(use_services().api, Rc::new(notices), Rc::new(navigator))
}
