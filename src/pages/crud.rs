//! The list/create/edit/delete cycle shared by every resource page.
//!
//! DESIGN
//! ======
//! One controller per mounted page. Every fetch, whether from mount, a filter
//! change, a mutation or the poll timer, goes through [`CrudPage::refresh`]
//! or [`CrudPage::poll_tick`], both of which pass the single-flight gate.
//! The fetched list is the only truth: mutations never edit rows locally.
//!
//! Every await is followed by a mount check, so a response that lands after
//! the page unmounted is dropped without touching state.

#[cfg(test)]
#[path = "crud_test.rs"]
mod crud_test;

use std::marker::PhantomData;

use super::PageServices;
use crate::models::{RecordId, Resource};
use crate::state::StateHandle;
use crate::state::crud::{CrudState, Dialog};
use crate::state::form::BodyMode;
use crate::state::notify::Severity;
use crate::state::poll::{Begin, MountFlag, SingleFlight, TickDecision};

pub const CREATED_MESSAGE: &str = "Registro creado";
pub const UPDATED_MESSAGE: &str = "Cambios guardados";
pub const DELETED_MESSAGE: &str = "Registro eliminado";

/// Controller of one resource page. Clones drive the same page.
pub struct CrudPage<R, H> {
    services: PageServices,
    state: H,
    flight: SingleFlight,
    mount: MountFlag,
    resource: PhantomData<fn() -> R>,
}

impl<R, H: Clone> Clone for CrudPage<R, H> {
    fn clone(&self) -> Self {
        Self {
            services: self.services.clone(),
            state: self.state.clone(),
            flight: self.flight.clone(),
            mount: self.mount.clone(),
            resource: PhantomData,
        }
    }
}

impl<R, H> CrudPage<R, H>
where
    R: Resource,
    H: StateHandle<CrudState<R>>,
{
    pub fn new(services: PageServices, state: H) -> Self {
        Self {
            services,
            state,
            flight: SingleFlight::new(),
            mount: MountFlag::new(),
            resource: PhantomData,
        }
    }

    #[must_use]
    pub fn services(&self) -> &PageServices {
        &self.services
    }

    #[must_use]
    pub fn state(&self) -> &H {
        &self.state
    }

    #[must_use]
    pub fn mount_flag(&self) -> &MountFlag {
        &self.mount
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.flight.is_busy()
    }

    /// First fetch. Without a valid session, redirect and fetch nothing.
    pub async fn mount(&self) {
        if !self.services.require_session() {
            return;
        }
        self.refresh().await;
    }

    /// Fetch the list now, or once more after the fetch in flight.
    pub async fn refresh(&self) {
        if self.flight.request() == Begin::Coalesced {
            log::debug!("{} refresh coalesced into flight", R::ENDPOINT);
            return;
        }
        self.run_flights().await;
    }

    /// Timer entry point. Skips while busy or while a dialog is open.
    pub async fn poll_tick(&self) -> TickDecision {
        let dialog_open = self.state.read(|s| s.dialog.is_open()).unwrap_or(true);
        let decision = self.flight.tick(dialog_open);
        if decision == TickDecision::Run {
            self.run_flights().await;
        } else {
            log::debug!("{} poll deferred: {decision:?}", R::ENDPOINT);
        }
        decision
    }

    async fn run_flights(&self) {
        loop {
            self.fetch_once().await;
            if !self.flight.finish() {
                break;
            }
            if !self.mount.is_mounted() {
                self.flight.finish();
                break;
            }
        }
    }

    async fn fetch_once(&self) {
        let Some(query) = self.state.read(|s| s.filters.to_query(R::filters())) else {
            return;
        };
        let (path, query) = R::list_request(query);
        self.state.write(|s| s.loading = true);

        let result = self.services.api.list::<R>(&path, &query).await;
        if !self.mount.is_mounted() {
            return;
        }
        match result {
            Ok(list) => self.state.write(|s| {
                s.items = list.into_vec();
                s.loading = false;
                s.loaded = true;
            }),
            Err(e) => {
                self.state.write(|s| s.loading = false);
                self.services.report(&e);
            }
        }
    }

    pub fn open_create(&self) {
        self.state.write(CrudState::open_create);
    }

    pub fn open_edit(&self, id: &RecordId) {
        self.state.write(|s| s.open_edit(id));
    }

    pub fn close_dialog(&self) {
        self.state.write(CrudState::close_dialog);
    }

    pub fn set_field(&self, key: &str, value: String) {
        self.state.write(|s| {
            s.form.set(key, value);
            s.form_error = None;
        });
    }

    pub fn set_filter(&self, key: &str, value: String) {
        self.state.write(|s| s.filters.set(key, value));
    }

    /// Blank every filter and fetch the unfiltered list.
    pub async fn clear_filters(&self) {
        self.state.write(|s| s.filters.clear());
        self.refresh().await;
    }

    /// Send the open form. Returns `true` when the server accepted it.
    pub async fn submit(&self) -> bool {
        let Some((dialog, saving)) = self.state.read(|s| (s.dialog.clone(), s.saving)) else {
            return false;
        };
        if saving {
            return false;
        }
        let (path, mode) = match dialog {
            Dialog::Create => (R::ENDPOINT.to_owned(), BodyMode::Create),
            Dialog::Edit(id) => (R::item_path(&id), BodyMode::Update),
            Dialog::Closed | Dialog::ConfirmDelete(_) => return false,
        };
        let body = match self.state.read(|s| s.form.to_body(R::fields(), mode)) {
            Some(Ok(body)) => body,
            Some(Err(e)) => {
                self.state.write(|s| s.form_error = Some(e.to_string()));
                return false;
            }
            None => return false,
        };

        self.state.write(|s| s.saving = true);
        let result = match mode {
            BodyMode::Create => self.services.api.create(&path, body).await,
            BodyMode::Update => self.services.api.update(&path, body).await,
        };
        if !self.mount.is_mounted() {
            return false;
        }
        match result {
            Ok(_) => {
                self.state.write(CrudState::close_dialog);
                let message = if mode == BodyMode::Create { CREATED_MESSAGE } else { UPDATED_MESSAGE };
                self.services.notify(Severity::Success, message);
                self.refresh().await;
                true
            }
            Err(e) => {
                self.state.write(|s| s.saving = false);
                self.services.report(&e);
                false
            }
        }
    }

    /// Ask for confirmation before deleting `id`.
    pub fn request_delete(&self, id: &RecordId) {
        self.state.write(|s| s.dialog = Dialog::ConfirmDelete(id.clone()));
    }

    /// Dismiss the confirmation. Nothing is sent.
    pub fn cancel_delete(&self) {
        self.state.write(|s| {
            if matches!(s.dialog, Dialog::ConfirmDelete(_)) {
                s.dialog = Dialog::Closed;
            }
        });
    }

    /// Delete the record awaiting confirmation, then refetch.
    pub async fn confirm_delete(&self) -> bool {
        let Some(id) = self.state.read(|s| s.pending_delete().cloned()).flatten() else {
            return false;
        };
        self.state.write(|s| s.dialog = Dialog::Closed);

        let result = self.services.api.delete(&R::item_path(&id)).await;
        if !self.mount.is_mounted() {
            return false;
        }
        match result {
            Ok(()) => {
                self.services.notify(Severity::Success, DELETED_MESSAGE);
                self.refresh().await;
                true
            }
            Err(e) => {
                self.services.report(&e);
                false
            }
        }
    }

    /// Background refresh every `interval` until unmount.
    #[cfg(feature = "csr")]
    pub fn spawn_poller(&self, interval: std::time::Duration) {
        let page = self.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(interval).await;
                if !page.mount.is_mounted() {
                    break;
                }
                page.poll_tick().await;
            }
        });
    }
}
