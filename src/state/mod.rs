//! Plain state models and the handle pages write them through.
//!
//! DESIGN
//! ======
//! State structs here hold no signals. Components wrap them in `RwSignal`
//! and page controllers reach them through [`StateHandle`], so the same
//! controller code runs against a signal in the browser and an
//! `Rc<RefCell<_>>` in native tests.

pub mod crud;
pub mod dashboard;
pub mod form;
pub mod nav;
pub mod notify;
pub mod poll;

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::{RwSignal, Update, WithUntracked};

/// Shared, mutable access to one state value.
pub trait StateHandle<S>: Clone + 'static {
    /// Read without subscribing. `None` once the owner is disposed.
    fn read<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R>;

    /// Mutate and notify. A no-op once the owner is disposed.
    fn write(&self, f: impl FnOnce(&mut S));
}

impl<S: 'static> StateHandle<S> for Rc<RefCell<S>> {
    fn read<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }

    fn write(&self, f: impl FnOnce(&mut S)) {
        f(&mut self.borrow_mut());
    }
}

impl<S: Send + Sync + 'static> StateHandle<S> for RwSignal<S> {
    fn read<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }

    fn write(&self, f: impl FnOnce(&mut S)) {
        let _ = self.try_update(f);
    }
}
