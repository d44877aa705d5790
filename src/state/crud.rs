//! State of one resource page: rows, dialog, form and filters.

#[cfg(test)]
#[path = "crud_test.rs"]
mod crud_test;

use super::form::FormBuffer;
use crate::models::{RecordId, Resource};

/// Which modal, if any, is open.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Dialog {
    #[default]
    Closed,
    Create,
    Edit(RecordId),
    /// Delete confirmation for one record.
    ConfirmDelete(RecordId),
}

impl Dialog {
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

}

#[derive(Clone, Debug, PartialEq)]
pub struct CrudState<R> {
    /// Rows exactly as last fetched. Replaced only by a successful fetch.
    pub items: Vec<R>,
    pub loading: bool,
    /// At least one fetch succeeded.
    pub loaded: bool,
    pub saving: bool,
    pub dialog: Dialog,
    pub form: FormBuffer,
    /// Validation message shown inside the open form.
    pub form_error: Option<String>,
    pub filters: FormBuffer,
}

impl<R> Default for CrudState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            loaded: false,
            saving: false,
            dialog: Dialog::Closed,
            form: FormBuffer::default(),
            form_error: None,
            filters: FormBuffer::default(),
        }
    }
}

impl<R: Resource> CrudState<R> {
    #[must_use]
    pub fn find(&self, id: &RecordId) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Record awaiting delete confirmation.
    #[must_use]
    pub fn pending_delete(&self) -> Option<&RecordId> {
        match &self.dialog {
            Dialog::ConfirmDelete(id) => Some(id),
            _ => None,
        }
    }

    pub fn open_create(&mut self) {
        self.form = FormBuffer::blank(R::fields());
        self.form_error = None;
        self.dialog = Dialog::Create;
    }

    /// Open the edit form prefilled from the listed row. Unknown ids are ignored.
    pub fn open_edit(&mut self, id: &RecordId) {
        let Some(form) = self.find(id).map(|record| FormBuffer::from_record(record, R::fields())) else {
            log::warn!("edit requested for unknown {} {id}", R::NOUN);
            return;
        };
        self.form = form;
        self.form_error = None;
        self.dialog = Dialog::Edit(id.clone());
    }

    pub fn close_dialog(&mut self) {
        self.dialog = Dialog::Closed;
        self.form = FormBuffer::blank(R::fields());
        self.form_error = None;
        self.saving = false;
    }
}
