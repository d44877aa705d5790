//! Toast notifications.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use super::StateHandle;

/// Oldest notices are dropped beyond this many.
pub const MAX_NOTICES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast toast--success",
            Self::Error => "toast toast--error",
            Self::Info => "toast toast--info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notices {
    items: Vec<Notice>,
    next_id: u64,
}

impl Notices {
    /// Append a notice and return its id.
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.items.push(Notice { id: self.next_id, severity, message: message.into() });
        if self.items.len() > MAX_NOTICES {
            let excess = self.items.len() - MAX_NOTICES;
            self.items.drain(..excess);
        }
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    #[must_use]
    pub fn items(&self) -> &[Notice] {
        &self.items
    }

    #[cfg(test)]
    pub(crate) fn latest(&self) -> Option<&Notice> {
        self.items.last()
    }

    /// Id of the most recent push, including notices already dismissed.
    #[must_use]
    pub fn last_id(&self) -> u64 {
        self.next_id
    }

    /// Ids of notices still shown that were pushed after `seen`.
    #[must_use]
    pub fn shown_since(&self, seen: u64) -> Vec<u64> {
        self.items.iter().map(|n| n.id).filter(|id| *id > seen).collect()
    }
}

/// Sink pages report outcomes to.
pub trait Notify {
    fn notify(&self, severity: Severity, message: String);
}

impl<H: StateHandle<Notices>> Notify for H {
    fn notify(&self, severity: Severity, message: String) {
        match severity {
            Severity::Error => log::warn!("notice: {message}"),
            Severity::Success | Severity::Info => log::info!("notice: {message}"),
        }
        self.write(|notices| {
            notices.push(severity, message);
        });
    }
}
