//! Reusable view pieces: the application shell, tables, dialogs and toasts.

pub mod confirm_dialog;
pub mod data_table;
pub mod field_input;
pub mod form_dialog;
pub mod shell;
pub mod sidebar;
pub mod toasts;
pub mod user_menu;
