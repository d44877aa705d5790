//! Medical treatments, refreshed in the background while open.

use leptos::prelude::*;

use super::resource::{ResourcePage, use_crud_page};
use crate::models::clinico::Tratamiento;

#[component]
pub fn ClinicoPage() -> impl IntoView {
    let page = use_crud_page::<Tratamiento>();
    view! { <ResourcePage page=page poll=true/> }
}
