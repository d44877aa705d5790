//! Human-resources ledgers. Each one is a plain resource page.

use leptos::prelude::*;

use super::resource::{ResourcePage, use_crud_page};
use crate::models::rrhh::{Bono, Descuento, Inasistencia, Vacacion};

#[component]
pub fn VacacionesPage() -> impl IntoView {
    let page = use_crud_page::<Vacacion>();
    view! { <ResourcePage page=page/> }
}

#[component]
pub fn InasistenciasPage() -> impl IntoView {
    let page = use_crud_page::<Inasistencia>();
    view! { <ResourcePage page=page/> }
}

#[component]
pub fn DescuentosPage() -> impl IntoView {
    let page = use_crud_page::<Descuento>();
    view! { <ResourcePage page=page/> }
}

#[component]
pub fn BonosPage() -> impl IntoView {
    let page = use_crud_page::<Bono>();
    view! { <ResourcePage page=page/> }
}
