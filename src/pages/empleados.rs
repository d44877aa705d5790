use leptos::prelude::*;

use super::resource::{ResourcePage, use_crud_page};
use crate::models::empleado::Empleado;

#[component]
pub fn EmpleadosPage() -> impl IntoView {
    let page = use_crud_page::<Empleado>();
    view! { <ResourcePage page=page/> }
}
