use leptos::prelude::*;

use super::resource::{ResourcePage, use_crud_page};
use crate::models::animal::Animal;

#[component]
pub fn AnimalesPage() -> impl IntoView {
    let page = use_crud_page::<Animal>();
    view! { <ResourcePage page=page/> }
}
