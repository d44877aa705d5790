use leptos::prelude::*;

use super::resource::{ResourcePage, use_crud_page};
use crate::models::alimento::Alimento;

#[component]
pub fn AlimentosPage() -> impl IntoView {
    let page = use_crud_page::<Alimento>();
    let state = page.with_value(|p| *p.state());
    let low_stock = move || state.with(|s| s.items.iter().filter(|a| a.is_low_stock()).count());

    view! {
        <ResourcePage page=page>
            <Show when=move || { low_stock() > 0 }>
                <p class="crud-page__alert">
                    {move || format!("{} alimento(s) con stock bajo", low_stock())}
                </p>
            </Show>
        </ResourcePage>
    }
}
