//! Cleaning tasks, with the staff free on the filtered date.

use leptos::prelude::*;

use super::resource::{ResourcePage, use_crud_page};
use super::use_page_services;
use crate::models::limpieza::TareaLimpieza;

#[component]
pub fn LimpiezaPage() -> impl IntoView {
    let page = use_crud_page::<TareaLimpieza>();
    let services = StoredValue::new_local(use_page_services());
    let state = page.with_value(|p| *p.state());

    let fecha = Memo::new(move |_| state.with(|s| s.filters.get("fecha").to_owned()));
    let disponibles = LocalResource::new(move || {
        let query = vec![("fecha".to_owned(), fecha.get())];
        let services = services.get_value();
        async move {
            services
                .settle(services.api.empleados_disponibles(&query).await)
                .unwrap_or_default()
        }
    });

    view! {
        <ResourcePage page=page>
            <div class="panel">
                <h3 class="panel__title">"Personal disponible"</h3>
                <Suspense fallback=|| view! { <p>"Cargando..."</p> }>
                    {move || {
                        disponibles
                            .get()
                            .map(|empleados| {
                                if empleados.is_empty() {
                                    view! { <p class="panel__empty">"Sin personal disponible"</p> }.into_any()
                                } else {
                                    view! {
                                        <ul class="panel__list">
                                            {empleados
                                                .into_iter()
                                                .map(|e| view! { <li>{e.label()}</li> })
                                                .collect_view()}
                                        </ul>
                                    }
                                        .into_any()
                                }
                            })
                    }}
                </Suspense>
            </div>
        </ResourcePage>
    }
}
