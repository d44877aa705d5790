//! Ticket sales with the sales summary above the table.

use leptos::prelude::*;

use super::resource::{ResourcePage, use_crud_page};
use super::use_page_services;
use crate::models::entrada::{Entrada, EntradaEstadisticas};
use crate::models::fmt_money;

fn count_text(n: Option<i64>) -> String {
    n.map_or_else(|| "-".to_owned(), |n| n.to_string())
}

fn money_text(n: Option<f64>) -> String {
    n.map_or_else(|| "-".to_owned(), |n| fmt_money(Some(n)))
}

#[component]
fn EstadisticasPanel(stats: EntradaEstadisticas) -> impl IntoView {
    let breakdown = stats
        .por_tipo
        .iter()
        .map(|row| {
            let cantidad = row.cantidad.map(|c| c.to_string()).unwrap_or_default();
            view! {
                <li>
                    <span class="stats__label">{row.tipo.replace('_', " ")}</span>
                    <span class="stats__value">{cantidad}</span>
                    <span class="stats__value">{fmt_money(row.total)}</span>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="stats">
            <div class="stats__card">
                <span class="stats__label">"Entradas vendidas hoy"</span>
                <strong>{count_text(stats.entradas_hoy)}</strong>
            </div>
            <div class="stats__card">
                <span class="stats__label">"Ingresos de hoy"</span>
                <strong>{money_text(stats.ingresos_hoy)}</strong>
            </div>
            <div class="stats__card">
                <span class="stats__label">"Entradas totales"</span>
                <strong>{count_text(stats.total_entradas)}</strong>
            </div>
            <div class="stats__card">
                <span class="stats__label">"Ingresos totales"</span>
                <strong>{money_text(stats.ingresos_totales)}</strong>
            </div>
            <ul class="stats__breakdown">{breakdown}</ul>
        </div>
    }
}

#[component]
pub fn EntradasPage() -> impl IntoView {
    let page = use_crud_page::<Entrada>();
    let services = StoredValue::new_local(use_page_services());
    let state = page.with_value(|p| *p.state());

    // Refetch the summary whenever the list reloads.
    let settled = Memo::new(move |_| state.with(|s| s.loaded && !s.loading));
    let stats = LocalResource::new(move || {
        settled.track();
        let services = services.get_value();
        async move { services.settle(services.api.entradas_estadisticas().await) }
    });

    view! {
        <ResourcePage page=page>
            <Suspense fallback=|| view! { <p class="stats__loading">"Cargando estadísticas..."</p> }>
                {move || stats.get().flatten().map(|stats| view! { <EstadisticasPanel stats=stats/> })}
            </Suspense>
        </ResourcePage>
    }
}
