//! Feeding schedules: polled list, "Ejecutar" per row and today's totals.

#[cfg(test)]
#[path = "dietas_test.rs"]
mod dietas_test;

use leptos::prelude::*;

use super::crud::CrudPage;
use super::resource::{ResourcePage, spawn_with, use_crud_page};
use super::use_page_services;
use crate::components::data_table::RowAction;
use crate::models::dieta::{EjecucionDieta, EjecucionEstadisticas, HorarioAlimentacion};
use crate::state::StateHandle;
use crate::state::crud::CrudState;
use crate::state::notify::Severity;

pub const EJECUTADA_MESSAGE: &str = "Alimentación registrada";

/// Record that `horario` was served in full, then refetch the schedule.
pub async fn ejecutar<H>(page: &CrudPage<HorarioAlimentacion, H>, horario: &HorarioAlimentacion) -> bool
where
    H: StateHandle<CrudState<HorarioAlimentacion>>,
{
    let ejecucion = EjecucionDieta { cantidad_suministrada: horario.cantidad, observaciones: None };
    let result = page.services().api.ejecutar_dieta(&horario.id, &ejecucion).await;
    if !page.mount_flag().is_mounted() {
        return false;
    }
    match result {
        Ok(()) => {
            page.services().notify(Severity::Success, EJECUTADA_MESSAGE);
            page.refresh().await;
            true
        }
        Err(e) => {
            page.services().report(&e);
            false
        }
    }
}

fn count_text(n: Option<i64>) -> String {
    n.map_or_else(|| "-".to_owned(), |n| n.to_string())
}

#[component]
fn EjecucionesPanel(stats: EjecucionEstadisticas) -> impl IntoView {
    view! {
        <div class="stats">
            <div class="stats__card">
                <span class="stats__label">"Ejecutadas hoy"</span>
                <strong>{count_text(stats.ejecutadas_hoy)}</strong>
            </div>
            <div class="stats__card">
                <span class="stats__label">"Pendientes hoy"</span>
                <strong>{count_text(stats.pendientes_hoy)}</strong>
            </div>
            <div class="stats__card">
                <span class="stats__label">"Total de ejecuciones"</span>
                <strong>{count_text(stats.total_ejecuciones)}</strong>
            </div>
        </div>
    }
}

#[component]
pub fn DietasPage() -> impl IntoView {
    let page = use_crud_page::<HorarioAlimentacion>();
    let services = StoredValue::new_local(use_page_services());
    let state = page.with_value(|p| *p.state());

    let settled = Memo::new(move |_| state.with(|s| s.loaded && !s.loading));
    let stats = LocalResource::new(move || {
        settled.track();
        let services = services.get_value();
        async move { services.settle(services.api.ejecuciones_estadisticas().await) }
    });

    let actions = vec![RowAction::new("Ejecutar", move |horario: HorarioAlimentacion| {
        spawn_with(page, |p| async move {
            ejecutar(&p, &horario).await;
        });
    })];

    view! {
        <ResourcePage page=page poll=true actions=actions>
            <Suspense fallback=|| ()>
                {move || stats.get().flatten().map(|stats| view! { <EjecucionesPanel stats=stats/> })}
            </Suspense>
        </ResourcePage>
    }
}
