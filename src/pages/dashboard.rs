//! Live dashboard: one pull on mount, then pushes from the live feed.
//!
//! The pull and the push subscription start together. Whichever lands last
//! wins; a push carries the whole stats block, so nothing is merged field by
//! field. Unmounting cancels the subscription and clears the mount flag,
//! which also drops a pull still in flight.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{PageServices, use_page_services};
use crate::models::dashboard::{ChartSeries, ReportKind};
use crate::models::fmt_number;
use crate::net::live_feed::{LiveFeed, Subscription};
use crate::state::StateHandle;
use crate::state::dashboard::DashboardState;
use crate::state::notify::Severity;
use crate::state::poll::MountFlag;

pub const REPORT_READY_MESSAGE: &str = "Reporte descargado";
pub const REPORT_SAVE_FAILED_MESSAGE: &str = "No se pudo guardar el reporte";

pub struct DashboardController<H> {
    services: PageServices,
    feed: LiveFeed,
    state: H,
    mount: MountFlag,
}

impl<H: Clone> Clone for DashboardController<H> {
    fn clone(&self) -> Self {
        Self {
            services: self.services.clone(),
            feed: self.feed.clone(),
            state: self.state.clone(),
            mount: self.mount.clone(),
        }
    }
}

impl<H: StateHandle<DashboardState>> DashboardController<H> {
    pub fn new(services: PageServices, feed: LiveFeed, state: H) -> Self {
        Self { services, feed, state, mount: MountFlag::new() }
    }

    #[must_use]
    pub fn mount_flag(&self) -> &MountFlag {
        &self.mount
    }

    /// Apply every push to the state until the subscription is cancelled.
    pub fn subscribe(&self) -> Subscription {
        let state = self.state.clone();
        let mount = self.mount.clone();
        self.feed.subscribe(move |event| {
            if mount.is_mounted() {
                log::debug!("dashboard push applied: {event:?}");
                state.write(|s| s.apply_push(event));
            }
        })
    }

    /// Pull the current stats and charts.
    pub async fn load(&self) {
        if !self.services.require_session() {
            return;
        }
        self.state.write(|s| s.loading = true);
        let result = self.services.api.dashboard().await;
        if !self.mount.is_mounted() {
            return;
        }
        self.state.write(|s| s.loading = false);
        if let Some(snapshot) = self.services.settle(result) {
            self.state.write(|s| s.apply_snapshot(snapshot));
        }
    }

    /// Fetch one report and hand its bytes to `save`.
    pub async fn download_report(
        &self,
        kind: ReportKind,
        save: impl FnOnce(&[u8], &str) -> Result<(), String>,
    ) -> bool {
        if self.state.read(|s| s.downloading).unwrap_or(true) {
            return false;
        }
        self.state.write(|s| s.downloading = true);
        let result = self.services.api.report(kind).await;
        if !self.mount.is_mounted() {
            return false;
        }
        self.state.write(|s| s.downloading = false);

        let Some(bytes) = self.services.settle(result) else {
            return false;
        };
        match save(&bytes, &kind.file_name()) {
            Ok(()) => {
                self.services.notify(Severity::Success, REPORT_READY_MESSAGE);
                true
            }
            Err(e) => {
                log::warn!("saving {} failed: {e}", kind.file_name());
                self.services.notify(Severity::Error, REPORT_SAVE_FAILED_MESSAGE);
                false
            }
        }
    }
}

#[cfg(feature = "csr")]
fn save_report(bytes: &[u8], file_name: &str) -> Result<(), String> {
    crate::util::download::save_bytes(bytes, file_name, crate::util::download::XLSX_MIME)
}

#[cfg(not(feature = "csr"))]
fn save_report(_bytes: &[u8], _file_name: &str) -> Result<(), String> {
    Err("downloads need a browser".to_owned())
}

#[component]
fn StatCard(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(optional)] hint: Option<Signal<String>>,
) -> impl IntoView {
    view! {
        <div class="stats__card">
            <span class="stats__label">{label}</span>
            <strong class="stats__value">{value}</strong>
            {hint.map(|hint| view! { <span class="stats__hint">{hint}</span> })}
        </div>
    }
}

/// Horizontal bars scaled to the largest value.
#[component]
fn BarChart(title: &'static str, #[prop(into)] series: Signal<ChartSeries>) -> impl IntoView {
    view! {
        <div class="chart">
            <h3 class="chart__title">{title}</h3>
            {move || {
                let series = series.get();
                if series.is_empty() {
                    return view! { <p class="chart__empty">"Sin datos"</p> }.into_any();
                }
                let max = series.max_value();
                series
                    .labels
                    .iter()
                    .zip(series.data.iter())
                    .map(|(label, value)| {
                        let pct = if max > 0.0 { value / max * 100.0 } else { 0.0 };
                        view! {
                            <div class="chart__row">
                                <span class="chart__label">{label.clone()}</span>
                                <span class="chart__bar" style=format!("width: {pct:.1}%")></span>
                                <span class="chart__value">{fmt_number(*value)}</span>
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let state = RwSignal::new(DashboardState::default());
    let controller = DashboardController::new(use_page_services(), crate::app::use_services().feed, state);

    let subscription = controller.subscribe();
    let mount = controller.mount_flag().clone();
    on_cleanup(move || {
        subscription.cancel();
        mount.unmount();
    });

    let first = controller.clone();
    spawn_local(async move { first.load().await });
    let controller = StoredValue::new_local(controller);

    let stat = move |pick: fn(&DashboardState) -> i64| Signal::derive(move || state.with(|s| pick(s).to_string()));
    let trend = Signal::derive(move || {
        state.with(|s| {
            s.stats
                .visitor_trend_pct()
                .map(|pct| format!("{pct:+.1}% vs. ayer"))
                .unwrap_or_default()
        })
    });

    let reports = ReportKind::ALL
        .iter()
        .map(|kind| {
            let kind = *kind;
            view! {
                <button
                    class="btn"
                    disabled=move || state.with(|s| s.downloading)
                    on:click=move |_| {
                        let controller = controller.get_value();
                        spawn_local(async move {
                            controller.download_report(kind, save_report).await;
                        });
                    }
                >
                    {kind.label()}
                </button>
            }
        })
        .collect_view();

    view! {
        <section class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>"Dashboard"</h1>
                <span class="dashboard-page__live">
                    {move || match state.with(|s| s.live_updates) {
                        0 => "En espera de datos en vivo".to_owned(),
                        n => format!("{n} actualizaciones en vivo"),
                    }}
                </span>
            </header>
            <Show when=move || state.with(|s| s.loading && !s.loaded)>
                <p>"Cargando..."</p>
            </Show>
            <div class="stats">
                <StatCard label="Animales" value=stat(|s| s.stats.total_animales)/>
                <StatCard label="Empleados" value=stat(|s| s.stats.total_empleados)/>
                <StatCard label="Empleados activos" value=stat(|s| s.stats.empleados_activos)/>
                <StatCard label="Visitantes hoy" value=stat(|s| s.stats.visitantes_hoy) hint=trend/>
                <StatCard label="Alertas médicas" value=stat(|s| s.stats.alertas_medicas)/>
                <StatCard label="Limpiezas activas" value=stat(|s| s.stats.tareas_limpieza_activas)/>
            </div>
            <div class="dashboard-page__charts">
                <BarChart title="Visitantes" series=Signal::derive(move || state.with(|s| s.visitantes.clone()))/>
                <BarChart title="Especies" series=Signal::derive(move || state.with(|s| s.especies.clone()))/>
            </div>
            <div class="dashboard-page__reports">
                <h3>"Reportes"</h3>
                {reports}
            </div>
        </section>
    }
}
