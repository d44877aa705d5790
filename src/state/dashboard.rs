//! Dashboard counters and charts, and how pushes merge into them.
//!
//! A push replaces the piece it carries wholesale: the stats block, or each
//! chart on its own. Pulls and pushes are not reconciled; the last write wins.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use crate::models::dashboard::{ChartSeries, ChartsUpdate, DashboardSnapshot, DashboardStats};
use crate::net::push::PushEvent;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardState {
    pub stats: DashboardStats,
    pub visitantes: ChartSeries,
    pub especies: ChartSeries,
    pub loading: bool,
    /// Set once the initial pull or any push has landed.
    pub loaded: bool,
    /// Number of pushes applied since mount.
    pub live_updates: u64,
    pub downloading: bool,
}

impl DashboardState {
    pub fn apply_snapshot(&mut self, snapshot: DashboardSnapshot) {
        self.stats = snapshot.stats;
        self.apply_charts(snapshot.charts);
        self.loaded = true;
    }

    pub fn apply_push(&mut self, event: &PushEvent) {
        match event {
            PushEvent::DashboardUpdate(stats) => self.stats = stats.clone(),
            PushEvent::ChartsUpdate(charts) => self.apply_charts(charts.clone()),
        }
        self.loaded = true;
        self.live_updates += 1;
    }

    fn apply_charts(&mut self, charts: ChartsUpdate) {
        if let Some(visitantes) = charts.visitantes {
            self.visitantes = visitantes;
        }
        if let Some(especies) = charts.especies {
            self.especies = especies;
        }
    }
}
