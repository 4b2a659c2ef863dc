//! Session analytics: aggregation, report text, chart rendering, and the cards
//! that present them on the dashboard.

pub mod narrative;
pub mod plot;
pub mod stats;

mod list;
pub use list::SessionsTable;

mod report;
pub use report::ReportCard;

mod charts;
pub use charts::{Highlights, ImprovementChart};

mod export;
pub use export::ExportPanel;

mod utils;
pub(crate) use utils::*;

use i18n_embed::fluent::FluentLanguageLoader;
use tracing::warn;

use crate::core::{
    catalog::TrackCatalog,
    scope::Scope,
    storage::{KeyValueStore, SessionRecord, SessionStore},
};

use self::{
    narrative::render_report_with,
    plot::{chart_svg, ChartLayout},
    stats::SessionStats,
};

/// Everything the dashboard shows for one scope, recomputed from storage in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSnapshot {
    pub scope: Scope,
    pub users: Vec<String>,
    pub sessions: Vec<SessionRecord>,
    pub stats: SessionStats,
    pub report: String,
    pub chart_svg: String,
}

impl AnalyticsSnapshot {
    /// Registers a scoped user on first sight, then filters, aggregates, and renders.
    pub fn load<S: KeyValueStore>(
        store: &SessionStore<S>,
        catalog: &TrackCatalog,
        scope: &Scope,
        scope_label: &str,
        loader: &FluentLanguageLoader,
    ) -> Self {
        if let Some(user) = scope.user_name() {
            if let Err(err) = store.add_user_if_absent(user) {
                warn!(user, %err, "could not register scoped user");
            }
        }

        let sessions = store.sessions_in(scope);
        let stats = SessionStats::compute(&sessions, catalog);
        let report = render_report_with(loader, &stats, catalog, scope_label);
        let chart_svg = chart_svg(&stats, catalog, &ChartLayout::default());

        Self {
            scope: scope.clone(),
            users: store.list_users(),
            sessions,
            stats,
            report,
            chart_svg,
        }
    }
}
