//! Plain-text report ("final analysis") assembled from aggregated statistics.

use i18n_embed::{fluent::FluentLanguageLoader, LanguageLoader};

use crate::{
    analytics::stats::SessionStats,
    core::{
        catalog::TrackCatalog,
        format::{format_improvement, format_seconds, localize_digits},
    },
    i18n::{fl, LOADER},
};

/// Render the report in the active UI language.
pub fn render_report(stats: &SessionStats, catalog: &TrackCatalog, scope_label: &str) -> String {
    render_report_with(&LOADER, stats, catalog, scope_label)
}

/// Render the report with an explicit loader.
///
/// With no sessions the report is the single "no data" line. Otherwise:
/// title, best track, overall averages, one bullet per catalog track, an
/// interpretation line, and the disclaimer.
pub fn render_report_with(
    loader: &FluentLanguageLoader,
    stats: &SessionStats,
    catalog: &TrackCatalog,
    scope_label: &str,
) -> String {
    if stats.is_empty() {
        return fl!(loader, "report-empty");
    }

    // Numbers and track labels follow the locale's digits; the scope label is a
    // user name and stays as typed.
    let lang = loader.current_language().to_string();
    let digits = |text: String| localize_digits(&text, &lang);

    let best = match stats.best_category() {
        Some(category) => digits(catalog.label_for(category)),
        None => fl!(loader, "report-none"),
    };

    let mut lines = Vec::new();
    lines.push(fl!(loader, "report-title", scope = scope_label));
    lines.push(fl!(loader, "report-best", best = best.as_str()));
    lines.push(fl!(
        loader,
        "report-overall-improvement",
        value = digits(format_improvement(stats.overall_average_improvement))
    ));
    lines.push(fl!(
        loader,
        "report-overall-duration",
        seconds = digits(format_seconds(stats.overall_average_duration))
    ));
    lines.push(String::new());
    lines.push(fl!(loader, "report-breakdown-heading"));

    for entry in stats.catalog_categories() {
        lines.push(fl!(
            loader,
            "report-breakdown-item",
            label = digits(catalog.label_for(&entry.category)),
            improvement = digits(format_improvement(entry.average_improvement)),
            count = digits(entry.count.to_string()),
            seconds = digits(format_seconds(entry.average_duration))
        ));
    }

    lines.push(String::new());
    lines.push(fl!(loader, "report-interpretation-heading"));
    lines.push(fl!(
        loader,
        "report-interpretation",
        best = best.as_str(),
        scope = scope_label
    ));
    lines.push(fl!(loader, "report-disclaimer"));

    lines.join("\n")
}
