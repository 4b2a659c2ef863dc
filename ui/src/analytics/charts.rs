use dioxus::prelude::*;

use crate::{
    analytics::stats::SessionStats,
    core::{catalog::TrackCatalog, format::format_improvement},
    t,
};

#[component]
pub fn Highlights(stats: SessionStats, catalog: TrackCatalog) -> Element {
    let total = stats.total_count;
    let average = format_improvement(stats.overall_average_improvement);
    let most_used = stats
        .most_frequent_category
        .as_ref()
        .map(|category| catalog.label_for(category))
        .unwrap_or_else(|| t!("report-none"));
    let best = stats
        .best_category()
        .map(|category| catalog.label_for(category))
        .unwrap_or_else(|| t!("report-none"));

    rsx! {
        section { class: "dash-card highlights",
            div { class: "highlights__grid",
                div { class: "highlight",
                    span { class: "highlight__label", {t!("highlight-total")} }
                    strong { class: "highlight__value", "{total}" }
                }
                div { class: "highlight",
                    span { class: "highlight__label", {t!("highlight-average")} }
                    strong { class: "highlight__value", "{average}" }
                }
                div { class: "highlight",
                    span { class: "highlight__label", {t!("highlight-most-used")} }
                    strong { class: "highlight__value", "{most_used}" }
                }
                div { class: "highlight",
                    span { class: "highlight__label", {t!("highlight-best")} }
                    strong { class: "highlight__value", "{best}" }
                }
            }
        }
    }
}

/// Average-improvement bar chart; `svg` comes from [`crate::analytics::plot::chart_svg`].
#[component]
pub fn ImprovementChart(svg: String) -> Element {
    rsx! {
        section { class: "dash-card chart",
            div { class: "dash-card__header",
                h2 { {t!("chart-title")} }
                span { class: "dash-card__meta", {t!("chart-axis-note")} }
            }
            div { class: "chart__canvas", dangerous_inner_html: "{svg}" }
        }
    }
}
