use dioxus::prelude::*;

use crate::t;

/// Plain-text final analysis, rendered as preformatted lines.
#[component]
pub fn ReportCard(report: String) -> Element {
    rsx! {
        section { class: "dash-card report",
            div { class: "dash-card__header",
                h2 { {t!("report-card-title")} }
            }
            pre { class: "report__body", "{report}" }
        }
    }
}
