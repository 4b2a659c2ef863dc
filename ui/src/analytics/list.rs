use crate::{
    analytics::{format_timestamp, improvement_class},
    core::{
        catalog::TrackCatalog,
        format::format_plain,
        storage::{SessionRecord, SessionStore},
    },
    t,
};
use dioxus::prelude::*;
use tracing::warn;

#[component]
pub fn SessionsTable(
    sessions: Vec<SessionRecord>,
    catalog: TrackCatalog,
    on_change: EventHandler<()>,
) -> Element {
    let mut error = use_signal(|| Option::<String>::None);

    let rows: Vec<Row> = sessions
        .iter()
        .map(|record| Row {
            id: record.id.clone(),
            timestamp: format_timestamp(record),
            user: record.user.clone(),
            track: catalog.label_for(&record.category),
            duration: record.duration_seconds.to_string(),
            before: format_plain(record.mood_before),
            after: format_plain(record.mood_after),
            improvement: format_plain(record.improvement),
            improvement_class: improvement_class(record.improvement),
        })
        .collect();

    let delete = move |id: String| {
        match SessionStore::open().delete_session(&id) {
            Ok(_) => error.set(None),
            Err(err) => {
                warn!(%err, id, "failed to delete session");
                error.set(Some(t!("notice-storage-failed", error = err.to_string())));
            }
        }
        on_change.call(());
    };

    rsx! {
        section { class: "dash-card sessions",
            div { class: "dash-card__header",
                h2 { {t!("sessions-title")} }
                if !sessions.is_empty() {
                    span { class: "dash-card__meta", {t!("sessions-count", count = sessions.len().to_string())} }
                }
            }

            if let Some(message) = error() {
                p { class: "notice notice--error", role: "alert", "{message}" }
            }

            if sessions.is_empty() {
                p { class: "dash-card__placeholder", {t!("sessions-empty")} }
            } else {
                div { class: "sessions__scroll",
                    table { class: "sessions__table",
                        thead {
                            tr {
                                th { {t!("sessions-col-date")} }
                                th { {t!("sessions-col-user")} }
                                th { {t!("sessions-col-track")} }
                                th { {t!("sessions-col-duration")} }
                                th { {t!("sessions-col-before")} }
                                th { {t!("sessions-col-after")} }
                                th { {t!("sessions-col-improvement")} }
                                th { "" }
                            }
                        }
                        tbody {
                            for row in rows.into_iter() {
                                {render_row(row, delete)}
                            }
                        }
                    }
                }
            }
        }
    }
}

#[derive(Clone)]
struct Row {
    id: String,
    timestamp: String,
    user: String,
    track: String,
    duration: String,
    before: String,
    after: String,
    improvement: String,
    improvement_class: &'static str,
}

fn render_row(row: Row, mut delete: impl FnMut(String) + 'static) -> Element {
    let Row {
        id,
        timestamp,
        user,
        track,
        duration,
        before,
        after,
        improvement,
        improvement_class,
    } = row;

    let key = id.clone();

    rsx! {
        tr { key: "{key}", class: "sessions__row",
            td { "{timestamp}" }
            td { "{user}" }
            td { "{track}" }
            td { "{duration}" }
            td { "{before}" }
            td { "{after}" }
            td { class: "sessions__improvement {improvement_class}", "{improvement}" }
            td {
                button {
                    r#type: "button",
                    class: "button button--ghost button--small",
                    onclick: move |_| delete(id.clone()),
                    {t!("sessions-delete")}
                }
            }
        }
    }
}
