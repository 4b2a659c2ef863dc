use dioxus::prelude::*;

use crate::{
    analytics::format_timestamp,
    core::{
        catalog::TrackCatalog,
        format::format_plain,
        platform::{self, Platform},
        storage::SessionRecord,
    },
    t,
};

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(String),
    Done(String),
    Error(String),
}

#[derive(Clone, Copy)]
enum ExportKind {
    Json,
    Csv,
}

#[component]
pub fn ExportPanel(sessions: Vec<SessionRecord>, catalog: TrackCatalog) -> Element {
    let total = sessions.len();
    let status = use_signal(|| ExportStatus::Idle);
    let busy = use_signal(|| false);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working(label) => Some(("dash-card__meta".to_string(), format!("{label}…"))),
        ExportStatus::Done(message) => Some((
            "dash-card__meta dash-card__meta--success".to_string(),
            message.clone(),
        )),
        ExportStatus::Error(err) => Some((
            "dash-card__meta dash-card__meta--error".to_string(),
            t!("export-failed", error = err.clone()),
        )),
    };

    let json_handler = export_handler(ExportKind::Json, sessions.clone(), catalog.clone(), status, busy);
    let csv_handler = export_handler(ExportKind::Csv, sessions.clone(), catalog.clone(), status, busy);

    let destination = if Platform::current().saves_to_disk() {
        t!("export-destination-disk")
    } else {
        t!("export-destination-download")
    };

    rsx! {
        section { class: "dash-card export",
            div { class: "dash-card__header",
                h2 { {t!("export-title")} }
            }

            if total == 0 {
                p { class: "dash-card__placeholder", {t!("export-empty")} }
            } else {
                p { {t!("export-intro", count = total.to_string())} " " {destination} }

                div { class: "export__actions",
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        disabled: busy(),
                        onclick: json_handler,
                        {t!("export-json")}
                    }
                    button {
                        r#type: "button",
                        class: "button",
                        disabled: busy(),
                        onclick: csv_handler,
                        {t!("export-csv")}
                    }
                }

                if let Some((class_name, message)) = feedback {
                    p { class: "{class_name}", role: "status", "{message}" }
                }
            }
        }
    }
}

fn export_handler(
    kind: ExportKind,
    sessions: Vec<SessionRecord>,
    catalog: TrackCatalog,
    mut status: Signal<ExportStatus>,
    mut busy: Signal<bool>,
) -> impl FnMut(MouseEvent) + 'static {
    move |_| {
        if busy() {
            return;
        }
        busy.set(true);
        let label = match kind {
            ExportKind::Json => t!("export-working-json"),
            ExportKind::Csv => t!("export-working-csv"),
        };
        status.set(ExportStatus::Working(label));

        let sessions = sessions.clone();
        let catalog = catalog.clone();
        platform::spawn_future(async move {
            let outcome = match kind {
                ExportKind::Json => perform_json_export(sessions).await,
                ExportKind::Csv => perform_csv_export(sessions, catalog).await,
            };
            match outcome {
                Ok(message) => status.set(ExportStatus::Done(message)),
                Err(err) => {
                    tracing::warn!(%err, "export failed");
                    status.set(ExportStatus::Error(err));
                }
            }
            busy.set(false);
        });
    }
}

async fn perform_json_export(sessions: Vec<SessionRecord>) -> Result<String, String> {
    let json = serde_json::to_string_pretty(&sessions).map_err(|err| err.to_string())?;
    let copied = copy_to_clipboard(json.clone()).await;
    if let Err(err) = &copied {
        tracing::debug!(%err, "clipboard copy skipped");
    }
    let filename = format!("tonelog-sessions-{}.json", timestamp_slug());
    let delivery = download_bytes(&filename, "application/json", json.into_bytes()).await?;
    Ok(match (delivery, copied.is_ok()) {
        (Some(path), true) => t!("export-json-copied-saved", path = path),
        (Some(path), false) => t!("export-saved", path = path),
        (None, true) => t!("export-json-copied-download"),
        (None, false) => t!("export-download-started"),
    })
}

async fn perform_csv_export(
    sessions: Vec<SessionRecord>,
    catalog: TrackCatalog,
) -> Result<String, String> {
    let csv = build_csv(&sessions, &catalog);
    let filename = format!("tonelog-sessions-{}.csv", timestamp_slug());
    let delivery = download_bytes(&filename, "text/csv", csv.into_bytes()).await?;
    Ok(match delivery {
        Some(path) => t!("export-saved", path = path),
        None => t!("export-download-started"),
    })
}

const CSV_HEADER: [&str; 9] = [
    "date",
    "user",
    "track",
    "freq",
    "duration_s",
    "before",
    "after",
    "improvement",
    "id",
];

fn build_csv(sessions: &[SessionRecord], catalog: &TrackCatalog) -> String {
    let mut csv = CSV_HEADER.join(",");
    csv.push('\n');

    for record in sessions {
        let row = [
            format_timestamp(record),
            record.user.clone(),
            catalog.label_for(&record.category),
            record.category.to_string(),
            record.duration_seconds.to_string(),
            format_plain(record.mood_before),
            format_plain(record.mood_after),
            format_plain(record.improvement),
            record.id.clone(),
        ];
        let line = row
            .iter()
            .map(|field| escape_csv(field))
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }

    csv
}

fn escape_csv(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let needs_quotes = value.contains(',') || value.contains('"') || value.contains('\n');
    if needs_quotes {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}

async fn copy_to_clipboard(payload: String) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let window = web_sys::window().ok_or("window unavailable")?;
        let document = window.document().ok_or("document unavailable")?;
        let body = document.body().ok_or("missing body")?;

        let textarea = document
            .create_element("textarea")
            .map_err(|_| "Unable to create textarea")?
            .dyn_into::<web_sys::HtmlTextAreaElement>()
            .map_err(|_| "Textarea cast failed")?;
        textarea.set_value(&payload);
        let style = textarea.style();
        style.set_property("position", "fixed").ok();
        style.set_property("top", "0").ok();
        style.set_property("left", "0").ok();
        style.set_property("opacity", "0").ok();

        body.append_child(&textarea).ok();
        textarea.select();
        let copied = document
            .dyn_ref::<web_sys::HtmlDocument>()
            .and_then(|html| html.exec_command("copy").ok())
            .unwrap_or(false);
        textarea.remove();
        if copied {
            Ok(())
        } else {
            Err("Clipboard copy blocked".into())
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use arboard::Clipboard;

        let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
        clipboard.set_text(payload).map_err(|err| err.to_string())
    }
}

async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| "Failed to create blob".to_string())?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Unable to create download".to_string())?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Document unavailable")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "Unable to create anchor")?
            .dyn_into()
            .map_err(|_| "Anchor cast failed")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or("Missing body")?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::fs;

        let _ = mime;
        let dir = desktop_export_dir()?;
        fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
        let path = dir.join(filename);
        fs::write(&path, &bytes).map_err(|err| err.to_string())?;
        tracing::info!(path = %path.display(), "export written");
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, String> {
    let dirs = directories::ProjectDirs::from("com", "Tonelog", "Tonelog")
        .ok_or("Unable to determine export directory")?;
    Ok(dirs.data_dir().join("exports"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::Category;

    #[test]
    fn csv_has_header_and_one_row_per_session() {
        let catalog = TrackCatalog::builtin();
        let mut first = SessionRecord::new("Alice", 432.into(), 90, 3.0, 7.5);
        first.created_at = "2024-05-01T10:42:13Z".into();
        first.id = "a1".into();
        let mut second = SessionRecord::new("Bob, Jr.", Category::new("rain"), 30, 5.0, 4.0);
        second.created_at = "2024-05-02T08:00:00Z".into();
        second.id = "b2".into();

        let csv = build_csv(&[first, second], &catalog);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "date,user,track,freq,duration_s,before,after,improvement,id"
        );
        assert_eq!(lines[1], "2024-05-01 · 10:42,Alice,432 Hz,432,90,3,7.5,4.5,a1");
        assert_eq!(lines[2], "2024-05-02 · 08:00,\"Bob, Jr.\",rain,rain,30,5,4,-1,b2");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn csv_escaping_quotes_embedded_quotes() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv(""), "");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_csv("a\nb"), "\"a\nb\"");
    }

    #[test]
    fn slug_is_filename_safe() {
        let slug = timestamp_slug();
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_digit() || c == '_'), "{slug}");
    }
}
