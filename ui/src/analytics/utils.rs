use crate::core::storage::SessionRecord;
use time::{macros::format_description, OffsetDateTime};

/// `2024-05-01 · 10:42` from the stored RFC 3339 stamp, or the raw value if it doesn't parse.
pub(crate) fn format_timestamp(record: &SessionRecord) -> String {
    match record.parsed_created_at() {
        Some(ts) => format!("{} · {}", format_date_badge(ts), format_time_badge(ts)),
        None => {
            let iso = record.created_at.as_str();
            let (date, time_segment) = iso.split_once('T').unwrap_or((iso, ""));
            let time_display: String = time_segment.chars().take(5).collect();
            if time_display.is_empty() {
                date.to_string()
            } else {
                format!("{date} · {time_display}")
            }
        }
    }
}

pub(crate) fn format_date_badge(date: OffsetDateTime) -> String {
    date.format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| "—".to_string())
}

pub(crate) fn format_time_badge(date: OffsetDateTime) -> String {
    date.format(&format_description!("[hour]:[minute]"))
        .unwrap_or_else(|_| "—".to_string())
}

/// CSS modifier for an improvement value.
pub(crate) fn improvement_class(value: f64) -> &'static str {
    if value > 0.0 {
        "improvement--up"
    } else if value < 0.0 {
        "improvement--down"
    } else {
        "improvement--flat"
    }
}
