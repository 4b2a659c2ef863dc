use dioxus::prelude::*;
use tracing::warn;

use crate::{
    core::{
        catalog::TrackCatalog,
        recorder::{record_session, RecordError, SessionDraft},
        storage::{Category, SessionStore},
        timing::{sleep_ms, SessionTimer},
    },
    t,
};

use super::{
    bridge::AnalyserBridge,
    spectrum::{SpectrumConfig, SpectrumFrame},
    visualizer::SpectrumView,
};

pub const AUDIO_ELEMENT_ID: &str = "tonelog-audio";

#[derive(Debug, Clone, PartialEq)]
enum Notice {
    Saved(String),
    Error(String),
}

/// Track picker, audio element, listening timer, mood inputs and the spectrum.
///
/// `scope_user` (the route's `user` parameter) takes precedence over
/// `selected_user` when a session is saved.
#[component]
pub fn PlayerCard(
    catalog: TrackCatalog,
    scope_user: Option<String>,
    selected_user: Option<String>,
    on_saved: EventHandler<()>,
) -> Element {
    let first_track = catalog.first().category.clone();
    let mut track = use_signal(|| first_track.clone());
    let mut timer = use_signal(SessionTimer::new);
    let mut ticker = use_signal(|| Option::<Task>::None);
    let mut analyser = use_signal(|| Option::<Task>::None);
    let mut frame = use_signal(SpectrumFrame::default);
    let mut mood_before = use_signal(|| "5".to_string());
    let mut mood_after = use_signal(|| "5".to_string());
    let mut notice = use_signal(|| Option::<Notice>::None);

    // Tasks spawned here belong to this scope and are dropped with it.
    let mut stop_timer = move || {
        timer.with_mut(|t| {
            t.stop();
        });
        cancel_task(ticker);
    };

    let mut halt = move || {
        stop_timer();
        cancel_task(analyser);
        frame.set(SpectrumFrame::default());
    };

    let on_play = move |_| {
        if timer.with_mut(SessionTimer::start) {
            cancel_task(ticker);
            ticker.set(Some(spawn(async move {
                loop {
                    sleep_ms(1_000).await;
                    timer.with_mut(|t| {
                        t.tick();
                    });
                }
            })));
        }
        if analyser.peek().is_none() {
            analyser.set(Some(spawn(run_spectrum(frame, analyser))));
        }
    };

    let on_track_change = move |evt: FormEvent| {
        halt();
        timer.with_mut(SessionTimer::reset);
        track.set(Category::new(evt.value()));
        notice.set(None);
    };

    let reset_timer = move |_| {
        cancel_task(ticker);
        timer.with_mut(SessionTimer::reset);
    };

    let save = {
        let catalog = catalog.clone();
        move |_| {
            let draft = SessionDraft {
                scope_user: scope_user.clone(),
                selected_user: selected_user.clone(),
                category: Some(track()),
                elapsed_seconds: i64::from(timer.peek().elapsed_seconds()),
                mood_before: parse_mood(&mood_before()),
                mood_after: parse_mood(&mood_after()),
            };

            match record_session(&SessionStore::open(), &draft, &catalog.first().category) {
                Ok(record) => {
                    cancel_task(ticker);
                    timer.with_mut(SessionTimer::reset);
                    let label = catalog.label_for(&record.category);
                    notice.set(Some(Notice::Saved(t!(
                        "notice-saved",
                        user = record.user.clone(),
                        track = label
                    ))));
                    on_saved.call(());
                }
                Err(err) => {
                    warn!(%err, "session not saved");
                    notice.set(Some(Notice::Error(record_error_text(&err))));
                }
            }
        }
    };

    let current = track();
    let meta = catalog.get(&current).unwrap_or_else(|| catalog.first()).clone();
    let elapsed = timer().elapsed_seconds();
    let running = timer().is_running();

    rsx! {
        section { class: "dash-card player",
            div { class: "dash-card__header",
                h2 { {t!("player-title")} }
                span { class: "dash-card__meta", "{meta.note}" }
            }

            div { class: "player__controls",
                label { class: "field",
                    span { class: "field__label", {t!("player-track-label")} }
                    select {
                        class: "field__input",
                        value: "{current}",
                        onchange: on_track_change,
                        for entry in catalog.tracks().iter() {
                            option {
                                key: "{entry.category}",
                                value: "{entry.category}",
                                selected: entry.category == current,
                                "{entry.label}"
                            }
                        }
                    }
                }

                audio {
                    id: AUDIO_ELEMENT_ID,
                    class: "player__audio",
                    controls: true,
                    preload: "auto",
                    src: "{meta.audio}",
                    onplay: on_play,
                    onpause: move |_| halt(),
                    onended: move |_| halt(),
                }

                div { class: "player__timer",
                    span { class: "player__timer-label", {t!("player-seconds-label")} }
                    strong {
                        class: if running { "player__seconds player__seconds--live" } else { "player__seconds" },
                        "{elapsed}"
                    }
                    button {
                        r#type: "button",
                        class: "button button--ghost button--small",
                        onclick: reset_timer,
                        {t!("player-reset-timer")}
                    }
                }
            }

            SpectrumView { frame: frame(), band_hz: meta.band_hz, active: running }

            div { class: "player__moods",
                label { class: "field",
                    span { class: "field__label", {t!("player-mood-before", value = mood_before())} }
                    input {
                        class: "field__range",
                        r#type: "range",
                        min: "0",
                        max: "10",
                        step: "1",
                        value: "{mood_before}",
                        oninput: move |evt| mood_before.set(evt.value()),
                    }
                }
                label { class: "field",
                    span { class: "field__label", {t!("player-mood-after", value = mood_after())} }
                    input {
                        class: "field__range",
                        r#type: "range",
                        min: "0",
                        max: "10",
                        step: "1",
                        value: "{mood_after}",
                        oninput: move |evt| mood_after.set(evt.value()),
                    }
                }
            }

            div { class: "player__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    onclick: save,
                    {t!("player-save")}
                }
            }

            match notice() {
                Some(Notice::Saved(message)) => rsx! {
                    p { class: "notice notice--success", role: "status", "{message}" }
                },
                Some(Notice::Error(message)) => rsx! {
                    p { class: "notice notice--error", role: "alert", "{message}" }
                },
                None => rsx! {},
            }
        }
    }
}

fn cancel_task(mut slot: Signal<Option<Task>>) {
    if let Some(task) = slot.take() {
        task.cancel();
    }
}

/// Pull analyser frames until cancelled or the bridge fails.
async fn run_spectrum(mut frame: Signal<SpectrumFrame>, mut slot: Signal<Option<Task>>) {
    let config = SpectrumConfig::default();
    match AnalyserBridge::connect(AUDIO_ELEMENT_ID, &config).await {
        Ok(mut bridge) => {
            let sample_rate = bridge.info().sample_rate;
            loop {
                match bridge.frame().await {
                    Ok(bins) => frame.set(SpectrumFrame::from_bins(&bins, sample_rate, &config)),
                    Err(err) => {
                        warn!(%err, "spectrum loop stopped");
                        break;
                    }
                }
                sleep_ms(config.frame_delay_ms).await;
            }
        }
        Err(err) => warn!(%err, "spectrum unavailable"),
    }
    slot.set(None);
}

/// Range inputs always yield numbers; anything else counts as 0.
fn parse_mood(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

fn record_error_text(err: &RecordError) -> String {
    match err {
        RecordError::NoActiveUser => t!("notice-no-user"),
        RecordError::NoListeningTime => t!("notice-no-time"),
        RecordError::Storage(err) => t!("notice-storage-failed", error = err.to_string()),
    }
}
