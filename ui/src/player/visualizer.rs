use dioxus::prelude::*;

use crate::{core::format::format_fixed, t};

use super::spectrum::{SpectrumConfig, SpectrumFrame};

#[component]
pub fn SpectrumView(frame: SpectrumFrame, band_hz: [f32; 2], active: bool) -> Element {
    let config = SpectrumConfig::default();
    let view_box = format!("0 0 {} {}", config.width, config.height);

    let readout = match frame.dominant_hz {
        Some(hz) if active => {
            let in_band = hz >= band_hz[0] && hz <= band_hz[1];
            Some((format_fixed(hz as f64, 0), in_band))
        }
        _ => None,
    };

    rsx! {
        div { class: "spectrum",
            svg {
                class: "spectrum__canvas",
                view_box: "{view_box}",
                preserve_aspect_ratio: "none",
                role: "img",
                for (i, bar) in frame.bars.iter().enumerate() {
                    rect {
                        key: "{i}",
                        x: "{bar.x}",
                        y: "{bar.y}",
                        width: "{bar.width}",
                        height: "{bar.height}",
                        fill: "{bar.color}",
                    }
                }
            }
            div { class: "spectrum__readout",
                match readout {
                    Some((hz, in_band)) => rsx! {
                        span { {t!("spectrum-dominant", hz = hz)} }
                        if in_band {
                            span { class: "badge badge--ok", {t!("spectrum-in-band")} }
                        }
                    },
                    None => rsx! {
                        span { class: "spectrum__idle", {t!("spectrum-idle")} }
                    },
                }
            }
        }
    }
}
