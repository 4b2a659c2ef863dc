//! Web Audio analyser reached through `document::eval`.
//!
//! The script attaches one `AnalyserNode` per `<audio>` element (a media
//! element can only be wrapped in a source node once, so the node is cached on
//! the element), reports the sample rate, then answers every `"frame"` message
//! with the current byte magnitudes. Any other message ends the script.

use dioxus::document::{self, Eval};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::spectrum::SpectrumConfig;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("audio element `{0}` is not mounted")]
    MissingElement(String),
    #[error("analyser bridge failed: {0}")]
    Eval(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AnalyserInfo {
    pub sample_rate: f32,
    pub fft_size: u32,
}

pub struct AnalyserBridge {
    eval: Eval,
    info: AnalyserInfo,
}

impl AnalyserBridge {
    pub async fn connect(element_id: &str, config: &SpectrumConfig) -> Result<Self, BridgeError> {
        let mut eval = document::eval(&analyser_script(element_id, config));
        let info: Option<AnalyserInfo> = eval
            .recv()
            .await
            .map_err(|err| BridgeError::Eval(format!("{err:?}")))?;
        let info = info.ok_or_else(|| BridgeError::MissingElement(element_id.to_string()))?;
        debug!(sample_rate = info.sample_rate, fft_size = info.fft_size, "analyser attached");
        Ok(Self { eval, info })
    }

    pub fn info(&self) -> AnalyserInfo {
        self.info
    }

    pub async fn frame(&mut self) -> Result<Vec<u8>, BridgeError> {
        self.eval
            .send("frame")
            .map_err(|err| BridgeError::Eval(format!("{err:?}")))?;
        self.eval
            .recv()
            .await
            .map_err(|err| BridgeError::Eval(format!("{err:?}")))
    }
}

impl Drop for AnalyserBridge {
    fn drop(&mut self) {
        let _ = self.eval.send("stop");
    }
}

fn analyser_script(element_id: &str, config: &SpectrumConfig) -> String {
    let id = serde_json::to_string(element_id).unwrap_or_else(|_| "\"\"".into());
    format!(
        r#"
        const el = document.getElementById({id});
        if (!el) {{
            dioxus.send(null);
            return;
        }}
        let node = el.__tonelogAnalyser;
        if (!node) {{
            const Ctx = window.AudioContext || window.webkitAudioContext;
            const ctx = new Ctx();
            const analyser = ctx.createAnalyser();
            analyser.fftSize = {fft};
            analyser.smoothingTimeConstant = {smoothing};
            const source = ctx.createMediaElementSource(el);
            source.connect(analyser);
            analyser.connect(ctx.destination);
            node = {{ ctx, analyser }};
            el.__tonelogAnalyser = node;
        }}
        if (node.ctx.state === "suspended") {{
            await node.ctx.resume();
        }}
        dioxus.send({{ sample_rate: node.ctx.sampleRate, fft_size: node.analyser.fftSize }});
        const bins = new Uint8Array(node.analyser.frequencyBinCount);
        while (true) {{
            const msg = await dioxus.recv();
            if (msg !== "frame") break;
            node.analyser.getByteFrequencyData(bins);
            dioxus.send(Array.from(bins));
        }}
        "#,
        fft = config.fft_size,
        smoothing = config.smoothing,
    )
}
