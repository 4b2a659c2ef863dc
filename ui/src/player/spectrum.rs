//! Frequency-domain helpers for the live visualizer.
//!
//! Everything here works on plain byte magnitudes (`0..=255` per bin, as an
//! analyser node reports them), so it runs without any audio hardware.

/// Analyser and drawing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumConfig {
    pub fft_size: u32,
    pub smoothing: f64,
    pub bar_count: usize,
    /// Upper bound for the dominant-frequency readout.
    pub cutoff_hz: f32,
    pub frame_delay_ms: u64,
    pub width: f32,
    pub height: f32,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            smoothing: 0.85,
            bar_count: 70,
            cutoff_hz: 2_000.0,
            frame_delay_ms: 33,
            width: 720.0,
            height: 140.0,
        }
    }
}

impl SpectrumConfig {
    pub fn bin_count(&self) -> usize {
        (self.fft_size / 2) as usize
    }
}

/// Width of one analyser bin in Hz.
pub fn bin_width_hz(sample_rate: f32, fft_size: u32) -> f32 {
    if fft_size == 0 {
        return 0.0;
    }
    sample_rate / fft_size as f32
}

/// Centre frequency of `bin`.
pub fn bin_frequency(bin: usize, sample_rate: f32, fft_size: u32) -> f32 {
    bin as f32 * bin_width_hz(sample_rate, fft_size)
}

/// First bin at or above `cutoff_hz` (exclusive upper bound for peak search).
pub fn cutoff_bin(cutoff_hz: f32, sample_rate: f32, fft_size: u32) -> usize {
    let width = bin_width_hz(sample_rate, fft_size);
    if width <= 0.0 {
        return 0;
    }
    (cutoff_hz / width).ceil() as usize
}

/// Index of the strongest bin below `cutoff_bin`; the lowest index wins ties.
/// `None` when there is nothing to look at or everything is silent.
pub fn dominant_bin(magnitudes: &[u8], cutoff_bin: usize) -> Option<usize> {
    let end = cutoff_bin.min(magnitudes.len());
    let mut best: Option<(usize, u8)> = None;
    for (index, &value) in magnitudes[..end].iter().enumerate() {
        if value == 0 {
            continue;
        }
        match best {
            Some((_, peak)) if value <= peak => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumBar {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: String,
}

/// One drawable frame: sampled bars plus the dominant frequency, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpectrumFrame {
    pub bars: Vec<SpectrumBar>,
    pub dominant_hz: Option<f32>,
}

impl SpectrumFrame {
    /// Sample every `len / bar_count`-th bin into `bar_count` bars.
    pub fn from_bins(bins: &[u8], sample_rate: f32, config: &SpectrumConfig) -> Self {
        if bins.is_empty() || config.bar_count == 0 {
            return Self::default();
        }

        let step = (bins.len() / config.bar_count).max(1);
        let slot = config.width / config.bar_count as f32;
        let bars = (0..config.bar_count)
            .map(|i| {
                let raw = bins.get(i * step).copied().unwrap_or(0);
                let v = raw as f32 / 255.0;
                let height = (v * config.height).max(2.0);
                SpectrumBar {
                    x: i as f32 * slot + 1.0,
                    y: config.height - height,
                    width: (slot - 2.0).max(1.0),
                    height,
                    color: bar_color(v),
                }
            })
            .collect();

        let cutoff = cutoff_bin(config.cutoff_hz, sample_rate, config.fft_size);
        let dominant_hz = dominant_bin(bins, cutoff)
            .map(|bin| bin_frequency(bin, sample_rate, config.fft_size));

        Self { bars, dominant_hz }
    }
}

/// Blue at silence, warming towards pink as the level rises.
pub fn bar_color(level: f32) -> String {
    let v = level.clamp(0.0, 1.0);
    let r = (80.0 + v * 175.0).floor() as u8;
    let g = (120.0 + v * 90.0).floor() as u8;
    format!("rgb({r},{g},200)")
}
