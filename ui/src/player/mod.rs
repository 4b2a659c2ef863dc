//! Listening side of the app: the audio player, its session timer, and the
//! live spectrum drawn from a Web Audio analyser.

pub mod bridge;
pub mod spectrum;

mod visualizer;
pub use visualizer::SpectrumView;

mod view;
pub use view::{PlayerCard, AUDIO_ELEMENT_ID};
