//! Platform-agnostic building blocks: persistence, track catalog, timing, formatting.

pub mod catalog;
pub mod format;
pub mod platform;
pub mod recorder;
pub mod scope;
pub mod storage;
pub mod timing;
