//! Target-specific glue shared by the views.

use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Desktop
        }
    }

    /// Exports land in the browser's downloads on web and in the data dir on desktop.
    pub fn saves_to_disk(self) -> bool {
        matches!(self, Self::Desktop)
    }
}

/// Run a future to completion off the current event handler.
#[cfg(target_arch = "wasm32")]
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Native exports are short synchronous I/O; block in place.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_future<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    futures::executor::block_on(future);
}
