//! Listening-time accounting plus the async sleep used by the periodic loops.

/// Elapsed listening time for the session being recorded.
///
/// Pure state: the owning view drives `tick` from a once-per-second task and
/// cancels that task whenever `stop` or `reset` is called.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimer {
    elapsed_seconds: u32,
    running: bool,
}

impl SessionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` only on the stopped → running transition.
    pub fn start(&mut self) -> bool {
        let started = !self.running;
        self.running = true;
        started
    }

    /// Returns `true` only on the running → stopped transition.
    pub fn stop(&mut self) -> bool {
        let stopped = self.running;
        self.running = false;
        stopped
    }

    pub fn reset(&mut self) {
        self.elapsed_seconds = 0;
        self.running = false;
    }

    /// Count one second if running.
    pub fn tick(&mut self) -> u32 {
        if self.running {
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        }
        self.elapsed_seconds
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

pub async fn sleep_ms(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    {
        gloo_timers::future::TimeoutFuture::new(ms.min(u32::MAX as u64) as u32).await;
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
    }
}
