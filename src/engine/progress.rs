//! Progress reporting for batch runs
//!
//! Reporting is cooperative and fire-and-forget: the engine calls the sink
//! synchronously before continuing, and there is no cancellation channel.
//! Sinks that hold display resources release them in `close`, which the
//! engine guarantees to call on every exit path through `ProgressScope`.

/// Injected progress collaborator
pub trait ProgressSink {
    fn report(&mut self, current: usize, total: usize, message: &str);

    /// Release any display resources. Default: nothing to release.
    fn close(&mut self) {}
}

/// Sink that forwards progress to the tracing subscriber
#[derive(Debug, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn report(&mut self, current: usize, total: usize, message: &str) {
        tracing::info!("[{}/{}] {}", current + 1, total, message);
    }
}

/// Sink that swallows everything
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&mut self, _current: usize, _total: usize, _message: &str) {}
}

/// Scoped wrapper guaranteeing `close` runs however the apply call exits
pub struct ProgressScope<'a> {
    sink: &'a mut dyn ProgressSink,
}

impl<'a> ProgressScope<'a> {
    pub fn new(sink: &'a mut dyn ProgressSink) -> Self {
        Self { sink }
    }

    pub fn report(&mut self, current: usize, total: usize, message: &str) {
        self.sink.report(current, total, message);
    }
}

impl Drop for ProgressScope<'_> {
    fn drop(&mut self) {
        self.sink.close();
    }
}
