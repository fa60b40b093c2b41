use core::time::Duration;

/// Abstracts over how simulated work waits for a given [`Duration`].
///
/// Quote generation pauses to emulate a remote pricing computation. Routing
/// the pause through this trait lets tests swap the timer for [`NoLatency`].
pub trait LatencySimulator {
    /// The returned future must be `Send` so handlers can run on any worker
    /// thread.
    fn sleep_for(&self, dur: Duration) -> impl Future<Output = ()> + Send;
}

/// A [`LatencySimulator`] backed by Tokio's timer.
///
/// The sleep yields to the scheduler, so other calls keep making progress
/// and a cancelled call stops waiting as soon as its future is dropped.
#[derive(Default, Clone, Copy, Debug)]
pub struct TokioLatency;

impl LatencySimulator for TokioLatency {
    fn sleep_for(&self, dur: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(dur)
    }
}

/// A [`LatencySimulator`] that completes immediately.
#[derive(Default, Clone, Copy, Debug)]
pub struct NoLatency;

impl LatencySimulator for NoLatency {
    fn sleep_for(&self, _dur: Duration) -> impl Future<Output = ()> + Send {
        core::future::ready(())
    }
}
