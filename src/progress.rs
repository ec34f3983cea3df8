//! Optional progress reporting for long encodes and decodes.
//!
//! Observers only watch; nothing they do can change the output.

/// Receives byte counts as an encode or decode advances.
///
/// The encoder counts input bytes, the decoder counts packed bytes.
pub trait ProgressObserver {
    /// Called once before any work with the total number of units.
    fn begin(&mut self, _total: u64) {}

    /// Called with the number of units completed since the last call.
    fn advance(&mut self, delta: u64);

    /// Called once after the last unit.
    fn finish(&mut self) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    #[inline]
    fn advance(&mut self, _delta: u64) {}
}

impl<P: ProgressObserver + ?Sized> ProgressObserver for &mut P {
    fn begin(&mut self, total: u64) {
        (**self).begin(total)
    }

    fn advance(&mut self, delta: u64) {
        (**self).advance(delta)
    }

    fn finish(&mut self) {
        (**self).finish()
    }
}

#[cfg(feature = "progress")]
impl ProgressObserver for indicatif::ProgressBar {
    fn begin(&mut self, total: u64) {
        self.set_length(total);
        self.set_position(0);
    }

    fn advance(&mut self, delta: u64) {
        self.inc(delta);
    }

    fn finish(&mut self) {
        self.finish_and_clear();
    }
}

/// Reports completed units to an observer in steps of `step`.
pub(crate) struct Ticker<P> {
    observer: P,
    step: usize,
    pending: usize,
}

impl<P: ProgressObserver> Ticker<P> {
    pub(crate) fn start(mut observer: P, total: usize, step: usize) -> Self {
        observer.begin(total as u64);
        Ticker {
            observer,
            step: step.max(1),
            pending: 0,
        }
    }

    #[inline]
    pub(crate) fn tick(&mut self) {
        self.pending += 1;
        if self.pending >= self.step {
            self.observer.advance(self.pending as u64);
            self.pending = 0;
        }
    }

    pub(crate) fn finish(mut self) {
        if self.pending > 0 {
            self.observer.advance(self.pending as u64);
        }
        self.observer.finish();
    }
}
