use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::future::Future;
use core::time::Duration;
use rand::prelude::*;

use crate::*;

/// Suspends the ambient sweep between two reveals.
pub trait Sleep {
    fn sleep(&self, delay: Duration) -> impl Future<Output = ()>;
}

/// Stops a running sweep at its next pause.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<core::cell::Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Cells this sweep opened.
    pub revealed: CellCount,
    /// Cells that were already open by the time the sweep reached them.
    pub skipped: CellCount,
    pub checkpoints: CellCount,
    pub cancelled: bool,
}

/// Time-paced reveal of every cell that was closed when the sweep was planned, in shuffled order so the timing
/// gives nothing away about positions or prizes.
#[derive(Debug)]
pub struct AmbientSweep {
    order: Vec<CellIndex>,
    delay: DelayRange,
    checkpoint_interval: CellCount,
    rng: SmallRng,
    cancel: CancelToken,
}

impl AmbientSweep {
    pub(crate) fn new(
        mut order: Vec<CellIndex>,
        delay: DelayRange,
        checkpoint_interval: CellCount,
        mut rng: SmallRng,
    ) -> Self {
        order.shuffle(&mut rng);
        Self {
            order,
            delay,
            checkpoint_interval: checkpoint_interval.max(1),
            rng,
            cancel: CancelToken::new(),
        }
    }

    /// Cells in the order they will be opened.
    pub fn order(&self) -> &[CellIndex] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Opens the planned cells one at a time, sleeping a random delay after each.
    ///
    /// The engine is only borrowed between pauses, so a player may open cells while the sweep sleeps; those cells
    /// are skipped when the sweep reaches them. Every `checkpoint_interval`-th step persists, starting with the
    /// first, and the sweep persists once more when it stops.
    pub async fn run<S: GridStore, T: Sleep>(
        mut self,
        engine: &RefCell<JackpotEngine<S>>,
        sleeper: &T,
    ) -> SweepReport {
        let mut report = SweepReport::default();
        let interval = usize::from(self.checkpoint_interval);
        log::debug!("Ambient sweep started over {} cells", self.order.len());

        for (step, &index) in self.order.iter().enumerate() {
            if self.cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            {
                let mut engine = engine.borrow_mut();
                match engine.reveal_ambient(index) {
                    CellReveal::Opened(_) => report.revealed += 1,
                    CellReveal::AlreadyOpen | CellReveal::Invalid => report.skipped += 1,
                }
                if step % interval == 0 {
                    engine.persist();
                    report.checkpoints += 1;
                }
            }

            let delay = self.delay.sample(&mut self.rng);
            sleeper.sleep(delay).await;
        }

        // no-op once the game was discarded
        engine.borrow_mut().persist();
        log::debug!("Ambient sweep finished: {:?}", report);
        report
    }
}
