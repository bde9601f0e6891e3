//! Change-notification seam between the core and a host layer
//!
//! The core commits every state change itself and then notifies the
//! observer synchronously; the observer never mutates the item. A host
//! (interactive UI, CLI counters) injects its own implementation through
//! the dataset's item factory; the core functions identically with
//! [`NoopObserver`].

use std::rc::Rc;

/// Hooks invoked after an item commits a state change.
///
/// All methods default to no-ops so hosts override only what they track.
pub trait ItemObserver {
    /// Tags diverged from the persisted sidecar (`dirty` was set).
    fn changed(&self) {}

    /// Tags were synchronized with the sidecar (`dirty` was cleared) by a
    /// load, reload or flush.
    fn reset(&self) {}

    /// A selection call was made. Fires on EVERY `select_set` /
    /// `select_invert` call, including redundant ones (`previous ==
    /// current`); observers that maintain counters compute the delta from
    /// the two values rather than assuming each call is a toggle.
    fn selected(&self, previous: bool, current: bool) {
        let _ = (previous, current);
    }
}

/// Observer that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ItemObserver for NoopObserver {}

/// Shared observer handle stored on each item.
///
/// The core is single-threaded by contract, so `Rc` rather than `Arc`.
pub type ObserverHandle = Rc<dyn ItemObserver>;

/// Convenience constructor for the default no-op handle.
#[must_use]
pub fn noop_observer() -> ObserverHandle {
    Rc::new(NoopObserver)
}
