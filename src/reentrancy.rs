//! Debug-only reentrancy check.
//!
//! Containers call user code in the middle of an operation: the comparator
//! during every descent or scan, and the hasher on every slot lookup. A
//! callback that reaches back into the same container (through a raw pointer
//! or interior mutability smuggled into a key) could observe a half-built
//! tree or a table mid-rehash. In debug builds each public entry point marks
//! the container busy with the name of the running operation and a nested
//! entry panics naming both. In release builds this is a zero-sized no-op.

#[cfg(debug_assertions)]
use core::cell::Cell;
use core::marker::PhantomData;

/// Per-container busy marker. Guard a method with
/// `let _busy = self.reentry.enter("put");`.
#[derive(Debug, Default)]
pub struct ReentryCheck {
    #[cfg(debug_assertions)]
    active: Cell<Option<&'static str>>,
}

impl ReentryCheck {
    pub const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(None),
        }
    }

    /// Mark the container busy for `op`. Panics in debug builds if another
    /// operation on the same container has not finished.
    #[inline]
    pub fn enter(&self, op: &'static str) -> Busy<'_> {
        #[cfg(debug_assertions)]
        {
            if let Some(running) = self.active.get() {
                panic!("reentrant `{op}` while `{running}` is in progress on the same container");
            }
            self.active.set(Some(op));
            Busy {
                owner: self,
                _pd: PhantomData,
            }
        }

        #[cfg(not(debug_assertions))]
        {
            let _ = op;
            Busy { _pd: PhantomData }
        }
    }

    /// Name of the operation currently running, if any. Always `None` in
    /// release builds.
    pub fn active(&self) -> Option<&'static str> {
        #[cfg(debug_assertions)]
        {
            self.active.get()
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    }
}

// A fresh container is never busy, so clones start idle.
impl Clone for ReentryCheck {
    fn clone(&self) -> Self {
        Self::new()
    }
}

/// RAII marker returned by `ReentryCheck::enter`; clears the busy state on drop.
pub struct Busy<'a> {
    #[cfg(debug_assertions)]
    owner: &'a ReentryCheck,
    _pd: PhantomData<&'a ()>,
}

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            debug_assert!(self.owner.active().is_some());
            self.owner.active.set(None);
        }
    }
}
