/// Host hook for pointer listeners bound wider than the timeline bar.
///
/// Drags that leave the bar must keep tracking, so hosts bind move/up handlers
/// on the document while a drag runs. The editor calls `bind` exactly once
/// per drag and `unbind` exactly once when it ends, whichever way it ends.
pub trait PointerListenerScope {
    fn bind(&mut self);
    fn unbind(&mut self);
}

/// Headless scope that only counts bind/unbind calls.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DetachedListeners {
    pub binds: usize,
    pub unbinds: usize,
}

impl DetachedListeners {
    #[must_use]
    pub fn is_bound(self) -> bool {
        self.binds > self.unbinds
    }
}

impl PointerListenerScope for DetachedListeners {
    fn bind(&mut self) {
        self.binds += 1;
    }

    fn unbind(&mut self) {
        self.unbinds += 1;
    }
}

/// Acquire/release wrapper around a [`PointerListenerScope`].
///
/// Both operations are idempotent, and a held lease is released on drop so a
/// discarded editor never leaves document listeners behind.
#[derive(Debug, Default)]
pub struct ListenerLease<S: PointerListenerScope> {
    scope: S,
    held: bool,
}

impl<S: PointerListenerScope> ListenerLease<S> {
    #[must_use]
    pub fn new(scope: S) -> Self {
        Self { scope, held: false }
    }

    #[must_use]
    pub fn is_held(&self) -> bool {
        self.held
    }

    #[must_use]
    pub fn scope(&self) -> &S {
        &self.scope
    }

    pub fn acquire(&mut self) {
        if !self.held {
            self.scope.bind();
            self.held = true;
        }
    }

    pub fn release(&mut self) {
        if self.held {
            self.scope.unbind();
            self.held = false;
        }
    }
}

impl<S: PointerListenerScope> Drop for ListenerLease<S> {
    fn drop(&mut self) {
        self.release();
    }
}
