//! Swappable container handle
//!
//! Routes and the authentication fairing load the container through this
//! handle on every request, so a rebuilt container replaces the old one for
//! all routes at once.

use std::sync::Arc;

use arc_swap::ArcSwap;
use charisma_infrastructure::di::Container;

/// Shared handle to the current container
#[derive(Clone)]
pub struct ContainerHandle {
    current: Arc<ArcSwap<Container>>,
}

impl ContainerHandle {
    /// Wrap a built container
    pub fn new(container: Arc<Container>) -> Self {
        Self {
            current: Arc::new(ArcSwap::new(container)),
        }
    }

    /// The current container
    pub fn load(&self) -> Arc<Container> {
        self.current.load_full()
    }

    /// Replace the container, returning the previous one
    ///
    /// The previous container is not torn down; the caller decides when.
    pub fn swap(&self, container: Arc<Container>) -> Arc<Container> {
        self.current.swap(container)
    }
}

impl std::fmt::Debug for ContainerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ContainerHandle")
            .field(&*self.current.load())
            .finish()
    }
}
