use super::Router;

use crate::error::RouterError;

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::{ArcSwap, Guard};
use tracing::{debug, warn};

/// Cloneable handle to a router that can be updated while serving.
///
/// Readers get a consistent snapshot without locking. Updates clone the
/// current snapshot, apply the change and swap the result in atomically, so
/// readers never see a partially updated route table.
#[derive(Debug)]
pub struct SharedRouter<T> {
    current: Arc<ArcSwap<Router<T>>>,
    writer: Arc<Mutex<()>>,
}

impl<T> Clone for SharedRouter<T> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
            writer: Arc::clone(&self.writer),
        }
    }
}

impl<T> From<Router<T>> for SharedRouter<T> {
    fn from(router: Router<T>) -> Self {
        Self::new(router)
    }
}

impl<T> SharedRouter<T> {
    pub fn new(router: Router<T>) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(router)),
            writer: Arc::new(Mutex::new(())),
        }
    }

    pub fn load(&self) -> Guard<Arc<Router<T>>> {
        self.current.load()
    }

    pub fn snapshot(&self) -> Arc<Router<T>> {
        self.current.load_full()
    }

    pub fn replace(&self, router: Router<T>) {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        self.current.store(Arc::new(router));
        debug!("router replaced");
    }
}

impl<T: Clone> SharedRouter<T> {
    /// Applies `f` to a copy of the current router and publishes the copy.
    ///
    /// On error the current router stays in place.
    pub fn update<F>(&self, f: F) -> Result<(), RouterError>
    where
        F: FnOnce(&mut Router<T>) -> Result<(), RouterError>,
    {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = Router::clone(&self.current.load());
        match f(&mut next) {
            Ok(()) => {
                debug!(routes = next.len(), "router updated");
                self.current.store(Arc::new(next));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "router update rejected");
                Err(e)
            }
        }
    }
}
