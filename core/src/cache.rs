//! Load-once cache for reference catalogs.
//!
//! The mutex is held for the whole load, so concurrent first callers wait
//! on a single in-flight load instead of racing. A failed load installs
//! nothing; the next call tries again.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::FakerResult;

pub(crate) struct LoadOnce<D> {
    name: &'static str,
    slot: Mutex<Option<Arc<D>>>,
}

impl<D> LoadOnce<D> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<D>>> {
        // The slot only ever holds a complete value or None, so a poisoned
        // lock still guards consistent state.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn get_or_load<F>(&self, load: F) -> FakerResult<Arc<D>>
    where
        F: FnOnce() -> FakerResult<D>,
    {
        let mut slot = self.lock();
        if let Some(data) = slot.as_ref() {
            return Ok(Arc::clone(data));
        }

        match load() {
            Ok(data) => {
                let data = Arc::new(data);
                *slot = Some(Arc::clone(&data));
                log::debug!("{}: reference data loaded", self.name);
                Ok(data)
            }
            Err(e) => {
                log::warn!("{}: reference data failed to load: {e}", self.name);
                Err(e)
            }
        }
    }

    pub(crate) fn clear(&self) {
        if self.lock().take().is_some() {
            log::debug!("{}: cache cleared", self.name);
        }
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.lock().is_some()
    }
}
