//! Poison recovery extension traits for std::sync locks
//!
//! A panicking change listener must not make the store unusable, so lock
//! poisoning is logged and the guard recovered.

use crate::error::Result;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Extension trait for RwLock with poison recovery
pub trait RwLockExt<T> {
    /// Acquire a read lock, recovering from poison errors
    fn read_recovered(&self) -> Result<RwLockReadGuard<'_, T>>;

    /// Acquire a write lock, recovering from poison errors
    fn write_recovered(&self) -> Result<RwLockWriteGuard<'_, T>>;
}

impl<T> RwLockExt<T> for RwLock<T> {
    fn read_recovered(&self) -> Result<RwLockReadGuard<'_, T>> {
        match self.read() {
            Ok(guard) => Ok(guard),
            Err(poisoned) => {
                log::warn!("Listener lock was poisoned (read), recovering");
                Ok(poisoned.into_inner())
            }
        }
    }

    fn write_recovered(&self) -> Result<RwLockWriteGuard<'_, T>> {
        match self.write() {
            Ok(guard) => Ok(guard),
            Err(poisoned) => {
                log::warn!("Listener lock was poisoned (write), recovering");
                Ok(poisoned.into_inner())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_recovers_after_panic_while_holding_write_lock() {
        let lock = Arc::new(RwLock::new(vec![1]));
        let cloned = lock.clone();

        let _ = std::thread::spawn(move || {
            let _guard = cloned.write().unwrap();
            panic!("listener blew up");
        })
        .join();

        assert!(lock.is_poisoned());
        lock.write_recovered().unwrap().push(2);
        assert_eq!(*lock.read_recovered().unwrap(), vec![1, 2]);
    }
}
