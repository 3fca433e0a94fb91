//! Poison-tolerant lock helpers.
//!
//! The crate keeps two pieces of shared state: the process-wide
//! [`RenderConfig`](crate::config::RenderConfig) and the visual-width cache.
//! Both are safe to use after a panicking thread left them poisoned (a stale
//! cache entry or a stale config is still a valid value), so every access goes
//! through these helpers instead of `lock().unwrap()`.
//!
//! Tests should keep using `.lock().unwrap()` so poison fails fast there.

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Lock a mutex, recovering the guard if the mutex is poisoned.
#[inline]
pub fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        log::debug!("recovering poisoned mutex");
        poisoned.into_inner()
    })
}

/// Acquire a read lock, recovering the guard if the lock is poisoned.
#[inline]
pub fn read_recover<T>(rwlock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    rwlock.read().unwrap_or_else(PoisonError::into_inner)
}

/// Acquire a write lock, recovering the guard if the lock is poisoned.
#[inline]
pub fn write_recover<T>(rwlock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    rwlock.write().unwrap_or_else(|poisoned| {
        log::debug!("recovering poisoned rwlock for write");
        poisoned.into_inner()
    })
}
