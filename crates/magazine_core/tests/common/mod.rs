use magazine_core::reset_registries;
use std::sync::{Mutex, MutexGuard, PoisonError};

static SERIAL: Mutex<()> = Mutex::new(());

/// Runs one test at a time against the process-wide registry, starting empty.
pub fn exclusive_registry() -> MutexGuard<'static, ()> {
    let guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
    reset_registries();
    guard
}
