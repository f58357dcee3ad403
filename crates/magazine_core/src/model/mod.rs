//! Entity model for the author/magazine/article graph.
//!
//! # Responsibility
//! - Define the three entity handles and their serializable records.
//! - Centralize field validation rules.
//!
//! # Invariants
//! - Every entity is validated before it is registered.
//! - Entity equality is identity (generated id), never field equality.
//! - Relationships are stored only on `Article`; every other view is derived.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub mod article;
pub mod author;
pub mod magazine;
pub mod validation;

/// Shared access to a mutable entity field.
///
/// A poisoned lock still holds a validated value, so it is read through.
pub(crate) fn read_field<T>(field: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    field.read().unwrap_or_else(PoisonError::into_inner)
}

/// Exclusive access to a mutable entity field.
pub(crate) fn write_field<T>(field: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    field.write().unwrap_or_else(PoisonError::into_inner)
}
