//! Process-wide entity registries for authors, magazines and articles.
//!
//! # Responsibility
//! - Own the append-only ordered collection of every constructed entity.
//! - Answer liveness checks used by constructors and reference setters.
//! - Expose reset, stats and snapshot helpers for callers and tests.
//!
//! # Invariants
//! - Collections only grow, except through `reset_registries()`.
//! - Insertion order is construction order and is never reshuffled.
//! - One registry per process; every thread sees the same entities. Callers
//!   that mutate from several threads serialize those calls themselves.

use crate::model::article::{Article, ArticleRecord};
use crate::model::author::{Author, AuthorRecord};
use crate::model::magazine::{Magazine, MagazineRecord};
use crate::model::validation::{ValidationError, ValidationResult};
use log::debug;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};

static REGISTRY: Lazy<Mutex<Registry>> = Lazy::new(|| Mutex::new(Registry::default()));

/// Backing store for all three entity registries.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    pub(crate) authors: Vec<Author>,
    pub(crate) magazines: Vec<Magazine>,
    pub(crate) articles: Vec<Article>,
}

impl Registry {
    pub(crate) fn ensure_author(&self, author: &Author) -> ValidationResult<()> {
        if self.authors.iter().any(|candidate| candidate == author) {
            Ok(())
        } else {
            Err(ValidationError::UnregisteredAuthor(author.id()))
        }
    }

    pub(crate) fn ensure_magazine(&self, magazine: &Magazine) -> ValidationResult<()> {
        if self.magazines.iter().any(|candidate| candidate == magazine) {
            Ok(())
        } else {
            Err(ValidationError::UnregisteredMagazine(magazine.id()))
        }
    }

    pub(crate) fn ensure_article(&self, article: &Article) -> ValidationResult<()> {
        if self.articles.iter().any(|candidate| candidate == article) {
            Ok(())
        } else {
            Err(ValidationError::UnregisteredArticle(article.id()))
        }
    }

    fn stats(&self) -> RegistryStats {
        RegistryStats {
            authors: self.authors.len(),
            magazines: self.magazines.len(),
            articles: self.articles.len(),
        }
    }
}

fn lock() -> MutexGuard<'static, Registry> {
    // Writes are single pushes or a full reset, so a poisoned registry is
    // still consistent.
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs `f` with shared access to the registry.
///
/// `f` must not call back into `read` or `write`.
pub(crate) fn read<T>(f: impl FnOnce(&Registry) -> T) -> T {
    f(&lock())
}

/// Runs `f` with exclusive access to the registry.
///
/// `f` must not call back into `read` or `write`.
pub(crate) fn write<T>(f: impl FnOnce(&mut Registry) -> T) -> T {
    f(&mut lock())
}

/// Entity counts per registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub authors: usize,
    pub magazines: usize,
    pub articles: usize,
}

/// Point-in-time copy of every registered entity, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrySnapshot {
    pub authors: Vec<AuthorRecord>,
    pub magazines: Vec<MagazineRecord>,
    pub articles: Vec<ArticleRecord>,
}

/// Clears all three registries.
///
/// Handles created before the reset stay readable but are no longer live:
/// articles cannot be built from them and setters reject them.
pub fn reset_registries() {
    let stats = write(|registry| std::mem::take(registry).stats());
    debug!(
        "event=registry_reset module=registry status=ok authors={} magazines={} articles={}",
        stats.authors, stats.magazines, stats.articles
    );
}

/// Returns current registry sizes.
pub fn registry_stats() -> RegistryStats {
    read(Registry::stats)
}

/// Returns a serializable snapshot of every registered entity.
pub fn registry_snapshot() -> RegistrySnapshot {
    read(|registry| RegistrySnapshot {
        authors: registry.authors.iter().map(Author::to_record).collect(),
        magazines: registry.magazines.iter().map(Magazine::to_record).collect(),
        articles: registry.articles.iter().map(Article::to_record).collect(),
    })
}

/// Serializes unit tests that touch the shared registry and starts each one
/// from an empty registry.
#[cfg(test)]
pub(crate) fn exclusive_registry() -> MutexGuard<'static, ()> {
    static SERIAL: Mutex<()> = Mutex::new(());
    let guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
    reset_registries();
    guard
}

#[cfg(test)]
mod tests {
    use super::{
        exclusive_registry, registry_snapshot, registry_stats, reset_registries, RegistryStats,
    };
    use crate::model::article::Article;
    use crate::model::author::Author;
    use crate::model::magazine::Magazine;

    #[test]
    fn stats_track_registrations_and_reset() {
        let _registry = exclusive_registry();
        assert_eq!(registry_stats(), RegistryStats::default());

        let author = Author::new("Ama").expect("author");
        let magazine = Magazine::new("Vogue", "Fashion").expect("magazine");
        Article::new(&author, &magazine, "Spring lines").expect("article");

        assert_eq!(
            registry_stats(),
            RegistryStats {
                authors: 1,
                magazines: 1,
                articles: 1,
            }
        );

        reset_registries();
        assert_eq!(registry_stats(), RegistryStats::default());
    }

    #[test]
    fn snapshot_preserves_registry_order() {
        let _registry = exclusive_registry();
        let first = Author::new("First").expect("first author");
        let second = Author::new("Second").expect("second author");

        let snapshot = registry_snapshot();
        let ids: Vec<_> = snapshot.authors.iter().map(|record| record.id).collect();
        assert_eq!(ids, vec![first.id(), second.id()]);
        assert!(snapshot.magazines.is_empty());
        assert!(snapshot.articles.is_empty());
    }

    #[test]
    fn handles_survive_reset_but_are_no_longer_registered() {
        let _registry = exclusive_registry();
        let author = Author::new("Ama").expect("author");
        reset_registries();

        assert_eq!(author.name(), "Ama");
        assert!(Author::all().is_empty());
    }

    #[test]
    fn registrations_are_visible_from_other_threads() {
        let _registry = exclusive_registry();
        let author = Author::new("Ama").expect("author");
        let magazine = Magazine::new("Vogue", "Fashion").expect("magazine");
        Article::new(&author, &magazine, "Spring lines").expect("article");

        let (stats, top, authors) = std::thread::spawn(|| {
            (registry_stats(), Magazine::top_publisher(), Author::all())
        })
        .join()
        .expect("query thread should not panic");

        assert_eq!(
            stats,
            RegistryStats {
                authors: 1,
                magazines: 1,
                articles: 1,
            }
        );
        assert_eq!(top, Some(magazine));
        assert_eq!(authors, vec![author]);
    }
}
