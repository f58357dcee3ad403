//! Author entity and author-centric relationship views.
//!
//! # Responsibility
//! - Validate and register authors.
//! - Derive article, magazine and topic views by scanning the article registry.
//!
//! # Invariants
//! - `name` is non-empty and never changes after construction.
//! - Identity is the generated `AuthorId`; equal names do not make equal authors.

use crate::model::article::Article;
use crate::model::magazine::Magazine;
use crate::model::validation::{validate_author_name, ValidationResult};
use crate::registry;
use log::debug;
use serde::Serialize;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

/// Stable identifier assigned to every author at construction.
pub type AuthorId = Uuid;

/// Shared handle to one registered author.
///
/// Cloning the handle does not create a new author. Handles are `Send + Sync`
/// and refer to the same process-wide registry from any thread.
#[derive(Debug, Clone)]
pub struct Author {
    inner: Arc<AuthorInner>,
}

#[derive(Debug)]
struct AuthorInner {
    id: AuthorId,
    name: String,
}

/// Serializable view of one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRecord {
    pub id: AuthorId,
    pub name: String,
}

impl Author {
    /// Validates `name` and registers a new author.
    ///
    /// # Errors
    /// - `ValidationError::EmptyAuthorName` when `name` is empty. Nothing is
    ///   registered in that case.
    pub fn new(name: impl Into<String>) -> ValidationResult<Self> {
        let name = name.into();
        validate_author_name(&name).inspect_err(|err| {
            debug!("event=author_register module=author status=rejected reason=\"{err}\"");
        })?;

        let author = Self {
            inner: Arc::new(AuthorInner {
                id: Uuid::new_v4(),
                name,
            }),
        };
        registry::write(|registry| registry.authors.push(author.clone()));
        debug!(
            "event=author_register module=author status=ok author_id={}",
            author.id()
        );
        Ok(author)
    }

    /// Every registered author, in construction order.
    pub fn all() -> Vec<Author> {
        registry::read(|registry| registry.authors.clone())
    }

    /// Identity of this author; equal ids mean the same author.
    pub fn id(&self) -> AuthorId {
        self.inner.id
    }

    /// Name given at construction.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Articles currently attributed to this author, in registry order.
    pub fn articles(&self) -> Vec<Article> {
        registry::read(|registry| {
            registry
                .articles
                .iter()
                .filter(|article| article.is_written_by(self))
                .cloned()
                .collect()
        })
    }

    /// Distinct magazines this author has articles in, in order of first
    /// appearance.
    pub fn magazines(&self) -> Vec<Magazine> {
        let mut seen = HashSet::new();
        self.articles()
            .iter()
            .map(Article::magazine)
            .filter(|magazine| seen.insert(magazine.id()))
            .collect()
    }

    /// Creates and registers an article by this author.
    ///
    /// # Errors
    /// - `UnregisteredMagazine` when `magazine` is not live.
    /// - Any error from `Article::new` otherwise.
    pub fn add_article(
        &self,
        magazine: &Magazine,
        title: impl Into<String>,
    ) -> ValidationResult<Article> {
        registry::read(|registry| registry.ensure_magazine(magazine))?;
        Article::new(self, magazine, title)
    }

    /// Distinct categories across this author's magazines.
    ///
    /// Returns `None` when the author has no articles, so callers can tell
    /// "no data" apart from an empty set.
    pub fn topic_areas(&self) -> Option<Vec<String>> {
        let magazines = self.magazines();
        if magazines.is_empty() {
            return None;
        }

        let mut seen = HashSet::new();
        Some(
            magazines
                .iter()
                .map(Magazine::category)
                .filter(|category| seen.insert(category.clone()))
                .collect(),
        )
    }

    /// Serializable copy of this author.
    pub fn to_record(&self) -> AuthorRecord {
        AuthorRecord {
            id: self.id(),
            name: self.inner.name.clone(),
        }
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Author {}

impl Hash for Author {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}
