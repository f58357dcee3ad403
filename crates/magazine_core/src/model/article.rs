//! Article join entity.
//!
//! # Responsibility
//! - Relate exactly one author to exactly one magazine under a fixed title.
//! - Re-check liveness whenever the author or magazine is reassigned.
//!
//! # Invariants
//! - `title` is `5..=50` characters and never changes after construction.
//! - `author` and `magazine` always point at handles that were live when set.
//! - Only a live article accepts reassignment; an article dropped from the
//!   registry by a reset keeps its last references.

use crate::model::author::{Author, AuthorId};
use crate::model::magazine::{Magazine, MagazineId};
use crate::model::validation::{validate_title, ValidationResult};
use crate::model::{read_field, write_field};
use crate::registry;
use log::debug;
use serde::Serialize;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Stable identifier assigned to every article at construction.
pub type ArticleId = Uuid;

/// Shared handle to one registered article.
#[derive(Debug, Clone)]
pub struct Article {
    inner: Arc<ArticleInner>,
}

#[derive(Debug)]
struct ArticleInner {
    id: ArticleId,
    title: String,
    author: RwLock<Author>,
    magazine: RwLock<Magazine>,
}

/// Serializable view of one article; references are stored by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
    pub id: ArticleId,
    pub title: String,
    pub author_id: AuthorId,
    pub magazine_id: MagazineId,
}

impl Article {
    /// Validates the references and title, then registers a new article.
    ///
    /// Checks run in order author, magazine, title; the first failure wins and
    /// nothing is registered.
    ///
    /// # Errors
    /// - `UnregisteredAuthor` / `UnregisteredMagazine` for stale handles.
    /// - `TitleLength` when `title` is outside `5..=50` characters.
    pub fn new(
        author: &Author,
        magazine: &Magazine,
        title: impl Into<String>,
    ) -> ValidationResult<Self> {
        let title = title.into();
        let article = registry::write(|registry| -> ValidationResult<Self> {
            registry.ensure_author(author)?;
            registry.ensure_magazine(magazine)?;
            validate_title(&title)?;

            let article = Self {
                inner: Arc::new(ArticleInner {
                    id: Uuid::new_v4(),
                    title,
                    author: RwLock::new(author.clone()),
                    magazine: RwLock::new(magazine.clone()),
                }),
            };
            registry.articles.push(article.clone());
            Ok(article)
        })
        .inspect_err(|err| {
            debug!("event=article_register module=article status=rejected reason=\"{err}\"");
        })?;

        debug!(
            "event=article_register module=article status=ok article_id={} author_id={} magazine_id={}",
            article.id(),
            author.id(),
            magazine.id()
        );
        Ok(article)
    }

    /// Every registered article, in construction order.
    pub fn all() -> Vec<Article> {
        registry::read(|registry| registry.articles.clone())
    }

    /// Identity of this article; equal ids mean the same article.
    pub fn id(&self) -> ArticleId {
        self.inner.id
    }

    /// Title given at construction.
    pub fn title(&self) -> &str {
        &self.inner.title
    }

    /// Current author.
    pub fn author(&self) -> Author {
        read_field(&self.inner.author).clone()
    }

    /// Reassigns the author.
    ///
    /// # Errors
    /// - `UnregisteredArticle` when this article is not live.
    /// - `UnregisteredAuthor` when `author` is not live.
    ///
    /// On error the current author is kept.
    pub fn set_author(&self, author: &Author) -> ValidationResult<()> {
        registry::read(|registry| -> ValidationResult<()> {
            registry.ensure_article(self)?;
            registry.ensure_author(author)?;
            *write_field(&self.inner.author) = author.clone();
            Ok(())
        })
        .inspect_err(|err| {
            debug!(
                "event=article_set_author module=article status=rejected article_id={} reason=\"{err}\"",
                self.id()
            );
        })?;
        debug!(
            "event=article_set_author module=article status=ok article_id={} author_id={}",
            self.id(),
            author.id()
        );
        Ok(())
    }

    /// Current magazine.
    pub fn magazine(&self) -> Magazine {
        read_field(&self.inner.magazine).clone()
    }

    /// Reassigns the magazine.
    ///
    /// # Errors
    /// - `UnregisteredArticle` when this article is not live.
    /// - `UnregisteredMagazine` when `magazine` is not live.
    ///
    /// On error the current magazine is kept.
    pub fn set_magazine(&self, magazine: &Magazine) -> ValidationResult<()> {
        registry::read(|registry| -> ValidationResult<()> {
            registry.ensure_article(self)?;
            registry.ensure_magazine(magazine)?;
            *write_field(&self.inner.magazine) = magazine.clone();
            Ok(())
        })
        .inspect_err(|err| {
            debug!(
                "event=article_set_magazine module=article status=rejected article_id={} reason=\"{err}\"",
                self.id()
            );
        })?;
        debug!(
            "event=article_set_magazine module=article status=ok article_id={} magazine_id={}",
            self.id(),
            magazine.id()
        );
        Ok(())
    }

    /// Whether `author` is the current author, by identity.
    pub fn is_written_by(&self, author: &Author) -> bool {
        *read_field(&self.inner.author) == *author
    }

    /// Whether `magazine` is the current magazine, by identity.
    pub fn is_published_in(&self, magazine: &Magazine) -> bool {
        *read_field(&self.inner.magazine) == *magazine
    }

    /// Serializable copy of this article with its current reference ids.
    pub fn to_record(&self) -> ArticleRecord {
        ArticleRecord {
            id: self.id(),
            title: self.inner.title.clone(),
            author_id: read_field(&self.inner.author).id(),
            magazine_id: read_field(&self.inner.magazine).id(),
        }
    }
}

impl PartialEq for Article {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Article {}

impl Hash for Article {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}
