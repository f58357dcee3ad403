//! Magazine entity and magazine-centric relationship views.
//!
//! # Responsibility
//! - Validate and register magazines; re-validate name/category on every set.
//! - Derive article, contributor and publisher views from the article registry.
//!
//! # Invariants
//! - `name` stays within `2..=16` characters; `category` stays non-empty.
//! - A rejected setter leaves the previous value in place.
//! - `top_publisher` ties resolve to the earliest-registered magazine.

use crate::model::article::Article;
use crate::model::author::{Author, AuthorId};
use crate::model::validation::{validate_category, validate_magazine_name, ValidationResult};
use crate::model::{read_field, write_field};
use crate::registry;
use log::debug;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Stable identifier assigned to every magazine at construction.
pub type MagazineId = Uuid;

/// An author needs strictly more articles than this in one magazine to count
/// as a contributing author.
pub const CONTRIBUTING_AUTHOR_MIN_ARTICLES: usize = 2;

/// Shared handle to one registered magazine.
#[derive(Debug, Clone)]
pub struct Magazine {
    inner: Arc<MagazineInner>,
}

#[derive(Debug)]
struct MagazineInner {
    id: MagazineId,
    name: RwLock<String>,
    category: RwLock<String>,
}

/// Serializable view of one magazine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MagazineRecord {
    pub id: MagazineId,
    pub name: String,
    pub category: String,
}

impl Magazine {
    /// Validates `name` and `category` and registers a new magazine.
    ///
    /// # Errors
    /// - `MagazineNameLength` when `name` is outside `2..=16` characters.
    /// - `EmptyCategory` when `category` is empty.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> ValidationResult<Self> {
        let name = name.into();
        let category = category.into();
        validate_magazine_name(&name)
            .and_then(|()| validate_category(&category))
            .inspect_err(|err| {
                debug!("event=magazine_register module=magazine status=rejected reason=\"{err}\"");
            })?;

        let magazine = Self {
            inner: Arc::new(MagazineInner {
                id: Uuid::new_v4(),
                name: RwLock::new(name),
                category: RwLock::new(category),
            }),
        };
        registry::write(|registry| registry.magazines.push(magazine.clone()));
        debug!(
            "event=magazine_register module=magazine status=ok magazine_id={}",
            magazine.id()
        );
        Ok(magazine)
    }

    /// Every registered magazine, in construction order.
    pub fn all() -> Vec<Magazine> {
        registry::read(|registry| registry.magazines.clone())
    }

    /// Identity of this magazine; equal ids mean the same magazine.
    pub fn id(&self) -> MagazineId {
        self.inner.id
    }

    /// Current name.
    pub fn name(&self) -> String {
        read_field(&self.inner.name).clone()
    }

    /// Replaces the name; an invalid value leaves the current name in place.
    pub fn set_name(&self, name: impl Into<String>) -> ValidationResult<()> {
        let name = name.into();
        validate_magazine_name(&name).inspect_err(|err| {
            debug!(
                "event=magazine_set_name module=magazine status=rejected magazine_id={} reason=\"{err}\"",
                self.id()
            );
        })?;
        *write_field(&self.inner.name) = name;
        debug!(
            "event=magazine_set_name module=magazine status=ok magazine_id={}",
            self.id()
        );
        Ok(())
    }

    /// Current category.
    pub fn category(&self) -> String {
        read_field(&self.inner.category).clone()
    }

    /// Replaces the category; an empty value leaves the current one in place.
    pub fn set_category(&self, category: impl Into<String>) -> ValidationResult<()> {
        let category = category.into();
        validate_category(&category).inspect_err(|err| {
            debug!(
                "event=magazine_set_category module=magazine status=rejected magazine_id={} reason=\"{err}\"",
                self.id()
            );
        })?;
        *write_field(&self.inner.category) = category;
        debug!(
            "event=magazine_set_category module=magazine status=ok magazine_id={}",
            self.id()
        );
        Ok(())
    }

    /// Articles currently published in this magazine, in registry order.
    pub fn articles(&self) -> Vec<Article> {
        registry::read(|registry| {
            registry
                .articles
                .iter()
                .filter(|article| article.is_published_in(self))
                .cloned()
                .collect()
        })
    }

    /// Distinct authors with at least one article here, in order of first
    /// appearance.
    pub fn contributors(&self) -> Vec<Author> {
        distinct_authors(&self.articles())
    }

    /// Titles of this magazine's articles, or `None` when it has none.
    pub fn article_titles(&self) -> Option<Vec<String>> {
        let articles = self.articles();
        if articles.is_empty() {
            return None;
        }
        Some(
            articles
                .iter()
                .map(|article| article.title().to_string())
                .collect(),
        )
    }

    /// Authors with more than `CONTRIBUTING_AUTHOR_MIN_ARTICLES` articles
    /// here, or `None` when nobody qualifies.
    pub fn contributing_authors(&self) -> Option<Vec<Author>> {
        let articles = self.articles();
        let mut counts: HashMap<AuthorId, usize> = HashMap::new();
        for article in &articles {
            *counts.entry(article.author().id()).or_default() += 1;
        }

        let prolific: Vec<Author> = distinct_authors(&articles)
            .into_iter()
            .filter(|author| {
                counts.get(&author.id()).copied().unwrap_or_default()
                    > CONTRIBUTING_AUTHOR_MIN_ARTICLES
            })
            .collect();

        if prolific.is_empty() {
            None
        } else {
            Some(prolific)
        }
    }

    /// The magazine with the most articles across the whole registry.
    ///
    /// Returns `None` when no article exists. Among magazines sharing the
    /// highest count, the earliest-registered one wins.
    pub fn top_publisher() -> Option<Magazine> {
        registry::read(|registry| {
            let mut counts: HashMap<MagazineId, usize> = HashMap::new();
            for article in &registry.articles {
                *counts.entry(article.magazine().id()).or_default() += 1;
            }

            let mut top: Option<(&Magazine, usize)> = None;
            for magazine in &registry.magazines {
                let count = counts.get(&magazine.id()).copied().unwrap_or_default();
                let is_better = match top {
                    Some((_, best)) => count > best,
                    None => count > 0,
                };
                if is_better {
                    top = Some((magazine, count));
                }
            }
            top.map(|(magazine, _)| magazine.clone())
        })
    }

    /// Serializable copy of this magazine's current fields.
    pub fn to_record(&self) -> MagazineRecord {
        MagazineRecord {
            id: self.id(),
            name: self.name(),
            category: self.category(),
        }
    }
}

impl PartialEq for Magazine {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Magazine {}

impl Hash for Magazine {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

fn distinct_authors(articles: &[Article]) -> Vec<Author> {
    let mut seen = HashSet::new();
    articles
        .iter()
        .map(Article::author)
        .filter(|author| seen.insert(author.id()))
        .collect()
}
