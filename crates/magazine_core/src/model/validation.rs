//! Field rules shared by all entity constructors and setters.
//!
//! # Invariants
//! - Lengths are counted in characters (Unicode scalar values), not bytes.
//! - Every check is pure; callers decide whether to register or assign.

use crate::model::article::ArticleId;
use crate::model::author::AuthorId;
use crate::model::magazine::MagazineId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum author name length.
pub const AUTHOR_NAME_MIN_CHARS: usize = 1;
/// Shortest allowed magazine name (inclusive).
pub const MAGAZINE_NAME_MIN_CHARS: usize = 2;
/// Longest allowed magazine name (inclusive).
pub const MAGAZINE_NAME_MAX_CHARS: usize = 16;
/// Minimum magazine category length.
pub const CATEGORY_MIN_CHARS: usize = 1;
/// Shortest allowed article title (inclusive).
pub const TITLE_MIN_CHARS: usize = 5;
/// Longest allowed article title (inclusive).
pub const TITLE_MAX_CHARS: usize = 50;

/// Result alias for every validating constructor and setter.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rule violations raised by entity constructors and setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Author name is empty.
    EmptyAuthorName,
    /// Magazine name length is outside `2..=16`.
    MagazineNameLength { chars: usize },
    /// Magazine category is empty.
    EmptyCategory,
    /// Article title length is outside `5..=50`.
    TitleLength { chars: usize },
    /// Author handle is not a member of the current registry.
    UnregisteredAuthor(AuthorId),
    /// Magazine handle is not a member of the current registry.
    UnregisteredMagazine(MagazineId),
    /// Article handle is not a member of the current registry.
    UnregisteredArticle(ArticleId),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAuthorName => write!(f, "author name must not be empty"),
            Self::MagazineNameLength { chars } => write!(
                f,
                "magazine name must be {MAGAZINE_NAME_MIN_CHARS}..={MAGAZINE_NAME_MAX_CHARS} characters, got {chars}"
            ),
            Self::EmptyCategory => write!(f, "magazine category must not be empty"),
            Self::TitleLength { chars } => write!(
                f,
                "article title must be {TITLE_MIN_CHARS}..={TITLE_MAX_CHARS} characters, got {chars}"
            ),
            Self::UnregisteredAuthor(id) => write!(f, "author is not registered: {id}"),
            Self::UnregisteredMagazine(id) => write!(f, "magazine is not registered: {id}"),
            Self::UnregisteredArticle(id) => write!(f, "article is not registered: {id}"),
        }
    }
}

impl Error for ValidationError {}

/// Rejects an empty author name.
pub fn validate_author_name(name: &str) -> ValidationResult<()> {
    if char_len(name) < AUTHOR_NAME_MIN_CHARS {
        return Err(ValidationError::EmptyAuthorName);
    }
    Ok(())
}

/// Rejects magazine names outside `2..=16` characters.
pub fn validate_magazine_name(name: &str) -> ValidationResult<()> {
    let chars = char_len(name);
    if !(MAGAZINE_NAME_MIN_CHARS..=MAGAZINE_NAME_MAX_CHARS).contains(&chars) {
        return Err(ValidationError::MagazineNameLength { chars });
    }
    Ok(())
}

/// Rejects an empty magazine category.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    if char_len(category) < CATEGORY_MIN_CHARS {
        return Err(ValidationError::EmptyCategory);
    }
    Ok(())
}

/// Rejects article titles outside `5..=50` characters.
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let chars = char_len(title);
    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&chars) {
        return Err(ValidationError::TitleLength { chars });
    }
    Ok(())
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}
