//! Core domain logic for the author/magazine/article relationship graph.
//! Entities validate on construction and on every setter; relationship views
//! are derived from the article registry at call time.

pub mod logging;
pub mod model;
pub mod registry;

pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingConfig};
pub use model::article::{Article, ArticleId, ArticleRecord};
pub use model::author::{Author, AuthorId, AuthorRecord};
pub use model::magazine::{
    Magazine, MagazineId, MagazineRecord, CONTRIBUTING_AUTHOR_MIN_ARTICLES,
};
pub use model::validation::{ValidationError, ValidationResult};
pub use registry::{
    registry_snapshot, registry_stats, reset_registries, RegistrySnapshot, RegistryStats,
};
