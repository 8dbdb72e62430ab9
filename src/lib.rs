//! satchel — a general-purpose utility toolkit.
//!
//! Subsystems: a key/value [`cache`] with pluggable backends, pattern-keyed
//! [`path_access`] containers with fuzzy suggestions, a nested [`tree`]
//! container with dot-path access, CLI [`table`] rendering, [`locale`]
//! catalogs, [`csv`] and [`xml`] parsing helpers, [`text`] and [`numeric`]
//! utilities, and a typed [`repository`] over the cache.

pub mod cache;
pub mod cli;
pub mod config;
pub mod csv;
pub mod locale;
pub mod numeric;
pub mod path_access;
pub mod repository;
pub mod table;
pub mod text;
pub mod tree;
pub mod xml;

pub use cache::{Cache, CacheBackend, FileBackend, MemoryBackend};
pub use config::ToolkitConfig;
pub use path_access::{Container, PathPattern};
pub use repository::{Entity, Repository};
pub use table::Table;
pub use tree::Tree;
