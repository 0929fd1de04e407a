//! Per-language hyphenation data
//!
//! Raw data ([`LanguageData`]) comes from a [`PatternSource`], is compiled
//! into an immutable [`PatternSet`], and is cached by a [`PatternRegistry`].

pub mod config;
pub mod loader;
pub mod patterns;
pub mod registry;

pub use config::{DataFormat, LanguageData, LevelSpec, Metadata};
pub use loader::{DirectorySource, EmbeddedSource, MemorySource, PatternSource};
pub use patterns::{compile_tex_pattern, Exception, Levels, PatternSet, BOUNDARY};
pub use registry::{PatternRegistry, PatternRegistryBuilder};
