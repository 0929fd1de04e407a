//! High-level API
//!
//! [`Typographer`] bundles a shared [`PatternRegistry`](crate::PatternRegistry),
//! the corrector and the hyphenator behind one `Send + Sync` object that
//! both the CLI and embedding applications use.

mod config;
mod input;
mod output;
mod processor;


pub use config::{defaults, Config, ConfigBuilder, Markup, Mode};
pub use input::Input;
pub use output::{Output, ProcessingMetadata, ProcessingStats};
pub use processor::{Typographer, TypographerBuilder};
