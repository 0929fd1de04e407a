//! Hyphenation and typographic correction for plain text and HTML
//!
//! The crate combines Liang-style pattern hyphenation with a fixed pipeline
//! of typographic corrections (curly quotes, dashes, ellipses, spacing,
//! paragraph markup). Both passes understand HTML well enough to leave tags,
//! comments and elements such as `<pre>` untouched.
//!
//! # Architecture
//!
//! - **language**: per-language pattern data, its sources and the shared
//!   [`PatternRegistry`] cache
//! - **hyphenation**: gap scoring, the word hyphenator and the text pass
//! - **markup**: the tokenizer both passes walk the input with
//! - **correction**: the regex-driven correction pipeline
//! - **api**: the [`Typographer`] facade
//!
//! # Example
//!
//! ```rust
//! use typokit_core::{HyphenationOptions, Typographer};
//!
//! let typographer = Typographer::builder()
//!     .hyphenation(HyphenationOptions::builder().hyphen("-").build().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let text = typographer.correct("\"Hello\" -- she said...");
//! assert_eq!(text, "&ldquo;Hello&rdquo; &mdash; she said&hellip;");
//!
//! let word = typographer.hyphenate_word("associate", "en").unwrap();
//! assert_eq!(word, "as-so-ciate");
//! ```

pub mod api;
pub mod binding;
pub mod correction;
pub mod error;
pub mod hyphenation;
pub mod language;
pub mod markup;

pub use api::{
    Config, ConfigBuilder, Input, Markup, Mode, Output, ProcessingMetadata, ProcessingStats,
    Typographer, TypographerBuilder,
};
pub use binding::bind_words;
pub use correction::{CorrectionOptions, Corrector};
pub use error::{Error, Result};
pub use hyphenation::{
    hyphenate_word, score_positions, HyphenationOptions, Hyphenator, WordHyphenator,
};
pub use language::{
    DirectorySource, EmbeddedSource, LanguageData, MemorySource, PatternRegistry, PatternSet,
    PatternSource,
};
pub use markup::{Token, Tokenizer};
