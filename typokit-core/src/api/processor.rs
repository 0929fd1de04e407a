//! The [`Typographer`] facade

use std::io::Read;
use std::sync::Arc;
use std::time::Instant;

use crate::api::{
    Config, ConfigBuilder, Input, Markup, Mode, Output, ProcessingMetadata, ProcessingStats,
};
use crate::binding;
use crate::correction::{CorrectionOptions, Corrector};
use crate::error::Result;
use crate::hyphenation::{HyphenationOptions, Hyphenator};
use crate::language::{PatternRegistry, PatternSet};

/// Correction and hyphenation behind one object
///
/// Options are validated and every regex is compiled at construction, so
/// the text methods only fail when pattern data is missing or broken.
#[derive(Debug, Clone)]
pub struct Typographer {
    registry: Arc<PatternRegistry>,
    config: Config,
    hyphenator: Hyphenator,
    corrector: Corrector,
}

impl Typographer {
    /// Typographer with default options over the built-in data
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Result<Self> {
        Self::from_parts(Arc::new(PatternRegistry::with_embedded()), config)
    }

    /// Typographer whose default language is `code`
    pub fn with_language(code: impl Into<String>) -> Result<Self> {
        let config = Config::builder().language(code).build()?;
        Self::with_config(config)
    }

    pub fn builder() -> TypographerBuilder {
        TypographerBuilder::default()
    }

    fn from_parts(registry: Arc<PatternRegistry>, config: Config) -> Result<Self> {
        config.validate()?;
        let hyphenator = Hyphenator::new(config.hyphenation.clone())?;
        let corrector = Corrector::new(config.correction.clone())?;
        Ok(Self {
            registry,
            config,
            hyphenator,
            corrector,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Arc<PatternRegistry> {
        &self.registry
    }

    /// Pattern set for `lang`, loading it on first use
    pub fn patterns(&self, lang: &str) -> Result<Arc<PatternSet>> {
        self.registry.get(lang)
    }

    pub fn hyphenate(&self, text: &str, lang: &str) -> Result<String> {
        let set = self.patterns(lang)?;
        Ok(self.hyphenator.hyphenate(text, &set))
    }

    pub fn hyphenate_word(&self, word: &str, lang: &str) -> Result<String> {
        let set = self.patterns(lang)?;
        Ok(self.hyphenator.hyphenate_word(word, &set))
    }

    pub fn correct(&self, text: &str) -> String {
        self.corrector.correct(text)
    }

    pub fn correct_and_hyphenate(&self, text: &str, lang: &str) -> Result<String> {
        let set = self.patterns(lang)?;
        let corrected = self.corrector.correct(text);
        Ok(self.hyphenator.hyphenate(&corrected, &set))
    }

    /// Insert non-breaking spaces after short words of `lang`
    pub fn bind_words(&self, text: &str, lang: &str) -> Result<String> {
        let set = self.patterns(lang)?;
        let tokenizer = self.hyphenator.tokenizer();
        let is_html = tokenizer.is_html(text);
        Ok(binding::bind_tokens(
            tokenizer,
            text,
            is_html,
            &set,
            &self.config.hyphenation.nbsp,
        ))
    }

    /// Run the configured mode over `input` in the configured language
    pub fn process(&self, input: Input) -> Result<Output> {
        let start = Instant::now();
        let text = input.into_text()?;
        let mode = self.config.mode;

        // Resolve the language up front so a missing one fails before any work
        let set = if mode.hyphenates() {
            Some(self.patterns(&self.config.language)?)
        } else {
            None
        };

        let is_html = self.config.markup.is_html(|| self.corrector.is_html(&text));
        let corrected = if mode.corrects() {
            self.corrector.correct_as(&text, is_html)
        } else {
            text.clone()
        };

        let (result, word_stats) = match &set {
            Some(set) => self.hyphenator.hyphenate_as(&corrected, set, is_html),
            None => (corrected, Default::default()),
        };

        let duration = start.elapsed();
        log::debug!(
            "processed {} bytes in {:?} (mode: {mode}, html: {is_html})",
            text.len(),
            duration
        );

        Ok(Output {
            metadata: ProcessingMetadata {
                duration,
                language: set.as_ref().map(|s| s.code().to_string()),
                mode,
                is_html,
                stats: ProcessingStats {
                    bytes_in: text.len(),
                    bytes_out: result.len(),
                    words: word_stats.words,
                    words_hyphenated: word_stats.changed,
                },
            },
            text: result,
        })
    }

    /// Process input from a reader stream
    pub fn process_stream<R: Read + Send + Sync + 'static>(&self, reader: R) -> Result<Output> {
        self.process(Input::from_reader(reader))
    }
}

/// Builder assembling a [`Typographer`] from a registry and options
#[derive(Debug, Default)]
pub struct TypographerBuilder {
    registry: Option<Arc<PatternRegistry>>,
    config: ConfigBuilder,
}

impl TypographerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share an existing registry; defaults to the built-in data
    pub fn registry(mut self, registry: Arc<PatternRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.config = self.config.language(code);
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.config = self.config.mode(mode);
        self
    }

    /// Force HTML handling on or off in [`Typographer::process`]
    pub fn markup(mut self, markup: Markup) -> Self {
        self.config = self.config.markup(markup);
        self
    }

    pub fn hyphenation(mut self, options: HyphenationOptions) -> Self {
        self.config = self.config.hyphenation(options);
        self
    }

    pub fn correction(mut self, options: CorrectionOptions) -> Self {
        self.config = self.config.correction(options);
        self
    }

    pub fn build(self) -> Result<Typographer> {
        let config = self.config.build()?;
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(PatternRegistry::with_embedded()));
        Typographer::from_parts(registry, config)
    }
}
