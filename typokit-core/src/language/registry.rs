//! Process-wide pattern registry
//!
//! One registry is built at start-up and shared by `Arc`. Each language is
//! compiled at most once: callers asking for the same code wait on that
//! code's cell, callers asking for other codes proceed independently. The
//! map lock is only held to find or insert a cell, never while loading.
//! A code answered by one of its fallbacks is remembered as an alias, so
//! later lookups skip the sources entirely.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::language::loader::{DirectorySource, EmbeddedSource, MemorySource, PatternSource};
use crate::language::patterns::PatternSet;

type Slot = Arc<OnceCell<Arc<PatternSet>>>;

/// Lazily populated, read-mostly cache of compiled pattern sets
pub struct PatternRegistry {
    sources: Vec<Box<dyn PatternSource>>,
    slots: RwLock<HashMap<String, Slot>>,
    aliases: RwLock<HashMap<String, Arc<PatternSet>>>,
}

impl std::fmt::Debug for PatternRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<String> = self.sources.iter().map(|s| s.label()).collect();
        f.debug_struct("PatternRegistry")
            .field("sources", &labels)
            .field("loaded", &self.loaded_languages())
            .finish()
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::with_embedded()
    }
}

impl PatternRegistry {
    /// Registry over the built-in data only
    pub fn with_embedded() -> Self {
        Self::builder().embedded().build()
    }

    pub fn builder() -> PatternRegistryBuilder {
        PatternRegistryBuilder::default()
    }

    /// Pattern set for `code`, trying fallback prefixes (`cs_CZ` -> `cs`)
    pub fn get(&self, code: &str) -> Result<Arc<PatternSet>> {
        if let Some(set) = self.aliases.read().get(code) {
            log::trace!("pattern alias hit for '{code}'");
            return Ok(Arc::clone(set));
        }

        for candidate in fallback_chain(code) {
            match self.get_exact(&candidate) {
                Ok(set) => {
                    if candidate != code {
                        log::debug!("language '{code}' resolved to '{candidate}'");
                        self.aliases
                            .write()
                            .insert(code.to_string(), Arc::clone(&set));
                    }
                    return Ok(set);
                }
                Err(Error::DataNotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(Error::DataNotFound {
            code: code.to_string(),
        })
    }

    fn get_exact(&self, code: &str) -> Result<Arc<PatternSet>> {
        let slot = self.slot(code);
        if let Some(set) = slot.get() {
            log::trace!("pattern cache hit for '{code}'");
            return Ok(Arc::clone(set));
        }

        let result = slot.get_or_try_init(|| self.load(code)).map(Arc::clone);
        if matches!(result, Err(Error::DataNotFound { .. })) {
            self.discard_empty_slot(code);
        }
        result
    }

    fn slot(&self, code: &str) -> Slot {
        if let Some(slot) = self.slots.read().get(code) {
            return Arc::clone(slot);
        }
        let mut slots = self.slots.write();
        Arc::clone(slots.entry(code.to_string()).or_default())
    }

    fn discard_empty_slot(&self, code: &str) {
        let mut slots = self.slots.write();
        if slots.get(code).is_some_and(|slot| slot.get().is_none()) {
            slots.remove(code);
        }
    }

    fn load(&self, code: &str) -> Result<Arc<PatternSet>> {
        for source in &self.sources {
            if let Some(data) = source.load(code)? {
                let set = PatternSet::from_data(code, data)?;
                log::debug!(
                    "loaded pattern set '{}' from {} ({} patterns, {} exceptions)",
                    code,
                    source.label(),
                    set.pattern_count(),
                    set.exception_count()
                );
                return Ok(Arc::new(set));
            }
        }
        Err(Error::DataNotFound {
            code: code.to_string(),
        })
    }

    /// Whether `code` has been compiled already
    pub fn is_loaded(&self, code: &str) -> bool {
        self.slots
            .read()
            .get(code)
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Codes currently held in the cache
    pub fn loaded_languages(&self) -> Vec<String> {
        let mut codes: Vec<String> = self
            .slots
            .read()
            .iter()
            .filter(|(_, slot)| slot.get().is_some())
            .map(|(code, _)| code.clone())
            .collect();
        codes.sort();
        codes
    }

    /// Codes any source can provide
    pub fn available_languages(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.sources.iter().flat_map(|s| s.languages()).collect();
        codes.sort();
        codes.dedup();
        codes
    }
}

/// `sr_Latn_RS` -> `["sr_Latn_RS", "sr_latn_rs", "sr_Latn", "sr_latn", "sr"]`
pub(crate) fn fallback_chain(code: &str) -> Vec<String> {
    let code = code.trim();
    let mut chain: Vec<String> = Vec::new();
    let mut current = code;

    while !current.is_empty() {
        chain.push(current.to_string());
        let lower = current.to_lowercase();
        if lower != current {
            chain.push(lower);
        }
        match current.rfind(['_', '-']) {
            Some(idx) => current = &current[..idx],
            None => break,
        }
    }
    chain
}

/// Builder collecting sources in lookup order
#[derive(Default)]
pub struct PatternRegistryBuilder {
    sources: Vec<Box<dyn PatternSource>>,
}

impl PatternRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add any source
    pub fn source(mut self, source: impl PatternSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Add the built-in data
    pub fn embedded(self) -> Self {
        self.source(EmbeddedSource)
    }

    /// Add a directory of `<code>.toml` / `<code>.json` files
    pub fn directory(self, root: impl Into<PathBuf>) -> Self {
        self.source(DirectorySource::new(root))
    }

    /// Add in-memory data
    pub fn memory(self, source: MemorySource) -> Self {
        self.source(source)
    }

    pub fn build(self) -> PatternRegistry {
        PatternRegistry {
            sources: self.sources,
            slots: RwLock::new(HashMap::new()),
            aliases: RwLock::new(HashMap::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::config::LanguageData;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    struct CountingSource {
        loads: Arc<AtomicUsize>,
        delay: Duration,
    }

    impl PatternSource for CountingSource {
        fn label(&self) -> String {
            "counting".into()
        }

        fn load(&self, code: &str) -> Result<Option<LanguageData>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if code != "xx" {
                return Ok(None);
            }
            thread::sleep(self.delay);
            Ok(Some(LanguageData::new("xx").with_pattern("ab", "010")))
        }

        fn languages(&self) -> Vec<String> {
            vec!["xx".into()]
        }
    }

    #[test]
    fn test_fallback_chain() {
        assert_eq!(fallback_chain("cs_CZ"), vec!["cs_CZ", "cs_cz", "cs"]);
        assert_eq!(fallback_chain("en-GB"), vec!["en-GB", "en-gb", "en"]);
        assert_eq!(
            fallback_chain("sr_Latn_RS"),
            vec!["sr_Latn_RS", "sr_latn_rs", "sr_Latn", "sr_latn", "sr"]
        );
        assert_eq!(fallback_chain("EN"), vec!["EN", "en"]);
        assert_eq!(fallback_chain("en"), vec!["en"]);
        assert!(fallback_chain("").is_empty());
    }

    #[test]
    fn test_get_embedded_english() {
        let registry = PatternRegistry::with_embedded();
        let set = registry.get("en").unwrap();
        assert_eq!(set.code(), "en");
        assert!(set.pattern_count() > 0);
        assert!(registry.is_loaded("en"));
    }

    #[test]
    fn test_get_falls_back_to_prefix() {
        let registry = PatternRegistry::with_embedded();
        let set = registry.get("en_US").unwrap();
        assert_eq!(set.code(), "en");
        assert!(!registry.is_loaded("en_US"));
        assert!(registry.is_loaded("en"));
    }

    #[test]
    fn test_fallback_resolution_is_cached() {
        let loads = Arc::new(AtomicUsize::new(0));
        let registry = PatternRegistry::builder()
            .source(CountingSource {
                loads: Arc::clone(&loads),
                delay: Duration::ZERO,
            })
            .build();

        let first = registry.get("xx_YY").unwrap();
        // xx_YY, xx_yy, xx
        assert_eq!(loads.load(Ordering::SeqCst), 3);

        for _ in 0..100 {
            assert!(Arc::ptr_eq(&registry.get("xx_YY").unwrap(), &first));
        }
        assert_eq!(loads.load(Ordering::SeqCst), 3);
        assert!(Arc::ptr_eq(&registry.get("xx").unwrap(), &first));
        assert!(!registry.is_loaded("xx_YY"));
        assert_eq!(registry.loaded_languages(), vec!["xx"]);
    }

    #[test]
    fn test_get_unknown_language() {
        let registry = PatternRegistry::with_embedded();
        match registry.get("cs_CZ") {
            Err(Error::DataNotFound { code }) => assert_eq!(code, "cs_CZ"),
            other => panic!("Expected DataNotFound, got {other:?}"),
        }
        assert!(registry.loaded_languages().is_empty());
    }

    #[test]
    fn test_sets_are_shared() {
        let registry = PatternRegistry::with_embedded();
        let a = registry.get("en").unwrap();
        let b = registry.get("en").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_sources_are_tried_in_order() {
        let memory = MemorySource::new().with_language(
            "en",
            LanguageData::new("en").with_pattern("zz", "010"),
        );
        let registry = PatternRegistry::builder().memory(memory).embedded().build();
        let set = registry.get("en").unwrap();
        assert_eq!(set.pattern_count(), 1);
    }

    #[test]
    fn test_concurrent_first_use_loads_once() {
        let loads = Arc::new(AtomicUsize::new(0));
        let registry = Arc::new(
            PatternRegistry::builder()
                .source(CountingSource {
                    loads: Arc::clone(&loads),
                    delay: Duration::from_millis(50),
                })
                .build(),
        );

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.get("xx").unwrap())
            })
            .collect();
        let sets: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(sets.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn test_slow_load_does_not_block_other_languages() {
        let loads = Arc::new(AtomicUsize::new(0));
        let registry = Arc::new(
            PatternRegistry::builder()
                .source(CountingSource {
                    loads: Arc::clone(&loads),
                    delay: Duration::from_millis(300),
                })
                .embedded()
                .build(),
        );

        let slow = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.get("xx").unwrap())
        };
        thread::sleep(Duration::from_millis(20));

        let started = std::time::Instant::now();
        registry.get("en").unwrap();
        assert!(started.elapsed() < Duration::from_millis(250));

        slow.join().unwrap();
    }

    #[test]
    fn test_available_languages() {
        let memory = MemorySource::new().with_language("xx", LanguageData::new("xx"));
        let registry = PatternRegistry::builder().embedded().memory(memory).build();
        assert_eq!(registry.available_languages(), vec!["en", "xx"]);
    }
}
