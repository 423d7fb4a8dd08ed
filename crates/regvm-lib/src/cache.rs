//! Compiled pattern cache.
//!
//! An explicitly owned LRU map from (options, culture, pattern) to a
//! compiled [`Regex`]. The lock only guards map access: compilation
//! happens outside it, and a pattern compiled twice by racing threads is
//! installed once.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use indexmap::IndexMap;
use regvm_core::{Culture, RegexOptions};

use crate::Result;
use crate::error::ArgumentError;
use crate::matches::Match;
use crate::regex::Regex;

pub const DEFAULT_CAPACITY: usize = 15;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    options: RegexOptions,
    culture: String,
    pattern: String,
}

#[derive(Debug)]
struct Lru {
    capacity: usize,
    /// Least recently used first.
    entries: IndexMap<CacheKey, Regex>,
}

impl Lru {
    fn get(&mut self, key: &CacheKey) -> Option<Regex> {
        let index = self.entries.get_index_of(key)?;
        let last = self.entries.len() - 1;
        self.entries.move_index(index, last);
        self.entries.get_index(last).map(|(_, regex)| regex.clone())
    }

    fn evict(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.shift_remove_index(0);
        }
    }
}

/// Pattern cache for repeated one-off matching.
///
/// ```
/// use regvm_lib::{PatternCache, RegexOptions};
///
/// let cache = PatternCache::new();
/// let words = cache.split("a, b,c", r",\s*", RegexOptions::NONE).unwrap();
/// assert_eq!(words, ["a", "b", "c"]);
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug)]
pub struct PatternCache {
    lru: Mutex<Lru>,
    culture: Culture,
    match_timeout: Option<Duration>,
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache holding at most `capacity` patterns. `0` disables caching.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lru: Mutex::new(Lru {
                capacity,
                entries: IndexMap::new(),
            }),
            culture: Culture::invariant(),
            match_timeout: None,
        }
    }

    /// Culture used by the one-off helpers.
    pub fn culture(mut self, culture: Culture) -> Self {
        self.culture = culture;
        self
    }

    /// Timeout for every regex this cache compiles.
    pub fn match_timeout(mut self, timeout: Duration) -> Self {
        self.match_timeout = Some(timeout);
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Lru> {
        self.lru.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity
    }

    /// Changes the capacity, evicting the least recently used patterns
    /// that no longer fit.
    pub fn set_capacity(&self, capacity: usize) {
        let mut lru = self.lock();
        lru.capacity = capacity;
        lru.evict();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    /// Cached patterns, least recently used first.
    pub fn patterns(&self) -> Vec<String> {
        self.lock()
            .entries
            .keys()
            .map(|key| key.pattern.clone())
            .collect()
    }

    /// Returns the cached regex for this key, compiling it on a miss.
    pub fn get_or_compile(
        &self,
        pattern: &str,
        options: RegexOptions,
        culture: &Culture,
    ) -> Result<Regex> {
        options.validate().map_err(ArgumentError::from)?;
        let culture = if options.culture_invariant() {
            Culture::invariant()
        } else {
            culture.clone()
        };
        let key = CacheKey {
            options,
            culture: culture.name().to_string(),
            pattern: pattern.to_string(),
        };

        if let Some(regex) = self.lock().get(&key) {
            return Ok(regex);
        }

        let mut builder = Regex::builder(pattern).options(options).culture(culture);
        if let Some(timeout) = self.match_timeout {
            builder = builder.match_timeout(timeout);
        }
        let regex = builder.build()?;

        let mut lru = self.lock();
        if lru.capacity == 0 {
            return Ok(regex);
        }
        if let Some(existing) = lru.get(&key) {
            return Ok(existing);
        }
        lru.entries.insert(key, regex.clone());
        lru.evict();
        Ok(regex)
    }

    fn regex(&self, pattern: &str, options: RegexOptions) -> Result<Regex> {
        self.get_or_compile(pattern, options, &self.culture)
    }

    pub fn is_match(&self, text: &str, pattern: &str, options: RegexOptions) -> Result<bool> {
        self.regex(pattern, options)?.is_match(text)
    }

    pub fn find<'t>(
        &self,
        text: &'t str,
        pattern: &str,
        options: RegexOptions,
    ) -> Result<Option<Match<'t>>> {
        self.regex(pattern, options)?.find(text)
    }

    pub fn replace(
        &self,
        text: &str,
        pattern: &str,
        template: &str,
        options: RegexOptions,
    ) -> Result<String> {
        self.regex(pattern, options)?.replace(text, template)
    }

    pub fn split<'t>(
        &self,
        text: &'t str,
        pattern: &str,
        options: RegexOptions,
    ) -> Result<Vec<&'t str>> {
        self.regex(pattern, options)?.split(text)
    }
}
