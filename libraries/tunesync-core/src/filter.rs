//! Field filters and path exclusion patterns.
//!
//! Filters are parsed once at configuration time. A broken filter is a
//! hard error, never silently ignored.

use crate::error::{CoreError, Result};
use crate::song::{Song, SongField};
use regex::{Regex, RegexBuilder};
use std::str::FromStr;

/// Upper bound on the compiled size of a user pattern
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// A single `field:pattern` filter
#[derive(Debug, Clone)]
pub struct Filter {
    field: SongField,
    pattern: Regex,
}

impl Filter {
    /// Build a filter for `field` from a regex pattern
    pub fn new(field: SongField, pattern: &str) -> Result<Self> {
        let pattern = compile(pattern).map_err(|e| {
            CoreError::invalid_filter(format!("{}:{}", field, pattern), e.to_string())
        })?;

        Ok(Self { field, pattern })
    }

    /// The field this filter inspects
    pub fn field(&self) -> SongField {
        self.field
    }

    /// The pattern text
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Regex search against the stringified field; an unset field never matches
    pub fn matches(&self, song: &Song) -> bool {
        song.field_value(self.field)
            .is_some_and(|value| self.pattern.is_match(&value))
    }
}

impl FromStr for Filter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let (field, pattern) = s
            .split_once(':')
            .ok_or_else(|| CoreError::invalid_filter(s, "expected 'field:pattern'"))?;

        let field = field
            .parse::<SongField>()
            .map_err(|reason| CoreError::invalid_filter(s, reason))?;

        compile(pattern)
            .map(|pattern| Self { field, pattern })
            .map_err(|e| CoreError::invalid_filter(s, e.to_string()))
    }
}

/// Outcome of evaluating a song against a [`FilterSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterVerdict {
    /// Passes the filters
    Included,
    /// Fails an include filter or hits an exclude filter
    Filtered,
}

/// Include and exclude filters with their all/any combination flags
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    includes: Vec<Filter>,
    excludes: Vec<Filter>,
    all_includes: bool,
    all_excludes: bool,
}

impl FilterSet {
    /// Create an empty filter set (includes everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse filter sets from their `field:pattern` texts
    pub fn parse(
        includes: &[String],
        excludes: &[String],
        all_includes: bool,
        all_excludes: bool,
    ) -> Result<Self> {
        let includes = includes
            .iter()
            .map(|f| f.parse())
            .collect::<Result<Vec<Filter>>>()?;
        let excludes = excludes
            .iter()
            .map(|f| f.parse())
            .collect::<Result<Vec<Filter>>>()?;

        Ok(Self {
            includes,
            excludes,
            all_includes,
            all_excludes,
        })
    }

    /// Add an include filter
    pub fn with_include(mut self, filter: Filter) -> Self {
        self.includes.push(filter);
        self
    }

    /// Add an exclude filter
    pub fn with_exclude(mut self, filter: Filter) -> Self {
        self.excludes.push(filter);
        self
    }

    /// Require every include filter to match instead of any
    pub fn require_all_includes(mut self, all: bool) -> Self {
        self.all_includes = all;
        self
    }

    /// Require every exclude filter to match instead of any
    pub fn require_all_excludes(mut self, all: bool) -> Self {
        self.all_excludes = all;
        self
    }

    /// Whether no filters are configured
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }

    /// Evaluate a song; a matched exclude always wins over includes
    pub fn evaluate(&self, song: &Song) -> FilterVerdict {
        if !self.excludes.is_empty() && combine(&self.excludes, self.all_excludes, song) {
            return FilterVerdict::Filtered;
        }

        if !self.includes.is_empty() && !combine(&self.includes, self.all_includes, song) {
            return FilterVerdict::Filtered;
        }

        FilterVerdict::Included
    }
}

fn combine(filters: &[Filter], all: bool, song: &Song) -> bool {
    if all {
        filters.iter().all(|f| f.matches(song))
    } else {
        filters.iter().any(|f| f.matches(song))
    }
}

/// Path exclusion patterns, evaluated before any field filter
#[derive(Debug, Clone, Default)]
pub struct ExcludePatterns {
    patterns: Vec<Regex>,
}

impl ExcludePatterns {
    /// No exclusions
    pub fn none() -> Self {
        Self::default()
    }

    /// Compile exclusion patterns
    pub fn parse(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| compile(p).map_err(|e| CoreError::invalid_pattern(p, e.to_string())))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Whether no patterns are configured
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether the song's local path matches any pattern
    pub fn is_excluded(&self, song: &Song) -> bool {
        let Some(path) = song.local_path() else {
            return false;
        };
        let path = path.to_string_lossy();

        self.patterns.iter().any(|p| p.is_match(&path))
    }
}

fn compile(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
}
