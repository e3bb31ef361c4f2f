//! Asset name filtering.
//!
//! An asset filter decides which named schema objects (tables, indexes,
//! constraints) the engine manages. Anything the filter rejects is invisible
//! to the differ: it is never created, altered, or dropped, so tables owned
//! by other systems in the same database are left alone.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::SchemaError;

/// Predicate callback form of an asset filter.
pub type AssetPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Filter over schema asset names.
///
/// A `Pattern` regex defines the *kept* set: names the regex matches are
/// managed, everything else is excluded. A `Predicate` returning `false`
/// excludes the asset. `None` manages everything.
#[derive(Clone, Default)]
pub enum AssetFilter {
    /// Every asset is managed.
    #[default]
    None,
    /// Assets whose names match the regex are managed.
    Pattern(Regex),
    /// Assets for which the callback returns `true` are managed.
    Predicate(AssetPredicate),
}

impl AssetFilter {
    /// Builds a pattern filter from a regex string.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidFilterPattern`] when the pattern does
    /// not compile.
    pub fn pattern(pattern: &str) -> Result<Self, SchemaError> {
        let regex = Regex::new(pattern).map_err(|source| SchemaError::InvalidFilterPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self::Pattern(regex))
    }

    /// Builds a predicate filter from a callback.
    #[must_use]
    pub fn predicate(callback: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(callback))
    }

    /// Returns whether the named asset is managed by the engine.
    #[must_use]
    pub fn is_managed(&self, asset_name: &str) -> bool {
        match self {
            Self::None => true,
            Self::Pattern(regex) => regex.is_match(asset_name),
            Self::Predicate(callback) => callback(asset_name),
        }
    }
}

impl fmt::Debug for AssetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "AssetFilter::None"),
            Self::Pattern(regex) => write!(f, "AssetFilter::Pattern({:?})", regex.as_str()),
            Self::Predicate(_) => write!(f, "AssetFilter::Predicate(..)"),
        }
    }
}

/// Patterns compare by source string; predicates compare by callback
/// identity, so the getter returns exactly the value last set.
impl PartialEq for AssetFilter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            (Self::Predicate(a), Self::Predicate(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_manages_everything() {
        let filter = AssetFilter::None;
        assert!(filter.is_managed("anything"));
    }

    #[test]
    fn pattern_defines_the_kept_set() {
        let filter = AssetFilter::pattern("^cms_").unwrap();
        assert!(filter.is_managed("cms_users"));
        assert!(!filter.is_managed("legacy_orders"));
    }

    #[test]
    fn predicate_false_excludes() {
        let filter = AssetFilter::predicate(|name| name != "entity_to_remove");
        assert!(filter.is_managed("my_entity"));
        assert!(!filter.is_managed("entity_to_remove"));
    }

    #[test]
    fn invalid_pattern_is_a_configuration_error() {
        let err = AssetFilter::pattern("(unclosed").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidFilterPattern { .. }));
    }

    #[test]
    fn equality_round_trips_each_variant() {
        assert_eq!(AssetFilter::None, AssetFilter::None);

        let a = AssetFilter::pattern("^cms_").unwrap();
        let b = AssetFilter::pattern("^cms_").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, AssetFilter::pattern("^app_").unwrap());

        let p = AssetFilter::predicate(|_| true);
        assert_eq!(p, p.clone());
        assert_ne!(p, AssetFilter::predicate(|_| true));
        assert_ne!(p, AssetFilter::None);
    }
}
