//! Tool configuration.

use schemasync_core::filter::AssetFilter;

/// Configuration consumed by [`crate::tool::SchemaTool`].
///
/// Currently this is the asset filter scoping which schema objects the tool
/// manages. The getter returns exactly the value last set, so callers can
/// round-trip their configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncConfig {
    asset_filter: AssetFilter,
}

impl SyncConfig {
    /// Creates a configuration managing every asset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the asset filter.
    pub fn set_asset_filter(&mut self, filter: AssetFilter) {
        self.asset_filter = filter;
    }

    /// Returns the active asset filter.
    #[must_use]
    pub fn asset_filter(&self) -> &AssetFilter {
        &self.asset_filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_round_trips_through_the_getter() {
        let mut config = SyncConfig::new();
        assert_eq!(config.asset_filter(), &AssetFilter::None);

        let pattern = AssetFilter::pattern("^cms_").unwrap();
        config.set_asset_filter(pattern.clone());
        assert_eq!(config.asset_filter(), &pattern);

        let predicate = AssetFilter::predicate(|name| name != "entity_to_remove");
        config.set_asset_filter(predicate.clone());
        assert_eq!(config.asset_filter(), &predicate);
    }
}
