use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use crate::models::Destination;

const POPULAR_DESTINATIONS: &[(&str, &str, &str)] = &[
    ("LON", "London", "United Kingdom"),
    ("PAR", "Paris", "France"),
    ("NYC", "New York", "United States"),
    ("TYO", "Tokyo", "Japan"),
    ("ROM", "Rome", "Italy"),
    ("SYD", "Sydney", "Australia"),
    ("DXB", "Dubai", "United Arab Emirates"),
    ("SIN", "Singapore", "Singapore"),
    ("BCN", "Barcelona", "Spain"),
    ("AMS", "Amsterdam", "Netherlands"),
];

struct CachedDestinations {
    destinations: Arc<Vec<Destination>>,
    loaded_at: Instant,
}

/// Popular destinations held in memory. Entries older than the TTL are
/// rebuilt on the next read.
pub struct DestinationCatalog {
    ttl: Duration,
    cache: RwLock<Option<CachedDestinations>>,
}

impl DestinationCatalog {
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            cache: RwLock::const_new(None),
        }
    }

    #[must_use]
    pub const fn with_ttl_hours(hours: u64) -> Self {
        Self::new(Duration::from_secs(hours * 60 * 60))
    }

    fn build() -> Vec<Destination> {
        POPULAR_DESTINATIONS
            .iter()
            .map(|(code, name, country)| Destination::new(code, name, country))
            .collect()
    }

    fn is_fresh(&self, cached: &CachedDestinations) -> bool {
        cached.loaded_at.elapsed() < self.ttl
    }

    pub async fn list(&self) -> Arc<Vec<Destination>> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref().filter(|c| self.is_fresh(c)) {
                return cached.destinations.clone();
            }
        }

        let mut cache = self.cache.write().await;
        if let Some(cached) = cache.as_ref().filter(|c| self.is_fresh(c)) {
            return cached.destinations.clone();
        }

        debug!("Rebuilding destination catalog");
        let destinations = Arc::new(Self::build());
        *cache = Some(CachedDestinations {
            destinations: destinations.clone(),
            loaded_at: Instant::now(),
        });
        destinations
    }

    pub async fn find(&self, code: &str) -> Option<Destination> {
        let code = code.trim();
        self.list()
            .await
            .iter()
            .find(|d| d.code.eq_ignore_ascii_case(code))
            .cloned()
    }

    /// City metadata for a code, with `{name: code, country: "Unknown"}` for
    /// codes outside the catalog.
    pub async fn city_info(&self, code: &str) -> Destination {
        match self.find(code).await {
            Some(destination) => destination,
            None => Destination::unknown(&code.trim().to_ascii_uppercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lists_popular_destinations() {
        let catalog = DestinationCatalog::with_ttl_hours(24);
        let destinations = catalog.list().await;

        assert_eq!(destinations.len(), 10);
        assert_eq!(destinations[0], Destination::new("LON", "London", "United Kingdom"));
        assert!(destinations.iter().any(|d| d.code == "AMS"));
    }

    #[tokio::test]
    async fn test_reuses_cached_list_within_ttl() {
        let catalog = DestinationCatalog::with_ttl_hours(24);
        let first = catalog.list().await;
        let second = catalog.list().await;
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_rebuilds_after_expiry() {
        let catalog = DestinationCatalog::new(Duration::ZERO);
        let first = catalog.list().await;
        let second = catalog.list().await;
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_find_is_case_insensitive() {
        let catalog = DestinationCatalog::with_ttl_hours(24);
        let paris = catalog.find("par").await.unwrap();
        assert_eq!(paris.name, "Paris");
        assert!(catalog.find("XXX").await.is_none());
    }

    #[tokio::test]
    async fn test_city_info_for_unknown_code() {
        let catalog = DestinationCatalog::with_ttl_hours(24);
        let info = catalog.city_info("qqq").await;
        assert_eq!(info.name, "QQQ");
        assert_eq!(info.country, "Unknown");
    }
}
