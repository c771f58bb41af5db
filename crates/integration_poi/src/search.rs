//! Tiered nearby restaurant search
//!
//! A search is an ordered list of [`SearchStrategy`] tiers. Each tier queries
//! the provider once per keyword, converts and filters the POIs, then
//! deduplicates by name, sorts by distance and truncates. The first tier
//! that yields at least one store wins; later tiers only run when every
//! earlier one came back empty or failed.

use std::collections::HashSet;

use domain::{GeoLocation, StoreCategory, StoreRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::classify::{classify, is_dining};
use crate::client::TmapPoiClient;
use crate::config::PoiConfig;
use crate::deeplink;
use crate::error::PoiError;
use crate::keywords::{DEFAULT_KEYWORD_POOL, FALLBACK_KEYWORD, food_keyword};
use crate::models::{Poi, PoiSearchRequest};
use crate::provider::PoiProvider;

/// What a tier does when a single keyword request fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordFailure {
    /// Log the failure and continue with the next keyword
    #[default]
    Skip,
    /// Abort the tier and report the error
    Propagate,
}

/// One tier of the nearby search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchStrategy {
    /// Tier name used in logs
    pub name: String,

    /// Keyword pool in priority order
    pub keywords: Vec<String>,

    /// How many keywords from the pool are actually queried
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,

    /// Search radius sent to the provider, in meters
    pub radius_m: u32,

    /// Result count requested per keyword
    pub count: u32,

    /// Stores farther than this from the center are dropped
    pub max_distance_km: f64,

    /// Maximum number of stores returned by the tier
    pub max_results: usize,

    /// Drop POIs that match no dining-related term
    #[serde(default = "default_true")]
    pub dining_only: bool,

    /// Category for stores that match no classification rule
    #[serde(default)]
    pub default_category: StoreCategory,

    /// Per-keyword failure handling
    #[serde(default)]
    pub on_keyword_error: KeywordFailure,
}

const fn default_max_keywords() -> usize {
    3
}

const fn default_true() -> bool {
    true
}

impl SearchStrategy {
    /// Multi-keyword search within 2 km
    #[must_use]
    pub fn primary() -> Self {
        Self {
            name: "primary".to_string(),
            keywords: DEFAULT_KEYWORD_POOL.iter().map(ToString::to_string).collect(),
            max_keywords: default_max_keywords(),
            radius_m: 2000,
            count: 10,
            max_distance_km: 2.0,
            max_results: 10,
            dining_only: true,
            default_category: StoreCategory::Other,
            on_keyword_error: KeywordFailure::Skip,
        }
    }

    /// Broader single-keyword search used when the primary tier is empty
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            name: "fallback".to_string(),
            keywords: vec![FALLBACK_KEYWORD.to_string()],
            max_keywords: 1,
            radius_m: 1500,
            count: 15,
            max_distance_km: 1.5,
            max_results: 8,
            dining_only: false,
            default_category: StoreCategory::Restaurant,
            on_keyword_error: KeywordFailure::Propagate,
        }
    }

    /// Single-keyword search for one kind of food within 1 km
    #[must_use]
    pub fn food(keyword: &str) -> Self {
        Self {
            name: "food".to_string(),
            keywords: vec![keyword.to_string()],
            max_keywords: 1,
            radius_m: 1000,
            count: 10,
            max_distance_km: 1.0,
            max_results: 10,
            dining_only: false,
            default_category: StoreCategory::Restaurant,
            on_keyword_error: KeywordFailure::Propagate,
        }
    }

    /// Keywords that will be queried, in order
    pub fn active_keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords
            .iter()
            .map(|keyword| keyword.trim())
            .filter(|keyword| !keyword.is_empty())
            .take(self.max_keywords)
    }

    /// Validate the tier
    ///
    /// # Errors
    ///
    /// Returns an error naming the tier if a limit is zero or no keyword is usable.
    pub fn validate(&self) -> Result<(), String> {
        if self.active_keywords().next().is_none() {
            return Err(format!("strategy '{}' has no usable keyword", self.name));
        }
        if self.radius_m == 0 || self.count == 0 || self.max_results == 0 {
            return Err(format!(
                "strategy '{}': radius_m, count and max_results must be greater than 0",
                self.name
            ));
        }
        if !self.max_distance_km.is_finite() || self.max_distance_km <= 0.0 {
            return Err(format!(
                "strategy '{}': max_distance_km must be a positive number",
                self.name
            ));
        }
        Ok(())
    }

    /// Turn a POI into a store, or drop it
    fn to_store(&self, center: &GeoLocation, poi: Poi) -> Option<StoreRecord> {
        if self.dining_only && !is_dining(&poi.business_hint, &poi.name) {
            debug!(name = %poi.name, hint = %poi.business_hint, "Dropping non-dining POI");
            return None;
        }

        let distance_km = center.distance_km(&poi.location);
        if distance_km > self.max_distance_km {
            return None;
        }

        let category = classify(&poi.business_hint, &poi.name).unwrap_or(self.default_category);
        let link = deeplink::search_link(&poi.location, &poi.name);

        Some(
            StoreRecord::new(poi.name, poi.address, distance_km, link, category)
                .with_phone(poi.phone)
                .with_id(poi.id),
        )
    }
}

/// Deduplicate by name (first occurrence wins), sort by distance, truncate
#[must_use]
pub fn rank_stores(stores: Vec<StoreRecord>, max_results: usize) -> Vec<StoreRecord> {
    let mut seen = HashSet::new();
    let mut unique: Vec<StoreRecord> = stores
        .into_iter()
        .filter(|store| seen.insert(store.name.clone()))
        .collect();

    unique.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    unique.truncate(max_results);
    unique
}

/// Nearby restaurant search over a POI provider
#[derive(Debug)]
pub struct RestaurantSearch<P = TmapPoiClient> {
    provider: P,
    strategies: Vec<SearchStrategy>,
}

impl RestaurantSearch<TmapPoiClient> {
    /// Build a TMAP-backed search from configuration
    ///
    /// # Errors
    ///
    /// Returns `PoiError::ConfigurationError` if the configuration is invalid
    /// or the API key is missing.
    pub fn from_config(config: &PoiConfig) -> Result<Self, PoiError> {
        config.validate().map_err(PoiError::ConfigurationError)?;
        let client = TmapPoiClient::new(config)?;
        Ok(Self::new(client, config.strategies.clone()))
    }
}

impl<P: PoiProvider> RestaurantSearch<P> {
    /// Create a search with explicit tiers
    #[must_use]
    pub const fn new(provider: P, strategies: Vec<SearchStrategy>) -> Self {
        Self {
            provider,
            strategies,
        }
    }

    /// The configured tiers
    #[must_use]
    pub fn strategies(&self) -> &[SearchStrategy] {
        &self.strategies
    }

    /// The underlying provider
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Find dining places near `center`, closest first
    ///
    /// # Errors
    ///
    /// Returns the last tier's error if it failed, or
    /// `PoiError::NoResultsFound` if every tier came back empty.
    #[instrument(skip(self), fields(center = %center, provider = self.provider.provider_name()))]
    pub async fn search_nearby(&self, center: GeoLocation) -> Result<Vec<StoreRecord>, PoiError> {
        let mut last_error = None;

        for strategy in &self.strategies {
            match self.run_strategy(strategy, &center).await {
                Ok(stores) if !stores.is_empty() => {
                    info!(tier = %strategy.name, count = stores.len(), "Nearby search found stores");
                    return Ok(stores);
                },
                Ok(_) => {
                    info!(tier = %strategy.name, "Search tier found nothing, trying next tier");
                    last_error = None;
                },
                Err(e) => {
                    warn!(tier = %strategy.name, error = %e, "Search tier failed");
                    last_error = Some(e);
                },
            }
        }

        Err(last_error.unwrap_or_else(|| PoiError::NoResultsFound {
            center: center.to_string(),
        }))
    }

    /// Find places serving a given food type near `center`
    ///
    /// # Errors
    ///
    /// Returns `PoiError::InvalidQuery` for a blank food type, the provider
    /// error if the request fails, or `PoiError::NoResultsFound`.
    #[instrument(skip(self), fields(center = %center))]
    pub async fn search_food(
        &self,
        center: GeoLocation,
        food_type: &str,
    ) -> Result<Vec<StoreRecord>, PoiError> {
        let keyword = food_keyword(food_type);
        if keyword.is_empty() {
            return Err(PoiError::InvalidQuery(
                "Food type must not be empty".to_string(),
            ));
        }

        let stores = self
            .run_strategy(&SearchStrategy::food(keyword), &center)
            .await?;

        if stores.is_empty() {
            return Err(PoiError::NoResultsFound {
                center: center.to_string(),
            });
        }
        Ok(stores)
    }

    async fn run_strategy(
        &self,
        strategy: &SearchStrategy,
        center: &GeoLocation,
    ) -> Result<Vec<StoreRecord>, PoiError> {
        let mut stores = Vec::new();

        for keyword in strategy.active_keywords() {
            let request = PoiSearchRequest::new(keyword, *center, strategy.radius_m, strategy.count);

            match self.provider.search_around(&request).await {
                Ok(pois) => {
                    debug!(tier = %strategy.name, %keyword, pois = pois.len(), "Keyword search done");
                    stores.extend(pois.into_iter().filter_map(|poi| strategy.to_store(center, poi)));
                },
                Err(e) if strategy.on_keyword_error == KeywordFailure::Skip => {
                    warn!(tier = %strategy.name, %keyword, error = %e, "Keyword search failed, skipping");
                },
                Err(e) => return Err(e),
            }
        }

        Ok(rank_stores(stores, strategy.max_results))
    }
}
