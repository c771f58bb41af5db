//! Nearby restaurant search for Yammi
//!
//! Queries the [TMAP](https://openapi.sk.com) "search around" POI API with
//! several keywords, keeps dining places, classifies them into a
//! [`domain::StoreCategory`], ranks them by great-circle distance and
//! falls back to a broader search when nothing is found.
//!
//! # Architecture
//!
//! [`PoiProvider`] abstracts the remote provider and is implemented by
//! [`TmapPoiClient`]. [`RestaurantSearch`] runs an ordered list of
//! [`SearchStrategy`] tiers against a provider; the first tier that yields
//! stores wins.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::GeoLocation;
//! use integration_poi::{PoiConfig, RestaurantSearch};
//!
//! let config = PoiConfig {
//!     api_key: Some("my-app-key".to_string()),
//!     ..PoiConfig::default()
//! };
//! let search = RestaurantSearch::from_config(&config)?;
//!
//! for store in search.search_nearby(GeoLocation::seoul()).await? {
//!     println!("{} ({}) {}", store.name, store.distance_label(), store.external_link);
//! }
//! ```

mod classify;
mod client;
mod config;
pub mod deeplink;
mod error;
mod keywords;
mod models;
mod provider;
mod search;

pub use classify::{classify, is_dining};
pub use client::TmapPoiClient;
pub use config::PoiConfig;
pub use error::PoiError;
pub use keywords::{DEFAULT_KEYWORD_POOL, FALLBACK_KEYWORD, food_keyword};
pub use models::{Poi, PoiSearchRequest};
pub use provider::PoiProvider;
pub use search::{KeywordFailure, RestaurantSearch, SearchStrategy, rank_stores};
