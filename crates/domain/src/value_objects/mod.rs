//! Value Objects - Immutable, identity-less domain primitives

mod error_kind;
mod geo_location;
mod meal_category;
mod store_category;

pub use error_kind::ErrorKind;
pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use meal_category::MealCategory;
pub use store_category::StoreCategory;
