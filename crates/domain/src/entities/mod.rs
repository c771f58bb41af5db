//! Domain entities - short-lived request and result objects

mod chat_message;
mod store_record;

pub use chat_message::{ChatRequest, ChatResponse};
pub use store_record::{StoreRecord, format_distance_m};
