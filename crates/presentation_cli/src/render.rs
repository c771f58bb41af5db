//! Plain-text rendering of command results

use std::fmt::Write;

use domain::{ChatResponse, StoreRecord};
use integration_poi::PoiError;
use serde_json::{Value, json};

/// Render a chat response for the terminal
pub fn chat_response(response: &ChatResponse) -> String {
    let mut out = String::new();
    if response.success {
        let _ = writeln!(out, "🤖 {}", response.message);
        if !response.recommendations.is_empty() {
            let _ = writeln!(
                out,
                "\n📋 {} structured recommendation(s):",
                response.recommendations.len()
            );
            for item in &response.recommendations {
                let _ = writeln!(out, "   • {item}");
            }
        }
    } else {
        let _ = writeln!(out, "❌ {}", response.message);
        if let Some(kind) = response.error_kind {
            let _ = writeln!(out, "   ({kind})");
        }
    }
    out
}

/// Render a ranked store list
pub fn store_list(stores: &[StoreRecord]) -> String {
    let mut out = format!("📍 Found {} place(s)\n", stores.len());
    for (index, store) in stores.iter().enumerate() {
        let _ = writeln!(
            out,
            "\n{}. {} [{}] {}",
            index + 1,
            store.name,
            store.category.label(),
            store.distance_label()
        );
        let _ = writeln!(out, "   🏠 {}", store.address);
        if let Some(phone) = &store.phone {
            let _ = writeln!(out, "   📞 {phone}");
        }
        let _ = writeln!(out, "   🔗 {}", store.external_link);
    }
    out
}

/// Render a search failure for the terminal
pub fn poi_error(error: &PoiError) -> String {
    format!("❌ {}\n   ({})\n", error.user_message(), error.kind())
}

/// JSON body for a search failure
pub fn poi_error_json(error: &PoiError) -> Value {
    json!({ "error": error.kind(), "message": error.user_message() })
}
