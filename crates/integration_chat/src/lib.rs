//! Chat backend clients for Yammi
//!
//! Sends user messages, optionally tagged with a [`domain::MealCategory`],
//! to a remote chat backend and normalizes every outcome into a
//! [`domain::ChatResponse`] whose message is always safe to display.
//!
//! # Architecture
//!
//! [`ChatBackend`] is implemented by [`CloudChatClient`] (the hosted
//! `/chat` recommendation service) and [`OpenAiCompatibleClient`] (any
//! `/v1/chat/completions` server). [`ChatService`] wraps either one and
//! turns [`ChatError`]s into localized failure responses.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::{ChatRequest, MealCategory};
//! use integration_chat::{ChatConfig, ChatService};
//!
//! let service = ChatService::from_config(&ChatConfig::default())?;
//! let request = ChatRequest::new("오늘 점심 뭐 먹지?", Some(MealCategory::Cost))?;
//! let response = service.send_message(&request).await;
//! println!("{}", response.message);
//! ```

mod backend;
mod cloud;
mod config;
mod context;
mod error;
mod openai;
mod service;

pub use backend::{BackendReply, ChatBackend};
pub use cloud::CloudChatClient;
pub use config::{ActiveService, BackendKind, ChatConfig, OpenAiCompatConfig, ServiceEndpoints};
pub use context::{category_context, category_question, system_prompt};
pub use error::ChatError;
pub use openai::OpenAiCompatibleClient;
pub use service::ChatService;
