//! # Answer Generation
//!
//! Turns a retrieved set of corpus passages and a user question into a
//! natural-language answer via the Gemini `generateContent` API.
//!
//! The request pipeline is a short state machine:
//!
//! ```text
//! CacheCheck → Retrieve → PromptBuild → ExternalCall → CacheStore → Return
//! ```
//!
//! Every path through the pipeline produces a string: cache hits return
//! immediately, an empty retrieval yields a fixed "no information"
//! message, and a failed generation call yields a fixed apology.
//! Nothing in this crate surfaces an error to the HTTP layer.

pub mod cache;
pub mod client;
pub mod error;
pub mod prompt;
pub mod service;

pub use cache::AnswerCache;
pub use client::{AnswerModel, GeminiGenerator};
pub use error::{AnswerError, Result};
pub use prompt::build_prompt;
pub use service::{AnswerService, GENERATION_FAILURE_MESSAGE, NO_INFORMATION_MESSAGE};
