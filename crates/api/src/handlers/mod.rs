//! HTTP request handlers, grouped by resource.

pub mod admin;
pub mod api_keys;
pub mod assessment;
pub mod auth;
pub mod careers;
pub mod monitoring;
pub mod personality_types;
