//! Prayer-service reader.
//!
//! Fetch (schema, text, highlights) → Decode → Render → DOM/HTML.

pub mod dom;
pub mod engine;
pub mod highlight;
pub mod model;
pub mod net;
pub mod page;
pub mod render;
