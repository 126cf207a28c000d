//! Observable view-state store.
//!
//! A single mutable view-state shared by the fetch orchestrator, the push
//! channel, and the rendering layer. All mutations are whole-field
//! assignments followed by a change notification; readers never observe a
//! half-written field.

pub mod store;

pub use store::{StateChange, StateStore};
