//! Domain records for both board managers.
//!
//! # Responsibility
//! - Define the canonical task and post record shapes and their serialized
//!   JSON layout.
//!
//! # Invariants
//! - Every record carries a stable id that is never reused or mutated.
//! - `created_at` is set once at creation and survives every update.

pub mod post;
pub mod task;
