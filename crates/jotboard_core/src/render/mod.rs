//! Rendering adapters over the structured view models.
//!
//! # Responsibility
//! - Turn view models into concrete display output.
//!
//! # Invariants
//! - Adapters are pure functions of their view model; rendering twice with
//!   the same input produces the same output.

pub mod html;
