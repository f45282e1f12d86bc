//! Quiz content entities.
//!
//! # Responsibility
//! - Define the value types handed to and returned by repositories.
//! - Keep persistence concerns out of the entity shapes.
//!
//! # Invariants
//! - Identifiers are assigned by storage and never change afterwards.
//! - A `Question` returned by a repository always carries its full answer set.

pub mod admin;
pub mod question;
pub mod theme;
