//! Repository layer: contracts plus SQLite implementations per resource.
//!
//! # Responsibility
//! - Keep SQL inside the persistence boundary.
//! - Return semantic errors (`NotFound`, `Conflict`) next to transport errors.
//!
//! # Invariants
//! - Composite writes (lesson + children, board seed, board upsert) are
//!   transactional.

pub mod article_repo;
pub mod board_repo;
pub mod error;
pub mod lesson_repo;
