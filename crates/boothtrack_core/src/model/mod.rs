//! Domain model for shows, reps, booths and people.
//!
//! # Responsibility
//! - Define canonical records shared by storage backends and views.
//! - Own option catalogs and validation vocabularies.
//!
//! # Invariants
//! - Shows and reps use human-readable slug ids; booths and people use UUIDs.
//! - Relationships are plain foreign keys (`show_id`, `rep_id`, `owner_id`).

pub mod booth;
pub mod catalog;
pub mod ident;
pub mod person;
pub mod rep;
pub mod show;
