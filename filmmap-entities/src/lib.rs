#![cfg_attr(test, deny(warnings))]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # filmmap-entities
//!
//! Reusable domain entities for filmmap.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod geo;
pub mod record;
