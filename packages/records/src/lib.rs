#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Record normalization.
//!
//! Backend endpoints return loosely-structured JSON records whose field
//! names and completeness vary by endpoint and by age of the record.
//! This crate reduces each raw record to the canonical
//! [`civic_desk_records_models::NormalizedRecord`] using declared alias
//! tables and defensive extraction — a malformed record degrades to
//! defaults, it never fails the whole computation.

pub mod alias;
pub mod extract;
pub mod normalize;

pub use normalize::{normalize, normalize_collection};
