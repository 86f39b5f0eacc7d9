//! recoprep: training-data preparation for recommendation models.
//!
//! This crate turns raw user-item interaction tables into model-ready
//! training data through three independent, deterministic, in-memory batch
//! transforms:
//!
//! - [`pairs::user_item_pairs`]: the full user×item candidate space, with an
//!   optional exclusion filter and optional row shuffling
//! - [`sampling::negative_feedback_sampler`]: labeled positive/negative
//!   datasets from positive-only interaction logs
//! - [`libffm::libffm_converter`]: sparse `field:feature:value` encoding for
//!   field-aware factorization machine trainers
//!
//! All transforms consume and produce the column-oriented [`table::Table`]
//! and share the [`filter::filter_by`] composite-key set-difference filter.

pub mod error;
pub mod filter;
pub mod libffm;
pub mod pairs;
pub mod sampling;
pub mod table;

pub use error::PrepError;
