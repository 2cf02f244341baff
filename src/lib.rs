#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for qc-metrics
//!
//! This library consolidates all functionality for the qc-metrics tool, which collects
//! per-sample QC report files produced by a sequencing pipeline and merges their metrics
//! into summary workbooks for laboratory review.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`metrics`]: The catalog of report categories and the metrics pulled from each
//! - [`scan`]: Report discovery, classification, and metric extraction
//! - [`tables`]: Sample-keyed tables, joins, and the metadata worksheet reader
//! - [`recipes`]: The fixed merge procedures that produce the summary tables
//! - [`reports`]: Workbook and CSV export

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub type HashMap<K, V> = std::collections::HashMap<K, V, rustc_hash::FxBuildHasher>;
pub type HashSet<K> = std::collections::HashSet<K, rustc_hash::FxBuildHasher>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod metrics;
#[cfg(not(any(debug_assertions, test)))]
mod metrics;

#[cfg(any(debug_assertions, test))]
pub mod recipes;
#[cfg(not(any(debug_assertions, test)))]
mod recipes;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

#[cfg(any(debug_assertions, test))]
pub mod scan;
#[cfg(not(any(debug_assertions, test)))]
mod scan;

#[cfg(any(debug_assertions, test))]
pub mod tables;
#[cfg(not(any(debug_assertions, test)))]
mod tables;

pub use crate::commands::{Host, run};
