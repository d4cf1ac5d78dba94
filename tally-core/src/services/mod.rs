//! Service layer - analytics over account snapshots
//!
//! `AccountAnalytics` answers every query; `grouping` holds the primitives
//! its grouping queries are built from.

mod analytics;
pub mod grouping;

pub use analytics::AccountAnalytics;
