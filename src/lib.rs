//! # imagery-stats
//!
//! Samples the most recently updated HOT Tasking Manager projects and writes a
//! JSON summary for the imagery dashboard.
//!
//! ## Pipeline
//!
//! - **Fetch**: walk the project listing, then fetch each project's detail
//! - **Normalize**: classify the imagery source, derive area and centroid of the AOI
//! - **Write**: one `projects_summary.json`, replaced on every run

pub mod client;
pub mod config;
pub mod fetcher;
pub mod geometry;
pub mod imagery;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod record;

pub use client::{FetchError, TaskingManagerClient};
pub use config::Config;
pub use geometry::{summarize_geometry, GeometrySummary};
pub use imagery::{classify_imagery, ImageryCategory};
pub use normalize::summarize_project;
pub use record::{RawProjectRecord, SummaryDocument, SummaryRecord};
