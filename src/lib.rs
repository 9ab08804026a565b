//! # DGA Engine
//!
//! Fault diagnosis for oil-filled power transformers from Dissolved Gas
//! Analysis (DGA).
//!
//! A laboratory reports nine gases dissolved in the insulating oil. Each
//! diagnostic method turns those concentrations into an ordered list of
//! human-readable findings and, where the method classifies, a fault code.
//!
//! ## Methods
//!
//! - **IEC 60599**: ratio commentary, typical concentrations and rates of
//!   increase, Table 1 fault type and a Normal / Alert / Alarm verdict
//! - **IEEE C57.104**: Table 1 90th percentile screening by O2/N2 ratio and age
//! - **Duval Triangles**: Triangle 1 with Triangle 4 and 5 refinements, and
//!   Triangle 2 for on-load tap changers
//! - **Duval Pentagons**: Pentagons 1 and 2 by centroid of the gas polygon
//! - **Rogers Ratios**: the three-ratio table
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dga_engine::prelude::*;
//!
//! let sample = parse_sample(&std::fs::read_to_string("latest.json")?)?;
//! for entry in &run_duval_pentagons(&sample)? {
//!     println!("{entry}");
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `cli`: the `dga` command-line tool
//!
//! ## References
//!
//! - IEC 60599:2015, *Mineral oil-filled electrical equipment in service*.
//! - IEEE PC57.104/D4.1 (2017), *Guide for the Interpretation of Gases
//!   Generated in Mineral Oil-Immersed Transformers*.
//! - Duval, M., & Lamarre, L. (2014). "The Duval Pentagon." IEEE Electrical
//!   Insulation Magazine, 30(6).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Measurement units and conversions.
pub mod units;

/// The nine dissolved gases.
pub mod gas;

/// Gas samples and their JSON form.
pub mod sample;

/// Fault codes and their descriptions.
pub mod failure;

/// Geometric primitives (points, lines, rectangles, polygons) and pentagon zones.
pub mod geometry;

/// Ratio, rate-of-change and detection-limit arithmetic.
pub mod calc;

// ============================================================================
// Diagnostic Modules
// ============================================================================

/// Rule contract, output log and chain executor.
pub mod rules;

/// The diagnostic methods.
pub mod algorithms;

/// YAML analysis settings.
pub mod config;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for DGA operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust,ignore
/// use dga_engine::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algorithms::{
        run_duval_pentagons, run_duval_triangles, run_duval_triangles_oltc, run_iec60599, run_ieee_c57104,
        run_rogers_ratios, Algorithm, DuvalPentagons, DuvalTriangles, DuvalTrianglesOltc, Iec60599, IeeeC57104,
        RogersRatios,
    };
    pub use crate::calc::DetectionLimits;
    pub use crate::config::AnalysisConfig;
    pub use crate::error::{Error, Result};
    pub use crate::failure::FailureCode;
    pub use crate::gas::Gas;
    pub use crate::rules::{Classifier, Output, Outputs, Signal};
    pub use crate::sample::{parse_sample, serialize_sample, GasSample};
    pub use crate::units::{Measurement, Unit};
}

// ============================================================================
// Re-exports
// ============================================================================

pub use algorithms::{
    run_duval_pentagons, run_duval_triangles, run_duval_triangles_oltc, run_iec60599, run_ieee_c57104,
    run_rogers_ratios,
};
pub use sample::{parse_sample, serialize_sample, GasSample};
