//! Synthetic photometry for astronomical spectra.
//!
//! Integrates a spectrum through named filter transmission curves and turns
//! each in-band flux into a calibrated magnitude, either against per-filter
//! zero points or on the AB system.
//!
//! ```rust
//! use synphot::photometry::{
//!     compute, CurveSet, FluxSpace, Output, PhotometryConfig, Spectrum, TransmissionCurve,
//!     ZeroPointTable,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let spectrum = Spectrum::new(
//!     vec![4000.0, 4500.0, 5000.0, 5500.0, 6000.0],
//!     vec![1e-15; 5],
//!     FluxSpace::FLambda,
//! )?;
//! let curves: CurveSet = vec![TransmissionCurve::new(
//!     "F500",
//!     vec![4800.0, 5000.0, 5200.0],
//!     vec![0.0, 1.0, 0.0],
//! )?]
//! .into_iter()
//! .collect();
//! let zero_points = ZeroPointTable::from_reference_fluxes([("F500", 5.0e-9)]);
//!
//! let result = compute(
//!     &spectrum,
//!     &curves,
//!     Some(&zero_points),
//!     &PhotometryConfig::new(Output::ZeroPointMag),
//! )?;
//! let magnitude = result.values()["F500"];
//! assert!((magnitude - 16.747).abs() < 1e-3);
//! # Ok(())
//! # }
//! ```

pub mod algo;
pub mod config;
pub mod photometry;
pub mod shared_args;
