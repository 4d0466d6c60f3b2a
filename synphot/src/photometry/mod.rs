//! Synthetic photometry: spectra through filter curves to magnitudes

pub mod band;
pub mod calibration;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod spectrum;
pub mod store;
pub mod transmission;
pub mod trapezoid;

pub use band::{select_band, BandLimits, BandSelection};
pub use calibration::{Output, PhotometryConfig, ZeroPoint, ZeroPointTable};
pub use engine::{compute, FilterPhotometry, MagnitudeResult};
pub use error::{FilterError, MissingInput, PhotometryError};
pub use integrator::{integrate_band, BandIntegral};
pub use spectrum::{flambda_to_fnu, fnu_to_flambda, FluxSpace, Spectrum, CGS};
pub use store::CurveStore;
pub use transmission::{CurveSet, TransmissionCurve};
pub use trapezoid::trapz;
