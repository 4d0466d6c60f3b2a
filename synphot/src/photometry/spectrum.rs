//! Sampled spectrum model for synthetic photometry
//!
//! A [`Spectrum`] is a table of wavelengths (Ångström) and flux densities,
//! tagged with the flux space the densities are expressed in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Constants in CGS units
pub struct CGS {}

impl CGS {
    /// AB magnitude system zero-point flux density
    /// Units: 3631e-23 erg s⁻¹ cm⁻² Hz⁻¹
    pub const AB_ZERO_POINT_FLUX_DENSITY: f64 = 3631e-23;

    /// Speed of light in vacuum
    /// Units: 2.99792458e10 cm/s (centimeters per second in CGS)
    pub const SPEED_OF_LIGHT: f64 = 2.99792458e10;

    /// Speed of light in Ångström per second, matching spectra sampled in Å
    pub const SPEED_OF_LIGHT_ANGSTROM: f64 = Self::SPEED_OF_LIGHT * 1e8;

    /// AB magnitude offset: m_AB = -2.5 log10(f_ν) - 48.6 with f_ν in CGS
    pub const AB_MAGNITUDE_OFFSET: f64 = 48.6;
}

/// Unit system of a flux density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FluxSpace {
    /// Per unit wavelength, erg s⁻¹ cm⁻² Å⁻¹
    #[default]
    #[serde(rename = "f_lambda")]
    FLambda,

    /// Per unit frequency, erg s⁻¹ cm⁻² Hz⁻¹
    #[serde(rename = "f_nu")]
    FNu,
}

impl std::fmt::Display for FluxSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FluxSpace::FLambda => write!(f, "f_lambda"),
            FluxSpace::FNu => write!(f, "f_nu"),
        }
    }
}

/// Errors that can occur when building a spectrum
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpectrumError {
    #[error("Spectrum has no samples")]
    Empty,

    #[error("Wavelength and flux vectors must have the same length ({0} vs {1})")]
    LengthMismatch(usize, usize),

    #[error("Wavelengths must be strictly increasing (index {0})")]
    NotAscending(usize),

    #[error("Wavelengths must be finite and positive, got {0}")]
    InvalidWavelength(f64),
}

/// Convert f_λ (per Å) to f_ν (per Hz): f_ν = f_λ · λ² / c
///
/// Wavelengths are in Ångström. Pairs beyond the shorter slice are ignored.
pub fn flambda_to_fnu(wavelength: &[f64], flux: &[f64]) -> Vec<f64> {
    wavelength
        .iter()
        .zip(flux)
        .map(|(lambda, f)| f * lambda * lambda / CGS::SPEED_OF_LIGHT_ANGSTROM)
        .collect()
}

/// Convert f_ν (per Hz) to f_λ (per Å): f_λ = f_ν · c / λ²
///
/// Wavelengths are in Ångström. Pairs beyond the shorter slice are ignored.
pub fn fnu_to_flambda(wavelength: &[f64], flux: &[f64]) -> Vec<f64> {
    wavelength
        .iter()
        .zip(flux)
        .map(|(lambda, f)| f * CGS::SPEED_OF_LIGHT_ANGSTROM / (lambda * lambda))
        .collect()
}

/// Convert a flux array between flux spaces, copying when they match
pub fn convert_flux(wavelength: &[f64], flux: &[f64], from: FluxSpace, to: FluxSpace) -> Vec<f64> {
    match (from, to) {
        (FluxSpace::FLambda, FluxSpace::FNu) => flambda_to_fnu(wavelength, flux),
        (FluxSpace::FNu, FluxSpace::FLambda) => fnu_to_flambda(wavelength, flux),
        _ => flux.to_vec(),
    }
}

/// Serialized form of a spectrum, validated into [`Spectrum`] on load
#[derive(Debug, Deserialize)]
struct SpectrumTable {
    wavelength: Vec<f64>,
    flux: Vec<f64>,
    #[serde(default)]
    flux_space: FluxSpace,
}

impl TryFrom<SpectrumTable> for Spectrum {
    type Error = SpectrumError;

    fn try_from(table: SpectrumTable) -> Result<Self, Self::Error> {
        Spectrum::new(table.wavelength, table.flux, table.flux_space)
    }
}

/// An observed or model spectrum sampled on a wavelength grid
///
/// # Invariants
///
/// - At least one sample, wavelength and flux of equal length
/// - Wavelengths finite, positive and strictly increasing
///
/// Flux values are not checked here: a non-finite flux only poisons the
/// filters whose band covers it, and is reported per filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SpectrumTable")]
pub struct Spectrum {
    /// Wavelengths in Ångström
    wavelength: Vec<f64>,

    /// Flux density in `flux_space` units
    flux: Vec<f64>,

    flux_space: FluxSpace,
}

impl Spectrum {
    /// Create a new spectrum from wavelength and flux tables
    ///
    /// # Arguments
    ///
    /// * `wavelength` - Wavelengths in Ångström, strictly increasing
    /// * `flux` - Flux density at each wavelength
    /// * `flux_space` - Whether `flux` is f_λ or f_ν
    pub fn new(
        wavelength: Vec<f64>,
        flux: Vec<f64>,
        flux_space: FluxSpace,
    ) -> Result<Self, SpectrumError> {
        if wavelength.len() != flux.len() {
            return Err(SpectrumError::LengthMismatch(wavelength.len(), flux.len()));
        }

        if wavelength.is_empty() {
            return Err(SpectrumError::Empty);
        }

        if let Some(&bad) = wavelength.iter().find(|w| !w.is_finite() || **w <= 0.0) {
            return Err(SpectrumError::InvalidWavelength(bad));
        }

        if let Some(i) = (1..wavelength.len()).find(|&i| wavelength[i] <= wavelength[i - 1]) {
            return Err(SpectrumError::NotAscending(i));
        }

        Ok(Self {
            wavelength,
            flux,
            flux_space,
        })
    }

    pub fn wavelength(&self) -> &[f64] {
        &self.wavelength
    }

    pub fn flux(&self) -> &[f64] {
        &self.flux
    }

    pub fn flux_space(&self) -> FluxSpace {
        self.flux_space
    }

    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    /// Always false, a spectrum holds at least one sample
    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }

    /// Shortest and longest sampled wavelength in Ångström
    pub fn wavelength_bounds(&self) -> (f64, f64) {
        (self.wavelength[0], self.wavelength[self.wavelength.len() - 1])
    }

    /// Copy of this spectrum with every flux value multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            wavelength: self.wavelength.clone(),
            flux: self.flux.iter().map(|f| f * factor).collect(),
            flux_space: self.flux_space,
        }
    }
}
