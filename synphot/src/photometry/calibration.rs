//! Magnitude calibration: zero-point offsets, AB magnitudes and output modes

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::FilterError;
use super::integrator::BandIntegral;
use super::spectrum::{FluxSpace, CGS};

/// What a photometry run reports for each filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Output {
    /// Mean flux density per unit wavelength, no magnitude transform
    #[serde(rename = "f_lambda")]
    FLambda,

    /// Mean flux density per unit frequency, no magnitude transform
    #[serde(rename = "f_nu")]
    FNu,

    /// AB magnitude from the f_ν mean: -2.5 log10(f_ν) - 48.6
    #[serde(rename = "ab_mag")]
    AbMag,

    /// Magnitude from a per-filter zero point: -2.5 log10(f) + ZP
    #[default]
    #[serde(rename = "zero_point_mag")]
    ZeroPointMag,
}

impl Output {
    /// Flux space the spectrum is integrated in for this output
    pub fn flux_space(&self, input: FluxSpace) -> FluxSpace {
        match self {
            Output::FLambda => FluxSpace::FLambda,
            Output::FNu | Output::AbMag => FluxSpace::FNu,
            Output::ZeroPointMag => input,
        }
    }
}

impl std::fmt::Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Output::FLambda => write!(f, "f_lambda"),
            Output::FNu => write!(f, "f_nu"),
            Output::AbMag => write!(f, "ab_mag"),
            Output::ZeroPointMag => write!(f, "zero_point_mag"),
        }
    }
}

/// Run configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotometryConfig {
    /// Flux space of the spectrum; `None` trusts the spectrum's own tag
    pub input_flux_space: Option<FluxSpace>,

    pub output: Output,
}

impl PhotometryConfig {
    pub fn new(output: Output) -> Self {
        Self {
            input_flux_space: None,
            output,
        }
    }

    pub fn with_input_flux_space(mut self, space: FluxSpace) -> Self {
        self.input_flux_space = Some(space);
        self
    }
}

/// Calibration constant of one filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroPoint {
    /// Additive magnitude offset, typically 2.5 log10(F_ref)
    Offset(f64),

    /// Reference flux density F_ref in the run's flux space
    ReferenceFlux(f64),
}

impl ZeroPoint {
    /// Additive offset in magnitudes, `None` if the constant is unusable
    pub fn offset(&self) -> Option<f64> {
        match *self {
            ZeroPoint::Offset(mag) => mag.is_finite().then_some(mag),
            ZeroPoint::ReferenceFlux(flux) => {
                (flux.is_finite() && flux > 0.0).then(|| 2.5 * flux.log10())
            }
        }
    }

    fn raw(&self) -> f64 {
        match *self {
            ZeroPoint::Offset(value) | ZeroPoint::ReferenceFlux(value) => value,
        }
    }
}

/// Filter name → zero point, matched case-sensitively
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZeroPointTable {
    entries: BTreeMap<String, ZeroPoint>,
}

impl ZeroPointTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from reference flux densities
    pub fn from_reference_fluxes<I, S>(fluxes: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        fluxes
            .into_iter()
            .map(|(name, flux)| (name.into(), ZeroPoint::ReferenceFlux(flux)))
            .collect()
    }

    pub fn insert(&mut self, filter: impl Into<String>, zero_point: ZeroPoint) -> Option<ZeroPoint> {
        self.entries.insert(filter.into(), zero_point)
    }

    pub fn get(&self, filter: &str) -> Option<&ZeroPoint> {
        self.entries.get(filter)
    }

    pub fn contains(&self, filter: &str) -> bool {
        self.entries.contains_key(filter)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ZeroPoint)> for ZeroPointTable {
    fn from_iter<I: IntoIterator<Item = (String, ZeroPoint)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// -2.5 log10(flux), refusing fluxes the logarithm is undefined for
pub fn instrumental_magnitude(flux: f64) -> Result<f64, FilterError> {
    if !flux.is_finite() || flux <= 0.0 {
        return Err(FilterError::NoSignal(flux));
    }
    Ok(-2.5 * flux.log10())
}

/// AB magnitude of a mean f_ν in erg s⁻¹ cm⁻² Hz⁻¹
pub fn ab_magnitude(f_nu: f64) -> Result<f64, FilterError> {
    Ok(instrumental_magnitude(f_nu)? - CGS::AB_MAGNITUDE_OFFSET)
}

/// Turn a band integral into the value requested by `output`
///
/// The integral must already be in `output`'s flux space (see
/// [`Output::flux_space`]).
///
/// # Errors
///
/// * [`FilterError::MissingZeroPoint`] - zero-point mode and no entry for `filter`
/// * [`FilterError::InvalidZeroPoint`] - the entry cannot be turned into an offset
/// * [`FilterError::NoSignal`] - magnitude requested for a non-positive mean flux
pub fn calibrate(
    filter: &str,
    integral: &BandIntegral,
    output: Output,
    zero_points: Option<&ZeroPointTable>,
) -> Result<f64, FilterError> {
    let mean = integral.mean_flux_density();

    match output {
        Output::FLambda | Output::FNu => Ok(mean),
        Output::AbMag => ab_magnitude(mean),
        Output::ZeroPointMag => {
            let zero_point = zero_points
                .and_then(|table| table.get(filter))
                .ok_or_else(|| FilterError::MissingZeroPoint(filter.to_string()))?;
            let offset = zero_point
                .offset()
                .ok_or_else(|| FilterError::InvalidZeroPoint(filter.to_string(), zero_point.raw()))?;
            Ok(instrumental_magnitude(mean)? + offset)
        }
    }
}
