//! Filter transmission (bandpass) curves

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::band::BandLimits;
use crate::algo::misc::{interp_many, InterpError};

/// Errors that can occur when building transmission curves
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransmissionError {
    #[error("Curve {0}: wavelength and throughput vectors must have the same length")]
    LengthMismatch(String),

    #[error("Curve {0}: need at least 2 points")]
    TooFewPoints(String),

    #[error("Curve {0}: wavelengths must be strictly increasing")]
    NotAscending(String),

    #[error("Curve {0}: wavelengths must be finite")]
    NonFiniteWavelength(String),

    #[error("Curve {0}: throughput values must be finite and non-negative")]
    NegativeThroughput(String),

    #[error("Duplicate curve name {0}")]
    DuplicateName(String),
}

#[derive(Debug, Deserialize)]
struct CurveTable {
    name: String,
    wavelength: Vec<f64>,
    throughput: Vec<f64>,
}

impl TryFrom<CurveTable> for TransmissionCurve {
    type Error = TransmissionError;

    fn try_from(table: CurveTable) -> Result<Self, Self::Error> {
        TransmissionCurve::new(table.name, table.wavelength, table.throughput)
    }
}

/// Throughput of a filter+instrument system across wavelength
///
/// Stores wavelength-throughput pairs. Throughput may be zero at the edges (or
/// anywhere) but never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurveTable")]
pub struct TransmissionCurve {
    name: String,

    /// Wavelengths in Ångström
    wavelength: Vec<f64>,

    /// Throughput fraction at each wavelength
    throughput: Vec<f64>,
}

impl TransmissionCurve {
    /// Create a new curve from wavelength and throughput tables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The vectors have different lengths or fewer than two points
    /// - Wavelengths are not finite or not in strictly ascending order
    /// - Any throughput value is negative or not finite
    pub fn new(
        name: impl Into<String>,
        wavelength: Vec<f64>,
        throughput: Vec<f64>,
    ) -> Result<Self, TransmissionError> {
        let name = name.into();

        if wavelength.len() != throughput.len() {
            return Err(TransmissionError::LengthMismatch(name));
        }

        if wavelength.len() < 2 {
            return Err(TransmissionError::TooFewPoints(name));
        }

        if wavelength.iter().any(|w| !w.is_finite()) {
            return Err(TransmissionError::NonFiniteWavelength(name));
        }

        if wavelength.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(TransmissionError::NotAscending(name));
        }

        if throughput.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(TransmissionError::NegativeThroughput(name));
        }

        Ok(Self {
            name,
            wavelength,
            throughput,
        })
    }

    /// Create a top-hat curve with `throughput` between `lower` and `upper`
    ///
    /// The edges fall to zero over a tiny step just outside the bounds so the
    /// curve stays a valid table.
    pub fn from_notch(
        name: impl Into<String>,
        lower: f64,
        upper: f64,
        throughput: f64,
    ) -> Result<Self, TransmissionError> {
        // Small compared to any real bandpass, large enough to survive f64 rounding at 1e4 Å
        let smol = 1e-6;

        Self::new(
            name,
            vec![lower - smol, lower, upper, upper + smol],
            vec![0.0, throughput, throughput, 0.0],
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wavelength(&self) -> &[f64] {
        &self.wavelength
    }

    pub fn throughput(&self) -> &[f64] {
        &self.throughput
    }

    /// Wavelength support of the curve, `[min, max]` of its table
    pub fn band_limits(&self) -> BandLimits {
        BandLimits::from_bounds(self.wavelength[0], self.wavelength[self.wavelength.len() - 1])
    }

    /// Linearly interpolate the throughput onto `grid`
    ///
    /// Every grid point must lie inside [`Self::band_limits`].
    pub fn resample(&self, grid: &[f64]) -> Result<Vec<f64>, InterpError> {
        interp_many(grid, &self.wavelength, &self.throughput)
    }
}

/// Named collection of transmission curves for one filter system
///
/// Names are matched case-sensitively. Iteration order is by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TransmissionCurve>", into = "Vec<TransmissionCurve>")]
pub struct CurveSet {
    curves: BTreeMap<String, TransmissionCurve>,
}

impl CurveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a curve, replacing any previous curve with the same name
    pub fn insert(&mut self, curve: TransmissionCurve) -> Option<TransmissionCurve> {
        self.curves.insert(curve.name.clone(), curve)
    }

    pub fn get(&self, name: &str) -> Option<&TransmissionCurve> {
        self.curves.get(name)
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.curves.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransmissionCurve> {
        self.curves.values()
    }
}

impl TryFrom<Vec<TransmissionCurve>> for CurveSet {
    type Error = TransmissionError;

    fn try_from(curves: Vec<TransmissionCurve>) -> Result<Self, Self::Error> {
        let mut set = CurveSet::new();
        for curve in curves {
            let name = curve.name.clone();
            if set.insert(curve).is_some() {
                return Err(TransmissionError::DuplicateName(name));
            }
        }
        Ok(set)
    }
}

impl From<CurveSet> for Vec<TransmissionCurve> {
    fn from(set: CurveSet) -> Self {
        set.curves.into_values().collect()
    }
}

/// Collecting follows [`CurveSet::insert`]: a later curve replaces an earlier
/// one with the same name. Use `CurveSet::try_from` (the path JSON loading
/// takes) to reject duplicate names instead.
impl FromIterator<TransmissionCurve> for CurveSet {
    fn from_iter<I: IntoIterator<Item = TransmissionCurve>>(iter: I) -> Self {
        let mut set = CurveSet::new();
        for curve in iter {
            set.insert(curve);
        }
        set
    }
}
