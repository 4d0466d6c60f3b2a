//! Band limits and selection of the spectrum samples inside a filter

use log::warn;

use super::error::FilterError;
use super::transmission::TransmissionCurve;
use crate::algo::misc::interp;

/// Below this many native samples inside a band the integral is coarse
pub const SPARSE_SAMPLE_WARNING: usize = 3;

/// Closed wavelength interval in Ångström
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandLimits {
    /// Lower wavelength bound in Ångström
    pub lower: f64,

    /// Upper wavelength bound in Ångström
    pub upper: f64,
}

impl BandLimits {
    /// Create band limits directly from lower and upper bounds
    ///
    /// Inverted or non-finite bounds are programming errors and panic.
    pub fn from_bounds(lower: f64, upper: f64) -> Self {
        if !lower.is_finite() || !upper.is_finite() {
            panic!("Wavelength range cannot contain non-finite values");
        }

        if lower > upper {
            panic!(
                "Invalid wavelength range: start must not exceed end, got {}..{}",
                lower, upper,
            );
        }

        Self { lower, upper }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Overlap of two intervals, `None` when it is empty or a single point
    pub fn intersect(&self, other: &BandLimits) -> Option<BandLimits> {
        let lower = self.lower.max(other.lower);
        let upper = self.upper.min(other.upper);
        (lower < upper).then_some(BandLimits { lower, upper })
    }
}

impl std::fmt::Display for BandLimits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}] Å", self.lower, self.upper)
    }
}

/// Spectrum samples that fall inside a filter's support
#[derive(Debug, Clone, PartialEq)]
pub struct BandSelection {
    /// Overlap of the filter support and the sampled spectrum range
    pub window: BandLimits,

    /// Spectrum grid inside the window, with the window edges added
    pub wavelength: Vec<f64>,

    /// Flux on `wavelength`; edge values are interpolated from the spectrum
    pub flux: Vec<f64>,

    /// Number of native spectrum samples inside the window
    pub native_samples: usize,
}

/// Flux at a window edge that falls between two spectrum samples
///
/// A non-finite neighbour outside the window must not leak into the band, so
/// a non-finite interpolation falls back to the nearest sample inside it.
fn edge_flux(
    edge: f64,
    wavelength: &[f64],
    flux: &[f64],
    nearest_inside: Option<usize>,
) -> Result<f64, FilterError> {
    let value = interp(edge, wavelength, flux)?;
    match nearest_inside {
        Some(idx) if !value.is_finite() => Ok(flux[idx]),
        _ => Ok(value),
    }
}

/// Select the part of a sampled spectrum covered by `curve`
///
/// The band limits are `[min, max]` of the curve wavelengths. Spectrum samples
/// inside the overlap window are kept as-is (inclusive on both ends). If a
/// window edge does not land on a sample, the flux is linearly interpolated
/// there and the edge is added, so the whole window is integrated even when
/// the spectrum is coarser than the filter.
///
/// # Arguments
///
/// * `curve` - The filter whose support defines the band
/// * `wavelength` - Spectrum wavelengths in Ångström, strictly increasing
/// * `flux` - Spectrum flux densities matching `wavelength`
///
/// # Errors
///
/// [`FilterError::NoOverlap`] when the overlap is empty or a single point.
pub fn select_band(
    curve: &TransmissionCurve,
    wavelength: &[f64],
    flux: &[f64],
) -> Result<BandSelection, FilterError> {
    let band = curve.band_limits();
    let sampled = match (wavelength.first(), wavelength.last()) {
        (Some(&lo), Some(&hi)) => BandLimits::from_bounds(lo, hi),
        _ => {
            return Err(FilterError::NoOverlap {
                band,
                spectrum: None,
            })
        }
    };

    let window = band.intersect(&sampled).ok_or(FilterError::NoOverlap {
        band,
        spectrum: Some(sampled),
    })?;

    let first = wavelength.partition_point(|w| *w < window.lower);
    let end = wavelength.partition_point(|w| *w <= window.upper);
    let native_samples = end - first;

    let mut grid = Vec::with_capacity(native_samples + 2);
    let mut values = Vec::with_capacity(native_samples + 2);

    let inside = (first < end).then(|| (first, end - 1));

    if wavelength.get(first) != Some(&window.lower) {
        grid.push(window.lower);
        values.push(edge_flux(
            window.lower,
            wavelength,
            flux,
            inside.map(|(lo, _)| lo),
        )?);
    }

    grid.extend_from_slice(&wavelength[first..end]);
    values.extend_from_slice(&flux[first..end]);

    if grid.last() != Some(&window.upper) {
        grid.push(window.upper);
        values.push(edge_flux(
            window.upper,
            wavelength,
            flux,
            inside.map(|(_, hi)| hi),
        )?);
    }

    if native_samples < SPARSE_SAMPLE_WARNING {
        warn!(
            "{}: only {} spectrum samples inside {}, integral accuracy is degraded",
            curve.name(),
            native_samples,
            window
        );
    }

    Ok(BandSelection {
        window,
        wavelength: grid,
        flux: values,
        native_samples,
    })
}
