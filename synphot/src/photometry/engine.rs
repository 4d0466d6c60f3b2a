//! Per-filter photometry over a whole curve set
//!
//! Each filter runs select → integrate → calibrate on read-only inputs, so
//! filters are evaluated in parallel and collected into an ordered map.

use std::collections::BTreeMap;

use log::{debug, warn};
use rayon::prelude::*;

use super::band::select_band;
use super::calibration::{calibrate, Output, PhotometryConfig, ZeroPointTable};
use super::error::{FilterError, MissingInput, PhotometryError};
use super::integrator::{integrate_band, BandIntegral};
use super::spectrum::{convert_flux, FluxSpace, Spectrum};
use super::transmission::{CurveSet, TransmissionCurve};

/// Photometry of one filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterPhotometry {
    /// ∫ T·f dλ in `flux_space`
    pub integrated_flux: f64,

    /// ∫ T dλ in Å
    pub integrated_bandpass: f64,

    /// integrated_flux / integrated_bandpass
    pub mean_flux_density: f64,

    /// Magnitude or flux density, depending on `output`
    pub value: f64,

    pub flux_space: FluxSpace,
    pub output: Output,

    /// Native spectrum samples inside the band
    pub native_samples: usize,
}

/// Outcome of a photometry call, one slot per filter
///
/// Band integrals are kept for every filter that integrated, including those
/// whose calibration then failed.
#[derive(Debug, Clone, PartialEq)]
pub struct MagnitudeResult {
    filters: BTreeMap<String, Result<FilterPhotometry, FilterError>>,
    band_integrals: BTreeMap<String, BandIntegral>,
}

impl MagnitudeResult {
    pub fn get(&self, filter: &str) -> Option<&Result<FilterPhotometry, FilterError>> {
        self.filters.get(filter)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Result<FilterPhotometry, FilterError>)> {
        self.filters.iter().map(|(name, slot)| (name.as_str(), slot))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Calibrated value (magnitude or flux density) of every successful filter
    pub fn values(&self) -> BTreeMap<&str, f64> {
        self.successes().map(|(name, p)| (name, p.value)).collect()
    }

    /// Integrated in-band flux of every filter that integrated
    pub fn integrals(&self) -> BTreeMap<&str, f64> {
        self.band_integrals
            .iter()
            .map(|(name, integral)| (name.as_str(), integral.integral_flux))
            .collect()
    }

    /// Band integral of `filter`, `None` if selection or integration failed
    pub fn integral(&self, filter: &str) -> Option<&BandIntegral> {
        self.band_integrals.get(filter)
    }

    /// Filters that failed and why
    pub fn errors(&self) -> BTreeMap<&str, &FilterError> {
        self.filters
            .iter()
            .filter_map(|(name, slot)| slot.as_ref().err().map(|e| (name.as_str(), e)))
            .collect()
    }

    /// True when every filter produced a value
    pub fn is_complete(&self) -> bool {
        self.filters.values().all(Result::is_ok)
    }

    fn successes(&self) -> impl Iterator<Item = (&str, &FilterPhotometry)> {
        self.filters
            .iter()
            .filter_map(|(name, slot)| slot.as_ref().ok().map(|p| (name.as_str(), p)))
    }
}

/// Per-filter outcome, with the band integral when integration got that far
type FilterSlot = (Option<BandIntegral>, Result<FilterPhotometry, FilterError>);

fn measure_filter(
    curve: &TransmissionCurve,
    wavelength: &[f64],
    flux: &[f64],
    flux_space: FluxSpace,
    zero_points: Option<&ZeroPointTable>,
    output: Output,
) -> FilterSlot {
    let integrated = select_band(curve, wavelength, flux).and_then(|selection| {
        integrate_band(curve, &selection).map(|integral| (selection.native_samples, integral))
    });
    let (native_samples, integral) = match integrated {
        Ok(integrated) => integrated,
        Err(e) => return (None, Err(e)),
    };

    let photometry =
        calibrate(curve.name(), &integral, output, zero_points).map(|value| FilterPhotometry {
            integrated_flux: integral.integral_flux,
            integrated_bandpass: integral.integral_bandpass,
            mean_flux_density: integral.mean_flux_density(),
            value,
            flux_space,
            output,
            native_samples,
        });

    (Some(integral), photometry)
}

/// Compute synthetic photometry of `spectrum` through every curve in `curves`
///
/// The spectrum is converted once into the flux space `config.output` needs
/// (f_ν for AB magnitudes, see [`Output::flux_space`]); each filter then
/// selects its band, integrates and calibrates independently.
///
/// # Errors
///
/// [`PhotometryError::MissingInput`] when the curve set is empty, or when
/// zero-point magnitudes are requested without a zero-point table. Failures
/// of individual filters are reported inside the returned [`MagnitudeResult`].
pub fn compute(
    spectrum: &Spectrum,
    curves: &CurveSet,
    zero_points: Option<&ZeroPointTable>,
    config: &PhotometryConfig,
) -> Result<MagnitudeResult, PhotometryError> {
    if curves.is_empty() {
        return Err(PhotometryError::MissingInput(MissingInput::Curves));
    }

    if config.output == Output::ZeroPointMag && zero_points.is_none() {
        return Err(PhotometryError::MissingInput(MissingInput::ZeroPoints));
    }

    let input_space = config
        .input_flux_space
        .unwrap_or_else(|| spectrum.flux_space());
    let flux_space = config.output.flux_space(input_space);
    let wavelength = spectrum.wavelength();
    let flux = convert_flux(wavelength, spectrum.flux(), input_space, flux_space);

    debug!(
        "Photometry of {} samples through {} filters ({} -> {})",
        spectrum.len(),
        curves.len(),
        input_space,
        config.output
    );

    let curves: Vec<&TransmissionCurve> = curves.iter().collect();
    let slots: Vec<(String, FilterSlot)> = curves
        .par_iter()
        .map(|curve| {
            let slot = measure_filter(
                curve,
                wavelength,
                &flux,
                flux_space,
                zero_points,
                config.output,
            );
            (curve.name().to_string(), slot)
        })
        .collect();

    let mut filters = BTreeMap::new();
    let mut band_integrals = BTreeMap::new();
    for (name, (integral, photometry)) in slots {
        match &photometry {
            Ok(photometry) => debug!("{}: {} = {:.6e}", name, config.output, photometry.value),
            Err(e) => warn!("{}: {}", name, e),
        }
        if let Some(integral) = integral {
            band_integrals.insert(name.clone(), integral);
        }
        filters.insert(name, photometry);
    }

    Ok(MagnitudeResult {
        filters,
        band_integrals,
    })
}
