//! Bandpass-weighted flux integration

use super::band::BandSelection;
use super::error::FilterError;
use super::transmission::TransmissionCurve;
use super::trapezoid::trapz;

/// Result of integrating a spectrum through one filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandIntegral {
    /// ∫ T(λ) f(λ) dλ over the band
    pub integral_flux: f64,

    /// ∫ T(λ) dλ over the band, always > 0
    pub integral_bandpass: f64,
}

impl BandIntegral {
    /// Throughput-weighted mean flux density over the band
    pub fn mean_flux_density(&self) -> f64 {
        self.integral_flux / self.integral_bandpass
    }
}

/// Integrate the band-limited spectrum through `curve`
///
/// The filter throughput is linearly interpolated onto the selection's
/// wavelength grid; the spectrum itself is never resampled. Both T·f and T
/// are integrated with the trapezoidal rule on that grid.
///
/// # Errors
///
/// * [`FilterError::DegenerateBandpass`] - ∫T dλ is not a positive finite number
/// * [`FilterError::InvalidFlux`] - ∫T·f dλ is NaN, infinite or negative
pub fn integrate_band(
    curve: &TransmissionCurve,
    selection: &BandSelection,
) -> Result<BandIntegral, FilterError> {
    let throughput = curve.resample(&selection.wavelength)?;

    let weighted_flux: Vec<f64> = throughput
        .iter()
        .zip(&selection.flux)
        .map(|(t, f)| t * f)
        .collect();

    let integral_flux = trapz(&selection.wavelength, &weighted_flux)?;
    let integral_bandpass = trapz(&selection.wavelength, &throughput)?;

    if !integral_bandpass.is_finite() || integral_bandpass <= 0.0 {
        return Err(FilterError::DegenerateBandpass(integral_bandpass));
    }

    if !integral_flux.is_finite() || integral_flux < 0.0 {
        return Err(FilterError::InvalidFlux(integral_flux));
    }

    Ok(BandIntegral {
        integral_flux,
        integral_bandpass,
    })
}
