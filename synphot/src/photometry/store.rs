//! Session holder for a spectrum, a filter system and its zero points

use log::info;

use super::calibration::{PhotometryConfig, ZeroPointTable};
use super::engine::{compute, MagnitudeResult};
use super::error::{MissingInput, PhotometryError};
use super::spectrum::Spectrum;
use super::transmission::{CurveSet, TransmissionCurve};
use crate::config::FilterSystem;

/// Holds the current inputs of a photometry session
///
/// Inputs can be replaced at any time. Nothing is cached between calls, so a
/// reload simply changes what the next [`CurveStore::compute`] sees.
#[derive(Debug, Clone, Default)]
pub struct CurveStore {
    system: Option<String>,
    spectrum: Option<Spectrum>,
    curves: CurveSet,
    zero_points: Option<ZeroPointTable>,
}

impl CurveStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store populated from a filter system configuration record
    pub fn for_system(system: FilterSystem) -> Self {
        let mut store = Self::new();
        store.load_filter_system(system);
        store
    }

    pub fn load_spectrum(&mut self, spectrum: Spectrum) {
        let (lo, hi) = spectrum.wavelength_bounds();
        info!(
            "Loaded spectrum with {} samples over [{}, {}] Å ({})",
            spectrum.len(),
            lo,
            hi,
            spectrum.flux_space()
        );
        self.spectrum = Some(spectrum);
    }

    /// Replace the whole curve set
    pub fn load_curves(&mut self, curves: CurveSet) {
        info!("Loaded {} transmission curves", curves.len());
        self.curves = curves;
    }

    pub fn insert_curve(&mut self, curve: TransmissionCurve) -> Option<TransmissionCurve> {
        self.curves.insert(curve)
    }

    pub fn set_zero_points(&mut self, zero_points: ZeroPointTable) {
        self.zero_points = Some(zero_points);
    }

    /// Replace curves and zero points with those of `system`
    pub fn load_filter_system(&mut self, system: FilterSystem) {
        info!("Using filter system {}", system.name);
        self.system = Some(system.name);
        self.load_curves(system.curves);
        self.set_zero_points(system.zero_points);
    }

    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    pub fn spectrum(&self) -> Option<&Spectrum> {
        self.spectrum.as_ref()
    }

    pub fn curves(&self) -> &CurveSet {
        &self.curves
    }

    pub fn zero_points(&self) -> Option<&ZeroPointTable> {
        self.zero_points.as_ref()
    }

    /// Run photometry on the current inputs
    ///
    /// # Errors
    ///
    /// [`PhotometryError::MissingInput`] if no spectrum is loaded, plus the
    /// call-level errors of [`compute`].
    pub fn compute(&self, config: &PhotometryConfig) -> Result<MagnitudeResult, PhotometryError> {
        let spectrum = self
            .spectrum
            .as_ref()
            .ok_or(PhotometryError::MissingInput(MissingInput::Spectrum))?;

        compute(spectrum, &self.curves, self.zero_points.as_ref(), config)
    }
}
