//! Configuration records for filter systems and spectra.
//!
//! A filter system (a survey or instrument) is plain data: its transmission
//! curves and the zero point of each filter. Both are read from JSON:
//!
//! ```json
//! {
//!   "name": "HST/WFC3",
//!   "curves": [
//!     {"name": "F606W", "wavelength": [4700.0, 6000.0, 7200.0], "throughput": [0.0, 0.45, 0.0]}
//!   ],
//!   "zero_points": {"F606W": {"reference_flux": 2.87e-9}}
//! }
//! ```
//!
//! Spectra use the serde form of [`Spectrum`]:
//! `{"wavelength": [...], "flux": [...], "flux_space": "f_lambda"}`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::photometry::{CurveSet, Spectrum, ZeroPointTable};

/// Errors that can occur while loading configuration files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|source| ConfigError::Io {
        path: display.clone(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
        path: display,
        source,
    })
}

/// Transmission curves and zero points of one survey or instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSystem {
    /// Survey or instrument name, e.g. "LSST"
    pub name: String,

    pub curves: CurveSet,

    #[serde(default)]
    pub zero_points: ZeroPointTable,
}

impl FilterSystem {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a filter system from a JSON file
    ///
    /// Filters without a zero point are kept, their magnitudes will be
    /// reported as missing a zero point.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let system: FilterSystem = read_json(path)?;

        info!(
            "Filter system {} from {}: {} curves, {} zero points",
            system.name,
            path.display(),
            system.curves.len(),
            system.zero_points.len()
        );
        for name in system.missing_zero_points() {
            warn!("{}: filter {} has no zero point", system.name, name);
        }

        Ok(system)
    }

    /// Names of curves with no zero-point entry
    pub fn missing_zero_points(&self) -> Vec<&str> {
        self.curves
            .names()
            .filter(|name| !self.zero_points.contains(name))
            .collect()
    }
}

/// Load a spectrum from its JSON form
pub fn load_spectrum_json(path: &Path) -> Result<Spectrum, ConfigError> {
    read_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photometry::{FluxSpace, ZeroPoint};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LSST_LIKE: &str = r#"{
        "name": "LSST",
        "curves": [
            {"name": "g", "wavelength": [3900.0, 4800.0, 5700.0], "throughput": [0.0, 0.5, 0.0]},
            {"name": "r", "wavelength": [5300.0, 6200.0, 7100.0], "throughput": [0.0, 0.6, 0.0]},
            {"name": "y", "wavelength": [9100.0, 9800.0, 10500.0], "throughput": [0.0, 0.2, 0.0]}
        ],
        "zero_points": {
            "g": {"reference_flux": 5.23e-9},
            "r": {"reference_flux": 2.45e-9}
        }
    }"#;

    #[test]
    fn test_parse_filter_system() {
        let system = FilterSystem::from_json_str(LSST_LIKE).unwrap();

        assert_eq!(system.name, "LSST");
        assert_eq!(system.curves.len(), 3);
        assert_eq!(
            system.zero_points.get("g"),
            Some(&ZeroPoint::ReferenceFlux(5.23e-9))
        );
        assert_eq!(system.missing_zero_points(), vec!["y"]);
    }

    #[test]
    fn test_invalid_curve_rejected_on_load() {
        let json = r#"{
            "name": "broken",
            "curves": [{"name": "g", "wavelength": [5000.0, 4000.0], "throughput": [0.0, 1.0]}]
        }"#;
        assert!(FilterSystem::from_json_str(json).is_err());
    }

    #[test]
    fn test_zero_points_default_to_empty() {
        let json = r#"{
            "name": "bare",
            "curves": [{"name": "g", "wavelength": [4000.0, 5000.0], "throughput": [1.0, 1.0]}]
        }"#;
        let system = FilterSystem::from_json_str(json).unwrap();
        assert!(system.zero_points.is_empty());
    }

    #[test]
    fn test_load_files() {
        let mut system_file = NamedTempFile::new().unwrap();
        system_file.write_all(LSST_LIKE.as_bytes()).unwrap();
        let system = FilterSystem::from_json_file(system_file.path()).unwrap();
        assert_eq!(system.curves.len(), 3);

        let mut spectrum_file = NamedTempFile::new().unwrap();
        spectrum_file
            .write_all(br#"{"wavelength": [4000.0, 8000.0], "flux": [1e-16, 2e-16], "flux_space": "f_lambda"}"#)
            .unwrap();
        let spectrum = load_spectrum_json(spectrum_file.path()).unwrap();
        assert_eq!(spectrum.flux_space(), FluxSpace::FLambda);
        assert_eq!(spectrum.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let result = FilterSystem::from_json_file(Path::new("/nonexistent/system.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_round_trip_serialization() {
        let system = FilterSystem::from_json_str(LSST_LIKE).unwrap();
        let json = serde_json::to_string(&system).unwrap();
        let reloaded = FilterSystem::from_json_str(&json).unwrap();
        assert_eq!(system, reloaded);
    }
}
