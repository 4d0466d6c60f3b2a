use crate::photometry::{FluxSpace, Output, PhotometryConfig};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Flux space of the input spectrum
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FluxSpaceArg {
    /// erg s⁻¹ cm⁻² Å⁻¹
    FLambda,
    /// erg s⁻¹ cm⁻² Hz⁻¹
    FNu,
}

impl From<FluxSpaceArg> for FluxSpace {
    fn from(arg: FluxSpaceArg) -> Self {
        match arg {
            FluxSpaceArg::FLambda => FluxSpace::FLambda,
            FluxSpaceArg::FNu => FluxSpace::FNu,
        }
    }
}

/// Quantity reported per filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputArg {
    /// Mean f_λ over the band
    FLambda,
    /// Mean f_ν over the band
    FNu,
    /// AB magnitude
    AbMag,
    /// Magnitude from the filter system's zero points - Default
    #[default]
    ZeroPointMag,
}

impl std::fmt::Display for OutputArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Output::from(*self))
    }
}

impl From<OutputArg> for Output {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::FLambda => Output::FLambda,
            OutputArg::FNu => Output::FNu,
            OutputArg::AbMag => Output::AbMag,
            OutputArg::ZeroPointMag => Output::ZeroPointMag,
        }
    }
}

/// Arguments selecting how a spectrum is calibrated
#[derive(Parser, Debug, Clone)]
pub struct CalibrationArgs {
    /// Override the flux space recorded in the spectrum file
    #[arg(long, value_enum)]
    pub input_flux_space: Option<FluxSpaceArg>,

    /// Quantity to report for each filter
    #[arg(long, value_enum, default_value_t = OutputArg::ZeroPointMag)]
    pub output: OutputArg,
}

impl CalibrationArgs {
    pub fn to_config(&self) -> PhotometryConfig {
        PhotometryConfig {
            input_flux_space: self.input_flux_space.map(FluxSpace::from),
            output: self.output.into(),
        }
    }
}

/// Input files of a photometry run
#[derive(Parser, Debug, Clone)]
pub struct InputArgs {
    /// Filter system JSON (curves and zero points)
    #[arg(long)]
    pub system: PathBuf,

    /// Spectrum JSON ({"wavelength": [...], "flux": [...], "flux_space": "f_lambda"})
    #[arg(long)]
    pub spectrum: PathBuf,
}
