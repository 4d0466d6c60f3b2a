//! Numerical helpers shared by the photometry pipeline

pub mod misc;

pub use misc::{interp, interp_many, InterpError};
