//! Synthetic photometry of a spectrum through a filter system
//!
//! Loads a filter system (transmission curves plus zero points) and a spectrum
//! from JSON, then prints one line per filter: the integrated in-band flux and
//! either the calibrated magnitude / mean flux density or the reason the
//! filter could not be measured.

use clap::Parser;
use synphot::config::{load_spectrum_json, FilterSystem};
use synphot::photometry::CurveStore;
use synphot::shared_args::{CalibrationArgs, InputArgs};

#[derive(Parser, Debug)]
#[command(
    name = "Synthetic Photometry",
    about = "Computes synthetic magnitudes of a spectrum through a filter system",
    long_about = None
)]
struct Args {
    #[command(flatten)]
    inputs: InputArgs,

    #[command(flatten)]
    calibration: CalibrationArgs,

    /// Exit with an error if any filter fails
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = args.calibration.to_config();

    let system = FilterSystem::from_json_file(&args.inputs.system)?;
    let spectrum = load_spectrum_json(&args.inputs.spectrum)?;

    let mut store = CurveStore::for_system(system);
    store.load_spectrum(spectrum);

    let result = store.compute(&config)?;

    println!(
        "Filter system: {}",
        store.system().unwrap_or("<unnamed>")
    );
    println!("Output: {}", config.output);
    println!();
    println!("{:<12} {:<18} {:<18}", "Filter", "Integrated flux", "Value");
    println!("{:-<50}", "");

    for (name, slot) in result.iter() {
        match slot {
            Ok(photometry) => println!(
                "{:<12} {:<18.6e} {:<18.6}",
                name, photometry.integrated_flux, photometry.value
            ),
            Err(e) => match result.integral(name) {
                Some(integral) => println!(
                    "{:<12} {:<18.6e} error: {}",
                    name, integral.integral_flux, e
                ),
                None => println!("{:<12} {:<18} error: {}", name, "-", e),
            },
        }
    }

    let failures = result.errors().len();
    if args.strict && failures > 0 {
        return Err(format!("{failures} of {} filters failed", result.len()).into());
    }

    Ok(())
}
