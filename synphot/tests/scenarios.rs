//! End-to-end photometry scenarios on synthetic spectra and filter sets.

use approx::assert_relative_eq;
use synphot::photometry::{
    compute, flambda_to_fnu, fnu_to_flambda, CurveSet, CurveStore, FilterError, FluxSpace,
    Output, PhotometryConfig, Spectrum, TransmissionCurve, ZeroPointTable, CGS,
};

/// Evenly sampled wavelength grid in Å, inclusive of both ends
fn grid(start: f64, end: f64, step: f64) -> Vec<f64> {
    let n = ((end - start) / step).round() as usize;
    (0..=n).map(|i| start + step * i as f64).collect()
}

/// Triangular bandpass peaking at `center` with half-width `half_width`
fn triangle(name: &str, center: f64, half_width: f64, peak: f64) -> TransmissionCurve {
    TransmissionCurve::new(
        name,
        vec![center - half_width, center, center + half_width],
        vec![0.0, peak, 0.0],
    )
    .unwrap()
}

/// A set of broadband filters loosely modelled on HST WFC3/UVIS
fn wfc3_like() -> (CurveSet, ZeroPointTable) {
    let curves: CurveSet = vec![
        triangle("F275W", 2750.0, 250.0, 0.15),
        triangle("F336W", 3360.0, 280.0, 0.25),
        triangle("F438W", 4320.0, 320.0, 0.3),
        TransmissionCurve::new(
            "F606W",
            vec![4700.0, 5000.0, 6000.0, 7000.0, 7200.0],
            vec![0.0, 0.35, 0.45, 0.35, 0.0],
        )
        .unwrap(),
        triangle("F814W", 8000.0, 1000.0, 0.25),
    ]
    .into_iter()
    .collect();

    let zero_points = ZeroPointTable::from_reference_fluxes([
        ("F275W", 3.74e-9),
        ("F336W", 3.26e-9),
        ("F438W", 6.73e-9),
        ("F606W", 2.87e-9),
        ("F814W", 1.14e-9),
    ]);

    (curves, zero_points)
}

/// Smooth, positive, irregularly sampled f_λ spectrum covering 2000-10000 Å
fn model_spectrum() -> Spectrum {
    let mut wavelength = Vec::new();
    let mut lambda = 2000.0;
    let mut i = 0;
    while lambda <= 10000.0 {
        wavelength.push(lambda);
        lambda += if i % 3 == 0 { 7.0 } else { 13.0 };
        i += 1;
    }
    let flux = wavelength
        .iter()
        .map(|l| 1e-15 * (l / 5000.0_f64).powf(-1.5) * (1.0 + 0.1 * (l / 300.0).sin()))
        .collect();

    Spectrum::new(wavelength, flux, FluxSpace::FLambda).unwrap()
}

#[test]
fn test_concrete_zero_point_scenario() {
    let spectrum = Spectrum::new(
        vec![4000.0, 4500.0, 5000.0, 5500.0, 6000.0],
        vec![1e-15; 5],
        FluxSpace::FLambda,
    )
    .unwrap();
    let curves: CurveSet = vec![triangle("F500", 5000.0, 200.0, 1.0)]
        .into_iter()
        .collect();
    let mut zero_points = ZeroPointTable::new();
    zero_points.insert(
        "F500",
        synphot::photometry::ZeroPoint::Offset(2.5 * 5.0e-9_f64.log10()),
    );

    let result = compute(
        &spectrum,
        &curves,
        Some(&zero_points),
        &PhotometryConfig::new(Output::ZeroPointMag),
    )
    .unwrap();

    let photometry = result.get("F500").unwrap().as_ref().unwrap();
    assert_relative_eq!(
        photometry.integrated_flux / photometry.integrated_bandpass,
        1e-15,
        max_relative = 1e-12
    );
    assert_relative_eq!(photometry.value, -2.5 * 2e-7_f64.log10(), epsilon = 1e-9);
    assert_relative_eq!(photometry.value, 16.74, epsilon = 0.01);
}

#[test]
fn test_flat_fnu_is_zero_ab_in_every_band() {
    let wavelength = grid(2000.0, 10000.0, 10.0);
    let flux = vec![CGS::AB_ZERO_POINT_FLUX_DENSITY; wavelength.len()];
    let spectrum = Spectrum::new(wavelength, flux, FluxSpace::FNu).unwrap();
    let (curves, _) = wfc3_like();

    let result = compute(&spectrum, &curves, None, &PhotometryConfig::new(Output::AbMag)).unwrap();

    assert!(result.is_complete());
    for (name, mag) in result.values() {
        assert_relative_eq!(mag, 0.0, epsilon = 1e-3);
        assert!(mag.is_finite(), "{name} magnitude not finite");
    }
}

#[test]
fn test_flat_fnu_given_as_flambda_is_zero_ab() {
    // Same 3631 Jy source, expressed per Å; AB mode converts back to f_ν
    let wavelength = grid(2000.0, 10000.0, 5.0);
    let fnu = vec![CGS::AB_ZERO_POINT_FLUX_DENSITY; wavelength.len()];
    let flambda = fnu_to_flambda(&wavelength, &fnu);
    let spectrum = Spectrum::new(wavelength, flambda, FluxSpace::FLambda).unwrap();
    let (curves, _) = wfc3_like();

    let result = compute(&spectrum, &curves, None, &PhotometryConfig::new(Output::AbMag)).unwrap();

    assert!(result.is_complete());
    assert_eq!(result.values().len(), 5);
    for (_, mag) in result.values() {
        assert_relative_eq!(mag, 0.0, epsilon = 1e-3);
    }
}

#[test]
fn test_filters_inside_spectrum_are_finite() {
    let (curves, zero_points) = wfc3_like();
    let result = compute(
        &model_spectrum(),
        &curves,
        Some(&zero_points),
        &PhotometryConfig::default(),
    )
    .unwrap();

    assert_eq!(result.len(), 5);
    for (name, slot) in result.iter() {
        let photometry = slot.as_ref().unwrap();
        assert!(photometry.integrated_bandpass > 0.0, "{name}");
        assert!(photometry.value.is_finite(), "{name}");
        assert!(photometry.native_samples > 3, "{name}");
    }
}

#[test]
fn test_compute_is_idempotent() {
    let (curves, zero_points) = wfc3_like();
    let spectrum = model_spectrum();
    let config = PhotometryConfig::default();

    let first = compute(&spectrum, &curves, Some(&zero_points), &config).unwrap();
    let second = compute(&spectrum, &curves, Some(&zero_points), &config).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_flux_scaling_shifts_ab_magnitudes() {
    let (curves, _) = wfc3_like();
    let spectrum = model_spectrum();
    let config = PhotometryConfig::new(Output::AbMag);

    let base = compute(&spectrum, &curves, None, &config).unwrap();
    assert!(base.is_complete());
    assert_eq!(base.values().len(), curves.len());

    for k in [0.01, 3.7, 250.0] {
        let scaled = compute(&spectrum.scaled(k), &curves, None, &config).unwrap();
        assert!(scaled.is_complete());
        for (name, mag) in base.values() {
            assert_relative_eq!(
                scaled.values()[name] - mag,
                -2.5 * k.log10(),
                epsilon = 1e-9
            );
        }
    }
}

#[test]
fn test_unit_conversion_round_trip() {
    let spectrum = model_spectrum();
    let fnu = flambda_to_fnu(spectrum.wavelength(), spectrum.flux());
    let back = fnu_to_flambda(spectrum.wavelength(), &fnu);

    for (original, recovered) in spectrum.flux().iter().zip(&back) {
        assert_relative_eq!(original, recovered, max_relative = 1e-12);
    }
}

#[test]
fn test_out_of_range_filter_does_not_affect_others() {
    let (curves, zero_points) = wfc3_like();
    let spectrum = model_spectrum();
    let config = PhotometryConfig::default();
    let baseline = compute(&spectrum, &curves, Some(&zero_points), &config).unwrap();
    assert!(baseline.is_complete());
    assert_eq!(baseline.values().len(), curves.len());

    let mut with_ir = curves.clone();
    with_ir.insert(triangle("F160W", 15400.0, 1400.0, 0.5));
    let mut ir_zero_points = zero_points.clone();
    ir_zero_points.insert(
        "F160W",
        synphot::photometry::ZeroPoint::ReferenceFlux(1.9e-10),
    );

    let result = compute(&spectrum, &with_ir, Some(&ir_zero_points), &config).unwrap();

    assert!(matches!(
        result.get("F160W"),
        Some(Err(FilterError::NoOverlap { .. }))
    ));
    assert_eq!(result.len(), curves.len() + 1);
    assert_eq!(result.errors().len(), 1);
    for (name, value) in baseline.values() {
        assert_eq!(result.values()[name], value);
    }
}

#[test]
fn test_partial_coverage_uses_overlap() {
    // Spectrum stops halfway through the filter; the red half is still measured
    let wavelength = grid(4000.0, 5000.0, 10.0);
    let flux = vec![2e-16; wavelength.len()];
    let spectrum = Spectrum::new(wavelength, flux, FluxSpace::FLambda).unwrap();
    let curves: CurveSet = vec![triangle("F500", 5000.0, 200.0, 1.0)]
        .into_iter()
        .collect();

    let result = compute(&spectrum, &curves, None, &PhotometryConfig::new(Output::FLambda)).unwrap();

    let photometry = result.get("F500").unwrap().as_ref().unwrap();
    assert_relative_eq!(photometry.integrated_bandpass, 100.0, epsilon = 1e-9);
    assert_relative_eq!(photometry.value, 2e-16, max_relative = 1e-12);
}

#[test]
fn test_store_session_matches_direct_compute() {
    let (curves, zero_points) = wfc3_like();
    let spectrum = model_spectrum();
    let config = PhotometryConfig::default();

    let mut store = CurveStore::new();
    store.load_curves(curves.clone());
    store.set_zero_points(zero_points.clone());
    store.load_spectrum(spectrum.clone());

    let from_store = store.compute(&config).unwrap();
    let direct = compute(&spectrum, &curves, Some(&zero_points), &config).unwrap();
    assert_eq!(from_store, direct);
}
