//! Linear interpolation over tabulated curves.
//!
//! Filter throughputs and spectra are both stored as sampled tables. This
//! module resamples a table at arbitrary abscissae:
//!
//! - **Single point**: [`interp`] validates the table and evaluates one value
//! - **Grid**: [`interp_many`] validates once and evaluates a whole grid
//!
//! Both refuse to extrapolate. Callers clip their query grid to the table
//! support first (see the band selector).

use thiserror::Error;

/// Errors that can occur during interpolation operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpError {
    #[error("Value {0} is out of bounds for interpolation range [{1}, {2}]")]
    OutOfBounds(f64, f64, f64),
    #[error("Input vectors must have at least 2 points")]
    InsufficientData,
    #[error("Input vectors must have the same length")]
    MismatchedLengths,
    #[error("X values must be sorted in ascending order")]
    UnsortedData,
}

fn validate_table(xs: &[f64], ys: &[f64]) -> Result<(), InterpError> {
    if xs.len() != ys.len() {
        return Err(InterpError::MismatchedLengths);
    }

    if xs.len() < 2 {
        return Err(InterpError::InsufficientData);
    }

    if xs.windows(2).any(|pair| pair[1] <= pair[0]) {
        return Err(InterpError::UnsortedData);
    }

    Ok(())
}

/// Evaluate an already validated table at `x` using binary search.
fn interp_unchecked(x: f64, xs: &[f64], ys: &[f64]) -> Result<f64, InterpError> {
    let min_x = xs[0];
    let max_x = xs[xs.len() - 1];

    if !(min_x..=max_x).contains(&x) {
        return Err(InterpError::OutOfBounds(x, min_x, max_x));
    }

    let idx = match xs.binary_search_by(|probe| probe.total_cmp(&x)) {
        Ok(exact_idx) => return Ok(ys[exact_idx]),
        Err(insert_idx) => insert_idx,
    };

    // x is strictly inside (xs[idx - 1], xs[idx]) here
    let (x1, x2) = (xs[idx - 1], xs[idx]);
    let (y1, y2) = (ys[idx - 1], ys[idx]);

    let t = (x - x1) / (x2 - x1);
    Ok(y1 + t * (y2 - y1))
}

/// Performs linear interpolation on 1D data using binary search for efficiency.
///
/// # Arguments
///
/// * `x` - The x-coordinate at which to interpolate
/// * `xs` - Array of x-coordinates (must be sorted in ascending order)
/// * `ys` - Array of corresponding y-values (must match length of xs)
///
/// # Examples
///
/// ```rust
/// use synphot::algo::misc::interp;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let wavelengths = vec![4800.0, 5000.0, 5200.0];
/// let throughput = vec![0.0, 1.0, 0.0];
///
/// assert_eq!(interp(4900.0, &wavelengths, &throughput)?, 0.5);
/// assert_eq!(interp(5000.0, &wavelengths, &throughput)?, 1.0);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// * `InterpError::OutOfBounds` - x is outside the range \\[xs\\[0\\], xs\\[n-1\\]\\]
/// * `InterpError::InsufficientData` - Less than 2 data points provided
/// * `InterpError::MismatchedLengths` - xs and ys have different lengths
/// * `InterpError::UnsortedData` - xs array is not sorted in ascending order
pub fn interp(x: f64, xs: &[f64], ys: &[f64]) -> Result<f64, InterpError> {
    validate_table(xs, ys)?;
    interp_unchecked(x, xs, ys)
}

/// Resample a table onto a grid of query points.
///
/// The table is validated once, then every point of `grid` is evaluated with
/// the same rules as [`interp`]. Any query outside the table support fails the
/// whole call.
pub fn interp_many(grid: &[f64], xs: &[f64], ys: &[f64]) -> Result<Vec<f64>, InterpError> {
    validate_table(xs, ys)?;
    grid.iter()
        .map(|&x| interp_unchecked(x, xs, ys))
        .collect()
}
