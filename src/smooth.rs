//! 1-D Gaussian smoothing
//!
//! Convolves a series with a normalized Gaussian kernel of radius
//! `floor(truncate * sigma + 0.5)`. Samples beyond either end are
//! mirrored about the edge (`d c b a | a b c d | d c b a`), so a constant
//! series stays constant and the output has the input's length.
//!
//! The radius is capped at the series length, so the kernel stays bounded
//! for any `sigma`. Series shorter than the uncapped radius therefore see a
//! truncated kernel.

/// Kernel radius for `sigma`/`truncate`, at most `max_radius`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn kernel_radius(sigma: f64, truncate: f64, max_radius: usize) -> usize {
    if sigma.is_nan() || sigma <= 0.0 {
        return 0;
    }
    let radius = (truncate * sigma + 0.5).floor();
    if radius.is_nan() || radius >= max_radius as f64 {
        max_radius
    } else {
        radius as usize
    }
}

/// Kernel weights for offsets `-radius..=radius`, summing to 1.
///
/// `max_radius` bounds the kernel length to `2 * max_radius + 1`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn gaussian_kernel(sigma: f64, truncate: f64, max_radius: usize) -> Vec<f64> {
    let radius = kernel_radius(sigma, truncate, max_radius);
    if radius == 0 {
        return vec![1.0];
    }
    let denom = 2.0 * sigma * sigma;
    let mut weights: Vec<f64> = (0..=2 * radius)
        .map(|i| {
            let x = i as f64 - radius as f64;
            (-x * x / denom).exp()
        })
        .collect();
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}

/// Smooth `values` with a Gaussian of standard deviation `sigma` samples.
///
/// Fewer than two values, or `sigma == 0`, returns the input unchanged.
#[must_use]
pub fn gaussian_smooth(values: &[f64], sigma: f64, truncate: f64) -> Vec<f64> {
    if values.len() < 2 {
        return values.to_vec();
    }
    let kernel = gaussian_kernel(sigma, truncate, values.len());
    if kernel.len() == 1 {
        return values.to_vec();
    }
    let radius = kernel.len() / 2;

    (0..values.len())
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, w)| w * values[reflect(i + k, radius, values.len())])
                .sum::<f64>()
        })
        .collect()
}

/// Index into `0..len` for position `shifted - radius`, mirrored at both ends.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn reflect(shifted: usize, radius: usize, len: usize) -> usize {
    let period = 2 * len as isize;
    let m = (shifted as isize - radius as isize).rem_euclid(period);
    let len = len as isize;
    (if m < len { m } else { period - 1 - m }) as usize
}
