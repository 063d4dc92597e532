/// 1-D Gaussian weights, following OpenCV's `getGaussianKernel` contract.
///
/// `ksize` is assumed odd and positive (the blur entry point checks it).
/// A sigma that is not positive is derived from the kernel size the way
/// OpenCV derives it, so a 1-tap kernel with sigma 0 collapses to `[1.0]`.
pub fn gaussian_kernel(ksize: u32, sigma: f64) -> Vec<f64> {
    let sigma = if sigma > 0.0 {
        sigma
    } else {
        0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8
    };

    let center = (ksize / 2) as f64;
    let scale = -0.5 / (sigma * sigma);

    let mut weights: Vec<f64> = (0..ksize)
        .map(|i| ((i as f64 - center).powi(2) * scale).exp())
        .collect();

    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }

    weights
}
