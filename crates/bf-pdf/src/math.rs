use statrs::function::erf::erfc;

/// `1/sqrt(2π)`.
const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

#[inline]
pub(crate) fn standard_normal_pdf(z: f64) -> f64 {
    INV_SQRT_2PI * (-0.5 * z * z).exp()
}

/// `Φ(z)` via `erfc`, accurate in both tails.
#[inline]
pub(crate) fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / std::f64::consts::SQRT_2)
}
