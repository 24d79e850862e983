use bf_core::{Curve, Error, Result};

use crate::math::{standard_normal_cdf, standard_normal_pdf};

/// `(4/3)^(1/5)`, the Gaussian-reference factor of Silverman's rule.
const SILVERMAN_FACTOR: f64 = 1.059_223_841_048_812_7;

/// Kernel-estimation ("keys") density with a tunable bandwidth scale `rho`.
///
/// The bandwidth follows Silverman's rule scaled by `rho`:
///
/// `h = rho · (4/3)^(1/5) · σ̂ · n^(-1/5)`
///
/// where `σ̂` is the weighted sample standard deviation and `n` the effective
/// number of samples. Kernels are Gaussians truncated to the support `[low, high]`
/// so the density integrates to 1 there:
///
/// `p(x) = (1 / Σ w_i) Σ_i w_i · φ((x - x_i)/h) / (h · Z_i)`,
/// `Z_i = Φ((high - x_i)/h) - Φ((low - x_i)/h)`.
///
/// `rho < 1` sharpens the estimate, `rho > 1` smooths it.
#[derive(Debug, Clone)]
pub struct RhoKeysPdf {
    support: (f64, f64),
    centers: Vec<f64>,
    weights: Vec<f64>,
    /// Per-kernel `w_i / Z_i`.
    kernel_scale: Vec<f64>,
    sum_w: f64,
    sigma: f64,
    n_eff: f64,
    rho: f64,
    bandwidth: f64,
}

impl RhoKeysPdf {
    /// Build from samples, optional non-negative weights, the support and `rho`.
    pub fn from_samples(
        support: (f64, f64),
        samples: Vec<f64>,
        weights: Option<Vec<f64>>,
        rho: f64,
    ) -> Result<Self> {
        let (low, high) = support;
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(Error::Validation(format!(
                "RhoKeysPdf requires finite support with low < high, got ({low}, {high})"
            )));
        }
        if samples.is_empty() {
            return Err(Error::Validation("RhoKeysPdf requires at least one sample".into()));
        }
        if samples.iter().any(|&x| !x.is_finite() || x < low || x > high) {
            return Err(Error::Validation(format!(
                "RhoKeysPdf samples must be finite and lie within [{low}, {high}]"
            )));
        }
        let weights = match weights {
            Some(w) => {
                if w.len() != samples.len() {
                    return Err(Error::Validation(format!(
                        "RhoKeysPdf weights length mismatch: expected {}, got {}",
                        samples.len(),
                        w.len()
                    )));
                }
                if w.iter().any(|x| !x.is_finite() || *x < 0.0) {
                    return Err(Error::Validation(
                        "RhoKeysPdf weights must be finite and >= 0".into(),
                    ));
                }
                w
            }
            None => vec![1.0; samples.len()],
        };

        let sum_w: f64 = weights.iter().sum();
        let sum_w2: f64 = weights.iter().map(|w| w * w).sum();
        if !(sum_w.is_finite() && sum_w > 0.0) {
            return Err(Error::Validation(format!(
                "RhoKeysPdf requires sum(weights) > 0, got {sum_w}"
            )));
        }
        let mean = samples.iter().zip(&weights).map(|(x, w)| w * x).sum::<f64>() / sum_w;
        let var =
            samples.iter().zip(&weights).map(|(x, w)| w * (x - mean) * (x - mean)).sum::<f64>()
                / sum_w;
        let sigma = var.max(0.0).sqrt();
        if sigma <= 0.0 {
            return Err(Error::Validation(
                "RhoKeysPdf samples have zero spread; bandwidth is undefined".into(),
            ));
        }
        // Kish effective sample size.
        let n_eff = sum_w * sum_w / sum_w2;

        let mut pdf = Self {
            support,
            centers: samples,
            weights,
            kernel_scale: Vec::new(),
            sum_w,
            sigma,
            n_eff,
            rho: 1.0,
            bandwidth: 0.0,
        };
        pdf.set_rho(rho)?;
        Ok(pdf)
    }

    /// Change `rho` and recompute the bandwidth and kernel normalizations.
    pub fn set_rho(&mut self, rho: f64) -> Result<()> {
        if !rho.is_finite() || rho <= 0.0 {
            return Err(Error::Validation(format!("RhoKeysPdf rho must be finite and > 0, got {rho}")));
        }
        let bandwidth = rho * SILVERMAN_FACTOR * self.sigma * self.n_eff.powf(-0.2);
        let (low, high) = self.support;
        self.kernel_scale = self
            .centers
            .iter()
            .zip(&self.weights)
            .map(|(&x0, &w)| {
                let mut z = standard_normal_cdf((high - x0) / bandwidth)
                    - standard_normal_cdf((low - x0) / bandwidth);
                if !z.is_finite() || z <= 0.0 {
                    // Extreme truncation: keep the kernel finite.
                    z = f64::MIN_POSITIVE;
                }
                w / z
            })
            .collect();
        self.rho = rho;
        self.bandwidth = bandwidth;
        Ok(())
    }

    /// Bandwidth scale factor.
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Kernel bandwidth `h`.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Support `(low, high)`.
    pub fn support(&self) -> (f64, f64) {
        self.support
    }
}

impl Curve for RhoKeysPdf {
    fn evaluate(&self, x: f64) -> f64 {
        let (low, high) = self.support;
        if !(x >= low && x <= high) {
            return 0.0;
        }
        let inv_h = 1.0 / self.bandwidth;
        let s: f64 = self
            .centers
            .iter()
            .zip(&self.kernel_scale)
            .map(|(x0, k)| k * standard_normal_pdf((x - x0) * inv_h))
            .sum();
        s * inv_h / self.sum_w
    }

    fn integral(&self, lo: f64, hi: f64) -> Result<f64> {
        if lo.is_nan() || hi.is_nan() {
            return Err(Error::Validation(format!(
                "RhoKeysPdf integral bounds must not be NaN, got ({lo}, {hi})"
            )));
        }
        if hi < lo {
            return Ok(-self.integral(hi, lo)?);
        }
        let (low, high) = self.support;
        let a = lo.max(low);
        let b = hi.min(high);
        if b <= a {
            return Ok(0.0);
        }
        let inv_h = 1.0 / self.bandwidth;
        let s: f64 = self
            .centers
            .iter()
            .zip(&self.kernel_scale)
            .map(|(x0, k)| {
                k * (standard_normal_cdf((b - x0) * inv_h) - standard_normal_cdf((a - x0) * inv_h))
            })
            .sum();
        Ok(s / self.sum_w)
    }
}
