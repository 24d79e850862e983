//! Per-bin error models for data histograms.

use bf_core::{Error, Result};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Central 68.27% interval, expressed as `alpha = 1 - CL`.
const ALPHA_68: f64 = 0.31731;

/// How bin errors are derived from bin contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorModel {
    /// Garwood (frequentist Poisson) intervals for integer counts; `sqrt(n)` otherwise.
    Poisson,
    /// Symmetric `sqrt(sumw2)`; `sqrt(n)` when no weights are tracked.
    Sqrt,
}

fn is_near_integer_nonneg(x: f64) -> Option<u64> {
    if !(x.is_finite() && x >= 0.0) {
        return None;
    }
    let r = x.round();
    if (x - r).abs() <= 1e-9 { Some(r as u64) } else { None }
}

/// Garwood 68.27% central interval for an observed count `n`.
///
/// Returns `(err_lo, err_hi)` as distances from `n`:
/// - `lo = n - 0.5 * chi2_{alpha/2, 2n}` (0 for `n = 0`)
/// - `hi = 0.5 * chi2_{1-alpha/2, 2(n+1)} - n`
pub fn garwood_interval(n: u64) -> Result<(f64, f64)> {
    let nf = n as f64;
    let lo = if n == 0 {
        0.0
    } else {
        let dist = ChiSquared::new(2.0 * nf)
            .map_err(|e| Error::Computation(format!("chi2({}) for n={n}: {e}", 2 * n)))?;
        nf - 0.5 * dist.inverse_cdf(ALPHA_68 / 2.0)
    };
    let dist_hi = ChiSquared::new(2.0 * (nf + 1.0))
        .map_err(|e| Error::Computation(format!("chi2({}) for n={n}: {e}", 2 * (n + 1))))?;
    let hi = 0.5 * dist_hi.inverse_cdf(1.0 - ALPHA_68 / 2.0) - nf;
    Ok((lo, hi))
}

/// Errors for a slice of contents under the given model.
///
/// `sumw2` is only consulted by [`ErrorModel::Sqrt`].
pub(crate) fn errors_for(
    model: ErrorModel,
    content: &[f64],
    sumw2: Option<&[f64]>,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut lo = Vec::with_capacity(content.len());
    let mut hi = Vec::with_capacity(content.len());
    match model {
        ErrorModel::Poisson => {
            for &v in content {
                if let Some(n) = is_near_integer_nonneg(v) {
                    let (dl, dh) = garwood_interval(n)?;
                    lo.push(dl);
                    hi.push(dh);
                } else {
                    let e = sqrt_or_zero(v);
                    lo.push(e);
                    hi.push(e);
                }
            }
        }
        ErrorModel::Sqrt => {
            let src = sumw2.unwrap_or(content);
            for &v in src {
                let e = sqrt_or_zero(v);
                lo.push(e);
                hi.push(e);
            }
        }
    }
    Ok((lo, hi))
}

fn sqrt_or_zero(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v.sqrt() } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_garwood_zero_count() {
        let (lo, hi) = garwood_interval(0).unwrap();
        assert_eq!(lo, 0.0);
        // Standard value: upper 68% limit for n=0 is 1.8410.
        assert_relative_eq!(hi, 1.8410, epsilon = 1e-3);
    }

    #[test]
    fn test_garwood_small_counts() {
        let (lo, hi) = garwood_interval(1).unwrap();
        assert_relative_eq!(lo, 1.0 - 0.1727, epsilon = 1e-3);
        assert_relative_eq!(hi, 3.2995 - 1.0, epsilon = 1e-3);
        let (lo, hi) = garwood_interval(10).unwrap();
        assert_relative_eq!(lo, 10.0 - 6.8913, epsilon = 1e-3);
        assert_relative_eq!(hi, 14.2670 - 10.0, epsilon = 1e-3);
    }

    #[test]
    fn test_garwood_approaches_sqrt_n() {
        let (lo, hi) = garwood_interval(10_000).unwrap();
        assert_relative_eq!(lo, 100.0, epsilon = 2.0);
        assert_relative_eq!(hi, 100.0, epsilon = 2.0);
        assert!(hi > lo);
    }

    #[test]
    fn test_poisson_falls_back_for_weighted_content() {
        let (lo, hi) = errors_for(ErrorModel::Poisson, &[2.5, 4.0], None).unwrap();
        assert_relative_eq!(lo[0], 2.5f64.sqrt());
        assert_relative_eq!(hi[0], 2.5f64.sqrt());
        assert!(hi[1] > lo[1]);
    }

    #[test]
    fn test_sqrt_uses_sumw2() {
        let (lo, hi) = errors_for(ErrorModel::Sqrt, &[10.0, 0.0], Some(&[4.0, 0.0])).unwrap();
        assert_eq!(lo, vec![2.0, 0.0]);
        assert_eq!(hi, vec![2.0, 0.0]);
    }
}
