//! Named histograms and curves drawn on one frame.

use std::fmt;

use bf_core::{Curve, Error, Result};

use crate::histogram::Histogram;

/// A plot frame pairing histograms with fitted curves.
///
/// Entries keep registration order; the first histogram and the first curve are
/// the defaults returned when no name is given.
#[derive(Default)]
pub struct Plot {
    name: String,
    histograms: Vec<Histogram>,
    curves: Vec<(String, Box<dyn Curve>)>,
}

impl Plot {
    /// Create an empty plot.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), histograms: Vec::new(), curves: Vec::new() }
    }

    /// Plot name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a histogram under its own name. Names must be unique.
    pub fn add_histogram(&mut self, histogram: Histogram) -> Result<()> {
        if self.histograms.iter().any(|h| h.name == histogram.name) {
            return Err(Error::Validation(format!(
                "plot '{}' already has a histogram named '{}'",
                self.name, histogram.name
            )));
        }
        tracing::debug!(
            plot = %self.name,
            histogram = %histogram.name,
            bins = histogram.n_bins(),
            "histogram added"
        );
        self.histograms.push(histogram);
        Ok(())
    }

    /// Register a curve. Names must be unique.
    pub fn add_curve(&mut self, name: impl Into<String>, curve: impl Curve + 'static) -> Result<()> {
        self.add_boxed_curve(name, Box::new(curve))
    }

    /// Register an already boxed curve. Names must be unique.
    pub fn add_boxed_curve(&mut self, name: impl Into<String>, curve: Box<dyn Curve>) -> Result<()> {
        let name = name.into();
        if self.curves.iter().any(|(n, _)| *n == name) {
            return Err(Error::Validation(format!(
                "plot '{}' already has a curve named '{name}'",
                self.name
            )));
        }
        tracing::debug!(plot = %self.name, curve = %name, "curve added");
        self.curves.push((name, curve));
        Ok(())
    }

    /// Histogram by name, or the default (first registered) one for `None`.
    pub fn histogram(&self, name: Option<&str>) -> Result<&Histogram> {
        match name {
            Some(n) => self
                .histograms
                .iter()
                .find(|h| h.name == n)
                .ok_or_else(|| Error::histogram_not_found(n)),
            None => self.histograms.first().ok_or_else(|| Error::histogram_not_found("<default>")),
        }
    }

    /// Curve by name, or the default (first registered) one for `None`.
    ///
    /// Returns the resolved name alongside the curve.
    pub fn curve(&self, name: Option<&str>) -> Result<(&str, &dyn Curve)> {
        let entry = match name {
            Some(n) => {
                self.curves.iter().find(|(cn, _)| cn == n).ok_or_else(|| Error::curve_not_found(n))
            }
            None => self.curves.first().ok_or_else(|| Error::curve_not_found("<default>")),
        }?;
        Ok((entry.0.as_str(), &*entry.1))
    }

    /// Default histogram, if any.
    pub fn default_histogram(&self) -> Option<&Histogram> {
        self.histograms.first()
    }

    /// Histogram names in registration order.
    pub fn histogram_names(&self) -> impl Iterator<Item = &str> {
        self.histograms.iter().map(|h| h.name.as_str())
    }

    /// Curve names in registration order.
    pub fn curve_names(&self) -> impl Iterator<Item = &str> {
        self.curves.iter().map(|(n, _)| n.as_str())
    }

    /// Number of histograms.
    pub fn n_histograms(&self) -> usize {
        self.histograms.len()
    }

    /// Number of curves.
    pub fn n_curves(&self) -> usize {
        self.curves.len()
    }
}

impl fmt::Debug for Plot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plot")
            .field("name", &self.name)
            .field("histograms", &self.histogram_names().collect::<Vec<_>>())
            .field("curves", &self.curve_names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampled::SampledCurve;

    fn flat(v: f64) -> SampledCurve {
        SampledCurve::new(vec![0.0, 10.0], vec![v, v]).unwrap()
    }

    fn hist(name: &str) -> Histogram {
        Histogram::with_symmetric_errors(name, vec![0.0, 1.0], vec![1.0], vec![1.0]).unwrap()
    }

    #[test]
    fn test_defaults_are_first_registered() {
        let mut p = Plot::new("frame");
        p.add_histogram(hist("data")).unwrap();
        p.add_histogram(hist("toy")).unwrap();
        p.add_curve("model", flat(1.0)).unwrap();
        p.add_curve("bkg", flat(2.0)).unwrap();

        assert_eq!(p.histogram(None).unwrap().name, "data");
        let (name, c) = p.curve(None).unwrap();
        assert_eq!(name, "model");
        assert_eq!(c.evaluate(5.0), 1.0);
        let (name, c) = p.curve(Some("bkg")).unwrap();
        assert_eq!(name, "bkg");
        assert_eq!(c.evaluate(5.0), 2.0);
        assert_eq!(p.histogram_names().collect::<Vec<_>>(), vec!["data", "toy"]);
    }

    #[test]
    fn test_lookup_failures() {
        let mut p = Plot::new("frame");
        assert!(matches!(p.histogram(None), Err(Error::NotFound { kind: "histogram", .. })));
        assert!(matches!(p.curve(None), Err(Error::NotFound { kind: "curve", .. })));

        p.add_histogram(hist("data")).unwrap();
        p.add_curve("model", flat(1.0)).unwrap();
        match p.curve(Some("missing")) {
            Err(Error::NotFound { kind, name }) => {
                assert_eq!(kind, "curve");
                assert_eq!(name, "missing");
            }
            other => panic!("expected NotFound, got {:?}", other.map(|(n, _)| n)),
        }
        assert!(matches!(p.histogram(Some("nope")), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut p = Plot::new("frame");
        p.add_histogram(hist("data")).unwrap();
        assert!(p.add_histogram(hist("data")).is_err());
        p.add_curve("model", flat(1.0)).unwrap();
        assert!(p.add_curve("model", flat(2.0)).is_err());
        assert_eq!(p.n_histograms(), 1);
        assert_eq!(p.n_curves(), 1);
    }

    #[test]
    fn test_plot_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Plot>();
    }
}
