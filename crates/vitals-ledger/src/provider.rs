//! Sensor statistics: turn raw heart-rate and glucose series into payloads.
//!
//! Heart rate is approximated from an ECG row as `trunc(60 + 10 * mean)`.
//! Standard deviations are population deviations (divide by `n`). Missing
//! series contribute `0` to statistics payloads.

use std::collections::VecDeque;

use vitals_ledger_core::{ConstructionError, Payload, PayloadSchema};

/// Approximate beats per minute from one row of ECG samples.
///
/// Returns `None` for an empty row.
pub fn heart_rate_from_ecg(samples: &[f64]) -> Option<f64> {
    mean(samples).map(|m| (60.0 + 10.0 * m).trunc())
}

/// Arithmetic mean, or `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation, or `None` for empty input.
pub fn population_std(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

/// A series together with its mean and population deviation.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub values: Vec<f64>,
    pub mean: f64,
    pub std: f64,
}

/// Summarize a series. An empty series summarizes to zeros.
pub fn summarize(values: &[f64]) -> SeriesSummary {
    SeriesSummary {
        values: values.to_vec(),
        mean: mean(values).unwrap_or(0.0),
        std: population_std(values).unwrap_or(0.0),
    }
}

/// One `Statistics` payload describing both series.
pub fn statistics_payload(
    heart_rates: &[f64],
    glucose: &[f64],
) -> Result<Payload, ConstructionError> {
    let hr = summarize(heart_rates);
    let gl = summarize(glucose);
    Payload::statistics(hr.mean, hr.std, gl.mean, gl.std)
}

/// `Readings` payloads for each aligned pair; extra values in the longer
/// series are dropped.
pub fn pair_readings(
    heart_rates: &[f64],
    glucose: &[f64],
) -> Result<Vec<Payload>, ConstructionError> {
    heart_rates
        .iter()
        .zip(glucose)
        .map(|(&hr, &g)| Payload::readings(hr, g))
        .collect()
}

/// Mean and deviation over the most recent `window` values.
#[derive(Debug, Clone)]
pub struct RollingStats {
    window: usize,
    values: VecDeque<f64>,
}

impl RollingStats {
    /// A window of zero is treated as one.
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            values: VecDeque::with_capacity(window),
        }
    }

    /// Add a value and return `(mean, std)` of the current window.
    pub fn push(&mut self, value: f64) -> (f64, f64) {
        if self.values.len() == self.window {
            self.values.pop_front();
        }
        self.values.push_back(value);

        let values = self.values.make_contiguous();
        (
            mean(values).unwrap_or(0.0),
            population_std(values).unwrap_or(0.0),
        )
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

/// `Detailed` payloads for each aligned pair, with rolling statistics over the
/// last `window` readings of each series.
pub fn detailed_payloads(
    heart_rates: &[f64],
    glucose: &[f64],
    window: usize,
) -> Result<Vec<Payload>, ConstructionError> {
    let mut hr_stats = RollingStats::new(window);
    let mut gl_stats = RollingStats::new(window);

    heart_rates
        .iter()
        .zip(glucose)
        .map(|(&hr, &g)| {
            let (hr_mean, hr_std) = hr_stats.push(hr);
            let (gl_mean, gl_std) = gl_stats.push(g);
            Payload::new(
                PayloadSchema::Detailed,
                vec![hr, hr_mean, hr_std, g, gl_mean, gl_std],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_heart_rate_from_ecg() {
        assert_eq!(heart_rate_from_ecg(&[1.0, 2.0, 3.0]), Some(80.0));
        // 60 + 10 * 0.25 = 62.5, truncated
        assert_eq!(heart_rate_from_ecg(&[0.0, 0.5]), Some(62.0));
        // Truncation is toward zero: 60 + 10 * -6.75 = -7.5
        assert_eq!(heart_rate_from_ecg(&[-6.75]), Some(-7.0));
        assert_eq!(heart_rate_from_ecg(&[]), None);
    }

    #[test]
    fn test_mean_and_population_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), Some(5.0));
        assert_eq!(population_std(&values), Some(2.0));
        assert_eq!(mean(&[]), None);
        assert_eq!(population_std(&[]), None);
        assert_eq!(population_std(&[42.0]), Some(0.0));
    }

    #[test]
    fn test_summarize_empty_is_zero() {
        let s = summarize(&[]);
        assert_eq!(s.mean, 0.0);
        assert_eq!(s.std, 0.0);
        assert!(s.values.is_empty());
    }

    #[test]
    fn test_statistics_payload() {
        let p = statistics_payload(&[70.0, 80.0], &[100.0, 100.0, 130.0]).unwrap();
        assert_eq!(p.schema(), PayloadSchema::Statistics);
        assert_eq!(p.get("heart_rate_mean"), Some(75.0));
        assert_eq!(p.get("heart_rate_std"), Some(5.0));
        assert_eq!(p.get("glucose_mean"), Some(110.0));
        assert!(approx(p.get("glucose_std").unwrap(), 200.0f64.sqrt()));
    }

    #[test]
    fn test_statistics_payload_missing_series() {
        let p = statistics_payload(&[], &[]).unwrap();
        assert!(p.is_default());
    }

    #[test]
    fn test_statistics_payload_rejects_nan() {
        assert!(statistics_payload(&[f64::NAN], &[100.0]).is_err());
    }

    #[test]
    fn test_pair_readings_truncates() {
        let payloads = pair_readings(&[72.0, 75.0, 80.0], &[110.0, 108.0]).unwrap();
        assert_eq!(payloads.len(), 2);
        assert_eq!(payloads[1].get("heart_rate"), Some(75.0));
        assert_eq!(payloads[1].get("glucose"), Some(108.0));
    }

    #[test]
    fn test_rolling_stats_window() {
        let mut stats = RollingStats::new(2);
        assert_eq!(stats.push(10.0), (10.0, 0.0));
        assert_eq!(stats.push(20.0), (15.0, 5.0));
        assert_eq!(stats.push(40.0), (30.0, 10.0));
        assert_eq!(stats.len(), 2);
    }

    #[test]
    fn test_rolling_stats_zero_window() {
        let mut stats = RollingStats::new(0);
        assert_eq!(stats.window(), 1);
        assert_eq!(stats.push(3.0), (3.0, 0.0));
        assert_eq!(stats.push(5.0), (5.0, 0.0));
    }

    #[test]
    fn test_detailed_payloads() {
        let payloads = detailed_payloads(&[70.0, 80.0], &[100.0, 120.0], 5).unwrap();
        assert_eq!(payloads.len(), 2);

        let second = &payloads[1];
        assert_eq!(second.schema(), PayloadSchema::Detailed);
        assert_eq!(
            second.values(),
            &[80.0, 75.0, 5.0, 120.0, 110.0, 10.0][..]
        );
    }
}
