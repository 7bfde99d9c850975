use crate::lookback::Lookback;
use markets_client::{Error, HistoricalClose};
use serde::Serialize;
use std::collections::BTreeMap;

/// What to do with a lookback that reaches past the oldest available close.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShortSeriesPolicy {
    /// Compare against the oldest close instead.
    #[default]
    ClampToOldest,
    /// Leave the lookback out of the result.
    Omit,
}

impl ShortSeriesPolicy {
    /// Index of the comparison close in a series of `len` closes, if any.
    pub fn index(self, days: usize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        match self {
            ShortSeriesPolicy::ClampToOldest => Some(days.min(len - 1)),
            ShortSeriesPolicy::Omit => (days < len).then_some(days),
        }
    }
}

/// Latest close plus its percent change over each lookback, keyed by `Lookback::key`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PerformanceResult {
    pub latest: f64,
    pub values: BTreeMap<String, f64>,
    pub last_date: String,
}

impl PerformanceResult {
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// `(latest - old) / old * 100`, to two decimals. A zero `old` gives a non-finite value.
pub fn percent_change(latest: f64, old: f64) -> f64 {
    round2((latest - old) / old * 100.0)
}

/// Percent changes of a most-recent-first series over `lookbacks`.
pub fn compute(
    series: &[HistoricalClose],
    lookbacks: &[Lookback],
    policy: ShortSeriesPolicy,
) -> Result<PerformanceResult, Error> {
    let head = series
        .first()
        .ok_or_else(|| Error::Data("No historical data".to_string()))?;

    let values = lookbacks
        .iter()
        .filter_map(|lookback| {
            let idx = policy.index(lookback.days, series.len())?;
            let old = series[idx].close;
            Some((lookback.key.to_string(), percent_change(head.close, old)))
        })
        .collect();

    Ok(PerformanceResult {
        latest: head.close,
        values,
        last_date: head.date.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookback::LOOKBACKS;
    use proptest::prelude::*;

    fn series(closes: &[f64]) -> Vec<HistoricalClose> {
        closes
            .iter()
            .enumerate()
            .map(|(i, close)| HistoricalClose {
                date: format!("day-{i}"),
                close: *close,
            })
            .collect()
    }

    const SCENARIO: [Lookback; 3] = [
        Lookback::new("d1", 1, "1 session"),
        Lookback::new("d2", 2, "2 sessions"),
        Lookback::new("d4", 4, "4 sessions"),
    ];

    #[test]
    fn scenario() {
        let perf = compute(
            &series(&[100.0, 95.0, 90.0, 80.0, 50.0]),
            &SCENARIO,
            ShortSeriesPolicy::default(),
        )
        .unwrap();

        assert_eq!(perf.latest, 100.0);
        assert_eq!(perf.last_date, "day-0");
        assert_eq!(perf.value("d1"), Some(5.26));
        assert_eq!(perf.value("d2"), Some(11.11));
        assert_eq!(perf.value("d4"), Some(100.0));
    }

    #[test]
    fn negative_change() {
        let perf = compute(&series(&[90.0, 100.0]), &LOOKBACKS[..1], ShortSeriesPolicy::default())
            .unwrap();
        assert_eq!(perf.value("1d"), Some(-10.0));
    }

    #[test]
    fn short_series_clamps_to_oldest() {
        let perf = compute(&series(&[110.0, 105.0, 100.0]), &LOOKBACKS, ShortSeriesPolicy::ClampToOldest)
            .unwrap();
        assert_eq!(perf.value("1d"), Some(4.76));
        assert_eq!(perf.value("1w"), Some(10.0));
        assert_eq!(perf.value("1m"), Some(10.0));
        assert_eq!(perf.value("1y"), Some(10.0));
    }

    #[test]
    fn short_series_can_omit() {
        let perf = compute(&series(&[110.0, 105.0, 100.0]), &LOOKBACKS, ShortSeriesPolicy::Omit)
            .unwrap();
        assert_eq!(perf.values.len(), 1);
        assert_eq!(perf.value("1d"), Some(4.76));
        assert_eq!(perf.value("1y"), None);
    }

    #[test]
    fn single_close_is_flat() {
        let perf = compute(&series(&[42.0]), &LOOKBACKS, ShortSeriesPolicy::default()).unwrap();
        assert!(perf.values.values().all(|v| *v == 0.0));
    }

    #[test]
    fn empty_series_is_a_data_error() {
        let err = compute(&[], &LOOKBACKS, ShortSeriesPolicy::default()).unwrap_err();
        assert_eq!(err, Error::Data("No historical data".to_string()));
    }

    #[test]
    fn zero_prior_close_is_not_finite() {
        let perf = compute(&series(&[5.0, 0.0]), &LOOKBACKS[..1], ShortSeriesPolicy::default())
            .unwrap();
        assert!(!perf.value("1d").unwrap().is_finite());
    }

    #[test]
    fn policy_index() {
        assert_eq!(ShortSeriesPolicy::ClampToOldest.index(252, 400), Some(252));
        assert_eq!(ShortSeriesPolicy::ClampToOldest.index(252, 100), Some(99));
        assert_eq!(ShortSeriesPolicy::Omit.index(252, 100), None);
        assert_eq!(ShortSeriesPolicy::Omit.index(0, 1), Some(0));
        assert_eq!(ShortSeriesPolicy::ClampToOldest.index(1, 0), None);
    }

    proptest! {
        #[test]
        fn within_range_matches_the_formula(
            closes in prop::collection::vec(0.01f64..10_000.0, 1..300),
            days in 0usize..300,
        ) {
            let days = days % closes.len();
            let lookback = [Lookback::new("n", days, "n sessions")];
            let perf = compute(&series(&closes), &lookback, ShortSeriesPolicy::default()).unwrap();
            let expected = round2((closes[0] - closes[days]) / closes[days] * 100.0);
            prop_assert_eq!(perf.value("n"), Some(expected));
        }

        #[test]
        fn beyond_range_uses_the_last_close(
            closes in prop::collection::vec(0.01f64..10_000.0, 1..50),
            extra in 0usize..300,
        ) {
            let days = closes.len() + extra;
            let last = closes[closes.len() - 1];
            let lookback = [Lookback::new("n", days, "n sessions")];
            let perf = compute(&series(&closes), &lookback, ShortSeriesPolicy::ClampToOldest).unwrap();
            prop_assert_eq!(perf.value("n"), Some(percent_change(closes[0], last)));
        }
    }
}
