use crate::config::WatchItem;
use crate::lookback::Lookback;
use crate::Outcome;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    /// Missing or non-finite value.
    Undefined,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MetricCell {
    pub key: &'static str,
    pub label: &'static str,
    pub value: Option<f64>,
    pub text: String,
    pub tone: Tone,
}

/// One entry of the grid.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum Card {
    Metrics {
        name: String,
        ticker: String,
        last_date: String,
        latest: String,
        metrics: Vec<MetricCell>,
    },
    Failed {
        name: String,
        ticker: String,
        message: String,
    },
}

impl Card {
    pub fn ticker(&self) -> &str {
        match self {
            Card::Metrics { ticker, .. } | Card::Failed { ticker, .. } => ticker.as_str(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Card::Failed { .. })
    }
}

/// `+x.xx%` for zero and gains, `-x.xx%` for losses, `n/a` otherwise.
pub fn format_percent(value: Option<f64>) -> (String, Tone) {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => (format!("+{:.2}%", v.abs()), Tone::Positive),
        Some(v) if v.is_finite() => (format!("{v:.2}%"), Tone::Negative),
        _ => ("n/a".to_string(), Tone::Undefined),
    }
}

/// One card per item, in item order; `outcomes[i]` belongs to `items[i]`.
pub fn render(items: &[WatchItem], outcomes: &[Outcome], lookbacks: &[Lookback]) -> Vec<Card> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match outcomes.get(i) {
            Some(Ok(perf)) => Card::Metrics {
                name: item.name.clone(),
                ticker: item.ticker.clone(),
                last_date: perf.last_date.clone(),
                latest: format!("{:.2}", perf.latest),
                metrics: lookbacks
                    .iter()
                    .map(|lookback| {
                        let value = perf.value(lookback.key);
                        let (text, tone) = format_percent(value);
                        MetricCell {
                            key: lookback.key,
                            label: lookback.label,
                            value,
                            text,
                            tone,
                        }
                    })
                    .collect(),
            },
            Some(Err(e)) => Card::Failed {
                name: item.name.clone(),
                ticker: item.ticker.clone(),
                message: format!("Error: {e}"),
            },
            None => Card::Failed {
                name: item.name.clone(),
                ticker: item.ticker.clone(),
                message: "Error: no result".to_string(),
            },
        })
        .collect()
}
