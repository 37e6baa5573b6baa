//! Personality scorer
//!
//! Five behavioral metrics in `[0, 100]` derived from one pass over a batch.
//!
//! Two metrics are approximations, kept as-is:
//! - `transaction_velocity` assumes the batch spans about four weeks; it does
//!   not look at timestamps.
//! - `income_response` is a constant 50. Measuring spend surges after income
//!   needs temporal analysis that is not done here.

use serde::Serialize;
use std::fmt;

use crate::transactions::TransactionRecord;

const ASSUMED_WEEKS: f64 = 4.0;
const VELOCITY_SCALE: f64 = 10.0;
const SAVINGS_AMPLIFIER: f64 = 3.0;
const SAVINGS_CATEGORY: &str = "savings";
const INCOME_RESPONSE_PLACEHOLDER: f64 = 50.0;
const MAX_SCORE: f64 = 100.0;

/// Metric identifiers, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    TransactionVelocity,
    AmountDistribution,
    BalanceComfort,
    SavingsAffinity,
    IncomeResponse,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::TransactionVelocity,
        Metric::AmountDistribution,
        Metric::BalanceComfort,
        Metric::SavingsAffinity,
        Metric::IncomeResponse,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Metric::TransactionVelocity => "transaction_velocity",
            Metric::AmountDistribution => "amount_distribution",
            Metric::BalanceComfort => "balance_comfort",
            Metric::SavingsAffinity => "savings_affinity",
            Metric::IncomeResponse => "income_response",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Metric::ALL.into_iter().find(|m| m.key() == key)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PersonalityScores {
    pub transaction_velocity: f64,
    pub amount_distribution: f64,
    /// Absent when no record carried a positive balance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_comfort: Option<f64>,
    pub savings_affinity: f64,
    pub income_response: f64,
}

impl PersonalityScores {
    /// Value of a metric; an absent metric reads as 0.
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::TransactionVelocity => self.transaction_velocity,
            Metric::AmountDistribution => self.amount_distribution,
            Metric::BalanceComfort => self.balance_comfort.unwrap_or(0.0),
            Metric::SavingsAffinity => self.savings_affinity,
            Metric::IncomeResponse => self.income_response,
        }
    }

    /// Build from a loose `name -> value` map, ignoring unknown keys.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut scores = Self::default();
        for (key, value) in pairs {
            match Metric::from_key(key) {
                Some(Metric::TransactionVelocity) => scores.transaction_velocity = value,
                Some(Metric::AmountDistribution) => scores.amount_distribution = value,
                Some(Metric::BalanceComfort) => scores.balance_comfort = Some(value),
                Some(Metric::SavingsAffinity) => scores.savings_affinity = value,
                Some(Metric::IncomeResponse) => scores.income_response = value,
                None => {}
            }
        }
        scores
    }
}

/// Score a batch. Performs no minimum-size check; see [`super::profile`].
pub fn score(records: &[TransactionRecord]) -> PersonalityScores {
    let mut send_amounts = Vec::new();
    let mut balances = Vec::new();
    let mut savings_sends = 0usize;

    for record in records {
        if record.is_send() {
            send_amounts.push(record.amount);
            if record.category == SAVINGS_CATEGORY {
                savings_sends += 1;
            }
        }
        if let Some(balance) = record.valid_balance() {
            balances.push(balance);
        }
    }

    let transaction_velocity =
        (records.len() as f64 / ASSUMED_WEEKS * VELOCITY_SCALE).min(MAX_SCORE);

    let amount_distribution = (coefficient_of_variation(&send_amounts) * 100.0).min(MAX_SCORE);

    let balance_comfort = balance_buffer_ratio(&balances).map(|ratio| (ratio * 100.0).min(MAX_SCORE));

    let savings_affinity = if records.is_empty() {
        0.0
    } else {
        (savings_sends as f64 / records.len() as f64 * 100.0 * SAVINGS_AMPLIFIER).min(MAX_SCORE)
    };

    PersonalityScores {
        transaction_velocity,
        amount_distribution,
        balance_comfort,
        savings_affinity,
        income_response: INCOME_RESPONSE_PLACEHOLDER,
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

/// Standard deviation over mean; 0 for empty input or a zero mean
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if m > 0.0 {
        variance(values).sqrt() / m
    } else {
        0.0
    }
}

/// Lowest balance relative to the average balance
fn balance_buffer_ratio(balances: &[f64]) -> Option<f64> {
    let lowest = balances.iter().copied().reduce(f64::min)?;
    let avg = mean(balances);
    Some(if avg > 0.0 { lowest / avg } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_statistics_helpers() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(coefficient_of_variation(&[]), 0.0);
        assert_eq!(coefficient_of_variation(&[0.0, 0.0]), 0.0);

        // mean 5, population variance 4, sd 2
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!(approx(mean(&values), 5.0));
        assert!(approx(variance(&values), 4.0));
        assert!(approx(coefficient_of_variation(&values), 0.4));
    }

    #[test]
    fn test_score_known_batch() {
        let mut records: Vec<TransactionRecord> = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
            .into_iter()
            .map(|amt| TransactionRecord::send(amt, "food"))
            .collect();
        records[0].category = "savings".to_string();
        records.push(TransactionRecord::receive(500.0).with_balance(800.0));
        records.push(TransactionRecord::receive(500.0).with_balance(1200.0));

        let scores = score(&records);

        // 10 records / 4 weeks * 10
        assert!(approx(scores.transaction_velocity, 25.0));
        assert!(approx(scores.amount_distribution, 40.0));
        // min 800 / mean 1000
        assert_eq!(scores.balance_comfort.map(|v| (v * 1e6).round() / 1e6), Some(80.0));
        // 1 savings send of 10 records, amplified x3
        assert!(approx(scores.savings_affinity, 30.0));
        assert_eq!(scores.income_response, 50.0);
    }

    #[test]
    fn test_scores_are_capped() {
        let records: Vec<_> = (0..60)
            .map(|i| TransactionRecord::send(if i == 0 { 10_000.0 } else { 1.0 }, "savings"))
            .collect();

        let scores = score(&records);

        assert_eq!(scores.transaction_velocity, 100.0);
        assert_eq!(scores.amount_distribution, 100.0);
        assert_eq!(scores.savings_affinity, 100.0);
    }

    #[test]
    fn test_balance_comfort_absent_without_balances() {
        let records = vec![TransactionRecord::send(10.0, "food").with_balance(-5.0)];
        let scores = score(&records);

        assert_eq!(scores.balance_comfort, None);
        assert_eq!(scores.get(Metric::BalanceComfort), 0.0);

        let json = serde_json::to_value(&scores).unwrap();
        assert!(json.get("balance_comfort").is_none());
        assert_eq!(json["income_response"], 50.0);
    }

    #[test]
    fn test_no_sends_gives_zero_distribution() {
        let records = vec![TransactionRecord::receive(100.0); 3];
        assert_eq!(score(&records).amount_distribution, 0.0);
    }

    #[test]
    fn test_from_pairs_ignores_unknown_keys() {
        let scores = PersonalityScores::from_pairs([
            ("transaction_velocity", 70.0),
            ("mystery", 12.0),
            ("balance_comfort", 33.0),
        ]);

        assert_eq!(scores.get(Metric::TransactionVelocity), 70.0);
        assert_eq!(scores.get(Metric::BalanceComfort), 33.0);
        assert_eq!(scores.get(Metric::SavingsAffinity), 0.0);
        assert_eq!(scores.get(Metric::IncomeResponse), 0.0);
    }
}
