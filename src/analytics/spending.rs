//! Spending analyzer
//!
//! Totals, a ranked category breakdown, and a velocity class over a batch of
//! records normalized to a window of `days`.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroU32;

use crate::transactions::TransactionRecord;

/// Window used when the caller does not specify one
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

const DEFAULT_WINDOW: NonZeroU32 = match NonZeroU32::new(DEFAULT_WINDOW_DAYS) {
    Some(days) => days,
    None => panic!("default window must be non-zero"),
};

/// Categories kept in the breakdown
pub const TOP_CATEGORY_LIMIT: usize = 5;

const NO_DATA_SUMMARY: &str = "No transactions found in the specified period";

/// Resolve a caller-supplied day count. Zero or negative means "use the
/// default"; anything past `u32::MAX` is clamped.
pub fn window_days(requested: i64) -> NonZeroU32 {
    if requested <= 0 {
        return DEFAULT_WINDOW;
    }
    NonZeroU32::new(u32::try_from(requested).unwrap_or(u32::MAX)).unwrap_or(DEFAULT_WINDOW)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Velocity {
    Low,
    Moderate,
    High,
}

impl Velocity {
    /// Classify by spend transactions per week. Lower bounds are inclusive.
    pub fn classify(spend_count: usize, days: NonZeroU32) -> Self {
        // Multiply before dividing so whole-week windows land exactly on the boundaries.
        let per_week = spend_count as f64 * 7.0 / f64::from(days.get());

        if per_week < 2.0 {
            Velocity::Low
        } else if per_week < 7.0 {
            Velocity::Moderate
        } else {
            Velocity::High
        }
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Velocity::Low => "low",
            Velocity::Moderate => "moderate",
            Velocity::High => "high",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    #[serde(serialize_with = "money")]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingAnalysis {
    #[serde(serialize_with = "money")]
    pub total_spent: f64,
    #[serde(serialize_with = "money")]
    pub total_received: f64,
    #[serde(serialize_with = "money")]
    pub net_cashflow: f64,
    pub spend_count: usize,
    pub receive_count: usize,
    #[serde(serialize_with = "money")]
    pub avg_daily_spend: f64,
    pub velocity: Velocity,
    /// Highest first, at most [`TOP_CATEGORY_LIMIT`] entries
    pub top_categories: Vec<CategoryTotal>,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SpendingReport {
    NoData { summary: String },
    Analyzed(SpendingAnalysis),
}

impl SpendingReport {
    pub fn analysis(&self) -> Option<&SpendingAnalysis> {
        match self {
            SpendingReport::NoData { .. } => None,
            SpendingReport::Analyzed(analysis) => Some(analysis),
        }
    }
}

/// Running per-category totals that remember first-seen order
#[derive(Default)]
struct CategoryLedger {
    index: HashMap<String, usize>,
    totals: Vec<CategoryTotal>,
}

impl CategoryLedger {
    fn add(&mut self, category: &str, amount: f64) {
        match self.index.get(category) {
            Some(&i) => self.totals[i].amount += amount,
            None => {
                self.index.insert(category.to_string(), self.totals.len());
                self.totals.push(CategoryTotal {
                    category: category.to_string(),
                    amount,
                });
            }
        }
    }

    fn ranked(mut self, limit: usize) -> Vec<CategoryTotal> {
        // Stable sort: equal totals keep first-seen order.
        self.totals.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        self.totals.truncate(limit);
        self.totals
    }
}

/// Analyze spending over a window of `days`.
pub fn analyze(records: &[TransactionRecord], days: NonZeroU32) -> SpendingReport {
    if records.is_empty() {
        return SpendingReport::NoData {
            summary: NO_DATA_SUMMARY.to_string(),
        };
    }

    let mut total_spent = 0.0;
    let mut total_received = 0.0;
    let mut spend_count = 0usize;
    let mut receive_count = 0usize;
    let mut categories = CategoryLedger::default();

    for record in records {
        if record.is_send() {
            total_spent += record.amount;
            spend_count += 1;
            if !record.category.is_empty() {
                categories.add(&record.category, record.amount);
            }
        } else if record.is_receive() {
            total_received += record.amount;
            receive_count += 1;
        }
    }

    let avg_daily_spend = total_spent / f64::from(days.get());
    let net_cashflow = total_received - total_spent;

    let insights = vec![
        format!(
            "You made {} spending transactions over {} days",
            spend_count, days
        ),
        format!("Average daily spend: ${:.2}", avg_daily_spend),
        format!("Net cash flow: ${:.2}", net_cashflow),
        "Consider setting up savings goals to build financial cushion".to_string(),
    ];

    SpendingReport::Analyzed(SpendingAnalysis {
        total_spent,
        total_received,
        net_cashflow,
        spend_count,
        receive_count,
        avg_daily_spend,
        velocity: Velocity::classify(spend_count, days),
        top_categories: categories.ranked(TOP_CATEGORY_LIMIT),
        insights,
    })
}

fn money<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.2}", value))
}
