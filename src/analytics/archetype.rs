//! Archetype matcher
//!
//! A fixed catalog of spending archetypes. Each one scores a
//! [`PersonalityScores`] with a weighted sum over the five metrics, where a
//! term can use the metric directly or its complement (`100 - value`).

use serde::Serialize;

use super::personality::{Metric, PersonalityScores};

const DEFAULT_CONFIDENCE: f64 = 0.7;
const BASE_CONFIDENCE: f64 = 0.5;
const MAX_CONFIDENCE: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub metric: Metric,
    pub weight: f64,
    /// Score `100 - value` instead of `value`
    pub inverted: bool,
}

const fn direct(metric: Metric, weight: f64) -> Term {
    Term {
        metric,
        weight,
        inverted: false,
    }
}

const fn inverse(metric: Metric, weight: f64) -> Term {
    Term {
        metric,
        weight,
        inverted: true,
    }
}

#[derive(Debug, PartialEq)]
pub struct Archetype {
    pub name: &'static str,
    pub emoji: &'static str,
    pub terms: &'static [Term],
    pub traits: &'static [&'static str],
    pub triggers: &'static [&'static str],
    pub strategies: &'static [&'static str],
    pub fun_fact: &'static str,
}

impl Archetype {
    pub fn score(&self, scores: &PersonalityScores) -> f64 {
        self.terms
            .iter()
            .map(|term| {
                let value = scores.get(term.metric);
                let value = if term.inverted { 100.0 - value } else { value };
                value * term.weight
            })
            .sum()
    }
}

/// Best-matching archetype and how clearly it won
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypePick {
    #[serde(rename = "type")]
    pub name: &'static str,
    pub emoji: &'static str,
    /// In `[0.5, 0.95]`
    pub confidence: f64,
    pub traits: &'static [&'static str],
    pub triggers: &'static [&'static str],
    pub strategies: &'static [&'static str],
    pub fun_fact: &'static str,
}

impl ArchetypePick {
    fn from_archetype(archetype: &Archetype, confidence: f64) -> Self {
        Self {
            name: archetype.name,
            emoji: archetype.emoji,
            confidence,
            traits: archetype.traits,
            triggers: archetype.triggers,
            strategies: archetype.strategies,
            fun_fact: archetype.fun_fact,
        }
    }

    /// Confidence as a whole percentage, e.g. `"73%"`
    pub fn confidence_percent(&self) -> String {
        format!("{:.0}%", self.confidence * 100.0)
    }
}

/// Match against the built-in catalog.
pub fn match_archetype(scores: &PersonalityScores) -> ArchetypePick {
    match best_match(&ARCHETYPES, scores) {
        Some(pick) => pick,
        // The built-in catalog is never empty.
        None => ArchetypePick::from_archetype(&ARCHETYPES[0], DEFAULT_CONFIDENCE),
    }
}

/// Pick the highest-scoring archetype. Ties go to the earlier catalog entry.
pub fn best_match(catalog: &[Archetype], scores: &PersonalityScores) -> Option<ArchetypePick> {
    let first = catalog.first()?;
    let mut best = first;
    let mut best_score = first.score(scores);
    let mut all_scores = Vec::with_capacity(catalog.len());
    all_scores.push(best_score);

    for archetype in &catalog[1..] {
        let s = archetype.score(scores);
        all_scores.push(s);
        if s > best_score {
            best = archetype;
            best_score = s;
        }
    }

    Some(ArchetypePick::from_archetype(best, confidence(&mut all_scores)))
}

/// Margin between the two best scores, mapped onto `[0.5, 0.95]`.
fn confidence(scores: &mut [f64]) -> f64 {
    if scores.len() < 2 {
        return DEFAULT_CONFIDENCE;
    }
    scores.sort_by(f64::total_cmp);
    let n = scores.len();
    let margin = scores[n - 1] - scores[n - 2];
    (BASE_CONFIDENCE + margin / 100.0).min(MAX_CONFIDENCE)
}

/// Built-in archetypes. Order is the tie-break priority.
pub static ARCHETYPES: [Archetype; 5] = [
    Archetype {
        name: "The Reward Seeker",
        emoji: "🎉",
        terms: &[
            direct(Metric::TransactionVelocity, 0.4),
            inverse(Metric::SavingsAffinity, 0.3),
            direct(Metric::IncomeResponse, 0.3),
        ],
        traits: &[
            "You spend to celebrate and feel good",
            "Money is a tool for experiences and pleasure",
            "High transaction frequency - lots of small treats",
            "Impulsive but not reckless",
        ],
        triggers: &[
            "Income hits = immediate 'treat yourself' urge",
            "Stress or bad day triggers comfort spending",
            "Social occasions: primary spending driver",
        ],
        strategies: &[
            "Auto-save 20% BEFORE you see your paycheck (out of sight, out of mind)",
            "Keep a visible 'celebration budget' so treats don't feel restricted",
            "Gamify savings: every $500 saved = unlock a $50 reward",
            "Schedule 'mini celebrations' that cost $0 (movie night at home, etc.)",
        ],
        fun_fact: "Reward Seekers save 47% more when savings feel like 'winning' rather than 'restricting'. Your brain needs the dopamine hit!",
    },
    Archetype {
        name: "The Safety Hoarder",
        emoji: "🛡️",
        terms: &[
            direct(Metric::BalanceComfort, 0.4),
            inverse(Metric::TransactionVelocity, 0.3),
            direct(Metric::SavingsAffinity, 0.3),
        ],
        traits: &[
            "You maintain a high balance buffer at all times",
            "Low transaction frequency - you think before spending",
            "Money anxiety drives conservative behavior",
            "'What if' scenarios dominate your financial decisions",
        ],
        triggers: &[
            "Balance dipping below comfort threshold triggers stress",
            "Unexpected expenses cause disproportionate anxiety",
            "You delay purchases waiting for 'the right time'",
        ],
        strategies: &[
            "Calculate your TRUE minimum (3 months expenses) and relax about the rest",
            "Move excess beyond safety threshold to high-yield savings",
            "Set up 'if-then' rules: IF balance > $X, THEN auto-move to savings",
            "Track what you DON'T spend vs what you do (flip the anxiety narrative)",
        ],
        fun_fact: "Safety Hoarders often sit on $5,000+ earning 0% interest when their actual safety threshold is $2,000. You're losing $200+/year to fear!",
    },
    Archetype {
        name: "The Impulse Optimizer",
        emoji: "⚡",
        terms: &[
            direct(Metric::TransactionVelocity, 0.4),
            inverse(Metric::AmountDistribution, 0.3),
            inverse(Metric::SavingsAffinity, 0.3),
        ],
        traits: &[
            "High transaction frequency - many small purchases",
            "Convenience over cost is your philosophy",
            "You optimize for time and ease, not dollars",
            "Spending is habitual and automatic",
        ],
        triggers: &[
            "Daily coffee/food runs add up to 30% of spending",
            "One-click purchase features are dangerous",
            "'Just this once' happens 5+ times per week",
        ],
        strategies: &[
            "Add friction: 24-hour delay for purchases over $25",
            "Round-up savings: auto-save the 'change' from each transaction",
            "Batch purchases: weekly grocery trip instead of daily stops",
            "Make saving the path of least resistance (auto-transfer on payday)",
        ],
        fun_fact: "Impulse Optimizers spend 40% more on convenience purchases than they estimate. Your $4 coffee habit is actually $8/day when you count the muffin!",
    },
    Archetype {
        name: "The Cyclical Spender",
        emoji: "🌊",
        terms: &[
            direct(Metric::AmountDistribution, 0.4),
            direct(Metric::IncomeResponse, 0.3),
            inverse(Metric::BalanceComfort, 0.3),
        ],
        traits: &[
            "Boom-bust spending cycles dominate your pattern",
            "Large irregular transactions mixed with quiet periods",
            "Emotional state drives financial decisions",
            "Balance swings wildly month to month",
        ],
        triggers: &[
            "Stress or celebration both trigger spending sprees",
            "'Flush with cash' feeling leads to overshooting",
            "Low balance periods create panic and restriction",
        ],
        strategies: &[
            "Income smoothing: divide monthly income into weekly 'paychecks'",
            "Create artificial scarcity: move money OUT immediately",
            "Separate accounts: one for bills, one for discretionary, one for savings",
            "Track cycles and predict them (you're more regular than you think)",
        ],
        fun_fact: "Cyclical Spenders have the most to gain from automation. Smoothing your income into weekly distributions can cut overspending by 60%!",
    },
    Archetype {
        name: "The Strategic Planner",
        emoji: "🎯",
        terms: &[
            inverse(Metric::AmountDistribution, 0.3),
            direct(Metric::SavingsAffinity, 0.3),
            inverse(Metric::IncomeResponse, 0.2),
            direct(Metric::BalanceComfort, 0.2),
        ],
        traits: &[
            "Consistent, predictable spending patterns",
            "High savings rate without much effort",
            "You're already optimized - low variation in behavior",
            "Natural financial discipline",
        ],
        triggers: &[
            "Rare - you don't have strong triggers",
            "Unusual expenses are planned and budgeted",
            "You think ahead and avoid surprises",
        ],
        strategies: &[
            "Maximize interest arbitrage - you have the discipline",
            "Explore tax optimization and advanced strategies",
            "Consider investing surplus rather than just saving",
            "Help others - your natural skills could benefit friends",
        ],
        fun_fact: "Strategic Planners are rare (only 12% of people). Your challenge isn't saving more - it's not becoming too rigid. Allow yourself some spontaneity!",
    },
];
