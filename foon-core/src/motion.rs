//! Per-motion success probabilities.
//!
//! File format: one `<motion>\t<probability>` entry per line. Malformed lines are skipped and
//! reported; a motion without an entry always succeeds.

use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct MotionRates {
    rates: FxHashMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MotionRateIssue {
    /// Line did not split into exactly two tab-separated fields.
    FieldCount { found: usize },
    /// Second field is not a number.
    InvalidRate { motion: String, rate: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MotionRateWarning {
    /// 1-based line number.
    pub line_no: usize,
    pub line: String,
    pub issue: MotionRateIssue,
}

impl std::fmt::Display for MotionRateWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.issue {
            MotionRateIssue::FieldCount { found } => write!(
                f,
                "line {}: expected 2 tab-separated fields, found {found}",
                self.line_no
            ),
            MotionRateIssue::InvalidRate { motion, rate } => write!(
                f,
                "line {}: could not parse rate {rate:?} for motion {motion:?}",
                self.line_no
            ),
        }
    }
}

impl MotionRates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, motion: impl Into<String>, rate: f64) {
        self.rates.insert(motion.into(), rate);
    }

    pub fn get(&self, motion: &str) -> Option<f64> {
        self.rates.get(motion).copied()
    }

    /// Probability that `motion` succeeds; unlisted motions are deterministic.
    pub fn success_probability(&self, motion: &str) -> f64 {
        self.get(motion).unwrap_or(1.0)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Parse the tab-separated rate table. Never fails: bad lines become warnings.
    pub fn parse(text: &str) -> (Self, Vec<MotionRateWarning>) {
        let mut rates = Self::new();
        let mut warnings = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            let issue = match fields.as_slice() {
                [motion, rate] => match rate.trim().parse::<f64>() {
                    Ok(r) => {
                        rates.insert(motion.trim(), r);
                        continue;
                    }
                    Err(_) => MotionRateIssue::InvalidRate {
                        motion: motion.trim().to_string(),
                        rate: rate.trim().to_string(),
                    },
                },
                other => MotionRateIssue::FieldCount { found: other.len() },
            };
            let warning = MotionRateWarning {
                line_no: i + 1,
                line: raw.to_string(),
                issue,
            };
            log::warn!("skipping motion rate entry: {warning}");
            warnings.push(warning);
        }
        (rates, warnings)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for MotionRates {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        let mut rates = Self::new();
        for (motion, rate) in iter {
            rates.insert(motion, rate);
        }
        rates
    }
}
