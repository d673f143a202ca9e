//! Pairwise agreement counts between a system clustering and gold clusters.
//!
//! For every unordered pair of mentions:
//!
//! | gold same | system same | outcome |
//! |-----------|-------------|---------|
//! | yes | yes | true positive |
//! | yes | no  | false negative |
//! | no  | yes | false positive |
//! | no  | no  | true negative |
//!
//! Mentions without a gold label never take part.
//!
//! # Example
//!
//! ```rust
//! use sanaphor::eval::Evaluator;
//!
//! let mut eval = Evaluator::default();
//! eval.score_labels(&[("A", 1), ("A", 1), ("B", 2)]);
//! assert_eq!(eval.true_positives, 1);
//! assert_eq!(eval.true_negatives, 2);
//! ```

use sanaphor_core::Mention;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// TP/TN/FP/FN counts over mention pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluator {
    /// Same gold cluster, same system cluster.
    pub true_positives: usize,
    /// Different gold clusters, different system clusters.
    pub true_negatives: usize,
    /// Different gold clusters, same system cluster.
    pub false_positives: usize,
    /// Same gold cluster, different system clusters.
    pub false_negatives: usize,
}

impl Evaluator {
    /// Classify one pair of (gold, system) labels.
    pub fn record<G: PartialEq, S: PartialEq>(&mut self, a: (&G, &S), b: (&G, &S)) {
        match (a.0 == b.0, a.1 == b.1) {
            (true, true) => self.true_positives += 1,
            (true, false) => self.false_negatives += 1,
            (false, true) => self.false_positives += 1,
            (false, false) => self.true_negatives += 1,
        }
    }

    /// Classify explicit pairs.
    pub fn score_pairs<G, S, I>(&mut self, pairs: I)
    where
        G: PartialEq,
        S: PartialEq,
        I: IntoIterator<Item = ((G, S), (G, S))>,
    {
        for ((g1, s1), (g2, s2)) in pairs {
            self.record((&g1, &s1), (&g2, &s2));
        }
    }

    /// Classify every unordered pair drawn from `labels`.
    pub fn score_labels<G: PartialEq, S: PartialEq>(&mut self, labels: &[(G, S)]) {
        for (i, (g1, s1)) in labels.iter().enumerate() {
            for (g2, s2) in &labels[i + 1..] {
                self.record((g1, s1), (g2, s2));
            }
        }
    }

    /// Classify every pair of gold-labeled mentions, each paired with its
    /// system label. Unlabeled mentions are dropped first.
    pub fn score_mentions<'a, S, I>(&mut self, mentions: I)
    where
        S: PartialEq,
        I: IntoIterator<Item = (&'a Mention, S)>,
    {
        let labels: Vec<(&str, S)> = mentions
            .into_iter()
            .filter_map(|(m, system)| m.gold_coref_id.as_deref().map(|gold| (gold, system)))
            .collect();
        self.score_labels(&labels);
    }

    /// Number of pairs classified.
    #[must_use]
    pub fn total(&self) -> usize {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    /// TP / (TP + FP), or 0 with no predicted links.
    #[must_use]
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// TP / (TP + FN), or 0 with no gold links.
    #[must_use]
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    /// Harmonic mean of precision and recall.
    #[must_use]
    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r > 0.0 {
            2.0 * p * r / (p + r)
        } else {
            0.0
        }
    }

    /// (TP + TN) / total, or 0 with no pairs.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl AddAssign for Evaluator {
    fn add_assign(&mut self, other: Self) {
        self.true_positives += other.true_positives;
        self.true_negatives += other.true_negatives;
        self.false_positives += other.false_positives;
        self.false_negatives += other.false_negatives;
    }
}

impl Add for Evaluator {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl fmt::Display for Evaluator {
    /// `TP FP TN FN`, the order the report prints them in.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.true_positives, self.false_positives, self.true_negatives, self.false_negatives
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_of_each_outcome() {
        let mut eval = Evaluator::default();
        eval.score_pairs(vec![
            (("A", 1), ("A", 1)),
            (("A", 1), ("A", 2)),
            (("A", 1), ("B", 1)),
            (("A", 1), ("B", 2)),
        ]);
        assert_eq!(eval.true_positives, 1);
        assert_eq!(eval.false_negatives, 1);
        assert_eq!(eval.false_positives, 1);
        assert_eq!(eval.true_negatives, 1);
        assert_eq!(eval.total(), 4);
    }

    #[test]
    fn test_all_combinations_counted() {
        let mut eval = Evaluator::default();
        let labels: Vec<(u32, u32)> = (0..6).map(|i| (i % 2, i % 3)).collect();
        eval.score_labels(&labels);
        assert_eq!(eval.total(), 15);
    }

    #[test]
    fn test_unlabeled_mentions_excluded() {
        let a = Mention::new("1", "Paris", 0, 0, 1).with_gold("1");
        let b = Mention::new("2", "city", 0, 3, 4).with_gold("1");
        let c = Mention::new("3", "it", 1, 0, 1);

        let mut eval = Evaluator::default();
        eval.score_mentions([(&a, 0), (&b, 0), (&c, 0)]);
        assert_eq!(eval.total(), 1);
        assert_eq!(eval.true_positives, 1);
    }

    #[test]
    fn test_empty_and_single_inputs() {
        let mut eval = Evaluator::default();
        eval.score_labels::<&str, u8>(&[]);
        eval.score_labels(&[("A", 0)]);
        assert_eq!(eval, Evaluator::default());
        assert_eq!(eval.precision(), 0.0);
        assert_eq!(eval.f1(), 0.0);
    }

    #[test]
    fn test_metrics() {
        let eval = Evaluator {
            true_positives: 3,
            true_negatives: 4,
            false_positives: 1,
            false_negatives: 2,
        };
        assert!((eval.precision() - 0.75).abs() < 1e-9);
        assert!((eval.recall() - 0.6).abs() < 1e-9);
        assert!((eval.f1() - 2.0 * 0.75 * 0.6 / 1.35).abs() < 1e-9);
        assert!((eval.accuracy() - 0.7).abs() < 1e-9);
        assert_eq!(eval.to_string(), "3 1 4 2");
    }

    #[test]
    fn test_sum() {
        let a = Evaluator {
            true_positives: 1,
            ..Default::default()
        };
        let b = Evaluator {
            false_negatives: 2,
            ..Default::default()
        };
        let sum = a + b;
        assert_eq!(sum.true_positives, 1);
        assert_eq!(sum.false_negatives, 2);
    }
}
