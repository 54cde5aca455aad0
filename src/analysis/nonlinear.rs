//! Mutual-information screening for non-linear dependence

use itertools::Itertools;
use serde::Serialize;

use super::correlation::{pairwise_complete, pearson};
use super::data::{Record, numeric_column};

/// Dependence scores for one pair of variables
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NonLinearCorrelation {
    pub variable1: String,
    pub variable2: String,
    /// Mutual information normalized by the smaller marginal entropy
    pub mutual_information: f64,
    pub pearson: f64,
    /// Strong dependence that the linear coefficient misses
    pub is_non_linear: bool,
}

/// Equal-width bin index of every value
fn bin_indices(values: &[f64], bins: usize) -> Vec<usize> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let width = max - min;
    values
        .iter()
        .map(|&v| {
            if width > 0.0 {
                (((v - min) / width * bins as f64) as usize).min(bins - 1)
            } else {
                0
            }
        })
        .collect()
}

fn entropy(counts: &[usize], n: f64) -> f64 {
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / n;
            -p * p.ln()
        })
        .sum()
}

/// Histogram estimate of mutual information, normalized to `[0, 1]`
///
/// Both samples are split into `bins` equal-width bins. The result is
/// `I(X; Y) / min(H(X), H(Y))`, or 0 when either side is constant.
#[must_use]
pub fn mutual_information(x: &[f64], y: &[f64], bins: usize) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 || bins < 2 {
        return 0.0;
    }
    let bx = bin_indices(&x[..n], bins);
    let by = bin_indices(&y[..n], bins);

    let mut joint = vec![0usize; bins * bins];
    let mut count_x = vec![0usize; bins];
    let mut count_y = vec![0usize; bins];
    for (&i, &j) in bx.iter().zip(&by) {
        joint[i * bins + j] += 1;
        count_x[i] += 1;
        count_y[j] += 1;
    }

    let total = n as f64;
    let h_x = entropy(&count_x, total);
    let h_y = entropy(&count_y, total);
    let denominator = h_x.min(h_y);
    if denominator <= 0.0 {
        return 0.0;
    }

    let mut mi = 0.0;
    for i in 0..bins {
        for j in 0..bins {
            let c = joint[i * bins + j];
            if c == 0 {
                continue;
            }
            let p_xy = c as f64 / total;
            let p_x = count_x[i] as f64 / total;
            let p_y = count_y[j] as f64 / total;
            mi += p_xy * (p_xy / (p_x * p_y)).ln();
        }
    }
    (mi / denominator).clamp(0.0, 1.0)
}

/// Score every pair of variables for non-linear dependence
///
/// A pair is flagged when its normalized mutual information reaches
/// `mi_threshold` while `|pearson|` stays below `linear_cutoff`. Flagged
/// pairs come first, each group ordered by mutual information, highest
/// first.
pub fn detect_non_linear_correlations<S: AsRef<str>>(
    rows: &[Record],
    variables: &[S],
    bins: usize,
    mi_threshold: f64,
    linear_cutoff: f64,
) -> Vec<NonLinearCorrelation> {
    let columns: Vec<Vec<Option<f64>>> = variables
        .iter()
        .map(|v| numeric_column(rows, v.as_ref()))
        .collect();

    (0..variables.len())
        .tuple_combinations()
        .map(|(i, j)| {
            let (x, y) = pairwise_complete(&columns[i], &columns[j]);
            let mutual_information = mutual_information(&x, &y, bins);
            let r = pearson(&x, &y).unwrap_or(0.0);
            NonLinearCorrelation {
                variable1: variables[i].as_ref().to_string(),
                variable2: variables[j].as_ref().to_string(),
                mutual_information,
                pearson: r,
                is_non_linear: mutual_information >= mi_threshold && r.abs() < linear_cutoff,
            }
        })
        .sorted_by(|a, b| {
            b.is_non_linear
                .cmp(&a.is_non_linear)
                .then(b.mutual_information.total_cmp(&a.mutual_information))
        })
        .collect()
}
