//! Pearson and Spearman correlation matrices

use itertools::Itertools;
use serde::Serialize;

use super::data::{Record, numeric_column};
use crate::distribution::special::normal_cdf;

/// Pairwise correlations between named variables
///
/// Each pair is computed over the rows where both variables are numeric.
/// Pairs with fewer than three such rows, or with a constant side, get a
/// coefficient of 0 and a p-value of 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    variables: Vec<String>,
    matrix: Vec<Vec<f64>>,
    p_values: Option<Vec<Vec<f64>>>,
    sample_sizes: Vec<Vec<usize>>,
}

impl CorrelationMatrix {
    /// Matrix with unit diagonal and zeros elsewhere
    #[must_use]
    pub fn identity(variables: Vec<String>) -> Self {
        let n = variables.len();
        let matrix = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        Self {
            variables,
            matrix,
            p_values: None,
            sample_sizes: vec![vec![0; n]; n],
        }
    }

    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Coefficients as rows
    #[must_use]
    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    /// Two-tailed p-values, when computed
    #[must_use]
    pub fn p_values(&self) -> Option<&[Vec<f64>]> {
        self.p_values.as_deref()
    }

    /// Number of pairwise-complete observations per pair
    #[must_use]
    pub fn sample_sizes(&self) -> &[Vec<usize>] {
        &self.sample_sizes
    }

    #[must_use]
    pub fn index_of(&self, variable: &str) -> Option<usize> {
        self.variables.iter().position(|v| v == variable)
    }

    /// Coefficient between two variables
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        Some(self.matrix[self.index_of(a)?][self.index_of(b)?])
    }

    /// P-value between two variables
    #[must_use]
    pub fn p_value(&self, a: &str, b: &str) -> Option<f64> {
        let (i, j) = (self.index_of(a)?, self.index_of(b)?);
        self.p_values.as_ref().map(|p| p[i][j])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Consume into the raw coefficient rows
    #[must_use]
    pub fn into_matrix(self) -> Vec<Vec<f64>> {
        self.matrix
    }
}

/// Pearson coefficient of two equally long samples
///
/// Returns `None` for fewer than three observations or zero variance.
#[must_use]
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 3 {
        return None;
    }
    let mean_x = x[..n].iter().sum::<f64>() / n as f64;
    let mean_y = y[..n].iter().sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Spearman rank coefficient of two equally long samples
#[must_use]
pub fn spearman(x: &[f64], y: &[f64]) -> Option<f64> {
    pearson(&average_ranks(x), &average_ranks(y))
}

/// 1-based ranks with ties sharing their mean rank
#[must_use]
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let order: Vec<usize> = (0..values.len())
        .sorted_by(|&a, &b| values[a].total_cmp(&values[b]))
        .collect();
    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Positions start..end hold ranks start+1..=end
        let rank = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}

/// Approximate two-tailed p-value for a correlation over `n` observations
///
/// The t statistic `r * sqrt((n - 2) / (1 - r^2))` is mapped onto the
/// normal scale with the Abramowitz and Stegun 26.7.8 approximation.
#[must_use]
pub fn correlation_p_value(r: f64, n: usize) -> f64 {
    if n < 3 {
        return 1.0;
    }
    if r.abs() >= 1.0 {
        return 0.0;
    }
    let df = (n - 2) as f64;
    let t = r * (df / (1.0 - r * r)).sqrt();
    let z = t * (1.0 - 1.0 / (4.0 * df)) / (1.0 + t * t / (2.0 * df)).sqrt();
    (2.0 * (1.0 - normal_cdf(z.abs()))).clamp(0.0, 1.0)
}

/// Rows where both columns are numeric
pub(crate) fn pairwise_complete(x: &[Option<f64>], y: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip()
}

fn build_matrix<S, F>(rows: &[Record], variables: &[S], coefficient: F) -> CorrelationMatrix
where
    S: AsRef<str>,
    F: Fn(&[f64], &[f64]) -> Option<f64>,
{
    let names: Vec<String> = variables.iter().map(|v| v.as_ref().to_string()).collect();
    let columns: Vec<Vec<Option<f64>>> = names.iter().map(|v| numeric_column(rows, v)).collect();
    let n = names.len();

    let mut matrix = CorrelationMatrix::identity(names);
    let mut p_values = vec![vec![1.0; n]; n];
    for i in 0..n {
        p_values[i][i] = 0.0;
        matrix.sample_sizes[i][i] = columns[i].iter().flatten().count();
    }

    for (i, j) in (0..n).tuple_combinations() {
        let (x, y) = pairwise_complete(&columns[i], &columns[j]);
        let count = x.len();
        let (r, p) = match coefficient(&x, &y) {
            Some(r) => (r, correlation_p_value(r, count)),
            None => (0.0, 1.0),
        };
        matrix.matrix[i][j] = r;
        matrix.matrix[j][i] = r;
        p_values[i][j] = p;
        p_values[j][i] = p;
        matrix.sample_sizes[i][j] = count;
        matrix.sample_sizes[j][i] = count;
    }
    matrix.p_values = Some(p_values);
    matrix
}

/// Pearson correlation matrix over the named variables
pub fn calculate_correlations<S: AsRef<str>>(rows: &[Record], variables: &[S]) -> CorrelationMatrix {
    build_matrix(rows, variables, pearson)
}

/// Spearman correlation matrix over the named variables
pub fn calculate_spearman_correlations<S: AsRef<str>>(
    rows: &[Record],
    variables: &[S],
) -> CorrelationMatrix {
    build_matrix(rows, variables, spearman)
}
