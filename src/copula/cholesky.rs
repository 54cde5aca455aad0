//! Matrix factorization for the Gaussian copula
//!
//! Matrices are small dense `Vec<Vec<f64>>` rows; sizes are the number of
//! modelled variables.

use crate::error::{Result, SynthError};
use crate::utils::logging::log_warning;

/// Smallest eigenvalue kept when repairing an indefinite matrix
pub const MIN_EIGENVALUE: f64 = 1e-8;

fn identity(n: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect()
}

/// Lower-triangular Cholesky factor `L` with `L * L^T = matrix`
///
/// Returns `None` when the matrix is not positive definite.
#[must_use]
pub fn cholesky(matrix: &[Vec<f64>]) -> Option<Vec<Vec<f64>>> {
    let n = matrix.len();
    let mut lower = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let sum: f64 = (0..j).map(|k| lower[i][k] * lower[j][k]).sum();
            if i == j {
                let diagonal = matrix[i][i] - sum;
                if diagonal <= 0.0 || !diagonal.is_finite() {
                    return None;
                }
                lower[i][j] = diagonal.sqrt();
            } else {
                lower[i][j] = (matrix[i][j] - sum) / lower[j][j];
            }
        }
    }
    Some(lower)
}

/// Eigen-decomposition of a symmetric matrix by cyclic Jacobi rotations
///
/// Returns the eigenvalues and a matrix whose columns are the matching
/// eigenvectors.
#[must_use]
pub fn jacobi_eigen(matrix: &[Vec<f64>]) -> (Vec<f64>, Vec<Vec<f64>>) {
    const MAX_SWEEPS: usize = 100;
    let n = matrix.len();
    let mut a = matrix.to_vec();
    let mut v = identity(n);

    for _ in 0..MAX_SWEEPS {
        let off_diagonal: f64 = (0..n)
            .flat_map(|i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
            .map(|(i, j)| a[i][j] * a[i][j])
            .sum();
        if off_diagonal < 1e-22 {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                if a[p][q].abs() < f64::MIN_POSITIVE {
                    continue;
                }
                let theta = (a[q][q] - a[p][p]) / (2.0 * a[p][q]);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for row in a.iter_mut() {
                    let (kp, kq) = (row[p], row[q]);
                    row[p] = c * kp - s * kq;
                    row[q] = s * kp + c * kq;
                }
                for k in 0..n {
                    let (pk, qk) = (a[p][k], a[q][k]);
                    a[p][k] = c * pk - s * qk;
                    a[q][k] = s * pk + c * qk;
                }
                for row in v.iter_mut() {
                    let (kp, kq) = (row[p], row[q]);
                    row[p] = c * kp - s * kq;
                    row[q] = s * kp + c * kq;
                }
            }
        }
    }

    let eigenvalues = (0..n).map(|i| a[i][i]).collect();
    (eigenvalues, v)
}

/// Closest usable correlation matrix to an indefinite one
///
/// Eigenvalues below [`MIN_EIGENVALUE`] are raised to it, the matrix is
/// rebuilt and rescaled back to a unit diagonal.
#[must_use]
pub fn repair_correlation_matrix(matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = matrix.len();
    let (eigenvalues, vectors) = jacobi_eigen(matrix);
    let clipped: Vec<f64> = eigenvalues.iter().map(|&l| l.max(MIN_EIGENVALUE)).collect();

    let mut rebuilt = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            rebuilt[i][j] = (0..n)
                .map(|k| vectors[i][k] * clipped[k] * vectors[j][k])
                .sum();
        }
    }

    let scale: Vec<f64> = (0..n).map(|i| rebuilt[i][i].sqrt()).collect();
    for i in 0..n {
        for j in 0..n {
            rebuilt[i][j] = if i == j {
                1.0
            } else {
                rebuilt[i][j] / (scale[i] * scale[j])
            };
        }
    }
    rebuilt
}

/// Cholesky factor of a correlation matrix, repairing it if needed
pub fn factorize(matrix: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    if let Some(lower) = cholesky(matrix) {
        return Ok(lower);
    }
    log_warning(
        "Correlation matrix is not positive definite, using nearest valid matrix",
        None,
    );
    cholesky(&repair_correlation_matrix(matrix)).ok_or_else(|| {
        SynthError::InvalidParameter(
            "correlation matrix could not be repaired to positive definite".to_string(),
        )
    })
}
