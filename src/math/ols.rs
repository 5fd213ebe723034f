//! Least squares solver for the log-log regression.
//!
//! The power-law fit reduces to one tiny linear regression:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! with a two-column design matrix (intercept, log-frequency). Any closed-form
//! OLS solution is acceptable here; we solve via SVD so the result stays
//! well-defined even when the design matrix is tall or the log-frequencies are
//! nearly collinear (e.g. narrow windows spanning a fraction of a decade).

use nalgebra::{DMatrix, DVector};

/// Solve an ordinary least squares problem using SVD.
///
/// Returns `None` if no finite solution can be produced.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    let beta = svd.solve(y, 1e-12).ok()?;
    if beta.iter().all(|v| v.is_finite()) {
        Some(beta)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn least_squares_matches_uniform_weight_normal_equations() {
        // Overdetermined system; compare against the textbook normal-equation
        // solution for uniform weights.
        let xs = [15.0, 15.5, 16.0, 16.5, 17.0];
        let ys = [21.0, 20.4, 20.1, 19.2, 18.9];
        let n = xs.len();

        let x = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { xs[i] });
        let y = DVector::from_row_slice(&ys);
        let beta = solve_least_squares(&x, &y).unwrap();

        let sum_x: f64 = xs.iter().sum();
        let sum_y: f64 = ys.iter().sum();
        let sum_xy: f64 = xs.iter().zip(&ys).map(|(a, b)| a * b).sum();
        let sum_x2: f64 = xs.iter().map(|a| a * a).sum();
        let nf = n as f64;
        let slope = (nf * sum_xy - sum_x * sum_y) / (nf * sum_x2 - sum_x * sum_x);
        let intercept = (sum_y - slope * sum_x) / nf;

        assert!((beta[1] - slope).abs() < 1e-9);
        assert!((beta[0] - intercept).abs() < 1e-9);
    }
}
