//! Dense least squares for small polynomial design matrices.
//!
//! We solve
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! through the normal equations `XᵀX β = Xᵀy`:
//! - the system is tiny (at most 4 columns), so forming `XᵀX` is cheap
//! - `XᵀX` is Jacobi-scaled (unit diagonal) before elimination so the pivot
//!   threshold is independent of the magnitude of the x values
//! - Gaussian elimination with partial pivoting; a vanishing pivot means the
//!   columns are (numerically) collinear and we report no solution

use nalgebra::{DMatrix, DVector};

/// Pivot magnitude (on the unit-diagonal scaled system) treated as zero.
const PIVOT_EPS: f64 = 1e-12;

/// Vandermonde design matrix: one row `[1, x, x², …, x^degree]` per x.
pub fn vandermonde(xs: &[f64], degree: usize) -> DMatrix<f64> {
    DMatrix::from_fn(xs.len(), degree + 1, |i, j| xs[i].powi(j as i32))
}

/// Solve a least squares problem via the normal equations.
///
/// Returns `None` if `XᵀX` is singular (or too ill-conditioned to trust) or the
/// solution is not finite.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    if x.nrows() != y.len() || x.ncols() == 0 {
        return None;
    }
    let xt = x.transpose();
    let ata = &xt * x;
    let aty = &xt * y;
    solve_normal_equations(ata, aty)
}

fn solve_normal_equations(mut a: DMatrix<f64>, mut b: DVector<f64>) -> Option<DVector<f64>> {
    let n = a.nrows();

    let scale: Vec<f64> = (0..n).map(|i| a[(i, i)].sqrt()).collect();
    if scale.iter().any(|s| !(s.is_finite() && *s > 0.0)) {
        return None;
    }
    for i in 0..n {
        for j in 0..n {
            a[(i, j)] /= scale[i] * scale[j];
        }
        b[i] /= scale[i];
    }

    for col in 0..n {
        let (pivot_row, pivot_abs) = (col..n)
            .map(|r| (r, a[(r, col)].abs()))
            .fold((col, f64::NEG_INFINITY), |best, cur| if cur.1 > best.1 { cur } else { best });
        if !(pivot_abs.is_finite() && pivot_abs > PIVOT_EPS) {
            return None;
        }
        if pivot_row != col {
            a.swap_rows(col, pivot_row);
            b.swap_rows(col, pivot_row);
        }

        for r in (col + 1)..n {
            let factor = a[(r, col)] / a[(col, col)];
            if factor == 0.0 {
                continue;
            }
            for c in col..n {
                a[(r, c)] -= factor * a[(col, c)];
            }
            b[r] -= factor * b[col];
        }
    }

    let mut z: DVector<f64> = DVector::zeros(n);
    for i in (0..n).rev() {
        let mut acc = b[i];
        for j in (i + 1)..n {
            acc -= a[(i, j)] * z[j];
        }
        z[i] = acc / a[(i, i)];
    }

    let beta = DVector::from_fn(n, |i, _| z[i] / scale[i]);
    beta.iter().all(|v| v.is_finite()).then_some(beta)
}
