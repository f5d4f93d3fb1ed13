//! Dense Newton-Raphson solver with a relative step boundary.

use crate::error::SolverResult;
use crate::jacobian::finite_difference_jacobian;
use nalgebra::DVector;

/// Newton solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for the residual norm
    pub abs_tol: f64,
    /// Relative finite-difference increment for the Jacobian
    pub derivative_step: f64,
    /// Largest allowed step per unknown, as a multiple of `max(|x|, 1)`.
    /// `None` leaves steps unbounded.
    pub relative_boundary: Option<f64>,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            abs_tol: 1e-3,
            derivative_step: 1e-3,
            relative_boundary: Some(50.0),
            line_search_beta: 0.5,
            max_line_search_iters: 30,
        }
    }
}

/// Newton iteration result.
#[derive(Debug, Clone)]
pub struct NewtonResult {
    /// Solution vector (last iterate when not converged)
    pub x: DVector<f64>,
    /// Final residual norm
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Converged flag
    pub converged: bool,
}

/// A root-finder over a dense residual function.
pub trait RootFinder {
    /// Search for `x` with `residual(x) = 0` starting at `x0`.
    ///
    /// Exhausting the iteration budget is reported through
    /// `NewtonResult::converged`, not as an error. Errors come from the
    /// residual itself.
    fn solve<F>(&self, residual: F, x0: DVector<f64>) -> SolverResult<NewtonResult>
    where
        F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>;
}

/// Newton-Raphson with a finite-difference Jacobian.
#[derive(Debug, Clone, Default)]
pub struct NewtonRaphson {
    pub config: NewtonConfig,
}

impl NewtonRaphson {
    pub fn new(config: NewtonConfig) -> Self {
        Self { config }
    }
}

impl RootFinder for NewtonRaphson {
    fn solve<F>(&self, residual: F, x0: DVector<f64>) -> SolverResult<NewtonResult>
    where
        F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
    {
        newton_solve(x0, residual, &self.config)
    }
}

/// Scale `dx` uniformly so no component exceeds `bound * max(|x|, 1)`.
fn limit_step(x: &DVector<f64>, dx: &mut DVector<f64>, bound: f64) {
    let ratio = x
        .iter()
        .zip(dx.iter())
        .map(|(xi, di)| di.abs() / (bound * xi.abs().max(1.0)))
        .fold(0.0_f64, f64::max);
    if ratio > 1.0 {
        *dx /= ratio;
    }
}

/// Newton solver with line search and relative step boundary.
pub fn newton_solve<F>(
    x0: DVector<f64>,
    residual_fn: F,
    config: &NewtonConfig,
) -> SolverResult<NewtonResult>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let mut x = x0;
    let mut r = residual_fn(&x)?;
    let mut r_norm = r.norm();

    let not_converged = |x: DVector<f64>, r_norm: f64, iterations: usize| NewtonResult {
        x,
        residual_norm: r_norm,
        iterations,
        converged: false,
    };

    if !r_norm.is_finite() {
        tracing::warn!(r_norm, "initial residual is not finite");
        return Ok(not_converged(x, r_norm, 0));
    }

    for iter in 0..config.max_iterations {
        // Check convergence
        if r_norm <= config.abs_tol {
            return Ok(NewtonResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
                converged: true,
            });
        }

        let jac = finite_difference_jacobian(&x, &r, &residual_fn, config.derivative_step)?;

        // Solve J * dx = -r
        let Some(mut dx) = jac.lu().solve(&(-&r)) else {
            tracing::warn!(iter, "singular Jacobian");
            return Ok(not_converged(x, r_norm, iter));
        };
        if dx.iter().any(|v| !v.is_finite()) {
            tracing::warn!(iter, "non-finite Newton step");
            return Ok(not_converged(x, r_norm, iter));
        }

        if let Some(bound) = config.relative_boundary {
            limit_step(&x, &mut dx, bound);
        }

        // Backtrack until the residual norm decreases
        let mut alpha = 1.0;
        let mut accepted = None;
        for _ in 0..config.max_line_search_iters {
            let x_new = &x + alpha * &dx;
            let r_new = residual_fn(&x_new)?;
            let r_new_norm = r_new.norm();
            if r_new_norm.is_finite() && r_new_norm < r_norm {
                accepted = Some((x_new, r_new, r_new_norm));
                break;
            }
            alpha *= config.line_search_beta;
        }

        let Some((x_new, r_new, r_new_norm)) = accepted else {
            tracing::warn!(iter, r_norm, "line search stagnated");
            return Ok(not_converged(x, r_norm, iter + 1));
        };

        tracing::debug!(iter, alpha, residual = r_new_norm, "newton step");

        x = x_new;
        r = r_new;
        r_norm = r_new_norm;
    }

    if r_norm <= config.abs_tol {
        return Ok(NewtonResult {
            x,
            residual_norm: r_norm,
            iterations: config.max_iterations,
            converged: true,
        });
    }

    Ok(not_converged(x, r_norm, config.max_iterations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;

    fn scalar<F: Fn(f64) -> f64>(f: F) -> impl Fn(&DVector<f64>) -> SolverResult<DVector<f64>> {
        move |x: &DVector<f64>| Ok(DVector::from_element(1, f(x[0])))
    }

    fn tight() -> NewtonConfig {
        NewtonConfig {
            abs_tol: 1e-10,
            ..Default::default()
        }
    }

    #[test]
    fn simple_quadratic() {
        // Solve x^2 - 4 = 0, x > 0
        let result =
            newton_solve(DVector::from_element(1, 3.0), scalar(|x| x * x - 4.0), &tight())
                .unwrap();

        assert!(result.converged);
        assert!((result.x[0] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn starts_from_zero() {
        // x^3 + x - 10 = 0 has the root x = 2
        let result = NewtonRaphson::new(tight())
            .solve(scalar(|x| x * x * x + x - 10.0), DVector::zeros(1))
            .unwrap();

        assert!(result.converged);
        assert!((result.x[0] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn boundary_limits_first_step() {
        // Linear residual with a tiny slope: the raw step would be 1e6
        let config = NewtonConfig {
            max_iterations: 1,
            relative_boundary: Some(50.0),
            ..tight()
        };
        let result =
            newton_solve(DVector::zeros(1), scalar(|x| 1.0 - 1e-6 * x), &config).unwrap();

        assert!(!result.converged);
        assert!(result.x[0] > 0.0 && result.x[0] <= 50.0 + 1e-9);
    }

    #[test]
    fn two_unknowns() {
        // x + y = 3, x - y = 1
        let f = |v: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_vec(vec![v[0] + v[1] - 3.0, v[0] - v[1] - 1.0]))
        };
        let result = newton_solve(DVector::zeros(2), f, &tight()).unwrap();
        assert!(result.converged);
        assert!((result.x[0] - 2.0).abs() < 1e-8);
        assert!((result.x[1] - 1.0).abs() < 1e-8);
    }

    #[test]
    fn rootless_residual_does_not_converge() {
        let config = NewtonConfig {
            max_iterations: 20,
            ..tight()
        };
        let result =
            newton_solve(DVector::from_element(1, 1.0), scalar(|x| x * x + 1.0), &config)
                .unwrap();
        assert!(!result.converged);
    }

    #[test]
    fn non_finite_residual_stops_without_stepping() {
        let result =
            newton_solve(DVector::from_element(1, 2.0), scalar(|_| f64::NAN), &tight()).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.x[0], 2.0);
    }

    #[test]
    fn residual_errors_propagate() {
        let f = |_: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Err(SolverError::Numeric {
                what: "boom".into(),
            })
        };
        assert!(newton_solve(DVector::zeros(1), f, &tight()).is_err());
    }
}
