use crate::numerical::optimization::minimize_scalar::{
    CallCounter, NonlinearFunction, ScalarMinimizer, ScalarSearchError, check_finite,
    check_positive,
};
use crate::numerical::optimization::search_trace::{
    IterationRecord, RecordDetails, SearchMethod, SearchResult, Trace,
};
use log::{debug, error, info};

/// derivative at `x`, a NaN or infinite value ends the search
fn finite_derivative<F>(
    counter: &mut CallCounter,
    function: &F,
    x: f64,
) -> Result<f64, ScalarSearchError>
where
    F: NonlinearFunction + ?Sized,
{
    let d = counter.derivative(function, x)?;
    if !d.is_finite() {
        error!("derivative is not finite at x = {}: {}", x, d);
        return Err(ScalarSearchError::InvalidParameter(format!(
            "derivative is not finite at x = {}",
            x
        )));
    }
    Ok(d)
}

impl ScalarMinimizer {
    /// Secant (chord) method applied to the derivative: drives `f'(x)` to zero and so
    /// finds a stationary point of `f`.
    ///
    /// The stopping rule is `|f'(x1)| <= tol`, a short step alone never stops the search.
    /// Derivative values are carried over between steps, one new derivative evaluation
    /// per update. Equal derivative values at both points give
    /// [`ScalarSearchError::SingularUpdate`].
    pub fn secant<F>(
        &self,
        function: &F,
        x0: f64,
        x1: f64,
        tol: f64,
    ) -> Result<SearchResult, ScalarSearchError>
    where
        F: NonlinearFunction + ?Sized,
    {
        check_positive("tol", tol)?;
        check_finite("x0", x0)?;
        check_finite("x1", x1)?;
        debug!(
            "secant search for {}: x0 = {}, x1 = {}, tol = {}",
            function.name(),
            x0,
            x1,
            tol
        );

        let mut counter = CallCounter::new();
        let mut trace = Trace::new(SearchMethod::Secant);
        let (mut x0, mut x1) = (x0, x1);
        let mut d0 = finite_derivative(&mut counter, function, x0)?;
        let mut d1 = finite_derivative(&mut counter, function, x1)?;
        let mut iter = 0;
        // no combined estimate yet: objective and step are left empty
        trace.push(IterationRecord {
            iter,
            x: x1,
            fx: None,
            error: d1.abs(),
            details: RecordDetails::Secant {
                df: None,
                gap: None,
                x0,
                x1,
                d0,
                d1,
            },
        });

        while d1.abs() > tol {
            self.check_iteration_limit(SearchMethod::Secant, iter)?;
            let denominator = d1 - d0;
            if denominator.abs() <= f64::EPSILON * d0.abs().max(d1.abs()) {
                error!("secant update is singular: df({}) = df({}) = {}", x0, x1, d1);
                return Err(ScalarSearchError::SingularUpdate { x0, x1 });
            }
            let x_next = x1 - d1 * (x1 - x0) / denominator;
            if !x_next.is_finite() {
                error!("secant update overflowed at x0 = {}, x1 = {}", x0, x1);
                return Err(ScalarSearchError::SingularUpdate { x0, x1 });
            }
            x0 = x1;
            x1 = x_next;
            d0 = d1;
            d1 = finite_derivative(&mut counter, function, x1)?;
            iter += 1;
            trace.push(IterationRecord {
                iter,
                x: x1,
                fx: Some(function.evaluate(x1)),
                error: d1.abs(),
                details: RecordDetails::Secant {
                    df: Some(d1),
                    gap: Some((x0 - x1).abs()),
                    x0,
                    x1,
                    d0,
                    d1,
                },
            });
            debug!(
                "iteration {}: x = {:.10}, df(x) = {:.3e}, |x0 - x1| = {:.3e}",
                iter,
                x1,
                d1,
                (x0 - x1).abs()
            );
        }

        let result = SearchResult {
            method: SearchMethod::Secant,
            minimizer: x1,
            min_value: function.evaluate(x1),
            final_error: d1.abs(),
            call_count: counter.count(),
            trace,
        };
        info!(
            "secant: stationary point f(x) = {:.5} at x = {:.5}, eps = {:.3e}, derivative calls: {}",
            result.min_value, result.minimizer, result.final_error, result.call_count
        );
        Ok(result)
    }
}
