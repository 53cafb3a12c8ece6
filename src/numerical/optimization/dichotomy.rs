use crate::numerical::optimization::minimize_scalar::{
    Bracket, CallCounter, NonlinearFunction, ScalarMinimizer, ScalarSearchError, check_positive,
};
use crate::numerical::optimization::search_trace::{
    IterationRecord, RecordDetails, SearchMethod, SearchResult, Trace,
};
use log::{debug, info};

impl ScalarMinimizer {
    /// Dichotomy method: the bracket is cut near its middle using two probes
    /// `c = (a + b - delta)/2` and `d = (a + b + delta)/2`.
    ///
    /// The row of every iteration is recorded before the stopping rule `|b - a| <= 2 tol`
    /// is tested, so the last row satisfies it. Ties `f(c) == f(d)` keep the left part.
    /// Unless the bracket is already within `2 tol`, `delta` must be smaller than `2 tol`:
    /// the width tends to `delta` and would never reach the stopping rule otherwise
    /// (with `delta == 2 tol` the width settles one ulp above the threshold).
    pub fn dichotomy<F>(
        &self,
        function: &F,
        a: f64,
        b: f64,
        delta: f64,
        tol: f64,
    ) -> Result<SearchResult, ScalarSearchError>
    where
        F: NonlinearFunction + ?Sized,
    {
        check_positive("delta", delta)?;
        check_positive("tol", tol)?;
        let Bracket { mut a, mut b } = Bracket::new(a, b)?;
        // a bracket already within 2 tol stops on the first row whatever delta is
        if delta >= 2.0 * tol && b - a > 2.0 * tol {
            return Err(ScalarSearchError::InvalidParameter(format!(
                "delta = {} must be smaller than 2*tol = {}",
                delta,
                2.0 * tol
            )));
        }
        debug!(
            "dichotomy for {}: bracket [{}, {}], delta = {}, tol = {}",
            function.name(),
            a,
            b,
            delta,
            tol
        );

        let mut counter = CallCounter::new();
        let mut trace = Trace::new(SearchMethod::Dichotomy);
        let mut iter = 0;
        loop {
            iter += 1;
            let c = ((a + b) - delta) / 2.0;
            let d = ((a + b) + delta) / 2.0;
            let x = (a + b) / 2.0;
            let error = ((b - a) / 2.0).abs();
            trace.push(IterationRecord {
                iter,
                x,
                fx: Some(function.evaluate(x)),
                error,
                details: RecordDetails::Bracket { a, b, c, d },
            });
            debug!("iteration {}: x = {:.8}, [{:.8}, {:.8}], tol = {:.3e}", iter, x, a, b, error);

            if (b - a).abs() <= 2.0 * tol {
                break;
            }
            self.check_iteration_limit(SearchMethod::Dichotomy, iter - 1)?;

            let f_c = counter.evaluate(function, c);
            let f_d = counter.evaluate(function, d);
            if f_c <= f_d {
                b = d;
            } else {
                a = c;
            }
        }

        let x_min = (a + b) / 2.0;
        let result = SearchResult {
            method: SearchMethod::Dichotomy,
            minimizer: x_min,
            min_value: function.evaluate(x_min),
            final_error: ((b - a) / 2.0).abs(),
            call_count: counter.count(),
            trace,
        };
        info!(
            "dichotomy: minimum f(x) = {:.5} at x = {:.5}, eps = {:.3e}, function calls: {}",
            result.min_value, result.minimizer, result.final_error, result.call_count
        );
        Ok(result)
    }
}
