use crate::numerical::optimization::minimize_scalar::{
    Bracket, CallCounter, NonlinearFunction, ScalarMinimizer, ScalarSearchError, check_positive,
};
use crate::numerical::optimization::search_trace::{
    IterationRecord, RecordDetails, SearchMethod, SearchResult, Trace,
};
use log::{debug, info};

/// (3 - √5)/2, position of the left probe as a share of the bracket
fn left_ratio() -> f64 {
    (3.0 - 5f64.sqrt()) / 2.0
}

/// (√5 - 1)/2, position of the right probe as a share of the bracket
fn right_ratio() -> f64 {
    (5f64.sqrt() - 1.0) / 2.0
}

impl ScalarMinimizer {
    /// Golden ratio (golden section) method.
    ///
    /// The two probes split [a, b] in the golden ratio, so after each narrowing one of
    /// the old probes is reused and only one new objective evaluation is needed:
    /// the call count is `updates + 2`.
    pub fn golden_ratio<F>(
        &self,
        function: &F,
        a: f64,
        b: f64,
        tol: f64,
    ) -> Result<SearchResult, ScalarSearchError>
    where
        F: NonlinearFunction + ?Sized,
    {
        check_positive("tol", tol)?;
        let Bracket { mut a, mut b } = Bracket::new(a, b)?;
        debug!(
            "golden ratio for {}: bracket [{}, {}], tol = {}",
            function.name(),
            a,
            b,
            tol
        );

        let mut counter = CallCounter::new();
        let mut trace = Trace::new(SearchMethod::GoldenRatio);
        let mut c = a + left_ratio() * (b - a);
        let mut d = a + right_ratio() * (b - a);
        let mut f_c = counter.evaluate(function, c);
        let mut f_d = counter.evaluate(function, d);

        let mut iter = 0;
        loop {
            iter += 1;
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
            self.check_iteration_limit(SearchMethod::GoldenRatio, iter - 1)?;

            if f_c <= f_d {
                b = d;
                d = c;
                c = a + left_ratio() * (b - a);
                f_d = f_c;
                f_c = counter.evaluate(function, c);
            } else {
                a = c;
                c = d;
                d = a + right_ratio() * (b - a);
                f_c = f_d;
                f_d = counter.evaluate(function, d);
            }
        }

        let x_min = (a + b) / 2.0;
        let result = SearchResult {
            method: SearchMethod::GoldenRatio,
            minimizer: x_min,
            min_value: function.evaluate(x_min),
            final_error: ((b - a) / 2.0).abs(),
            call_count: counter.count(),
            trace,
        };
        info!(
            "golden ratio: minimum f(x) = {:.5} at x = {:.5}, eps = {:.3e}, function calls: {}",
            result.min_value, result.minimizer, result.final_error, result.call_count
        );
        Ok(result)
    }
}
