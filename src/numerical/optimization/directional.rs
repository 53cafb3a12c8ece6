use crate::numerical::optimization::minimize_scalar::{
    CallCounter, NonlinearFunction, ScalarMinimizer, ScalarSearchError, check_finite,
    check_positive,
};
use crate::numerical::optimization::search_trace::{
    IterationRecord, RecordDetails, SearchMethod, SearchResult, StepPhase, Trace,
};
use log::{debug, info};

/// step growth after a successful move
const STEP_GROWTH: f64 = 1.2;
/// step factor after a failed trial: halve and reverse
const STEP_BACKTRACK: f64 = -0.5;

fn step_record(iter: usize, x: f64, fx: f64, h: f64) -> IterationRecord {
    IterationRecord {
        iter,
        x,
        fx: Some(fx),
        error: h.abs(),
        details: RecordDetails::Step {
            h,
            phase: StepPhase::from_step(h),
        },
    }
}

impl ScalarMinimizer {
    /// Directional (pattern) search from `x0` with initial step `h`.
    ///
    /// A trial point `x + h` is accepted only on strict improvement, then the step grows
    /// by 1.2; a rejected trial halves the step and flips its direction. The search stops
    /// once `|h| <= tol`. Heuristic: no convergence guarantee away from unimodal objectives.
    pub fn directional<F>(
        &self,
        function: &F,
        x0: f64,
        h: f64,
        tol: f64,
    ) -> Result<SearchResult, ScalarSearchError>
    where
        F: NonlinearFunction + ?Sized,
    {
        check_positive("tol", tol)?;
        check_finite("x0", x0)?;
        if !(h > tol) || !h.is_finite() {
            return Err(ScalarSearchError::InvalidParameter(format!(
                "step h = {} must be greater than tol = {}",
                h, tol
            )));
        }
        debug!(
            "directional search for {}: x0 = {}, h = {}, tol = {}",
            function.name(),
            x0,
            h,
            tol
        );

        let mut counter = CallCounter::new();
        let mut trace = Trace::new(SearchMethod::Directional);
        let mut h = h;
        let mut x_prev = x0;
        let mut f_prev = counter.evaluate(function, x_prev);
        let mut iter = 0;
        trace.push(step_record(iter, x_prev, f_prev, h));

        while h.abs() > tol {
            self.check_iteration_limit(SearchMethod::Directional, iter)?;
            let x_new = x_prev + h;
            let f_new = counter.evaluate(function, x_new);
            if f_new < f_prev {
                x_prev = x_new;
                f_prev = f_new;
                h *= STEP_GROWTH;
            } else {
                h *= STEP_BACKTRACK;
            }
            iter += 1;
            trace.push(step_record(iter, x_prev, f_prev, h));
            debug!(
                "iteration {}: x = {:.8}, f(x) = {:.8}, h = {:.3e}, {}",
                iter,
                x_prev,
                f_prev,
                h,
                StepPhase::from_step(h)
            );
        }

        let result = SearchResult {
            method: SearchMethod::Directional,
            minimizer: x_prev,
            min_value: f_prev,
            final_error: h.abs(),
            call_count: counter.count(),
            trace,
        };
        info!(
            "directional search: minimum f(x) = {:.5} at x = {:.5}, eps = {:.3e}, function calls: {}",
            result.min_value, result.minimizer, result.final_error, result.call_count
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use crate::numerical::optimization::minimize_scalar::*;
    use crate::numerical::optimization::search_trace::{RecordDetails, StepPhase};
    use approx::assert_relative_eq;

    fn steps(result: &crate::numerical::optimization::search_trace::SearchResult) -> Vec<f64> {
        result
            .trace
            .records()
            .iter()
            .map(|r| match r.details {
                RecordDetails::Step { h, .. } => h,
                _ => panic!("step record expected"),
            })
            .collect()
    }

    #[test]
    fn test_directional_quadratic() {
        let func = ClosureFunction::new(|x| (x - 0.3) * (x - 0.3), "(x-0.3)^2".to_string());
        let solver = ScalarMinimizer::new();
        let result = solver.directional(&func, 0.0, 0.01, 1e-5).unwrap();
        assert!(result.final_error <= 1e-5);
        assert_relative_eq!(result.minimizer, 0.3, epsilon = 1e-4);
        // one evaluation for x0 and one per trial
        assert_eq!(result.call_count, result.iterations());
    }

    #[test]
    fn test_directional_moves_left() {
        let func = ClosureFunction::new(|x| (x + 2.0) * (x + 2.0), "(x+2)^2".to_string());
        let solver = ScalarMinimizer::new();
        let result = solver.directional(&func, 1.0, 0.05, 1e-4).unwrap();
        assert_relative_eq!(result.minimizer, -2.0, epsilon = 1e-3);
        let first = result.trace.records()[1];
        // first trial goes uphill, so the step is reversed and halved
        if let RecordDetails::Step { h, phase } = first.details {
            assert_relative_eq!(h, -0.025);
            assert_eq!(phase, StepPhase::Refinement);
        }
        assert_eq!(first.x, 1.0);
    }

    #[test]
    fn test_directional_step_rules() {
        let func = ClosureFunction::new(|x: f64| (x - 0.123).powi(2) + 1.0, "shifted parabola".to_string());
        let solver = ScalarMinimizer::new();
        let result = solver.directional(&func, -0.4, 0.02, 1e-5).unwrap();
        let records = result.trace.records();
        let hs = steps(&result);
        for i in 1..records.len() {
            let (prev, cur) = (&records[i - 1], &records[i]);
            let prev_f = prev.fx.unwrap();
            let cur_f = cur.fx.unwrap();
            // best value never gets worse
            assert!(cur_f <= prev_f);
            if cur.x != prev.x {
                assert!(cur_f < prev_f);
                assert_relative_eq!(hs[i], hs[i - 1] * 1.2);
            } else {
                assert_relative_eq!(hs[i], hs[i - 1] * -0.5);
                assert!(hs[i].signum() != hs[i - 1].signum());
            }
            assert_relative_eq!(cur.error, hs[i].abs());
        }
    }

    #[test]
    fn test_directional_step_must_exceed_tol() {
        let func = ClosureFunction::new(|x| x * x, "x^2".to_string());
        let solver = ScalarMinimizer::new();
        for (h, tol) in [(1e-4, 1e-4), (1e-5, 1e-4), (-0.01, 1e-4)] {
            let res = solver.directional(&func, 0.0, h, tol);
            assert!(matches!(res, Err(ScalarSearchError::InvalidParameter(_))));
        }
        let res = solver.directional(&func, f64::NAN, 0.01, 1e-4);
        assert!(matches!(res, Err(ScalarSearchError::InvalidParameter(_))));
    }

    #[test]
    fn test_directional_initial_record() {
        let func = ClosureFunction::new(|x| x * x + 1.0, "x^2 + 1".to_string());
        let solver = ScalarMinimizer::new();
        let result = solver.directional(&func, 0.5, 0.01, 1e-4).unwrap();
        let first = result.trace.records()[0];
        assert_eq!(first.iter, 0);
        assert_eq!(first.x, 0.5);
        assert_eq!(first.fx, Some(1.25));
        assert_eq!(first.error, 0.01);
    }

    #[test]
    fn test_directional_max_iterations() {
        let func = ClosureFunction::new(|x| (x - 10.0) * (x - 10.0), "(x-10)^2".to_string());
        let mut solver = ScalarMinimizer::new();
        solver.set_max_iterations(Some(4));
        assert_eq!(
            solver.directional(&func, 0.0, 0.01, 1e-4),
            Err(ScalarSearchError::MaxIterationsReached(4))
        );
    }
}
