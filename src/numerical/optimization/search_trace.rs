//! Iteration trace of a one-dimensional search.
//!
//! Every search appends one [`IterationRecord`] per iteration to a [`Trace`]; the
//! finished trace is handed back inside a [`SearchResult`] and only read afterwards
//! (tables, charts, csv dumps).
use strum_macros::{Display, EnumIter, EnumString};

/// Search strategies available in [`crate::numerical::optimization::minimize_scalar::ScalarMinimizer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SearchMethod {
    /// interval halving with a dead zone of width `delta` around the midpoint
    Dichotomy,
    /// interval reduction by the golden ratio, one new evaluation per step
    GoldenRatio,
    /// adaptive step pattern search from a single start point
    Directional,
    /// secant iteration on the derivative, finds a stationary point
    Secant,
}

impl SearchMethod {
    /// Human readable name used in table captions and chart titles
    pub fn title(&self) -> &'static str {
        match self {
            SearchMethod::Dichotomy => "Dichotomy method",
            SearchMethod::GoldenRatio => "Golden ratio method",
            SearchMethod::Directional => "Directional search method",
            SearchMethod::Secant => "Secant (chord) method",
        }
    }

    /// File stem of the chart produced for this method
    pub fn artifact_name(&self) -> &'static str {
        match self {
            SearchMethod::Dichotomy => "dichotomy",
            SearchMethod::GoldenRatio => "goldenratio",
            SearchMethod::Directional => "directional",
            SearchMethod::Secant => "sectant",
        }
    }

    /// true for the methods that shrink a bracket [a, b]
    pub fn is_bracketing(&self) -> bool {
        matches!(self, SearchMethod::Dichotomy | SearchMethod::GoldenRatio)
    }
}

/// Phase of the directional search, derived from the sign of the step only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StepPhase {
    Expansion,
    Refinement,
}

impl StepPhase {
    pub fn from_step(h: f64) -> Self {
        if h > 0.0 {
            StepPhase::Expansion
        } else {
            StepPhase::Refinement
        }
    }
}

/// Method specific columns of an iteration record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordDetails {
    /// current bracket and the two probe points
    Bracket { a: f64, b: f64, c: f64, d: f64 },
    /// signed step after the trial and the phase it implies
    Step { h: f64, phase: StepPhase },
    /// secant pair and derivative values; `df` and `gap` are absent at iteration 0
    Secant {
        df: Option<f64>,
        gap: Option<f64>,
        x0: f64,
        x1: f64,
        d0: f64,
        d1: f64,
    },
}

/// One row of the trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationRecord {
    pub iter: usize,
    /// current estimate of the minimizer
    pub x: f64,
    /// objective at the estimate, `None` where no estimate exists yet
    pub fx: Option<f64>,
    /// error magnitude the stopping rule works with
    pub error: f64,
    pub details: RecordDetails,
}

/// Ordered, append-only list of iteration records of one run
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    method: SearchMethod,
    records: Vec<IterationRecord>,
}

impl Trace {
    pub(crate) fn new(method: SearchMethod) -> Self {
        Self {
            method,
            records: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, record: IterationRecord) {
        debug_assert!(
            self.records.last().map_or(true, |last| last.iter < record.iter),
            "iteration index must grow"
        );
        self.records.push(record);
    }

    pub fn method(&self) -> SearchMethod {
        self.method
    }

    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&IterationRecord> {
        self.records.last()
    }

    /// estimates visited, one per iteration
    pub fn convergence(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.x).collect()
    }

    /// error magnitudes, one per iteration
    pub fn tolerance(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.error).collect()
    }
}

/// Result of a finished search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub method: SearchMethod,
    pub minimizer: f64,
    pub min_value: f64,
    pub final_error: f64,
    /// objective/derivative evaluations spent by the algorithm
    pub call_count: usize,
    pub trace: Trace,
}

impl SearchResult {
    pub fn iterations(&self) -> usize {
        self.trace.len()
    }

    pub fn convergence(&self) -> Vec<f64> {
        self.trace.convergence()
    }

    pub fn tolerance(&self) -> Vec<f64> {
        self.trace.tolerance()
    }

    /// (convergence, tolerance) pair of equal length
    pub fn into_sequences(self) -> (Vec<f64>, Vec<f64>) {
        (self.trace.convergence(), self.trace.tolerance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    fn record(iter: usize, x: f64, error: f64) -> IterationRecord {
        IterationRecord {
            iter,
            x,
            fx: Some(x * x),
            error,
            details: RecordDetails::Step {
                h: error,
                phase: StepPhase::from_step(error),
            },
        }
    }

    #[test]
    fn test_artifact_names_are_distinct() {
        let mut names: Vec<&str> = SearchMethod::iter().map(|m| m.artifact_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
        assert_eq!(SearchMethod::Secant.artifact_name(), "sectant");
        assert_eq!(SearchMethod::GoldenRatio.artifact_name(), "goldenratio");
    }

    #[test]
    fn test_method_names_parse_back() {
        for method in SearchMethod::iter() {
            let parsed = SearchMethod::from_str(&method.to_string()).unwrap();
            assert_eq!(parsed, method);
        }
        assert_eq!(
            SearchMethod::from_str("golden_ratio").unwrap(),
            SearchMethod::GoldenRatio
        );
        assert!(SearchMethod::from_str("newton").is_err());
    }

    #[test]
    fn test_step_phase_from_sign() {
        assert_eq!(StepPhase::from_step(0.01), StepPhase::Expansion);
        assert_eq!(StepPhase::from_step(-0.005), StepPhase::Refinement);
        assert_eq!(StepPhase::Expansion.to_string(), "Expansion");
    }

    #[test]
    fn test_trace_sequences_have_equal_length() {
        let mut trace = Trace::new(SearchMethod::Directional);
        trace.push(record(0, 0.0, 0.01));
        trace.push(record(1, 0.01, 0.012));
        trace.push(record(2, 0.01, 0.006));
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.convergence(), vec![0.0, 0.01, 0.01]);
        assert_eq!(trace.tolerance(), vec![0.01, 0.012, 0.006]);
        assert_eq!(trace.last().unwrap().iter, 2);
    }
}
