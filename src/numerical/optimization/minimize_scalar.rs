use crate::Utils::logger::init_logger;
use crate::Utils::report::print_report;
use crate::numerical::optimization::search_trace::{SearchMethod, SearchResult};
use log::{error, info, warn};
use rayon::prelude::*;
use std::fmt;

/// Error types for scalar minimization methods
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarSearchError {
    /// a numeric argument violates its precondition
    InvalidParameter(String),
    /// both ends of the bracket coincide
    DegenerateBracket(f64),
    /// denominator of the secant update vanished
    SingularUpdate { x0: f64, x1: f64 },
    /// optional iteration bound was hit before convergence
    MaxIterationsReached(usize),
}

impl fmt::Display for ScalarSearchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScalarSearchError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            ScalarSearchError::DegenerateBracket(x) => {
                write!(f, "Degenerate bracket: a = b = {}", x)
            }
            ScalarSearchError::SingularUpdate { x0, x1 } => write!(
                f,
                "Singular secant update: df(x0) = df(x1) for x0 = {}, x1 = {}",
                x0, x1
            ),
            ScalarSearchError::MaxIterationsReached(n) => {
                write!(f, "Maximum iterations reached ({})", n)
            }
        }
    }
}
//////////////////////////////////TRAITS AND IMPLEMENTATIONS/////////////////////////////////
impl std::error::Error for ScalarSearchError {}

/// Trait for a scalar objective f(x)
pub trait NonlinearFunction {
    /// Evaluate the function at point x
    fn evaluate(&self, x: f64) -> f64;

    /// Evaluate the derivative at point x (only the secant search needs it)
    fn derivative(&self, _x: f64) -> Option<f64> {
        None
    }

    /// Get function name for debugging/logging
    fn name(&self) -> &str {
        "unnamed_function"
    }
}

/// Simple function wrapper for closures
pub struct ClosureFunction<F>
where
    F: Fn(f64) -> f64,
{
    func: F,
    name: String,
}

impl<F> ClosureFunction<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(func: F, name: String) -> Self {
        Self { func, name }
    }
}

impl<F> NonlinearFunction for ClosureFunction<F>
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> f64 {
        (self.func)(x)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Function wrapper with analytical derivative
pub struct FunctionWithDerivative<F, D>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    func: F,
    derivative_func: D,
    name: String,
}

impl<F, D> FunctionWithDerivative<F, D>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    pub fn new(func: F, derivative_func: D, name: String) -> Self {
        Self {
            func,
            derivative_func,
            name,
        }
    }
}

impl<F, D> NonlinearFunction for FunctionWithDerivative<F, D>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> f64 {
        (self.func)(x)
    }

    fn derivative(&self, x: f64) -> Option<f64> {
        Some((self.derivative_func)(x))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Counts objective and derivative evaluations of a single run.
/// Lives on the stack of the running search, never shared.
#[derive(Debug, Default)]
pub struct CallCounter {
    count: usize,
}

impl CallCounter {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    pub fn evaluate<F>(&mut self, function: &F, x: f64) -> f64
    where
        F: NonlinearFunction + ?Sized,
    {
        self.count += 1;
        function.evaluate(x)
    }

    pub fn derivative<F>(&mut self, function: &F, x: f64) -> Result<f64, ScalarSearchError>
    where
        F: NonlinearFunction + ?Sized,
    {
        let value = function.derivative(x).ok_or_else(|| {
            ScalarSearchError::InvalidParameter(format!(
                "function '{}' has no analytical derivative",
                function.name()
            ))
        })?;
        self.count += 1;
        Ok(value)
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// Search interval with a < b
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub a: f64,
    pub b: f64,
}

impl Bracket {
    /// reversed endpoints are swapped, equal endpoints are rejected
    pub fn new(a: f64, b: f64) -> Result<Self, ScalarSearchError> {
        if !a.is_finite() || !b.is_finite() {
            return Err(ScalarSearchError::InvalidParameter(format!(
                "bracket endpoints must be finite, got [{}, {}]",
                a, b
            )));
        }
        if a == b {
            return Err(ScalarSearchError::DegenerateBracket(a));
        }
        if a > b {
            Ok(Self { a: b, b: a })
        } else {
            Ok(Self { a, b })
        }
    }

    pub fn width(&self) -> f64 {
        self.b - self.a
    }

    pub fn midpoint(&self) -> f64 {
        (self.a + self.b) / 2.0
    }
}

pub(crate) fn check_positive(name: &str, value: f64) -> Result<(), ScalarSearchError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ScalarSearchError::InvalidParameter(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}

pub(crate) fn check_finite(name: &str, value: f64) -> Result<(), ScalarSearchError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ScalarSearchError::InvalidParameter(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

///////////////////////////////////////////SETTERS AND GETTERS///////////////////////////////////////////
/// Configuration shared by all search methods
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// upper bound on the number of updates; None keeps the searches unbounded
    pub max_iterations: Option<usize>,
    /// "off" | "none" | "debug" | "info" | "warn" | "error"
    pub loglevel: Option<String>,
    /// print the iteration table and summary after `solve`
    pub report: bool,
    /// duplicate log output into a timestamped file
    pub log_to_file: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: None,
            loglevel: Some("info".to_string()),
            report: false,
            log_to_file: false,
        }
    }
}

/// Parameters of one search run
#[derive(Debug, Clone, PartialEq)]
pub enum SearchParams {
    Dichotomy { a: f64, b: f64, delta: f64, tol: f64 },
    GoldenRatio { a: f64, b: f64, tol: f64 },
    Directional { x0: f64, h: f64, tol: f64 },
    Secant { x0: f64, x1: f64, tol: f64 },
}

impl SearchParams {
    pub fn method(&self) -> SearchMethod {
        match self {
            SearchParams::Dichotomy { .. } => SearchMethod::Dichotomy,
            SearchParams::GoldenRatio { .. } => SearchMethod::GoldenRatio,
            SearchParams::Directional { .. } => SearchMethod::Directional,
            SearchParams::Secant { .. } => SearchMethod::Secant,
        }
    }

    /// dichotomy with delta = 1e-5, tol = 1e-4
    pub fn dichotomy(a: f64, b: f64) -> Self {
        SearchParams::Dichotomy {
            a,
            b,
            delta: 1e-5,
            tol: 1e-4,
        }
    }

    pub fn golden_ratio(a: f64, b: f64) -> Self {
        SearchParams::GoldenRatio { a, b, tol: 1e-4 }
    }

    /// directional search with h = 0.01, tol = 1e-4
    pub fn directional(x0: f64) -> Self {
        SearchParams::Directional {
            x0,
            h: 0.01,
            tol: 1e-4,
        }
    }

    pub fn secant(x0: f64, x1: f64) -> Self {
        SearchParams::Secant { x0, x1, tol: 1e-4 }
    }
}

/// Main structure for one-dimensional minimization.
/// Holds configuration only, every call owns its own state.
#[derive(Debug, Clone)]
pub struct ScalarMinimizer {
    config: SearchConfig,
}

impl ScalarMinimizer {
    /// Create a new ScalarMinimizer with default configuration
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    /// Create a new ScalarMinimizer with custom configuration
    pub fn with_config(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Set maximum number of updates (None: unbounded)
    pub fn set_max_iterations(&mut self, max_iterations: Option<usize>) {
        self.config.max_iterations = max_iterations;
    }

    pub fn set_loglevel(&mut self, loglevel: Option<String>) {
        self.config.loglevel = loglevel;
    }

    /// Enable or disable the iteration table after `solve`
    pub fn set_report(&mut self, report: bool) {
        self.config.report = report;
    }

    /// fails once `updates` reaches the configured bound
    pub(crate) fn check_iteration_limit(
        &self,
        method: SearchMethod,
        updates: usize,
    ) -> Result<(), ScalarSearchError> {
        match self.config.max_iterations {
            Some(max) if updates >= max => {
                error!("{}: no convergence after {} iterations", method, max);
                Err(ScalarSearchError::MaxIterationsReached(max))
            }
            _ => Ok(()),
        }
    }

    /// Run the method described by `params`
    pub fn solve_with_method<F>(
        &self,
        function: &F,
        params: &SearchParams,
    ) -> Result<SearchResult, ScalarSearchError>
    where
        F: NonlinearFunction + ?Sized,
    {
        match *params {
            SearchParams::Dichotomy { a, b, delta, tol } => {
                self.dichotomy(function, a, b, delta, tol)
            }
            SearchParams::GoldenRatio { a, b, tol } => self.golden_ratio(function, a, b, tol),
            SearchParams::Directional { x0, h, tol } => self.directional(function, x0, h, tol),
            SearchParams::Secant { x0, x1, tol } => self.secant(function, x0, x1, tol),
        }
    }

    // wrapper around solve_with_method to implement logging and reporting
    pub fn solve<F>(
        &self,
        function: &F,
        params: &SearchParams,
    ) -> Result<SearchResult, ScalarSearchError>
    where
        F: NonlinearFunction + ?Sized,
    {
        match init_logger(self.config.loglevel.as_deref(), self.config.log_to_file) {
            Ok(true) => info!("{} started for {}", params.method(), function.name()),
            Ok(false) => {}
            Err(e) => warn!("logger was not initialized: {}", e),
        }
        let result = self.solve_with_method(function, params)?;
        if self.config.report {
            print_report(&result);
        }
        Ok(result)
    }

    /// Run several searches on the same function in parallel, results keep the input order
    pub fn compare_methods<F>(
        &self,
        function: &F,
        tasks: &[SearchParams],
    ) -> Vec<Result<SearchResult, ScalarSearchError>>
    where
        F: NonlinearFunction + Sync + ?Sized,
    {
        let results: Vec<Result<SearchResult, ScalarSearchError>> = tasks
            .par_iter()
            .map(|params| self.solve_with_method(function, params))
            .collect();
        for (params, result) in tasks.iter().zip(results.iter()) {
            match result {
                Ok(res) => info!(
                    "{}: x = {:.6}, f(x) = {:.6}, calls = {}",
                    params.method(),
                    res.minimizer,
                    res.min_value,
                    res.call_count
                ),
                Err(e) => warn!("{} failed: {}", params.method(), e),
            }
        }
        results
    }
}

impl Default for ScalarMinimizer {
    fn default() -> Self {
        Self::new()
    }
}

// Convenience functions for quick usage: return (convergence, tolerance), the call count goes to the log
pub fn dichotomy_search<F>(
    f: F,
    a: f64,
    b: f64,
    delta: f64,
    tol: f64,
) -> Result<(Vec<f64>, Vec<f64>), ScalarSearchError>
where
    F: Fn(f64) -> f64,
{
    let func = ClosureFunction::new(f, "dichotomy_function".to_string());
    let result = ScalarMinimizer::new().dichotomy(&func, a, b, delta, tol)?;
    info!("function calls: {}", result.call_count);
    Ok(result.into_sequences())
}

pub fn golden_ratio_search<F>(
    f: F,
    a: f64,
    b: f64,
    tol: f64,
) -> Result<(Vec<f64>, Vec<f64>), ScalarSearchError>
where
    F: Fn(f64) -> f64,
{
    let func = ClosureFunction::new(f, "golden_ratio_function".to_string());
    let result = ScalarMinimizer::new().golden_ratio(&func, a, b, tol)?;
    info!("function calls: {}", result.call_count);
    Ok(result.into_sequences())
}

pub fn directional_search<F>(
    f: F,
    x0: f64,
    h: f64,
    tol: f64,
) -> Result<(Vec<f64>, Vec<f64>), ScalarSearchError>
where
    F: Fn(f64) -> f64,
{
    let func = ClosureFunction::new(f, "directional_function".to_string());
    let result = ScalarMinimizer::new().directional(&func, x0, h, tol)?;
    info!("function calls: {}", result.call_count);
    Ok(result.into_sequences())
}

/// secant search for a stationary point, `df` is the derivative of `f`
pub fn sectant_search<F, D>(
    f: F,
    df: D,
    x0: f64,
    x1: f64,
    tol: f64,
) -> Result<(Vec<f64>, Vec<f64>), ScalarSearchError>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let func = FunctionWithDerivative::new(f, df, "secant_function".to_string());
    let result = ScalarMinimizer::new().secant(&func, x0, x1, tol)?;
    info!("derivative calls: {}", result.call_count);
    Ok(result.into_sequences())
}
