/// common types of the scalar searches: errors, function wrappers, configuration and the driver struct
pub mod minimize_scalar;
/// iteration records and results
pub mod search_trace;

/// dichotomy method (bisection with a dead zone)
pub mod dichotomy;
/// directional (pattern) step search
pub mod directional;
/// golden ratio method
pub mod golden_ratio;
/// secant method on the derivative, locates a stationary point
pub mod secant_stationary;

#[cfg(test)]
mod minimize_scalar_tests;
