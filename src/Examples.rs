//! examples of usage of the one-dimensional searches
/// dichotomy, golden ratio, directional and secant searches on 19x^4 + 10x^2 + 10x
pub mod minimization_examples;
