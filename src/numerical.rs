/// one-dimensional minimization: dichotomy, golden ratio, directional step and secant (stationary point) searches
pub mod optimization;
