//! Properties shared by the four searches, checked on 19x^4 + 10x^2 + 10x and on random brackets.
use crate::Examples::minimization_examples::{
    demo_derivative, demo_function, demo_objective, demo_tasks,
};
use crate::numerical::optimization::minimize_scalar::*;
use crate::numerical::optimization::search_trace::{RecordDetails, SearchMethod};
use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// root of 76x^3 + 20x + 10
const STATIONARY_POINT: f64 = -0.344_557_660_123_489_9;

#[test]
fn test_demo_stationary_point() {
    assert!(demo_derivative(STATIONARY_POINT).abs() < 1e-12);
}

#[test]
fn test_dichotomy_demo() {
    let solver = ScalarMinimizer::new();
    let result = solver.dichotomy(&demo_function(), -1.0, 1.0, 1e-5, 1e-4).unwrap();
    assert!((result.minimizer - STATIONARY_POINT).abs() <= 2e-4);
    assert!(result.trace.last().unwrap().error <= 1e-4);
    // the width sequence does not depend on the branch taken
    assert_eq!(result.iterations(), 15);
    assert_eq!(result.call_count, 28);
}

#[test]
fn test_dichotomy_width_shrinks_within_bound() {
    let (a0, b0, delta, tol) = (-1.0, 1.0, 1e-5, 1e-4);
    let solver = ScalarMinimizer::new();
    let result = solver.dichotomy(&demo_function(), a0, b0, delta, tol).unwrap();
    let mut previous = f64::INFINITY;
    for record in result.trace.records() {
        if let RecordDetails::Bracket { a, b, .. } = record.details {
            assert!(b - a <= previous);
            previous = b - a;
        }
    }
    let bound = (((b0 - a0) - delta) / (2.0 * tol - delta)).log2().ceil() as usize;
    assert!(result.iterations() - 1 <= bound + 1);
}

#[test]
fn test_golden_ratio_demo_needs_fewer_calls() {
    let solver = ScalarMinimizer::new();
    let golden = solver.golden_ratio(&demo_function(), -1.0, 1.0, 1e-4).unwrap();
    let dichotomy = solver.dichotomy(&demo_function(), -1.0, 1.0, 1e-5, 1e-4).unwrap();
    assert!((golden.minimizer - STATIONARY_POINT).abs() <= 2e-4);
    assert!(golden.final_error <= 1e-4);
    assert_eq!(golden.call_count, (golden.iterations() - 1) + 2);
    assert!(golden.call_count < dichotomy.call_count);
    assert_relative_eq!(golden.minimizer, dichotomy.minimizer, epsilon = 2e-4);
}

#[test]
fn test_directional_demo() {
    let solver = ScalarMinimizer::new();
    let result = solver.directional(&demo_function(), 0.0, 0.01, 1e-4).unwrap();
    assert!(result.final_error <= 1e-4);
    assert!((result.minimizer - STATIONARY_POINT).abs() < 1e-3);
    assert_relative_eq!(result.min_value, demo_objective(result.minimizer));
    let values: Vec<f64> = result.trace.records().iter().map(|r| r.fx.unwrap()).collect();
    assert!(values.windows(2).all(|w| w[1] <= w[0]));
    // rejected trials flip the sign and halve the step
    let records = result.trace.records();
    for pair in records.windows(2) {
        if let (RecordDetails::Step { h: h0, .. }, RecordDetails::Step { h: h1, .. }) =
            (pair[0].details, pair[1].details)
        {
            if pair[0].x == pair[1].x {
                assert_relative_eq!(h1, -0.5 * h0);
            } else {
                assert_relative_eq!(h1, 1.2 * h0);
            }
        }
    }
}

#[test]
fn test_secant_demo() {
    let solver = ScalarMinimizer::new();
    let result = solver.secant(&demo_function(), -1.0, 1.0, 1e-4).unwrap();
    assert!(demo_derivative(result.minimizer).abs() <= 1e-4);
    assert!(result.final_error <= 1e-4);
    assert_relative_eq!(result.minimizer, STATIONARY_POINT, epsilon = 1e-5);
    assert_eq!(result.call_count, result.iterations() + 1);
}

#[test]
fn test_reversed_brackets_give_identical_traces() {
    let mut rng = StdRng::seed_from_u64(42);
    let solver = ScalarMinimizer::new();
    let function = demo_function();
    for _ in 0..20 {
        let a: f64 = rng.random_range(-3.0..-0.4);
        let b: f64 = rng.random_range(-0.3..3.0);
        let forward = solver.dichotomy(&function, a, b, 1e-5, 1e-4).unwrap();
        let backward = solver.dichotomy(&function, b, a, 1e-5, 1e-4).unwrap();
        assert_eq!(forward, backward);

        let forward = solver.golden_ratio(&function, a, b, 1e-4).unwrap();
        let backward = solver.golden_ratio(&function, b, a, 1e-4).unwrap();
        assert_eq!(forward, backward);
        assert!((forward.minimizer - STATIONARY_POINT).abs() <= 2e-4);
    }
}

#[test]
fn test_runs_are_deterministic() {
    let solver = ScalarMinimizer::new();
    let function = demo_function();
    for params in demo_tasks() {
        let first = solver.solve_with_method(&function, &params).unwrap();
        let second = solver.solve_with_method(&function, &params).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.method, params.method());
    }
}

#[test]
fn test_sequences_have_equal_length() {
    let (conv, tol) = dichotomy_search(demo_objective, -1.0, 1.0, 1e-5, 1e-4).unwrap();
    assert_eq!(conv.len(), tol.len());
    assert_eq!(conv.len(), 15);

    let (conv, tol) = golden_ratio_search(demo_objective, 1.0, -1.0, 1e-4).unwrap();
    assert_eq!(conv.len(), tol.len());
    assert!(*tol.last().unwrap() <= 1e-4);

    let (conv, tol) = directional_search(demo_objective, 0.0, 0.01, 1e-4).unwrap();
    assert_eq!(conv.len(), tol.len());
    assert_eq!(tol[0], 0.01);
    assert!(*tol.last().unwrap() <= 1e-4);

    let (conv, tol) = sectant_search(demo_objective, demo_derivative, -1.0, 1.0, 1e-4).unwrap();
    assert_eq!(conv.len(), tol.len());
    assert!((conv.last().unwrap() - STATIONARY_POINT).abs() < 1e-5);
}

#[test]
fn test_convenience_functions_surface_errors() {
    assert!(matches!(
        dichotomy_search(demo_objective, -1.0, 1.0, 0.0, 1e-4),
        Err(ScalarSearchError::InvalidParameter(_))
    ));
    assert_eq!(
        golden_ratio_search(demo_objective, 0.3, 0.3, 1e-4),
        Err(ScalarSearchError::DegenerateBracket(0.3))
    );
    assert!(matches!(
        directional_search(demo_objective, 0.0, 1e-5, 1e-4),
        Err(ScalarSearchError::InvalidParameter(_))
    ));
    assert!(matches!(
        sectant_search(demo_objective, |_x| 2.0, -1.0, 1.0, 1e-4),
        Err(ScalarSearchError::SingularUpdate { .. })
    ));
}

#[test]
fn test_compare_methods_keeps_order() {
    let solver = ScalarMinimizer::new();
    let function = demo_function();
    let tasks = demo_tasks();
    let results = solver.compare_methods(&function, &tasks);
    assert_eq!(results.len(), tasks.len());
    for (params, result) in tasks.iter().zip(results) {
        let result = result.unwrap();
        assert_eq!(result.method, params.method());
        assert_eq!(result, solver.solve_with_method(&function, params).unwrap());
    }
}

#[test]
fn test_compare_methods_reports_failures_in_place() {
    let solver = ScalarMinimizer::new();
    let function = demo_function();
    let tasks = vec![
        SearchParams::golden_ratio(-1.0, -1.0),
        SearchParams::directional(0.0),
    ];
    let results = solver.compare_methods(&function, &tasks);
    assert_eq!(results[0], Err(ScalarSearchError::DegenerateBracket(-1.0)));
    assert_eq!(results[1].as_ref().unwrap().method, SearchMethod::Directional);
}

#[test]
fn test_iteration_bound_applies_to_every_method() {
    let config = SearchConfig {
        max_iterations: Some(2),
        loglevel: Some("off".to_string()),
        ..SearchConfig::default()
    };
    let solver = ScalarMinimizer::with_config(config);
    for params in demo_tasks() {
        assert_eq!(
            solver.solve_with_method(&demo_function(), &params),
            Err(ScalarSearchError::MaxIterationsReached(2)),
            "{}",
            params.method()
        );
    }
}

#[test]
fn test_solve_with_report() {
    let config = SearchConfig {
        loglevel: Some("off".to_string()),
        report: true,
        ..SearchConfig::default()
    };
    let solver = ScalarMinimizer::with_config(config);
    let result = solver
        .solve(&demo_function(), &SearchParams::golden_ratio(-1.0, 1.0))
        .unwrap();
    assert_eq!(result.method, SearchMethod::GoldenRatio);
    let bad = solver.solve(&demo_function(), &SearchParams::Directional { x0: 0.0, h: 1e-4, tol: 1e-4 });
    assert!(matches!(bad, Err(ScalarSearchError::InvalidParameter(_))));
}
