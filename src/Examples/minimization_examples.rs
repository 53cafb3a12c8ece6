use crate::Utils::logger::{init_logger, save_trace_to_csv};
use crate::Utils::plots::{ChartWindow, charts_for_all, function_chart};
use crate::Utils::report::print_report;
use crate::Utils::task_parser::SearchTask;
use crate::numerical::optimization::minimize_scalar::{
    FunctionWithDerivative, NonlinearFunction, ScalarMinimizer, SearchParams,
};
use crate::numerical::optimization::search_trace::SearchResult;
use log::{error, info};
use std::path::Path;
use tabled::{builder::Builder, settings::Style};

pub const DEMO_LABEL: &str = "y = 19x^4 + 10x^2 + 10x";

/// f(x) = 19x^4 + 10x^2 + 10x, single minimum near x = -0.3446
pub fn demo_objective(x: f64) -> f64 {
    19.0 * x.powi(4) + 10.0 * x.powi(2) + 10.0 * x
}

pub fn demo_derivative(x: f64) -> f64 {
    76.0 * x.powi(3) + 20.0 * x + 10.0
}

pub fn demo_function() -> FunctionWithDerivative<fn(f64) -> f64, fn(f64) -> f64> {
    FunctionWithDerivative::new(
        demo_objective as fn(f64) -> f64,
        demo_derivative as fn(f64) -> f64,
        DEMO_LABEL.to_string(),
    )
}

/// the four searches with the parameters of the classic exercise
pub fn demo_tasks() -> Vec<SearchParams> {
    vec![
        SearchParams::dichotomy(-1.0, 1.0),
        SearchParams::golden_ratio(-1.0, 1.0),
        SearchParams::directional(0.0),
        SearchParams::secant(-1.0, 1.0),
    ]
}

fn comparison_table(results: &[SearchResult]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["method", "x*", "f(x*)", "eps", "iterations", "calls"]);
    for result in results {
        builder.push_record([
            result.method.title().to_string(),
            format!("{:.6}", result.minimizer),
            format!("{:.6}", result.min_value),
            format!("{:.3e}", result.final_error),
            result.iterations().to_string(),
            result.call_count.to_string(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

fn run_tasks<F>(solver: &ScalarMinimizer, function: &F, tasks: &[SearchParams]) -> Vec<SearchResult>
where
    F: NonlinearFunction + ?Sized,
{
    let mut results = Vec::new();
    for params in tasks {
        match solver.solve(function, params) {
            Ok(result) => results.push(result),
            Err(e) => error!("{} failed: {}", params.method(), e),
        }
    }
    results
}

pub fn minimization_examples(example: usize, task_file: Option<&str>) {
    match example {
        0 => {
            // every method with its iteration table
            let mut solver = ScalarMinimizer::new();
            solver.set_report(true);
            let results = run_tasks(&solver, &demo_function(), &demo_tasks());
            info!("\n{}", comparison_table(&results));
        }
        1 => {
            // charts into charts_png/
            let _ = init_logger(Some("info"), false);
            let mut solver = ScalarMinimizer::new();
            solver.set_loglevel(Some("off".to_string()));
            let results = run_tasks(&solver, &demo_function(), &demo_tasks());
            let out_dir = Path::new("charts_png");
            let window = ChartWindow::default();
            if let Err(e) = std::fs::create_dir_all(out_dir) {
                error!("cannot create {}: {}", out_dir.display(), e);
                return;
            }
            if let Err(e) = function_chart(demo_objective, DEMO_LABEL, window, &out_dir.join("function.png")) {
                error!("function chart failed: {}", e);
            }
            match charts_for_all(demo_objective, DEMO_LABEL, &results, window, out_dir) {
                Ok(files) => {
                    for (method, path) in files {
                        info!("{}: chart saved to {}", method, path.display());
                    }
                }
                Err(e) => error!("charts failed: {}", e),
            }
        }
        2 => {
            // all methods at once, results compared side by side
            let _ = init_logger(Some("info"), false);
            let solver = ScalarMinimizer::new();
            let results: Vec<SearchResult> = solver
                .compare_methods(&demo_function(), &demo_tasks())
                .into_iter()
                .filter_map(Result::ok)
                .collect();
            info!("\n{}", comparison_table(&results));
            for result in &results {
                let filename = format!("{}_trace.csv", result.method.artifact_name());
                match save_trace_to_csv(&result.trace, Path::new(&filename)) {
                    Ok(()) => info!("trace saved to {}", filename),
                    Err(e) => error!("cannot save {}: {}", filename, e),
                }
            }
        }
        3 => {
            // searches described in a TOML file
            let Some(path) = task_file else {
                eprintln!("example 3 needs the path of a TOML task file");
                return;
            };
            match SearchTask::from_file(Path::new(path)) {
                Ok(task) => {
                    let solver = ScalarMinimizer::with_config(task.config);
                    let results = run_tasks(&solver, &demo_function(), &task.tasks);
                    if !solver.config().report {
                        results.iter().for_each(print_report);
                    }
                    info!("\n{}", comparison_table(&results));
                }
                Err(e) => eprintln!("cannot read task file {}: {}", path, e),
            }
        }
        _ => {
            eprintln!("unknown example {}, available: 0 (tables), 1 (charts), 2 (parallel comparison), 3 (TOML task)", example);
        }
    }
}
