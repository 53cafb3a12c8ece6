/*
Pretty printing of iteration traces: one table row per iteration with the columns of the
method, followed by the summary of the search.
*/
use crate::numerical::optimization::search_trace::{
    IterationRecord, RecordDetails, SearchMethod, SearchResult, Trace,
};
use log::info;
use tabled::{Table, builder::Builder, settings::Style};

/// column names of the trace of `method`
pub fn trace_headers(method: SearchMethod) -> Vec<&'static str> {
    match method {
        SearchMethod::Dichotomy | SearchMethod::GoldenRatio => {
            vec!["Iter", "x*", "F(x*)", "Tol", "A", "B", "C", "D"]
        }
        SearchMethod::Directional => vec!["Iter", "x*", "F(x*)", "|h|", "Phase"],
        SearchMethod::Secant => vec![
            "Iter", "x*", "F(x*)", "df(x*)", "|x0-x1|", "x0", "x1", "d0", "d1",
        ],
    }
}

fn rounded(value: Option<f64>, digits: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", digits, v),
        None => "-".to_string(),
    }
}

fn trace_row(record: &IterationRecord) -> Vec<String> {
    match record.details {
        RecordDetails::Bracket { a, b, c, d } => vec![
            record.iter.to_string(),
            rounded(Some(record.x), 5),
            rounded(record.fx, 5),
            rounded(Some(record.error), 5),
            rounded(Some(a), 5),
            rounded(Some(b), 5),
            rounded(Some(c), 5),
            rounded(Some(d), 5),
        ],
        RecordDetails::Step { h, phase } => vec![
            record.iter.to_string(),
            rounded(Some(record.x), 6),
            rounded(record.fx, 6),
            rounded(Some(h.abs()), 6),
            phase.to_string(),
        ],
        RecordDetails::Secant {
            df,
            gap,
            x0,
            x1,
            d0,
            d1,
        } => {
            // iteration 0 has no estimate yet
            let x = record.fx.map(|_| record.x);
            vec![
                record.iter.to_string(),
                rounded(x, 4),
                rounded(record.fx, 4),
                rounded(df, 10),
                rounded(gap, 10),
                rounded(Some(x0), 4),
                rounded(Some(x1), 4),
                rounded(Some(d0), 4),
                rounded(Some(d1), 4),
            ]
        }
    }
}

/// table with one row per iteration
pub fn trace_table(trace: &Trace) -> Table {
    let mut builder = Builder::default();
    builder.push_record(trace_headers(trace.method()));
    for record in trace.records() {
        builder.push_record(trace_row(record));
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table
}

/// `x*` is the minimizer and `f(x*)` its value for every method
pub fn summary_line(result: &SearchResult) -> String {
    format!(
        "minimum f(x) = {:.5} at x = {:.5}\t|\t eps: {:e}",
        result.min_value, result.minimizer, result.final_error
    )
}

pub fn calls_line(result: &SearchResult) -> String {
    let what = match result.method {
        SearchMethod::Secant => "derivative calls",
        _ => "function calls",
    };
    format!("{}: {}", what, result.call_count)
}

pub fn print_report(result: &SearchResult) {
    let table = trace_table(&result.trace);
    info!(
        "\n {} (iterations):\n{}\n{}\n{}",
        result.method.title(),
        table,
        summary_line(result),
        calls_line(result)
    );
}
