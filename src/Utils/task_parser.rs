//! Reads a search task from a TOML document:
//!
//! ```toml
//! [config]
//! max_iterations = 1000
//! loglevel = "info"
//! report = true
//!
//! [[task]]
//! method = "dichotomy"
//! a = -1.0
//! b = 1.0
//! delta = 1e-5
//! tol = 1e-4
//!
//! [[task]]
//! method = "directional"
//! x0 = 0.0
//! ```
//! Missing numeric keys that have a conventional value (delta, h, tol) take it,
//! bracket ends and start points are required. Integers are accepted where floats are expected.
use crate::numerical::optimization::minimize_scalar::{SearchConfig, SearchParams};
use crate::numerical::optimization::search_trace::SearchMethod;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use toml::{Table, Value};

pub const DEFAULT_TOL: f64 = 1e-4;
pub const DEFAULT_DELTA: f64 = 1e-5;
pub const DEFAULT_STEP: f64 = 0.01;

/// configuration plus the list of searches to run
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTask {
    pub config: SearchConfig,
    pub tasks: Vec<SearchParams>,
}

impl SearchTask {
    pub fn from_toml_str(document: &str) -> Result<Self, Box<dyn Error>> {
        let table: Table = document.parse()?;
        for key in table.keys() {
            if key != "config" && key != "task" {
                return Err(format!("unknown section '{}'", key).into());
            }
        }
        let config = match table.get("config") {
            Some(value) => parse_config(as_table(value, "config")?)?,
            None => SearchConfig::default(),
        };
        let tasks = match table.get("task") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| parse_params(as_table(item, "task")?))
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err("'task' must be an array of tables ([[task]])".into()),
            None => Vec::new(),
        };
        Ok(Self { config, tasks })
    }

    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let document = fs::read_to_string(path)?;
        Self::from_toml_str(&document)
    }
}

fn as_table<'a>(value: &'a Value, name: &str) -> Result<&'a Table, Box<dyn Error>> {
    value
        .as_table()
        .ok_or_else(|| format!("'{}' must be a table", name).into())
}

pub(crate) fn get_f64(table: &Table, key: &str, default: Option<f64>) -> Result<f64, Box<dyn Error>> {
    match table.get(key) {
        Some(Value::Float(v)) => Ok(*v),
        Some(Value::Integer(v)) => Ok(*v as f64),
        Some(other) => Err(format!("'{}' must be a number, got {}", key, other).into()),
        None => default.ok_or_else(|| format!("missing key '{}'", key).into()),
    }
}

fn parse_config(table: &Table) -> Result<SearchConfig, Box<dyn Error>> {
    let mut config = SearchConfig::default();
    for (key, value) in table {
        match (key.as_str(), value) {
            ("max_iterations", Value::Integer(n)) if *n >= 0 => {
                config.max_iterations = Some(*n as usize)
            }
            ("loglevel", Value::String(level)) => config.loglevel = Some(level.clone()),
            ("report", Value::Boolean(flag)) => config.report = *flag,
            ("log_to_file", Value::Boolean(flag)) => config.log_to_file = *flag,
            (key, value) => {
                return Err(format!("invalid config entry {} = {}", key, value).into());
            }
        }
    }
    Ok(config)
}

fn parse_params(table: &Table) -> Result<SearchParams, Box<dyn Error>> {
    let method = match table.get("method") {
        Some(Value::String(name)) => SearchMethod::from_str(name)
            .map_err(|_| format!("unknown method '{}'", name))?,
        _ => return Err("every task needs a 'method' string".into()),
    };
    let tol = get_f64(table, "tol", Some(DEFAULT_TOL))?;
    let params = match method {
        SearchMethod::Dichotomy => SearchParams::Dichotomy {
            a: get_f64(table, "a", None)?,
            b: get_f64(table, "b", None)?,
            delta: get_f64(table, "delta", Some(DEFAULT_DELTA))?,
            tol,
        },
        SearchMethod::GoldenRatio => SearchParams::GoldenRatio {
            a: get_f64(table, "a", None)?,
            b: get_f64(table, "b", None)?,
            tol,
        },
        SearchMethod::Directional => SearchParams::Directional {
            x0: get_f64(table, "x0", None)?,
            h: get_f64(table, "h", Some(DEFAULT_STEP))?,
            tol,
        },
        SearchMethod::Secant => SearchParams::Secant {
            x0: get_f64(table, "x0", None)?,
            x1: get_f64(table, "x1", None)?,
            tol,
        },
    };
    Ok(params)
}
