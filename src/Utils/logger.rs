//! Logger set-up and csv dump of iteration traces.
use crate::Utils::report::trace_headers;
use crate::numerical::optimization::search_trace::{RecordDetails, Trace};
use chrono::Local;
use csv::Writer;
use simplelog::*;
use std::error::Error;
use std::fs::File;
use std::path::Path;

/// maps the textual log level; None means logging is switched off
pub fn parse_loglevel(loglevel: Option<&str>) -> Result<Option<LevelFilter>, Box<dyn Error>> {
    match loglevel {
        None => Ok(Some(LevelFilter::Info)),
        Some("off") | Some("none") => Ok(None),
        Some("debug") => Ok(Some(LevelFilter::Debug)),
        Some("info") => Ok(Some(LevelFilter::Info)),
        Some("warn") => Ok(Some(LevelFilter::Warn)),
        Some("error") => Ok(Some(LevelFilter::Error)),
        Some(other) => Err(format!(
            "loglevel must be off, none, debug, info, warn or error, got '{}'",
            other
        )
        .into()),
    }
}

/// Starts terminal logging (and a `log_<date>.txt` file if asked).
/// Returns Ok(false) when logging is off; a logger set earlier is kept.
pub fn init_logger(loglevel: Option<&str>, log_to_file: bool) -> Result<bool, Box<dyn Error>> {
    init_logger_in(loglevel, log_to_file, Path::new("."))
}

/// true once a logger has been installed in this process
pub fn logger_installed() -> bool {
    log::max_level() != LevelFilter::Off
}

pub(crate) fn init_logger_in(
    loglevel: Option<&str>,
    log_to_file: bool,
    log_dir: &Path,
) -> Result<bool, Box<dyn Error>> {
    let level = match parse_loglevel(loglevel)? {
        Some(level) => level,
        None => return Ok(false),
    };
    // the global logger can be set only once, no new log file for later calls
    if logger_installed() {
        return Ok(true);
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if log_to_file {
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let name = log_dir.join(format!("log_{}.txt", date_and_time));
        loggers.push(WriteLogger::new(level, Config::default(), File::create(name)?));
    }
    // another thread may have won the race since the check above
    let _ = CombinedLogger::init(loggers);
    Ok(true)
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// saves all records of the trace with full precision, empty cells for missing values
pub fn save_trace_to_csv(trace: &Trace, filename: &Path) -> Result<(), Box<dyn Error>> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(trace_headers(trace.method()))?;

    for record in trace.records() {
        let mut row = vec![
            record.iter.to_string(),
            record.x.to_string(),
            cell(record.fx),
        ];
        match record.details {
            RecordDetails::Bracket { a, b, c, d } => {
                row.push(record.error.to_string());
                row.extend([a, b, c, d].iter().map(|v| v.to_string()));
            }
            RecordDetails::Step { h, phase } => {
                row.push(h.abs().to_string());
                row.push(phase.to_string());
            }
            RecordDetails::Secant {
                df,
                gap,
                x0,
                x1,
                d0,
                d1,
            } => {
                row.push(cell(df));
                row.push(cell(gap));
                row.extend([x0, x1, d0, d1].iter().map(|v| v.to_string()));
            }
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
