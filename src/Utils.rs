//! different utility modules used throughout the project
/// logger set-up and csv dump of iteration traces
pub mod logger;
/// charts of the iterates and of the error per iteration
pub mod plots;
/// iteration tables and summaries
pub mod report;
/// read search tasks from TOML documents
pub mod task_parser;
