pub mod aggregate;
pub mod clean;
pub mod config;
pub mod export;
pub mod record;
pub mod report;
pub mod sample;
pub mod source;

pub use clean::clean;
pub use record::{EnrichedMatch, MatchRecord, Outcome, RawRow, TeamResult};
pub use report::{Report, ReportOptions, run_pipeline};
