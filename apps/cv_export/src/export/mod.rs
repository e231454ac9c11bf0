// Export pipeline: localize → (keywords) → context → render → name → write.

pub mod context;
pub mod dispatcher;
pub mod keywords;
pub mod naming;

pub use dispatcher::{ExportJob, ExportReport, Exporter, OutputFormat, UnitStatus};
