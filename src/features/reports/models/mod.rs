mod report;

pub use report::{CreateReport, DeletedReport, Report, ReportChanges};
