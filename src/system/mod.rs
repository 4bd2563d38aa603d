pub mod logger;
pub mod report;

pub use logger::init_logging;
pub use report::{probe_report_lines, render_probe_report, render_report, report_lines};
