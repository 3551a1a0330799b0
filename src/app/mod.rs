// Application layer: console rendering, report export and the scaling demo.

pub mod demo;
pub mod report;

pub use demo::{default_cases, render_demo, render_scaled, run_demo, DemoCase, DemoResult};
pub use report::{export_report, render_report, ExportSettings};
