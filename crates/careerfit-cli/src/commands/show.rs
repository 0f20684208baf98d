//! The `careerfit show` command.

use std::path::PathBuf;

use anyhow::Result;

use careerfit_core::report::AssessmentReport;

use crate::render;

pub fn execute(report_path: PathBuf, format: String) -> Result<()> {
    let report = AssessmentReport::load_json(&report_path)?;
    render::print_report(&report, &format)
}
