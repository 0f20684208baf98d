//! The `careerfit score` command.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use careerfit_core::catalog::Catalog;
use careerfit_core::model::{Answer, AnswerSet, AnswerValue};
use careerfit_core::report::AssessmentReport;

use crate::config::load_config_from;
use crate::render;

pub fn execute(
    answers_path: PathBuf,
    catalog_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let catalog = super::load_catalog(catalog_path.as_deref().or(config.catalog.as_deref()))?;
    let answers = load_answer_sheet(&answers_path, &catalog)?;

    let report = AssessmentReport::new(&catalog, answers, None);
    render::print_report(&report, &format)
}

/// TOML answer sheets keep their answers under an `[answers]` table.
#[derive(Debug, Deserialize)]
struct TomlAnswerSheet {
    answers: BTreeMap<String, AnswerValue>,
}

/// Load an answer sheet: a JSON object or a TOML `[answers]` table mapping
/// question id to a number or option text.
pub fn load_answer_sheet(path: &Path, catalog: &Catalog) -> Result<AnswerSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer sheet: {}", path.display()))?;

    let values: BTreeMap<String, AnswerValue> =
        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse answer sheet: {}", path.display()))?
        } else {
            toml::from_str::<TomlAnswerSheet>(&content)
                .with_context(|| format!("failed to parse answer sheet: {}", path.display()))?
                .answers
        };

    for id in values.keys() {
        if catalog.get(id).is_none() {
            tracing::warn!("answer sheet references unknown question {id}");
        }
    }

    Ok(values
        .into_iter()
        .map(|(id, value)| Answer::new(id, value))
        .collect())
}
