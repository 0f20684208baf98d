//! Assessment reports with JSON persistence and Markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::engine::AssessmentEngine;
use crate::model::AnswerSet;
use crate::results::AssessmentResults;
use crate::scoring;

/// A completed (or abandoned) assessment: what was answered and what it
/// scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the catalog the answers belong to.
    pub catalog: CatalogSummary,
    /// When the assessment was started, if it was.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    pub answers: AnswerSet,
    pub results: AssessmentResults,
}

/// Summary of a catalog (without the question definitions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

impl AssessmentReport {
    /// Score `answers` against `catalog` and wrap them in a report.
    pub fn new(catalog: &Catalog, answers: AnswerSet, started_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            catalog: CatalogSummary {
                id: catalog.id.clone(),
                name: catalog.name.clone(),
                question_count: catalog.len(),
            },
            started_at,
            results: scoring::score(&answers, catalog),
            answers,
        }
    }

    /// Score the engine's answers and wrap them in a report.
    pub fn from_engine(engine: &AssessmentEngine) -> Self {
        Self::new(
            engine.catalog(),
            engine.answers().clone(),
            engine.state().start_time,
        )
    }

    /// Wall-clock seconds from start to report creation.
    pub fn duration_secs(&self) -> Option<i64> {
        self.started_at
            .map(|start| (self.created_at - start).num_seconds().max(0))
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AssessmentReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let r = &self.results;
        let mut md = String::new();

        md.push_str(&format!("# {} — Assessment Results\n\n", self.catalog.name));
        md.push_str(&format!(
            "**Recommendation:** {} ({})\n\n",
            r.recommendation.headline(),
            r.recommendation
        ));
        md.push_str(&format!(
            "**Overall Confidence Score:** {}%\n\n",
            r.overall_confidence
        ));
        md.push_str(&format!("{}\n\n", r.recommendation_reason));

        md.push_str("## Section Scores\n\n");
        md.push_str("| Section | Score | Interpretation |\n");
        md.push_str("|---------|-------|----------------|\n");
        md.push_str(&format!(
            "| Psychometric Fit | {}% | {} |\n",
            r.psychometric_fit.score, r.psychometric_fit.interpretation
        ));
        md.push_str(&format!(
            "| Technical Readiness | {}% | {} |\n\n",
            r.technical_readiness.score, r.technical_readiness.interpretation
        ));

        md.push_str("## WISCAR Dimensions\n\n");
        md.push_str("| Dimension | Score | Description |\n");
        md.push_str("|-----------|-------|-------------|\n");
        for d in &r.wiscar_dimensions {
            md.push_str(&format!(
                "| {} | {}% | {} |\n",
                d.label, d.score, d.description
            ));
        }
        md.push('\n');

        let list = |md: &mut String, title: &str, items: &[String], numbered: bool| {
            md.push_str(&format!("## {title}\n\n"));
            for (i, item) in items.iter().enumerate() {
                if numbered {
                    md.push_str(&format!("{}. {item}\n", i + 1));
                } else {
                    md.push_str(&format!("- {item}\n"));
                }
            }
            md.push('\n');
        };
        list(&mut md, "Next Steps", &r.next_steps, false);
        list(&mut md, "Career Paths", &r.career_paths, false);
        list(&mut md, "Learning Path", &r.learning_path, true);

        md.push_str(&format!(
            "_{} of {} questions answered. Report {} generated {}._\n",
            self.answers.len(),
            self.catalog.question_count,
            self.id,
            self.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        md
    }
}
