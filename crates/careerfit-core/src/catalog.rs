//! Question catalog and its TOML file format.
//!
//! A catalog is an ordered list of questions partitioned by section, plus
//! the scoring tables that go with them. Catalogs load from TOML files;
//! the built-in catalog lives in [`crate::builtin`].

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{Question, QuestionKind, QuestionType, RatingScale, Section};
use crate::results::Dimension;
use crate::scoring::{DimensionRule, ScoringRules};

/// An ordered, immutable collection of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Unique identifier for this catalog.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Questions in presentation order.
    pub questions: Vec<Question>,
    /// Answer key and WISCAR dimension sources.
    pub rules: ScoringRules,
}

impl Catalog {
    /// The built-in Environmental IoT Analyst catalog.
    pub fn builtin() -> Self {
        crate::builtin::catalog()
    }

    /// Questions of one section, in catalog order.
    pub fn questions_for(&self, section: Section) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.section == section)
            .collect()
    }

    pub fn get(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    pub fn section_of(&self, question_id: &str) -> Option<Section> {
        self.get(question_id).map(|q| q.section)
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TOML file format
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct TomlCatalogFile {
    catalog: TomlCatalogHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scoring: Option<TomlScoring>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlCatalogHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(rename = "type")]
    question_type: String,
    section: String,
    #[serde(default)]
    category: String,
    question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scenario_question: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scale: Option<TomlScale>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlScale {
    min: i64,
    max: i64,
    #[serde(default)]
    min_label: String,
    #[serde(default)]
    max_label: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlScoring {
    #[serde(default = "default_psychometric_max")]
    psychometric_max: i64,
    #[serde(default)]
    answer_key: BTreeMap<String, String>,
    #[serde(default)]
    dimensions: Vec<TomlDimension>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TomlDimension {
    dimension: String,
    question_id: String,
    multiplier: i64,
    default_value: i64,
}

fn default_psychometric_max() -> i64 {
    5
}

/// Parse a single TOML file into a `Catalog`.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `Catalog`.
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(convert_question)
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid question in {}", source_path.display()))?;

    let rules = match parsed.scoring {
        Some(scoring) => convert_scoring(scoring)
            .with_context(|| format!("invalid scoring table in {}", source_path.display()))?,
        None => ScoringRules::default(),
    };

    Ok(Catalog {
        id: parsed.catalog.id,
        name: parsed.catalog.name,
        description: parsed.catalog.description,
        questions,
        rules,
    })
}

fn convert_question(q: TomlQuestion) -> Result<Question> {
    let question_type: QuestionType = q
        .question_type
        .parse()
        .map_err(|e: String| anyhow::anyhow!("question {}: {}", q.id, e))?;
    let section: Section = q
        .section
        .parse()
        .map_err(|e: String| anyhow::anyhow!("question {}: {}", q.id, e))?;

    let scale = |scale: Option<TomlScale>| -> Result<RatingScale> {
        let s = scale.ok_or_else(|| {
            anyhow::anyhow!("question {}: {} questions need a scale", q.id, question_type)
        })?;
        anyhow::ensure!(
            s.min < s.max,
            "question {}: scale min ({}) must be below max ({})",
            q.id,
            s.min,
            s.max
        );
        Ok(RatingScale {
            min: s.min,
            max: s.max,
            min_label: s.min_label,
            max_label: s.max_label,
        })
    };

    let options = |options: Vec<String>| -> Result<Vec<String>> {
        anyhow::ensure!(
            !options.is_empty(),
            "question {}: {} questions need options",
            q.id,
            question_type
        );
        Ok(options)
    };

    let kind = match question_type {
        QuestionType::Likert => QuestionKind::Likert {
            scale: scale(q.scale)?,
        },
        QuestionType::SelfRating => QuestionKind::SelfRating {
            scale: scale(q.scale)?,
        },
        QuestionType::MultipleChoice => QuestionKind::MultipleChoice {
            options: options(q.options)?,
        },
        QuestionType::Scenario => {
            let context = q.context.filter(|c| !c.trim().is_empty()).ok_or_else(|| {
                anyhow::anyhow!("question {}: scenario questions need a context", q.id)
            })?;
            QuestionKind::Scenario {
                context,
                question: q.scenario_question.unwrap_or_default(),
                options: options(q.options)?,
            }
        }
    };

    Ok(Question {
        id: q.id,
        section,
        category: q.category,
        text: q.question,
        kind,
    })
}

fn convert_scoring(scoring: TomlScoring) -> Result<ScoringRules> {
    anyhow::ensure!(
        scoring.psychometric_max > 0,
        "psychometric_max must be positive"
    );

    let dimensions = if scoring.dimensions.is_empty() {
        ScoringRules::default().dimensions
    } else {
        let mut rules = scoring
            .dimensions
            .into_iter()
            .map(|d| {
                let dimension: Dimension =
                    d.dimension.parse().map_err(|e: String| anyhow::anyhow!(e))?;
                Ok(DimensionRule {
                    dimension,
                    question_id: d.question_id,
                    multiplier: d.multiplier,
                    default_value: d.default_value,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        for dimension in Dimension::ALL {
            let count = rules.iter().filter(|r| r.dimension == dimension).count();
            anyhow::ensure!(
                count == 1,
                "dimension {dimension} must be listed exactly once, found {count}"
            );
        }
        rules.sort_by_key(|r| r.dimension);
        rules
    };

    Ok(ScoringRules {
        psychometric_max: scoring.psychometric_max,
        answer_key: scoring.answer_key,
        dimensions,
    })
}

/// Render a catalog as TOML that [`parse_catalog_str`] reads back.
pub fn render_catalog_toml(catalog: &Catalog) -> Result<String> {
    let questions = catalog
        .questions
        .iter()
        .map(|q| {
            let mut toml_q = TomlQuestion {
                id: q.id.clone(),
                question_type: q.question_type().to_string(),
                section: q.section.to_string(),
                category: q.category.clone(),
                question: q.text.clone(),
                context: None,
                scenario_question: None,
                options: Vec::new(),
                scale: None,
            };
            match &q.kind {
                QuestionKind::Likert { scale } | QuestionKind::SelfRating { scale } => {
                    toml_q.scale = Some(TomlScale {
                        min: scale.min,
                        max: scale.max,
                        min_label: scale.min_label.clone(),
                        max_label: scale.max_label.clone(),
                    });
                }
                QuestionKind::MultipleChoice { options } => {
                    toml_q.options = options.clone();
                }
                QuestionKind::Scenario {
                    context,
                    question,
                    options,
                } => {
                    toml_q.context = Some(context.clone());
                    toml_q.scenario_question = Some(question.clone());
                    toml_q.options = options.clone();
                }
            }
            toml_q
        })
        .collect();

    let file = TomlCatalogFile {
        catalog: TomlCatalogHeader {
            id: catalog.id.clone(),
            name: catalog.name.clone(),
            description: catalog.description.clone(),
        },
        questions,
        scoring: Some(TomlScoring {
            psychometric_max: catalog.rules.psychometric_max,
            answer_key: catalog.rules.answer_key.clone(),
            dimensions: catalog
                .rules
                .dimensions
                .iter()
                .map(|d| TomlDimension {
                    dimension: d.dimension.to_string(),
                    question_id: d.question_id.clone(),
                    multiplier: d.multiplier,
                    default_value: d.default_value,
                })
                .collect(),
        }),
    };

    toml::to_string_pretty(&file).context("failed to serialize catalog")
}

/// Recursively load all `.toml` catalog files from a directory.
pub fn load_catalog_directory(dir: &Path) -> Result<Vec<Catalog>> {
    let mut catalogs = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            catalogs.extend(load_catalog_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_catalog(&path) {
                Ok(catalog) => catalogs.push(catalog),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(catalogs)
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a catalog for common issues.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let warn = |id: Option<&str>, message: String| ValidationWarning {
        question_id: id.map(str::to_string),
        message,
    };

    // Check for duplicate question IDs
    let mut seen_ids = HashSet::new();
    for q in &catalog.questions {
        if !seen_ids.insert(q.id.as_str()) {
            warnings.push(warn(Some(q.id.as_str()), format!("duplicate question ID: {}", q.id)));
        }
    }

    for q in &catalog.questions {
        if q.text.trim().is_empty() {
            warnings.push(warn(Some(q.id.as_str()), "question text is empty".into()));
        }
    }

    for section in Section::ALL {
        if catalog.questions_for(section).is_empty() {
            warnings.push(warn(None, format!("section {section} has no questions")));
        }
    }

    // Every choice question in the technical section needs a key entry
    for q in catalog.questions_for(Section::Technical) {
        if q.kind.options().is_some() && !catalog.rules.answer_key.contains_key(&q.id) {
            warnings.push(warn(
                Some(q.id.as_str()),
                "technical question has no answer key entry and can never be correct".into(),
            ));
        }
    }

    for (id, answer) in &catalog.rules.answer_key {
        match catalog.get(id) {
            None => warnings.push(warn(
                Some(id.as_str()),
                format!("answer key references unknown question: {id}"),
            )),
            Some(q) => match q.kind.options() {
                Some(options) if options.contains(answer) => {}
                Some(_) => warnings.push(warn(
                    Some(id.as_str()),
                    format!("answer key option is not offered: {answer}"),
                )),
                None => warnings.push(warn(
                    Some(id.as_str()),
                    format!("answer key entry on a {} question", q.question_type()),
                )),
            },
        }
    }

    for rule in &catalog.rules.dimensions {
        if catalog.get(&rule.question_id).is_none() {
            warnings.push(warn(
                Some(rule.question_id.as_str()),
                format!(
                    "dimension {} is sourced from unknown question: {}",
                    rule.dimension, rule.question_id
                ),
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[catalog]
id = "mini"
name = "Mini Catalog"
description = "A small catalog"

[[questions]]
id = "p1"
type = "likert"
section = "psychometric"
category = "interest"
question = "I like sensors."
scale = { min = 1, max = 5, min_label = "No", max_label = "Yes" }

[[questions]]
id = "t1"
type = "scenario"
section = "technical"
question = "A sensor reads hot. What now?"
context = "You run a sensor network."
scenario_question = "First step?"
options = ["Add shading", "Replace it"]

[[questions]]
id = "w1"
type = "self-rating"
section = "wiscar"
question = "Rate your will."
scale = { min = 1, max = 10 }

[scoring]
answer_key = { t1 = "Add shading" }
"#;

    fn parse(content: &str) -> Result<Catalog> {
        parse_catalog_str(content, &PathBuf::from("test.toml"))
    }

    #[test]
    fn parse_valid_toml() {
        let catalog = parse(VALID_TOML).unwrap();
        assert_eq!(catalog.id, "mini");
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.questions[0].question_type(), QuestionType::Likert);
        assert_eq!(catalog.section_of("t1"), Some(Section::Technical));
        assert!(matches!(
            &catalog.questions[1].kind,
            QuestionKind::Scenario { context, .. } if context == "You run a sensor network."
        ));
        assert_eq!(catalog.rules.is_correct("t1", "Add shading"), Some(true));
        // No dimensions table: the built-in dimension rules apply
        assert_eq!(catalog.rules.dimensions.len(), 6);
    }

    #[test]
    fn missing_scoring_uses_builtin_rules() {
        let toml = r#"
[catalog]
id = "bare"
name = "Bare"
"#;
        let catalog = parse(toml).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.rules, ScoringRules::default());
    }

    #[test]
    fn likert_without_scale_is_rejected() {
        let toml = r#"
[catalog]
id = "bad"
name = "Bad"

[[questions]]
id = "p1"
type = "likert"
section = "psychometric"
question = "No scale here"
"#;
        let err = parse(toml).unwrap_err();
        assert!(format!("{err:#}").contains("need a scale"), "{err:#}");
    }

    #[test]
    fn unknown_section_is_rejected() {
        let toml = r#"
[catalog]
id = "bad"
name = "Bad"

[[questions]]
id = "x"
type = "likert"
section = "intro"
question = "?"
scale = { min = 1, max = 5 }
"#;
        assert!(parse(toml).is_err());
    }

    #[test]
    fn incomplete_dimension_table_is_rejected() {
        let toml = r#"
[catalog]
id = "bad"
name = "Bad"

[[scoring.dimensions]]
dimension = "will"
question_id = "w1"
multiplier = 10
default_value = 5
"#;
        let err = parse(toml).unwrap_err();
        assert!(format!("{err:#}").contains("exactly once"), "{err:#}");
    }

    #[test]
    fn parse_malformed_toml() {
        assert!(parse("this is not [valid toml }{").is_err());
    }

    #[test]
    fn builtin_renders_and_parses_back() {
        let builtin = Catalog::builtin();
        let rendered = render_catalog_toml(&builtin).unwrap();
        let parsed = parse(&rendered).unwrap();
        assert_eq!(parsed, builtin);
    }

    #[test]
    fn validate_reports_catalog_problems() {
        let toml = r#"
[catalog]
id = "warn"
name = "Warnings"

[[questions]]
id = "t1"
type = "multiple-choice"
section = "technical"
question = "Pick one"
options = ["a", "b"]

[[questions]]
id = "t1"
type = "multiple-choice"
section = "technical"
question = " "
options = ["a", "b"]

[scoring]
answer_key = { ghost = "a" }
"#;
        let catalog = parse(toml).unwrap();
        let warnings = validate_catalog(&catalog);
        let has = |needle: &str| warnings.iter().any(|w| w.message.contains(needle));
        assert!(has("duplicate"));
        assert!(has("text is empty"));
        assert!(has("section psychometric has no questions"));
        assert!(has("no answer key entry"));
        assert!(has("unknown question: ghost"));
        assert!(has("sourced from unknown question"));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mini.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not = [toml").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalogs = load_catalog_directory(dir.path()).unwrap();
        assert_eq!(catalogs.len(), 1);
        assert_eq!(catalogs[0].id, "mini");
    }
}
