//! Results calculation.
//!
//! [`score`] is a pure function of an answer set and a catalog: it never
//! fails, never mutates, and returns identical results for identical
//! input. Which technical option is correct and which question feeds each
//! WISCAR dimension come from the catalog's [`ScoringRules`] tables rather
//! than from per-id branching.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::model::{AnswerSet, Section};
use crate::results::{
    wiscar_mean, AssessmentResults, Dimension, Recommendation, SectionScore, WiscarDimension,
    CAREER_PATHS, LEARNING_PATH,
};

/// Section scores at or above this are interpreted as excellent.
pub const EXCELLENT_THRESHOLD: i64 = 80;
/// Section scores at or above this are interpreted as promising.
pub const GOOD_THRESHOLD: i64 = 60;
/// Section scores at or above this list strengths instead of weaknesses.
pub const STRENGTH_THRESHOLD: i64 = 70;

/// Lookup tables that drive scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Upper bound of the psychometric scale.
    pub psychometric_max: i64,
    /// Technical question id → the one correct option.
    pub answer_key: BTreeMap<String, String>,
    /// One rule per WISCAR dimension, in reporting order.
    pub dimensions: Vec<DimensionRule>,
}

/// How a WISCAR dimension is read from its source question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionRule {
    pub dimension: Dimension,
    pub question_id: String,
    /// Scales the raw answer onto 0–100 (10 for a 1–10 scale, 20 for 1–5).
    pub multiplier: i64,
    /// Raw value assumed when the question is unanswered; the scale midpoint.
    pub default_value: i64,
}

impl DimensionRule {
    pub fn new(
        dimension: Dimension,
        question_id: &str,
        multiplier: i64,
        default_value: i64,
    ) -> Self {
        Self {
            dimension,
            question_id: question_id.to_string(),
            multiplier,
            default_value,
        }
    }
}

impl ScoringRules {
    /// Whether `answer` is the keyed option for `question_id`.
    /// `None` when the question has no key entry.
    pub fn is_correct(&self, question_id: &str, answer: &str) -> Option<bool> {
        self.answer_key
            .get(question_id)
            .map(|correct| correct == answer)
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        crate::builtin::scoring_rules()
    }
}

/// Round half toward positive infinity, so `-2.5` becomes `-2`.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// `round(100 * numerator / denominator)`, or 0 for an empty denominator.
pub fn percentage(numerator: f64, denominator: f64) -> i64 {
    if denominator == 0.0 {
        return 0;
    }
    round_half_up(100.0 * numerator / denominator)
}

/// Canned text attached to a section score.
struct Commentary {
    excellent: &'static str,
    good: &'static str,
    developing: &'static str,
    strengths: &'static [&'static str],
    baseline_strengths: &'static [&'static str],
    weaknesses: &'static [&'static str],
}

const PSYCHOMETRIC_COMMENTARY: Commentary = Commentary {
    excellent: "Excellent natural fit",
    good: "Good potential",
    developing: "Needs development",
    strengths: &["Strong motivation", "Good analytical mindset"],
    baseline_strengths: &["Room for growth"],
    weaknesses: &["Need stronger motivation", "Develop analytical skills"],
};

const TECHNICAL_COMMENTARY: Commentary = Commentary {
    excellent: "Ready to advance quickly",
    good: "Solid foundation",
    developing: "Beginner level",
    strengths: &["Good technical understanding", "Problem-solving skills"],
    baseline_strengths: &["Basic awareness"],
    weaknesses: &["Need technical fundamentals", "Learn IoT basics"],
};

fn section_score(score: i64, commentary: &Commentary) -> SectionScore {
    let interpretation = if score >= EXCELLENT_THRESHOLD {
        commentary.excellent
    } else if score >= GOOD_THRESHOLD {
        commentary.good
    } else {
        commentary.developing
    };
    let strong = score >= STRENGTH_THRESHOLD;
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    SectionScore {
        score,
        interpretation: interpretation.to_string(),
        strengths: if strong {
            owned(commentary.strengths)
        } else {
            owned(commentary.baseline_strengths)
        },
        weaknesses: if strong {
            Vec::new()
        } else {
            owned(commentary.weaknesses)
        },
    }
}

/// Mean psychometric answer as a percentage of the scale maximum.
///
/// Answers without a numeric reading (a chosen option) carry no scale
/// position and are left out of both the sum and the count.
pub fn psychometric_score(answers: &AnswerSet, catalog: &Catalog) -> i64 {
    let (sum, count) = answers
        .iter()
        .filter(|a| catalog.section_of(&a.question_id) == Some(Section::Psychometric))
        .filter_map(|a| a.value.as_number())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        tracing::debug!("no numeric psychometric answers, scoring section as 0");
    }
    percentage(sum, count as f64 * catalog.rules().psychometric_max as f64)
}

/// Share of answered technical questions that match the answer key.
pub fn technical_score(answers: &AnswerSet, catalog: &Catalog) -> i64 {
    let rules = catalog.rules();
    let technical: Vec<_> = answers
        .iter()
        .filter(|a| catalog.section_of(&a.question_id) == Some(Section::Technical))
        .collect();

    let correct = technical
        .iter()
        .filter(|a| {
            a.value
                .as_text()
                .and_then(|text| rules.is_correct(&a.question_id, text))
                .unwrap_or(false)
        })
        .count();

    if technical.is_empty() {
        tracing::debug!("no technical answers, scoring section as 0");
    }
    percentage(correct as f64, technical.len() as f64)
}

/// Score each WISCAR dimension from its source question.
pub fn wiscar_dimensions(answers: &AnswerSet, rules: &ScoringRules) -> Vec<WiscarDimension> {
    rules
        .dimensions
        .iter()
        .map(|rule| {
            // An explicit 0 is a real answer and scores 0. Only a missing or
            // non-numeric value takes the default.
            let raw = answers
                .value(&rule.question_id)
                .and_then(|v| v.as_number())
                .unwrap_or(rule.default_value as f64);
            WiscarDimension {
                dimension: rule.dimension,
                score: round_half_up(raw * rule.multiplier as f64),
                label: rule.dimension.label().to_string(),
                description: rule.dimension.description().to_string(),
            }
        })
        .collect()
}

/// Compute the full results for an answer set.
///
/// Missing answers fall back to neutral defaults; values outside a
/// question's declared domain are scored as given.
pub fn score(answers: &AnswerSet, catalog: &Catalog) -> AssessmentResults {
    let psych_score = psychometric_score(answers, catalog);
    let tech_score = technical_score(answers, catalog);
    let wiscar = wiscar_dimensions(answers, catalog.rules());

    let wiscar_average = wiscar_mean(&wiscar);

    // WISCAR is collapsed to one number before averaging with the other two.
    let overall_confidence =
        round_half_up((psych_score as f64 + tech_score as f64 + wiscar_average) / 3.0);
    let recommendation = Recommendation::from_confidence(overall_confidence);

    tracing::info!(
        psychometric = psych_score,
        technical = tech_score,
        overall = overall_confidence,
        %recommendation,
        "computed assessment results"
    );

    AssessmentResults {
        psychometric_fit: section_score(psych_score, &PSYCHOMETRIC_COMMENTARY),
        technical_readiness: section_score(tech_score, &TECHNICAL_COMMENTARY),
        wiscar_dimensions: wiscar,
        overall_confidence,
        recommendation,
        recommendation_reason: recommendation.reason().to_string(),
        next_steps: recommendation
            .next_steps()
            .iter()
            .map(|s| s.to_string())
            .collect(),
        career_paths: CAREER_PATHS.iter().map(|s| s.to_string()).collect(),
        learning_path: LEARNING_PATH.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, AnswerValue};

    fn answers(pairs: &[(&str, AnswerValue)]) -> AnswerSet {
        pairs
            .iter()
            .map(|(id, v)| Answer::new(*id, v.clone()))
            .collect()
    }

    fn num(n: i64) -> AnswerValue {
        AnswerValue::Number(n)
    }

    fn text(s: &str) -> AnswerValue {
        AnswerValue::from(s)
    }

    fn correct_technical() -> Vec<(&'static str, AnswerValue)> {
        vec![
            ("tech_1", text("Particulate matter (PM2.5) and gas sensors")),
            ("tech_2", text("LoRaWAN")),
            (
                "tech_3",
                text("Check if sensors are in direct sunlight and add shading"),
            ),
            (
                "tech_4",
                text("Use interpolation based on nearby sensors and time patterns"),
            ),
            ("tech_5", text("Python")),
        ]
    }

    /// Psychometric all `psych`, technical `correct` of 5 right,
    /// wiscar_1..5 at `self_rating` and wiscar_6 at `likert`.
    fn engineered(psych: i64, correct: usize, self_rating: i64, likert: i64) -> AnswerSet {
        let psych_ids = ["psych_1", "psych_2", "psych_3", "psych_4", "psych_5", "psych_6"];
        let mut pairs: Vec<(&str, AnswerValue)> =
            psych_ids.iter().map(|id| (*id, num(psych))).collect();
        for (i, (id, value)) in correct_technical().into_iter().enumerate() {
            pairs.push((id, if i < correct { value } else { text("wrong") }));
        }
        for id in ["wiscar_1", "wiscar_2", "wiscar_3", "wiscar_4", "wiscar_5"] {
            pairs.push((id, num(self_rating)));
        }
        pairs.push(("wiscar_6", num(likert)));
        answers(&pairs)
    }

    #[test]
    fn technical_answer_key_scores_100() {
        let catalog = Catalog::builtin();
        let set = answers(&correct_technical());
        assert_eq!(technical_score(&set, &catalog), 100);
        assert_eq!(score(&set, &catalog).technical_readiness.score, 100);
    }

    #[test]
    fn technical_partial_and_number_answers() {
        let catalog = Catalog::builtin();
        let set = answers(&[
            ("tech_1", text("Particulate matter (PM2.5) and gas sensors")),
            ("tech_2", text("WiFi")),
            ("tech_5", num(2)),
        ]);
        // 1 correct out of 3 answered
        assert_eq!(technical_score(&set, &catalog), 33);
    }

    #[test]
    fn wiscar_maximums_scale_to_100() {
        let catalog = Catalog::builtin();
        let set = answers(&[
            ("wiscar_1", num(10)),
            ("wiscar_2", num(10)),
            ("wiscar_3", num(10)),
            ("wiscar_4", num(10)),
            ("wiscar_5", num(10)),
            ("wiscar_6", num(5)),
        ]);
        let dims = wiscar_dimensions(&set, catalog.rules());
        assert_eq!(dims.len(), 6);
        assert!(dims.iter().all(|d| d.score == 100), "{dims:?}");
    }

    #[test]
    fn wiscar_defaults_are_scale_midpoints() {
        let catalog = Catalog::builtin();
        let results = score(&AnswerSet::new(), &catalog);
        let scores: Vec<i64> = results.wiscar_dimensions.iter().map(|d| d.score).collect();
        assert_eq!(scores, vec![50, 50, 50, 50, 50, 60]);
        let order: Vec<Dimension> = results
            .wiscar_dimensions
            .iter()
            .map(|d| d.dimension)
            .collect();
        assert_eq!(order, Dimension::ALL.to_vec());
        assert_eq!(results.wiscar_dimensions[5].label, "Real-World Alignment");
    }

    #[test]
    fn wiscar_explicit_zero_is_not_a_default() {
        let catalog = Catalog::builtin();
        let set = answers(&[("wiscar_1", num(0)), ("wiscar_2", text("lots"))]);
        let dims = wiscar_dimensions(&set, catalog.rules());
        assert_eq!(dims[0].score, 0);
        assert_eq!(dims[1].score, 50);
    }

    #[test]
    fn fractional_answers_are_scored_as_given() {
        let catalog = Catalog::builtin();
        let set = answers(&[
            ("psych_1", AnswerValue::Decimal(3.5)),
            ("wiscar_6", AnswerValue::Decimal(4.5)),
            ("wiscar_3", AnswerValue::Decimal(7.25)),
        ]);
        let results = score(&set, &catalog);
        assert_eq!(results.psychometric_fit.score, 70);
        assert_eq!(results.wiscar_dimensions[5].score, 90);
        // 72.5 rounds half-up
        assert_eq!(results.wiscar_dimensions[2].score, 73);
        // (50 + 50 + 73 + 50 + 50 + 90) / 6
        assert!((results.wiscar_average() - 60.5).abs() < 1e-9);
    }

    #[test]
    fn empty_sections_score_zero() {
        let catalog = Catalog::builtin();
        let results = score(&AnswerSet::new(), &catalog);
        assert_eq!(results.psychometric_fit.score, 0);
        assert_eq!(results.technical_readiness.score, 0);
        assert_eq!(results.psychometric_fit.interpretation, "Needs development");
        assert_eq!(results.technical_readiness.interpretation, "Beginner level");
        // (0 + 0 + 310/6) / 3 = 17.2
        assert_eq!(results.overall_confidence, 17);
        assert_eq!(results.recommendation, Recommendation::No);
    }

    #[test]
    fn psychometric_ignores_option_answers() {
        let catalog = Catalog::builtin();
        let set = answers(&[
            ("psych_1", num(4)),
            ("psych_2", num(4)),
            ("psych_6", text("Mix of field work and data analysis")),
        ]);
        assert_eq!(psychometric_score(&set, &catalog), 80);
    }

    #[test]
    fn out_of_domain_values_are_scored_as_given() {
        let catalog = Catalog::builtin();
        let set = answers(&[("psych_1", num(10))]);
        assert_eq!(psychometric_score(&set, &catalog), 200);
    }

    #[test]
    fn unknown_question_ids_are_ignored() {
        let catalog = Catalog::builtin();
        let set = answers(&[("psych_1", num(5)), ("bogus", num(1))]);
        assert_eq!(psychometric_score(&set, &catalog), 100);
        assert_eq!(technical_score(&set, &catalog), 0);
    }

    #[test]
    fn recommendation_boundaries() {
        let catalog = Catalog::builtin();

        // 80, 80, 80 -> 80
        let yes = score(&engineered(4, 4, 8, 4), &catalog);
        assert_eq!(yes.overall_confidence, 80);
        assert_eq!(yes.recommendation, Recommendation::Yes);

        // 80, 80, 76.67 -> 78.89
        let maybe = score(&engineered(4, 4, 8, 3), &catalog);
        assert_eq!(maybe.overall_confidence, 79);
        assert_eq!(maybe.recommendation, Recommendation::Maybe);

        // 60, 60, 56.67 -> 58.89
        let no = score(&engineered(3, 3, 6, 2), &catalog);
        assert_eq!(no.overall_confidence, 59);
        assert_eq!(no.recommendation, Recommendation::No);
        assert_eq!(no.next_steps.len(), 3);
    }

    #[test]
    fn overall_collapses_wiscar_first() {
        let catalog = Catalog::builtin();
        let mut pairs: Vec<(&str, AnswerValue)> = vec![("psych_1", num(5))];
        for id in ["wiscar_1", "wiscar_2", "wiscar_3", "wiscar_4", "wiscar_5"] {
            pairs.push((id, num(10)));
        }
        pairs.push(("wiscar_6", num(5)));
        let results = score(&answers(&pairs), &catalog);
        // (100 + 0 + 100) / 3
        assert_eq!(results.overall_confidence, 67);
        assert_eq!(results.recommendation, Recommendation::Maybe);
    }

    #[test]
    fn section_commentary_thresholds() {
        let strong = section_score(70, &PSYCHOMETRIC_COMMENTARY);
        assert_eq!(strong.interpretation, "Good potential");
        assert_eq!(strong.strengths.len(), 2);
        assert!(strong.weaknesses.is_empty());

        let weak = section_score(69, &TECHNICAL_COMMENTARY);
        assert_eq!(weak.strengths, vec!["Basic awareness".to_string()]);
        assert_eq!(weak.weaknesses.len(), 2);

        assert_eq!(
            section_score(80, &TECHNICAL_COMMENTARY).interpretation,
            "Ready to advance quickly"
        );
    }

    #[test]
    fn scoring_is_idempotent() {
        let catalog = Catalog::builtin();
        let set = engineered(3, 2, 7, 4);
        let first = serde_json::to_string(&score(&set, &catalog)).unwrap();
        let second = serde_json::to_string(&score(&set, &catalog)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(86.666), 87);
        assert_eq!(percentage(1.0, 3.0), 33);
        assert_eq!(percentage(2.0, 3.0), 67);
        assert_eq!(percentage(5.0, 0.0), 0);
    }
}
