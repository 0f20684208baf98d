//! Core data model types for careerfit.
//!
//! Questions, answers, and the mutable assessment state that the engine
//! owns. The catalog partitions questions into [`Section`]s; the engine
//! walks through [`Phase`]s, which add the question-less `intro` and
//! `results` bookends.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A question-bearing partition of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Psychometric,
    Technical,
    Wiscar,
}

impl Section {
    /// All sections in the order they are presented.
    pub const ALL: [Section; 3] = [Section::Psychometric, Section::Technical, Section::Wiscar];

    /// Heading shown while the section is in progress.
    pub fn title(&self) -> &'static str {
        match self {
            Section::Psychometric => "Psychometric Analysis",
            Section::Technical => "Technical Aptitude Test",
            Section::Wiscar => "WISCAR Framework Analysis",
        }
    }

    /// Message shown once every question of the section has been answered.
    pub fn completion_message(&self) -> &'static str {
        match self {
            Section::Psychometric => {
                "Psychometric Analysis Complete! Next, we'll evaluate your technical \
                 knowledge and problem-solving skills related to IoT and environmental science."
            }
            Section::Technical => {
                "Technical Assessment Complete! Finally, we'll assess your readiness across \
                 six key dimensions: Will, Interest, Skill, Cognitive ability, learning \
                 Ability, and Real-world alignment."
            }
            Section::Wiscar => {
                "WISCAR Analysis Complete! Get your comprehensive career recommendation, \
                 detailed insights, and personalized learning path."
            }
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Psychometric => write!(f, "psychometric"),
            Section::Technical => write!(f, "technical"),
            Section::Wiscar => write!(f, "wiscar"),
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "psychometric" | "psych" => Ok(Section::Psychometric),
            "technical" | "tech" => Ok(Section::Technical),
            "wiscar" => Ok(Section::Wiscar),
            other => Err(format!("unknown section: {other}")),
        }
    }
}

/// A step of the assessment. Phases only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Intro,
    Psychometric,
    Technical,
    Wiscar,
    Results,
}

impl Phase {
    /// The phase that follows this one. `Results` is terminal.
    pub fn next(self) -> Phase {
        match self {
            Phase::Intro => Phase::Psychometric,
            Phase::Psychometric => Phase::Technical,
            Phase::Technical => Phase::Wiscar,
            Phase::Wiscar | Phase::Results => Phase::Results,
        }
    }

    /// The catalog section asked during this phase, if any.
    pub fn section(self) -> Option<Section> {
        match self {
            Phase::Psychometric => Some(Section::Psychometric),
            Phase::Technical => Some(Section::Technical),
            Phase::Wiscar => Some(Section::Wiscar),
            Phase::Intro | Phase::Results => None,
        }
    }
}

impl From<Section> for Phase {
    fn from(section: Section) -> Self {
        match section {
            Section::Psychometric => Phase::Psychometric,
            Section::Technical => Phase::Technical,
            Section::Wiscar => Phase::Wiscar,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Intro => write!(f, "intro"),
            Phase::Results => write!(f, "results"),
            Phase::Psychometric => write!(f, "psychometric"),
            Phase::Technical => write!(f, "technical"),
            Phase::Wiscar => write!(f, "wiscar"),
        }
    }
}

/// The four kinds of question the catalog can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    Likert,
    MultipleChoice,
    Scenario,
    SelfRating,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Likert => write!(f, "likert"),
            QuestionType::MultipleChoice => write!(f, "multiple-choice"),
            QuestionType::Scenario => write!(f, "scenario"),
            QuestionType::SelfRating => write!(f, "self-rating"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "likert" => Ok(QuestionType::Likert),
            "multiple-choice" => Ok(QuestionType::MultipleChoice),
            "scenario" => Ok(QuestionType::Scenario),
            "self-rating" => Ok(QuestionType::SelfRating),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// An integer rating scale with labelled endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingScale {
    pub min: i64,
    pub max: i64,
    pub min_label: String,
    pub max_label: String,
}

impl RatingScale {
    pub fn new(min: i64, max: i64, min_label: &str, max_label: &str) -> Self {
        Self {
            min,
            max,
            min_label: min_label.to_string(),
            max_label: max_label.to_string(),
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// The value a slider starts at before the user moves it.
    pub fn midpoint(&self) -> i64 {
        (self.min + self.max).div_euclid(2)
    }
}

/// Type-specific payload of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    Likert {
        scale: RatingScale,
    },
    SelfRating {
        scale: RatingScale,
    },
    MultipleChoice {
        options: Vec<String>,
    },
    Scenario {
        /// Background shown before the options.
        context: String,
        /// The focused question asked about the context.
        question: String,
        options: Vec<String>,
    },
}

impl QuestionKind {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionKind::Likert { .. } => QuestionType::Likert,
            QuestionKind::SelfRating { .. } => QuestionType::SelfRating,
            QuestionKind::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionKind::Scenario { .. } => QuestionType::Scenario,
        }
    }

    pub fn scale(&self) -> Option<&RatingScale> {
        match self {
            QuestionKind::Likert { scale } | QuestionKind::SelfRating { scale } => Some(scale),
            _ => None,
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match self {
            QuestionKind::MultipleChoice { options } | QuestionKind::Scenario { options, .. } => {
                Some(options)
            }
            _ => None,
        }
    }
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable key used to correlate answers.
    pub id: String,
    pub section: Section,
    /// Reporting tag; not used by scoring.
    #[serde(default)]
    pub category: String,
    /// The question as shown to the user.
    pub text: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    /// Whether `value` lies in this question's answer domain.
    ///
    /// The engine never calls this; drivers use it to keep malformed
    /// input out of the answer set.
    pub fn accepts(&self, value: &AnswerValue) -> bool {
        match (&self.kind, value) {
            (QuestionKind::Likert { scale }, AnswerValue::Number(n))
            | (QuestionKind::SelfRating { scale }, AnswerValue::Number(n)) => scale.contains(*n),
            (QuestionKind::MultipleChoice { options }, AnswerValue::Text(t))
            | (QuestionKind::Scenario { options, .. }, AnswerValue::Text(t)) => options.contains(t),
            _ => false,
        }
    }
}

/// A single recorded value: a scale position or a chosen option.
///
/// Whole numbers stay integers. Fractional values are kept as given
/// (they fall outside every scale but still score).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(i64),
    Decimal(f64),
    Text(String),
}

impl AnswerValue {
    /// Numeric reading of the value. Text that spells a number counts.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n as f64),
            AnswerValue::Decimal(v) => Some(*v).filter(|v| v.is_finite()),
            AnswerValue::Text(t) => t.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(t) => Some(t),
            AnswerValue::Number(_) | AnswerValue::Decimal(_) => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Number(n) => write!(f, "{n}"),
            AnswerValue::Decimal(v) => write!(f, "{v}"),
            AnswerValue::Text(t) => write!(f, "{t}"),
        }
    }
}

impl From<i64> for AnswerValue {
    fn from(n: i64) -> Self {
        AnswerValue::Number(n)
    }
}

impl From<f64> for AnswerValue {
    fn from(v: f64) -> Self {
        if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
            AnswerValue::Number(v as i64)
        } else {
            AnswerValue::Decimal(v)
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

/// A recorded answer to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    pub value: AnswerValue,
    pub timestamp: DateTime<Utc>,
}

impl Answer {
    pub fn new(question_id: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Self {
            question_id: question_id.into(),
            value: value.into(),
            timestamp: Utc::now(),
        }
    }
}

/// At most one live answer per question id. Re-recording overwrites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<String, Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the answer for its question id, returning the
    /// answer it replaced.
    pub fn record(&mut self, answer: Answer) -> Option<Answer> {
        self.answers.insert(answer.question_id.clone(), answer)
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    pub fn value(&self, question_id: &str) -> Option<&AnswerValue> {
        self.get(question_id).map(|a| &a.value)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.answers.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Answers in question-id order.
    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.answers.values()
    }
}

impl FromIterator<Answer> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = Answer>>(iter: I) -> Self {
        let mut set = AnswerSet::new();
        for answer in iter {
            set.record(answer);
        }
        set
    }
}

/// The only mutable entity of an assessment, owned by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentState {
    pub phase: Phase,
    /// Offset into the current section's questions. Equal to the section
    /// length once every question has been visited.
    pub current_question_index: usize,
    pub answers: AnswerSet,
    pub start_time: Option<DateTime<Utc>>,
    pub section_start_time: Option<DateTime<Utc>>,
}

impl AssessmentState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Intro,
            current_question_index: 0,
            answers: AnswerSet::new(),
            start_time: None,
            section_start_time: None,
        }
    }
}

impl Default for AssessmentState {
    fn default() -> Self {
        Self::new()
    }
}

/// Position within the current section, one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (100.0 * self.current as f64 / self.total as f64 + 0.5).floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_display_and_parse() {
        assert_eq!(Section::Wiscar.to_string(), "wiscar");
        assert_eq!("Technical".parse::<Section>().unwrap(), Section::Technical);
        assert_eq!("psych".parse::<Section>().unwrap(), Section::Psychometric);
        assert!("intro".parse::<Section>().is_err());
        assert!("results".parse::<Section>().is_err());
    }

    #[test]
    fn phase_order_is_linear_and_terminal() {
        let mut phase = Phase::Intro;
        let mut seen = vec![];
        for _ in 0..6 {
            phase = phase.next();
            seen.push(phase);
        }
        assert_eq!(
            seen,
            vec![
                Phase::Psychometric,
                Phase::Technical,
                Phase::Wiscar,
                Phase::Results,
                Phase::Results,
                Phase::Results,
            ]
        );
        assert_eq!(Phase::Intro.section(), None);
        assert_eq!(Phase::Results.section(), None);
        assert_eq!(Phase::Wiscar.section(), Some(Section::Wiscar));
    }

    #[test]
    fn question_type_parse() {
        assert_eq!(
            "multiple_choice".parse::<QuestionType>().unwrap(),
            QuestionType::MultipleChoice
        );
        assert_eq!(
            "Self-Rating".parse::<QuestionType>().unwrap(),
            QuestionType::SelfRating
        );
        assert!("essay".parse::<QuestionType>().is_err());
    }

    #[test]
    fn answer_value_numeric_reading() {
        assert_eq!(AnswerValue::Number(4).as_number(), Some(4.0));
        assert_eq!(AnswerValue::from(" 3 ").as_number(), Some(3.0));
        assert_eq!(AnswerValue::from("LoRaWAN").as_number(), None);
        assert_eq!(AnswerValue::from("NaN").as_number(), None);
    }

    #[test]
    fn answer_value_untagged_json() {
        let n: AnswerValue = serde_json::from_str("7").unwrap();
        let t: AnswerValue = serde_json::from_str("\"Python\"").unwrap();
        assert_eq!(n, AnswerValue::Number(7));
        assert_eq!(t, AnswerValue::Text("Python".into()));
    }

    #[test]
    fn fractional_answers_are_kept() {
        let v: AnswerValue = serde_json::from_str("4.5").unwrap();
        assert_eq!(v, AnswerValue::Decimal(4.5));
        assert_eq!(v.as_number(), Some(4.5));
        assert_eq!(v.to_string(), "4.5");
        assert_eq!(serde_json::to_string(&v).unwrap(), "4.5");

        assert_eq!(AnswerValue::from(3.0), AnswerValue::Number(3));
        assert_eq!(AnswerValue::from(3.0).to_string(), "3");
        assert_eq!(AnswerValue::from(f64::NAN).as_number(), None);
    }

    #[test]
    fn answer_set_overwrites_per_id() {
        let mut set = AnswerSet::new();
        assert!(set.record(Answer::new("psych_1", 2)).is_none());
        let previous = set.record(Answer::new("psych_1", 5)).unwrap();
        assert_eq!(previous.value, AnswerValue::Number(2));
        assert_eq!(set.len(), 1);
        assert_eq!(set.value("psych_1"), Some(&AnswerValue::Number(5)));
    }

    #[test]
    fn accepts_checks_domain() {
        let likert = Question {
            id: "q".into(),
            section: Section::Psychometric,
            category: String::new(),
            text: "?".into(),
            kind: QuestionKind::Likert {
                scale: RatingScale::new(1, 5, "low", "high"),
            },
        };
        assert!(likert.accepts(&AnswerValue::Number(5)));
        assert!(!likert.accepts(&AnswerValue::Number(6)));
        assert!(!likert.accepts(&AnswerValue::Decimal(4.5)));
        assert!(!likert.accepts(&AnswerValue::from("5")));

        let choice = Question {
            kind: QuestionKind::MultipleChoice {
                options: vec!["a".into(), "b".into()],
            },
            ..likert
        };
        assert!(choice.accepts(&AnswerValue::from("b")));
        assert!(!choice.accepts(&AnswerValue::from("c")));
    }

    #[test]
    fn scale_midpoint_rounds_down() {
        assert_eq!(RatingScale::new(1, 5, "", "").midpoint(), 3);
        assert_eq!(RatingScale::new(1, 10, "", "").midpoint(), 5);
    }

    #[test]
    fn progress_percentage() {
        assert_eq!(Progress { current: 1, total: 6 }.percentage(), 17);
        assert_eq!(Progress { current: 5, total: 5 }.percentage(), 100);
        assert_eq!(Progress { current: 1, total: 0 }.percentage(), 0);
    }
}
