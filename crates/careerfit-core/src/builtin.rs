//! The built-in "Environmental IoT Analyst" catalog.

use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::model::{Question, QuestionKind, RatingScale, Section};
use crate::results::Dimension;
use crate::scoring::{DimensionRule, ScoringRules};

pub const CATALOG_ID: &str = "environmental-iot";

fn agreement() -> RatingScale {
    RatingScale::new(1, 5, "Strongly Disagree", "Strongly Agree")
}

fn likert(id: &str, section: Section, category: &str, text: &str, scale: RatingScale) -> Question {
    Question {
        id: id.into(),
        section,
        category: category.into(),
        text: text.into(),
        kind: QuestionKind::Likert { scale },
    }
}

fn self_rating(id: &str, category: &str, text: &str, min_label: &str, max_label: &str) -> Question {
    Question {
        id: id.into(),
        section: Section::Wiscar,
        category: category.into(),
        text: text.into(),
        kind: QuestionKind::SelfRating {
            scale: RatingScale::new(1, 10, min_label, max_label),
        },
    }
}

fn choice(id: &str, section: Section, category: &str, text: &str, options: &[&str]) -> Question {
    Question {
        id: id.into(),
        section,
        category: category.into(),
        text: text.into(),
        kind: QuestionKind::MultipleChoice {
            options: options.iter().map(|o| o.to_string()).collect(),
        },
    }
}

pub fn questions() -> Vec<Question> {
    use Section::*;

    vec![
        likert(
            "psych_1",
            Psychometric,
            "interest",
            "I enjoy learning about new environmental technologies and their impact on sustainability.",
            agreement(),
        ),
        likert(
            "psych_2",
            Psychometric,
            "personality",
            "I am detail-oriented when managing technical data and documentation.",
            agreement(),
        ),
        likert(
            "psych_3",
            Psychometric,
            "motivation",
            "I am motivated to pursue a career that helps protect the environment.",
            agreement(),
        ),
        likert(
            "psych_4",
            Psychometric,
            "grit",
            "Challenges in learning new technology make me try harder rather than give up.",
            agreement(),
        ),
        likert(
            "psych_5",
            Psychometric,
            "analytical",
            "I prefer structured data analysis tasks over creative, open-ended projects.",
            agreement(),
        ),
        choice(
            "psych_6",
            Psychometric,
            "work_preference",
            "Which work environment appeals to you most?",
            &[
                "Field work collecting sensor data outdoors",
                "Office work analyzing data on computers",
                "Laboratory work calibrating equipment",
                "Mix of field work and data analysis",
            ],
        ),
        choice(
            "tech_1",
            Technical,
            "sensors",
            "Which sensor type would be most appropriate for measuring air quality in an urban environment?",
            &[
                "Temperature and humidity sensor",
                "Particulate matter (PM2.5) and gas sensors",
                "Pressure and altitude sensors",
                "Light and UV sensors",
            ],
        ),
        choice(
            "tech_2",
            Technical,
            "iot_protocols",
            "Which communication protocol is most suitable for low-power, long-range IoT environmental sensors?",
            &["WiFi", "Bluetooth", "LoRaWAN", "Ethernet"],
        ),
        Question {
            id: "tech_3".into(),
            section: Technical,
            category: "problem_solving".into(),
            text: "You notice that temperature readings from outdoor sensors are consistently 5°C \
                   higher than expected. What would be your first troubleshooting step?"
                .into(),
            kind: QuestionKind::Scenario {
                context: "You are managing a network of environmental sensors deployed across a city park."
                    .into(),
                question: "What is the most likely cause and solution?".into(),
                options: vec![
                    "Check if sensors are in direct sunlight and add shading".into(),
                    "Recalibrate all sensors immediately".into(),
                    "Replace the sensors with new ones".into(),
                    "Adjust the software to subtract 5°C from readings".into(),
                ],
            },
        },
        choice(
            "tech_4",
            Technical,
            "data_analysis",
            "What is the best approach to handle missing data points from environmental sensors?",
            &[
                "Delete all records with missing data",
                "Replace missing values with zeros",
                "Use interpolation based on nearby sensors and time patterns",
                "Ignore missing data and continue analysis",
            ],
        ),
        choice(
            "tech_5",
            Technical,
            "programming",
            "Which programming language is most commonly used for IoT data analysis and visualization?",
            &["Java", "Python", "C++", "PHP"],
        ),
        self_rating(
            "wiscar_1",
            "will",
            "Rate your consistency in pursuing long-term technical and environmental goals.",
            "Very Inconsistent",
            "Very Consistent",
        ),
        self_rating(
            "wiscar_2",
            "interest",
            "Rate your genuine interest in environmental technology and IoT concepts.",
            "Low Interest",
            "High Interest",
        ),
        self_rating(
            "wiscar_3",
            "skill",
            "Rate your current technical skills in programming, data analysis, or electronics.",
            "Beginner",
            "Expert",
        ),
        self_rating(
            "wiscar_4",
            "cognitive",
            "Rate your ability to solve complex analytical problems and think systematically.",
            "Struggles",
            "Excels",
        ),
        self_rating(
            "wiscar_5",
            "ability",
            "Rate your ability to learn new technical concepts and adapt to feedback.",
            "Slow Learner",
            "Fast Learner",
        ),
        likert(
            "wiscar_6",
            Wiscar,
            "realWorld",
            "I understand what Environmental IoT Analysts do day-to-day and am excited about this type of work.",
            agreement(),
        ),
    ]
}

pub fn scoring_rules() -> ScoringRules {
    let answer_key: BTreeMap<String, String> = [
        ("tech_1", "Particulate matter (PM2.5) and gas sensors"),
        ("tech_2", "LoRaWAN"),
        ("tech_3", "Check if sensors are in direct sunlight and add shading"),
        ("tech_4", "Use interpolation based on nearby sensors and time patterns"),
        ("tech_5", "Python"),
    ]
    .into_iter()
    .map(|(id, answer)| (id.to_string(), answer.to_string()))
    .collect();

    ScoringRules {
        psychometric_max: 5,
        answer_key,
        dimensions: vec![
            DimensionRule::new(Dimension::Will, "wiscar_1", 10, 5),
            DimensionRule::new(Dimension::Interest, "wiscar_2", 10, 5),
            DimensionRule::new(Dimension::Skill, "wiscar_3", 10, 5),
            DimensionRule::new(Dimension::Cognitive, "wiscar_4", 10, 5),
            DimensionRule::new(Dimension::Ability, "wiscar_5", 10, 5),
            DimensionRule::new(Dimension::RealWorld, "wiscar_6", 20, 3),
        ],
    }
}

pub fn catalog() -> Catalog {
    Catalog {
        id: CATALOG_ID.into(),
        name: "Environmental IoT Analyst".into(),
        description: "Career-fit assessment for environmental IoT and sensor-data analysis roles"
            .into(),
        questions: questions(),
        rules: scoring_rules(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::validate_catalog;

    #[test]
    fn builtin_catalog_shape() {
        let catalog = catalog();
        assert_eq!(catalog.questions.len(), 17);
        assert_eq!(catalog.questions_for(Section::Psychometric).len(), 6);
        assert_eq!(catalog.questions_for(Section::Technical).len(), 5);
        assert_eq!(catalog.questions_for(Section::Wiscar).len(), 6);
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let warnings = validate_catalog(&catalog());
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn every_key_answer_is_an_offered_option() {
        let catalog = catalog();
        for (id, answer) in &catalog.rules.answer_key {
            let question = catalog.get(id).unwrap();
            assert!(question.kind.options().unwrap().contains(answer), "{id}");
        }
    }
}
