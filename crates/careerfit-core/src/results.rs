//! Result types produced by [`score`](crate::scoring::score).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Score and canned commentary for one question section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionScore {
    /// Percentage, nominally 0–100.
    pub score: i64,
    pub interpretation: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// The six WISCAR readiness dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Will,
    Interest,
    Skill,
    Cognitive,
    Ability,
    RealWorld,
}

impl Dimension {
    /// Reporting order.
    pub const ALL: [Dimension; 6] = [
        Dimension::Will,
        Dimension::Interest,
        Dimension::Skill,
        Dimension::Cognitive,
        Dimension::Ability,
        Dimension::RealWorld,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Will => "Will",
            Dimension::Interest => "Interest",
            Dimension::Skill => "Skill",
            Dimension::Cognitive => "Cognitive Readiness",
            Dimension::Ability => "Learning Ability",
            Dimension::RealWorld => "Real-World Alignment",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Dimension::Will => "Persistence and commitment to goals",
            Dimension::Interest => "Genuine passion for the field",
            Dimension::Skill => "Current technical capabilities",
            Dimension::Cognitive => "Analytical and problem-solving abilities",
            Dimension::Ability => "Capacity to acquire new skills",
            Dimension::RealWorld => "Understanding of career demands",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Will => write!(f, "will"),
            Dimension::Interest => write!(f, "interest"),
            Dimension::Skill => write!(f, "skill"),
            Dimension::Cognitive => write!(f, "cognitive"),
            Dimension::Ability => write!(f, "ability"),
            Dimension::RealWorld => write!(f, "realWorld"),
        }
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', '-'], "").as_str() {
            "will" => Ok(Dimension::Will),
            "interest" => Ok(Dimension::Interest),
            "skill" => Ok(Dimension::Skill),
            "cognitive" => Ok(Dimension::Cognitive),
            "ability" => Ok(Dimension::Ability),
            "realworld" => Ok(Dimension::RealWorld),
            other => Err(format!("unknown WISCAR dimension: {other}")),
        }
    }
}

/// One scored WISCAR dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiscarDimension {
    pub dimension: Dimension,
    pub score: i64,
    pub label: String,
    pub description: String,
}

/// The three-way verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Yes,
    Maybe,
    No,
}

impl Recommendation {
    /// Confidence at or above which the verdict is `Yes`.
    pub const YES_THRESHOLD: i64 = 80;
    /// Confidence at or above which the verdict is at least `Maybe`.
    pub const MAYBE_THRESHOLD: i64 = 60;

    pub fn from_confidence(confidence: i64) -> Self {
        if confidence >= Self::YES_THRESHOLD {
            Recommendation::Yes
        } else if confidence >= Self::MAYBE_THRESHOLD {
            Recommendation::Maybe
        } else {
            Recommendation::No
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Recommendation::Yes => "Yes, Go For It!",
            Recommendation::Maybe => "Maybe - With Preparation",
            Recommendation::No => "Consider Alternatives",
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Recommendation::Yes => {
                "Excellent fit! You show strong motivation, good technical aptitude, \
                 and high readiness across all dimensions."
            }
            Recommendation::Maybe => {
                "Good potential with some development. Focus on building technical \
                 skills and gaining more exposure to the field."
            }
            Recommendation::No => {
                "Consider exploring foundational courses first or alternative \
                 environmental careers that match your current strengths."
            }
        }
    }

    pub fn next_steps(&self) -> &'static [&'static str] {
        match self {
            Recommendation::Yes => &[
                "Enroll in IoT fundamentals course",
                "Start with Arduino/Raspberry Pi projects",
                "Learn Python programming basics",
                "Study environmental science concepts",
            ],
            Recommendation::Maybe => &[
                "Take introductory programming course",
                "Explore environmental science basics",
                "Try simple IoT tutorials online",
                "Join environmental tech communities",
            ],
            Recommendation::No => &[
                "Consider environmental science technician roles",
                "Explore data entry positions in environmental orgs",
                "Build foundational technical skills first",
            ],
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Yes => write!(f, "yes"),
            Recommendation::Maybe => write!(f, "maybe"),
            Recommendation::No => write!(f, "no"),
        }
    }
}

/// Career paths suggested regardless of the verdict.
pub const CAREER_PATHS: &[&str] = &[
    "Environmental IoT Analyst",
    "IoT Data Scientist (Environmental)",
    "Environmental Monitoring Specialist",
    "Smart City IoT Engineer",
    "Climate Data Analyst",
    "Sustainability Technology Consultant",
];

/// Learning path suggested regardless of the verdict.
pub const LEARNING_PATH: &[&str] = &[
    "IoT & Environmental Science Basics",
    "Programming Fundamentals (Python)",
    "Sensor Networks & Data Collection",
    "Data Analysis & Visualization",
    "Real-world Project Implementation",
];

/// Everything the scoring engine derives from an answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResults {
    pub psychometric_fit: SectionScore,
    pub technical_readiness: SectionScore,
    /// Always six entries, in [`Dimension::ALL`] order.
    pub wiscar_dimensions: Vec<WiscarDimension>,
    pub overall_confidence: i64,
    pub recommendation: Recommendation,
    pub recommendation_reason: String,
    pub next_steps: Vec<String>,
    pub career_paths: Vec<String>,
    pub learning_path: Vec<String>,
}

/// Mean of WISCAR dimension scores, unrounded. 0 when there are none.
pub fn wiscar_mean(dimensions: &[WiscarDimension]) -> f64 {
    if dimensions.is_empty() {
        return 0.0;
    }
    dimensions.iter().map(|d| d.score as f64).sum::<f64>() / dimensions.len() as f64
}

impl AssessmentResults {
    /// Mean of the six dimension scores, unrounded.
    pub fn wiscar_average(&self) -> f64 {
        wiscar_mean(&self.wiscar_dimensions)
    }
}
