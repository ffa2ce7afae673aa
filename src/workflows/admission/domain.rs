use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Position of an applicant in the original input list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub usize);

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Raw exam result a department may draw on when computing its subject mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreField {
    Physics,
    Chemistry,
    Math,
    #[serde(rename = "compscience")]
    ComputerScience,
}

impl ScoreField {
    pub const fn ordered() -> [ScoreField; 4] {
        [
            ScoreField::Physics,
            ScoreField::Chemistry,
            ScoreField::Math,
            ScoreField::ComputerScience,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoreField::Physics => "physics",
            ScoreField::Chemistry => "chemistry",
            ScoreField::Math => "math",
            ScoreField::ComputerScience => "compscience",
        }
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a configured field name does not match any applicant score column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown score field '{0}'")]
pub struct UnknownScoreField(pub String);

impl FromStr for ScoreField {
    type Err = UnknownScoreField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.trim().to_ascii_lowercase();
        let name = lowered.strip_prefix("score_").unwrap_or(&lowered);
        ScoreField::ordered()
            .into_iter()
            .find(|field| field.label() == name)
            .ok_or_else(|| UnknownScoreField(value.to_string()))
    }
}

/// The three preference slots, evaluated in this order during allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    First,
    Second,
    Third,
}

impl PriorityLevel {
    pub const fn ordered() -> [PriorityLevel; 3] {
        [
            PriorityLevel::First,
            PriorityLevel::Second,
            PriorityLevel::Third,
        ]
    }

    pub const fn index(self) -> usize {
        match self {
            PriorityLevel::First => 0,
            PriorityLevel::Second => 1,
            PriorityLevel::Third => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PriorityLevel::First => "priority 1",
            PriorityLevel::Second => "priority 2",
            PriorityLevel::Third => "priority 3",
        }
    }
}

/// Raw subject results as submitted by an applicant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubjectScores {
    pub physics: f64,
    pub chemistry: f64,
    pub math: f64,
    pub compscience: f64,
}

impl SubjectScores {
    pub fn get(&self, field: ScoreField) -> f64 {
        match field {
            ScoreField::Physics => self.physics,
            ScoreField::Chemistry => self.chemistry,
            ScoreField::Math => self.math,
            ScoreField::ComputerScience => self.compscience,
        }
    }
}

/// Immutable applicant entry. Identity comes from its position in the input list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub first_name: String,
    pub last_name: String,
    pub scores: SubjectScores,
    pub special_score: f64,
    pub priorities: [Option<String>; 3],
}

impl ApplicantRecord {
    /// Department named at the given level, with blank entries treated as unset.
    pub fn priority(&self, level: PriorityLevel) -> Option<&str> {
        self.priorities[level.index()]
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One admitted applicant as it appears in a department's ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmittedApplicant {
    pub applicant_id: ApplicantId,
    pub first_name: String,
    pub last_name: String,
    pub score: f64,
    pub admitted_at: PriorityLevel,
}

impl AdmittedApplicant {
    pub fn display_score(&self) -> String {
        format_score(self.score)
    }
}

/// Renders a score with at least one decimal place (`95.0`, `87.25`).
pub fn format_score(score: f64) -> String {
    let rendered = score.to_string();
    if rendered.contains('.') || !score.is_finite() {
        rendered
    } else {
        format!("{rendered}.0")
    }
}
