use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::debug;

use super::domain::{ApplicantRecord, SubjectScores};

const REQUIRED_COLUMNS: usize = 7;
const ALL_COLUMNS: usize = 10;

const COLUMN_NAMES: [&str; ALL_COLUMNS] = [
    "first_name",
    "last_name",
    "physics",
    "chemistry",
    "math",
    "compscience",
    "special",
    "priority_1",
    "priority_2",
    "priority_3",
];

/// Failure while reading the applicant list.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("failed to read applicants: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid applicant data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: missing required column '{column}'")]
    MissingColumn { line: u64, column: &'static str },
    #[error("line {line}: expected at most 10 columns, found {found}")]
    UnexpectedColumns { line: u64, found: usize },
    #[error("line {line}: {source}")]
    Row { line: u64, source: csv::Error },
    #[error("line {line}: '{column}' must be a finite number")]
    NonFiniteScore { line: u64, column: &'static str },
}

#[derive(Debug, Deserialize)]
struct ApplicantRow {
    first_name: String,
    last_name: String,
    physics: f64,
    chemistry: f64,
    math: f64,
    compscience: f64,
    special: f64,
    #[serde(deserialize_with = "empty_string_as_none")]
    priority_1: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    priority_2: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    priority_3: Option<String>,
}

impl ApplicantRow {
    fn into_record(self, line: u64) -> Result<ApplicantRecord, IntakeError> {
        let numeric = [
            ("physics", self.physics),
            ("chemistry", self.chemistry),
            ("math", self.math),
            ("compscience", self.compscience),
            ("special", self.special),
        ];
        if let Some((column, _)) = numeric.into_iter().find(|(_, value)| !value.is_finite()) {
            return Err(IntakeError::NonFiniteScore { line, column });
        }

        Ok(ApplicantRecord {
            first_name: self.first_name,
            last_name: self.last_name,
            scores: SubjectScores {
                physics: self.physics,
                chemistry: self.chemistry,
                math: self.math,
                compscience: self.compscience,
            },
            special_score: self.special,
            priorities: [self.priority_1, self.priority_2, self.priority_3],
        })
    }
}

/// Parses space-delimited applicant rows without a header.
///
/// Columns: first name, last name, physics, chemistry, math, compscience, special,
/// then up to three department priorities. Missing priority columns are unset.
pub fn read_applicants<R: Read>(reader: R) -> Result<Vec<ApplicantRecord>, IntakeError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut applicants = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();

        let mut fields: Vec<&str> = record.iter().collect();
        while fields.last().is_some_and(|field| field.is_empty()) {
            fields.pop();
        }

        if fields.is_empty() {
            continue;
        }
        if fields.len() < REQUIRED_COLUMNS {
            return Err(IntakeError::MissingColumn {
                line,
                column: COLUMN_NAMES[fields.len()],
            });
        }
        if fields.len() > ALL_COLUMNS {
            return Err(IntakeError::UnexpectedColumns {
                line,
                found: fields.len(),
            });
        }
        fields.resize(ALL_COLUMNS, "");

        let row: ApplicantRow = csv::StringRecord::from(fields)
            .deserialize(None)
            .map_err(|source| IntakeError::Row { line, source })?;
        applicants.push(row.into_record(line)?);
    }

    debug!(applicants = applicants.len(), "applicant intake complete");
    Ok(applicants)
}

pub fn read_applicants_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<ApplicantRecord>, IntakeError> {
    let file = std::fs::File::open(path)?;
    read_applicants(file)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
