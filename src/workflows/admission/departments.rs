use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use super::domain::{ScoreField, UnknownScoreField};

/// Invalid department configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("department configuration lists no departments")]
    NoDepartments,
    #[error("department name must not be blank")]
    BlankDepartmentName,
    #[error("department name '{department}' has leading or trailing whitespace")]
    PaddedDepartmentName { department: String },
    #[error("department '{department}' declares no score fields")]
    EmptyScoreFields { department: String },
    #[error("department '{department}' references an {source}")]
    UnknownScoreField {
        department: String,
        source: UnknownScoreField,
    },
    #[error("failed to read department configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid department configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validated mapping from department name to the score fields averaged for it.
///
/// Iteration is in sorted-name order, which is also the order departments claim
/// applicants within a priority pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DepartmentCatalog {
    departments: BTreeMap<String, Vec<ScoreField>>,
}

impl DepartmentCatalog {
    pub fn new(departments: BTreeMap<String, Vec<ScoreField>>) -> Result<Self, ConfigurationError> {
        if departments.is_empty() {
            return Err(ConfigurationError::NoDepartments);
        }

        for (name, fields) in &departments {
            if name.trim().is_empty() {
                return Err(ConfigurationError::BlankDepartmentName);
            }
            // Applicant priorities are trimmed, so a padded name could never match.
            if name.trim() != name {
                return Err(ConfigurationError::PaddedDepartmentName {
                    department: name.clone(),
                });
            }
            if fields.is_empty() {
                return Err(ConfigurationError::EmptyScoreFields {
                    department: name.clone(),
                });
            }
        }

        Ok(Self { departments })
    }

    /// The five departments of the reference admission round.
    pub fn reference() -> Self {
        let departments = BTreeMap::from([
            ("Biotech".to_string(), vec![ScoreField::Chemistry, ScoreField::Physics]),
            ("Chemistry".to_string(), vec![ScoreField::Chemistry]),
            (
                "Engineering".to_string(),
                vec![ScoreField::ComputerScience, ScoreField::Math],
            ),
            ("Mathematics".to_string(), vec![ScoreField::Math]),
            ("Physics".to_string(), vec![ScoreField::Physics, ScoreField::Math]),
        ]);

        Self { departments }
    }

    /// Builds a catalog from free-form field names, rejecting anything that is not a score column.
    pub fn from_named_fields<I, N, F>(entries: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (N, Vec<F>)>,
        N: Into<String>,
        F: AsRef<str>,
    {
        let mut departments = BTreeMap::new();

        for (name, raw_fields) in entries {
            let name = name.into();
            let fields = raw_fields
                .iter()
                .map(|raw| raw.as_ref().parse::<ScoreField>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| ConfigurationError::UnknownScoreField {
                    department: name.clone(),
                    source,
                })?;
            departments.insert(name, fields);
        }

        Self::new(departments)
    }

    /// Reads a JSON object such as `{"Mathematics": ["math"]}`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigurationError> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_reader(reader)?;
        Self::from_named_fields(raw)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.departments.keys().map(String::as_str)
    }

    pub fn fields(&self, department: &str) -> Option<&[ScoreField]> {
        self.departments.get(department).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ScoreField])> {
        self.departments
            .iter()
            .map(|(name, fields)| (name.as_str(), fields.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reference_catalog_iterates_alphabetically() {
        let catalog = DepartmentCatalog::reference();
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(
            names,
            vec!["Biotech", "Chemistry", "Engineering", "Mathematics", "Physics"]
        );
        assert_eq!(
            catalog.fields("Physics"),
            Some(&[ScoreField::Physics, ScoreField::Math][..])
        );
    }

    #[test]
    fn loads_catalog_from_json() {
        let json = r#"{"Astronomy": ["physics", "math"], "Informatics": ["score_compscience"]}"#;
        let catalog = DepartmentCatalog::from_reader(Cursor::new(json)).expect("catalog loads");

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.fields("Informatics"),
            Some(&[ScoreField::ComputerScience][..])
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let json = r#"{"Biology": ["biology"]}"#;
        let err = DepartmentCatalog::from_reader(Cursor::new(json)).expect_err("unknown field");

        match err {
            ConfigurationError::UnknownScoreField { department, source } => {
                assert_eq!(department, "Biology");
                assert_eq!(source.0, "biology");
            }
            other => panic!("expected unknown field error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_configuration_and_empty_field_lists() {
        assert!(matches!(
            DepartmentCatalog::new(BTreeMap::new()),
            Err(ConfigurationError::NoDepartments)
        ));

        let empty_fields = BTreeMap::from([("Physics".to_string(), Vec::new())]);
        assert!(matches!(
            DepartmentCatalog::new(empty_fields),
            Err(ConfigurationError::EmptyScoreFields { department }) if department == "Physics"
        ));

        let blank = BTreeMap::from([(" ".to_string(), vec![ScoreField::Math])]);
        assert!(matches!(
            DepartmentCatalog::new(blank),
            Err(ConfigurationError::BlankDepartmentName)
        ));
    }

    #[test]
    fn rejects_department_names_with_surrounding_whitespace() {
        let json = r#"{" Physics": ["physics"], "Mathematics": ["math"]}"#;
        let err = DepartmentCatalog::from_reader(Cursor::new(json)).expect_err("padded name");

        match err {
            ConfigurationError::PaddedDepartmentName { department } => {
                assert_eq!(department, " Physics");
            }
            other => panic!("expected padded name error, got {other:?}"),
        }

        let trailing = BTreeMap::from([("Biotech\t".to_string(), vec![ScoreField::Chemistry])]);
        assert!(matches!(
            DepartmentCatalog::new(trailing),
            Err(ConfigurationError::PaddedDepartmentName { .. })
        ));
    }
}
