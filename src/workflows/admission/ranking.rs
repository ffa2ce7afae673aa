use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::AdmittedApplicant;

/// Admitted applicants per department, keyed and iterated in department-name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking {
    departments: BTreeMap<String, Vec<AdmittedApplicant>>,
}

impl Ranking {
    pub(crate) fn from_departments(departments: BTreeMap<String, Vec<AdmittedApplicant>>) -> Self {
        Self { departments }
    }

    pub fn department(&self, name: &str) -> Option<&[AdmittedApplicant]> {
        self.departments.get(name).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[AdmittedApplicant])> {
        self.departments
            .iter()
            .map(|(name, admitted)| (name.as_str(), admitted.as_slice()))
    }

    pub fn total_admitted(&self) -> usize {
        self.departments.values().map(Vec::len).sum()
    }

    /// `first last score` lines for one department, ready for display or persistence.
    pub fn lines(&self, department: &str) -> Vec<String> {
        self.department(department)
            .unwrap_or_default()
            .iter()
            .map(|entry| {
                format!(
                    "{} {} {}",
                    entry.first_name,
                    entry.last_name,
                    entry.display_score()
                )
            })
            .collect()
    }
}
