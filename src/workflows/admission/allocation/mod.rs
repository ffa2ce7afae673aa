mod pool;
mod scoring;

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::departments::{ConfigurationError, DepartmentCatalog};
use super::domain::{AdmittedApplicant, ApplicantId, ApplicantRecord, PriorityLevel, ScoreField};
use super::ranking::Ranking;
use pool::AdmissionPool;
use scoring::{final_score, ranking_order};

/// Rejected allocation input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("capacity must be a positive integer, got {capacity}")]
    InvalidCapacity { capacity: usize },
    #[error("applicant {applicant} is malformed: {reason}")]
    MalformedApplicant {
        applicant: ApplicantId,
        reason: String,
    },
}

/// Failure of a whole allocation run. No department list is produced.
#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Places applicants into departments by priority pass, department order, and final score.
#[derive(Debug, Clone)]
pub struct AdmissionEngine {
    catalog: DepartmentCatalog,
}

impl AdmissionEngine {
    pub fn new(catalog: DepartmentCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &DepartmentCatalog {
        &self.catalog
    }

    /// Runs every priority pass over a fresh pool. `capacity` applies to each department.
    pub fn allocate(
        &self,
        capacity: usize,
        applicants: &[ApplicantRecord],
    ) -> Result<Ranking, InputError> {
        if capacity == 0 {
            return Err(InputError::InvalidCapacity { capacity });
        }
        validate_applicants(applicants)?;

        let mut pool = AdmissionPool::new(applicants);
        let mut admitted: BTreeMap<String, Vec<AdmittedApplicant>> = self
            .catalog
            .names()
            .map(|name| (name.to_string(), Vec::new()))
            .collect();

        for level in PriorityLevel::ordered() {
            for (department, fields) in self.catalog.iter() {
                let Some(accepted) = admitted.get_mut(department) else {
                    continue;
                };
                let open_places = capacity.saturating_sub(accepted.len());
                if open_places == 0 {
                    debug!(department, priority = level.label(), "department full, skipping");
                    continue;
                }

                let selected = select_candidates(&pool, level, department, fields, open_places);
                debug!(
                    department,
                    priority = level.label(),
                    admitted = selected.len(),
                    open_places,
                    "priority pass evaluated"
                );

                for entry in &selected {
                    pool.admit(entry.applicant_id);
                }
                accepted.extend(selected);
            }
        }

        for accepted in admitted.values_mut() {
            accepted.sort_by(ranking_order);
        }

        let ranking = Ranking::from_departments(admitted);
        info!(
            capacity,
            applicants = applicants.len(),
            admitted = ranking.total_admitted(),
            unplaced = pool.remaining(),
            "allocation complete"
        );

        Ok(ranking)
    }
}

/// Validates `departments` and allocates in one step.
pub fn allocate(
    capacity: usize,
    applicants: &[ApplicantRecord],
    departments: &BTreeMap<String, Vec<ScoreField>>,
) -> Result<Ranking, AllocationError> {
    let catalog = DepartmentCatalog::new(departments.clone())?;
    let ranking = AdmissionEngine::new(catalog).allocate(capacity, applicants)?;
    Ok(ranking)
}

fn select_candidates(
    pool: &AdmissionPool<'_>,
    level: PriorityLevel,
    department: &str,
    fields: &[ScoreField],
    open_places: usize,
) -> Vec<AdmittedApplicant> {
    let mut candidates: Vec<AdmittedApplicant> = pool
        .candidates(level, department)
        .map(|(applicant_id, record)| AdmittedApplicant {
            applicant_id,
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            score: final_score(record, fields),
            admitted_at: level,
        })
        .collect();

    candidates.sort_by(ranking_order);
    candidates.truncate(open_places);
    candidates
}

fn validate_applicants(applicants: &[ApplicantRecord]) -> Result<(), InputError> {
    for (index, record) in applicants.iter().enumerate() {
        let malformed = |reason: String| InputError::MalformedApplicant {
            applicant: ApplicantId(index),
            reason,
        };

        if record.first_name.trim().is_empty() {
            return Err(malformed("first name is blank".to_string()));
        }
        if record.last_name.trim().is_empty() {
            return Err(malformed("last name is blank".to_string()));
        }

        for field in ScoreField::ordered() {
            if !record.scores.get(field).is_finite() {
                return Err(malformed(format!("{field} score is not a finite number")));
            }
        }
        if !record.special_score.is_finite() {
            return Err(malformed("special score is not a finite number".to_string()));
        }
    }

    Ok(())
}
