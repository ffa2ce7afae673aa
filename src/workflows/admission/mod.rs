//! Priority-pass admission of applicants into capacity-limited departments.
//!
//! The allocation engine is pure: it borrows the applicant list and a validated
//! [`DepartmentCatalog`] and returns a [`Ranking`]. Reading applicants, asking for a
//! capacity, and publishing results live in [`intake`], [`capacity`], and [`sink`].

pub mod allocation;
pub mod capacity;
pub mod departments;
pub mod domain;
pub mod intake;
pub mod ranking;
pub mod sink;

#[cfg(test)]
mod tests;

pub use allocation::{allocate, AdmissionEngine, AllocationError, InputError};
pub use capacity::{CapacityInputError, CapacityLimits, CapacityPrompt};
pub use departments::{ConfigurationError, DepartmentCatalog};
pub use domain::{
    format_score, AdmittedApplicant, ApplicantId, ApplicantRecord, PriorityLevel, ScoreField,
    SubjectScores,
};
pub use intake::{read_applicants, read_applicants_from_path, IntakeError};
pub use ranking::Ranking;
pub use sink::{ConsoleSink, DirectorySink, JsonSink, RankingSink, SinkError};
