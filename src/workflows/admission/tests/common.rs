use std::collections::HashSet;

use crate::workflows::admission::domain::{
    AdmittedApplicant, ApplicantId, ApplicantRecord, SubjectScores,
};
use crate::workflows::admission::{AdmissionEngine, DepartmentCatalog, Ranking};

pub(super) fn engine() -> AdmissionEngine {
    AdmissionEngine::new(DepartmentCatalog::reference())
}

/// Applicant with uniform subject scores; tweak fields on the returned record as needed.
pub(super) fn applicant(
    first: &str,
    last: &str,
    subjects: f64,
    special: f64,
    priorities: [Option<&str>; 3],
) -> ApplicantRecord {
    ApplicantRecord {
        first_name: first.to_string(),
        last_name: last.to_string(),
        scores: SubjectScores {
            physics: subjects,
            chemistry: subjects,
            math: subjects,
            compscience: subjects,
        },
        special_score: special,
        priorities: priorities.map(|choice| choice.map(str::to_string)),
    }
}

pub(super) fn names(admitted: &[AdmittedApplicant]) -> Vec<String> {
    admitted
        .iter()
        .map(|entry| format!("{} {}", entry.first_name, entry.last_name))
        .collect()
}

pub(super) fn department_names(ranking: &Ranking, department: &str) -> Vec<String> {
    names(ranking.department(department).expect("department present"))
}

/// Checks capacity, uniqueness, and ordering across every department list.
pub(super) fn assert_ranking_invariants(ranking: &Ranking, capacity: usize) {
    let mut seen: HashSet<ApplicantId> = HashSet::new();

    for (department, admitted) in ranking.iter() {
        assert!(
            admitted.len() <= capacity,
            "{department} admitted {} over capacity {capacity}",
            admitted.len()
        );

        for entry in admitted {
            assert!(
                seen.insert(entry.applicant_id),
                "applicant {} admitted twice",
                entry.applicant_id
            );
        }

        for pair in admitted.windows(2) {
            let (left, right) = (&pair[0], &pair[1]);
            let ordered = left.score > right.score
                || (left.score == right.score
                    && (left.first_name.as_str(), left.last_name.as_str())
                        <= (right.first_name.as_str(), right.last_name.as_str()));
            assert!(ordered, "{department} list out of order: {left:?} before {right:?}");
        }
    }
}
