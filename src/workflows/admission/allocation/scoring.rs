use std::cmp::Ordering;

use super::super::domain::{AdmittedApplicant, ApplicantRecord, ScoreField};

/// Score an applicant competes with for one department.
///
/// The mean covers exactly the department's fields; the special exam replaces it when higher.
pub(crate) fn final_score(applicant: &ApplicantRecord, fields: &[ScoreField]) -> f64 {
    let total: f64 = fields
        .iter()
        .map(|field| applicant.scores.get(*field))
        .sum();
    let subject_mean = total / fields.len() as f64;

    // `+ 0.0` folds -0.0 into 0.0 so equal scores tie under `total_cmp`.
    subject_mean.max(applicant.special_score) + 0.0
}

/// Score descending, then first name, then last name.
pub(crate) fn ranking_order(left: &AdmittedApplicant, right: &AdmittedApplicant) -> Ordering {
    right
        .score
        .total_cmp(&left.score)
        .then_with(|| left.first_name.cmp(&right.first_name))
        .then_with(|| left.last_name.cmp(&right.last_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::admission::domain::{ApplicantId, PriorityLevel, SubjectScores};

    fn applicant(special: f64) -> ApplicantRecord {
        ApplicantRecord {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            scores: SubjectScores {
                physics: 70.0,
                chemistry: 60.0,
                math: 91.0,
                compscience: 88.0,
            },
            special_score: special,
            priorities: [None, None, None],
        }
    }

    fn admitted(first: &str, last: &str, score: f64) -> AdmittedApplicant {
        AdmittedApplicant {
            applicant_id: ApplicantId(0),
            first_name: first.to_string(),
            last_name: last.to_string(),
            score,
            admitted_at: PriorityLevel::First,
        }
    }

    #[test]
    fn averages_only_the_declared_fields() {
        let record = applicant(0.0);
        assert_eq!(final_score(&record, &[ScoreField::Math]), 91.0);
        assert_eq!(
            final_score(&record, &[ScoreField::ComputerScience, ScoreField::Math]),
            89.5
        );
        assert_eq!(
            final_score(&record, &[ScoreField::Chemistry, ScoreField::Physics]),
            65.0
        );
    }

    #[test]
    fn special_score_wins_when_higher() {
        let record = applicant(95.0);
        assert_eq!(final_score(&record, &[ScoreField::Math]), 95.0);
    }

    #[test]
    fn ties_fall_back_to_names() {
        let mut entries = vec![
            admitted("Zoe", "Adams", 80.0),
            admitted("Anna", "Young", 80.0),
            admitted("Anna", "Brown", 80.0),
            admitted("Mark", "Stone", 92.5),
        ];
        entries.sort_by(ranking_order);

        let names: Vec<String> = entries
            .iter()
            .map(|entry| format!("{} {}", entry.first_name, entry.last_name))
            .collect();
        assert_eq!(
            names,
            vec!["Mark Stone", "Anna Brown", "Anna Young", "Zoe Adams"]
        );
    }

    #[test]
    fn negative_zero_scores_tie_with_zero() {
        let mut signed = applicant(-0.0);
        signed.scores.math = -0.0;
        let mut unsigned = applicant(0.0);
        unsigned.scores.math = 0.0;

        let negative = final_score(&signed, &[ScoreField::Math]);
        let positive = final_score(&unsigned, &[ScoreField::Math]);
        assert!(negative.is_sign_positive());
        assert_eq!(negative.total_cmp(&positive), Ordering::Equal);

        let mut entries = vec![
            admitted("Zed", "Zero", positive),
            admitted("Abe", "Zero", negative),
        ];
        entries.sort_by(ranking_order);

        assert_eq!(entries[0].first_name, "Abe");
        assert_eq!(entries[1].first_name, "Zed");
    }
}
