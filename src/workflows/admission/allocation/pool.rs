use std::collections::BTreeSet;

use super::super::domain::{ApplicantId, ApplicantRecord, PriorityLevel};

/// Applicants still waiting for a place. Admission removes an applicant for the rest of the run.
pub(crate) struct AdmissionPool<'a> {
    applicants: &'a [ApplicantRecord],
    admitted: BTreeSet<ApplicantId>,
}

impl<'a> AdmissionPool<'a> {
    pub(crate) fn new(applicants: &'a [ApplicantRecord]) -> Self {
        Self {
            applicants,
            admitted: BTreeSet::new(),
        }
    }

    /// Unplaced applicants who named `department` at `level`, in input order.
    pub(crate) fn candidates<'p>(
        &'p self,
        level: PriorityLevel,
        department: &'p str,
    ) -> impl Iterator<Item = (ApplicantId, &'a ApplicantRecord)> + 'p {
        self.applicants
            .iter()
            .enumerate()
            .map(|(index, record)| (ApplicantId(index), record))
            .filter(move |(id, record)| {
                !self.admitted.contains(id) && record.priority(level) == Some(department)
            })
    }

    pub(crate) fn admit(&mut self, id: ApplicantId) {
        let inserted = self.admitted.insert(id);
        debug_assert!(inserted, "applicant {id} admitted twice");
    }

    pub(crate) fn remaining(&self) -> usize {
        self.applicants.len() - self.admitted.len()
    }
}
