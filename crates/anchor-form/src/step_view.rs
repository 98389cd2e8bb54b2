use crate::notify::Notifier;
use crate::request::{CompositeRequest, SectionPatch};
use crate::spec::Step;
use crate::validate::{FieldErrors, validate_step};

/// Shown whenever a step refuses to advance.
pub const CORRECT_FIELDS_MESSAGE: &str = "Please fill in all required fields correctly";

/// Local state of the active step: which step it is and the errors from its
/// last failed advance attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    step: Step,
    errors: FieldErrors,
}

impl StepView {
    pub fn new(step: Step) -> Self {
        Self {
            step,
            errors: FieldErrors::new(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn can_go_back(&self) -> bool {
        !self.step.is_first()
    }

    /// The last step submits instead of advancing.
    pub fn can_go_forward(&self) -> bool {
        !self.step.is_last()
    }

    /// Clears the errors of the fields written by `patch`. The rest of the
    /// section is not re-validated.
    pub fn on_change(&mut self, patch: &SectionPatch) {
        if patch.step() != self.step {
            return;
        }
        for field in patch.touched_fields() {
            self.errors.remove(field);
        }
    }

    /// Validates the owned section. On failure the errors are kept for display
    /// and an error notification is emitted.
    pub fn request_next<N: Notifier>(
        &mut self,
        request: &CompositeRequest,
        notifier: &N,
    ) -> Result<(), FieldErrors> {
        let errors = validate_step(self.step, request);
        self.errors = errors.clone();
        if errors.is_empty() {
            Ok(())
        } else {
            notifier.error(CORRECT_FIELDS_MESSAGE);
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::request::{FieldValue, reduce};

    #[test]
    fn change_clears_only_touched_fields() {
        let notifier = RecordingNotifier::new();
        let mut view = StepView::new(Step::ClientInfo);
        let request = CompositeRequest::default();
        assert!(view.request_next(&request, &notifier).is_err());
        assert_eq!(view.errors().len(), 4);

        let patch =
            SectionPatch::field(Step::ClientInfo, "email", FieldValue::from("not-an-email"))
                .unwrap();
        let request = reduce(&request, patch.clone());
        view.on_change(&patch);

        assert!(view.error("email").is_none());
        assert!(view.error("phone").is_some());
        assert!(view.error("companyName").is_some());

        assert!(view.request_next(&request, &notifier).is_err());
        assert_eq!(
            view.error("email"),
            Some("Please enter a valid email address")
        );
        assert_eq!(notifier.errors().len(), 2);
    }

    #[test]
    fn patches_for_other_sections_are_ignored() {
        let notifier = RecordingNotifier::new();
        let mut view = StepView::new(Step::EventInfo);
        assert!(
            view.request_next(&CompositeRequest::default(), &notifier)
                .is_err()
        );
        let before = view.errors().clone();
        let patch = SectionPatch::field(Step::ClientInfo, "email", "x".into()).unwrap();
        view.on_change(&patch);
        assert_eq!(view.errors(), &before);
    }

    #[test]
    fn edge_steps_expose_one_direction() {
        assert!(!StepView::new(Step::FIRST).can_go_back());
        assert!(StepView::new(Step::FIRST).can_go_forward());
        assert!(StepView::new(Step::LAST).can_go_back());
        assert!(!StepView::new(Step::LAST).can_go_forward());
    }
}
