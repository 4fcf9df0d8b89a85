//! Create/update form state and its submit flow.
//!
//! [`FormState`] is a plain value. Every transition builds a new state and the
//! [`FormController`] swaps it in, so a half-applied edit is never observable.

use std::sync::LazyLock;

use regex::Regex;

use crate::client::EmployeeDirectory;
use crate::types::{Employee, EmployeeFields, Field, Route};

pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email";

pub const FETCH_FAILED: &str = "Failed to fetch employee details. Please try again later.";
pub const CREATE_FAILED: &str = "Failed to add employee. Please try again later.";
pub const UPDATE_FAILED: &str = "Failed to update employee. Please try again later.";

// Unanchored: any `x@y.z` run inside the input is enough. U+FEFF counts as
// whitespace, as it does for browser form validation.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\s\x{FEFF}]+@[^\s\x{FEFF}]+\.[^\s\x{FEFF}]+").expect("email pattern compiles")
});

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        Field::ALL.iter().filter(|f| self.get(**f).is_some()).count()
    }

    /// Errors in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|msg| (field, msg)))
    }

    fn with(&self, field: Field, message: &str) -> Self {
        let mut next = self.clone();
        *next.slot_mut(field) = Some(message.to_string());
        next
    }

    fn without(&self, field: Field) -> Self {
        let mut next = self.clone();
        *next.slot_mut(field) = None;
        next
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
        }
    }
}

/// Empty after trimming whitespace and byte-order marks.
pub fn is_blank(value: &str) -> bool {
    value
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
        .is_empty()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Check all fields, returning one message per offending field.
pub fn validate(fields: &EmployeeFields) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if is_blank(&fields.first_name) {
        errors = errors.with(Field::FirstName, FIRST_NAME_REQUIRED);
    }
    if is_blank(&fields.last_name) {
        errors = errors.with(Field::LastName, LAST_NAME_REQUIRED);
    }
    if is_blank(&fields.email) {
        errors = errors.with(Field::Email, EMAIL_REQUIRED);
    } else if !is_valid_email(&fields.email) {
        errors = errors.with(Field::Email, EMAIL_INVALID);
    }

    errors
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Empty,
    /// Fetching the record for the edit flow.
    Loading,
    Editing,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub fields: EmployeeFields,
    pub errors: FieldErrors,
    /// Form-level transport error banner.
    pub form_error: Option<String>,
    pub phase: FormPhase,
}

impl FormState {
    /// Replace one field and drop that field's error only.
    pub fn edit(&self, field: Field, value: impl Into<String>) -> Self {
        Self {
            fields: self.fields.with(field, value),
            errors: self.errors.without(field),
            form_error: self.form_error.clone(),
            phase: FormPhase::Editing,
        }
    }

    fn validated(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            errors: validate(&self.fields),
            form_error: None,
            phase: FormPhase::Validating,
        }
    }

    fn in_phase(&self, phase: FormPhase) -> Self {
        Self {
            phase,
            ..self.clone()
        }
    }

    fn failed(&self, message: &str) -> Self {
        Self {
            form_error: Some(message.to_string()),
            phase: FormPhase::Failed,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update(i64),
}

impl FormMode {
    pub fn route(self) -> Route {
        match self {
            FormMode::Create => Route::AddEmployee,
            FormMode::Update(id) => Route::UpdateEmployee(id),
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            FormMode::Create => CREATE_FAILED,
            FormMode::Update(_) => UPDATE_FAILED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation blocked the submit; no request was sent.
    Invalid,
    /// The request failed; fields are kept and `form_error` is set.
    Failed,
    /// Saved; the caller should show `next`.
    Saved { employee: Employee, next: Route },
}

pub struct FormController {
    mode: FormMode,
    state: FormState,
}

impl FormController {
    /// Blank form for the add flow.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            state: FormState::default(),
        }
    }

    /// Edit form for `id`, pre-filled from the directory.
    pub async fn load<D>(directory: &D, id: i64) -> Self
    where
        D: EmployeeDirectory + ?Sized,
    {
        let mut controller = Self {
            mode: FormMode::Update(id),
            state: FormState::default().in_phase(FormPhase::Loading),
        };

        controller.state = match directory.get(id).await {
            Ok(employee) => FormState {
                fields: employee.fields(),
                phase: FormPhase::Editing,
                ..FormState::default()
            },
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to fetch employee");
                FormState {
                    form_error: Some(FETCH_FAILED.to_string()),
                    ..FormState::default()
                }
            }
        };

        controller
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        self.state = self.state.edit(field, value);
    }

    pub async fn submit<D>(&mut self, directory: &D) -> SubmitOutcome
    where
        D: EmployeeDirectory + ?Sized,
    {
        self.state = self.state.validated();
        if !self.state.errors.is_empty() {
            self.state = self.state.in_phase(FormPhase::Editing);
            return SubmitOutcome::Invalid;
        }

        self.state = self.state.in_phase(FormPhase::Submitting);
        let fields = &self.state.fields;
        let result = match self.mode {
            FormMode::Create => directory.create(fields).await,
            FormMode::Update(id) => directory.update(id, fields).await,
        };

        match result {
            Ok(employee) => {
                tracing::info!(id = employee.id, mode = ?self.mode, "employee saved");
                self.state = match self.mode {
                    FormMode::Create => FormState::default().in_phase(FormPhase::Succeeded),
                    FormMode::Update(_) => self.state.in_phase(FormPhase::Succeeded),
                };
                SubmitOutcome::Saved {
                    employee,
                    next: Route::Employees,
                }
            }
            Err(e) => {
                tracing::warn!(mode = ?self.mode, error = %e, "failed to save employee");
                self.state = self.state.failed(self.mode.failure_message());
                SubmitOutcome::Failed
            }
        }
    }

    /// Leave the form without saving.
    pub fn cancel(&self) -> Route {
        Route::Employees
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::client::fake::{employee, Call, FakeDirectory, Op};

    fn fields(first: &str, last: &str, email: &str) -> EmployeeFields {
        EmployeeFields {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
        }
    }

    fn filled(controller: &mut FormController, input: &EmployeeFields) {
        for field in Field::ALL {
            controller.edit(field, input.get(field));
        }
    }

    #[test]
    fn test_validate_accepts_complete_input() {
        assert!(validate(&fields("Jane", "Doe", "jane@doe.com")).is_empty());
    }

    #[test]
    fn test_validate_requires_names() {
        let errors = validate(&fields("", "Doe", "a@b.com"));
        assert_eq!(errors.get(Field::FirstName), Some(FIRST_NAME_REQUIRED));
        assert_eq!(errors.len(), 1);

        let errors = validate(&fields("Jane", "   ", "a@b.com"));
        assert_eq!(errors.get(Field::LastName), Some(LAST_NAME_REQUIRED));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_validate_email() {
        let errors = validate(&fields("Jane", "Doe", "bad-email"));
        assert_eq!(errors.get(Field::Email), Some(EMAIL_INVALID));

        let errors = validate(&fields("Jane", "Doe", "  "));
        assert_eq!(errors.get(Field::Email), Some(EMAIL_REQUIRED));

        assert!(!is_valid_email("jane@doe"));
        assert!(!is_valid_email("@."));
        assert!(is_valid_email("j@d.c"));
        assert!(is_valid_email("first.last@mail.example.org"));
    }

    #[test]
    fn test_byte_order_mark_is_blank() {
        let errors = validate(&fields("\u{FEFF}", "Doe", "a@b.com"));
        assert_eq!(errors.get(Field::FirstName), Some(FIRST_NAME_REQUIRED));

        let errors = validate(&fields("Jane", " \u{FEFF}\t", "\u{FEFF}"));
        assert_eq!(errors.get(Field::LastName), Some(LAST_NAME_REQUIRED));
        assert_eq!(errors.get(Field::Email), Some(EMAIL_REQUIRED));

        assert!(!is_valid_email("\u{FEFF}@b.com"));
        assert!(is_valid_email("a@b.com\u{FEFF}"));
    }

    fn text() -> impl Strategy<Value = String> {
        prop_oneof![
            "\\PC{0,8}",
            "[ \t\u{FEFF}]{0,3}",
            "[ \u{FEFF}]{0,2}[A-Za-z]{1,6}[ \u{FEFF}]{0,2}",
        ]
    }

    fn email() -> impl Strategy<Value = String> {
        prop_oneof![
            "\\PC{0,12}",
            "[ \u{FEFF}]{0,2}",
            "[a-z \u{FEFF}]{0,4}@[a-z. \u{FEFF}]{0,5}",
        ]
    }

    proptest! {
        #[test]
        fn test_valid_iff_names_present_and_email_matches(
            first in text(),
            last in text(),
            email in email(),
        ) {
            let blank = |s: &str| s.chars().all(|c| c.is_whitespace() || c == '\u{FEFF}');
            let expected = !blank(&first) && !blank(&last) && EMAIL_PATTERN.is_match(&email);
            let errors = validate(&fields(&first, &last, &email));
            prop_assert_eq!(errors.is_empty(), expected);
        }

        #[test]
        fn test_edit_never_touches_other_errors(value in text()) {
            let state = FormState::default().validated();
            let edited = state.edit(Field::Email, value);
            prop_assert_eq!(edited.errors.get(Field::Email), None);
            prop_assert_eq!(edited.errors.get(Field::FirstName), Some(FIRST_NAME_REQUIRED));
            prop_assert_eq!(edited.errors.get(Field::LastName), Some(LAST_NAME_REQUIRED));
        }
    }

    #[test]
    fn test_validate_reports_every_field() {
        let errors = validate(&EmployeeFields::default());
        let fields: Vec<Field> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, Field::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_edit_clears_only_that_error() {
        let directory = FakeDirectory::default();
        let mut form = FormController::create();

        assert_eq!(form.submit(&directory).await, SubmitOutcome::Invalid);
        assert_eq!(form.state().errors.len(), 3);

        form.edit(Field::LastName, "D");
        let errors = &form.state().errors;
        assert_eq!(errors.get(Field::LastName), None);
        assert_eq!(errors.get(Field::FirstName), Some(FIRST_NAME_REQUIRED));
        assert_eq!(errors.get(Field::Email), Some(EMAIL_REQUIRED));
        assert_eq!(form.state().phase, FormPhase::Editing);
    }

    #[tokio::test]
    async fn test_invalid_submit_sends_nothing() {
        let directory = FakeDirectory::default();
        let mut form = FormController::create();
        filled(&mut form, &fields("", "Doe", "a@b.com"));

        assert_eq!(form.submit(&directory).await, SubmitOutcome::Invalid);
        assert_eq!(
            form.state().errors.get(Field::FirstName),
            Some("First name is required")
        );
        assert!(directory.calls().is_empty());
    }

    #[tokio::test]
    async fn test_bad_email_blocks_submit() {
        let directory = FakeDirectory::default();
        let mut form = FormController::create();
        filled(&mut form, &fields("Jane", "Doe", "bad-email"));

        assert_eq!(form.submit(&directory).await, SubmitOutcome::Invalid);
        assert_eq!(
            form.state().errors.get(Field::Email),
            Some("Please enter a valid email")
        );
        assert!(directory.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_navigates_and_resets() {
        let directory = FakeDirectory::default();
        let mut form = FormController::create();
        let input = fields("Jane", "Doe", "jane@doe.com");
        filled(&mut form, &input);

        match form.submit(&directory).await {
            SubmitOutcome::Saved { employee, next } => {
                assert_eq!(next, Route::Employees);
                assert_eq!(employee.fields(), input);
            }
            other => panic!("expected save, got {other:?}"),
        }
        assert_eq!(form.state().fields, EmployeeFields::default());
        assert_eq!(form.state().phase, FormPhase::Succeeded);
        assert_eq!(directory.calls(), vec![Call::Create(input)]);
    }

    #[tokio::test]
    async fn test_create_failure_keeps_fields() {
        let directory = FakeDirectory::default().failing(Op::Create);
        let mut form = FormController::create();
        let input = fields("Jane", "Doe", "jane@doe.com");
        filled(&mut form, &input);

        assert_eq!(form.submit(&directory).await, SubmitOutcome::Failed);
        assert_eq!(form.state().fields, input);
        assert_eq!(form.state().form_error.as_deref(), Some(CREATE_FAILED));
        assert_eq!(form.state().phase, FormPhase::Failed);

        // a retry revalidates and clears the banner before sending
        let retry = FakeDirectory::default();
        assert!(matches!(
            form.submit(&retry).await,
            SubmitOutcome::Saved { .. }
        ));
        assert_eq!(form.state().form_error, None);
    }

    #[tokio::test]
    async fn test_load_prefills_fields() {
        let directory = FakeDirectory::with_employees(vec![employee(5, "Ada", "Lovelace")]);
        let form = FormController::load(&directory, 5).await;

        assert_eq!(form.mode(), FormMode::Update(5));
        assert_eq!(form.state().fields.first_name, "Ada");
        assert_eq!(form.state().phase, FormPhase::Editing);
        assert_eq!(directory.calls(), vec![Call::Get(5)]);
    }

    #[tokio::test]
    async fn test_load_failure_sets_banner() {
        let directory = FakeDirectory::default();
        let form = FormController::load(&directory, 99).await;

        assert_eq!(form.state().form_error.as_deref(), Some(FETCH_FAILED));
        assert_eq!(form.state().fields, EmployeeFields::default());
    }

    #[tokio::test]
    async fn test_update_keeps_fields_after_save() {
        let directory = FakeDirectory::with_employees(vec![employee(5, "Ada", "Lovelace")]);
        let mut form = FormController::load(&directory, 5).await;
        form.edit(Field::Email, "ada@engine.org");

        let outcome = form.submit(&directory).await;
        assert!(matches!(
            outcome,
            SubmitOutcome::Saved {
                next: Route::Employees,
                ..
            }
        ));
        assert_eq!(form.state().fields.email, "ada@engine.org");
        assert_eq!(directory.employees()[0].email, "ada@engine.org");
        assert_eq!(
            directory.calls(),
            vec![
                Call::Get(5),
                Call::Update(5, fields("Ada", "Lovelace", "ada@engine.org")),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_failure_message() {
        let directory =
            FakeDirectory::with_employees(vec![employee(5, "Ada", "Lovelace")]).failing(Op::Update);
        let mut form = FormController::load(&directory, 5).await;

        assert_eq!(form.submit(&directory).await, SubmitOutcome::Failed);
        assert_eq!(form.state().form_error.as_deref(), Some(UPDATE_FAILED));
        assert_eq!(form.state().fields.last_name, "Lovelace");
    }

    #[test]
    fn test_cancel_returns_to_list() {
        let form = FormController::create();
        assert_eq!(form.cancel(), Route::Employees);
        assert_eq!(form.mode().route(), Route::AddEmployee);
    }
}
