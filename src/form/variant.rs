//! Controller for the variant create/edit form.
//!
//! A pure state machine: the host shell renders the fields, feeds events
//! in, and interprets the returned effects (data refresh, navigation,
//! notifications). Field validation here is advisory only and fails fast
//! in the client; the handlers remain the authority.

use rust_decimal::Decimal;
use uuid::Uuid;

/// Selected once at mount from whether initial data was supplied;
/// a form never transitions between modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantFormValues {
    pub price: Decimal,
    pub stock: i32,
    pub color_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
    pub discount_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Price,
    Stock,
}

/// Pre-submission check failures; price and stock must both be at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    BelowMinimum(Field),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Idle,
    Submitting,
    Deleting,
}

/// The destructive action is gated behind an explicit confirmation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirm {
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Created,
    Updated,
    Deleted,
    Failed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::Created => "Variant created.",
            Notice::Updated => "Variant updated.",
            Notice::Deleted => "Variant deleted.",
            Notice::Failed => "Something went wrong.",
        }
    }
}

/// Side effects for the host shell to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RefreshData,
    NavigateToList,
    Notify(Notice),
}

/// Which API call a started submission issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRequest {
    Create,
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Started(FormRequest),
    Rejected(Vec<FieldError>),
    Busy,
}

#[derive(Debug)]
pub struct VariantForm {
    mode: FormMode,
    submission: Submission,
    confirm: DeleteConfirm,
    values: VariantFormValues,
}

impl VariantForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            submission: Submission::Idle,
            confirm: DeleteConfirm::Closed,
            values: VariantFormValues::default(),
        }
    }

    pub fn edit(initial: VariantFormValues) -> Self {
        Self {
            mode: FormMode::Edit,
            submission: Submission::Idle,
            confirm: DeleteConfirm::Closed,
            values: initial,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn values(&self) -> &VariantFormValues {
        &self.values
    }

    pub fn set_values(&mut self, values: VariantFormValues) {
        self.values = values;
    }

    /// One in-flight request at a time; the submit and delete controls
    /// are disabled while busy.
    pub fn is_busy(&self) -> bool {
        self.submission != Submission::Idle
    }

    pub fn delete_confirm(&self) -> DeleteConfirm {
        self.confirm
    }

    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.values.price < Decimal::ONE {
            errors.push(FieldError::BelowMinimum(Field::Price));
        }
        if self.values.stock < 1 {
            errors.push(FieldError::BelowMinimum(Field::Stock));
        }
        errors
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if self.is_busy() {
            return SubmitOutcome::Busy;
        }

        let errors = self.validate();
        if !errors.is_empty() {
            return SubmitOutcome::Rejected(errors);
        }

        self.submission = Submission::Submitting;
        SubmitOutcome::Started(match self.mode {
            FormMode::Create => FormRequest::Create,
            FormMode::Edit => FormRequest::Update,
        })
    }

    pub fn submit_succeeded(&mut self) -> Vec<Effect> {
        self.submission = Submission::Idle;
        vec![
            Effect::RefreshData,
            Effect::NavigateToList,
            Effect::Notify(match self.mode {
                FormMode::Create => Notice::Created,
                FormMode::Edit => Notice::Updated,
            }),
        ]
    }

    /// Failure notifies and returns to idle so the user may retry;
    /// no navigation.
    pub fn submit_failed(&mut self) -> Vec<Effect> {
        self.submission = Submission::Idle;
        vec![Effect::Notify(Notice::Failed)]
    }

    pub fn request_delete(&mut self) {
        if !self.is_busy() {
            self.confirm = DeleteConfirm::Open;
        }
    }

    pub fn cancel_delete(&mut self) {
        if self.submission != Submission::Deleting {
            self.confirm = DeleteConfirm::Closed;
        }
    }

    /// Returns true when the delete request should be issued
    pub fn confirm_delete(&mut self) -> bool {
        if self.confirm != DeleteConfirm::Open || self.is_busy() {
            return false;
        }
        self.submission = Submission::Deleting;
        true
    }

    pub fn delete_resolved(&mut self, success: bool) -> Vec<Effect> {
        self.submission = Submission::Idle;
        self.confirm = DeleteConfirm::Closed;
        if success {
            vec![
                Effect::RefreshData,
                Effect::NavigateToList,
                Effect::Notify(Notice::Deleted),
            ]
        } else {
            vec![Effect::Notify(Notice::Failed)]
        }
    }
}
