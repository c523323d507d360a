//! Create/edit form payload and validation.
//!
//! Field rules mirror the upstream contract and run before any network
//! request: a submission that fails here issues zero HTTP calls.

use validator::Validate;

use crate::error::CoreError;

/// Message shown when a create submission has no image attached.
pub const IMAGE_REQUIRED: &str = "image is required";

/// Scalar fields shared by the create and edit forms.
#[derive(Debug, Clone, Validate)]
pub struct CutForm {
    #[validate(length(min = 1, message = "model name is required"))]
    pub model_name: String,
    #[validate(length(min = 1, message = "SKU is required"))]
    pub sku: String,
    #[validate(length(min = 1, message = "cut type is required"))]
    pub cut_type: String,
    #[validate(length(min = 1, message = "image position is required"))]
    pub position: String,
    #[validate(length(min = 1, message = "product type is required"))]
    pub product_type: String,
    #[validate(length(min = 1, message = "material is required"))]
    pub material: String,
    pub material_color: Option<String>,
    #[validate(range(min = 1, message = "display order must be a positive number"))]
    pub display_order: i64,
    pub status: FormStatus,
}

/// Status values a form is allowed to submit.
///
/// Expiry is upstream-driven; forms never set `EXPIRADO`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Ativo,
    Pendente,
}

impl FormStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormStatus::Ativo => "ATIVO",
            FormStatus::Pendente => "PENDENTE",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw {
            "ATIVO" => Ok(FormStatus::Ativo),
            "PENDENTE" => Ok(FormStatus::Pendente),
            other => Err(CoreError::Validation(format!(
                "status must be ATIVO or PENDENTE, got '{other}'"
            ))),
        }
    }
}

/// Whether the submission must include an image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRule {
    /// Creation: the upload is mandatory.
    Required,
    /// Edition: omitting the upload keeps the existing image.
    KeepExisting,
}

/// Validate a form plus the presence of its image upload.
///
/// Returns the blocking problem as a [`CoreError::Validation`] so the caller
/// surfaces it before touching the network. The image check runs first: a
/// create without an image fails with exactly [`IMAGE_REQUIRED`].
pub fn validate_submission(
    form: &CutForm,
    has_image: bool,
    rule: ImageRule,
) -> Result<(), CoreError> {
    if rule == ImageRule::Required && !has_image {
        return Err(CoreError::Validation(IMAGE_REQUIRED.to_string()));
    }
    form.validate()
        .map_err(|errors| CoreError::Validation(flatten_errors(&errors)))
}

/// Join field-level messages into one deterministic, user-facing string.
fn flatten_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.dedup();
    messages.join("; ")
}
