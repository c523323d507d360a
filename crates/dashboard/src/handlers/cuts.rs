//! Create, update, and delete submissions, proxied to the cuts API.
//!
//! Validation runs in full before any upstream request: a submission that
//! fails the form rules or the image gate issues zero network calls.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use recorte_client::ImageUpload;
use recorte_core::cut::Cut;
use recorte_core::error::CoreError;
use recorte_core::form::{validate_submission, CutForm, FormStatus, ImageRule, IMAGE_REQUIRED};
use recorte_core::media::inspect_image;
use recorte_core::types::CutId;
use serde::Serialize;

use crate::auth::Bearer;
use crate::error::{AppError, AppResult};
use crate::query::DeleteParams;
use crate::response::DataResponse;
use crate::router::DASHBOARD_PATH;
use crate::state::AppState;

/// Result of a successful form submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOutcome {
    pub cut: Cut,
    /// Where the page navigates next; absent when it stays in place.
    pub redirect_to: Option<&'static str>,
}

/// Result of a confirmed delete.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub deleted: CutId,
    pub redirect_to: &'static str,
}

/// A parsed multipart submission: scalar fields plus an optional image part.
struct Submission {
    form: CutForm,
    image: Option<ImageUpload>,
}

/// POST /cuts
///
/// Multipart create. The image part is mandatory; its absence blocks the
/// submission with `image is required` before any upstream call.
pub async fn create_cut(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<FormOutcome>>)> {
    let submission = read_submission(multipart).await?;
    validate_submission(
        &submission.form,
        submission.image.is_some(),
        ImageRule::Required,
    )?;

    let image = match submission.image {
        Some(image) => {
            inspect_image(&image.bytes)?;
            image
        }
        // Double-checked: validate_submission already rejected this.
        None => return Err(AppError::Core(CoreError::Validation(IMAGE_REQUIRED.into()))),
    };

    let cut = state.api.create_cut(&token, &submission.form, image).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: FormOutcome {
                cut,
                redirect_to: Some(DASHBOARD_PATH),
            },
        }),
    ))
}

/// PUT /cuts/{id}
///
/// Multipart update. An omitted image keeps the existing one upstream; the
/// page stays in place on success.
pub async fn update_cut(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<CutId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<FormOutcome>>> {
    let submission = read_submission(multipart).await?;
    validate_submission(
        &submission.form,
        submission.image.is_some(),
        ImageRule::KeepExisting,
    )?;

    if let Some(image) = &submission.image {
        inspect_image(&image.bytes)?;
    }

    let cut = state
        .api
        .update_cut(&token, id, &submission.form, submission.image)
        .await?;
    Ok(Json(DataResponse {
        data: FormOutcome {
            cut,
            redirect_to: None,
        },
    }))
}

/// DELETE /cuts/{id}?confirm=true
///
/// The browser confirmation prompt as an explicit parameter: declining
/// (absent or false) issues zero upstream requests; confirming issues
/// exactly one DELETE and then navigates back to the list.
pub async fn delete_cut(
    State(state): State<AppState>,
    Bearer(token): Bearer,
    Path(id): Path<CutId>,
    Query(params): Query<DeleteParams>,
) -> AppResult<Json<DataResponse<DeleteOutcome>>> {
    if !params.confirm {
        return Err(AppError::Core(CoreError::Validation(
            "confirmation required: re-send with confirm=true to delete this cut".into(),
        )));
    }

    state.api.delete_cut(&token, id).await?;
    Ok(Json(DataResponse {
        data: DeleteOutcome {
            deleted: id,
            redirect_to: DASHBOARD_PATH,
        },
    }))
}

/// Drain the multipart stream into a [`Submission`].
///
/// Unknown fields are ignored; missing scalar fields default to empty
/// strings so the form validator reports them field by field.
async fn read_submission(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut model_name = String::new();
    let mut sku = String::new();
    let mut cut_type = String::new();
    let mut position = String::new();
    let mut product_type = String::new();
    let mut material = String::new();
    let mut material_color: Option<String> = None;
    let mut display_order_raw: Option<String> = None;
    let mut status_raw: Option<String> = None;
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(err.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                let filename = field.file_name().unwrap_or("upload.png").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|err| AppError::BadRequest(err.to_string()))?;
                image = Some(ImageUpload {
                    filename,
                    content_type,
                    bytes: data.to_vec(),
                });
            }
            "modelName" => model_name = field_text(field).await?,
            "sku" => sku = field_text(field).await?,
            "cutType" => cut_type = field_text(field).await?,
            "position" => position = field_text(field).await?,
            "productType" => product_type = field_text(field).await?,
            "material" => material = field_text(field).await?,
            "materialColor" => {
                let value = field_text(field).await?;
                material_color = if value.is_empty() { None } else { Some(value) };
            }
            "displayOrder" => display_order_raw = Some(field_text(field).await?),
            "status" => status_raw = Some(field_text(field).await?),
            _ => {} // ignore unknown fields
        }
    }

    // An unparsable display order is its own error; an absent one falls to 0
    // and fails the positive-number rule.
    let display_order = match display_order_raw.as_deref() {
        None | Some("") => 0,
        Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
            AppError::Core(CoreError::Validation(
                "display order must be a number".into(),
            ))
        })?,
    };

    let status = match status_raw.as_deref() {
        None | Some("") => FormStatus::default(),
        Some(raw) => FormStatus::parse(raw)?,
    };

    Ok(Submission {
        form: CutForm {
            model_name,
            sku,
            cut_type,
            position,
            product_type,
            material,
            material_color,
            display_order,
            status,
        },
        image,
    })
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|err| AppError::BadRequest(err.to_string()))
}
