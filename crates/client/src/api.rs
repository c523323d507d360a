//! REST API client for the external `/cuts` endpoints.
//!
//! Wraps the cuts service HTTP API (paginated listing, single fetch,
//! multipart create/update, delete) using [`reqwest`]. There is no retry,
//! cancellation, or timeout logic here: a failed request surfaces a typed
//! error and the caller decides how to degrade.

use recorte_core::cut::Cut;
use recorte_core::form::CutForm;
use recorte_core::pagination::PaginationMeta;
use recorte_core::types::CutId;
use serde::Deserialize;

/// HTTP client for one cuts API deployment.
pub struct CutsApi {
    client: reqwest::Client,
    base_url: String,
}

/// One page of cuts plus its pagination metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct CutsPage {
    pub data: Vec<Cut>,
    pub meta: PaginationMeta,
}

/// Query parameters for `GET /cuts`.
#[derive(Debug, Clone, Default)]
pub struct ListCutsQuery {
    /// 1-based page number; clamped to at least 1 before sending.
    pub page: i64,
    /// Rows per page; clamped to at least 1 before sending.
    pub limit: i64,
    pub sort_by: Option<String>,
    pub cut_type: Option<String>,
    pub material: Option<String>,
}

/// An image file attached to a create or update submission.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Errors from the cuts API layer.
#[derive(Debug, thiserror::Error)]
pub enum CutsApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The cuts API returned a non-2xx status code.
    #[error("cuts API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Server-provided message when the body carried one, else the raw
        /// body text.
        message: String,
    },
}

impl CutsApi {
    /// Create a new client for a cuts API deployment.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:3001`.
    pub fn new(base_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful for
    /// connection pooling).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base HTTP URL of the cuts API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of cuts.
    ///
    /// Optional sort and filter parameters are omitted from the request when
    /// unset; the server treats absence, not emptiness, as "no filter".
    pub async fn list_cuts(
        &self,
        token: &str,
        query: &ListCutsQuery,
    ) -> Result<CutsPage, CutsApiError> {
        let mut params: Vec<(&str, String)> = vec![
            ("limit", query.limit.max(1).to_string()),
            ("page", query.page.max(1).to_string()),
        ];
        if let Some(sort_by) = &query.sort_by {
            params.push(("sortBy", sort_by.clone()));
        }
        if let Some(cut_type) = &query.cut_type {
            params.push(("cutType", cut_type.clone()));
        }
        if let Some(material) = &query.material {
            params.push(("material", material.clone()));
        }

        tracing::debug!(page = query.page, limit = query.limit, "Listing cuts");
        let response = self
            .client
            .get(format!("{}/cuts", self.base_url))
            .bearer_auth(token)
            .query(&params)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch a single cut by id.
    pub async fn get_cut(&self, token: &str, id: CutId) -> Result<Cut, CutsApiError> {
        let response = self
            .client
            .get(format!("{}/cuts/{id}", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Create a cut. The image part is mandatory.
    pub async fn create_cut(
        &self,
        token: &str,
        form: &CutForm,
        image: ImageUpload,
    ) -> Result<Cut, CutsApiError> {
        let multipart = Self::form_parts(form).part("image", Self::image_part(image)?);

        tracing::info!(sku = %form.sku, "Creating cut");
        let response = self
            .client
            .post(format!("{}/cuts", self.base_url))
            .bearer_auth(token)
            .multipart(multipart)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Update a cut. An omitted image keeps the existing one upstream.
    pub async fn update_cut(
        &self,
        token: &str,
        id: CutId,
        form: &CutForm,
        image: Option<ImageUpload>,
    ) -> Result<Cut, CutsApiError> {
        let mut multipart = Self::form_parts(form);
        if let Some(image) = image {
            multipart = multipart.part("image", Self::image_part(image)?);
        }

        tracing::info!(id, "Updating cut");
        let response = self
            .client
            .put(format!("{}/cuts/{id}", self.base_url))
            .bearer_auth(token)
            .multipart(multipart)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Delete a cut. The API answers 204 on success.
    pub async fn delete_cut(&self, token: &str, id: CutId) -> Result<(), CutsApiError> {
        tracing::info!(id, "Deleting cut");
        let response = self
            .client
            .delete(format!("{}/cuts/{id}", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        Self::check_status(response).await
    }

    // ---- private helpers ----

    /// Scalar form fields as multipart text parts, camelCase names matching
    /// the upstream contract. `materialColor` is omitted when unset.
    fn form_parts(form: &CutForm) -> reqwest::multipart::Form {
        let mut parts = reqwest::multipart::Form::new()
            .text("modelName", form.model_name.clone())
            .text("sku", form.sku.clone())
            .text("cutType", form.cut_type.clone())
            .text("position", form.position.clone())
            .text("productType", form.product_type.clone())
            .text("material", form.material.clone())
            .text("displayOrder", form.display_order.to_string())
            .text("status", form.status.as_str());
        if let Some(color) = &form.material_color {
            parts = parts.text("materialColor", color.clone());
        }
        parts
    }

    fn image_part(image: ImageUpload) -> Result<reqwest::multipart::Part, CutsApiError> {
        let part = reqwest::multipart::Part::bytes(image.bytes)
            .file_name(image.filename)
            .mime_str(&image.content_type)?;
        Ok(part)
    }

    /// Ensure the response has a success status code. On failure, pull the
    /// server-provided `message` out of a JSON body when there is one, else
    /// keep the raw body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, CutsApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|value| {
                    value
                        .get("message")
                        .and_then(|message| message.as_str())
                        .map(str::to_string)
                })
                .unwrap_or(body);
            return Err(CutsApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CutsApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), CutsApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
