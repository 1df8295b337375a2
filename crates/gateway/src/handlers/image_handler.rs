//! Post image upload.
//!
//! Clients upload the image first, then pass the returned `filePath` as the
//! post's `imageUrl` in `createPost` / `updatePost`. Uploading never removes
//! files; `updatePost` clears the image it replaces once the post is saved.

use axum::{
    extract::{multipart::MultipartError, Extension, Multipart, State},
    response::Json,
};
use serde::Serialize;
use tracing::debug;

use common::{AppError, AppResult};

use crate::middleware::{require_auth, AuthContext};
use crate::state::AppState;

/// Image upload response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// Store an uploaded image (`image` field). Other fields are ignored.
pub async fn upload_image(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    mut multipart: Multipart,
) -> AppResult<Json<ImageUploadResponse>> {
    let user_id = require_auth(&auth)?;

    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().map(str::to_owned).unwrap_or_default();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        if !file_name.is_empty() && !bytes.is_empty() {
            image = Some((file_name, bytes.to_vec()));
        }
    }

    let Some((file_name, bytes)) = image else {
        return Ok(Json(ImageUploadResponse {
            message: "No file provided!".to_string(),
            file_path: None,
        }));
    };

    let file_path = state.images.save_image(&file_name, bytes).await?;
    debug!(user_id = %user_id, path = %file_path, "Stored post image");

    Ok(Json(ImageUploadResponse {
        message: "File stored.".to_string(),
        file_path: Some(file_path),
    }))
}

fn multipart_error(e: MultipartError) -> AppError {
    AppError::bad_request(e.body_text())
}
