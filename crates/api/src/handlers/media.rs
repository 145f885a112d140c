//! Handlers for the `/cms/media` library.
//!
//! Uploads arrive as multipart forms. The file is written below the
//! configured media root and only its relative path is stored.

use std::io::Cursor;
use std::path::Path as FsPath;

use axum::extract::{Multipart, OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bns_core::choices::{validate_choice, validate_optional_choice};
use bns_core::cms::{
    format_file_size, media_type_for_extension, sanitize_filename, validate_folder, MEDIA_IMAGE,
    MAX_UPLOAD_BYTES, VALID_MEDIA_TYPES,
};
use bns_core::search::ilike_pattern;
use bns_core::types::DbId;
use bns_db::models::media_item::{CreateMediaItem, MediaItem, MediaQuery, UpdateMediaItem};
use bns_db::repositories::MediaRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::query::{FolderParam, PaginationParams, TypeParam};
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// A media item with display helpers.
#[derive(Debug, Serialize)]
pub struct MediaView {
    #[serde(flatten)]
    pub item: MediaItem,
    pub file_size_formatted: String,
    pub url: String,
}

impl From<MediaItem> for MediaView {
    fn from(item: MediaItem) -> Self {
        Self {
            file_size_formatted: format_file_size(item.file_size),
            url: format!("/media/{}", item.file_path),
            item,
        }
    }
}

fn views(items: Vec<MediaItem>) -> Vec<MediaView> {
    items.into_iter().map(MediaView::from).collect()
}

/// Text fields accepted alongside the uploaded file.
#[derive(Debug, Default)]
struct UploadFields {
    title: Option<String>,
    alt_text: Option<String>,
    caption: Option<String>,
    folder: Option<String>,
    tags: Option<serde_json::Value>,
}

/// Decode just enough of an image header to read its dimensions.
fn image_dimensions(data: &[u8]) -> Option<(i32, i32)> {
    let (width, height) = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()?;
    Some((i32::try_from(width).ok()?, i32::try_from(height).ok()?))
}

/// POST /api/v1/cms/media (multipart: `file` plus optional metadata fields)
pub async fn upload(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<MediaView>>)> {
    let mut file_data: Option<(String, Vec<u8>)> = None;
    let mut fields = UploadFields::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "file" {
            let filename = field.file_name().unwrap_or("").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file_data = Some((filename, data.to_vec()));
            continue;
        }
        let text = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        match name.as_str() {
            "title" => fields.title = Some(text),
            "alt_text" => fields.alt_text = Some(text),
            "caption" => fields.caption = Some(text),
            "folder" => fields.folder = Some(text.trim().trim_matches('/').to_string()),
            "tags" => {
                let tags: serde_json::Value = serde_json::from_str(&text)
                    .ok()
                    .filter(serde_json::Value::is_array)
                    .ok_or_else(|| AppError::BadRequest("tags must be a JSON array".into()))?;
                fields.tags = Some(tags);
            }
            _ => {}
        }
    }

    let (original_name, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::BadRequest(format!(
            "File exceeds the {} upload limit",
            format_file_size(MAX_UPLOAD_BYTES as i64)
        )));
    }
    let filename = sanitize_filename(&original_name)?;
    let folder = fields.folder.unwrap_or_default();
    validate_folder(&folder)?;

    let ext = filename.rsplit_once('.').map(|(_, e)| e).unwrap_or("");
    let media_type = media_type_for_extension(ext);
    let (width, height) = if media_type == MEDIA_IMAGE {
        image_dimensions(&data).unzip()
    } else {
        (None, None)
    };

    // Dated directory plus a unique prefix so re-uploads never collide.
    let relative_dir = chrono::Utc::now().format("%Y/%m").to_string();
    let stored_name = format!("{}_{filename}", uuid::Uuid::new_v4().simple());
    let relative_path = format!("{relative_dir}/{stored_name}");
    let storage_dir = state.config.media_root.join(&relative_dir);
    tokio::fs::create_dir_all(&storage_dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    tokio::fs::write(storage_dir.join(&stored_name), &data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let input = CreateMediaItem {
        file_path: relative_path.clone(),
        title: fields.title.unwrap_or_else(|| filename.clone()),
        filename,
        media_type: media_type.to_string(),
        alt_text: fields.alt_text.unwrap_or_default(),
        caption: fields.caption.unwrap_or_default(),
        file_size: data.len() as i64,
        width,
        height,
        folder,
        tags: fields.tags.unwrap_or_else(|| serde_json::json!([])),
        uploaded_by_id: Some(user.user_id),
    };
    let item = match MediaRepo::create(&state.pool, &input).await {
        Ok(item) => item,
        Err(e) => {
            // No row points at the file, so it must not outlive the request.
            remove_stored_file(&state.config.media_root, &relative_path).await;
            return Err(e.into());
        }
    };
    tracing::info!(
        media_id = item.id,
        media_type = %item.media_type,
        file_size = item.file_size,
        uploaded_by = user.user_id,
        "Media uploaded"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: item.into() })))
}

/// GET /api/v1/cms/media
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<MediaQuery>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<MediaView>>>> {
    validate_optional_choice("type", filter.media_type.as_deref(), VALID_MEDIA_TYPES)?;
    let search = ilike_pattern(filter.search.as_deref());
    let items = MediaRepo::list(
        &state.pool,
        &filter,
        search.as_deref(),
        page.limit(),
        page.offset(),
    )
    .await?;
    let count = MediaRepo::count(&state.pool, &filter, search.as_deref()).await?;
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, views(items)),
    }))
}

/// GET /api/v1/cms/media/by-folder?folder=
///
/// Without a folder, lists items at the library root.
pub async fn by_folder(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<FolderParam>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<MediaView>>>> {
    let filter = MediaQuery {
        folder: Some(params.folder.unwrap_or_default()),
        ..MediaQuery::default()
    };
    let items = MediaRepo::list(&state.pool, &filter, None, page.limit(), page.offset()).await?;
    let count = MediaRepo::count(&state.pool, &filter, None).await?;
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, views(items)),
    }))
}

/// GET /api/v1/cms/media/by-type?type=
pub async fn by_type(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<TypeParam>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Page<MediaView>>>> {
    let media_type = params
        .kind
        .ok_or_else(|| AppError::BadRequest("type required".into()))?;
    validate_choice("type", &media_type, VALID_MEDIA_TYPES)?;
    let filter = MediaQuery {
        media_type: Some(media_type),
        ..MediaQuery::default()
    };
    let items = MediaRepo::list(&state.pool, &filter, None, page.limit(), page.offset()).await?;
    let count = MediaRepo::count(&state.pool, &filter, None).await?;
    Ok(Json(DataResponse {
        data: Page::new(&uri, &page, count, views(items)),
    }))
}

/// GET /api/v1/cms/media/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MediaView>>> {
    let item = MediaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("MediaItem", id))?;
    Ok(Json(DataResponse { data: item.into() }))
}

/// PUT /api/v1/cms/media/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMediaItem>,
) -> AppResult<Json<DataResponse<MediaView>>> {
    if let Some(folder) = &input.folder {
        validate_folder(folder)?;
    }
    if input.tags.as_ref().is_some_and(|t| !t.is_array()) {
        return Err(AppError::BadRequest("tags must be a JSON array".into()));
    }
    let item = MediaRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("MediaItem", id))?;
    tracing::info!(media_id = id, updated_by = user.user_id, "Media updated");
    Ok(Json(DataResponse { data: item.into() }))
}

/// DELETE /api/v1/cms/media/{id}
///
/// The row goes first; a file that cannot be removed is only logged.
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let item = MediaRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("MediaItem", id))?;
    remove_stored_file(&state.config.media_root, &item.file_path).await;
    tracing::info!(media_id = id, deleted_by = user.user_id, "Media deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn remove_stored_file(root: &FsPath, relative: &str) {
    if relative.split('/').any(|seg| seg == "..") {
        return;
    }
    if let Err(e) = tokio::fs::remove_file(root.join(relative)).await {
        tracing::warn!(file_path = %relative, error = %e, "Failed to remove media file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::new(width, height);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).expect("encode png");
        buf.into_inner()
    }

    #[test]
    fn reads_png_dimensions() {
        assert_eq!(image_dimensions(&png(12, 7)), Some((12, 7)));
    }

    #[test]
    fn non_image_bytes_have_no_dimensions() {
        assert_eq!(image_dimensions(b"%PDF-1.4 not an image"), None);
    }

    #[tokio::test]
    async fn remove_ignores_missing_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        remove_stored_file(dir.path(), "2024/01/missing.png").await;
    }

    #[tokio::test]
    async fn remove_deletes_stored_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"x").expect("write");
        remove_stored_file(dir.path(), "a.txt").await;
        assert!(!path.exists());
    }
}
