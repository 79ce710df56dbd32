//! Prediction endpoint
//!
//! The core request flow: authenticated upload → normalize → classify →
//! render. Failures render inside the result page rather than as error
//! status codes, matching the original service's observable behavior.

use axum::extract::{Extension, Multipart, State};
use axum::response::Response;
use tracing::{info, warn};

use crate::api::pages;
use crate::api::session::CurrentUser;
use crate::infer::preprocess;
use crate::render;
use crate::AppState;

/// Multipart field carrying the uploaded image bytes
const IMAGE_FIELD: &str = "image_file";

/// POST /predict (protected)
pub async fn predict(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    multipart: Multipart,
) -> Response {
    match run_prediction(&state, &user, multipart).await {
        Ok(message) => pages::result(&message),
        Err(message) => {
            warn!("Prediction failed for '{}': {}", user.username, message);
            pages::result(&format!("Error: {}", message))
        }
    }
}

/// One upload through the whole pipeline.
///
/// Any failure short-circuits with the message rendered to the user; the
/// process keeps serving other requests.
async fn run_prediction(
    state: &AppState,
    user: &CurrentUser,
    mut multipart: Multipart,
) -> Result<String, String> {
    let image_bytes = read_image_field(&mut multipart).await?;

    let tensor = preprocess::normalize(&image_bytes).map_err(|e| e.to_string())?;

    let prediction = state.classifier.classify(tensor).map_err(|e| e.to_string())?;

    info!(
        "Prediction for '{}': {:?}",
        user.username, prediction.class
    );

    Ok(render::prediction_message(&user.username, prediction.class))
}

/// Pull the image field out of the multipart body
async fn read_image_field(multipart: &mut Multipart) -> Result<Vec<u8>, String> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("failed to read upload: {}", e))?
    {
        if field.name() == Some(IMAGE_FIELD) {
            let data = field
                .bytes()
                .await
                .map_err(|e| format!("failed to read image data: {}", e))?;
            return Ok(data.to_vec());
        }
    }

    Err(format!("missing form field '{}'", IMAGE_FIELD))
}
