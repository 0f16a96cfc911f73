use common_types::MethodResponse;
use generate_thumbnails::ThumbnailError;

/// Error code for faults while parsing or dispatching a call.
pub const EXCEPTION_CODE: &str = "exception";

/// Maps a synchronous failure of a method call to the response sent back to the bridge.
#[must_use]
pub fn error_response(error: &ThumbnailError) -> MethodResponse {
    match error {
        ThumbnailError::AlreadyActive => MethodResponse::error(
            error.code(),
            "Thumbnail generation is already active",
        ),
        _ => MethodResponse::error(EXCEPTION_CODE, error.to_string()),
    }
}
