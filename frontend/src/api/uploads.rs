use super::{ApiClient, ApiRequest, Body, Method, Transport};
use crate::error::ApiError;
use crate::models::UploadReply;

pub const UPLOAD_FIELD: &str = "image";

impl<T: Transport> ApiClient<T> {
    /// Uploads an image and returns the stored filename.
    pub async fn upload_image(&self, file: web_sys::File) -> Result<String, ApiError> {
        let mut request: ApiRequest = self.request(Method::Post, "/upload/image");
        request.body = Some(Body::Multipart {
            field: UPLOAD_FIELD,
            file,
        });
        let reply: UploadReply = self.call(request).await?;
        uploaded_filename(reply)
    }
}

fn uploaded_filename(reply: UploadReply) -> Result<String, ApiError> {
    reply
        .file
        .map(|file| file.filename)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::Decode("upload reply has no filename".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filename_is_read_from_file_object() {
        let reply: UploadReply = serde_json::from_value(json!({
            "success": true,
            "message": "Uploaded",
            "file": {"filename": "1700000000-me.png"}
        }))
        .unwrap();
        assert_eq!(uploaded_filename(reply).unwrap(), "1700000000-me.png");
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let reply: UploadReply = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(matches!(uploaded_filename(reply), Err(ApiError::Decode(_))));
    }
}
