use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

use crate::api::{EmChat, Result, Transport};

const SHARE_SECRET: &str = "share-secret";
const THUMBNAIL: &str = "thumbnail";

impl<T: Transport> EmChat<T> {
    /// Downloads an uploaded file by its uuid.
    ///
    /// `share_secret` is the secret returned when the file was uploaded,
    /// required when the upload was restricted.
    pub async fn download_file(&self, uuid: &str, share_secret: Option<&str>) -> Result<Vec<u8>> {
        let headers = download_headers(share_secret, false)?;
        self.get_bytes(&["chatfiles", uuid], headers).await
    }

    /// Downloads the server-generated thumbnail of an uploaded image or video.
    pub async fn download_thumbnail(
        &self,
        uuid: &str,
        share_secret: Option<&str>,
    ) -> Result<Vec<u8>> {
        // Same resource as the full file; the header alone asks for the thumbnail.
        let headers = download_headers(share_secret, true)?;
        self.get_bytes(&["chatfiles", uuid], headers).await
    }
}

fn download_headers(share_secret: Option<&str>, thumbnail: bool) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/octet-stream"));
    if let Some(secret) = share_secret {
        headers.insert(SHARE_SECRET, HeaderValue::from_str(secret)?);
    }
    if thumbnail {
        headers.insert(THUMBNAIL, HeaderValue::from_static("true"));
    }
    Ok(headers)
}
