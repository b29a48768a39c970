use reqwest::{Method, header::CONTENT_TYPE};
use tracing::instrument;

use super::{BaasError, SupabaseClient};

impl SupabaseClient {
    /// Uploads an object; an existing object at `path` is not overwritten.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), BaasError> {
        let request = self
            .request(Method::POST, &format!("/storage/v1/object/{bucket}/{path}"))
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes);
        self.send(request).await?;
        Ok(())
    }

    /// URL of an object in a public bucket. Does not check that it exists.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.base_url())
    }
}
