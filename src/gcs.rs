use crate::{Error, Result};
use bytes::Bytes;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Uploads local files to a bucket. The store is injected so tests can run
/// against an in-memory store instead of real cloud infrastructure.
pub struct GcsUploader {
    bucket: String,
    store: Arc<dyn ObjectStore>,
}

impl GcsUploader {
    pub fn new(store: Arc<dyn ObjectStore>, bucket: &str) -> Self {
        Self {
            bucket: bucket.to_owned(),
            store,
        }
    }

    /// Authenticates against gcs with a service account key file. A missing
    /// or malformed key file fails here, before any network call is made.
    pub fn from_service_account(key_path: &Path, bucket: &str) -> Result<Self> {
        let key = fs::read(key_path).map_err(Error::ReadServiceAccountKey)?;
        serde_json::from_slice::<serde_json::Value>(&key).map_err(Error::ParseServiceAccountKey)?;

        let store = GoogleCloudStorageBuilder::new()
            .with_service_account_path(key_path.to_string_lossy())
            .with_bucket_name(bucket)
            .build()
            .map_err(Error::BuildGcsClient)?;

        Ok(Self::new(Arc::new(store), bucket))
    }

    /// Uploads the whole file as a single object under `key`.
    pub async fn upload_file(&self, path: &Path, key: &str) -> Result<()> {
        let bytes = tokio::fs::read(path).await.map_err(Error::ReadUploadFile)?;

        self.store
            .put(&ObjectPath::from(key), Bytes::from(bytes).into())
            .await
            .map_err(Error::UploadObject)?;

        log::info!(
            "uploaded {} to gs://{}/{}",
            path.display(),
            self.bucket,
            key
        );

        Ok(())
    }
}
