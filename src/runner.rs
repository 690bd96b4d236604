use crate::config::Config;
use crate::db::DbHandle;
use crate::gcs::GcsUploader;
use crate::options::Options;
use crate::parquet_writer::write_table;
use crate::Result;

pub struct LoaderRunner {
    cfg: Config,
    db: DbHandle,
}

impl LoaderRunner {
    pub async fn new(options: &Options) -> Result<Self> {
        let cfg = Config::load(&options.env_path)?;
        let db = DbHandle::new(&cfg.db).await?;

        Ok(Self { cfg, db })
    }

    /// Runs the whole load once: extract, serialize, upload. Fails fast on
    /// the first error, nothing is retried.
    pub async fn run(&self) -> Result<()> {
        log::info!(
            "extracting table {} from postgres at {}:{}...",
            self.cfg.table_name,
            self.cfg.db.host,
            self.cfg.db.port
        );
        let table = self.db.fetch_table(&self.cfg.table_name).await?;
        log::info!("extracted {} rows.", table.len());

        let parquet_path = self.cfg.parquet_path();
        write_table(table, &parquet_path)?;
        log::info!("saved table locally to {}.", parquet_path.display());

        // credentials are only loaded for the upload stage
        let uploader =
            GcsUploader::from_service_account(&self.cfg.gcs_key_path, &self.cfg.gcs_bucket)?;
        uploader
            .upload_file(&parquet_path, &self.cfg.object_key())
            .await?;

        log::info!("table {} successfully uploaded to gcs.", self.cfg.table_name);

        Ok(())
    }
}
