use crate::{Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const GCS_BUCKET_NAME: &str = "nyc-taxi-data-pipeline";
pub const TABLE_NAME: &str = "yellow_taxi_trips";
pub const OUTPUT_DIR: &str = "data/processed";
pub const OBJECT_KEY_PREFIX: &str = "processed";

pub struct Config {
    pub db: DbConfig,
    pub gcs_bucket: String,
    pub gcs_key_path: PathBuf,
    pub table_name: String,
    pub output_dir: PathBuf,
}

pub struct DbConfig {
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Loads the optional environment file, resolves the configuration from
    /// the process environment and makes sure the output directory exists.
    pub fn load(env_path: &str) -> Result<Self> {
        load_env_file(env_path)?;

        let config = Self::resolve()?;

        ensure_output_dir(&config.output_dir)?;

        Ok(config)
    }

    fn resolve() -> Result<Self> {
        let port = env_or("DB_PORT", "5432")
            .parse::<u16>()
            .map_err(Error::ParseDbPort)?;

        Ok(Self {
            db: DbConfig {
                user: env_or("DB_USER", "taxi_user"),
                password: env_or("DB_PASS", "taxi_pass"),
                host: env_or("DB_HOST", "localhost"),
                port,
                dbname: env_or("DB_NAME", "nyc_taxi"),
            },
            gcs_bucket: GCS_BUCKET_NAME.to_owned(),
            gcs_key_path: PathBuf::from(env_or("GCS_KEY_PATH", "config/gcs_service_account.json")),
            table_name: TABLE_NAME.to_owned(),
            output_dir: PathBuf::from(OUTPUT_DIR),
        })
    }

    pub fn parquet_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.parquet", self.table_name))
    }

    pub fn object_key(&self) -> String {
        format!("{}/{}.parquet", OBJECT_KEY_PREFIX, self.table_name)
    }
}

/// Populates the process environment from a dotenv style file. Values already
/// set in the environment win over values from the file. A missing file is
/// not an error.
fn load_env_file(path: &str) -> Result<()> {
    match dotenvy::from_filename(path) {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(Error::LoadEnvFile(e)),
    }
}

fn ensure_output_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(Error::CreateMissingDirectories)
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
