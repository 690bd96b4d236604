use std::io;
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("failed to load environment file:\n{0}")]
    LoadEnvFile(dotenvy::Error),
    #[error("failed to parse database port:\n{0}")]
    ParseDbPort(std::num::ParseIntError),
    #[error("failed to create missing directories:\n{0}")]
    CreateMissingDirectories(io::Error),
    #[error("failed to create database connection pool:\n{0}")]
    CreatePool(deadpool_postgres::CreatePoolError),
    #[error("failed to get database connection from pool:\n{0}")]
    GetDbConnection(deadpool_postgres::PoolError),
    #[error("failed to run database query:\n{0}")]
    DbQuery(tokio_postgres::Error),
    #[error("unsupported type {1} for column \"{0}\"")]
    UnsupportedColumnType(String, tokio_postgres::types::Type),
    #[error("failed to decode value for column \"{0}\":\n{1}")]
    DecodeRowValue(String, tokio_postgres::Error),
    #[error("failed to create parquet file:\n{0}")]
    CreateParquetFile(io::Error),
    #[error("failed to write parquet file:\n{0}")]
    WriteParquetFile(arrow2::error::Error),
    #[error("failed to rename parquet file:\n{0}")]
    RenameParquetFile(io::Error),
    #[error("failed to read service account key file:\n{0}")]
    ReadServiceAccountKey(io::Error),
    #[error("service account key file is not valid json:\n{0}")]
    ParseServiceAccountKey(serde_json::Error),
    #[error("failed to build gcs client:\n{0}")]
    BuildGcsClient(object_store::Error),
    #[error("failed to read local file for upload:\n{0}")]
    ReadUploadFile(io::Error),
    #[error("failed to upload object to gcs:\n{0}")]
    UploadObject(object_store::Error),
}

pub type Result<T> = StdResult<T, Error>;
