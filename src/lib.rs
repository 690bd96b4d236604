mod config;
mod db;
mod error;
mod gcs;
mod options;
mod parquet_writer;
mod runner;
mod schema;

pub use config::{Config, DbConfig};
pub use db::DbHandle;
pub use error::{Error, Result};
pub use gcs::GcsUploader;
pub use options::Options;
pub use parquet_writer::write_table;
pub use runner::LoaderRunner;
pub use schema::{ColumnData, TableColumn, TableData};
