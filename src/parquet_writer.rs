use crate::schema::{write_options, TableData};
use crate::{Error, Result};
use arrow2::io::parquet::write::{transverse, Encoding, FileWriter, RowGroupIterator};
use std::fs;
use std::path::Path;
use std::result::Result as StdResult;

/// Writes the table to `path` as a single parquet file, replacing any
/// existing file. The data goes to a temp file first and is renamed into
/// place, so the final path never holds a partial write.
pub fn write_table(table: TableData, path: &Path) -> Result<()> {
    let (schema, chunk) = table.into_chunk();

    let temp_path = path.with_extension("temp");
    let file = fs::File::create(&temp_path).map_err(Error::CreateParquetFile)?;

    let mut writer =
        FileWriter::try_new(file, schema.clone(), write_options()).map_err(Error::WriteParquetFile)?;

    // an empty table still produces a valid file carrying the schema
    if !chunk.is_empty() {
        let encodings = schema
            .fields
            .iter()
            .map(|field| transverse(&field.data_type, |_| Encoding::Plain))
            .collect::<Vec<_>>();
        let chunks: Vec<StdResult<_, arrow2::error::Error>> = vec![Ok(chunk)];
        let row_groups =
            RowGroupIterator::try_new(chunks.into_iter(), &schema, write_options(), encodings)
                .map_err(Error::WriteParquetFile)?;

        for group in row_groups {
            let group = group.map_err(Error::WriteParquetFile)?;
            writer.write(group).map_err(Error::WriteParquetFile)?;
        }
    }

    writer.end(None).map_err(Error::WriteParquetFile)?;

    fs::rename(&temp_path, path).map_err(Error::RenameParquetFile)?;

    Ok(())
}
