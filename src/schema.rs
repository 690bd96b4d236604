use crate::{Error, Result};
use arrow2::array::{
    Array, Float64Vec, Int64Vec, MutableArray, MutableBinaryArray as ArrowMutableBinaryArray,
    MutableBooleanArray, MutableUtf8Array,
};
use arrow2::chunk::Chunk as ArrowChunk;
use arrow2::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow2::io::parquet::write::{CompressionOptions, Version, WriteOptions};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio_postgres::types::Type;
use tokio_postgres::{Column, Row};

pub type Chunk = ArrowChunk<Box<dyn Array>>;

type MutableBinaryArray = ArrowMutableBinaryArray<i64>;

pub fn write_options() -> WriteOptions {
    WriteOptions {
        write_statistics: true,
        compression: CompressionOptions::Snappy,
        version: Version::V2,
        data_pagesize_limit: None,
    }
}

fn timestamp_arr() -> Int64Vec {
    Int64Vec::from(DataType::Timestamp(TimeUnit::Microsecond, None))
}

/// A growable arrow column. The variant is picked from the postgres type of
/// the source column, so no schema has to be declared up front.
pub enum ColumnData {
    Int64(Int64Vec),
    Float64(Float64Vec),
    Utf8(MutableUtf8Array<i64>),
    Boolean(MutableBooleanArray),
    Binary(MutableBinaryArray),
    Timestamp(Int64Vec),
}

impl ColumnData {
    fn for_pg_type(name: &str, pg_type: &Type) -> Result<Self> {
        let data = if *pg_type == Type::INT2 || *pg_type == Type::INT4 || *pg_type == Type::INT8 {
            Self::Int64(Int64Vec::default())
        } else if *pg_type == Type::FLOAT4 || *pg_type == Type::FLOAT8 {
            Self::Float64(Float64Vec::default())
        } else if *pg_type == Type::TEXT
            || *pg_type == Type::VARCHAR
            || *pg_type == Type::BPCHAR
            || *pg_type == Type::NAME
        {
            Self::Utf8(MutableUtf8Array::default())
        } else if *pg_type == Type::BOOL {
            Self::Boolean(MutableBooleanArray::default())
        } else if *pg_type == Type::BYTEA {
            Self::Binary(MutableBinaryArray::default())
        } else if *pg_type == Type::TIMESTAMP || *pg_type == Type::TIMESTAMPTZ {
            Self::Timestamp(timestamp_arr())
        } else {
            return Err(Error::UnsupportedColumnType(
                name.to_owned(),
                pg_type.clone(),
            ));
        };

        Ok(data)
    }

    fn len(&self) -> usize {
        match self {
            Self::Int64(arr) => arr.len(),
            Self::Float64(arr) => arr.len(),
            Self::Utf8(arr) => arr.len(),
            Self::Boolean(arr) => arr.len(),
            Self::Binary(arr) => arr.len(),
            Self::Timestamp(arr) => arr.len(),
        }
    }

    fn as_box(&mut self) -> Box<dyn Array> {
        match self {
            Self::Int64(arr) => arr.as_box(),
            Self::Float64(arr) => arr.as_box(),
            Self::Utf8(arr) => arr.as_box(),
            Self::Boolean(arr) => arr.as_box(),
            Self::Binary(arr) => arr.as_box(),
            Self::Timestamp(arr) => arr.as_box(),
        }
    }
}

pub struct TableColumn {
    name: String,
    pg_type: Type,
    data: ColumnData,
}

impl TableColumn {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_mut(&mut self) -> &mut ColumnData {
        &mut self.data
    }

    fn decode(&mut self, row: &Row, idx: usize) -> Result<()> {
        let decode_err = |e| Error::DecodeRowValue(self.name.clone(), e);

        match &mut self.data {
            ColumnData::Int64(arr) => {
                let val = if self.pg_type == Type::INT2 {
                    row.try_get::<_, Option<i16>>(idx).map_err(decode_err)?.map(i64::from)
                } else if self.pg_type == Type::INT4 {
                    row.try_get::<_, Option<i32>>(idx).map_err(decode_err)?.map(i64::from)
                } else {
                    row.try_get::<_, Option<i64>>(idx).map_err(decode_err)?
                };
                arr.push(val);
            }
            ColumnData::Float64(arr) => {
                let val = if self.pg_type == Type::FLOAT4 {
                    row.try_get::<_, Option<f32>>(idx).map_err(decode_err)?.map(f64::from)
                } else {
                    row.try_get::<_, Option<f64>>(idx).map_err(decode_err)?
                };
                arr.push(val);
            }
            ColumnData::Utf8(arr) => {
                arr.push(row.try_get::<_, Option<String>>(idx).map_err(decode_err)?);
            }
            ColumnData::Boolean(arr) => {
                arr.push(row.try_get::<_, Option<bool>>(idx).map_err(decode_err)?);
            }
            ColumnData::Binary(arr) => {
                arr.push(row.try_get::<_, Option<Vec<u8>>>(idx).map_err(decode_err)?);
            }
            ColumnData::Timestamp(arr) => {
                let val = row.try_get::<_, Option<SystemTime>>(idx).map_err(decode_err)?;
                arr.push(val.map(system_time_to_micros));
            }
        }

        Ok(())
    }
}

/// An in-memory table. Column set and order come from the result set
/// metadata of a single query, rows are appended exactly as returned.
pub struct TableData {
    columns: Vec<TableColumn>,
}

impl TableData {
    pub fn for_columns(columns: &[Column]) -> Result<Self> {
        Self::from_parts(
            columns
                .iter()
                .map(|col| (col.name().to_owned(), col.type_().clone()))
                .collect(),
        )
    }

    pub fn from_parts(parts: Vec<(String, Type)>) -> Result<Self> {
        let columns = parts
            .into_iter()
            .map(|(name, pg_type)| {
                let data = ColumnData::for_pg_type(&name, &pg_type)?;
                Ok(TableColumn {
                    name,
                    pg_type,
                    data,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { columns })
    }

    pub fn push_row(&mut self, row: &Row) -> Result<()> {
        for (idx, column) in self.columns.iter_mut().enumerate() {
            column.decode(row, idx)?;
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.columns.first().map(|col| col.data.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn columns_mut(&mut self) -> &mut [TableColumn] {
        &mut self.columns
    }

    pub fn into_chunk(mut self) -> (Schema, Chunk) {
        let mut fields = Vec::with_capacity(self.columns.len());
        let mut arrays = Vec::with_capacity(self.columns.len());

        for column in self.columns.iter_mut() {
            let array = column.data.as_box();
            fields.push(Field::new(&column.name, array.data_type().clone(), true));
            arrays.push(array);
        }

        (Schema::from(fields), Chunk::new(arrays))
    }
}

fn system_time_to_micros(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(duration) => duration.as_micros() as i64,
        Err(e) => -(e.duration().as_micros() as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn maps_postgres_types_to_arrow_types() {
        let table = TableData::from_parts(vec![
            ("id".to_owned(), Type::INT8),
            ("passenger_count".to_owned(), Type::INT4),
            ("fare".to_owned(), Type::FLOAT8),
            ("vendor".to_owned(), Type::TEXT),
            ("store_and_fwd".to_owned(), Type::BOOL),
            ("pickup_at".to_owned(), Type::TIMESTAMP),
        ])
        .unwrap();

        let (schema, chunk) = table.into_chunk();

        let names = schema
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "id",
                "passenger_count",
                "fare",
                "vendor",
                "store_and_fwd",
                "pickup_at"
            ]
        );

        let types = schema
            .fields
            .iter()
            .map(|f| f.data_type.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            types,
            vec![
                DataType::Int64,
                DataType::Int64,
                DataType::Float64,
                DataType::LargeUtf8,
                DataType::Boolean,
                DataType::Timestamp(TimeUnit::Microsecond, None),
            ]
        );

        assert_eq!(chunk.arrays().len(), 6);
    }

    #[test]
    fn rejects_unsupported_column_types() {
        let res = TableData::from_parts(vec![("total".to_owned(), Type::NUMERIC)]);

        match res {
            Err(Error::UnsupportedColumnType(name, pg_type)) => {
                assert_eq!(name, "total");
                assert_eq!(pg_type, Type::NUMERIC);
            }
            _ => panic!("expected unsupported column type error"),
        }
    }

    #[test]
    fn empty_table_has_no_rows_but_keeps_columns() {
        let table = TableData::from_parts(vec![
            ("id".to_owned(), Type::INT8),
            ("fare".to_owned(), Type::FLOAT8),
        ])
        .unwrap();

        assert!(table.is_empty());

        let (schema, chunk) = table.into_chunk();
        assert_eq!(schema.fields.len(), 2);
        assert!(chunk.is_empty());
    }

    #[test]
    fn row_count_follows_pushed_values() {
        let mut table = TableData::from_parts(vec![("id".to_owned(), Type::INT8)]).unwrap();

        match table.columns_mut()[0].data_mut() {
            ColumnData::Int64(arr) => {
                arr.push(Some(1));
                arr.push(None);
                arr.push(Some(3));
            }
            _ => unreachable!(),
        }

        assert_eq!(table.len(), 3);
    }

    #[test]
    fn converts_system_time_to_microseconds() {
        assert_eq!(system_time_to_micros(UNIX_EPOCH), 0);
        assert_eq!(
            system_time_to_micros(UNIX_EPOCH + Duration::from_secs(2)),
            2_000_000
        );
        assert_eq!(
            system_time_to_micros(UNIX_EPOCH - Duration::from_micros(5)),
            -5
        );
    }
}
