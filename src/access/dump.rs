//! Streaming feature dump files.
//!
//! Layout (all integers little endian):
//!
//! ```text
//! "VGEO" | version: u16 | header_len: u32 | header (bincode)
//! row_len: u32 | row (bincode)      -- repeated row_count times
//! ```
//!
//! The header carries the dataset name, schema, bounds and row count.
//! Geometries are stored as WKT text inside each row.

use crate::access::error::{SourceError, SourceResult};
use crate::access::source::{check_row, FeatureSource, RawRow, RowStream};
use crate::feature::{parse_wkt, to_wkt, Envelope, Schema, Value};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

const MAGIC: &[u8; 4] = b"VGEO";
const VERSION: u16 = 1;

/// Offset of the header bytes (magic + version + header length)
const HEADER_OFFSET: u64 = 4 + 2 + 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DumpHeader {
    name: String,
    schema: Schema,
    bounds: Envelope,
    row_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum DumpValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Geometry(String),
}

impl From<&Value> for DumpValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => DumpValue::Null,
            Value::Integer(i) => DumpValue::Integer(*i),
            Value::Float(f) => DumpValue::Float(*f),
            Value::Text(s) => DumpValue::Text(s.clone()),
            Value::Geometry(g) => DumpValue::Geometry(to_wkt(g)),
        }
    }
}

impl DumpValue {
    fn into_value(self) -> SourceResult<Value> {
        Ok(match self {
            DumpValue::Null => Value::Null,
            DumpValue::Integer(i) => Value::Integer(i),
            DumpValue::Float(f) => Value::Float(f),
            DumpValue::Text(s) => Value::Text(s),
            DumpValue::Geometry(wkt) => Value::Geometry(parse_wkt(&wkt)?),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DumpRow {
    id: String,
    values: Vec<DumpValue>,
}

impl DumpRow {
    fn into_raw(self) -> SourceResult<RawRow> {
        let values = self
            .values
            .into_iter()
            .map(DumpValue::into_value)
            .collect::<SourceResult<Vec<_>>>()?;
        Ok(RawRow {
            id: self.id,
            values,
        })
    }
}

/// Read one length-prefixed bincode frame.
///
/// The buffer grows with the bytes actually present, so a corrupt length
/// cannot force a large allocation.
fn read_frame<R: Read>(reader: &mut R) -> SourceResult<Vec<u8>> {
    let len = reader.read_u32::<LittleEndian>()?;
    let mut buf = Vec::new();
    reader.by_ref().take(u64::from(len)).read_to_end(&mut buf)?;
    if buf.len() as u64 != u64::from(len) {
        return Err(SourceError::Format(format!(
            "truncated frame: expected {} bytes, found {}",
            len,
            buf.len()
        )));
    }
    Ok(buf)
}

fn write_frame<W: Write>(writer: &mut W, bytes: &[u8]) -> SourceResult<()> {
    let len = u32::try_from(bytes.len())
        .map_err(|_| SourceError::Format(format!("frame of {} bytes is too large", bytes.len())))?;
    writer.write_u32::<LittleEndian>(len)?;
    writer.write_all(bytes)?;
    Ok(())
}

/// Feature source backed by a dump file.
///
/// Only the header is held in memory; every `rows()` call opens its own file
/// handle, which is closed when the returned stream is dropped.
#[derive(Debug, Clone)]
pub struct DumpSource {
    path: PathBuf,
    header: DumpHeader,
    data_offset: u64,
}

impl DumpSource {
    /// Open a dump file and read its header
    pub fn open(path: impl AsRef<Path>) -> SourceResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut reader = BufReader::new(File::open(&path)?);

        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(SourceError::Format(format!(
                "{} is not a feature dump",
                path.display()
            )));
        }

        let version = reader.read_u16::<LittleEndian>()?;
        if version != VERSION {
            return Err(SourceError::Format(format!(
                "unsupported dump version {}",
                version
            )));
        }

        let header_bytes = read_frame(&mut reader)?;
        let header: DumpHeader = bincode::deserialize(&header_bytes)?;
        let data_offset = HEADER_OFFSET + header_bytes.len() as u64;

        Ok(Self {
            path,
            header,
            data_offset,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FeatureSource for DumpSource {
    fn name(&self) -> &str {
        &self.header.name
    }

    fn schema(&self) -> SourceResult<Schema> {
        Ok(self.header.schema.clone())
    }

    fn bounds(&self) -> SourceResult<Envelope> {
        Ok(self.header.bounds)
    }

    fn rows(&self) -> SourceResult<RowStream<'_>> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(self.data_offset))?;
        Ok(Box::new(DumpRows {
            reader: BufReader::new(file),
            remaining: self.header.row_count,
            failed: false,
        }))
    }

    fn row_count(&self) -> Option<usize> {
        usize::try_from(self.header.row_count).ok()
    }
}

/// Row stream over one open dump file
struct DumpRows {
    reader: BufReader<File>,
    remaining: u64,
    failed: bool,
}

impl DumpRows {
    fn read_row(&mut self) -> SourceResult<RawRow> {
        let bytes = read_frame(&mut self.reader).map_err(|e| match e {
            SourceError::Io(io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
                SourceError::Format(format!("truncated dump: {} rows missing", self.remaining))
            }
            other => other,
        })?;
        let row: DumpRow = bincode::deserialize(&bytes)?;
        row.into_raw()
    }
}

impl Iterator for DumpRows {
    type Item = SourceResult<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining == 0 {
            return None;
        }

        match self.read_row() {
            Ok(row) => {
                self.remaining -= 1;
                Some(Ok(row))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Writes a dump file row by row.
///
/// The header is written up front and rewritten by `finish` with the final
/// bounds and row count; its encoded size does not change between the two.
pub struct DumpWriter {
    writer: BufWriter<File>,
    header: DumpHeader,
    header_len: usize,
}

impl DumpWriter {
    pub fn create(path: impl AsRef<Path>, name: impl Into<String>, schema: Schema) -> SourceResult<Self> {
        let header = DumpHeader {
            name: name.into(),
            schema,
            bounds: Envelope::empty(),
            row_count: 0,
        };
        let header_bytes = bincode::serialize(&header)?;

        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(MAGIC)?;
        writer.write_u16::<LittleEndian>(VERSION)?;
        write_frame(&mut writer, &header_bytes)?;

        Ok(Self {
            writer,
            header,
            header_len: header_bytes.len(),
        })
    }

    /// Append a row after validating it against the schema
    pub fn write(&mut self, id: &str, values: &[Value]) -> SourceResult<()> {
        check_row(&self.header.schema, id, values)?;

        let row = DumpRow {
            id: id.to_string(),
            values: values.iter().map(DumpValue::from).collect(),
        };
        write_frame(&mut self.writer, &bincode::serialize(&row)?)?;

        if let Some(geom) = values[self.header.schema.geometry_index()].as_geometry() {
            self.header.bounds.expand_to_include(&Envelope::of(geom));
        }
        self.header.row_count += 1;
        Ok(())
    }

    /// Flush rows and finalise the header. Returns the number of rows written.
    pub fn finish(self) -> SourceResult<u64> {
        let header_bytes = bincode::serialize(&self.header)?;
        if header_bytes.len() != self.header_len {
            return Err(SourceError::Format("header size changed while writing".to_string()));
        }

        let mut file = self.writer.into_inner().map_err(|e| e.into_error())?;
        file.seek(SeekFrom::Start(HEADER_OFFSET))?;
        file.write_all(&header_bytes)?;
        file.sync_all()?;
        Ok(self.header.row_count)
    }
}

/// Copy every row of `source` into a new dump file at `path`
pub fn write_dump<S: FeatureSource + ?Sized>(source: &S, path: impl AsRef<Path>) -> SourceResult<u64> {
    let mut writer = DumpWriter::create(path, source.name(), source.schema()?)?;
    for row in source.rows()? {
        let row = row?;
        writer.write(&row.id, &row.values)?;
    }
    writer.finish()
}
