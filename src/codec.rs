// 💾 Persistence Codec - whole-list JSON encoding of the expense file

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde_json::Value;

use crate::error::StoreError;
use crate::expense::{not_an_object, Expense};

/// Decode a full expense list. A JSON `null` decodes as an empty list.
/// Every element must be a JSON object.
pub fn read_expenses<R: Read>(reader: R) -> serde_json::Result<Vec<Expense>> {
    let values: Option<Vec<Value>> = serde_json::from_reader(reader)?;

    values
        .unwrap_or_default()
        .into_iter()
        .map(|value| match value {
            Value::Object(_) => serde_json::from_value(value),
            other => Err(not_an_object(&other)),
        })
        .collect()
}

/// Encode a full expense list as one compact JSON array followed by a newline.
pub fn write_expenses<W: Write>(mut writer: W, expenses: &[Expense]) -> serde_json::Result<()> {
    serde_json::to_writer(&mut writer, expenses)?;
    writer.write_all(b"\n").map_err(serde_json::Error::io)?;
    Ok(())
}

/// Read the expense file at `path`. Returns `Ok(None)` when the file does not exist.
pub fn read_file(path: &Path) -> Result<Option<Vec<Expense>>, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    read_expenses(BufReader::new(file))
        .map(Some)
        .map_err(|e| {
            if e.is_io() {
                StoreError::Io {
                    path: path.to_path_buf(),
                    source: e.into(),
                }
            } else {
                StoreError::Decode {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })
}

/// Overwrite the file at `path` with the full list. Not atomic.
pub fn write_file(path: &Path, expenses: &[Expense]) -> Result<(), StoreError> {
    let io_error = |source: io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);

    write_expenses(&mut writer, expenses).map_err(|e| {
        if e.is_io() {
            io_error(e.into())
        } else {
            StoreError::Encode(e)
        }
    })?;

    writer.flush().map_err(io_error)
}
