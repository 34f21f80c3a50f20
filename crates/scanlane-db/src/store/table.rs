//! Row reader and writer shared by the stores.
//!
//! Files are comma-delimited with one header row. Fields are trimmed, blank
//! lines are skipped and no quoting is supported.

use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{DbError, DbResult};

/// One data row, with its 1-based line number for error reporting.
#[derive(Debug)]
pub(crate) struct Row<'a> {
    pub line: usize,
    fields: Vec<&'a str>,
    path: &'a Path,
}

impl<'a> Row<'a> {
    /// Raw field at `index`.
    pub fn field(&self, index: usize, name: &str) -> DbResult<&'a str> {
        self.fields.get(index).copied().ok_or_else(|| {
            DbError::parse(
                self.path,
                self.line,
                format!("missing column '{name}' (found {} columns)", self.fields.len()),
            )
        })
    }

    /// Fields from `index` to the end of the row.
    pub fn rest(&self, index: usize) -> &[&'a str] {
        self.fields.get(index..).unwrap_or(&[])
    }

    /// Field at `index` parsed as `T`.
    pub fn parse<T>(&self, index: usize, name: &str) -> DbResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.field(index, name)?;
        raw.parse::<T>().map_err(|e| {
            DbError::parse(self.path, self.line, format!("bad {name} '{raw}': {e}"))
        })
    }
}

/// Reads a whole file into memory.
pub(crate) fn read_file(path: &Path) -> DbResult<String> {
    fs::read_to_string(path).map_err(|e| DbError::io(path, e))
}

/// Splits file contents into data rows, skipping the header and blank lines.
pub(crate) fn rows<'a>(path: &'a Path, contents: &'a str) -> impl Iterator<Item = Row<'a>> + 'a {
    contents
        .lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(move |(index, line)| Row {
            line: index + 1,
            fields: line.split(',').map(str::trim).collect(),
            path,
        })
}

/// Writes a header and rows, creating missing parent directories.
pub(crate) fn write_file<I>(path: &Path, header: &str, rows: I) -> DbResult<()>
where
    I: IntoIterator<Item = String>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| DbError::io(parent, e))?;
    }

    let mut out = String::from(header);
    out.push('\n');
    for row in rows {
        out.push_str(&row);
        out.push('\n');
    }
    fs::write(path, out).map_err(|e| DbError::io(path, e))
}
