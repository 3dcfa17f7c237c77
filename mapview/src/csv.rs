//! CSV export and import of hotspot lists.
//!
//! Export writes one row per active hotspot under the fixed header
//! `x,y,title,label,url,color`, coordinates with two decimals, `\n` line
//! endings and standard quoting. Import maps columns by header name so
//! reordered or extra columns are tolerated; only `x` and `y` are required.
//! An import either yields every row or fails with the first problem found.

#[cfg(test)]
#[path = "csv_test.rs"]
mod csv_test;

use std::collections::HashMap;

use crate::consts::{DEFAULT_HOTSPOT_COLOR, MAX_PERCENT};
use crate::hotspot::{Hotspot, HotspotModel, is_hex_color};

/// Export header, in column order.
pub const CSV_HEADER: [&str; 6] = ["x", "y", "title", "label", "url", "color"];

/// Columns an import cannot do without.
const REQUIRED_COLUMNS: [&str; 2] = ["x", "y"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("no active hotspots to export")]
    NothingToExport,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImportError {
    #[error("CSV has no header row")]
    MissingHeader,
    #[error("CSV header is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },
    #[error("row {row}: `{column}` is not a number: {value:?}")]
    InvalidNumber { row: usize, column: &'static str, value: String },
    #[error("row {row}: `{column}` must be between 0 and 100, got {value}")]
    OutOfRange { row: usize, column: &'static str, value: f64 },
    #[error("row {row}: invalid color {value:?}, expected #rrggbb")]
    InvalidColor { row: usize, value: String },
    #[error("row {row}: invalid active flag {value:?}")]
    InvalidBool { row: usize, value: String },
}

/// File name for an export taken at `timestamp_ms` (unix milliseconds).
#[must_use]
pub fn export_filename(timestamp_ms: u128) -> String {
    format!("hotspots_{timestamp_ms}.csv")
}

// =============================================================
// Export
// =============================================================

impl HotspotModel {
    /// Header row followed by one row per active hotspot.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NothingToExport`] when no hotspot is active.
    pub fn to_csv_rows(&self) -> Result<Vec<Vec<String>>, ExportError> {
        if self.active_count() == 0 {
            return Err(ExportError::NothingToExport);
        }
        let mut rows = Vec::with_capacity(self.active_count() + 1);
        rows.push(CSV_HEADER.iter().map(|c| (*c).to_owned()).collect());
        for h in self.active() {
            rows.push(vec![
                format!("{:.2}", h.x),
                format!("{:.2}", h.y),
                h.title.clone(),
                h.label.clone(),
                h.url.clone(),
                h.color.clone(),
            ]);
        }
        Ok(rows)
    }

    /// The full CSV document for export.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::NothingToExport`] when no hotspot is active.
    pub fn to_csv(&self) -> Result<String, ExportError> {
        Ok(encode_csv(&self.to_csv_rows()?))
    }

    /// Model holding the hotspots described by parsed CSV rows, header first.
    ///
    /// # Errors
    ///
    /// Returns an [`ImportError`] naming the first missing column or bad value.
    pub fn from_csv_rows(rows: &[Vec<String>]) -> Result<Self, ImportError> {
        let mut rows = rows.iter().enumerate().filter(|(_, row)| !is_blank(row));
        let Some((_, header)) = rows.next() else {
            return Err(ImportError::MissingHeader);
        };
        let columns = Columns::from_header(header)?;

        let mut hotspots = Vec::new();
        for (index, row) in rows {
            hotspots.push(columns.hotspot(row, index + 1)?);
        }
        Ok(Self::from_hotspots(hotspots))
    }

    /// Parse CSV text into a model.
    ///
    /// # Errors
    ///
    /// Returns an [`ImportError`] for malformed CSV or invalid rows.
    pub fn from_csv(text: &str) -> Result<Self, ImportError> {
        Self::from_csv_rows(&parse_csv(text)?)
    }
}

/// Quote a field when it holds a delimiter, quote or line break.
#[must_use]
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

/// Join rows into CSV text with `\n` line endings and no trailing newline.
#[must_use]
pub fn encode_csv(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| row.iter().map(|f| escape_field(f)).collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================
// Import
// =============================================================

/// Split CSV text into rows of fields.
///
/// Handles quoted fields with doubled quotes and embedded line breaks, `\n`
/// and `\r\n` endings, and a leading byte-order mark.
///
/// # Errors
///
/// Returns [`ImportError::UnterminatedQuote`] if a quoted field never closes.
pub fn parse_csv(text: &str) -> Result<Vec<Vec<String>>, ImportError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quote_line = 0;
    let mut line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                quote_line = line;
            }
            ',' => row.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                line += 1;
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(ImportError::UnterminatedQuote { line: quote_line });
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    Ok(rows)
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|f| f.trim().is_empty())
}

/// Header positions of the columns an import understands.
struct Columns {
    index: HashMap<&'static str, usize>,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self, ImportError> {
        let mut index = HashMap::new();
        for (i, name) in header.iter().enumerate() {
            let key = match name.trim().to_ascii_lowercase().as_str() {
                "x" => "x",
                "y" => "y",
                "id" => "id",
                "title" => "title",
                "label" => "label",
                "url" | "blogurl" => "url",
                "color" => "color",
                "active" => "active",
                _ => continue,
            };
            index.entry(key).or_insert(i);
        }

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !index.contains_key(*c))
            .map(|c| (*c).to_owned())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }
        Ok(Self { index })
    }

    /// Raw cell text. Free-text columns keep their surrounding spaces.
    fn text<'a>(&self, row: &'a [String], column: &str) -> &'a str {
        self.index.get(column).and_then(|&i| row.get(i)).map_or("", String::as_str)
    }

    /// Trimmed cell text for numeric, flag, color and id columns.
    fn cell<'a>(&self, row: &'a [String], column: &str) -> &'a str {
        self.text(row, column).trim()
    }

    fn percent(&self, row: &[String], column: &'static str, row_number: usize) -> Result<f64, ImportError> {
        let raw = self.cell(row, column);
        let value: f64 = raw.parse().map_err(|_| ImportError::InvalidNumber {
            row: row_number,
            column,
            value: raw.to_owned(),
        })?;
        if !(0.0..=MAX_PERCENT).contains(&value) {
            return Err(ImportError::OutOfRange { row: row_number, column, value });
        }
        Ok(value)
    }

    fn hotspot(&self, row: &[String], row_number: usize) -> Result<Hotspot, ImportError> {
        let mut hotspot = Hotspot::new(self.percent(row, "x", row_number)?, self.percent(row, "y", row_number)?);

        let id = self.cell(row, "id");
        if !id.is_empty() {
            id.clone_into(&mut hotspot.id);
        }
        self.text(row, "title").clone_into(&mut hotspot.title);
        self.text(row, "label").clone_into(&mut hotspot.label);
        self.text(row, "url").clone_into(&mut hotspot.url);

        let color = self.cell(row, "color");
        if color.is_empty() {
            hotspot.color = DEFAULT_HOTSPOT_COLOR.to_owned();
        } else if is_hex_color(color) {
            hotspot.color = color.to_ascii_lowercase();
        } else {
            return Err(ImportError::InvalidColor { row: row_number, value: color.to_owned() });
        }

        hotspot.active = match self.cell(row, "active").to_ascii_lowercase().as_str() {
            "" | "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            other => return Err(ImportError::InvalidBool { row: row_number, value: other.to_owned() }),
        };
        Ok(hotspot)
    }
}
