// csv.rs — RFC-4180-style CSV reading and writing.
//
// Quoted fields may contain the separator, CR/LF, and doubled quotes (`""`).
// Both LF and CRLF record terminators are accepted. The separator is
// configurable (`,` by default, `;` and `\t` are the common alternates).

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("unterminated quoted field starting at row {row}")]
    UnterminatedQuote { row: usize },
    #[error("row {row} has {got} fields, header has {expected}")]
    FieldCountMismatch { row: usize, got: usize, expected: usize },
    #[error("quote inside unquoted field at row {row}")]
    StrayQuote { row: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One parsed record.
pub type Record = Vec<String>;

/// CSV reader over an in-memory string.
pub struct Reader {
    separator: char,
    has_headers: bool,
}

impl Default for Reader {
    fn default() -> Self {
        Self { separator: ',', has_headers: false }
    }
}

/// A fully parsed document. `headers` is empty unless header mode was on.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Document {
    /// Column value by header name for record `row`. Header mode only.
    pub fn field(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.headers.iter().position(|h| h == column)?;
        self.records.get(row)?.get(idx).map(String::as_str)
    }

    /// Record `row` as a header → value map. Header mode only.
    pub fn row_map(&self, row: usize) -> Option<HashMap<&str, &str>> {
        let record = self.records.get(row)?;
        Some(
            self.headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.as_str(), v.as_str()))
                .collect(),
        )
    }
}

impl Reader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn separator(mut self, sep: char) -> Self {
        self.separator = sep;
        self
    }

    /// Treat the first record as a header row. Enables arity checking: every
    /// data record must have as many fields as the header.
    pub fn has_headers(mut self, yes: bool) -> Self {
        self.has_headers = yes;
        self
    }

    /// Parse a whole document from a string.
    pub fn parse(&self, input: &str) -> Result<Document, CsvError> {
        let records = self.parse_records(input)?;
        let mut doc = Document::default();
        let mut iter = records.into_iter();
        if self.has_headers {
            doc.headers = iter.next().unwrap_or_default();
        }
        for (i, record) in iter.enumerate() {
            if self.has_headers && record.len() != doc.headers.len() {
                return Err(CsvError::FieldCountMismatch {
                    // +2: one for the header row, one for 1-based numbering.
                    row: i + 2,
                    got: record.len(),
                    expected: doc.headers.len(),
                });
            }
            doc.records.push(record);
        }
        Ok(doc)
    }

    /// Parse from any reader.
    pub fn parse_reader<R: std::io::Read>(&self, mut r: R) -> Result<Document, CsvError> {
        let mut buf = String::new();
        r.read_to_string(&mut buf)?;
        self.parse(&buf)
    }

    fn parse_records(&self, input: &str) -> Result<Vec<Record>, CsvError> {
        let mut records = Vec::new();
        let mut record: Record = Vec::new();
        let mut field = String::new();
        let mut row = 1usize;
        let mut in_quotes = false;
        // True once the current field began with a quote; a later bare quote
        // inside it is either an escaped quote or the closing quote.
        let mut field_was_quoted = false;

        let mut chars = input.chars().peekable();
        while let Some(c) = chars.next() {
            if in_quotes {
                match c {
                    '"' => {
                        if chars.peek() == Some(&'"') {
                            chars.next();
                            field.push('"');
                        } else {
                            in_quotes = false;
                        }
                    }
                    _ => field.push(c),
                }
                continue;
            }
            match c {
                '"' => {
                    if field.is_empty() && !field_was_quoted {
                        in_quotes = true;
                        field_was_quoted = true;
                    } else {
                        return Err(CsvError::StrayQuote { row });
                    }
                }
                c if c == self.separator => {
                    record.push(std::mem::take(&mut field));
                    field_was_quoted = false;
                }
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                    field_was_quoted = false;
                    row += 1;
                }
                '\n' => {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                    field_was_quoted = false;
                    row += 1;
                }
                _ => field.push(c),
            }
        }
        if in_quotes {
            return Err(CsvError::UnterminatedQuote { row });
        }
        // Final record without trailing newline.
        if !field.is_empty() || !record.is_empty() || field_was_quoted {
            record.push(field);
            records.push(record);
        }
        Ok(records)
    }
}

/// CSV writer accumulating into a string.
pub struct Writer {
    separator: char,
    out: String,
}

impl Default for Writer {
    fn default() -> Self {
        Self { separator: ',', out: String::new() }
    }
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn separator(mut self, sep: char) -> Self {
        self.separator = sep;
        self
    }

    /// Append one record. Fields are quoted only when they contain the
    /// separator, a quote, or a line break.
    pub fn write_record<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut first = true;
        for f in fields {
            if !first {
                self.out.push(self.separator);
            }
            first = false;
            self.out.push_str(&self.escape(f.as_ref()));
        }
        self.out.push('\n');
    }

    fn escape(&self, field: &str) -> String {
        let needs_quoting =
            field.contains(self.separator) || field.contains('"') || field.contains(['\r', '\n']);
        if needs_quoting {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
