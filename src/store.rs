// src/store.rs
// In-memory accumulator between the scrape loop and the writer.

/// CSV-ready post: Author, Timestamp, Body, Quote 1..n
pub type Record = Vec<String>;

/// Fixed leading columns of every record.
pub const BASE_COLUMNS: [&str; 3] = ["author", "timestamp", "body"];

/// Ordered, append-only set of records. Insertion order is output order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Record>,
}

impl DataSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.rows.push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = Record>) {
        self.rows.extend(records);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest record, never narrower than the base columns.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0).max(BASE_COLUMNS.len())
    }

    /// Pad every record with empty strings so all rows share one width.
    pub fn pad_to_width(&mut self) {
        let width = self.width();
        for row in &mut self.rows {
            row.resize(width, s!());
        }
    }

    /// `author,timestamp,body,quote_1..quote_n` sized to the current width.
    pub fn header_row(&self) -> Vec<String> {
        let mut hdr: Vec<String> = BASE_COLUMNS.iter().map(|c| s!(*c)).collect();
        for n in 1..=self.width() - BASE_COLUMNS.len() {
            hdr.push(join!("quote_", &n.to_string()));
        }
        hdr
    }
}
