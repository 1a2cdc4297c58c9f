use crate::process::shape::Shape;
use crate::process::utils::clean_str;

/// One table as handed over by the extractor: header labels plus string cells,
/// addressed by position only.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Column labels as extracted. May be blank, duplicated or carry
    /// `Unnamed: N` / `.N` artifacts.
    pub headers: Vec<String>,
    /// Data rows, each padded to `headers.len()`.
    pub rows: Vec<Vec<String>>,
    /// Where the table came from (file name, page), for error messages.
    pub source: String,
}

impl RawTable {
    /// Build a table, cleaning every cell and padding ragged rows with blanks
    /// so the matrix is rectangular.
    pub fn new(source: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(headers.len()))
            .max()
            .unwrap_or(0);

        let pad = |cells: Vec<String>| -> Vec<String> {
            let mut cells: Vec<String> = cells.iter().map(|c| clean_str(c)).collect();
            cells.resize(width, String::new());
            cells
        };

        Self {
            headers: pad(headers),
            rows: rows.into_iter().map(pad).collect(),
            source: source.into(),
        }
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows.len(), self.headers.len())
    }

    /// First few rows, tab-separated, for diagnostics.
    pub fn excerpt(&self, max_rows: usize) -> String {
        let mut out = self.headers.join("\t");
        for row in self.rows.iter().take(max_rows) {
            out.push('\n');
            out.push_str(&row.join("\t"));
        }
        if self.rows.len() > max_rows {
            out.push_str(&format!("\n… {} more rows", self.rows.len() - max_rows));
        }
        out
    }

    /// Column `idx` top to bottom.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |r| r[idx].as_str())
    }

    /// A new table holding columns `[start, end)` of every row, relabelled.
    pub fn select_columns(&self, start: usize, end: usize, headers: Vec<String>) -> RawTable {
        RawTable {
            headers,
            rows: self.rows.iter().map(|r| r[start..end].to_vec()).collect(),
            source: self.source.clone(),
        }
    }
}
