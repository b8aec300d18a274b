/// Header row plus data rows, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn new(header: &[&str]) -> Self {
        Self {
            header: header.iter().map(|column| column.to_string()).collect(),
            rows: vec![],
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Header first, then the data rows.
    pub fn all_rows(&self) -> impl Iterator<Item = &Vec<String>> {
        std::iter::once(&self.header).chain(self.rows.iter())
    }

    /// Number of data rows; the header is not counted.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
