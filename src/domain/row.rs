/// Sheet rows above the first data row.
pub const HEADER_ROWS: usize = 1;

/// One company to profile. `row_index` is the 1-based sheet row the result is written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub company_name: String,
    pub website: String,
    pub row_index: usize,
}

pub fn rows_from_sheet(values: &[Vec<String>]) -> Vec<Row> {
    values
        .iter()
        .enumerate()
        .skip(HEADER_ROWS)
        .map(|(i, cells)| Row {
            company_name: cells.first().cloned().unwrap_or_default(),
            website: cells.get(1).cloned().unwrap_or_default(),
            row_index: i + 1,
        })
        .collect()
}

/// The template lives in the first cell of the row below the prompt sheet's header.
pub fn prompt_template_from_sheet(values: &[Vec<String>]) -> Option<String> {
    values.get(HEADER_ROWS)?.first().cloned()
}
