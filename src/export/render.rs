//! Materializes a shaped table as downloadable bytes. The format choice is
//! orthogonal to record shaping: delimited text or a packed spreadsheet.

use super::error::ExportError;
use super::records::ExportTable;
use rust_xlsxwriter::{Format, Workbook};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl Default for ExportFormat {
    fn default() -> Self {
        Self::Csv
    }
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportFile {
    pub data: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

pub fn render(
    table: &ExportTable,
    format: ExportFormat,
    basename: &str,
) -> Result<ExportFile, ExportError> {
    let data = match format {
        ExportFormat::Csv => render_csv(table)?,
        ExportFormat::Xlsx => render_xlsx(table)?,
    };
    Ok(ExportFile {
        data,
        content_type: format.content_type(),
        filename: format!("{basename}.{}", format.extension()),
    })
}

fn render_csv(table: &ExportTable) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&table.headers)
        .map_err(|e| ExportError::RenderFailed(e.to_string()))?;
    for row in &table.rows {
        writer
            .write_record(row)
            .map_err(|e| ExportError::RenderFailed(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::RenderFailed(e.to_string()))
}

fn render_xlsx(table: &ExportTable) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col, header) in table.headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, header.as_str(), &header_format)
            .map_err(|e| ExportError::RenderFailed(e.to_string()))?;
    }
    for (row_idx, row) in table.rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            worksheet
                .write_string((row_idx + 1) as u32, col as u16, cell.as_str())
                .map_err(|e| ExportError::RenderFailed(e.to_string()))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ExportError::RenderFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ExportTable {
        ExportTable {
            headers: vec!["Nome".to_string(), "Valor".to_string()],
            rows: vec![
                vec!["João, Silva".to_string(), "100.00".to_string()],
                vec!["Maria".to_string(), "250.50".to_string()],
            ],
        }
    }

    #[test]
    fn csv_has_header_row_first_and_quotes_commas() {
        let file = render(&table(), ExportFormat::Csv, "leads").unwrap();
        assert_eq!(file.content_type, "text/csv");
        assert_eq!(file.filename, "leads.csv");

        let text = String::from_utf8(file.data).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "Nome,Valor");
        assert_eq!(lines.next().unwrap(), "\"João, Silva\",100.00");
    }

    #[test]
    fn xlsx_produces_a_workbook() {
        let file = render(&table(), ExportFormat::Xlsx, "leads").unwrap();
        assert_eq!(file.filename, "leads.xlsx");
        // XLSX containers are zip archives.
        assert_eq!(&file.data[..2], b"PK");
    }
}
