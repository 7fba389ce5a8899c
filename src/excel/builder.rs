use crate::core::{ExportResult, SheetLayout};
use crate::excel::ExcelGenerator;

const MAX_SHEET_NAME: usize = 31;
const FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Excel rejects names over 31 chars, the characters `[]:*?/\`, a leading
/// or trailing apostrophe and the reserved name "History".
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .take(MAX_SHEET_NAME)
        .collect();
    let cleaned = cleaned.trim_matches('\'').trim().to_string();

    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("history") {
        "Sheet1".to_string()
    } else {
        cleaned
    }
}

pub struct ExcelBuilder {
    generator: ExcelGenerator,
    current_row: u32,
}

impl ExcelBuilder {
    pub fn new() -> Self {
        ExcelBuilder {
            generator: ExcelGenerator::new(),
            current_row: 0,
        }
    }

    /// Builds a single-sheet workbook for `sheet`.
    pub fn from_sheet(sheet: &SheetLayout) -> ExportResult<Vec<u8>> {
        let mut builder = ExcelBuilder::new();
        builder
            .new_sheet(&sheet.name)?
            .add_records(sheet)?
            .freeze_top_row()?
            .set_column_widths(&sheet.column_widths)?;
        builder.finish()
    }

    pub fn new_sheet(&mut self, name: &str) -> ExportResult<&mut Self> {
        self.generator.add_worksheet(&sanitize_sheet_name(name))?;
        self.current_row = 0;
        Ok(self)
    }

    /// Header row followed by one row per record.
    pub fn add_records(&mut self, sheet: &SheetLayout) -> ExportResult<&mut Self> {
        let header_format = self.generator.create_header_format();
        for (col, header) in sheet.headers.iter().enumerate() {
            self.generator
                .write_with_format(self.current_row, col as u16, header, &header_format)?;
        }
        self.current_row += 1;

        let cell_format = self.generator.create_cell_format();
        let amount_format = self.generator.create_amount_format();
        for row in &sheet.rows {
            for (col, value) in row.iter().enumerate() {
                self.generator.write_value(
                    self.current_row,
                    col as u16,
                    value,
                    &cell_format,
                    &amount_format,
                )?;
            }
            self.current_row += 1;
        }

        Ok(self)
    }

    pub fn set_column_widths(&mut self, widths: &[(u16, f64)]) -> ExportResult<&mut Self> {
        for (col, width) in widths {
            self.generator.set_column_width(*col, *width)?;
        }
        Ok(self)
    }

    pub fn freeze_top_row(&mut self) -> ExportResult<&mut Self> {
        self.generator.freeze_panes(1, 0)?;
        Ok(self)
    }

    pub fn finish(self) -> ExportResult<Vec<u8>> {
        self.generator.save_to_buffer()
    }
}

impl Default for ExcelBuilder {
    fn default() -> Self {
        Self::new()
    }
}
