use crate::core::{ExportError, ExportResult, SheetValue};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet};

/// Thin wrapper over `rust_xlsxwriter` that builds a workbook in memory.
pub struct ExcelGenerator {
    workbook: Workbook,
    current_sheet: Option<Worksheet>,
}

impl ExcelGenerator {
    pub fn new() -> Self {
        ExcelGenerator {
            workbook: Workbook::new(),
            current_sheet: None,
        }
    }

    pub fn add_worksheet(&mut self, name: &str) -> ExportResult<()> {
        if let Some(sheet) = self.current_sheet.take() {
            self.workbook.push_worksheet(sheet);
        }

        let mut worksheet = Worksheet::new();
        worksheet.set_name(name)?;

        self.current_sheet = Some(worksheet);
        Ok(())
    }

    pub fn get_current_sheet_mut(&mut self) -> ExportResult<&mut Worksheet> {
        self.current_sheet
            .as_mut()
            .ok_or_else(|| ExportError::Generation("no active worksheet".to_string()))
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) -> ExportResult<()> {
        self.get_current_sheet_mut()?.set_column_width(col, width)?;
        Ok(())
    }

    pub fn create_header_format(&self) -> Format {
        Format::new()
            .set_bold()
            .set_background_color(Color::RGB(0xE0E0E0))
            .set_border(FormatBorder::Thin)
    }

    pub fn create_cell_format(&self) -> Format {
        Format::new().set_border(FormatBorder::Thin)
    }

    pub fn create_amount_format(&self) -> Format {
        Format::new()
            .set_num_format("#,##0.00")
            .set_border(FormatBorder::Thin)
    }

    pub fn write_with_format(&mut self, row: u32, col: u16, text: &str, format: &Format) -> ExportResult<()> {
        self.get_current_sheet_mut()?
            .write_string_with_format(row, col, text, format)?;
        Ok(())
    }

    /// Writes one typed value; amounts use `amount_format`, the rest `format`.
    pub fn write_value(
        &mut self,
        row: u32,
        col: u16,
        value: &SheetValue,
        format: &Format,
        amount_format: &Format,
    ) -> ExportResult<()> {
        let sheet = self.get_current_sheet_mut()?;
        match value {
            SheetValue::Text(text) => {
                sheet.write_string_with_format(row, col, text, format)?;
            }
            SheetValue::Integer(n) => {
                sheet.write_number_with_format(row, col, *n as f64, format)?;
            }
            SheetValue::Amount(amount) => {
                let number = amount.to_f64().ok_or_else(|| {
                    ExportError::Generation(format!("amount {} does not fit a spreadsheet number", amount))
                })?;
                sheet.write_number_with_format(row, col, number, amount_format)?;
            }
            SheetValue::Blank => {
                sheet.write_blank(row, col, format)?;
            }
        }
        Ok(())
    }

    pub fn freeze_panes(&mut self, row: u32, col: u16) -> ExportResult<()> {
        self.get_current_sheet_mut()?.set_freeze_panes(row, col)?;
        Ok(())
    }

    pub fn save_to_buffer(mut self) -> ExportResult<Vec<u8>> {
        if let Some(sheet) = self.current_sheet.take() {
            self.workbook.push_worksheet(sheet);
        }

        let buffer = self.workbook.save_to_buffer()?;
        Ok(buffer)
    }
}

impl Default for ExcelGenerator {
    fn default() -> Self {
        Self::new()
    }
}
