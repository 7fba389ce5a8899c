use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::io::Cursor;

use super::config::PdfConfig;
use super::error::ExportResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const GREEN: Rgb = Rgb(46, 204, 113);
    pub const RED: Rgb = Rgb(231, 76, 60);
    pub const SLATE: Rgb = Rgb(44, 62, 80);
    pub const STEEL_BLUE: Rgb = Rgb(41, 128, 185);
    pub const MUTED: Rgb = Rgb(150, 150, 150);

    /// Green for non-negative amounts, red otherwise.
    pub fn for_amount(amount: Decimal) -> Rgb {
        if amount.is_sign_negative() && !amount.is_zero() {
            Rgb::RED
        } else {
            Rgb::GREEN
        }
    }

    pub fn to_typst(&self) -> String {
        format!("rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAlign {
    Left,
    Center,
    Right,
}

impl ColumnAlign {
    pub fn to_typst(&self) -> &'static str {
        match self {
            ColumnAlign::Left => "left",
            ColumnAlign::Center => "center",
            ColumnAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnWidth {
    Auto,
    Fill,
    Fixed(f32), // pt
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub color: Option<Rgb>,
    pub bold: bool,
    pub align: Option<ColumnAlign>,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Cell {
            text: text.into(),
            color: None,
            bold: false,
            align: None,
        }
    }

    pub fn blank() -> Self {
        Cell::new("")
    }

    pub fn colored(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn aligned(mut self, align: ColumnAlign) -> Self {
        self.align = Some(align);
        self
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::new(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::new(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableStyle {
    /// Ruled table with a filled header row.
    Grid { header_fill: Rgb },
    /// No rules, no header fill.
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablePlacement {
    FullWidth,
    /// Shrinks to its content and hugs the right margin.
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub footer: Vec<Vec<Cell>>,
    pub column_widths: Option<Vec<ColumnWidth>>,
    pub alignment: Option<Vec<ColumnAlign>>,
    pub style: TableStyle,
    pub placement: TablePlacement,
}

impl TableData {
    pub fn new(headers: Vec<String>) -> Self {
        TableData {
            headers,
            rows: Vec::new(),
            footer: Vec::new(),
            column_widths: None,
            alignment: None,
            style: TableStyle::Grid {
                header_fill: Rgb::SLATE,
            },
            placement: TablePlacement::FullWidth,
        }
    }

    pub fn add_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn add_footer_row(&mut self, row: Vec<Cell>) {
        self.footer.push(row);
    }

    pub fn with_column_widths(mut self, widths: Vec<ColumnWidth>) -> Self {
        self.column_widths = Some(widths);
        self
    }

    pub fn with_alignment(mut self, alignment: Vec<ColumnAlign>) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_placement(mut self, placement: TablePlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Number of columns, taken from the headers or the widest row.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .chain(self.footer.iter())
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }

    pub fn column_align(&self, col: usize) -> ColumnAlign {
        self.alignment
            .as_ref()
            .and_then(|a| a.get(col).copied())
            .unwrap_or(ColumnAlign::Left)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub text: String,
    pub size: f32,
    pub bold: bool,
    pub align: ColumnAlign,
}

impl Heading {
    pub fn new(text: impl Into<String>, size: f32) -> Self {
        Heading {
            text: text.into(),
            size,
            bold: false,
            align: ColumnAlign::Center,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn aligned(mut self, align: ColumnAlign) -> Self {
        self.align = align;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(Heading),
    Table(TableData),
    /// Embedded asset, scaled to a percentage of the text width.
    Image { asset: String, width_percent: f32 },
    Spacing(f32), // pt
}

/// Drawn on every page: page counter plus an optional generation stamp.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFooter {
    pub generated_on: Option<String>,
    pub page_label: String,
    pub of_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMetadata {
    pub title: String,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        DocumentMetadata {
            title: "Document".to_string(),
            author: None,
            created_at: Utc::now(),
        }
    }
}

/// Backend-neutral description of a document to build.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub metadata: DocumentMetadata,
    pub page: PdfConfig,
    pub running_header: Option<Heading>,
    pub footer: Option<PageFooter>,
    pub blocks: Vec<Block>,
    pub assets: Vec<Asset>,
}

impl DocumentLayout {
    pub fn new(title: impl Into<String>, page: PdfConfig) -> Self {
        DocumentLayout {
            metadata: DocumentMetadata {
                title: title.into(),
                ..DocumentMetadata::default()
            },
            page,
            running_header: None,
            footer: None,
            blocks: Vec::new(),
            assets: Vec::new(),
        }
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableData> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }

    pub fn headings(&self) -> impl Iterator<Item = &Heading> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Heading(heading) => Some(heading),
            _ => None,
        })
    }
}

/// Visual template of one record, ready to be rasterized.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateView {
    pub template_id: String,
    pub markup: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl RasterImage {
    /// Reads the pixel dimensions from the PNG header.
    pub fn from_png(png: Vec<u8>) -> ExportResult<Self> {
        let (width, height) = image::io::Reader::with_format(Cursor::new(&png), image::ImageFormat::Png)
            .into_dimensions()?;

        Ok(RasterImage { png, width, height })
    }

    /// Height that keeps the aspect ratio at the given width.
    pub fn scaled_height(&self, width: f32) -> f32 {
        if self.width == 0 {
            return 0.0;
        }
        self.height as f32 * width / self.width as f32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SheetValue {
    Text(String),
    Integer(i64),
    Amount(Decimal),
    Blank,
}

impl SheetValue {
    pub fn is_blank(&self) -> bool {
        match self {
            SheetValue::Blank => true,
            SheetValue::Text(text) => text.is_empty(),
            _ => false,
        }
    }
}

/// One worksheet: a header row followed by records.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<SheetValue>>,
    pub column_widths: Vec<(u16, f64)>,
}

impl SheetLayout {
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        SheetLayout {
            name: name.into(),
            headers,
            rows: Vec::new(),
            column_widths: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<SheetValue>) {
        self.rows.push(row);
    }

    /// Value of `header` in the given data row.
    pub fn value(&self, row: usize, header: &str) -> Option<&SheetValue> {
        let col = self.headers.iter().position(|h| h == header)?;
        self.rows.get(row)?.get(col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_counts_as_non_negative() {
        assert_eq!(Rgb::for_amount(dec!(0)), Rgb::GREEN);
        assert_eq!(Rgb::for_amount(dec!(-0.00)), Rgb::GREEN);
        assert_eq!(Rgb::for_amount(dec!(-0.01)), Rgb::RED);
        assert_eq!(Rgb::for_amount(dec!(12.5)), Rgb::GREEN);
    }

    #[test]
    fn column_count_covers_headerless_tables() {
        let mut table = TableData::new(Vec::new()).with_style(TableStyle::Plain);
        table.add_row(vec![Cell::new("Total Income"), Cell::new("₹100.00")]);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column_align(1), ColumnAlign::Left);
    }

    #[test]
    fn raster_dimensions_come_from_png_header() {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(300, 150));
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
            .unwrap();

        let raster = RasterImage::from_png(png).unwrap();
        assert_eq!((raster.width, raster.height), (300, 150));
        assert_eq!(raster.scaled_height(210.0), 105.0);
    }

    #[test]
    fn garbage_is_not_a_raster() {
        assert!(RasterImage::from_png(b"not a png".to_vec()).is_err());
    }

    #[test]
    fn sheet_lookup_by_header() {
        let mut sheet = SheetLayout::new("Receipts", vec!["Receipt No.".into(), "Amount".into()]);
        sheet.add_row(vec![SheetValue::Integer(1), SheetValue::Amount(dec!(75))]);

        assert_eq!(sheet.value(0, "Amount"), Some(&SheetValue::Amount(dec!(75))));
        assert_eq!(sheet.value(0, "Missing"), None);
        assert_eq!(sheet.value(1, "Amount"), None);
    }
}
