//! Layouts of the four exports, independent of the rendering backend.

use chrono::NaiveDate;

use crate::core::{
    Asset, Block, Cell, ColumnAlign, ColumnWidth, DocumentLayout, Heading, Margin, PageFooter,
    PageSize, PdfConfig, RasterImage, Rgb, SheetLayout, SheetValue, TableData, TablePlacement,
    TableStyle,
};
use crate::locale::{keys, Translator};
use crate::models::{Receipt, SocietyInfo};
use crate::statement::{
    format_amount, format_date, format_money, format_signed, ledger_total, StatementTotals,
    Transaction,
};

pub const RECEIPT_IMAGE_ASSET: &str = "receipt.png";

/// Shared inputs of the PDF layouts.
pub struct LayoutContext<'a> {
    pub society: &'a SocietyInfo,
    pub currency_symbol: &'a str,
    pub page: &'a PdfConfig,
    pub translator: &'a dyn Translator,
}

impl<'a> LayoutContext<'a> {
    fn t(&self, key: &str) -> String {
        self.translator.translate(key)
    }

    fn society_header(&self, doc: &mut DocumentLayout) {
        doc.push(Block::Heading(Heading::new(&self.society.name, 16.0).bold()))
            .push(Block::Heading(Heading::new(&self.society.sub_name, 10.0)))
            .push(Block::Heading(Heading::new(&self.society.address, 10.0)))
            .push(Block::Spacing(8.0));
    }
}

pub fn statement_document(
    ctx: &LayoutContext<'_>,
    transactions: &[Transaction],
    totals: &StatementTotals,
    generated_on: NaiveDate,
) -> DocumentLayout {
    let title = ctx.t(keys::STATEMENT_TITLE);
    let mut doc = DocumentLayout::new(title.clone(), ctx.page.clone());
    doc.metadata.author = Some(ctx.society.name.clone());
    ctx.society_header(&mut doc);
    doc.push(Block::Heading(Heading::new(title, 14.0).bold()))
        .push(Block::Spacing(4.0));

    let mut table = TableData::new(vec![
        ctx.t(keys::DATE),
        ctx.t(keys::DESCRIPTION),
        format!("{} ({})", ctx.t(keys::AMOUNT), ctx.currency_symbol),
    ])
    .with_column_widths(vec![ColumnWidth::Auto, ColumnWidth::Fill, ColumnWidth::Auto])
    .with_alignment(vec![ColumnAlign::Left, ColumnAlign::Left, ColumnAlign::Right])
    .with_style(TableStyle::Grid {
        header_fill: Rgb::SLATE,
    });

    for transaction in transactions {
        table.add_row(vec![
            Cell::new(format_date(transaction.date)),
            Cell::new(transaction.description.as_str()),
            Cell::new(format_signed(transaction.amount)).colored(Rgb::for_amount(transaction.amount)),
        ]);
    }
    doc.push(Block::Table(table)).push(Block::Spacing(10.0));

    let mut summary = TableData::new(Vec::new())
        .with_alignment(vec![ColumnAlign::Left, ColumnAlign::Right])
        .with_style(TableStyle::Plain)
        .with_placement(TablePlacement::Right);
    let lines = [
        (keys::TOTAL_INCOME, totals.total_income, Rgb::GREEN),
        (keys::TOTAL_EXPENSE, totals.total_expense, Rgb::RED),
        (keys::NET_BALANCE, totals.net_balance, Rgb::for_amount(totals.net_balance)),
    ];
    for (key, amount, color) in lines {
        summary.add_row(vec![
            Cell::new(ctx.t(key)).bold(),
            Cell::new(format_money(ctx.currency_symbol, amount)).bold().colored(color),
        ]);
    }
    doc.push(Block::Table(summary));

    doc.footer = Some(PageFooter {
        generated_on: Some(format!("{} {}", ctx.t(keys::GENERATED_ON), format_date(generated_on))),
        page_label: ctx.t(keys::PAGE),
        of_label: ctx.t(keys::OF),
    });
    doc
}

pub fn ledger_document(ctx: &LayoutContext<'_>, receipts: &[Receipt]) -> DocumentLayout {
    let title = ctx.t(keys::RECEIPTS);
    let mut doc = DocumentLayout::new(title.clone(), ctx.page.clone());
    doc.metadata.author = Some(ctx.society.name.clone());
    doc.running_header = Some(Heading::new(title, 20.0).aligned(ColumnAlign::Left));

    let mut table = TableData::new(vec![
        ctx.t(keys::RECEIPT_NO),
        ctx.t(keys::RESIDENT_NAME),
        ctx.t(keys::DATE),
        ctx.t(keys::AMOUNT),
    ])
    .with_column_widths(vec![
        ColumnWidth::Auto,
        ColumnWidth::Fill,
        ColumnWidth::Auto,
        ColumnWidth::Auto,
    ])
    .with_alignment(vec![
        ColumnAlign::Left,
        ColumnAlign::Left,
        ColumnAlign::Left,
        ColumnAlign::Right,
    ])
    .with_style(TableStyle::Grid {
        header_fill: Rgb::STEEL_BLUE,
    });

    for receipt in receipts {
        table.add_row(vec![
            Cell::new(receipt.receipt_number.to_string()),
            Cell::new(receipt.name.as_str()),
            Cell::new(format_date(receipt.date)),
            Cell::new(format_amount(receipt.amount)),
        ]);
    }
    table.add_footer_row(vec![
        Cell::new(ctx.t(keys::TOTAL)),
        Cell::blank(),
        Cell::blank(),
        Cell::new(format_amount(ledger_total(receipts))),
    ]);

    doc.push(Block::Table(table));
    doc
}

pub fn receipt_sheet(translator: &dyn Translator, receipts: &[Receipt]) -> SheetLayout {
    let t = |key: &str| translator.translate(key);
    let mut sheet = SheetLayout::new(
        t(keys::RECEIPTS),
        vec![
            t(keys::RECEIPT_NO),
            t(keys::RESIDENT_NAME),
            t(keys::BLOCK_NO),
            t(keys::DATE),
            t(keys::FOR_MONTH),
            t(keys::PAYMENT_METHOD),
            t(keys::AMOUNT),
        ],
    );

    for receipt in receipts {
        sheet.add_row(vec![
            SheetValue::Integer(receipt.receipt_number as i64),
            SheetValue::Text(receipt.name.clone()),
            SheetValue::Text(receipt.block_number.clone()),
            SheetValue::Text(format_date(receipt.date)),
            SheetValue::Text(receipt.for_month.clone()),
            SheetValue::Text(receipt.payment_method.clone()),
            SheetValue::Amount(receipt.amount),
        ]);
    }

    let mut summary = vec![SheetValue::Blank; 6];
    summary.push(SheetValue::Amount(ledger_total(receipts)));
    sheet.add_row(summary);

    sheet.column_widths = vec![(0, 12.0), (1, 28.0), (2, 10.0), (3, 12.0), (4, 16.0), (5, 16.0), (6, 14.0)];
    sheet
}

/// One page exactly as wide as `page_width` mm and as tall as the capture.
pub fn single_receipt_document(receipt_number: u32, image: RasterImage, page_width: f32) -> DocumentLayout {
    // Rounded up so the capture never spills onto a second page
    let page_height = (image.scaled_height(page_width) * 100.0).ceil() / 100.0 + 0.1;

    let page = PdfConfig::builder()
        .page_size(PageSize::Custom(page_width, page_height))
        .margin(Margin::uniform(0.0))
        .build();

    let mut doc = DocumentLayout::new(format!("Receipt-{}", receipt_number), page);
    doc.push(Block::Image {
        asset: RECEIPT_IMAGE_ASSET.to_string(),
        width_percent: 100.0,
    });
    doc.assets.push(Asset {
        name: RECEIPT_IMAGE_ASSET.to_string(),
        bytes: image.png,
    });
    doc
}
