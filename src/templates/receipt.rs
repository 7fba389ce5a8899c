use serde::Serialize;

use super::TemplateEngine;
use crate::core::{ExportResult, TemplateView};
use crate::locale::{keys, Translator};
use crate::models::{Receipt, Settings, SocietyInfo};
use crate::statement::{format_amount, format_date};

pub const RECEIPT_TEMPLATE_ID: &str = "receipt";

/// Printable maintenance receipt. Every interpolated value goes through the
/// `typst` filter, so the template only contains trusted markup.
pub const RECEIPT_TEMPLATE: &str = r#"#set document(title: {{ title | typst }})
#set page(width: 148mm, height: auto, margin: 10mm, fill: white)
#set text(size: 10pt)

#align(center)[
  #text(size: 15pt, weight: "bold", {{ society.name | typst }})
  #linebreak()
  #text(size: 8pt, {{ society.sub_name | typst }})
  #linebreak()
  #text(size: 8pt, {{ society.address | typst }})
]

#v(6pt)
#align(center, rect(stroke: 1.5pt, radius: 3pt, inset: 5pt, text(size: 12pt, weight: "bold", {{ labels.heading | typst }})))
#v(8pt)

#grid(
  columns: (1fr, 1fr),
  row-gutter: 8pt,
  [#text(weight: "bold", {{ labels.receipt_no | typst }}): #{{ receipt.number | typst }}],
  align(right)[#text(weight: "bold", {{ labels.date | typst }}): #{{ receipt.date | typst }}],
  [#text(weight: "bold", {{ labels.resident_name | typst }}): #{{ receipt.name | typst }}],
  align(right)[#text(weight: "bold", {{ labels.block_no | typst }}): #{{ receipt.block_number | typst }}],
  [#text(weight: "bold", {{ labels.for_month | typst }}): #{{ receipt.for_month | typst }}],
  align(right)[#text(weight: "bold", {{ labels.payment_method | typst }}): #{{ receipt.payment_method | typst }}],
)

#v(10pt)
#line(length: 100%, stroke: 0.5pt)
#v(6pt)

#align(right, rect(fill: rgb(240, 240, 240), stroke: 1pt + gray, radius: 3pt, inset: 8pt, text(size: 12pt, weight: "bold", {{ (labels.amount ~ ": " ~ (receipt.amount | money(currency_symbol))) | typst }})))

#v(24pt)
#align(right, box(width: 45%)[
  #line(length: 100%, stroke: 0.5pt)
  #align(center, text(size: 9pt, {{ labels.signatory | typst }}))
{%- if settings.treasurer_name %}
  #align(center, text(size: 9pt, weight: "bold", {{ settings.treasurer_name | typst }}))
{%- endif %}
])
{%- if settings.footer_note %}

#v(8pt)
#align(center, text(size: 8pt, fill: gray, style: "italic", {{ settings.footer_note | typst }}))
{%- endif %}
"#;

#[derive(Debug, Serialize)]
struct ReceiptLabels {
    heading: String,
    receipt_no: String,
    date: String,
    resident_name: String,
    block_no: String,
    for_month: String,
    payment_method: String,
    amount: String,
    signatory: String,
}

#[derive(Debug, Serialize)]
struct ReceiptFields<'a> {
    number: String,
    date: String,
    name: &'a str,
    block_number: &'a str,
    for_month: &'a str,
    payment_method: &'a str,
    amount: String,
}

#[derive(Debug, Serialize)]
struct SettingsFields<'a> {
    treasurer_name: Option<&'a str>,
    footer_note: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ReceiptContext<'a> {
    title: String,
    society: &'a SocietyInfo,
    receipt: ReceiptFields<'a>,
    settings: SettingsFields<'a>,
    labels: ReceiptLabels,
    currency_symbol: &'a str,
}

/// Inputs of the receipt template besides the receipt itself.
pub struct ReceiptTemplate<'a> {
    pub society: &'a SocietyInfo,
    pub currency_symbol: &'a str,
    pub translator: &'a dyn Translator,
}

impl<'a> ReceiptTemplate<'a> {
    pub fn render(
        &self,
        engine: &TemplateEngine,
        receipt: &Receipt,
        settings: &Settings,
    ) -> ExportResult<TemplateView> {
        let t = |key: &str| self.translator.translate(key);

        let context = ReceiptContext {
            title: format!("Receipt-{}", receipt.receipt_number),
            society: self.society,
            receipt: ReceiptFields {
                number: receipt.receipt_number.to_string(),
                date: format_date(receipt.date),
                name: &receipt.name,
                block_number: &receipt.block_number,
                for_month: &receipt.for_month,
                payment_method: &receipt.payment_method,
                amount: format_amount(receipt.amount),
            },
            settings: SettingsFields {
                treasurer_name: settings.treasurer_name.as_deref(),
                footer_note: settings.footer_note.as_deref(),
            },
            labels: ReceiptLabels {
                heading: t(keys::MAINTENANCE_RECEIPT),
                receipt_no: t(keys::RECEIPT_NO),
                date: t(keys::DATE),
                resident_name: t(keys::RESIDENT_NAME),
                block_no: t(keys::BLOCK_NO),
                for_month: t(keys::FOR_MONTH),
                payment_method: t(keys::PAYMENT_METHOD),
                amount: t(keys::AMOUNT),
                signatory: t(keys::AUTHORISED_SIGNATORY),
            },
            currency_symbol: self.currency_symbol,
        };

        Ok(TemplateView {
            template_id: RECEIPT_TEMPLATE_ID.to_string(),
            markup: engine.render(RECEIPT_TEMPLATE_ID, context)?,
        })
    }
}
