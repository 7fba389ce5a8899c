use chrono::Datelike;

use crate::core::{
    Block, Cell, ColumnAlign, ColumnWidth, DocumentLayout, DocumentMetadata, Heading, PageFooter, PdfConfig, Rgb,
    TableData, TablePlacement, TableStyle,
};

/// Quotes text as a Typst string literal so record content is never
/// interpreted as markup.
pub fn typst_str(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => {}
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Assembles Typst source for a [`DocumentLayout`].
pub struct PdfBuilder {
    sections: Vec<String>,
    config: PdfConfig,
    metadata: Option<DocumentMetadata>,
    running_header: Option<Heading>,
    footer: Option<PageFooter>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        PdfBuilder {
            sections: Vec::new(),
            config: PdfConfig::default(),
            metadata: None,
            running_header: None,
            footer: None,
        }
    }

    pub fn from_layout(doc: &DocumentLayout) -> Self {
        let mut builder = PdfBuilder::new().with_config(doc.page.clone());
        builder.metadata = Some(doc.metadata.clone());
        builder.running_header = doc.running_header.clone();
        builder.footer = doc.footer.clone();

        for block in &doc.blocks {
            match block {
                Block::Heading(heading) => builder.add_heading(heading),
                Block::Table(table) => builder.add_table(table),
                Block::Image { asset, width_percent } => builder.add_image(asset, *width_percent),
                Block::Spacing(pt) => builder.add_spacing(*pt),
            };
        }
        builder
    }

    pub fn with_config(mut self, config: PdfConfig) -> Self {
        self.config = config;
        self
    }

    pub fn add_heading(&mut self, heading: &Heading) -> &mut Self {
        self.sections.push(format!(
            "#align({}, {})",
            heading.align.to_typst(),
            heading_text(heading)
        ));
        self
    }

    pub fn add_spacing(&mut self, pt: f32) -> &mut Self {
        self.sections.push(format!("#v({}pt)", pt));
        self
    }

    pub fn add_image(&mut self, path: &str, width_percent: f32) -> &mut Self {
        self.sections
            .push(format!("#image({}, width: {}%)", typst_str(path), width_percent));
        self
    }

    pub fn add_table(&mut self, table: &TableData) -> &mut Self {
        let columns = table.column_count();
        let mut typst = String::from("table(\n");

        let widths: Vec<String> = match &table.column_widths {
            Some(widths) => widths.iter().map(column_width).collect(),
            None => match table.placement {
                TablePlacement::FullWidth => vec!["1fr".to_string(); columns],
                TablePlacement::Right => vec!["auto".to_string(); columns],
            },
        };
        typst.push_str(&format!("  columns: ({},),\n", widths.join(", ")));

        match &table.style {
            TableStyle::Grid { .. } => typst.push_str("  stroke: 0.5pt + luma(190),\n"),
            TableStyle::Plain => typst.push_str("  stroke: none,\n"),
        }
        typst.push_str("  inset: 6pt,\n");

        if !table.headers.is_empty() {
            let (fill, color) = match &table.style {
                TableStyle::Grid { header_fill } => (Some(*header_fill), Some(Rgb::WHITE)),
                TableStyle::Plain => (None, None),
            };
            let cells: Vec<String> = table
                .headers
                .iter()
                .enumerate()
                .map(|(col, header)| {
                    let mut cell = Cell::new(header.as_str()).bold();
                    cell.color = color;
                    table_cell(&cell, table.column_align(col), fill)
                })
                .collect();
            typst.push_str(&format!("  table.header(\n    {},\n  ),\n", cells.join(",\n    ")));
        }

        for row in &table.rows {
            for (col, cell) in row.iter().enumerate() {
                typst.push_str(&format!("  {},\n", table_cell(cell, table.column_align(col), None)));
            }
        }

        if !table.footer.is_empty() {
            let cells: Vec<String> = table
                .footer
                .iter()
                .flat_map(|row| {
                    row.iter().enumerate().map(|(col, cell)| {
                        let cell = if cell.bold { cell.clone() } else { cell.clone().bold() };
                        table_cell(&cell, table.column_align(col), Some(Rgb(240, 240, 240)))
                    })
                })
                .collect();
            typst.push_str(&format!("  table.footer(\n    {},\n  ),\n", cells.join(",\n    ")));
        }

        typst.push(')');

        let placed = match table.placement {
            TablePlacement::FullWidth => format!("#{}", typst),
            TablePlacement::Right => format!("#align(right, {})", typst),
        };
        self.sections.push(placed);
        self
    }

    fn page_rule(&self) -> String {
        let mut args = vec![self.config.to_typst_page_args()];

        if let Some(header) = &self.running_header {
            args.push(format!(
                "header: align({}, {})",
                header.align.to_typst(),
                heading_text(header)
            ));
        }

        if let Some(footer) = &self.footer {
            let stamp = footer
                .generated_on
                .as_deref()
                .map(typst_str)
                .unwrap_or_else(|| "\"\"".to_string());
            args.push(format!(
                "footer: context text(size: 8pt, fill: {})[#{} #h(1fr) #({} + \" \" + str(counter(page).get().first()) + \" \" + {} + \" \" + str(counter(page).final().first()))]",
                Rgb::MUTED.to_typst(),
                stamp,
                typst_str(&footer.page_label),
                typst_str(&footer.of_label),
            ));
        }

        format!("#set page({})", args.join(", "))
    }

    pub fn build(&self) -> String {
        let mut preamble = Vec::new();
        if let Some(metadata) = &self.metadata {
            preamble.push(document_rule(metadata));
        }
        preamble.push(self.page_rule());
        preamble.push(self.config.to_typst_text_rules());

        format!("{}\n\n{}\n", preamble.join("\n"), self.sections.join("\n\n"))
    }
}

impl Default for PdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn document_rule(metadata: &DocumentMetadata) -> String {
    let mut args = vec![format!("title: {}", typst_str(&metadata.title))];
    if let Some(author) = &metadata.author {
        args.push(format!("author: {}", typst_str(author)));
    }
    let date = metadata.created_at;
    args.push(format!(
        "date: datetime(year: {}, month: {}, day: {})",
        date.year(),
        date.month(),
        date.day()
    ));
    format!("#set document({})", args.join(", "))
}

fn heading_text(heading: &Heading) -> String {
    let weight = if heading.bold { ", weight: \"bold\"" } else { "" };
    format!("text(size: {}pt{}, {})", heading.size, weight, typst_str(&heading.text))
}

fn column_width(width: &ColumnWidth) -> String {
    match width {
        ColumnWidth::Auto => "auto".to_string(),
        ColumnWidth::Fill => "1fr".to_string(),
        ColumnWidth::Fixed(pt) => format!("{}pt", pt),
    }
}

fn table_cell(cell: &Cell, column_align: ColumnAlign, fill: Option<Rgb>) -> String {
    let mut text_args = Vec::new();
    if let Some(color) = cell.color {
        text_args.push(format!("fill: {}", color.to_typst()));
    }
    if cell.bold {
        text_args.push("weight: \"bold\"".to_string());
    }
    text_args.push(typst_str(&cell.text));

    let align = cell.align.unwrap_or(column_align);
    let mut cell_args = vec![format!("align: {}", align.to_typst())];
    if let Some(fill) = fill {
        cell_args.push(format!("fill: {}", fill.to_typst()));
    }

    format!("table.cell({}, text({}))", cell_args.join(", "), text_args.join(", "))
}
