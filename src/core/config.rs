use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

use super::error::ExportResult;
use crate::models::SocietyInfo;
use crate::pdf::typst_str;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    A4,
    Letter,
    Legal,
    A3,
    Custom(f32, f32), // width, height in mm
}

impl PageSize {
    pub fn to_typst(&self) -> String {
        match self {
            PageSize::A4 => "paper: \"a4\"".to_string(),
            PageSize::Letter => "paper: \"us-letter\"".to_string(),
            PageSize::Legal => "paper: \"us-legal\"".to_string(),
            PageSize::A3 => "paper: \"a3\"".to_string(),
            PageSize::Custom(w, h) => format!("width: {:.2}mm, height: {:.2}mm", w, h),
        }
    }

    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
            PageSize::Legal => (215.9, 355.6),
            PageSize::A3 => (297.0, 420.0),
            PageSize::Custom(w, h) => (*w, *h),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::Landscape => write!(f, "landscape"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Margin {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Margin::uniform(14.0)
    }
}

impl Margin {
    pub fn new(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Margin { top, bottom, left, right }
    }

    pub fn uniform(size: f32) -> Self {
        Margin {
            top: size,
            bottom: size,
            left: size,
            right: size,
        }
    }

    pub fn to_typst(&self) -> String {
        format!(
            "(top: {}mm, bottom: {}mm, left: {}mm, right: {}mm)",
            self.top, self.bottom, self.left, self.right
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub margin: Margin,
    pub scale: f32,
    pub font_family: String,
    pub font_size: f32,
    pub line_height: f32,
}

impl Default for PdfConfig {
    fn default() -> Self {
        PdfConfig {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin: Margin::default(),
            scale: 1.0,
            font_family: "Libertinus Serif".to_string(),
            font_size: 10.0,
            line_height: 1.5,
        }
    }
}

impl PdfConfig {
    pub fn builder() -> PdfConfigBuilder {
        PdfConfigBuilder::default()
    }

    /// Page width in mm once orientation is applied.
    pub fn page_width(&self) -> f32 {
        let (w, h) = self.page_size.dimensions();
        match self.orientation {
            Orientation::Portrait => w,
            Orientation::Landscape => h,
        }
    }

    /// Arguments of the `#set page(..)` rule, without header and footer.
    pub fn to_typst_page_args(&self) -> String {
        format!(
            "{}, margin: {}, flipped: {}",
            self.page_size.to_typst(),
            self.margin.to_typst(),
            matches!(self.orientation, Orientation::Landscape)
        )
    }

    pub fn to_typst_text_rules(&self) -> String {
        format!(
            "#set text(font: {}, size: {}pt)\n#set par(leading: {:.2}em)",
            typst_str(&self.font_family),
            self.font_size * self.scale,
            (self.line_height - 1.0).max(0.0) + 0.15
        )
    }
}

#[derive(Default)]
pub struct PdfConfigBuilder {
    page_size: Option<PageSize>,
    orientation: Option<Orientation>,
    margin: Option<Margin>,
    scale: Option<f32>,
    font_family: Option<String>,
    font_size: Option<f32>,
    line_height: Option<f32>,
}

impl PdfConfigBuilder {
    pub fn page_size(mut self, size: PageSize) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn margin(mut self, margin: Margin) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn font_family(mut self, font: String) -> Self {
        self.font_family = Some(font);
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    pub fn build(self) -> PdfConfig {
        let default = PdfConfig::default();
        PdfConfig {
            page_size: self.page_size.unwrap_or(default.page_size),
            orientation: self.orientation.unwrap_or(default.orientation),
            margin: self.margin.unwrap_or(default.margin),
            scale: self.scale.unwrap_or(default.scale),
            font_family: self.font_family.unwrap_or(default.font_family),
            font_size: self.font_size.unwrap_or(default.font_size),
            line_height: self.line_height.unwrap_or(default.line_height),
        }
    }
}

/// Settings of the export module, read from `society-reports.toml` and
/// `SOCIETY_REPORTS__*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub society: SocietyInfo,
    pub currency_symbol: String,
    pub output_dir: PathBuf,
    pub temp_dir: PathBuf,
    pub typst_binary: String,
    /// Resolution of the receipt capture; 216 ppi is 3x the PDF point grid.
    pub raster_ppi: u32,
    pub receipt_template: Option<PathBuf>,
    pub page: PdfConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            society: SocietyInfo::default(),
            currency_symbol: "₹".to_string(),
            output_dir: PathBuf::from("output"),
            temp_dir: std::env::temp_dir(),
            typst_binary: "typst".to_string(),
            raster_ppi: 216,
            receipt_template: None,
            page: PdfConfig::default(),
        }
    }
}

impl ExportConfig {
    pub const ENV_PREFIX: &'static str = "SOCIETY_REPORTS";

    pub fn load() -> ExportResult<Self> {
        Self::load_from("society-reports")
    }

    /// Loads `<basename>.{toml,json,yaml}` when present, then applies
    /// environment overrides such as `SOCIETY_REPORTS__OUTPUT_DIR`.
    pub fn load_from(basename: &str) -> ExportResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(basename).required(false))
            .add_source(
                config::Environment::with_prefix(Self::ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: ExportConfig = settings.try_deserialize()?;
        tracing::debug!(
            output_dir = %config.output_dir.display(),
            typst = %config.typst_binary,
            "Export configuration loaded"
        );
        Ok(config)
    }
}
