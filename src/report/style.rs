//! Declarative cell styles
//!
//! Styles are plain data. Each cell carries a [`CellRole`] and the writer
//! looks up the matching [`CellStyle`] while emitting the row.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern};
use serde::{Deserialize, Serialize};

/// Which style a cell is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellRole {
    Header,
    Body,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub name: String,
    /// Point size
    pub size: f64,
    pub bold: bool,
    /// RGB, `None` keeps the application default (black)
    pub color: Option<u32>,
}

/// Thin border drawn on all four sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderSpec {
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellStyle {
    pub font: FontSpec,
    /// Solid background fill, RGB
    pub fill: Option<u32>,
    /// Center horizontally and vertically
    pub centered: bool,
    pub border: Option<BorderSpec>,
}

impl CellStyle {
    pub fn to_format(&self) -> Format {
        let mut format = Format::new()
            .set_font_name(self.font.name.as_str())
            .set_font_size(self.font.size);

        if self.font.bold {
            format = format.set_bold();
        }
        if let Some(color) = self.font.color {
            format = format.set_font_color(Color::RGB(color));
        }
        if let Some(fill) = self.fill {
            format = format
                .set_pattern(FormatPattern::Solid)
                .set_background_color(Color::RGB(fill));
        }
        if self.centered {
            format = format
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter);
        }
        if let Some(border) = self.border {
            format = format
                .set_border(FormatBorder::Thin)
                .set_border_color(Color::RGB(border.color));
        }

        format
    }
}

/// Header and body styles for a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportStyle {
    pub header: CellStyle,
    pub body: CellStyle,
}

impl ReportStyle {
    /// Build the writer formats once per workbook
    pub fn formats(&self) -> RoleFormats {
        RoleFormats {
            header: self.header.to_format(),
            body: self.body.to_format(),
        }
    }
}

/// Rendered [`Format`] for each [`CellRole`]
#[derive(Debug, Clone)]
pub struct RoleFormats {
    header: Format,
    body: Format,
}

impl RoleFormats {
    pub fn get(&self, role: CellRole) -> &Format {
        match role {
            CellRole::Header => &self.header,
            CellRole::Body => &self.body,
        }
    }
}

impl Default for ReportStyle {
    /// White bold Century Gothic on grey with thin black borders for the
    /// header, 10.5pt Times New Roman for everything else.
    fn default() -> Self {
        Self {
            header: CellStyle {
                font: FontSpec {
                    name: "Century Gothic".to_string(),
                    size: 14.0,
                    bold: true,
                    color: Some(0xFFFFFF),
                },
                fill: Some(0x808080),
                centered: true,
                border: Some(BorderSpec { color: 0x000000 }),
            },
            body: CellStyle {
                font: FontSpec {
                    name: "Times New Roman".to_string(),
                    size: 10.5,
                    bold: false,
                    color: None,
                },
                fill: None,
                centered: false,
                border: None,
            },
        }
    }
}
