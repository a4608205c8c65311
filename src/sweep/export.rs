//! Output helpers for a finished [`SensitivityMatrix`].
//!
//! Both helpers only serialise an already computed matrix; they never price.

use std::io;

use anyhow::{anyhow, Context, Result};
use plotters::prelude::*;

use crate::sweep::types::SensitivityMatrix;

/// Write the matrix as CSV.
///
/// The header row is `<row parameter>\<column parameter>` followed by the column
/// axis values; every following line starts with its row axis value.
pub fn write_csv<W: io::Write>(matrix: &SensitivityMatrix, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(matrix.column_values().len() + 1);
    header.push(format!(
        "{}\\{}",
        matrix.row_parameter(),
        matrix.column_parameter()
    ));
    header.extend(matrix.column_values().iter().map(f64::to_string));
    wtr.write_record(&header)?;

    for (row_value, cells) in matrix.row_values().iter().zip(matrix.rows()) {
        let mut record = Vec::with_capacity(cells.len() + 1);
        record.push(row_value.to_string());
        record.extend(cells.iter().map(f64::to_string));
        wtr.write_record(&record)?;
    }

    wtr.flush().context("failed to flush CSV output")?;
    Ok(())
}

/// Appearance of a rendered heatmap.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HeatmapStyle {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// RGB colour of the smallest value
    pub low_color: (u8, u8, u8),
    /// RGB colour of the largest value
    pub high_color: (u8, u8, u8),
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            low_color: (68, 1, 84),
            high_color: (253, 231, 37),
        }
    }
}

impl HeatmapStyle {
    fn color_for(&self, value: f64, min: f64, max: f64) -> RGBColor {
        let t = if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        RGBColor(
            lerp(self.low_color.0, self.high_color.0),
            lerp(self.low_color.1, self.high_color.1),
            lerp(self.low_color.2, self.high_color.2),
        )
    }
}

/// Render the matrix as an SVG heatmap, one filled rectangle per cell.
///
/// Row 0 is drawn at the bottom and column 0 at the left, so both axes increase
/// away from the origin.
pub fn render_heatmap_svg(matrix: &SensitivityMatrix, style: &HeatmapStyle) -> Result<String> {
    let (rows, cols) = matrix.shape();
    if rows == 0 || cols == 0 {
        return Err(anyhow!("cannot render an empty matrix"));
    }
    if style.width < cols as u32 || style.height < rows as u32 {
        return Err(anyhow!(
            "heatmap of {}x{} px is too small for a {}x{} matrix",
            style.width,
            style.height,
            rows,
            cols
        ));
    }

    let (min, max) = (matrix.min(), matrix.max());
    let cell_w = style.width as f64 / cols as f64;
    let cell_h = style.height as f64 / rows as f64;

    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (style.width, style.height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| anyhow!("failed to fill heatmap background: {e}"))?;

        for (r, cells) in matrix.rows().enumerate() {
            // Flip vertically: row 0 sits on the bottom edge.
            let y1 = style.height as f64 - r as f64 * cell_h;
            let y0 = y1 - cell_h;
            for (c, &value) in cells.iter().enumerate() {
                let x0 = c as f64 * cell_w;
                let x1 = x0 + cell_w;
                let rect = Rectangle::new(
                    [
                        (x0.round() as i32, y0.round() as i32),
                        (x1.round() as i32, y1.round() as i32),
                    ],
                    style.color_for(value, min, max).filled(),
                );
                root.draw(&rect)
                    .map_err(|e| anyhow!("failed to draw cell ({r}, {c}): {e}"))?;
            }
        }

        root.present()
            .map_err(|e| anyhow!("failed to finish heatmap: {e}"))?;
    }
    Ok(svg)
}
