//! Output formatting utilities

use std::fmt::Write as _;

use crate::cli::helpers::signed;
use crate::cli::OutputFormat;
use crate::core::deviation::DeviationReport;
use crate::core::workflow::WorkflowResult;

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat, is_list: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_list {
                OutputFormat::Tsv
            } else {
                OutputFormat::Text
            }
        }
        other => other,
    }
}

/// Human-readable results: rotation, orientation and deviation statistics
pub fn render_report(result: &WorkflowResult, precision: usize) -> String {
    let data = &result.data;
    let (about_x, about_z) = data.orientation.axis_angles;
    let (slope_x, slope_z) = data.orientation.axis_slopes();
    let stats = &result.residuals.stats;
    let p = precision;

    let mut out = String::new();
    let _ = writeln!(out, "Plane rotation:");
    let _ = writeln!(out, "  X: {}°, {} µm/mm", signed(about_x, p), signed(slope_x, p));
    let _ = writeln!(out, "  Y: {}°, {} µm/mm", signed(about_z, p), signed(slope_z, p));
    let _ = writeln!(out);
    let _ = writeln!(out, "Plane orientation:");
    let _ = writeln!(out, "  Direction: {}°", signed(data.orientation.direction, p));
    let _ = writeln!(out, "       Tilt: {}°", signed(data.orientation.tilt, p));
    let _ = writeln!(out);
    let _ = writeln!(out, "Deviation from fitted plane:");
    let _ = writeln!(out, "  Max: {} mm", signed(stats.max, p));
    let _ = writeln!(out, "  Min: {} mm", signed(stats.min, p));
    let _ = writeln!(out, "  RMS: {} mm", signed(stats.rms, p));
    let _ = writeln!(out, "  MAD: {} mm", signed(stats.mad, p));
    out
}

/// Deviation rows as CSV or TSV with a header line
pub fn render_rows(report: &DeviationReport, separator: char) -> String {
    let mut out = format!("x{0}y{0}dz\n", separator);
    for d in &report.deviations {
        let _ = writeln!(out, "{}{sep}{}{sep}{:.6}", d.x, d.y, d.dz, sep = separator);
    }
    out
}

/// Deviation rows as an aligned table followed by the statistics
pub fn render_table(report: &DeviationReport, precision: usize) -> String {
    let p = precision;
    let rows: Vec<[String; 3]> = report
        .deviations
        .iter()
        .map(|d| [format!("{:.*}", p, d.x), format!("{:.*}", p, d.y), signed(d.dz, p)])
        .collect();

    let mut widths = [1usize, 1, 2];
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>w0$}  {:>w1$}  {:>w2$}",
        "X",
        "Y",
        "DZ",
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2]
    );
    for [x, y, dz] in &rows {
        let _ = writeln!(
            out,
            "{:>w0$}  {:>w1$}  {:>w2$}",
            x,
            y,
            dz,
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        );
    }

    let stats = &report.stats;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} point(s)  Max: {}  Min: {}  RMS: {}  MAD: {} (mm)",
        report.len(),
        signed(stats.max, p),
        signed(stats.min, p),
        signed(stats.rms, p),
        signed(stats.mad, p)
    );
    out
}
