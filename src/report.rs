//! Report rendering entry points.
//!
//! `render(text, patient, filename)` is a pure function of its inputs plus
//! the report date: the same arguments and date always produce the same page
//! layout. [`render_report`] stamps today's date; [`render_report_on`] pins
//! the date explicitly, which is what tests and re-renders of archived
//! analyses use.

use crate::error::MedscanError;
use crate::patient::PatientMetadata;
use crate::pipeline::layout::{self, lay_out};
use crate::pipeline::pdf::{Font, ReportWriter};
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

const LEFT: f32 = 10.0;
const COL_2: f32 = 50.0;
const COL_3: f32 = 90.0;
const DETAIL_SIZE: f32 = 10.0;
const DETAIL_ROW: f32 = 6.0;

/// Render the diagnostic report PDF, dated today.
///
/// `report_text` is treated as opaque: model output, an `"Error: …"` string,
/// and the empty string all produce a valid document. See
/// [`crate::pipeline::layout`] for the classification rules.
pub fn render_report(
    report_text: &str,
    patient: &PatientMetadata,
    image_filename: &str,
) -> Result<Vec<u8>, MedscanError> {
    render_report_on(report_text, patient, image_filename, Local::now().date_naive())
}

/// Render the diagnostic report PDF with a pinned report date.
pub fn render_report_on(
    report_text: &str,
    patient: &PatientMetadata,
    image_filename: &str,
    date: NaiveDate,
) -> Result<Vec<u8>, MedscanError> {
    let ops = lay_out(report_text);
    debug!("Planned {} body lines", ops.len());

    let mut writer = ReportWriter::new("Medical Report")?;

    // Patient block: two fixed rows of cells.
    writer.section_label("PATIENT DETAILS", 12.0);
    writer.cell(
        &layout::to_renderable(&format!("Name: {}", patient.name)),
        DETAIL_SIZE,
        Font::Regular,
        LEFT,
    );
    writer.cell(&format!("Age: {}", patient.age), DETAIL_SIZE, Font::Regular, COL_2);
    writer.cell(&format!("Gender: {}", patient.gender), DETAIL_SIZE, Font::Regular, COL_3);
    writer.end_row(DETAIL_ROW);
    writer.cell(
        &format!("Date: {}", date.format("%Y-%m-%d")),
        DETAIL_SIZE,
        Font::Regular,
        LEFT,
    );
    writer.cell(
        &layout::to_renderable(&format!("Image: {image_filename}")),
        DETAIL_SIZE,
        Font::Regular,
        COL_2,
    );
    writer.end_row(DETAIL_ROW);

    writer.vertical_space(5.0);
    writer.rule(8.0);

    writer.section_label("DIAGNOSTIC REPORT", 14.0);
    writer.vertical_space(3.0);

    writer.body(&ops);
    writer.signature_block();

    let bytes = writer.finish()?;
    info!(
        "Rendered report for '{}' ({} body lines, {} bytes)",
        patient.name,
        ops.len(),
        bytes.len()
    );
    Ok(bytes)
}
