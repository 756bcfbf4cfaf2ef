use super::{display_date, Report, ReportError, COLUMNS};
use std::path::Path;

/// Writes one record per order followed by the summary lines.
/// Amounts are plain decimals so spreadsheets can sum them.
pub(super) fn write(report: &Report, path: &Path) -> Result<(), ReportError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)?;

    writer.write_record(COLUMNS)?;
    for row in &report.rows {
        writer.write_record([
            row.order_id.to_string(),
            row.client_name(),
            display_date(&row.placed_at),
            row.status.label().to_string(),
            format!("{:.2}", row.total_amount),
            row.payment_method.clone(),
            row.remark.clone(),
        ])?;
    }

    let summary = &report.summary;
    writer.write_record([
        "Nombre de commandes".to_string(),
        summary.order_count.to_string(),
    ])?;
    writer.write_record(["Total".to_string(), format!("{:.2}", summary.total_amount)])?;
    for total in &summary.by_status {
        writer.write_record([
            total.status.label().to_string(),
            total.order_count.to_string(),
            format!("{:.2}", total.amount),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
