//! # Report Generator
//!
//! Turns a list of orders into a `Report` (a title, one line per order and a
//! summary with totals) and writes it to disk. The writer is chosen from the
//! file extension: `.pdf` goes through `genpdf`, `.csv` through `csv`.

mod csv_export;
mod pdf;

use chrono::{Local, NaiveDateTime};
use common::model::order::{OrderRow, OrderStatus};
use rust_decimal::Decimal;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("unsupported report format: {0:?} (expected .pdf or .csv)")]
    UnsupportedFormat(String),
    #[error("pdf rendering failed: {0}")]
    Pdf(#[from] genpdf::error::Error),
    #[error("csv writing failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Count and amount of the orders sharing one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTotal {
    pub status: OrderStatus,
    pub order_count: usize,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub order_count: usize,
    pub total_amount: Decimal,
    /// One entry per status present in the rows, in status order.
    pub by_status: Vec<StatusTotal>,
}

impl ReportSummary {
    fn from_rows(rows: &[OrderRow]) -> Self {
        let by_status = OrderStatus::ALL
            .iter()
            .filter_map(|&status| {
                let matching = rows.iter().filter(|r| r.status == status);
                let order_count = matching.clone().count();
                (order_count > 0).then(|| StatusTotal {
                    status,
                    order_count,
                    amount: matching.map(|r| r.total_amount).sum(),
                })
            })
            .collect();

        Self {
            order_count: rows.len(),
            total_amount: rows.iter().map(|r| r.total_amount).sum(),
            by_status,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub generated_at: NaiveDateTime,
    pub rows: Vec<OrderRow>,
    pub summary: ReportSummary,
}

impl Report {
    pub fn new(title: impl Into<String>, rows: Vec<OrderRow>) -> Self {
        Self::dated(title, rows, Local::now().naive_local())
    }

    pub fn dated(title: impl Into<String>, rows: Vec<OrderRow>, at: NaiveDateTime) -> Self {
        let summary = ReportSummary::from_rows(&rows);
        Self {
            title: title.into(),
            generated_at: at,
            rows,
            summary,
        }
    }
}

const COLUMNS: [&str; 7] = ["N°", "Client", "Date", "Statut", "Montant", "Paiement", "Remarque"];

fn display_date(at: &NaiveDateTime) -> String {
    at.format("%d/%m/%Y %H:%M").to_string()
}

/// Amount with two decimals and the euro sign, as shown in tables.
pub fn display_amount(amount: Decimal) -> String {
    format!("{:.2} €", amount)
}

/// Writes `report` to `path`, as PDF or CSV depending on the extension.
/// Fonts for the PDF writer are looked up in `fonts_dir`.
pub fn export(report: &Report, fonts_dir: &Path, path: &Path) -> Result<(), ReportError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => pdf::write(report, fonts_dir, path),
        "csv" => csv_export::write(report, path),
        _ => Err(ReportError::UnsupportedFormat(path.display().to_string())),
    }?;
    log::info!("Report {:?} written to {}", report.title, path.display());
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub fn row(id: i64, status: OrderStatus, amount: &str) -> OrderRow {
        OrderRow {
            order_id: id,
            client_id: 1,
            last_name: "Dupont".to_string(),
            first_name: "Jean".to_string(),
            placed_at: NaiveDate::from_ymd_opt(2024, 3, id as u32)
                .and_then(|d| d.and_hms_opt(10, 15, 0))
                .unwrap(),
            status,
            total_amount: amount.parse().unwrap(),
            payment_method: "Virement".to_string(),
            remark: String::new(),
        }
    }

    #[test]
    fn summary_totals_and_breakdown() {
        let report = Report::new(
            "Mars 2024",
            vec![
                row(1, OrderStatus::Delivered, "100.50"),
                row(2, OrderStatus::Cancelled, "20"),
                row(3, OrderStatus::Delivered, "9.50"),
            ],
        );
        let summary = &report.summary;
        assert_eq!(summary.order_count, 3);
        assert_eq!(summary.total_amount, "130".parse().unwrap());
        assert_eq!(
            summary.by_status,
            vec![
                StatusTotal {
                    status: OrderStatus::Delivered,
                    order_count: 2,
                    amount: "110".parse().unwrap(),
                },
                StatusTotal {
                    status: OrderStatus::Cancelled,
                    order_count: 1,
                    amount: "20".parse().unwrap(),
                },
            ]
        );
    }

    #[test]
    fn empty_report_has_zero_totals() {
        let report = Report::new("Vide", Vec::new());
        assert_eq!(report.summary.order_count, 0);
        assert_eq!(report.summary.total_amount, Decimal::ZERO);
        assert!(report.summary.by_status.is_empty());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.docx");
        let result = export(&Report::new("x", Vec::new()), dir.path(), &path);
        assert!(matches!(result, Err(ReportError::UnsupportedFormat(_))));
        assert!(!path.exists());
    }

    #[test]
    fn pdf_without_fonts_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        let fonts = dir.path().join("no-fonts-here");
        let result = export(&Report::new("x", vec![row(1, OrderStatus::InProgress, "1")]), &fonts, &path);
        assert!(matches!(result, Err(ReportError::Pdf(_))));
    }

    #[test]
    fn amounts_show_two_decimals() {
        assert_eq!(display_amount("12.5".parse().unwrap()), "12.50 €");
        assert_eq!(display_amount(Decimal::new(700, 2)), "7.00 €");
    }
}
