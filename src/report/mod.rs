//! Overdue-bills report: document model and export.

use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::bill::{Bill, Bucket};
use crate::error::Result;
use crate::money::{format_amount, format_date_br};
use crate::pdf::generate_report_pdf;

/// Reports always land under this name; a new export replaces the old one.
pub const REPORT_FILE_NAME: &str = "relatorio-boletos-em-atraso.pdf";
pub const REPORT_TITLE: &str = "Relatório de Boletos em Atraso";
pub const ROW_STATUS: &str = "Em atraso";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTile {
    pub label: String,
    pub value: String,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub code: String,
    pub name: String,
    pub amount: String,
    pub due_date: String,
    pub days: String,
    pub status: String,
    pub color: String,
}

/// Complete data for rendering the report PDF
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    pub title: String,
    pub generated_date: String,
    pub filter_description: String,
    pub tiles: Vec<ReportTile>,
    pub legend: Vec<LegendEntry>,
    pub rows: Vec<ReportRow>,
    pub footer: String,
}

impl ReportData {
    /// Lay out the report for `bills` (filtered, unsorted) with totals that
    /// were already computed by the summary.
    pub fn build(
        bills: &[Bill],
        filter_description: &str,
        total_amount: f64,
        average_age: f64,
        generated: NaiveDate,
        footer: &str,
    ) -> Self {
        let tiles = vec![
            ReportTile {
                label: "Total de Boletos".to_string(),
                value: bills.len().to_string(),
                fill: "#f0f9ff".to_string(),
            },
            ReportTile {
                label: "Valor Total".to_string(),
                value: format_amount(total_amount),
                fill: "#f0fff4".to_string(),
            },
            ReportTile {
                label: "Dias em média".to_string(),
                value: format!("{} dias", average_age.round() as i64),
                fill: "#fcf5ff".to_string(),
            },
        ];

        let legend = Bucket::ALL
            .iter()
            .map(|b| LegendEntry {
                label: b.label().to_string(),
                color: b.color().to_string(),
            })
            .collect();

        Self {
            title: REPORT_TITLE.to_string(),
            generated_date: format_date_br(generated),
            filter_description: filter_description.to_string(),
            tiles,
            legend,
            rows: bills.iter().map(report_row).collect(),
            footer: footer.to_string(),
        }
    }
}

fn report_row(bill: &Bill) -> ReportRow {
    // Zero-day bills sit in no bucket but still get the first bucket's color
    let color = bill.bucket().unwrap_or(Bucket::Days1To30).color();

    ReportRow {
        code: bill.code.clone(),
        name: bill.title.clone(),
        amount: format_amount(bill.amount),
        due_date: bill
            .due_date_naive()
            .map(format_date_br)
            .unwrap_or_else(|| "-".to_string()),
        days: format!("{} dias", bill.days_overdue),
        status: ROW_STATUS.to_string(),
        color: color.to_string(),
    }
}

/// Render the report into `output_dir` and return the written path.
pub fn export_report(data: &ReportData, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let pdf_path = output_dir.join(REPORT_FILE_NAME);
    generate_report_pdf(data, &pdf_path)?;
    info!(rows = data.rows.len(), path = %pdf_path.display(), "report exported");
    Ok(pdf_path)
}
