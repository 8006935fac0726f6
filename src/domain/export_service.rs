//! Export of transaction data: Excel spreadsheet and chart image files.
//!
//! Both exports are side-effect-only; the store is never touched. Output is
//! staged next to the destination and renamed into place on success, so a
//! failed export never leaves a truncated file behind.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use rust_xlsxwriter::{Format, Workbook};
use tempfile::NamedTempFile;
use tracing::info;

use crate::domain::analytics_service::{
    AnalyticsService, CategoryTotal, CategoryTypeRow, DateSeries,
};
use crate::domain::models::transaction::Transaction;
use crate::error::AppError;
use crate::storage::traits::TransactionStorage;

/// Spreadsheet column order, fixed by the export format.
pub const EXPORT_COLUMNS: [&str; 4] = ["Date", "Category", "Amount", "Type"];

const CHART_SIZE: (u32, u32) = (800, 600);

/// Which of the three analytics charts is currently displayed, and hence
/// which one a chart export renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Pie of expense totals per category.
    ExpensePie,
    /// Grouped bars of income/expense totals per category.
    CategoryBars,
    /// Income and expense lines over calendar dates.
    DailyTrend,
}

/// One spreadsheet row in the fixed export column order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub date: String,
    pub category: String,
    pub amount: f64,
    pub type_label: String,
}

#[derive(Clone)]
pub struct ExportService {
    transaction_repository: Arc<dyn TransactionStorage>,
    analytics_service: AnalyticsService,
}

impl ExportService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionStorage>,
        analytics_service: AnalyticsService,
    ) -> Self {
        Self {
            transaction_repository,
            analytics_service,
        }
    }

    /// Write every stored transaction to an `.xlsx` workbook at `path`:
    /// one header row, then one row per transaction.
    pub fn export_transactions_xlsx(&self, path: &Path) -> Result<(), AppError> {
        let transactions = self.transaction_repository.list_transactions()?;
        let rows = export_rows(&transactions);

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let header = Format::new().set_bold();
        for (col, title) in EXPORT_COLUMNS.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *title, &header)
                .map_err(export_err)?;
        }
        for (i, row) in rows.iter().enumerate() {
            let row_num = (i + 1) as u32;
            worksheet
                .write_string(row_num, 0, &row.date)
                .map_err(export_err)?;
            worksheet
                .write_string(row_num, 1, &row.category)
                .map_err(export_err)?;
            worksheet
                .write_number(row_num, 2, row.amount)
                .map_err(export_err)?;
            worksheet
                .write_string(row_num, 3, &row.type_label)
                .map_err(export_err)?;
        }

        let buffer = workbook.save_to_buffer().map_err(export_err)?;
        write_atomically(path, &buffer)?;
        info!(path = %path.display(), rows = rows.len(), "exported transactions to spreadsheet");
        Ok(())
    }

    /// Render the chart for `kind` to `path`. A `.svg` extension selects
    /// the vector backend, anything else is rasterized (PNG and friends,
    /// decided by the extension).
    pub fn export_chart(&self, kind: ChartKind, path: &Path) -> Result<(), AppError> {
        // Aggregate first: an empty store surfaces `NoData` before any
        // file is created.
        let data = self.chart_data(kind)?;

        let staging = staging_path(path);
        let result = if is_svg(path) {
            let root = SVGBackend::new(&staging, CHART_SIZE).into_drawing_area();
            draw_chart(&data, &root).and_then(|_| root.present().map_err(export_err))
        } else {
            let root = BitMapBackend::new(&staging, CHART_SIZE).into_drawing_area();
            draw_chart(&data, &root).and_then(|_| root.present().map_err(export_err))
        };

        if let Err(err) = result {
            let _ = std::fs::remove_file(&staging);
            return Err(err);
        }
        std::fs::rename(&staging, path).map_err(export_err)?;
        info!(path = %path.display(), ?kind, "exported chart");
        Ok(())
    }

    fn chart_data(&self, kind: ChartKind) -> Result<ChartData, AppError> {
        match kind {
            ChartKind::ExpensePie => Ok(ChartData::Pie(
                self.analytics_service.expense_by_category()?,
            )),
            ChartKind::CategoryBars => Ok(ChartData::Bars(
                self.analytics_service.totals_by_category_and_type()?,
            )),
            ChartKind::DailyTrend => {
                Ok(ChartData::Trend(self.analytics_service.totals_by_date()?))
            }
        }
    }
}

/// Aggregated data for one chart, resolved before a backend is opened.
enum ChartData {
    Pie(Vec<CategoryTotal>),
    Bars(Vec<CategoryTypeRow>),
    Trend(DateSeries),
}

fn draw_chart<DB: DrawingBackend>(
    data: &ChartData,
    root: &DrawingArea<DB, Shift>,
) -> Result<(), AppError> {
    match data {
        ChartData::Pie(totals) => draw_pie(root, totals),
        ChartData::Bars(table) => draw_bars(root, table),
        ChartData::Trend(series) => draw_trend(root, series),
    }
}

/// Flatten transactions into spreadsheet rows, column order as exported.
pub fn export_rows(transactions: &[Transaction]) -> Vec<ExportRow> {
    transactions
        .iter()
        .map(|t| ExportRow {
            date: t.date.clone(),
            category: t.category.clone(),
            amount: t.amount,
            type_label: t.transaction_type.as_str().to_string(),
        })
        .collect()
}

fn export_err<E: std::fmt::Display>(err: E) -> AppError {
    AppError::Export(err.to_string())
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

/// Hidden sibling of `path` that keeps the real extension last, since the
/// bitmap backend picks its encoder from the extension.
fn staging_path(path: &Path) -> PathBuf {
    let parent = parent_dir(path);
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("png");
    parent.join(format!(".chart-export-{}.{}", std::process::id(), ext))
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    let dir = parent_dir(path);
    let mut staged = NamedTempFile::new_in(dir).map_err(export_err)?;
    staged.write_all(bytes).map_err(export_err)?;
    staged.persist(path).map_err(export_err)?;
    Ok(())
}

const BAR_INCOME: RGBColor = RGBColor(76, 175, 80);
const BAR_EXPENSE: RGBColor = RGBColor(229, 57, 53);

const PIE_COLORS: [RGBColor; 8] = [
    RGBColor(66, 133, 244),
    RGBColor(219, 68, 55),
    RGBColor(244, 180, 0),
    RGBColor(15, 157, 88),
    RGBColor(171, 71, 188),
    RGBColor(0, 172, 193),
    RGBColor(255, 112, 67),
    RGBColor(158, 157, 36),
];

fn draw_pie<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    totals: &[CategoryTotal],
) -> Result<(), AppError> {
    root.fill(&WHITE).map_err(export_err)?;
    let root = root
        .titled("Expenses by category", ("sans-serif", 24))
        .map_err(export_err)?;

    let sizes: Vec<f64> = totals.iter().map(|t| t.total).collect();
    let labels: Vec<String> = totals
        .iter()
        .map(|t| format!("{} ({:.2})", t.category, t.total))
        .collect();
    let colors: Vec<RGBColor> = (0..totals.len())
        .map(|i| PIE_COLORS[i % PIE_COLORS.len()])
        .collect();

    let (width, height) = root.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 16).into_font());
    root.draw(&pie).map_err(export_err)?;
    Ok(())
}

fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &[CategoryTypeRow],
) -> Result<(), AppError> {
    root.fill(&WHITE).map_err(export_err)?;

    let max = table
        .iter()
        .map(|row| row.income.max(row.expense))
        .fold(0.0f64, f64::max)
        .max(1.0);

    let mut chart = ChartBuilder::on(root)
        .caption("Income and expenses by category", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..table.len() as f64, 0f64..max * 1.1)
        .map_err(export_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(table.len())
        .x_label_formatter(&|x| {
            let index = x.floor() as usize;
            table
                .get(index)
                .map(|row| row.category.clone())
                .unwrap_or_default()
        })
        .draw()
        .map_err(export_err)?;

    chart
        .draw_series(table.iter().enumerate().map(|(i, row)| {
            let x = i as f64;
            Rectangle::new([(x + 0.10, 0.0), (x + 0.45, row.income)], BAR_INCOME.filled())
        }))
        .map_err(export_err)?
        .label("Income")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], BAR_INCOME.filled()));

    chart
        .draw_series(table.iter().enumerate().map(|(i, row)| {
            let x = i as f64;
            Rectangle::new([(x + 0.55, 0.0), (x + 0.90, row.expense)], BAR_EXPENSE.filled())
        }))
        .map_err(export_err)?
        .label("Expense")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], BAR_EXPENSE.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(export_err)?;
    Ok(())
}

fn draw_trend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &DateSeries,
) -> Result<(), AppError> {
    root.fill(&WHITE).map_err(export_err)?;

    let mut dates: Vec<_> = series
        .income
        .iter()
        .flatten()
        .chain(series.expense.iter().flatten())
        .map(|point| point.0)
        .collect();
    dates.sort();
    let (first, last) = match (dates.first(), dates.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Err(AppError::NoData),
    };
    // A one-day range still needs a non-degenerate axis.
    let last = if first == last {
        last + chrono::Duration::days(1)
    } else {
        last
    };

    let max = series
        .income
        .iter()
        .flatten()
        .chain(series.expense.iter().flatten())
        .map(|point| point.1)
        .fold(0.0f64, f64::max)
        .max(1.0);

    let mut chart = ChartBuilder::on(root)
        .caption("Income and expenses over time", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(first..last, 0f64..max * 1.1)
        .map_err(export_err)?;

    chart
        .configure_mesh()
        .x_labels(8)
        .draw()
        .map_err(export_err)?;

    if let Some(points) = &series.income {
        chart
            .draw_series(LineSeries::new(points.iter().copied(), &BAR_INCOME))
            .map_err(export_err)?
            .label("Income")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], BAR_INCOME));
    }
    if let Some(points) = &series.expense {
        chart
            .draw_series(LineSeries::new(points.iter().copied(), &BAR_EXPENSE))
            .map_err(export_err)?
            .label("Expense")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], BAR_EXPENSE));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(export_err)?;
    Ok(())
}
