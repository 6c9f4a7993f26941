//! Spreadsheet report export
//!
//! Renders expense records and their statistics into an xlsx workbook with
//! four sheets: Expenses, Statistics, Category Breakdown and Charts. The
//! workbook is assembled in memory; nothing touches the filesystem.

use chrono::NaiveDateTime;
use rust_xlsxwriter::{Chart, Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use super::layout::{
    Cell, ReportLayout, SheetTable, CATEGORY_AVERAGE_COL, CATEGORY_COUNT_COL, CATEGORY_LABEL_COL,
    CATEGORY_SHEET, CATEGORY_TOTAL_COL, CHARTS_SHEET,
};
use crate::error::ExpenseResult;
use crate::models::ExpenseRecord;
use crate::reports::{self, StatisticsResult};

/// MIME type of the produced document
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const HEADER_BACKGROUND: u32 = 0x366092;
const DATE_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
const CURRENCY_FORMAT: &str = "£#,##0.00";

const CHART_WIDTH: u32 = 480;
const CHART_HEIGHT: u32 = 300;

/// Cell formats shared by every sheet of a report
#[derive(Debug, Clone)]
struct ReportFormats {
    header: Format,
    date: Format,
    currency: Format,
}

impl Default for ReportFormats {
    fn default() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_background_color(Color::RGB(HEADER_BACKGROUND))
                .set_font_color(Color::White)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin),
            date: Format::new().set_num_format(DATE_FORMAT),
            currency: Format::new().set_num_format(CURRENCY_FORMAT),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ChartKind {
    Pie,
    Column,
}

/// Which category column a chart plots, and where it sits on the sheet
#[derive(Debug, Clone, Copy)]
struct ChartSpec {
    kind: ChartKind,
    series_name: &'static str,
    title: &'static str,
    value_col: u16,
    axis_names: Option<(&'static str, &'static str)>,
    anchor_row: u32,
}

const CHARTS: [ChartSpec; 3] = [
    ChartSpec {
        kind: ChartKind::Pie,
        series_name: "Expenses by Category",
        title: "Expenses by Category",
        value_col: CATEGORY_TOTAL_COL,
        axis_names: None,
        anchor_row: 1,
    },
    ChartSpec {
        kind: ChartKind::Column,
        series_name: "Number of Expenses",
        title: "Number of Expenses by Category",
        value_col: CATEGORY_COUNT_COL,
        axis_names: Some(("Category", "Count")),
        anchor_row: 19,
    },
    ChartSpec {
        kind: ChartKind::Column,
        series_name: "Average Expense",
        title: "Average Expense by Category",
        value_col: CATEGORY_AVERAGE_COL,
        axis_names: Some(("Category", "Amount (£)")),
        anchor_row: 37,
    },
];

/// Builds spreadsheet reports
///
/// Holds only formats; a builder can be reused and shared across threads,
/// each `build` call produces an independent workbook.
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    formats: ReportFormats,
}

impl ReportBuilder {
    /// Create a new report builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the xlsx document for `records` and their statistics
    ///
    /// On failure the error is returned and no bytes are produced.
    pub fn build(
        &self,
        records: &[ExpenseRecord],
        stats: &StatisticsResult,
    ) -> ExpenseResult<Vec<u8>> {
        let layout = ReportLayout::new(records, stats);
        self.render(&layout)
    }

    /// Render a prepared layout into xlsx bytes
    pub fn render(&self, layout: &ReportLayout) -> ExpenseResult<Vec<u8>> {
        let mut workbook = Workbook::new();

        for table in layout.tables() {
            workbook.push_worksheet(self.table_sheet(table)?);
        }
        workbook.push_worksheet(self.chart_sheet(layout.categories.data_rows())?);

        let bytes = workbook.save_to_buffer()?;

        tracing::info!(
            expenses = layout.expenses.data_rows(),
            categories = layout.categories.data_rows(),
            bytes = bytes.len(),
            "built expense report workbook"
        );

        Ok(bytes)
    }

    fn table_sheet(&self, table: &SheetTable) -> ExpenseResult<Worksheet> {
        let mut sheet = Worksheet::new();
        sheet.set_name(table.name)?;

        for (col, header) in table.headers.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *header, &self.formats.header)?;
        }

        for (index, row) in table.rows.iter().enumerate() {
            let row_num = index as u32 + 1;
            for (col, cell) in row.iter().enumerate() {
                self.write_cell(&mut sheet, row_num, col as u16, cell)?;
            }
        }

        for (col, width) in table.column_widths.iter().enumerate() {
            sheet.set_column_width(col as u16, *width)?;
        }

        Ok(sheet)
    }

    fn write_cell(
        &self,
        sheet: &mut Worksheet,
        row: u32,
        col: u16,
        cell: &Cell,
    ) -> ExpenseResult<()> {
        match cell {
            Cell::Text(text) => {
                sheet.write_string(row, col, text.as_str())?;
            }
            Cell::Number(value) => {
                sheet.write_number(row, col, *value)?;
            }
            Cell::Currency(value) => {
                sheet.write_number_with_format(row, col, *value, &self.formats.currency)?;
            }
            Cell::DateTime(date) => {
                sheet.write_datetime_with_format(row, col, date, &self.formats.date)?;
            }
        }
        Ok(())
    }

    fn chart_sheet(&self, category_rows: usize) -> ExpenseResult<Worksheet> {
        let mut sheet = Worksheet::new();
        sheet.set_name(CHARTS_SHEET)?;

        // With no categories the series point at the blank first data row, so
        // the charts exist but carry no data.
        let last_row = category_rows.max(1) as u32;

        for spec in CHARTS {
            let chart = category_chart(&spec, last_row);
            sheet.insert_chart(spec.anchor_row, 1, &chart)?;
        }

        Ok(sheet)
    }
}

fn category_chart(spec: &ChartSpec, last_row: u32) -> Chart {
    let mut chart = match spec.kind {
        ChartKind::Pie => Chart::new_pie(),
        ChartKind::Column => Chart::new_column(),
    };

    chart
        .add_series()
        .set_name(spec.series_name)
        .set_categories((CATEGORY_SHEET, 1, CATEGORY_LABEL_COL, last_row, CATEGORY_LABEL_COL))
        .set_values((CATEGORY_SHEET, 1, spec.value_col, last_row, spec.value_col));

    chart.title().set_name(spec.title);
    if let Some((x_name, y_name)) = spec.axis_names {
        chart.x_axis().set_name(x_name);
        chart.y_axis().set_name(y_name);
    }
    chart.set_width(CHART_WIDTH).set_height(CHART_HEIGHT);

    chart
}

/// A finished report ready to hand to a transport
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    /// Suggested download name, `expenses_export_<YYYYmmdd_HHMMSS>.xlsx`
    pub filename: String,
}

impl ExportArtifact {
    /// Wrap report bytes generated at `generated_at`
    pub fn new(bytes: Vec<u8>, generated_at: NaiveDateTime) -> Self {
        Self {
            bytes,
            content_type: XLSX_CONTENT_TYPE,
            filename: export_filename(generated_at),
        }
    }
}

/// Suggested filename for a report generated at `generated_at`
pub fn export_filename(generated_at: NaiveDateTime) -> String {
    format!(
        "expenses_export_{}.xlsx",
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

/// Compute statistics for `records` and build the report in one step
pub fn export_report(
    records: &[ExpenseRecord],
    generated_at: NaiveDateTime,
) -> ExpenseResult<ExportArtifact> {
    let stats = reports::compute(records);
    let bytes = ReportBuilder::new().build(records, &stats)?;
    Ok(ExportArtifact::new(bytes, generated_at))
}
