use anyhow::Context;
use contracts::dashboards::d001_returns_dashboard::DashboardSnapshot;
use contracts::shared::indicators::{IndicatorCatalog, ValueFormat};
use std::io::Write;
use std::path::PathBuf;

use crate::shared::format::{format_money, format_number, format_percent, format_value};
use crate::shared::indicators::metadata::catalog;

/// Renders a dashboard snapshot. The pipeline knows nothing about how.
pub trait Presenter {
    fn present(&mut self, snapshot: &DashboardSnapshot) -> anyhow::Result<()>;
}

const BAR_WIDTH: usize = 30;

/// Plain-text dashboard for a terminal.
pub struct ConsolePresenter<W: Write> {
    out: W,
    table_limit: usize,
    catalog: &'static IndicatorCatalog,
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W, table_limit: usize) -> Self {
        Self {
            out,
            table_limit,
            catalog: catalog(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_kpis(&mut self, snapshot: &DashboardSnapshot) -> std::io::Result<()> {
        writeln!(self.out, "== Returns Analysis Dashboard ==")?;
        for value in &snapshot.indicators {
            let (label, text) = match self.catalog.meta(&value.id) {
                Some(meta) => (meta.label.clone(), format_value(value.value, &meta.format)),
                None => (
                    value.id.0.clone(),
                    format_value(value.value, &ValueFormat::Number { decimals: 2 }),
                ),
            };
            match &value.subtitle {
                Some(sub) => writeln!(self.out, "{label:>18}: {text}  ({sub})")?,
                None => writeln!(self.out, "{label:>18}: {text}")?,
            }
        }
        Ok(())
    }

    fn write_monthly(&mut self, snapshot: &DashboardSnapshot) -> std::io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "-- Monthly Return Trend --")?;
        if snapshot.monthly_returns.is_empty() {
            return writeln!(self.out, "(no returns)");
        }

        let max = snapshot
            .monthly_returns
            .iter()
            .map(|m| m.count)
            .max()
            .unwrap_or(0);
        for (i, month) in snapshot.monthly_returns.iter().enumerate() {
            let bar = bar(month.count, max);
            match snapshot.previous_year_returns.get(i) {
                Some(prev) => writeln!(
                    self.out,
                    "{}  {:>5}  last year {:>5}  {}",
                    month.month_year, month.count, prev.count, bar
                )?,
                None => writeln!(self.out, "{}  {:>5}  {}", month.month_year, month.count, bar)?,
            }
        }
        Ok(())
    }

    fn write_top_employees(&mut self, snapshot: &DashboardSnapshot) -> std::io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "-- Top {} Employees by Returns --",
            snapshot.top_employees.len()
        )?;
        if snapshot.top_employees.is_empty() {
            return writeln!(self.out, "(no returns)");
        }

        let max = snapshot.top_employees.first().map_or(0, |e| e.count);
        for employee in &snapshot.top_employees {
            writeln!(
                self.out,
                "{:<20} {:>5}  {}",
                employee.person,
                employee.count,
                bar(employee.count, max)
            )?;
        }
        Ok(())
    }

    fn write_share(&mut self, snapshot: &DashboardSnapshot) -> std::io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "-- Employee Contribution to Total Returns --")?;
        if snapshot.employee_share.is_empty() {
            return writeln!(self.out, "(no returns)");
        }
        for (person, share) in &snapshot.employee_share {
            writeln!(self.out, "{:<20} {:>7}", person, format_percent(*share, 1))?;
        }
        Ok(())
    }

    fn write_table(&mut self, snapshot: &DashboardSnapshot) -> std::io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "-- Filtered Data ({} rows) --",
            format_number(snapshot.rows.len())
        )?;
        writeln!(
            self.out,
            "{:<14} {:<10} {:<10} {:>12} {:<8} {:<20}",
            "Order ID", "Date", "Region", "Sales", "Returned", "Person"
        )?;
        for row in snapshot.rows.iter().take(self.table_limit) {
            writeln!(
                self.out,
                "{:<14} {:<10} {:<10} {:>12} {:<8} {:<20}",
                row.order_id,
                row.order_date.format("%Y-%m-%d"),
                row.region,
                format_money(row.sales, "$", 2),
                row.returned.as_deref().unwrap_or("-"),
                row.person.as_deref().unwrap_or("-"),
            )?;
        }
        if snapshot.rows.len() > self.table_limit {
            writeln!(
                self.out,
                "... {} more rows",
                format_number(snapshot.rows.len() - self.table_limit)
            )?;
        }
        Ok(())
    }

    fn write_warnings(&mut self, snapshot: &DashboardSnapshot) -> std::io::Result<()> {
        if snapshot.warnings.is_empty() {
            return Ok(());
        }
        writeln!(self.out)?;
        writeln!(self.out, "!! Join fan-out detected, metrics include duplicated rows:")?;
        for warning in &snapshot.warnings {
            writeln!(self.out, "   {warning}")?;
        }
        Ok(())
    }
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let width = (count * BAR_WIDTH + max - 1) / max;
    "#".repeat(width)
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn present(&mut self, snapshot: &DashboardSnapshot) -> anyhow::Result<()> {
        self.write_kpis(snapshot)?;
        self.write_monthly(snapshot)?;
        self.write_top_employees(snapshot)?;
        self.write_share(snapshot)?;
        self.write_table(snapshot)?;
        self.write_warnings(snapshot)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Writes the snapshot as pretty JSON, for an external chart/UI layer.
pub struct JsonPresenter {
    path: PathBuf,
}

impl JsonPresenter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Presenter for JsonPresenter {
    fn present(&mut self, snapshot: &DashboardSnapshot) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        tracing::info!("Snapshot written to {}", self.path.display());
        Ok(())
    }
}
