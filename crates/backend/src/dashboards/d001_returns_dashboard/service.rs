use chrono::Utc;
use contracts::dashboards::d001_returns_dashboard::{
    DashboardSnapshot, FilterEvent, FilterOptions, FilterSelection,
};
use contracts::projections::p001_returns_analysis::{MergeReport, MergedRecord};
use std::path::PathBuf;
use uuid::Uuid;

use super::{filter, metrics};
use crate::domain::a001_order::loader::load_orders;
use crate::domain::a002_return::loader::load_returns;
use crate::domain::a003_person::loader::load_people;
use crate::projections::p001_returns_analysis::build_table;
use crate::shared::config::Config;
use crate::shared::error::PipelineResult;
use crate::shared::indicators::metadata::{catalog, RETURNS_OVERVIEW_SET};
use crate::shared::indicators::IndicatorRegistry;

/// Where the session reads its data from.
#[derive(Debug, Clone)]
pub struct DataSources {
    pub orders_dir: PathBuf,
    pub orders_pattern: String,
    pub returns_path: PathBuf,
    pub people_path: PathBuf,
}

impl DataSources {
    pub fn from_config(config: &Config) -> Self {
        Self {
            orders_dir: config.orders_dir(),
            orders_pattern: config.data.orders_pattern.clone(),
            returns_path: config.returns_path(),
            people_path: config.people_path(),
        }
    }
}

/// One dashboard session.
///
/// Owns the merged table, which is loaded once and never changes, and the
/// current filter. Every filter event recomputes the snapshot from the
/// cached table.
pub struct DashboardSession {
    id: Uuid,
    rows: Vec<MergedRecord>,
    report: MergeReport,
    options: FilterOptions,
    selection: FilterSelection,
    registry: IndicatorRegistry,
    top_n: usize,
}

impl DashboardSession {
    /// Load, merge and derive. All pipeline errors surface here.
    pub fn open(sources: &DataSources, top_n: usize) -> PipelineResult<Self> {
        let id = Uuid::new_v4();
        let span = tracing::info_span!("session", %id);
        let _enter = span.enter();

        let orders = load_orders(&sources.orders_dir, &sources.orders_pattern)?;
        let returns = load_returns(&sources.returns_path)?;
        let people = load_people(&sources.people_path)?;
        let (rows, report) = build_table(orders, &returns, &people)?;

        tracing::info!("Session table ready: {} rows", rows.len());
        Ok(Self::with_id(id, rows, report, top_n))
    }

    /// Session over an already derived table.
    pub fn from_rows(rows: Vec<MergedRecord>, report: MergeReport, top_n: usize) -> Self {
        Self::with_id(Uuid::new_v4(), rows, report, top_n)
    }

    fn with_id(id: Uuid, rows: Vec<MergedRecord>, report: MergeReport, top_n: usize) -> Self {
        let options = filter::filter_options(&rows);
        Self {
            id,
            rows,
            report,
            options,
            selection: FilterSelection::all(),
            registry: IndicatorRegistry::new(),
            top_n,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn rows(&self) -> &[MergedRecord] {
        &self.rows
    }

    pub fn report(&self) -> &MergeReport {
        &self.report
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Handle one filter change and recompute.
    pub fn apply(&mut self, event: FilterEvent) -> DashboardSnapshot {
        tracing::debug!(session = %self.id, "filter event: {:?}", event);
        event.apply_to(&mut self.selection);
        self.snapshot()
    }

    /// Snapshot for the current filter.
    pub fn snapshot(&self) -> DashboardSnapshot {
        let filtered = filter::apply_filter(&self.rows, &self.selection);

        let indicator_ids = catalog()
            .sets
            .iter()
            .find(|s| s.id.0 == RETURNS_OVERVIEW_SET)
            .map(|s| s.indicators.clone())
            .unwrap_or_default();
        let indicators = self.registry.compute(&indicator_ids, &filtered);

        let monthly_returns = metrics::monthly_return_counts(&filtered);
        let previous_year_returns = metrics::previous_year_counts(&monthly_returns);

        tracing::info!(
            session = %self.id,
            "Recomputed dashboard: {} of {} rows selected",
            filtered.len(),
            self.rows.len()
        );

        DashboardSnapshot {
            session_id: self.id,
            computed_at: Utc::now(),
            filter: self.selection.clone(),
            options: self.options.clone(),
            indicators,
            top_employees: metrics::top_employees_by_returns(&filtered, self.top_n),
            monthly_returns,
            previous_year_returns,
            employee_share: metrics::employee_contribution_share(&filtered),
            rows: filtered,
            warnings: self.report.warnings.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::{LoadError, ParseError, PipelineError};
    use crate::shared::indicators::metadata::ids;
    use maplit::btreeset;
    use std::collections::BTreeSet;
    use std::path::Path;

    fn write(path: &Path, text: &str) {
        std::fs::write(path, text).unwrap();
    }

    fn sources(dir: &Path) -> DataSources {
        DataSources {
            orders_dir: dir.join("Orders"),
            orders_pattern: "*.csv".into(),
            returns_path: dir.join("Returns.csv"),
            people_path: dir.join("People.csv"),
        }
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Orders")).unwrap();
        write(
            &dir.path().join("Orders/part-1.csv"),
            "Order ID,Order Date,Region,Sales,Product Name\n\
             O1,2023-01-05,East,100,Stapler\n\
             O1,2023-01-05,East,50,Paper\n\
             O2,2023-02-10,West,20,Chair\n",
        );
        write(
            &dir.path().join("Orders/part-2.csv"),
            "Order ID,Order Date,Region,Sales,Product Name\n\
             O3,2024-02-11,West,40,Desk\n\
             O4,2024-03-01,Central,5,Pen\n",
        );
        write(
            &dir.path().join("Returns.csv"),
            "Order ID,Returned\nO1,Yes\nO3,Yes\n",
        );
        write(
            &dir.path().join("People.csv"),
            "Region,Person\nEast,Alice\nWest,Bob\n",
        );
        dir
    }

    fn indicator(snapshot: &DashboardSnapshot, id: &str) -> Option<f64> {
        snapshot
            .indicators
            .iter()
            .find(|v| v.id.0 == id)
            .and_then(|v| v.value)
    }

    #[test]
    fn test_example_scenario_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Orders")).unwrap();
        write(
            &dir.path().join("Orders/a.csv"),
            "Order ID,Order Date,Region,Sales\nO1,2023-01-05,East,100\nO1,2023-01-05,East,50\n",
        );
        write(&dir.path().join("Returns.csv"), "Order ID,Returned\nO1,Yes\n");
        write(&dir.path().join("People.csv"), "Region,Person\nEast,Alice\n");

        let session = DashboardSession::open(&sources(dir.path()), 5).unwrap();
        let snapshot = session.snapshot();

        assert_eq!(indicator(&snapshot, &ids::total_orders().0), Some(1.0));
        assert_eq!(indicator(&snapshot, &ids::return_count().0), Some(1.0));
        assert_eq!(indicator(&snapshot, &ids::return_rate().0), Some(1.0));
        assert_eq!(indicator(&snapshot, &ids::avg_return_value().0), Some(75.0));
        assert_eq!(snapshot.top_employees[0].person, "Alice");
        assert_eq!(snapshot.top_employees[0].count, 2);
    }

    #[test]
    fn test_open_and_filter_events() {
        let dir = fixture();
        let mut session = DashboardSession::open(&sources(dir.path()), 5).unwrap();

        assert_eq!(session.rows().len(), 5);
        assert_eq!(session.report().order_rows, 5);
        assert_eq!(session.options().regions, vec!["Central", "East", "West"]);
        assert_eq!(session.options().years, vec![2023, 2024]);
        assert!(session.options().persons.contains(&None));

        let all = session.snapshot();
        assert_eq!(all.rows.len(), 5);
        assert_eq!(indicator(&all, &ids::total_orders().0), Some(4.0));
        assert_eq!(indicator(&all, &ids::return_count().0), Some(2.0));
        assert_eq!(indicator(&all, &ids::return_rate().0), Some(0.5));
        assert_eq!(all.monthly_returns.len(), 2);
        assert!(all.previous_year_returns.is_empty());

        let west_2024 = session.apply(FilterEvent::SetRegions(Some(btreeset! {"West".to_string()})));
        assert_eq!(west_2024.rows.len(), 2);
        let west_2024 = session.apply(FilterEvent::SetYears(Some(btreeset! {2024})));
        assert_eq!(west_2024.rows.len(), 1);
        assert_eq!(indicator(&west_2024, &ids::avg_return_value().0), Some(40.0));
        assert_eq!(west_2024.employee_share.get("Bob"), Some(&1.0));

        let nothing = session.apply(FilterEvent::SetPersons(Some(BTreeSet::new())));
        assert!(nothing.rows.is_empty());
        assert_eq!(indicator(&nothing, &ids::return_rate().0), Some(0.0));
        assert_eq!(indicator(&nothing, &ids::avg_return_value().0), None);
        assert!(nothing.employee_share.is_empty());
        assert!(nothing.monthly_returns.is_empty());

        let reset = session.apply(FilterEvent::Reset);
        assert_eq!(reset.rows, all.rows);
        assert_eq!(reset.session_id, session.id());
        assert!(session.selection().is_identity());
    }

    #[test]
    fn test_people_fan_out_surfaces_in_snapshot() {
        let dir = fixture();
        write(
            &dir.path().join("People.csv"),
            "Region,Person\nEast,Alice\nEast,Erin\nWest,Bob\n",
        );

        let session = DashboardSession::open(&sources(dir.path()), 5).unwrap();
        assert_eq!(session.rows().len(), 7);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.warnings.len(), 1);
        assert_eq!(snapshot.warnings[0].key, "East");
        assert_eq!(snapshot.warnings[0].extra_rows, 2);
    }

    #[test]
    fn test_bad_date_fails_open() {
        let dir = fixture();
        write(
            &dir.path().join("Orders/part-3.csv"),
            "Order ID,Order Date,Region,Sales,Product Name\nO9,someday,East,1,Tape\n",
        );
        let err = DashboardSession::open(&sources(dir.path()), 5).err().unwrap();
        assert!(matches!(err, PipelineError::Parse(ParseError::InvalidDate { .. })));
    }

    #[test]
    fn test_missing_reference_file_fails_open() {
        let dir = fixture();
        std::fs::remove_file(dir.path().join("People.csv")).unwrap();
        let err = DashboardSession::open(&sources(dir.path()), 5).err().unwrap();
        assert!(matches!(err, PipelineError::Load(LoadError::Io { .. })));
    }
}
