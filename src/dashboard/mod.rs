mod filter;
mod sort;
mod summary;

pub use filter::{filter_bills, FilterState};
pub use sort::{sort_bills, SortDirection, SortField, SortState};
pub use summary::{summarize, Summary};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::bill::{project, Bill};
use crate::source::BillSource;

pub const LOAD_ERROR_MESSAGE: &str =
    "Não foi possível carregar os boletos. Tente novamente mais tarde.";
pub const EMPTY_MESSAGE: &str = "Nenhum boleto em atraso encontrado.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Everything a presenter needs after one recomputation.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Filtered, in input order. Feeds the summary and the report.
    pub filtered: Vec<Bill>,
    /// Filtered, then sorted for display.
    pub sorted: Vec<Bill>,
    pub summary: Summary,
}

/// Holds the fetched bills plus the user's filter and sort choices.
#[derive(Debug, Clone)]
pub struct Dashboard {
    bills: Vec<Bill>,
    state: LoadState,
    pub filter: FilterState,
    pub sort: SortState,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            bills: Vec::new(),
            state: LoadState::Loading,
            filter: FilterState::default(),
            sort: SortState::default(),
        }
    }
}

impl Dashboard {
    pub fn new(filter: FilterState, sort: SortState) -> Self {
        Self {
            filter,
            sort,
            ..Self::default()
        }
    }

    /// Fetch and project all overdue bills as of `now`.
    ///
    /// On failure the previously loaded bills stay (none on first load)
    /// and the state carries the error until the next successful load.
    pub fn load(&mut self, source: &dyn BillSource, now: DateTime<Utc>) -> &LoadState {
        self.state = LoadState::Loading;
        info!("loading overdue bills");

        match source.fetch_overdue() {
            Ok(records) => {
                self.bills = records.iter().map(|r| project(r, now)).collect();
                info!(count = self.bills.len(), "overdue bills loaded");
                self.state = LoadState::Ready;
            }
            Err(e) => {
                warn!(error = %e, cached = self.bills.len(), "failed to load overdue bills");
                self.state = LoadState::Failed(e.to_string());
            }
        }
        &self.state
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    /// Recompute the derived view. Pure: same state, same output.
    pub fn view(&self) -> DashboardView {
        let filtered = self.filter.apply(&self.bills);
        let summary = summarize(&filtered);
        let sorted = self.sort.apply(&filtered);
        DashboardView {
            filtered,
            sorted,
            summary,
        }
    }

    /// Message to show instead of the bill list, if any.
    pub fn status_message(&self) -> Option<&'static str> {
        match &self.state {
            LoadState::Loading => None,
            LoadState::Failed(_) => Some(LOAD_ERROR_MESSAGE),
            LoadState::Ready if !self.bills.iter().any(|b| self.filter.matches(b)) => {
                Some(EMPTY_MESSAGE)
            }
            LoadState::Ready => None,
        }
    }
}

#[cfg(test)]
pub(crate) fn test_bill(id: &str, days_overdue: u32, amount: f64) -> Bill {
    use crate::bill::{AmountSource, Stage};

    Bill {
        id: id.to_string(),
        title: format!("Cliente {id}"),
        code: format!("BOL-{id}"),
        due_date: None,
        days_overdue,
        stage: Stage::from_days(days_overdue),
        amount,
        amount_source: AmountSource::ValotNum,
        paid: false,
        notifications: Vec::new(),
        contacts: Vec::new(),
    }
}
