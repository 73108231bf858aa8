use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::bill::Bill;
use crate::error::OverdueError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Amount,
    DueDate,
    DaysOverdue,
}

impl SortField {
    pub fn cli_name(&self) -> &'static str {
        match self {
            SortField::Amount => "amount",
            SortField::DueDate => "due-date",
            SortField::DaysOverdue => "days-overdue",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for SortField {
    type Err = OverdueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "amount" => Ok(SortField::Amount),
            "due-date" | "date" | "dueDate" => Ok(SortField::DueDate),
            "days-overdue" | "daysOverdue" => Ok(SortField::DaysOverdue),
            _ => Err(OverdueError::InvalidSortField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::DaysOverdue,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    /// Same field flips direction; a new field starts descending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Desc;
        }
    }

    pub fn apply(&self, bills: &[Bill]) -> Vec<Bill> {
        sort_bills(bills, self.field, self.direction)
    }
}

/// Return a sorted copy of `bills`. The sort is stable in both directions:
/// descending flips the comparison, not the sequence, so equal keys keep
/// their input order.
pub fn sort_bills(bills: &[Bill], field: SortField, direction: SortDirection) -> Vec<Bill> {
    let mut sorted = bills.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, field);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    sorted
}

fn compare(a: &Bill, b: &Bill, field: SortField) -> Ordering {
    match field {
        SortField::Amount => a.amount.total_cmp(&b.amount),
        SortField::DueDate => a.due_date.cmp(&b.due_date),
        SortField::DaysOverdue => a.days_overdue.cmp(&b.days_overdue),
    }
}
