mod project;
mod record;

pub use project::{day_difference, project, signed_day_difference};
pub use record::RawOverdueRecord;

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

use crate::error::OverdueError;

/// Notification escalation stage, derived from days overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    FirstNotice,
    SecondNotice,
    Protest,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::FirstNotice, Stage::SecondNotice, Stage::Protest];

    /// `<=30` first notice, `31..=60` second notice, `>60` protest.
    pub fn from_days(days_overdue: u32) -> Stage {
        match days_overdue {
            0..=30 => Stage::FirstNotice,
            31..=60 => Stage::SecondNotice,
            _ => Stage::Protest,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::FirstNotice => "1ª Notificação",
            Stage::SecondNotice => "2ª Notificação",
            Stage::Protest => "Protesto",
        }
    }

    pub fn cli_name(&self) -> &'static str {
        match self {
            Stage::FirstNotice => "first-notice",
            Stage::SecondNotice => "second-notice",
            Stage::Protest => "protest",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stage {
    type Err = OverdueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.cli_name() == s || stage.label() == s)
            .ok_or_else(|| OverdueError::InvalidStage(s.to_string()))
    }
}

/// Overdue-age range used for filtering and report colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    Days1To30,
    Days31To60,
    Days61To90,
    Over90,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Bucket::Days1To30,
        Bucket::Days31To60,
        Bucket::Days61To90,
        Bucket::Over90,
    ];

    /// Ranges are inclusive at both ends except `90+`, which is strictly `>90`.
    pub fn contains(&self, days_overdue: u32) -> bool {
        match self {
            Bucket::Days1To30 => (1..=30).contains(&days_overdue),
            Bucket::Days31To60 => (31..=60).contains(&days_overdue),
            Bucket::Days61To90 => (61..=90).contains(&days_overdue),
            Bucket::Over90 => days_overdue > 90,
        }
    }

    /// The bucket holding `days_overdue`, or `None` for zero days.
    pub fn of(days_overdue: u32) -> Option<Bucket> {
        Bucket::ALL.into_iter().find(|b| b.contains(days_overdue))
    }

    pub fn id(&self) -> &'static str {
        match self {
            Bucket::Days1To30 => "1-30",
            Bucket::Days31To60 => "31-60",
            Bucket::Days61To90 => "61-90",
            Bucket::Over90 => "90+",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Days1To30 => "1-30 dias",
            Bucket::Days31To60 => "31-60 dias",
            Bucket::Days61To90 => "61-90 dias",
            Bucket::Over90 => "+90 dias",
        }
    }

    /// Background color for report rows and legend swatches.
    pub fn color(&self) -> &'static str {
        match self {
            Bucket::Days1To30 => "#fef08a",
            Bucket::Days31To60 => "#fed7aa",
            Bucket::Days61To90 => "#fecaca",
            Bucket::Over90 => "#d8b4fe",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Bucket {
    type Err = OverdueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = if s == "+90" { "90+" } else { s };
        Bucket::ALL
            .into_iter()
            .find(|bucket| bucket.id() == wanted)
            .ok_or_else(|| OverdueError::InvalidBucket(s.to_string()))
    }
}

/// Which raw field supplied a bill's canonical amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountSource {
    /// `valot_num`, the known-good float column
    ValotNum,
    /// `valor_num`, the older integer-like column
    ValorNum,
    /// `valor`, the localized display string
    Valor,
    None,
}

impl AmountSource {
    pub fn field_name(&self) -> &'static str {
        match self {
            AmountSource::ValotNum => "valot_num",
            AmountSource::ValorNum => "valor_num",
            AmountSource::Valor => "valor",
            AmountSource::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: String,
    pub date: NaiveDate,
    pub stage: Stage,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerContact {
    pub id: String,
    pub date: NaiveDate,
    pub notes: String,
    pub outcome: String,
}

/// An overdue bill after projection from the raw store record.
#[derive(Debug, Clone, PartialEq)]
pub struct Bill {
    pub id: String,
    pub title: String,
    pub code: String,
    pub due_date: Option<DateTime<Utc>>,
    pub days_overdue: u32,
    pub stage: Stage,
    /// Canonical amount in reais
    pub amount: f64,
    pub amount_source: AmountSource,
    pub paid: bool,
    pub notifications: Vec<Notification>,
    pub contacts: Vec<CustomerContact>,
}

impl Bill {
    pub fn bucket(&self) -> Option<Bucket> {
        Bucket::of(self.days_overdue)
    }

    pub fn due_date_naive(&self) -> Option<NaiveDate> {
        self.due_date.map(|d| d.date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_thresholds() {
        assert_eq!(Stage::from_days(0), Stage::FirstNotice);
        assert_eq!(Stage::from_days(30), Stage::FirstNotice);
        assert_eq!(Stage::from_days(31), Stage::SecondNotice);
        assert_eq!(Stage::from_days(60), Stage::SecondNotice);
        assert_eq!(Stage::from_days(61), Stage::Protest);
        assert_eq!(Stage::from_days(400), Stage::Protest);
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(Bucket::of(0), None);
        assert_eq!(Bucket::of(1), Some(Bucket::Days1To30));
        assert_eq!(Bucket::of(30), Some(Bucket::Days1To30));
        assert_eq!(Bucket::of(31), Some(Bucket::Days31To60));
        assert_eq!(Bucket::of(60), Some(Bucket::Days31To60));
        assert_eq!(Bucket::of(61), Some(Bucket::Days61To90));
        assert_eq!(Bucket::of(90), Some(Bucket::Days61To90));
        assert_eq!(Bucket::of(91), Some(Bucket::Over90));
    }

    #[test]
    fn test_parse_bucket_and_stage() {
        assert_eq!("31-60".parse::<Bucket>().unwrap(), Bucket::Days31To60);
        assert_eq!("+90".parse::<Bucket>().unwrap(), Bucket::Over90);
        assert!("0-1".parse::<Bucket>().is_err());

        assert_eq!("protest".parse::<Stage>().unwrap(), Stage::Protest);
        assert_eq!("2ª Notificação".parse::<Stage>().unwrap(), Stage::SecondNotice);
        assert!("paid".parse::<Stage>().is_err());
    }
}
