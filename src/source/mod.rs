//! Read-only access to the store holding overdue bills.

mod file;
mod rest;

pub use file::JsonFileSource;
pub use rest::RestSource;

use std::path::Path;

use crate::bill::RawOverdueRecord;
use crate::config::{resolve_path, SourceSettings};
use crate::error::Result;

pub trait BillSource {
    /// All bills in the overdue view. Failure is all-or-nothing.
    fn fetch_overdue(&self) -> Result<Vec<RawOverdueRecord>>;

    /// A single bill by id, `None` when absent.
    fn fetch_by_id(&self, id: &str) -> Result<Option<RawOverdueRecord>>;
}

/// Build the source described by the `[source]` config table. Relative
/// file paths are anchored at `cfg_dir`.
pub fn from_settings(settings: &SourceSettings, cfg_dir: &Path) -> Box<dyn BillSource> {
    match settings {
        SourceSettings::Rest {
            url,
            api_key,
            view,
            timeout_secs,
        } => Box::new(RestSource::new(url, api_key, view, *timeout_secs)),
        SourceSettings::File { path } => Box::new(JsonFileSource::new(resolve_path(path, cfg_dir))),
    }
}
