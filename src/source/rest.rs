use std::time::Duration;

use tracing::{info, warn};
use ureq::Agent;

use super::BillSource;
use crate::bill::RawOverdueRecord;
use crate::error::{OverdueError, Result};

/// Queries a PostgREST-style view (`/rest/v1/<view>`) over HTTP.
pub struct RestSource {
    agent: Agent,
    base_url: String,
    api_key: String,
    view: String,
}

impl RestSource {
    pub fn new(base_url: &str, api_key: &str, view: &str, timeout_secs: u64) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout_secs)))
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            view: view.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.view)
    }

    fn get_rows(&self, filter: Option<(&str, String)>) -> Result<Vec<RawOverdueRecord>> {
        let url = self.endpoint();
        let mut request = self
            .agent
            .get(url.as_str())
            .query("select", "*")
            .header("apikey", self.api_key.as_str())
            .header("Authorization", format!("Bearer {}", self.api_key));
        if let Some((column, value)) = filter {
            request = request.query(column, value);
        }

        let body: String = request
            .call()
            .map_err(|e| OverdueError::Fetch(e.to_string()))?
            .body_mut()
            .read_to_string()
            .map_err(|e| OverdueError::Fetch(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| OverdueError::Decode {
            origin: url,
            source: e,
        })
    }
}

impl BillSource for RestSource {
    fn fetch_overdue(&self) -> Result<Vec<RawOverdueRecord>> {
        info!(view = %self.view, "querying overdue bills");
        let rows = self.get_rows(None)?;
        info!(count = rows.len(), "overdue bills received");
        Ok(rows)
    }

    /// Lookup failures are logged and reported as "not found".
    fn fetch_by_id(&self, id: &str) -> Result<Option<RawOverdueRecord>> {
        match self.get_rows(Some(("id", format!("eq.{id}")))) {
            Ok(rows) => Ok(rows.into_iter().next()),
            Err(e) => {
                warn!(id, error = %e, "bill lookup failed");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let source = RestSource::new(
            "https://abc.supabase.co/",
            "key",
            "boletos_em_atraso_30_dias",
            5,
        );
        assert_eq!(
            source.endpoint(),
            "https://abc.supabase.co/rest/v1/boletos_em_atraso_30_dias"
        );
    }

    #[test]
    fn test_unreachable_host_is_fetch_error() {
        let source = RestSource::new("http://127.0.0.1:9", "key", "bills", 1);
        assert!(matches!(source.fetch_overdue(), Err(OverdueError::Fetch(_))));
        assert!(source.fetch_by_id("1").unwrap().is_none());
    }
}
