use serde::{Deserialize, Serialize};

pub const DEFAULT_VIEW: &str = "boletos_em_atraso_30_dias";

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub source: SourceSettings,
    #[serde(default)]
    pub report: ReportSettings,
}

/// Where overdue bills come from.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceSettings {
    Rest {
        url: String,
        api_key: String,
        #[serde(default = "default_view")]
        view: String,
        #[serde(default = "default_timeout")]
        timeout_secs: u64,
    },
    File {
        path: String,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReportSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_footer")]
    pub footer: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            footer: default_footer(),
        }
    }
}

fn default_view() -> String {
    DEFAULT_VIEW.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_footer() -> String {
    "Relatório de Inadimplência".to_string()
}
