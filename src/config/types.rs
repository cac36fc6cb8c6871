use serde::{Deserialize, Serialize};

use crate::models::report::SpotCheckRefType;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_REPORTS_PATH: &str = "./data/reports";
pub const DEFAULT_RANGE_MONTHS: u32 = 6;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SpotcheckConfig {
    pub server: Option<ServerConfig>,
    pub reports: Option<ReportsConfig>,
    pub summary: Option<SummaryConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ReportsConfig {
    /// A report file or a directory of `*.json` report files.
    pub path: Option<String>,
    /// Reference source the `summary` command reports on.
    pub reference_type: Option<SpotCheckRefType>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SummaryConfig {
    /// Months of history listed when no start date is given.
    pub default_range_months: Option<u32>,
}

/// Settings after applying CLI > config file > defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effective {
    pub host: String,
    pub port: u16,
    pub reports_path: String,
    pub reference_type: SpotCheckRefType,
    pub default_range_months: u32,
}

impl SpotcheckConfig {
    pub fn resolve(
        &self,
        cli_host: Option<&str>,
        cli_port: Option<u16>,
        cli_reports: Option<&str>,
    ) -> Effective {
        let server = self.server.clone().unwrap_or_default();
        let reports = self.reports.clone().unwrap_or_default();
        Effective {
            host: cli_host
                .map(str::to_string)
                .or(server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: cli_port.or(server.port).unwrap_or(DEFAULT_PORT),
            reports_path: cli_reports
                .map(str::to_string)
                .or(reports.path)
                .unwrap_or_else(|| DEFAULT_REPORTS_PATH.to_string()),
            reference_type: reports.reference_type.unwrap_or(SpotCheckRefType::LbdcDaybreak),
            default_range_months: self
                .summary
                .as_ref()
                .and_then(|s| s.default_range_months)
                .unwrap_or(DEFAULT_RANGE_MONTHS),
        }
    }
}
