use clap::Parser;

use mas_dashboard::time_format::DEFAULT_PATTERN;
use mas_dashboard::MarkupContract;

#[derive(Debug, Parser)]
#[command(name = "mas-dashboard")]
#[command(about = "Terminal dashboard for MAS cluster deployment status", long_about = None)]
pub struct Args {
    /// Dashboard server base URL (serves /api/status)
    #[arg(
        long,
        env = "MAS_DASHBOARD_SERVER_URL",
        default_value = "http://127.0.0.1:4567"
    )]
    pub server_url: String,

    /// Page layout to render
    #[arg(long, value_enum, default_value_t = MarkupContract::Current)]
    pub markup: MarkupContract,

    /// strftime pattern for the last-update timestamp (local time zone)
    #[arg(long, env = "MAS_DASHBOARD_TIME_FORMAT", default_value = DEFAULT_PATTERN)]
    pub time_format: String,

    /// Refresh once, print the dashboard and exit
    #[arg(long)]
    pub once: bool,

    /// OTLP/HTTP endpoint for span export
    #[arg(long, env = "MAS_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Bearer token for the OTLP endpoint
    #[arg(long, env = "MAS_OTLP_TOKEN")]
    pub otlp_token: Option<String>,
}
