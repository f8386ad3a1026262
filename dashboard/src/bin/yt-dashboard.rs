use clap::{Parser, ValueEnum};
use eyre::Context;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_dashboard::dashboard::DEFAULT_MAX_RESULTS;
use youtube_dashboard::youtube_api::client::{ANALYTICS_API_BASE, DATA_API_BASE};
use youtube_dashboard::{
    ApiEndpoints, DashboardView, Period, Session, SortDirection, SortField, SortState,
    YouTubeClient,
};

/// Show statistics for your YouTube channel over a reporting period.
#[derive(Debug, Parser)]
#[command(name = "yt-dashboard", version)]
struct Args {
    /// JSON session file from the sign-in provider, with a `provider_token` field.
    ///
    /// Takes precedence over --access-token.
    #[arg(long)]
    session: Option<PathBuf>,

    /// OAuth access token for the YouTube Data and Analytics APIs.
    #[arg(long, env = "YOUTUBE_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Reporting period: 7d, 30d, 90d or all. Anything else means 30d.
    #[arg(long, short, default_value = "30d")]
    duration: Period,

    /// Number of recent uploads to list.
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: u32,

    /// Column to sort the videos table by (descending unless --ascending).
    #[arg(long, value_enum, default_value_t = SortColumn::Views)]
    sort: SortColumn,

    #[arg(long)]
    ascending: bool,

    #[arg(long, env = "YOUTUBE_DATA_API_BASE", default_value = DATA_API_BASE)]
    data_api_base: String,

    #[arg(long, env = "YOUTUBE_ANALYTICS_API_BASE", default_value = ANALYTICS_API_BASE)]
    analytics_api_base: String,

    /// Default log level; RUST_LOG overrides it.
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortColumn {
    Title,
    Views,
    Change,
    Date,
}

impl From<SortColumn> for SortField {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Title => SortField::Title,
            SortColumn::Views => SortField::Views,
            SortColumn::Change => SortField::ViewsChange,
            SortColumn::Date => SortField::UploadDate,
        }
    }
}

async fn load_session(args: &Args) -> eyre::Result<Option<Session>> {
    if let Some(path) = &args.session {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("read session file {}", path.display()))?;
        let session: Session = serde_json::from_str(&raw).context("parse session file")?;
        return Ok(Some(session));
    }
    Ok(args.access_token.clone().map(Session::with_provider_token))
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(args.log_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let session = load_session(&args).await?;
    if session.is_none() {
        tracing::warn!("no session file or access token given");
    }

    let http = reqwest::Client::builder()
        // SSRF no thank you.
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .context("build HTTP client")?;
    let client = YouTubeClient::with_endpoints(
        http,
        ApiEndpoints {
            data_api: args.data_api_base.clone(),
            analytics_api: args.analytics_api_base.clone(),
        },
    );

    let mut view = DashboardView::load(
        &client,
        session.as_ref(),
        args.duration,
        args.max_results,
    )
    .await
    .wrap_err("Error loading data")?;

    view.videos.sort = SortState {
        field: args.sort.into(),
        direction: if args.ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        },
    };

    print!("{view}");
    Ok(())
}
