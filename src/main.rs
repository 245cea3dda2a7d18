use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use vealthx_handoff::application::composer::RedirectComposer;
use vealthx_handoff::application::confirmation::ConfirmationPage;
use vealthx_handoff::application::sequencer::AuthHandoff;
use vealthx_handoff::config::HandoffConfig;
use vealthx_handoff::domain::params::{AuthCallback, IncomingParameters, PaymentDetails};
use vealthx_handoff::domain::ports::NavigatorRef;
use vealthx_handoff::domain::state::HandoffState;
use vealthx_handoff::infrastructure::navigators::{
    RecordingNavigator, SystemNavigator, WriterNavigator,
};
use vealthx_handoff::interfaces::query::read_query;
use vealthx_handoff::interfaces::render::{self, PageReport};

#[derive(Parser)]
#[command(name = "handoff", author, version, about, long_about = None)]
struct Cli {
    /// TOML file overriding deep-link prefixes and timings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Where redirects go
    #[arg(long, global = true, value_enum, default_value_t = NavigatorKind::Stdout)]
    navigator: NavigatorKind,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Payment confirmation page
    Payment {
        /// Landing URL or query string
        url: String,

        /// Press "Continue to App"
        #[arg(long = "continue")]
        continue_to_app: bool,
    },

    /// Auth handoff page: redirects automatically, then offers a fallback
    Auth {
        /// Landing URL or query string
        url: String,

        /// Press the fallback button once it appears
        #[arg(long)]
        tap: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum NavigatorKind {
    /// Print `redirect: <url>` lines
    Stdout,
    /// Open the deep link with the system URL handler
    System,
    /// Only record redirects (they still appear in JSON output)
    None,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = match &cli.config {
        Some(path) => HandoffConfig::from_file(path).into_diagnostic()?,
        None => HandoffConfig::default(),
    };

    // JSON output owns stdout, so printed redirects are only recorded.
    let downstream: Option<NavigatorRef> = match (cli.navigator, cli.format) {
        (NavigatorKind::System, _) => Some(Arc::new(SystemNavigator)),
        (NavigatorKind::Stdout, Format::Text) => Some(Arc::new(WriterNavigator::stdout())),
        _ => None,
    };
    let recorder = match downstream {
        Some(inner) => RecordingNavigator::forwarding(inner),
        None => RecordingNavigator::new(),
    };
    let composer = RedirectComposer::new(Arc::new(recorder.clone()));

    match cli.command {
        Command::Payment {
            url,
            continue_to_app,
        } => {
            let query = read_query(&url).into_diagnostic()?;
            let page = ConfirmationPage::load(
                PaymentDetails::extract(&query),
                config.payment_link(),
                composer,
            );

            if cli.format == Format::Text {
                println!("{}", render::payment_text(&page));
            }
            if continue_to_app {
                page.continue_to_app().await.into_diagnostic()?;
            }
            if cli.format == Format::Json {
                let report = PageReport::payment(&page, recorder.targets());
                println!("{}", report.to_json().into_diagnostic()?);
            }
        }
        Command::Auth { url, tap } => {
            let query = read_query(&url).into_diagnostic()?;
            let handoff = AuthHandoff::start(
                AuthCallback::extract(&query),
                config.auth_links(),
                composer,
                config.timings(),
            );

            if cli.format == Format::Text {
                println!("{}", render::auth_header(handoff.params()));
            }
            let interrupted = watch_handoff(&handoff, cli.format).await;

            if tap && !interrupted {
                handoff.open_app().await.into_diagnostic()?;
            }
            if cli.format == Format::Json {
                let report = PageReport::auth(&handoff, recorder.targets());
                println!("{}", report.to_json().into_diagnostic()?);
            }
            handoff.teardown().await;
        }
    }

    Ok(())
}

/// Prints status lines until the fallback is revealed. Returns `true` if the
/// user interrupted first.
async fn watch_handoff(handoff: &AuthHandoff, format: Format) -> bool {
    let mut updates = handoff.subscribe();
    let mut last_line = String::new();
    loop {
        let snapshot = *updates.borrow_and_update();
        if format == Format::Text {
            let line = render::auth_status(&snapshot);
            if line != last_line {
                println!("{line}");
                last_line = line;
            }
        }
        if snapshot.state == HandoffState::Fallback {
            return false;
        }

        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    return false;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted, tearing down");
                return true;
            }
        }
    }
}
