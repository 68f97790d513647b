//! Notiboard CLI
//!
//! Terminal front end for the notification dashboard:
//! - Watch the dashboard live
//! - List, count and chart notifications
//! - Delete or clear notifications
//! - Send test notifications

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use notiboard::chart::CHART_LABEL;
use notiboard::render::EMPTY_PLACEHOLDER;
use notiboard::{
    Alert, Backend, ChartSink, Config, Confirm, Dashboard, DashboardView, FilterState,
    HttpBackend, MutationClient, MutationOutcome, NewNotification, NotificationId, RenderedList,
    SyncOutcome, SyncPoller, TextBarChart,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "notiboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Notification dashboard for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Notification backend URL (overrides the config file)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll the backend and redraw on every change
    Watch {
        /// Only show notifications containing this text
        #[arg(short, long, default_value = "")]
        search: String,
        /// Only show notifications from this app
        #[arg(short, long, default_value = "")]
        app: String,
    },

    /// List notifications
    List {
        /// Only show notifications containing this text
        #[arg(short, long, default_value = "")]
        search: String,
        /// Only show notifications from this app
        #[arg(short, long, default_value = "")]
        app: String,
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show counters and the per-app histogram
    Stats,

    /// Remove one notification
    Delete {
        /// Notification id
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Remove all notifications
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Send a notification to the backend
    Send {
        /// App name
        #[arg(long)]
        app: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        text: Option<String>,
        /// Macro that produced the notification
        #[arg(long = "macro")]
        macro_name: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Confirmation read from stdin, or skipped with `--yes`
struct StdinConfirm {
    assume_yes: bool,
}

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        eprint!("{} [y/N] ", prompt);
        let _ = std::io::stderr().flush();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

struct StderrAlert;

impl Alert for StderrAlert {
    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = notiboard::config::generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.backend_url {
        config.backend.url = url;
    }

    init_logging(&config);

    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&config.backend)?);
    let url = config.backend.url.clone();

    match cli.command {
        Commands::Watch { search, app } => {
            let poller = Arc::new(SyncPoller::with_dashboard(
                backend,
                Dashboard::with_filter(FilterState::new(search, app)),
            ));
            watch(poller).await;
        }

        Commands::List {
            search,
            app,
            format,
        } => {
            let poller = SyncPoller::with_dashboard(
                backend,
                Dashboard::with_filter(FilterState::new(search, app)),
            );
            sync_once(&poller, &url).await?;

            let dashboard = poller.dashboard();
            let dashboard = dashboard.read().await;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&dashboard.view().list)?)
                }
                OutputFormat::Table => print_cards(&dashboard.view().list),
            }
        }

        Commands::Stats => {
            let poller = SyncPoller::new(backend);
            sync_once(&poller, &url).await?;

            let dashboard = poller.dashboard();
            let dashboard = dashboard.read().await;
            let mut chart = TextBarChart::default();
            chart.replace_data(&dashboard.view().chart_data());
            print_stats(dashboard.view());
            println!();
            print_chart(&chart);
        }

        Commands::Delete { id, yes } => {
            let (mutations, poller) = mutation_client(backend, yes);
            // load the list first so the prompt can name the app
            poller.sync().await;

            let id = {
                let dashboard = poller.dashboard();
                let dashboard = dashboard.read().await;
                resolve_id(&dashboard, id)
            };
            report(mutations.delete_one(&id).await, "Notification removed")?;
        }

        Commands::Clear { yes } => {
            let (mutations, _) = mutation_client(backend, yes);
            report(mutations.clear_all().await, "All notifications cleared")?;
        }

        Commands::Send {
            app,
            title,
            text,
            macro_name,
        } => {
            let (mutations, _) = mutation_client(backend, true);
            let notification = NewNotification {
                app_name: app,
                title,
                text,
                macro_name,
            };
            report(mutations.submit(notification).await, "Notification sent")?;
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("notiboard={}", config.logging.level))
    });

    let json = config.logging.format == "json";
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let pretty_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(pretty_layer)
        .init();
}

async fn sync_once(poller: &SyncPoller, url: &str) -> anyhow::Result<()> {
    if poller.sync().await == SyncOutcome::Failed {
        anyhow::bail!("Could not load notifications from {}", url);
    }
    Ok(())
}

fn mutation_client(backend: Arc<dyn Backend>, assume_yes: bool) -> (MutationClient, Arc<SyncPoller>) {
    let poller = Arc::new(SyncPoller::new(Arc::clone(&backend)));
    let client = MutationClient::new(
        backend,
        Arc::clone(&poller),
        Arc::new(StdinConfirm { assume_yes }),
        Arc::new(StderrAlert),
    );
    (client, poller)
}

/// Match a command-line id against the loaded list, so numeric ids compare equal
fn resolve_id(dashboard: &Dashboard, raw: String) -> NotificationId {
    dashboard
        .store()
        .notifications()
        .iter()
        .filter_map(|n| n.usable_id())
        .find(|id| id.to_string() == raw)
        .cloned()
        .unwrap_or_else(|| NotificationId::from(raw))
}

/// Print the outcome; a failure becomes the command's error
fn report(outcome: MutationOutcome, done: &str) -> anyhow::Result<()> {
    match outcome {
        MutationOutcome::Completed { .. } => println!("{}", done),
        MutationOutcome::Cancelled => println!("Cancelled"),
        MutationOutcome::Failed { message } => anyhow::bail!(message),
    }
    Ok(())
}

async fn watch(poller: Arc<SyncPoller>) {
    let mut views = poller.subscribe();
    let handle = Arc::clone(&poller).start();
    let mut chart = TextBarChart::default();

    loop {
        tokio::select! {
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                chart.replace_data(&view.chart_data());

                // clear screen, cursor home
                print!("\x1B[2J\x1B[H");
                println!("Updated {}", chrono::Local::now().format("%H:%M:%S"));
                println!();
                print_dashboard(&view, &chart);
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    handle.abort();
    let status = poller.status().await;
    tracing::info!(
        syncs = status.syncs_accepted,
        failures = status.consecutive_failures,
        "Stopped watching"
    );
}

fn print_dashboard(view: &DashboardView, chart: &TextBarChart) {
    print_stats(view);
    if !view.search_term.is_empty() || !view.selected_app.is_empty() {
        println!(
            "Filter: search={:?} app={:?}",
            view.search_term, view.selected_app
        );
    }
    println!();
    print_chart(chart);
    println!();
    print_cards(&view.list);
}

fn print_stats(view: &DashboardView) {
    println!(
        "Notifications: {}   Apps: {}   Keywords: {}",
        view.stats.total, view.stats.distinct_apps, view.stats.distinct_keywords
    );
}

fn print_chart(chart: &TextBarChart) {
    println!("{}", CHART_LABEL);
    println!("{}", "-".repeat(CHART_LABEL.len()));
    for line in chart.lines() {
        println!("{}", line);
    }
}

fn print_cards(list: &RenderedList) {
    match list {
        RenderedList::NotLoaded => println!("Waiting for notifications..."),
        RenderedList::Placeholder => println!("{}", EMPTY_PLACEHOLDER),
        RenderedList::Cards(cards) => {
            for card in cards {
                let keyword = card
                    .keyword
                    .as_deref()
                    .map(|k| format!("  [{}]", k))
                    .unwrap_or_default();
                println!("#{} {}  {}{}", card.id, card.app, card.timestamp, keyword);
                for line in card.content.lines() {
                    println!("    {}", line);
                }
                println!();
            }
        }
    }
}
