use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use pluginwarden_console::console::{Console, Feed, VersionOutcome, View};
use pluginwarden_console::model::ConsoleConfig;
use pluginwarden_console::remote::RemoteClient;

#[derive(Parser)]
#[command(name = "pluginwarden-console")]
#[command(about = "Plugin-warden management console", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/pluginwarden/console.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Server base URL (overrides config and PLUGINWARDEN_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Bearer token (overrides config and PLUGINWARDEN_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the signed-in author
    Whoami {
        #[arg(long)]
        json: bool,
    },

    /// Whether the app is installed on at least one repository
    SetupStatus {
        #[arg(long)]
        json: bool,
    },

    /// List (or search) repositories
    Repos {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Show a repository's releases
    Releases {
        repo_id: i64,
        #[arg(long)]
        json: bool,
    },

    /// Watch or unwatch a repository
    Watch { repo_id: i64, state: Switch },

    /// Publish or hide a release
    Visible { release_id: i64, state: Switch },

    /// Event log for a day (YYYY-MM-DD, defaults to today on the server)
    Logs {
        #[arg(long)]
        day: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Dashboard counters
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// Plugin catalog
    Plugins {
        #[arg(long)]
        json: bool,
    },

    /// Show a plugin card at a specific version
    Resolve {
        plugin_id: String,
        version: String,
        #[arg(long)]
        json: bool,
    },

    /// Print the sign-in URL
    LoginUrl,

    /// Print the sign-out URL
    LogoutUrl,

    /// Keep a view live until Ctrl-C
    Run {
        #[arg(long, value_enum, default_value_t = ViewArg::Dashboard)]
        view: ViewArg,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

impl Switch {
    fn as_bool(self) -> bool {
        matches!(self, Switch::On)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    Dashboard,
    Repos,
    Store,
}

impl From<ViewArg> for View {
    fn from(v: ViewArg) -> Self {
        match v {
            ViewArg::Dashboard => View::Dashboard,
            ViewArg::Repos => View::Repositories,
            ViewArg::Store => View::Store,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn print_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| format!("serialize {}", what))?
    );
    Ok(())
}

fn parse_day(raw: &str) -> Result<time::Date> {
    let fmt = time::macros::format_description!("[year]-[month]-[day]");
    time::Date::parse(raw.trim(), fmt).with_context(|| format!("invalid day {:?} (want YYYY-MM-DD)", raw))
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut cfg = ConsoleConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        cfg.base_url = url;
    }
    if let Some(token) = cli.token {
        cfg.token = Some(token);
    }
    cfg.validate()?;

    let client = Arc::new(RemoteClient::new(&cfg)?);
    let mut console = Console::new(Arc::clone(&client), &cfg);

    match cli.command {
        Commands::Whoami { json } => {
            let me = client.me().await?;
            if json {
                print_json(&me, "identity")?;
            } else {
                println!("{} (id {})", me.login, me.id);
                if !me.html_url.is_empty() {
                    println!("{}", me.html_url);
                }
            }
        }

        Commands::SetupStatus { json } => {
            let installed = client.installed_exists().await?;
            if json {
                print_json(&serde_json::json!({ "installed_repo_exists": installed }), "setup status")?;
            } else if installed {
                println!("setup complete");
            } else {
                println!("setup pending: install the app on at least one repository");
            }
        }

        Commands::Repos { search, json } => {
            if let Some(q) = search {
                let found = client.search_repositories(&q).await?;
                if json {
                    print_json(&found, "repositories")?;
                } else {
                    for r in found {
                        println!("{:>10} {} {}", r.id, r.full_name, watched_mark(r.watched));
                    }
                }
            } else {
                console.refresh_repositories().await?;
                let rows = console.repository_table();
                if json {
                    print_json(&rows, "repositories")?;
                } else {
                    for row in rows {
                        println!(
                            "{:>10} {:<40} releases {}/{} {}",
                            row.id,
                            row.full_name,
                            row.releases_open,
                            row.releases_total,
                            watched_mark(row.watched)
                        );
                    }
                }
            }
        }

        Commands::Releases { repo_id, json } => {
            console.refresh_repositories().await?;
            if !console.open_releases(repo_id) {
                anyhow::bail!("repository {} not found", repo_id);
            }
            let Some(repo) = console.release_view() else {
                anyhow::bail!("repository {} not found", repo_id);
            };
            if json {
                print_json(repo, "releases")?;
            } else {
                println!("{}", repo.full_name);
                for rel in &repo.releases {
                    println!(
                        "{:>10} {:<20} {}{}",
                        rel.id,
                        rel.tag_name,
                        if rel.visible { "visible" } else { "hidden" },
                        if rel.prerelease { " (prerelease)" } else { "" }
                    );
                }
            }
        }

        Commands::Watch { repo_id, state } => {
            console.toggle_watch(repo_id, state.as_bool()).await?;
            match console.store().repository(repo_id) {
                Some(r) => println!("{} {}", r.full_name, watched_mark(r.watched)),
                None => println!("repository {} updated", repo_id),
            }
        }

        Commands::Visible { release_id, state } => {
            console.toggle_visible(release_id, state.as_bool()).await?;
            if let Some(n) = console.notices().last() {
                println!("{}", n.message);
            }
        }

        Commands::Logs { day, json } => {
            let day = day.as_deref().map(parse_day).transpose()?;
            console.refresh_logs(day).await?;
            let logs = console.store().logs();
            if json {
                print_json(logs, "logs")?;
            } else {
                for e in logs {
                    println!("{} {:<7} {}", e.timestamp, e.level, e.message);
                }
            }
        }

        Commands::Stats { json } => {
            console.refresh_stats().await?;
            let s = console.store().stats();
            if json {
                print_json(s, "stats")?;
            } else {
                println!("plugins: {}", s.total_plugins);
                println!("installed repos: {}", s.installed_repos);
                println!("watched repos: {}", s.watched_repos);
            }
        }

        Commands::Plugins { json } => {
            console.refresh_catalog().await?;
            let cards = console.plugin_grid();
            if json {
                print_json(&cards, "catalog")?;
            } else {
                for c in cards {
                    println!(
                        "{:<32} {:<12} [{}]",
                        c.record.name,
                        c.selected_version,
                        c.versions.join(", ")
                    );
                }
            }
        }

        Commands::Resolve {
            plugin_id,
            version,
            json,
        } => {
            console.refresh_catalog().await?;
            match console.select_version(&plugin_id, &version).await {
                VersionOutcome::UnknownPlugin => anyhow::bail!("plugin {} not in catalog", plugin_id),
                VersionOutcome::Failed => {
                    anyhow::bail!("could not resolve {} {}", plugin_id, version)
                }
                VersionOutcome::Default | VersionOutcome::Resolved => {}
            }
            let grid = console.plugin_grid();
            let Some(card) = grid.iter().find(|c| c.id == plugin_id) else {
                anyhow::bail!("plugin {} not in catalog", plugin_id);
            };
            if json {
                print_json(card, "plugin card")?;
            } else {
                println!("{} {}", card.record.name, card.record.version);
                if !card.record.description.is_empty() {
                    println!("{}", card.record.description);
                }
                if let Some(url) = card.record.download_link() {
                    println!("download: {}", url);
                }
            }
        }

        Commands::LoginUrl => println!("{}", client.login_url()),
        Commands::LogoutUrl => println!("{}", client.logout_url()),

        Commands::Run { view, json } => run_view(&mut console, view.into(), json).await?,
    }

    Ok(())
}

fn watched_mark(watched: bool) -> &'static str {
    if watched { "watched" } else { "-" }
}

async fn run_view(console: &mut Console<RemoteClient>, view: View, json: bool) -> Result<()> {
    let login = console.start().await.identity().map(|i| i.login.clone());
    match login {
        Some(login) => eprintln!("signed in as {}", login),
        None => {
            eprintln!("not signed in; sign in at {}", console.api().login_url());
            return Ok(());
        }
    }
    if console.session().is_setup_pending() {
        eprintln!("setup pending: install the app on at least one repository");
    }
    console.set_view(Some(view));

    loop {
        tokio::select! {
            fed = console.pump() => {
                let Some(feed) = fed else { break };
                render(console, feed, json)?;
            }
            _ = tokio::signal::ctrl_c() => {
                eprintln!("interrupted");
                break;
            }
        }
    }
    console.set_view(None);
    Ok(())
}

fn render(console: &Console<RemoteClient>, feed: Feed, json: bool) -> Result<()> {
    match feed {
        Feed::SetupCheck => {
            if !console.session().is_setup_pending() {
                println!("setup complete");
            }
        }
        Feed::Logs | Feed::Stats => {
            let dash = console.dashboard();
            if json {
                return print_json(&dash, "dashboard");
            }
            println!(
                "plugins {} | installed {} | watched {}{}",
                dash.stats.total_plugins,
                dash.stats.installed_repos,
                dash.stats.watched_repos,
                if dash.setup_pending { " | setup pending" } else { "" }
            );
            if feed == Feed::Logs {
                for e in dash.logs.iter().rev().take(5).rev() {
                    println!("  {} {:<7} {}", e.timestamp, e.level, e.message);
                }
            }
        }
        Feed::Repositories => {
            let rows = console.repository_table();
            if json {
                return print_json(&rows, "repositories");
            }
            println!("{} repositories", rows.len());
            for row in rows {
                println!(
                    "  {:<40} {}/{} {}",
                    row.full_name,
                    row.releases_open,
                    row.releases_total,
                    watched_mark(row.watched)
                );
            }
        }
        Feed::Catalog => {
            let cards = console.plugin_grid();
            if json {
                return print_json(&cards, "catalog");
            }
            println!("{} plugins", cards.len());
            for c in cards {
                println!("  {:<32} {}", c.record.name, c.selected_version);
            }
        }
    }
    Ok(())
}
