//! Blogkit CLI
//!
//! Exercise a running blog's front-end endpoints and helpers from the terminal:
//! - Poll the unread private-message count
//! - Trigger a weather refresh
//! - Preview relative date labels and the editor character counter

use blogkit::api::{BlogApi, HttpBlogApi};
use blogkit::config::{generate_default_config, Config};
use blogkit::counter::CharCount;
use blogkit::datefmt::format_date;
use blogkit::polling::BadgeState;
use blogkit::{read_cookie, Locale};
use chrono::{DateTime, Local, Offset, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blogkit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Blog front-end helpers and endpoint checks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Blog origin, overrides the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the unread private-message badge
    Unread {
        /// Keep polling at the configured interval
        #[arg(short, long)]
        watch: bool,
    },

    /// Ask the server to refresh its weather data
    RefreshWeather {
        /// Value of the csrftoken cookie of a logged-in session
        #[arg(long)]
        csrf_token: Option<String>,
    },

    /// Print the relative label for a date
    RelativeDate {
        /// ISO 8601 / RFC 3339 date
        date: String,
        /// Reference time (default: now)
        #[arg(long)]
        now: Option<String>,
        /// en or zh-CN (default: from config)
        #[arg(long)]
        locale: Option<Locale>,
    },

    /// Character count and counter color of a draft
    Count {
        /// Draft file
        path: PathBuf,
    },

    /// Read one value out of a cookie string
    Cookie {
        /// e.g. "sessionid=abc; csrftoken=xyz"
        cookies: String,
        name: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.base_url {
        config.endpoints.base_url = url;
    }

    blogkit::logging::init(&config.logging);

    match cli.command {
        Commands::Unread { watch } => {
            let api = HttpBlogApi::new(config.endpoints.clone(), config.endpoints.request_timeout())?;

            if !watch {
                let summary = api.unread_summary().await?;
                print_badge(BadgeState::from(&summary));
                return Ok(());
            }

            config.timing.validate().map_err(anyhow::Error::msg)?;

            // The first tick of a tokio interval completes immediately
            let mut interval = tokio::time::interval(config.timing.unread_poll());
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        match api.unread_summary().await {
                            Ok(summary) => print_badge(BadgeState::from(&summary)),
                            Err(e) => tracing::error!(error = %e, "Failed to fetch private chat summary"),
                        }
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Stopping");
                        break;
                    }
                }
            }
        }

        Commands::RefreshWeather { csrf_token } => {
            let api = HttpBlogApi::new(config.endpoints.clone(), config.endpoints.request_timeout())?;
            let messages = config.ui.locale.messages();

            match api.refresh_weather(csrf_token.as_deref()).await {
                Ok(response) if response.success => println!("Weather refreshed"),
                Ok(response) => {
                    println!("{}", messages.refresh_failed);
                    if let Some(detail) = response.message {
                        println!("  {}", detail);
                    }
                    std::process::exit(1);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Weather refresh failed");
                    println!("{}", messages.network_error);
                    std::process::exit(2);
                }
            }
        }

        Commands::RelativeDate { date, now, locale } => {
            let now = match now {
                Some(s) => DateTime::parse_from_rfc3339(&s)?.with_timezone(&Utc),
                None => Utc::now(),
            };
            let offset = Local::now().offset().fix();
            let locale = locale.unwrap_or(config.ui.locale);
            println!("{}", format_date(&date, now, offset, locale));
        }

        Commands::Count { path } => {
            let text = std::fs::read_to_string(&path)?;
            let count = CharCount::of(&text);
            println!(
                "{}{} ({:?}, {})",
                config.ui.locale.messages().char_count,
                count.count,
                count.level,
                count.level.color()
            );
        }

        Commands::Cookie { cookies, name } => match read_cookie(&cookies, &name) {
            Some(value) => println!("{}", value),
            None => {
                eprintln!("No cookie named {}", name);
                std::process::exit(1);
            }
        },

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn print_badge(state: BadgeState) {
    match state {
        BadgeState::Hidden => println!("No unread messages"),
        BadgeState::Visible(n) => println!("{} unread", n),
    }
}
