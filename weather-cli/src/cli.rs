use std::{fmt, sync::Arc, time::Duration};

use anyhow::Context;
use chrono::Utc;
use clap::{ArgAction, Parser, Subcommand};
use inquire::{InquireError, Password, Select, Text};
use tracing::debug;
use weather_core::{
    Config, IpGeolocator, Session, StartupOptions, provider::provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and daily forecast in the terminal")]
pub struct Cli {
    /// More log output on stderr (-v debug, -vv trace). `RUST_LOG` wins if set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Without a subcommand the interactive session starts.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Print weather once and exit.
    Show {
        /// Place to search for; omit to use the device position.
        location: Option<String>,

        /// Skip device geolocation and use the configured default location.
        #[arg(long)]
        no_locate: bool,
    },

    /// Search, refresh and browse interactively.
    Interactive {
        /// Skip device geolocation and use the configured default location.
        #[arg(long)]
        no_locate: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { location, no_locate }) => show(location, no_locate).await,
            Some(Command::Interactive { no_locate }) => interactive(no_locate).await,
            None => interactive(false).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("No API key entered")?;

    config.set_api_key(key.trim().to_string());
    let path = config.save()?;
    debug!(path = %path.display(), "configuration saved");
    println!("Saved configuration to {}", path.display());

    Ok(())
}

fn startup_options(config: &Config, no_locate: bool) -> StartupOptions {
    StartupOptions {
        use_device: config.geolocation_enabled() && !no_locate,
        wait: Duration::from_secs(config.geolocation_timeout_secs()),
        fallback: config.default_location(),
    }
}

async fn start_session(config: &Config, no_locate: bool) -> anyhow::Result<Session> {
    let provider = provider_from_config(config)?;
    let mut session = Session::new(Arc::new(provider));

    let geolocator = IpGeolocator::new(config.geolocation_url());
    session.start(&geolocator, &startup_options(config, no_locate)).await;

    Ok(session)
}

async fn show(location: Option<String>, no_locate: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    debug!(?location, no_locate, "showing weather once");

    let session = match location {
        Some(text) => {
            let provider = provider_from_config(&config)?;
            let mut session = Session::new(Arc::new(provider));
            session.search(&text).await;
            session
        }
        None => start_session(&config, no_locate).await?,
    };

    print!("{}", render::view(session.view(), Utc::now()));
    if let Some(message) = session.view().notification().visible_message() {
        eprintln!("{message}");
    }

    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Search,
    Refresh,
    Team,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 4] = [MenuItem::Search, MenuItem::Refresh, MenuItem::Team, MenuItem::Quit];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MenuItem::Search => "Search location",
            MenuItem::Refresh => "Refresh",
            MenuItem::Team => "Development Team",
            MenuItem::Quit => "Quit",
        })
    }
}

fn is_cancel(err: &InquireError) -> bool {
    matches!(err, InquireError::OperationCanceled | InquireError::OperationInterrupted)
}

async fn interactive(no_locate: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut session = start_session(&config, no_locate).await?;

    println!("{}", render::view(session.view(), Utc::now()));

    loop {
        if let Some(message) = session.view().notification().visible_message() {
            println!("{}", render::popup(message));
            match Text::new("").with_help_message("Enter to close").prompt() {
                Ok(_) => session.dismiss(),
                Err(e) if is_cancel(&e) => session.dismiss(),
                Err(e) => return Err(e.into()),
            }
        }

        let choice = match Select::new("What next?", MenuItem::ALL.to_vec()).prompt() {
            Ok(choice) => choice,
            Err(e) if is_cancel(&e) => break,
            Err(e) => return Err(e.into()),
        };

        match choice {
            MenuItem::Search => {
                let text = match Text::new("Enter location").prompt() {
                    Ok(text) => text,
                    Err(e) if is_cancel(&e) => continue,
                    Err(e) => return Err(e.into()),
                };
                session.search(&text).await;
            }
            MenuItem::Refresh => session.refresh().await,
            MenuItem::Team => session.show_team(),
            MenuItem::Quit => break,
        }

        println!("{}", render::view(session.view(), Utc::now()));
    }

    Ok(())
}
