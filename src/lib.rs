//! Client of the *School Portal*: the weekly course calendar and the mailbox
//!
//! # Example
//!
//! ```no_run
//! use school_portal::Portal;
//! use anyhow::Result;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     school_portal::try_or_exit(run()).await;
//! }
//!
//! async fn run() -> Result<()> {
//!     Portal::create()?.run().await?;
//!
//!     Ok(())
//! }
//! ```
use crate::clock::SystemClock;
use crate::router::{Navigation, Router};
use crate::session::Session;
use crate::settings::Settings;
use crate::storage::FileStore;
use crate::ui::TerminalUi;
use anyhow::{Context, Result};
use school_portal_client::{Config, PortalSession};
use std::rc::Rc;

pub mod cli;
pub mod clock;
pub mod forms;
pub mod logging;
pub mod pages;
pub mod router;
pub mod session;
pub mod settings;
pub mod storage;
pub mod ui;
pub mod view;
pub mod week;

/// Wrapper of the main function. Correctly outputs the error to the logging utility or stderr.
pub async fn try_or_exit<T, F>(f: F) -> T
where
    F: std::future::Future<Output = Result<T>>,
{
    match f.await {
        Ok(ok) => ok,
        Err(err) => {
            if log::log_enabled!(log::Level::Error) {
                log::error!("Crashed with error: {:?}", err);
            } else {
                eprintln!("Crashed with error: {:?}", err);
            }

            std::process::exit(-1);
        }
    }
}

/// One invocation of the portal client
pub struct Portal {
    args: cli::Args,
    settings: Settings,
}

impl Portal {
    /// Parses the CLI arguments, sets up logging and loads the settings
    pub fn create() -> Result<Self> {
        let args = cli::parse_args()?;

        logging::setup(args.verbose, args.logoutput.as_deref())?;

        let settings = Settings::load(&args.config).with_context(|| {
            format!(
                "Failed to load settings from {}",
                args.config.display()
            )
        })?;

        log::debug!("Settings: {:?}", settings);

        Ok(Portal { args, settings })
    }

    /// Runs the command given on the command line
    pub async fn run(self) -> Result<Navigation> {
        let Portal { args, settings } = self;

        let mut store = FileStore::open(&settings.storage.path)?;
        let ui = TerminalUi::new(settings.output.dir.clone());

        let config = Rc::new(Config {
            portal_url: settings.backend.url.clone(),
        });

        let router = Router::new(
            &settings.backend.url,
            &mut store,
            ui,
            Box::new(SystemClock),
            move |session: &Session| {
                PortalSession::new(config.clone(), session.tokens.clone())
                    .context("Failed to create the backend session")
            },
        )?;

        router.dispatch(args.command).await
    }
}
