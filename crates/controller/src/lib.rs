// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

//! Core library of the *MeetBase Controller*
//!
//! # Example
//!
//! ```no_run
//! use meetbase_controller_core::Controller;
//! use anyhow::Result;
//!
//! #[actix_web::main]
//! async fn main()  {
//!     meetbase_controller_core::try_or_exit(run()).await;
//! }
//!
//! async fn run() -> Result<()> {
//!    if let Some(controller) = Controller::create("MeetBase Controller").await? {
//!         controller.run().await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

use crate::api::ApiServices;
use crate::auth::{HostedVerifier, IdentityVerifier, StaticVerifier};
use crate::resources::ResourceService;
use crate::settings::{Settings, SharedSettings};
use crate::store::{DatabaseStore, MemoryStore, ResourceStore};
use crate::suggestions::{ChatCompletionsEngine, MockEngine, SuggestionEngine};
use crate::trace::ReducedSpanBuilder;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{App, HttpServer};
use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use database::Db;
use std::net::Ipv6Addr;
use std::sync::Arc;
use tokio::signal::ctrl_c;
use tokio::signal::unix::{signal, SignalKind};
use tracing_actix_web::TracingLogger;

pub mod api;
pub mod auth;
pub mod resources;
pub mod settings;
pub mod store;
pub mod suggestions;

mod cli;
mod trace;

#[derive(Debug, thiserror::Error)]
#[error("Blocking thread has panicked")]
pub struct BlockingError;

/// Custom version of `actix_web::web::block` which retains the current tracing span
pub async fn block<F, R>(f: F) -> Result<R, BlockingError>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let span = tracing::Span::current();

    let fut = actix_rt::task::spawn_blocking(move || span.in_scope(f));

    fut.await.map_err(|_| BlockingError)
}

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
                eprintln!("Crashed with error: {err:?}");
            }

            std::process::exit(-1);
        }
    }
}

/// Controller struct representation containing all fields required to drive the controller
pub struct Controller {
    /// Settings loaded on [Controller::create]
    pub startup_settings: Arc<Settings>,

    /// Cloneable shared settings, reloaded when receiving the `reload` signal.
    pub shared_settings: SharedSettings,

    /// CLI arguments
    args: cli::Args,

    /// Store, identity verifier and suggestion engine handed to the endpoints
    services: ApiServices,
}

impl Controller {
    /// Tries to create a controller from CLI arguments and then the settings.
    ///
    /// This can return Ok(None) which would indicate that the controller executed a CLI
    /// subprogram (e.g. `migrate-db`) and must now exit.
    ///
    /// Otherwise it will return itself which can be run using [`Controller::run`]
    pub async fn create(program_name: &str) -> Result<Option<Self>> {
        let args = cli::parse_args().await?;

        // Some args run commands by them self and thus should exit here
        if !args.controller_should_start() {
            return Ok(None);
        }

        let settings = Settings::load(&args.config)
            .with_context(|| format!("Failed to load config from {:?}", args.config))?;

        trace::init(&settings.logging)?;

        log::info!("Starting {}", program_name);

        let controller = Self::init(settings, args).await?;

        Ok(Some(controller))
    }

    #[tracing::instrument(err, skip(settings, args))]
    async fn init(settings: Settings, args: cli::Args) -> Result<Self> {
        let settings = Arc::new(settings);
        let shared_settings: SharedSettings = Arc::new(ArcSwap::from(settings.clone()));

        let store: Arc<dyn ResourceStore> = match &settings.database {
            Some(database) => {
                db_storage::migrations::migrate_from_url(&database.url)
                    .await
                    .context("Failed to migrate database")?;

                // Connect to postgres
                let db = Db::connect_url(
                    &database.url,
                    database.max_connections,
                    Some(database.min_idle_connections),
                )
                .context("Failed to connect to database")?;

                Arc::new(DatabaseStore::new(Arc::new(db)))
            }
            None => {
                log::warn!("No [database] configured, events and guests are kept in memory only");
                Arc::new(MemoryStore::new())
            }
        };

        let client = reqwest::Client::new();

        let verifier: Arc<dyn IdentityVerifier> = match &settings.auth {
            Some(auth) => Arc::new(
                HostedVerifier::new(client.clone(), auth.url.clone(), auth.api_key.clone())
                    .context("Invalid [auth] url")?,
            ),
            None => {
                log::warn!(
                    "No [auth] configured, every bearer token is accepted as the development user"
                );
                Arc::new(StaticVerifier::default())
            }
        };

        let suggestions: Arc<dyn SuggestionEngine> = match &settings.suggestions {
            Some(suggestions) => Arc::new(
                ChatCompletionsEngine::new(client, suggestions)
                    .context("Invalid [suggestions] base_url")?,
            ),
            None => {
                log::info!("No [suggestions] configured, answering with canned suggestions");
                Arc::new(MockEngine)
            }
        };

        let resources = ResourceService::new(store, shared_settings.clone());

        Ok(Self {
            startup_settings: settings,
            shared_settings,
            args,
            services: ApiServices::new(resources, verifier, suggestions),
        })
    }

    /// Runs the controller until a fatal error occurred or a shutdown is requested (e.g. SIGTERM).
    pub async fn run(self) -> Result<()> {
        // Start HTTP Server
        let http_server = {
            let cors = self.startup_settings.http.cors.clone();
            let services = self.services.clone();

            HttpServer::new(move || {
                let cors = setup_cors(&cors);

                App::new()
                    .wrap(TracingLogger::<ReducedSpanBuilder>::new())
                    .wrap(cors)
                    .configure(|cfg| services.configure(cfg))
            })
        };

        let address = (Ipv6Addr::UNSPECIFIED, self.startup_settings.http.port);

        let http_server = http_server.bind(address).with_context(|| {
            format!("Failed to bind http server to {}:{}", address.0, address.1)
        })?;

        log::info!("Startup finished");

        let http_server = http_server.disable_signals().run();
        let http_server_handle = http_server.handle();

        let mut reload_signal =
            signal(SignalKind::hangup()).context("Failed to register SIGHUP signal handler")?;

        actix_rt::spawn(http_server);

        // Wait for either SIGTERM or SIGHUP and handle them accordingly
        loop {
            tokio::select! {
                _ = ctrl_c() => {
                    log::info!("Got termination signal, exiting");
                    break;
                }
                _ = reload_signal.recv() => {
                    log::info!("Got reload signal, reloading");

                    if let Err(e) = settings::reload_settings(self.shared_settings.clone(), &self.args.config) {
                        log::error!("Failed to reload settings, {}", e);
                        continue
                    }
                }
            }
        }

        http_server_handle.stop(true).await;

        log::info!("HTTP server stopped, goodbye!");

        Ok(())
    }
}

fn setup_cors(settings: &settings::HttpCors) -> Cors {
    let mut cors = Cors::default();

    for origin in &settings.allowed_origin {
        cors = cors.allowed_origin(origin)
    }

    cors.allowed_header(header::CONTENT_TYPE)
        .allowed_header(header::AUTHORIZATION)
        .allow_any_method()
        .supports_credentials()
}
