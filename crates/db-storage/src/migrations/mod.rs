// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use anyhow::{Context, Result};
use refinery::{embed_migrations, Report};
use refinery_core::tokio_postgres::{Config, NoTls};
use tokio::sync::oneshot;
use tracing::Instrument;

embed_migrations!("src/migrations");

#[tracing::instrument(skip(config))]
async fn migrate(config: Config) -> Result<Report> {
    log::debug!("config: {:?}", config);

    let (mut client, conn) = config
        .connect(NoTls)
        .await
        .context("Unable to connect to database")?;

    let (tx, rx) = oneshot::channel();

    tokio::spawn(
        async move {
            if let Err(e) = conn.await {
                log::error!("connection error: {}", e)
            }

            // The receiver is gone only if the migration future was dropped
            let _ = tx.send(());
        }
        .instrument(tracing::Span::current()),
    );

    let report = migrations::runner().run_async(&mut client).await?;

    drop(client);

    // wait for the connection to close
    rx.await?;

    for migration in report.applied_migrations() {
        log::info!("Applied migration {}", migration);
    }

    Ok(report)
}

/// Applies all pending migrations to the database behind `url`
pub async fn migrate_from_url(url: &str) -> Result<Report> {
    let config = url.parse::<Config>().context("Invalid database url")?;
    migrate(config).await
}

mod type_polyfills {
    use barrel::types::{BaseType, Type};

    /// An SQL timestamp type with timezone information
    pub fn datetime() -> Type {
        Type {
            nullable: false,
            unique: false,
            increments: false,
            indexed: false,
            primary: false,
            default: None,
            size: None,
            inner: BaseType::Custom("TIMESTAMPTZ"),
        }
    }
}
