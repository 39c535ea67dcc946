use std::sync::Arc;

use futures::StreamExt;
use tokio_stream::wrappers::WatchStream;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vendor_portal::state::{Config, Portal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vendor_portal=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration and connect the service clients
    let config = Arc::new(Config::from_env());
    tracing::info!("Connecting to {}", config.service_url);
    let portal = Portal::connect(config).await?;

    // Resolve the signed-in user
    let Some(session) = portal.resolve_session().await? else {
        anyhow::bail!("No signed-in user; check PORTAL_ACCESS_TOKEN");
    };
    tracing::info!("Signed in as {}", session.user.email);
    if session.identity.is_none() {
        tracing::warn!("Account has no staff record; dashboard will be empty");
    }

    // Load the dashboard once
    for widget in portal.widgets() {
        let card = widget.load().await;
        tracing::info!("{}: {}", card.title, card.state);
    }

    // Follow the notification feed until interrupted
    let store = portal.notification_store();
    store
        .set_recipient(session.identity.map(|identity| identity.recipient()))
        .await;
    tracing::info!("{} unread notifications", store.unread_count());

    let mut unread = WatchStream::new(store.unread_updates());
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            Some(count) = unread.next() => {
                tracing::info!("Unread notifications: {}", count);
            }
        }
    }

    store.close().await;
    tracing::info!("Shutting down");
    Ok(())
}
