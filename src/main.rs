//! test-drive-sherpa server binary.
//!
//! Reads `TEST_DRIVE_SHERPA__*` configuration, wires adapters and serves
//! the conversation API. Without `TEST_DRIVE_SHERPA__DATABASE__URL` the
//! service runs on seeded in-memory stock.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use test_drive_sherpa::adapters::booking::InMemoryBookingStore;
use test_drive_sherpa::adapters::calendar::SystemCalendar;
use test_drive_sherpa::adapters::extractor::{KeywordSlotExtractor, OpenAISlotExtractor};
use test_drive_sherpa::adapters::http::{app_router, ConversationAppState};
use test_drive_sherpa::adapters::inventory::InMemoryInventory;
use test_drive_sherpa::adapters::postgres::{PostgresBookingStore, PostgresInventory};
use test_drive_sherpa::adapters::storage::{FileSessionStore, InMemorySessionStore};
use test_drive_sherpa::adapters::validation::FuzzyInputValidator;
use test_drive_sherpa::application::{DialogueController, HandleMessageHandler};
use test_drive_sherpa::config::{
    AppConfig, ExtractorProvider, SessionBackend, ServerConfig, ValidationError,
};
use test_drive_sherpa::ports::{BookingStore, InventoryQuery, SessionStore, SlotExtractor};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    let (inventory, bookings): (Arc<dyn InventoryQuery>, Arc<dyn BookingStore>) =
        match config.database.url() {
            Some(url) => {
                let pool = PgPoolOptions::new()
                    .min_connections(config.database.min_connections)
                    .max_connections(config.database.max_connections)
                    .acquire_timeout(config.database.acquire_timeout())
                    .idle_timeout(config.database.idle_timeout())
                    .max_lifetime(config.database.max_lifetime())
                    .connect(url)
                    .await?;
                info!(
                    target_db = config.database.display_target().unwrap_or_default(),
                    "Connected to inventory database"
                );
                (
                    Arc::new(PostgresInventory::new(pool.clone())),
                    Arc::new(PostgresBookingStore::new(pool)),
                )
            }
            None => {
                info!("No database configured, serving demo stock from memory");
                (
                    Arc::new(InMemoryInventory::with_demo_stock()),
                    Arc::new(InMemoryBookingStore::new()),
                )
            }
        };

    let extractor: Arc<dyn SlotExtractor> = match config.extractor.provider {
        ExtractorProvider::Keyword => Arc::new(KeywordSlotExtractor::new()),
        ExtractorProvider::OpenAI => {
            let openai = config
                .extractor
                .openai()
                .ok_or(ValidationError::MissingRequired("EXTRACTOR__OPENAI_API_KEY"))?;
            Arc::new(OpenAISlotExtractor::new(openai)?)
        }
    };
    info!(extractor = extractor.name(), "Slot extractor ready");

    let sessions: Arc<dyn SessionStore> = match (&config.sessions.backend, &config.sessions.directory) {
        (SessionBackend::File, Some(directory)) => {
            info!(directory = %directory.display(), "Storing sessions as files");
            Arc::new(FileSessionStore::new(directory))
        }
        _ => Arc::new(InMemorySessionStore::new()),
    };

    let controller = DialogueController::new(
        inventory,
        extractor,
        Arc::new(FuzzyInputValidator::new()),
        Arc::new(SystemCalendar::new()),
        bookings,
    )
    .with_settings(config.dialogue.settings());

    let handler = HandleMessageHandler::new(Arc::new(controller), sessions);
    let app = app_router(
        ConversationAppState::new(Arc::new(handler)),
        config.server.request_timeout(),
        &config.server.cors_origins_list(),
    );

    let addr = config.server.socket_addr()?;
    info!(%addr, environment = ?config.server.environment, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
