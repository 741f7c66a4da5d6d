//! Builder assembling the engine from configuration.

use std::sync::Arc;

use crate::config::{EngineConfig, StoreBackendConfig};
use crate::core::accounts::{AccountStore, AuthService};
use crate::core::catalog::ResourceCatalog;
use crate::core::ledger::ReservationLedger;
use crate::core::model::{Account, Booking, Resource};
use crate::core::store::{Record, RecordStore};
use crate::core::BookingError;
use crate::infra::auth::Argon2AuthService;
use crate::infra::store::{InMemoryStore, JsonFileStore};
use crate::service::auth_flow::AuthFlow;
use crate::service::booking::BookingService;
use crate::service::query::QueryFacade;
use crate::service::session::SessionManager;

/// The assembled engine: every component an embedding layer talks to.
pub struct BookingEngine {
    /// Resource registry.
    pub catalog: Arc<ResourceCatalog>,
    /// User identities.
    pub accounts: Arc<AccountStore>,
    /// The booking ledger.
    pub ledger: Arc<ReservationLedger>,
    /// Live sessions.
    pub sessions: Arc<SessionManager>,
    /// Register/login/logout operations.
    pub auth: Arc<AuthFlow>,
    /// Booking/cancellation orchestration.
    pub booking: Arc<BookingService>,
    /// Read-side views.
    pub query: Arc<QueryFacade>,
}

/// Build an engine with the stock Argon2 credential adapter.
///
/// # Errors
/// `BookingError::Store` when configuration is invalid or a backend cannot
/// be opened.
pub fn build_engine(cfg: &EngineConfig) -> Result<BookingEngine, BookingError> {
    build_engine_with(cfg, Arc::new(Argon2AuthService))
}

/// Build an engine with a caller-supplied credential capability (tests
/// install cheap fakes here).
///
/// # Errors
/// `BookingError::Store` when configuration is invalid or a backend cannot
/// be opened.
pub fn build_engine_with(
    cfg: &EngineConfig,
    auth: Arc<dyn AuthService>,
) -> Result<BookingEngine, BookingError> {
    cfg.validate()
        .map_err(|e| BookingError::Store(format!("config invalid: {e}")))?;

    let resource_store = build_store::<Resource>(cfg, "resources.json")?;
    let account_store = build_store::<Account>(cfg, "accounts.json")?;
    let booking_store = build_store::<Booking>(cfg, "bookings.json")?;

    let catalog = Arc::new(ResourceCatalog::load(&resource_store, &cfg.seed_resources)?);
    let accounts = Arc::new(AccountStore::new(account_store, Arc::clone(&auth)));
    let ledger = Arc::new(ReservationLedger::new(
        Arc::clone(&catalog),
        Arc::clone(&accounts),
        booking_store,
    )?);
    let sessions = Arc::new(SessionManager::new());

    let auth_flow = Arc::new(AuthFlow::new(
        Arc::clone(&accounts),
        Arc::clone(&sessions),
        auth,
    ));
    let booking = Arc::new(BookingService::new(
        Arc::clone(&sessions),
        Arc::clone(&catalog),
        Arc::clone(&ledger),
    ));
    let query = Arc::new(QueryFacade::new(
        Arc::clone(&sessions),
        Arc::clone(&catalog),
        Arc::clone(&ledger),
    ));

    Ok(BookingEngine {
        catalog,
        accounts,
        ledger,
        sessions,
        auth: auth_flow,
        booking,
        query,
    })
}

/// Construct one collection's store per the configured backend.
fn build_store<R: Record>(
    cfg: &EngineConfig,
    file: &str,
) -> Result<Arc<dyn RecordStore<R>>, BookingError> {
    match cfg.store {
        StoreBackendConfig::InMemory => Ok(Arc::new(match cfg.shard_count {
            Some(n) => InMemoryStore::<R>::with_shards(n),
            None => InMemoryStore::<R>::new(),
        })),
        StoreBackendConfig::JsonFile => {
            let dir = cfg
                .data_dir
                .as_ref()
                .ok_or_else(|| BookingError::Store("json_file backend requires data_dir".into()))?;
            let store = JsonFileStore::<R>::open(dir.join(file))
                .map_err(|e| BookingError::Store(e.to_string()))?;
            Ok(Arc::new(store))
        }
    }
}
