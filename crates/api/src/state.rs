use std::sync::Arc;

use scada_core::machine::MachineSimulator;
use scada_store::repositories::{ItemRepo, UserRepo};
use tokio::sync::Mutex;

use crate::config::ServerConfig;

/// The one machine simulator, serialised behind a single lock so each
/// status read or transition is applied atomically.
pub type SharedMachine = Arc<Mutex<MachineSimulator>>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Simulated machine owned for the lifetime of the process.
    pub machine: SharedMachine,
    /// Inventory item store.
    pub items: Arc<ItemRepo>,
    /// User store.
    pub users: Arc<UserRepo>,
}

impl AppState {
    /// Build state around an existing simulator with empty stores.
    pub fn new(config: ServerConfig, machine: MachineSimulator) -> Self {
        Self {
            config: Arc::new(config),
            machine: Arc::new(Mutex::new(machine)),
            items: Arc::new(ItemRepo::new()),
            users: Arc::new(UserRepo::new()),
        }
    }

    /// Build state with a simulator seeded as the configuration asks.
    pub fn from_config(config: ServerConfig) -> Self {
        let machine = match config.rng_seed {
            Some(seed) => MachineSimulator::seeded(seed, config.last_maintenance),
            None => MachineSimulator::from_os_rng(config.last_maintenance),
        };
        Self::new(config, machine)
    }
}
