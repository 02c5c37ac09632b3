//! Client-side synchronization core for a remote ticket-issuing simulation:
//! a shared configuration store, a command dispatcher, and interval-driven
//! polling synchronizers over one HTTP gateway.

mod command;
mod config;
mod error;
mod gateway;
mod poll;

pub use command::Dispatcher;
pub use config::{ConfigDraft, ConfigPatch, ConfigStore, SimulationConfig};
pub use error::{Error, Result};
pub use gateway::{Gateway, HttpGateway};
pub use poll::{Poller, LOG_PERIOD, TICKET_COUNT_PERIOD};
