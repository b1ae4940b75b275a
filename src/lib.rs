pub mod api;
pub mod config;
pub mod error;
pub mod probe;

pub use api::{PostgrestClient, TableReader};
pub use config::{Config, Credentials};
pub use error::ProbeError;
