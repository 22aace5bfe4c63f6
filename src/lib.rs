#[macro_use]
extern crate log;

pub mod engine;
pub mod eta;
pub mod normalize;
pub mod registry;

pub use engine::{BoardHandle, Engine, Snapshot, REFRESH_INTERVAL};
pub use eta::EtaClient;
pub use registry::Location;
