pub mod config;
pub mod host;
pub mod logging;

pub use config::{Command, Config};
pub use host::ObsHost;
pub use logging::init_tracing;
