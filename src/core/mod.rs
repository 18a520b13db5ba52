pub mod clock;
pub mod config;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AppConfig, BackendKind};
pub use storage::LocalStorage;
