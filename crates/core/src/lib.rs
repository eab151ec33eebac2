pub mod alert;
pub mod bundle;
pub mod config;
pub mod error;
pub mod record;

pub use alert::*;
pub use bundle::*;
pub use config::Config;
pub use error::*;
pub use record::*;
