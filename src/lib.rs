pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod server;

pub use catalog::Catalog;
pub use config::Config;
pub use error::AdminError;
