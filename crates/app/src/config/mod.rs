//! CLI configuration module

mod db;
mod logging;
mod policy;

pub(crate) use db::DatabaseConfig;
pub(crate) use logging::{LogFormat, LoggingConfig};
pub(crate) use policy::PolicyConfig;
