mod db_setup;
mod persist;
mod run;

pub use run::run;

pub(crate) const DB_SCHEMA_VERSION: &str = "0.1.0";
