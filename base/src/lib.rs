pub mod database;
pub mod setting;
pub mod util;

pub const CLI_NAME: &str = "catalog";
pub const VERSION: &str = "0.1.0";

// logging constants
pub const CATALOG_LOGLEVEL: &str = "CATALOG_LOGLEVEL";
