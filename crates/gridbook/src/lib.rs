// Runner support: configuration files and snapshot/report I/O around the
// gridbook-core engine.

pub mod config;
pub mod io;
