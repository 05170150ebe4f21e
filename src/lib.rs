pub mod analytics;
pub mod approvals;
pub mod commands;
pub mod data;
pub mod deployment;
pub mod draw;
pub mod error;
pub mod geo;
pub mod geolocation;
pub mod route;
pub mod simulation;
pub mod tasks;
pub mod track;
pub mod utils;


pub use error::Error;
pub use utils::shutdown::Shutdown;
