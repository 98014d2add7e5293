pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod models;
pub mod pairing;
pub mod planner;
pub mod server;
pub mod sweep;

pub use error::{PlateError, Result};
pub use models::{FoodItem, Goal, Plate, PlateRequest, PlateSource};
pub use planner::PlateGenerator;
