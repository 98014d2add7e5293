pub mod food;
pub mod plan;

pub use food::{FoodCategory, FoodItem, LocalizedText, Nutrition, PrepMethod, Role, round1};
pub use plan::{Goal, Plate, PlateItem, PlateRequest, PlateSource};
