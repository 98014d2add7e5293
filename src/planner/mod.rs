pub mod composer;
pub mod constants;
pub mod generator;
pub mod scaler;
pub mod templates;

pub use composer::{Composition, RoleSamples, compose_fallback, compose_rule_based, plate_item, portion_for};
pub use generator::PlateGenerator;
pub use scaler::{clamp_portion, scale_plate};
pub use templates::{goal_label, plate_description, plate_name};
