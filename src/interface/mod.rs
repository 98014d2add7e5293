pub mod prompts;
pub mod render;
pub mod search;

pub use prompts::{parse_target_calories, prompt_calories, prompt_goal, prompt_yes_no};
pub use render::{display_food_list, display_plate};
pub use search::fuzzy_find;
