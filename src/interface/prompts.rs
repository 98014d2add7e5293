use dialoguer::{Confirm, Input, Select};

use crate::error::{PlateError, Result};
use crate::models::Goal;
use crate::planner::constants::DEFAULT_TARGET_CALORIES;
use crate::planner::templates::goal_label;

/// Prompt for the dietary goal.
pub fn prompt_goal() -> Result<Goal> {
    let options: Vec<String> = Goal::ALL
        .iter()
        .map(|goal| format!("{} ({})", goal_label(*goal).en, goal))
        .collect();

    let default = Goal::ALL
        .iter()
        .position(|g| *g == Goal::default())
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("What is your dietary goal?")
        .items(&options)
        .default(default)
        .interact()?;

    Ok(Goal::ALL.get(selection).copied().unwrap_or_default())
}

/// Prompt for the plate calorie target.
pub fn prompt_calories() -> Result<u32> {
    let input: String = Input::new()
        .with_prompt("How many calories should the plate provide?")
        .default(DEFAULT_TARGET_CALORIES.to_string())
        .interact_text()?;

    parse_target_calories(&input)
}

/// Strict counterpart of the HTTP parser: interactive input is rejected, not defaulted.
pub fn parse_target_calories(input: &str) -> Result<u32> {
    match input.trim().parse::<u32>() {
        Ok(0) => Err(PlateError::InvalidInput(
            "Calories must be greater than zero".to_string(),
        )),
        Ok(calories) => Ok(calories),
        Err(_) => Err(PlateError::InvalidInput(format!(
            "Invalid calorie count '{}'",
            input.trim()
        ))),
    }
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target_calories() {
        assert_eq!(parse_target_calories(" 1800 ").unwrap(), 1800);
        assert!(matches!(
            parse_target_calories("0"),
            Err(PlateError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_target_calories("lots"),
            Err(PlateError::InvalidInput(_))
        ));
    }
}
