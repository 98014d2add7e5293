use std::path::Path;

use crate::error::Result;
use crate::sweep::evaluation::{ComboResult, Property};

/// Write one row per combination to a CSV file.
pub fn write_csv(results: &[ComboResult], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec![
        "goal".to_string(),
        "target".to_string(),
        "busy_life".to_string(),
        "runs".to_string(),
        "errors".to_string(),
        "fallbacks".to_string(),
        "avg_items".to_string(),
    ];
    header.extend(Property::ALL.iter().map(|p| format!("{}_pass_pct", p.name())));
    wtr.write_record(&header)?;

    for result in results {
        let mut row = vec![
            result.request.goal.to_string(),
            result.request.target_calories.to_string(),
            result.request.busy_life_only.to_string(),
            result.runs.to_string(),
            result.errors.to_string(),
            result.fallbacks.to_string(),
            format!("{:.2}", result.avg_items),
        ];
        row.extend(
            Property::ALL
                .iter()
                .map(|p| format!("{:.1}", result.pass_rate(*p))),
        );
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Print per-combination pass rates to stdout.
pub fn print_summary(results: &[ComboResult]) {
    println!("\n=== Sweep Results ({} combinations) ===\n", results.len());

    let names: Vec<&str> = Property::ALL.iter().map(|p| p.name()).collect();
    println!(
        "{:<15} {:>6} {:>5} {:>5} {:>5}  {}",
        "goal",
        "target",
        "busy",
        "fb",
        "err",
        names.join(" ")
    );

    for result in results {
        let rates: Vec<String> = Property::ALL
            .iter()
            .zip(&names)
            .map(|(p, name)| format!("{:>width$.1}", result.pass_rate(*p), width = name.len()))
            .collect();
        println!(
            "{:<15} {:>6} {:>5} {:>5} {:>5}  {}",
            result.request.goal.as_str(),
            result.request.target_calories,
            if result.request.busy_life_only { "yes" } else { "no" },
            result.fallbacks,
            result.errors,
            rates.join(" ")
        );
    }
    println!();
}
