use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Lanka Plate: balanced Sri Lankan meal plates for a dietary goal and calorie target.
#[derive(Parser, Debug)]
#[command(name = "lanka-plate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the food catalog JSON file. Overrides PLATE_CATALOG.
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP plate service.
    Serve {
        /// Address to bind. Overrides PLATE_BIND.
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on. Overrides PLATE_PORT.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate one plate and print it.
    Generate {
        /// diabetes, weight-loss, weight-gain or general-health. Prompted when omitted.
        #[arg(short, long)]
        goal: Option<String>,

        /// Calorie target for the plate. Prompted when omitted.
        #[arg(short = 'k', long)]
        calories: Option<u32>,

        /// Display language: en, si or ta.
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Only use foods with a quick preparation method.
        #[arg(short, long)]
        busy_life: bool,

        /// Seed for reproducible plates.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Skip AI pairing even when an API key is configured.
        #[arg(long)]
        no_ai: bool,
    },

    /// List eligible catalog foods.
    Foods {
        /// Only foods that suit this goal.
        #[arg(short, long)]
        goal: Option<String>,

        /// Only quick-preparation foods.
        #[arg(short, long)]
        busy_life: bool,

        /// Find foods by (fuzzy) name.
        #[arg(short, long)]
        search: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Generate {
            goal: None,
            calories: None,
            language: "en".to_string(),
            busy_life: false,
            seed: None,
            no_ai: false,
        }
    }
}
