use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use invaders_app::logging;
use invaders_app::runner::{self, RunOptions};
use invaders_app::wallet;
use invaders_core::constants::{DEFAULT_WORLD_ID, SKILL_KEY_LABELS, TICK_RATE};

#[derive(Parser)]
#[command(name = "manu-invaders", version, about = "Headless Manu Invaders")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game with the autopilot and credit the wallet.
    Play {
        /// Character id. Defaults to leo.
        #[arg(short, long)]
        character: Option<String>,

        #[arg(short, long, default_value_t = 42)]
        seed: u64,

        #[arg(short, long, default_value = DEFAULT_WORLD_ID)]
        world: String,

        /// Game data JSON file to use instead of the built-in content.
        #[arg(short, long)]
        data: Option<PathBuf>,

        #[arg(long, default_value = "manu_invaders_wallet.json")]
        wallet: PathBuf,

        /// Stop after this many ticks (60 per second).
        #[arg(long, default_value_t = u64::from(TICK_RATE) * 600)]
        max_ticks: u64,

        /// Run at wall-clock pace on the game loop thread.
        #[arg(long)]
        realtime: bool,

        #[arg(long, default_value_t = 1.0)]
        time_scale: f64,

        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List selectable characters and their skills.
    Characters {
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Show the coin total.
    Wallet {
        #[arg(long, default_value = "manu_invaders_wallet.json")]
        wallet: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            character,
            seed,
            world,
            data,
            wallet,
            max_ticks,
            realtime,
            time_scale,
            json,
        } => {
            let opts = RunOptions {
                character,
                seed,
                world_id: world,
                data_path: data,
                wallet_path: Some(wallet),
                max_ticks,
                realtime,
                time_scale,
            };
            let summary = runner::run_headless(&opts).context("headless run failed")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                let outcome = match summary.outcome {
                    Some(outcome) if outcome.is_victory() => "victory",
                    Some(_) => "defeat",
                    None => "unfinished",
                };
                println!("outcome:  {outcome}");
                println!("score:    {}", summary.score);
                println!("waves:    {}", summary.waves_reached);
                println!("ticks:    {}", summary.ticks);
                println!("coins:    +{}", summary.coins_earned);
                if let Some(total) = summary.wallet_total {
                    println!("wallet:   {total}");
                }
            }
        }
        Commands::Characters { data } => {
            let data = runner::load_data(data.as_ref()).context("cannot load game data")?;
            for character in data.selectable_characters() {
                println!("{} ({})", character.name, character.id);
                if let Some(description) = &character.description {
                    println!("  {description}");
                }
                for (skill, key) in character.skills.iter().zip(SKILL_KEY_LABELS) {
                    println!(
                        "  [{key}] {} - {} (cooldown {}s)",
                        skill.name,
                        skill.description,
                        skill.cooldown / 1000.0
                    );
                }
            }
        }
        Commands::Wallet { wallet: path } => {
            let wallet = wallet::load(&path)
                .with_context(|| format!("cannot read wallet {}", path.display()))?;
            println!("{} coins", wallet.coins);
        }
    }
    Ok(())
}
