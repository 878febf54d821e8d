use anyhow::Result;
use clap::Parser;
use genesis_core::metrics::init_logging;
use genesis_lib::app::{App, AppOptions};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file path (defaults apply when it does not exist)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Ticks to run; 0 runs until halt or extinction
    #[arg(short, long, default_value_t = 0)]
    ticks: u64,

    /// Overrides the configured RNG seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory for saves and autosaves
    #[arg(long, default_value = "saves")]
    save_dir: PathBuf,

    /// Autosave every N ticks; 0 disables
    #[arg(long, default_value_t = 0)]
    autosave: u64,

    /// Number of autosaves to keep
    #[arg(long, default_value_t = 5)]
    keep: usize,

    /// Resume from a named save instead of starting fresh
    #[arg(long)]
    load: Option<String>,

    /// Write a `latest` save when the run ends
    #[arg(long)]
    save_on_exit: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let mut app = App::new(AppOptions {
        config_path: args.config,
        ticks: args.ticks,
        seed: args.seed,
        save_dir: args.save_dir,
        autosave_interval: args.autosave,
        keep_autosaves: args.keep,
        load: args.load,
        save_on_exit: args.save_on_exit,
    })?;

    let summary = app.run()?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
