use std::path::PathBuf;

use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

use menace_agent::{Agent, BeadConfig, RandomPolicy};
use menace_training::Trainer;

use crate::{command::play::app::PlayApp, tui::Tui, util};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Path to a trained model file (JSON); trains a fresh agent when
    /// omitted
    #[arg(long)]
    model: Option<PathBuf>,
    /// Warm-up training games when no model is given
    #[arg(long, default_value_t = 500)]
    train_games: usize,
    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            model: None,
            train_games: 500,
            seed: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let mut rng = match arg.seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(seed),
        None => Pcg64Mcg::from_os_rng(),
    };

    let agent = match &arg.model {
        Some(path) => util::read_model_file(path)?.into_agent()?,
        None => {
            eprintln!(
                "Training MENACE quickly ({} games vs random play)...",
                arg.train_games
            );
            let mut agent = Agent::new(BeadConfig::default());
            Trainer::new(0).run(&mut agent, &mut RandomPolicy, arg.train_games, &mut rng)?;
            agent
        }
    };

    let mut app = PlayApp::new(agent, rng);
    Tui::run(&mut app)
}
