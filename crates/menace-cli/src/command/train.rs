use std::path::PathBuf;

use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

use menace_agent::{Agent, BeadConfig, RandomPolicy, RewardPolicy};
use menace_training::{Trainer, TrainingReport};

use crate::{model::AgentModel, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Number of training games to play
    #[arg(long, default_value_t = 3000)]
    games: usize,
    /// Checkpoint interval for progress reporting (0 = final only)
    #[arg(long, default_value_t = 500)]
    report_every: usize,
    /// RNG seed for a reproducible run (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Initial bead count per legal move in a fresh matchbox
    #[arg(long, default_value_t = 4)]
    initial_beads: u32,
    /// Minimum bead count a punished move can drop to
    #[arg(long, default_value_t = 1)]
    min_beads: u32,
    /// Beads added to every move of a won game
    #[arg(long, default_value_t = 3, allow_hyphen_values = true)]
    reward_win: i32,
    /// Beads added to every move of a drawn game
    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    reward_draw: i32,
    /// Beads added (usually negative) to every move of a lost game
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    reward_loss: i32,
    /// Train two agents against each other instead of random play
    #[arg(long)]
    self_play: bool,
    /// Output file path for the trained model (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl TrainArg {
    fn bead_config(&self) -> BeadConfig {
        BeadConfig {
            initial_beads: self.initial_beads,
            min_beads: self.min_beads,
            rewards: RewardPolicy {
                win: self.reward_win,
                draw: self.reward_draw,
                loss: self.reward_loss,
            },
        }
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let config = arg.bead_config();
    let mut rng = match arg.seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(seed),
        None => Pcg64Mcg::from_os_rng(),
    };
    let trainer = Trainer::new(arg.report_every);

    let mut agent = Agent::new(config);
    let opponent = if arg.self_play { "self-play" } else { "random" };
    eprintln!("Training MENACE: {} games vs {opponent} opponent", arg.games);

    let report = if arg.self_play {
        let mut agent_o = Agent::new(config);
        trainer.run_pair(&mut agent, &mut agent_o, arg.games, &mut rng)?
    } else {
        trainer.run(&mut agent, &mut RandomPolicy, arg.games, &mut rng)?
    };
    print_report(&report);
    eprintln!("Learned {} matchboxes", agent.store().len());

    let model = AgentModel::from_agent("menace", report.tally.total(), &agent);
    Output::save_json(&model, arg.output.clone())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Games: {}", model.games_trained);
    eprintln!("  Matchboxes: {}", model.store.boxes.len());

    Ok(())
}

fn print_report(report: &TrainingReport) {
    for point in report.series.iter() {
        let tally = &point.tally;
        eprintln!(
            "{:>6} games: win {:.3}  draw {:.3}  loss {:.3}",
            point.game_index,
            tally.win_rate(),
            tally.draw_rate(),
            tally.loss_rate(),
        );
    }
}
