use clap::{Parser, Subcommand};
use netscramble_core::*;
use rand::RngExt;

mod render;

#[derive(Parser, Debug)]
#[command(name = "netscramble", version, about = "Generate and solve pipe rotation puzzles")]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Lay the grid out taller than wide
    #[arg(long, global = true)]
    portrait: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a new puzzle next to its solution
    Generate {
        #[arg(long, default_value_t = Skill::Novice)]
        skill: Skill,

        /// Dump the saved game as JSON instead of drawing it
        #[arg(long)]
        json: bool,
    },
    /// Generate a puzzle and let the auto-solver play it
    Solve {
        #[arg(long, default_value_t = Skill::Novice)]
        skill: Skill,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::debug!("seed: {seed}");
    let config = if args.portrait {
        BoardConfig::PORTRAIT
    } else {
        BoardConfig::LANDSCAPE
    };
    let mut engine = PlayEngine::new(config, seed);

    match args.command {
        Command::Generate { skill, json } => {
            let report = engine.new_game(skill)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&engine.save())?);
                return Ok(());
            }

            println!(
                "{skill} board, seed {seed}, {} cells in {} tries",
                report.cells, report.tries
            );
            if let Some(solved) = engine.solved_snapshot() {
                println!("solution:");
                print!("{}", render::snapshot(solved));
            }
            println!(
                "puzzle ({} terminals, {} cells unconnected):",
                engine.board().terminal_count(),
                engine.unconnected_cells()
            );
            print!("{}", render::board(engine.board()));
        }
        Command::Solve { skill } => {
            engine.new_game(skill)?;
            let unconnected = engine.unconnected_cells();
            print!("{}", render::board(engine.board()));

            let moves = engine.autosolve_plan()?;
            for &mv in &moves {
                let outcome = engine.apply_move(mv)?;
                log::debug!("{mv}: {outcome:?}");
            }

            println!(
                "{} moves connected {unconnected} cells, board is {:?}",
                moves.len(),
                engine.state()
            );
            print!("{}", render::board(engine.board()));
            anyhow::ensure!(engine.is_solved(), "auto-solver left the board unsolved");
        }
    }

    Ok(())
}
