//! Fair Dice
//!
//! Terminal front end: you against the computer, one round of
//! non-transitive dice with every random choice committed in advance.

use clap::{Parser, Subcommand};
use fair_dice_core::{
    crypto::verify_hex, GameConfig, GameSession, RngEntropy, SessionOutcome, TerminalConsole,
};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "fair-dice",
    about = "Non-transitive dice against the computer with provably fair throws",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Dice sets, each six comma-separated non-negative integers (at least three)
    #[arg(value_name = "DICE", allow_hyphen_values = true)]
    dice: Vec<String>,

    /// Print a JSON transcript of every commitment and reveal after the round
    #[arg(long = "transcript", env = "FAIR_DICE_TRANSCRIPT")]
    transcript: bool,

    /// Log protocol steps at debug level unless RUST_LOG says otherwise
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recompute a published HMAC from its revealed key and value
    Verify {
        /// Revealed key as hex
        #[arg(long = "key")]
        key: String,

        /// Revealed value
        #[arg(long = "value", allow_hyphen_values = true)]
        value: String,

        /// Published HMAC as hex
        #[arg(long = "proof")]
        proof: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn play(dice: &[String], emit_transcript: bool) -> ExitCode {
    let config = GameConfig {
        emit_transcript,
        ..GameConfig::default()
    };
    let session = match GameSession::from_args(dice, config) {
        Ok(session) => session,
        Err(err) => {
            debug!(error = %err, "invalid dice sets");
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    debug!(game_id = %session.id(), dice = session.pool().len(), "dice sets accepted");

    let mut console = TerminalConsole::stdio();
    let mut entropy = RngEntropy::thread();
    match session.run(&mut console, &mut entropy) {
        Ok(SessionOutcome::Completed(transcript)) => {
            info!(game_id = %transcript.game_id, "round finished");
            ExitCode::SUCCESS
        }
        Ok(SessionOutcome::Aborted) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn verify(key: &str, value: &str, proof: &str) -> ExitCode {
    if verify_hex(key, value, proof) {
        println!("valid");
        ExitCode::SUCCESS
    } else {
        println!("invalid");
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(cli.verbose);

    match cli.command {
        Some(Command::Verify { key, value, proof }) => verify(&key, &value, &proof),
        None => play(&cli.dice, cli.transcript),
    }
}
