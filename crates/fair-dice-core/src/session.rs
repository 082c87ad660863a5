//! One game from coin flip to verdict.

use crate::console::Console;
use crate::crypto::EntropySource;
use crate::dice::{odds_table, parse_dice_sets, DicePool, MIN_DICE_SETS};
use crate::error::{ArgsError, Flow, GameError, Halt};
use crate::protocol::{
    claim_in_order, resolve_round, run_coin_flip, run_throw, GameId, RoundTranscript,
};
use tracing::info;

const HELP_TEXT: &str = "\
Help: choose one of the numbered options. I play my own moves automatically.
Before you answer, I publish an HMAC of every random value I pick; afterwards
I reveal the value and its key so you can recompute the HMAC yourself.
Both dice are read at the same throw index, so a die beats another with
probability (faces where it is higher) / 6.
Enter X at any prompt to leave the game.";

/// Session settings
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Fewest dice sets a game may start with
    pub min_dice_sets: usize,
    /// Print the JSON transcript after the round
    pub emit_transcript: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_dice_sets: MIN_DICE_SETS,
            emit_transcript: false,
        }
    }
}

/// How a session ended without error
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed(RoundTranscript),
    Aborted,
}

/// A single game. Owns the dice pool for its whole lifetime.
#[derive(Debug)]
pub struct GameSession {
    id: GameId,
    pool: DicePool,
    config: GameConfig,
    help: String,
}

impl GameSession {
    pub fn new(pool: DicePool, config: GameConfig) -> Self {
        let help = format!(
            "{}\nChance that your die (row) beats mine (column):\n{}",
            HELP_TEXT,
            odds_table(pool.as_slice())
        );
        Self {
            id: GameId::new(),
            pool,
            config,
            help,
        }
    }

    /// Validate command-line dice sets and start a session
    pub fn from_args<S: AsRef<str>>(args: &[S], config: GameConfig) -> Result<Self, ArgsError> {
        let pool = parse_dice_sets(args, config.min_dice_sets)?;
        Ok(Self::new(pool, config))
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn pool(&self) -> &DicePool {
        &self.pool
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// Play one round. Aborting at any prompt is a normal outcome.
    pub fn run<C, E>(mut self, console: &mut C, entropy: &mut E) -> Result<SessionOutcome, GameError>
    where
        C: Console + ?Sized,
        E: EntropySource + ?Sized,
    {
        info!(game_id = %self.id, dice = self.pool.len(), "session started");
        match self.play(console, entropy) {
            Ok(transcript) => {
                info!(
                    game_id = %self.id,
                    result = %transcript.round.result,
                    winner = ?transcript.round.result.winner(),
                    "session completed"
                );
                Ok(SessionOutcome::Completed(transcript))
            }
            Err(Halt::Abort) => {
                info!(game_id = %self.id, "session aborted by user");
                Ok(SessionOutcome::Aborted)
            }
            Err(Halt::Failed(err)) => {
                info!(game_id = %self.id, error = %err, "session failed");
                Err(err)
            }
        }
    }

    fn play<C, E>(&mut self, console: &mut C, entropy: &mut E) -> Flow<RoundTranscript>
    where
        C: Console + ?Sized,
        E: EntropySource + ?Sized,
    {
        console.print("Welcome to the fair dice game")?;
        console.print("Let's determine who makes the first move.")?;
        let coin_flip = run_coin_flip(console, entropy, &self.help)?;

        let dice = claim_in_order(
            &mut self.pool,
            coin_flip.turn_order(),
            console,
            entropy,
            &self.help,
        )?;

        console.print("It's time for my throw.")?;
        let throw = run_throw(console, entropy, &self.help)?;
        let round = resolve_round(throw.index, &dice.computer, &dice.user);
        round.announce(console)?;

        let transcript = RoundTranscript {
            game_id: self.id,
            coin_flip,
            dice,
            throw,
            round,
        };
        if self.config.emit_transcript {
            console.print(&transcript.to_json().map_err(GameError::from)?)?;
        }
        Ok(transcript)
    }
}
