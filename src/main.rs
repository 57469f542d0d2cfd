use std::error::Error;

use acquire_engine::{
    bot::{play_out, RandomBot},
    logic::{
        acquire_game::{AcquireGame, GameOptions},
        acquire_response::{AcquirePlayerResponse, AcquireResponse},
    },
};
use structopt::StructOpt;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Simulate games of Acquire between random players.
#[derive(Debug, structopt::StructOpt)]
struct Opt {
    /// the number of players
    #[structopt(short = "-p", long, default_value = "3")]
    players: usize,

    /// How many games to play, one after another.
    #[structopt(short = "-g", long, default_value = "1")]
    games: u32,

    /// Seed for the first game; each following game adds one.
    #[structopt(short = "-s", long)]
    seed: Option<u64>,

    /// Print every event as a line of JSON.
    #[structopt(long)]
    json: bool,

    /// Give up on a game after this many moves.
    #[structopt(long, default_value = "10000")]
    max_turns: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let Opt {
        players,
        games,
        seed,
        json,
        max_turns,
    } = Opt::from_args();

    for number in 1..=games {
        let options = match seed {
            Some(seed) => GameOptions::builder()
                .number(number)
                .seed(seed + u64::from(number - 1))
                .build(),
            None => GameOptions::builder().number(number).build(),
        };
        let mut game = AcquireGame::with_options(options);
        for seat in 1..=players {
            game.add_player(&format!("player{seat}"))?;
        }
        let host = game.host().map(|p| p.name.clone()).unwrap_or_default();
        let update = game.apply(AcquirePlayerResponse::new(AcquireResponse::StartGame, &host))?;

        let mut bot = match seed {
            Some(seed) => RandomBot::seeded(seed + u64::from(number - 1)),
            None => RandomBot::new(),
        };
        let mut events = update.events;
        events.extend(play_out(&mut game, &mut bot, max_turns)?);

        if json {
            for event in &events {
                println!("{}", serde_json::to_string(event)?);
            }
        }

        if game.is_ended() {
            let view = game.view();
            info!(game = number, moves = events.len(), winners = ?view.winners, "finished");
            if !json {
                println!("game {number}: won by {}", view.winners.join(", "));
                print!("{}", game.board());
                for player in &view.players {
                    println!("  {:<10} ${}", player.name, player.cash);
                }
            }
        } else {
            warn!(game = number, moves = events.len(), head = ?game.next_action(), "did not finish");
            if !json {
                println!("game {number}: stalled after {} moves", events.len());
            }
        }
    }

    Ok(())
}
