use std::io::{self, BufRead};

use anyhow::{Context, Result, bail};
use clap::Parser;

use sokoban::board::Direction;
use sokoban::levels::Levels;
use sokoban::session::{Outcome, Session};

#[derive(Parser)]
#[command(name = "sokoban")]
#[command(about = "A terminal Sokoban game", long_about = None)]
struct Args {
    /// Path to the levels file (boards separated by blank lines)
    #[arg(value_name = "FILE")]
    levels_file: String,

    /// Level number to start from (1-indexed)
    #[arg(short, long, default_value = "1")]
    level: usize,
}

fn print_board(session: &Session) {
    println!(
        "Level {} ({} goals left)",
        session.level() + 1,
        session.board().goals_left()
    );
    println!("{}", session.board());
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.level == 0 {
        bail!("level numbers start at 1");
    }

    let levels = Levels::from_file(&args.levels_file)
        .with_context(|| format!("failed to load levels from {}", args.levels_file))?;
    let mut session = Session::new(levels, args.level - 1)?;

    println!("Moves: h/j/k/l or w/a/s/d, r = restart level, q = quit");
    print_board(&session);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        for ch in line.trim().chars() {
            let dir = match ch {
                'k' | 'w' => Direction::Up,
                'j' | 's' => Direction::Down,
                'h' | 'a' => Direction::Left,
                'l' | 'd' => Direction::Right,
                'r' => {
                    session.reset();
                    continue;
                }
                'q' => return Ok(()),
                _ => continue,
            };
            match session.move_player(dir) {
                Outcome::Playing => {}
                Outcome::Advanced { next } => println!("Level {} solved!", next),
                Outcome::Complete => {
                    println!("All levels solved!");
                    return Ok(());
                }
            }
        }
        print_board(&session);
    }

    Ok(())
}
