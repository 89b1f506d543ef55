//! Mystery Country terminal front end.
//!
//! Thin presentation adapter over the engine: reads commands and guesses
//! from stdin, prints per-guess feedback and the closest-miss list, and can
//! dump the serializable view model as JSON.
//!
//! Usage:
//!   mystery-country --geometry data/countries.geojson \
//!                   --names data/country_names_es.json

use anyhow::Result;
use clap::Parser;
use guess_engine::{loader, GameSession, GeoIndex, Language, NameResolver};
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "mystery-country",
    about = "Guess the mystery country from distance feedback"
)]
struct Args {
    /// Path to the world GeoJSON file
    #[arg(short = 'g', long, default_value = "data/countries.geojson")]
    geometry: PathBuf,

    /// Path to the Spanish/English name table
    #[arg(short = 'n', long, default_value = "data/country_names_es.json")]
    names: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let index = loader::load_geo_index(&args.geometry)?;
    let resolver = loader::load_name_table(&args.names)?;

    let mut session = GameSession::new();
    let mut rng = rand::thread_rng();

    println!("Mystery Country — {} countries loaded.", index.len());
    println!("Type 'new' to start, 'help' for commands.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            "quit" | "exit" => break,
            "help" => print_help(),
            "new" => match GameSession::choose_target(&index, &mut rng) {
                Some(target) => {
                    session.new_game(target);
                    println!("New mystery country chosen (hidden). Guess away.");
                }
                None => println!("No countries available to pick from."),
            },
            "reveal" => {
                session.toggle_reveal();
                match (session.revealed(), session.target()) {
                    (true, Some(target)) => println!(
                        "The mystery country is {} ({}).",
                        resolver.display_name(target, Language::Spanish),
                        target
                    ),
                    (true, None) => println!("Nothing to reveal yet."),
                    (false, _) => println!("Answer hidden again."),
                }
            }
            "reset" => {
                session.reset();
                println!("Session cleared.");
            }
            "state" => print_state(&session, &index)?,
            text => handle_guess(text, &mut session, &resolver, &index),
        }
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  new     start a round with a fresh mystery country");
    println!("  reveal  show or hide the answer");
    println!("  state   dump the view model and geometry as JSON");
    println!("  reset   clear the session");
    println!("  quit    leave the game");
    println!("Anything else is treated as a guess, in Spanish or English.");
}

fn print_state(session: &GameSession, index: &GeoIndex) -> Result<()> {
    let view = session.view_model();
    let geometry = index.geometry_for(&view.rendered);
    let payload = serde_json::json!({ "view": view, "geometry": geometry });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn handle_guess(
    text: &str,
    session: &mut GameSession,
    resolver: &NameResolver,
    index: &GeoIndex,
) {
    match session.submit_guess(text, resolver, index) {
        Ok(report) => {
            match report.language {
                Language::Spanish => println!("You wrote Spanish: {}", report.display_name),
                Language::English => {
                    println!("In Spanish that would be: {}", report.display_name)
                }
            }
            if report.correct {
                println!("Correct! Attempts: {}", session.attempts());
            } else {
                let distance = report.distance_km.unwrap_or_default();
                println!(
                    "Not it. Distance: {} km ({:?}). Attempts: {}",
                    distance as i64,
                    report.tier,
                    session.attempts()
                );
                let view = session.view_model();
                if !view.incorrect.is_empty() {
                    println!("Closest misses:");
                    for entry in view.incorrect.iter().take(8) {
                        println!("  {} — {} km", entry.name, entry.distance_km as i64);
                    }
                }
            }
        }
        Err(rejection) => println!("{rejection}"),
    }
}
