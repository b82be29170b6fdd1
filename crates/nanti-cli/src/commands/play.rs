use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;

use colored::Colorize;

use nanti_mechanics::Severity;
use nanti_session::{FileStore, GameConfig, GameSession, StubMinter};

pub fn run(
    dir: &Path,
    catalog: Option<&Path>,
    seed: Option<u64>,
    no_delay: bool,
) -> Result<(), String> {
    let catalog = super::load_catalog(catalog)?;
    let seed = seed.unwrap_or_else(rand::random);
    let config = GameConfig::default().with_seed(seed);

    let mut session = GameSession::new(
        config,
        catalog,
        Box::new(FileStore::new(dir)),
        Box::new(StubMinter::new()),
    )
    .map_err(|e| format!("failed to start session: {e}"))?;

    println!("  {} Lands of Nanti", "Welcome to".bold());
    println!(
        "  {} | {} silver | Seed: {seed}",
        session.profile().name,
        session.profile().silver
    );
    println!("  Type 'levels' to see the road ahead, 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        let eof = match reader.read_line(&mut line) {
            Ok(n) => n == 0,
            Err(e) => return Err(e.to_string()),
        };

        // End of input behaves like `quit`.
        let input = if eof { "quit" } else { line.trim() };
        if input.is_empty() {
            continue;
        }

        let quitting = input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q");
        match session.process(input) {
            Ok(reply) => {
                if !no_delay && !reply.delay.is_zero() {
                    thread::sleep(reply.delay);
                }
                if !reply.text.is_empty() {
                    println!("{}\n", reply.text);
                }
                for warning in &reply.warnings {
                    println!("{}\n", format!("warning: {warning}").yellow());
                }
            }
            Err(e) => match e.severity() {
                Severity::Fatal => println!("{}\n", format!("error: {e}").red()),
                Severity::Warning => println!("{}\n", e.to_string().yellow()),
            },
        }
        if quitting {
            break;
        }
    }

    Ok(())
}
