use hangman::cli::{CliInterface, parse_cli};
use hangman::game_state::game_loop;
use hangman::logging::init_logging;
use hangman::tui::TuiInterface;
use std::io;

fn main() {
    let cli = parse_cli();
    init_logging();
    log::info!("Starting hangman: {cli:?}");

    let config = cli.game_config();
    let mut rng = rand::rng();

    if cli.tui {
        match TuiInterface::new() {
            Ok(mut interface) => game_loop(&mut interface, &config, &mut rng),
            Err(e) => {
                eprintln!("Failed to start terminal interface: {e}");
                log::error!("TUI initialisation failed: {e}");
            }
        }
    } else {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock(), io::stdout());
        game_loop(&mut interface, &config, &mut rng);
    }

    log::info!("Exiting hangman");
}
