use clap::Parser;
use stylist_client::cli::{self, Cli};

fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    let args = Cli::parse();

    let settings = match args.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };

    cli::init_logging(&settings.logging);

    if let Err(e) = cli::run(&args, &settings) {
        tracing::error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
