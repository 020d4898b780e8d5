use clap::{Parser, Subcommand};
use log::{debug, error};
use pairings_assistant::{
    kb::{configured_knowledge_base, NO_MATCH},
    render_report, AppConfig, ChatHistory, PairingError, PairingLog,
    Recommendation, Recommender, RenderOptions,
};
use std::error::Error;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "pairings")]
#[command(version, about = "Deli food and drink pairing assistant")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the raw knowledge base entry for an event
    Lookup {
        /// Event name, matched case-insensitively
        event: String,
    },

    /// List the curated events
    Events,

    /// Answer a single query and exit
    Ask {
        /// Event or free-form request, e.g. "pizza night for 12"
        query: String,
        /// Append the recommendation to the pairings log
        #[arg(long)]
        save: bool,
    },

    /// Interactive session (default)
    Chat,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    debug!("Loaded configuration: {:?}", config);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Lookup { event } => {
            let kb = configured_knowledge_base(&config)?;
            match kb.lookup(&event) {
                Some(record) => println!("{}", serde_json::to_string_pretty(record)?),
                None => println!("{}", NO_MATCH),
            }
            Ok(())
        }
        Commands::Events => {
            let kb = configured_knowledge_base(&config)?;
            for name in kb.event_names() {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Ask { query, save } => {
            let recommender = Recommender::from_config(&config)?;
            let options = RenderOptions::from_config(&config.render);
            let recommendation = recommender.recommend(&query, &ChatHistory::new()).await;

            match recommendation {
                Ok(recommendation) => {
                    println!("{}", render_report(&recommendation.response, &options));
                    if save {
                        let log = PairingLog::new(&config.output.log_file);
                        println!("{}", log.append(&recommendation.log_text())?);
                    }
                    Ok(())
                }
                Err(e) => {
                    report_failure(&e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Chat => chat(&config).await,
    }
}

async fn chat(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let recommender = Recommender::from_config(config)?;
    let options = RenderOptions::from_config(&config.render);
    let log = PairingLog::new(&config.output.log_file);
    let mut history = ChatHistory::new();

    println!("Deli pairing assistant. Describe your event, or type 'exit' to quit.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("\nYou: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let query = line?;
        let query = query.trim();

        if query.is_empty() {
            continue;
        }
        if matches!(query.to_lowercase().as_str(), "exit" | "quit") {
            println!("Goodbye!");
            break;
        }

        let recommendation = match recommender.recommend(query, &history).await {
            Ok(recommendation) => recommendation,
            Err(e) => {
                report_failure(&e);
                continue;
            }
        };

        println!("\n{}", render_report(&recommendation.response, &options));
        history.record_exchange(query, &recommendation.raw);

        print!("\nSave this recommendation? (y/n): ");
        io::stdout().flush()?;
        let answer = match lines.next() {
            Some(answer) => answer?,
            None => break,
        };
        if answer.trim().eq_ignore_ascii_case("y") {
            save(&log, &recommendation);
        }
    }

    Ok(())
}

fn save(log: &PairingLog, recommendation: &Recommendation) {
    match log.append(&recommendation.log_text()) {
        Ok(message) => println!("{}", message),
        Err(e) => {
            error!("Failed to save pairing: {}", e);
            eprintln!("Could not save the recommendation: {}", e);
        }
    }
}

fn report_failure(err: &PairingError) {
    error!("{}", err);
    eprintln!("Error: {}", err);
    if let Some(raw) = err.raw_text() {
        eprintln!("\nRaw model output:\n{}", raw);
    }
}
