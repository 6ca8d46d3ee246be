mod audio;
mod common;
mod config;
mod error;
mod geo;
mod market;
mod services;
mod storage;
mod ui;

use std::path::Path;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use common::{EducationAnswer, WasteItem};
use config::AppConfig;
use dotenvy::dotenv;
use geo::ConfiguredLocation;
use services::{AiService, AiWorker, DisabledService, GeminiClient};
use storage::{SessionStore, UserStore};
use tokio::sync::mpsc;
use ui::{AppState, MarketplaceApp};

#[derive(Parser)]
#[command(
    name = "waste2worth",
    version,
    about = "Bio-waste marketplace connecting waste providers with researchers"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
enum Mode {
    /// Ask one educational question and print the answer (no UI)
    Ask { question: String },
    /// Print the seeded listings, filtered like the search page (no UI)
    Listings {
        #[arg(long, default_value = "")]
        term: String,
        #[arg(long, default_value = market::ALL_CATEGORIES)]
        category: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    if !Path::new(&cli.config).exists() {
        if let Err(err) = config::save_config(&cli.config, &AppConfig::default()) {
            log::warn!("Could not write default config to {}: {err}", cli.config);
        }
    }
    let app_config = config::load_config(&cli.config);

    match cli.mode {
        Some(Mode::Ask { question }) => {
            let service = build_service(&app_config);
            run_ask(service.as_ref(), &question).await;
            Ok(())
        }
        Some(Mode::Listings { term, category }) => {
            print_listings(&term, &category);
            Ok(())
        }
        None => {
            let service = build_service(&app_config);
            run_app(app_config, service)
        }
    }
}

fn build_service(app_config: &AppConfig) -> Arc<dyn AiService> {
    let Some(api_key) = config::api_key_from_env() else {
        log::error!("No AI API key found (API_KEY or GEMINI_API_KEY); AI features are disabled");
        return Arc::new(DisabledService);
    };

    match GeminiClient::new(app_config.ai.clone(), api_key) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            log::error!("Failed to create AI client: {err}");
            Arc::new(DisabledService)
        }
    }
}

async fn run_ask(service: &dyn AiService, question: &str) {
    match service.educational_answer(question).await {
        Ok(answer) => print!("{}", format_answer(&answer)),
        Err(err) => {
            log::error!("Educational query failed: {err}");
            eprintln!("Failed to fetch educational content: {err}");
            std::process::exit(1);
        }
    }
}

fn format_answer(answer: &EducationAnswer) -> String {
    let mut out = format!("{}\n", answer.text);
    let sources: Vec<_> = answer.web_sources().collect();
    if !sources.is_empty() {
        out.push_str("\nSources:\n");
        for source in sources {
            out.push_str(&format!("- {} <{}>\n", source.title, source.uri));
        }
    }
    out
}

fn print_listings(term: &str, category: &str) {
    print!("{}", format_listings(&market::seed_listings(), term, category));
}

fn format_listings(listings: &[WasteItem], term: &str, category: &str) -> String {
    let visible = market::filter_listings(listings, term, category);
    if visible.is_empty() {
        return "No Listings Found\n".to_string();
    }
    visible
        .iter()
        .map(|item| {
            format!(
                "[{}] {} ({}) - {} @ {} by {}\n",
                item.id, item.title, item.category, item.quantity, item.location, item.user.name
            )
        })
        .collect()
}

fn open_user_store(app_config: &AppConfig) -> Box<dyn UserStore> {
    match storage::open_session_store(&app_config.data_dir) {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::error!(
                "Failed to open local storage in {}: {err}; sign-ins will not persist",
                app_config.data_dir.display()
            );
            match SessionStore::in_memory() {
                Ok(store) => Box::new(store),
                Err(err) => {
                    log::error!("In-memory storage unavailable: {err}");
                    Box::new(storage::NullStore)
                }
            }
        }
    }
}

fn run_app(app_config: AppConfig, service: Arc<dyn AiService>) -> Result<(), eframe::Error> {
    // UI -> AI worker
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // AI worker -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    tokio::spawn(AiWorker::new(service, event_tx, cmd_rx).run());

    let state = AppState::new(
        open_user_store(&app_config),
        Box::new(ConfiguredLocation::new(app_config.location.clone())),
        app_config.data_dir.join("audio"),
    );
    log::info!(
        "Starting Waste2Worth with data directory {}",
        app_config.data_dir.display()
    );

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Waste2Worth",
        options,
        Box::new(move |cc| Ok(Box::new(MarketplaceApp::new(cc, state, cmd_tx, event_rx)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{GroundingSource, SourceLink};

    #[test]
    fn listings_output_respects_filters() {
        let out = format_listings(&market::seed_listings(), "peels", market::ALL_CATEGORIES);
        assert_eq!(
            out,
            "[3] Citrus Peels (Food Waste) - 200 lbs/day @ Juice Factory, Miami, FL by Fresh Juices Inc.\n"
        );

        let food = format_listings(&market::seed_listings(), "", "Food Waste");
        assert_eq!(food.lines().count(), 2);
    }

    #[test]
    fn listings_output_reports_no_match() {
        let out = format_listings(&market::seed_listings(), "peels", "Agricultural Waste");
        assert_eq!(out, "No Listings Found\n");
    }

    #[test]
    fn answer_output_lists_web_sources_only() {
        let answer = EducationAnswer {
            text: "Ferment the peels.".into(),
            sources: vec![
                GroundingSource::Maps(SourceLink {
                    uri: "https://maps.example/depot".into(),
                    title: "Depot".into(),
                }),
                GroundingSource::Web(SourceLink {
                    uri: "https://example.org/pectin".into(),
                    title: "Pectin guide".into(),
                }),
            ],
        };
        assert_eq!(
            format_answer(&answer),
            "Ferment the peels.\n\nSources:\n- Pectin guide <https://example.org/pectin>\n"
        );

        let bare = EducationAnswer {
            text: "No sources.".into(),
            sources: Vec::new(),
        };
        assert_eq!(format_answer(&bare), "No sources.\n");
    }
}
