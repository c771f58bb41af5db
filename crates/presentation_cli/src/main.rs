//! Yammi CLI
//!
//! Command-line front end for the meal chatbot and nearby restaurant search.

#![allow(clippy::print_stdout)]

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use domain::{ChatRequest, ChatResponse, GeoLocation, MealCategory, StoreRecord};
use infrastructure::{AppConfig, init_logging};
use integration_chat::ChatService;
use integration_poi::{PoiError, PoiProvider, RestaurantSearch, deeplink};
use serde_json::json;
use tracing::{debug, error, warn};

/// Yammi CLI
#[derive(Debug, Parser)]
#[command(name = "yammi-cli")]
#[command(author, version, about = "Yammi meal chatbot CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Configuration file (default: ./yammi.toml if present)
    #[arg(short, long, env = "YAMMI_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Search center, Seoul City Hall unless given
#[derive(Debug, Clone, Copy, Args)]
struct Location {
    /// Latitude in degrees
    #[arg(long, default_value_t = 37.5665, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude in degrees
    #[arg(long, default_value_t = 126.978, allow_hyphen_values = true)]
    lon: f64,
}

impl Location {
    fn to_geo(self) -> anyhow::Result<GeoLocation> {
        Ok(GeoLocation::new(self.lat, self.lon)?)
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Send a chat message
    Chat {
        /// Message to send
        message: String,

        /// Recommendation category (distance, cost, preference, allergy)
        #[arg(short = 'k', long)]
        category: Option<MealCategory>,
    },

    /// Ask for a recommendation in one category
    Recommend {
        /// Recommendation category (distance, cost, preference, allergy)
        category: MealCategory,
    },

    /// Search restaurants near a location
    Nearby {
        #[command(flatten)]
        location: Location,
    },

    /// Search places serving a given food near a location
    ///
    /// Example: yammi-cli food 치킨 --lat 37.5665 --lon 126.978
    Food {
        /// Food type (e.g., 치킨, 피자, 한식)
        #[arg(value_parser = non_blank)]
        food_type: String,

        #[command(flatten)]
        location: Location,
    },

    /// Print a route deep link to a place
    Route {
        /// Destination name
        name: String,

        /// Destination latitude
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Destination longitude
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Origin latitude (current position if omitted)
        #[arg(long, requires = "from_lon", allow_hyphen_values = true)]
        from_lat: Option<f64>,

        /// Origin longitude
        #[arg(long, requires = "from_lat", allow_hyphen_values = true)]
        from_lon: Option<f64>,

        /// Print the web URL instead of the app link
        #[arg(long)]
        web: bool,
    },

    /// Check backend health
    Health,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_chat(response: &ChatResponse, as_json: bool) -> anyhow::Result<bool> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else {
        print!("{}", render::chat_response(response));
    }
    Ok(response.success)
}

fn print_poi_error(e: &PoiError, as_json: bool) -> anyhow::Result<bool> {
    debug!(error = %e, "Search failed");
    if as_json {
        println!("{}", serde_json::to_string_pretty(&render::poi_error_json(e))?);
    } else {
        print!("{}", render::poi_error(e));
    }
    Ok(false)
}

async fn run_search<F, Fut>(config: &AppConfig, search: F, as_json: bool) -> anyhow::Result<bool>
where
    F: FnOnce(RestaurantSearch) -> Fut,
    Fut: Future<Output = Result<Vec<StoreRecord>, PoiError>>,
{
    let client = match RestaurantSearch::from_config(&config.poi) {
        Ok(client) => client,
        Err(e) => return print_poi_error(&e, as_json),
    };

    match search(client).await {
        Ok(stores) => {
            if as_json {
                println!("{}", serde_json::to_string_pretty(&stores)?);
            } else {
                print!("{}", render::store_list(&stores));
            }
            Ok(true)
        },
        Err(e) => print_poi_error(&e, as_json),
    }
}

/// Reject blank values at parse time
fn non_blank(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err("must not be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

async fn run(command: Commands, config: &AppConfig, as_json: bool) -> anyhow::Result<bool> {
    match command {
        Commands::Chat { message, category } => {
            let service = ChatService::from_config(&config.chat)?;
            let request = ChatRequest::new(&message, category)?;
            if !as_json {
                println!("💬 Sending: {}", request.message());
            }
            let response = service.send_message(&request).await;
            print_chat(&response, as_json)
        },

        Commands::Recommend { category } => {
            let service = ChatService::from_config(&config.chat)?;
            if !as_json {
                println!("🍽️  Category: {} ({})", category.label(), category);
            }
            let response = service.category_recommendation(category).await;
            print_chat(&response, as_json)
        },

        Commands::Nearby { location } => {
            let center = location.to_geo()?;
            run_search(
                config,
                move |search| async move { search.search_nearby(center).await },
                as_json,
            )
            .await
        },

        Commands::Food {
            food_type,
            location,
        } => {
            let center = location.to_geo()?;
            run_search(
                config,
                move |search| async move { search.search_food(center, &food_type).await },
                as_json,
            )
            .await
        },

        Commands::Route {
            name,
            lat,
            lon,
            from_lat,
            from_lon,
            web,
        } => {
            let destination = GeoLocation::new(lat, lon)?;
            let origin = match (from_lat, from_lon) {
                (Some(lat), Some(lon)) => Some(GeoLocation::new(lat, lon)?),
                _ => None,
            };
            let origin = origin.as_ref().map(|o| ("현위치", o));
            let link = if web {
                deeplink::route_web_link((name.as_str(), &destination), origin)
            } else {
                deeplink::route_link((name.as_str(), &destination), origin)
            };

            if as_json {
                println!("{}", serde_json::to_string_pretty(&json!({ "link": link }))?);
            } else {
                println!("🧭 {link}");
            }
            Ok(true)
        },

        Commands::Health => {
            let chat = ChatService::from_config(&config.chat)?.check_health().await;
            let poi = if config.poi.api_key().is_some() {
                match RestaurantSearch::from_config(&config.poi) {
                    Ok(search) => Some(search.provider().is_healthy().await),
                    Err(e) => {
                        warn!(error = %e, "TMAP client could not be built");
                        Some(false)
                    },
                }
            } else {
                None
            };

            if as_json {
                let body = json!({ "chat": chat, "poi": poi });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("🏥 Health:");
                println!(
                    "   Chat ({}): {}",
                    config.chat.resolved_base_url(),
                    if chat { "✅ healthy" } else { "❌ unreachable" }
                );
                match poi {
                    Some(true) => println!("   TMAP: ✅ healthy"),
                    Some(false) => println!("   TMAP: ❌ unreachable"),
                    None => println!("   TMAP: ⚠️  API key not configured"),
                }
            }
            Ok(chat && poi.unwrap_or(true))
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref())?;

    // -v flags override the configured filter
    let override_filter = (cli.verbose > 0).then(|| log_filter_from_verbosity(cli.verbose));
    init_logging(&config.logging, override_filter)?;

    match run(cli.command, &config, cli.json).await {
        Ok(success) => Ok(exit_code(success)),
        Err(e) => {
            error!(error = %e, "Command failed");
            Err(e)
        },
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::*;

    fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
        let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
        Cli::try_parse_from(os_args)
    }

    #[test]
    fn test_log_filter_from_verbosity() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(3), "trace");
        assert_eq!(log_filter_from_verbosity(255), "trace");
    }

    #[test]
    fn parses_chat_with_category() {
        let cli = parse_args(&["yammi-cli", "chat", "점심 뭐 먹지?", "--category", "cost"]).unwrap();
        match cli.command {
            Commands::Chat { message, category } => {
                assert_eq!(message, "점심 뭐 먹지?");
                assert_eq!(category, Some(MealCategory::Cost));
            },
            other => panic!("Expected Chat command, got {other:?}"),
        }
    }

    #[test]
    fn parses_korean_category_label() {
        let cli = parse_args(&["yammi-cli", "recommend", "알레르기"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Recommend {
                category: MealCategory::Allergy
            }
        ));
    }

    #[test]
    fn rejects_unknown_category() {
        assert!(parse_args(&["yammi-cli", "recommend", "spicy"]).is_err());
    }

    #[test]
    fn nearby_defaults_to_seoul() {
        let cli = parse_args(&["yammi-cli", "nearby"]).unwrap();
        match cli.command {
            Commands::Nearby { location } => {
                assert_eq!(location.to_geo().unwrap(), GeoLocation::seoul());
            },
            other => panic!("Expected Nearby command, got {other:?}"),
        }
    }

    #[test]
    fn food_accepts_negative_coordinates() {
        let cli = parse_args(&[
            "yammi-cli",
            "food",
            "피자",
            "--lat",
            "-33.86",
            "--lon",
            "151.2",
        ])
        .unwrap();
        match cli.command {
            Commands::Food {
                food_type,
                location,
            } => {
                assert_eq!(food_type, "피자");
                assert!((location.lat + 33.86).abs() < f64::EPSILON);
            },
            other => panic!("Expected Food command, got {other:?}"),
        }
    }

    #[test]
    fn blank_food_type_is_rejected() {
        assert!(parse_args(&["yammi-cli", "food", "   "]).is_err());
        let cli = parse_args(&["yammi-cli", "food", " 피자 "]).unwrap();
        assert!(matches!(cli.command, Commands::Food { ref food_type, .. } if food_type == "피자"));
    }

    #[tokio::test]
    async fn missing_tmap_key_is_reported_as_search_failure() {
        let config = AppConfig::default();
        let success = run(
            Commands::Nearby {
                location: Location {
                    lat: 37.5665,
                    lon: 126.978,
                },
            },
            &config,
            true,
        )
        .await
        .unwrap();
        assert!(!success);
    }

    #[test]
    fn out_of_range_location_is_rejected() {
        let location = Location {
            lat: 91.0,
            lon: 0.0,
        };
        assert!(location.to_geo().is_err());
    }

    #[test]
    fn route_origin_needs_both_coordinates() {
        assert!(
            parse_args(&[
                "yammi-cli", "route", "BBQ", "--lat", "37.5", "--lon", "127.0", "--from-lat",
                "37.4"
            ])
            .is_err()
        );
        assert!(
            parse_args(&[
                "yammi-cli",
                "route",
                "BBQ",
                "--lat",
                "37.5",
                "--lon",
                "127.0",
                "--from-lat",
                "37.4",
                "--from-lon",
                "126.9",
                "--web"
            ])
            .is_ok()
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse_args(&["yammi-cli", "health", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Health));
    }
}
