use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::configuration::Environment;
use crate::domain::models::CardType;
use crate::domain::models::Flow;
use crate::infrastructure::backends::BackendManager;

const KEYS_TEXT: &str = r#"
STUDY HOTKEYS:
- Enter - Submit the verb in the input box
- F1 / F2 / F3 - Practice meaning only, core or full conjugations after an analysis
- CTRL+S - Save all generated cards
- CTRL+N - Clear the results and study another verb
- CTRL+R - Retry the last verb after an error
- Up / Down - Scroll the results
- CTRL+C - Exit
"#;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

/// Directory the debug log is written to.
pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("VERBCARDS_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("verbcards");
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn print_cards_list() -> Result<()> {
    let list = BackendManager::get().list_cards().await?;
    if list.cards.is_empty() {
        println!("There are no saved cards yet. Study a verb and save some!");
        return Ok(());
    }

    let cards = list
        .cards
        .iter()
        .map(|card| {
            return card.format();
        })
        .collect::<Vec<String>>();

    println!("{}\n\n{} cards saved", cards.join("\n"), list.count);
    return Ok(());
}

async fn delete_card(delete_matches: &ArgMatches) -> Result<()> {
    let id = match delete_matches.get_one::<i64>("card-id") {
        Some(id) => *id,
        None => bail!("A card ID is required"),
    };

    let card_type = delete_matches
        .get_one::<String>("type")
        .and_then(|text| return CardType::parse(text))
        .unwrap_or(CardType::Verb);

    let res = BackendManager::get().delete_card(id, card_type).await?;
    let message = res
        .message
        .unwrap_or_else(|| return format!("Deleted {card_type} card {id}"));
    println!("{message}");

    return Ok(());
}

async fn print_health() -> Result<()> {
    let url = Config::api_url();
    BackendManager::get().health_check().await?;
    println!("Flashcards API at {url} is healthy");

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    let mut cmd = Command::new("debug");
    cmd = cmd.about("Debug helpers for verbcards")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running verbcards with environment variable RUST_LOG=verbcards")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );

    return cmd;
}

fn subcommand_cards_delete() -> Command {
    return Command::new("delete")
        .about("Delete a saved card.")
        .arg(
            clap::Arg::new("card-id")
                .short('i')
                .long("id")
                .help("Card ID, as shown by `cards list`")
                .num_args(1)
                .value_parser(value_parser!(i64))
                .required(true),
        )
        .arg(
            clap::Arg::new("type")
                .short('t')
                .long("type")
                .help("Which kind of card the ID belongs to.")
                .num_args(1)
                .default_value("verb")
                .value_parser(PossibleValuesParser::new(CardType::VARIANTS)),
        );
}

fn subcommand_cards() -> Command {
    return Command::new("cards")
        .about("Manage cards saved to the flashcards API.")
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List all saved cards with their ids."))
        .subcommand(subcommand_cards_delete());
}

pub fn build() -> Command {
    let keys_text = KEYS_TEXT
        .trim()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            return Paint::new(line).underline().bold().to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("verbcards")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(keys_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("study").about("Start a verb study session."))
        .subcommand(subcommand_cards())
        .subcommand(Command::new("health").about("Checks the flashcards API is reachable."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(
            Arg::new(ConfigKey::ApiURL.to_string())
                .short('u')
                .long(ConfigKey::ApiURL.to_string())
                .env("VERBCARDS_API_URL")
                .num_args(1)
                .help("Flashcards API base URL. Overrides the URL picked by the environment.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Environment.to_string())
                .short('e')
                .long(ConfigKey::Environment.to_string())
                .env("VERBCARDS_ENVIRONMENT")
                .num_args(1)
                .help(format!("Which flashcards API deployment to use when no API URL is set. [default: {}]", Config::default(ConfigKey::Environment)))
                .value_parser(PossibleValuesParser::new(Environment::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Flow.to_string())
                .short('f')
                .long(ConfigKey::Flow.to_string())
                .env("VERBCARDS_FLOW")
                .num_args(1)
                .help(format!("Analyze the verb before choosing a depth, or generate conjugations straight away. [default: {}]", Config::default(ConfigKey::Flow)))
                .value_parser(PossibleValuesParser::new(Flow::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::HealthCheckTimeout.to_string())
                .long(ConfigKey::HealthCheckTimeout.to_string())
                .env("VERBCARDS_HEALTH_CHECK_TIMEOUT")
                .num_args(1)
                .help(format!("Time to wait in milliseconds before timing out when checking the flashcards API. [default: {}]", Config::default(ConfigKey::HealthCheckTimeout)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::SaveConfirmationDelay.to_string())
                .long(ConfigKey::SaveConfirmationDelay.to_string())
                .env("VERBCARDS_SAVE_CONFIRMATION_DELAY")
                .num_args(1)
                .help(format!("Time in milliseconds the save button shows its confirmation. [default: {}]", Config::default(ConfigKey::SaveConfirmationDelay)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("VERBCARDS_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = log_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("study", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("cards", subcmd_matches)) => {
            match subcmd_matches.subcommand() {
                Some(("list", list_matches)) => {
                    Config::load(build(), vec![&matches, subcmd_matches, list_matches]).await?;
                    print_cards_list().await?;
                }
                Some(("delete", delete_matches)) => {
                    Config::load(build(), vec![&matches, subcmd_matches, delete_matches])
                        .await?;
                    delete_card(delete_matches).await?;
                }
                _ => {
                    subcommand_cards().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("health", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            print_health().await?;
            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
