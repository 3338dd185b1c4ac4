#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgGroup;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use yansi::Paint;

use super::ui;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AspectRatio;
use crate::domain::models::Event;
use crate::domain::models::KeySelectorName;
use crate::domain::models::PlanMode;
use crate::domain::models::SceneCount;
use crate::domain::services::actions::help_text;
use crate::domain::services::Store;
use crate::domain::services::Storyboard;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
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

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!(
        "Created default config file at {}",
        config_file_path.display()
    );
    return Ok(());
}

async fn read_story(matches: &ArgMatches) -> Result<String> {
    if let Some(story) = matches.get_one::<String>("story") {
        return Ok(story.to_string());
    }

    if let Some(file) = matches.get_one::<String>("file") {
        return Ok(fs::read_to_string(file).await?);
    }

    bail!("Either --story or --file is required");
}

/// Generates a single storyboard plan outside of an interactive session and
/// prints it.
async fn print_plan(story: &str) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
    let workflow = ui::build_workflow(event_tx)?;
    let mut store = Store::new(ui::session_from_config()?);

    workflow.set_story(&mut store, story);
    if let Some(handle) = workflow.generate_plan(&mut store, PlanMode::Fresh) {
        handle.await?;
    }

    while let Ok(event) = event_rx.try_recv() {
        match event {
            Event::Store(store_event) => store.dispatch(store_event),
            Event::Notice(text) | Event::Warning(text) => eprintln!("{}", Paint::yellow(text)),
        }
    }

    if let Some(err) = &store.snapshot().error {
        bail!(err.to_string());
    }

    println!("{}", Storyboard::render(store.snapshot()));
    println!("\n{}", Storyboard::all_prompts(store.snapshot()));
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

fn subcommand_plan() -> Command {
    return Command::new("plan")
        .about("Generates a storyboard for a story and prints its prompts, without rendering any visuals.")
        .arg(
            clap::Arg::new("story")
                .short('s')
                .long("story")
                .help("Story text.")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("file")
                .short('f')
                .long("file")
                .help("Path to a file containing the story.")
                .num_args(1),
        )
        .group(
            ArgGroup::new("story-source")
                .args(["story", "file"])
                .required(true),
        );
}

fn arg_aspect_ratio() -> Arg {
    return Arg::new(ConfigKey::AspectRatio.to_string())
        .short('r')
        .long(ConfigKey::AspectRatio.to_string())
        .env("STORYREEL_ASPECT_RATIO")
        .num_args(1)
        .help(format!(
            "The initial aspect ratio for generated visuals. [default: {}]",
            Config::default(ConfigKey::AspectRatio)
        ))
        .value_parser(PossibleValuesParser::new(AspectRatio::VARIANTS))
        .global(true);
}

fn arg_scene_count() -> Arg {
    return Arg::new(ConfigKey::SceneCount.to_string())
        .short('n')
        .long(ConfigKey::SceneCount.to_string())
        .env("STORYREEL_SCENE_COUNT")
        .num_args(1)
        .help(format!(
            "The initial number of scenes to generate, between {} and {}. [default: {}]",
            SceneCount::MIN,
            SceneCount::MAX,
            Config::default(ConfigKey::SceneCount)
        ))
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return Paint::new(format!("SESSION {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("storyreel")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("start").about("Start a new storyboard session."))
        .subcommand(subcommand_plan())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(arg_aspect_ratio())
        .arg(arg_scene_count())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("STORYREEL_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::GeminiToken.to_string())
                .long(ConfigKey::GeminiToken.to_string())
                .env("STORYREEL_GEMINI_TOKEN")
                .num_args(1)
                .help("Google Gemini API token used for both prompt and visual generation.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiURL.to_string())
                .long(ConfigKey::GeminiURL.to_string())
                .env("STORYREEL_GEMINI_URL")
                .num_args(1)
                .help(format!("Google Gemini API URL. Can be swapped to a compatible proxy. [default: {}]", Config::default(ConfigKey::GeminiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::TextModel.to_string())
                .long(ConfigKey::TextModel.to_string())
                .env("STORYREEL_TEXT_MODEL")
                .num_args(1)
                .help(format!("Model that turns stories into scene prompts. [default: {}]", Config::default(ConfigKey::TextModel)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ImageModel.to_string())
                .long(ConfigKey::ImageModel.to_string())
                .env("STORYREEL_IMAGE_MODEL")
                .num_args(1)
                .help(format!("Model that renders scene and poster visuals. [default: {}]", Config::default(ConfigKey::ImageModel)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OutputDir.to_string())
                .short('o')
                .long(ConfigKey::OutputDir.to_string())
                .env("STORYREEL_OUTPUT_DIR")
                .num_args(1)
                .help(format!("Directory where saved visuals are written. [default: {}]", Config::default(ConfigKey::OutputDir)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::KeySelector.to_string())
                .short('k')
                .long(ConfigKey::KeySelector.to_string())
                .env("STORYREEL_KEY_SELECTOR")
                .num_args(1)
                .help(format!("How an API key is selected when one is missing or rejected. [default: {}]", Config::default(ConfigKey::KeySelector)))
                .value_parser(PossibleValuesParser::new(KeySelectorName::VARIANTS))
                .global(true),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("start", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("plan", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            let story = read_story(subcmd_matches).await?;
            print_plan(&story).await?;
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
