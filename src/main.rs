use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use theia_prereqs::host::document::flag_in;
use theia_prereqs::host::{HookOutcome, HookRegistry, PreCreateItem, RecordingNotifier, User};
use theia_prereqs::prereqs::{rule_schema, rules_from_value, DocumentLoader, PrereqConfig, PrereqGate};

#[derive(Parser, Debug)]
#[command(author, version, about = "Dry-run and lint item prerequisites", long_about = None)]
struct Args {
    /// YAML config file (enforce_for_gm, flag_scope, flag_key)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the gate as if the item were being created on the actor
    Check {
        /// Exported actor document (JSON or YAML)
        #[arg(short, long)]
        actor: PathBuf,

        /// Exported item document (JSON or YAML)
        #[arg(short, long)]
        item: PathBuf,

        /// Creation payload; defaults to the item document itself
        #[arg(short, long)]
        payload: Option<PathBuf>,

        /// Act as a GM user
        #[arg(long)]
        gm: bool,
    },
    /// Report malformed prerequisite rules on an item
    Lint {
        /// Exported item document (JSON or YAML)
        #[arg(short, long)]
        item: PathBuf,
    },
    /// Print the JSON Schema of a prerequisite rule
    Schema,
}

fn main() -> anyhow::Result<ExitCode> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    log::debug!("Using config: {:?}", config);

    match args.command {
        Commands::Check {
            actor,
            item,
            payload,
            gm,
        } => run_check(config, &actor, &item, payload.as_deref(), gm),
        Commands::Lint { item } => run_lint(&config, &item),
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&rule_schema())?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PrereqConfig> {
    let config = match path {
        Some(path) => PrereqConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => PrereqConfig::default(),
    };
    Ok(config.with_env_overrides()?)
}

fn run_check(
    config: PrereqConfig,
    actor_path: &Path,
    item_path: &Path,
    payload_path: Option<&Path>,
    gm: bool,
) -> anyhow::Result<ExitCode> {
    let loader = DocumentLoader::new();
    let actor = Arc::new(
        loader
            .load_actor(actor_path)
            .with_context(|| format!("Failed to load actor: {}", actor_path.display()))?,
    );
    let item = loader
        .load_item(item_path, actor)
        .with_context(|| format!("Failed to load item: {}", item_path.display()))?;
    let data = match payload_path {
        Some(path) => loader
            .load_value(path)
            .with_context(|| format!("Failed to load payload: {}", path.display()))?,
        None => item.data().clone(),
    };
    let options = Value::Object(Default::default());
    let user = if gm { User::gm("cli") } else { User::player("cli") };

    let registry = HookRegistry::new();
    registry.register(Arc::new(PrereqGate::new(config)));

    let notifier = RecordingNotifier::new();
    let outcome = registry.fire_pre_create_item(
        &PreCreateItem {
            item: &item,
            data: &data,
            options: &options,
            user: &user,
        },
        &notifier,
    );

    for warning in notifier.warnings() {
        println!("{}", warning);
    }
    match outcome {
        HookOutcome::Proceed => {
            println!("allowed");
            Ok(ExitCode::SUCCESS)
        }
        HookOutcome::Veto => {
            println!("blocked");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_lint(config: &PrereqConfig, item_path: &Path) -> anyhow::Result<ExitCode> {
    let data = DocumentLoader::new()
        .load_value(item_path)
        .with_context(|| format!("Failed to load item: {}", item_path.display()))?;
    let location = format!("flags.{}.{}", config.flag_scope, config.flag_key);

    let Some(raw) = flag_in(&data, &config.flag_scope, &config.flag_key) else {
        println!("No prerequisites at {}", location);
        return Ok(ExitCode::SUCCESS);
    };
    let Some(rules) = rules_from_value(raw) else {
        println!("{} is not an array; the gate will ignore it", location);
        return Ok(ExitCode::FAILURE);
    };

    let mut problems = 0;
    for (idx, rule) in rules.iter().enumerate() {
        for issue in rule.issues() {
            println!("rule {}: {}", idx, issue);
            problems += 1;
        }
    }

    if problems == 0 {
        println!("{} rule(s) OK", rules.len());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{} problem(s) found", problems);
        Ok(ExitCode::FAILURE)
    }
}
