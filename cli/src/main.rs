mod config;
mod function;

use std::path::PathBuf;

use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use command_guard_core::{BroadcastString, CommandGuard, FlagValue, invoked_subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use config::CliConfig;
use function::{
    BuildOptions, CreateFunctionOptions, DEFAULT_GIT_REVISION, build_service, create_guard,
    source_image,
};

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "kfn")]
#[command(about = "Create Knative functions from an image or a git repository")]
struct Cli {
    /// Path to a YAML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage functions.
    Function(FunctionArgs),
    /// Manage the kfn config file.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct FunctionArgs {
    #[command(subcommand)]
    operation: FunctionOperation,
}

#[derive(Debug, Subcommand)]
enum FunctionOperation {
    /// Print the Knative Service for a new function.
    Create(CreateArgs),
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// Function name (lowercase RFC 1123 subdomain).
    #[arg(value_name = "NAME")]
    name: Option<String>,
    /// Container image to run.
    #[arg(long)]
    image: Option<String>,
    /// Git repository to build the function from.
    #[arg(long)]
    git_repo: Option<String>,
    /// Git revision to build (default: master); requires --git-repo.
    #[arg(long)]
    git_revision: Option<String>,
    /// Namespace for the function and its build.
    #[arg(long, short = 'n')]
    namespace: Option<String>,
    /// Output format.
    #[arg(long, default_value = "json")]
    output: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    operation: ConfigOperation,
}

#[derive(Debug, Subcommand)]
enum ConfigOperation {
    /// Write a config file with the given settings.
    Init(ConfigInitArgs),
    /// Print the effective configuration.
    Show,
}

#[derive(Debug, Args)]
struct ConfigInitArgs {
    /// Where to write the config file.
    #[arg(long)]
    path: PathBuf,
    /// Default namespace.
    #[arg(long)]
    namespace: Option<String>,
    /// Image registry for functions built from source.
    #[arg(long)]
    registry: Option<String>,
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let command = Cli::command();
    let matches = command.clone().get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    let result = validate(&cli, &command, &matches).and_then(|()| run(cli));

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn guard_for(command: &Command) -> CommandGuard {
    match command {
        Command::Function(FunctionArgs {
            operation: FunctionOperation::Create(_),
        }) => create_guard(),
        Command::Config(_) => CommandGuard::new(),
    }
}

fn validate(cli: &Cli, command: &clap::Command, matches: &clap::ArgMatches) -> Result<(), String> {
    let (leaf, leaf_matches) = invoked_subcommand(command, matches)
        .ok_or_else(|| "parsed subcommand is not part of the command tree".to_string())?;
    debug!(command = leaf.get_name(), "running pre-execution validation");
    guard_for(&cli.command)
        .check_matches(leaf, leaf_matches)
        .map_err(|err| err.to_string())
}

fn run(cli: Cli) -> Result<(), String> {
    let config = match &cli.config {
        Some(path) => CliConfig::load(path)
            .map_err(|err| format!("failed to load config {}: {err}", path.display()))?,
        None => CliConfig::default(),
    };

    match cli.command {
        Command::Function(args) => match args.operation {
            FunctionOperation::Create(args) => run_function_create(args, &config),
        },
        Command::Config(args) => match args.operation {
            ConfigOperation::Init(args) => run_config_init(args),
            ConfigOperation::Show => run_config_show(&config),
        },
    }
}

fn run_function_create(args: CreateArgs, config: &CliConfig) -> Result<(), String> {
    let name = args
        .name
        .ok_or_else(|| "missing function name".to_string())?;

    let mut options = CreateFunctionOptions {
        name,
        ..Default::default()
    };
    let mut build = BuildOptions {
        git_revision: args
            .git_revision
            .clone()
            .unwrap_or_else(|| DEFAULT_GIT_REVISION.to_string()),
        ..Default::default()
    };
    {
        let mut namespace = BroadcastString::new(
            config.namespace(),
            [&mut options.namespace, &mut build.namespace],
        );
        if let Some(value) = &args.namespace {
            namespace.set(value).map_err(|err| err.to_string())?;
        }
        debug!(namespace = %namespace, "resolved namespace");
    }

    let build = match args.git_repo {
        Some(repo) => {
            options.image = source_image(
                config.registry(),
                &options.name,
                args.git_revision.as_deref(),
            );
            Some(BuildOptions {
                git_repo: repo,
                ..build
            })
        }
        None => {
            options.image = args.image.unwrap_or_default();
            None
        }
    };

    let service = build_service(&options, build.as_ref());
    let rendered = match args.output {
        CliOutputFormat::Json => serde_json::to_string_pretty(&service)
            .map_err(|err| format!("failed to render service: {err}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(&service)
            .map_err(|err| format!("failed to render service: {err}"))?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

fn run_config_init(args: ConfigInitArgs) -> Result<(), String> {
    let config = CliConfig {
        namespace: args.namespace,
        registry: args.registry,
    };
    config
        .save(&args.path)
        .map_err(|err| format!("failed to write {}: {err}", args.path.display()))?;
    println!("Wrote {}", args.path.display());
    Ok(())
}

fn run_config_show(config: &CliConfig) -> Result<(), String> {
    println!("namespace: {}", config.namespace());
    println!("registry: {}", config.registry());
    Ok(())
}
