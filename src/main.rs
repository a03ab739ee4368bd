use anyhow::{Context, Result};
use clap::CommandFactory;
use meow::cli::output::{style, CROSS, WARN};
use meow::cli::push_target;
use meow::cli::suggest::GitSuggester;
use meow::cli::terminal_output::TerminalReporter;
use meow::cli::{parse_request, Cli, Request};
use meow::core::settings::Settings;
use meow::execution::{
    ExecOptions, ExecutionError, Interrupt, PipelineOrchestrator, ProcessRunner, Reporter,
    SystemSpawner,
};
use meow::Pipeline;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Exit code for invalid options or settings
const CONFIG_ERROR_EXIT_CODE: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;

    if args.len() == 1 {
        Cli::command().print_help()?;
        println!("\ncurrent directory: {}", style(cwd.display()).bold());
        std::process::exit(1);
    }

    let request = match parse_request(args) {
        Ok(request) => request,
        Err(e) => e.exit(),
    };

    // Initialize logging
    let verbose = matches!(&request, Request::Pipeline(cli) if cli.verbose);
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let interrupt = Interrupt::on_ctrl_c();
    let exit_code = match request {
        Request::Passthrough(git_args) => run_passthrough(git_args, cwd, interrupt).await,
        Request::Pipeline(cli) => run_pipeline(*cli, cwd, interrupt).await,
    };

    debug!("Exiting with code {}", exit_code);
    std::process::exit(exit_code);
}

/// Run a single git command with the terminal handed over
async fn run_passthrough(git_args: Vec<String>, cwd: PathBuf, interrupt: Interrupt) -> i32 {
    let reporter: Arc<dyn Reporter> = Arc::new(TerminalReporter::new(false));
    let runner = ProcessRunner::new(SystemSpawner, reporter.clone(), interrupt, cwd);

    let mut command = vec!["git".to_string()];
    command.extend(git_args);

    match runner.execute(&command, ExecOptions::interactive()).await {
        Ok(_) => 0,
        Err(ExecutionError::Interrupted) => {
            reporter.report_error("operation cancelled by user");
            ExecutionError::Interrupted.exit_code()
        }
        Err(e @ ExecutionError::Spawn { .. }) => {
            reporter.report_error(&e.to_string());
            e.exit_code()
        }
        Err(e) => e.exit_code(),
    }
}

async fn run_pipeline(cli: Cli, cwd: PathBuf, interrupt: Interrupt) -> i32 {
    println!(
        "{} {}",
        style("meow").magenta().bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).cyan()
    );
    println!("current directory: {}", style(cwd.display()).bold());

    let settings = match Settings::discover(cli.config_path(), &cwd) {
        Ok(settings) => settings,
        Err(e) => return config_error(&e),
    };
    let mut config = match cli.to_configuration(&settings) {
        Ok(config) => config,
        Err(e) => return config_error(&e),
    };

    if config.dry_run {
        println!("{}", style("dry run").magenta().bold());
    }

    if let Some(preference) = cli.push_preference(&settings) {
        config.push_target = push_target::resolve(&cwd, &preference).await;
        if config.push_target.is_none() {
            debug!("No remote or branch to push to, skipping push");
            println!(
                "{}{}",
                WARN,
                style("could not determine where to push; skipping push").yellow()
            );
        }
    }

    let mut pipeline = Pipeline::from_config(&config);
    let reporter: Arc<dyn Reporter> = Arc::new(TerminalReporter::new(config.quiet));
    let runner = ProcessRunner::new(SystemSpawner, reporter.clone(), interrupt, cwd);
    let orchestrator = PipelineOrchestrator::new(runner, reporter, Arc::new(GitSuggester::new()));

    let outcome = orchestrator.run(&mut pipeline, &config).await;
    outcome.exit_code
}

fn config_error(error: &dyn std::fmt::Display) -> i32 {
    eprintln!("{}{} {}", CROSS, style("error:").red().bold(), error);
    CONFIG_ERROR_EXIT_CODE
}
