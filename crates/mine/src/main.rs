//! mine - create MineAdmin projects from release archives

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use mine_core::{
    ClackConsole, Console, CreateOptions, CreationReport, Language, Level, MineConfig,
    ProjectCreationWorkflow, RemoteFetcher, VersionQuery, LATEST,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding a tracing filter, e.g. `MINE_LOG=mine_core=debug`
const LOG_ENV: &str = "MINE_LOG";

#[derive(Parser, Debug)]
#[command(name = "mine")]
#[command(about = "MineAdmin CLI tool")]
#[command(
    long_about = "A command line tool for downloading and managing MineAdmin projects.\n\
                  Complete documentation is available at https://github.com/mineadmin/mine"
)]
#[command(version)]
pub struct Args {
    /// Print diagnostics to stderr (repeat for more detail)
    #[arg(long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new MineAdmin project
    #[command(after_help = "Example:\n  mine create demoProject --language=php --version=v1.0.1 --platform=swow")]
    Create(CreateArgs),
    /// List available versions of MineAdmin
    #[command(after_help = "Example:\n  mine select-versions --language=php")]
    SelectVersions(SelectVersionsArgs),
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Project directory to create
    pub project_name: PathBuf,

    /// Programming language
    #[arg(short, long, value_enum, default_value_t = LanguageArg::Php)]
    pub language: LanguageArg,

    /// Version of MineAdmin (release tag or "latest")
    #[arg(short, long, default_value = LATEST)]
    pub version: String,

    /// Platform (swow/swoole)
    #[arg(short, long, default_value = "swow")]
    pub platform: String,

    /// Accept every default instead of prompting (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Parser, Debug)]
pub struct SelectVersionsArgs {
    /// Programming language
    #[arg(short, long, value_enum)]
    pub language: LanguageArg,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LanguageArg {
    Php,
    Go,
    Js,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Php => Language::Php,
            LanguageArg::Go => Language::Go,
            LanguageArg::Js => Language::Js,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Command::Create(create_args) => create(create_args).await,
        Command::SelectVersions(select_args) => select_versions(select_args).await,
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn create(args: CreateArgs) -> Result<ExitCode> {
    let config = MineConfig::from_env()?;
    tracing::debug!(?config, "loaded configuration");

    let console = ClackConsole::new().assume_defaults(args.yes);
    console.intro("MineAdmin")?;
    console.notify(
        Level::Info,
        &format!("Creating project {}...", args.project_name.display()),
    );

    let workflow = ProjectCreationWorkflow::new(&config, &console)?;
    let options = CreateOptions {
        project_dir: args.project_name,
        language: args.language.into(),
        version: args.version,
        platform: args.platform,
    };

    match workflow.run(options).await {
        Ok(report) => {
            print_next_steps(&report);
            console.outro(&format!(
                "Successfully created project {}",
                report.project_dir.display()
            ))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            console.notify(Level::Error, &e.to_string());
            if e.source.is_rate_limited() {
                console.notify(
                    Level::Warning,
                    "GitHub limits anonymous API requests; wait a while or pass --version explicitly",
                );
            }
            console.outro_cancel("Failed to create project")?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn next_steps(report: &CreationReport) -> Vec<String> {
    let mut steps = Vec::new();
    let current = std::env::current_dir().ok();

    if current.as_ref() != Some(&report.project_dir) {
        steps.push(format!("cd {}", report.project_dir.display()));
    }

    if report.language.is_primary() {
        steps.push("composer install".to_string());
        steps.push("php bin/hyperf.php start".to_string());
    } else {
        steps.push("Open README.md to get started".to_string());
    }

    steps
}

fn print_next_steps(report: &CreationReport) {
    println!();
    println!(
        "  {} {} ({}, {})",
        "MineAdmin".bold(),
        report.version,
        report.language.display_name(),
        report.platform
    );
    if !report.patched_files.is_empty() {
        println!("  {} platform files replaced", report.patched_files.len());
    }
    if let Some(env_file) = &report.env_file {
        println!("  Configuration written to {}", env_file.display());
    }

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in next_steps(report).iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
    println!();
}

async fn select_versions(args: SelectVersionsArgs) -> Result<ExitCode> {
    let config = MineConfig::from_env()?;
    let fetcher = RemoteFetcher::new(&config)?;
    let language: Language = args.language.into();

    let versions = VersionQuery::for_language(language, &fetcher, &config.repository)
        .list_versions()
        .await?;

    let table = render_version_table(language, &versions);
    let mut lines = table.lines();
    if let Some(header) = lines.next() {
        println!("{}", header.bold());
    }
    for line in lines {
        println!("{}", line);
    }

    Ok(ExitCode::SUCCESS)
}

#[derive(Tabled)]
struct VersionRow {
    #[tabled(rename = "VERSION")]
    version: String,
    #[tabled(rename = "LANGUAGE")]
    language: &'static str,
    #[tabled(rename = "STATUS")]
    status: &'static str,
}

/// Borderless VERSION/LANGUAGE/STATUS table, header on the first line
fn render_version_table(language: Language, versions: &[String]) -> String {
    let rows = versions.iter().map(|version| VersionRow {
        version: version.clone(),
        language: language.id(),
        status: "available",
    });

    let mut table = Table::new(rows);
    table.with(Style::blank());
    table.to_string()
}
