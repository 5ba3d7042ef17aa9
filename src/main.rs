use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use gitlet::areas::repository::{GITLET_DIR, Repository};
use gitlet::artifacts::core::Output;
use gitlet::commands::porcelain::checkout::HEAD_REF_NAME;
use gitlet::errors::GitletError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directive
const LOG_ENV: &str = "GITLET_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small local version-control system",
    long_about = "Gitlet snapshots files into content-addressed objects, links the \
    snapshots into a commit history and supports branches with a three-way merge. \
    All state lives in the .gitlet directory of the current working directory.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

COMMANDS:
{subcommands}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Create a new repository in the current directory")]
    Init,
    #[command(about = "Stage a file for the next commit")]
    Add { file: String },
    #[command(about = "Snapshot the staged changes")]
    Commit {
        #[arg(allow_hyphen_values = true)]
        message: String,
    },
    #[command(about = "Unstage a file, or stage its removal if it is tracked")]
    Rm { file: String },
    #[command(about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(about = "Print the ids of the commits with the given message")]
    Find {
        #[arg(allow_hyphen_values = true)]
        message: String,
    },
    #[command(about = "Create a branch at the current commit")]
    Branch { name: String },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch { name: String },
    #[command(
        about = "Switch branches or restore a file",
        long_about = "checkout <branch> switches to a branch, checkout -- <file> restores a \
        file from HEAD and checkout <commit> -- <file> restores it from a commit."
    )]
    Checkout {
        target: Option<String>,
        #[arg(last = true)]
        file: Option<String>,
    },
    #[command(about = "Merge a branch into the current branch")]
    Merge { branch: String },
    #[command(about = "Move the current branch to a commit")]
    Reset { commit: String },
    #[command(about = "Show branches, staged, removed and untracked files")]
    Status,
}

impl Commands {
    fn is_paged(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog)
    }

    fn is_read_only(&self) -> bool {
        matches!(
            self,
            Commands::Log | Commands::GlobalLog | Commands::Find { .. } | Commands::Status
        )
    }
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => match GitletError::find(&error) {
            Some(gitlet_error) => {
                println!("{}", gitlet_error);
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("error: {:#}", error);
                ExitCode::FAILURE
            }
        },
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn parse_cli() -> Result<Cli> {
    if std::env::args_os().len() <= 1 {
        return Err(GitletError::MissingCommand.into());
    }

    Cli::try_parse().map_err(|error| match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),
        ErrorKind::InvalidSubcommand => GitletError::UnknownCommand.into(),
        ErrorKind::MissingSubcommand => GitletError::MissingCommand.into(),
        // a known command outside a repository fails on the repository first
        _ if !is_init_invocation() && !is_repository_dir() => GitletError::NotInitialized.into(),
        _ => GitletError::IncorrectOperands.into(),
    })
}

fn is_init_invocation() -> bool {
    std::env::args_os().nth(1).is_some_and(|command| command == "init")
}

fn is_repository_dir() -> bool {
    std::env::current_dir().is_ok_and(|pwd| pwd.join(GITLET_DIR).is_dir())
}

fn run() -> Result<()> {
    let cli = parse_cli()?;

    let output = Output::new(cli.command.is_paged());
    let pwd = std::env::current_dir()?;
    let mut repository = Repository::new(&pwd, output.writer())?;

    if !matches!(cli.command, Commands::Init) {
        if !repository.is_initialized() {
            return Err(GitletError::NotInitialized.into());
        }
        repository.rehydrate()?;
    }

    let read_only = cli.command.is_read_only();
    dispatch(&mut repository, cli.command)?;

    if !read_only {
        repository.write_updates()?;
    }

    drop(repository);
    output.finish()
}

fn dispatch(repository: &mut Repository, command: Commands) -> Result<()> {
    match command {
        Commands::Init => repository.init(),
        Commands::Add { file } => repository.add(&file),
        Commands::Commit { message } => repository.commit(&message).map(|_| ()),
        Commands::Rm { file } => repository.rm(&file),
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { message } => repository.find(&message),
        Commands::Branch { name } => repository.branch(&name),
        Commands::RmBranch { name } => repository.rm_branch(&name),
        Commands::Checkout { target, file } => match (target, file) {
            (Some(branch), None) => repository.checkout_branch(&branch),
            (None, Some(file)) => repository.checkout_file(HEAD_REF_NAME, &file),
            (Some(commit), Some(file)) => repository.checkout_file(&commit, &file),
            (None, None) => Err(GitletError::IncorrectOperands.into()),
        },
        Commands::Merge { branch } => repository.merge(&branch).map(|_| ()),
        Commands::Reset { commit } => repository.reset(&commit),
        Commands::Status => repository.status(),
    }
}
