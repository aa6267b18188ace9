use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use gitlet::areas::repository::Repository;
use gitlet::artifacts::core::PagerWriter;
use gitlet::config::Config;
use gitlet::errors::{self, VcsError};
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::Write;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A small local version control system",
    long_about = "A small, single-user version control system. \
    It stores snapshots of the working directory as commits, \
    and supports branches, checkout, reset and three-way merges.",
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
    #[command(about = "Create a repository in the current directory")]
    Init,
    #[command(about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(about = "Record the staged changes")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: Option<String>,
    },
    #[command(about = "Unstage a file, and stage its removal if it is tracked")]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(about = "Show the current branch's history")]
    Log,
    #[command(about = "Show every commit ever made")]
    GlobalLog,
    #[command(about = "Print the IDs of commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(about = "Show branches, staged files and working-tree changes")]
    Status,
    #[command(
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file>: restore a file from the current commit\n\
        checkout <commit> -- <file>: restore a file from the given commit\n\
        checkout <branch>: switch to the given branch"
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name, or a commit ID when followed by -- <file>")]
        target: Option<String>,
        #[arg(index = 2, last = true)]
        file: Option<String>,
    },
    #[command(about = "Create a branch at the current commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(about = "Move the current branch to a commit and check it out")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
    #[command(about = "Compute a file's blob ID and optionally store it")]
    HashObject {
        #[arg(short, long, required = false, help = "Store the blob")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(about = "Print a stored blob or commit")]
    CatFile {
        #[arg(index = 1, help = "A blob ID, or a commit ID or prefix")]
        object_id: String,
    },
}

impl Commands {
    fn is_paged(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog)
    }
}

fn main() {
    // Respects RUST_LOG (e.g., RUST_LOG=gitlet=debug); stdout is reserved
    // for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // every outcome, failures included, ends with exit status 0
    if let Err(e) = run(Config::load_from_env()) {
        match errors::category(&e) {
            Some(category) => println!("{}", category),
            None => eprintln!("error: {:#}", e),
        }
    }
}

fn run(config: Config) -> Result<()> {
    let cli = Cli::try_parse().map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        ErrorKind::InvalidSubcommand => VcsError::UnknownCommand,
        ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            VcsError::NoCommand
        }
        _ => VcsError::IncorrectOperands,
    })?;

    let pager = (cli.command.is_paged() && config.use_pager && std::io::stdout().is_terminal())
        .then(Pager::new);
    let writer: Box<dyn Write> = match &pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };

    let pwd = std::env::current_dir()?;
    let mut repository = Repository::new(pwd, writer, config)?;

    dispatch(&mut repository, cli.command)?;
    repository.writer().flush()?;

    if let Some(pager) = pager {
        minus::page_all(pager)?;
    }

    Ok(())
}

fn dispatch(repository: &mut Repository, command: Commands) -> Result<()> {
    match command {
        Commands::Init => repository.init(),
        Commands::Add { file } => repository.add(&file),
        Commands::Commit { message } => repository.commit(message.as_deref().unwrap_or_default()),
        Commands::Rm { file } => repository.rm(&file),
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { message } => repository.find(&message),
        Commands::Status => repository.status(),
        Commands::Checkout { target, file } => match (target, file) {
            (None, Some(file)) => repository.checkout_file(&file),
            (Some(commit), Some(file)) => repository.checkout_commit_file(&commit, &file),
            (Some(branch), None) => repository.checkout_branch(&branch),
            (None, None) => anyhow::bail!(VcsError::IncorrectOperands),
        },
        Commands::Branch { name } => repository.branch(&name),
        Commands::RmBranch { name } => repository.rm_branch(&name),
        Commands::Reset { commit } => repository.reset(&commit),
        Commands::Merge { branch } => repository.merge(&branch).map(|_| ()),
        Commands::HashObject { write, file } => repository.hash_object(&file, write),
        Commands::CatFile { object_id } => repository.cat_file(&object_id),
    }
}
