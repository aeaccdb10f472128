use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use colored::Colorize;
use groot::areas::repository::Repository;
use groot::commands::plumbing::cat_file::CatFileMode;
use groot::config::{DEFAULT_STORE_DIR, EntryOrder, RepositoryConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "groot",
    version = "0.1.0",
    about = "A content-addressed object store with a git-compatible staging index",
    long_about = "groot snapshots files and directories into zlib-compressed, SHA-1 \
    addressed blob and tree objects, and keeps a binary staging index of the files it stored.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(
        short = 'C',
        long = "root",
        global = true,
        help = "Run as if started in this directory"
    )]
    root: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "GROOT_DIR",
        default_value = DEFAULT_STORE_DIR,
        help = "Name of the store directory inside the root"
    )]
    store_dir: String,
    #[arg(
        long,
        global = true,
        env = "GROOT_SORT_ENTRIES",
        help = "Sort tree entries by name instead of directory listing order"
    )]
    sort_entries: bool,
    #[arg(short, long, global = true, help = "Log debug events to stderr")]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the store directory, an empty index and HEAD \
        in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "hash-object",
        about = "Compute the id of a file or directory and optionally store it",
        long_about = "This command hashes a file as a blob or a directory as a tree. \
        With --write, objects are stored and files are staged in the index."
    )]
    HashObject {
        #[arg(short, long, help = "Write the objects to the object database")]
        write: bool,
        #[arg(index = 1)]
        path: String,
    },
    #[command(name = "add", about = "Store files and stage them in the index")]
    Add {
        #[arg(index = 1, required = true, num_args = 1..)]
        paths: Vec<String>,
    },
    #[command(
        name = "cat-file",
        about = "Print the content, type or size of an object",
        group(ArgGroup::new("mode").required(true).args(["pretty", "kind", "size"]))
    )]
    CatFile {
        #[arg(short = 'p', help = "Pretty-print the object content")]
        pretty: bool,
        #[arg(short = 't', help = "Print the object type")]
        kind: bool,
        #[arg(short = 's', help = "Print the object size")]
        size: bool,
        #[arg(index = 1, help = "The object id")]
        object: String,
    },
    #[command(name = "ls-tree", about = "List the entries of a tree or commit")]
    LsTree {
        #[arg(long, help = "List only entry names")]
        name_only: bool,
        #[arg(index = 1, help = "The tree or commit id")]
        object: String,
    },
    #[command(
        name = "write-tree",
        about = "Store the working directory and print the root tree id"
    )]
    WriteTree,
    #[command(
        name = "commit-tree",
        about = "Create a commit object for a tree",
        long_about = "This command creates a commit pointing at the given tree and prints its id. \
        No reference is updated."
    )]
    CommitTree {
        #[arg(index = 1, help = "The tree id")]
        tree: String,
        #[arg(short = 'p', long = "parent", help = "A parent commit id")]
        parents: Vec<String>,
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "ls-index", about = "Show the contents of the staging index")]
    LsIndex,
}

fn main() {
    let cli = Cli::parse();
    groot::logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = match (&cli.command, cli.root) {
        (Commands::Init { path: Some(path) }, Some(root)) => root.join(path),
        (Commands::Init { path: Some(path) }, None) => path.clone(),
        (_, Some(root)) => root,
        (_, None) => std::env::current_dir()?,
    };
    if matches!(cli.command, Commands::Init { .. }) {
        std::fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create {}", root.display()))?;
    }
    let entry_order = if cli.sort_entries {
        EntryOrder::Name
    } else {
        EntryOrder::Listing
    };
    let config = RepositoryConfig::new(root)
        .with_store_dir(cli.store_dir)
        .with_entry_order(entry_order);

    let mut repository = Repository::new(config, Box::new(std::io::stdout()))?;

    match &cli.command {
        Commands::Init { .. } => repository.init()?,
        Commands::HashObject { write, path } => repository.hash_object(path, *write)?,
        Commands::Add { paths } => repository.add(paths)?,
        Commands::CatFile {
            pretty,
            kind,
            size: _,
            object,
        } => {
            let mode = if *pretty {
                CatFileMode::Pretty
            } else if *kind {
                CatFileMode::Type
            } else {
                CatFileMode::Size
            };
            repository.cat_file(object, mode)?
        }
        Commands::LsTree { name_only, object } => repository.ls_tree(object, *name_only)?,
        Commands::WriteTree => repository.write_tree()?,
        Commands::CommitTree {
            tree,
            parents,
            message,
        } => repository.commit_tree(tree, parents, message)?,
        Commands::LsIndex => repository.ls_index()?,
    }

    repository.writer().flush()?;

    Ok(())
}
