//! Bloglist - blog records over HTTP
//!
//! Main entry point for the bloglist CLI.

use anyhow::Context;
use bloglist::aggregator::summarize;
use bloglist::blog::{BlogRecord, NewBlog};
use bloglist::config::AppConfig;
use bloglist::server::BlogServer;
use bloglist::storage::BlogStore;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;

/// Bloglist - store blogs and summarize them
#[derive(Parser, Debug)]
#[command(name = "bloglist")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.config/bloglist/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the blog database (overrides config and BLOGLIST_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Run the HTTP API
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind (overrides config and BLOGLIST_HOST)
        #[arg(long)]
        host: Option<String>,
    },

    /// List stored blogs
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add a blog
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        url: String,

        #[arg(short, long)]
        author: Option<String>,

        #[arg(short, long)]
        likes: Option<i64>,
    },

    /// Show statistics over stored blogs
    Stats {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    if let Err(e) = bloglist::logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        config,
        db,
        command,
    } = cli;

    match command {
        Commands::Init { force } => handle_init(config, force),
        Commands::Serve { port, host } => {
            handle_serve(load_config(config.as_deref(), db)?, port, host)
        }
        Commands::List { json } => handle_list(&load_config(config.as_deref(), db)?, json),
        Commands::Add {
            title,
            url,
            author,
            likes,
        } => {
            let new_blog = NewBlog {
                title: Some(title),
                author,
                url: Some(url),
                likes,
            };
            handle_add(&load_config(config.as_deref(), db)?, new_blog)
        }
        Commands::Stats { json } => handle_stats(&load_config(config.as_deref(), db)?, json),
    }
}

/// Config file, then environment, then `--db`
fn load_config(path: Option<&Path>, db: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load_or_default(path)?;
    config.apply_env()?;
    if let Some(db) = db {
        config.storage.path = db;
    }
    Ok(config)
}

fn handle_serve(
    mut config: AppConfig,
    port: Option<u16>,
    host: Option<String>,
) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(host) = host {
        config.server.host = host;
    }
    config.validate()?;
    serve(&config)
}

fn handle_list(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let blogs = open_store(config)?.list()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&blogs)?);
    } else {
        println!("Found {} blogs:", blogs.len());
        for blog in &blogs {
            print_blog(blog);
        }
    }
    Ok(())
}

fn handle_add(config: &AppConfig, new_blog: NewBlog) -> anyhow::Result<()> {
    let blog = new_blog.validate()?;
    let record = open_store(config)?.insert(&blog)?;
    println!("Created blog {}", record.id);
    Ok(())
}

fn handle_stats(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let blogs = open_store(config)?.list()?;
    let summary = summarize(&blogs);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Blogs:        {}", summary.count);
    println!("Total likes:  {}", summary.total_likes);
    match &summary.favorite {
        Some(blog) => println!("Favorite:     {} ({} likes)", blog.title, blog.likes),
        None => println!("Favorite:     -"),
    }
    println!(
        "Most blogs:   {} ({})",
        summary.most_blogs.author.as_deref().unwrap_or("-"),
        summary.most_blogs.blogs
    );
    println!(
        "Most likes:   {} ({})",
        summary.most_likes.author.as_deref().unwrap_or("-"),
        summary.most_likes.likes
    );
    Ok(())
}

fn handle_init(path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(AppConfig::default_path);
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    AppConfig::new().save(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

fn open_store(config: &AppConfig) -> anyhow::Result<BlogStore> {
    BlogStore::new(config.store_config()).with_context(|| {
        format!(
            "Failed to open blog database at {}",
            config.storage.path.display()
        )
    })
}

fn serve(config: &AppConfig) -> anyhow::Result<()> {
    let server = BlogServer::from_config(config).with_context(|| {
        format!(
            "Failed to open blog database at {}",
            config.storage.path.display()
        )
    })?;
    let addr = config.server.bind_addr();

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime
        .block_on(server.run(&addr))
        .with_context(|| format!("Server on {} failed", addr))
}

fn print_blog(blog: &BlogRecord) {
    println!(
        "  {}  {} by {} ({} likes)\n      {}",
        blog.id,
        blog.title,
        blog.author.as_deref().unwrap_or("unknown"),
        blog.likes,
        blog.url
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bloglist").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_init_dispatch_writes_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.yaml");
        let path_arg = path.to_str().unwrap();

        run(parse(&["--config", path_arg, "init"])).unwrap();
        assert!(AppConfig::load(&path).is_ok());

        assert!(run(parse(&["--config", path_arg, "init"])).is_err());
        run(parse(&["--config", path_arg, "init", "--force"])).unwrap();
    }

    #[test]
    fn test_db_flag_overrides_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        AppConfig::new().save(&config_path).unwrap();

        let db = temp_dir.path().join("cli.db");
        let config = load_config(Some(config_path.as_path()), Some(db.clone())).unwrap();
        assert_eq!(config.storage.path, db);
    }

    #[test]
    fn test_add_then_stats_dispatch() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        AppConfig::new().save(&config_path).unwrap();
        let config_arg = config_path.to_str().unwrap();
        let db = temp_dir.path().join("blogs.db");
        let db_arg = db.to_str().unwrap();

        let add = ["--config", config_arg, "--db", db_arg, "add", "-t", "Type wars", "-u", "http://x"];
        run(parse(&add)).unwrap();
        run(parse(&["--config", config_arg, "--db", db_arg, "stats", "--json"])).unwrap();

        let store = BlogStore::new(bloglist::storage::StoreConfig {
            path: db,
            wal_mode: true,
        })
        .unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }
}
