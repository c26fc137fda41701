use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use inkwell::session::SearchSession;
use inkwell::site::Site;
use inkwell::{ArticleStore, BlogConfig, SearchResults, SiteContext};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "inkwell", version, about = "Build and search a personal blog")]
struct Cli {
    /// Config file (default: ./inkwell.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging unless RUST_LOG is set
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every page of the blog into DEST
    Build {
        /// Directory of markdown articles
        src: PathBuf,
        /// Output directory
        dest: PathBuf,
    },
    /// Search articles by title, content, excerpt, tag or author
    Search(SearchArgs),
    /// List tags in first-seen order
    Tags {
        /// Directory of markdown articles (bundled articles if omitted)
        #[arg(long)]
        content: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[arg(value_name = "QUERY", required_unless_present = "interactive")]
    query: Option<String>,

    /// Directory of markdown articles (bundled articles if omitted)
    #[arg(long)]
    content: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Read queries line by line from stdin, debounced
    #[arg(long, short = 'i', conflicts_with = "query")]
    interactive: bool,
}

fn init_tracing(debug: bool) -> Result<()> {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn open_store(content: Option<&Path>) -> Result<ArticleStore> {
    match content {
        Some(dir) => ArticleStore::load_or_fallback(dir)
            .with_context(|| format!("loading articles from {}", dir.display())),
        None => ArticleStore::bundled().context("loading bundled articles"),
    }
}

fn print_results(query: &str, results: &SearchResults, limit: usize) {
    println!("{}", results.summary(query));
    for result in results.preview(limit) {
        println!("  {:<40} {} ({})", result.id, result.title, result.category);
    }
    if results.has_more(limit) {
        println!("  ... and {} more", results.len() - limit);
    }
    let tags = results.related_tags(limit);
    if !tags.is_empty() {
        let tags: Vec<String> = tags.iter().map(|tag| format!("#{}", tag)).collect();
        println!("  tags: {}", tags.join(" "));
    }
}

async fn interactive(ctx: &SiteContext) -> Result<()> {
    let limit = ctx.config().search.preview_limit;
    let mut session = SearchSession::new(ctx.store_handle(), ctx.config().debounce_delay());
    let mut updates = session.subscribe();

    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            if !state.is_loading && !state.query.trim().is_empty() {
                print_results(state.query.trim(), &state.results, limit);
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading query")? {
        session.set_query(line);
    }

    session.settle().await;
    drop(session);
    printer.await.context("result printer")?;
    Ok(())
}

fn run_search(ctx: &SiteContext, args: &SearchArgs) -> Result<()> {
    if args.interactive {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .context("starting runtime")?;
        return runtime.block_on(interactive(ctx));
    }

    let query = args.query.as_deref().unwrap_or_default();
    let results = ctx.store().search(query);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(query.trim(), &results, ctx.config().search.preview_limit);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug).context("installing tracing subscriber")?;

    let config = BlogConfig::load(cli.config.as_deref()).context("loading config")?;

    match cli.command {
        Command::Build { src, dest } => {
            let store = ArticleStore::load(&src)
                .with_context(|| format!("loading articles from {}", src.display()))?;
            let ctx = SiteContext::new(config, store);
            let written = Site::new(&ctx, &dest).build().context("building site")?;
            info!("Wrote {} files to {}", written.len(), dest.display());
        }
        Command::Search(args) => {
            let ctx = SiteContext::new(config, open_store(args.content.as_deref())?);
            run_search(&ctx, &args)?;
        }
        Command::Tags { content } => {
            let store = open_store(content.as_deref())?;
            for term in store.tag_index().terms() {
                println!("{} ({})", term.name, term.articles.len());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_tracing_install_is_reported() {
        let _ = init_tracing(false);
        assert!(init_tracing(true).is_err());
    }

    #[test]
    fn search_requires_a_query_unless_interactive() {
        assert!(Cli::try_parse_from(["inkwell", "search"]).is_err());
        assert!(Cli::try_parse_from(["inkwell", "search", "-i"]).is_ok());
    }
}
