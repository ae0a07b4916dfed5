use anyhow::{Context, Result};
use clap::Parser;
use headlines_core::{Article, Category, FetchRequest, NewsConfig, NewsFetcher};

#[derive(Parser)]
#[command(name = "headlines")]
#[command(about = "Fetch and clean US top headlines from NewsAPI")]
struct Args {
    /// Topic category (business, entertainment, general, health, science, sports, technology)
    #[arg(short, long, default_value = "technology")]
    category: Category,

    /// Number of articles to request
    #[arg(short = 'n', long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
    page_size: u32,

    /// How many cleaned articles to print
    #[arg(short, long, default_value_t = 2)]
    show: usize,

    /// Print the cleaned articles as JSON
    #[arg(long)]
    json: bool,

    /// Exit with an error when the fetch fails instead of printing nothing
    #[arg(long)]
    strict: bool,
}

/// Logs go to stderr. `RUST_LOG` sets the filter (default `info`) and
/// `HEADLINES_LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let builder = tracing_subscriber::registry().with(filter);

    match std::env::var("HEADLINES_LOG_FORMAT").as_deref() {
        Ok("json") => {
            let _ = builder.with(fmt_layer.json().flatten_event(true)).try_init();
        }
        _ => {
            let _ = builder.with(fmt_layer.compact()).try_init();
        }
    }
}

fn print_text(category: Category, total: usize, shown: &[Article]) {
    println!("Fetched {total} {category} headlines:");
    for (idx, article) in shown.iter().enumerate() {
        println!("\n{}. {}", idx + 1, article.title);
        println!("   Source: {}", article.source);
        println!("   Estimated read time: {} min", article.estimated_read_time);
        println!("   Link: {}", article.url);
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = NewsConfig::from_env()
        .context("NEWS_API_KEY must be exported or set in a .env file")?;
    tracing::debug!(?config, "loaded configuration");

    let fetcher = NewsFetcher::from_config(&config);
    let request = FetchRequest::new(args.category.as_str(), args.page_size);
    let articles = if args.strict {
        fetcher
            .try_fetch(&request)
            .with_context(|| format!("Failed to fetch {} headlines", args.category))?
    } else {
        fetcher.fetch(&request)
    };

    let shown = &articles[..args.show.min(articles.len())];
    if args.json {
        let json = serde_json::to_string_pretty(shown).context("Failed to serialize articles")?;
        println!("{json}");
    } else {
        print_text(args.category, articles.len(), shown);
    }

    Ok(())
}
