use clap::{builder::ArgAction, Parser, Subcommand};
use console::{style, Emoji};
use errors::RflowErrors;
use researchflow::{
  clients::ArxivClient,
  config::{ClientConfig, ARXIV_API_URL},
  layout::Layout,
  Effect, FeedController, FeedStatus,
};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod browse;
pub mod errors;
pub mod view;

static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "");

#[derive(Parser)]
#[command(author, version, about = "Swipe through recent research papers from arXiv")]
struct Cli {
  /// Verbose mode (-v, -vv, -vvv)
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Search API endpoint
  #[arg(long, global = true, default_value = ARXIV_API_URL)]
  base_url: String,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Browse the feed one card at a time
  Browse,
  /// Print the feed without interaction
  List {
    /// Maximum number of pages to fetch
    #[arg(long, short, default_value_t = 1)]
    pages: usize,
    /// Print one JSON object per paper instead of cards
    #[arg(long)]
    json:  bool,
  },
}

/// Setup logging with the specified verbosity level
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true)
    .init();
}

#[tokio::main]
async fn main() -> Result<(), RflowErrors> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let client = ArxivClient::try_with_config(ClientConfig::with_base_url(cli.base_url))?;
  debug!("Using endpoint: {}", client.config().base_url);

  match cli.command {
    Commands::Browse => browse::run(client).await,
    Commands::List { pages, json } => list(client, pages, json).await,
  }
}

/// Loads up to `pages` pages through the feed controller and prints every paper.
///
/// Each page after the first is requested the way the viewer does it: by reporting the sentinel
/// as visible once the previous page is laid out. A failed page is logged and counts towards
/// `pages`, so a dead endpoint cannot keep the command running.
async fn list(client: ArxivClient, pages: usize, json: bool) -> Result<(), RflowErrors> {
  let mut feed = FeedController::new();
  let mut printed = 0;
  let mut attempts = 0;

  if !json {
    println!("{} Fetching recent papers...", style(LOOKING_GLASS).cyan());
  }

  let mut next = feed.mount();
  while let Some(request) = next.take() {
    if attempts >= pages {
      break;
    }
    attempts += 1;
    feed.fulfil(&client, request).await;

    let total = feed.papers().len();
    for (index, paper) in feed.papers().iter().enumerate().skip(printed) {
      if json {
        println!("{}", serde_json::to_string(paper)?);
      } else {
        println!();
        for line in view::card(paper, index, total, 100) {
          println!("{line}");
        }
      }
    }
    printed = total;

    feed.on_layout(Layout::uniform(total, 1.0, 1.0));
    feed.on_scroll(total.saturating_sub(1) as f64);
    next = feed.on_sentinel(true).into_iter().find_map(|effect| match effect {
      Effect::Fetch(request) => Some(request),
      Effect::Scroll(_) => None,
    });
    trace!("Next request after {attempts} attempt(s): {next:?}");
  }

  if json {
    return Ok(());
  }

  println!();
  if feed.papers().is_empty() {
    println!("{} No papers loaded", style(WARNING).yellow());
  } else if feed.status() == FeedStatus::Exhausted {
    println!("{}", view::status_line(feed.status()));
  } else {
    println!(
      "{} Loaded {} papers on {}",
      style("ℹ").blue(),
      style(feed.papers().len()).yellow(),
      style(feed.cursor().topic.as_deref().unwrap_or("no topic")).cyan()
    );
  }
  Ok(())
}
