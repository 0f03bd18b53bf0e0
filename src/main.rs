use std::io::{self, BufRead, Write};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wikiswipe::cli::{Cli, Commands};
use wikiswipe::config::Config;
use wikiswipe::domain::{Article, Direction, LikeOutcome, SourceKind};
use wikiswipe::errors::{SwipeError, SwipeResult};
use wikiswipe::input::{parse_line, EventNormalizer, InputEvent, Intent};
use wikiswipe::services::{
    FeedController, FeedSettings, FeedStatus, FetchCompletion, FetchDispatcher, FetchWorker,
    LikeService,
};
use wikiswipe::sources::{SourceMode, SourceRegistry};
use wikiswipe::storage::{
    DisabledSessionCache, LikeRepository, SessionCache, SqliteLikeRepository,
    SqliteSessionCache, SqliteStorage,
};

/// How long to block on a page before handing control back to the user
const FETCH_WAIT: Duration = Duration::from_secs(20);
const EXTRACT_PREVIEW_CHARS: usize = 600;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> SwipeResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize storage
    let storage = SqliteStorage::new(&config.db_path)?;

    match cli.command {
        Commands::Browse { source, fresh } => cmd_browse(&config, storage, source.into(), fresh),
        Commands::Liked => cmd_liked(SqliteLikeRepository::new(storage)),
        Commands::ClearCache => cmd_clear_cache(SqliteSessionCache::new(storage)),
    }
}

fn cmd_browse(config: &Config, storage: SqliteStorage, mode: SourceMode, fresh: bool) -> SwipeResult<()> {
    let likes = LikeService::new(SqliteLikeRepository::new(storage.clone()));

    if !config.cache_enabled {
        return browse(config, DisabledSessionCache, likes, mode);
    }

    let cache = SqliteSessionCache::new(storage);
    if fresh {
        if let Err(e) = cache.clear() {
            tracing::warn!(error = %e, "could not clear cached feed");
        }
    }
    browse(config, cache, likes, mode)
}

fn browse<C: SessionCache, L: LikeRepository>(
    config: &Config,
    cache: C,
    likes: LikeService<L>,
    mode: SourceMode,
) -> SwipeResult<()> {
    let source = SourceRegistry::build(config, mode)?;
    let (worker, completions) = FetchWorker::spawn(source)?;
    let mut controller = FeedController::new(cache, worker, FeedSettings::from(config));
    let mut input = EventNormalizer::new(config.wheel_quiet);

    println!(
        "Loading {} articles, {} at a time...",
        mode,
        controller.settings().page_size
    );
    controller.initialize();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        controller.drain_completions(&completions);
        if controller.status() == FeedStatus::InitialLoading {
            wait_for_page(&mut controller, &completions)?;
        }

        if let Some(id) = controller.current().map(|a| a.id) {
            if let Some(article) = controller.article_mut(id) {
                likes.annotate(std::slice::from_mut(article));
            }
        }
        render(&controller);

        print!("[j] next  [k] previous  [l] like  [r] retry  [q] quit > ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;

        let Some(key) = parse_line(&line) else {
            println!("Unknown command: {}", line.trim());
            continue;
        };

        match input.normalize(InputEvent::Key(key)) {
            Some(Intent::Navigate(direction)) => {
                if !controller.advance(direction)
                    && direction == Direction::Next
                    && controller.is_fetch_in_flight()
                {
                    println!("Loading more...");
                    if wait_for_page(&mut controller, &completions)? {
                        controller.advance(Direction::Next);
                    }
                }
            }
            Some(Intent::ToggleLike) => {
                let Some(id) = controller.current().map(|a| a.id) else {
                    continue;
                };
                if let Some(article) = controller.article_mut(id) {
                    match likes.toggle(article) {
                        LikeOutcome::Confirmed(true) => println!("Liked."),
                        LikeOutcome::Confirmed(false) => println!("Unliked."),
                        LikeOutcome::RolledBack(_) => println!("Could not save your like."),
                    }
                }
            }
            Some(Intent::Retry) => {
                controller.retry();
            }
            Some(Intent::Quit) => break,
            None => println!("Unknown command: {}", line.trim()),
        }
    }

    Ok(())
}

/// Block until the outstanding fetch completes. Returns false on timeout.
fn wait_for_page<C: SessionCache, D: FetchDispatcher>(
    controller: &mut FeedController<C, D>,
    completions: &Receiver<FetchCompletion>,
) -> SwipeResult<bool> {
    if !controller.is_fetch_in_flight() {
        return Ok(false);
    }

    match completions.recv_timeout(FETCH_WAIT) {
        Ok(completion) => {
            controller.complete(completion);
            Ok(true)
        }
        Err(RecvTimeoutError::Timeout) => {
            println!("Still loading, press enter to check again.");
            Ok(false)
        }
        Err(RecvTimeoutError::Disconnected) => Err(SwipeError::WorkerUnavailable),
    }
}

fn render<C: SessionCache, D: FetchDispatcher>(controller: &FeedController<C, D>) {
    println!();
    match controller.status() {
        FeedStatus::InitialLoading => println!("Loading articles..."),
        FeedStatus::InitialError(error) => {
            println!("Could not load articles: {}", error);
            println!("Press r to retry.");
        }
        FeedStatus::Empty => println!("No articles matched. Press r to try again."),
        FeedStatus::Browsing {
            loading_more,
            load_more_error,
        } => {
            let window = controller.render_window();
            let cursor = controller.cursor();
            let items = controller.items();

            if cursor > window.start {
                println!("  ^ {}", items[cursor - 1].title);
            }
            if let Some(article) = controller.current() {
                print_card(article, cursor, items.len());
            }
            if cursor + 1 < window.end {
                println!("  v {}", items[cursor + 1].title);
            }

            if loading_more {
                println!("  (loading more...)");
            }
            if let Some(error) = load_more_error {
                println!("  Could not load more: {} (r to retry)", error);
            }
        }
    }
}

fn print_card(article: &Article, cursor: usize, total: usize) {
    let mut header = format!("[{}/{}] {}", cursor + 1, total, article.title);
    if article.liked() {
        header.push_str("  <3");
    }
    if article.source == SourceKind::Trending {
        if let (Some(rank), Some(views)) = (article.rank, article.views) {
            header.push_str(&format!("  #{} trending, {} views", rank, views));
        }
    }

    println!("{}", header);
    println!("{}", "-".repeat(header.chars().count().min(72)));
    println!("{}", preview(&article.extract, EXTRACT_PREVIEW_CHARS));
    if let Some(thumbnail) = &article.thumbnail {
        println!("Image: {}", thumbnail.source);
    }
    println!("{}", article.url);
}

/// Truncate to at most `max_chars` characters, respecting char boundaries
fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}...", truncated.trim_end())
}

fn cmd_liked(repository: SqliteLikeRepository) -> SwipeResult<()> {
    let service = LikeService::new(repository);
    let liked = service.list()?;

    if liked.is_empty() {
        println!("No liked articles yet.");
        return Ok(());
    }

    println!("Liked articles:\n");
    for article in liked {
        println!("  {}", article.title);
        println!("    {}", article.url);
    }

    Ok(())
}

fn cmd_clear_cache(cache: SqliteSessionCache) -> SwipeResult<()> {
    cache.clear()?;
    println!("Cached feed cleared.");
    Ok(())
}
