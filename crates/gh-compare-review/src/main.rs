//! gh-compare-review: review the changes between two revisions of a
//! GitHub-hosted repository without fetching a working tree.
//!
//! The reference argument names a pull request (`owner/repo#123`), a
//! commit (`owner/repo@sha`), a commit within a pull request
//! (`owner/repo#123@sha`), or the equivalent github.com URLs.

use anyhow::Result;
use clap::Parser;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

mod app;
mod config;
mod engine;
mod history;
mod navigator;
mod refspec;
mod session;
mod ui;
mod viewer;

use app::App;
use config::AppConfig;
use engine::Engine;
use gh_compare_client::RemoteClient;
use gh_content_cache::ContentCache;

#[derive(Debug, Parser)]
#[command(name = "gh-compare-review", version, about)]
struct Args {
    /// Pull request, commit, or URL reference to review
    reference: String,

    /// API credential (overrides GITHUB_TOKEN / GH_TOKEN / gh CLI)
    #[arg(long)]
    token: Option<String>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let config = AppConfig::load();
    let token = args.token.or_else(config::resolve_token);
    if token.is_none() {
        log::info!("no credential configured; requests go out unauthenticated");
    }

    // reject malformed references before any network call
    let target = refspec::parse_reference(&args.reference)?;

    let client = RemoteClient::with_bases(token, &config.api_base, &config.raw_base)?;
    let cache = Arc::new(ContentCache::new());
    let engine = Engine::new(client, cache);
    let runtime = Runtime::new()?;

    // open the root session before touching the terminal, so a failed
    // fetch reports its status and URL on plain stderr
    let session = runtime.block_on(engine.open_target(&target))?;
    let mut app = App::new(engine, runtime, session);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if !app.is_running() {
            return Ok(());
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
    }
}
