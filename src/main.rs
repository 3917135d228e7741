mod app;
mod infra;
mod llms;
mod modules;
mod state;
mod ui;

use std::io;
use std::process;
use std::sync::Arc;

use crossterm::{
    ExecutableCommand,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use l2_base::config::PROMPTS;
use l2_base::storage::Store;

use app::App;
use infra::config::{Config, Provider};
use llms::Backend;
use llms::mock::MockBackend;
use llms::openrouter::OpenRouterClient;
use modules::ToolRegistry;

fn fatal(message: impl std::fmt::Display) -> ! {
    eprintln!("l2: {}", message);
    process::exit(1);
}

fn build_backend(config: &mut Config, store: &Store) -> Arc<dyn Backend> {
    match config.provider {
        Provider::Mock => Arc::new(MockBackend::echo()),
        Provider::OpenRouter => {
            let Some(key) = config.api_key.take() else {
                fatal("OpenRouter selected without an API key");
            };
            let tools = Arc::new(ToolRegistry::new(store.clone()));
            match OpenRouterClient::new(key, config.model.clone(), &config.base_url, tools) {
                Ok(client) => Arc::new(client),
                Err(e) => fatal(format!("cannot build HTTP client: {}", e)),
            }
        }
    }
}

fn main() -> io::Result<()> {
    let mut config = Config::from_env().unwrap_or_else(|e| fatal(e));
    let store = Store::open(config.home.clone()).unwrap_or_else(|e| fatal(e));

    let _log_guard = match infra::logging::init(&config.logs_dir(), &config.log_filter) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("l2: logging disabled: {}", e);
            None
        }
    };
    tracing::info!(home = %config.home.display(), model = %config.model, "starting");

    let system_prompt = store.read_system_prompt().unwrap_or_else(|e| fatal(e));
    let system_prompt = if system_prompt.trim().is_empty() {
        tracing::warn!("system prompt is blank; using the built-in fallback");
        PROMPTS.fallback_system.trim().to_string()
    } else {
        system_prompt.trim().to_string()
    };

    let backend = build_backend(&mut config, &store);
    let mut state = state::load_state(&store, backend.model());
    if state.ensure_system_prompt(&system_prompt) {
        tracing::info!("system prompt added to history");
    }

    // Restore the terminal before the default hook prints the panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(DisableBracketedPaste);
        let _ = io::stdout().execute(LeaveAlternateScreen);
        tracing::error!(%info, "panic");
        default_hook(info);
    }));

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(state, backend, store);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    io::stdout().execute(DisableBracketedPaste)?;
    io::stdout().execute(LeaveAlternateScreen)?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "terminal loop failed");
        // Still persist what we have
        app.quit();
    }

    let total = app.state.stats.get();
    tracing::info!(total_tokens = total, "exiting");
    println!("Session stats: Total tokens used: {}", total);
    result
}
