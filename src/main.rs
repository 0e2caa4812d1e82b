//! Wildsow Client Demo
//!
//! Runs a full lobby flow against the in-process loopback backend:
//! restore or create a session identity, add two bots, start the game,
//! and apply the resulting inbound events.

use std::rc::Rc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use wildsow::{
    CacheAdapter, GamePhase, LoopbackChannel, MemoryCache, SessionEngine, SessionHandle, VERSION,
};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Wildsow Client v{}", VERSION);

    demo_lobby()
}

/// Demo function to exercise the lobby flow end to end.
fn demo_lobby() -> anyhow::Result<()> {
    info!("=== Starting Demo Lobby ===");

    let cache: Rc<dyn CacheAdapter> = Rc::new(MemoryCache::new());
    let channel = Rc::new(LoopbackChannel::new());

    // A real client restores this from the cache after login; the demo
    // starts fresh.
    let handle = SessionHandle::restore(cache.as_ref()).unwrap_or_else(|| {
        SessionHandle::new(&uuid::Uuid::new_v4().to_string(), "Antje")
    });
    handle.persist(cache.as_ref())?;
    info!(session_id = %handle.session_id, username = %handle.username, "entering session");

    let mut engine = SessionEngine::new(handle, cache, channel.clone());
    engine.subscribe_state(|s| {
        let names: Vec<&str> = s.players.iter().map(|p| p.display_name.as_str()).collect();
        info!(?names, "lobby roster updated");
    });
    engine.on_phase_changed(|p| info!(phase = ?p, "phase changed"));

    // Fill the lobby with two bots of different personas.
    for descriptor in [
        "Überraschungs Bot - Man weiß es nie!",
        "Statistiker - I love Bayes",
    ] {
        let name = engine.add_bot(descriptor)?;
        info!(bot = %name, descriptor, "bot requested");
    }
    for event in channel.drain_events() {
        engine.handle_event(event)?;
    }

    // Kick off the game and apply the backend's answer.
    engine.start_game()?;
    for event in channel.drain_events() {
        engine.handle_event(event)?;
    }

    info!("=== Demo Results ===");
    let state = engine
        .current_state()
        .ok_or_else(|| anyhow::anyhow!("no session state after start"))?;
    info!(phase = ?engine.phase(), players = state.players.len(), "lobby flow finished");
    anyhow::ensure!(engine.phase() == GamePhase::Active, "game did not start");

    Ok(())
}
