//! Starfield Breakout entry point
//!
//! Native builds run a headless autopilot session on the Rapier2D host.
//! The web build is driven from JavaScript through `platform::web`.

#[cfg(all(not(target_arch = "wasm32"), feature = "physics"))]
fn run_demo(settings: starfield_breakout::Settings) {
    use starfield_breakout::host::Session;

    let frames = settings.demo_frames;
    let mut session = Session::new(settings).with_autopilot();
    session.run(frames);

    let stats = session.stats();
    log::info!(
        "Demo finished after {:.1}s: {} rounds ({} won, {} lost)",
        session.host().elapsed(),
        stats.rounds_played,
        stats.wins,
        stats.losses
    );
    match serde_json::to_string_pretty(stats) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Cannot encode session stats: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Starfield Breakout (native) starting...");

    let settings = starfield_breakout::Settings::load();

    #[cfg(feature = "physics")]
    run_demo(settings);

    #[cfg(not(feature = "physics"))]
    {
        let _ = settings;
        log::warn!("Built without the `physics` feature; no host to drive the game");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry points live in platform::web
}
