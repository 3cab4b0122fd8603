use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Builder;

/// Runs the config watcher on its own single-threaded runtime.
pub fn start_background_services(tx: Sender<AppEvent>) {
    let spawned = thread::Builder::new()
        .name("chordwheel-watch".into())
        .spawn(move || {
            let rt = match Builder::new_current_thread().enable_all().build() {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create Tokio runtime: {}", e);
                    return;
                }
            };
            rt.block_on(crate::config::run_async_watcher(tx));
        });

    if let Err(e) = spawned {
        log::error!("Failed to start background services: {}", e);
    }
}
