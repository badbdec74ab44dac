use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, channel};

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use violet_world::WorldGenConfig;
use violet_world::worldgen::load_config_from_path;

/// Watches one worldgen config file and hands back a freshly parsed config
/// after every change.
pub struct ConfigWatcher {
    path: PathBuf,
    rx: Receiver<()>,
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref().to_path_buf();
        let (tx, rx) = channel::<()>();
        let mut watcher =
            notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
                if let Ok(event) = res {
                    match event.kind {
                        EventKind::Modify(_)
                        | EventKind::Create(_)
                        | EventKind::Remove(_)
                        | EventKind::Any => {
                            let _ = tx.send(());
                        }
                        _ => {}
                    }
                }
            })?;
        watcher.watch(&path, RecursiveMode::NonRecursive)?;
        log::info!("watching {}", path.display());
        Ok(Self {
            path,
            rx,
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Blocks until the file changes, then reloads it. `None` once the
    /// watcher has shut down.
    pub fn next_config(&self) -> Option<Result<WorldGenConfig, Box<dyn Error>>> {
        self.rx.recv().ok()?;
        Some(self.reload())
    }

    fn reload(&self) -> Result<WorldGenConfig, Box<dyn Error>> {
        // One save usually fires several events.
        while self.rx.try_recv().is_ok() {}
        load_config_from_path(&self.path)
    }
}
