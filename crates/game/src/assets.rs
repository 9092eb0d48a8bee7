//! Model bundles for the third-person variant. Contents are opaque to gameplay.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::error::AssetError;

/// A model file read into memory.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Read every bundle, stopping at the first failure.
pub fn load_bundles(paths: &[PathBuf]) -> Result<Vec<ModelBundle>, AssetError> {
    paths.iter().map(|p| load_bundle(p)).collect()
}

/// Reads bundles on a worker thread; the frame loop polls it.
pub struct AssetLoader {
    receiver: Receiver<Result<Vec<ModelBundle>, AssetError>>,
}

impl AssetLoader {
    pub fn spawn(paths: Vec<PathBuf>) -> Result<Self, AssetError> {
        let (sender, receiver) = mpsc::channel();
        thread::Builder::new()
            .name("asset-loader".into())
            .spawn(move || {
                // The receiver is gone if the app already quit.
                let _ = sender.send(load_bundles(&paths));
            })
            .map_err(AssetError::Spawn)?;
        Ok(Self { receiver })
    }

    /// The load result once the worker is done, `None` while it is still reading.
    pub fn poll(&self) -> Option<Result<Vec<ModelBundle>, AssetError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(AssetError::LoaderStopped)),
        }
    }
}

fn load_bundle(path: &Path) -> Result<ModelBundle, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(AssetError::Empty(path.to_path_buf()));
    }
    log::info!("Loaded model bundle {:?} ({} bytes)", path, bytes.len());
    Ok(ModelBundle {
        path: path.to_path_buf(),
        bytes,
    })
}
