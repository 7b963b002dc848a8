//! Saving and restoring games.
//!
//! ## Layers
//!
//! - [`Storage`]: opaque key/value text storage supplied by the host
//!   ([`MemoryStore`] and [`FileStore`] ship with the crate)
//! - [`Snapshot`]: the flat JSON document a game is saved as
//! - [`SnapshotStore`]: saves the game and its dice stream under
//!   namespaced keys and restores them together
//!
//! ## Example
//!
//! ```
//! use ludo_engine::core::{GameRng, GameState, StorageConfig};
//! use ludo_engine::persistence::{MemoryStore, SnapshotStore};
//!
//! let mut saves = SnapshotStore::new(MemoryStore::new(), StorageConfig::default());
//! saves.save(&GameState::new(), &GameRng::new(1)).unwrap();
//!
//! let (restored, rng) = saves.load().unwrap().unwrap();
//! assert_eq!(restored.state, GameState::new());
//! assert_eq!(rng.unwrap().seed(), 1);
//! ```

mod snapshot;
mod storage;

pub use snapshot::{Repair, Restored, Snapshot};
pub use storage::{FileStore, MemoryStore, Storage};

use tracing::{info, instrument, warn};

use crate::core::{GameRng, GameRngState, GameState, StorageConfig, StoreError};

const GAME_ENTRY: &str = "game";
const RNG_ENTRY: &str = "rng";

/// A game plus its dice stream, saved under one namespace.
#[derive(Debug)]
pub struct SnapshotStore<S: Storage> {
    storage: S,
    config: StorageConfig,
}

impl<S: Storage> SnapshotStore<S> {
    pub fn new(storage: S, config: StorageConfig) -> Self {
        Self { storage, config }
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Key of the game document.
    #[must_use]
    pub fn game_key(&self) -> String {
        self.config.key(GAME_ENTRY)
    }

    /// Key of the saved RNG state.
    #[must_use]
    pub fn rng_key(&self) -> String {
        self.config.key(RNG_ENTRY)
    }

    /// Save `state` and the position of `rng`.
    #[instrument(level = "debug", skip_all)]
    pub fn save(&mut self, state: &GameState, rng: &GameRng) -> Result<(), StoreError> {
        let game = Snapshot::from(state).to_json()?;
        let dice = serde_json::to_string(&rng.state())?;
        self.storage.save(&self.config.key(GAME_ENTRY), &game)?;
        self.storage.save(&self.config.key(RNG_ENTRY), &dice)?;
        Ok(())
    }

    /// Load the saved game, if any.
    ///
    /// The RNG half is optional: a game saved without one (or with an
    /// unreadable one) still restores, and the caller seeds a fresh RNG.
    #[instrument(level = "debug", skip_all)]
    pub fn load(&self) -> Result<Option<(Restored, Option<GameRng>)>, StoreError> {
        let Some(game) = self.storage.load(&self.config.key(GAME_ENTRY))? else {
            return Ok(None);
        };
        let restored = Snapshot::from_json(&game)?.restore()?;

        let rng = match self.storage.load(&self.config.key(RNG_ENTRY))? {
            Some(json) => match serde_json::from_str::<GameRngState>(&json) {
                Ok(state) => Some(GameRng::from_state(&state)),
                Err(err) => {
                    warn!(%err, "ignoring unreadable rng state");
                    None
                }
            },
            None => None,
        };

        info!(
            repairs = restored.repairs.len(),
            chance_player = %restored.state.chance_player(),
            "game restored"
        );
        Ok(Some((restored, rng)))
    }

    /// Remove every saved entry.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.storage.clear(&self.config.key(GAME_ENTRY))?;
        self.storage.clear(&self.config.key(RNG_ENTRY))?;
        Ok(())
    }
}
