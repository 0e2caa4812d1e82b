//! Bot Roster
//!
//! Pool of unused bot display names and the descriptor → archetype table.
//! The pool is seeded with a fixed default set on first use and persisted
//! through the local cache, so the same client keeps handing out the
//! remaining names across reloads.

use std::rc::Rc;

use tracing::{debug, warn};

use crate::cache::{keys, CacheAdapter};
use crate::session::state::BotArchetype;

/// Default bot name pool, in seed order. Names are claimed from the end.
pub const DEFAULT_BOT_NAMES: [&str; 6] = [
    "Thomas Müller",
    "Prizessin Leia",
    "Luke Skywalker",
    "Robben",
    "CR7",
    "DT",
];

/// Fixed mapping from selectable bot persona to archetype.
pub const BOT_DESCRIPTORS: [(&str, BotArchetype); 3] = [
    ("Überraschungs Bot - Man weiß es nie!", BotArchetype::Random),
    ("Statistiker - I love Bayes", BotArchetype::Statistical),
    ("Reinforcement - Learning is Living", BotArchetype::None),
];

/// Archetype for a persona descriptor.
///
/// Exact-match lookup; anything outside the table resolves to
/// [`BotArchetype::None`]. The UI only offers the known descriptors, so an
/// unmatched string is a safe default, not an error.
pub fn archetype_for(descriptor: &str) -> BotArchetype {
    BOT_DESCRIPTORS
        .iter()
        .find(|(known, _)| *known == descriptor)
        .map(|(_, archetype)| *archetype)
        .unwrap_or(BotArchetype::None)
}

/// Pool of available bot identities.
pub struct BotRoster {
    cache: Rc<dyn CacheAdapter>,
    names: Vec<String>,
}

impl BotRoster {
    /// Load the pool from the cache, falling back to the default seed when
    /// nothing has been persisted yet.
    ///
    /// An empty persisted pool stays empty; only an absent (or unreadable)
    /// one re-seeds the defaults.
    pub fn new(cache: Rc<dyn CacheAdapter>) -> Self {
        let names = match cache.get(keys::BOT_NAMES) {
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(names) => names,
                Err(err) => {
                    warn!(error = %err, "ignoring malformed persisted bot pool");
                    Self::default_pool()
                }
            },
            None => Self::default_pool(),
        };
        Self { cache, names }
    }

    fn default_pool() -> Vec<String> {
        DEFAULT_BOT_NAMES.iter().map(|n| n.to_string()).collect()
    }

    /// Unused bot names, in pool order.
    pub fn available_names(&self) -> &[String] {
        &self.names
    }

    /// Remove and return the next name (last-in-first-out), persisting the
    /// reduced pool.
    ///
    /// LIFO matches the seed order, so a fresh pool hands out `"DT"`,
    /// `"CR7"`, `"Robben"`, ... deterministically.
    pub fn claim_name(&mut self) -> Result<String, RosterError> {
        let name = self.names.pop().ok_or(RosterError::Exhausted)?;
        debug!(name = %name, remaining = self.names.len(), "claimed bot name");
        self.persist();
        Ok(name)
    }

    /// Return a claimed name to the pool, persisting the restored pool.
    ///
    /// Used when a join was rejected at the transport layer, so the failed
    /// request leaves local state untouched.
    pub fn release_name(&mut self, name: String) {
        debug!(name = %name, "released bot name back to pool");
        self.names.push(name);
        self.persist();
    }

    // Best-effort: pool persistence failing never blocks a claim.
    fn persist(&self) {
        let json = match serde_json::to_string(&self.names) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "bot pool could not be encoded");
                return;
            }
        };
        if let Err(err) = self.cache.set(keys::BOT_NAMES, &json) {
            warn!(error = %err, "bot pool not persisted");
        }
    }
}

/// The bot name pool is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    /// Every name has been claimed.
    #[error("no bot names left in the pool")]
    Exhausted,
}
