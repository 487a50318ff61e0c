//! Cart and wishlist state.
//!
//! Both collections are owned values with pure transitions: each transition
//! consumes the current state and returns the next one. [`StateStore`] pairs a
//! state with a [`Persistence`] adapter and saves after every transition.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to (de)serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One cart line. Lines are keyed by `(product_id, volume)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    /// Selected variant size; `None` for products without variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CartLine {
    fn same_key(&self, product_id: &str, volume: Option<&str>) -> bool {
        self.product_id == product_id && self.volume.as_deref() == volume
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Adds `line`, merging quantities with an existing line of the same key.
    /// A zero quantity is treated as one.
    #[must_use]
    pub fn add_item(mut self, mut line: CartLine) -> Self {
        line.quantity = line.quantity.max(1);
        match self
            .lines
            .iter_mut()
            .find(|l| l.same_key(&line.product_id, line.volume.as_deref()))
        {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => self.lines.push(line),
        }
        self
    }

    #[must_use]
    pub fn remove_item(mut self, product_id: &str, volume: Option<&str>) -> Self {
        self.lines.retain(|l| !l.same_key(product_id, volume));
        self
    }

    /// Sets the quantity of an existing line; `0` removes it. Unknown keys
    /// leave the cart unchanged.
    #[must_use]
    pub fn set_quantity(mut self, product_id: &str, volume: Option<&str>, quantity: u32) -> Self {
        if quantity == 0 {
            return self.remove_item(product_id, volume);
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.same_key(product_id, volume))
        {
            line.quantity = quantity;
        }
        self
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.lines
            .iter()
            .map(|l| l.price * f64::from(l.quantity))
            .sum()
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .map(|l| l.quantity)
            .fold(0, u32::saturating_add)
    }
}

/// Ordered set of product IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wishlist {
    pub product_ids: Vec<String>,
}

impl Wishlist {
    #[must_use]
    pub fn add(mut self, product_id: &str) -> Self {
        if !self.contains(product_id) {
            self.product_ids.push(product_id.to_string());
        }
        self
    }

    #[must_use]
    pub fn remove(mut self, product_id: &str) -> Self {
        self.product_ids.retain(|id| id != product_id);
        self
    }

    #[must_use]
    pub fn toggle(self, product_id: &str) -> Self {
        if self.contains(product_id) {
            self.remove(product_id)
        } else {
            self.add(product_id)
        }
    }

    #[must_use]
    pub fn contains(&self, product_id: &str) -> bool {
        self.product_ids.iter().any(|id| id == product_id)
    }
}

/// Storage adapter for a piece of client state.
pub trait Persistence<S> {
    /// Returns `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] when stored state exists but cannot be read.
    fn load(&self) -> Result<Option<S>, CartError>;

    /// # Errors
    ///
    /// Returns [`CartError`] when the state cannot be written.
    fn save(&self, state: &S) -> Result<(), CartError>;
}

/// Stores state as pretty-printed JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> CartError {
        CartError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl<S> Persistence<S> for JsonFilePersistence
where
    S: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Option<S>, CartError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_err(e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| CartError::Serialize {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&self, state: &S) -> Result<(), CartError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let body = serde_json::to_string_pretty(state).map_err(|source| CartError::Serialize {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, body).map_err(|e| self.io_err(e))
    }
}

/// Owns one piece of state and persists it after every transition.
pub struct StateStore<S, P> {
    state: S,
    persistence: P,
}

impl<S, P> StateStore<S, P>
where
    S: Default + Clone,
    P: Persistence<S>,
{
    /// Opens the store, starting from the persisted state or `S::default()`.
    ///
    /// # Errors
    ///
    /// Propagates [`CartError`] from [`Persistence::load`].
    pub fn open(persistence: P) -> Result<Self, CartError> {
        let state = persistence.load()?.unwrap_or_default();
        Ok(Self { state, persistence })
    }

    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Applies `transition` and saves the result. On a save failure the
    /// in-memory state is left unchanged.
    ///
    /// # Errors
    ///
    /// Propagates [`CartError`] from [`Persistence::save`].
    pub fn apply<F>(&mut self, transition: F) -> Result<&S, CartError>
    where
        F: FnOnce(S) -> S,
    {
        let next = transition(self.state.clone());
        self.persistence.save(&next)?;
        tracing::debug!("client state persisted");
        self.state = next;
        Ok(&self.state)
    }
}
