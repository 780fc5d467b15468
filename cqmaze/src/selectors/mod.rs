pub mod amplified;
pub mod classical;
pub mod types;

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{amplify::AmplifyError, board::Maze, encoding::EncodingError, registry::Registry};

pub use amplified::{AmplifiedSelector, MostProbableSelector};
pub use classical::{FirstSelector, ShortestSelector};
pub use types::*;

/// Registry of the path selectors.
pub type SelectorRegistry = Registry<dyn PathSelector>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("No candidate paths to select from")]
    NoCandidates,
    #[error(transparent)]
    Amplify(#[from] AmplifyError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// Picks one path out of the enumerated candidates.
pub trait PathSelector: fmt::Debug + Sync + Send {
    /// Rejects mazes the selector can't handle, before any path is enumerated.
    fn check(&self, _maze: &Maze, _params: &Params) -> Result<(), SelectError> {
        Ok(())
    }

    fn select(&self, candidates: Candidates, params: &Params) -> Result<Selection, SelectError>;
}

/// Registry with every built-in selector, `amplified` being the default.
pub fn default_registry() -> SelectorRegistry {
    let amplified: Arc<dyn PathSelector> = Arc::new(AmplifiedSelector);

    let mut registry = SelectorRegistry::with_default(amplified.clone());
    registry.register("amplified".to_string(), amplified);
    registry.register("most_probable".to_string(), Arc::new(MostProbableSelector));
    registry.register("shortest".to_string(), Arc::new(ShortestSelector));
    registry.register("first".to_string(), Arc::new(FirstSelector));

    registry
}
