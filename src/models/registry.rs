//! Process-wide model cache.
//!
//! The bundle is loaded on first use from fixed artifact paths and kept for
//! the lifetime of the process. `OnceCell::get_or_try_init` blocks racing
//! callers while one thread loads, so artifacts are read at most once per
//! successful initialization. A failed load is not cached; the error goes
//! straight back to the caller.

use std::path::Path;

use once_cell::sync::OnceCell;
use tracing::info;

use crate::error::EngineError;
use crate::models::bundle::ModelBundle;

/// Regressor artifact, anchored to the crate root at build time.
pub const MODEL_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/models/revenue_model.json");

/// Categorical encoder artifact.
pub const ENCODERS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/models/label_encoders.json");

static BUNDLE: OnceCell<ModelBundle> = OnceCell::new();

/// Shared read-only model bundle, loading it on first call.
pub fn bundle() -> Result<&'static ModelBundle, EngineError> {
    BUNDLE.get_or_try_init(|| {
        info!(model = MODEL_PATH, encoders = ENCODERS_PATH, "loading model bundle");
        let bundle = ModelBundle::load(Path::new(MODEL_PATH), Path::new(ENCODERS_PATH))?;
        info!(
            features = bundle.feature_names().len(),
            log_target = bundle.log_target(),
            "model bundle ready"
        );
        Ok(bundle)
    })
}

#[cfg(test)]
fn is_loaded() -> bool {
    BUNDLE.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_is_loaded_once_and_shared() {
        let first = bundle().unwrap();
        assert!(is_loaded());
        let second = bundle().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn concurrent_first_calls_see_the_same_bundle() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| bundle().map(|b| b as *const ModelBundle as usize)))
            .collect();
        let addrs: Vec<usize> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }
}
