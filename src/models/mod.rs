//! Trained model artifacts and the process-wide model cache.
//!
//! - `ensemble`: gradient-boosted tree regressor behind the `Regressor` trait
//! - `encoder`: fitted label encoders for categorical columns
//! - `bundle`: regressor + encoders + feature layout
//! - `registry`: lazily loaded, process-wide `ModelBundle`

pub mod bundle;
pub mod encoder;
pub mod ensemble;
pub mod registry;

pub use bundle::ModelBundle;
pub use encoder::LabelEncoder;
pub use ensemble::{GradientBoostedTrees, RegressionTree, Regressor, TreeNode};
