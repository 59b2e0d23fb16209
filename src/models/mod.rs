//! Inference over the externally trained scaler/model pair.
//!
//! Both artifacts are produced by the training pipeline; this crate only
//! drives them (`transform` then `predict`) and interprets the output.

mod classifier;
mod scaler;

pub use classifier::{infer, Classifier, LinearClassifier};
pub use scaler::StandardScaler;
