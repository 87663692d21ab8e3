//! ablm-models
//!
//! Pretrained model/tokenizer loading and task configuration for the
//! evaluation pipeline. The loader mirrors the upstream inference code's
//! contract: a model path, a task kind (`mlm` or `classification`), and an
//! optional separate tokenizer path.
pub use config::{DataConfig, Padding, TaskConfig};
pub use loader::{device, load_model_and_tokenizer, EvalTask, LoadedModel, DTYPE};

pub mod config;
pub mod loader;
