//! Pretrained model and tokenizer loading.
//!
//! Weights and config are resolved either from a local directory
//! (`config.json`, `tokenizer.json`, `model.safetensors`) or from the
//! Hugging Face hub when the path is not a directory on disk. Weights are
//! memory-mapped into a candle `VarBuilder` so the caller can assemble
//! whichever architecture the config describes.
use ablm_core::EvalError;
use anyhow::{Error as E, Result};
use candle_core::utils::{cuda_is_available, metal_is_available};
use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use std::path::{Path, PathBuf};
use strum::Display;
use tokenizers::Tokenizer;

pub const DTYPE: DType = DType::F32;

/// The two recognized evaluation task kinds. Anything else is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EvalTask {
    Mlm,
    Classification,
}

impl EvalTask {
    pub fn parse(value: &str) -> Result<Self, EvalError> {
        match value {
            "mlm" => Ok(EvalTask::Mlm),
            "classification" => Ok(EvalTask::Classification),
            other => Err(EvalError::UnsupportedTask(other.to_string())),
        }
    }
}

/// A loaded model: mmapped weights plus the parsed `config.json`.
pub struct LoadedModel {
    pub task: EvalTask,
    pub config: serde_json::Value,
    pub weights: VarBuilder<'static>,
}

/// Load a pretrained model and tokenizer.
///
/// The tokenizer comes from `tokenizer_path` when given, otherwise from
/// the model path. Fails with an unsupported-task error for any task kind
/// other than `mlm` or `classification`.
pub fn load_model_and_tokenizer(
    model_path: &str,
    task: &str,
    tokenizer_path: Option<&str>,
    device: &Device,
) -> Result<(LoadedModel, Tokenizer)> {
    let task = EvalTask::parse(task)?;
    let files = ModelFiles::locate(model_path)?;
    let tokenizer_file = match tokenizer_path {
        Some(path) => locate_tokenizer(path)?,
        None => files.tokenizer.clone(),
    };
    log::debug!("loading tokenizer from {}", tokenizer_file.display());
    let tokenizer = Tokenizer::from_file(&tokenizer_file).map_err(E::msg)?;

    let config_str = std::fs::read_to_string(&files.config)?;
    let config: serde_json::Value = serde_json::from_str(&config_str)?;
    let weights = unsafe { VarBuilder::from_mmaped_safetensors(&[files.weights], DTYPE, device)? };

    Ok((
        LoadedModel {
            task,
            config,
            weights,
        },
        tokenizer,
    ))
}

struct ModelFiles {
    config: PathBuf,
    tokenizer: PathBuf,
    weights: PathBuf,
}

impl ModelFiles {
    fn locate(model_path: &str) -> Result<Self> {
        let dir = Path::new(model_path);
        if dir.is_dir() {
            return Ok(Self {
                config: dir.join("config.json"),
                tokenizer: dir.join("tokenizer.json"),
                weights: dir.join("model.safetensors"),
            });
        }
        let repo = Repo::with_revision(model_path.to_string(), RepoType::Model, "main".to_string());
        let api = Api::new()?.repo(repo);
        Ok(Self {
            config: api.get("config.json")?,
            tokenizer: api.get("tokenizer.json")?,
            weights: api.get("model.safetensors")?,
        })
    }
}

fn locate_tokenizer(path: &str) -> Result<PathBuf> {
    let candidate = Path::new(path);
    if candidate.is_dir() {
        return Ok(candidate.join("tokenizer.json"));
    }
    if candidate.is_file() {
        return Ok(candidate.to_path_buf());
    }
    let repo = Repo::with_revision(path.to_string(), RepoType::Model, "main".to_string());
    Ok(Api::new()?.repo(repo).get("tokenizer.json")?)
}

pub fn device(cpu: bool) -> candle_core::Result<Device> {
    if cpu {
        Ok(Device::Cpu)
    } else if cuda_is_available() {
        Ok(Device::new_cuda(0)?)
    } else if metal_is_available() {
        Ok(Device::new_metal(0)?)
    } else {
        log::info!("no accelerator available, running on CPU");
        Ok(Device::Cpu)
    }
}
