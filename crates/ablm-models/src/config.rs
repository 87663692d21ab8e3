//! Task configuration.
//!
//! Each evaluation task is a variant of [`TaskConfig`] sharing one field
//! contract; callers dispatch on the variant tag explicitly rather than
//! through open-ended trait objects.
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum::{Display, EnumString};

/// Data and tokenization parameters shared by every task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub sequence_column: Option<String>,
    pub heavy_column: Option<String>,
    pub light_column: Option<String>,
    pub separator: String,
    pub tokenizer_path: Option<String>,
    pub padding: Padding,
    pub max_len: usize,
    pub truncate: bool,
    pub add_special_tokens: bool,
    pub num_proc: usize,
    pub output_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            sequence_column: None,
            heavy_column: None,
            light_column: None,
            separator: "<cls>".to_string(),
            tokenizer_path: None,
            padding: Padding::MaxLength,
            max_len: 256,
            truncate: true,
            add_special_tokens: true,
            num_proc: 128,
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum Padding {
    MaxLength,
    Longest,
    None,
}

/// The sealed set of evaluation tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TaskConfig {
    PerPositionInference(DataConfig),
}

impl TaskConfig {
    pub fn per_position_inference(output_dir: PathBuf) -> Self {
        TaskConfig::PerPositionInference(DataConfig {
            sequence_column: Some("sequence".to_string()),
            heavy_column: Some("sequence_aa_heavy".to_string()),
            light_column: Some("sequence_aa_light".to_string()),
            output_dir,
            ..DataConfig::default()
        })
    }

    pub fn task_dir(&self) -> &'static str {
        match self {
            TaskConfig::PerPositionInference(_) => "per_position_inference",
        }
    }

    /// Human-readable task name derived from the task directory.
    pub fn name(&self) -> String {
        self.task_dir()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn data(&self) -> &DataConfig {
        match self {
            TaskConfig::PerPositionInference(data) => data,
        }
    }
}
