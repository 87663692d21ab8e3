use super::commands;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate per-position masked-prediction results by antibody region
    /// and write box-plot figures plus a CDRH3 summary table
    PerPosition {
        /// Directory holding one Parquet result file per model/run
        #[arg(long)]
        results_dir: PathBuf,
        /// Directory for figures and the summary CSV
        #[arg(long)]
        output_dir: PathBuf,
        /// Tag used in output file names
        #[arg(long, default_value = "per_position_inference")]
        task_str: String,
    },
    /// Load a pretrained model and tokenizer and print basic facts
    CheckModel {
        /// Local directory or Hugging Face model id
        #[arg(long)]
        model_path: String,
        /// Task kind: "mlm" or "classification"
        #[arg(long, default_value = "mlm")]
        task: String,
        /// Separate tokenizer path, when it differs from the model path
        #[arg(long)]
        tokenizer_path: Option<String>,
        /// Run on CPU rather than on GPU
        #[arg(long)]
        cpu: bool,
    },
}

impl Cli {
    pub fn execute(self) -> anyhow::Result<()> {
        match self.command {
            Commands::PerPosition {
                results_dir,
                output_dir,
                task_str,
            } => commands::per_position::execute(&results_dir, &output_dir, &task_str),
            Commands::CheckModel {
                model_path,
                task,
                tokenizer_path,
                cpu,
            } => commands::check_model::execute(&model_path, &task, tokenizer_path.as_deref(), cpu),
        }
    }
}
