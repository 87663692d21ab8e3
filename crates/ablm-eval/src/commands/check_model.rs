//! Sanity-check a pretrained model: resolve its files, load weights and
//! tokenizer, and print what was found.
use ablm_models::{device, load_model_and_tokenizer};
use anyhow::Result;

pub fn execute(model_path: &str, task: &str, tokenizer_path: Option<&str>, cpu: bool) -> Result<()> {
    let device = device(cpu)?;
    let (model, tokenizer) = load_model_and_tokenizer(model_path, task, tokenizer_path, &device)?;
    println!("task: {}", model.task);
    println!("vocab size: {}", tokenizer.get_vocab_size(true));
    if let Some(object) = model.config.as_object() {
        println!("config keys: {}", object.len());
    }
    Ok(())
}
