use std::fs;

use anyhow::{Context, Result, bail};

use hvf_cli::paths::derive_output_paths;
use hvf_cli::pipeline::{ConvertRequest, ConvertResult, run_convert};
use hvf_model::ExportLayout;
use hvf_output::{Sink, WriterOptions};

use crate::cli::ConvertArgs;

pub fn run_layout() -> Result<()> {
    let layout = ExportLayout::default();
    let text = serde_json::to_string_pretty(&layout).context("serialize layout")?;
    println!("{text}");
    Ok(())
}

pub fn run_convert_command(args: &ConvertArgs) -> Result<ConvertResult> {
    let paths = derive_output_paths(&args.input_file, args.output_file.as_deref());
    let errors = args.errors_file.clone().unwrap_or(paths.errors);
    let layout = match &args.layout {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read layout {}", path.display()))?;
            ExportLayout::from_json(&text)
                .with_context(|| format!("parse layout {}", path.display()))?
        }
        None => ExportLayout::default(),
    };
    if !args.delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character");
    }
    let request = ConvertRequest {
        input: args.input_file.clone(),
        output: paths.output,
        errors: Sink::File(errors),
        layout,
        writer: WriterOptions {
            delimiter: args.delimiter as u8,
        },
    };
    run_convert(&request)
}
