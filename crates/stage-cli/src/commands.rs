use anyhow::Context;
use colored::Colorize;
use serde_json::json;
use stage_crypto::ContentHasher;
use stage_dict::{DictConfig, DictMerger, HttpDictSource};
use stage_finalize::{AssetFinalizer, FinalizeConfig};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Finalize(args) => cmd_finalize(&args, &cli.format),
        Command::UpdateDict(args) => cmd_update_dict(&args, &cli.format),
        Command::Hash(args) => cmd_hash(&args, &cli.format),
    }
}

/// Config file (or defaults) with command-line flags applied on top.
fn finalize_config(args: &FinalizeArgs) -> anyhow::Result<FinalizeConfig> {
    let mut config = match &args.config {
        Some(path) => FinalizeConfig::load(path)?,
        None => FinalizeConfig::default(),
    };
    if let Some(dir) = &args.stage_dir {
        config.stage_dir = dir.clone();
    }
    if let Some(hash) = args.expected_hash {
        config.expected_loader_hash = hash;
    }
    Ok(config)
}

/// Config file (or defaults) with command-line flags applied on top.
fn dict_config(args: &UpdateDictArgs) -> anyhow::Result<DictConfig> {
    let mut config = match &args.config {
        Some(path) => DictConfig::load(path)?,
        None => DictConfig::default(),
    };
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
    Ok(config)
}

fn cmd_finalize(args: &FinalizeArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let report = AssetFinalizer::new(finalize_config(args)?)
        .run()
        .context("failed to finalize worker assets")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            println!("{} Worker assets finalized", "✓".green().bold());
            for asset in [&report.wasm, &report.bindings, &report.loader] {
                println!("  {} {}", asset.hash.to_string().dimmed(), asset.file_name.yellow());
            }
            println!("  Worker URI: {}", report.worker_uri.cyan());
        }
    }
    Ok(())
}

fn cmd_update_dict(args: &UpdateDictArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = dict_config(args)?;
    let merger = DictMerger::new(HttpDictSource::new(config.base_url.clone()));
    let report = merger
        .update(&config)
        .context("failed to update dictionaries")?;

    match format {
        OutputFormat::Json => {
            let written: Vec<_> = report
                .written
                .iter()
                .map(|w| json!({ "path": w.path, "lines": w.lines }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&written)?);
        }
        OutputFormat::Text => {
            for w in &report.written {
                let path = w.path.display().to_string();
                println!("{} Dict updated {} ({} lines)", "✓".green(), path.bold(), w.lines);
            }
        }
    }
    Ok(())
}

fn cmd_hash(args: &HashArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let hasher = ContentHasher::new(args.algorithm);
    let mut hashes = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let hash = hasher
            .hash_file(path)
            .with_context(|| format!("failed to hash {}", path.display()))?;
        hashes.push((path, hash));
    }

    match format {
        OutputFormat::Json => {
            let entries: Vec<_> = hashes
                .iter()
                .map(|(path, hash)| {
                    json!({ "path": path, "hash": hash, "algorithm": args.algorithm })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            for (path, hash) in &hashes {
                println!("{}  {}", hash.to_string().yellow(), path.display());
            }
        }
    }
    Ok(())
}
