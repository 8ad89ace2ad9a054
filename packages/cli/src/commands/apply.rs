use crate::commands::{read_document, resolve};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use lexis_bridge::{Mutation, RichTextEditor};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::debug;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Serialized document to start from
    pub document: PathBuf,

    /// JSON array of mutations to apply in order
    #[arg(short, long)]
    pub mutations: PathBuf,

    /// Write the final JSON here
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Every `(json, html)` pair delivered while the script ran
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub pairs: Vec<(String, String)>,
    pub final_json: String,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let report = run_script(&args, cwd)?;

    for (i, (json, html)) in report.pairs.iter().enumerate() {
        println!("{} {}", "change".bright_blue().bold(), i + 1);
        println!("  {} {}", "json".dimmed(), json);
        println!("  {} {}", "html".dimmed(), html);
    }

    if let Some(out) = &args.out {
        let path = resolve(cwd, out);
        std::fs::write(&path, &report.final_json)
            .with_context(|| format!("Cannot write {}", path.display()))?;
        println!("{} {}", "✓".green(), path.display());
    }

    println!(
        "✨ {} {} changes projected",
        "Done".green().bold(),
        report.pairs.len()
    );
    Ok(())
}

/// Mount the document, subscribe a recording sink and replay the script
pub fn run_script(args: &ApplyArgs, cwd: &str) -> Result<ApplyReport> {
    let config = Config::load(cwd)?.to_host_config();
    let value = read_document(cwd, &args.document)?;
    let script = read_document(cwd, &args.mutations)?;
    let mutations: Vec<Mutation> = serde_json::from_str(&script)
        .with_context(|| format!("Invalid mutation script {}", args.mutations.display()))?;

    let pairs = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&pairs);
    let mut host = RichTextEditor::mount(Some(&value), config, move |json, html| {
        sink.borrow_mut().push((json.to_string(), html.to_string()));
    })?;

    for (i, mutation) in mutations.into_iter().enumerate() {
        let name = mutation.name();
        let result = host
            .apply(mutation)
            .with_context(|| format!("Mutation {} ({}) failed", i + 1, name))?;
        debug!(index = i, mutation = name, version = result.version, "Applied");
    }

    let final_json = host.projection()?.json;
    let pairs = pairs.take();
    Ok(ApplyReport { pairs, final_json })
}
