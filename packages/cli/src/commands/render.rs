use crate::commands::read_document;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use lexis_bridge::{Projection, RichTextEditor};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Serialized document to render
    pub document: PathBuf,

    /// Print only the JSON projection
    #[arg(long, conflicts_with = "html_only")]
    pub json_only: bool,

    /// Print only the HTML projection
    #[arg(long)]
    pub html_only: bool,

    /// Wrap the HTML in a complete page
    #[arg(long)]
    pub full_document: bool,

    /// Indent block elements (overrides config)
    #[arg(long)]
    pub pretty: bool,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let projection = render_projection(&args, cwd)?;

    if !args.html_only {
        if !args.json_only {
            println!("{}", "json".bright_blue().bold());
        }
        println!("{}", projection.json);
    }
    if !args.json_only {
        if !args.html_only {
            println!("{}", "html".bright_blue().bold());
        }
        println!("{}", projection.html);
    }

    Ok(())
}

/// Mount the document once and project it with config and flag overrides applied
pub fn render_projection(args: &RenderArgs, cwd: &str) -> Result<Projection> {
    let mut config = Config::load(cwd)?.to_host_config();
    if args.full_document {
        config.html.full_document = true;
    }
    if args.pretty {
        config.html.pretty = true;
    }

    let value = read_document(cwd, &args.document)?;
    let host = RichTextEditor::new(Some(&value), config)?;
    Ok(host.projection()?)
}
