// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use content::ContentKind;

use cmd::commands::{build, form, list, show, sitemap};
use cmd::common::{FormKind, SiteContext};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "komuten")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Site configuration (YAML), merged over the built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Content root holding works/, news/, topics/ and pages/
    #[arg(long, global = true, default_value = "content")]
    content: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the static site
    Build {
        /// Output directory
        output_dir: PathBuf,
    },
    /// List items of a content type, newest first
    List {
        /// Content type: works, news or topics
        kind: ContentKind,
        /// Only items in this category
        #[arg(long)]
        category: Option<String>,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Items per page (defaults to the site config)
        #[arg(long)]
        per_page: Option<usize>,
    },
    /// Show an item's metadata and rendered body
    Show {
        kind: ContentKind,
        slug: String,
    },
    /// List the categories of a content type with item counts
    Categories { kind: ContentKind },
    /// Items related to one item
    Related {
        kind: ContentKind,
        slug: String,
        /// Maximum number of items (defaults to the site config)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print sitemap.xml
    Sitemap,
    /// Print robots.txt
    Robots,
    /// Validate a form JSON file
    Validate {
        #[arg(value_enum)]
        form: FormKind,
        json: PathBuf,
    },
    /// Validate and deliver a submission JSON file, print the response
    Submit {
        json: PathBuf,
        /// Read the file as this form instead of a raw submission
        #[arg(long, value_enum)]
        form: Option<FormKind>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    diagnostics::init();

    let cli = Cli::parse();
    let ctx = SiteContext::load(cli.config.as_deref(), cli.content.clone())?;
    let print = |line: String| println!("{line}");

    match &cli.command {
        Commands::Build { output_dir } => {
            build::build_command(&ctx, output_dir, Utc::now(), print)?;
        }
        Commands::List {
            kind,
            category,
            page,
            per_page,
        } => {
            list::list_command(&ctx, *kind, category.as_deref(), *page, *per_page, print)?;
        }
        Commands::Show { kind, slug } => show::show_command(&ctx, *kind, slug, print)?,
        Commands::Categories { kind } => list::categories_command(&ctx, *kind, print)?,
        Commands::Related { kind, slug, limit } => {
            list::related_command(&ctx, *kind, slug, *limit, print)?;
        }
        Commands::Sitemap => sitemap::sitemap_command(&ctx, Utc::now(), print)?,
        Commands::Robots => sitemap::robots_command(&ctx, Utc::now(), print)?,
        Commands::Validate { form, json } => {
            let errors = form::validate_command(*form, json, print)?;
            if !errors.is_empty() {
                bail!("{} field(s) failed validation", errors.len());
            }
        }
        Commands::Submit { json, form } => {
            let response = form::submit_command(&ctx, *form, json, print).await?;
            if !response.success {
                bail!("Submission failed");
            }
        }
    }
    Ok(())
}
