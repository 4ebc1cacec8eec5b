use clap::{Parser, Subcommand};
use smallpress::visibility::{BuildContext, Clock, SystemClock};
use smallpress::{config, generate, output, scan};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "smallpress")]
#[command(about = "Static site generator for personal blogs")]
#[command(long_about = "\
Static site generator for personal blogs

Your filesystem is the data source. Markdown files under articles/ become
blog posts; markdown files in the content root become standalone pages.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── about.md                     # Standalone page → /about/
  ├── assets/                      # Static assets (favicon, fonts) → copied to output root
  └── articles/                    # The blog collection
      ├── hello-world.md           # → /articles/hello-world/
      └── 2024/
          └── year-in-review.md    # Subdirectories are fine

Article frontmatter (TOML between +++ fences):

  +++
  title = \"Hello, world\"
  date = \"2024-01-01\"            # UTC; the article goes live on this day
  published = true                 # Anything else (or absent) means draft
  tags = [\"rust\"]
  summary = \"The first post.\"
  +++

An article appears in production output only when published = true AND its
date is not in the future. 'smallpress preview' builds with every article
visible, badged as draft or scheduled, for local proofreading.

Run 'smallpress gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".smallpress-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content directory into a manifest
    Scan,
    /// Produce the HTML site from an existing manifest
    Generate,
    /// Run the full pipeline for production: scan → generate
    Build,
    /// Full pipeline with drafts and scheduled articles visible
    Preview,
    /// Validate content and report frontmatter problems without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The build mode is fixed here, once, from the invocation. Everything
    // downstream receives the context explicitly; nothing re-reads it from
    // the environment.
    let clock = SystemClock;

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source, clock.now());
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let ctx = BuildContext::production();
            let summary = generate::generate(&manifest_path, &cli.source, &cli.output, &ctx)?;
            output::print_generate_output(&summary, &ctx, &cli.output);
        }
        Command::Build => run_pipeline(&cli, BuildContext::production(), &clock)?,
        Command::Preview => run_pipeline(&cli, BuildContext::preview(), &clock)?,
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source, clock.now());
            if manifest.warnings.is_empty() {
                println!("==> Content is valid");
            } else {
                println!(
                    "==> Content scanned with {} warnings (affected articles stay drafts)",
                    manifest.warnings.len()
                );
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn run_pipeline(
    cli: &Cli,
    ctx: BuildContext,
    clock: &SystemClock,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("==> Stage 1: Scanning {}", cli.source.display());
    let manifest = scan::scan(&cli.source)?;
    let manifest_path = write_manifest(&manifest, &cli.temp_dir)?;
    output::print_scan_output(&manifest, &cli.source, clock.now());

    println!("==> Stage 2: Generating HTML → {}", cli.output.display());
    let summary = generate::generate(&manifest_path, &cli.source, &cli.output, &ctx)?;
    output::print_generate_output(&summary, &ctx, &cli.output);

    println!("==> Build complete: {}", cli.output.display());
    Ok(())
}

fn write_manifest(
    manifest: &scan::Manifest,
    temp_dir: &std::path::Path,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&manifest_path, json)?;
    Ok(manifest_path)
}
