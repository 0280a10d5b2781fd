use clap::{Parser, Subcommand};
use markwiki::{config, generate, output};
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
#[command(name = "markwiki")]
#[command(about = "Static wiki generator for markdown content")]
#[command(long_about = "\
Static wiki generator for markdown content

Your filesystem is the data source. Top-level directories become
categories, markdown files become articles, and the first '# heading'
of each file becomes its title.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── readme.md                    # Uncategorized → /readme.html
  ├── setting/                     # Category \"setting\"
  │   ├── intro.md                 # → /setting/intro.html
  │   └── regions/
  │       └── north.md             # → /setting/regions/north.html (still \"setting\")
  └── history/
      └── timeline.md              # → /history/timeline.html

Templates are plain HTML shells with {{TOKEN}} placeholders:

  templates/
  ├── index.html                   # {{TITLE}} {{PAGE_TITLE}} {{BREADCRUMBS}} {{CONTENT}}
  ├── article.html                 # the same, plus {{NAVIGATION}}
  └── search.html                  # {{TITLE}} {{BREADCRUMBS}}

Title resolution (first available wins):
  Article:   first '# heading' line → file stem
  Category:  directory name, shown capitalized in listings

Run 'markwiki gen-config' to print a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Template shells directory
    #[arg(long, default_value = "templates", global = true)]
    templates: PathBuf,

    /// Static assets directory
    #[arg(long = "static", default_value = "static", global = true)]
    static_dir: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the full site: scan content, render pages, emit output
    Build,
    /// Validate content, config, and templates without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!(
                "==> Building {} \u{2192} {}",
                cli.source.display(),
                cli.output.display()
            );
            let report =
                generate::generate(&cli.source, &cli.templates, &cli.static_dir, &cli.output)?;
            output::print_build_report(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = generate::check(&cli.source, &cli.templates)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
