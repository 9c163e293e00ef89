use clap::{Parser, Subcommand};
use mdpress::config::{self, SiteConfig, SitePaths};
use mdpress::{assets, generate, output, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mdpress")]
#[command(about = "Static site generator for markdown documents")]
#[command(long_about = "\
Static site generator for markdown documents

Every .md file under the content directory becomes an .html page at the
same relative path under the output directory, wrapped in one template.

Project structure:

  my-site/
  ├── site.toml          # Optional config (paths, parallelism)
  ├── template.html      # {{ Title }} and {{ Content }} placeholders
  ├── static/            # Copied verbatim to the output root
  │   └── index.css
  └── content/
      ├── index.md       # → public/index.html
      └── blog/
          └── first.md   # → public/blog/first.html

Each page's title is its first '# ' heading; a document without one is an
error.

Run 'mdpress gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Project root; relative paths in site.toml and path flags resolve against it
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (defaults to <root>/site.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Content directory (overrides paths.content)
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Static asset directory (overrides paths.static)
    #[arg(long, global = true)]
    static_dir: Option<PathBuf>,

    /// Page template (overrides paths.template)
    #[arg(long, global = true)]
    template: Option<PathBuf>,

    /// Output directory (overrides paths.output)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Copy static assets and generate every page
    Build,
    /// List the markdown files that would become pages
    Scan {
        /// Print the manifest as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert every page in memory without writing output
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Build => {
            let (site_config, paths) = load_site(&cli)?;
            init_thread_pool(&site_config.processing);

            println!("==> Copying {}", paths.static_dir.display());
            let report = assets::copy_static(&paths.static_dir, &paths.output)?;
            output::print_copy_output(&report, &paths.static_dir, &paths.output);

            println!("==> Scanning {}", paths.content.display());
            let manifest = scan::scan(&paths.content, &paths.output)?;

            println!("==> Generating pages using {}", paths.template.display());
            let template = generate::Template::load(&paths.template)?;
            let pages = generate::generate_pages(&manifest, &template)?;
            output::print_generate_output(&pages, &paths.output);

            println!("==> Build complete: {}", paths.output.display());
        }
        Command::Scan { json } => {
            let (_, paths) = load_site(&cli)?;
            let manifest = scan::scan(&paths.content, &paths.output)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                output::print_scan_output(&manifest);
            }
        }
        Command::Check => {
            let (site_config, paths) = load_site(&cli)?;
            init_thread_pool(&site_config.processing);
            println!("==> Checking {}", paths.content.display());
            let manifest = scan::scan(&paths.content, &paths.output)?;
            let template = generate::Template::load(&paths.template)?;
            let checked = generate::check_pages(&manifest, &template)?;
            output::print_check_output(&checked);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the site config and resolve its paths.
fn load_site(cli: &Cli) -> Result<(SiteConfig, SitePaths), config::ConfigError> {
    let site_config = match &cli.config {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(&cli.root)?,
    };
    let paths = resolve_paths(cli, &site_config.paths);
    paths.validate()?;
    Ok((site_config, paths))
}

/// Config paths resolved against the root, with CLI flags taking precedence.
fn resolve_paths(cli: &Cli, paths: &config::PathsConfig) -> SitePaths {
    let overrides = config::PathOverrides {
        content: cli.content.clone(),
        static_dir: cli.static_dir.clone(),
        template: cli.template.clone(),
        output: cli.output.clone(),
    };
    paths.resolve(&cli.root).with_overrides(&cli.root, &overrides)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
