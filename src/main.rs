use clap::{Parser, Subcommand};
use std::path::PathBuf;
use timetree::{config, date, generate, output, scan};

#[derive(Parser)]
#[command(name = "timetree")]
#[command(about = "Static blog renderer with locale-aware post pages")]
#[command(long_about = "\
Static blog renderer with locale-aware post pages

Markdown posts with TOML front matter become themed HTML pages. A post and
its translations share a slug; each page links to its counterpart.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  └── posts/
      ├── hello-world.md           # /hello-world/
      ├── hello-world.zh.md        # /zh/hello-world/
      └── typed-styles/
          ├── index.md             # /typed-styles/
          ├── index.zh.md          # /zh/typed-styles/
          └── banner.jpg           # Copied next to both pages

Front matter:

  +++
  title = \"Hello, world\"
  date = 2020-01-15
  description = \"Optional, markdown\"
  +++

Run 'timetree gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print the reading-time label for a number of minutes
    ReadingTime {
        #[arg(allow_negative_numbers = true)]
        minutes: f64,
    },
    /// Print a post date as it appears on a page
    FormatDate {
        /// ISO-8601 date, e.g. 2020-01-15
        date: String,
        /// Locale tag; defaults to the configured default locale
        #[arg(long)]
        locale: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            init_thread_pool(&manifest.config.processing);
            let report = generate::generate(&manifest, &cli.source, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::ReadingTime { minutes } => {
            let config = config::load_config(&cli.source)?;
            println!("{}", config.reading_time.formatter().format(minutes)?);
        }
        Command::FormatDate { date, locale } => {
            let config = config::load_config(&cli.source)?;
            let locales = config.locale_table();
            println!(
                "{}",
                date::format_post_date(&date, locale.as_deref(), &locales)?
            );
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
