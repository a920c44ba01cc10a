// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::{Path, PathBuf};

use subcomply::app_config::{self, Config};
use subcomply::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Options shared by every processing command
#[derive(Args, Debug, Clone)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Use the children's reading speed (17 characters per second)
    #[arg(long)]
    child: bool,

    /// Frame rate used for gaps and sync tolerance
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rewrite subtitles to meet the presentation rules (default command)
    Comply(ComplyArgs),

    /// Check subtitles against the presentation rules without changing them
    Audit {
        /// Subtitle file to check
        #[arg(value_name = "INPUT_FILE")]
        input_path: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Split a subtitle file into size-limited parts
    Chunk {
        /// Subtitle file to split
        #[arg(value_name = "INPUT_FILE")]
        input_path: PathBuf,

        /// Directory for the parts (defaults to the input's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Character budget of one part
        #[arg(long)]
        max_chars: Option<usize>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Generate shell completions for subcomply
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct ComplyArgs {
    /// Subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Output directory (defaults to the configured one)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the result instead of writing a file
    #[arg(long)]
    stdout: bool,

    #[command(flatten)]
    common: CommonArgs,
}

/// subcomply - broadcast caption compliance for SubRip subtitles
///
/// Rewrites subtitle timing and line layout so that every cue respects
/// reading speed, duration, gap and line-length rules.
#[derive(Parser, Debug)]
#[command(name = "subcomply")]
#[command(version)]
#[command(about = "Broadcast caption compliance for SRT subtitles")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "subcomply rewrites SRT subtitles so that every cue respects broadcast presentation rules.

EXAMPLES:
    subcomply movie.srt                         # Write output/movie-compliant-<timestamp>.srt
    subcomply --child --fps 25 movie.srt        # Children's reading speed at 25 fps
    subcomply --stdout movie.srt                # Print the result
    subcomply /subtitles/                       # Process a whole directory
    subcomply audit movie.srt                   # Report rule violations
    subcomply chunk --max-chars 4000 movie.srt  # Split into parts
    subcomply completions bash > subcomply.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Output directory (defaults to the configured one)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the result instead of writing a file
    #[arg(long)]
    stdout: bool,

    #[command(flatten)]
    common: CommonArgs,
}

// @struct: Custom logger implementation
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌ "),
            Level::Warn => ("1;33", "🚧 "),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍 "),
            Level::Trace => ("1;35", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // Adjusted at runtime through log::set_max_level
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let (color, emoji) = Self::style_for_level(record.level());

            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subcomply", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Comply(args)) => run_comply(args),
        Some(Commands::Audit { input_path, common }) => run_audit(&input_path, &common),
        Some(Commands::Chunk {
            input_path,
            output_dir,
            max_chars,
            common,
        }) => run_chunk(&input_path, output_dir, max_chars, &common),
        None => {
            // Default behavior - a bare path means comply
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            run_comply(ComplyArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                output_dir: cli.output_dir,
                stdout: cli.stdout,
                common: cli.common,
            })
        }
    }
}

/// Load the configuration and apply command line overrides
fn load_config(common: &CommonArgs) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cli_level) = common.log_level {
        log::set_max_level(app_config::LogLevel::from(cli_level).to_level_filter());
    }

    let mut config = Config::load_or_create(&common.config_path)?;

    if common.child {
        config.compliance.is_child_audience = true;
    }

    if let Some(fps) = common.fps {
        config.compliance.frames_per_second = fps;
    }

    if let Some(cli_level) = common.log_level {
        config.log_level = cli_level.into();
    }

    // Just update the max level without reinitializing the logger
    log::set_max_level(config.log_level.to_level_filter());

    Ok(config)
}

fn run_comply(options: ComplyArgs) -> Result<()> {
    let config = load_config(&options.common)?;
    let controller = Controller::with_config(config)?;

    if options.input_path.is_file() {
        if options.stdout {
            let content = subcomply::file_utils::FileManager::read_subtitle(&options.input_path)?;
            let report = controller.comply_text(&content);
            println!("{}", report.text);
        } else {
            let output_dir = options
                .output_dir
                .unwrap_or_else(|| PathBuf::from(&controller.config().output.directory));
            controller.run(options.input_path, output_dir, options.force_overwrite)?;
        }
    } else if options.input_path.is_dir() {
        if options.stdout {
            return Err(anyhow!("--stdout needs a single input file"));
        }
        let summary = controller.run_folder(options.input_path, options.output_dir, options.force_overwrite)?;
        if summary.errors > 0 {
            return Err(anyhow!("{} files failed", summary.errors));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}

fn run_audit(input_path: &Path, common: &CommonArgs) -> Result<()> {
    let controller = Controller::with_config(load_config(common)?)?;
    let report = controller.audit(input_path)?;

    if report.passed {
        info!("All {} cues comply", report.cue_count());
        Ok(())
    } else {
        Err(anyhow!(
            "Audit failed: {} issues in {} cues, {} unreadable blocks",
            report.total_issues,
            report.failed_entries().len(),
            report.skipped_blocks.len()
        ))
    }
}

fn run_chunk(input_path: &Path, output_dir: Option<PathBuf>, max_chars: Option<usize>, common: &CommonArgs) -> Result<()> {
    let mut config = load_config(common)?;
    if let Some(max_chars) = max_chars {
        config.chunking.max_chars_per_chunk = max_chars;
    }

    let output_dir = output_dir.unwrap_or_else(|| {
        input_path.parent().unwrap_or(Path::new(".")).to_path_buf()
    });

    let controller = Controller::with_config(config)?;
    controller.chunk(input_path, &output_dir)?;

    Ok(())
}
