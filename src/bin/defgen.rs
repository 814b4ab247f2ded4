use anyhow::Context;
use bpaf::Bpaf;
use camino::Utf8PathBuf;
use defgen::{Assembler, ExportLayout};
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Bpaf)]
#[bpaf(options)]
struct Options {
    #[bpaf(short, long)]
    /// Verbose output
    verbose: bool,

    #[bpaf(short('N'), long)]
    /// Dry run - print the manifest instead of writing it
    dry_run: bool,

    #[bpaf(short('r'), long, argument("ROOT"), fallback(".".into()))]
    /// Project root all layout paths are relative to
    root: Utf8PathBuf,

    #[bpaf(short('o'), long, argument("OUTPUT"))]
    /// Write the manifest here instead of the layout's output path
    output: Option<Utf8PathBuf>,

    #[bpaf(short('l'), long, argument("LAYOUT"))]
    /// Use a layout file instead of the built-in libmupdf layout
    layout: Option<Utf8PathBuf>,
}

/// Initialize the tracing subscriber with appropriate configuration
///
/// # Arguments
///
/// * `verbose` - If true, sets log level to DEBUG, otherwise INFO
pub fn init_logging(verbose: bool) {
    let filter_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Set up environment filter - allow overriding via RUST_LOG env var
    let env_filter = EnvFilter::builder()
        .with_default_directive(filter_level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_level(verbose)
        .with_target(verbose)
        .with_line_number(verbose)
        .without_time()
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    debug!("Logging initialized with level: {}", filter_level);
}

fn main() -> anyhow::Result<()> {
    let options = options().run();

    init_logging(options.verbose);

    let layout = match &options.layout {
        Some(path) => {
            info!("Loading layout from: {}", path);
            ExportLayout::from_file(path)
                .with_context(|| format!("failed to load layout {}", path))?
        }
        None => ExportLayout::default(),
    };

    debug!("Project root: {}", options.root);

    let assembler = Assembler::new(options.root.clone());
    let manifest = assembler
        .assemble(&layout)
        .context("failed to assemble manifest")?;

    if options.dry_run {
        print!("{}", manifest);
        return Ok(());
    }

    // Explicit output is taken as given, the layout's is relative to the root
    let output_path = options
        .output
        .unwrap_or_else(|| assembler.resolve(&layout.output));

    let written = manifest
        .write_to_file(&output_path)
        .context("failed to write manifest")?;

    info!("Wrote {} bytes to {}", written, output_path);

    Ok(())
}
