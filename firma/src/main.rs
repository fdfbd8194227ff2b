use anyhow::{bail, Context};
use clap::{ArgAction, Parser, Subcommand};
use firma_rs::{parse_event_script, FileDownload, InputEvent, PadConfig, SignaturePad};
use std::io::Read;
use std::path::{Path, PathBuf};

/// firma: replay recorded signature pad input and export the drawing
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    /// Increase log output (-v info, -vv debug). RUST_LOG takes precedence
    #[clap(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay input events and write the signature as a one-page PDF
    Pdf {
        /// Path to a JSON event script. Reads stdin when omitted or `-`
        #[clap(short, long)]
        input: Option<PathBuf>,

        /// Directory the PDF is downloaded into
        #[clap(short, long)]
        output_dir: PathBuf,

        /// Name of the downloaded file [default: firma.pdf]
        #[clap(short, long)]
        filename: Option<String>,

        #[clap(flatten)]
        pad: PadArgs,
    },

    /// Replay input events and write the canvas as a PNG image
    Png {
        /// Path to a JSON event script. Reads stdin when omitted or `-`
        #[clap(short, long)]
        input: Option<PathBuf>,

        /// Path to output PNG file to be created
        #[clap(short, long)]
        output: PathBuf,

        #[clap(flatten)]
        pad: PadArgs,
    },
}

/// Pad settings shared by every command. Flags override the config file.
#[derive(clap::Args, Debug)]
struct PadArgs {
    /// Path to a JSON pad configuration file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels
    #[clap(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[clap(long)]
    height: Option<u32>,

    /// Stroke width in pixels
    #[clap(long)]
    line_width: Option<f32>,

    /// CSS color of the strokes
    #[clap(long)]
    stroke_style: Option<String>,
}

impl PadArgs {
    fn load(&self) -> anyhow::Result<PadConfig> {
        let mut config = match &self.config {
            Some(path) => PadConfig::from_path(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?,
            None => PadConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(line_width) = self.line_width {
            config.line_width = line_width;
        }
        if let Some(stroke_style) = &self.stroke_style {
            config.stroke_style = stroke_style.clone();
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn read_events(input: Option<&Path>) -> anyhow::Result<Vec<InputEvent>> {
    let script = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?,
        _ => {
            let mut script = String::new();
            std::io::stdin()
                .read_to_string(&mut script)
                .context("Failed to read events from stdin")?;
            script
        }
    };
    let events = parse_event_script(&script).context("Failed to parse event script")?;
    Ok(events)
}

fn replay(config: PadConfig, events: &[InputEvent]) -> anyhow::Result<SignaturePad> {
    config.validate().context("Invalid pad configuration")?;
    let mut pad = SignaturePad::new(config);
    if pad.is_inert() {
        bail!("Signature pad has no drawing context, check the canvas width and height");
    }
    for event in events {
        pad.handle_event(event);
    }
    log::info!(
        "replayed {} events, {} points recorded",
        events.len(),
        pad.points().len()
    );
    Ok(pad)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Pdf {
            input,
            output_dir,
            filename,
            pad,
        } => {
            let mut config = pad.load()?;
            if let Some(filename) = filename {
                config.filename = filename;
            }
            let events = read_events(input.as_deref())?;
            let pad = replay(config, &events)?;

            let sink = FileDownload::new(&output_dir);
            let download = pad
                .download_pdf(&sink)
                .await
                .context("Failed to export signature PDF")?;
            println!("{}", output_dir.join(&download.filename).display());
        }
        Commands::Png { input, output, pad } => {
            let config = pad.load()?;
            let events = read_events(input.as_deref())?;
            let pad = replay(config, &events)?;

            let png = pad.to_png().context("Failed to render canvas")?;
            std::fs::write(&output, png)
                .with_context(|| format!("Failed to write {}", output.display()))?;
        }
    }
    Ok(())
}
