use app_state::{AppSettings, DEFAULT_SETTINGS_PATH, load_app_settings_from};
use clap::{Parser, Subcommand};
use color_eyre::Result;
use common_services::api::thumbnail::service::ThumbnailService;
use common_types::{ImageFormat, ThumbnailRequest};
use generate_thumbnails::FfmpegFrameSource;
use std::path::PathBuf;
use std::sync::Arc;
use thumbnailer::run_bridge;
use tokio::io::BufReader;
use tokio::sync::mpsc::unbounded_channel;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Settings file to load.
    #[clap(long, default_value = DEFAULT_SETTINGS_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer JSON method calls read line by line from stdin.
    Serve {
        /// Include the encoded bytes in data deliveries.
        #[clap(long, default_value_t = false, action)]
        inline_bytes: bool,
    },
    /// Render one thumbnail to disk and print its path.
    File {
        video: String,
        /// 0 = JPEG, 1 = PNG, 2 = WEBP.
        #[clap(long)]
        format: Option<i64>,
        /// Longest side of the thumbnail, 0 keeps the frame size.
        #[clap(long)]
        max: Option<u32>,
        #[clap(long)]
        quality: Option<i32>,
        /// Output file or directory.
        #[clap(long)]
        path: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let settings = load_app_settings_from(&args.config)?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let (tx, rx) = unbounded_channel();
    let frames = Arc::new(FfmpegFrameSource::new(&settings.ffmpeg));
    let service = ThumbnailService::new(frames, &settings.thumbnails, tx);

    match args.command {
        Command::Serve { inline_bytes } => {
            info!("Serving thumbnail requests on stdin");
            let input = BufReader::new(tokio::io::stdin());
            run_bridge(&service, rx, input, tokio::io::stdout(), inline_bytes).await?;
        }
        Command::File {
            video,
            format,
            max,
            quality,
            path,
        } => {
            let request = one_shot_request(&settings, video, format, max, quality, path);
            let written = service.render_file(&request).await?;
            println!("{written}");
        }
    }

    Ok(())
}

fn one_shot_request(
    settings: &AppSettings,
    video: String,
    format: Option<i64>,
    max: Option<u32>,
    quality: Option<i32>,
    path: Option<String>,
) -> ThumbnailRequest {
    let defaults = &settings.thumbnails;
    ThumbnailRequest::builder()
        .source(video)
        .format(format.map_or(defaults.default_format, ImageFormat::from_code))
        .max_dimension(max.unwrap_or(defaults.default_max_dimension))
        .quality(quality.unwrap_or(defaults.default_quality))
        .maybe_destination(path)
        .build()
}
