use crate::{FrameSource, RawFrame, SourceLocator, ThumbnailError};
use app_state::FfmpegSettings;
use async_trait::async_trait;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Extracts frames by running the `ffmpeg` command-line tool.
///
/// `ffmpeg` is asked for the first decodable video frame, piped to stdout as a PNG,
/// which is then decoded into RGBA pixels.
#[derive(Debug, Clone)]
pub struct FfmpegFrameSource {
    binary: PathBuf,
    log_level: String,
}

impl FfmpegFrameSource {
    #[must_use]
    pub fn new(settings: &FfmpegSettings) -> Self {
        Self {
            binary: settings.binary.clone(),
            log_level: settings.log_level.clone(),
        }
    }

    fn build_args(&self, locator: &SourceLocator) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-hide_banner".into(),
            "-nostdin".into(),
            "-loglevel".into(),
            self.log_level.clone().into(),
        ];

        let input: OsString = match locator {
            SourceLocator::Local(path) => path.as_os_str().to_owned(),
            SourceLocator::Remote { url, headers } => {
                if !headers.is_empty() {
                    let header_block: String = headers
                        .iter()
                        .map(|(name, value)| format!("{name}: {value}\r\n"))
                        .collect();
                    args.extend(["-headers".into(), header_block.into()]);
                }
                url.into()
            }
        };

        args.extend([
            "-i".into(),
            input,
            "-map".into(),
            "0:v:0".into(),
            "-frames:v".into(),
            "1".into(),
            "-f".into(),
            "image2pipe".into(),
            "-c:v".into(),
            "png".into(),
            "pipe:1".into(),
        ]);
        args
    }
}

#[async_trait]
impl FrameSource for FfmpegFrameSource {
    async fn extract(&self, locator: &SourceLocator) -> Result<RawFrame, ThumbnailError> {
        debug!("Extracting frame from {locator}");
        let args = self.build_args(locator);
        let png = run_ffmpeg(self.binary.as_os_str(), &args)
            .await
            .map_err(|reason| ThumbnailError::unreadable(locator, reason))?;

        if png.is_empty() {
            return Err(ThumbnailError::unreadable(locator, "no frame was produced"));
        }

        let frame = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
            .map_err(|e| ThumbnailError::unreadable(locator, format!("undecodable frame: {e}")))?
            .into_rgba8();

        debug!(
            "Extracted {}x{} frame from {locator}",
            frame.width(),
            frame.height()
        );
        Ok(frame.into())
    }
}

/// Runs ffmpeg and returns its stdout. The child is killed if this future is dropped.
async fn run_ffmpeg<S: AsRef<OsStr>>(binary: &OsStr, args: &[S]) -> Result<Vec<u8>, String> {
    let output = Command::new(binary)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| format!("failed to run ffmpeg: {e}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("ffmpeg failed: {}", stderr.trim()));
    }
    Ok(output.stdout)
}
