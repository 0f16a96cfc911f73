#![allow(dead_code)]

use app_state::ThumbnailSettings;
use async_trait::async_trait;
use common_services::api::thumbnail::service::ThumbnailService;
use common_types::Delivery;
use generate_thumbnails::{FrameSource, RawFrame, SourceLocator, ThumbnailError};
use image::{Rgba, RgbaImage};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(10);

/// Returns a solid frame, but only once a permit has been added to `release`.
pub struct GatedFrames {
    pub width: u32,
    pub height: u32,
    pub release: Arc<Semaphore>,
}

impl GatedFrames {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            release: Arc::new(Semaphore::new(0)),
        }
    }

    pub fn open(width: u32, height: u32) -> Self {
        let frames = Self::new(width, height);
        frames.release.add_permits(Semaphore::MAX_PERMITS);
        frames
    }
}

#[async_trait]
impl FrameSource for GatedFrames {
    async fn extract(&self, locator: &SourceLocator) -> Result<RawFrame, ThumbnailError> {
        let _permit = self
            .release
            .acquire()
            .await
            .map_err(|_| ThumbnailError::SourceUnreadable {
                locator: locator.to_string(),
                reason: "closed".to_owned(),
            })?;
        Ok(RgbaImage::from_pixel(self.width, self.height, Rgba([40, 80, 120, 255])).into())
    }
}

/// Fails every extraction like a corrupt container would.
pub struct CorruptFrames;

#[async_trait]
impl FrameSource for CorruptFrames {
    async fn extract(&self, locator: &SourceLocator) -> Result<RawFrame, ThumbnailError> {
        Err(ThumbnailError::SourceUnreadable {
            locator: locator.to_string(),
            reason: "moov atom not found".to_owned(),
        })
    }
}

/// Panics inside extraction, as a misbehaving decoder would.
pub struct PanickingFrames;

#[async_trait]
impl FrameSource for PanickingFrames {
    async fn extract(&self, _locator: &SourceLocator) -> Result<RawFrame, ThumbnailError> {
        panic!("decoder crashed")
    }
}

pub fn service_with(
    frames: impl FrameSource + 'static,
) -> (ThumbnailService, UnboundedReceiver<Delivery>) {
    let (tx, rx) = unbounded_channel();
    let service = ThumbnailService::new(Arc::new(frames), &ThumbnailSettings::default(), tx);
    (service, rx)
}

pub async fn next_delivery(rx: &mut UnboundedReceiver<Delivery>) -> Delivery {
    timeout(WAIT, rx.recv())
        .await
        .expect("timed out waiting for a delivery")
        .expect("delivery channel closed")
}

pub async fn wait_until_idle(service: &ThumbnailService) {
    timeout(WAIT, async {
        while service.is_busy() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("gate was never released");
}
