//! Runs thumbnail requests in the background and delivers their results on per-source channels.

use crate::gate::{PendingOperation, RequestGate};
use app_state::{ResizeFilter, ThumbnailSettings};
use common_types::{Delivery, OutputMode, ThumbnailRequest};
use generate_thumbnails::{
    EncodedImage, FrameSource, ThumbnailError, generate_thumbnail_data, generate_thumbnail_file,
    resolve_output_path, to_bytes,
};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

pub struct ThumbnailService {
    frames: Arc<dyn FrameSource>,
    resize_filter: ResizeFilter,
    gate: RequestGate,
    deliveries: UnboundedSender<Delivery>,
}

impl ThumbnailService {
    /// Creates a service that sends every result to `deliveries`.
    pub fn new(
        frames: Arc<dyn FrameSource>,
        settings: &ThumbnailSettings,
        deliveries: UnboundedSender<Delivery>,
    ) -> Self {
        Self {
            frames,
            resize_filter: settings.resize_filter,
            gate: RequestGate::new(),
            deliveries,
        }
    }

    /// Schedules generation of an in-memory thumbnail.
    ///
    /// Returns as soon as the request is admitted. The encoded bytes, or a failure, arrive
    /// later on `video_thumbnail/data/<source>`.
    pub fn produce_bytes(&self, request: ThumbnailRequest) -> Result<(), ThumbnailError> {
        let pending = self.admit()?;
        self.dispatch(pending, OutputMode::Data, request)
    }

    /// Schedules generation of a thumbnail file. The final path is delivered on
    /// `video_thumbnail/file/<source>`.
    pub fn produce_file(&self, request: ThumbnailRequest) -> Result<(), ThumbnailError> {
        let pending = self.admit()?;
        self.dispatch(pending, OutputMode::File, request)
    }

    /// Takes the gate, or fails with [`ThumbnailError::AlreadyActive`] while a request is in
    /// flight.
    pub fn admit(&self) -> Result<PendingOperation, ThumbnailError> {
        self.gate
            .try_admit()
            .inspect_err(|_| warn!("Rejected request: another request is in progress"))
    }

    /// Spawns the pipeline for an admitted `request` on the current tokio runtime.
    ///
    /// A file request whose output path cannot be derived fails here with
    /// [`ThumbnailError::BadArgument`]; `pending` is dropped and the gate released.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn dispatch(
        &self,
        mut pending: PendingOperation,
        mode: OutputMode,
        request: ThumbnailRequest,
    ) -> Result<(), ThumbnailError> {
        if mode == OutputMode::File {
            resolve_output_path(request.source(), request.destination(), request.format())?;
        }
        pending.bind(request.source());
        info!("Accepted {} request for {}", mode.as_str(), request.source());

        let frames = Arc::clone(&self.frames);
        let deliveries = self.deliveries.clone();
        let resize_filter = self.resize_filter;
        let source = request.source().to_owned();

        tokio::spawn(async move {
            let outcome = tokio::spawn(async move {
                render(frames.as_ref(), mode, &request, resize_filter).await
            })
            .await
            .unwrap_or_else(|e| {
                Err(ThumbnailError::EncodingFailed(format!(
                    "thumbnail task failed: {e}"
                )))
            });

            let delivery = match outcome {
                Ok(payload) => {
                    info!("Delivering {} bytes for {source}", payload.len());
                    Delivery::ok(mode, &source, payload)
                }
                Err(e) => {
                    warn!("Thumbnail for {source} failed: {e}");
                    Delivery::failed(mode, &source, e.code(), e.to_string())
                }
            };

            if deliveries.send(delivery).is_err() {
                warn!("Delivery channel closed, dropping result for {source}");
            }
            debug!("Request for {} finished", pending.source().unwrap_or_default());
            drop(pending);
        });

        Ok(())
    }

    /// Runs the data pipeline inline, bypassing the gate.
    pub async fn render_bytes(
        &self,
        request: &ThumbnailRequest,
    ) -> Result<EncodedImage, ThumbnailError> {
        generate_thumbnail_data(self.frames.as_ref(), request, self.resize_filter).await
    }

    /// Runs the file pipeline inline, bypassing the gate. Returns the final path.
    pub async fn render_file(&self, request: &ThumbnailRequest) -> Result<String, ThumbnailError> {
        generate_thumbnail_file(self.frames.as_ref(), request, self.resize_filter).await
    }

    /// Whether a request is currently in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }
}

async fn render(
    frames: &dyn FrameSource,
    mode: OutputMode,
    request: &ThumbnailRequest,
    resize_filter: ResizeFilter,
) -> Result<Vec<u8>, ThumbnailError> {
    match mode {
        OutputMode::Data => generate_thumbnail_data(frames, request, resize_filter)
            .await
            .map(to_bytes),
        OutputMode::File => generate_thumbnail_file(frames, request, resize_filter)
            .await
            .map(String::into_bytes),
    }
}
