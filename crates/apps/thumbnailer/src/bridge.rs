use color_eyre::Result;
use common_services::api::thumbnail::error::EXCEPTION_CODE;
use common_services::api::thumbnail::handlers::handle_method_call;
use common_services::api::thumbnail::service::ThumbnailService;
use common_types::{Delivery, DeliveryPayload, MethodCall, MethodResponse, OutputMode};
use serde::Serialize;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;
use tracing::{debug, info};

const IDLE_POLL: Duration = Duration::from_millis(50);

/// A delivery as written to the bridge output.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryLine {
    Ok {
        channel: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        length: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        bytes: Option<Vec<u8>>,
    },
    Error {
        channel: String,
        code: String,
        message: String,
    },
}

impl DeliveryLine {
    /// Data deliveries only carry their bytes when `inline_bytes` is set.
    #[must_use]
    pub fn from_delivery(delivery: Delivery, inline_bytes: bool) -> Self {
        let channel = delivery.channel;
        match (delivery.payload, delivery.mode) {
            (DeliveryPayload::Ok(bytes), OutputMode::File) => Self::Ok {
                channel,
                length: None,
                path: Some(String::from_utf8_lossy(&bytes).into_owned()),
                bytes: None,
            },
            (DeliveryPayload::Ok(bytes), OutputMode::Data) => Self::Ok {
                channel,
                length: Some(bytes.len()),
                path: None,
                bytes: inline_bytes.then_some(bytes),
            },
            (DeliveryPayload::Failed { code, message }, _) => Self::Error {
                channel,
                code,
                message,
            },
        }
    }
}

/// Serves method calls read line by line from `input`.
///
/// Every call is answered with one JSON line on `output`; deliveries are written as they arrive.
/// Once `input` is exhausted, waits for the request in flight and writes its delivery.
pub async fn run_bridge<R, W>(
    service: &ThumbnailService,
    mut deliveries: UnboundedReceiver<Delivery>,
    input: R,
    mut output: W,
    inline_bytes: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                let response = respond(service, &line);
                write_line(&mut output, &response).await?;
            }
            Some(delivery) = deliveries.recv() => {
                write_line(&mut output, &DeliveryLine::from_delivery(delivery, inline_bytes)).await?;
            }
        }
    }

    info!("Input closed, waiting for the request in flight");
    while service.is_busy() {
        if let Ok(Some(delivery)) = timeout(IDLE_POLL, deliveries.recv()).await {
            write_line(&mut output, &DeliveryLine::from_delivery(delivery, inline_bytes)).await?;
        }
    }
    while let Ok(delivery) = deliveries.try_recv() {
        write_line(&mut output, &DeliveryLine::from_delivery(delivery, inline_bytes)).await?;
    }

    Ok(())
}

fn respond(service: &ThumbnailService, line: &str) -> MethodResponse {
    match serde_json::from_str::<MethodCall>(line) {
        Ok(call) => {
            debug!("Received {} call", call.method);
            handle_method_call(service, call)
        }
        Err(e) => MethodResponse::error(EXCEPTION_CODE, format!("malformed call: {e}")),
    }
}

async fn write_line<W, T>(output: &mut W, value: &T) -> Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');
    output.write_all(&line).await?;
    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_state::{FfmpegSettings, ThumbnailSettings};
    use color_eyre::eyre::eyre;
    use generate_thumbnails::FfmpegFrameSource;
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tokio::sync::mpsc::unbounded_channel;

    #[rstest]
    #[case(false, json!({"status": "ok", "channel": "video_thumbnail/data//v/a.mp4", "length": 3}))]
    #[case(true, json!({"status": "ok", "channel": "video_thumbnail/data//v/a.mp4", "length": 3, "bytes": [1, 2, 3]}))]
    fn data_delivery_lines(#[case] inline_bytes: bool, #[case] expected: Value) -> Result<()> {
        let delivery = Delivery::ok(OutputMode::Data, "/v/a.mp4", vec![1, 2, 3]);

        let line = serde_json::to_value(DeliveryLine::from_delivery(delivery, inline_bytes))?;

        assert_eq!(line, expected);
        Ok(())
    }

    #[test]
    fn file_delivery_line_carries_the_path() -> Result<()> {
        let delivery = Delivery::ok(OutputMode::File, "/v/a.mp4", b"/v/a.jpg".to_vec());

        let line = serde_json::to_value(DeliveryLine::from_delivery(delivery, true))?;

        assert_eq!(
            line,
            json!({"status": "ok", "channel": "video_thumbnail/file//v/a.mp4", "path": "/v/a.jpg"})
        );
        Ok(())
    }

    #[tokio::test]
    async fn bridge_answers_calls_and_flushes_deliveries() -> Result<()> {
        // ARRANGE
        let frames = FfmpegFrameSource::new(&FfmpegSettings {
            binary: "/nonexistent/bin/ffmpeg".into(),
            log_level: "error".to_owned(),
        });
        let (tx, rx) = unbounded_channel();
        let service = ThumbnailService::new(Arc::new(frames), &ThumbnailSettings::default(), tx);
        let input = concat!(
            r#"{"method": "gif", "arguments": {}}"#,
            "\n\n",
            "not json\n",
            r#"{"method": "data", "arguments": {"video": "/v/a.mp4", "format": 0, "maxhow": 32, "quality": 50}}"#,
            "\n",
        );
        let mut output = Vec::new();

        // ACT
        run_bridge(&service, rx, input.as_bytes(), &mut output, false).await?;

        // ASSERT
        let lines = String::from_utf8(output)?
            .lines()
            .map(serde_json::from_str::<Value>)
            .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(lines.len(), 4);
        assert!(lines.contains(&json!({"status": "success", "result": true})));
        assert!(lines.contains(&json!({"status": "not_implemented"})));
        assert!(lines.iter().any(|l| l["status"] == "error" && l["code"] == "exception"));
        let delivery = lines
            .iter()
            .find(|l| l["channel"] == "video_thumbnail/data//v/a.mp4")
            .ok_or_else(|| eyre!("no delivery was written"))?;
        assert_eq!(delivery["status"], "error");
        assert_eq!(delivery["code"], "source_unreadable");
        assert!(!service.is_busy());
        Ok(())
    }
}
