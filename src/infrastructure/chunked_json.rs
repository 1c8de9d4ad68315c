// Chunked JSON streaming utilities
use crate::infrastructure::http_response::brotli_compress;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;
use serde::Serialize;
use std::future::Future;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Create a chunked streaming response, one length-prefixed JSON frame per item
pub async fn chunked_json_stream<S, T>(
    stream: S,
    compress: bool,
) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = T> + Send + 'static,
    T: Serialize + Send + Sync + 'static,
{
    let byte_stream = stream.then(move |item| async move { serialize_chunk(&item, compress).await });

    let body = Body::from_stream(byte_stream);

    // Chunks are compressed individually, so no Content-Encoding on the response
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::TRANSFER_ENCODING, "chunked");

    response
        .body(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize a single item to a frame: 4-byte big-endian length, then the payload
pub async fn serialize_chunk<T: Serialize>(item: &T, compress: bool) -> Result<Bytes, std::io::Error> {
    let buffer = serde_json::to_vec(item).map_err(std::io::Error::other)?;

    let payload = if compress {
        brotli_compress(buffer).await?
    } else {
        buffer
    };

    let length = payload.len() as u32;
    let mut chunk = BytesMut::with_capacity(4 + payload.len());
    chunk.put_u32(length);
    chunk.put_slice(&payload);

    Ok(chunk.freeze())
}

/// Stream the current value of `rx`, then every change, until `closed` resolves
pub async fn stream_from_watch<T, F>(
    rx: watch::Receiver<T>,
    closed: F,
    compress: bool,
) -> impl IntoResponse
where
    T: Serialize + Clone + Send + Sync + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let stream = WatchStream::new(rx).take_until(closed);

    match chunked_json_stream(stream, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_compression::tokio::bufread::BrotliDecoder;
    use tokio::io::AsyncReadExt;

    fn split_frame(chunk: &[u8]) -> (u32, &[u8]) {
        let length = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        (length, &chunk[4..])
    }

    #[tokio::test]
    async fn test_plain_chunk_is_length_prefixed() {
        let chunk = serialize_chunk(&serde_json::json!({ "live": false }), false)
            .await
            .unwrap();

        let (length, payload) = split_frame(&chunk);
        assert_eq!(length as usize, payload.len());
        assert_eq!(payload, br#"{"live":false}"#);
    }

    #[tokio::test]
    async fn test_compressed_chunk_round_trips() {
        let values: Vec<u32> = (0..200).collect();
        let chunk = serialize_chunk(&values, true).await.unwrap();

        let (length, payload) = split_frame(&chunk);
        assert_eq!(length as usize, payload.len());

        let mut decoder = BrotliDecoder::new(std::io::Cursor::new(payload.to_vec()));
        let mut json = Vec::new();
        decoder.read_to_end(&mut json).await.unwrap();
        let decoded: Vec<u32> = serde_json::from_slice(&json).unwrap();
        assert_eq!(decoded, values);
    }

    #[tokio::test]
    async fn test_watch_stream_ends_when_closed() {
        let (tx, rx) = watch::channel(1u32);
        let (close_tx, close_rx) = tokio::sync::oneshot::channel::<()>();
        let closed = async move {
            let _ = close_rx.await;
        };

        let response = stream_from_watch(rx, closed, false).await.into_response();
        let mut frames = response.into_body().into_data_stream();

        let first = frames.next().await.unwrap().unwrap();
        assert_eq!(split_frame(&first).1, b"1");

        tx.send(2).unwrap();
        let second = frames.next().await.unwrap().unwrap();
        assert_eq!(split_frame(&second).1, b"2");

        close_tx.send(()).unwrap();
        assert!(frames.next().await.is_none());
    }
}
