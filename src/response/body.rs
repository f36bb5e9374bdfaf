use futures_util::{StreamExt, stream};

use crate::transport::BodyStream;

/// Ends `body` after `limit` bytes, truncating the chunk that crosses it.
/// Once the limit is reached the inner stream is dropped without being
/// polled again, so an open-ended body cannot stall the reader.
#[must_use]
pub fn cap_body(body: BodyStream, limit: u64) -> BodyStream {
    stream::unfold((body, limit), |(mut body, remaining)| async move {
        if remaining == 0 {
            return None;
        }
        let chunk = body.next().await?;
        let (item, left) = match chunk {
            Ok(mut bytes) => {
                let len = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
                if len > remaining {
                    bytes.truncate(usize::try_from(remaining).unwrap_or(usize::MAX));
                    (Ok(bytes), 0)
                } else {
                    (Ok(bytes), remaining.saturating_sub(len))
                }
            }
            Err(err) => (Err(err), remaining),
        };
        Some((item, (body, left)))
    })
    .boxed()
}
