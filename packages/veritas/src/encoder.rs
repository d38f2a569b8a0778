//! Attachment encoding for inline request parts.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::future::try_join_all;
use std::io;
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::input::{Attachment, AttachmentSource};

/// A base64 payload ready to be sent as an inline part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPart {
    pub mime_type: String,

    /// Standard base64, padded, no `data:` header
    pub data: String,
}

/// Drop a leading `data:<mime>;base64,` header.
///
/// Input without the header is returned unchanged, so applying this twice is
/// the same as applying it once.
pub fn strip_data_url_prefix(value: &str) -> &str {
    if !value.starts_with("data:") {
        return value;
    }

    match value.split_once(',') {
        Some((_, payload)) => payload,
        None => value,
    }
}

/// Payload of a data URL, which must be base64. Bare base64 passes through.
fn data_url_payload(value: &str) -> io::Result<&str> {
    let Some(rest) = value.strip_prefix("data:") else {
        return Ok(value);
    };

    let (header, payload) = rest.split_once(',').ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "data URL has no payload")
    })?;

    if !header.split(';').any(|param| param.eq_ignore_ascii_case("base64")) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "data URL payload is not base64",
        ));
    }

    Ok(payload)
}

/// Encode one attachment.
pub async fn encode(attachment: &Attachment) -> Result<EncodedPart> {
    let data = match &attachment.source {
        AttachmentSource::Bytes(bytes) => STANDARD.encode(bytes),
        AttachmentSource::Path(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| AnalysisError::Encoding {
                    name: attachment.display_name.clone(),
                    source,
                })?;
            STANDARD.encode(bytes)
        }
        AttachmentSource::DataUrl(url) => data_url_payload(url)
            .map_err(|source| AnalysisError::Encoding {
                name: attachment.display_name.clone(),
                source,
            })?
            .to_string(),
    };

    debug!(
        name = %attachment.display_name,
        mime_type = %attachment.mime_type,
        encoded_len = data.len(),
        "Encoded attachment"
    );

    Ok(EncodedPart {
        mime_type: attachment.mime_type.clone(),
        data,
    })
}

/// Encode all attachments concurrently. Output order matches input order.
pub async fn encode_all(files: &[Attachment]) -> Result<Vec<EncodedPart>> {
    try_join_all(files.iter().map(encode)).await
}
