use std::{io, path, str::FromStr};

use bytes::Bytes;
use http::{Method, StatusCode, Version};
use serde::Deserialize;
use spdy::{
    Body, EncoderError, Headers, HttpContent, HttpObject, HttpRequest, HttpResponse,
    LastHttpContent,
};
use thiserror::Error;
use tokio::fs;
use tracing::warn;

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("Bad Yaml: {0:?}")]
    BadYaml(serde_yaml::Error),
    #[error("Error while reading transcript: '{0}'")]
    ReadError(io::Error),
    #[error("{0}")]
    Unsupported(EncoderError),
    #[error("Entry of kind `{kind}` is missing `{field}`")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
    #[error("Bad method: '{0}'")]
    BadMethod(String),
    #[error("Bad status: {0}")]
    BadStatus(u16),
    #[error("Bad HTTP version: '{0}'")]
    BadVersion(String),
}

/// One untyped record of a transcript. Nothing is checked until it is
/// lifted into an [`HttpObject`].
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    pub kind: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub trailers: Vec<(String, String)>,
    #[serde(default)]
    pub full: bool,
}

fn parse_version(version: Option<&str>) -> Result<Version, TranscriptError> {
    match version {
        None | Some("HTTP/1.1") => Ok(Version::HTTP_11),
        Some("HTTP/1.0") => Ok(Version::HTTP_10),
        Some("HTTP/0.9") => Ok(Version::HTTP_09),
        Some(other) => Err(TranscriptError::BadVersion(other.to_string())),
    }
}

impl Entry {
    fn body(&mut self, kind: &'static str) -> Body {
        if self.full {
            return Body::Full {
                content: Bytes::from(self.body.take().unwrap_or_default()),
                trailers: Headers::from_iter(self.trailers.drain(..)),
            };
        }

        if self.body.is_some() || !self.trailers.is_empty() {
            warn!("Streamed {kind} entry carries a body or trailers, ignoring them");
        }

        Body::Streamed
    }

    fn content(&mut self) -> Bytes {
        Bytes::from(self.body.take().unwrap_or_default())
    }
}

impl TryFrom<Entry> for HttpObject {
    type Error = TranscriptError;

    fn try_from(mut value: Entry) -> Result<Self, Self::Error> {
        let kind = std::mem::take(&mut value.kind);
        match kind.as_str() {
            "request" => {
                let method = value.method.as_deref().ok_or(TranscriptError::MissingField {
                    kind: "request",
                    field: "method",
                })?;
                let method = Method::from_str(method)
                    .map_err(|_| TranscriptError::BadMethod(method.to_string()))?;
                let uri = value.uri.take().ok_or(TranscriptError::MissingField {
                    kind: "request",
                    field: "uri",
                })?;

                Ok(HttpRequest {
                    method,
                    uri,
                    version: parse_version(value.version.as_deref())?,
                    headers: Headers::from_iter(value.headers.drain(..)),
                    body: value.body("request"),
                }
                .into())
            }
            "response" => {
                let code = value.status.ok_or(TranscriptError::MissingField {
                    kind: "response",
                    field: "status",
                })?;
                let status =
                    StatusCode::from_u16(code).map_err(|_| TranscriptError::BadStatus(code))?;

                Ok(HttpResponse {
                    status,
                    version: parse_version(value.version.as_deref())?,
                    headers: Headers::from_iter(value.headers.drain(..)),
                    body: value.body("response"),
                }
                .into())
            }
            "content" => Ok(HttpContent {
                content: value.content(),
            }
            .into()),
            "last-content" => Ok(LastHttpContent {
                content: value.content(),
                trailers: Headers::from_iter(value.trailers.drain(..)),
            }
            .into()),
            other => Err(TranscriptError::Unsupported(
                EncoderError::UnsupportedInput(other.to_string()),
            )),
        }
    }
}

pub async fn read_transcript_from_file(path: &path::Path) -> Result<String, TranscriptError> {
    fs::read(path)
        .await
        .map(|s| String::from_utf8_lossy(&s).to_string())
        .map_err(TranscriptError::ReadError)
}

pub fn parse_transcript(transcript: &str) -> Result<Vec<Entry>, TranscriptError> {
    serde_yaml::from_str(transcript).map_err(TranscriptError::BadYaml)
}
