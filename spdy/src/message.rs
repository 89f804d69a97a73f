use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode, Version};

use crate::headers::Headers;

/// Body of an HTTP message head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// The body follows as separate content chunks.
    Streamed,
    /// The whole message is buffered, trailers included.
    Full { content: Bytes, trailers: Headers },
}

impl Body {
    pub fn full(content: impl Into<Bytes>) -> Self {
        Self::Full {
            content: content.into(),
            trailers: Headers::new(),
        }
    }

    pub fn empty() -> Self {
        Self::full(Bytes::new())
    }

    /// A message is complete on its own when it is fully buffered and has
    /// neither content nor trailers left to send.
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Streamed => false,
            Self::Full { content, trailers } => content.is_empty() && trailers.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Request-target, forwarded verbatim.
    pub uri: String,
    pub version: Version,
    pub headers: Headers,
    pub body: Body,
}

impl HttpRequest {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            version: Version::HTTP_11,
            headers: Headers::new(),
            body: Body::Streamed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub version: Version,
    pub headers: Headers,
    pub body: Body,
}

impl HttpResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            version: Version::HTTP_11,
            headers: Headers::new(),
            body: Body::Streamed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpContent {
    pub content: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastHttpContent {
    pub content: Bytes,
    pub trailers: Headers,
}

/// Everything that can travel down one connection toward the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpObject {
    Request(HttpRequest),
    Response(HttpResponse),
    Content(HttpContent),
    LastContent(LastHttpContent),
}

impl HttpObject {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Request(_) => "HttpRequest",
            Self::Response(_) => "HttpResponse",
            Self::Content(_) => "HttpContent",
            Self::LastContent(_) => "LastHttpContent",
        }
    }
}

impl From<HttpRequest> for HttpObject {
    fn from(value: HttpRequest) -> Self {
        Self::Request(value)
    }
}

impl From<HttpResponse> for HttpObject {
    fn from(value: HttpResponse) -> Self {
        Self::Response(value)
    }
}

impl From<HttpContent> for HttpObject {
    fn from(value: HttpContent) -> Self {
        Self::Content(value)
    }
}

impl From<LastHttpContent> for HttpObject {
    fn from(value: LastHttpContent) -> Self {
        Self::LastContent(value)
    }
}

fn headers_from_map(map: &HeaderMap) -> Headers {
    map.iter()
        .map(|(k, v)| {
            (
                k.as_str().to_string(),
                String::from_utf8_lossy(v.as_bytes()).into_owned(),
            )
        })
        .collect()
}

impl From<http::Request<Body>> for HttpRequest {
    fn from(value: http::Request<Body>) -> Self {
        let (parts, body) = value.into_parts();

        Self {
            method: parts.method,
            uri: parts.uri.to_string(),
            version: parts.version,
            headers: headers_from_map(&parts.headers),
            body,
        }
    }
}

impl From<http::Response<Body>> for HttpResponse {
    fn from(value: http::Response<Body>) -> Self {
        let (parts, body) = value.into_parts();

        Self {
            status: parts.status,
            version: parts.version,
            headers: headers_from_map(&parts.headers),
            body,
        }
    }
}
