use bytes::Bytes;
use http::Version;
use tracing::{debug, trace, warn};

use crate::{
    error::{EncoderError, EncoderResult, HeaderProblem},
    frames::{Data, HeadersFrame, SpdyFrame, SynReply, SynStream, MAX_STREAM_ID},
    headers::{names, Headers},
    message::{Body, HttpObject, HttpRequest, HttpResponse},
    stream::StreamState,
    version::SpdyVersion,
};

const DEFAULT_SCHEME: &str = "https";
const LOWEST_PRIORITY: u8 = 7;

/// Annotation headers read off a message head before any of them is removed.
struct Annotations {
    stream_id: u32,
    associated_to_stream_id: u32,
    priority: u8,
    url: Option<String>,
    scheme: Option<String>,
}

fn int_header(headers: &Headers, name: &'static str, max: u32) -> EncoderResult<Option<u32>> {
    let Some(value) = headers.get(name) else {
        return Ok(None);
    };

    let parsed: i64 = value
        .trim()
        .parse()
        .map_err(|_| EncoderError::MalformedInput {
            header: name,
            problem: HeaderProblem::NotAnInteger(value.to_string()),
        })?;

    u32::try_from(parsed)
        .ok()
        .filter(|v| *v <= max)
        .map(Some)
        .ok_or_else(|| EncoderError::MalformedInput {
            header: name,
            problem: HeaderProblem::OutOfRange(value.to_string()),
        })
}

impl Annotations {
    fn read(headers: &Headers) -> EncoderResult<Self> {
        let stream_id = int_header(headers, names::STREAM_ID, MAX_STREAM_ID)?
            .ok_or_else(|| EncoderError::missing(names::STREAM_ID))?;
        let associated_to_stream_id =
            int_header(headers, names::ASSOCIATED_TO_STREAM_ID, MAX_STREAM_ID)?.unwrap_or(0);
        // Only values that fit on the wire are rejected, 8..=255 go through.
        let priority = int_header(headers, names::PRIORITY, u8::MAX as u32)?.unwrap_or(0) as u8;
        if priority > LOWEST_PRIORITY {
            warn!("Stream {stream_id} has priority {priority} outside of 0-{LOWEST_PRIORITY}");
        }

        Ok(Self {
            stream_id,
            associated_to_stream_id,
            priority,
            url: headers.get(names::URL).map(str::to_string),
            scheme: headers.get(names::SCHEME).map(str::to_string),
        })
    }
}

fn strip_headers(headers: &mut Headers) {
    for name in names::ANNOTATIONS.iter().chain(names::HOP_BY_HOP.iter()) {
        headers.remove(name);
    }
}

fn version_string(version: Version) -> String {
    // Debug output of `http::Version` is the protocol text, e.g. "HTTP/1.1".
    format!("{version:?}")
}

/// Translates HTTP requests, responses and their content into SPDY frames.
///
/// Message heads must carry the `X-SPDY-*` annotations from
/// [`names`]: a stream id always, an associated stream id and a URL for
/// pushed resources. Stream-id parity and monotonicity are the caller's job.
///
/// Content is attributed to the most recently translated message head, so
/// one message has to be fully translated before the next one starts. One
/// encoder belongs to one connection; `translate` borrows it mutably which
/// rules out concurrent use.
#[derive(Debug)]
pub struct FrameEncoder {
    version: SpdyVersion,
    state: StreamState,
}

impl FrameEncoder {
    pub fn new(version: SpdyVersion) -> Self {
        Self {
            version,
            state: StreamState::Idle,
        }
    }

    pub fn version(&self) -> SpdyVersion {
        self.version
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn current_stream_id(&self) -> Option<u32> {
        self.state.stream_id()
    }

    /// Translate one object into the frames that represent it.
    ///
    /// Annotation and hop-by-hop headers are removed from `msg` in place.
    /// Payloads are shared with `msg`, not copied. On error nothing is
    /// emitted and neither `msg` nor the encoder is modified.
    pub fn translate(&mut self, msg: &mut HttpObject) -> EncoderResult<Vec<SpdyFrame>> {
        let kind = msg.kind_name();
        let mut out = Vec::with_capacity(2);

        match msg {
            HttpObject::Request(request) => {
                let syn_stream = self.create_request_syn_stream(request)?;
                self.emit_head(syn_stream.into(), &request.body, &mut out);
            }
            HttpObject::Response(response)
                if response.headers.contains(names::ASSOCIATED_TO_STREAM_ID) =>
            {
                let syn_stream = self.create_push_syn_stream(response)?;
                self.emit_head(syn_stream.into(), &response.body, &mut out);
            }
            HttpObject::Response(response) => {
                let syn_reply = self.create_syn_reply(response)?;
                self.emit_head(syn_reply.into(), &response.body, &mut out);
            }
            HttpObject::Content(chunk) => match self.state {
                StreamState::Open(stream_id) => {
                    trace!("Data on stream {stream_id}: {} bytes", chunk.content.len());
                    out.push(Data::new(stream_id, chunk.content.clone()).into());
                }
                StreamState::HalfClosedLocal(stream_id) => {
                    trace!("Stream {stream_id} is already complete, dropping content");
                }
                StreamState::Idle => return Err(Self::no_open_stream(kind)),
            },
            HttpObject::LastContent(chunk) => match self.state {
                StreamState::Open(stream_id) => {
                    Self::emit_last_content(stream_id, &chunk.content, &chunk.trailers, &mut out);
                }
                StreamState::HalfClosedLocal(stream_id) => {
                    trace!("Stream {stream_id} is already complete, dropping last content");
                }
                StreamState::Idle => return Err(Self::no_open_stream(kind)),
            },
        }

        Ok(out)
    }

    fn no_open_stream(kind: &str) -> EncoderError {
        EncoderError::UnsupportedInput(format!("{kind} without an open stream"))
    }

    fn emit_head(&mut self, head: SpdyFrame, body: &Body, out: &mut Vec<SpdyFrame>) {
        let stream_id = head.stream_id();
        let last = head.is_last();
        debug!("Encoded {head}");

        out.push(head);
        self.state = StreamState::after_head(stream_id, last);

        // A buffered message that still has content or trailers ends here.
        if let (false, Body::Full { content, trailers }) = (last, body) {
            Self::emit_last_content(stream_id, content, trailers, out);
        }
    }

    /// Ends the body of the current message. The stream stays open: only a
    /// head sent with `last` makes later chunks go nowhere.
    fn emit_last_content(
        stream_id: u32,
        content: &Bytes,
        trailers: &Headers,
        out: &mut Vec<SpdyFrame>,
    ) {
        let mut data = Data::new(stream_id, content.clone());
        data.set_last(true);

        // Trailers go out before the final data frame.
        if !trailers.is_empty() {
            let mut headers_frame = HeadersFrame::new(stream_id);
            headers_frame.headers.extend(trailers.iter());
            trace!("Trailers on stream {stream_id}: {}", headers_frame.headers);
            out.push(headers_frame.into());
        }

        trace!("Last data on stream {stream_id}: {} bytes", data.payload.len());
        out.push(data.into());
    }

    /// At version 3 and above the host moves from the `Host` header into the
    /// `:host` frame header.
    fn take_host(&self, headers: &mut Headers) -> Option<String> {
        if self.version.version() < 3 {
            return None;
        }

        let host = headers.get(names::HOST).map(str::to_string);
        headers.remove(names::HOST);
        if host.is_none() {
            debug!("No host header to move to {}", names::SPDY_HOST);
        }

        host
    }

    fn create_request_syn_stream(&self, request: &mut HttpRequest) -> EncoderResult<SynStream> {
        let annotations = Annotations::read(&request.headers)?;
        let mut frame = SynStream::new(
            annotations.stream_id,
            annotations.associated_to_stream_id,
            annotations.priority,
        );

        frame.headers.set(names::SPDY_METHOD, request.method.as_str());
        frame.headers.set(names::SPDY_PATH, request.uri.as_str());
        frame
            .headers
            .set(names::SPDY_VERSION, version_string(request.version));

        Ok(self.finish_syn_stream(
            frame,
            annotations.scheme,
            &mut request.headers,
            &request.body,
        ))
    }

    fn create_push_syn_stream(&self, response: &mut HttpResponse) -> EncoderResult<SynStream> {
        let annotations = Annotations::read(&response.headers)?;
        let url = annotations
            .url
            .ok_or_else(|| EncoderError::missing(names::URL))?;
        let mut frame = SynStream::new(
            annotations.stream_id,
            annotations.associated_to_stream_id,
            annotations.priority,
        );
        frame.set_unidirectional(true);

        frame
            .headers
            .set(names::SPDY_STATUS, response.status.as_u16().to_string());
        frame.headers.set(names::SPDY_PATH, url);
        frame
            .headers
            .set(names::SPDY_VERSION, version_string(response.version));

        Ok(self.finish_syn_stream(
            frame,
            annotations.scheme,
            &mut response.headers,
            &response.body,
        ))
    }

    fn finish_syn_stream(
        &self,
        mut frame: SynStream,
        scheme: Option<String>,
        headers: &mut Headers,
        body: &Body,
    ) -> SynStream {
        strip_headers(headers);

        if let Some(host) = self.take_host(headers) {
            frame.headers.set(names::SPDY_HOST, host);
        }

        frame.headers.set(
            names::SPDY_SCHEME,
            scheme.unwrap_or_else(|| DEFAULT_SCHEME.to_string()),
        );

        frame.headers.extend(headers.iter());
        frame.set_last(body.is_complete());

        frame
    }

    fn create_syn_reply(&self, response: &mut HttpResponse) -> EncoderResult<SynReply> {
        let annotations = Annotations::read(&response.headers)?;
        let mut frame = SynReply::new(annotations.stream_id);

        frame
            .headers
            .set(names::SPDY_STATUS, response.status.as_u16().to_string());
        frame
            .headers
            .set(names::SPDY_VERSION, version_string(response.version));

        strip_headers(&mut response.headers);
        if let Some(host) = self.take_host(&mut response.headers) {
            frame.headers.set(names::SPDY_HOST, host);
        }

        frame.headers.extend(response.headers.iter());
        frame.set_last(response.body.is_complete());

        Ok(frame)
    }
}
