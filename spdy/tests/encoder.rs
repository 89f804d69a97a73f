use bytes::Bytes;
use http::{Method, StatusCode};
use rstest::rstest;
use spdy::{
    error::HeaderProblem,
    frames::{FrameType, SpdyFrame},
    headers::names,
    stream::StreamState,
    Body, EncoderError, FrameEncoder, Headers, HttpContent, HttpObject, HttpRequest, HttpResponse,
    LastHttpContent, SpdyVersion,
};

fn request(stream_id: &str, headers: &[(&str, &str)], body: Body) -> HttpObject {
    let mut req = HttpRequest::new(Method::GET, "/");
    req.headers.add(names::STREAM_ID, stream_id);
    req.headers.extend(headers.iter().copied());
    req.body = body;
    req.into()
}

fn response(stream_id: &str, headers: &[(&str, &str)], body: Body) -> HttpObject {
    let mut res = HttpResponse::new(StatusCode::OK);
    res.headers.add(names::STREAM_ID, stream_id);
    res.headers.extend(headers.iter().copied());
    res.body = body;
    res.into()
}

fn push(stream_id: &str, associated: &str, url: &str) -> HttpObject {
    response(
        stream_id,
        &[
            (names::ASSOCIATED_TO_STREAM_ID, associated),
            (names::URL, url),
            ("Host", "example.com"),
            ("content-type", "text/css"),
        ],
        Body::Streamed,
    )
}

fn content(payload: &'static [u8]) -> HttpObject {
    HttpContent {
        content: Bytes::from_static(payload),
    }
    .into()
}

fn header_pairs(frame: &SpdyFrame) -> Vec<(String, String)> {
    frame
        .headers()
        .expect("frame has headers")
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn get_request_opens_a_complete_stream() {
    let mut encoder = FrameEncoder::new(SpdyVersion::Spdy3);
    let mut msg = request("1", &[("host", "example.com")], Body::empty());

    let frames = encoder.translate(&mut msg).expect("valid request");
    assert_eq!(frames.len(), 1);

    let SpdyFrame::SynStream(syn_stream) = &frames[0] else {
        panic!("expected SYN_STREAM, got {:?}", frames[0]);
    };
    assert_eq!(syn_stream.stream_id, 1);
    assert_eq!(syn_stream.associated_to_stream_id, 0);
    assert_eq!(syn_stream.priority, 0);
    assert!(syn_stream.is_last());
    assert!(!syn_stream.is_unidirectional());
    assert_eq!(
        header_pairs(&frames[0]),
        pairs(&[
            (":method", "GET"),
            (":path", "/"),
            (":version", "HTTP/1.1"),
            (":host", "example.com"),
            (":scheme", "https"),
        ])
    );
    assert_eq!(encoder.state(), StreamState::HalfClosedLocal(1));
}

#[test]
fn streamed_response_then_chunk() {
    let mut encoder = FrameEncoder::new(SpdyVersion::Spdy3);
    let mut msg = response("1", &[("transfer-encoding", "chunked")], Body::Streamed);

    let frames = encoder.translate(&mut msg).expect("valid response");
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].frame_type(), FrameType::SynReply);
    assert_eq!(frames[0].stream_id(), 1);
    assert!(!frames[0].is_last());
    assert_eq!(
        header_pairs(&frames[0]),
        pairs(&[(":status", "200"), (":version", "HTTP/1.1")])
    );

    let payload = Bytes::from(vec![0xab_u8; 4096]);
    let payload_ptr = payload.as_ptr();
    let mut chunk = HttpObject::Content(HttpContent { content: payload });

    let frames = encoder.translate(&mut chunk).expect("stream is open");
    // The frame shares the chunk buffer and outlives the chunk.
    drop(chunk);

    assert_eq!(frames.len(), 1);
    let SpdyFrame::Data(data) = &frames[0] else {
        panic!("expected DATA, got {:?}", frames[0]);
    };
    assert_eq!(data.stream_id, 1);
    assert!(!data.is_last());
    assert_eq!(data.payload.len(), 4096);
    assert_eq!(data.payload.as_ptr(), payload_ptr);
}

#[test]
fn trailers_precede_the_last_data_frame() {
    let mut encoder = FrameEncoder::new(SpdyVersion::Spdy3);
    encoder
        .translate(&mut request("3", &[], Body::Streamed))
        .expect("valid request");

    let mut last = HttpObject::LastContent(LastHttpContent {
        content: Bytes::from_static(b"tail"),
        trailers: Headers::from_iter([("Grpc-Status", "0"), ("grpc-message", "ok")]),
    });
    let frames = encoder.translate(&mut last).expect("stream is open");

    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].frame_type(), FrameType::Headers);
    assert_eq!(frames[0].stream_id(), 3);
    assert_eq!(
        header_pairs(&frames[0]),
        pairs(&[("Grpc-Status", "0"), ("grpc-message", "ok")])
    );
    assert_eq!(frames[1].frame_type(), FrameType::Data);
    assert_eq!(frames[1].stream_id(), 3);
    assert!(frames[1].is_last());
    assert_eq!(encoder.state(), StreamState::Open(3));
}

#[test]
fn last_content_without_trailers_is_one_data_frame() {
    let mut encoder = FrameEncoder::new(SpdyVersion::Spdy3);
    encoder
        .translate(&mut response("1", &[], Body::Streamed))
        .expect("valid response");

    let mut last = HttpObject::LastContent(LastHttpContent {
        content: Bytes::new(),
        trailers: Headers::new(),
    });
    let frames = encoder.translate(&mut last).expect("stream is open");

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].frame_type(), FrameType::Data);
    assert!(frames[0].is_last());
}

#[test]
fn chunks_after_last_content_still_reach_the_stream() {
    let mut encoder = FrameEncoder::new(SpdyVersion::Spdy3);
    encoder
        .translate(&mut response("1", &[], Body::Streamed))
        .expect("valid response");

    let mut last = HttpObject::LastContent(LastHttpContent {
        content: Bytes::from_static(b"a"),
        trailers: Headers::new(),
    });
    assert_eq!(encoder.translate(&mut last).expect("stream is open").len(), 1);

    let frames = encoder
        .translate(&mut content(b"b"))
        .expect("stream is still open");
    assert_eq!(frames.len(), 1);
    let SpdyFrame::Data(data) = &frames[0] else {
        panic!("expected DATA, got {:?}", frames[0]);
    };
    assert_eq!(data.stream_id, 1);
    assert!(!data.is_last());
    assert_eq!(&data.payload[..], b"b");
    assert_eq!(encoder.state(), StreamState::Open(1));
}

#[test]
fn chunks_after_a_buffered_body_still_reach_the_stream() {
    let mut encoder = FrameEncoder::new(SpdyVersion::Spdy3);
    let frames = encoder
        .translate(&mut request("7", &[], Body::full(Bytes::from_static(b"payload"))))
        .expect("valid request");
    assert!(frames[1].is_last());

    let mut last = HttpObject::LastContent(LastHttpContent {
        content: Bytes::from_static(b"more"),
        trailers: Headers::new(),
    });
    let frames = encoder.translate(&mut last).expect("stream is still open");
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].frame_type(), FrameType::Data);
    assert_eq!(frames[0].stream_id(), 7);
    assert!(frames[0].is_last());
}

#[test]
fn complete_response_swallows_later_chunks() {
    let mut encoder = FrameEncoder::new(SpdyVersion::Spdy3);
    let frames = encoder
        .translate(&mut response("5", &[], Body::empty()))
        .expect("valid response");
    assert_eq!(frames.len(), 1);
    assert!(frames[0].is_last());

    let frames = encoder
        .translate(&mut content(b"late"))
        .expect("chunk is consumed");
    assert!(frames.is_empty());

    let mut last = HttpObject::LastContent(LastHttpContent {
        content: Bytes::new(),
        trailers: Headers::from_iter([("x", "y")]),
    });
    assert!(encoder.translate(&mut last).expect("consumed").is_empty());
}

#[test]
fn full_request_with_body_ends_with_data() {
    let mut encoder = FrameEncoder::new(SpdyVersion::Spdy3);
    let mut msg = request("7", &[], Body::full(Bytes::from_static(b"payload")));

    let frames = encoder.translate(&mut msg).expect("valid request");
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].frame_type(), FrameType::SynStream);
    assert!(!frames[0].is_last());
    let SpdyFrame::Data(data) = &frames[1] else {
        panic!("expected DATA, got {:?}", frames[1]);
    };
    assert_eq!(data.stream_id, 7);
    assert!(data.is_last());
    assert_eq!(&data.payload[..], b"payload");
}

#[test]
fn full_response_with_only_trailers() {
    let mut encoder = FrameEncoder::new(SpdyVersion::Spdy3);
    let mut msg = response(
        "9",
        &[],
        Body::Full {
            content: Bytes::new(),
            trailers: Headers::from_iter([("checksum", "abc")]),
        },
    );

    let frames = encoder.translate(&mut msg).expect("valid response");
    let kinds: Vec<_> = frames.iter().map(SpdyFrame::frame_type).collect();
    assert_eq!(
        kinds,
        vec![FrameType::SynReply, FrameType::Headers, FrameType::Data]
    );
    assert!(!frames[0].is_last());
    assert!(frames[2].is_last());
}

#[test]
fn pushed_resource_opens_unidirectional_stream() {
    let mut encoder = FrameEncoder::new(SpdyVersion::Spdy3);
    let mut msg = push("2", "1", "https://example.com/style.css");

    let frames = encoder.translate(&mut msg).expect("valid push");
    assert_eq!(frames.len(), 1);
    let SpdyFrame::SynStream(syn_stream) = &frames[0] else {
        panic!("expected SYN_STREAM, got {:?}", frames[0]);
    };
    assert!(syn_stream.is_unidirectional());
    assert!(!syn_stream.is_last());
    assert_eq!(syn_stream.stream_id, 2);
    assert_eq!(syn_stream.associated_to_stream_id, 1);
    assert_eq!(
        header_pairs(&frames[0]),
        pairs(&[
            (":status", "200"),
            (":path", "https://example.com/style.css"),
            (":version", "HTTP/1.1"),
            (":host", "example.com"),
            (":scheme", "https"),
            ("content-type", "text/css"),
        ])
    );

    let frames = encoder.translate(&mut content(b"body{}")).expect("open");
    assert_eq!(frames[0].stream_id(), 2);
}

#[test]
fn push_without_url_is_malformed() {
    let mut encoder = FrameEncoder::new(SpdyVersion::Spdy3);
    let mut msg = response(
        "2",
        &[(names::ASSOCIATED_TO_STREAM_ID, "1")],
        Body::Streamed,
    );
    let before = msg.clone();

    let err = encoder.translate(&mut msg).expect_err("url is required");
    assert_eq!(
        err,
        EncoderError::MalformedInput {
            header: names::URL,
            problem: HeaderProblem::Missing,
        }
    );
    assert_eq!(msg, before);
}

#[rstest]
#[case::request(request(
    "1",
    &[("CONNECTION", "keep-alive"), ("keep-alive", "timeout=5"), ("Proxy-Connection", "close"), ("Transfer-Encoding", "chunked"), ("accept", "*/*")],
    Body::Streamed
))]
#[case::reply(response(
    "1",
    &[("connection", "close"), ("Keep-Alive", "1"), ("proxy-connection", "x"), ("transfer-encoding", "chunked"), ("accept", "*/*")],
    Body::Streamed
))]
#[case::push({
    let mut msg = push("2", "1", "/a.js");
    if let HttpObject::Response(res) = &mut msg {
        res.headers.add("Connection", "close");
        res.headers.add("TRANSFER-ENCODING", "chunked");
        res.headers.add(names::PRIORITY, "3");
        res.headers.add(names::SCHEME, "http");
    }
    msg
})]
fn hop_by_hop_and_annotations_are_never_forwarded(#[case] mut msg: HttpObject) {
    let mut encoder = FrameEncoder::new(SpdyVersion::Spdy3);
    let frames = encoder.translate(&mut msg).expect("valid message");

    let forbidden = names::HOP_BY_HOP.iter().chain(names::ANNOTATIONS.iter());
    for name in forbidden {
        for frame in &frames {
            let headers = frame.headers().expect("head frame");
            assert!(!headers.contains(name), "{name} forwarded in {frame}");
        }
    }

    // Stripping happens on the input as well.
    let input_headers = match &msg {
        HttpObject::Request(req) => &req.headers,
        HttpObject::Response(res) => &res.headers,
        _ => unreachable!(),
    };
    assert!(!input_headers.contains(names::STREAM_ID));
    assert!(!input_headers.contains("connection"));
}

#[rstest]
#[case::request_spdy2(SpdyVersion::Spdy2, request("1", &[("Host", "example.com")], Body::empty()), false)]
#[case::request_spdy3(SpdyVersion::Spdy3, request("1", &[("Host", "example.com")], Body::empty()), true)]
#[case::request_spdy31(SpdyVersion::Spdy31, request("1", &[("Host", "example.com")], Body::empty()), true)]
#[case::reply_spdy2(SpdyVersion::Spdy2, response("1", &[("Host", "example.com")], Body::Streamed), false)]
#[case::reply_spdy3(SpdyVersion::Spdy3, response("1", &[("Host", "example.com")], Body::Streamed), true)]
#[case::push_spdy2(SpdyVersion::Spdy2, push("2", "1", "/a.css"), false)]
#[case::push_spdy31(SpdyVersion::Spdy31, push("2", "1", "/a.css"), true)]
fn host_header_depends_on_version(
    #[case] version: SpdyVersion,
    #[case] mut msg: HttpObject,
    #[case] moved: bool,
) {
    let mut encoder = FrameEncoder::new(version);

    let frames = encoder.translate(&mut msg).expect("valid message");
    let headers = frames[0].headers().expect("head frame");

    assert_eq!(headers.contains(names::SPDY_HOST), moved);
    assert_eq!(headers.contains("Host"), !moved);
    if moved {
        assert_eq!(headers.get(names::SPDY_HOST), Some("example.com"));
    } else {
        assert_eq!(headers.get("host"), Some("example.com"));
    }
}

#[test]
fn annotations_set_priority_and_scheme() {
    let mut encoder = FrameEncoder::new(SpdyVersion::Spdy3);
    let mut msg = request(
        "11",
        &[(names::PRIORITY, "3"), (names::SCHEME, "http")],
        Body::Streamed,
    );

    let frames = encoder.translate(&mut msg).expect("valid request");
    let SpdyFrame::SynStream(syn_stream) = &frames[0] else {
        panic!("expected SYN_STREAM, got {:?}", frames[0]);
    };
    assert_eq!(syn_stream.priority, 3);
    assert_eq!(syn_stream.headers.get(names::SPDY_SCHEME), Some("http"));
}

#[test]
fn out_of_range_priority_passes_through() {
    let mut encoder = FrameEncoder::new(SpdyVersion::Spdy3);
    let mut msg = request("1", &[(names::PRIORITY, "9")], Body::Streamed);

    let frames = encoder.translate(&mut msg).expect("priority is not range checked");
    let SpdyFrame::SynStream(syn_stream) = &frames[0] else {
        panic!("expected SYN_STREAM, got {:?}", frames[0]);
    };
    assert_eq!(syn_stream.priority, 9);
}

#[rstest]
#[case::missing_stream_id(
    {
        let mut msg = request("1", &[], Body::Streamed);
        if let HttpObject::Request(req) = &mut msg {
            req.headers.remove(names::STREAM_ID);
        }
        msg
    },
    names::STREAM_ID
)]
#[case::bad_stream_id(request("one", &[], Body::Streamed), names::STREAM_ID)]
#[case::bad_priority(request("1", &[(names::PRIORITY, "high")], Body::Streamed), names::PRIORITY)]
#[case::huge_priority(request("1", &[(names::PRIORITY, "300")], Body::Streamed), names::PRIORITY)]
#[case::bad_associated(
    response("2", &[(names::ASSOCIATED_TO_STREAM_ID, "x"), (names::URL, "/")], Body::Streamed),
    names::ASSOCIATED_TO_STREAM_ID
)]
fn malformed_annotations_are_rejected(#[case] mut msg: HttpObject, #[case] header: &str) {
    let mut encoder = FrameEncoder::new(SpdyVersion::Spdy3);
    encoder
        .translate(&mut response("1", &[], Body::Streamed))
        .expect("valid response");
    let before = msg.clone();

    match encoder.translate(&mut msg) {
        Err(EncoderError::MalformedInput { header: h, .. }) => assert_eq!(h, header),
        other => panic!("expected malformed input, got {other:?}"),
    }
    assert_eq!(msg, before);
    assert_eq!(encoder.state(), StreamState::Open(1));
}

#[test]
fn remaining_headers_keep_order_and_duplicates() {
    let mut encoder = FrameEncoder::new(SpdyVersion::Spdy2);
    let mut msg = response(
        "1",
        &[
            ("Set-Cookie", "a=1"),
            ("Server", "test"),
            ("set-cookie", "b=2"),
        ],
        Body::Streamed,
    );

    let frames = encoder.translate(&mut msg).expect("valid response");
    assert_eq!(
        header_pairs(&frames[0]),
        pairs(&[
            (":status", "200"),
            (":version", "HTTP/1.1"),
            ("Set-Cookie", "a=1"),
            ("Server", "test"),
            ("set-cookie", "b=2"),
        ])
    );
}

#[test]
fn chunks_follow_the_latest_message_head() {
    let mut encoder = FrameEncoder::new(SpdyVersion::Spdy3);
    encoder
        .translate(&mut response("1", &[], Body::Streamed))
        .expect("valid response");
    encoder
        .translate(&mut push("4", "1", "/img.png"))
        .expect("valid push");

    let frames = encoder.translate(&mut content(b"png")).expect("open");
    assert_eq!(frames[0].stream_id(), 4);
    assert_eq!(encoder.current_stream_id(), Some(4));
}

#[test]
fn content_without_open_stream_is_unsupported() {
    let mut encoder = FrameEncoder::new(SpdyVersion::Spdy31);
    let mut last = HttpObject::LastContent(LastHttpContent {
        content: Bytes::new(),
        trailers: Headers::new(),
    });

    match encoder.translate(&mut last) {
        Err(EncoderError::UnsupportedInput(kind)) => assert!(kind.contains("LastHttpContent")),
        other => panic!("expected unsupported input, got {other:?}"),
    }
    assert_eq!(encoder.state(), StreamState::Idle);
}
