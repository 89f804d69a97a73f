//! HTTP to SPDY frame encoder.
//!
//! [`FrameEncoder`] turns the HTTP objects of one connection (message heads,
//! content chunks, trailers) into SPDY frames ready for a frame serializer.
//!
//! ```text
//!   HttpRequest / HttpResponse / HttpContent / LastHttpContent
//!        |
//!   +----v---------+
//!   | FrameEncoder |  header surgery, stream attribution
//!   +----+---------+
//!        |
//!   SYN_STREAM / SYN_REPLY / HEADERS / DATA
//! ```

pub mod encoder;
pub mod error;
pub mod frames;
pub mod headers;
pub mod message;
pub mod stream;
pub mod version;

pub use encoder::FrameEncoder;
pub use error::{EncoderError, EncoderResult, HeaderProblem, VersionError};
pub use frames::SpdyFrame;
pub use headers::Headers;
pub use message::{Body, HttpContent, HttpObject, HttpRequest, HttpResponse, LastHttpContent};
pub use version::SpdyVersion;
