use std::fmt::Display;

mod data;
mod headers;
mod syn_reply;
mod syn_stream;

pub use data::*;
pub use headers::*;
pub use syn_reply::*;
pub use syn_stream::*;

use crate::headers::Headers;

/// Stream identifiers are 31 bits wide.
pub const MAX_STREAM_ID: u32 = (1 << 31) - 1;

pub const FLAG_FIN: u8 = 0x01;
pub const FLAG_UNIDIRECTIONAL: u8 = 0x02;

/// Control frame types, plus `Data` for data frames which carry no type field.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    Data = 0,
    SynStream = 1,
    SynReply = 2,
    Headers = 8,
}

impl Display for FrameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Data => write!(f, "DATA"),
            Self::SynStream => write!(f, "SYN_STREAM"),
            Self::SynReply => write!(f, "SYN_REPLY"),
            Self::Headers => write!(f, "HEADERS"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpdyFrame {
    SynStream(SynStream),
    SynReply(SynReply),
    Data(Data),
    Headers(HeadersFrame),
}

impl SpdyFrame {
    pub fn frame_type(&self) -> FrameType {
        match self {
            Self::SynStream(_) => FrameType::SynStream,
            Self::SynReply(_) => FrameType::SynReply,
            Self::Data(_) => FrameType::Data,
            Self::Headers(_) => FrameType::Headers,
        }
    }

    pub fn stream_id(&self) -> u32 {
        match self {
            Self::SynStream(f) => f.stream_id,
            Self::SynReply(f) => f.stream_id,
            Self::Data(f) => f.stream_id,
            Self::Headers(f) => f.stream_id,
        }
    }

    pub fn is_last(&self) -> bool {
        match self {
            Self::SynStream(f) => f.is_last(),
            Self::SynReply(f) => f.is_last(),
            Self::Data(f) => f.is_last(),
            Self::Headers(f) => f.is_last(),
        }
    }

    /// Header block of the frame, `None` for data frames.
    pub fn headers(&self) -> Option<&Headers> {
        match self {
            Self::SynStream(f) => Some(&f.headers),
            Self::SynReply(f) => Some(&f.headers),
            Self::Headers(f) => Some(&f.headers),
            Self::Data(_) => None,
        }
    }
}

impl Display for SpdyFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SynStream(frame) => Display::fmt(frame, f),
            Self::SynReply(frame) => Display::fmt(frame, f),
            Self::Data(frame) => Display::fmt(frame, f),
            Self::Headers(frame) => Display::fmt(frame, f),
        }
    }
}

impl From<SynStream> for SpdyFrame {
    fn from(value: SynStream) -> Self {
        Self::SynStream(value)
    }
}

impl From<SynReply> for SpdyFrame {
    fn from(value: SynReply) -> Self {
        Self::SynReply(value)
    }
}

impl From<Data> for SpdyFrame {
    fn from(value: Data) -> Self {
        Self::Data(value)
    }
}

impl From<HeadersFrame> for SpdyFrame {
    fn from(value: HeadersFrame) -> Self {
        Self::Headers(value)
    }
}

#[inline]
pub(crate) fn set_flag(flags: &mut u8, flag: u8, value: bool) {
    if value {
        *flags |= flag;
    } else {
        *flags &= !flag;
    }
}
