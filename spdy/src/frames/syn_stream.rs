use std::fmt::Display;

use crate::headers::Headers;

use super::{set_flag, FLAG_FIN, FLAG_UNIDIRECTIONAL};

/// Opens a new stream, either for a request or for a pushed resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynStream {
    pub stream_id: u32,
    /// 0 when the stream is not associated to another one.
    pub associated_to_stream_id: u32,
    pub priority: u8,
    pub flags: u8,
    pub headers: Headers,
}

impl SynStream {
    pub fn new(stream_id: u32, associated_to_stream_id: u32, priority: u8) -> Self {
        Self {
            stream_id,
            associated_to_stream_id,
            priority,
            flags: 0,
            headers: Headers::new(),
        }
    }

    #[inline]
    pub fn is_last(&self) -> bool {
        self.flags & FLAG_FIN > 0
    }

    pub fn set_last(&mut self, last: bool) {
        set_flag(&mut self.flags, FLAG_FIN, last);
    }

    #[inline]
    pub fn is_unidirectional(&self) -> bool {
        self.flags & FLAG_UNIDIRECTIONAL > 0
    }

    pub fn set_unidirectional(&mut self, unidirectional: bool) {
        set_flag(&mut self.flags, FLAG_UNIDIRECTIONAL, unidirectional);
    }
}

impl Display for SynStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SYN_STREAM(stream: {}, associated: {}, priority: {}, last: {}, unidirectional: {}) {}",
            self.stream_id,
            self.associated_to_stream_id,
            self.priority,
            self.is_last(),
            self.is_unidirectional(),
            self.headers
        )
    }
}
