use std::fmt::Display;

use crate::headers::Headers;

use super::FLAG_FIN;

/// Extra header block on an open stream. The encoder uses it for trailers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadersFrame {
    pub stream_id: u32,
    pub flags: u8,
    pub headers: Headers,
}

impl HeadersFrame {
    pub fn new(stream_id: u32) -> Self {
        Self {
            stream_id,
            flags: 0,
            headers: Headers::new(),
        }
    }

    #[inline]
    pub fn is_last(&self) -> bool {
        self.flags & FLAG_FIN > 0
    }
}

impl Display for HeadersFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "HEADERS(stream: {}, last: {}) {}",
            self.stream_id,
            self.is_last(),
            self.headers
        )
    }
}
