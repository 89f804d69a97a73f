use std::fmt::Display;

use crate::headers::Headers;

use super::{set_flag, FLAG_FIN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynReply {
    pub stream_id: u32,
    pub flags: u8,
    pub headers: Headers,
}

impl SynReply {
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

    pub fn set_last(&mut self, last: bool) {
        set_flag(&mut self.flags, FLAG_FIN, last);
    }
}

impl Display for SynReply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SYN_REPLY(stream: {}, last: {}) {}",
            self.stream_id,
            self.is_last(),
            self.headers
        )
    }
}
