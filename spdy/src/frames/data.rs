use std::fmt::Display;

use bytes::Bytes;

use super::{set_flag, FLAG_FIN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Data {
    pub stream_id: u32,
    pub flags: u8,
    pub payload: Bytes,
}

impl Data {
    pub fn new(stream_id: u32, payload: Bytes) -> Self {
        Self {
            stream_id,
            flags: 0,
            payload,
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

impl Display for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DATA(stream: {}, last: {}, length: {})",
            self.stream_id,
            self.is_last(),
            self.payload.len()
        )
    }
}
