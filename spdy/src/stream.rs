/// State of the stream that content chunks are currently attributed to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// No message has been opened on this connection yet.
    #[default]
    Idle,
    /// A message head was sent without `last`. Chunks become data frames on
    /// this stream, including chunks after a last data frame.
    Open(u32),
    /// The message head itself was sent with `last`. Chunks are dropped.
    HalfClosedLocal(u32),
}

impl StreamState {
    pub fn stream_id(&self) -> Option<u32> {
        match self {
            Self::Idle => None,
            Self::Open(id) | Self::HalfClosedLocal(id) => Some(*id),
        }
    }

    pub(crate) fn after_head(stream_id: u32, last: bool) -> Self {
        if last {
            Self::HalfClosedLocal(stream_id)
        } else {
            Self::Open(stream_id)
        }
    }
}
