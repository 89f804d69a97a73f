use spdy::{EncoderError, FrameEncoder, HttpObject, SpdyFrame};
use thiserror::Error;
use tracing::debug;

use crate::transcript::{Entry, TranscriptError};

pub type ReplayResult<T> = Result<T, ReplayError>;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Entry {index}: {source}")]
    Transcript {
        index: usize,
        source: TranscriptError,
    },
    #[error("Entry {index}: {source}")]
    Encoder { index: usize, source: EncoderError },
}

/// Run every entry through `encoder` in order, handing each frame to `sink`
/// as soon as it is produced. Stops at the first entry that fails.
pub fn replay(
    encoder: &mut FrameEncoder,
    entries: Vec<Entry>,
    mut sink: impl FnMut(SpdyFrame),
) -> ReplayResult<usize> {
    let mut frame_count = 0usize;

    for (index, entry) in entries.into_iter().enumerate() {
        let mut object = HttpObject::try_from(entry)
            .map_err(|source| ReplayError::Transcript { index, source })?;
        let frames = encoder
            .translate(&mut object)
            .map_err(|source| ReplayError::Encoder { index, source })?;

        debug!(
            "Entry {index} ({}) produced {} frame(s)",
            object.kind_name(),
            frames.len()
        );
        frame_count += frames.len();
        frames.into_iter().for_each(&mut sink);
    }

    Ok(frame_count)
}
