use bytes::{Bytes, BytesMut};

/// Regroups arbitrarily sized network frames into blocks of `chunk_size`.
///
/// Only the block returned by [`FixedChunker::finish`] may be shorter.
#[derive(Debug)]
pub struct FixedChunker {
    chunk_size: usize,
    pending: BytesMut,
}

impl FixedChunker {
    pub fn new(chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            pending: BytesMut::with_capacity(chunk_size),
        }
    }

    pub fn push(&mut self, data: &[u8]) {
        self.pending.extend_from_slice(data);
    }

    /// Next full block, if enough data has been pushed.
    pub fn next_chunk(&mut self) -> Option<Bytes> {
        if self.pending.len() >= self.chunk_size {
            Some(self.pending.split_to(self.chunk_size).freeze())
        } else {
            None
        }
    }

    /// Whatever is left once the input is exhausted.
    pub fn finish(self) -> Option<Bytes> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.freeze())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(chunker: &mut FixedChunker) -> Vec<usize> {
        std::iter::from_fn(|| chunker.next_chunk()).map(|c| c.len()).collect()
    }

    #[test]
    fn frames_are_regrouped() {
        let mut chunker = FixedChunker::new(4);
        chunker.push(b"ab");
        assert!(drain(&mut chunker).is_empty());
        chunker.push(b"cdefghij");
        assert_eq!(drain(&mut chunker), vec![4, 4]);
        assert_eq!(chunker.finish().as_deref(), Some(&b"ij"[..]));
    }

    #[test]
    fn exact_multiple_leaves_no_tail() {
        let mut chunker = FixedChunker::new(3);
        chunker.push(b"abcdef");
        assert_eq!(drain(&mut chunker), vec![3, 3]);
        assert!(chunker.finish().is_none());
    }

    #[test]
    fn zero_size_is_treated_as_one() {
        let mut chunker = FixedChunker::new(0);
        chunker.push(b"xy");
        assert_eq!(drain(&mut chunker), vec![1, 1]);
    }
}
