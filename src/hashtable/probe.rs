//! The probe sequence of the table.
//!
//! Probe `i` lands on `home + i(i+1)/2`, wrapped to the capacity. Offsets are
//! the triangular numbers 0, 1, 3, 6, 10 ... and for a power of two capacity
//! the first `capacity` of them are a permutation of the slots. The sequence
//! therefore ends after exactly `capacity` steps, having seen every slot once.

/// An iterator over the slot indices to examine for one hash.
#[derive(Debug, Clone)]
pub(crate) struct ProbeSeq {
    pos: usize,
    stride: usize,
    mask: usize,
    remaining: usize,
}

impl ProbeSeq {
    pub(crate) fn new(k_hash: u64, capacity: usize) -> Self {
        debug_assert_pow2!(capacity);
        ProbeSeq {
            pos: (k_hash % capacity as u64) as usize,
            stride: 0,
            mask: capacity - 1,
            remaining: capacity,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let idx = self.pos;
        self.stride += 1;
        self.pos = (self.pos + self.stride) & self.mask;
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}

#[cfg(test)]
mod tests {
    use super::ProbeSeq;

    #[test]
    fn test_probe_offsets_are_triangular() {
        let seq: Vec<usize> = ProbeSeq::new(0, 64).take(8).collect();
        assert_eq!(seq, vec![0, 1, 3, 6, 10, 15, 21, 28]);

        // Offsets wrap around the end of the table.
        let seq: Vec<usize> = ProbeSeq::new(6, 8).take(4).collect();
        assert_eq!(seq, vec![6, 7, 1, 4]);
    }

    #[test]
    fn test_probe_home_slot_is_hash_mod_capacity() {
        assert_eq!(ProbeSeq::new(13, 8).next(), Some(5));
        assert_eq!(ProbeSeq::new(u64::MAX, 16).next(), Some(15));
        assert_eq!(ProbeSeq::new(12345, 1).next(), Some(0));
    }

    #[test]
    fn test_probe_covers_every_slot() {
        // Check every power of two capacity up to 4096, from every home slot
        // of the smaller tables and a spread of them for the larger ones.
        for shift in 0..=12 {
            let capacity = 1usize << shift;
            let step = (capacity / 64).max(1);
            for home in (0..capacity).step_by(step) {
                let mut seen = vec![false; capacity];
                let seq = ProbeSeq::new(home as u64, capacity);
                assert_eq!(seq.len(), capacity);
                for idx in seq {
                    assert!(!seen[idx], "capacity {} revisited {}", capacity, idx);
                    seen[idx] = true;
                }
                assert!(seen.iter().all(|s| *s), "capacity {} missed a slot", capacity);
            }
        }
    }
}
