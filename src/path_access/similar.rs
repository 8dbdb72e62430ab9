// path_access/similar.rs — "most similar path" lookup.
//
// Every stored pattern gets a per-segment fingerprint: SHA-256 of the
// segment text, folded to a u64, scaled by a depth weight that halves per
// segment so early segments dominate the distance. A query path is
// fingerprinted the same way and compared segment-by-segment; unmatched
// trailing segments on either side cost a depth-scaled penalty. The nearest
// stored pattern within the threshold is the suggestion.

use sha2::{Digest, Sha256};

/// Weighted per-segment fingerprints for one path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathHash {
    weighted: Vec<u64>,
}

/// Fold the first 8 bytes of SHA-256(segment) into a u64.
fn segment_hash(segment: &str) -> u64 {
    let digest = Sha256::digest(segment.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Depth weight for segment `i`: full scale at the root, halving per level,
/// floored at 1 so deep segments still contribute.
fn depth_weight(i: usize) -> u64 {
    if i >= 63 {
        1
    } else {
        u64::MAX >> (i + 1)
    }
}

impl PathHash {
    pub fn of(path: &str) -> Self {
        let weighted = path
            .split('/')
            .enumerate()
            // Scale into the weight band: hash % weight keeps the value
            // strictly below the band for its depth.
            .map(|(i, seg)| segment_hash(seg) % depth_weight(i).max(1))
            .collect();
        Self { weighted }
    }

    pub fn segment_count(&self) -> usize {
        self.weighted.len()
    }

    /// Distance to another path hash: sum of absolute per-segment
    /// differences over the aligned prefix, plus the full depth weight for
    /// every unmatched trailing segment. Saturating, so it never wraps.
    pub fn distance(&self, other: &PathHash) -> u64 {
        let aligned = self.weighted.len().min(other.weighted.len());
        let mut total: u64 = 0;
        for i in 0..aligned {
            total = total.saturating_add(self.weighted[i].abs_diff(other.weighted[i]));
        }
        let longest = self.weighted.len().max(other.weighted.len());
        for i in aligned..longest {
            total = total.saturating_add(depth_weight(i));
        }
        total
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_paths_have_zero_distance() {
        let a = PathHash::of("user/42/profile");
        let b = PathHash::of("user/42/profile");
        assert_eq!(a.distance(&b), 0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = PathHash::of("user/42");
        let b = PathHash::of("user/43/extra");
        assert_eq!(a.distance(&b), b.distance(&a));
    }

    #[test]
    fn early_segments_dominate() {
        let q = PathHash::of("user/42/profile");
        // Differ in the last segment vs. differ in the first.
        let late = PathHash::of("user/42/settings");
        let early = PathHash::of("group/42/profile");
        assert!(q.distance(&late) < q.distance(&early));
    }

    #[test]
    fn shared_prefix_beats_disjoint() {
        let q = PathHash::of("locale/en/messages");
        let near = PathHash::of("locale/en/message");
        let far = PathHash::of("table/render/rows");
        assert!(q.distance(&near) < q.distance(&far));
    }

    #[test]
    fn length_mismatch_costs_depth_weight() {
        let a = PathHash::of("a/b");
        let b = PathHash::of("a/b/c/d");
        let d = a.distance(&b);
        assert!(d >= depth_weight(2));
        assert!(d >= depth_weight(2).saturating_add(depth_weight(3)));
    }

    #[test]
    fn deep_paths_do_not_overflow() {
        let long = vec!["seg"; 100].join("/");
        let a = PathHash::of(&long);
        let b = PathHash::of("other");
        // Just exercising saturation on a 100-segment path.
        let _ = a.distance(&b);
        assert_eq!(a.segment_count(), 100);
    }
}
