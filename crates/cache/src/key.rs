//! Cache key

use std::fmt;

/// Identity under which the cache indexes one beacon.
///
/// The session sequence distinguishes the parts of a session that was split
/// after exceeding the maximum event count; the parts share a session
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BeaconKey {
    /// Session number of the beacon
    pub session_number: i32,
    /// Sequence number of the session split
    pub session_sequence: i32,
}

impl BeaconKey {
    pub fn new(session_number: i32, session_sequence: i32) -> Self {
        Self {
            session_number,
            session_sequence,
        }
    }
}

impl fmt::Display for BeaconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[sn={}, seq={}]",
            self.session_number, self.session_sequence
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_uses_both_components() {
        assert_eq!(BeaconKey::new(1, 0), BeaconKey::new(1, 0));
        assert_ne!(BeaconKey::new(1, 0), BeaconKey::new(1, 1));
        assert_ne!(BeaconKey::new(1, 0), BeaconKey::new(2, 0));
    }

    #[test]
    fn test_hash_distinguishes_sequence() {
        let mut keys = HashSet::new();
        keys.insert(BeaconKey::new(7, 0));
        keys.insert(BeaconKey::new(7, 1));
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(BeaconKey::new(17, 2).to_string(), "[sn=17, seq=2]");
    }
}
