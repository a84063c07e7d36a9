/// Identifies one state inside one automaton.
///
/// Ids are opaque and only meaningful for the automaton that allocated them;
/// composition never reuses an id across sub-fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub u32);

impl StateId {
    pub fn of(id: usize) -> Self {
        assert!(id < u32::MAX as usize);
        Self(id as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}
