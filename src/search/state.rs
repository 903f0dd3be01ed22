/// Bookkeeping of a single search call. Nothing survives between calls: the
/// search is a pure function of the board, the player and the depth.
#[derive(Debug, Default)]
pub(super) struct State {
    searched_nodes: u64,
    cutoffs: u64,
}

impl State {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Records a visited (simulated) position.
    pub(super) fn visit(&mut self) {
        self.searched_nodes += 1;
    }

    /// Records a branch pruned by alpha-beta.
    pub(super) fn cutoff(&mut self) {
        self.cutoffs += 1;
    }

    #[must_use]
    pub(super) const fn searched_nodes(&self) -> u64 {
        self.searched_nodes
    }

    #[must_use]
    pub(super) const fn cutoffs(&self) -> u64 {
        self.cutoffs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters() {
        let mut state = State::new();
        assert_eq!(state.searched_nodes(), 0);
        assert_eq!(state.cutoffs(), 0);

        state.visit();
        state.visit();
        state.cutoff();
        assert_eq!(state.searched_nodes(), 2);
        assert_eq!(state.cutoffs(), 1);
    }
}
