// Mutable automaton: states owned in a flat arena, arcs refer to states by index.

use hashbrown::HashSet;

use crate::arc::Arc;
use crate::{EPSILON, Label, StateId, WEIGHT_ONE, Weight};

/// Read-only view shared by in-memory automata and compiled rules.
///
/// This is what the rewrite search consumes, so both sides of a rewrite can be
/// either representation.
pub trait Fst {
    /// The start state, or `None` for an automaton with no start (empty language).
    fn start(&self) -> Option<StateId>;

    /// Final weight of `state`, or `None` if the state is not final.
    fn final_weight(&self, state: StateId) -> Option<Weight>;

    /// Arcs leaving `state`. Out-of-range states have no arcs.
    fn arcs(&self, state: StateId) -> &[Arc];

    /// Number of states.
    fn num_states(&self) -> usize;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct State {
    arcs: Vec<Arc>,
    final_weight: Option<Weight>,
}

/// An editable weighted automaton.
///
/// States are dense indices into an owned `Vec`; arcs store the index of their
/// destination. There are no back-references, so the automaton is a plain
/// value that can be cloned, moved and dropped without bookkeeping.
///
/// Bytes are used directly as labels, which means a NUL byte coincides with
/// [`EPSILON`] and cannot be matched literally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Automaton {
    states: Vec<State>,
    start: Option<StateId>,
}

impl Automaton {
    /// Create an automaton with no states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fresh non-final state and return its index.
    pub fn add_state(&mut self) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(State::default());
        id
    }

    /// Mark `state` as the start state.
    pub fn set_start(&mut self, state: StateId) {
        self.start = Some(state);
    }

    /// Make `state` final with the given cost.
    pub fn set_final(&mut self, state: StateId, weight: Weight) {
        self.states[state as usize].final_weight = Some(weight);
    }

    /// Append an arc leaving `state`.
    pub fn add_arc(&mut self, state: StateId, arc: Arc) {
        self.states[state as usize].arcs.push(arc);
    }

    /// Total number of arcs over all states.
    pub fn num_arcs(&self) -> usize {
        self.states.iter().map(|s| s.arcs.len()).sum()
    }

    /// Build the acceptor for exactly one byte string.
    pub fn linear(bytes: &[u8]) -> Self {
        let mut fst = Self::new();
        let mut state = fst.add_state();
        fst.set_start(state);
        for &b in bytes {
            let next = fst.add_state();
            let label = Label::from(b);
            fst.add_arc(state, Arc::new(label, label, WEIGHT_ONE, next));
            state = next;
        }
        fst.set_final(state, WEIGHT_ONE);
        fst
    }

    /// Build a transducer that maps `input` to `output` and nothing else.
    ///
    /// The shorter side is padded with epsilons at the end.
    pub fn cross(input: &[u8], output: &[u8]) -> Self {
        let mut fst = Self::new();
        let mut state = fst.add_state();
        fst.set_start(state);
        for i in 0..input.len().max(output.len()) {
            let next = fst.add_state();
            let ilabel = input.get(i).map_or(EPSILON, |&b| Label::from(b));
            let olabel = output.get(i).map_or(EPSILON, |&b| Label::from(b));
            fst.add_arc(state, Arc::new(ilabel, olabel, WEIGHT_ONE, next));
            state = next;
        }
        fst.set_final(state, WEIGHT_ONE);
        fst
    }

    /// Whether the input side of this automaton accepts `input`.
    ///
    /// Runs a subset simulation following epsilon arcs, so it works on
    /// non-deterministic automata. Weights are ignored.
    pub fn accepts(&self, input: &[u8]) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        let mut current = self.epsilon_closure([start].into_iter().collect());
        for &b in input {
            let label = Label::from(b);
            if label == EPSILON {
                return false;
            }
            let moved: HashSet<StateId> = current
                .iter()
                .flat_map(|&s| self.arcs(s))
                .filter(|arc| arc.ilabel == label)
                .map(|arc| arc.nextstate)
                .collect();
            if moved.is_empty() {
                return false;
            }
            current = self.epsilon_closure(moved);
        }
        current.iter().any(|&s| self.final_weight(s).is_some())
    }

    fn epsilon_closure(&self, mut states: HashSet<StateId>) -> HashSet<StateId> {
        let mut pending: Vec<StateId> = states.iter().copied().collect();
        while let Some(state) = pending.pop() {
            for arc in self.arcs(state) {
                if arc.ilabel == EPSILON && states.insert(arc.nextstate) {
                    pending.push(arc.nextstate);
                }
            }
        }
        states
    }
}

impl Fst for Automaton {
    fn start(&self) -> Option<StateId> {
        self.start
    }

    fn final_weight(&self, state: StateId) -> Option<Weight> {
        self.states.get(state as usize).and_then(|s| s.final_weight)
    }

    fn arcs(&self, state: StateId) -> &[Arc] {
        self.states
            .get(state as usize)
            .map(|s| s.arcs.as_slice())
            .unwrap_or_default()
    }

    fn num_states(&self) -> usize {
        self.states.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_automaton_accepts_nothing() {
        let fst = Automaton::new();
        assert_eq!(fst.num_states(), 0);
        assert!(!fst.accepts(b""));
        assert!(!fst.accepts(b"a"));
    }

    #[test]
    fn linear_accepts_only_its_string() {
        let fst = Automaton::linear(b"abc");
        assert_eq!(fst.num_states(), 4);
        assert_eq!(fst.num_arcs(), 3);
        assert!(fst.accepts(b"abc"));
        assert!(!fst.accepts(b"ab"));
        assert!(!fst.accepts(b"abcd"));
        assert!(!fst.accepts(b"abd"));
    }

    #[test]
    fn linear_empty_string() {
        let fst = Automaton::linear(b"");
        assert_eq!(fst.num_states(), 1);
        assert_eq!(fst.start(), Some(0));
        assert_eq!(fst.final_weight(0), Some(WEIGHT_ONE));
        assert!(fst.accepts(b""));
        assert!(!fst.accepts(b"x"));
    }

    #[test]
    fn cross_pads_shorter_side() {
        let fst = Automaton::cross(b"ab", b"wxyz");
        assert_eq!(fst.num_arcs(), 4);
        let labels: Vec<(Label, Label)> = (0..4)
            .map(|s| {
                let arc = fst.arcs(s)[0];
                (arc.ilabel, arc.olabel)
            })
            .collect();
        assert_eq!(labels[0], (Label::from(b'a'), Label::from(b'w')));
        assert_eq!(labels[1], (Label::from(b'b'), Label::from(b'x')));
        assert_eq!(labels[2], (EPSILON, Label::from(b'y')));
        assert_eq!(labels[3], (EPSILON, Label::from(b'z')));
        // Input side still accepts exactly "ab"
        assert!(fst.accepts(b"ab"));
        assert!(!fst.accepts(b"abz"));
    }

    #[test]
    fn accepts_follows_epsilon_arcs() {
        let mut fst = Automaton::new();
        let s0 = fst.add_state();
        let s1 = fst.add_state();
        let s2 = fst.add_state();
        fst.set_start(s0);
        fst.add_arc(s0, Arc::new(EPSILON, EPSILON, 0, s1));
        fst.add_arc(s1, Arc::new(Label::from(b'q'), Label::from(b'q'), 0, s2));
        fst.set_final(s2, 0);
        assert!(fst.accepts(b"q"));
        assert!(!fst.accepts(b""));
    }

    #[test]
    fn out_of_range_state_queries() {
        let fst = Automaton::linear(b"a");
        assert!(fst.arcs(10).is_empty());
        assert_eq!(fst.final_weight(10), None);
    }
}
