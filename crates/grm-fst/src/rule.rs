// Compiled rewrite rule: flat state and arc tables.

use crate::arc::{Arc, NOT_FINAL, StateEntry};
use crate::automaton::{Automaton, Fst};
use crate::format::{self, RULE_HEADER_SIZE, RuleHeader};
use crate::{FarError, StateId, Weight};

/// Start value written for rules without a start state.
const NO_START: u32 = u32::MAX;

/// A compiled rewrite rule.
///
/// The arcs of all states live in one table, ordered by source state; each
/// [`StateEntry`] points at its slice of that table. This is the form rules
/// take inside an archive, and it is immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Rule {
    start: Option<StateId>,
    states: Vec<StateEntry>,
    arcs: Vec<Arc>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("start", &self.start)
            .field("state_count", &self.states.len())
            .field("arc_count", &self.arcs.len())
            .finish()
    }
}

impl Rule {
    /// Freeze an automaton into a compiled rule.
    pub fn from_automaton(fst: &Automaton) -> Self {
        let mut states = Vec::with_capacity(fst.num_states());
        let mut arcs = Vec::with_capacity(fst.num_arcs());
        for state in 0..fst.num_states() as StateId {
            let out = fst.arcs(state);
            states.push(StateEntry {
                first_arc: arcs.len() as u32,
                arc_count: out.len() as u32,
                final_weight: fst.final_weight(state).unwrap_or(NOT_FINAL),
            });
            arcs.extend_from_slice(out);
        }
        Self {
            start: fst.start(),
            states,
            arcs,
        }
    }

    /// Number of arcs over all states.
    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    /// Parse a rule's tables from archive data, starting at `offset`.
    ///
    /// Returns the rule and the offset immediately after its arc table. The
    /// tables are copied into owned vectors, since the source slice carries no
    /// alignment guarantee.
    pub fn from_bytes_at(
        name: &str,
        data: &[u8],
        offset: usize,
    ) -> Result<(Self, usize), FarError> {
        let header = format::parse_rule_header(data, offset)?;
        let states_offset = offset + RULE_HEADER_SIZE;
        let states_len = header.state_count as usize * size_of::<StateEntry>();
        let arcs_offset = states_offset + states_len;
        let arcs_len = header.arc_count as usize * size_of::<Arc>();
        let end = arcs_offset + arcs_len;

        if end > data.len() {
            return Err(FarError::TooShort {
                expected: end,
                actual: data.len(),
            });
        }

        let mut states = vec![StateEntry::default(); header.state_count as usize];
        bytemuck::cast_slice_mut::<StateEntry, u8>(&mut states)
            .copy_from_slice(&data[states_offset..arcs_offset]);

        let mut arcs = vec![Arc::default(); header.arc_count as usize];
        bytemuck::cast_slice_mut::<Arc, u8>(&mut arcs).copy_from_slice(&data[arcs_offset..end]);

        let rule = Self {
            start: (header.start != NO_START).then_some(header.start),
            states,
            arcs,
        };
        rule.validate(name)?;
        Ok((rule, end))
    }

    /// Append this rule's header block and tables to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        format::write_rule_header(
            out,
            &RuleHeader {
                start: self.start.unwrap_or(NO_START),
                state_count: self.states.len() as u32,
                arc_count: self.arcs.len() as u32,
            },
        );
        out.extend_from_slice(bytemuck::cast_slice(&self.states));
        out.extend_from_slice(bytemuck::cast_slice(&self.arcs));
    }

    /// Check that every state index and arc range stays inside the tables.
    pub fn validate(&self, name: &str) -> Result<(), FarError> {
        let state_count = self.states.len() as u32;
        let out_of_range = |state: u32| FarError::StateOutOfRange {
            rule: name.to_string(),
            state,
            state_count,
        };

        if let Some(start) = self.start {
            if start >= state_count {
                return Err(out_of_range(start));
            }
        }
        for (index, entry) in self.states.iter().enumerate() {
            if entry.arc_range().end > self.arcs.len() {
                return Err(FarError::ArcOutOfRange {
                    rule: name.to_string(),
                    state: index as u32,
                });
            }
        }
        if let Some(arc) = self.arcs.iter().find(|arc| arc.nextstate >= state_count) {
            return Err(out_of_range(arc.nextstate));
        }
        Ok(())
    }
}

impl Fst for Rule {
    fn start(&self) -> Option<StateId> {
        self.start
    }

    fn final_weight(&self, state: StateId) -> Option<Weight> {
        self.states
            .get(state as usize)
            .and_then(StateEntry::final_weight)
    }

    fn arcs(&self, state: StateId) -> &[Arc] {
        match self.states.get(state as usize) {
            Some(entry) => &self.arcs[entry.arc_range()],
            None => &[],
        }
    }

    fn num_states(&self) -> usize {
        self.states.len()
    }
}
