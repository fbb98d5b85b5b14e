// Arc and state records with a fixed binary layout, shared by in-memory
// automata, compiled rules and the archive format.

use bytemuck::{Pod, Zeroable};

use crate::{Label, StateId, Weight};

/// A labelled, weighted transition (16 bytes).
///
/// Layout:
/// - `ilabel` (u32): input label, [`EPSILON`](crate::EPSILON) consumes nothing
/// - `olabel` (u32): output label, [`EPSILON`](crate::EPSILON) emits nothing
/// - `weight` (u32): tropical cost of taking the arc
/// - `nextstate` (u32): destination state index
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Arc {
    pub ilabel: Label,
    pub olabel: Label,
    pub weight: Weight,
    pub nextstate: StateId,
}

impl Arc {
    pub fn new(ilabel: Label, olabel: Label, weight: Weight, nextstate: StateId) -> Self {
        Self {
            ilabel,
            olabel,
            weight,
            nextstate,
        }
    }
}

/// Sentinel final weight for states that are not final.
pub const NOT_FINAL: Weight = u32::MAX;

/// Per-state entry of a compiled rule (12 bytes).
///
/// The arcs leaving a state are `arcs[first_arc..first_arc + arc_count]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct StateEntry {
    pub first_arc: u32,
    pub arc_count: u32,
    /// Final cost, or [`NOT_FINAL`].
    pub final_weight: Weight,
}

impl StateEntry {
    /// The final weight, if this state is final.
    #[inline]
    pub fn final_weight(&self) -> Option<Weight> {
        (self.final_weight != NOT_FINAL).then_some(self.final_weight)
    }

    /// Range of arc indices belonging to this state.
    #[inline]
    pub fn arc_range(&self) -> std::ops::Range<usize> {
        let first = self.first_arc as usize;
        first..first + self.arc_count as usize
    }
}

// Static assertions for struct sizes
const _: () = assert!(size_of::<Arc>() == 16);
const _: () = assert!(size_of::<StateEntry>() == 12);
