// Best-first rewrite search over the lazy composition of an input automaton
// with a rule.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use hashbrown::HashSet;

use crate::automaton::Fst;
use crate::{EPSILON, Label, MAX_SEARCH_STEPS, StateId, Weight};

/// One discovered path prefix through the product of input and rule.
///
/// Nodes live in a flat arena and point at their predecessor by index, so the
/// output string of the winning path is read back by walking parents.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    input_state: StateId,
    rule_state: StateId,
    parent: Option<usize>,
    olabel: Label,
}

/// Queue entry: `(cost, node index, complete)`. Wrapped in [`Reverse`] so the
/// cheapest entry pops first; equal costs pop in discovery order.
type QueueEntry = Reverse<(u64, usize, bool)>;

/// Find the cheapest output of `rule` over all strings accepted by `input`.
///
/// The composition is never materialised. Product states `(input, rule)` are
/// expanded lazily, cheapest first, along three kinds of moves:
/// - a rule arc with an epsilon input label (the input side stays put),
/// - an input arc with an epsilon output label (the rule side stays put),
/// - an input arc whose output label equals a rule arc's input label.
///
/// A product state where both sides are final completes a path at its cost
/// plus both final weights. The first completed path to leave the queue is the
/// cheapest one. Output labels above 255 do not correspond to bytes and are
/// left out of the returned string.
///
/// Returns `None` when no path exists or the search exceeds
/// [`MAX_SEARCH_STEPS`] expansions.
pub fn shortest_rewrite<I, R>(input: &I, rule: &R) -> Option<Vec<u8>>
where
    I: Fst + ?Sized,
    R: Fst + ?Sized,
{
    let (Some(input_start), Some(rule_start)) = (input.start(), rule.start()) else {
        return None;
    };

    let mut nodes = vec![SearchNode {
        input_state: input_start,
        rule_state: rule_start,
        parent: None,
        olabel: EPSILON,
    }];
    let mut queue: BinaryHeap<QueueEntry> = BinaryHeap::new();
    queue.push(Reverse((0, 0, false)));
    let mut settled: HashSet<(StateId, StateId)> = HashSet::new();
    let mut steps: u32 = 0;

    while let Some(Reverse((cost, index, complete))) = queue.pop() {
        if complete {
            return Some(collect_output(&nodes, index));
        }

        let SearchNode {
            input_state,
            rule_state,
            ..
        } = nodes[index];
        if !settled.insert((input_state, rule_state)) {
            continue;
        }

        steps += 1;
        if steps > MAX_SEARCH_STEPS {
            tracing::warn!(steps, "rewrite search limit reached");
            return None;
        }

        if let (Some(input_final), Some(rule_final)) = (
            input.final_weight(input_state),
            rule.final_weight(rule_state),
        ) {
            let total = cost + u64::from(input_final) + u64::from(rule_final);
            queue.push(Reverse((total, index, true)));
        }

        let mut frontier = Frontier {
            nodes: &mut nodes,
            queue: &mut queue,
            settled: &settled,
            parent: index,
            cost,
        };

        for rule_arc in rule.arcs(rule_state) {
            if rule_arc.ilabel == EPSILON {
                frontier.push(input_state, rule_arc.nextstate, rule_arc.olabel, rule_arc.weight);
            }
        }

        for input_arc in input.arcs(input_state) {
            if input_arc.olabel == EPSILON {
                frontier.push(input_arc.nextstate, rule_state, EPSILON, input_arc.weight);
                continue;
            }
            for rule_arc in rule.arcs(rule_state) {
                if rule_arc.ilabel == input_arc.olabel {
                    frontier.push(
                        input_arc.nextstate,
                        rule_arc.nextstate,
                        rule_arc.olabel,
                        input_arc.weight.saturating_add(rule_arc.weight),
                    );
                }
            }
        }
    }

    None
}

/// Borrowed search state used while expanding one node.
struct Frontier<'a> {
    nodes: &'a mut Vec<SearchNode>,
    queue: &'a mut BinaryHeap<QueueEntry>,
    settled: &'a HashSet<(StateId, StateId)>,
    parent: usize,
    cost: u64,
}

impl Frontier<'_> {
    fn push(&mut self, input_state: StateId, rule_state: StateId, olabel: Label, weight: Weight) {
        if self.settled.contains(&(input_state, rule_state)) {
            return;
        }
        let index = self.nodes.len();
        self.nodes.push(SearchNode {
            input_state,
            rule_state,
            parent: Some(self.parent),
            olabel,
        });
        self.queue
            .push(Reverse((self.cost + u64::from(weight), index, false)));
    }
}

fn collect_output(nodes: &[SearchNode], mut index: usize) -> Vec<u8> {
    let mut output = Vec::new();
    loop {
        let node = nodes[index];
        if let Ok(byte) = u8::try_from(node.olabel) {
            if node.olabel != EPSILON {
                output.push(byte);
            }
        }
        match node.parent {
            Some(parent) => index = parent,
            None => break,
        }
    }
    output.reverse();
    output
}
