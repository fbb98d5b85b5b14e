// Criterion benchmarks for grm-fst rewrites.
//
// Builds a synthetic rule that maps a few hundred words to their uppercase
// spelling, round-trips it through the archive format, and measures exact
// and branching-input rewrites against it.
//
// Run:
//   cargo bench -p grm-fst

use criterion::{Criterion, criterion_group, criterion_main};
use grm_fst::arc::Arc;
use grm_fst::{ArchiveBuilder, Automaton, EPSILON, Label, RuleEngine, RuleSet, WEIGHT_ONE};

const RULE: &str = "UPPERCASE";

fn word(i: usize) -> Vec<u8> {
    format!("word{i:04}x").into_bytes()
}

/// Union of `count` string-to-uppercase mappings sharing one start state.
fn build_rule(count: usize) -> Automaton {
    let mut fst = Automaton::new();
    let start = fst.add_state();
    fst.set_start(start);
    for i in 0..count {
        let input = word(i);
        let mut state = fst.add_state();
        fst.add_arc(start, Arc::new(EPSILON, EPSILON, WEIGHT_ONE, state));
        for &b in &input {
            let next = fst.add_state();
            let upper = b.to_ascii_uppercase();
            fst.add_arc(
                state,
                Arc::new(Label::from(b), Label::from(upper), WEIGHT_ONE, next),
            );
            state = next;
        }
        fst.set_final(state, WEIGHT_ONE);
    }
    fst
}

/// Acceptor for `bytes` where every letter may appear in either case.
fn either_case(bytes: &[u8]) -> Automaton {
    let mut fst = Automaton::new();
    let mut state = fst.add_state();
    fst.set_start(state);
    for &b in bytes {
        let next = fst.add_state();
        let label = Label::from(b);
        fst.add_arc(state, Arc::new(label, label, WEIGHT_ONE, next));
        if b.is_ascii_alphabetic() {
            let other = Label::from(b ^ 0x20);
            fst.add_arc(state, Arc::new(other, other, WEIGHT_ONE, next));
        }
        state = next;
    }
    fst.set_final(state, WEIGHT_ONE);
    fst
}

fn load_rules() -> RuleSet {
    let mut builder = ArchiveBuilder::new();
    builder
        .add_rule(RULE, &build_rule(500))
        .expect("benchmark rule is valid");
    RuleSet::from_bytes(&builder.to_bytes()).expect("benchmark archive loads")
}

fn bench_rewrite_bytes(c: &mut Criterion) {
    let rules = load_rules();
    let inputs: Vec<Vec<u8>> = (0..500).step_by(7).map(word).collect();
    c.bench_function("rewrite_bytes (72 words)", |b| {
        b.iter(|| {
            for input in &inputs {
                std::hint::black_box(rules.rewrite_bytes(RULE, input));
            }
        })
    });
}

fn bench_rewrite_automaton(c: &mut Criterion) {
    let rules = load_rules();
    let inputs: Vec<Automaton> = (0..500)
        .step_by(7)
        .map(|i| either_case(&word(i).to_ascii_uppercase()))
        .collect();
    c.bench_function("rewrite_automaton either-case (72 words)", |b| {
        b.iter(|| {
            for input in &inputs {
                std::hint::black_box(rules.rewrite_automaton(RULE, input));
            }
        })
    });
}

criterion_group!(benches, bench_rewrite_bytes, bench_rewrite_automaton);
criterion_main!(benches);
