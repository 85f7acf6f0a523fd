//!
//! test of hmm
//!
#[macro_use]
extern crate approx;

use hmmgraph::error::HmmError;
use hmmgraph::hmm::{DiscreteDistribution, HmmBuilder, State};
use hmmgraph::prob::p;

fn acgt(a: f64, c: f64, g: f64, t: f64) -> DiscreteDistribution<char> {
    DiscreteDistribution::new(vec![('A', a), ('C', c), ('G', g), ('T', t)])
}

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[test]
fn three_state_example() {
    let s1 = State::emitting(acgt(0.35, 0.20, 0.05, 0.40), "s1");
    let s2 = State::emitting(acgt(0.25, 0.25, 0.25, 0.25), "s2");
    let s3 = State::emitting(acgt(0.10, 0.40, 0.40, 0.10), "s3");

    let mut model = HmmBuilder::new("example");
    model.add_states(&[s1.clone(), s2.clone(), s3.clone()]).unwrap();
    model.add_transition(&model.start(), &s1, 0.90).unwrap();
    model.add_transition(&model.start(), &s2, 0.10).unwrap();
    model.add_transition(&s1, &s1, 0.80).unwrap();
    model.add_transition(&s1, &s2, 0.20).unwrap();
    model.add_transition(&s2, &s2, 0.90).unwrap();
    model.add_transition(&s2, &s3, 0.10).unwrap();
    model.add_transition(&s3, &s3, 0.70).unwrap();
    model.add_transition(&s3, &model.end(), 0.30).unwrap();
    let model = model.bake().unwrap();

    let seq = chars("ACGACTATTCGAT");
    let answer = model.log_probability(&seq);
    println!("{}", answer);
    assert_abs_diff_eq!(answer.to_log_value(), -22.73896159971087, epsilon = 1e-7);

    let answer = model.viterbi(&seq).to_string();
    let expected =
        "example - start, s1, s2, s2, s2, s2, s2, s2, s2, s2, s2, s2, s2, s3, example - end";
    assert_eq!(expected, answer);
}

#[test]
fn add_transition_before_add_state() {
    let mut hmm = HmmBuilder::new("add transition test");
    let distribution = acgt(0.2, 0.3, 0.3, 0.2);
    let s1 = State::emitting(distribution.clone(), "s1");
    let s2 = State::emitting(distribution, "s2");
    let e = hmm.add_transition(&s1, &s2, 0.3).unwrap_err();
    assert!(e.to_string().contains("No such state"));
}

#[test]
fn add_transition_overwrites_weight() {
    let mut model = HmmBuilder::new("transition test");
    let distribution = acgt(0.2, 0.3, 0.3, 0.2);
    let s1 = State::emitting(distribution.clone(), "s1");
    let s2 = State::emitting(distribution, "s2");
    model.add_states(&[s1.clone(), s2.clone()]).unwrap();
    model.add_transition(&model.start(), &s1, 1.0).unwrap();
    model.add_transition(&s1, &s2, 0.6).unwrap();
    model.add_transition(&s1, &s1, 0.4).unwrap();
    model.add_transition(&s2, &s1, 0.6).unwrap();
    model.add_transition(&s2, &s2, 0.3).unwrap();
    model.add_transition(&s2, &s2, 0.3).unwrap();
    model.add_transition(&s2, &model.end(), 0.1).unwrap();
    let model = model.bake().unwrap();
    // 0.3 / (0.6 + 0.3 + 0.1), not 0.6 / (0.6 + 0.6 + 0.1)
    assert_abs_diff_eq!(model.transition_prob(&s2, &s2), p(0.3), epsilon = 1e-12);
    assert_abs_diff_eq!(model.transition_prob(&s2, &s1), p(0.6), epsilon = 1e-12);
}

#[test]
fn model_introspection() {
    let mut hmm = HmmBuilder::new("HiddenMarkovModel");
    let distribution = acgt(0.2, 0.3, 0.3, 0.2);
    let state1 = State::emitting(distribution.clone(), "s1");
    let state2 = State::emitting(distribution, "s2");
    hmm.add_states(&[state1.clone(), state2.clone()]).unwrap();
    hmm.add_edge(&hmm.start(), &state1).unwrap();
    hmm.add_edge(&state1, &state2).unwrap();
    // transitions into start are rejected
    assert!(matches!(
        hmm.add_edge(&state2, &hmm.start()),
        Err(HmmError::ReservedEndpoint { .. })
    ));
    hmm.add_edge(&state2, &hmm.end()).unwrap();
    for state in hmm.states() {
        println!("state name: {}", state.name());
    }
    assert_eq!(hmm.n_states(), 2);
    assert_eq!(hmm.n_edges(), 3);

    let model = hmm.bake().unwrap();
    assert_eq!(model.n_states(), 2);
    assert_eq!(model.n_edges(), 3);
    let r = model.viterbi(&chars("CG"));
    assert_eq!(r.names(), vec!["HiddenMarkovModel - start", "s1", "s2", "HiddenMarkovModel - end"]);
    assert_abs_diff_eq!(r.log_prob, p(0.3 * 0.3), epsilon = 1e-12);
}

#[test]
fn silent_cycle_fails_at_bake() {
    let mut hmm: HmmBuilder<char> = HmmBuilder::new("cycle");
    let d1 = State::silent("D1");
    let d2 = State::silent("D2");
    let d3 = State::silent("D3");
    hmm.add_states(&[d1.clone(), d2.clone(), d3.clone()]).unwrap();
    hmm.add_edge(&hmm.start(), &d1).unwrap();
    hmm.add_edge(&d1, &d2).unwrap();
    hmm.add_edge(&d2, &d3).unwrap();
    hmm.add_edge(&d3, &d1).unwrap();
    hmm.add_edge(&d3, &hmm.end()).unwrap();
    let e = hmm.bake().unwrap_err();
    assert!(matches!(e, HmmError::SilentCycle { .. }));
}

#[test]
fn impossible_sequence_is_not_an_error() {
    let s1 = State::emitting(acgt(0.5, 0.5, 0.0, 0.0), "s1");
    let mut hmm = HmmBuilder::new("ac only");
    hmm.add_state(&s1).unwrap();
    hmm.add_transition(&hmm.start(), &s1, 1.0).unwrap();
    hmm.add_transition(&s1, &s1, 0.5).unwrap();
    hmm.add_transition(&s1, &hmm.end(), 0.5).unwrap();
    let model = hmm.bake().unwrap();

    let seq = chars("ACGA");
    assert!(model.log_probability(&seq).is_zero());
    let v = model.viterbi(&seq);
    assert!(v.log_prob.is_zero());
    assert!(v.path.is_empty());

    let seq = chars("ACCA");
    assert!(!model.log_probability(&seq).is_zero());
}
