//!
//! Mock models for testing
//!
use super::builder::HmmBuilder;
use super::distribution::DiscreteDistribution;
use super::model::Model;
use super::state::State;
use crate::error::HmmError;

///
/// Three-state DNA model
///
/// ```text
///            0.9        0.8        0.9        0.7
///           ┌──┐       ┌──┐       ┌──┐
/// start -> s1 -0.2-> s2 -0.1-> s3 -0.3-> end
///   └──────0.1───────┘
/// ```
///
/// * s1: A=0.35 C=0.20 G=0.05 T=0.40
/// * s2: uniform
/// * s3: A=0.10 C=0.40 G=0.40 T=0.10
///
pub fn mock_example() -> Model<char> {
    build_example().expect("mock_example is a valid model")
}

fn build_example() -> Result<Model<char>, HmmError> {
    let d1 = DiscreteDistribution::new(vec![('A', 0.35), ('C', 0.20), ('G', 0.05), ('T', 0.40)]);
    let d2 = DiscreteDistribution::uniform(&['A', 'C', 'G', 'T']);
    let d3 = DiscreteDistribution::new(vec![('A', 0.10), ('C', 0.40), ('G', 0.40), ('T', 0.10)]);

    let s1 = State::emitting(d1, "s1");
    let s2 = State::emitting(d2, "s2");
    let s3 = State::emitting(d3, "s3");

    let mut model = HmmBuilder::new("example");
    model.add_states(&[s1.clone(), s2.clone(), s3.clone()])?;
    let (start, end) = (model.start(), model.end());
    model.add_transition(&start, &s1, 0.90)?;
    model.add_transition(&start, &s2, 0.10)?;
    model.add_transition(&s1, &s1, 0.80)?;
    model.add_transition(&s1, &s2, 0.20)?;
    model.add_transition(&s2, &s2, 0.90)?;
    model.add_transition(&s2, &s3, 0.10)?;
    model.add_transition(&s3, &s3, 0.70)?;
    model.add_transition(&s3, &end, 0.30)?;
    model.bake()
}

///
/// Profile HMM of a reference sequence, named "profile"
///
/// For each base `j = 1..=L` there are a match state `Mj` (emits the base
/// with p=0.97), an insertion state `Ij` (uniform) and a silent deletion
/// state `Dj`, plus `I0` before the first base.
///
/// ```text
/// M -> M: 0.9   M -> I: 0.05  M -> D: 0.05
/// I -> M: 0.8   I -> I: 0.1   I -> D: 0.1
/// D -> M: 0.8   D -> I: 0.1   D -> D: 0.1
/// ```
///
/// Transitions into `M(L+1)` go to end; `D(L+1)` does not exist.
///
pub fn mock_profile(reference: &[u8]) -> Model<u8> {
    build_profile(reference).expect("mock_profile is a valid model")
}

fn build_profile(reference: &[u8]) -> Result<Model<u8>, HmmError> {
    const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];
    let mut model = HmmBuilder::new("profile");
    let l = reference.len();

    let insert = |j: usize| State::emitting(DiscreteDistribution::uniform(&BASES), format!("I{}", j));
    let ms: Vec<State<u8>> = reference
        .iter()
        .enumerate()
        .map(|(j, &base)| {
            let d: DiscreteDistribution<u8> = BASES
                .iter()
                .map(|&b| (b, if b == base { 0.97 } else { 0.01 }))
                .collect();
            State::emitting(d, format!("M{}", j + 1))
        })
        .collect();
    let is: Vec<State<u8>> = (0..=l).map(insert).collect();
    let ds: Vec<State<u8>> = (1..=l).map(|j| State::silent(format!("D{}", j))).collect();

    model.add_state(&is[0])?;
    for j in 0..l {
        model.add_states(&[ms[j].clone(), is[j + 1].clone(), ds[j].clone()])?;
    }

    let (start, end) = (model.start(), model.end());
    // states of column j (0 = start/I0), and the next match/deletion
    for j in 0..=l {
        let next_m = if j < l { &ms[j] } else { &end };
        let next_d = if j < l { Some(&ds[j]) } else { None };
        let column: Vec<(&State<u8>, [f64; 3])> = if j == 0 {
            vec![(&start, [0.9, 0.05, 0.05]), (&is[0], [0.8, 0.1, 0.1])]
        } else {
            vec![
                (&ms[j - 1], [0.9, 0.05, 0.05]),
                (&is[j], [0.8, 0.1, 0.1]),
                (&ds[j - 1], [0.8, 0.1, 0.1]),
            ]
        };
        for (source, [to_m, to_i, to_d]) in column {
            model.add_transition(source, next_m, to_m)?;
            model.add_transition(source, &is[j], to_i)?;
            if let Some(next_d) = next_d {
                model.add_transition(source, next_d, to_d)?;
            }
        }
    }
    model.bake()
}
