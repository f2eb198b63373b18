// properties.rs - Invariants that hold for every grid

use conway::{Cell, EdgePolicy, GridEngine, LifeError};
use proptest::prelude::*;

fn arb_edge() -> impl Strategy<Value = EdgePolicy> {
    prop_oneof![Just(EdgePolicy::Clamped), Just(EdgePolicy::Wrapped)]
}

#[derive(Clone, Debug)]
enum Op {
    Advance,
    Toggle(i32, i32),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Advance), (0i32..16, 0i32..16).prop_map(|(r, c)| Op::Toggle(r, c))]
}

fn random_engine(width: u32, height: u32, edge: EdgePolicy, seed: u64) -> GridEngine {
    let mut engine = GridEngine::new(width, height, edge).unwrap();
    engine.randomize(seed, 0.4);
    engine
}

proptest! {
    #[test]
    fn empty_grid_never_births(width in 1u32..20, height in 1u32..20, edge in arb_edge()) {
        let mut engine = GridEngine::new(width, height, edge).unwrap();
        engine.advance();
        prop_assert_eq!(engine.population(), 0);
        prop_assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn lone_cell_dies(
        width in 3u32..20,
        height in 3u32..20,
        edge in arb_edge(),
        row in 0i32..20,
        col in 0i32..20,
    ) {
        let row = row % height as i32;
        let col = col % width as i32;
        let mut engine = GridEngine::new(width, height, edge).unwrap();
        engine.toggle(row, col).unwrap();
        engine.advance();
        prop_assert_eq!(engine.population(), 0);
    }

    #[test]
    fn toggle_is_an_involution(
        width in 1u32..16,
        height in 1u32..16,
        edge in arb_edge(),
        seed in any::<u64>(),
        row in 0i32..16,
        col in 0i32..16,
    ) {
        let row = row % height as i32;
        let col = col % width as i32;
        let mut engine = random_engine(width, height, edge, seed);
        let before = engine.grid().clone();
        let flipped = engine.toggle(row, col).unwrap();
        prop_assert_eq!(flipped, before.get(row, col).unwrap().flipped());
        engine.toggle(row, col).unwrap();
        prop_assert_eq!(engine.grid(), &before);
    }

    #[test]
    fn just_outside_is_out_of_bounds(width in 1u32..16, height in 1u32..16, edge in arb_edge()) {
        let mut engine = GridEngine::new(width, height, edge).unwrap();
        let (w, h) = (width as i32, height as i32);
        for (row, col) in [(-1, 0), (0, -1), (h, 0), (0, w), (h, w), (-1, -1)] {
            let is_oob =
                |r: Result<Cell, LifeError>| matches!(r, Err(LifeError::OutOfBounds { .. }));
            prop_assert!(is_oob(engine.toggle(row, col)));
            prop_assert!(is_oob(engine.cell_state(row, col)));
        }
        prop_assert_eq!(engine.population(), 0);
    }

    #[test]
    fn generation_counts_only_advances(
        edge in arb_edge(),
        seed in any::<u64>(),
        ops in prop::collection::vec(arb_op(), 0..40),
    ) {
        let mut engine = random_engine(16, 16, edge, seed);
        let mut advances = 0;
        for op in ops {
            match op {
                Op::Advance => {
                    let t = engine.advance();
                    advances += 1;
                    prop_assert_eq!(t.generation, advances);
                    prop_assert_eq!(t.population, engine.population());
                }
                Op::Toggle(r, c) => {
                    engine.toggle(r, c).unwrap();
                }
            }
            prop_assert_eq!(engine.generation(), advances);
        }
    }

    #[test]
    fn clamped_counts_never_exceed_wrapped(
        width in 1u32..12,
        height in 1u32..12,
        seed in any::<u64>(),
    ) {
        let clamped = random_engine(width, height, EdgePolicy::Clamped, seed);
        let wrapped = random_engine(width, height, EdgePolicy::Wrapped, seed);
        prop_assert_eq!(clamped.grid(), wrapped.grid());
        for row in 0..height as i32 {
            for col in 0..width as i32 {
                let c = clamped.neighbor_count(row, col).unwrap();
                let w = wrapped.neighbor_count(row, col).unwrap();
                prop_assert!(c <= w && w <= 8, "({row}, {col}): clamped {c}, wrapped {w}");
            }
        }
    }

    #[test]
    fn advance_matches_per_cell_rule(
        width in 1u32..12,
        height in 1u32..12,
        edge in arb_edge(),
        seed in any::<u64>(),
    ) {
        let mut engine = random_engine(width, height, edge, seed);
        let before = engine.clone();
        let t = engine.advance();
        let mut births = 0;
        let mut deaths = 0;
        for row in 0..height as i32 {
            for col in 0..width as i32 {
                let old = before.cell_state(row, col).unwrap();
                let expected = conway::next_state(old, before.neighbor_count(row, col).unwrap());
                prop_assert_eq!(engine.cell_state(row, col).unwrap(), expected);
                match (old, expected) {
                    (Cell::Dead, Cell::Alive) => births += 1,
                    (Cell::Alive, Cell::Dead) => deaths += 1,
                    _ => {}
                }
            }
        }
        prop_assert_eq!((t.births, t.deaths), (births, deaths));
    }
}
