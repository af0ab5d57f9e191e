// Copyright (c) Addison Crump, 2025, licensed under the EUPL-1.2-or-later.

//! Properties which must hold for any plateau, position and instruction sequence.

use mars_rovers::{Deployment, Heading, Plateau, Position, SimulationErrorKind, simulate};
use proptest::prelude::*;

fn heading() -> impl Strategy<Value = Heading> {
    prop::sample::select(Heading::ALL.to_vec())
}

fn instructions() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['L', 'M', 'R']), 1..40)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn rotation_is_a_permutation(heading in heading()) {
        prop_assert_eq!(heading, heading.left().right());
        prop_assert_eq!(heading, heading.right().left());
        prop_assert_eq!(heading, heading.left().left().left().left());
        prop_assert_eq!(heading, heading.right().right().right().right());
        prop_assert_ne!(heading, heading.left());
        prop_assert_ne!(heading, heading.right());
    }

    #[test]
    fn advance_stays_on_plateau(
        width in 1u32..20,
        height in 1u32..20,
        x in 0u32..20,
        y in 0u32..20,
        heading in heading(),
    ) {
        let plateau = Plateau::new(width, height).unwrap();
        let position = Position::from((x.min(width), y.min(height)));
        let mut current = position;
        for _ in 0..25 {
            current = current.advance(heading, &plateau);
            prop_assert!(plateau.contains(&current));
        }
    }

    #[test]
    fn outward_facing_rover_stays_put(size in 1u64..1000, steps in 1usize..20) {
        let moves = "M".repeat(steps);
        let input = format!("{size} {size}\n{size} {size} N\n{moves}\n0 0 W\n{moves}");
        prop_assert_eq!(
            format!("{size} {size} N\n0 0 W"),
            simulate(&input).unwrap()
        );
    }

    #[test]
    fn one_report_per_rover(
        width in 1u64..30,
        height in 1u64..30,
        rovers in prop::collection::vec((0u64..30, 0u64..30, heading(), instructions()), 1..8),
    ) {
        let mut input = format!("{width} {height}");
        for (x, y, heading, instructions) in &rovers {
            input.push_str(&format!(
                "\n{} {} {heading}\n{instructions}",
                x % (width + 1),
                y % (height + 1)
            ));
        }
        match simulate(&input) {
            Ok(output) => {
                prop_assert_eq!(rovers.len(), output.lines().count());
                for line in output.lines() {
                    let deployment: Deployment<u64> =
                        format!("{width} {height}\n{line}\nL").parse().unwrap();
                    let rover = &deployment.rovers()[0];
                    prop_assert!(deployment.plateau().contains(rover.position()));
                }
            }
            Err(err) => prop_assert_eq!(SimulationErrorKind::CollisionAvoided, err.kind()),
        }
    }
}
