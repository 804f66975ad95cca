use pacmaze_core::GridPoint;

/// Set of pellets still on the board together with the running score.
///
/// The sum of [`PelletField::score`] and the number of remaining pellets
/// always equals [`PelletField::total`].
#[derive(Clone, Debug, PartialEq)]
pub struct PelletField {
    canonical: Vec<GridPoint>,
    remaining: Vec<GridPoint>,
    score: u32,
}

impl PelletField {
    /// Creates a new field populated with the provided pellets.
    ///
    /// Duplicate coordinates are collapsed into a single pellet.
    #[must_use]
    pub fn new(pellets: impl IntoIterator<Item = GridPoint>) -> Self {
        let mut canonical: Vec<GridPoint> = Vec::new();
        for pellet in pellets {
            if !canonical.contains(&pellet) {
                canonical.push(pellet);
            }
        }

        Self {
            remaining: canonical.clone(),
            canonical,
            score: 0,
        }
    }

    /// Removes every pellet inside the square of half-width `capture_radius`
    /// centred on `point`, returning how many were captured.
    ///
    /// Both the point and the radius are expressed in cell units. The square's
    /// edges are inclusive.
    pub fn consume_near(&mut self, point: GridPoint, capture_radius: f32) -> u32 {
        let before = self.remaining.len();
        self.remaining.retain(|pellet| {
            let captured = pellet.x >= point.x - capture_radius
                && pellet.x <= point.x + capture_radius
                && pellet.y >= point.y - capture_radius
                && pellet.y <= point.y + capture_radius;
            !captured
        });
        let consumed = u32::try_from(before - self.remaining.len()).unwrap_or(u32::MAX);
        self.score = self.score.saturating_add(consumed);
        consumed
    }

    /// Restores every canonical pellet and clears the score.
    pub fn reset(&mut self) {
        self.remaining.clone_from(&self.canonical);
        self.score = 0;
    }

    /// Pellets that have not been consumed yet.
    #[must_use]
    pub fn remaining(&self) -> &[GridPoint] {
        &self.remaining
    }

    /// Number of pellets consumed since the last reset.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Number of pellets present at the start of every round.
    #[must_use]
    pub fn total(&self) -> u32 {
        u32::try_from(self.canonical.len()).unwrap_or(u32::MAX)
    }

    /// Reports whether every pellet has been consumed.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.score == self.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field() -> PelletField {
        PelletField::new([
            GridPoint::new(1.5, 1.5),
            GridPoint::new(2.5, 1.5),
            GridPoint::new(1.5, 2.5),
            GridPoint::new(2.5, 2.5),
        ])
    }

    #[test]
    fn duplicates_are_collapsed() {
        let field = PelletField::new([GridPoint::new(1.5, 1.5), GridPoint::new(1.5, 1.5)]);
        assert_eq!(field.total(), 1);
        assert_eq!(field.remaining().len(), 1);
    }

    #[test]
    fn capture_uses_a_square_not_a_circle() {
        let mut field = field();
        // The corner pellet is 0.3 away on both axes: outside a circle of
        // radius 0.32, inside the square of the same half-width.
        let consumed = field.consume_near(GridPoint::new(2.2, 2.2), 0.32);
        assert_eq!(consumed, 1);
        assert_eq!(field.score(), 1);
        assert!(!field.remaining().contains(&GridPoint::new(2.5, 2.5)));
    }

    #[test]
    fn capture_edges_are_inclusive() {
        let mut field = field();
        assert_eq!(field.consume_near(GridPoint::new(1.0, 1.5), 0.5), 1);
        assert_eq!(field.remaining().len(), 3);
    }

    #[test]
    fn consuming_twice_at_the_same_point_scores_once() {
        let mut field = field();
        assert_eq!(field.consume_near(GridPoint::new(1.5, 1.5), 0.1), 1);
        assert_eq!(field.consume_near(GridPoint::new(1.5, 1.5), 0.1), 0);
        assert_eq!(field.score(), 1);
    }

    #[test]
    fn reset_restores_every_pellet() {
        let mut field = field();
        let _ = field.consume_near(GridPoint::new(2.0, 2.0), 1.0);
        assert!(field.is_cleared());

        field.reset();
        assert_eq!(field.score(), 0);
        assert_eq!(field.remaining().len(), 4);
        assert!(!field.is_cleared());
    }

    proptest! {
        #[test]
        fn score_and_remaining_always_sum_to_total(
            probes in proptest::collection::vec((0.0f32..4.0, 0.0f32..4.0, 0.0f32..1.0), 0..32)
        ) {
            let mut field = field();
            for (x, y, radius) in probes {
                let _ = field.consume_near(GridPoint::new(x, y), radius);
                let remaining = u32::try_from(field.remaining().len()).unwrap_or(u32::MAX);
                prop_assert_eq!(field.score() + remaining, field.total());
            }
        }
    }
}
