//! Player pickups and adversary proximity checks.

use std::collections::BTreeSet;

use maze_chase_core::{AdversaryId, CellCoord, Position};

/// Removes the collectible under the player, reporting the consumed cell.
///
/// The player's cell is derived from the upper-left corner of its position,
/// so at most one collectible can be consumed per call.
pub fn consume_collectible(
    collectibles: &mut BTreeSet<CellCoord>,
    player: Position,
    cell_size: f32,
) -> Option<CellCoord> {
    let cell = player.cell(cell_size);
    collectibles.remove(&cell).then_some(cell)
}

/// Adversaries whose distance to the player is strictly below `reach`.
///
/// Every adversary is measured against the same player position, so several
/// adversaries may be reported for a single tick.
#[must_use]
pub fn adversaries_in_reach<I>(player: Position, adversaries: I, reach: f32) -> Vec<AdversaryId>
where
    I: IntoIterator<Item = (AdversaryId, Position)>,
{
    adversaries
        .into_iter()
        .filter(|(_, position)| player.distance(*position) < reach)
        .map(|(id, _)| id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consumes_collectible_under_player_once() {
        let mut collectibles: BTreeSet<CellCoord> =
            [CellCoord::new(1, 1), CellCoord::new(2, 1)].into_iter().collect();
        let player = Position::new(25.0, 39.0);

        assert_eq!(
            consume_collectible(&mut collectibles, player, 20.0),
            Some(CellCoord::new(1, 1))
        );
        assert_eq!(consume_collectible(&mut collectibles, player, 20.0), None);
        assert_eq!(collectibles.len(), 1);
    }

    #[test]
    fn reach_is_strict() {
        let player = Position::new(100.0, 100.0);
        let adversaries = [
            (AdversaryId::new(0), Position::new(120.0, 100.0)),
            (AdversaryId::new(1), Position::new(119.5, 100.0)),
            (AdversaryId::new(2), Position::new(100.0, 100.0)),
        ];

        assert_eq!(
            adversaries_in_reach(player, adversaries, 20.0),
            vec![AdversaryId::new(1), AdversaryId::new(2)]
        );
    }
}
