use alloc::collections::VecDeque;
use alloc::vec::Vec;

use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Moves that turn the live `board` back into the solved layout.
///
/// Cells are visited breadth-first along the solved network from its root,
/// so the list unwinds outwards from the root. A half turn goes either way;
/// which way is picked at random per cell.
pub fn plan_moves<R: Rng + ?Sized>(
    snapshot: &SolvedSnapshot,
    board: &Board,
    rng: &mut R,
) -> Result<Vec<Move>> {
    let snapshot = snapshot.oriented_for(board.grid())?;
    let root = snapshot.root();

    let mut visited = Array2::from_elem(board.grid().to_nd_index(), false);
    visited[root.to_nd_index()] = true;
    let mut to_visit = VecDeque::from([root]);
    let mut moves = Vec::new();

    while let Some(coords) = to_visit.pop_front() {
        let Some(target) = snapshot.mask_at(coords) else {
            continue;
        };
        if let Some(cell) = board.cell_at(coords) {
            plan_cell(coords, cell, target, rng, &mut moves);
        }

        for next in snapshot.linked_neighbors(coords) {
            if !visited[next.to_nd_index()] {
                visited[next.to_nd_index()] = true;
                to_visit.push_back(next);
            }
        }
    }

    log::debug!("Planned {} moves from root {root:?}", moves.len());
    Ok(moves)
}

fn plan_cell<R: Rng + ?Sized>(
    coords: Coord2,
    cell: &Cell,
    target: Mask,
    rng: &mut R,
    moves: &mut Vec<Move>,
) {
    use QuarterTurn::*;

    if cell.effective_mask() == target {
        return;
    }

    if cell.rotated_mask(&[Clockwise]) == target {
        moves.push(Move::new(coords, Clockwise));
    } else if cell.rotated_mask(&[CounterClockwise]) == target {
        moves.push(Move::new(coords, CounterClockwise));
    } else if cell.rotated_mask(&[Clockwise, Clockwise]) == target {
        let turn = if rng.random_bool(0.5) {
            Clockwise
        } else {
            CounterClockwise
        };
        moves.extend([Move::new(coords, turn), Move::new(coords, turn)]);
    } else {
        log::trace!("No rotation of {coords:?} matches the solved layout");
    }
}
