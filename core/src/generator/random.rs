use alloc::collections::VecDeque;
use alloc::vec::Vec;

use rand::prelude::*;

use super::*;

/// Grows a tree of links outwards from a randomly placed root.
///
/// Each visit of a pending cell either tries to grow one to three links from
/// it or defers it to the back of the queue. Deferring breaks up long
/// straight corridors; the order of these steps shapes the resulting boards,
/// so it must stay as is for layouts to reproduce from a seed.
#[derive(Debug)]
pub struct RandomNetworkGenerator<'a, R: ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> RandomNetworkGenerator<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }

    /// Links the front cell of `pending` to one random free neighbor, queueing it.
    fn add_random_link(&mut self, board: &mut Board, pending: &mut VecDeque<Coord2>) {
        let Some(&from) = pending.front() else {
            return;
        };

        let free: Vec<_> = board
            .geometry()
            .neighbors(from)
            .filter(|&(_, coords)| board[coords].mask().is_free())
            .collect();
        if free.is_empty() {
            return;
        }

        let (dir, to) = free[self.rng.random_range(0..free.len())];
        board.cell_mut(from).add_link(dir);
        board.cell_mut(to).add_link(dir.reverse());
        pending.push_back(to);
    }
}

impl<R: Rng + ?Sized> NetworkGenerator for RandomNetworkGenerator<'_, R> {
    fn generate(&mut self, board: &mut Board, skill: &SkillConfig) -> CellCount {
        let geometry = *board.geometry();

        for coords in geometry.iter_board() {
            board.cell_mut(coords).set_mask(Mask::Free);
        }
        board.clear_root();

        let (width, height) = geometry.size();
        if width == 0 || height == 0 {
            return 0;
        }
        let (start_x, start_y) = geometry.start();
        let root = (
            start_x + self.rng.random_range(0..width),
            start_y + self.rng.random_range(0..height),
        );
        board.set_root(root);

        let mut pending = VecDeque::from([root]);
        if self.rng.random_bool(0.5) {
            self.add_random_link(board, &mut pending);
        }

        while let Some(&front) = pending.front() {
            if self.rng.random_bool(0.5) {
                self.add_random_link(board, &mut pending);

                if self.rng.random_bool(0.5) {
                    self.add_random_link(board, &mut pending);
                }

                // a third link makes richer networks, including four-way crosses
                if skill.branch_factor.get() >= 3 && self.rng.random_ratio(1, 3) {
                    self.add_random_link(board, &mut pending);
                }
            } else {
                pending.push_back(front);
            }

            pending.pop_front();
        }

        let cells = board.used_cells();
        log::debug!("Created net with {cells} cells rooted at {root:?}");
        cells
    }
}
