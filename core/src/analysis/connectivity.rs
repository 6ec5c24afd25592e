use alloc::collections::VecDeque;

use ndarray::Array2;

use crate::*;

impl Board {
    /// Cells reachable from the root through links both ends agree on, as
    /// the board is currently rotated.
    ///
    /// Nothing is reachable while the root itself is turned away from its
    /// generated layout.
    pub fn reachable_cells(&self) -> Array2<bool> {
        let mut reached = Array2::from_elem(self.grid().to_nd_index(), false);

        let Some(root) = self.root() else {
            return reached;
        };
        if self[root].is_rotated() {
            return reached;
        }

        reached[root.to_nd_index()] = true;
        let mut to_visit = VecDeque::from([root]);

        while let Some(coords) = to_visit.pop_front() {
            for (dir, next) in self.geometry().neighbors(coords) {
                if reached[next.to_nd_index()] {
                    continue;
                }
                if self.is_linked(coords, next, dir) {
                    reached[next.to_nd_index()] = true;
                    to_visit.push_back(next);
                }
            }
        }

        reached
    }

    /// Recomputes every cell's connected flag.
    ///
    /// Returns whether any cell became connected that was not before, so a
    /// second call without rotations in between returns `false`.
    pub fn update_connections(&mut self) -> bool {
        let reached = self.reachable_cells();

        let mut newly_connected = 0;
        for coords in self.geometry().iter_grid() {
            let connected = reached[coords.to_nd_index()];
            let cell = self.cell_mut(coords);
            if connected && !cell.is_connected() {
                newly_connected += 1;
            }
            cell.set_connected(connected);
        }

        if newly_connected > 0 {
            log::trace!("{newly_connected} cells joined the network");
        }
        newly_connected != 0
    }

    /// A link needs the connector on both sides as currently rotated.
    fn is_linked(&self, from: Coord2, to: Coord2, dir: Direction) -> bool {
        self[from].effective_mask().has(dir) && self[to].effective_mask().has(dir.reverse())
    }
}
