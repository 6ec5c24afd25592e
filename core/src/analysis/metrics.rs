use crate::*;

impl Board {
    /// Whether every terminal (degree 1 cell) is connected to the root.
    ///
    /// Reads the cached connected flags, so [`Board::update_connections`]
    /// must have run since the last rotation.
    pub fn is_solved(&self) -> bool {
        self.iter_board_cells()
            .all(|(_, cell)| cell.degree() != 1 || cell.is_connected())
    }

    /// Cable pieces on the board that are not connected to the root.
    ///
    /// May be non-zero on a solved board when some pieces were not needed to
    /// reach every terminal.
    pub fn unconnected_cells(&self) -> CellCount {
        let unused = self
            .iter_board_cells()
            .filter(|(_, cell)| !cell.mask().is_free() && !cell.is_connected())
            .count();
        CellCount::try_from(unused).unwrap_or(CellCount::MAX)
    }

    pub fn terminal_count(&self) -> CellCount {
        let terminals = self
            .iter_board_cells()
            .filter(|(_, cell)| cell.degree() == 1)
            .count();
        CellCount::try_from(terminals).unwrap_or(CellCount::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Board {
        Board::from_layout(
            BoardGeometry::full((3, 1), false),
            (0, 0),
            [
                ((0, 0), Links::RIGHT),
                ((1, 0), Links::LEFT | Links::RIGHT),
                ((2, 0), Links::LEFT),
            ],
        )
        .unwrap()
    }

    #[test]
    fn unrotated_chain_is_solved() {
        let mut board = chain();
        board.update_connections();

        assert!(board.is_solved());
        assert_eq!(board.unconnected_cells(), 0);
        assert_eq!(board.terminal_count(), 2);
    }

    #[test]
    fn turned_terminal_leaves_one_unused_cell() {
        let mut board = chain();
        board.turn_cell((2, 0), QuarterTurn::Clockwise).unwrap();
        board.update_connections();

        assert!(!board.is_solved());
        assert_eq!(board.unconnected_cells(), 1);
    }

    #[test]
    fn solved_check_is_stable() {
        let mut board = chain();
        board.turn_cell((1, 0), QuarterTurn::Clockwise).unwrap();
        board.update_connections();

        let first = board.is_solved();
        assert_eq!(board.is_solved(), first);
        assert!(!first);
    }

    #[test]
    fn dangling_junction_does_not_block_a_win() {
        // root feeds a terminal to the right; a stray corner piece sits below
        let mut board = Board::from_layout(
            BoardGeometry::full((2, 2), false),
            (0, 0),
            [
                ((0, 0), Links::RIGHT),
                ((1, 0), Links::LEFT),
                ((0, 1), Links::RIGHT | Links::UP),
            ],
        )
        .unwrap();
        board.update_connections();

        assert!(board.is_solved());
        assert_eq!(board.unconnected_cells(), 1);
    }

    #[test]
    fn free_cells_are_never_counted() {
        let mut board = Board::new(BoardGeometry::full((3, 3), false));
        board.update_connections();

        assert!(board.is_solved());
        assert_eq!(board.unconnected_cells(), 0);
    }
}
