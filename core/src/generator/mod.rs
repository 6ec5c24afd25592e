use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Lays out a network on the active board, returning how many board cells it uses.
///
/// Implementations never fail; a sparse layout is a quality problem for the
/// caller to retry, see [`generate_network`].
pub trait NetworkGenerator {
    fn generate(&mut self, board: &mut Board, skill: &SkillConfig) -> CellCount;
}

/// Attempts made before a sparse layout is accepted anyway.
pub const MAX_GENERATION_ATTEMPTS: u8 = 10;

/// Share of the board, in percent, a layout must cover to be accepted early.
pub const MIN_COVERAGE_PERCENT: u32 = 85;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub tries: u8,
    pub cells: CellCount,
    pub min_cells: CellCount,
}

impl GenerationReport {
    pub const fn is_dense_enough(&self) -> bool {
        self.cells >= self.min_cells
    }
}

/// Runs `generator` until the network covers enough of the board, or the
/// attempts run out, in which case the last layout stands.
pub fn generate_network<G: NetworkGenerator + ?Sized>(
    generator: &mut G,
    board: &mut Board,
    skill: &SkillConfig,
) -> Result<GenerationReport> {
    let board_cells = board.geometry().board_cells();
    if board_cells < 2 {
        return Err(GameError::DegenerateBoard);
    }

    let min_cells = u32::from(board_cells) * MIN_COVERAGE_PERCENT / 100;
    let min_cells = CellCount::try_from(min_cells).unwrap_or(CellCount::MAX);

    let mut tries = 0;
    let mut cells = 0;
    while cells < min_cells && tries < MAX_GENERATION_ATTEMPTS {
        cells = generator.generate(board, skill);
        tries += 1;
        log::debug!("Generation attempt {tries} used {cells} of {board_cells} cells");
    }

    let report = GenerationReport {
        tries,
        cells,
        min_cells,
    };
    if report.is_dense_enough() {
        log::info!("Created net in {tries} tries with {cells} cells (min {min_cells})");
    } else {
        log::warn!(
            "Accepting sparse net after {tries} tries, {cells} cells (min {min_cells})"
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pretends to wire a fixed number of cells, counting calls.
    struct FixedGenerator {
        results: &'static [CellCount],
        calls: usize,
    }

    impl NetworkGenerator for FixedGenerator {
        fn generate(&mut self, _board: &mut Board, _skill: &SkillConfig) -> CellCount {
            let cells = self.results[self.calls.min(self.results.len() - 1)];
            self.calls += 1;
            cells
        }
    }

    fn board(size: Coord2) -> Board {
        Board::new(BoardGeometry::full(size, false))
    }

    #[test]
    fn stops_once_coverage_is_reached() {
        let mut generator = FixedGenerator {
            results: &[3, 9, 20],
            calls: 0,
        };

        let report =
            generate_network(&mut generator, &mut board((4, 4)), &Skill::Novice.config())
                .unwrap();

        assert_eq!(report.min_cells, 13);
        assert_eq!(report.tries, 3);
        assert_eq!(generator.calls, 3);
        assert!(report.is_dense_enough());
    }

    #[test]
    fn accepts_tenth_attempt_when_sparse() {
        let mut generator = FixedGenerator {
            results: &[1],
            calls: 0,
        };

        let report =
            generate_network(&mut generator, &mut board((4, 4)), &Skill::Novice.config())
                .unwrap();

        assert_eq!(report.tries, MAX_GENERATION_ATTEMPTS);
        assert_eq!(report.cells, 1);
        assert!(!report.is_dense_enough());
    }

    #[test]
    fn single_cell_board_is_degenerate() {
        let mut generator = FixedGenerator {
            results: &[1],
            calls: 0,
        };

        let result =
            generate_network(&mut generator, &mut board((1, 1)), &Skill::Novice.config());

        assert_eq!(result, Err(GameError::DegenerateBoard));
        assert_eq!(generator.calls, 0);
    }
}
