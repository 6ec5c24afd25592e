use alloc::vec::Vec;
use core::num::Saturating;

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Idle,
    Running,
    Solved,
}

impl EngineState {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_solved(self) -> bool {
        matches!(self, Self::Solved)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Everything needed to resume a game later, possibly on a transposed grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    /// `None` for custom games.
    pub skill: Option<Skill>,
    pub rules: SkillConfig,
    pub state: EngineState,
    pub clicks: u32,
    pub solver_used: bool,
    pub board: SavedBoard,
    pub solved: Option<SolvedSnapshot>,
}

/// A game session: one board, its solved layout, and the player's progress.
///
/// Every command takes `&mut self`, so sharing an engine between threads
/// means wrapping it in a single lock.
#[derive(Clone, Debug)]
pub struct PlayEngine {
    config: BoardConfig,
    skill: Option<Skill>,
    rules: SkillConfig,
    board: Board,
    solved: Option<SolvedSnapshot>,
    state: EngineState,
    clicks: Saturating<u32>,
    last_clicked: Option<Coord2>,
    solver_used: bool,
    rng: SmallRng,
}

impl PlayEngine {
    pub fn new(config: BoardConfig, seed: u64) -> Self {
        Self {
            config,
            skill: None,
            rules: Skill::default().config(),
            board: Board::new(BoardGeometry::full(config.grid, false)),
            solved: None,
            state: EngineState::Idle,
            clicks: Saturating(0),
            last_clicked: None,
            solver_used: false,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Starts a session on a hand-made board, taken as already solved.
    ///
    /// The board is not scrambled; rotate its cells to set up the puzzle.
    pub fn from_board(board: Board, rules: SkillConfig, seed: u64) -> Result<Self> {
        let solved = SolvedSnapshot::capture(&board)?;
        let mut engine = Self::new(BoardConfig::new(board.grid()), seed);
        engine.rules = rules;
        engine.board = board;
        engine.solved = Some(solved);
        engine.state = EngineState::Running;
        engine.board.update_connections();
        Ok(engine)
    }

    /// Generates and scrambles a new board for `skill`.
    pub fn new_game(&mut self, skill: Skill) -> Result<GenerationReport> {
        let geometry = skill.geometry(self.config.grid)?;
        self.start_game(Some(skill), skill.config(), geometry)
    }

    /// Generates a board of `size` with custom rules, centered in the grid.
    pub fn new_custom_game(&mut self, rules: SkillConfig, size: Coord2) -> Result<GenerationReport> {
        let geometry = BoardGeometry::centered(self.config.grid, size, rules.wraps)?;
        self.start_game(None, rules, geometry)
    }

    fn start_game(
        &mut self,
        skill: Option<Skill>,
        rules: SkillConfig,
        geometry: BoardGeometry,
    ) -> Result<GenerationReport> {
        let mut board = Board::new(geometry);
        let mut generator = RandomNetworkGenerator::new(&mut self.rng);
        let report = generate_network(&mut generator, &mut board, &rules)?;

        let solved = SolvedSnapshot::capture(&board)?;
        board.scramble(&mut self.rng, rules.blind_threshold);
        board.update_connections();

        self.skill = skill;
        self.rules = rules;
        self.board = board;
        self.solved = Some(solved);
        self.state = EngineState::Running;
        self.clicks = Saturating(0);
        self.last_clicked = None;
        self.solver_used = false;
        Ok(report)
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn skill(&self) -> Option<Skill> {
        self.skill
    }

    pub fn rules(&self) -> SkillConfig {
        self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn solved_snapshot(&self) -> Option<&SolvedSnapshot> {
        self.solved.as_ref()
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn clicks(&self) -> u32 {
        self.clicks.0
    }

    pub fn solver_used(&self) -> bool {
        self.solver_used
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }

    pub fn unconnected_cells(&self) -> CellCount {
        self.board.unconnected_cells()
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<&Cell> {
        self.board.cell_at(coords)
    }

    pub fn root(&self) -> Option<Coord2> {
        self.board.root()
    }

    pub fn focus(&self) -> Coord2 {
        self.board.focus()
    }

    pub fn set_focus(&mut self, coords: Coord2) -> Result<()> {
        self.board.set_focus(coords)
    }

    /// Turns a cell by one quarter, as a player click.
    pub fn rotate(&mut self, coords: Coord2, turn: QuarterTurn) -> Result<RotateOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_game()?;

        let cell = &self.board[coords];
        if !cell.is_interactive() || cell.is_locked() {
            return Ok(RotateOutcome::Rejected);
        }

        self.count_click(coords);
        self.board.set_focus(coords)?;
        self.turn(coords, turn)
    }

    pub fn toggle_lock(&mut self, coords: Coord2) -> Result<LockOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_game()?;

        let cell = self.board.cell_mut(coords);
        if !cell.is_interactive() {
            return Ok(LockOutcome::Rejected);
        }

        let locked = !cell.is_locked();
        cell.set_locked(locked);
        Ok(if locked {
            LockOutcome::Locked
        } else {
            LockOutcome::Unlocked
        })
    }

    /// Moves that bring the board back to its solved layout, outwards from the root.
    ///
    /// Empty before any game exists. Asking marks the game as solver-assisted.
    pub fn autosolve_plan(&mut self) -> Result<Vec<Move>> {
        let Some(solved) = &self.solved else {
            return Ok(Vec::new());
        };

        let moves = plan_moves(solved, &self.board, &mut self.rng)?;
        self.solver_used = true;
        Ok(moves)
    }

    /// Plays one planned move: the cell gets focus and loses its lock and
    /// blind flags before it turns.
    pub fn apply_move(&mut self, mv: Move) -> Result<RotateOutcome> {
        let coords = self.board.validate_coords(mv.coords)?;
        self.check_game()?;

        if !self.board[coords].is_interactive() {
            return Ok(RotateOutcome::Rejected);
        }

        self.board.set_focus(coords)?;
        self.board.cell_mut(coords).set_locked(false);
        self.turn(coords, mv.turn)
    }

    pub fn save(&self) -> SavedGame {
        SavedGame {
            skill: self.skill,
            rules: self.rules,
            state: self.state,
            clicks: self.clicks.0,
            solver_used: self.solver_used,
            board: self.board.export(),
            solved: self.solved.clone(),
        }
    }

    /// Resumes a saved game on this engine's grid, which may be the saved grid
    /// transposed. Nothing changes on error.
    pub fn restore(&mut self, saved: &SavedGame) -> Result<()> {
        let grid = self.config.grid;
        let solved = saved
            .solved
            .as_ref()
            .map(|solved| solved.oriented_for(grid))
            .transpose()?;

        let mut board = Board::new(BoardGeometry::full(grid, false));
        board.import(&saved.board)?;
        board.update_connections();

        self.skill = saved.skill;
        self.rules = saved.rules;
        self.board = board;
        self.solved = solved;
        self.state = saved.state;
        self.clicks = Saturating(saved.clicks);
        self.last_clicked = None;
        self.solver_used = saved.solver_used;
        log::info!("Restored {:?} game onto {grid:?}", self.state);
        Ok(())
    }

    /// Switches to a differently shaped grid, carrying the game over.
    pub fn reorient(&mut self, config: BoardConfig) -> Result<()> {
        let saved = self.save();
        let previous = core::mem::replace(&mut self.config, config);
        if let Err(err) = self.restore(&saved) {
            self.config = previous;
            return Err(err);
        }
        Ok(())
    }

    fn turn(&mut self, coords: Coord2, turn: QuarterTurn) -> Result<RotateOutcome> {
        self.board.turn_cell(coords, turn)?;
        self.board.cell_mut(coords).set_blind(false);
        let newly_connected = self.board.update_connections();

        Ok(if self.state.is_running() && self.board.is_solved() {
            self.state = EngineState::Solved;
            self.board.unblind_all();
            log::info!("Solved in {} clicks", self.clicks.0);
            RotateOutcome::Solved
        } else if newly_connected {
            RotateOutcome::Connected
        } else {
            RotateOutcome::Rotated
        })
    }

    /// Repeated clicks on one cell count once; nothing counts after the win.
    fn count_click(&mut self, coords: Coord2) {
        if !self.state.is_solved() && self.last_clicked != Some(coords) {
            self.clicks += 1;
        }
        self.last_clicked = Some(coords);
    }

    fn check_game(&self) -> Result<()> {
        match self.state {
            EngineState::Idle => Err(GameError::NoGame),
            EngineState::Running | EngineState::Solved => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Root, straight middle piece and terminal in a row, all solved.
    fn chain_engine() -> PlayEngine {
        let board = Board::from_layout(
            BoardGeometry::full((3, 1), false),
            (0, 0),
            [
                ((0, 0), Links::RIGHT),
                ((1, 0), Links::LEFT | Links::RIGHT),
                ((2, 0), Links::LEFT),
            ],
        )
        .unwrap();
        PlayEngine::from_board(board, Skill::Novice.config(), 0).unwrap()
    }

    fn solve(engine: &mut PlayEngine) -> usize {
        let moves = engine.autosolve_plan().unwrap();
        for &mv in &moves {
            engine.apply_move(mv).unwrap();
        }
        moves.len()
    }

    #[test]
    fn idle_engine_rejects_commands() {
        let mut engine = PlayEngine::new(BoardConfig::LANDSCAPE, 1);

        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.rotate((0, 0), QuarterTurn::Clockwise), Err(GameError::NoGame));
        assert_eq!(engine.toggle_lock((0, 0)), Err(GameError::NoGame));
        assert!(engine.autosolve_plan().unwrap().is_empty());
        assert!(!engine.solver_used());
    }

    #[test]
    fn new_game_keeps_solved_layout_and_scrambles() {
        let mut engine = PlayEngine::new(BoardConfig::LANDSCAPE, 7);

        let report = engine.new_game(Skill::Expert).unwrap();

        assert_eq!(engine.state(), EngineState::Running);
        assert_eq!(engine.skill(), Some(Skill::Expert));
        assert_eq!(engine.board().geometry().size(), (15, 8));
        assert_eq!(report.cells, engine.board().used_cells());

        let solved = engine.solved_snapshot().unwrap();
        assert_eq!(Some(solved.root()), engine.root());
        for (coords, cell) in engine.board().iter_board_cells() {
            assert_eq!(solved.mask_at(coords), Some(cell.mask()));
        }
    }

    #[test]
    fn turning_terminal_breaks_the_chain() {
        let mut engine = chain_engine();
        assert!(engine.is_solved());

        let outcome = engine.rotate((2, 0), QuarterTurn::Clockwise).unwrap();

        assert_eq!(outcome, RotateOutcome::Rotated);
        assert!(engine.board()[(0, 0)].is_connected());
        assert!(engine.board()[(1, 0)].is_connected());
        assert!(!engine.board()[(2, 0)].is_connected());
        assert!(!engine.is_solved());
        assert_eq!(engine.unconnected_cells(), 1);
        assert_eq!(engine.focus(), (2, 0));
    }

    #[test]
    fn reconnecting_a_branch_reports_connected() {
        let board = Board::from_layout(
            BoardGeometry::full((3, 2), false),
            (0, 0),
            [
                ((0, 0), Links::RIGHT),
                ((1, 0), Links::LEFT | Links::RIGHT | Links::DOWN),
                ((2, 0), Links::LEFT),
                ((1, 1), Links::UP),
            ],
        )
        .unwrap();
        let mut engine = PlayEngine::from_board(board, Skill::Novice.config(), 0).unwrap();
        engine.rotate((2, 0), QuarterTurn::Clockwise).unwrap();
        engine.rotate((1, 1), QuarterTurn::Clockwise).unwrap();
        assert_eq!(engine.unconnected_cells(), 2);

        let outcome = engine.rotate((1, 1), QuarterTurn::CounterClockwise).unwrap();

        assert_eq!(outcome, RotateOutcome::Connected);
        assert!(engine.board()[(1, 1)].is_connected());
        assert!(!engine.board()[(2, 0)].is_connected());
        assert_eq!(engine.state(), EngineState::Running);
    }

    #[test]
    fn turning_back_solves_and_unblinds() {
        let mut engine = chain_engine();
        engine.rotate((2, 0), QuarterTurn::Clockwise).unwrap();
        engine.board.cell_mut((1, 0)).set_blind(true);

        let outcome = engine.rotate((2, 0), QuarterTurn::CounterClockwise).unwrap();

        assert_eq!(outcome, RotateOutcome::Solved);
        assert_eq!(engine.state(), EngineState::Solved);
        assert!(!engine.board()[(1, 0)].is_blind());
    }

    #[test]
    fn unwired_and_locked_cells_are_rejected() {
        let board = Board::from_layout(
            BoardGeometry::full((3, 2), false),
            (0, 0),
            [((0, 0), Links::RIGHT), ((1, 0), Links::LEFT)],
        )
        .unwrap();
        let mut engine = PlayEngine::from_board(board, Skill::Novice.config(), 0).unwrap();

        assert_eq!(engine.rotate((2, 1), QuarterTurn::Clockwise), Ok(RotateOutcome::Rejected));
        assert_eq!(engine.toggle_lock((2, 1)), Ok(LockOutcome::Rejected));

        assert_eq!(engine.toggle_lock((1, 0)), Ok(LockOutcome::Locked));
        let before = engine.board()[(1, 0)];
        assert_eq!(engine.rotate((1, 0), QuarterTurn::Clockwise), Ok(RotateOutcome::Rejected));
        assert_eq!(engine.board()[(1, 0)], before);
        assert_eq!(engine.clicks(), 0);

        assert_eq!(engine.toggle_lock((1, 0)), Ok(LockOutcome::Unlocked));
        assert_eq!(engine.rotate((5, 5), QuarterTurn::Clockwise), Err(GameError::InvalidCoords));
    }

    #[test]
    fn repeated_clicks_on_one_cell_count_once() {
        let mut engine = chain_engine();

        engine.rotate((2, 0), QuarterTurn::Clockwise).unwrap();
        engine.rotate((2, 0), QuarterTurn::Clockwise).unwrap();
        assert_eq!(engine.clicks(), 1);

        engine.rotate((1, 0), QuarterTurn::Clockwise).unwrap();
        engine.rotate((2, 0), QuarterTurn::Clockwise).unwrap();
        assert_eq!(engine.clicks(), 3);
        assert_eq!(engine.state(), EngineState::Running);
    }

    #[test]
    fn clicks_stop_counting_once_solved() {
        let mut engine = chain_engine();
        engine.rotate((2, 0), QuarterTurn::Clockwise).unwrap();
        engine.rotate((2, 0), QuarterTurn::CounterClockwise).unwrap();
        assert_eq!(engine.state(), EngineState::Solved);

        engine.rotate((1, 0), QuarterTurn::Clockwise).unwrap();

        assert_eq!(engine.clicks(), 1);
        assert_eq!(engine.state(), EngineState::Solved);
    }

    #[test]
    fn autosolve_converges_on_generated_boards() {
        for (seed, skill) in (0..).zip(Skill::ALL) {
            let mut engine = PlayEngine::new(BoardConfig::LANDSCAPE, seed);
            engine.new_game(skill).unwrap();
            engine.toggle_lock(engine.root().unwrap()).unwrap();

            solve(&mut engine);

            assert!(engine.solver_used());
            assert_eq!(engine.state(), EngineState::Solved, "{skill}");
            assert!(engine.is_solved());
            let solved = engine.solved_snapshot().unwrap();
            for (coords, cell) in engine.board().iter_board_cells() {
                assert_eq!(Some(cell.effective_mask()), solved.mask_at(coords));
                assert!(!cell.is_blind());
            }
        }
    }

    #[test]
    fn save_and_restore_on_same_grid() {
        let mut engine = PlayEngine::new(BoardConfig::LANDSCAPE, 3);
        engine.new_game(Skill::Insane).unwrap();
        let root = engine.root().unwrap();
        engine.toggle_lock(root).unwrap();
        let saved = engine.save();

        let mut restored = PlayEngine::new(BoardConfig::LANDSCAPE, 99);
        restored.restore(&saved).unwrap();

        assert_eq!(restored.save(), saved);
        assert_eq!(restored.board(), engine.board());
        assert_eq!(restored.state(), EngineState::Running);
    }

    #[test]
    fn reorient_keeps_the_game_solvable() {
        let mut engine = PlayEngine::new(BoardConfig::LANDSCAPE, 21);
        engine.new_game(Skill::Master).unwrap();
        let unconnected = engine.unconnected_cells();

        engine.reorient(BoardConfig::PORTRAIT).unwrap();

        assert_eq!(engine.board().grid(), (10, 17));
        assert_eq!(engine.board().geometry().size(), (10, 17));
        assert_eq!(engine.unconnected_cells(), unconnected);

        solve(&mut engine);
        assert_eq!(engine.state(), EngineState::Solved);
    }

    #[test]
    fn failed_restore_leaves_engine_untouched() {
        let mut source = PlayEngine::new(BoardConfig::new((6, 6)), 5);
        source.new_game(Skill::Novice).unwrap_err();
        source.new_custom_game(Skill::Normal.config(), (5, 4)).unwrap();
        let saved = source.save();

        let mut engine = PlayEngine::new(BoardConfig::LANDSCAPE, 5);
        engine.new_game(Skill::Novice).unwrap();
        let before = engine.save();

        assert_eq!(
            engine.restore(&saved),
            Err(GameError::IncompatibleGrid {
                saved: (6, 6),
                current: (17, 10)
            })
        );
        assert_eq!(engine.save(), before);
    }

    #[test]
    fn solved_root_outside_grid_fails_restore() {
        let mut source = PlayEngine::new(BoardConfig::LANDSCAPE, 8);
        source.new_game(Skill::Novice).unwrap();
        let mut json = serde_json::to_value(source.save()).unwrap();
        json["solved"]["root"] = serde_json::json!([200, 200]);
        let saved: SavedGame = serde_json::from_value(json).unwrap();

        let mut engine = PlayEngine::new(BoardConfig::LANDSCAPE, 8);
        engine.new_game(Skill::Novice).unwrap();
        let before = engine.save();

        assert_eq!(engine.restore(&saved), Err(GameError::InvalidCoords));
        assert_eq!(engine.save(), before);
        engine.autosolve_plan().unwrap();
    }

    #[test]
    fn solved_geometry_outside_grid_fails_restore() {
        let mut source = PlayEngine::new(BoardConfig::LANDSCAPE, 9);
        source.new_game(Skill::Novice).unwrap();
        let mut json = serde_json::to_value(source.save()).unwrap();
        json["solved"]["geometry"]["start"] = serde_json::json!([250, 250]);
        let saved: SavedGame = serde_json::from_value(json).unwrap();

        let mut engine = PlayEngine::new(BoardConfig::PORTRAIT, 9);
        engine.new_game(Skill::Novice).unwrap();
        let before = engine.save();

        assert_eq!(engine.restore(&saved), Err(GameError::BoardOutsideGrid));
        assert_eq!(engine.save(), before);
    }
}
