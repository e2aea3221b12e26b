use rand::Rng;

use crate::config::{GRID_HEIGHT, GRID_WIDTH};
use crate::simulation::cell::Cell;
use crate::simulation::patterns::Preset;

/// Double-buffered Life engine on a torus, fixed B3/S23 rule.
///
/// Every cell byte carries its own alive flag plus a running count of
/// live neighbors. The count is adjusted incrementally whenever a cell's
/// alive state flips, so a step never rescans neighborhoods. All reads
/// during a step come from `cells`; all writes land in `cells_next`,
/// which is copied back over `cells` at commit. After a commit the two
/// buffers are identical, and the carried counts in `cells_next` are
/// exactly the seed the following step's accumulation needs.
pub struct Life {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    cells_next: Vec<Cell>,
    generation: u64,
}

impl Life {
    /// Create an empty grid. Both buffers are allocated once and reused
    /// for the lifetime of the engine.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width >= 3 && height >= 3, "torus needs at least 3x3 cells");
        Self {
            width,
            height,
            cells: vec![Cell::DEAD; width * height],
            cells_next: vec![Cell::DEAD; width * height],
            generation: 0,
        }
    }

    /// Create an empty grid with the default dimensions
    pub fn new_default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Generations stepped since the last seeding operation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Committed current buffer, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Committed cell at (col, row). Panics if out of range.
    pub fn cell(&self, col: usize, row: usize) -> Cell {
        self.cells[self.index(col, row)]
    }

    /// Number of alive cells in the committed buffer
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    #[inline]
    fn index(&self, col: usize, row: usize) -> usize {
        assert!(
            col < self.width && row < self.height,
            "cell ({col}, {row}) out of range"
        );
        col + row * self.width
    }

    /// Add `delta` to the stored neighbor count of all 8 neighbors of
    /// (col, row) in the next buffer, wrapping at the grid edges.
    fn bump_neighbors(&mut self, col: usize, row: usize, delta: i8) {
        let left = if col == 0 { self.width - 1 } else { col - 1 };
        let right = if col == self.width - 1 { 0 } else { col + 1 };
        let above = if row == 0 { self.height - 1 } else { row - 1 };
        let below = if row == self.height - 1 { 0 } else { row + 1 };

        self.cells_next[left + above * self.width].bump(delta);
        self.cells_next[col + above * self.width].bump(delta);
        self.cells_next[right + above * self.width].bump(delta);

        self.cells_next[left + row * self.width].bump(delta);
        self.cells_next[right + row * self.width].bump(delta);

        self.cells_next[left + below * self.width].bump(delta);
        self.cells_next[col + below * self.width].bump(delta);
        self.cells_next[right + below * self.width].bump(delta);
    }

    /// Mark (col, row) alive in the next buffer and credit its neighbors.
    /// Must only be called on a cell that is dead there.
    pub(crate) fn set_cell(&mut self, col: usize, row: usize) {
        let index = self.index(col, row);
        debug_assert!(!self.cells_next[index].is_alive());
        self.bump_neighbors(col, row, 1);
        self.cells_next[index].set_alive();
    }

    /// Mark (col, row) dead in the next buffer and debit its neighbors.
    /// Must only be called on a cell that is alive there.
    pub(crate) fn clear_cell(&mut self, col: usize, row: usize) {
        let index = self.index(col, row);
        debug_assert!(self.cells_next[index].is_alive());
        self.bump_neighbors(col, row, -1);
        self.cells_next[index].clear_alive();
    }

    /// Copy the next buffer over the current one. The buffers must match
    /// after a commit; the carried neighbor counts seed the next step.
    pub(crate) fn commit(&mut self) {
        self.cells.copy_from_slice(&self.cells_next);
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::DEAD);
        self.cells_next.fill(Cell::DEAD);
        self.generation = 0;
    }

    /// Advance exactly one generation.
    ///
    /// Scan order does not matter: the rule reads only the current
    /// buffer, and all transitions accumulate in the next buffer.
    pub fn step(&mut self) {
        for row in 0..self.height {
            for col in 0..self.width {
                let cell = self.cells[col + row * self.width];
                let neighbors = cell.neighbors();

                if cell.is_alive() {
                    if neighbors != 2 && neighbors != 3 {
                        self.clear_cell(col, row);
                    }
                } else if neighbors == 3 {
                    self.set_cell(col, row);
                }
            }
        }

        self.commit();
        self.generation += 1;
    }

    /// Reseed every cell from a fair coin flip and treat the result as
    /// generation 0.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        self.clear();
        for row in 0..self.height {
            for col in 0..self.width {
                if rng.gen::<bool>() {
                    self.set_cell(col, row);
                }
            }
        }
        self.commit();
    }

    /// Reseed from a preset's static offset table.
    pub fn load_preset(&mut self, preset: Preset) {
        self.clear();
        let (anchor_col, anchor_row) = preset.anchor();
        for &(dx, dy) in preset.cells() {
            self.set_cell(anchor_col + dx, anchor_row + dy);
        }
        self.commit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Recount every neighborhood by brute force and compare against the
    /// stored counts in the committed buffer.
    fn assert_counts_consistent(life: &Life) {
        let (width, height) = (life.width(), life.height());
        for row in 0..height {
            for col in 0..width {
                let mut expected = 0;
                for row_offset in [height - 1, 0, 1] {
                    for col_offset in [width - 1, 0, 1] {
                        if row_offset == 0 && col_offset == 0 {
                            continue;
                        }
                        let neighbor_row = (row + row_offset) % height;
                        let neighbor_col = (col + col_offset) % width;
                        if life.cell(neighbor_col, neighbor_row).is_alive() {
                            expected += 1;
                        }
                    }
                }
                assert_eq!(
                    life.cell(col, row).neighbors(),
                    expected,
                    "stored count wrong at ({col}, {row})"
                );
            }
        }
    }

    fn stamp(life: &mut Life, cells: &[(usize, usize)]) {
        for &(col, row) in cells {
            life.set_cell(col, row);
        }
        life.commit();
    }

    fn alive_cells(life: &Life) -> Vec<(usize, usize)> {
        let mut alive = Vec::new();
        for row in 0..life.height() {
            for col in 0..life.width() {
                if life.cell(col, row).is_alive() {
                    alive.push((col, row));
                }
            }
        }
        alive
    }

    #[test]
    fn test_set_cell_bumps_all_eight_wrapped_neighbors() {
        let mut life = Life::new(5, 4);
        life.set_cell(0, 0);
        life.commit();

        let wrapped = [
            (4, 3), (0, 3), (1, 3),
            (4, 0),         (1, 0),
            (4, 1), (0, 1), (1, 1),
        ];
        for &(col, row) in &wrapped {
            assert_eq!(
                life.cell(col, row).neighbors(),
                1,
                "neighbor ({col}, {row}) missed"
            );
        }
        assert!(life.cell(0, 0).is_alive());
        assert_eq!(life.cell(0, 0).neighbors(), 0);
    }

    #[test]
    fn test_clear_cell_undoes_set_cell() {
        let mut life = Life::new(6, 6);
        life.set_cell(2, 3);
        life.clear_cell(2, 3);
        life.commit();

        assert_eq!(life.population(), 0);
        assert_counts_consistent(&life);
    }

    #[test]
    fn test_block_is_a_still_life() {
        let mut life = Life::new(8, 8);
        stamp(&mut life, &[(3, 3), (4, 3), (3, 4), (4, 4)]);

        let before = alive_cells(&life);
        for _ in 0..10 {
            life.step();
        }
        assert_eq!(alive_cells(&life), before);
    }

    #[test]
    fn test_blinker_oscillates_with_period_two() {
        let mut life = Life::new(8, 8);
        stamp(&mut life, &[(2, 3), (3, 3), (4, 3)]);
        let horizontal = alive_cells(&life);

        life.step();
        assert_eq!(alive_cells(&life), vec![(3, 2), (3, 3), (3, 4)]);

        life.step();
        assert_eq!(alive_cells(&life), horizontal);
    }

    #[test]
    fn test_stepping_preserves_neighbor_counts() {
        let mut life = Life::new(16, 16);
        let mut rng = StdRng::seed_from_u64(7);
        life.randomize(&mut rng);
        assert_counts_consistent(&life);

        for _ in 0..8 {
            life.step();
            assert_counts_consistent(&life);
        }
    }

    #[test]
    fn test_presets_seed_exactly_their_tables() {
        for preset in [Preset::Gosper, Preset::Simkin] {
            let mut life = Life::new_default();
            life.load_preset(preset);

            assert_eq!(life.population(), preset.cells().len());
            let (anchor_col, anchor_row) = preset.anchor();
            for &(dx, dy) in preset.cells() {
                assert!(life.cell(anchor_col + dx, anchor_row + dy).is_alive());
            }
            assert_counts_consistent(&life);
        }
    }

    #[test]
    fn test_preset_evolution_is_deterministic() {
        let mut first = Life::new_default();
        let mut second = Life::new_default();
        first.load_preset(Preset::Gosper);
        second.load_preset(Preset::Gosper);

        for _ in 0..60 {
            first.step();
            second.step();
        }
        assert_eq!(first.cells(), second.cells());
        assert_eq!(first.generation(), 60);
    }

    #[test]
    fn test_gosper_gun_emits_gliders() {
        let mut life = Life::new_default();
        life.load_preset(Preset::Gosper);

        let mut max_population = 0;
        for _ in 0..150 {
            life.step();
            max_population = max_population.max(life.population());
        }
        assert!(max_population > Preset::Gosper.cells().len());
    }

    #[test]
    fn test_reseeding_resets_a_running_grid() {
        let mut life = Life::new_default();
        let mut rng = StdRng::seed_from_u64(3);
        life.randomize(&mut rng);
        for _ in 0..5 {
            life.step();
        }

        life.load_preset(Preset::Simkin);
        assert_eq!(life.generation(), 0);
        assert_eq!(life.population(), Preset::Simkin.cells().len());
        assert_counts_consistent(&life);
    }

    #[test]
    fn test_randomize_fills_about_half_the_grid() {
        for seed in 0..4 {
            let mut life = Life::new_default();
            let mut rng = StdRng::seed_from_u64(seed);
            life.randomize(&mut rng);

            let fraction =
                life.population() as f64 / (life.width() * life.height()) as f64;
            assert!(
                (0.47..0.53).contains(&fraction),
                "alive fraction {fraction} for seed {seed}"
            );
        }
    }

    proptest! {
        #[test]
        fn test_toggling_random_cells_keeps_counts_consistent(
            toggles in proptest::collection::vec((0..12usize, 0..10usize), 1..64)
        ) {
            let mut life = Life::new(12, 10);
            for (col, row) in toggles {
                if life.cells_next[col + row * life.width].is_alive() {
                    life.clear_cell(col, row);
                } else {
                    life.set_cell(col, row);
                }
            }
            life.commit();
            assert_counts_consistent(&life);
        }
    }
}
