/// Seed patterns replayed through the accumulator by the loader.
///
/// Coordinates are (col, row) offsets from a fixed anchor on the default
/// 240x240 grid. Every offset within a table is unique; a repeat would
/// double-apply the neighbor delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Gosper's glider gun, the classic period-30 gun
    Gosper,
    /// Simkin's double-barrelled glider gun (period 120)
    Simkin,
}

impl Preset {
    /// Top-left anchor the offsets are applied from
    pub fn anchor(self) -> (usize, usize) {
        match self {
            Preset::Gosper => (102, 116),
            Preset::Simkin => (105, 110),
        }
    }

    /// Static offset table, row by row
    pub fn cells(self) -> &'static [(usize, usize)] {
        match self {
            Preset::Gosper => GOSPER_GUN,
            Preset::Simkin => SIMKIN_GUN,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Preset::Gosper => "Gosper glider gun",
            Preset::Simkin => "Simkin glider gun",
        }
    }
}

/// Gosper glider gun, 36 cells
const GOSPER_GUN: &[(usize, usize)] = &[
    (24, 0),
    (22, 1), (24, 1),
    (12, 2), (13, 2), (20, 2), (21, 2), (34, 2), (35, 2),
    (11, 3), (15, 3), (20, 3), (21, 3), (34, 3), (35, 3),
    (0, 4), (1, 4), (10, 4), (16, 4), (20, 4), (21, 4),
    (0, 5), (1, 5), (10, 5), (14, 5), (16, 5), (17, 5), (22, 5), (24, 5),
    (10, 6), (16, 6), (24, 6),
    (11, 7), (15, 7),
    (12, 8), (13, 8),
];

/// Simkin glider gun, 36 cells
const SIMKIN_GUN: &[(usize, usize)] = &[
    (0, 0), (1, 0), (7, 0), (8, 0),
    (0, 1), (1, 1), (7, 1), (8, 1),
    (4, 3), (5, 3),
    (4, 4), (5, 4),
    (22, 9), (23, 9), (25, 9), (26, 9),
    (21, 10), (27, 10),
    (21, 11), (28, 11), (31, 11), (32, 11),
    (21, 12), (22, 12), (23, 12), (27, 12), (31, 12), (32, 12),
    (26, 13),
    (20, 17), (21, 17),
    (20, 18),
    (21, 19), (22, 19), (23, 19),
    (23, 20),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GRID_HEIGHT, GRID_WIDTH};
    use std::collections::HashSet;

    #[test]
    fn test_preset_sizes() {
        assert_eq!(Preset::Gosper.cells().len(), 36);
        assert_eq!(Preset::Simkin.cells().len(), 36);
    }

    #[test]
    fn test_preset_cells_are_unique() {
        for preset in [Preset::Gosper, Preset::Simkin] {
            let unique: HashSet<_> = preset.cells().iter().collect();
            assert_eq!(
                unique.len(),
                preset.cells().len(),
                "{} repeats an offset",
                preset.label()
            );
        }
    }

    #[test]
    fn test_presets_fit_the_default_grid() {
        for preset in [Preset::Gosper, Preset::Simkin] {
            let (anchor_col, anchor_row) = preset.anchor();
            for &(dx, dy) in preset.cells() {
                assert!(anchor_col + dx < GRID_WIDTH);
                assert!(anchor_row + dy < GRID_HEIGHT);
            }
        }
    }
}
