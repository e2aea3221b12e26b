use crate::simulation::{Cell, Life};

/// RGBA color, 8 bits per channel
pub type Rgba = [u8; 4];

/// Which lookup table the renderer applies. Purely a view concern; the
/// simulation state is identical under both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    /// Alive/dead only
    Cells,
    /// Color each cell by its live-neighbor count
    Population,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Cells => DisplayMode::Population,
            DisplayMode::Population => DisplayMode::Cells,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Cells => "cells",
            DisplayMode::Population => "population",
        }
    }
}

/// Dead and alive cell colors, indexed by the alive flag
pub const CELL_COLORS: [Rgba; 2] = [
    [0, 0, 0, 255],
    [255, 255, 255, 255],
];

/// Neighbor-count gradient, blue (0) through green to red (8)
pub const POPULATION_COLORS: [Rgba; 9] = [
    [0, 0, 255, 255],
    [0, 136, 255, 255],
    [136, 255, 255, 255],
    [0, 255, 136, 255],
    [0, 255, 0, 255],
    [136, 255, 0, 255],
    [255, 255, 0, 255],
    [255, 136, 0, 255],
    [255, 0, 0, 255],
];

/// Map every committed cell to one color in the caller-owned `frame`.
/// The sink must hold exactly one pixel per cell.
pub fn render_into(life: &Life, mode: DisplayMode, frame: &mut [Rgba]) {
    assert_eq!(
        frame.len(),
        life.width() * life.height(),
        "frame size mismatch"
    );
    for (pixel, &cell) in frame.iter_mut().zip(life.cells()) {
        *pixel = color_for(cell, mode);
    }
}

fn color_for(cell: Cell, mode: DisplayMode) -> Rgba {
    match mode {
        DisplayMode::Cells => CELL_COLORS[cell.state() as usize],
        DisplayMode::Population => POPULATION_COLORS[cell.neighbors() as usize],
    }
}
