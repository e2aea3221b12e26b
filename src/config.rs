/// Grid dimensions (240x240 torus = 57,600 cells)
pub const GRID_WIDTH: usize = 240;
pub const GRID_HEIGHT: usize = 240;

/// Bit position of the alive flag within a packed cell byte
pub const ALIVE_SHIFT: u8 = 4;

/// Mask selecting the alive flag
pub const ALIVE_MASK: u8 = 1 << ALIVE_SHIFT;

/// Mask selecting the neighbor-count field (values 0-8 fit below the flag)
pub const NEIGHBOR_MASK: u8 = ALIVE_MASK - 1;

/// On-screen pixels per cell
pub const WINDOW_SCALE: u32 = 4;
