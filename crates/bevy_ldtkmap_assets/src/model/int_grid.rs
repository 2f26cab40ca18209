use bevy::math::{IVec2, UVec2, Vec2};

/// A named grid of integers inside a level (collision masks, region tags...).
///
/// Values are stored row-major; `0` is an empty cell in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntGrid {
    identifier: String,
    grid_size: UVec2,
    cell_size: u32,
    offset: IVec2,
    values: Vec<i32>,
}

impl IntGrid {
    /// Create a grid. `values` shorter than `grid_size.x * grid_size.y` are
    /// padded with empty cells, longer ones are truncated.
    pub fn new(
        identifier: impl Into<String>,
        grid_size: UVec2,
        cell_size: u32,
        mut values: Vec<i32>,
    ) -> Self {
        values.resize((grid_size.x * grid_size.y) as usize, 0);
        Self {
            identifier: identifier.into(),
            grid_size,
            cell_size,
            offset: IVec2::ZERO,
            values,
        }
    }

    /// Pixel offset of the grid inside its level.
    pub fn with_offset(mut self, offset: IVec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Width and height in cells.
    pub fn grid_size(&self) -> UVec2 {
        self.grid_size
    }

    /// Edge length of one cell in pixels.
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn offset(&self) -> IVec2 {
        self.offset
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Value of a cell, `None` outside the grid.
    pub fn value_at(&self, cell: IVec2) -> Option<i32> {
        if cell.x < 0 || cell.y < 0 {
            return None;
        }
        let (x, y) = (cell.x as u32, cell.y as u32);
        if x >= self.grid_size.x || y >= self.grid_size.y {
            return None;
        }
        self.values.get((y * self.grid_size.x + x) as usize).copied()
    }

    /// Cell containing a level-space pixel position.
    pub fn cell_from_position(&self, position: Vec2) -> Option<IVec2> {
        if self.cell_size == 0 {
            return None;
        }
        let local = (position - self.offset.as_vec2()) / self.cell_size as f32;
        let cell = local.floor().as_ivec2();
        self.value_at(cell).map(|_| cell)
    }

    pub fn value_at_position(&self, position: Vec2) -> Option<i32> {
        self.cell_from_position(position)
            .and_then(|cell| self.value_at(cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> IntGrid {
        // 3x2, 16px cells
        IntGrid::new("Collisions", UVec2::new(3, 2), 16, vec![0, 1, 0, 2, 0, 3])
    }

    #[test]
    fn test_value_at_is_row_major() {
        let grid = grid();
        assert_eq!(grid.value_at(IVec2::new(1, 0)), Some(1));
        assert_eq!(grid.value_at(IVec2::new(0, 1)), Some(2));
        assert_eq!(grid.value_at(IVec2::new(2, 1)), Some(3));
    }

    #[test]
    fn test_value_at_outside_grid() {
        let grid = grid();
        assert_eq!(grid.value_at(IVec2::new(3, 0)), None);
        assert_eq!(grid.value_at(IVec2::new(0, -1)), None);
    }

    #[test]
    fn test_position_lookup_respects_offset() {
        let grid = grid().with_offset(IVec2::new(8, 0));
        assert_eq!(grid.cell_from_position(Vec2::new(8.0, 0.0)), Some(IVec2::ZERO));
        assert_eq!(grid.value_at_position(Vec2::new(30.0, 20.0)), Some(0));
        assert_eq!(grid.value_at_position(Vec2::new(45.0, 20.0)), Some(3));
        assert_eq!(grid.cell_from_position(Vec2::new(4.0, 0.0)), None);
    }

    #[test]
    fn test_short_values_are_padded() {
        let grid = IntGrid::new("Regions", UVec2::new(2, 2), 8, vec![5]);
        assert_eq!(grid.values(), &[5, 0, 0, 0]);
    }
}
