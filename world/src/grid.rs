//! Dense signed-coordinate cell storage for the garden.

use garden_defence_core::{BlockId, CellCoord, PlantId};

/// One grid location, holding at most one plant and one block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) plant: Option<PlantId>,
    pub(crate) block: Option<BlockId>,
}

/// Square cell grid addressed by coordinates in `[-size/2, size/2)`.
#[derive(Clone, Debug)]
pub(crate) struct GardenGrid {
    size: i32,
    half: i32,
    cells: Vec<Cell>,
}

impl GardenGrid {
    pub(crate) fn new(size: u32) -> Self {
        let size = i32::try_from(size).unwrap_or(0);
        let capacity = usize::try_from(size.saturating_mul(size)).unwrap_or(0);
        Self {
            size,
            half: size / 2,
            cells: vec![Cell::default(); capacity],
        }
    }

    pub(crate) fn in_bounds(&self, cell: CellCoord) -> bool {
        cell.x() >= -self.half
            && cell.x() < self.size - self.half
            && cell.z() >= -self.half
            && cell.z() < self.size - self.half
    }

    pub(crate) fn cell(&self, cell: CellCoord) -> Option<&Cell> {
        self.index(cell).and_then(|index| self.cells.get(index))
    }

    pub(crate) fn cell_mut(&mut self, cell: CellCoord) -> Option<&mut Cell> {
        self.index(cell).and_then(|index| self.cells.get_mut(index))
    }

    pub(crate) fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }

        let column = cell.x() + self.half;
        let row = cell.z() + self.half;
        usize::try_from(row * self.size + column).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_half_open() {
        let grid = GardenGrid::new(20);
        assert!(grid.in_bounds(CellCoord::new(-10, -10)));
        assert!(grid.in_bounds(CellCoord::new(9, 9)));
        assert!(!grid.in_bounds(CellCoord::new(10, 0)));
        assert!(!grid.in_bounds(CellCoord::new(0, -11)));
    }

    #[test]
    fn every_in_bounds_coordinate_has_one_cell() {
        let mut grid = GardenGrid::new(4);
        for x in -2..2 {
            for z in -2..2 {
                let coord = CellCoord::new(x, z);
                assert!(grid.cell(coord).is_some());
                let cell = grid.cell_mut(coord).expect("in-bounds cell");
                cell.plant = Some(PlantId::new(1));
            }
        }
        assert!(grid.cell(CellCoord::new(2, 0)).is_none());
    }

    #[test]
    fn clear_resets_every_slot() {
        let mut grid = GardenGrid::new(4);
        let coord = CellCoord::new(1, -2);
        grid.cell_mut(coord).expect("in-bounds cell").block = Some(BlockId::new(3));
        grid.clear();
        assert_eq!(grid.cell(coord), Some(&Cell::default()));
    }
}
