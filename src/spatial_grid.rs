/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for efficient neighbor lookups.
 * It divides the bounding volume into a 3D grid of cells whose edge is at
 * least the perception radius, so every entity within the radius of a point
 * lies in the 3x3x3 block of cells around it.
 *
 * - Entities that drift outside the volume are bucketed into the nearest
 *   edge cell, which keeps the 3x3x3 guarantee intact
 * - The cell count per axis is capped so a tiny radius in a huge volume
 *   does not allocate millions of empty cells
 * - Callers still filter candidates by exact distance
 */

use nannou::prelude::*;

// Upper bound on cells along any axis
const MAX_CELLS_PER_AXIS: usize = 64;

pub struct SpatialGrid {
    pub cell_size: f32,
    dims: [usize; 3],
    grid: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(min_cell_size: f32, extents: Vec3) -> Self {
        let longest = extents.x.max(extents.y).max(extents.z);
        let cell_size = min_cell_size.max(longest / MAX_CELLS_PER_AXIS as f32);

        let cells_along = |extent: f32| ((extent / cell_size).ceil() as usize).max(1);
        let dims = [cells_along(extents.x), cells_along(extents.y), cells_along(extents.z)];

        let mut grid = Vec::with_capacity(dims[0] * dims[1] * dims[2]);
        grid.resize_with(dims[0] * dims[1] * dims[2], Vec::new);

        Self {
            cell_size,
            dims,
            grid,
        }
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    // Cell coordinate along one axis, clamped into the grid
    #[inline]
    fn axis_cell(&self, value: f32, axis: usize) -> usize {
        let max_cell = (self.dims[axis] - 1) as f32;
        (value / self.cell_size).floor().clamp(0.0, max_cell) as usize
    }

    #[inline]
    fn cell_coords(&self, position: Point3) -> [usize; 3] {
        [
            self.axis_cell(position.x, 0),
            self.axis_cell(position.y, 1),
            self.axis_cell(position.z, 2),
        ]
    }

    #[inline]
    fn flat_index(&self, [x, y, z]: [usize; 3]) -> usize {
        (z * self.dims[1] + y) * self.dims[0] + x
    }

    pub fn clear(&mut self) {
        for cell in &mut self.grid {
            cell.clear();
        }
    }

    #[inline]
    pub fn insert(&mut self, index: usize, position: Point3) {
        let cell = self.flat_index(self.cell_coords(position));
        self.grid[cell].push(index);
    }

    // Clear and re-bucket a full set of positions, indexed by slice order
    pub fn rebuild<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = Point3>,
    {
        self.clear();
        for (i, position) in positions.into_iter().enumerate() {
            self.insert(i, position);
        }
    }

    // Visit every index bucketed in the 3x3x3 block around `position`
    pub fn for_each_nearby<F>(&self, position: Point3, mut visit: F)
    where
        F: FnMut(usize),
    {
        let [cx, cy, cz] = self.cell_coords(position);

        let span = |c: usize, axis: usize| c.saturating_sub(1)..=(c + 1).min(self.dims[axis] - 1);

        for z in span(cz, 2) {
            for y in span(cy, 1) {
                for x in span(cx, 0) {
                    for &i in &self.grid[self.flat_index([x, y, z])] {
                        visit(i);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nearby(grid: &SpatialGrid, position: Point3) -> Vec<usize> {
        let mut found = Vec::new();
        grid.for_each_nearby(position, |i| found.push(i));
        found.sort_unstable();
        found
    }

    #[test]
    fn finds_points_in_adjacent_cells() {
        let mut grid = SpatialGrid::new(10.0, vec3(100.0, 100.0, 100.0));
        grid.rebuild(vec![pt3(19.0, 19.0, 19.0), pt3(21.0, 21.0, 21.0), pt3(80.0, 80.0, 80.0)]);

        assert_eq!(nearby(&grid, pt3(19.0, 19.0, 19.0)), vec![0, 1]);
        assert_eq!(nearby(&grid, pt3(80.0, 80.0, 80.0)), vec![2]);
    }

    #[test]
    fn positions_outside_volume_use_edge_cells() {
        let mut grid = SpatialGrid::new(10.0, vec3(50.0, 50.0, 50.0));
        grid.rebuild(vec![pt3(-30.0, 5.0, 5.0), pt3(-25.0, 5.0, 5.0), pt3(75.0, 60.0, 55.0)]);

        assert_eq!(nearby(&grid, pt3(-30.0, 5.0, 5.0)), vec![0, 1]);
        assert_eq!(nearby(&grid, pt3(70.0, 55.0, 52.0)), vec![2]);
    }

    #[test]
    fn cell_count_is_capped_for_small_radius() {
        let grid = SpatialGrid::new(1.0, vec3(2000.0, 600.0, 2000.0));
        let [x, y, z] = grid.dims();

        assert!(x <= MAX_CELLS_PER_AXIS && y <= MAX_CELLS_PER_AXIS && z <= MAX_CELLS_PER_AXIS);
        assert!(grid.cell_size >= 2000.0 / MAX_CELLS_PER_AXIS as f32);
    }

    #[test]
    fn rebuild_drops_previous_contents() {
        let mut grid = SpatialGrid::new(10.0, vec3(40.0, 40.0, 40.0));
        grid.rebuild(vec![pt3(5.0, 5.0, 5.0)]);
        grid.rebuild(vec![pt3(35.0, 35.0, 35.0)]);

        assert!(nearby(&grid, pt3(5.0, 5.0, 5.0)).is_empty());
        assert_eq!(nearby(&grid, pt3(35.0, 35.0, 35.0)), vec![0]);
    }
}
