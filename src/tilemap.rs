/// A bounded 2D tilemap grid. There is no wrapping on any edge; coordinates
/// outside the grid simply do not exist.
#[derive(Clone, PartialEq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Check whether signed coordinates fall inside the grid.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    /// Orthogonal (4-connectivity) neighbors, edges clipped.
    pub fn neighbors(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut result = Vec::with_capacity(4);

        if x > 0 {
            result.push((x - 1, y));
        }
        if x < self.width - 1 {
            result.push((x + 1, y));
        }
        if y > 0 {
            result.push((x, y - 1));
        }
        if y < self.height - 1 {
            result.push((x, y + 1));
        }

        result
    }

    /// Iterate over all cells with their coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % self.width;
            let y = idx / self.width;
            (x, y, val)
        })
    }

    /// Flat row-major view of the cells.
    pub fn cells(&self) -> &[T] {
        &self.data
    }

    /// Rebuild a tilemap from a flat row-major cell vector.
    /// Returns None if the cell count does not match the dimensions.
    pub fn from_cells(width: usize, height: usize, data: Vec<T>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Tilemap<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tilemap {}x{}", self.width, self.height)?;
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{:?} ", self.data[y * self.width + x])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_roundtrip() {
        let mut map = Tilemap::new(4, 3);
        map.set(3, 2, 7u8);
        assert_eq!(*map.get(3, 2), 7);
        assert_eq!(*map.get(0, 0), 0);
    }

    #[test]
    fn neighbors_clip_at_corners_and_edges() {
        let map: Tilemap<u8> = Tilemap::new(3, 3);

        let corner = map.neighbors(0, 0);
        assert_eq!(corner.len(), 2);
        assert!(corner.contains(&(1, 0)));
        assert!(corner.contains(&(0, 1)));

        let edge = map.neighbors(1, 0);
        assert_eq!(edge.len(), 3);

        let center = map.neighbors(1, 1);
        assert_eq!(center.len(), 4);
        // Orthogonal only, no diagonals.
        assert!(!center.contains(&(0, 0)));
        assert!(!center.contains(&(2, 2)));
    }

    #[test]
    fn iteration_is_row_major() {
        let mut map = Tilemap::new(2, 2);
        map.set(0, 0, 1u8);
        map.set(1, 0, 2);
        map.set(0, 1, 3);
        map.set(1, 1, 4);

        let order: Vec<(usize, usize, u8)> = map.iter().map(|(x, y, v)| (x, y, *v)).collect();
        assert_eq!(order, vec![(0, 0, 1), (1, 0, 2), (0, 1, 3), (1, 1, 4)]);
    }

    #[test]
    fn from_cells_checks_dimensions() {
        assert!(Tilemap::from_cells(2, 2, vec![0u8; 4]).is_some());
        assert!(Tilemap::from_cells(2, 2, vec![0u8; 3]).is_none());
    }
}
