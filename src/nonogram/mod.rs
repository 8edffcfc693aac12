//! Nonogram module - grid placement against run-length hints
//!
//! The player fills a grid by placing whole polyomino blocks instead of
//! single cells. Hints are the usual nonogram run-lengths per row and
//! column; the win condition is exact equality between the occupancy
//! pattern and the target matrix, not hint equality.
//!
//! Grid cells carry an integer tag: 0 for empty, otherwise the id of the
//! placing block, so removing a block clears all of its cells atomically.

/// A block or target shape as a boolean matrix (true = filled).
pub type ShapeMatrix = Vec<Vec<bool>>;

/// Rotation state of the selected block. Cycles forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub fn next(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }

    fn quarter_turns(self) -> usize {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 1,
            Rotation::R180 => 2,
            Rotation::R270 => 3,
        }
    }
}

/// Transpose a rectangular matrix.
pub fn transpose<T: Copy>(m: &[Vec<T>]) -> Vec<Vec<T>> {
    if m.is_empty() {
        return Vec::new();
    }
    (0..m[0].len())
        .map(|c| m.iter().map(|row| row[c]).collect())
        .collect()
}

/// Rotate a shape 90 degrees clockwise: transpose, then reverse each row.
pub fn rotate_cw(shape: &ShapeMatrix) -> ShapeMatrix {
    let mut rotated = transpose(shape);
    for row in &mut rotated {
        row.reverse();
    }
    rotated
}

/// Apply a rotation state to a shape.
pub fn rotated(shape: &ShapeMatrix, rotation: Rotation) -> ShapeMatrix {
    let mut result = shape.clone();
    for _ in 0..rotation.quarter_turns() {
        result = rotate_cw(&result);
    }
    result
}

/// Run-length hints for each row of a boolean matrix, left to right.
/// A row with no filled cells yields `[0]`.
pub fn line_hints(matrix: &[Vec<bool>]) -> Vec<Vec<u8>> {
    matrix
        .iter()
        .map(|row| {
            let mut hints = Vec::new();
            let mut run = 0u8;
            for &cell in row {
                if cell {
                    run += 1;
                } else if run > 0 {
                    hints.push(run);
                    run = 0;
                }
            }
            if run > 0 {
                hints.push(run);
            }
            if hints.is_empty() {
                hints.push(0);
            }
            hints
        })
        .collect()
}

/// A placeable polyomino block. At most one live placement at a time:
/// `used` holds from a successful place until the player removes it.
#[derive(Debug, Clone)]
pub struct Block {
    pub id: u8,
    pub name: &'static str,
    pub shape: ShapeMatrix,
    pub used: bool,
}

impl Block {
    fn new(id: u8, name: &'static str, cells: &[&[u8]]) -> Self {
        Self {
            id,
            name,
            shape: cells
                .iter()
                .map(|row| row.iter().map(|&v| v != 0).collect())
                .collect(),
            used: false,
        }
    }
}

/// One puzzle instance: grid, target, block inventory, selection state.
#[derive(Debug, Clone)]
pub struct Puzzle {
    rows: usize,
    cols: usize,
    /// Flat row-major tags: 0 = empty, else block id.
    grid: Vec<u8>,
    target: ShapeMatrix,
    row_hints: Vec<Vec<u8>>,
    col_hints: Vec<Vec<u8>>,
    blocks: Vec<Block>,
    selected: Option<usize>,
    rotation: Rotation,
}

impl Puzzle {
    pub fn new(target: ShapeMatrix, blocks: Vec<Block>) -> Self {
        let rows = target.len();
        let cols = target.first().map_or(0, Vec::len);
        let row_hints = line_hints(&target);
        let col_hints = line_hints(&transpose(&target));
        Self {
            rows,
            cols,
            grid: vec![0; rows * cols],
            target,
            row_hints,
            col_hints,
            blocks,
            selected: None,
            rotation: Rotation::R0,
        }
    }

    /// The standard 5x5 puzzle: a staircase of two squares joined by a bar.
    pub fn standard() -> Self {
        let target: ShapeMatrix = [
            [1, 1, 0, 0, 0],
            [1, 1, 0, 0, 0],
            [1, 1, 1, 1, 0],
            [0, 0, 1, 1, 0],
            [0, 0, 1, 1, 0],
        ]
        .iter()
        .map(|row| row.iter().map(|&v| v != 0).collect())
        .collect();

        let blocks = vec![
            Block::new(1, "ALPHA-2", &[&[1, 1], &[1, 1]]),
            Block::new(2, "BETA-4", &[&[1, 1, 1, 1]]),
            Block::new(3, "GAMMA-2", &[&[1, 1], &[1, 1]]),
        ];

        Self::new(target, blocks)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn selected_block(&self) -> Option<usize> {
        self.selected
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn row_hints(&self) -> &[Vec<u8>] {
        &self.row_hints
    }

    pub fn col_hints(&self) -> &[Vec<u8>] {
        &self.col_hints
    }

    /// Tag at a cell; 0 means empty. Out of bounds reads as empty.
    pub fn tag(&self, row: usize, col: usize) -> u8 {
        if row < self.rows && col < self.cols {
            self.grid[row * self.cols + col]
        } else {
            0
        }
    }

    /// Select a block from the inventory, or deselect by selecting it again.
    /// Selecting resets the rotation. Used blocks cannot be selected.
    pub fn select_block(&mut self, index: usize) {
        if self.selected == Some(index) {
            self.selected = None;
            return;
        }
        if self.blocks.get(index).is_some_and(|b| !b.used) {
            self.selected = Some(index);
            self.rotation = Rotation::R0;
        }
    }

    /// Advance the rotation of the current selection by 90 degrees.
    pub fn rotate_selection(&mut self) {
        if self.selected.is_some() {
            self.rotation = self.rotation.next();
        }
    }

    /// Would `shape` fit with its top-left at `(anchor_row, anchor_col)`?
    /// Every filled cell must land in bounds on an empty grid cell.
    pub fn placement_valid(&self, shape: &ShapeMatrix, anchor_row: usize, anchor_col: usize) -> bool {
        shape.iter().enumerate().all(|(r, row)| {
            row.iter().enumerate().all(|(c, &filled)| {
                if !filled {
                    return true;
                }
                let gr = anchor_row + r;
                let gc = anchor_col + c;
                gr < self.rows && gc < self.cols && self.grid[gr * self.cols + gc] == 0
            })
        })
    }

    /// Place the selected block at the anchor. All-or-nothing: an invalid
    /// placement changes nothing and returns false. Success tags the cells,
    /// marks the block used and clears the selection.
    pub fn place_at(&mut self, anchor_row: usize, anchor_col: usize) -> bool {
        let Some(index) = self.selected else {
            return false;
        };
        let shape = rotated(&self.blocks[index].shape, self.rotation);
        if !self.placement_valid(&shape, anchor_row, anchor_col) {
            return false;
        }

        let id = self.blocks[index].id;
        for (r, row) in shape.iter().enumerate() {
            for (c, &filled) in row.iter().enumerate() {
                if filled {
                    self.grid[(anchor_row + r) * self.cols + anchor_col + c] = id;
                }
            }
        }
        self.blocks[index].used = true;
        self.selected = None;
        true
    }

    /// Remove the block covering a cell: clears every cell bearing its tag
    /// and frees the block. An empty cell is a no-op returning false.
    pub fn remove_at(&mut self, row: usize, col: usize) -> bool {
        let id = self.tag(row, col);
        if id == 0 {
            return false;
        }
        for cell in &mut self.grid {
            if *cell == id {
                *cell = 0;
            }
        }
        if let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) {
            block.used = false;
        }
        true
    }

    /// Current occupancy as a boolean matrix (any tag counts as filled).
    pub fn occupancy(&self) -> ShapeMatrix {
        (0..self.rows)
            .map(|r| (0..self.cols).map(|c| self.tag(r, c) != 0).collect())
            .collect()
    }

    /// Exact pattern equality with the target. This, not hint equality, is
    /// the win condition.
    pub fn is_won(&self) -> bool {
        self.occupancy() == self.target
    }

    /// Progress indicator: does this row's current run-length sequence match
    /// its hint? Completion of every line does not imply a win.
    pub fn row_complete(&self, row: usize) -> bool {
        line_hints(&self.occupancy())[row] == self.row_hints[row]
    }

    pub fn col_complete(&self, col: usize) -> bool {
        line_hints(&transpose(&self.occupancy()))[col] == self.col_hints[col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(cells: &[&[u8]]) -> ShapeMatrix {
        cells
            .iter()
            .map(|row| row.iter().map(|&v| v != 0).collect())
            .collect()
    }

    #[test]
    fn test_line_hints_runs_and_empty_rows() {
        let m = shape(&[&[1, 1, 0, 1, 0], &[0, 0, 0, 0, 0], &[1, 1, 1, 1, 1]]);
        assert_eq!(line_hints(&m), vec![vec![2, 1], vec![0], vec![5]]);
    }

    #[test]
    fn test_rotate_cw_l_shape() {
        let l = shape(&[&[1, 0], &[1, 0], &[1, 1]]);
        let r = rotate_cw(&l);
        assert_eq!(r, shape(&[&[1, 1, 1], &[1, 0, 0]]));
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        let shapes = [
            shape(&[&[1, 1, 1, 1]]),
            shape(&[&[1, 0], &[1, 0], &[1, 1]]),
            shape(&[&[0, 1, 0], &[1, 1, 1]]),
        ];
        for s in &shapes {
            let mut r = s.clone();
            for _ in 0..4 {
                r = rotate_cw(&r);
            }
            assert_eq!(&r, s);
        }
    }

    #[test]
    fn test_rotation_state_cycles_forward() {
        let mut rot = Rotation::R0;
        for expected in [Rotation::R90, Rotation::R180, Rotation::R270, Rotation::R0] {
            rot = rot.next();
            assert_eq!(rot, expected);
        }
    }

    #[test]
    fn test_placement_rejects_out_of_bounds_and_overlap() {
        let mut puzzle = Puzzle::standard();
        let bar = shape(&[&[1, 1, 1, 1]]);

        assert!(puzzle.placement_valid(&bar, 0, 0));
        assert!(!puzzle.placement_valid(&bar, 0, 2)); // runs off the right edge

        puzzle.select_block(0);
        assert!(puzzle.place_at(0, 0)); // ALPHA-2 at top-left
        assert!(!puzzle.placement_valid(&bar, 0, 0)); // overlaps the square
        assert!(puzzle.placement_valid(&bar, 3, 0)); // an empty row still fits
    }

    #[test]
    fn test_invalid_place_is_all_or_nothing() {
        let mut puzzle = Puzzle::standard();
        puzzle.select_block(1); // BETA-4
        assert!(!puzzle.place_at(0, 3)); // off the edge
        for r in 0..5 {
            for c in 0..5 {
                assert_eq!(puzzle.tag(r, c), 0);
            }
        }
        // Selection survives a rejected placement.
        assert_eq!(puzzle.selected_block(), Some(1));
    }

    #[test]
    fn test_remove_clears_whole_block_atomically() {
        let mut puzzle = Puzzle::standard();
        puzzle.select_block(0);
        assert!(puzzle.place_at(0, 0));
        assert!(puzzle.blocks()[0].used);

        assert!(puzzle.remove_at(1, 1));
        for r in 0..5 {
            for c in 0..5 {
                assert_eq!(puzzle.tag(r, c), 0);
            }
        }
        assert!(!puzzle.blocks()[0].used);

        // Removing an untagged cell is a no-op.
        assert!(!puzzle.remove_at(4, 4));
    }

    #[test]
    fn test_remove_then_replace_reproduces_tags() {
        let mut puzzle = Puzzle::standard();
        puzzle.select_block(0);
        assert!(puzzle.place_at(0, 0));
        let before: Vec<u8> = (0..5)
            .flat_map(|r| (0..5).map(move |c| (r, c)))
            .map(|(r, c)| puzzle.tag(r, c))
            .collect();

        assert!(puzzle.remove_at(0, 0));
        puzzle.select_block(0);
        assert!(puzzle.place_at(0, 0));
        let after: Vec<u8> = (0..5)
            .flat_map(|r| (0..5).map(move |c| (r, c)))
            .map(|(r, c)| puzzle.tag(r, c))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_used_block_cannot_be_reselected() {
        let mut puzzle = Puzzle::standard();
        puzzle.select_block(0);
        assert!(puzzle.place_at(0, 0));
        puzzle.select_block(0);
        assert_eq!(puzzle.selected_block(), None);
    }

    #[test]
    fn test_select_resets_rotation_and_toggles() {
        let mut puzzle = Puzzle::standard();
        puzzle.select_block(1);
        puzzle.rotate_selection();
        assert_eq!(puzzle.rotation(), Rotation::R90);

        puzzle.select_block(1); // toggle off
        assert_eq!(puzzle.selected_block(), None);
        puzzle.select_block(1); // back on, rotation reset
        assert_eq!(puzzle.rotation(), Rotation::R0);
    }

    #[test]
    fn test_hint_progress_is_not_win() {
        let mut puzzle = Puzzle::standard();
        puzzle.select_block(0);
        assert!(puzzle.place_at(0, 0));
        // Rows 0 and 1 now match their hints, but the puzzle is not won.
        assert!(puzzle.row_complete(0));
        assert!(puzzle.row_complete(1));
        assert!(!puzzle.is_won());
    }
}
