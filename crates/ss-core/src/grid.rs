use std::borrow::Cow;

/// Grille d'index de couleur, un `i16` par pixel, row-major.
///
/// Same dimensions as the source image. Which value means "transparent"
/// depends on the color scheme (−1 for 16 colors, 0 for 256 colors).
///
/// # Example
/// ```
/// use ss_core::grid::IndexGrid;
/// let mut grid = IndexGrid::new(3, 2, -1);
/// grid.set(1, 1, 7);
/// assert_eq!(grid.get(1, 1), 7);
/// assert_eq!(grid.row(1), &[-1, 7, -1]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexGrid {
    /// Flat array of indices, row-major.
    pub cells: Vec<i16>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl IndexGrid {
    /// Crée une grille remplie de `fill`.
    #[must_use]
    pub fn new(width: u32, height: u32, fill: i16) -> Self {
        Self {
            cells: vec![fill; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Build a grid from equally long rows.
    ///
    /// Returns `None` when the rows are ragged.
    ///
    /// # Example
    /// ```
    /// use ss_core::grid::IndexGrid;
    /// let grid = IndexGrid::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
    /// assert_eq!((grid.width, grid.height), (2, 2));
    /// assert!(IndexGrid::from_rows(&[vec![1], vec![2, 3]]).is_none());
    /// ```
    #[must_use]
    pub fn from_rows(rows: &[Vec<i16>]) -> Option<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        Some(Self {
            cells: rows.concat(),
            width: width as u32,
            height: rows.len() as u32,
        })
    }

    /// Index at (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> i16 {
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Set the index at (x, y).
    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, index: i16) {
        self.cells[y as usize * self.width as usize + x as usize] = index;
    }

    /// Indices of row `y`.
    #[inline(always)]
    #[must_use]
    pub fn row(&self, y: u32) -> &[i16] {
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Hauteur rendue paire : ajoute une ligne `fill` si la hauteur est impaire.
    ///
    /// Borrows when the height is already even.
    ///
    /// # Example
    /// ```
    /// use ss_core::grid::IndexGrid;
    /// let grid = IndexGrid::new(2, 3, 5);
    /// let even = grid.padded_to_even(-1);
    /// assert_eq!(even.height, 4);
    /// assert_eq!(even.row(3), &[-1, -1]);
    /// ```
    #[must_use]
    pub fn padded_to_even(&self, fill: i16) -> Cow<'_, IndexGrid> {
        if self.height % 2 == 0 {
            return Cow::Borrowed(self);
        }
        let mut padded = self.clone();
        padded
            .cells
            .extend(std::iter::repeat_n(fill, self.width as usize));
        padded.height += 1;
        Cow::Owned(padded)
    }
}
