//! Per-texel coverage storage for one non-base layer.

/// Edge length of an alpha grid in texels.
pub const ALPHA_SIZE: usize = 64;

/// Total number of texels in an alpha grid.
pub const ALPHA_TEXELS: usize = ALPHA_SIZE * ALPHA_SIZE;

/// A 64×64 grid of 8-bit coverage values (4KB).
///
/// Row-major: `x` varies fastest.
///
/// # Example
///
/// ```
/// use bevy_terrain_layers::layers::AlphaGrid;
///
/// let mut grid = AlphaGrid::new();
/// grid.set(10, 20, 128);
/// assert_eq!(grid.get(10, 20), 128);
/// assert_eq!(grid.get(0, 0), 0);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AlphaGrid {
    data: Box<[u8; ALPHA_TEXELS]>,
}

impl Default for AlphaGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl AlphaGrid {
    /// Creates a fully transparent grid.
    pub fn new() -> Self {
        Self::filled(0)
    }

    pub fn filled(value: u8) -> Self {
        Self {
            data: Box::new([value; ALPHA_TEXELS]),
        }
    }

    pub fn from_fn<F: FnMut(usize, usize) -> u8>(mut f: F) -> Self {
        let mut data = Box::new([0u8; ALPHA_TEXELS]);
        for y in 0..ALPHA_SIZE {
            for x in 0..ALPHA_SIZE {
                data[Self::index(x, y)] = f(x, y);
            }
        }
        Self { data }
    }

    /// Copies a grid out of raw bytes. Returns `None` unless exactly
    /// [`ALPHA_TEXELS`] bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let data: Box<[u8; ALPHA_TEXELS]> = bytes.to_vec().into_boxed_slice().try_into().ok()?;
        Some(Self { data })
    }

    /// Value at `(x, y)`, or 0 outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= ALPHA_SIZE || y >= ALPHA_SIZE {
            return 0;
        }
        self.data[Self::index(x, y)]
    }

    /// Writes `(x, y)`. Coordinates outside the grid are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x >= ALPHA_SIZE || y >= ALPHA_SIZE {
            return;
        }
        self.data[Self::index(x, y)] = value;
    }

    /// Value at a flat texel offset, or 0 past the end.
    #[inline]
    pub fn value(&self, texel: usize) -> u8 {
        self.data.get(texel).copied().unwrap_or(0)
    }

    #[inline]
    pub fn set_value(&mut self, texel: usize, value: u8) {
        if let Some(slot) = self.data.get_mut(texel) {
            *slot = value;
        }
    }

    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }

    /// True when every texel is zero.
    pub fn is_clear(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_slice()
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.data.as_mut_slice()
    }

    #[inline]
    pub fn index(x: usize, y: usize) -> usize {
        y * ALPHA_SIZE + x
    }
}

impl std::fmt::Debug for AlphaGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (mut clear, mut opaque) = (0u32, 0u32);
        for &v in self.data.iter() {
            match v {
                0 => clear += 1,
                255 => opaque += 1,
                _ => {}
            }
        }
        f.debug_struct("AlphaGrid")
            .field("clear", &clear)
            .field("opaque", &opaque)
            .field("partial", &(ALPHA_TEXELS as u32 - clear - opaque))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_clear() {
        let grid = AlphaGrid::new();
        assert_eq!(grid.as_bytes().len(), ALPHA_TEXELS);
        assert!(grid.is_clear());
    }

    #[test]
    fn test_get_set_matches_flat_index() {
        let mut grid = AlphaGrid::new();
        grid.set(3, 2, 77);
        assert_eq!(grid.value(2 * ALPHA_SIZE + 3), 77);
        assert!(!grid.is_clear());
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = AlphaGrid::new();
        grid.set(0, 1, 99);
        // x past the edge must not wrap into the next row
        assert_eq!(grid.get(ALPHA_SIZE, 0), 0);
        assert_eq!(grid.get(0, ALPHA_SIZE), 0);

        grid.set(ALPHA_SIZE, 0, 42); // Should be ignored
        grid.set(3, ALPHA_SIZE, 42);
        grid.set_value(ALPHA_TEXELS, 42);
        assert_eq!(grid.value(ALPHA_TEXELS), 0);
        assert_eq!(grid.value(ALPHA_SIZE), 99);
        assert_eq!(grid.as_bytes().iter().filter(|&&v| v != 0).count(), 1);
    }

    #[test]
    fn test_from_fn() {
        let grid = AlphaGrid::from_fn(|x, _| if x < 32 { 255 } else { 0 });
        assert_eq!(grid.get(0, 63), 255);
        assert_eq!(grid.get(32, 0), 0);
    }

    #[test]
    fn test_from_bytes_checks_length() {
        assert!(AlphaGrid::from_bytes(&[0u8; 100]).is_none());

        let grid = AlphaGrid::from_bytes(&[9u8; ALPHA_TEXELS]).unwrap();
        assert_eq!(grid, AlphaGrid::filled(9));
    }
}
