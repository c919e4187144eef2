/// Index of a color (a "flow") in its [`Puzzle`](crate::Puzzle), starting at 0.
pub type ColorId = usize;

/// The most colors a single puzzle may hold; [`ColorSet`] packs one bit per color.
pub const MAX_COLORS: usize = 16;

/// A set of colors stored as a bitmask, bit `c` standing for color `c`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ColorSet(u32);

impl ColorSet {
    /// The set of every color in a puzzle with `num_colors` colors.
    pub fn full(num_colors: usize) -> Self {
        Self(((1u64 << num_colors) - 1) as u32)
    }

    pub(crate) fn insert(&mut self, color: ColorId) {
        self.0 |= 1 << color;
    }

    /// Whether `color` is a member of this set.
    pub fn contains(&self, color: ColorId) -> bool {
        self.0 & (1 << color) != 0
    }

    /// Number of colors in this set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether this set holds no colors.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}
