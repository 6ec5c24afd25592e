/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Count type used for cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Swaps width and height, used when the grid is viewed in the other orientation.
pub const fn transposed((w, h): Coord2) -> Coord2 {
    (h, w)
}

/// Iterates every coordinate inside `start..start + size`, column by column.
pub fn iter_rect(start: Coord2, size: Coord2) -> impl Iterator<Item = Coord2> {
    let (x0, y0) = start;
    let (w, h) = size;
    (x0..x0 + w).flat_map(move |x| (y0..y0 + h).map(move |y| (x, y)))
}
