/// Single coordinate axis, used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
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

/// Board area as a cell count, saturating so oversized products stay representable.
pub const fn total(a: Coord, b: Coord) -> CellCount {
    (a as CellCount).saturating_mul(b as CellCount)
}

const DISPLACEMENTS: [(i16, i16); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Yields the up-to-8 in-bounds neighbors of `center` on a `bounds`-sized grid,
/// fewer at edges and corners.
pub fn neighbors(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    DISPLACEMENTS.into_iter().filter_map(move |(dx, dy)| {
        let x = (center.0 as i16) + dx;
        let y = (center.1 as i16) + dy;
        if (0..bounds.0 as i16).contains(&x) && (0..bounds.1 as i16).contains(&y) {
            Some((x as Coord, y as Coord))
        } else {
            None
        }
    })
}
