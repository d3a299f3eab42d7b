use std::fmt;

/// Unique identifier for any entity tracked in the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// King-move distance: the number of single steps between two cells when
    /// diagonal steps cost the same as orthogonal ones.
    pub fn chebyshev(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    /// Squared euclidean distance.
    pub fn distance_squared(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx * dx + dy * dy
    }

    /// True when `other` differs on both axes.
    pub fn is_diagonal_to(self, other: Position) -> bool {
        self.x != other.x && self.y != other.y
    }

    /// True when both cells share a row, column or 45° diagonal.
    pub fn shares_line_with(self, other: Position) -> bool {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx == 0 || dy == 0 || dx.abs() == dy.abs()
    }

    /// Cells within `radius` (Chebyshev), excluding `self`, in row-major order.
    pub fn ring(self, radius: u32) -> impl Iterator<Item = Position> {
        let r = radius as i32;
        (-r..=r).flat_map(move |dy| {
            (-r..=r).filter_map(move |dx| {
                if dx == 0 && dy == 0 {
                    None
                } else {
                    Some(self.offset(dx, dy))
                }
            })
        })
    }

    /// The eight surrounding cells in row-major order.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        self.ring(1)
    }

    /// Cells strictly between `self` and `other` on a Bresenham line.
    pub fn line_to(self, other: Position) -> impl Iterator<Item = Position> {
        let dx = (other.x - self.x).abs();
        let dy = -(other.y - self.y).abs();
        let (sx, sy) = ((other.x - self.x).signum(), (other.y - self.y).signum());
        let mut err = dx + dy;
        let mut current = self;
        std::iter::from_fn(move || {
            if current == other {
                return None;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                current.x += sx;
            }
            if doubled <= dx {
                err += dx;
                current.y += sy;
            }
            Some(current)
        })
        .take_while(move |cell| *cell != other)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Global turn counter. One tick is one pass of the movement driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integer resource meter (e.g., health) tracked per actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Current value as a percentage of the maximum (100 when the maximum is 0).
    pub fn percent(&self) -> u32 {
        if self.maximum == 0 {
            100
        } else {
            (self.current.min(self.maximum) * 100) / self.maximum
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_excludes_center_and_is_row_major() {
        let cells: Vec<_> = Position::new(5, 5).neighbors().collect();
        assert_eq!(cells.len(), 8);
        assert_eq!(cells[0], Position::new(4, 4));
        assert_eq!(cells[7], Position::new(6, 6));
        assert!(!cells.contains(&Position::new(5, 5)));
        assert_eq!(Position::ORIGIN.ring(2).count(), 24);
    }

    #[test]
    fn line_detection_covers_diagonals() {
        let origin = Position::new(3, 3);
        assert!(origin.shares_line_with(Position::new(3, 9)));
        assert!(origin.shares_line_with(Position::new(0, 0)));
        assert!(!origin.shares_line_with(Position::new(4, 5)));
    }

    #[test]
    fn line_skips_both_ends() {
        let from = Position::new(1, 1);
        assert_eq!(from.line_to(Position::new(2, 2)).count(), 0);
        assert_eq!(from.line_to(from).count(), 0);
        assert_eq!(
            from.line_to(Position::new(4, 1)).collect::<Vec<_>>(),
            vec![Position::new(2, 1), Position::new(3, 1)]
        );
        let knight: Vec<_> = from.line_to(Position::new(3, 0)).collect();
        assert_eq!(knight.len(), 1);
        assert_eq!(knight[0].x, 2);
    }
}
