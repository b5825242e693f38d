//! Value objects.

use std::fmt;

use rand::Rng;
use uuid::Uuid;

use super::error::ValueObjectError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// 空文字列は拒否する
            pub fn new(value: String) -> Result<Self, ValueObjectError> {
                if value.is_empty() {
                    return Err(ValueObjectError::Empty($label));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Ephemeral identifier of a live connection, generated by the server.
    ConnectionId,
    "connection id"
);
string_id!(
    /// External user identifier resolved from the identity collaborator.
    UserId,
    "user id"
);
string_id!(
    /// External space identifier; also the key of a room.
    SpaceId,
    "space id"
);
string_id!(Username, "username");

impl ConnectionId {
    /// UUID v4 で新しい接続 ID を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Participant role. `User` is the lowest privilege and the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Unknown role names fall back to the lowest privilege.
    pub fn from_str_lossy(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Cell coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Discrete coordinate system derived from the canvas size and the cell size.
///
/// Valid positions are `[0, cols) x [0, rows)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cols: i32,
    rows: i32,
}

impl Grid {
    pub const DEFAULT_CANVAS_WIDTH: u32 = 1080;
    pub const DEFAULT_CANVAS_HEIGHT: u32 = 720;
    pub const DEFAULT_CELL_SIZE: u32 = 72;

    /// `cols = width / cell_size`, `rows = height / cell_size` (integer floor).
    pub fn from_canvas(width: u32, height: u32, cell_size: u32) -> Result<Self, ValueObjectError> {
        let invalid = ValueObjectError::InvalidGrid {
            width,
            height,
            cell_size,
        };
        if cell_size == 0 {
            return Err(invalid);
        }
        let cols = i32::try_from(width / cell_size).map_err(|_| invalid.clone())?;
        let rows = i32::try_from(height / cell_size).map_err(|_| invalid.clone())?;
        if cols == 0 || rows == 0 {
            return Err(invalid);
        }
        Ok(Self { cols, rows })
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn contains(&self, position: Position) -> bool {
        (0..self.cols).contains(&position.x) && (0..self.rows).contains(&position.y)
    }

    /// Uniformly random cell inside the grid.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(rng.random_range(0..self.cols), rng.random_range(0..self.rows))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            cols: (Self::DEFAULT_CANVAS_WIDTH / Self::DEFAULT_CELL_SIZE) as i32,
            rows: (Self::DEFAULT_CANVAS_HEIGHT / Self::DEFAULT_CELL_SIZE) as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_id_rejects_empty_value() {
        // テスト項目: 空文字列の ID は生成できない
        // given (前提条件):
        let empty = String::new();

        // when (操作):
        let result = SpaceId::new(empty);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::Empty("space id")));
    }

    #[test]
    fn test_connection_id_generate_is_unique() {
        // テスト項目: 生成された接続 ID は毎回異なる
        // given (前提条件):
        let first = ConnectionId::generate();

        // when (操作):
        let second = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
        assert!(!first.as_str().is_empty());
    }

    #[test]
    fn test_role_from_str_lossy_defaults_to_user() {
        // テスト項目: 未知のロールは最も権限の低い user になる
        // given (前提条件):
        let names = ["admin", "ADMIN", "user", "moderator", ""];

        // when (操作):
        let roles: Vec<Role> = names.iter().map(|n| Role::from_str_lossy(n)).collect();

        // then (期待する結果):
        assert_eq!(
            roles,
            vec![Role::Admin, Role::Admin, Role::User, Role::User, Role::User]
        );
    }

    #[test]
    fn test_grid_from_default_canvas() {
        // テスト項目: 1080x720 / 72 のキャンバスから 15x10 のグリッドが得られる
        // given (前提条件):
        let (width, height, cell) = (1080, 720, 72);

        // when (操作):
        let grid = Grid::from_canvas(width, height, cell).unwrap();

        // then (期待する結果):
        assert_eq!(grid.cols(), 15);
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid, Grid::default());
    }

    #[test]
    fn test_grid_floors_partial_cells() {
        // テスト項目: 割り切れないキャンバスサイズは切り捨てられる
        // given (前提条件):
        let (width, height, cell) = (100, 50, 30);

        // when (操作):
        let grid = Grid::from_canvas(width, height, cell).unwrap();

        // then (期待する結果):
        assert_eq!((grid.cols(), grid.rows()), (3, 1));
    }

    #[test]
    fn test_grid_rejects_zero_cells() {
        // テスト項目: セルが 1 つも取れない設定はエラーになる
        // given (前提条件):
        let zero_cell_size = Grid::from_canvas(1080, 720, 0);

        // when (操作):
        let too_small = Grid::from_canvas(10, 720, 72);

        // then (期待する結果):
        assert!(zero_cell_size.is_err());
        assert!(too_small.is_err());
    }

    #[test]
    fn test_grid_contains_bounds() {
        // テスト項目: グリッド境界の内外判定
        // given (前提条件):
        let grid = Grid::default();

        // when (操作) / then (期待する結果):
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(14, 9)));
        assert!(!grid.contains(Position::new(15, 9)));
        assert!(!grid.contains(Position::new(14, 10)));
        assert!(!grid.contains(Position::new(-1, 0)));
    }

    #[test]
    fn test_random_position_stays_in_bounds() {
        // テスト項目: ランダムなスポーン位置は常にグリッド内に収まる
        // given (前提条件):
        let grid = Grid::from_canvas(216, 144, 72).unwrap();
        let mut rng = rand::rng();

        // when (操作):
        let positions: Vec<Position> = (0..500).map(|_| grid.random_position(&mut rng)).collect();

        // then (期待する結果):
        assert!(positions.iter().all(|p| grid.contains(*p)));
    }
}
