use std::ops::Index;

use arrayvec::ArrayVec;

mod codec;
mod error;
mod fmt;
mod parse;
pub mod problem;

pub use codec::Codec;
pub use error::InvalidMapError;
pub use problem::Problem;

type IndexSet<K> = indexmap::IndexSet<K, fxhash::FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    Safe,
    /// Seeds the initial placement. Supports the block like a safe tile.
    Block,
    /// Solved when the block stands on it vertically.
    Goal,
}

impl Tile {
    pub const ALL: [Self; 4] = [Self::Empty, Self::Safe, Self::Block, Self::Goal];

    pub fn is_solid(self) -> bool {
        self != Self::Empty
    }
}

/// Immutable tile grid, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Map {
    height: usize,
    width: usize,
    grid: Box<[Tile]>,
}

impl Index<Position> for Map {
    type Output = Tile;
    fn index(&self, pos: Position) -> &Self::Output {
        debug_assert!(pos.x < self.width, "Column {} out of bound", pos.x);
        &self.grid[pos.y * self.width + pos.x]
    }
}

impl Map {
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn get(&self, pos: Position) -> Option<Tile> {
        if self.height <= pos.y || self.width <= pos.x {
            return None;
        }
        Some(self[pos])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.grid.chunks(self.width)
    }

    pub fn cells(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        let width = self.width;
        self.grid
            .iter()
            .enumerate()
            .map(move |(i, &tile)| (Position::new(i % width, i / width), tile))
    }

    /// Whether every tile the block would occupy is on the map and non-empty.
    pub fn supports(&self, state: &State) -> bool {
        state
            .tiles()
            .all(|pos| self.get(pos).map_or(false, Tile::is_solid))
    }
}

/// Grid coordinate: `x` is the column, `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn offset(self, axis: Axis, delta: isize) -> Option<Self> {
        Some(match axis {
            Axis::X => Self {
                x: self.x.checked_add_signed(delta)?,
                ..self
            },
            Axis::Y => Self {
                y: self.y.checked_add_signed(delta)?,
                ..self
            },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    Negative,
    Positive,
}

impl Sign {
    pub fn unit(self) -> isize {
        match self {
            Sign::Negative => -1,
            Sign::Positive => 1,
        }
    }
}

/// A signed move along one of the two map axes.
///
/// The external token form is a signed integer whose magnitude names the axis
/// (`1` for x, `2` for y), see [`Direction::token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Direction {
    pub axis: Axis,
    pub sign: Sign,
}

impl Direction {
    pub const ALL: [Self; 4] = [
        Self::new(Axis::X, Sign::Positive),
        Self::new(Axis::Y, Sign::Positive),
        Self::new(Axis::Y, Sign::Negative),
        Self::new(Axis::X, Sign::Negative),
    ];

    pub const fn new(axis: Axis, sign: Sign) -> Self {
        Self { axis, sign }
    }

    pub fn token(self) -> i8 {
        let magnitude = match self.axis {
            Axis::X => 1,
            Axis::Y => 2,
        };
        match self.sign {
            Sign::Negative => -magnitude,
            Sign::Positive => magnitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    /// Lying flat, covering the anchor and the tile to its right.
    AxisX,
    /// Lying flat, covering the anchor and the tile below it.
    AxisY,
    Vertical,
}

impl Orientation {
    pub fn along(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::AxisX,
            Axis::Y => Self::AxisY,
        }
    }

    /// The lying axis, or `None` when standing.
    pub fn axis(self) -> Option<Axis> {
        match self {
            Self::AxisX => Some(Axis::X),
            Self::AxisY => Some(Axis::Y),
            Self::Vertical => None,
        }
    }
}

/// Placement of the block. The second tile of a lying block is derived from
/// the anchor, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State {
    pub pos: Position,
    pub orientation: Orientation,
}

impl State {
    pub const fn new(pos: Position, orientation: Orientation) -> Self {
        Self { pos, orientation }
    }

    /// Tiles covered by the block, anchor first.
    pub fn tiles(&self) -> impl Iterator<Item = Position> {
        let second = self
            .orientation
            .axis()
            .and_then(|axis| self.pos.offset(axis, 1));
        std::iter::once(self.pos).chain(second)
    }

    /// Tip the block over one of its long edges. Standing blocks may pitch
    /// any way; lying blocks only along their own axis.
    pub fn pitched(self, dir: Direction) -> Option<Self> {
        let (orientation, delta) = match self.orientation.axis() {
            None => {
                let delta = match dir.sign {
                    Sign::Negative => -2,
                    Sign::Positive => 1,
                };
                (Orientation::along(dir.axis), delta)
            }
            Some(axis) if axis == dir.axis => {
                let delta = match dir.sign {
                    Sign::Negative => -1,
                    Sign::Positive => 2,
                };
                (Orientation::Vertical, delta)
            }
            Some(_) => return None,
        };
        Some(Self {
            pos: self.pos.offset(dir.axis, delta)?,
            orientation,
        })
    }

    /// Flip the block over its short edge, one tile along `dir`. Lying blocks
    /// only roll across their axis.
    pub fn rolled(self, dir: Direction) -> Option<Self> {
        if self.orientation.axis() == Some(dir.axis) {
            return None;
        }
        Some(Self {
            pos: self.pos.offset(dir.axis, dir.sign.unit())?,
            ..self
        })
    }

    /// Geometric result of an action, ignoring the map.
    pub fn moved(self, action: Action) -> Option<Self> {
        match action.op {
            Operator::Pitch => self.pitched(action.dir),
            Operator::Roll => self.rolled(action.dir),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
    Pitch,
    Roll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Action {
    pub op: Operator,
    pub dir: Direction,
}

impl Action {
    pub const ALL: [Self; 8] = {
        let mut all = [Self::new(Operator::Pitch, Direction::ALL[0]); 8];
        let mut i = 0;
        while i < 4 {
            all[i] = Self::new(Operator::Pitch, Direction::ALL[i]);
            all[i + 4] = Self::new(Operator::Roll, Direction::ALL[i]);
            i += 1;
        }
        all
    };

    pub const fn new(op: Operator, dir: Direction) -> Self {
        Self { op, dir }
    }
}

/// A decoded puzzle: the map, the initial placement and the goal tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    map: Map,
    initial: State,
    goals: IndexSet<Position>,
}

impl Game {
    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn initial(&self) -> State {
        self.initial
    }

    /// Goal placements in row-major order. All of them are vertical.
    pub fn goals(&self) -> impl Iterator<Item = State> + '_ {
        self.goals
            .iter()
            .map(|&pos| State::new(pos, Orientation::Vertical))
    }

    pub fn is_goal(&self, state: &State) -> bool {
        state.orientation == Orientation::Vertical && self.goals.contains(&state.pos)
    }

    pub fn pitch(&self, state: State, dir: Direction) -> Option<State> {
        state.pitched(dir).filter(|next| self.map.supports(next))
    }

    pub fn roll(&self, state: State, dir: Direction) -> Option<State> {
        state.rolled(dir).filter(|next| self.map.supports(next))
    }

    /// The state after `action`, or `None` if the block cannot move that way
    /// or would leave the solid tiles.
    pub fn apply(&self, state: State, action: Action) -> Option<State> {
        state.moved(action).filter(|next| self.map.supports(next))
    }

    pub fn can_apply(&self, state: State, action: Action) -> bool {
        self.apply(state, action).is_some()
    }

    pub fn actions(&self, state: State) -> ArrayVec<Action, 8> {
        Action::ALL
            .into_iter()
            .filter(|&action| self.can_apply(state, action))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir(token: i8) -> Direction {
        Direction::try_from(token).unwrap()
    }

    fn state(x: usize, y: usize, orientation: Orientation) -> State {
        State::new(Position::new(x, y), orientation)
    }

    #[test]
    fn test_pitch_standing() {
        let standing = state(3, 3, Orientation::Vertical);
        assert_eq!(standing.pitched(dir(1)), Some(state(4, 3, Orientation::AxisX)));
        assert_eq!(standing.pitched(dir(-1)), Some(state(1, 3, Orientation::AxisX)));
        assert_eq!(standing.pitched(dir(2)), Some(state(3, 4, Orientation::AxisY)));
        assert_eq!(standing.pitched(dir(-2)), Some(state(3, 1, Orientation::AxisY)));
    }

    #[test]
    fn test_pitch_lying() {
        let lying = state(3, 3, Orientation::AxisX);
        assert_eq!(lying.pitched(dir(1)), Some(state(5, 3, Orientation::Vertical)));
        assert_eq!(lying.pitched(dir(-1)), Some(state(2, 3, Orientation::Vertical)));
        assert_eq!(lying.pitched(dir(2)), None);
        assert_eq!(lying.pitched(dir(-2)), None);

        let lying = state(3, 3, Orientation::AxisY);
        assert_eq!(lying.pitched(dir(2)), Some(state(3, 5, Orientation::Vertical)));
        assert_eq!(lying.pitched(dir(-2)), Some(state(3, 2, Orientation::Vertical)));
        assert_eq!(lying.pitched(dir(1)), None);
    }

    #[test]
    fn test_roll() {
        let standing = state(3, 3, Orientation::Vertical);
        assert_eq!(standing.rolled(dir(-1)), Some(state(2, 3, Orientation::Vertical)));
        assert_eq!(standing.rolled(dir(2)), Some(state(3, 4, Orientation::Vertical)));

        let lying = state(3, 3, Orientation::AxisX);
        assert_eq!(lying.rolled(dir(2)), Some(state(3, 4, Orientation::AxisX)));
        assert_eq!(lying.rolled(dir(-2)), Some(state(3, 2, Orientation::AxisX)));
        assert_eq!(lying.rolled(dir(1)), None);
        assert_eq!(lying.rolled(dir(-1)), None);
    }

    #[test]
    fn test_off_grid_moves() {
        let corner = state(0, 0, Orientation::Vertical);
        assert_eq!(corner.pitched(dir(-1)), None);
        assert_eq!(corner.rolled(dir(-2)), None);

        let game = "S O\nO O".parse::<Game>().unwrap();
        // Lying along x from (1, 0) would hang off the right edge.
        assert!(!game.map().supports(&state(1, 0, Orientation::AxisX)));
        assert_eq!(game.pitch(game.initial(), dir(1)), None);
        assert_eq!(
            game.roll(game.initial(), dir(1)),
            Some(state(1, 0, Orientation::Vertical))
        );
    }

    #[test]
    fn test_supports() {
        let game = "O X O\nO S O\nO O O".parse::<Game>().unwrap();
        let map = game.map();
        assert!(map.supports(&state(1, 1, Orientation::Vertical)));
        assert!(map.supports(&state(0, 0, Orientation::AxisY)));
        assert!(!map.supports(&state(1, 0, Orientation::Vertical)));
        assert!(!map.supports(&state(0, 0, Orientation::AxisX)));
        assert!(!map.supports(&state(2, 2, Orientation::AxisX)));
        assert!(!map.supports(&state(3, 0, Orientation::Vertical)));
    }

    #[test]
    fn test_actions() {
        let game = "X X X X\nX S S X\nX O O G\nX X X X".parse::<Game>().unwrap();
        let actions = game.actions(game.initial());
        assert_eq!(
            actions.as_slice(),
            [Action::new(Operator::Roll, dir(2))]
        );

        let game = "O O O\nO S O\nO O O".parse::<Game>().unwrap();
        let actions = game.actions(game.initial());
        assert_eq!(
            actions.as_slice(),
            [
                Action::new(Operator::Roll, dir(1)),
                Action::new(Operator::Roll, dir(2)),
                Action::new(Operator::Roll, dir(-2)),
                Action::new(Operator::Roll, dir(-1)),
            ]
        );
    }

    #[test]
    fn test_boxed_in() {
        let game = "X X X\nX S X\nX X X".parse::<Game>().unwrap();
        assert!(game.actions(game.initial()).is_empty());
        assert!(Problem::actions(&game, &game.initial()).is_empty());
    }

    #[test]
    fn test_goal() {
        let game = "S O G\nO O G".parse::<Game>().unwrap();
        assert!(game.is_goal(&state(2, 0, Orientation::Vertical)));
        assert!(game.is_goal(&state(2, 1, Orientation::Vertical)));
        assert!(!game.is_goal(&state(2, 0, Orientation::AxisY)));
        assert!(!game.is_goal(&state(1, 0, Orientation::Vertical)));
        assert!(!game.is_goal(&game.initial()));
    }

    #[test]
    fn test_problem_scenario() {
        let game = "X X X X\nX S S X\nX O O G\nX X X X".parse::<Game>().unwrap();
        let start = Problem::initial(&game);
        assert_eq!(start, state(1, 1, Orientation::AxisX));

        let rolled = Problem::result(&game, &start, &"R+2".parse().unwrap());
        assert_eq!(rolled, state(1, 2, Orientation::AxisX));
        let pitched = Problem::result(&game, &rolled, &"P+1".parse().unwrap());
        assert_eq!(pitched, state(3, 2, Orientation::Vertical));
        assert!(Problem::is_goal(&game, &pitched));

        // Not applicable here: the state is left as it was.
        let stuck = Problem::result(&game, &start, &"P+1".parse().unwrap());
        assert_eq!(stuck, start);
        assert_eq!(Problem::value(&game, &start), 1);
    }
}
