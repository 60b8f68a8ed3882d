use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::{
    Action, Axis, Codec, Direction, Game, IndexSet, InvalidMapError, Map, Operator, Orientation,
    Position, Sign, State, Tile,
};

impl Game {
    /// Decode `text` with `codec`, deriving the initial placement and the
    /// goal tiles.
    pub fn parse_with(text: &str, codec: &Codec) -> Result<Self, InvalidMapError> {
        let game = Self::decode(text, codec);
        if let Err(err) = &game {
            tracing::debug!(%err, "Rejected map");
        }
        game
    }

    fn decode(text: &str, codec: &Codec) -> Result<Self, InvalidMapError> {
        codec.check(text)?;

        let rows = codec.rows(text);
        let height = rows.len();
        let width = rows[0].chars().count();
        let grid = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|ch| codec.decode(ch).ok_or(InvalidMapError::UndeclaredSymbol(ch)))
            .collect::<Result<Box<[_]>, _>>()?;
        let map = Map {
            height,
            width,
            grid,
        };

        let mut initial = None;
        let mut goals = IndexSet::default();
        for (y, row) in map.rows().enumerate() {
            goals.extend(
                row.iter()
                    .enumerate()
                    .filter(|(_, &tile)| tile == Tile::Goal)
                    .map(|(x, _)| Position::new(x, y)),
            );

            let mut blocks = row
                .iter()
                .enumerate()
                .filter(|(_, &tile)| tile == Tile::Block)
                .map(|(x, _)| x);
            match (blocks.next(), blocks.next()) {
                // Lying along x, anchored on the left tile.
                (Some(x), Some(_)) => {
                    initial = Some(State::new(Position::new(x, y), Orientation::AxisX));
                }
                // First lone marker: the anchor. A marker right below means
                // the block lies along y.
                (Some(x), None) if initial.is_none() => {
                    let below = Position::new(x, y + 1);
                    let orientation = if map.get(below) == Some(Tile::Block) {
                        Orientation::AxisY
                    } else {
                        Orientation::Vertical
                    };
                    initial = Some(State::new(Position::new(x, y), orientation));
                }
                _ => {}
            }
        }

        let initial = initial.ok_or(InvalidMapError::BlockCount(0))?;
        let covered = map
            .cells()
            .filter(|&(_, tile)| tile == Tile::Block)
            .map(|(pos, _)| pos)
            .eq(initial.tiles());
        if !covered {
            return Err(InvalidMapError::DetachedBlock);
        }

        tracing::debug!(
            height,
            width,
            goals = goals.len(),
            %initial,
            "Decoded map"
        );
        Ok(Self {
            map,
            initial,
            goals,
        })
    }
}

impl FromStr for Game {
    type Err = InvalidMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &Codec::default())
    }
}

impl TryFrom<i8> for Direction {
    type Error = anyhow::Error;

    fn try_from(token: i8) -> Result<Self, Self::Error> {
        let sign = if token < 0 {
            Sign::Negative
        } else {
            Sign::Positive
        };
        let axis = match token.unsigned_abs() {
            1 => Axis::X,
            2 => Axis::Y,
            _ => bail!("Invalid direction token: {token}"),
        };
        Ok(Direction::new(axis, sign))
    }
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let op = match chars.next() {
            Some('P') => Operator::Pitch,
            Some('R') => Operator::Roll,
            _ => bail!("Invalid operator in action: {s:?}"),
        };
        let token = chars
            .as_str()
            .parse::<i8>()
            .with_context(|| format!("Invalid direction in action: {s:?}"))?;
        Ok(Action::new(op, token.try_into()?))
    }
}
