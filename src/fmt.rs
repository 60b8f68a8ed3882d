use std::fmt;

use crate::{Action, Codec, Game, Map, Operator, Orientation, State, Tile};

impl Map {
    /// Encode the grid back into a textual map, block markers included.
    pub fn encode(&self, codec: &Codec) -> String {
        self.encode_by(codec, |_, tile| codec.encode(tile))
    }

    fn encode_by(&self, codec: &Codec, mut symbol: impl FnMut(usize, Tile) -> char) -> String {
        let mut out = String::new();
        for (idx, (pos, tile)) in self.cells().enumerate() {
            if pos.x == 0 && pos.y != 0 {
                out.push_str(codec.row_sep());
            } else if pos.x != 0 {
                out.push_str(codec.col_sep());
            }
            out.push(symbol(idx, tile));
        }
        out
    }
}

impl Game {
    /// Encode the map with the block placed at `state`. The result parses
    /// back to `state`, unless the block hides a goal tile.
    pub fn encode_state(&self, state: &State, codec: &Codec) -> String {
        let width = self.map.width();
        let covered = state
            .tiles()
            .map(|pos| pos.y * width + pos.x)
            .collect::<Vec<_>>();
        self.map.encode_by(codec, |idx, tile| {
            if covered.contains(&idx) {
                codec.encode(Tile::Block)
            } else if tile == Tile::Block {
                codec.encode(Tile::Safe)
            } else {
                codec.encode(tile)
            }
        })
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.map.encode(&Codec::default()))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}", self.pos.x, self.pos.y, self.orientation)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::AxisX => f.write_str("x-axis"),
            Orientation::AxisY => f.write_str("y-axis"),
            Orientation::Vertical => f.write_str("vertical"),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.op {
            Operator::Pitch => 'P',
            Operator::Roll => 'R',
        };
        write!(f, "{op}{:+}", self.dir.token())
    }
}
