use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl NodePos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn offset(self, direction: Direction) -> Self {
        let [dx, dy, dz] = direction.delta();
        Self::new(
            self.x.wrapping_add(dx),
            self.y.wrapping_add(dy),
            self.z.wrapping_add(dz),
        )
    }

    pub fn neighbors(self) -> [NodePos; 6] {
        Direction::ALL.map(|direction| self.offset(direction))
    }
}

/// Face directions. `y` is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
        Direction::PosZ,
        Direction::NegZ,
    ];

    pub fn delta(self) -> [i32; 3] {
        match self {
            Direction::PosX => [1, 0, 0],
            Direction::NegX => [-1, 0, 0],
            Direction::PosY => [0, 1, 0],
            Direction::NegY => [0, -1, 0],
            Direction::PosZ => [0, 0, 1],
            Direction::NegZ => [0, 0, -1],
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::PosX => Direction::NegX,
            Direction::NegX => Direction::PosX,
            Direction::PosY => Direction::NegY,
            Direction::NegY => Direction::PosY,
            Direction::PosZ => Direction::NegZ,
            Direction::NegZ => Direction::PosZ,
        }
    }

    /// Rotation value stored in a node's `param2` when it is placed facing
    /// this way. Vertical faces map to the axis-direction values 4 and 8.
    pub fn facedir(self) -> u8 {
        match self {
            Direction::PosZ => 0,
            Direction::PosX => 1,
            Direction::NegZ => 2,
            Direction::NegX => 3,
            Direction::PosY => 4,
            Direction::NegY => 8,
        }
    }
}
