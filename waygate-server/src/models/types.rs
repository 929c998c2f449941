use crate::error::DomainError;
use serde::{Deserialize, Serialize};

#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Copy,
            Clone,
            Debug,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[repr(transparent)]
        #[serde(transparent)] // JSON = plain UUID string
        pub struct $name(pub uuid::Uuid);

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $name {
            #[inline]
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }
            #[inline]
            pub fn from_uuid(u: uuid::Uuid) -> Self {
                Self(u)
            }
            #[inline]
            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl core::str::FromStr for $name {
            type Err = uuid::Error;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(v: uuid::Uuid) -> Self {
                Self(v)
            }
        }
    };
}

define_id!(PlayerId);
define_id!(ItemId);

/// Direction (or free-form keyword) an exit is labelled with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
    In,
    Out,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
    Custom(String), // "gate", "trapdoor", ...
}

impl Direction {
    pub fn as_str(&self) -> &str {
        match self {
            Direction::Custom(s) => s.as_str(),
            _ => self.canonical(),
        }
    }

    #[inline]
    pub fn canonical(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::In => "in",
            Direction::Out => "out",
            Direction::Northeast => "northeast",
            Direction::Northwest => "northwest",
            Direction::Southeast => "southeast",
            Direction::Southwest => "southwest",
            Direction::Custom(_) => "custom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            // cardinal + aliases
            "n" | "north" => Some(Direction::North),
            "e" | "east" => Some(Direction::East),
            "s" | "south" => Some(Direction::South),
            "w" | "west" => Some(Direction::West),

            "ne" | "northeast" => Some(Direction::Northeast),
            "nw" | "northwest" => Some(Direction::Northwest),
            "se" | "southeast" => Some(Direction::Southeast),
            "sw" | "southwest" => Some(Direction::Southwest),

            "u" | "up" => Some(Direction::Up),
            "d" | "down" => Some(Direction::Down),
            "in" => Some(Direction::In),
            "out" => Some(Direction::Out),
            _ => None,
        }
    }

    /// Like `parse`, but anything that is not a known direction becomes a keyword.
    /// Returns `None` for blank input.
    pub fn from_token(s: &str) -> Option<Self> {
        let t = s.trim();
        if t.is_empty() {
            return None;
        }
        Some(Self::parse(t).unwrap_or_else(|| Direction::Custom(t.to_lowercase())))
    }
}

impl core::str::FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::from_token(s).ok_or_else(|| DomainError::InvalidDirection(s.to_string()))
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Direction> for String {
    fn from(d: Direction) -> Self {
        d.to_string()
    }
}

impl From<String> for Direction {
    fn from(s: String) -> Self {
        Direction::from_token(&s).unwrap_or(Direction::Custom(s))
    }
}
