//! Kinds of topologies, mesh locations and file modes
//!
//! The integer values a store uses for these are opaque and are queried
//! when a file is opened, see [`StoreEnums`].

use super::error;

/// The four kinds of topology a file can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopologyKind {
    /// Polyline network with branch geometry
    Network1d,
    /// Computational 1D mesh laid on a network
    Mesh1d,
    /// 2D unstructured mesh, optionally layered
    Mesh2d,
    /// Links between locations of two meshes
    Contacts,
}

impl TopologyKind {
    pub const ALL: [TopologyKind; 4] = [
        TopologyKind::Network1d,
        TopologyKind::Mesh1d,
        TopologyKind::Mesh2d,
        TopologyKind::Contacts,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Network1d => "network1d",
            Self::Mesh1d => "mesh1d",
            Self::Mesh2d => "mesh2d",
            Self::Contacts => "contacts",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Network1d => 0,
            Self::Mesh1d => 1,
            Self::Mesh2d => 2,
            Self::Contacts => 3,
        }
    }
}

impl std::fmt::Display for TopologyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Mesh entity a value or contact end is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Node,
    Edge,
    Face,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Node, Location::Edge, Location::Face];

    /// Name used in the `location` attribute of data variables
    pub fn name(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Edge => "edge",
            Self::Face => "face",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.name() == name)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a file is opened. Fixed for the lifetime of the handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Existing file, no mutation
    Read,
    /// New file, fails if the file exists
    Write,
    /// New file, truncating an existing one
    Replace,
}

impl Mode {
    pub fn is_writable(self) -> bool {
        self != Mode::Read
    }
}

impl std::str::FromStr for Mode {
    type Err = error::Error;

    /// Parses the short forms `"r"`, `"w"` and `"w+"`
    fn from_str(s: &str) -> error::Result<Self> {
        match s {
            "r" => Ok(Mode::Read),
            "w" => Ok(Mode::Write),
            "w+" => Ok(Mode::Replace),
            other => Err(error::Error::InvalidMode(other.to_string())),
        }
    }
}

/// Integer values a store assigned to topology kinds and locations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreEnums {
    pub(crate) topologies: [i32; 4],
    pub(crate) locations: [i32; 3],
}

impl StoreEnums {
    /// Store value of a topology kind
    pub fn topology(&self, kind: TopologyKind) -> i32 {
        self.topologies[kind.index()]
    }

    /// Store value of a location
    pub fn location(&self, location: Location) -> i32 {
        match location {
            Location::Node => self.locations[0],
            Location::Edge => self.locations[1],
            Location::Face => self.locations[2],
        }
    }

    /// Maps a store value back to a location
    pub fn location_from_value(&self, value: i32) -> error::Result<Location> {
        Location::ALL
            .iter()
            .copied()
            .find(|l| self.location(*l) == value)
            .ok_or_else(|| {
                error::Error::Consistency(format!("{} is not a location value of the store", value))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_modes() {
        assert_eq!("r".parse::<Mode>().unwrap(), Mode::Read);
        assert_eq!("w".parse::<Mode>().unwrap(), Mode::Write);
        assert_eq!("w+".parse::<Mode>().unwrap(), Mode::Replace);
        assert_eq!(
            "a".parse::<Mode>(),
            Err(error::Error::InvalidMode("a".to_string()))
        );
    }

    #[test]
    fn location_values() {
        let enums = StoreEnums {
            topologies: [10, 11, 12, 13],
            locations: [7, 8, 9],
        };
        assert_eq!(enums.location(Location::Edge), 8);
        assert_eq!(enums.location_from_value(9).unwrap(), Location::Face);
        assert!(enums.location_from_value(0).is_err());
        assert_eq!(enums.topology(TopologyKind::Mesh2d), 12);
    }
}
