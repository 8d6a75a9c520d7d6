use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Building level a catalog part sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Floor {
    #[serde(rename = "sub")]
    Sub,
    #[serde(rename = "gf")]
    Ground,
    #[serde(rename = "1")]
    First,
    #[serde(rename = "roof")]
    Roof,
    #[serde(rename = "upper_roof")]
    UpperRoof,
    #[serde(rename = "ext")]
    External,
}

impl Floor {
    /// Every level, bottom to top, external works last.
    pub const ALL: [Floor; 6] = [
        Floor::Sub,
        Floor::Ground,
        Floor::First,
        Floor::Roof,
        Floor::UpperRoof,
        Floor::External,
    ];

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "sub" => Some(Self::Sub),
            "gf" => Some(Self::Ground),
            "1" => Some(Self::First),
            "roof" => Some(Self::Roof),
            "upper_roof" => Some(Self::UpperRoof),
            "ext" => Some(Self::External),
            _ => None,
        }
    }

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Sub => "sub",
            Self::Ground => "gf",
            Self::First => "1",
            Self::Roof => "roof",
            Self::UpperRoof => "upper_roof",
            Self::External => "ext",
        }
    }

    /// Human-readable level name for the levels panel.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sub => "Basement",
            Self::Ground => "Ground Floor",
            Self::First => "First Floor",
            Self::Roof => "Roof",
            Self::UpperRoof => "Upper Roof",
            Self::External => "External Works",
        }
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Which levels are shown. `All` is a filter value only, never an element tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloorFilter {
    #[default]
    All,
    Only(Floor),
}

impl FloorFilter {
    /// Whether an element on `floor` is visible under this filter.
    #[must_use]
    pub fn admits(self, floor: Floor) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == floor,
        }
    }

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(floor) => floor.tag(),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(floor) => floor.label(),
        }
    }

    /// Position in the levels panel: 0 = "All", 1+ = `Floor::ALL` index.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::All => 0,
            Self::Only(floor) => Floor::ALL.iter().position(|f| *f == floor).map_or(0, |i| i + 1),
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Self {
        match index.checked_sub(1).and_then(|i| Floor::ALL.get(i)) {
            Some(floor) => Self::Only(*floor),
            None => Self::All,
        }
    }
}

impl FromStr for FloorFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        Floor::from_tag(s)
            .map(Self::Only)
            .ok_or_else(|| format!("unknown floor '{s}' (expected all, sub, gf, 1, roof, upper_roof or ext)"))
    }
}

impl fmt::Display for FloorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
