use crate::core::constants::NUM_ATTRIBUTES;
use crate::core::errors::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Stats a player can pour status points into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Vitality,
    Intelligence,
    Strength,
    Defense,
    Agility,
}

impl AttributeType {
    pub fn all() -> [AttributeType; NUM_ATTRIBUTES] {
        [
            AttributeType::Vitality,
            AttributeType::Intelligence,
            AttributeType::Strength,
            AttributeType::Defense,
            AttributeType::Agility,
        ]
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            AttributeType::Vitality => "VIT",
            AttributeType::Intelligence => "INT",
            AttributeType::Strength => "STR",
            AttributeType::Defense => "DEF",
            AttributeType::Agility => "AGI",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            AttributeType::Vitality => 0,
            AttributeType::Intelligence => 1,
            AttributeType::Strength => 2,
            AttributeType::Defense => 3,
            AttributeType::Agility => 4,
        }
    }
}

impl FromStr for AttributeType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vit" | "vitality" => Ok(AttributeType::Vitality),
            "int" | "intelligence" => Ok(AttributeType::Intelligence),
            "str" | "strength" => Ok(AttributeType::Strength),
            "def" | "defense" => Ok(AttributeType::Defense),
            "agi" | "agility" => Ok(AttributeType::Agility),
            other => Err(GameError::Validation(format!(
                "Unknown stat '{}'. Valid stats: VIT, INT, STR, DEF, AGI",
                other
            ))),
        }
    }
}

/// Allocated status points, one counter per [`AttributeType`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attributes {
    values: [u32; NUM_ATTRIBUTES],
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, attr: AttributeType) -> u32 {
        self.values[attr.index()]
    }

    pub fn set(&mut self, attr: AttributeType, value: u32) {
        self.values[attr.index()] = value;
    }

    pub fn add_points(&mut self, attr: AttributeType, points: u32) {
        self.values[attr.index()] = self.values[attr.index()].saturating_add(points);
    }

    pub fn total(&self) -> u32 {
        self.values.iter().fold(0u32, |acc, v| acc.saturating_add(*v))
    }
}

/// A requested spread of status points, e.g. `VIT+2, STR+1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatAllocation {
    entries: Vec<(AttributeType, u32)>,
}

impl StatAllocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, attr: AttributeType, points: u32) -> Self {
        self.entries.push((attr, points));
        self
    }

    /// Sum of all requested points, widened so huge requests cannot wrap.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, p)| u64::from(*p)).sum()
    }

    pub fn entries(&self) -> &[(AttributeType, u32)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Parses `vit=2 str=1` (commas or whitespace between pairs).
    pub fn parse(input: &str) -> GameResult<Self> {
        let mut allocation = Self::new();
        for pair in input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
        {
            let (name, amount) = pair.split_once('=').ok_or_else(|| {
                GameError::Validation(format!("Expected STAT=POINTS, got '{}'", pair))
            })?;
            let attr: AttributeType = name.parse()?;
            let points: u32 = amount.trim().parse().map_err(|_| {
                GameError::Validation(format!("'{}' is not a valid point amount", amount))
            })?;
            allocation = allocation.with(attr, points);
        }
        Ok(allocation)
    }
}
