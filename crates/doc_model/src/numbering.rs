//! List numbering definitions
//!
//! A numbering definition is an abstract template (one entry per indent
//! level) that list items reference by id. The registry keeps `numId` and
//! `abstractNumId` equal for every definition, which keeps the two halves
//! of numbering.xml trivially consistent.

use crate::{Alignment, Twip};
use serde::{Deserialize, Serialize};

/// Identifier shared by a definition's `abstractNumId` and `numId`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumId(pub u32);

impl std::fmt::Display for NumId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number format for a list level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberFormat {
    Decimal,
    LowerLetter,
    UpperLetter,
    LowerRoman,
    UpperRoman,
    Bullet,
    None,
}

impl NumberFormat {
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            NumberFormat::Decimal => "decimal",
            NumberFormat::LowerLetter => "lowerLetter",
            NumberFormat::UpperLetter => "upperLetter",
            NumberFormat::LowerRoman => "lowerRoman",
            NumberFormat::UpperRoman => "upperRoman",
            NumberFormat::Bullet => "bullet",
            NumberFormat::None => "none",
        }
    }
}

/// What follows the number before the item text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelSuffix {
    #[default]
    Tab,
    Space,
    Nothing,
}

impl LevelSuffix {
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            LevelSuffix::Tab => "tab",
            LevelSuffix::Space => "space",
            LevelSuffix::Nothing => "nothing",
        }
    }
}

/// One indent level of a numbering definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListLevel {
    /// Zero-based level index
    pub level: u8,
    pub start: u32,
    pub format: NumberFormat,
    /// Pattern with `%N` placeholders, e.g. `"%1."`
    pub text: String,
    pub alignment: Alignment,
    pub indent_left: Twip,
    pub hanging: Twip,
    pub suffix: LevelSuffix,
    /// Bullet font, only meaningful for [`NumberFormat::Bullet`]
    pub font: Option<String>,
}

impl ListLevel {
    /// A decimal level numbered `1.`, `2.`, … at the given depth
    pub fn decimal(level: u8) -> Self {
        Self {
            level,
            start: 1,
            format: NumberFormat::Decimal,
            text: format!("%{}.", level + 1),
            alignment: Alignment::Left,
            indent_left: Twip(720 * (level as i32 + 1)),
            hanging: Twip(360),
            suffix: LevelSuffix::Tab,
            font: None,
        }
    }

    /// A bullet level using the Symbol font
    pub fn bullet(level: u8) -> Self {
        Self {
            level,
            start: 1,
            format: NumberFormat::Bullet,
            text: "\u{F0B7}".to_string(),
            alignment: Alignment::Left,
            indent_left: Twip(720 * (level as i32 + 1)),
            hanging: Twip(360),
            suffix: LevelSuffix::Tab,
            font: Some("Symbol".to_string()),
        }
    }
}

/// One registered numbering definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberingDefinition {
    pub id: NumId,
    /// Random 8-hex nonce required by the schema; carries no meaning
    pub nsid: String,
    pub multi_level: bool,
    pub levels: Vec<ListLevel>,
}

/// Document-scoped registry of numbering definitions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberingRegistry {
    definitions: Vec<NumberingDefinition>,
}

impl NumberingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition; the returned id doubles as both
    /// `abstractNumId` and `numId`.
    pub fn register(&mut self, levels: Vec<ListLevel>) -> NumId {
        let id = NumId(self.definitions.len() as u32 + 1);
        let multi_level = levels.len() > 1;
        self.definitions.push(NumberingDefinition {
            id,
            nsid: format!("{:08X}", rand::random::<u32>()),
            multi_level,
            levels,
        });
        id
    }

    /// Register the built-in nine-level bullet list
    pub fn register_bullet(&mut self) -> NumId {
        self.register((0..9).map(ListLevel::bullet).collect())
    }

    /// Register the built-in nine-level decimal list
    pub fn register_decimal(&mut self) -> NumId {
        self.register((0..9).map(ListLevel::decimal).collect())
    }

    pub fn all(&self) -> impl Iterator<Item = &NumberingDefinition> {
        self.definitions.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn get(&self, id: NumId) -> Option<&NumberingDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_matching_ids() {
        let mut registry = NumberingRegistry::new();
        let a = registry.register_bullet();
        let b = registry.register_decimal();
        assert_eq!(a, NumId(1));
        assert_eq!(b, NumId(2));
        assert_eq!(registry.get(a).unwrap().id, a);
    }

    #[test]
    fn test_nsid_shape() {
        let mut registry = NumberingRegistry::new();
        let id = registry.register_decimal();
        let nsid = &registry.get(id).unwrap().nsid;
        assert_eq!(nsid.len(), 8);
        assert!(nsid.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_level_presets() {
        let bullet = ListLevel::bullet(0);
        assert_eq!(bullet.format, NumberFormat::Bullet);
        assert_eq!(bullet.font.as_deref(), Some("Symbol"));

        let decimal = ListLevel::decimal(2);
        assert_eq!(decimal.text, "%3.");
        assert_eq!(decimal.indent_left, Twip(2160));
    }
}
