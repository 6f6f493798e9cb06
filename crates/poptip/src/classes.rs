#![forbid(unsafe_code)]

//! Class names derived from the tooltip's `name` prefix.
//!
//! The stylesheet owns every visual decision; the component only toggles
//! these names on the floating node and its close button.

use poptip_layout::Position;

/// Precomputed class names for one prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    base: String,
    positions: [String; 4],
    unfit: String,
    animated: String,
    closable: String,
    close: String,
}

impl ClassNames {
    pub fn new(name: &str) -> Self {
        Self {
            base: name.to_owned(),
            positions: Position::ALL.map(|p| format!("{name}-{p}")),
            unfit: format!("{name}-unfit"),
            animated: format!("{name}-animated"),
            closable: format!("{name}-closable"),
            close: format!("{name}-close"),
        }
    }

    /// `{name}`
    pub fn base(&self) -> &str {
        &self.base
    }

    /// `{name}-{position}`
    pub fn position(&self, position: Position) -> &str {
        let idx = match position {
            Position::Top => 0,
            Position::Bottom => 1,
            Position::Left => 2,
            Position::Right => 3,
        };
        &self.positions[idx]
    }

    /// `{name}-unfit`
    pub fn unfit(&self) -> &str {
        &self.unfit
    }

    /// `{name}-animated`
    pub fn animated(&self) -> &str {
        &self.animated
    }

    /// `{name}-closable`
    pub fn closable(&self) -> &str {
        &self.closable
    }

    /// `{name}-close`
    pub fn close(&self) -> &str {
        &self.close
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_every_class_from_prefix() {
        let classes = ClassNames::new("hint");
        assert_eq!(classes.base(), "hint");
        assert_eq!(classes.position(Position::Top), "hint-top");
        assert_eq!(classes.position(Position::Bottom), "hint-bottom");
        assert_eq!(classes.position(Position::Left), "hint-left");
        assert_eq!(classes.position(Position::Right), "hint-right");
        assert_eq!(classes.unfit(), "hint-unfit");
        assert_eq!(classes.animated(), "hint-animated");
        assert_eq!(classes.closable(), "hint-closable");
        assert_eq!(classes.close(), "hint-close");
    }
}
