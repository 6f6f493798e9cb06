#![forbid(unsafe_code)]

/// Errors raised while constructing or installing a tooltip.
///
/// Showing, hiding and placing never fail; only setup does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TooltipError {
    /// The trigger is not a live element of the host document.
    InvalidTrigger,
    /// The content is empty or absent.
    EmptyContent,
    /// A global slot was claimed twice.
    SlotOccupied { name: String },
    /// An options document could not be turned into typed options.
    InvalidOptions(String),
}

impl core::fmt::Display for TooltipError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidTrigger => f.write_str("tooltip trigger must be an element"),
            Self::EmptyContent => f.write_str("tooltip content must be non-empty"),
            Self::SlotOccupied { name } => write!(f, "{name} is already defined or occupied"),
            Self::InvalidOptions(msg) => write!(f, "invalid tooltip options: {msg}"),
        }
    }
}

impl std::error::Error for TooltipError {}
