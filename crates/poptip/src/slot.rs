#![forbid(unsafe_code)]

//! Single-assignment global slot.
//!
//! Hosts that publish the tooltip under a well-known global name claim a
//! [`GlobalSlot`] once during startup. A second claim is an error rather
//! than a silent overwrite, so two builds cannot end up sharing a page.

use std::sync::OnceLock;

use crate::error::TooltipError;

/// A named, write-once slot.
#[derive(Debug)]
pub struct GlobalSlot<T> {
    name: &'static str,
    cell: OnceLock<T>,
}

impl<T> GlobalSlot<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: OnceLock::new(),
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Claim the slot. Fails with [`TooltipError::SlotOccupied`] if it
    /// already holds a value.
    pub fn install(&self, value: T) -> Result<&T, TooltipError> {
        let mut claimed = false;
        let stored = self.cell.get_or_init(|| {
            claimed = true;
            value
        });
        if claimed {
            Ok(stored)
        } else {
            Err(self.occupied())
        }
    }

    /// The error a second claim produces.
    pub fn occupied(&self) -> TooltipError {
        TooltipError::SlotOccupied {
            name: self.name.to_owned(),
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn is_occupied(&self) -> bool {
        self.cell.get().is_some()
    }
}
