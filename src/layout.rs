//! Bit layout of a composite identifier
//!
//! The first field occupies the most significant bits, the last field the
//! least significant ones.

use crate::config::ConfigError;
use crate::error::{IdGenError, Result};

/// Maximum number of bits an identifier can hold
pub const MAX_TOTAL_BITS: u32 = 64;

/// Calculate mask for given number of bits
#[inline]
pub const fn mask_for(bits: u8) -> u64 {
    if bits as u32 >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Position of one field inside the identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    name: String,
    bits: u8,
    shift: u8,
    mask: u64,
}

impl Slot {
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    #[inline(always)]
    pub const fn shift(&self) -> u8 {
        self.shift
    }

    #[inline(always)]
    pub const fn mask(&self) -> u64 {
        self.mask
    }
}

/// Packs per-field integers into one identifier and back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitLayout {
    slots: Vec<Slot>,
    total_bits: u32,
}

impl BitLayout {
    /// Create a layout from `(name, bits)` pairs in declaration order
    pub fn new<I, S>(fields: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (S, u8)>,
        S: Into<String>,
    {
        let fields: Vec<(String, u8)> = fields
            .into_iter()
            .map(|(name, bits)| (name.into(), bits))
            .collect();

        let mut total_bits = 0u32;
        for (name, bits) in &fields {
            if *bits == 0 || *bits as u32 > MAX_TOTAL_BITS {
                return Err(ConfigError::InvalidBits {
                    field: name.clone(),
                    bits: *bits,
                });
            }
            total_bits += *bits as u32;
        }
        if total_bits > MAX_TOTAL_BITS {
            return Err(ConfigError::TooManyBits { total: total_bits });
        }

        let mut shift = total_bits;
        let slots = fields
            .into_iter()
            .map(|(name, bits)| {
                shift -= bits as u32;
                Slot {
                    name,
                    bits,
                    shift: shift as u8,
                    mask: mask_for(bits),
                }
            })
            .collect();

        Ok(Self { slots, total_bits })
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[inline(always)]
    pub const fn total_bits(&self) -> u32 {
        self.total_bits
    }

    /// Largest identifier this layout can produce
    pub const fn max_id(&self) -> u64 {
        mask_for(self.total_bits as u8)
    }

    /// Extract a single field's part from an identifier
    #[inline]
    pub fn extract(&self, id: u64, index: usize) -> Option<u64> {
        let slot = self.slots.get(index)?;
        Some(id.checked_shr(slot.shift as u32).unwrap_or(0) & slot.mask)
    }

    /// Verify a single part fits its field
    #[inline]
    pub fn check(&self, index: usize, number: u64) -> Result<()> {
        match self.slots.get(index) {
            Some(slot) if number > slot.mask => Err(IdGenError::Assemble {
                field: slot.name.clone(),
                number,
                bits: slot.bits,
                mask: slot.mask,
            }),
            Some(_) => Ok(()),
            None => Err(IdGenError::PartCount {
                expected: self.slots.len(),
                actual: index + 1,
            }),
        }
    }

    /// Assemble a list of parts into an identifier
    pub fn assemble(&self, parts: &[u64]) -> Result<u64> {
        if parts.len() != self.slots.len() {
            return Err(IdGenError::PartCount {
                expected: self.slots.len(),
                actual: parts.len(),
            });
        }

        let mut id = 0u64;
        for (index, (&number, slot)) in parts.iter().zip(&self.slots).enumerate() {
            self.check(index, number)?;
            // total bits never exceed 64, so anything shifted out is zero
            id = id.checked_shl(slot.bits as u32).unwrap_or(0) | number;
        }
        Ok(id)
    }

    /// Disassemble an identifier into its parts, in declaration order
    pub fn disassemble(&self, id: u64) -> Result<Vec<u64>> {
        let mut rest = id;
        let mut parts = Vec::with_capacity(self.slots.len());
        for slot in self.slots.iter().rev() {
            parts.push(rest & slot.mask);
            rest = rest.checked_shr(slot.bits as u32).unwrap_or(0);
        }

        if rest != 0 {
            return Err(IdGenError::MalformedId { remainder: rest });
        }

        parts.reverse();
        Ok(parts)
    }
}
