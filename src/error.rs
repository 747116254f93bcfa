/*!
Crate error type.

Two classes of failure exist in the core:
- Loading problems (bad iNES data, unreadable file, mapper number we do not emulate).
- Emulation gaps at run time (an opcode without a dispatch entry).

Both are fatal for the run. They surface as `Err(NesError)` so callers decide how to
abort; guest-level oddities (open bus, unmodeled registers) never produce an error.
*/

use std::fmt;

#[derive(Debug)]
pub enum NesError {
    /// Data too short for a header, or the magic is not `NES<1A>`.
    InvalidHeader,
    /// A PRG/CHR section is shorter than the header claims.
    Truncated {
        section: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Reading the image from disk failed.
    Io(std::io::Error),
    /// The header selects a mapper that has no implementation.
    UnsupportedMapper(u8),
    /// The CPU fetched an opcode with no dispatch entry.
    UnimplementedOpcode { opcode: u8, pc: u16 },
}

impl fmt::Display for NesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NesError::InvalidHeader => write!(f, "invalid iNES header (expected NES<1A>)"),
            NesError::Truncated {
                section,
                expected,
                actual,
            } => write!(
                f,
                "{section} data truncated: expected {expected} bytes, found {actual}"
            ),
            NesError::Io(e) => write!(f, "failed to read ROM image: {e}"),
            NesError::UnsupportedMapper(n) => write!(f, "unsupported mapper number {n}"),
            NesError::UnimplementedOpcode { opcode, pc } => write!(
                f,
                "unimplemented opcode ${opcode:02X} ({}) at ${pc:04X}",
                crate::cpu::opcodes::mnemonic(*opcode)
            ),
        }
    }
}

impl std::error::Error for NesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NesError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NesError {
    fn from(e: std::io::Error) -> Self {
        NesError::Io(e)
    }
}
