/*!
cpu::mod - the 6502 CPU core.

Layout:

```text
    state.rs      - registers, status flags, stack and fetch helpers.
    addressing.rs - addressing mode tags and operand resolution.
    access.rs     - `MemoryAccess`, the read-once operand handle.
    opcodes.rs    - static 256-entry opcode table, mnemonics, disassembly text.
    execute.rs    - instruction semantics (ALU, loads/stores, RMW, branches, stack).
    core/         - `Cpu`: NMI servicing, fetch/decode/execute, cycle accounting.
```

Usage:
```ignore
use nescore::cpu::Cpu;

let mut cpu = Cpu::new();
cpu.reset(&mut bus);
let cycles = cpu.step(&mut bus)?;
```

Decimal mode is emulated; IRQ lines are not (only BRK uses $FFFE).
*/

pub mod access;
pub mod addressing;
pub mod core;
pub mod execute;
pub mod opcodes;
pub mod state;

pub use crate::cpu::access::{MemoryAccess, Operand};
pub use crate::cpu::addressing::AddressingMode;
pub use crate::cpu::core::{Cpu, Interrupt};
pub use crate::cpu::opcodes::{Instruction, OPCODE_TABLE, Opcode};
pub use crate::cpu::state::{
    BREAK, CARRY, CpuState, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, UNUSED, ZERO,
};
