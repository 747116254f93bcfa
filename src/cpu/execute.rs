/*!
execute.rs - 6502 instruction semantics.

`execute` applies one decoded instruction to the CPU state through its operand
handle. PC has already been advanced past the opcode and operand bytes when it runs.

Flag rules
==========
- Z/N follow the result byte unless noted.
- ADC/SBC work in a 16-bit temporary. In decimal mode the NMOS digit correction
  sequence is applied, including its flag quirks (Z reflects the binary sum, N and V
  are taken mid-correction).
- Compares set C when `register >= operand`.
- Shifts and rotates, INC/DEC and the undocumented combined operations read their
  operand once and write it once.

Interrupt-related instructions
==============================
- BRK pushes PC + 1 (skipping its padding byte) and P with BREAK set, sets I and jumps
  through $FFFE.
- RTI pulls P (PLP masking) then PC.
*/

use crate::bus::Bus;
use crate::cpu::access::MemoryAccess;
use crate::cpu::opcodes::Instruction;
use crate::cpu::state::{
    CARRY, CpuState, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, ZERO,
};

pub const IRQ_BRK_VECTOR: u16 = 0xFFFE;

pub(crate) fn execute(
    instruction: Instruction,
    access: &mut MemoryAccess,
    cpu: &mut CpuState,
    bus: &mut Bus,
) {
    use Instruction::*;
    match instruction {
        // Loads / stores
        Lda => {
            let v = access.read(cpu, bus);
            cpu.a = v;
            cpu.update_zn(v);
        }
        Ldx => {
            let v = access.read(cpu, bus);
            cpu.x = v;
            cpu.update_zn(v);
        }
        Ldy => {
            let v = access.read(cpu, bus);
            cpu.y = v;
            cpu.update_zn(v);
        }
        Sta => {
            let v = cpu.a;
            access.write(cpu, bus, v);
        }
        Stx => {
            let v = cpu.x;
            access.write(cpu, bus, v);
        }
        Sty => {
            let v = cpu.y;
            access.write(cpu, bus, v);
        }

        // Transfers
        Tax => {
            cpu.x = cpu.a;
            cpu.update_zn(cpu.x);
        }
        Tay => {
            cpu.y = cpu.a;
            cpu.update_zn(cpu.y);
        }
        Txa => {
            cpu.a = cpu.x;
            cpu.update_zn(cpu.a);
        }
        Tya => {
            cpu.a = cpu.y;
            cpu.update_zn(cpu.a);
        }
        Tsx => {
            cpu.x = cpu.sp;
            cpu.update_zn(cpu.x);
        }
        // TXS leaves flags alone.
        Txs => cpu.sp = cpu.x,

        // Stack
        Pha => {
            let a = cpu.a;
            cpu.push_u8(bus, a);
        }
        Php => {
            let p = cpu.compose_status_for_push(true);
            cpu.push_u8(bus, p);
        }
        Pla => {
            let v = cpu.pop_u8(bus);
            cpu.a = v;
            cpu.update_zn(v);
        }
        Plp => {
            let v = cpu.pop_u8(bus);
            cpu.restore_status(v);
        }

        // Arithmetic
        Adc => {
            let m = access.read(cpu, bus);
            adc(cpu, m);
        }
        Sbc => {
            let m = access.read(cpu, bus);
            sbc(cpu, m);
        }
        Cmp => {
            let m = access.read(cpu, bus);
            let a = cpu.a;
            compare(cpu, a, m);
        }
        Cpx => {
            let m = access.read(cpu, bus);
            let x = cpu.x;
            compare(cpu, x, m);
        }
        Cpy => {
            let m = access.read(cpu, bus);
            let y = cpu.y;
            compare(cpu, y, m);
        }

        // Logical
        And => {
            let v = cpu.a & access.read(cpu, bus);
            cpu.a = v;
            cpu.update_zn(v);
        }
        Ora => {
            let v = cpu.a | access.read(cpu, bus);
            cpu.a = v;
            cpu.update_zn(v);
        }
        Eor => {
            let v = cpu.a ^ access.read(cpu, bus);
            cpu.a = v;
            cpu.update_zn(v);
        }
        Bit => {
            let m = access.read(cpu, bus);
            cpu.set_flag(ZERO, cpu.a & m == 0);
            cpu.set_flag(NEGATIVE, m & 0x80 != 0);
            cpu.set_flag(OVERFLOW, m & 0x40 != 0);
        }

        // Read-modify-write
        Asl => {
            modify(access, cpu, bus, asl);
        }
        Lsr => {
            modify(access, cpu, bus, lsr);
        }
        Rol => {
            modify(access, cpu, bus, rol);
        }
        Ror => {
            modify(access, cpu, bus, ror);
        }
        Inc => {
            modify(access, cpu, bus, |cpu, v| {
                let r = v.wrapping_add(1);
                cpu.update_zn(r);
                r
            });
        }
        Dec => {
            modify(access, cpu, bus, |cpu, v| {
                let r = v.wrapping_sub(1);
                cpu.update_zn(r);
                r
            });
        }
        Inx => {
            cpu.x = cpu.x.wrapping_add(1);
            cpu.update_zn(cpu.x);
        }
        Iny => {
            cpu.y = cpu.y.wrapping_add(1);
            cpu.update_zn(cpu.y);
        }
        Dex => {
            cpu.x = cpu.x.wrapping_sub(1);
            cpu.update_zn(cpu.x);
        }
        Dey => {
            cpu.y = cpu.y.wrapping_sub(1);
            cpu.update_zn(cpu.y);
        }

        // Control flow
        Jmp => {
            if let Some(target) = access.address() {
                cpu.pc = target;
            }
        }
        Jsr => {
            if let Some(target) = access.address() {
                let ret = cpu.pc.wrapping_sub(1);
                cpu.push_u16(bus, ret);
                cpu.pc = target;
            }
        }
        Rts => {
            cpu.pc = cpu.pop_u16(bus).wrapping_add(1);
        }
        Brk => {
            let ret = cpu.pc.wrapping_add(1);
            cpu.push_u16(bus, ret);
            let p = cpu.compose_status_for_push(true);
            cpu.push_u8(bus, p);
            cpu.set_flag(IRQ_DISABLE, true);
            cpu.pc = bus.read_word(IRQ_BRK_VECTOR);
        }
        Rti => {
            let p = cpu.pop_u8(bus);
            cpu.restore_status(p);
            cpu.pc = cpu.pop_u16(bus);
        }
        Bcc => branch(access, cpu, CARRY, false),
        Bcs => branch(access, cpu, CARRY, true),
        Bne => branch(access, cpu, ZERO, false),
        Beq => branch(access, cpu, ZERO, true),
        Bpl => branch(access, cpu, NEGATIVE, false),
        Bmi => branch(access, cpu, NEGATIVE, true),
        Bvc => branch(access, cpu, OVERFLOW, false),
        Bvs => branch(access, cpu, OVERFLOW, true),

        // Flags
        Clc => cpu.set_flag(CARRY, false),
        Sec => cpu.set_flag(CARRY, true),
        Cli => cpu.set_flag(IRQ_DISABLE, false),
        Sei => cpu.set_flag(IRQ_DISABLE, true),
        Clv => cpu.set_flag(OVERFLOW, false),
        Cld => cpu.set_flag(DECIMAL, false),
        Sed => cpu.set_flag(DECIMAL, true),

        // Multi-byte NOPs still perform their read.
        Nop => {
            if access.address().is_some() {
                access.read(cpu, bus);
            }
        }

        // Undocumented
        Lax => {
            let v = access.read(cpu, bus);
            cpu.a = v;
            cpu.x = v;
            cpu.update_zn(v);
        }
        Sax => {
            let v = cpu.a & cpu.x;
            access.write(cpu, bus, v);
        }
        Dcp => {
            let r = modify(access, cpu, bus, |_, v| v.wrapping_sub(1));
            let a = cpu.a;
            compare(cpu, a, r);
        }
        Isc => {
            let r = modify(access, cpu, bus, |_, v| v.wrapping_add(1));
            sbc(cpu, r);
        }
        Slo => {
            let r = modify(access, cpu, bus, asl);
            cpu.a |= r;
            cpu.update_zn(cpu.a);
        }
        Rla => {
            let r = modify(access, cpu, bus, rol);
            cpu.a &= r;
            cpu.update_zn(cpu.a);
        }
        Sre => {
            let r = modify(access, cpu, bus, lsr);
            cpu.a ^= r;
            cpu.update_zn(cpu.a);
        }
        Rra => {
            let r = modify(access, cpu, bus, ror);
            adc(cpu, r);
        }
    }
}

/// Read once, compute, write once. Returns the written value.
fn modify<F>(access: &mut MemoryAccess, cpu: &mut CpuState, bus: &mut Bus, f: F) -> u8
where
    F: FnOnce(&mut CpuState, u8) -> u8,
{
    let v = access.read(cpu, bus);
    let r = f(cpu, v);
    access.write(cpu, bus, r);
    r
}

/// Take the branch when flag `mask` equals `when_set`.
#[inline]
fn branch(access: &MemoryAccess, cpu: &mut CpuState, mask: u8, when_set: bool) {
    if cpu.get_flag(mask) != when_set {
        return;
    }
    if let Some(target) = access.address() {
        cpu.pc = target;
    }
}

#[inline]
fn compare(cpu: &mut CpuState, register: u8, m: u8) {
    cpu.set_flag(CARRY, register >= m);
    cpu.update_zn(register.wrapping_sub(m));
}

fn asl(cpu: &mut CpuState, v: u8) -> u8 {
    cpu.set_flag(CARRY, v & 0x80 != 0);
    let r = v << 1;
    cpu.update_zn(r);
    r
}

fn lsr(cpu: &mut CpuState, v: u8) -> u8 {
    cpu.set_flag(CARRY, v & 0x01 != 0);
    let r = v >> 1;
    cpu.update_zn(r);
    r
}

fn rol(cpu: &mut CpuState, v: u8) -> u8 {
    let carry_in = cpu.get_flag(CARRY) as u8;
    cpu.set_flag(CARRY, v & 0x80 != 0);
    let r = (v << 1) | carry_in;
    cpu.update_zn(r);
    r
}

fn ror(cpu: &mut CpuState, v: u8) -> u8 {
    let carry_in = (cpu.get_flag(CARRY) as u8) << 7;
    cpu.set_flag(CARRY, v & 0x01 != 0);
    let r = (v >> 1) | carry_in;
    cpu.update_zn(r);
    r
}

pub(crate) fn adc(cpu: &mut CpuState, m: u8) {
    let a = cpu.a;
    let carry = cpu.get_flag(CARRY) as u16;
    let mut temp = a as u16 + m as u16 + carry;
    cpu.set_flag(ZERO, temp & 0xFF == 0);

    let overflow = |t: u16| (a ^ m) & 0x80 == 0 && (a as u16 ^ t) & 0x80 != 0;
    if cpu.get_flag(DECIMAL) {
        if (a & 0x0F) as u16 + (m & 0x0F) as u16 + carry > 9 {
            temp += 6;
        }
        cpu.set_flag(NEGATIVE, temp & 0x80 != 0);
        cpu.set_flag(OVERFLOW, overflow(temp));
        if temp > 0x99 {
            temp += 96;
        }
        cpu.set_flag(CARRY, temp > 0x99);
    } else {
        cpu.set_flag(NEGATIVE, temp & 0x80 != 0);
        cpu.set_flag(OVERFLOW, overflow(temp));
        cpu.set_flag(CARRY, temp > 0xFF);
    }
    cpu.a = temp as u8;
}

pub(crate) fn sbc(cpu: &mut CpuState, m: u8) {
    let a = cpu.a;
    let borrow = !cpu.get_flag(CARRY) as u16;
    let mut temp = (a as u16).wrapping_sub(m as u16).wrapping_sub(borrow);
    cpu.set_flag(NEGATIVE, temp & 0x80 != 0);
    cpu.set_flag(ZERO, temp & 0xFF == 0);
    cpu.set_flag(
        OVERFLOW,
        (a as u16 ^ temp) & 0x80 != 0 && (a ^ m) & 0x80 != 0,
    );
    if cpu.get_flag(DECIMAL) {
        if ((a & 0x0F) as i16 - borrow as i16) < (m & 0x0F) as i16 {
            temp = temp.wrapping_sub(6);
        }
        if temp > 0x99 {
            temp = temp.wrapping_sub(0x60);
        }
    }
    cpu.set_flag(CARRY, temp < 0x100);
    cpu.a = temp as u8;
}
