#![allow(non_snake_case)]
//! Execution semantics for each opcode, one function per instruction.
//!
//! Every function works on the pieces of machine state it needs. Flags are always written after the result so
//! that an instruction targeting VF ends with the flag value.

use rand::Rng;

use crate::{
    constants,
    display::Display,
    emulator::{
        KeyPad,
        ProgramCounter,
        Quirks,
    },
    mem::{
        AddressStack,
        Ram,
        Register,
        StackError,
    },
};

pub fn op_00E0(display: &mut Display) {
    display.clear();
}

pub fn op_00EE(pc: &mut ProgramCounter, stack: &mut AddressStack) -> Result<(), StackError> {
    pc.jump(stack.pop()?);
    Ok(())
}

pub fn op_1NNN(pc: &mut ProgramCounter, nnn: u16) {
    pc.jump(nnn);
}

pub fn op_2NNN(stack: &mut AddressStack, pc: &mut ProgramCounter, nnn: u16) -> Result<(), StackError> {
    stack.push(pc.inner())?;
    pc.jump(nnn);
    Ok(())
}

pub fn op_3XKK(register: &Register, x: u8, kk: u8, pc: &mut ProgramCounter) {
    if register.get(x) == kk {
        pc.increment();
    }
}

pub fn op_4XKK(register: &Register, x: u8, kk: u8, pc: &mut ProgramCounter) {
    if register.get(x) != kk {
        pc.increment();
    }
}

pub fn op_5XY0(register: &Register, x: u8, y: u8, pc: &mut ProgramCounter) {
    if register.cmp_registers(x, y) {
        pc.increment();
    }
}

pub fn op_6XKK(register: &mut Register, x: u8, kk: u8) {
    register.set(x, kk);
}

pub fn op_7XKK(register: &mut Register, x: u8, kk: u8) {
    register.set(x, register.get(x).wrapping_add(kk));
}

pub fn op_8XY0(register: &mut Register, x: u8, y: u8) {
    register.set_x_y(x, y);
}

pub fn op_8XY1(quirks: &Quirks, register: &mut Register, x: u8, y: u8) {
    register.set(x, register.get(x) | register.get(y));
    if quirks.vf_reset {
        register.set_flag(false);
    }
}

pub fn op_8XY2(quirks: &Quirks, register: &mut Register, x: u8, y: u8) {
    register.set(x, register.get(x) & register.get(y));
    if quirks.vf_reset {
        register.set_flag(false);
    }
}

pub fn op_8XY3(quirks: &Quirks, register: &mut Register, x: u8, y: u8) {
    register.set(x, register.get(x) ^ register.get(y));
    if quirks.vf_reset {
        register.set_flag(false);
    }
}

pub fn op_8XY4(register: &mut Register, x: u8, y: u8) {
    let (val, overflow) = register.get(x).overflowing_add(register.get(y));
    register.set(x, val);
    register.set_flag(overflow);
}

pub fn op_8XY5(register: &mut Register, x: u8, y: u8) {
    let (val, borrow) = register.get(x).overflowing_sub(register.get(y));
    register.set(x, val);
    register.set_flag(!borrow);
}

pub fn op_8XY6(quirks: &Quirks, register: &mut Register, x: u8, y: u8) {
    let source = if quirks.shift_uses_vy {
        register.get(y)
    } else {
        register.get(x)
    };
    register.set(x, source >> 1);
    register.set_flag(source & 1 == 1);
}

pub fn op_8XY7(register: &mut Register, x: u8, y: u8) {
    let (val, borrow) = register.get(y).overflowing_sub(register.get(x));
    register.set(x, val);
    register.set_flag(!borrow);
}

pub fn op_8XYE(quirks: &Quirks, register: &mut Register, x: u8, y: u8) {
    let source = if quirks.shift_uses_vy {
        register.get(y)
    } else {
        register.get(x)
    };
    register.set(x, source << 1);
    register.set_flag(source >> 7 == 1);
}

pub fn op_9XY0(register: &Register, x: u8, y: u8, pc: &mut ProgramCounter) {
    if !register.cmp_registers(x, y) {
        pc.increment();
    }
}

pub fn op_ANNN(index_register: &mut u16, nnn: u16) {
    *index_register = nnn;
}

pub fn op_BNNN(quirks: &Quirks, register: &Register, pc: &mut ProgramCounter, x: u8, nnn: u16) {
    let offset = if quirks.jump_with_vx {
        register.get(x)
    } else {
        register.get(0x0)
    };
    pc.jump(nnn + offset as u16);
}

pub fn op_CXKK<R: Rng>(register: &mut Register, rng: &mut R, x: u8, kk: u8) {
    register.set(x, rng.gen::<u8>() & kk);
}

/// Draws the `n` byte sprite at I to (Vx, Vy) and sets VF on collision.
#[allow(clippy::too_many_arguments)]
pub fn op_DXYN(
    quirks: &Quirks,
    memory: &Ram,
    register: &mut Register,
    display: &mut Display,
    index_register: u16,
    x: u8,
    y: u8,
    n: u8,
) {
    let start_x = register.get(x);
    let start_y = register.get(y);
    register.set_flag(false);

    let sprite = memory.read(index_register, n);
    if display.draw(start_x, start_y, &sprite, quirks.sprite_edges) {
        register.set_flag(true);
    }
}

pub fn op_EX9E(register: &Register, keypad: &KeyPad, pc: &mut ProgramCounter, x: u8) {
    if keypad.is_key_pressed(register.get(x)) {
        pc.increment();
    }
}

pub fn op_EXA1(register: &Register, keypad: &KeyPad, pc: &mut ProgramCounter, x: u8) {
    if !keypad.is_key_pressed(register.get(x)) {
        pc.increment();
    }
}

pub fn op_FX07(register: &mut Register, x: u8, delay_timer: u8) {
    register.set(x, delay_timer);
}

/// Latches the lowest pressed key into Vx. Returns false while no key is down.
pub fn op_FX0A(register: &mut Register, keypad: &KeyPad, x: u8) -> bool {
    match keypad.get_key_pressed() {
        Some(key) => {
            register.set(x, key);
            true
        }
        None => false,
    }
}

pub fn op_FX15(register: &Register, x: u8, delay_timer: &mut u8) {
    *delay_timer = register.get(x);
}

pub fn op_FX18(register: &Register, x: u8, sound_timer: &mut u8) {
    *sound_timer = register.get(x);
}

pub fn op_FX1E(register: &Register, x: u8, index_register: &mut u16) {
    *index_register = index_register.wrapping_add(register.get(x) as u16);
}

pub fn op_FX29(register: &Register, index_register: &mut u16, x: u8) {
    let font_char = register.get(x) as u16;
    *index_register = constants::FONT_OFFSET as u16 + font_char * constants::FONT_GLYPH_SIZE;
}

pub fn op_FX33(register: &Register, memory: &mut Ram, x: u8, index_register: u16) {
    let mut val = register.get(x);

    for i in (0..3).rev() {
        *memory.get_mut(index_register.wrapping_add(i)) = val % 10;
        val /= 10;
    }
}

pub fn op_FX55(quirks: &Quirks, register: &Register, memory: &mut Ram, index_register: &mut u16, x: u8) {
    for i in 0..=x {
        *memory.get_mut(index_register.wrapping_add(i as u16)) = register.get(i);
    }
    if quirks.memory_increment {
        *index_register = index_register.wrapping_add(x as u16 + 1);
    }
}

pub fn op_FX65(quirks: &Quirks, register: &mut Register, memory: &Ram, index_register: &mut u16, x: u8) {
    for i in 0..=x {
        register.set(i, memory.get(index_register.wrapping_add(i as u16)));
    }
    if quirks.memory_increment {
        *index_register = index_register.wrapping_add(x as u16 + 1);
    }
}
