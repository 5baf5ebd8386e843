use std::{
    fs::File,
    io::{
        self,
        Read,
    },
    path::Path,
};

use thiserror::Error;

use crate::{
    constants,
    emulator::ProgramCounter,
};

#[rustfmt::skip]
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9

    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80  // F
];

#[derive(Error, Debug)]
pub enum RomError {
    #[error("loading rom failed {0}")]
    Io(#[from] io::Error),

    #[error("rom too large {rom_size:?} > {ram_size:?}")]
    TooLarge { rom_size: usize, ram_size: usize },
}

/// Rejects program images that do not fit between the program offset and the end of memory.
pub fn check_rom_size(len: usize) -> Result<(), RomError> {
    if len > constants::AVAILABLE_RAM {
        return Err(RomError::TooLarge {
            rom_size: len,
            ram_size: constants::AVAILABLE_RAM,
        });
    }
    Ok(())
}

/// 4 KiB address space. Every address is reduced modulo the memory size, so no access can leave it.
#[derive(Clone)]
pub struct Ram {
    memory: [u8; constants::TOTAL_RAM],
}

impl Ram {
    pub fn new() -> Self {
        let mut memory = [0; constants::TOTAL_RAM];
        memory[constants::FONT_OFFSET..constants::FONT_OFFSET + FONT.len()].copy_from_slice(&FONT);

        Self { memory }
    }

    /// Fresh memory with `program` copied to the program offset. Fails before touching anything if it does not fit.
    pub fn load(program: &[u8]) -> Result<Self, RomError> {
        check_rom_size(program.len())?;

        let mut ram = Self::new();
        ram.memory[constants::MEMORY_OFFSET..constants::MEMORY_OFFSET + program.len()].copy_from_slice(program);
        Ok(ram)
    }

    pub fn op_code(&self, pc: &ProgramCounter) -> u16 {
        let pc = pc.inner();
        let high = self.get(pc) as u16;
        let low = self.get(pc.wrapping_add(1)) as u16;
        (high << 8) | low
    }

    pub fn get<T: Into<usize>>(&self, index: T) -> u8 {
        self.memory[index.into() % constants::TOTAL_RAM]
    }

    pub fn get_mut<T: Into<usize>>(&mut self, index: T) -> &mut u8 {
        &mut self.memory[index.into() % constants::TOTAL_RAM]
    }

    /// `len` consecutive bytes starting at `start`, wrapping at the end of memory.
    pub fn read(&self, start: u16, len: u8) -> Vec<u8> {
        (0..len as u16).map(|offset| self.get(start.wrapping_add(offset))).collect()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.memory
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}

/// General purpose registers V0..VF.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Register {
    registers: [u8; constants::REGISTER_COUNT],
}

impl Register {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: u8) -> u8 {
        self.registers[key as usize & 0xF]
    }

    pub fn set(&mut self, key: u8, val: u8) {
        self.registers[key as usize & 0xF] = val;
    }

    pub fn set_x_y(&mut self, x: u8, y: u8) {
        self.set(x, self.get(y));
    }

    pub fn cmp_registers(&self, x: u8, y: u8) -> bool {
        self.get(x) == self.get(y)
    }

    pub fn set_flag(&mut self, flag: bool) {
        self.set(constants::FLAG_REGISTER, flag as u8);
    }

    pub fn flag(&self) -> u8 {
        self.get(constants::FLAG_REGISTER)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.registers
    }
}

/// A program image read from disk.
pub struct Rom {
    data: Vec<u8>,
}

impl Rom {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RomError> {
        let mut file = File::open(path)?;
        let mut data = vec![];

        file.read_to_end(&mut data)?;
        check_rom_size(data.len())?;

        Ok(Self { data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    #[error("call stack overflow, depth is limited to {}", constants::STACK_DEPTH)]
    Overflow,

    #[error("return with an empty call stack")]
    Underflow,
}

/// Return addresses for subroutine calls, at most 16 deep.
#[derive(Clone, Default)]
pub struct AddressStack {
    slots: [u16; constants::STACK_DEPTH],
    sp: usize,
}

impl AddressStack {
    pub fn pop(&mut self) -> Result<u16, StackError> {
        if self.sp == 0 {
            return Err(StackError::Underflow);
        }
        self.sp -= 1;
        Ok(self.slots[self.sp])
    }

    pub fn push<T: Into<u16>>(&mut self, val: T) -> Result<(), StackError> {
        if self.sp == constants::STACK_DEPTH {
            return Err(StackError::Overflow);
        }
        self.slots[self.sp] = val.into();
        self.sp += 1;
        Ok(())
    }

    pub fn depth(&self) -> usize {
        self.sp
    }
}
