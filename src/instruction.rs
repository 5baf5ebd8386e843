/// Operand fields of a 16-bit instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionData {
    pub op_code: u16,
    pub instruction: u8,
    pub x: u8,
    pub y: u8,
    pub n: u8,
    pub kk: u8,
    pub nnn: u16,
}

impl From<u16> for InstructionData {
    fn from(op_code: u16) -> Self {
        Self {
            op_code,
            instruction: ((op_code & 0xF000) >> 12) as u8,
            x: ((op_code & 0x0F00) >> 8) as u8,
            y: ((op_code & 0x00F0) >> 4) as u8,
            n: (op_code & 0x000F) as u8,
            kk: (op_code & 0x00FF) as u8,
            nnn: op_code & 0x0FFF,
        }
    }
}

/// The CHIP-8 instruction set with bound operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 0nnn, machine code routine. Ignored.
    Sys(u16),
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 1nnn
    Jump(u16),
    /// 2nnn
    Call(u16),
    /// 3xkk
    SkipIfEqual { x: u8, kk: u8 },
    /// 4xkk
    SkipIfNotEqual { x: u8, kk: u8 },
    /// 5xy0
    SkipIfRegistersEqual { x: u8, y: u8 },
    /// 6xkk
    Load { x: u8, kk: u8 },
    /// 7xkk
    Add { x: u8, kk: u8 },
    /// 8xy0
    Move { x: u8, y: u8 },
    /// 8xy1
    Or { x: u8, y: u8 },
    /// 8xy2
    And { x: u8, y: u8 },
    /// 8xy3
    Xor { x: u8, y: u8 },
    /// 8xy4
    AddRegisters { x: u8, y: u8 },
    /// 8xy5
    Sub { x: u8, y: u8 },
    /// 8xy6
    ShiftRight { x: u8, y: u8 },
    /// 8xy7
    SubReversed { x: u8, y: u8 },
    /// 8xyE
    ShiftLeft { x: u8, y: u8 },
    /// 9xy0
    SkipIfRegistersNotEqual { x: u8, y: u8 },
    /// Annn
    LoadIndex(u16),
    /// Bnnn
    JumpWithOffset { x: u8, nnn: u16 },
    /// Cxkk
    Random { x: u8, kk: u8 },
    /// Dxyn
    Draw { x: u8, y: u8, n: u8 },
    /// Ex9E
    SkipIfKeyPressed { x: u8 },
    /// ExA1
    SkipIfKeyNotPressed { x: u8 },
    /// Fx07
    LoadDelayTimer { x: u8 },
    /// Fx0A
    WaitForKey { x: u8 },
    /// Fx15
    SetDelayTimer { x: u8 },
    /// Fx18
    SetSoundTimer { x: u8 },
    /// Fx1E
    AddIndex { x: u8 },
    /// Fx29
    LoadFont { x: u8 },
    /// Fx33
    StoreBcd { x: u8 },
    /// Fx55
    StoreRegisters { x: u8 },
    /// Fx65
    LoadRegisters { x: u8 },
    /// Anything else. Executes as a no-op.
    Unknown(u16),
}

impl From<u16> for Instruction {
    fn from(op_code: u16) -> Self {
        InstructionData::from(op_code).into()
    }
}

impl From<InstructionData> for Instruction {
    fn from(data: InstructionData) -> Self {
        let InstructionData {
            op_code,
            instruction,
            x,
            y,
            n,
            kk,
            nnn,
        } = data;

        match (instruction, n) {
            (0x0, _) if op_code == 0x00E0 => Instruction::ClearScreen,
            (0x0, _) if op_code == 0x00EE => Instruction::Return,
            (0x0, _) => Instruction::Sys(nnn),
            (0x1, _) => Instruction::Jump(nnn),
            (0x2, _) => Instruction::Call(nnn),
            (0x3, _) => Instruction::SkipIfEqual { x, kk },
            (0x4, _) => Instruction::SkipIfNotEqual { x, kk },
            (0x5, 0x0) => Instruction::SkipIfRegistersEqual { x, y },
            (0x6, _) => Instruction::Load { x, kk },
            (0x7, _) => Instruction::Add { x, kk },
            (0x8, 0x0) => Instruction::Move { x, y },
            (0x8, 0x1) => Instruction::Or { x, y },
            (0x8, 0x2) => Instruction::And { x, y },
            (0x8, 0x3) => Instruction::Xor { x, y },
            (0x8, 0x4) => Instruction::AddRegisters { x, y },
            (0x8, 0x5) => Instruction::Sub { x, y },
            (0x8, 0x6) => Instruction::ShiftRight { x, y },
            (0x8, 0x7) => Instruction::SubReversed { x, y },
            (0x8, 0xE) => Instruction::ShiftLeft { x, y },
            (0x9, 0x0) => Instruction::SkipIfRegistersNotEqual { x, y },
            (0xA, _) => Instruction::LoadIndex(nnn),
            (0xB, _) => Instruction::JumpWithOffset { x, nnn },
            (0xC, _) => Instruction::Random { x, kk },
            (0xD, _) => Instruction::Draw { x, y, n },
            (0xE, _) if kk == 0x9E => Instruction::SkipIfKeyPressed { x },
            (0xE, _) if kk == 0xA1 => Instruction::SkipIfKeyNotPressed { x },
            (0xF, _) => match kk {
                0x07 => Instruction::LoadDelayTimer { x },
                0x0A => Instruction::WaitForKey { x },
                0x15 => Instruction::SetDelayTimer { x },
                0x18 => Instruction::SetSoundTimer { x },
                0x1E => Instruction::AddIndex { x },
                0x29 => Instruction::LoadFont { x },
                0x33 => Instruction::StoreBcd { x },
                0x55 => Instruction::StoreRegisters { x },
                0x65 => Instruction::LoadRegisters { x },
                _ => Instruction::Unknown(op_code),
            },
            _ => Instruction::Unknown(op_code),
        }
    }
}
