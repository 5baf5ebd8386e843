use log::{
    debug,
    trace,
};
use rand::{
    rngs::StdRng,
    SeedableRng,
};
use thiserror::Error;

use crate::{
    constants,
    display::{
        Display,
        EdgePolicy,
    },
    instruction::Instruction,
    mem::{
        AddressStack,
        Ram,
        Register,
        RomError,
        StackError,
    },
    process,
};

/// Interpreter families whose behaviour differs on a handful of instructions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Platform {
    #[default]
    CosmacVip,
    Chip48,
    SuperChip,
}

/// Behavioural switches for the instructions that CHIP-8 variants disagree on.
///
/// The default is the original COSMAC VIP behaviour with clipped sprites.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quirks {
    /// 8xy1, 8xy2 and 8xy3 clear VF.
    pub vf_reset: bool,
    /// 8xy6 and 8xyE shift Vy into Vx instead of shifting Vx in place.
    pub shift_uses_vy: bool,
    /// Bnnn jumps to nnn + Vx instead of nnn + V0.
    pub jump_with_vx: bool,
    /// Fx55 and Fx65 leave I pointing past the last register transferred.
    pub memory_increment: bool,
    /// Dxyn waits for the draw permit.
    pub display_wait: bool,
    /// Clip or wrap sprite pixels past the right and bottom edges. Clip by default.
    pub sprite_edges: EdgePolicy,
}

impl Default for Quirks {
    fn default() -> Self {
        Platform::CosmacVip.into()
    }
}

impl From<Platform> for Quirks {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::CosmacVip => Self {
                vf_reset: true,
                shift_uses_vy: true,
                jump_with_vx: false,
                memory_increment: true,
                display_wait: true,
                sprite_edges: EdgePolicy::Clip,
            },
            Platform::Chip48 => Self {
                vf_reset: false,
                shift_uses_vy: false,
                jump_with_vx: true,
                memory_increment: false,
                display_wait: false,
                sprite_edges: EdgePolicy::Clip,
            },
            // SCHIP 1.1 still waits for the refresh in low resolution mode.
            Platform::SuperChip => Self {
                display_wait: true,
                ..Platform::Chip48.into()
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgramCounter(u16);

impl ProgramCounter {
    pub fn inner(&self) -> u16 {
        self.0
    }

    pub fn increment(&mut self) {
        self.0 = self.0.wrapping_add(2) & constants::ADDRESS_MASK;
    }

    pub fn decrement(&mut self) {
        self.0 = self.0.wrapping_sub(2) & constants::ADDRESS_MASK;
    }

    pub fn jump(&mut self, address: u16) {
        self.0 = address & constants::ADDRESS_MASK;
    }
}

impl Default for ProgramCounter {
    fn default() -> Self {
        Self(constants::MEMORY_OFFSET as u16)
    }
}

/// Pressed state of the hexadecimal keys 0..F.
#[derive(Clone, Default, Debug)]
pub struct KeyPad {
    keys: [bool; constants::KEY_COUNT],
}

impl KeyPad {
    pub fn set(&mut self, key: u8, pressed: bool) {
        match self.keys.get_mut(key as usize) {
            Some(state) => *state = pressed,
            None => debug!("ignoring state change for key {key:#X}"),
        }
    }

    /// Keys outside the keypad are never pressed.
    pub fn is_key_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// Lowest index key that is currently down.
    pub fn get_key_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|pressed| *pressed).map(|key| key as u8)
    }
}

/// Delay and sound timers, both counting down at 60 Hz.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    pub fn is_tone_playing(&self) -> bool {
        self.sound > 0
    }
}

/// An instruction that could not complete yet and is re-evaluated on every step.
///
/// While suspended the program counter stays on the suspended instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Suspension {
    #[default]
    None,
    /// Fx0A with no key down.
    AwaitingKey { x: u8 },
    /// Dxyn issued before the next refresh.
    AwaitingDrawPermit { x: u8, y: u8, n: u8 },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepError {
    #[error("call stack overflow at {pc:#05X}")]
    StackOverflow { pc: u16 },

    #[error("return with empty call stack at {pc:#05X}")]
    StackUnderflow { pc: u16 },
}

impl StepError {
    fn from_stack(err: StackError, pc: u16) -> Self {
        match err {
            StackError::Overflow => StepError::StackOverflow { pc },
            StackError::Underflow => StepError::StackUnderflow { pc },
        }
    }
}

/// A CHIP-8 machine.
///
/// The caller drives it: `step` executes one instruction, `tick` advances the timers at 60 Hz and
/// `set_draw_permit` hands out one sprite draw per display refresh.
pub struct Interpreter {
    quirks: Quirks,
    memory: Ram,
    pc: ProgramCounter,
    stack: AddressStack,
    register: Register,
    index_register: u16,
    timers: Timers,
    keypad: KeyPad,
    display: Display,
    draw_permit: bool,
    suspension: Suspension,
    fault: Option<StepError>,
    rng: StdRng,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_quirks(Quirks::default())
    }

    pub fn with_quirks(quirks: Quirks) -> Self {
        Self::with_rng(quirks, StdRng::from_entropy())
    }

    /// Deterministic random numbers for Cxkk.
    pub fn with_seed(quirks: Quirks, seed: u64) -> Self {
        Self::with_rng(quirks, StdRng::seed_from_u64(seed))
    }

    fn with_rng(quirks: Quirks, rng: StdRng) -> Self {
        Self {
            quirks,
            memory: Ram::new(),
            pc: ProgramCounter::default(),
            stack: AddressStack::default(),
            register: Register::new(),
            index_register: 0,
            timers: Timers::default(),
            keypad: KeyPad::default(),
            display: Display::new(),
            draw_permit: true,
            suspension: Suspension::None,
            fault: None,
            rng,
        }
    }

    /// Resets the machine and copies `program` to 0x200.
    ///
    /// An oversized program is rejected before any state changes.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), RomError> {
        let memory = Ram::load(program)?;
        let rng = self.rng.clone();
        *self = Self::with_rng(self.quirks, rng);
        self.memory = memory;

        debug!("loaded program of {} bytes", program.len());
        Ok(())
    }

    /// Fetches, decodes and executes a single instruction.
    ///
    /// After a stack fault the machine is halted and keeps returning that fault until a new program is loaded.
    pub fn step(&mut self) -> Result<(), StepError> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }

        match self.suspension {
            Suspension::None => {}
            Suspension::AwaitingKey { x } => {
                if process::op_FX0A(&mut self.register, &self.keypad, x) {
                    self.resume();
                }
                return Ok(());
            }
            Suspension::AwaitingDrawPermit { x, y, n } => {
                if self.try_draw(x, y, n) {
                    self.resume();
                }
                return Ok(());
            }
        }

        let address = self.pc.inner();
        let op_code = self.memory.op_code(&self.pc);
        self.pc.increment();

        let instruction = Instruction::from(op_code);
        trace!("{address:#05X} {op_code:04X} {instruction:?}");

        self.execute(instruction).map_err(|err| {
            let fault = StepError::from_stack(err, address);
            debug!("halting: {fault}");
            self.fault = Some(fault);
            fault
        })
    }

    fn execute(&mut self, instruction: Instruction) -> Result<(), StackError> {
        match instruction {
            Instruction::Sys(_) => {}
            Instruction::ClearScreen => process::op_00E0(&mut self.display),
            Instruction::Return => process::op_00EE(&mut self.pc, &mut self.stack)?,
            Instruction::Jump(nnn) => process::op_1NNN(&mut self.pc, nnn),
            Instruction::Call(nnn) => process::op_2NNN(&mut self.stack, &mut self.pc, nnn)?,
            Instruction::SkipIfEqual { x, kk } => process::op_3XKK(&self.register, x, kk, &mut self.pc),
            Instruction::SkipIfNotEqual { x, kk } => process::op_4XKK(&self.register, x, kk, &mut self.pc),
            Instruction::SkipIfRegistersEqual { x, y } => process::op_5XY0(&self.register, x, y, &mut self.pc),
            Instruction::Load { x, kk } => process::op_6XKK(&mut self.register, x, kk),
            Instruction::Add { x, kk } => process::op_7XKK(&mut self.register, x, kk),
            Instruction::Move { x, y } => process::op_8XY0(&mut self.register, x, y),
            Instruction::Or { x, y } => process::op_8XY1(&self.quirks, &mut self.register, x, y),
            Instruction::And { x, y } => process::op_8XY2(&self.quirks, &mut self.register, x, y),
            Instruction::Xor { x, y } => process::op_8XY3(&self.quirks, &mut self.register, x, y),
            Instruction::AddRegisters { x, y } => process::op_8XY4(&mut self.register, x, y),
            Instruction::Sub { x, y } => process::op_8XY5(&mut self.register, x, y),
            Instruction::ShiftRight { x, y } => process::op_8XY6(&self.quirks, &mut self.register, x, y),
            Instruction::SubReversed { x, y } => process::op_8XY7(&mut self.register, x, y),
            Instruction::ShiftLeft { x, y } => process::op_8XYE(&self.quirks, &mut self.register, x, y),
            Instruction::SkipIfRegistersNotEqual { x, y } => {
                process::op_9XY0(&self.register, x, y, &mut self.pc)
            }
            Instruction::LoadIndex(nnn) => process::op_ANNN(&mut self.index_register, nnn),
            Instruction::JumpWithOffset { x, nnn } => {
                process::op_BNNN(&self.quirks, &self.register, &mut self.pc, x, nnn)
            }
            Instruction::Random { x, kk } => process::op_CXKK(&mut self.register, &mut self.rng, x, kk),
            Instruction::Draw { x, y, n } => {
                if !self.try_draw(x, y, n) {
                    self.suspend(Suspension::AwaitingDrawPermit { x, y, n });
                }
            }
            Instruction::SkipIfKeyPressed { x } => {
                process::op_EX9E(&self.register, &self.keypad, &mut self.pc, x)
            }
            Instruction::SkipIfKeyNotPressed { x } => {
                process::op_EXA1(&self.register, &self.keypad, &mut self.pc, x)
            }
            Instruction::LoadDelayTimer { x } => process::op_FX07(&mut self.register, x, self.timers.delay),
            Instruction::WaitForKey { x } => {
                if !process::op_FX0A(&mut self.register, &self.keypad, x) {
                    self.suspend(Suspension::AwaitingKey { x });
                }
            }
            Instruction::SetDelayTimer { x } => process::op_FX15(&self.register, x, &mut self.timers.delay),
            Instruction::SetSoundTimer { x } => process::op_FX18(&self.register, x, &mut self.timers.sound),
            Instruction::AddIndex { x } => process::op_FX1E(&self.register, x, &mut self.index_register),
            Instruction::LoadFont { x } => process::op_FX29(&self.register, &mut self.index_register, x),
            Instruction::StoreBcd { x } => {
                process::op_FX33(&self.register, &mut self.memory, x, self.index_register)
            }
            Instruction::StoreRegisters { x } => process::op_FX55(
                &self.quirks,
                &self.register,
                &mut self.memory,
                &mut self.index_register,
                x,
            ),
            Instruction::LoadRegisters { x } => process::op_FX65(
                &self.quirks,
                &mut self.register,
                &self.memory,
                &mut self.index_register,
                x,
            ),
            Instruction::Unknown(op_code) => debug!("skipping unknown instruction {op_code:04X}"),
        }
        Ok(())
    }

    /// Draws unless the draw has to wait for the next refresh. A completed draw uses up the permit.
    fn try_draw(&mut self, x: u8, y: u8, n: u8) -> bool {
        if self.quirks.display_wait && !self.draw_permit {
            return false;
        }

        process::op_DXYN(
            &self.quirks,
            &self.memory,
            &mut self.register,
            &mut self.display,
            self.index_register,
            x,
            y,
            n,
        );
        self.draw_permit = false;
        true
    }

    fn suspend(&mut self, suspension: Suspension) {
        debug!("suspending on {suspension:?}");
        self.suspension = suspension;
        self.pc.decrement();
    }

    fn resume(&mut self) {
        self.suspension = Suspension::None;
        self.pc.increment();
    }

    /// One 60 Hz timer period.
    pub fn tick(&mut self) {
        self.timers.tick();
    }

    /// Key indices above 0xF are ignored.
    pub fn set_key(&mut self, index: u8, pressed: bool) {
        self.keypad.set(index, pressed);
    }

    pub fn set_draw_permit(&mut self, ready: bool) {
        self.draw_permit = ready;
    }

    pub fn snapshot_display(&self) -> &Display {
        &self.display
    }

    pub fn is_tone_playing(&self) -> bool {
        self.timers.is_tone_playing()
    }

    pub fn quirks(&self) -> &Quirks {
        &self.quirks
    }

    pub fn registers(&self) -> &[u8] {
        self.register.as_slice()
    }

    pub fn index_register(&self) -> u16 {
        self.index_register
    }

    pub fn pc(&self) -> u16 {
        self.pc.inner()
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn delay_timer(&self) -> u8 {
        self.timers.delay
    }

    pub fn sound_timer(&self) -> u8 {
        self.timers.sound
    }

    pub fn draw_permit(&self) -> bool {
        self.draw_permit
    }

    pub fn suspension(&self) -> Suspension {
        self.suspension
    }

    pub fn fault(&self) -> Option<StepError> {
        self.fault
    }

    pub fn memory(&self) -> &[u8] {
        self.memory.as_slice()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(program: &[u8]) -> Interpreter {
        let mut interpreter = Interpreter::with_seed(Quirks::default(), 0);
        interpreter.load_program(program).unwrap();
        interpreter
    }

    #[test]
    fn test_initial_state() {
        let interpreter = Interpreter::new();
        assert_eq!(interpreter.pc(), 0x200);
        assert_eq!(interpreter.stack_depth(), 0);
        assert_eq!(interpreter.index_register(), 0);
        assert!(interpreter.registers().iter().all(|v| *v == 0));
        assert_eq!(interpreter.snapshot_display().lit_pixels(), 0);
        assert!(interpreter.draw_permit());
        assert_eq!(interpreter.memory()[0x50], 0xF0);
    }

    #[test]
    fn test_pc_advances_before_dispatch() {
        let mut interpreter = loaded(&[0x00, 0xE0]);
        interpreter.step().unwrap();
        assert_eq!(interpreter.pc(), 0x202);
    }

    #[test]
    fn test_unknown_instruction_is_a_no_op() {
        let mut interpreter = loaded(&[0xFF, 0xFF, 0x81, 0x28, 0x01, 0x23]);
        for _ in 0..3 {
            interpreter.step().unwrap();
        }
        assert_eq!(interpreter.pc(), 0x206);
        assert!(interpreter.registers().iter().all(|v| *v == 0));
        assert_eq!(interpreter.index_register(), 0);
    }

    #[test]
    fn test_skips() {
        // V1 = 3; skip if V1 == 3; V2 = 1; V3 = 1
        let mut interpreter = loaded(&[0x61, 0x03, 0x31, 0x03, 0x62, 0x01, 0x63, 0x01]);
        for _ in 0..3 {
            interpreter.step().unwrap();
        }
        assert_eq!(interpreter.registers()[0x2], 0);
        assert_eq!(interpreter.registers()[0x3], 1);
    }

    #[test]
    fn test_skip_if_not_equal() {
        // V1 = 3; skip if V1 != 3; V2 = 1; skip if V1 != 4; V3 = 1; V4 = 1
        let program = [0x61, 0x03, 0x41, 0x03, 0x62, 0x01, 0x41, 0x04, 0x63, 0x01, 0x64, 0x01];
        let mut interpreter = loaded(&program);
        for _ in 0..5 {
            interpreter.step().unwrap();
        }
        assert_eq!(&interpreter.registers()[0x2..0x5], &[1, 0, 1]);
    }

    #[test]
    fn test_register_skips() {
        // V1 = 3; V2 = 1; skip if V1 == V2; V3 = 1; skip if V1 != V2; V4 = 1; V5 = 1
        let program = [
            0x61, 0x03, 0x62, 0x01, 0x51, 0x20, 0x63, 0x01, 0x91, 0x20, 0x64, 0x01, 0x65, 0x01,
        ];
        let mut interpreter = loaded(&program);
        for _ in 0..6 {
            interpreter.step().unwrap();
        }
        assert_eq!(interpreter.pc(), 0x20E);
        assert_eq!(&interpreter.registers()[0x3..0x6], &[1, 0, 1]);

        // V2 = 3; skip if V1 == V2; V6 = 1; skip if V1 != V2; V7 = 1
        let program = [0x61, 0x03, 0x62, 0x03, 0x51, 0x20, 0x66, 0x01, 0x91, 0x20, 0x67, 0x01];
        let mut interpreter = loaded(&program);
        for _ in 0..5 {
            interpreter.step().unwrap();
        }
        assert_eq!(interpreter.registers()[0x6], 0);
        assert_eq!(interpreter.registers()[0x7], 1);
    }

    #[test]
    fn test_move_register() {
        // V1 = 0x42; V6 = V1
        let mut interpreter = loaded(&[0x61, 0x42, 0x86, 0x10]);
        interpreter.step().unwrap();
        interpreter.step().unwrap();
        assert_eq!(interpreter.registers()[0x6], 0x42);
        assert_eq!(interpreter.registers()[0x1], 0x42);
        assert_eq!(interpreter.registers()[0xF], 0);
    }

    #[test]
    fn test_add_to_index() {
        // V1 = 0x10; I = 0x300; I += V1
        let mut interpreter = loaded(&[0x61, 0x10, 0xA3, 0x00, 0xF1, 0x1E]);
        for _ in 0..3 {
            interpreter.step().unwrap();
        }
        assert_eq!(interpreter.index_register(), 0x310);
        assert_eq!(interpreter.registers()[0xF], 0);
    }

    #[test]
    fn test_add_to_index_wraps() {
        let mut register = Register::new();
        register.set(0x0, 0x02);
        let mut index = 0xFFFF;
        process::op_FX1E(&register, 0x0, &mut index);
        assert_eq!(index, 0x0001);
    }

    #[test]
    fn test_store_and_load_registers() {
        // V0 = 1; V1 = 2; V2 = 3; I = 0x300; store V0..V2; V0 = 0; V1 = 0; I = 0x300; load V0..V1
        let program = [
            0x60, 0x01, 0x61, 0x02, 0x62, 0x03, 0xA3, 0x00, 0xF2, 0x55, 0x60, 0x00, 0x61, 0x00,
            0xA3, 0x00, 0xF1, 0x65,
        ];
        let mut interpreter = loaded(&program);
        for _ in 0..5 {
            interpreter.step().unwrap();
        }
        assert_eq!(&interpreter.memory()[0x300..0x304], &[1, 2, 3, 0]);
        assert_eq!(interpreter.index_register(), 0x303);

        for _ in 0..4 {
            interpreter.step().unwrap();
        }
        assert_eq!(&interpreter.registers()[..3], &[1, 2, 3]);
        assert_eq!(interpreter.index_register(), 0x302);
    }

    #[test]
    fn test_store_registers_without_memory_increment() {
        let quirks = Quirks::from(Platform::Chip48);
        let mut interpreter = Interpreter::with_seed(quirks, 0);
        interpreter.load_program(&[0x60, 0x09, 0xA3, 0x00, 0xF0, 0x55]).unwrap();
        for _ in 0..3 {
            interpreter.step().unwrap();
        }
        assert_eq!(interpreter.memory()[0x300], 9);
        assert_eq!(interpreter.index_register(), 0x300);
    }

    #[test]
    fn test_call_and_return() {
        // call 0x206; (0x202) V0 = 1; jump self; (0x206) V1 = 2; return
        let mut interpreter = loaded(&[0x22, 0x06, 0x60, 0x01, 0x12, 0x04, 0x61, 0x02, 0x00, 0xEE]);
        interpreter.step().unwrap();
        assert_eq!(interpreter.pc(), 0x206);
        assert_eq!(interpreter.stack_depth(), 1);
        interpreter.step().unwrap();
        interpreter.step().unwrap();
        assert_eq!(interpreter.pc(), 0x202);
        assert_eq!(interpreter.stack_depth(), 0);
        interpreter.step().unwrap();
        assert_eq!(&interpreter.registers()[..2], &[1, 2]);
    }

    #[test]
    fn test_stack_underflow_halts() {
        let mut interpreter = loaded(&[0x00, 0xEE, 0x60, 0x01]);
        assert_eq!(interpreter.step(), Err(StepError::StackUnderflow { pc: 0x200 }));
        assert_eq!(interpreter.step(), Err(StepError::StackUnderflow { pc: 0x200 }));
        assert_eq!(interpreter.registers()[0], 0);
        assert_eq!(interpreter.fault(), Some(StepError::StackUnderflow { pc: 0x200 }));

        interpreter.load_program(&[0x60, 0x01]).unwrap();
        assert_eq!(interpreter.fault(), None);
        interpreter.step().unwrap();
        assert_eq!(interpreter.registers()[0], 1);
    }

    #[test]
    fn test_stack_overflow() {
        // call 0x200 forever
        let mut interpreter = loaded(&[0x22, 0x00]);
        for _ in 0..constants::STACK_DEPTH {
            interpreter.step().unwrap();
        }
        assert_eq!(interpreter.stack_depth(), constants::STACK_DEPTH);
        assert_eq!(interpreter.step(), Err(StepError::StackOverflow { pc: 0x200 }));
        assert_eq!(interpreter.stack_depth(), constants::STACK_DEPTH);
    }

    #[test]
    fn test_timers_count_down_to_zero() {
        let mut interpreter = loaded(&[0x60, 0x02, 0xF0, 0x15, 0xF0, 0x18]);
        for _ in 0..3 {
            interpreter.step().unwrap();
        }
        assert_eq!(interpreter.delay_timer(), 2);
        assert!(interpreter.is_tone_playing());
        interpreter.tick();
        interpreter.tick();
        interpreter.tick();
        assert_eq!(interpreter.delay_timer(), 0);
        assert_eq!(interpreter.sound_timer(), 0);
        assert!(!interpreter.is_tone_playing());
    }

    #[test]
    fn test_load_delay_timer() {
        let mut interpreter = loaded(&[0x60, 0x09, 0xF0, 0x15, 0xF3, 0x07]);
        for _ in 0..2 {
            interpreter.step().unwrap();
        }
        interpreter.tick();
        interpreter.step().unwrap();
        assert_eq!(interpreter.registers()[0x3], 8);
    }

    #[test]
    fn test_draw_waits_for_permit() {
        // I = font 0; draw; draw
        let mut interpreter = loaded(&[0xA0, 0x50, 0xD0, 0x05, 0xD0, 0x05]);
        interpreter.step().unwrap();
        interpreter.step().unwrap();
        assert!(!interpreter.draw_permit());
        assert_eq!(interpreter.snapshot_display().lit_pixels(), 14);

        interpreter.step().unwrap();
        interpreter.step().unwrap();
        assert_eq!(interpreter.pc(), 0x204);
        assert_eq!(
            interpreter.suspension(),
            Suspension::AwaitingDrawPermit { x: 0, y: 0, n: 5 }
        );
        assert_eq!(interpreter.snapshot_display().lit_pixels(), 14);

        interpreter.set_draw_permit(true);
        interpreter.step().unwrap();
        assert_eq!(interpreter.pc(), 0x206);
        assert_eq!(interpreter.suspension(), Suspension::None);
        assert_eq!(interpreter.snapshot_display().lit_pixels(), 0);
        assert_eq!(interpreter.registers()[0xF], 1);
    }

    #[test]
    fn test_draw_without_display_wait() {
        let quirks = Quirks::from(Platform::Chip48);
        let mut interpreter = Interpreter::with_seed(quirks, 0);
        interpreter.load_program(&[0xA0, 0x50, 0xD0, 0x05, 0xD0, 0x05]).unwrap();
        for _ in 0..3 {
            interpreter.step().unwrap();
        }
        assert_eq!(interpreter.pc(), 0x206);
        assert_eq!(interpreter.snapshot_display().lit_pixels(), 0);
    }

    #[test]
    fn test_wait_for_key_takes_lowest_key() {
        let mut interpreter = loaded(&[0xF4, 0x0A]);
        interpreter.set_key(0xC, true);
        interpreter.set_key(0x3, true);
        interpreter.step().unwrap();
        assert_eq!(interpreter.registers()[0x4], 0x3);
        assert_eq!(interpreter.pc(), 0x202);
    }

    #[test]
    fn test_loading_cancels_wait() {
        let mut interpreter = loaded(&[0xF4, 0x0A]);
        interpreter.step().unwrap();
        assert_eq!(interpreter.suspension(), Suspension::AwaitingKey { x: 4 });
        interpreter.load_program(&[0x60, 0x07]).unwrap();
        assert_eq!(interpreter.suspension(), Suspension::None);
        interpreter.step().unwrap();
        assert_eq!(interpreter.registers()[0], 7);
    }

    #[test]
    fn test_skip_on_key() {
        // V0 = 5; skip if key V0; V1 = 1; skip if not key V0; V2 = 1
        let program = [0x60, 0x05, 0xE0, 0x9E, 0x61, 0x01, 0xE0, 0xA1, 0x62, 0x01];
        let mut interpreter = loaded(&program);
        interpreter.set_key(5, true);
        for _ in 0..4 {
            interpreter.step().unwrap();
        }
        assert_eq!(interpreter.registers()[1], 0);
        assert_eq!(interpreter.registers()[2], 1);
    }

    #[test]
    fn test_key_index_out_of_range_is_ignored() {
        let mut keypad = KeyPad::default();
        keypad.set(0x10, true);
        assert_eq!(keypad.get_key_pressed(), None);
        assert!(!keypad.is_key_pressed(0x10));
    }

    #[test]
    fn test_random_is_reproducible_with_seed() {
        let program = [0xC0, 0xFF, 0xC1, 0xFF, 0xC2, 0xFF];
        let mut first = loaded(&program);
        let mut second = loaded(&program);
        for _ in 0..3 {
            first.step().unwrap();
            second.step().unwrap();
        }
        assert_eq!(first.registers(), second.registers());
    }

    #[test]
    fn test_pc_wraps_at_end_of_memory() {
        let mut pc = ProgramCounter::default();
        pc.jump(0x0FFE);
        pc.increment();
        assert_eq!(pc.inner(), 0x000);
        pc.decrement();
        assert_eq!(pc.inner(), 0xFFE);
        pc.jump(0x10FF);
        assert_eq!(pc.inner(), 0x0FF);
    }

    #[test]
    fn test_platform_quirks() {
        assert_eq!(Quirks::default(), Quirks::from(Platform::CosmacVip));
        let quirks = Quirks::from(Platform::SuperChip);
        assert!(quirks.jump_with_vx);
        assert!(!quirks.vf_reset);
        assert_eq!(quirks.sprite_edges, EdgePolicy::Clip);

        let chip48 = Quirks::from(Platform::Chip48);
        assert_ne!(chip48, quirks);
        assert!(quirks.display_wait);
        assert!(!chip48.display_wait);
    }
}
