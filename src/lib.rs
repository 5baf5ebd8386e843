//! A CHIP-8 interpreter.
//!
//! [`Interpreter`] is the machine itself and is driven entirely by its caller. [`run`] wraps it in a macroquad
//! window with keyboard input and a buzzer.

pub mod beep;
pub mod constants;
pub mod display;
pub mod emulator;
mod frontend;
pub mod instruction;
pub mod mem;
mod process;
pub mod screenshot;

pub use display::{
    Display,
    EdgePolicy,
};
pub use emulator::{
    Interpreter,
    Platform,
    Quirks,
    StepError,
    Suspension,
};
pub use frontend::{
    run,
    Settings,
};
pub use instruction::Instruction;
pub use mem::{
    Rom,
    RomError,
};
