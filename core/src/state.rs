use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET, STACK_DEPTH,
};

/// The framebuffer is indexed as `[y][x]`; `true` is a lit pixel
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// Switches between interpreter dialects where historical implementations
/// disagree. The defaults reproduce the contemporary interpreter this machine
/// is modeled on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Quirks {
    /// 8XY6/8XYE semantics.
    ///
    /// `false`: VF is the low bit of VX on both sides and the shifted value
    /// lands in VY. `true`: VF is the bit shifted out (low for 8XY6, high
    /// for 8XYE) and the value lands back in VX, which is what most modern
    /// ROMs are written against.
    pub modern_shifts: bool,
}

/// A complete snapshot of the machine's internal state.
///
/// ## Registers
/// - (v) 16 8-bit general registers V0..VF; VF doubles as the carry,
///   borrow, and sprite-collision flag, so arithmetic and draw operations
///   clobber it
/// - (i) the 16-bit address register
/// - (pc) the program counter; starts at 0x200 and moves in units of 2
///   except when a jump, call, or return replaces it outright
/// - (sp) the stack pointer, indexing the next free stack slot
///
/// ## Memory
/// - 4096 bytes, glyph sprites in the bottom 80, program from 0x200 up
/// - a 16-slot stack of return addresses, separate from addressable memory
///
/// ## Timers
/// - two 8-bit counters decremented at 60Hz while nonzero; the sound timer
///   hitting zero raises the beep flag
///
/// ## Latches
/// - `draw_flag` notes that the framebuffer changed since the host last took
///   a frame
/// - `beep_flag` holds a pending beep until the host consumes it
/// - `last_released` holds the most recent key release until an FX0A
///   consumes it
///
/// Everything is `Copy`, so operations take the current state by reference
/// and hand back the successor state by value.
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub beep_flag: bool,
    pub last_released: Option<u8>,
    pub quirks: Quirks,
}

impl State {
    pub fn new() -> Self {
        // The sprite sheet occupies [0x000, 0x050); everything below
        // PROGRAM_START is interpreter-reserved either way
        let mut memory = [0; MEMORY_SIZE];
        memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            beep_flag: false,
            last_released: None,
            quirks: Quirks::default(),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
