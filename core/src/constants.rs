/// Horizontal pixels in the display
pub const DISPLAY_WIDTH: usize = 64;

/// Vertical pixels in the display
pub const DISPLAY_HEIGHT: usize = 32;

/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// Address at which programs are loaded and execution begins
pub const PROGRAM_START: u16 = 0x200;

/// The largest program that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Return addresses the call stack can hold
pub const STACK_DEPTH: usize = 16;

/// Nanoseconds per CPU cycle; one instruction every 2ms is 500Hz
pub const CYCLE_NANOS: u64 = 2_000_000;

/// Nanoseconds per timer tick; the timers always run at 60Hz
pub const TIMER_NANOS: u64 = 16_666_667;

/// Bitmap glyphs for the hexadecimal digits 0..F.
///
/// Each glyph is 4x5 pixels stored as 5 bytes with the leftmost pixel in the
/// high bit. Glyph `k` lives at memory address `5 * k`, which is what FX29
/// relies on when pointing `I` at a digit.
pub const SPRITE_SHEET: [u8; 80] = [
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
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
