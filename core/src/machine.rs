use log::{debug, trace};

use crate::constants::{MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START};
use crate::error::MachineError;
use crate::instruction;
use crate::opcode::Opcode;
use crate::state::{FrameBuffer, Quirks, State};

/// What a single `step` did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// One instruction was fetched and executed.
    Executed,
    /// The current instruction is an FX0A key wait and no release is
    /// pending; the program counter did not move. Step again after feeding
    /// in more input.
    WaitingForKey,
}

/// One-shot marker handed to the host when the sound timer runs out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BeepEvent;

/// # Machine
///
/// The virtual machine core: memory, registers, timers, keypad, and
/// framebuffer behind a stepwise execution interface. The machine never
/// blocks, sleeps, or touches the outside world; the host owns pacing and
/// all I/O.
///
/// A host drives it by:
/// - feeding key transitions in with `key_down` / `key_up`
/// - calling `step` at its chosen instruction rate
/// - calling `tick_timers` at 60Hz, independent of the instruction rate
/// - taking framebuffer snapshots to render and beeps to play
pub struct Machine {
    state: State,
    held_keys: [bool; 16],
}

impl Machine {
    /// Builds a machine with `rom` loaded at the program origin and
    /// everything else in its power-on state.
    pub fn new(rom: &[u8]) -> Result<Self, MachineError> {
        Self::with_quirks(rom, Quirks::default())
    }

    /// Like `new`, with explicit dialect switches.
    pub fn with_quirks(rom: &[u8], quirks: Quirks) -> Result<Self, MachineError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(MachineError::CapacityExceeded {
                len: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }
        let mut state = State::new();
        state.quirks = quirks;
        let start = PROGRAM_START as usize;
        state.memory[start..start + rom.len()].copy_from_slice(rom);
        Ok(Machine {
            state,
            held_keys: [false; 16],
        })
    }

    /// Executes exactly one instruction.
    ///
    /// The only pattern that can refuse to advance is FX0A waiting on a key
    /// release; that outcome is reported as `WaitingForKey` so callers know
    /// to keep stepping. Malformed call/return flow surfaces as an error and
    /// leaves the state as it was.
    pub fn step(&mut self) -> Result<StepResult, MachineError> {
        let op = self.fetch();
        if let (0xF, _, 0x0, 0xA) = op.nibbles() {
            if self.state.last_released.is_none() {
                return Ok(StepResult::WaitingForKey);
            }
        }
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc
        );
        self.state = instruction::decode(&op)(&op, &self.state, self.held_keys)?;
        Ok(StepResult::Executed)
    }

    /// Decrements both timers; call at 60Hz regardless of instruction rate.
    ///
    /// Returns a `BeepEvent` exactly when the sound timer falls from 1 to 0,
    /// which also latches the sound flag for `consume_sound_flag`.
    pub fn tick_timers(&mut self) -> Option<BeepEvent> {
        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }
        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
            if self.state.sound_timer == 0 {
                debug!("sound timer expired, beep");
                self.state.beep_flag = true;
                return Some(BeepEvent);
            }
        }
        None
    }

    /// Marks key `key` (0x0..=0xF) as held.
    pub fn key_down(&mut self, key: u8) {
        self.held_keys[(key & 0xF) as usize] = true;
    }

    /// Marks key `key` (0x0..=0xF) as released and latches it for FX0A.
    ///
    /// The latch survives until some FX0A consumes it; releases in between
    /// simply overwrite it.
    pub fn key_up(&mut self, key: u8) {
        self.held_keys[(key & 0xF) as usize] = false;
        self.state.last_released = Some(key & 0xF);
    }

    /// A copy of the framebuffer, never aliasing machine internals.
    pub fn framebuffer_snapshot(&self) -> FrameBuffer {
        self.state.frame_buffer
    }

    /// A framebuffer copy if anything was drawn since the last take,
    /// clearing the draw flag. Hosts use this to skip redundant redraws.
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Reads and clears the pending-beep flag.
    pub fn consume_sound_flag(&mut self) -> bool {
        std::mem::take(&mut self.state.beep_flag)
    }

    /// Combines the two bytes at the program counter into one big-endian
    /// instruction word. The counter is masked into the address space so a
    /// program that runs off the end wraps instead of faulting.
    fn fetch(&self) -> u16 {
        let hi = u16::from(self.state.memory[self.state.pc as usize % MEMORY_SIZE]);
        let lo = u16::from(self.state.memory[self.state.pc.wrapping_add(1) as usize % MEMORY_SIZE]);
        hi << 8 | lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_ROM_SIZE;

    #[test]
    fn test_rom_lands_at_program_start() {
        let machine = Machine::new(&[0xAA, 0xBB]).unwrap();
        assert_eq!(machine.state.memory[0x200..0x202], [0xAA, 0xBB]);
        assert_eq!(machine.fetch(), 0xAABB);
    }

    #[test]
    fn test_rom_at_capacity_loads() {
        assert!(Machine::new(&[0u8; MAX_ROM_SIZE]).is_ok());
    }

    #[test]
    fn test_oversized_rom_is_rejected() {
        let rom = [0u8; MAX_ROM_SIZE + 1];
        assert_eq!(
            Machine::new(&rom).err(),
            Some(MachineError::CapacityExceeded {
                len: MAX_ROM_SIZE + 1,
                max: MAX_ROM_SIZE
            })
        );
    }

    #[test]
    fn test_set_then_add() {
        // V0 = 0x0A; V0 += 0x05
        let mut machine = Machine::new(&[0x60, 0x0A, 0x70, 0x05]).unwrap();
        machine.step().unwrap();
        machine.step().unwrap();
        assert_eq!(machine.state.v[0x0], 0x0F);
        assert_eq!(machine.state.pc, 0x204);
    }

    #[test]
    fn test_bcd_scenario() {
        // I = 0x200; V0 = 123; then FX33
        let mut machine = Machine::new(&[0xA2, 0x00, 0x60, 0x7B, 0xF0, 0x33]).unwrap();
        for _ in 0..3 {
            machine.step().unwrap();
        }
        assert_eq!(machine.state.memory[0x200..0x203], [1, 2, 3]);
    }

    #[test]
    fn test_seventeenth_nested_call_overflows() {
        // 0x2200 calls address 0x200 forever
        let mut machine = Machine::new(&[0x22, 0x00]).unwrap();
        for _ in 0..16 {
            assert_eq!(machine.step(), Ok(StepResult::Executed));
        }
        assert_eq!(
            machine.step(),
            Err(MachineError::StackOverflow { pc: 0x200 })
        );
    }

    #[test]
    fn test_key_wait_stalls_then_consumes_release() {
        let mut machine = Machine::new(&[0xF1, 0x0A]).unwrap();
        assert_eq!(machine.step(), Ok(StepResult::WaitingForKey));
        assert_eq!(machine.state.pc, 0x200);
        machine.key_up(0x5);
        assert_eq!(machine.step(), Ok(StepResult::Executed));
        assert_eq!(machine.state.v[0x1], 0x5);
        assert_eq!(machine.state.pc, 0x202);
    }

    #[test]
    fn test_key_wait_ignores_key_down() {
        let mut machine = Machine::new(&[0xF1, 0x0A]).unwrap();
        machine.key_down(0x5);
        assert_eq!(machine.step(), Ok(StepResult::WaitingForKey));
    }

    #[test]
    fn test_held_keys_feed_skip_instructions() {
        // EX9E on key V1 = 0x5
        let mut machine = Machine::new(&[0x61, 0x05, 0xE1, 0x9E]).unwrap();
        machine.key_down(0x5);
        machine.step().unwrap();
        machine.step().unwrap();
        assert_eq!(machine.state.pc, 0x206);
    }

    #[test]
    fn test_timers_count_down_independently() {
        let mut machine = Machine::new(&[]).unwrap();
        machine.state.delay_timer = 2;
        machine.state.sound_timer = 1;
        assert_eq!(machine.tick_timers(), Some(BeepEvent));
        assert_eq!(machine.state.delay_timer, 1);
        assert_eq!(machine.state.sound_timer, 0);
        assert_eq!(machine.tick_timers(), None);
        assert_eq!(machine.state.delay_timer, 0);
        // Neither timer goes below zero
        assert_eq!(machine.tick_timers(), None);
    }

    #[test]
    fn test_beep_fires_only_on_the_final_tick() {
        let mut machine = Machine::new(&[]).unwrap();
        machine.state.sound_timer = 2;
        assert_eq!(machine.tick_timers(), None);
        assert_eq!(machine.tick_timers(), Some(BeepEvent));
    }

    #[test]
    fn test_sound_flag_reads_once() {
        let mut machine = Machine::new(&[]).unwrap();
        machine.state.sound_timer = 1;
        machine.tick_timers();
        assert!(machine.consume_sound_flag());
        assert!(!machine.consume_sound_flag());
    }

    #[test]
    fn test_take_frame_clears_the_draw_flag() {
        // 00E0 sets the draw flag
        let mut machine = Machine::new(&[0x00, 0xE0]).unwrap();
        machine.step().unwrap();
        assert!(machine.take_frame().is_some());
        assert!(machine.take_frame().is_none());
    }

    #[test]
    fn test_snapshot_does_not_alias() {
        let mut machine = Machine::new(&[0x00, 0xE0]).unwrap();
        let mut snapshot = machine.framebuffer_snapshot();
        snapshot[0][0] = true;
        assert!(!machine.framebuffer_snapshot()[0][0]);
    }

    #[test]
    fn test_failed_step_leaves_state_alone() {
        let mut machine = Machine::new(&[0x00, 0xEE]).unwrap();
        assert!(machine.step().is_err());
        assert_eq!(machine.state.pc, 0x200);
        assert_eq!(machine.state.sp, 0);
    }
}
