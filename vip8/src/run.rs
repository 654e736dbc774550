use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use vip8_core::constants::{CYCLE_NANOS, TIMER_NANOS};
use vip8_core::Machine;
use vip8_display::Display;

use crate::audio::Beeper;
use crate::keymap::keymap;

/// Target time per instruction
const CYCLE_TIME: Duration = Duration::from_nanos(CYCLE_NANOS);
/// Time between timer ticks; always 60Hz, however fast instructions run
const TIMER_TIME: Duration = Duration::from_nanos(TIMER_NANOS);

/// Loads the ROM at `rom_path` and runs it until the window closes or the
/// machine faults.
///
/// Each pass around the loop renders any fresh frame, drains input events
/// into the machine, executes one instruction, and fires the 60Hz timer tick
/// when its deadline has come around. Holding Space ignores instruction
/// pacing; Escape quits.
pub fn run(rom_path: &Path) -> Result<(), Box<dyn Error>> {
    let rom = fs::read(rom_path)?;
    let mut machine = Machine::new(&rom)?;
    info!("loaded {} byte rom from {}", rom.len(), rom_path.display());

    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl)?;
    let mut beeper = Beeper::new(&sdl)?;
    let mut events = sdl.event_pump()?;

    let mut last_cycle = Instant::now();
    let mut next_timer_tick = Instant::now() + TIMER_TIME;
    let mut fast_forward = false;

    'event: loop {
        if let Some(frame) = machine.take_frame() {
            display.render(&frame)?;
        }

        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(Keycode::Space),
                    ..
                } => fast_forward = true,
                Event::KeyUp {
                    keycode: Some(Keycode::Space),
                    ..
                } => fast_forward = false,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        machine.key_down(kc);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        machine.key_up(kc);
                    }
                }
                _ => {}
            }
        }

        machine.step()?;

        if Instant::now() >= next_timer_tick {
            if machine.tick_timers().is_some() {
                beeper.beep();
            }
            next_timer_tick += TIMER_TIME;
        }
        beeper.update();

        let elapsed = last_cycle.elapsed();
        if !fast_forward && CYCLE_TIME > elapsed {
            std::thread::sleep(CYCLE_TIME - elapsed);
        }
        last_cycle = Instant::now();
    }

    Ok(())
}
