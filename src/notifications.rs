/// Audible cues for task completion and finished timer phases.
/// Fire and forget: failures are swallowed and nothing blocks the event loop.

use std::io::Write;
#[cfg(target_os = "macos")]
use std::process::{Command, Stdio};

/// Something that can play the completion cue
pub trait AudioCue {
    fn play(&self);
}

/// Plays a system sound on macOS, rings the terminal bell elsewhere
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCue;

#[cfg(target_os = "macos")]
const CUE_SOUND: &str = "/System/Library/Sounds/Glass.aiff";

impl AudioCue for SystemCue {
    fn play(&self) {
        #[cfg(target_os = "macos")]
        {
            // Spawn without waiting; the child is reaped by the OS when we exit
            if Command::new("afplay")
                .arg(CUE_SOUND)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .is_ok()
            {
                return;
            }
        }

        ring_bell();
    }
}

/// BEL on stdout; the terminal decides whether it beeps or flashes
fn ring_bell() {
    let mut out = std::io::stdout();
    let _ = out.write_all(b"\x07");
    let _ = out.flush();
}

/// A cue that does nothing, for the command line
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCue;

impl AudioCue for SilentCue {
    fn play(&self) {}
}
