use glam::Vec2;

/// One step of a timed frame sequence: how long it stays on screen and the
/// art shown while it does.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub duration: f32,
    pub art: &'static [&'static str],
}

const FRAME_TIME: f32 = 0.04;

/// Drawn size of a single destruction effect, in field pixels.
pub const EXPLOSION_SIZE: f32 = 64.0;

/// Eight-step burst shown where an enemy or the player is destroyed.
pub static EXPLOSION_FRAMES: &[Frame] = &[
    Frame {
        duration: FRAME_TIME,
        art: &["     ", "  .  ", "     "],
    },
    Frame {
        duration: FRAME_TIME,
        art: &["     ", "  *  ", "     "],
    },
    Frame {
        duration: FRAME_TIME,
        art: &["  .  ", " .*. ", "  .  "],
    },
    Frame {
        duration: FRAME_TIME,
        art: &[" \\|/ ", "-=*=-", " /|\\ "],
    },
    Frame {
        duration: FRAME_TIME,
        art: &["\\\\|//", "==O==", "//|\\\\"],
    },
    Frame {
        duration: FRAME_TIME,
        art: &["' | '", "-(o)-", ". | ."],
    },
    Frame {
        duration: FRAME_TIME,
        art: &["'   '", "  o  ", ".   ."],
    },
    Frame {
        duration: FRAME_TIME,
        art: &[".   .", "     ", "'   '"],
    },
];

/// Full-field flash shown when a bomb goes off.
pub static BLAST_FRAMES: &[Frame] = &[
    Frame {
        duration: FRAME_TIME,
        art: &["     .     ", "    .*.    ", "     '     "],
    },
    Frame {
        duration: FRAME_TIME,
        art: &["    \\|/    ", "   --*--   ", "    /|\\    "],
    },
    Frame {
        duration: FRAME_TIME,
        art: &["   \\\\|//   ", "  ==-O-==  ", "   //|\\\\   "],
    },
    Frame {
        duration: FRAME_TIME,
        art: &["  \\ \\|/ /  ", " ===(O)=== ", "  / /|\\ \\  "],
    },
    Frame {
        duration: FRAME_TIME,
        art: &[" \\  \\|/  / ", "====(O)====", " /  /|\\  \\ "],
    },
    Frame {
        duration: FRAME_TIME,
        art: &["'  \\ | /  '", " == (o) == ", ".  / | \\  ."],
    },
    Frame {
        duration: FRAME_TIME,
        art: &["'    |    '", "  -  o  -  ", ".    |    ."],
    },
    Frame {
        duration: FRAME_TIME,
        art: &["'         '", "     .     ", ".         ."],
    },
];

/// A playing timed-frame sequence anchored somewhere on the field.
///
/// Advances through its frames and flips `finished` once the last frame's
/// duration has elapsed; the owner evicts finished animations each tick.
#[derive(Debug, Clone)]
pub struct Animation {
    frames: &'static [Frame],
    pub pos: Vec2,
    pub size: Vec2,
    current: usize,
    remaining: f32,
    finished: bool,
}

impl Animation {
    /// Panics if `frames` is empty. Frame tables are static data, so an
    /// empty one is a programming error caught at the first construction.
    pub fn new(frames: &'static [Frame], pos: Vec2, size: Vec2) -> Self {
        assert!(!frames.is_empty(), "animation needs at least one frame");
        Self {
            frames,
            pos,
            size,
            current: 0,
            remaining: frames[0].duration,
            finished: false,
        }
    }

    /// Destruction burst centered on a destroyed entity.
    pub fn explosion(pos: Vec2) -> Self {
        Self::new(EXPLOSION_FRAMES, pos, Vec2::splat(EXPLOSION_SIZE))
    }

    /// Bomb flash covering the whole field.
    pub fn blast(field_size: Vec2) -> Self {
        Self::new(BLAST_FRAMES, Vec2::ZERO, field_size)
    }

    pub fn update(&mut self, dt: f32) {
        if self.finished {
            return;
        }
        self.remaining -= dt;
        while self.remaining <= 0.0 {
            self.current += 1;
            if self.current >= self.frames.len() {
                self.current = self.frames.len() - 1;
                self.finished = true;
                return;
            }
            // Carry leftover time so long steps skip frames cleanly
            self.remaining += self.frames[self.current].duration;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn art(&self) -> &'static [&'static str] {
        self.frames[self.current].art
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TICK;

    #[test]
    fn test_starts_on_first_frame() {
        let anim = Animation::explosion(Vec2::new(100.0, 100.0));
        assert!(!anim.is_finished());
        assert_eq!(anim.art(), EXPLOSION_FRAMES[0].art);
    }

    #[test]
    fn test_advances_after_frame_duration() {
        let mut anim = Animation::explosion(Vec2::ZERO);
        anim.update(0.05);
        assert_eq!(anim.art(), EXPLOSION_FRAMES[1].art);
    }

    #[test]
    fn test_long_step_skips_frames() {
        let mut anim = Animation::explosion(Vec2::ZERO);
        // 0.1 s covers two full 0.04 s frames and part of the third
        anim.update(0.1);
        assert_eq!(anim.art(), EXPLOSION_FRAMES[2].art);
        assert!(!anim.is_finished());
    }

    #[test]
    fn test_finishes_after_total_duration() {
        let mut anim = Animation::explosion(Vec2::ZERO);
        // 8 frames x 0.04 s = 0.32 s; 20 ticks is 0.33 s
        for _ in 0..20 {
            anim.update(TICK);
        }
        assert!(anim.is_finished());
    }

    #[test]
    fn test_not_finished_early() {
        let mut anim = Animation::explosion(Vec2::ZERO);
        for _ in 0..19 {
            anim.update(TICK);
        }
        assert!(!anim.is_finished());
    }

    #[test]
    fn test_blast_covers_field() {
        let anim = Animation::blast(Vec2::new(650.0, 600.0));
        assert_eq!(anim.pos, Vec2::ZERO);
        assert_eq!(anim.size, Vec2::new(650.0, 600.0));
    }

    #[test]
    #[should_panic(expected = "at least one frame")]
    fn test_empty_frames_panic() {
        let _ = Animation::new(&[], Vec2::ZERO, Vec2::ZERO);
    }
}
