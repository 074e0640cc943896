use crate::{
    synth::DEFAULT_ECHOES,
    tracker::{CONTAINER_COLUMNS, CONTAINER_ROWS},
};

/// Top level behavior of a run. Picked once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Walk around the nursery and store every entry received.
    Collecting,
    /// [`Mode::Collecting`] followed by [`Mode::Hatching`] of exactly the
    /// columns that were filled.
    CollectThenHatch,
    Hatching,
    Releasing,
    /// Fly back to the nursery and store the party column, once.
    Repositioning,
}

/// Iteration counts tuned against the game's real time behavior. None of
/// them is algorithmic: they are over provisioned to absorb timing
/// variance and may need retuning on a different setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    /// Back and forth passes before asking the caretaker for an entry.
    /// Fewer passes collect faster but miss more often.
    pub collect_walk_passes: u16,
    /// B presses after talking to the caretaker and after storing.
    pub collect_dismiss_presses: u16,
    /// Back and forth passes needed for a column to hatch.
    pub hatch_walk_passes: u16,
    /// B presses per hatched entry to get through its dialogue.
    pub hatch_dialogue_presses: u16,
    /// B presses to leave the storage screens.
    pub exit_presses: u16,
    /// B presses closing the repositioning routine.
    pub reposition_exit_presses: u16,
}

impl Timings {
    pub const DEFAULT: Timings = Timings {
        collect_walk_passes: 6,
        collect_dismiss_presses: 13,
        hatch_walk_passes: 55,
        hatch_dialogue_presses: 80,
        exit_presses: 13,
        reposition_exit_presses: 18,
    };
}

impl Default for Timings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub eggs_to_collect: u16,
    /// Full containers hatched in [`Mode::Hatching`]. Ignored by
    /// [`Mode::CollectThenHatch`], which hatches what it collected.
    pub boxes_to_hatch: u16,
    pub boxes_to_release: u16,
    pub echoes: u8,
    pub timings: Timings,
}

impl Config {
    pub const DEFAULT: Config = Config {
        mode: Mode::Hatching,
        eggs_to_collect: 30,
        boxes_to_hatch: 8,
        boxes_to_release: 4,
        echoes: DEFAULT_ECHOES,
        timings: Timings::DEFAULT,
    };

    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn with_eggs_to_collect(mut self, eggs: u16) -> Self {
        self.eggs_to_collect = eggs;
        self
    }

    pub const fn with_boxes_to_hatch(mut self, boxes: u16) -> Self {
        self.boxes_to_hatch = boxes;
        self
    }

    pub const fn with_boxes_to_release(mut self, boxes: u16) -> Self {
        self.boxes_to_release = boxes;
        self
    }

    pub const fn with_echoes(mut self, echoes: u8) -> Self {
        self.echoes = echoes;
        self
    }

    pub const fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Columns the hatching phase goes through. When collecting first it
    /// is derived from what gets collected, so both phases agree; the
    /// entries of an incomplete column are left alone.
    pub const fn hatch_columns(&self) -> u32 {
        match self.mode {
            Mode::CollectThenHatch => self.eggs_to_collect as u32 / CONTAINER_ROWS as u32,
            _ => self.boxes_to_hatch as u32 * CONTAINER_COLUMNS as u32,
        }
    }

    pub const fn collects(&self) -> bool {
        matches!(self.mode, Mode::Collecting | Mode::CollectThenHatch)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
