use eggpad_common::{dev_debug, dev_info};

use crate::{
    action::Action,
    command::Command,
    config::{Config, Mode},
    executor::{CommandRunner, Executor},
    routines::{self, GAP, PRESS, SETTLE, Step},
    tracker::{Advance, CONTAINER_COLUMNS, CONTAINER_ROWS, PositionTracker},
    transport::PadTransport,
};

/// Dialogue presses after talking to the caretaker are held longer than
/// menu presses, the game ignores short ones while text scrolls.
const DIALOGUE_PRESS: u16 = 15;

/// Placement of the column repositioning stores the party into.
const REPOSITION_COLUMN: u8 = 1;

/// Running totals of what a session did so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub placements: u32,
    pub columns_hatched: u32,
    pub released: u32,
    pub containers_advanced: u32,
}

/// Plays the configured mode from start to end.
///
/// Nothing the game does is observed. Every routine assumes the previous
/// one left the game where it expects it to be.
pub struct Session<R: CommandRunner> {
    runner: R,
    config: Config,
    tracker: PositionTracker,
    stats: Stats,
}

impl<R: CommandRunner> Session<R> {
    pub fn new(runner: R, config: Config) -> Self {
        Self {
            runner,
            config,
            tracker: PositionTracker::new(),
            stats: Stats::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tracker(&self) -> &PositionTracker {
        &self.tracker
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Pairs with the console and plays the configured mode once.
    pub fn play(&mut self) {
        dev_info!("Starting {:?}", self.config.mode);
        routines::startup(&mut self.runner);
        if self.config.collects() {
            self.runner.run(routines::WALK_INTO_POSITION);
        }

        match self.config.mode {
            Mode::Collecting => {
                self.collect(self.config.eggs_to_collect);
            }
            Mode::CollectThenHatch => {
                self.collect(self.config.eggs_to_collect);
                self.return_to_first_container();
                self.hatch(self.config.hatch_columns());
            }
            Mode::Hatching => {
                self.hatch(self.config.hatch_columns());
            }
            Mode::Releasing => {
                self.release(self.config.boxes_to_release);
            }
            Mode::Repositioning => {
                self.reposition();
            }
        }

        dev_info!("Finished {:?}: {:?}", self.config.mode, self.stats);
    }

    /// Collects `eggs` entries from the caretaker, storing each one in
    /// the next free cell.
    pub fn collect(&mut self, eggs: u16) {
        self.runner.resync();
        for _ in 0..eggs {
            self.collect_one();
        }
    }

    fn collect_one(&mut self) {
        let timings = self.config.timings;
        let r = &mut self.runner;

        routines::walk(r, timings.collect_walk_passes);
        routines::talk_to_caretaker(r);
        routines::mash_b(r, timings.collect_dismiss_presses, DIALOGUE_PRESS, GAP);

        routines::open_container_single(r);
        routines::place_from_party(r, self.tracker.row(), self.tracker.column());
        self.stats.placements = self.stats.placements.saturating_add(1);

        if self.tracker.advance() == Advance::Container {
            dev_info!("Container full, moving to the next one");
            routines::advance_to_next_container(r);
            self.stats.containers_advanced = self.stats.containers_advanced.saturating_add(1);
        }

        routines::mash_b(r, timings.collect_dismiss_presses, DIALOGUE_PRESS, GAP);
    }

    /// Goes back over the containers filled while collecting, so
    /// hatching starts from the first one.
    pub fn return_to_first_container(&mut self) {
        let containers = self.tracker.containers_advanced();
        dev_debug!("Returning {} containers", containers);

        let r = &mut self.runner;
        routines::open_container_single(r);
        routines::step(r, Step::Up, SETTLE);
        routines::repeat_step(r, Step::Left, containers, SETTLE);
        routines::mash_b(r, self.config.timings.collect_dismiss_presses, DIALOGUE_PRESS, GAP);
    }

    /// Hatches `columns` columns, starting at the first column of the
    /// current container. Full containers are left behind for the next.
    pub fn hatch(&mut self, columns: u32) {
        self.runner.resync();
        for i in 0..columns {
            let column = (i % CONTAINER_COLUMNS as u32) as u8;
            self.hatch_column(column);

            if column == CONTAINER_COLUMNS - 1 {
                self.next_hatch_container();
            }
        }
    }

    pub fn hatch_column(&mut self, column: u8) {
        let timings = self.config.timings;
        let r = &mut self.runner;

        routines::open_container(r);
        routines::withdraw_column(r, column);
        routines::exit_container(r, timings.exit_presses);

        routines::walk(r, timings.hatch_walk_passes);
        for _ in 0..CONTAINER_ROWS {
            routines::mash_b(r, timings.hatch_dialogue_presses, PRESS, SETTLE);
            routines::nudge(r);
        }

        routines::open_container(r);
        routines::deposit_column(r, column);
        routines::exit_container(r, timings.exit_presses);

        self.stats.columns_hatched = self.stats.columns_hatched.saturating_add(1);
        dev_info!("Hatched column {} ({} so far)", column, self.stats.columns_hatched);
    }

    fn next_hatch_container(&mut self) {
        let r = &mut self.runner;
        routines::open_container(r);
        routines::step(r, Step::Up, SETTLE);
        routines::step(r, Step::Right, SETTLE);
        routines::exit_container(r, self.config.timings.exit_presses);

        self.stats.containers_advanced = self.stats.containers_advanced.saturating_add(1);
        dev_info!("Moved to container {}", self.stats.containers_advanced);
    }

    /// Releases every entry of `containers` containers. Storage is opened
    /// once and stays open for the whole run.
    pub fn release(&mut self, containers: u16) {
        self.runner.resync();
        routines::open_container_plain(&mut self.runner);
        for _ in 0..containers {
            self.release_container();
        }
    }

    pub fn release_container(&mut self) {
        for _ in 0..CONTAINER_COLUMNS {
            for _ in 0..CONTAINER_ROWS {
                routines::release(&mut self.runner);
                self.stats.released = self.stats.released.saturating_add(1);
            }

            // Wrap back to the first row of the next column.
            routines::move_entry(&mut self.runner, Step::Down, 2);
            routines::move_entry(&mut self.runner, Step::Right, 1);
        }

        routines::move_entry(&mut self.runner, Step::Right, 1);
        self.runner.run(Command::new(Action::R, PRESS));
        self.runner.run(Command::wait(GAP));

        self.stats.containers_advanced = self.stats.containers_advanced.saturating_add(1);
        dev_info!("Released {} entries so far", self.stats.released);
    }

    /// Flies back to the nursery and stores the party column. Runs once;
    /// the mode is left as it is.
    pub fn reposition(&mut self) {
        self.runner.resync();
        let r = &mut self.runner;

        routines::fly_to_nursery(r);
        routines::store_party_column(r, REPOSITION_COLUMN);
        r.run(Command::new(Action::R, PRESS));
        routines::mash_b(r, self.config.timings.reposition_exit_presses, DIALOGUE_PRESS, GAP);

        self.stats.containers_advanced = self.stats.containers_advanced.saturating_add(1);
    }
}

impl<T: PadTransport> Session<Executor<T>> {
    /// Plays the configured mode and then keeps the pad connected,
    /// neutral, forever.
    pub fn run(mut self) -> ! {
        self.play();
        self.runner.idle_forever()
    }
}
