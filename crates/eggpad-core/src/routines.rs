//! Fixed command sequences that implement one UI operation each.
//!
//! The routines assume the game sits where their doc says and leave it
//! where their doc says. Nothing is observed: if a precondition does not
//! hold the sequence still plays in full.

use eggpad_common::Frames;

use crate::{
    action::Action,
    command::Command,
    executor::CommandRunner,
};

/// Frames a button or stick is held for a single menu input.
pub const PRESS: Frames = 5;
/// Pause after a cursor move inside storage.
pub const GAP: Frames = 5;
/// Longer pause used around picking up and placing entries.
pub const SETTLE: Frames = 10;

/// Pairs the pad with the console: both shoulders, release, confirm.
pub const STARTUP: [Command; 3] = [
    Command::new(Action::Triggers, 50),
    Command::wait(5),
    Command::new(Action::A, 50),
];

/// From the overworld spawn point to the stretch of road the collecting
/// and hatching walks run on.
pub const WALK_INTO_POSITION: Command = Command::new(Action::UpRight, 140);

/// Storage opening, from the main menu with the cursor over the party
/// entry. The first 6 steps open storage, each Y switches the pick mode:
/// once to single pick, twice to multi select.
pub const OPEN_CONTAINER: [Command; 10] = [
    Command::new(Action::X, PRESS),
    Command::wait(45),
    Command::new(Action::A, PRESS),
    Command::wait(70),
    Command::new(Action::R, PRESS),
    Command::wait(70),
    Command::new(Action::Y, PRESS),
    Command::wait(5),
    Command::new(Action::Y, PRESS),
    Command::wait(5),
];

const OPEN_CONTAINER_PLAIN_STEPS: usize = 6;
const OPEN_CONTAINER_SINGLE_STEPS: usize = 8;

pub const SELECT_COLUMN: [Command; 12] = [
    Command::new(Action::A, PRESS),
    Command::wait(GAP),
    Command::new(Action::Down, PRESS),
    Command::wait(GAP),
    Command::new(Action::Down, PRESS),
    Command::wait(GAP),
    Command::new(Action::Down, PRESS),
    Command::wait(GAP),
    Command::new(Action::Down, PRESS),
    Command::wait(GAP),
    Command::new(Action::A, PRESS),
    Command::wait(GAP),
];

/// One back and forth pass along the road. Ends a little up and right so
/// drift does not accumulate over many passes.
pub const WALK_PASS: [Command; 6] = [
    Command::new(Action::Left, 80),
    Command::wait(5),
    Command::new(Action::Right, 70),
    Command::wait(5),
    Command::new(Action::UpRight, 40),
    Command::wait(10),
];

/// Release of the entry under the cursor: open its menu, pick release,
/// confirm twice and dismiss.
pub const RELEASE: [Command; 14] = [
    Command::new(Action::A, PRESS),
    Command::wait(10),
    Command::new(Action::Up, PRESS),
    Command::wait(5),
    Command::new(Action::Up, PRESS),
    Command::wait(5),
    Command::new(Action::A, PRESS),
    Command::wait(40),
    Command::new(Action::Up, PRESS),
    Command::wait(5),
    Command::new(Action::A, PRESS),
    Command::wait(65),
    Command::new(Action::A, PRESS),
    Command::wait(40),
];

pub const TALK_TO_CARETAKER: [Command; 4] = [
    Command::new(Action::A, PRESS),
    Command::wait(40),
    Command::new(Action::A, PRESS),
    Command::wait(50),
];

/// Short moves that wake up the next hatch once the dialogue of the
/// previous one is over. A 5 frame move does not always trigger it.
pub const NUDGE: [Command; 4] = [
    Command::new(Action::Left, 20),
    Command::wait(SETTLE),
    Command::new(Action::Right, 20),
    Command::wait(SETTLE),
];

/// From the overworld to the nursery through the map's fly menu, then
/// back on the road facing the caretaker.
pub const FLY_TO_NURSERY: [Command; 25] = [
    Command::new(Action::X, PRESS),
    Command::wait(40),
    Command::new(Action::A, PRESS),
    Command::wait(40),
    Command::wait(40),
    Command::wait(20),
    Command::new(Action::Down, 6),
    Command::wait(10),
    Command::new(Action::Right, 10),
    Command::new(Action::A, PRESS),
    Command::wait(30),
    Command::new(Action::A, PRESS),
    Command::wait(40),
    Command::wait(40),
    Command::wait(40),
    Command::new(Action::Plus, PRESS),
    Command::wait(10),
    Command::new(Action::Right, 300),
    Command::new(Action::L, PRESS),
    Command::new(Action::X, PRESS),
    Command::wait(40),
    Command::new(Action::Up, PRESS),
    Command::new(Action::Right, PRESS),
    Command::new(Action::B, PRESS),
    Command::wait(20),
];

/// A single cursor input inside storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
    Left,
    Right,
    Confirm,
}

impl Step {
    pub const fn action(self) -> Action {
        match self {
            Step::Up => Action::Up,
            Step::Down => Action::Down,
            Step::Left => Action::Left,
            Step::Right => Action::Right,
            Step::Confirm => Action::A,
        }
    }
}

pub fn play<R: CommandRunner + ?Sized>(runner: &mut R, commands: &[Command]) {
    for command in commands {
        runner.run(*command);
    }
}

/// Presses `step` once and waits `gap` frames.
pub fn step<R: CommandRunner + ?Sized>(runner: &mut R, step: Step, gap: Frames) {
    runner.run(Command::new(step.action(), PRESS));
    runner.run(Command::wait(gap));
}

pub fn repeat_step<R: CommandRunner + ?Sized>(runner: &mut R, s: Step, count: u16, gap: Frames) {
    for _ in 0..count {
        step(runner, s, gap);
    }
}

/// Moves the held entry (or the cursor) one cell per input, with the
/// short storage gap.
pub fn move_entry<R: CommandRunner + ?Sized>(runner: &mut R, s: Step, count: u16) {
    repeat_step(runner, s, count, GAP);
}

pub fn startup<R: CommandRunner + ?Sized>(runner: &mut R) {
    play(runner, &STARTUP);
}

/// Opens storage in multi select mode. Leaves the cursor on the top left
/// cell of the current container.
pub fn open_container<R: CommandRunner + ?Sized>(runner: &mut R) {
    play(runner, &OPEN_CONTAINER);
}

/// Opens storage in single pick mode, where one A picks up an entry.
pub fn open_container_single<R: CommandRunner + ?Sized>(runner: &mut R) {
    play(runner, &OPEN_CONTAINER[..OPEN_CONTAINER_SINGLE_STEPS]);
}

/// Opens storage without touching the pick mode.
pub fn open_container_plain<R: CommandRunner + ?Sized>(runner: &mut R) {
    play(runner, &OPEN_CONTAINER[..OPEN_CONTAINER_PLAIN_STEPS]);
}

/// Selects the 5 cells of the column under the cursor and picks them up.
/// The cursor has to be on the first row.
pub fn select_column<R: CommandRunner + ?Sized>(runner: &mut R) {
    play(runner, &SELECT_COLUMN);
}

/// From the last cell of a container to the first cell of the next one:
/// up past the first row onto the container header, then right.
pub fn advance_to_next_container<R: CommandRunner + ?Sized>(runner: &mut R) {
    repeat_step(runner, Step::Up, 5, SETTLE);
    step(runner, Step::Right, SETTLE);
}

/// Releases the entry under the cursor and moves one row down.
pub fn release<R: CommandRunner + ?Sized>(runner: &mut R) {
    play(runner, &RELEASE);
    move_entry(runner, Step::Down, 1);
}

pub fn walk<R: CommandRunner + ?Sized>(runner: &mut R, passes: u16) {
    for _ in 0..passes {
        play(runner, &WALK_PASS);
    }
}

pub fn talk_to_caretaker<R: CommandRunner + ?Sized>(runner: &mut R) {
    play(runner, &TALK_TO_CARETAKER);
}

pub fn nudge<R: CommandRunner + ?Sized>(runner: &mut R) {
    play(runner, &NUDGE);
}

/// Presses B `count` times. Used both to get through dialogue and as a
/// safe way back to the overworld from any menu depth.
pub fn mash_b<R: CommandRunner + ?Sized>(runner: &mut R, count: u16, press: Frames, gap: Frames) {
    for _ in 0..count {
        runner.run(Command::new(Action::B, press));
        runner.run(Command::wait(gap));
    }
}

/// Backs out of storage to the overworld.
pub fn exit_container<R: CommandRunner + ?Sized>(runner: &mut R, presses: u16) {
    mash_b(runner, presses, PRESS, SETTLE);
}

/// Moves the entry in the second party slot to `(row, column)` of the
/// open container. Storage has to be open in single pick mode with the
/// cursor on the first cell.
pub fn place_from_party<R: CommandRunner + ?Sized>(runner: &mut R, row: u8, column: u8) {
    step(runner, Step::Left, SETTLE);
    step(runner, Step::Down, SETTLE);
    step(runner, Step::Confirm, SETTLE);

    // Back on the first cell with the entry held.
    step(runner, Step::Right, SETTLE);
    step(runner, Step::Up, SETTLE);

    repeat_step(runner, Step::Down, row as u16, SETTLE);
    repeat_step(runner, Step::Right, column as u16, SETTLE);
    step(runner, Step::Confirm, SETTLE);
}

/// Picks up `column` of the open container and drops it in the party
/// below the first slot. Storage has to be open in multi select mode with
/// the cursor on the first cell.
pub fn withdraw_column<R: CommandRunner + ?Sized>(runner: &mut R, column: u8) {
    repeat_step(runner, Step::Right, column as u16, SETTLE);
    select_column(runner);

    // The party sits one column left of the first container column.
    repeat_step(runner, Step::Left, column as u16 + 1, SETTLE);
    step(runner, Step::Down, SETTLE);
    step(runner, Step::Confirm, SETTLE);
}

/// Inverse of [`withdraw_column`].
pub fn deposit_column<R: CommandRunner + ?Sized>(runner: &mut R, column: u8) {
    step(runner, Step::Left, SETTLE);
    step(runner, Step::Down, SETTLE);
    select_column(runner);

    step(runner, Step::Right, SETTLE);
    step(runner, Step::Up, SETTLE);
    repeat_step(runner, Step::Right, column as u16, SETTLE);
    step(runner, Step::Confirm, SETTLE);
}

pub fn fly_to_nursery<R: CommandRunner + ?Sized>(runner: &mut R) {
    play(runner, &FLY_TO_NURSERY);
}

/// Moves the party column into `column` of the container shown first
/// after opening storage. Leaves storage open.
pub fn store_party_column<R: CommandRunner + ?Sized>(runner: &mut R, column: u8) {
    open_container(runner);
    runner.run(Command::new(Action::L, PRESS));
    runner.run(Command::wait(SETTLE));

    move_entry(runner, Step::Left, 1);
    move_entry(runner, Step::Down, 1);
    select_column(runner);

    move_entry(runner, Step::Right, column as u16);
    move_entry(runner, Step::Up, 1);
    move_entry(runner, Step::Confirm, 1);
    move_entry(runner, Step::Right, 1);
}
