use crate::report::{Buttons, PadReport, STICK_MAX, STICK_MIN};

/// One atomic input intent. Every command holds exactly one of these
/// for its whole duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    UpRight,
    A,
    B,
    X,
    Y,
    L,
    R,
    /// Both shoulder buttons at once. Used to pair with the console.
    Triggers,
    /// Left stick fully left and right stick fully right: the player
    /// turns in place.
    Spin,
    Throw,
    Home,
    Plus,
    Minus,
    Nothing,
}

impl Action {
    pub const ALL: [Action; 18] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::UpRight,
        Action::A,
        Action::B,
        Action::X,
        Action::Y,
        Action::L,
        Action::R,
        Action::Triggers,
        Action::Spin,
        Action::Throw,
        Action::Home,
        Action::Plus,
        Action::Minus,
        Action::Nothing,
    ];

    /// Writes the effect of this action on top of `report`. The report
    /// is expected to be neutral beforehand.
    pub fn apply(self, report: &mut PadReport) {
        match self {
            Action::Up => report.ly = STICK_MIN,
            Action::Down => report.ly = STICK_MAX,
            Action::Left => report.lx = STICK_MIN,
            Action::Right => report.lx = STICK_MAX,
            Action::UpRight => {
                report.ly = STICK_MIN;
                report.lx = STICK_MAX;
            }
            Action::A => report.press(Buttons::A),
            Action::B => report.press(Buttons::B),
            Action::X => report.press(Buttons::X),
            Action::Y => report.press(Buttons::Y),
            Action::L => report.press(Buttons::L),
            Action::R => report.press(Buttons::R),
            Action::Triggers => report.press(Buttons::L | Buttons::R),
            Action::Spin => {
                report.lx = STICK_MIN;
                report.rx = STICK_MAX;
            }
            Action::Throw => {
                report.ly = STICK_MIN;
                report.press(Buttons::R);
            }
            Action::Home => report.press(Buttons::HOME),
            Action::Plus => report.press(Buttons::PLUS),
            Action::Minus => report.press(Buttons::MINUS),
            Action::Nothing => {}
        }
    }

    pub fn to_report(self) -> PadReport {
        let mut report = PadReport::NEUTRAL;
        self.apply(&mut report);
        report
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::report::{Hat, STICK_CENTER};

    #[test]
    fn test_only_nothing_is_neutral() {
        for action in Action::ALL {
            assert_eq!(action.to_report().is_neutral(), action == Action::Nothing, "{:?}", action);
        }
    }

    #[test]
    fn test_hat_never_moves() {
        for action in Action::ALL {
            assert_eq!(action.to_report().hat(), Hat::Center as u8);
        }
    }

    #[test]
    fn test_stick_table() {
        let up_right = Action::UpRight.to_report();
        assert_eq!((up_right.lx, up_right.ly), (STICK_MAX, STICK_MIN));
        assert!(up_right.buttons().is_empty());

        let spin = Action::Spin.to_report();
        assert_eq!((spin.lx, spin.ly, spin.rx, spin.ry), (STICK_MIN, STICK_CENTER, STICK_MAX, STICK_CENTER));

        let down = Action::Down.to_report();
        assert_eq!((down.lx, down.ly), (STICK_CENTER, STICK_MAX));
    }

    #[test]
    fn test_button_table() {
        assert_eq!(Action::Triggers.to_report().buttons(), Buttons::L | Buttons::R);
        assert_eq!(Action::Home.to_report().buttons(), Buttons::HOME);
        assert_eq!(Action::Minus.to_report().buttons(), Buttons::MINUS);

        let throw = Action::Throw.to_report();
        assert_eq!(throw.buttons(), Buttons::R);
        assert_eq!(throw.ly, STICK_MIN);
    }

    #[test]
    fn test_every_action_maps_to_a_distinct_report() {
        for (i, a) in Action::ALL.iter().enumerate() {
            for b in &Action::ALL[i + 1..] {
                assert_ne!(a.to_report(), b.to_report(), "{:?} and {:?} collide", a, b);
            }
        }
    }
}
