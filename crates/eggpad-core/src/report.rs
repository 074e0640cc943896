use bitflags::bitflags;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, byteorder::little_endian::U16};

pub const STICK_MIN: u8 = 0x00;
pub const STICK_CENTER: u8 = 0x80;
pub const STICK_MAX: u8 = 0xFF;

/// Size in bytes of the IN report sent to the host on every frame.
pub const PAD_REPORT_LEN: usize = 8;

bitflags! {
    /// Button bits of the pad input report. The order matches the button
    /// usages declared in the HID report descriptor (Button 1 is bit 0).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Buttons: u16 {
        const Y       = 0x0001;
        const B       = 0x0002;
        const A       = 0x0004;
        const X       = 0x0008;
        const L       = 0x0010;
        const R       = 0x0020;
        const ZL      = 0x0040;
        const ZR      = 0x0080;
        const MINUS   = 0x0100;
        const PLUS    = 0x0200;
        const LCLICK  = 0x0400;
        const RCLICK  = 0x0800;
        const HOME    = 0x1000;
        const CAPTURE = 0x2000;
    }
}

#[allow(unused)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Hat {
    Up = 0x00,
    UpRight = 0x01,
    Right = 0x02,
    DownRight = 0x03,
    Down = 0x04,
    DownLeft = 0x05,
    Left = 0x06,
    UpLeft = 0x07,
    /// Any value above 7 is read as "no direction" by the host.
    Center = 0x08,
}

/// A single pad input report, laid out exactly as it travels on the
/// wire: buttons (LE), hat, left stick, right stick and a trailing
/// vendor byte the host ignores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoBytes, FromBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct PadReport {
    buttons: U16,
    hat: u8,
    pub lx: u8,
    pub ly: u8,
    pub rx: u8,
    pub ry: u8,
    vendor: u8,
}

const _: () = assert!(size_of::<PadReport>() == PAD_REPORT_LEN, "Pad report must be exactly 8 bytes long");

impl PadReport {
    /// Sticks centered, hat centered, nothing pressed.
    pub const NEUTRAL: PadReport = PadReport {
        buttons: U16::new(0),
        hat: Hat::Center as u8,
        lx: STICK_CENTER,
        ly: STICK_CENTER,
        rx: STICK_CENTER,
        ry: STICK_CENTER,
        vendor: 0,
    };

    #[inline]
    pub fn buttons(&self) -> Buttons {
        Buttons::from_bits_retain(self.buttons.get())
    }

    #[inline]
    pub fn press(&mut self, buttons: Buttons) {
        self.buttons.set(self.buttons.get() | buttons.bits());
    }

    #[inline]
    pub fn hat(&self) -> u8 {
        self.hat
    }

    #[inline]
    pub fn set_hat(&mut self, hat: Hat) {
        self.hat = hat as u8;
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

impl Default for PadReport {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn test_neutral_wire_bytes() {
        assert_eq!(
            PadReport::NEUTRAL.as_bytes(),
            &[0x00, 0x00, 0x08, 0x80, 0x80, 0x80, 0x80, 0x00]
        );
    }

    #[test]
    fn test_buttons_are_little_endian() {
        let mut report = PadReport::NEUTRAL;
        report.press(Buttons::A);
        assert_eq!(&report.as_bytes()[..2], &[0x04, 0x00]);

        report.press(Buttons::HOME);
        assert_eq!(&report.as_bytes()[..2], &[0x04, 0x10]);
        assert_eq!(report.buttons(), Buttons::A | Buttons::HOME);
    }

    #[test]
    fn test_axes_follow_hat() {
        let mut report = PadReport::NEUTRAL;
        report.lx = STICK_MIN;
        report.ry = STICK_MAX;
        report.set_hat(Hat::Left);
        assert_eq!(report.as_bytes(), &[0x00, 0x00, 0x06, 0x00, 0x80, 0x80, 0xFF, 0x00]);
        assert!(!report.is_neutral());
    }

    #[test]
    fn test_round_trip_from_wire() {
        let bytes = [0x30, 0x00, 0x08, 0x80, 0x00, 0x80, 0x80, 0x00];
        let report = PadReport::read_from_bytes(&bytes).unwrap();
        assert_eq!(report.buttons(), Buttons::L | Buttons::R);
        assert_eq!(report.ly, STICK_MIN);
    }
}
