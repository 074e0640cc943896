use core::fmt::Display;

use eggpad_common::{dev_info, dev_trace, dev_warn};
use usb_device::{
    bus::{UsbBus, UsbBusAllocator},
    device::{StringDescriptors, UsbDevice, UsbDeviceBuilder, UsbDeviceState, UsbVidPid},
    prelude::BuilderError,
};
use usbd_hid::{
    UsbError,
    hid_class::{HIDClass, HidClassSettings, HidCountryCode, HidProtocol, HidSubClass, ProtocolModeConfig},
};
use zerocopy::IntoBytes;

use crate::{report::PadReport, transport::PadTransport};

/// HORI CO.,LTD. Pokken Tournament Pro Pad. The console accepts it as a
/// wired pad without any handshake beyond regular HID enumeration.
pub const POKKEN_VID_PID: UsbVidPid = UsbVidPid(0x0f0d, 0x0092);
pub const POKKEN_MANUFACTURER: &str = "HORI CO.,LTD.";
pub const POKKEN_PRODUCT: &str = "POKKEN CONTROLLER";
const POKKEN_DEVICE_RELEASE: u16 = 0x0572;
const POKKEN_MAX_POWER_MA: usize = 500;

// The usb-device crate hardcodes 64 bytes as the maximum packet size of
// full speed endpoints, so that's the most the host can push at once.
const USB_HID_READ_LEN: usize = 64;

// Hand written instead of generated so the byte layout of PadReport and
// the descriptor can be checked side by side.
pub const POKKEN_REPORT_DESCRIPTOR: [u8; 86] = [
    0x05, 0x01,                 // Usage Page (Generic Desktop)
    0x09, 0x05,                 // Usage (Game Pad)
    0xa1, 0x01,                 // Collection (Application)
    0x15, 0x00,                 //  Logical Minimum (0)
    0x25, 0x01,                 //  Logical Maximum (1)
    0x35, 0x00,                 //  Physical Minimum (0)
    0x45, 0x01,                 //  Physical Maximum (1)
    0x75, 0x01,                 //  Report Size (1)
    0x95, 0x10,                 //  Report Count (16)
    0x05, 0x09,                 //  Usage Page (Button)
    0x19, 0x01,                 //  Usage Minimum (1)
    0x29, 0x10,                 //  Usage Maximum (16)
    0x81, 0x02,                 //  Input (Data,Var,Abs)
    0x05, 0x01,                 //  Usage Page (Generic Desktop)
    0x25, 0x07,                 //  Logical Maximum (7)
    0x46, 0x3b, 0x01,           //  Physical Maximum (315)
    0x75, 0x04,                 //  Report Size (4)
    0x95, 0x01,                 //  Report Count (1)
    0x65, 0x14,                 //  Unit (Eng Rot: Degree)
    0x09, 0x39,                 //  Usage (Hat Switch)
    0x81, 0x42,                 //  Input (Data,Var,Abs,Null)
    0x65, 0x00,                 //  Unit (None)
    0x95, 0x01,                 //  Report Count (1)
    0x81, 0x01,                 //  Input (Cnst,Arr,Abs)
    0x26, 0xff, 0x00,           //  Logical Maximum (255)
    0x46, 0xff, 0x00,           //  Physical Maximum (255)
    0x09, 0x30,                 //  Usage (X)
    0x09, 0x31,                 //  Usage (Y)
    0x09, 0x32,                 //  Usage (Z)
    0x09, 0x35,                 //  Usage (Rz)
    0x75, 0x08,                 //  Report Size (8)
    0x95, 0x04,                 //  Report Count (4)
    0x81, 0x02,                 //  Input (Data,Var,Abs)
    0x06, 0x00, 0xff,           //  Usage Page (Vendor Defined 0xFF00)
    0x09, 0x20,                 //  Usage (0x20)
    0x95, 0x01,                 //  Report Count (1)
    0x81, 0x02,                 //  Input (Data,Var,Abs)
    0x0a, 0x21, 0x26,           //  Usage (0x2621)
    0x95, 0x08,                 //  Report Count (8)
    0x91, 0x02,                 //  Output (Data,Var,Abs)
    0xc0,                       // End Collection
];

#[derive(Debug)]
pub enum PadError {
    Usb(UsbError),
    Builder(BuilderError),
}

impl From<UsbError> for PadError {
    fn from(value: UsbError) -> Self {
        Self::Usb(value)
    }
}

impl From<BuilderError> for PadError {
    fn from(value: BuilderError) -> Self {
        Self::Builder(value)
    }
}

impl Display for PadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PadError::Usb(usb_error) => {
                write!(f, "Usb error: {:?}", usb_error)
            }
            PadError::Builder(builder_error) => {
                write!(f, "Usb device descriptor rejected: {:?}", builder_error)
            }
        }
    }
}

pub struct PadSettings<'s, 'b> {
    pub vid_pid: UsbVidPid,
    pub string_descriptors: &'s [StringDescriptors<'b>],
    pub poll_ms: u8,
}

/// The part of the USB stack a [`HidPad`] drives.
pub trait PadLink {
    /// Whether the host finished configuring the device.
    fn configured(&self) -> bool;

    /// Runs the bus state machine. Returns true when an endpoint may have
    /// data to read.
    fn poll(&mut self) -> bool;

    fn write_report(&mut self, data: &[u8]) -> Result<usize, UsbError>;

    fn read_output(&mut self, buf: &mut [u8]) -> Result<usize, UsbError>;
}

/// A `usb-device` bus with the HID class of the pad on it.
pub struct UsbLink<'a, B: UsbBus> {
    usb_dev: UsbDevice<'a, B>,
    hid: HIDClass<'a, B>,
}

impl<'a, B: UsbBus> PadLink for UsbLink<'a, B> {
    fn configured(&self) -> bool {
        self.usb_dev.state() == UsbDeviceState::Configured
    }

    #[inline]
    fn poll(&mut self) -> bool {
        self.usb_dev.poll(&mut [&mut self.hid])
    }

    #[inline]
    fn write_report(&mut self, data: &[u8]) -> Result<usize, UsbError> {
        self.hid.push_raw_input(data)
    }

    #[inline]
    fn read_output(&mut self, buf: &mut [u8]) -> Result<usize, UsbError> {
        self.hid.pull_raw_output(buf)
    }
}

/// Pad transport over any [`PadLink`]. Reports are retried until the host
/// takes them and whatever the host writes is read and dropped.
pub struct HidPad<L: PadLink> {
    link: L,
    configured: bool,
    usb_errors: u32,
    dropped_bytes: u32,
}

/// An emulated Pokken pad on top of a `usb-device` bus.
pub type PokkenPad<'a, B> = HidPad<UsbLink<'a, B>>;

impl<'a, B: UsbBus> HidPad<UsbLink<'a, B>> {
    pub fn alloc<'s>(allocator: &'a UsbBusAllocator<B>, settings: &'s PadSettings<'s, 'a>) -> Result<Self, PadError> {
        let hid_settings = HidClassSettings {
            subclass: HidSubClass::NoSubClass,
            protocol: HidProtocol::Generic,
            config: ProtocolModeConfig::DefaultBehavior,
            locale: HidCountryCode::NotSupported,
        };

        // The pad has both an IN and an OUT interrupt endpoint. The host
        // writes to the OUT one now and then and expects it drained.
        let hid = HIDClass::new_with_settings(allocator, &POKKEN_REPORT_DESCRIPTOR, settings.poll_ms, hid_settings);
        let usb_dev = UsbDeviceBuilder::new(allocator, UsbVidPid(settings.vid_pid.0, settings.vid_pid.1))
            .strings(settings.string_descriptors)?
            .max_packet_size_0(64)?
            .max_power(POKKEN_MAX_POWER_MA)?
            .device_class(0x00)
            .device_release(POKKEN_DEVICE_RELEASE)
            .build();

        Ok(Self::new(UsbLink { usb_dev, hid }))
    }
}

impl<L: PadLink> HidPad<L> {
    pub const fn new(link: L) -> Self {
        Self {
            link,
            configured: false,
            usb_errors: 0,
            dropped_bytes: 0,
        }
    }

    /// USB errors other than `WouldBlock` seen so far. A write failing
    /// with the same error over and over counts once.
    pub fn usb_errors(&self) -> u32 {
        self.usb_errors
    }

    /// Bytes received from the host and thrown away.
    pub fn dropped_bytes(&self) -> u32 {
        self.dropped_bytes
    }
}

impl<L: PadLink> PadTransport for HidPad<L> {
    fn can_deliver(&mut self) -> bool {
        let configured = self.link.configured();
        if configured != self.configured {
            self.configured = configured;
            if configured {
                dev_info!("Host configured the pad");
            } else {
                dev_warn!("Pad no longer configured by the host");
            }
        }
        configured
    }

    fn deliver_report(&mut self, report: &PadReport) {
        // Keep the bus moving until the IN endpoint frees up. This is what
        // paces playback to the host polling rate.
        let mut last_error = None;
        loop {
            match self.link.write_report(report.as_bytes()) {
                Ok(_) => return,
                Err(UsbError::WouldBlock) => {}
                Err(e) => {
                    if last_error != Some(e) {
                        dev_warn!("Report write failed, retrying: {}", PadError::from(e));
                        self.usb_errors = self.usb_errors.saturating_add(1);
                        last_error = Some(e);
                    }
                }
            }
            self.link.poll();
        }
    }

    fn service(&mut self) {
        if self.link.poll() {
            let mut buf = [0u8; USB_HID_READ_LEN];
            match self.link.read_output(&mut buf) {
                Ok(len) => {
                    self.dropped_bytes = self.dropped_bytes.saturating_add(len as u32);
                    dev_trace!("Dropping {} bytes received from host", len);
                }
                Err(UsbError::WouldBlock) => {}
                Err(e) => {
                    self.usb_errors = self.usb_errors.saturating_add(1);
                    dev_warn!("Reading host output failed: {}", PadError::from(e));
                }
            }
        }
    }
}
