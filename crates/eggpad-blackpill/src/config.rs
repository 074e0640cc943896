use eggpad_core::{
    config::{Config, Mode},
    executor::Executor,
    hid::PokkenPad,
    session::Session,
};
use stm32f4xx_hal::otg_fs::USB;
use synopsys_usb_otg::UsbBus;

#[cfg(any(
    all(feature = "mode-collecting", any(feature = "mode-collect-then-hatch", feature = "mode-hatching", feature = "mode-releasing", feature = "mode-repositioning")),
    all(feature = "mode-collect-then-hatch", any(feature = "mode-hatching", feature = "mode-releasing", feature = "mode-repositioning")),
    all(feature = "mode-hatching", any(feature = "mode-releasing", feature = "mode-repositioning")),
    all(feature = "mode-releasing", feature = "mode-repositioning"),
))]
compile_error!("Only one mode-* feature can be enabled at a time!");

#[cfg(feature = "mode-collecting")]
const MODE: Mode = Mode::Collecting;
#[cfg(feature = "mode-collect-then-hatch")]
const MODE: Mode = Mode::CollectThenHatch;
#[cfg(feature = "mode-releasing")]
const MODE: Mode = Mode::Releasing;
#[cfg(feature = "mode-repositioning")]
const MODE: Mode = Mode::Repositioning;
// Hatching unless told otherwise.
#[cfg(not(any(
    feature = "mode-collecting",
    feature = "mode-collect-then-hatch",
    feature = "mode-releasing",
    feature = "mode-repositioning"
)))]
const MODE: Mode = Mode::Hatching;

pub const CONFIG: Config = Config::DEFAULT
    .with_mode(MODE)
    .with_eggs_to_collect(30)
    .with_boxes_to_hatch(8)
    .with_boxes_to_release(4);

pub const USB_POLL_MS: u8 = 1;

pub type TUsbBus = UsbBus<USB>;
pub type TPad<'usb> = PokkenPad<'usb, TUsbBus>;
pub type TSession<'usb> = Session<Executor<TPad<'usb>>>;
