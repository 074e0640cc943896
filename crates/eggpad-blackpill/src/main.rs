// Firmware for a WeAct Black Pill (STM32F411CE) that enumerates as a
// wired Pokken pad and plays the mode selected at build time through
// the mode-* features. Plug it in while the console shows the controller
// pairing screen.

#![no_std]
#![no_main]
#![allow(static_mut_refs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::bare_urls)]

mod config;

use config::*;

use core::mem::MaybeUninit;
use core::ptr::addr_of_mut;

use eggpad_common::dev_info;
use eggpad_core::executor::Executor;
use eggpad_core::hid::{POKKEN_MANUFACTURER, POKKEN_PRODUCT, POKKEN_VID_PID, PadSettings, PokkenPad};
use eggpad_core::session::Session;
use eggpad_core::synth::Synthesizer;

#[allow(unused_imports)]
use panic_itm as _;

use cortex_m_rt::entry;
use stm32f4xx_hal::{otg_fs::USB, pac, prelude::*, rcc::RccExt};
use synopsys_usb_otg::UsbBus;
use usb_device::LangID;
use usb_device::bus::UsbBusAllocator;
use usb_device::device::StringDescriptors;

static mut EP_MEMORY: [u32; 1024] = [0; 1024];
static mut USB_ALLOC: MaybeUninit<UsbBusAllocator<TUsbBus>> = MaybeUninit::uninit();

#[entry]
fn main() -> ! {
    main0()
}

fn main0() -> ! {
    let dp = pac::Peripherals::take().unwrap();

    let rcc = dp.RCC.constrain();

    let clocks = rcc
        .cfgr
        .use_hse(25.MHz())
        .sysclk(96.MHz())
        .pclk1(48.MHz())
        .pclk2(48.MHz())
        .require_pll48clk()
        .freeze();

    let gpioa = dp.GPIOA.split();

    itm_logger::init_with_level(log::Level::Trace).unwrap();
    dev_info!("Device startup. Device configuration:");
    dev_info!(" - Mode: {:?}", CONFIG.mode);
    dev_info!(" - Echoes: {}", CONFIG.echoes);
    dev_info!(" - Timings: {:?}", CONFIG.timings);

    let usb = USB {
        usb_global: dp.OTG_FS_GLOBAL,
        usb_device: dp.OTG_FS_DEVICE,
        usb_pwrclk: dp.OTG_FS_PWRCLK,
        pin_dm: gpioa.pa11.into(),
        pin_dp: gpioa.pa12.into(),
        hclk: clocks.hclk(),
    };

    let usb_alloc = unsafe {
        USB_ALLOC.write(UsbBus::new(usb, addr_of_mut!(EP_MEMORY).as_mut().unwrap()))
    };

    let pad: TPad = PokkenPad::alloc(
        usb_alloc,
        &PadSettings {
            vid_pid: POKKEN_VID_PID,
            string_descriptors: &[StringDescriptors::new(LangID::EN_US)
                .manufacturer(POKKEN_MANUFACTURER)
                .product(POKKEN_PRODUCT)],
            poll_ms: USB_POLL_MS,
        },
    )
    .unwrap();

    let executor = Executor::with_synthesizer(pad, Synthesizer::with_echoes(CONFIG.echoes));
    let session: TSession = Session::new(executor, CONFIG);
    session.run()
}
