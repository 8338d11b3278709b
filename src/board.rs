//! Disobey 2026 badge support: clocks, pin assignments, display and buttons.
//!
//! ```rust,ignore
//! let peripherals = ripples3d::board::init();
//! let resources = ripples3d::split_resources!(peripherals);
//!
//! let surface: ripples3d::board::Surface = resources.display.into();
//! let (commands, dpad) = ripples3d::board::Buttons::from(resources.buttons).split();
//! ```

mod buttons;
mod display;

pub use buttons::{
    ButtonCommands,
    Buttons,
    DpadTilt,
    Key,
};
pub use display::{
    Display,
    Surface,
};
pub use crate::config::SCREEN_SIZE;
use esp_hal::{
    assign_resources,
    clock::{
        Clock,
        CpuClock,
    },
    gpio::{
        Level,
        Output,
        OutputConfig,
    },
    rom,
};

/// Moves a value into a `static`, once.
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

// ── Pin / peripheral assignments ────────────────────────────────────────────

assign_resources! {
    pub Resources<'d> {
        display: DisplayResources<'d> {
            dc: GPIO15,
            rst: GPIO7,
            sck: GPIO4,
            cs: GPIO6,
            miso: GPIO16,
            mosi: GPIO5,
            spi: SPI2,
            dma: DMA_CH0,
        },
        backlight: BacklightResources<'d> {
            led: GPIO19,
        },
        buttons: ButtonResources<'d> {
            up: GPIO11,
            down: GPIO1,
            left: GPIO21,
            right: GPIO2,
            stick: GPIO14,
            a: GPIO13,
            b: GPIO38,
            start: GPIO12,
            select: GPIO45,
        },
    }
}

// ── Board initialisation ────────────────────────────────────────────────────

/// The ESP32-S3 has to pass through an intermediate PLL setting on the way
/// to the target frequency.
fn set_cpu_clock(cpu_clock_speed: CpuClock) {
    let period = match cpu_clock_speed {
        CpuClock::_80MHz => 0,
        CpuClock::_160MHz => 1,
        _ => 2,
    };
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .sysclk_conf()
        .modify(|_, w| unsafe { w.soc_clk_sel().bits(1) });
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .cpu_per_conf()
        .modify(|_, w| unsafe {
            let _ = w.pll_freq_sel().set_bit();
            w.cpuperiod_sel().bits(period)
        });

    rom::ets_update_cpu_frequency_rom(cpu_clock_speed.frequency().as_mhz());
}

/// Brings up clocks and returns the raw peripherals.
///
/// Call once at the top of `main`, then split with [`split_resources!`](crate::split_resources).
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    set_cpu_clock(CpuClock::_160MHz);
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}

impl From<esp_hal::peripherals::Peripherals> for Resources<'_> {
    fn from(peripherals: esp_hal::peripherals::Peripherals) -> Self {
        split_resources!(peripherals)
    }
}

/// Lights the backlight; it stays lit while the returned pin is alive.
pub fn backlight(res: BacklightResources<'static>) -> Output<'static> {
    Output::new(res.led, Level::High, OutputConfig::default())
}
