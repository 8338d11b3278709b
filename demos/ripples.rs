//! Rippling grid on the badge display.
//!
//! The engine ticks every 40 ms. A, B, Start, Select and the stick click
//! cycle pattern, colours, transparency, oscillator and lights; holding the
//! D-pad tilts the view. Each frame is recorded into a display list so the
//! previous one can be erased line by line instead of clearing the panel.

#![no_std]
#![no_main]

use defmt::{
    info,
    warn,
};
use embassy_executor::Spawner;
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::Channel,
};
use embassy_time::{
    Duration,
    Ticker,
};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;
use ripples3d::{
    Canvas,
    Command,
    Config,
    DisplayList,
    Engine,
    GRID_LINES,
    board::{
        self,
        ButtonCommands,
        DpadTilt,
        SCREEN_SIZE,
        Surface,
    },
    mk_static,
    split_resources,
};
use static_cell::ConstStaticCell;

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

/// A clear plus two lines for every segment of the densest pattern.
const FRAME_PRIMITIVES: usize = Engine::<GRID_LINES>::MAX_PRIMITIVES;

type Frame = DisplayList<FRAME_PRIMITIVES>;

static FRAMES: ConstStaticCell<[Frame; 2]> = ConstStaticCell::new([Frame::new(), Frame::new()]);

static COMMANDS: Channel<CriticalSectionRawMutex, Command, 4> = Channel::new();

#[embassy_executor::task]
async fn button_task(buttons: &'static mut ButtonCommands) {
    info!("Button task started");
    loop {
        let command = buttons.next().await;
        info!("Command: {}", command);
        COMMANDS.send(command).await;
    }
}

#[embassy_executor::task]
async fn render_task(
    engine: &'static mut Engine,
    dpad: &'static DpadTilt,
    surface: &'static mut Surface<'static>,
    frames: &'static mut [Frame; 2],
) {
    let period = engine.config().tick_interval.to_millis();
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(period)));
    let [mut shown, mut next] = frames.each_mut();

    if surface.clear(engine.background()).is_err() {
        warn!("Display clear failed");
    }

    loop {
        while let Ok(command) = COMMANDS.try_receive() {
            engine.apply(command);
        }
        engine.tick(dpad.sample());

        next.reset();
        if engine.render(next).is_err() {
            warn!("Frame truncated at {} primitives", FRAME_PRIMITIVES);
        }
        if shown.erase(surface, engine.background()).is_err() || next.replay(surface).is_err() {
            warn!("Display write failed");
        }
        core::mem::swap(&mut shown, &mut next);

        ticker.next().await;
    }
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = board::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 64 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let _backlight = board::backlight(resources.backlight);
    let surface = mk_static!(Surface<'static>, resources.display.into());

    let (commands, dpad) = board::Buttons::from(resources.buttons).split();
    let commands = mk_static!(ButtonCommands, commands);
    let dpad = mk_static!(DpadTilt, dpad);

    let config = Config::default().with_screen(SCREEN_SIZE);
    let engine = match Engine::new(config) {
        Ok(engine) => mk_static!(Engine, engine),
        Err(e) => defmt::panic!("Invalid configuration: {}", e),
    };

    spawner.must_spawn(button_task(commands));
    spawner.must_spawn(render_task(engine, dpad, surface, FRAMES.take()));

    loop {
        embassy_time::Timer::after(Duration::from_secs(600)).await;
    }
}
