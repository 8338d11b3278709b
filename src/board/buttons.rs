//! The nine badge buttons, as mode commands and a synthetic tilt.
//!
//! The badge has no accelerometer. The D-pad leans the view point away from
//! its resting orientation while held; the other five buttons each cycle one
//! mode.

use embassy_futures::select::select_array;
use embassy_time::{
    Duration,
    Timer,
};
use esp_hal::gpio::{
    Input,
    InputConfig,
    Pull,
};

use super::ButtonResources;
use crate::{
    modes::Command,
    sampler::{
        STEADY_ATTRACTOR,
        TiltSample,
    },
};

const DEBOUNCE_MS: u64 = 20;

/// Milli-g added per held D-pad direction.
const DPAD_LEAN: i16 = 450;

/// One button and the level it reads while pressed.
pub struct Key {
    input: Input<'static>,
    active_high: bool,
}

impl Key {
    fn pulled_up(pin: impl esp_hal::gpio::InputPin + 'static) -> Self {
        Self {
            input: Input::new(pin, InputConfig::default().with_pull(Pull::Up)),
            active_high: false,
        }
    }

    fn pulled_down(pin: impl esp_hal::gpio::InputPin + 'static) -> Self {
        Self {
            input: Input::new(pin, InputConfig::default().with_pull(Pull::Down)),
            active_high: true,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.input.is_high() == self.active_high
    }

    async fn edge(&mut self, pressing: bool) {
        if pressing == self.active_high {
            self.input.wait_for_rising_edge().await;
        } else {
            self.input.wait_for_falling_edge().await;
        }
    }

    /// Waits for a debounced press.
    pub async fn pressed(&mut self) {
        loop {
            self.edge(true).await;
            Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
            if self.is_pressed() {
                return;
            }
        }
    }

    /// Waits for a debounced release.
    pub async fn released(&mut self) {
        loop {
            self.edge(false).await;
            Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
            if !self.is_pressed() {
                return;
            }
        }
    }
}

/// All nine badge buttons.
pub struct Buttons {
    pub up: Key,
    pub down: Key,
    pub left: Key,
    pub right: Key,
    pub stick: Key,
    pub a: Key,
    pub b: Key,
    pub start: Key,
    pub select: Key,
}

impl From<ButtonResources<'static>> for Buttons {
    fn from(res: ButtonResources<'static>) -> Self {
        Self {
            up: Key::pulled_up(res.up),
            down: Key::pulled_up(res.down),
            left: Key::pulled_up(res.left),
            right: Key::pulled_up(res.right),
            stick: Key::pulled_up(res.stick),
            a: Key::pulled_up(res.a),
            b: Key::pulled_up(res.b),
            start: Key::pulled_up(res.start),
            // Select is wired active high.
            select: Key::pulled_down(res.select),
        }
    }
}

impl Buttons {
    /// Separates the mode buttons from the D-pad so each can go to its own task.
    pub fn split(self) -> (ButtonCommands, DpadTilt) {
        (
            ButtonCommands {
                keys: [self.a, self.b, self.start, self.select, self.stick],
            },
            DpadTilt {
                up: self.up,
                down: self.down,
                left: self.left,
                right: self.right,
            },
        )
    }
}

/// A, B, Start, Select and the stick click, in that order.
const COMMANDS: [Command; 5] = [
    Command::CyclePattern,
    Command::CycleColorization,
    Command::CycleTransparency,
    Command::CycleOscillator,
    Command::CycleIllumination,
];

pub struct ButtonCommands {
    keys: [Key; 5],
}

impl ButtonCommands {
    /// Waits for the next full press and release and returns its command.
    pub async fn next(&mut self) -> Command {
        let (_, index) = select_array(self.keys.each_mut().map(|key| key.pressed())).await;
        self.keys[index].released().await;
        COMMANDS[index]
    }
}

/// The D-pad read as a tilt sensor.
pub struct DpadTilt {
    up: Key,
    down: Key,
    left: Key,
    right: Key,
}

impl DpadTilt {
    /// A reading while any direction is held, `None` otherwise.
    pub fn sample(&self) -> Option<TiltSample> {
        let lean = |plus: &Key, minus: &Key| match (plus.is_pressed(), minus.is_pressed()) {
            (true, false) => DPAD_LEAN,
            (false, true) => -DPAD_LEAN,
            _ => 0,
        };
        let x = lean(&self.right, &self.left);
        let y = lean(&self.down, &self.up);
        if x == 0 && y == 0 {
            return None;
        }
        Some(TiltSample::new(
            STEADY_ATTRACTOR.x.saturating_add(x),
            STEADY_ATTRACTOR.y.saturating_add(y),
            STEADY_ATTRACTOR.z,
        ))
    }
}
