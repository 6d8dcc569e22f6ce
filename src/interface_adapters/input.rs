// Input devices: keyboard polling, on-screen touch buttons and scripted playback.

use crate::domain::ports::InputSource;
use crate::domain::{ControlMode, DriveIntent};
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    UpArrow,
    DownArrow,
    LeftArrow,
    RightArrow,
    Space,
}

/// Keys currently held down, polled once per tick.
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    held: HashSet<KeyCode>,
}

impl KeyboardInput {
    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    pub fn set(&mut self, key: KeyCode, down: bool) {
        if down {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }
}

impl InputSource for KeyboardInput {
    fn intent(&mut self) -> DriveIntent {
        // Left and right held together cancel out in the motion model.
        DriveIntent {
            accelerate: self.is_down(KeyCode::UpArrow),
            reverse: self.is_down(KeyCode::DownArrow),
            brake: self.is_down(KeyCode::Space),
            steer_left: self.is_down(KeyCode::LeftArrow),
            steer_right: self.is_down(KeyCode::RightArrow),
        }
    }
}

/// Toggle state of the on-screen driving buttons.
#[derive(Debug, Clone, Default)]
pub struct TouchPanel {
    accelerate: bool,
    reverse: bool,
    brake: bool,
    steer_left: bool,
    steer_right: bool,
}

impl TouchPanel {
    pub fn set_accelerate(&mut self, pressed: bool) {
        self.accelerate = pressed;
    }

    pub fn set_reverse(&mut self, pressed: bool) {
        self.reverse = pressed;
    }

    pub fn set_brake(&mut self, pressed: bool) {
        self.brake = pressed;
    }

    pub fn set_steer_left(&mut self, pressed: bool) {
        self.steer_left = pressed;
    }

    pub fn set_steer_right(&mut self, pressed: bool) {
        self.steer_right = pressed;
    }
}

impl InputSource for TouchPanel {
    fn intent(&mut self) -> DriveIntent {
        DriveIntent {
            accelerate: self.accelerate,
            reverse: self.reverse,
            brake: self.brake,
            steer_left: self.steer_left,
            // The left button wins when both steering buttons are down.
            steer_right: self.steer_right && !self.steer_left,
        }
    }
}

/// A run of ticks during which the same controls are held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "SegmentEntry")]
pub struct ScriptSegment {
    pub ticks: u32,
    pub intent: DriveIntent,
}

// Scene-file shape of a segment; unknown control names are rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SegmentEntry {
    ticks: u32,
    #[serde(default)]
    accelerate: bool,
    #[serde(default)]
    reverse: bool,
    #[serde(default)]
    brake: bool,
    #[serde(default)]
    steer_left: bool,
    #[serde(default)]
    steer_right: bool,
}

impl From<SegmentEntry> for ScriptSegment {
    fn from(entry: SegmentEntry) -> Self {
        Self {
            ticks: entry.ticks,
            intent: DriveIntent {
                accelerate: entry.accelerate,
                reverse: entry.reverse,
                brake: entry.brake,
                steer_left: entry.steer_left,
                steer_right: entry.steer_right,
            },
        }
    }
}

#[derive(Debug, Clone)]
enum Device {
    Keyboard(KeyboardInput),
    Touch(TouchPanel),
}

/// Replays a timeline of held controls through the vehicle's configured device.
///
/// Once the timeline runs out every control is released.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    device: Device,
    segments: Vec<ScriptSegment>,
    segment: usize,
    elapsed: u32,
}

impl ScriptedInput {
    pub fn new(mode: ControlMode, segments: Vec<ScriptSegment>) -> Self {
        let device = match mode {
            ControlMode::Keyboard => Device::Keyboard(KeyboardInput::default()),
            ControlMode::Touch => Device::Touch(TouchPanel::default()),
        };
        Self {
            device,
            segments,
            segment: 0,
            elapsed: 0,
        }
    }

    fn next_held(&mut self) -> DriveIntent {
        while let Some(current) = self.segments.get(self.segment) {
            if self.elapsed < current.ticks {
                self.elapsed += 1;
                return current.intent;
            }
            self.segment += 1;
            self.elapsed = 0;
        }
        DriveIntent::default()
    }
}

impl InputSource for ScriptedInput {
    fn intent(&mut self) -> DriveIntent {
        let held = self.next_held();
        match &mut self.device {
            Device::Keyboard(keyboard) => {
                keyboard.set(KeyCode::UpArrow, held.accelerate);
                keyboard.set(KeyCode::DownArrow, held.reverse);
                keyboard.set(KeyCode::Space, held.brake);
                keyboard.set(KeyCode::LeftArrow, held.steer_left);
                keyboard.set(KeyCode::RightArrow, held.steer_right);
                keyboard.intent()
            }
            Device::Touch(panel) => {
                panel.set_accelerate(held.accelerate);
                panel.set_reverse(held.reverse);
                panel.set_brake(held.brake);
                panel.set_steer_left(held.steer_left);
                panel.set_steer_right(held.steer_right);
                panel.intent()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both_steering() -> DriveIntent {
        DriveIntent {
            accelerate: true,
            steer_left: true,
            steer_right: true,
            ..DriveIntent::default()
        }
    }

    #[test]
    fn keyboard_maps_arrows_and_space() {
        let mut keyboard = KeyboardInput::default();
        keyboard.press(KeyCode::DownArrow);
        keyboard.press(KeyCode::RightArrow);
        let intent = keyboard.intent();
        assert!(intent.reverse && intent.steer_right);
        assert!(!intent.accelerate && !intent.brake && !intent.steer_left);

        keyboard.release(KeyCode::DownArrow);
        keyboard.press(KeyCode::Space);
        let intent = keyboard.intent();
        assert!(intent.brake && !intent.reverse);
    }

    #[test]
    fn touch_panel_prefers_left_steering() {
        let mut panel = TouchPanel::default();
        panel.set_steer_left(true);
        panel.set_steer_right(true);
        assert_eq!(panel.intent().steer_sign(), 1.0);

        panel.set_steer_left(false);
        assert_eq!(panel.intent().steer_sign(), -1.0);
    }

    #[test]
    fn script_plays_segments_in_order_then_releases() {
        let brake = DriveIntent {
            brake: true,
            ..DriveIntent::default()
        };
        let mut script = ScriptedInput::new(
            ControlMode::Keyboard,
            vec![
                ScriptSegment {
                    ticks: 2,
                    intent: both_steering(),
                },
                ScriptSegment {
                    ticks: 0,
                    intent: DriveIntent::default(),
                },
                ScriptSegment {
                    ticks: 1,
                    intent: brake,
                },
            ],
        );

        let played: Vec<DriveIntent> = (0..4).map(|_| script.intent()).collect();
        assert_eq!(played[0], both_steering());
        assert_eq!(played[1], both_steering());
        assert_eq!(played[2], brake);
        assert_eq!(played[3], DriveIntent::default());
    }

    #[test]
    fn touch_script_resolves_steering_through_the_panel() {
        let mut script = ScriptedInput::new(
            ControlMode::Touch,
            vec![ScriptSegment {
                ticks: 1,
                intent: both_steering(),
            }],
        );
        let intent = script.intent();
        assert!(intent.steer_left && !intent.steer_right);
    }

    #[test]
    fn segment_reads_controls_and_rejects_misspelled_ones() {
        let segment: ScriptSegment =
            toml::from_str("ticks = 3\nbrake = true\nsteer_right = true").expect("valid segment");
        assert_eq!(segment.ticks, 3);
        assert!(segment.intent.brake && segment.intent.steer_right);
        assert!(!segment.intent.accelerate);

        let typo = toml::from_str::<ScriptSegment>("ticks = 3\nacelerate = true");
        assert!(typo.is_err());
    }
}
