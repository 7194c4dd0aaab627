//! Input handling.
//!
//! In a windowed viewer this would be fed by keyboard and mouse events. The
//! headless viewer consumes the same commands from a script, one batch per
//! tick.

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Navigation keys held during a tick.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct NavKeys: u8 {
        const NONE = 0;
        const FORWARD = 1 << 0;
        const BACK = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const UP = 1 << 4;
        const DOWN = 1 << 5;
    }
}

impl Default for NavKeys {
    fn default() -> Self {
        Self::NONE
    }
}

impl NavKeys {
    /// Signed (forward, right, up) axes; opposing keys cancel.
    pub fn axes(self) -> (f32, f32, f32) {
        let axis = |pos: NavKeys, neg: NavKeys| -> f32 {
            let mut v = 0.0;
            if self.contains(pos) {
                v += 1.0;
            }
            if self.contains(neg) {
                v -= 1.0;
            }
            v
        };
        (
            axis(Self::FORWARD, Self::BACK),
            axis(Self::RIGHT, Self::LEFT),
            axis(Self::UP, Self::DOWN),
        )
    }
}

/// One input event for the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavCommand {
    /// Replaces the set of held keys.
    Keys(NavKeys),
    /// Mouse movement since the last event.
    MouseDelta { dx: f32, dy: f32 },
    /// Wheel rotation; positive zooms in.
    Wheel(f32),
    /// Switches between free flight and orbiting the look-at point.
    ToggleFixed,
}

/// A command scheduled for a specific tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub tick: u32,
    pub command: NavCommand,
}

/// Parses a JSON array of [`ScriptStep`]s.
pub fn script_from_json_str(s: &str) -> serde_json::Result<Vec<ScriptStep>> {
    serde_json::from_str(s)
}

/// Built-in session: fly forward, orbit the origin while zooming in, then
/// fly sideways while looking around.
pub fn orbit_and_fly_script(ticks: u32) -> Vec<ScriptStep> {
    let quarter = ticks / 4;
    let mut script = vec![ScriptStep {
        tick: 0,
        command: NavCommand::Keys(NavKeys::FORWARD),
    }];
    let at = |tick: u32, command: NavCommand| ScriptStep { tick, command };

    script.push(at(quarter, NavCommand::Keys(NavKeys::NONE)));
    script.push(at(quarter, NavCommand::ToggleFixed));
    for tick in quarter..2 * quarter {
        script.push(at(tick, NavCommand::MouseDelta { dx: 1.5, dy: 0.0 }));
        if tick % 10 == 0 {
            script.push(at(tick, NavCommand::Wheel(30.0)));
        }
    }
    script.push(at(2 * quarter, NavCommand::MouseDelta { dx: 0.0, dy: -0.5 }));
    script.push(at(3 * quarter, NavCommand::ToggleFixed));
    script.push(at(3 * quarter, NavCommand::Keys(NavKeys::RIGHT | NavKeys::UP)));
    for tick in 3 * quarter..ticks {
        script.push(at(tick, NavCommand::MouseDelta { dx: 0.5, dy: 0.2 }));
    }
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposing_keys_cancel() {
        assert_eq!((NavKeys::FORWARD | NavKeys::BACK).axes(), (0.0, 0.0, 0.0));
        assert_eq!((NavKeys::FORWARD | NavKeys::LEFT).axes(), (1.0, -1.0, 0.0));
        assert_eq!(NavKeys::DOWN.axes(), (0.0, 0.0, -1.0));
        assert_eq!(NavKeys::default().axes(), (0.0, 0.0, 0.0));
    }

    #[test]
    fn script_parses_all_commands() {
        let script = script_from_json_str(
            r#"[
                {"tick": 0, "command": {"keys": "FORWARD | UP"}},
                {"tick": 3, "command": {"mouse_delta": {"dx": 4.0, "dy": -2.0}}},
                {"tick": 5, "command": {"wheel": 120.0}},
                {"tick": 6, "command": "toggle_fixed"}
            ]"#,
        )
        .expect("parse");
        assert_eq!(script.len(), 4);
        assert_eq!(script[0].command, NavCommand::Keys(NavKeys::FORWARD | NavKeys::UP));
        assert_eq!(script[1].command, NavCommand::MouseDelta { dx: 4.0, dy: -2.0 });
        assert_eq!(script[2].tick, 5);
        assert_eq!(script[3].command, NavCommand::ToggleFixed);
    }

    #[test]
    fn builtin_script_stays_in_range() {
        let script = orbit_and_fly_script(120);
        assert!(script.iter().all(|s| s.tick < 120));
        let toggles = script
            .iter()
            .filter(|s| s.command == NavCommand::ToggleFixed)
            .count();
        assert_eq!(toggles, 2);
    }
}
