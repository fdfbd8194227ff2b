//! Input events delivered to the signature pad.
//!
//! The JSON form mirrors the DOM event names:
//!
//! ```json
//! [
//!   { "type": "pointerdown", "client_x": 10, "client_y": 10 },
//!   { "type": "touchmove", "touches": [{ "client_x": 50, "client_y": 10 }] },
//!   { "type": "pointerup" }
//! ]
//! ```

use crate::error::FirmaResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mouse or pen input in client (page) coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerInput {
    pub client_x: f32,
    pub client_y: f32,
}

impl PointerInput {
    pub fn new(client_x: f32, client_y: f32) -> Self {
        Self { client_x, client_y }
    }
}

/// One contact point of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub client_x: f32,
    pub client_y: f32,
}

/// Touch input; only the first touch point is ever used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchInput {
    pub touches: Vec<TouchPoint>,
}

impl TouchInput {
    pub fn single(client_x: f32, client_y: f32) -> Self {
        Self {
            touches: vec![TouchPoint { client_x, client_y }],
        }
    }

    pub fn first_touch(&self) -> Option<&TouchPoint> {
        self.touches.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputEvent {
    PointerDown(PointerInput),
    PointerMove(PointerInput),
    PointerUp(PointerInput),
    TouchStart(TouchInput),
    TouchMove(TouchInput),
    TouchEnd(TouchInput),
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::PointerDown(_) => EventKind::PointerDown,
            InputEvent::PointerMove(_) => EventKind::PointerMove,
            InputEvent::PointerUp(_) => EventKind::PointerUp,
            InputEvent::TouchStart(_) => EventKind::TouchStart,
            InputEvent::TouchMove(_) => EventKind::TouchMove,
            InputEvent::TouchEnd(_) => EventKind::TouchEnd,
        }
    }
}

/// Event type a listener is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    TouchStart,
    TouchMove,
    TouchEnd,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::PointerDown,
        EventKind::PointerMove,
        EventKind::PointerUp,
        EventKind::TouchStart,
        EventKind::TouchMove,
        EventKind::TouchEnd,
    ];

    /// DOM event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PointerDown => "pointerdown",
            EventKind::PointerMove => "pointermove",
            EventKind::PointerUp => "pointerup",
            EventKind::TouchStart => "touchstart",
            EventKind::TouchMove => "touchmove",
            EventKind::TouchEnd => "touchend",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EventScript {
    List(Vec<InputEvent>),
    Wrapped { events: Vec<InputEvent> },
}

/// Parse a recorded event sequence, either a bare array or `{"events": [...]}`.
pub fn parse_event_script(json: &str) -> FirmaResult<Vec<InputEvent>> {
    let script: EventScript = serde_json::from_str(json)?;
    Ok(match script {
        EventScript::List(events) => events,
        EventScript::Wrapped { events } => events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let events = parse_event_script(
            r#"[
                {"type": "pointerdown", "client_x": 10, "client_y": 10},
                {"type": "pointermove", "client_x": 50, "client_y": 10},
                {"type": "pointerup"}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            events,
            vec![
                InputEvent::PointerDown(PointerInput::new(10.0, 10.0)),
                InputEvent::PointerMove(PointerInput::new(50.0, 10.0)),
                InputEvent::PointerUp(PointerInput::default()),
            ]
        );
    }

    #[test]
    fn test_parse_wrapped_touch_events() {
        let events = parse_event_script(
            r#"{"events": [
                {"type": "touchstart", "touches": [{"client_x": 1, "client_y": 2}, {"client_x": 9, "client_y": 9}]},
                {"type": "touchend"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(events.len(), 2);
        match &events[0] {
            InputEvent::TouchStart(input) => {
                assert_eq!(input.touches.len(), 2);
                assert_eq!(
                    input.first_touch(),
                    Some(&TouchPoint {
                        client_x: 1.0,
                        client_y: 2.0
                    })
                );
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(events[1], InputEvent::TouchEnd(TouchInput::default()));
    }

    #[test]
    fn test_unknown_event_type() {
        assert!(parse_event_script(r#"[{"type": "wheel"}]"#).is_err());
    }

    #[test]
    fn test_kind_names() {
        let names: Vec<&str> = EventKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            [
                "pointerdown",
                "pointermove",
                "pointerup",
                "touchstart",
                "touchmove",
                "touchend"
            ]
        );
        assert_eq!(
            InputEvent::TouchMove(TouchInput::single(0.0, 0.0)).kind(),
            EventKind::TouchMove
        );
    }
}
