//! Scripted pointer sessions.
//!
//! A session is a TOML file describing the surface origin and an ordered list
//! of pointer events. Replaying it drives a [`DiagramController`] exactly like
//! a live pointer would, so the rendered SVG shows the resulting scene.
//!
//! ```toml
//! [surface]
//! origin_x = 0.0
//! origin_y = 0.0
//!
//! [[event]]
//! kind = "down"
//! x = 600.0
//! y = 150.0
//!
//! [[event]]
//! kind = "up"
//! x = 600.0
//! y = 150.0
//! ```
//!
//! Events without a `node` are hit-tested against the current node boxes.

use std::{fs, path::Path};

use log::{debug, info, warn};
use serde::Deserialize;

use pipeviz::{
    PipevizError,
    controller::{DiagramController, Effect, PointerEvent, Surface},
    geometry::Point,
    render::is_outstanding,
};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct SurfaceSection {
    origin_x: f32,
    origin_y: f32,
}

/// One scripted pointer event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ScriptedEvent {
    Down {
        x: f32,
        y: f32,
        #[serde(default)]
        node: Option<String>,
    },
    Move { x: f32, y: f32 },
    Up {
        x: f32,
        y: f32,
        #[serde(default)]
        node: Option<String>,
    },
    Leave,
}

/// A parsed pointer session.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    #[serde(default)]
    surface: SurfaceSection,
    #[serde(default, rename = "event")]
    events: Vec<ScriptedEvent>,
}

impl Session {
    /// Parse a session from TOML source.
    ///
    /// # Errors
    ///
    /// Returns `PipevizError::Script` carrying the source and the span of the
    /// offending input when the TOML is malformed or an event is invalid.
    pub fn parse(src: &str) -> Result<Self, PipevizError> {
        toml::from_str(src)
            .map_err(|err| PipevizError::new_script_error(err.message(), src, err.span()))
    }

    /// Read and parse a session file.
    ///
    /// # Errors
    ///
    /// Returns `PipevizError::Io` if the file cannot be read, or
    /// `PipevizError::Script` if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipevizError> {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading pointer session");
        let src = fs::read_to_string(path)?;
        Self::parse(&src)
    }

    pub fn events(&self) -> &[ScriptedEvent] {
        &self.events
    }
}

impl Surface for Session {
    fn origin(&self) -> Point {
        Point::new(self.surface.origin_x, self.surface.origin_y)
    }
}

/// Replay every event of `session` against `controller`.
///
/// Returns the effects in the order they were produced. A press that names
/// no node and hits nothing is skipped.
pub fn replay(controller: &mut DiagramController, session: &Session) -> Vec<Effect> {
    let mut effects = Vec::new();

    for (idx, scripted) in session.events().iter().enumerate() {
        let Some(event) = to_pointer_event(controller, session, scripted) else {
            warn!(event = idx; "Pointer press hit no node, skipping");
            continue;
        };

        debug!(event = idx, pointer_event:? = event; "Replaying pointer event");
        effects.extend(controller.handle_event(event, session));
    }

    info!(events = session.events().len(), effects = effects.len(); "Session replayed");
    effects
}

fn to_pointer_event(
    controller: &DiagramController,
    session: &Session,
    scripted: &ScriptedEvent,
) -> Option<PointerEvent> {
    let hit = |position: Point| {
        controller
            .hit_test(position.sub_point(session.origin()), is_outstanding)
            .map(str::to_string)
    };

    match scripted {
        ScriptedEvent::Down { x, y, node } => {
            let position = Point::new(*x, *y);
            let node = node.clone().or_else(|| hit(position))?;
            Some(PointerEvent::Down { node, position })
        }
        ScriptedEvent::Move { x, y } => Some(PointerEvent::Move {
            position: Point::new(*x, *y),
        }),
        ScriptedEvent::Up { x, y, node } => {
            let position = Point::new(*x, *y);
            let node = node.clone().or_else(|| hit(position));
            Some(PointerEvent::Up { node, position })
        }
        ScriptedEvent::Leave => Some(PointerEvent::Leave),
    }
}

#[cfg(test)]
mod tests {
    use pipeviz::{config::InteractionConfig, dataset};

    use super::*;

    fn controller() -> DiagramController {
        DiagramController::new(dataset::pipeline(), InteractionConfig::default())
    }

    #[test]
    fn test_parse_session() {
        let session = Session::parse(
            r#"
            [surface]
            origin_x = 10.0
            origin_y = 20.0

            [[event]]
            kind = "down"
            x = 620.0
            y = 170.0
            node = "kb"

            [[event]]
            kind = "leave"
            "#,
        )
        .unwrap();

        assert_eq!(session.origin(), Point::new(10.0, 20.0));
        assert_eq!(session.events().len(), 2);
        assert_eq!(
            session.events()[0],
            ScriptedEvent::Down {
                x: 620.0,
                y: 170.0,
                node: Some("kb".to_string())
            }
        );
        assert_eq!(session.events()[1], ScriptedEvent::Leave);
    }

    #[test]
    fn test_empty_session_defaults() {
        let session = Session::parse("").unwrap();
        assert_eq!(session.origin(), Point::default());
        assert!(session.events().is_empty());
    }

    #[test]
    fn test_unknown_event_kind() {
        let src = "[[event]]\nkind = \"tap\"\nx = 1.0\ny = 2.0\n";
        let err = Session::parse(src).unwrap_err();

        match err {
            PipevizError::Script { src: kept, .. } => assert_eq!(kept, src),
            other => panic!("expected script error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_toml_has_span() {
        let err = Session::parse("[[event]\nkind = \"down\"").unwrap_err();

        match err {
            PipevizError::Script { span, .. } => assert!(span.is_some()),
            other => panic!("expected script error, got {other:?}"),
        }
    }

    #[test]
    fn test_replay_click_toggles_business_mode() {
        let session = Session::parse(
            r#"
            [[event]]
            kind = "down"
            x = 600.0
            y = 150.0

            [[event]]
            kind = "up"
            x = 601.0
            y = 151.0
            "#,
        )
        .unwrap();

        let mut ctl = controller();
        let effects = replay(&mut ctl, &session);

        assert_eq!(effects[0], Effect::DragStarted("kb".to_string()));
        assert!(effects.contains(&Effect::ModeToggled {
            node: "kb".to_string(),
            business: true
        }));
        assert!(ctl.is_business("kb"));
        assert_eq!(ctl.dragging(), None);
    }

    #[test]
    fn test_replay_drag_respects_origin() {
        let session = Session::parse(
            r#"
            [surface]
            origin_x = 100.0
            origin_y = 50.0

            [[event]]
            kind = "down"
            x = 700.0
            y = 450.0

            [[event]]
            kind = "move"
            x = 740.0
            y = 470.0

            [[event]]
            kind = "up"
            x = 740.0
            y = 470.0
            "#,
        )
        .unwrap();

        let mut ctl = controller();
        replay(&mut ctl, &session);

        assert_eq!(
            ctl.node("agent").unwrap().position(),
            Point::new(620.0, 395.0)
        );
        assert!(!ctl.is_business("agent"));
    }

    #[test]
    fn test_replay_skips_press_on_empty_surface() {
        let session = Session::parse(
            r#"
            [[event]]
            kind = "down"
            x = 5.0
            y = 5.0

            [[event]]
            kind = "move"
            x = 50.0
            y = 50.0
            "#,
        )
        .unwrap();

        let mut ctl = controller();
        let effects = replay(&mut ctl, &session);

        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], Effect::Noop(_)));
    }
}
