//! Command surface for the layout core. Commands arrive as serde_json
//! payloads from whatever front end drives the manager (key bindings, a
//! control socket); this module evaluates selectors and dispatches into the
//! engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::layout_engine::LayoutEngine;
use crate::sys::window_server::WindowServer;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case", tag = "command")]
pub enum WmCommand {
    /// `set-layout <screen> [<selector>]` — rebind the layout of the
    /// screen's selected tags. Without a selector the current layout is
    /// re-applied and re-persisted.
    SetLayout {
        screen: usize,
        #[serde(default)]
        selector: Option<String>,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("unknown screen {0}")]
    UnknownScreen(usize),
    #[error("invalid layout selector `{0}`")]
    InvalidSelector(String),
    #[error("malformed command payload: {0}")]
    MalformedPayload(String),
}

impl WmCommand {
    pub fn from_json(payload: &str) -> Result<Self, CommandError> {
        serde_json::from_str(payload).map_err(|e| CommandError::MalformedPayload(e.to_string()))
    }
}

/// Evaluate a layout selector against the current registry index. Signed
/// forms (`"+1"`, `"-2"`) are increments; a bare number is an absolute
/// registry index, converted to the offset that reaches it.
pub fn resolve_layout_offset(selector: &str, current: usize) -> Result<i64, CommandError> {
    let trimmed = selector.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| CommandError::InvalidSelector(selector.to_string()))?;
    if trimmed.starts_with('+') || trimmed.starts_with('-') {
        Ok(value)
    } else {
        Ok(value - current as i64)
    }
}

pub fn dispatch<S: WindowServer>(
    engine: &mut LayoutEngine<S>,
    command: &WmCommand,
) -> Result<(), CommandError> {
    debug!(?command, "dispatching command");
    match command {
        WmCommand::SetLayout { screen, selector } => {
            let id = engine.screen_id(*screen).ok_or(CommandError::UnknownScreen(*screen))?;
            let offset = match selector {
                None => None,
                Some(selector) => {
                    let current = engine.screen(id).map_or(0, |s| s.current_layout_index());
                    Some(resolve_layout_offset(selector, current)?)
                }
            };
            engine.set_layout(id, offset);
            Ok(())
        }
    }
}
