use serde_derive::Deserialize;

use super::note::{Note, NoteInput, Position};
use crate::errors::{CommonError, Fields, ServerError};
use crate::store::NoteStore;

/// Raw fields of a board form post. Every field is optional here; the
/// command decides what it needs.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BoardForm {
    pub csrf: Option<String>,
    pub action: Option<String>,
    pub id: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub color: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Create(NoteInput),
    Update { id: i32, note: NoteInput },
    Delete { id: i32 },
    Move { id: i32, position: Position },
}

/// What a command did to the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    Created(Note),
    Updated { id: i32, found: bool },
    Deleted { id: i32, found: bool },
    Moved { id: i32, position: Position, found: bool },
}

impl Command {
    /// `Ok(None)` means the action is absent or unknown and nothing should
    /// be mutated.
    pub fn from_form(form: &BoardForm) -> Result<Option<Command>, ServerError> {
        let command = match form.action.as_deref() {
            Some("create") => Command::Create(note_input(form)?),
            Some("update") => Command::Update {
                id: integer(&form.id, Fields::Id)?,
                note: note_input(form)?,
            },
            Some("delete") => Command::Delete {
                id: integer(&form.id, Fields::Id)?,
            },
            Some("move") => Command::Move {
                id: integer(&form.id, Fields::Id)?,
                position: Position {
                    x: integer(&form.x, Fields::X)?,
                    y: integer(&form.y, Fields::Y)?,
                },
            },
            _ => return Ok(None),
        };

        Ok(Some(command))
    }

    pub fn apply(self, store: &dyn NoteStore) -> Result<Applied, ServerError> {
        match self {
            Command::Create(note) => Ok(Applied::Created(store.create(note)?)),
            Command::Update { id, note } => Ok(Applied::Updated {
                id,
                found: store.update(id, note)? > 0,
            }),
            Command::Delete { id } => Ok(Applied::Deleted {
                id,
                found: store.delete(id)? > 0,
            }),
            Command::Move { id, position } => Ok(Applied::Moved {
                id,
                position,
                found: store.move_to(id, position)? > 0,
            }),
        }
    }
}

fn note_input(form: &BoardForm) -> Result<NoteInput, ServerError> {
    let title = form
        .title
        .as_deref()
        .ok_or(ServerError::UserError(Fields::Title(CommonError::Missing)))?;
    let body = form
        .body
        .as_deref()
        .ok_or(ServerError::UserError(Fields::Body(CommonError::Missing)))?;

    Ok(NoteInput::new(title, body, form.color.as_deref()))
}

fn integer(raw: &Option<String>, field: fn(CommonError) -> Fields) -> Result<i32, ServerError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Err(ServerError::UserError(field(CommonError::Missing))),
        Some(value) => value
            .parse::<i32>()
            .map_err(|_| ServerError::UserError(field(CommonError::NotAnInteger))),
    }
}
