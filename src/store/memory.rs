use std::sync::Mutex;
use std::time::{Duration, SystemTime};

use super::NoteStore;
use crate::{
    errors::ServerError,
    models::note::{Note, NoteInput, Position},
};

/// In-process store for handler tests. Timestamps come from a logical clock
/// so ordering is deterministic.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    notes: Vec<Note>,
    last_id: i32,
    tick: u64,
}

impl State {
    fn now(&mut self) -> SystemTime {
        self.tick += 1;
        SystemTime::UNIX_EPOCH + Duration::from_secs(self.tick)
    }
}

impl MemoryStore {
    pub fn count(&self) -> usize {
        self.state.lock().unwrap().notes.len()
    }

    pub fn get(&self, note_id: i32) -> Option<Note> {
        let state = self.state.lock().unwrap();
        state.notes.iter().find(|n| n.id == note_id).cloned()
    }
}

impl NoteStore for MemoryStore {
    fn list(&self) -> Result<Vec<Note>, ServerError> {
        let mut result = self.state.lock().unwrap().notes.clone();
        result.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(result)
    }

    fn create(&self, note: NoteInput) -> Result<Note, ServerError> {
        let mut state = self.state.lock().unwrap();
        state.last_id += 1;
        let created = Note {
            id: state.last_id,
            title: note.title,
            body: note.body,
            color: note.color.as_str().to_owned(),
            pos_x: 0,
            pos_y: 0,
            updated_at: state.now(),
        };
        state.notes.push(created.clone());
        Ok(created)
    }

    fn update(&self, note_id: i32, note: NoteInput) -> Result<usize, ServerError> {
        let mut state = self.state.lock().unwrap();
        let now = state.now();
        match state.notes.iter_mut().find(|n| n.id == note_id) {
            Some(row) => {
                row.title = note.title;
                row.body = note.body;
                row.color = note.color.as_str().to_owned();
                row.updated_at = now;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete(&self, note_id: i32) -> Result<usize, ServerError> {
        let mut state = self.state.lock().unwrap();
        let before = state.notes.len();
        state.notes.retain(|n| n.id != note_id);
        Ok(before - state.notes.len())
    }

    fn move_to(&self, note_id: i32, position: Position) -> Result<usize, ServerError> {
        let mut state = self.state.lock().unwrap();
        match state.notes.iter_mut().find(|n| n.id == note_id) {
            Some(row) => {
                row.pos_x = position.x;
                row.pos_y = position.y;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
