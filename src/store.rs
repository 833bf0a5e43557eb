use diesel::prelude::*;
use diesel::{pg::PgConnection, r2d2::ConnectionManager};
use std::time::SystemTime;

use crate::{
    errors::ServerError,
    models::note::{Note, NoteInput, Position},
    schema::notes,
};

#[cfg(test)]
pub mod memory;

pub type Pool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Persistence for the board. Mutations report how many rows they touched
/// so callers can tell a no-op from a write.
pub trait NoteStore: Send + Sync {
    /// All notes, most recently updated first.
    fn list(&self) -> Result<Vec<Note>, ServerError>;

    /// Inserts a note at the board origin.
    fn create(&self, note: NoteInput) -> Result<Note, ServerError>;

    /// Replaces title, body and color, and bumps `updated_at`.
    fn update(&self, note_id: i32, note: NoteInput) -> Result<usize, ServerError>;

    fn delete(&self, note_id: i32) -> Result<usize, ServerError>;

    /// Writes the position only. `updated_at` is left alone so dragging
    /// never reorders the board.
    fn move_to(&self, note_id: i32, position: Position) -> Result<usize, ServerError>;
}

pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    pub fn new(pool: Pool) -> Self {
        PgStore { pool }
    }
}

impl NoteStore for PgStore {
    fn list(&self) -> Result<Vec<Note>, ServerError> {
        let mut connection = self.pool.get()?;

        let result = notes::table
            .order((notes::updated_at.desc(), notes::id.desc()))
            .load::<Note>(&mut connection)?;
        Ok(result)
    }

    fn create(&self, note: NoteInput) -> Result<Note, ServerError> {
        let mut connection = self.pool.get()?;

        let result = diesel::insert_into(notes::table)
            .values((
                notes::title.eq(note.title),
                notes::body.eq(note.body),
                notes::color.eq(note.color.as_str()),
                notes::updated_at.eq(SystemTime::now()),
            ))
            .get_result::<Note>(&mut connection)?;
        Ok(result)
    }

    fn update(&self, note_id: i32, note: NoteInput) -> Result<usize, ServerError> {
        let mut connection = self.pool.get()?;

        let affected = diesel::update(notes::table.find(note_id))
            .set((
                notes::title.eq(note.title),
                notes::body.eq(note.body),
                notes::color.eq(note.color.as_str()),
                notes::updated_at.eq(SystemTime::now()),
            ))
            .execute(&mut connection)?;
        Ok(affected)
    }

    fn delete(&self, note_id: i32) -> Result<usize, ServerError> {
        let mut connection = self.pool.get()?;

        let affected = diesel::delete(notes::table.find(note_id)).execute(&mut connection)?;
        Ok(affected)
    }

    fn move_to(&self, note_id: i32, position: Position) -> Result<usize, ServerError> {
        let mut connection = self.pool.get()?;

        let affected = diesel::update(notes::table.find(note_id))
            .set((notes::pos_x.eq(position.x), notes::pos_y.eq(position.y)))
            .execute(&mut connection)?;
        Ok(affected)
    }
}
