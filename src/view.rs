use serde::Serialize;
use tera::{Context, Tera};

use crate::{
    errors::ServerError,
    models::note::{Note, DEFAULT_COLOR},
};

const BOARD: &str = "board.html";

#[derive(Serialize)]
struct BoardPage<'a> {
    notes: &'a [Note],
    csrf: &'a str,
    default_color: &'static str,
}

pub struct View {
    tera: Tera,
}

impl View {
    pub fn new() -> Result<Self, ServerError> {
        let mut tera = Tera::default();
        tera.add_raw_template(BOARD, include_str!("../templates/board.html"))?;
        Ok(View { tera })
    }

    /// Renders the whole board page. Everything user supplied is escaped by
    /// the template; note bodies get `<br>` for newlines after escaping.
    pub fn board(&self, notes: &[Note], csrf: &str) -> Result<String, ServerError> {
        let context = Context::from_serialize(BoardPage {
            notes,
            csrf,
            default_color: DEFAULT_COLOR,
        })?;
        Ok(self.tera.render(BOARD, &context)?)
    }
}
