use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub name: String,
    pub message: String,
    /// Display string, stamped server-side as `HH:MM on DD Month YYYY`.
    pub time: String,
}

#[derive(Debug, Deserialize)]
pub struct NoteForm {
    pub fname: String,
    pub fmessage: String,
}
