use rusqlite::{params, Row};
use uuid::Uuid;

use crate::{
    db::{self, DB},
    errors::{Error, Result},
};

use super::Note;

impl<'a> TryFrom<&Row<'a>> for Note {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'a>) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            message: row.get(2)?,
            time: row.get(3)?,
        })
    }
}

/// `14:05 on 23 August 2026`
fn time_stamp() -> String {
    chrono::Local::now().format("%H:%M on %d %B %Y").to_string()
}

pub async fn list_notes(db: DB) -> Result<Vec<Note>> {
    db.call(|conn| {
        let notes = conn
            .prepare("SELECT id, name, message, time FROM notes")?
            .query_map([], |row| Note::try_from(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(notes)
    })
    .await
    .map_err(db::Error::from)
    .map_err(Error::from)
}

pub async fn create_note(name: String, message: String, db: DB) -> Result<Note> {
    let time = time_stamp();
    db.call(move |conn| {
        conn.query_row(
            r#"INSERT INTO notes (name, message, time) VALUES (?, ?, ?)
            RETURNING id, name, message, time"#,
            params![name, message, time],
            |row| Note::try_from(row),
        )
        .map_err(|e| e.into())
    })
    .await
    .map_err(db::Error::from)
    .map_err(Error::from)
}

pub async fn get_note(note_id: Uuid, db: DB) -> Result<Note> {
    db.call(move |conn| {
        let note = conn.query_row(
            "SELECT id, name, message, time FROM notes WHERE id = ?",
            params![note_id],
            |row| Note::try_from(row),
        )?;
        Ok(note)
    })
    .await
    .map_err(db::Error::from)
    .map_err(|e| db::Error::not_found_message(e, "Note not found"))
    .map_err(Error::from)
}

/// Full overwrite, no field merge; `time` is re-stamped to the edit moment.
pub async fn replace_note(note_id: Uuid, name: String, message: String, db: DB) -> Result<Note> {
    let time = time_stamp();
    db.call(move |conn| {
        conn.query_row(
            r#"UPDATE notes SET name = ?, message = ?, time = ?
            WHERE id = ?
            RETURNING id, name, message, time"#,
            params![name, message, time, note_id],
            |row| Note::try_from(row),
        )
        .map_err(|e| e.into())
    })
    .await
    .map_err(db::Error::from)
    .map_err(|e| db::Error::not_found_message(e, "Note not found"))
    .map_err(Error::from)
}

/// Deleting an id that is already gone is not an error.
pub async fn delete_note(note_id: Uuid, db: DB) -> Result<()> {
    db.call(move |conn| {
        conn.execute("DELETE FROM notes WHERE id = ?", params![note_id])?;
        Ok(())
    })
    .await
    .map_err(db::Error::from)
    .map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::init_test_db, errors::Result};

    #[tokio::test]
    async fn create_then_get_round_trip() -> Result<()> {
        let db = init_test_db().await?;

        let created = create_note("Alice".into(), "hi".into(), db.clone()).await?;
        let fetched = get_note(created.id, db).await?;

        assert_eq!(fetched.name, "Alice");
        assert_eq!(fetched.message, "hi");
        chrono::NaiveDateTime::parse_from_str(&fetched.time, "%H:%M on %d %B %Y")
            .expect("time should read HH:MM on DD Month YYYY");
        Ok(())
    }

    #[tokio::test]
    async fn replace_overwrites_everything() -> Result<()> {
        let db = init_test_db().await?;

        db.call(|conn| {
            conn.execute(
                "INSERT INTO notes (id, name, message, time) VALUES (uuid_blob('018f6138-5b4f-722d-97c5-29b927cedbd4'), 'Alice', 'hi', '12:00 on 01 January 2020')",
                [],
            )
            .unwrap();
            Ok(())
        })
        .await
        .unwrap();

        let id = uuid::uuid!("018f6138-5b4f-722d-97c5-29b927cedbd4");
        let replaced = replace_note(id, "Bob".into(), "bye".into(), db.clone()).await?;

        assert_eq!(replaced.name, "Bob");
        assert_eq!(replaced.message, "bye");
        assert_ne!(replaced.time, "12:00 on 01 January 2020");

        // the prior message is gone, not merged
        let fetched = get_note(id, db).await?;
        assert_eq!(fetched.message, "bye");
        Ok(())
    }

    #[tokio::test]
    async fn replace_missing_note_is_not_found() -> Result<()> {
        let db = init_test_db().await?;

        let result = replace_note(uuid::Uuid::new_v4(), "x".into(), "y".into(), db).await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_idempotent() -> Result<()> {
        let db = init_test_db().await?;

        let created = create_note("Alice".into(), "hi".into(), db.clone()).await?;

        delete_note(created.id, db.clone()).await?;
        delete_note(created.id, db.clone()).await?;

        let notes = list_notes(db).await?;
        assert!(notes.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn list_returns_all_notes() -> Result<()> {
        let db = init_test_db().await?;

        create_note("Alice".into(), "1".into(), db.clone()).await?;
        create_note("Bob".into(), "2".into(), db.clone()).await?;

        let notes = list_notes(db).await?;
        assert_eq!(notes.len(), 2);
        Ok(())
    }
}
