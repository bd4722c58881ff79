use crate::{
    data::DataType,
    error::{MakeQuerySnafu, RosterError, RosterResult},
};
use serde::Serialize;
use snafu::ResultExt;
use sqlx::{FromRow, Pool, Sqlite, SqliteConnection};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub major: Option<String>,
}

/// The mutable columns of a student, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub major: Option<String>,
}

impl From<Student> for StudentFields {
    fn from(
        Student {
            first_name,
            last_name,
            email,
            major,
            ..
        }: Student,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            major,
        }
    }
}

/// The engine's unique constraint on `email` is the last line against two writers racing past the pre-check.
fn write_error(source: sqlx::Error, email: &str) -> RosterError {
    match &source {
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            warn!(?email, "Unique constraint rejected duplicate email");
            RosterError::EmailAlreadyExists {
                email: email.to_string(),
            }
        }
        _ => RosterError::MakeQuery { source },
    }
}

impl Student {
    pub async fn get_from_db_by_email(
        email: &str,
        conn: &mut SqliteConnection,
    ) -> RosterResult<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, first_name, last_name, email, major FROM students WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(conn)
        .await
        .context(MakeQuerySnafu)
    }
}

impl DataType for Student {
    type Id = i64;
    type FormForAdding = StudentFields;

    async fn get_from_db_by_id(id: Self::Id, conn: &mut SqliteConnection) -> RosterResult<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, first_name, last_name, email, major FROM students WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .context(MakeQuerySnafu)
    }

    async fn get_all(pool: &Pool<Sqlite>) -> RosterResult<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, first_name, last_name, email, major FROM students ORDER BY id",
        )
        .fetch_all(pool)
        .await
        .context(MakeQuerySnafu)
    }

    async fn insert_into_database(
        to_be_added: Self::FormForAdding,
        conn: &mut SqliteConnection,
    ) -> RosterResult<Self> {
        let StudentFields {
            first_name,
            last_name,
            email,
            major,
        } = to_be_added;

        sqlx::query_as::<_, Self>(
            "INSERT INTO students (first_name, last_name, email, major) VALUES (?, ?, ?, ?) RETURNING id, first_name, last_name, email, major",
        )
        .bind(first_name)
        .bind(last_name)
        .bind(&email)
        .bind(major)
        .fetch_one(conn)
        .await
        .map_err(|source| write_error(source, &email))
    }

    async fn update_in_database(
        id: Self::Id,
        replacement: Self::FormForAdding,
        conn: &mut SqliteConnection,
    ) -> RosterResult<Option<Self>> {
        let StudentFields {
            first_name,
            last_name,
            email,
            major,
        } = replacement;

        sqlx::query_as::<_, Self>(
            "UPDATE students SET first_name = ?, last_name = ?, email = ?, major = ? WHERE id = ? RETURNING id, first_name, last_name, email, major",
        )
        .bind(first_name)
        .bind(last_name)
        .bind(&email)
        .bind(major)
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(|source| write_error(source, &email))
    }

    async fn remove_from_database(id: Self::Id, conn: &mut SqliteConnection) -> RosterResult<bool> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await
            .context(MakeQuerySnafu)?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RosterState;

    fn fields(first_name: &str, email: &str, major: Option<&str>) -> StudentFields {
        StudentFields {
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            email: email.to_string(),
            major: major.map(ToString::to_string),
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let state = RosterState::in_memory().await;
        let mut conn = state.get_connection().await.unwrap();

        let first = Student::insert_into_database(fields("Ada", "ada@x.com", Some("Math")), &mut conn)
            .await
            .unwrap();
        let second = Student::insert_into_database(fields("Alan", "alan@x.com", None), &mut conn)
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.major.as_deref(), Some("Math"));
        assert_eq!(second.major, None);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let state = RosterState::in_memory().await;
        let mut conn = state.get_connection().await.unwrap();

        let first = Student::insert_into_database(fields("Ada", "ada@x.com", None), &mut conn)
            .await
            .unwrap();
        assert!(Student::remove_from_database(first.id, &mut conn).await.unwrap());

        let second = Student::insert_into_database(fields("Ada", "ada@x.com", None), &mut conn)
            .await
            .unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn lookups_by_id_and_email() {
        let state = RosterState::in_memory().await;
        let mut conn = state.get_connection().await.unwrap();
        let ada = Student::insert_into_database(fields("Ada", "ada@x.com", None), &mut conn)
            .await
            .unwrap();

        assert_eq!(
            Student::get_from_db_by_id(ada.id, &mut conn).await.unwrap(),
            Some(ada.clone())
        );
        assert_eq!(Student::get_from_db_by_id(99, &mut conn).await.unwrap(), None);
        assert_eq!(
            Student::get_from_db_by_email("ada@x.com", &mut conn)
                .await
                .unwrap(),
            Some(ada)
        );
        assert_eq!(
            Student::get_from_db_by_email("ADA@x.com", &mut conn)
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn engine_rejects_duplicate_emails() {
        let state = RosterState::in_memory().await;
        let mut conn = state.get_connection().await.unwrap();
        Student::insert_into_database(fields("Ada", "ada@x.com", None), &mut conn)
            .await
            .unwrap();

        let err = Student::insert_into_database(fields("Imposter", "ada@x.com", None), &mut conn)
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::EmailAlreadyExists { .. }));
    }

    #[tokio::test]
    async fn engine_rejects_updating_to_a_taken_email() {
        let state = RosterState::in_memory().await;
        let mut conn = state.get_connection().await.unwrap();
        Student::insert_into_database(fields("Ada", "ada@x.com", None), &mut conn)
            .await
            .unwrap();
        let alan = Student::insert_into_database(fields("Alan", "alan@x.com", None), &mut conn)
            .await
            .unwrap();

        let err = Student::update_in_database(alan.id, fields("Alan", "ada@x.com", None), &mut conn)
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::EmailAlreadyExists { .. }));
        assert_eq!(
            Student::get_from_db_by_id(alan.id, &mut conn).await.unwrap(),
            Some(alan)
        );
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let state = RosterState::in_memory().await;
        let mut conn = state.get_connection().await.unwrap();

        assert_eq!(
            Student::update_in_database(4, fields("Nobody", "no@x.com", None), &mut conn)
                .await
                .unwrap(),
            None
        );
        assert!(!Student::remove_from_database(4, &mut conn).await.unwrap());
    }

    #[tokio::test]
    async fn get_all_is_in_insertion_order() {
        let state = RosterState::in_memory().await;
        {
            let mut conn = state.get_connection().await.unwrap();
            for (name, email) in [("C", "c@x.com"), ("A", "a@x.com"), ("B", "b@x.com")] {
                Student::insert_into_database(fields(name, email, None), &mut conn)
                    .await
                    .unwrap();
            }
        }

        let names: Vec<_> = Student::get_all(&state)
            .await
            .unwrap()
            .into_iter()
            .map(|student| student.first_name)
            .collect();
        assert_eq!(names, ["C", "A", "B"]);
    }
}
