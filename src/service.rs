//! Business rules that sit between the routes and the `students` table.

use crate::{
    data::{
        DataType,
        student::{Student, StudentFields},
    },
    error::{EmailAlreadyExistsSnafu, MissingRequiredFieldsSnafu, MissingStudentSnafu, RosterResult},
    state::RosterState,
};
use serde::{Deserialize, Deserializer, Serialize};
use snafu::{OptionExt, ensure};
use sqlx::SqliteConnection;
use std::collections::HashSet;

const RECENT_STUDENTS: usize = 5;

/// Body of a create request. `null` and a missing key are the same thing here.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewStudentForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub major: Option<String>,
}

/// Body of a merge-patch update. The outer `Option` is whether the key was sent at all.
#[derive(Debug, Default, Deserialize)]
pub struct StudentChangesForm {
    #[serde(default, deserialize_with = "present")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub major: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn required(value: Option<String>) -> RosterResult<String> {
    value
        .filter(|value| !value.is_empty())
        .context(MissingRequiredFieldsSnafu)
}

async fn ensure_email_is_free(email: &str, conn: &mut SqliteConnection) -> RosterResult<()> {
    ensure!(
        Student::get_from_db_by_email(email, conn).await?.is_none(),
        EmailAlreadyExistsSnafu { email }
    );
    Ok(())
}

pub async fn create_student(state: &RosterState, form: NewStudentForm) -> RosterResult<Student> {
    let NewStudentForm {
        first_name,
        last_name,
        email,
        major,
    } = form;

    let fields = StudentFields {
        first_name: required(first_name)?,
        last_name: required(last_name)?,
        email: required(email)?,
        major,
    };

    let mut conn = state.get_connection().await?;
    ensure_email_is_free(&fields.email, &mut conn).await?;

    let student = Student::insert_into_database(fields, &mut conn).await?;
    info!(id = student.id, "Created student");
    Ok(student)
}

pub async fn get_student(state: &RosterState, id: i64) -> RosterResult<Student> {
    let mut conn = state.get_connection().await?;
    Student::get_from_db_by_id(id, &mut conn)
        .await?
        .context(MissingStudentSnafu { id })
}

pub async fn list_students(state: &RosterState) -> RosterResult<Vec<Student>> {
    Student::get_all(state).await
}

pub async fn update_student(
    state: &RosterState,
    id: i64,
    changes: StudentChangesForm,
) -> RosterResult<Student> {
    let mut conn = state.get_connection().await?;
    let existing = Student::get_from_db_by_id(id, &mut conn)
        .await?
        .context(MissingStudentSnafu { id })?;
    let mut fields = StudentFields::from(existing);

    if let Some(email) = changes.email {
        let email = required(email)?;
        if email != fields.email {
            ensure_email_is_free(&email, &mut conn).await?;
        }
        fields.email = email;
    }
    if let Some(first_name) = changes.first_name {
        fields.first_name = required(first_name)?;
    }
    if let Some(last_name) = changes.last_name {
        fields.last_name = required(last_name)?;
    }
    if let Some(major) = changes.major {
        fields.major = major;
    }

    let student = Student::update_in_database(id, fields, &mut conn)
        .await?
        .context(MissingStudentSnafu { id })?;
    info!(id, "Updated student");
    Ok(student)
}

pub async fn delete_student(state: &RosterState, id: i64) -> RosterResult<()> {
    let mut conn = state.get_connection().await?;
    ensure!(
        Student::remove_from_database(id, &mut conn).await?,
        MissingStudentSnafu { id }
    );
    info!(id, "Deleted student");
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct Stats {
    pub total_students: usize,
    pub total_majors: usize,
    /// Newest first.
    pub recent_students: Vec<Student>,
}

impl Stats {
    /// `students` must be in insertion order.
    pub fn from_students(mut students: Vec<Student>) -> Self {
        let total_students = students.len();
        let total_majors = students
            .iter()
            .filter_map(|student| student.major.as_deref())
            .filter(|major| !major.is_empty())
            .collect::<HashSet<_>>()
            .len();

        let recent_students = students
            .split_off(total_students.saturating_sub(RECENT_STUDENTS))
            .into_iter()
            .rev()
            .collect();

        Self {
            total_students,
            total_majors,
            recent_students,
        }
    }
}

pub async fn stats(state: &RosterState) -> RosterResult<Stats> {
    Ok(Stats::from_students(list_students(state).await?))
}
