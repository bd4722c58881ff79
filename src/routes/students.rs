use crate::{
    data::student::Student,
    error::RosterResult,
    extract::{LenientJson, StudentId},
    service::{self, NewStudentForm, StudentChangesForm},
    state::RosterState,
};
use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

pub async fn get_student(
    State(state): State<RosterState>,
    StudentId(id): StudentId,
) -> RosterResult<Json<Student>> {
    service::get_student(&state, id).await.map(Json)
}

pub async fn post_student(
    State(state): State<RosterState>,
    LenientJson(form): LenientJson<NewStudentForm>,
) -> RosterResult<(StatusCode, Json<Student>)> {
    let student = service::create_student(&state, form).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn update_student(
    State(state): State<RosterState>,
    StudentId(id): StudentId,
    LenientJson(changes): LenientJson<StudentChangesForm>,
) -> RosterResult<Json<Student>> {
    service::update_student(&state, id, changes).await.map(Json)
}

pub async fn delete_student(
    State(state): State<RosterState>,
    StudentId(id): StudentId,
) -> RosterResult<Json<Value>> {
    service::delete_student(&state, id).await?;
    Ok(Json(json!({"result": "deleted"})))
}
