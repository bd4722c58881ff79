use crate::{
    data::student::Student,
    error::RosterResult,
    extract::StudentId,
    service::{self, Stats},
    state::RosterState,
};
use axum::{Json, extract::State};
use serde_json::{Value, json};

pub async fn get_all_students(State(state): State<RosterState>) -> RosterResult<Json<Vec<Student>>> {
    service::list_students(&state).await.map(Json)
}

pub async fn delete_student(
    State(state): State<RosterState>,
    StudentId(id): StudentId,
) -> RosterResult<Json<Value>> {
    service::delete_student(&state, id).await?;
    Ok(Json(json!({"message": "Student deleted successfully"})))
}

pub async fn get_stats(State(state): State<RosterState>) -> RosterResult<Json<Stats>> {
    service::stats(&state).await.map(Json)
}
