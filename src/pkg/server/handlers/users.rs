use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::{
    pkg::{
        internal::{
            adaptors::users::{selectors::UserSelector, spec::UserOut},
            token::Identity,
        },
        server::state::AppState,
    },
    prelude::{Error, Result},
};

pub async fn list(
    State(state): State<AppState>,
    Extension(_identity): Extension<Arc<Identity>>,
) -> Result<Json<Vec<UserOut>>> {
    let mut conn = state.db_pool.acquire().await?;
    let users = UserSelector::new(&mut conn).get_all().await?;
    Ok(Json(users.into_iter().map(UserOut::from).collect()))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Extension(_identity): Extension<Arc<Identity>>,
    Path(id): Path<i32>,
) -> Result<Json<UserOut>> {
    let mut conn = state.db_pool.acquire().await?;
    let user = UserSelector::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or(Error::NotFound)?;
    Ok(Json(user.into()))
}
