//! Team directory route handlers.
//!
//! Each row of the table cycles between view and edit mode independently:
//! every handler here performs exactly one repository operation and answers
//! with the fragment that replaces the row (or the whole `<tbody>` for search).

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State, rejection::FormRejection},
    response::Html,
    routing::{delete, get, post},
};
use serde::Deserialize;
use tracing::instrument;

use naturalle_core::{UserId, UserStatus};

use crate::{
    db::UserRepository,
    error::AppError,
    models::{UserFields, UserRecord},
    state::AppState,
};

// =============================================================================
// Query Parameters
// =============================================================================

/// Query parameters for `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

// =============================================================================
// View Types
// =============================================================================

/// One entry of the status `<select>` in edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusOption {
    pub value: &'static str,
    pub selected: bool,
}

/// User view for templates.
#[derive(Debug, Clone)]
pub struct UserRowView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    /// Avatar letter.
    pub initial: String,
    pub badge_class: &'static str,
    pub status_options: Vec<StatusOption>,
}

impl From<&UserRecord> for UserRowView {
    fn from(user: &UserRecord) -> Self {
        let known = user.known_status();

        Self {
            id: user.id.as_i64(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            status: user.status.clone(),
            initial: avatar_initial(&user.name),
            badge_class: badge_class(known),
            status_options: UserStatus::ALL
                .iter()
                .map(|s| StatusOption {
                    value: s.as_str(),
                    selected: known == Some(*s),
                })
                .collect(),
        }
    }
}

/// Badge colors: green for active, red for inactive, yellow otherwise.
const fn badge_class(status: Option<UserStatus>) -> &'static str {
    match status {
        Some(UserStatus::Active) => "bg-green-100 text-green-700",
        Some(UserStatus::Inactive) => "bg-red-100 text-red-700",
        Some(UserStatus::Pending) | None => "bg-yellow-100 text-yellow-700",
    }
}

fn avatar_initial(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map_or_else(|| "?".to_string(), |c| c.to_uppercase().collect())
}

// =============================================================================
// Templates
// =============================================================================

/// Full page: shell plus the initial row collection.
#[derive(Template)]
#[template(path = "users/index.html")]
pub struct UsersIndexTemplate {
    pub users: Vec<UserRowView>,
}

/// Row collection partial (for HTMX search updates).
#[derive(Template)]
#[template(path = "users/_rows.html")]
pub struct UserRowsTemplate {
    pub users: Vec<UserRowView>,
}

/// Single row in view mode.
#[derive(Template)]
#[template(path = "users/_row.html")]
pub struct UserRowTemplate {
    pub user: UserRowView,
}

/// Single row in edit mode.
#[derive(Template)]
#[template(path = "users/_edit_row.html")]
pub struct UserEditRowTemplate {
    pub user: UserRowView,
}

impl UserRowTemplate {
    fn from_record(user: &UserRecord) -> Self {
        Self { user: user.into() }
    }
}

fn rows(users: &[UserRecord]) -> Vec<UserRowView> {
    users.iter().map(UserRowView::from).collect()
}

fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

// =============================================================================
// Handlers
// =============================================================================

/// Full directory page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let users = UserRepository::new(state.pool()).list_all().await?;

    render(&UsersIndexTemplate { users: rows(&users) })
}

/// Search-as-you-type: replaces the whole row collection.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>, AppError> {
    let delay = state.search_delay();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let q = query.q.unwrap_or_default();
    let users = UserRepository::new(state.pool()).find_matching(&q).await?;
    tracing::debug!(query = %q, matches = users.len(), "Directory search");

    render(&UserRowsTemplate { users: rows(&users) })
}

/// Quick add: inserts a placeholder user and returns its row.
#[instrument(skip(state))]
pub async fn create_dummy(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let user = UserRepository::new(state.pool())
        .create(&UserFields::quick_add())
        .await?;
    tracing::info!(user_id = %user.id, "Quick-added user");

    render(&UserRowTemplate::from_record(&user))
}

/// Switch a row to edit mode.
#[instrument(skip(state))]
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Html<String>, AppError> {
    let user = UserRepository::new(state.pool())
        .get_by_id(id)
        .await
        .map_err(|e| AppError::for_user(e, id))?;

    render(&UserEditRowTemplate {
        user: (&user).into(),
    })
}

/// Leave edit mode, discarding unsaved input.
#[instrument(skip(state))]
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Html<String>, AppError> {
    let user = UserRepository::new(state.pool())
        .get_by_id(id)
        .await
        .map_err(|e| AppError::for_user(e, id))?;

    render(&UserRowTemplate::from_record(&user))
}

/// Save an edited row. All four fields must be present in the form.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    form: Result<Form<UserFields>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(fields) = form.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let user = UserRepository::new(state.pool())
        .update(id, &fields)
        .await
        .map_err(|e| AppError::for_user(e, id))?;
    tracing::info!(user_id = %id, status = %user.status, "Updated user");

    render(&UserRowTemplate::from_record(&user))
}

/// Delete a user. The empty body makes HTMX drop the row.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Html<&'static str>, AppError> {
    UserRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(|e| AppError::for_user(e, id))?;
    tracing::info!(user_id = %id, "Deleted user");

    Ok(Html(""))
}

// =============================================================================
// Router
// =============================================================================

/// Directory routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/search", get(search))
        .route("/create_dummy", post(create_dummy))
        .route("/edit/{id}", get(edit))
        .route("/cancel/{id}", get(cancel))
        .route("/update/{id}", post(update))
        .route("/delete/{id}", delete(remove))
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::config::AdminConfig;
    use crate::db;

    fn record(id: i64, name: &str, status: &str) -> UserRecord {
        UserRecord {
            id: UserId::new(id),
            name: name.to_string(),
            email: format!("{}@naturalle.com", name.to_lowercase()),
            role: "Dev".to_string(),
            status: status.to_string(),
        }
    }

    async fn test_app() -> (Router, AppState) {
        let pool = db::create_memory_pool().await.unwrap();
        db::migrate(&pool).await.unwrap();
        UserRepository::new(&pool).seed_if_empty().await.unwrap();
        let config = AdminConfig::from_lookup(|_| None).unwrap();
        let state = AppState::new(config, pool);
        (router().with_state(state.clone()), state)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn id_of(state: &AppState, query: &str) -> UserId {
        UserRepository::new(state.pool())
            .find_matching(query)
            .await
            .unwrap()
            .remove(0)
            .id
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    #[test]
    fn test_badge_variants() {
        assert!(UserRowView::from(&record(1, "Ana", "Ativo")).badge_class.contains("green"));
        assert!(UserRowView::from(&record(1, "Ana", "Inativo")).badge_class.contains("red"));
        assert!(UserRowView::from(&record(1, "Ana", "Pendente")).badge_class.contains("yellow"));
        assert!(UserRowView::from(&record(1, "Ana", "Férias")).badge_class.contains("yellow"));
    }

    #[test]
    fn test_avatar_initial() {
        assert_eq!(avatar_initial("joão"), "J");
        assert_eq!(avatar_initial("  Ágata"), "Á");
        assert_eq!(avatar_initial(""), "?");
    }

    #[test]
    fn test_view_row_markup() {
        let html = UserRowTemplate::from_record(&record(7, "Maria", "Inativo"))
            .render()
            .unwrap();

        assert!(html.contains(r#"id="user-7""#));
        assert!(html.contains(r#"hx-get="/edit/7""#));
        assert!(html.contains(r#"hx-delete="/delete/7""#));
        assert!(html.contains("Deletar Maria do banco?"));
        assert!(html.contains("bg-red-100 text-red-700"));
    }

    #[test]
    fn test_edit_row_preselects_current_status() {
        let html = UserEditRowTemplate {
            user: (&record(3, "Carlos", "Inativo")).into(),
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"<option value="Inativo" selected>"#));
        assert!(html.contains(r#"<option value="Ativo">"#));
        assert!(html.contains(r#"<option value="Pendente">"#));
        assert!(html.contains(r#"hx-post="/update/3""#));
        assert!(html.contains(r#"hx-get="/cancel/3""#));
        assert!(html.contains(r#"hx-include="closest tr""#));
    }

    #[test]
    fn test_markup_is_escaped() {
        let mut user = record(1, "x", "Ativo");
        user.name = r#"<script>alert("x")</script>"#.to_string();
        let html = UserRowTemplate::from_record(&user).render().unwrap();

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&#60;script&#62;alert(&#34;x&#34;)"));
        assert!(html.contains("Deletar &#60;script&#62;"));
    }

    #[test]
    fn test_quote_cannot_break_out_of_input_value() {
        let mut user = record(1, "x", "Ativo");
        user.email = r#"a" onfocus="alert(1)"#.to_string();
        let html = UserEditRowTemplate { user: (&user).into() }
            .render()
            .unwrap();

        assert!(!html.contains(r#"onfocus="alert"#));
        assert!(html.contains(r#"value="a&#34; onfocus=&#34;alert(1)""#));
    }

    #[test]
    fn test_edit_row_unknown_status_selects_nothing() {
        let html = UserEditRowTemplate {
            user: (&record(5, "Ana", "Férias")).into(),
        }
        .render()
        .unwrap();

        assert!(!html.contains(" selected"));
        for status in UserStatus::ALL {
            assert!(html.contains(&format!(r#"<option value="{status}">"#)));
        }
    }

    #[test]
    fn test_empty_collection_renders_placeholder() {
        let html = UserRowsTemplate { users: vec![] }.render().unwrap();
        assert!(html.contains("Nenhum registro no banco."));

        let html = UserRowsTemplate {
            users: rows(&[record(1, "Ana", "Ativo")]),
        }
        .render()
        .unwrap();
        assert!(!html.contains("Nenhum registro"));
    }

    // -------------------------------------------------------------------------
    // Handlers
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_index_lists_all_users() {
        let (app, _) = test_app().await;
        let (status, body) = send(app, get_req("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"id="tbody-users""#));
        assert!(body.contains("João Victor"));
        assert!(body.contains("Maria Silva"));
        assert!(body.contains("Carlos Dev"));
    }

    #[tokio::test]
    async fn test_search_filters_rows() {
        let (app, _) = test_app().await;
        let (status, body) = send(app, get_req("/search?q=vendas")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Maria Silva"));
        assert!(!body.contains("João Victor"));
        assert!(!body.contains("Carlos Dev"));
    }

    #[tokio::test]
    async fn test_search_without_query_returns_all() {
        let (app, _) = test_app().await;
        let (_, body) = send(app, get_req("/search")).await;

        assert_eq!(body.matches("<tr id=\"user-").count(), 3);
    }

    #[tokio::test]
    async fn test_search_waits_for_configured_delay() {
        let pool = db::create_memory_pool().await.unwrap();
        db::migrate(&pool).await.unwrap();
        let config = AdminConfig::from_lookup(|key| {
            (key == "NATURALLE_SEARCH_DELAY_MS").then(|| "50".to_string())
        })
        .unwrap();
        let app = router().with_state(AppState::new(config, pool));

        let started = std::time::Instant::now();
        let (status, body) = send(app, get_req("/search?q=x")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(started.elapsed() >= std::time::Duration::from_millis(50));
        assert!(body.contains("Nenhum registro no banco."));
    }

    #[tokio::test]
    async fn test_search_without_matches_shows_placeholder() {
        let (app, _) = test_app().await;
        let (status, body) = send(app, get_req("/search?q=ninguem")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Nenhum registro no banco."));
    }

    #[tokio::test]
    async fn test_create_dummy_returns_pending_row() {
        let (app, state) = test_app().await;
        let request = Request::post("/create_dummy").body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Novo Usuário"));
        assert!(body.contains("Pendente"));
        assert_eq!(
            UserRepository::new(state.pool()).count().await.unwrap(),
            4
        );
    }

    #[tokio::test]
    async fn test_edit_and_cancel_round_trip() {
        let (app, state) = test_app().await;
        let id = id_of(&state, "carlos").await;

        let (status, body) = send(app.clone(), get_req(&format!("/edit/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"name="name" value="Carlos Dev""#));

        let (status, body) = send(app, get_req(&format!("/cancel/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(&format!(r#"hx-get="/edit/{id}""#)));
        assert!(!body.contains("<input"));
    }

    #[tokio::test]
    async fn test_update_saves_and_renders_red_badge() {
        let (app, state) = test_app().await;
        let id = id_of(&state, "joao").await;
        let request = Request::post(format!("/update/{id}"))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(
                "name=Jo%C3%A3o+Victor&email=joao%40naturalle.com&role=Admin&status=Inativo",
            ))
            .unwrap();

        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("bg-red-100 text-red-700"));
        let saved = UserRepository::new(state.pool()).get_by_id(id).await.unwrap();
        assert_eq!(saved.status, "Inativo");
        assert_eq!(saved.name, "João Victor");
    }

    #[tokio::test]
    async fn test_update_missing_field_is_bad_request() {
        let (app, state) = test_app().await;
        let id = id_of(&state, "maria").await;
        let request = Request::post(format!("/update/{id}"))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=Maria"))
            .unwrap();

        let (status, _) = send(app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let unchanged = UserRepository::new(state.pool()).get_by_id(id).await.unwrap();
        assert_eq!(unchanged.status, "Inativo");
    }

    #[tokio::test]
    async fn test_delete_returns_empty_body() {
        let (app, state) = test_app().await;
        let id = id_of(&state, "maria").await;
        let request = Request::delete(format!("/delete/{id}"))
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
        assert_eq!(
            UserRepository::new(state.pool()).count().await.unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found_everywhere() {
        let (app, state) = test_app().await;
        let form = "name=a&email=b&role=c&status=Ativo";
        let requests = [
            get_req("/edit/999"),
            get_req("/cancel/999"),
            Request::post("/update/999")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
            Request::delete("/delete/999").body(Body::empty()).unwrap(),
        ];

        for request in requests {
            let (status, body) = send(app.clone(), request).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, "Not found: user 999");
        }
        assert_eq!(
            UserRepository::new(state.pool()).count().await.unwrap(),
            3
        );
    }
}
