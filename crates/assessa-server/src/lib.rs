//! assessa-server
//!
//! HTTP API in front of the assessment backend: admin entity management,
//! the assignment wizard, reviewer scoring, and personal views.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware as axum_mw;
use axum::routing::{delete, get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use routes::{
    assessment_tests, assessments, assignments, clubs, dashboard, directory, health, me, mini_clubs, mini_tests, options,
    positions, questions, roles, users, wizard,
};
use state::AppState;

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/options/{form}", get(options::form_options))
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/directory", get(directory::directory))
        // Entities
        .route("/clubs", get(clubs::list_clubs).post(clubs::create_club))
        .route(
            "/clubs/{name}",
            get(clubs::get_club).put(clubs::update_club).delete(clubs::delete_club),
        )
        .route(
            "/miniClubs",
            get(mini_clubs::list_mini_clubs).post(mini_clubs::create_mini_club),
        )
        .route(
            "/miniClubs/{name}",
            get(mini_clubs::get_mini_club)
                .put(mini_clubs::update_mini_club)
                .delete(mini_clubs::delete_mini_club),
        )
        .route(
            "/positions",
            get(positions::list_positions).post(positions::create_position),
        )
        .route(
            "/positions/{name}",
            get(positions::get_position)
                .put(positions::update_position)
                .delete(positions::delete_position),
        )
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{name}",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
        .route(
            "/questions",
            get(questions::list_questions).post(questions::create_question),
        )
        .route(
            "/questions/{name}",
            get(questions::get_question)
                .put(questions::update_question)
                .delete(questions::delete_question),
        )
        .route(
            "/miniTests",
            get(mini_tests::list_mini_tests).post(mini_tests::create_mini_test),
        )
        .route(
            "/miniTests/{name}",
            get(mini_tests::get_mini_test)
                .put(mini_tests::update_mini_test)
                .delete(mini_tests::delete_mini_test),
        )
        .route("/miniTests/{name}/form", get(mini_tests::mini_test_edit_form))
        .route(
            "/tests",
            get(assessment_tests::list_tests).post(assessment_tests::create_test),
        )
        .route(
            "/tests/{name}",
            get(assessment_tests::get_test)
                .put(assessment_tests::update_test)
                .delete(assessment_tests::delete_test),
        )
        .route("/tests/{name}/form", get(assessment_tests::test_edit_form))
        .route("/assignments", get(assignments::list_assignments))
        .route("/assignments/{id}", delete(assignments::delete_assignment))
        // Assignment wizard
        .route("/wizard", post(wizard::create_draft))
        .route("/wizard/{id}", get(wizard::get_draft).delete(wizard::discard_draft))
        .route("/wizard/{id}/test", post(wizard::choose_test))
        .route("/wizard/{id}/participants", post(wizard::choose_participants))
        .route("/wizard/{id}/questions", post(wizard::select_all_questions))
        .route("/wizard/{id}/questions/{slot}/toggle", post(wizard::toggle_question))
        .route("/wizard/{id}/questions/{slot}/reviewers", post(wizard::toggle_reviewer))
        .route("/wizard/{id}/questions/{slot}/all", post(wizard::select_all_reviewers))
        .route("/wizard/{id}/next", post(wizard::next_step))
        .route("/wizard/{id}/back", post(wizard::previous_step))
        .route("/wizard/{id}/summary", get(wizard::summary))
        .route("/wizard/{id}/submit", post(wizard::submit))
        .layer(axum_mw::from_fn(middleware::auth::require_admin))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me::get_me))
        .route("/me/assessments", get(me::my_assessment_list))
        .route("/assessments/{id}", get(assessments::open_assessment))
        .route("/assessments/{id}/scores", post(assessments::submit_scores))
        .route("/api/checkRole", post(roles::check_role))
        .route("/api/setRole", post(roles::set_role))
        .route("/api/reconcileRole", post(roles::reconcile))
        .route("/api/syncProfile", post(roles::sync_profile))
}

/// The full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = user_routes()
        .nest("/admin", admin_routes())
        .layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_session,
        ));

    Router::new()
        // Health (no auth)
        .route("/health", get(health::health_check))
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(axum_mw::from_fn(middleware::audit::audit_log)),
        )
        .with_state(state)
}
