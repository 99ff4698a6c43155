//! Minimal HTML shells for the browser-facing routes.
//!
//! The front end mounts into `#app` and talks to the JSON API. Dashboard shells
//! are only reachable through the session gate and expose nothing about the
//! user beyond the role, as a data attribute.

use std::sync::Arc;

use axum::{Extension, Router, response::Html, routing::get};

use crate::state::AppState;
use crate::utils::jwt::Principal;

fn shell(title: &str, page: &str, role: Option<&str>) -> Html<String> {
    let role_attr = role
        .map(|role| format!(" data-role=\"{}\"", role))
        .unwrap_or_default();

    Html(format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} | Class Feedback</title>\n</head>\n\
         <body>\n<main id=\"app\" data-page=\"{page}\"{role_attr}></main>\n</body>\n</html>\n"
    ))
}

async fn home() -> Html<String> {
    shell("Welcome", "home", None)
}

async fn login() -> Html<String> {
    shell("Sign in", "login", None)
}

async fn register() -> Html<String> {
    shell("Create account", "register", None)
}

async fn dashboard(Extension(principal): Extension<Principal>) -> Html<String> {
    shell("Dashboard", "dashboard", Some(principal.role.as_str()))
}

async fn reports(Extension(principal): Extension<Principal>) -> Html<String> {
    shell("Reports", "reports", Some(principal.role.as_str()))
}

async fn send_report(Extension(principal): Extension<Principal>) -> Html<String> {
    shell("Send report", "send-report", Some(principal.role.as_str()))
}

async fn send_feedback(Extension(principal): Extension<Principal>) -> Html<String> {
    shell("Send feedback", "send-feedback", Some(principal.role.as_str()))
}

async fn feedback(Extension(principal): Extension<Principal>) -> Html<String> {
    shell("Feedback", "feedback", Some(principal.role.as_str()))
}

async fn my_feedback(Extension(principal): Extension<Principal>) -> Html<String> {
    shell("My feedback", "my-feedback", Some(principal.role.as_str()))
}

pub fn page_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/login", get(login))
        .route("/register", get(register))
        .route("/dashboard", get(dashboard))
        .route("/dashboard/reports", get(reports))
        .route("/dashboard/send-report", get(send_report))
        .route("/dashboard/send-feedback", get(send_feedback))
        .route("/dashboard/feedback", get(feedback))
        .route("/dashboard/my-feedback", get(my_feedback))
}
