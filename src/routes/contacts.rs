use askama::Template;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::blog::views::ContactsPage;
use crate::routes::home::Html;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/contacts.html")]
pub struct ContactsTemplate {
    pub page: ContactsPage,
}

pub async fn contacts(State(state): State<AppState>) -> impl IntoResponse {
    Html(ContactsTemplate {
        page: state.content.contacts_page(),
    })
}
