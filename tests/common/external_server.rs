use std::{collections::HashMap, net::TcpListener, sync::Arc, time::Duration};

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Router,
};
use tokio::{sync::RwLock, task::JoinHandle};

#[derive(Clone, Default)]
pub struct AppState {
    pub pages: HashMap<String, String>,
    pub delay: Duration,
}

/// Stand-in for the event site. Serves whatever html was registered per path.
pub struct ExternalServer {
    url: String,
    handle: JoinHandle<()>,
    pub api_state: Arc<RwLock<AppState>>,
}

impl Drop for ExternalServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl ExternalServer {
    pub async fn start() -> ExternalServer {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let url = format!("http://{}", listener.local_addr().unwrap());
        let api_state = Arc::new(RwLock::new(AppState::default()));

        let app = Router::new()
            .fallback(serve_page)
            .with_state(api_state.clone());
        let handle = tokio::spawn(async move {
            axum::Server::from_tcp(listener).unwrap()
                .serve(app.into_make_service())
                .await
                .unwrap();
        });

        ExternalServer { url, handle, api_state }
    }

    pub fn get_url(&self) -> String {
        self.url.clone()
    }

    pub async fn set_challenges(&self, challenges: &[(&str, &str)]) {
        self.set_page("/inscription/defis/liste", challenge_list_html(challenges)).await;
    }

    pub async fn set_teams(&self, challenge_id: &str, teams: &[&str]) {
        self.set_page(&format!("/inscription/defis/{challenge_id}"), challenge_html(teams)).await;
    }

    pub async fn remove_teams(&self, challenge_id: &str) {
        self.api_state.write().await.pages.remove(&format!("/inscription/defis/{challenge_id}"));
    }

    pub async fn set_page(&self, path: &str, html: String) {
        self.api_state.write().await.pages.insert(path.to_string(), html);
    }

    pub async fn set_delay(&self, delay: Duration) {
        self.api_state.write().await.delay = delay;
    }
}

async fn serve_page(State(state): State<Arc<RwLock<AppState>>>, uri: Uri) -> Response {
    let (page, delay) = {
        let state = state.read().await;
        (state.pages.get(uri.path()).cloned(), state.delay)
    };
    tokio::time::sleep(delay).await;
    match page {
        Some(html) => (StatusCode::OK, Html(html)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub fn challenge_list_html(challenges: &[(&str, &str)]) -> String {
    let links: String = challenges.iter()
        .map(|(id, name)| format!(
            r#"<div class="defi"><a href="/inscription/defis/{id}">{name}</a> <a class="btn" href="/inscription/defis/{id}">Voir</a></div>"#
        ))
        .collect();
    format!(r#"<html><body><a href="/inscription/defis/liste">Liste</a>{links}<a href="https://discord.gg/nuit">Discord</a></body></html>"#)
}

pub fn challenge_html(teams: &[&str]) -> String {
    let items: String = teams.iter()
        .map(|team| format!(r#"<a class="list-group-item" href="/equipe">{team}</a>"#))
        .collect();
    format!(r#"<html><body>
        <a class="list-group-item" href="/conditions">Conditions générales</a>
        <div class="list-group col-md-4 col-md-offset-4 text-center">
            {items}
            <a class="list-group-item" href="/inscription">Modifier l'inscription</a>
        </div>
    </body></html>"#)
}
