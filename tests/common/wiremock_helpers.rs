use std::net::TcpListener;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts a HEAD handler at `url_path` that answers with `status`.
pub async fn mount_head(server: &MockServer, url_path: &str, status: u16) {
    Mock::given(method("HEAD"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Mounts a HEAD handler that redirects `from` to `to` with a 301.
pub async fn mount_redirect(server: &MockServer, from: &str, to: &str) {
    Mock::given(method("HEAD"))
        .and(path(from))
        .respond_with(ResponseTemplate::new(301).insert_header("location", to))
        .mount(server)
        .await;
}

/// Mounts a HEAD handler that only answers after `delay`.
pub async fn mount_slow_head(server: &MockServer, url_path: &str, delay: Duration) {
    Mock::given(method("HEAD"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_delay(delay))
        .mount(server)
        .await;
}

/// Serves `html` for GET requests at `url_path`.
pub async fn mount_page(server: &MockServer, url_path: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html.to_string())
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// A URL on localhost where nothing is listening.
///
/// Binds an ephemeral port and releases it straight away, so connecting
/// to it gets refused.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind ephemeral port");
    let port = listener.local_addr().expect("no local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}
