use bizdesk_business::catalog;
use bizdesk_ui::DashboardApp;
use bizdesk_ui::state::State;
use egui_kittest::Harness;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Frames run after the network settles, enough for reconcile and relayout.
pub const SETTLE_FRAMES: usize = 3;

pub struct TestCtx<'a> {
    mock_server: MockServer,
    harness: Harness<'a, DashboardApp>,
}

impl<'a> TestCtx<'a> {
    pub async fn new_app() -> Self {
        let mock_server = MockServer::start().await;
        let app = DashboardApp::new(State::test(mock_server.uri()));
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }

    /// App whose backend answers `GET route` with `body`.
    pub async fn with_collection(route: &str, body: serde_json::Value) -> Self {
        let ctx = Self::new_app().await;
        ctx.mount("GET", route, 200, body).await;
        ctx
    }

    pub async fn mount(&self, verb: &str, route: &str, status: u16, body: serde_json::Value) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.mock_server)
            .await;
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, DashboardApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, DashboardApp> {
        &self.harness
    }

    /// Opens `resource` as if it was picked in the sidebar and waits for it to load.
    pub async fn open(&mut self, resource: &str) {
        let schema = catalog::find(resource).expect("resource in catalog");
        self.harness.state_mut().open(schema);
        self.settle().await;
    }

    /// Flushes queued commands, waits for every request and renders the result.
    pub async fn settle(&mut self) {
        self.harness.step();
        self.harness.state_mut().state_mut().ctx.wait_idle().await;
        for _ in 0..SETTLE_FRAMES {
            self.harness.step();
        }
    }
}

/// `count` tasks titled `Task 1..=count`.
#[allow(unused)]
pub fn tasks(count: usize) -> serde_json::Value {
    serde_json::Value::Array(
        (1..=count)
            .map(|n| serde_json::json!({ "id": n, "title": format!("Task {n}"), "status": "todo" }))
            .collect(),
    )
}
