//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        source: impl Into<String>,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(source),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Initial render shows Idle, then the mount hook fires the first fetch
        self.publish();
        let cmds = self.state.mount();
        if !cmds.is_empty() {
            self.send_all(cmds);
            self.publish();
        }

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        self.shutdown();
                        break;
                    }
                    self.publish();
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    self.publish();
                }
                else => {
                    self.shutdown();
                    break;
                }
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::Refetch => {
                let cmds = self.state.refetch();
                self.send_all(cmds);
            }

            // Table
            UiEvent::SelectPrev => self.state.select_prev(),
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::SelectFirst => self.state.select_first(),
            UiEvent::SelectLast => self.state.select_last(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }

    fn shutdown(&mut self) {
        if let Some(cmd) = self.state.unmount() {
            let _ = self.network_tx.send(cmd);
        }
        let _ = self.network_tx.send(NetworkCommand::Shutdown);
    }

    fn send_all(&self, cmds: Vec<NetworkCommand>) {
        for cmd in cmds {
            let _ = self.network_tx.send(cmd);
        }
    }

    fn publish(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::app::LoadState;
    use crate::models::UserRecord;
    use crate::network::{decode_users, FetchError, NetworkActor, UserSource};

    /// Answers each fetch with the next scripted body, or a transport error
    struct ScriptedSource {
        replies: Mutex<VecDeque<Result<&'static str, &'static str>>>,
    }

    impl ScriptedSource {
        fn new(replies: Vec<Result<&'static str, &'static str>>) -> Self {
            ScriptedSource { replies: Mutex::new(replies.into()) }
        }
    }

    #[async_trait]
    impl UserSource for ScriptedSource {
        async fn fetch_users(&self) -> Result<Vec<UserRecord>, FetchError> {
            let reply = self.replies.lock().unwrap().pop_front();
            match reply {
                Some(Ok(body)) => decode_users(body.as_bytes()),
                Some(Err(message)) => Err(FetchError::new(message)),
                None => Err(FetchError::new("script exhausted")),
            }
        }

        fn describe(&self) -> String {
            "scripted".into()
        }
    }

    struct Harness {
        ui_tx: mpsc::UnboundedSender<UiEvent>,
        render_rx: mpsc::UnboundedReceiver<RenderState>,
        handles: Vec<tokio::task::JoinHandle<()>>,
    }

    impl Harness {
        fn start(source: ScriptedSource) -> Self {
            let (ui_tx, ui_rx) = mpsc::unbounded_channel();
            let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel();
            let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
            let (render_tx, render_rx) = mpsc::unbounded_channel();

            let network = tokio::spawn(NetworkActor::new(source, net_resp_tx).run(net_cmd_rx));
            let app = tokio::spawn(AppActor::new("scripted", net_cmd_tx, render_tx).run(ui_rx, net_resp_rx));

            Harness { ui_tx, render_rx, handles: vec![network, app] }
        }

        /// Collect render states up to and including the next settled one
        async fn until_settled(&mut self) -> Vec<LoadState> {
            let mut seen = Vec::new();
            while let Some(render) = self.render_rx.recv().await {
                let settled = matches!(render.load_state, LoadState::Success(_) | LoadState::Error(_));
                seen.push(render.load_state);
                if settled {
                    break;
                }
            }
            seen
        }

        async fn quit(self) {
            self.ui_tx.send(UiEvent::Quit).unwrap();
            for handle in self.handles {
                handle.await.unwrap();
            }
        }
    }

    #[tokio::test]
    async fn test_mount_loads_single_user() {
        let body = r#"[{"id":1,"name":"Leanne Graham","username":"Bret","address":{"city":"Gwenborough","street":"Kulas Light"}}]"#;
        let mut harness = Harness::start(ScriptedSource::new(vec![Ok(body)]));

        let seen = harness.until_settled().await;
        assert_eq!(seen[0], LoadState::Idle);
        assert_eq!(seen[1], LoadState::Loading);

        let records = seen.last().unwrap().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Leanne Graham");
        assert_eq!(records[0].address.city, "Gwenborough");
        assert_eq!(records[0].username, "Bret");

        harness.quit().await;
    }

    #[tokio::test]
    async fn test_empty_directory_is_success() {
        let mut harness = Harness::start(ScriptedSource::new(vec![Ok("[]")]));
        let seen = harness.until_settled().await;
        assert_eq!(seen.last(), Some(&LoadState::Success(Vec::new())));
        harness.quit().await;
    }

    #[tokio::test]
    async fn test_network_failure_then_refetch() {
        let body = r#"[{"id":1,"name":"A"},{"id":2,"name":"B"}]"#;
        let mut harness = Harness::start(ScriptedSource::new(vec![Err("Failed to fetch"), Ok(body)]));

        let seen = harness.until_settled().await;
        assert!(seen.contains(&LoadState::Loading));
        assert_eq!(seen.last().unwrap().error(), Some("Failed to fetch"));

        harness.ui_tx.send(UiEvent::Refetch).unwrap();
        let seen = harness.until_settled().await;
        assert_eq!(seen[0], LoadState::Loading);
        let names: Vec<&str> = seen.last().unwrap().records().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);

        harness.quit().await;
    }

    #[tokio::test]
    async fn test_malformed_body_is_error() {
        let mut harness = Harness::start(ScriptedSource::new(vec![Ok("<html>502 Bad Gateway</html>")]));
        let seen = harness.until_settled().await;
        let message = seen.last().unwrap().error().unwrap();
        assert!(!message.is_empty());
        harness.quit().await;
    }

    #[tokio::test]
    async fn test_success_then_failed_refetch_drops_data() {
        let mut harness = Harness::start(ScriptedSource::new(vec![Ok(r#"[{"id":1}]"#), Err("offline")]));
        harness.until_settled().await;

        harness.ui_tx.send(UiEvent::Refetch).unwrap();
        let seen = harness.until_settled().await;
        assert_eq!(seen.last(), Some(&LoadState::Error("offline".into())));
        assert!(seen.last().unwrap().records().is_empty());

        harness.quit().await;
    }
}
