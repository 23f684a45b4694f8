//! Integration tests for the Talk2Me library.
//! HTTP tests run against a one-shot responder on a loopback port.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    use talk2me::{
        APOLOGY_TEXT, ChatClient, ChatReply, ChatRequest, ClientConfig, Error, HttpChatClient,
        ReplyOutcome, Resource, Result, SessionConfig, SessionController,
    };

    const FAST: Duration = Duration::from_millis(10);

    /// Accepts one connection, answers it, and yields the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });
        (base_url, handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .to_ascii_lowercase()
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:").map(str::to_string))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    async fn unreachable_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    fn http_session(base_url: &str) -> SessionController {
        let client = HttpChatClient::new(
            ClientConfig::new(base_url).with_timeout(Duration::from_secs(5)),
        )
        .unwrap();
        SessionController::new(
            Arc::new(client),
            SessionConfig::new().with_reply_delay(FAST),
        )
    }

    #[tokio::test]
    async fn http_round_trip() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"message":"Sleep is a big deal. Try a wind-down routine.","detected_topics":["physical_health"],"crisis_detected":false,"resources":[{"name":"MyFitnessPal","url":"https://www.myfitnesspal.com","category":"Physical Health"},{"name":"CDC Physical Activity","url":"https://www.cdc.gov/physicalactivity/","category":"Physical Health"}]}"#,
        )
        .await;
        let session = http_session(&base_url);
        let before = session.message_count();

        let outcome = session
            .submit("How much sleep do I need?")
            .unwrap()
            .unwrap()
            .await;
        assert!(outcome.is_delivered());

        let request = server.await.unwrap();
        let lowered = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /api/chat HTTP/1.1\r\n"));
        assert!(lowered.contains("content-type: application/json\r\n"));
        assert!(request.ends_with(r#"{"message":"How much sleep do I need?"}"#));

        let messages = session.messages();
        assert_eq!(messages.len(), before + 2);
        assert_eq!(
            messages[before + 1].text(),
            "Sleep is a big deal. Try a wind-down routine."
        );
        let groups = session.resource_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, "Physical Health");
        assert_eq!(groups[0].links.len(), 2);
        assert_eq!(session.last_topics(), vec!["physical_health".to_string()]);
        assert!(!session.crisis_alert_visible());
    }

    #[tokio::test]
    async fn http_error_status_becomes_api_error() {
        let (base_url, server) =
            serve_once("500 Internal Server Error", r#"{"detail":"An error occurred"}"#).await;
        let client = HttpChatClient::new(ClientConfig::new(base_url)).unwrap();
        let err = client.chat(ChatRequest::new("hello")).await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert!(err.is_server_error());
        assert_eq!(err.to_string(), "API error (500): An error occurred");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn http_error_status_yields_apology() {
        let (base_url, server) =
            serve_once("429 Too Many Requests", r#"{"detail":"Rate limit exceeded"}"#).await;
        let session = http_session(&base_url);
        let outcome = session.submit("hello").unwrap().unwrap().await;
        match outcome {
            ReplyOutcome::Failed { apology, error } => {
                assert_eq!(apology.text(), APOLOGY_TEXT);
                assert_eq!(error.status_code(), Some(429));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(!session.is_pending());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn malformed_body_yields_apology() {
        let (base_url, server) = serve_once("200 OK", "<html>oops</html>").await;
        let session = http_session(&base_url);
        let before = session.message_count();
        let outcome = session.submit("hello").unwrap().unwrap().await;
        match outcome {
            ReplyOutcome::Failed { error, .. } => assert!(error.is_serialization()),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(session.message_count(), before + 2);
        assert_eq!(session.messages()[before + 1].text(), APOLOGY_TEXT);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_connection_error() {
        let client = HttpChatClient::new(ClientConfig::new(unreachable_base_url().await)).unwrap();
        let err = client.chat(ChatRequest::new("hello")).await.unwrap_err();
        assert!(err.is_connection(), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn crisis_alert_fires_without_a_backend() {
        let session = http_session(&unreachable_base_url().await);
        let before = session.message_count();

        let pending = session
            .submit("I don't want to live anymore")
            .unwrap()
            .unwrap();
        assert_eq!(session.message_count(), before + 1);
        assert!(session.crisis_alert_visible());
        assert!(session.is_pending());

        let outcome = pending.await;
        assert!(outcome.is_failed());
        let messages = session.messages();
        assert_eq!(messages.len(), before + 2);
        assert_eq!(messages[before].text(), "I don't want to live anymore");
        assert_eq!(messages[before + 1].text(), APOLOGY_TEXT);
        assert!(session.crisis_alert_visible());
        assert!(!session.is_pending());
    }

    /// Echoes the request back, recording every message it sees.
    #[derive(Default)]
    struct EchoClient {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl ChatClient for EchoClient {
        async fn chat(&self, request: ChatRequest) -> Result<ChatReply> {
            self.seen.lock().unwrap().push(request.message.clone());
            if request.message.contains("fail") {
                return Err(Error::connection("scripted failure", None));
            }
            Ok(ChatReply::new(format!("echo: {}", request.message)).with_resources(vec![
                Resource::new("B1", "https://b.example/1").with_category("B"),
                Resource::new("A1", "https://a.example/1").with_category("A"),
                Resource::new("B2", "https://b.example/2").with_category("B"),
            ]))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn replies_follow_their_own_submission() {
        let client = Arc::new(EchoClient::default());
        let session = SessionController::new(client.clone(), SessionConfig::default());

        for text in ["one", "please fail", "three"] {
            session.submit(text).unwrap().unwrap().await;
        }

        let texts: Vec<String> = session
            .messages()
            .iter()
            .skip(1)
            .map(|m| m.text().to_string())
            .collect();
        assert_eq!(
            texts,
            vec![
                "one".to_string(),
                "echo: one".to_string(),
                "please fail".to_string(),
                APOLOGY_TEXT.to_string(),
                "three".to_string(),
                "echo: three".to_string(),
            ]
        );
        assert_eq!(*client.seen.lock().unwrap(), vec!["one", "please fail", "three"]);

        let categories: Vec<String> = session
            .resource_groups()
            .into_iter()
            .map(|group| group.category)
            .collect();
        assert_eq!(categories, vec!["B".to_string(), "A".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn snapshot_reflects_state() {
        let client = Arc::new(EchoClient::default());
        let session = SessionController::new(client, SessionConfig::new().without_greeting());
        session.submit("I want to hurt myself").unwrap().unwrap().await;

        let snapshot = session.snapshot();
        assert_eq!(snapshot.messages.len(), 2);
        assert!(snapshot.crisis_alert_visible);
        assert!(!snapshot.pending);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["messages"][0]["sender"], "user");
        assert_eq!(json["messages"][1]["sender"], "bot");
        assert_eq!(json["resource_groups"][0]["category"], "B");
    }
}
