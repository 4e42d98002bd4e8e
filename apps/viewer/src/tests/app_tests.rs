use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use client_core::FetchError;
use shared::{
    domain::{ChatMessage, MessageTimestamp, RoomName},
    error::ApiRejection,
};

use super::*;

struct ScriptedApi {
    rooms: Option<Vec<&'static str>>,
    messages_fetched: Mutex<Vec<String>>,
    rooms_fetched: AtomicUsize,
}

impl ScriptedApi {
    fn with_rooms(rooms: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            rooms: Some(rooms.to_vec()),
            messages_fetched: Mutex::new(Vec::new()),
            rooms_fetched: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            rooms: None,
            messages_fetched: Mutex::new(Vec::new()),
            rooms_fetched: AtomicUsize::new(0),
        })
    }

    fn messages_fetched(&self) -> Vec<String> {
        self.messages_fetched.lock().expect("lock").clone()
    }
}

#[async_trait]
impl RoomsApi for ScriptedApi {
    async fn fetch_rooms(&self) -> Result<Vec<RoomName>, FetchError> {
        self.rooms_fetched.fetch_add(1, Ordering::SeqCst);
        match &self.rooms {
            Some(rooms) => Ok(rooms.iter().copied().map(RoomName::from).collect()),
            None => Err(FetchError::Rejected(ApiRejection::new(Some(
                "rooms unavailable".into(),
            )))),
        }
    }

    async fn fetch_messages(&self, room: &RoomName) -> Result<Vec<ChatMessage>, FetchError> {
        self.messages_fetched
            .lock()
            .expect("lock")
            .push(room.to_string());
        Ok(vec![ChatMessage {
            username: "bob".into(),
            message_text: format!("hello from {room}"),
            timestamp: MessageTimestamp::parse_str("2024-01-01T00:00:00Z"),
            visitor_id: "v1".into(),
        }])
    }
}

async fn run_script(api: Arc<ScriptedApi>, script: &str) -> (Viewer<Vec<u8>>, String) {
    let mut viewer = Viewer::new(api, Vec::new());
    viewer.start().await.expect("start");
    viewer.run(script.as_bytes()).await.expect("run");
    let output = String::from_utf8(viewer.output().clone()).expect("utf8");
    (viewer, output)
}

#[tokio::test]
async fn startup_loads_rooms_once_before_first_render() {
    let api = ScriptedApi::with_rooms(&["lobby", "help"]);
    let (viewer, output) = run_script(api.clone(), "").await;

    assert_eq!(api.rooms_fetched.load(Ordering::SeqCst), 1);
    assert_eq!(viewer.controller().rooms().len(), 2);
    assert!(output.contains("#1 [+] lobby"));
    assert!(output.contains("#2 [+] help"));
}

#[tokio::test]
async fn failed_startup_renders_empty_view() {
    let (viewer, output) = run_script(ScriptedApi::failing(), "").await;

    assert!(viewer.controller().rooms().is_empty());
    assert!(output.contains("User Messages"));
    assert!(!output.contains("#1"));
}

#[tokio::test]
async fn toggle_fetches_and_prints_messages_once_input_ends() {
    let api = ScriptedApi::with_rooms(&["lobby"]);
    let (viewer, output) = run_script(api.clone(), "toggle lobby\n").await;

    assert_eq!(api.messages_fetched(), vec!["lobby".to_string()]);
    assert!(viewer.controller().is_expanded(&RoomName::from("lobby")));
    assert!(output.contains("bob: hello from lobby"));
    assert!(output.contains("Visitor ID: v1"));
}

#[tokio::test]
async fn toggling_twice_fetches_once() {
    let api = ScriptedApi::with_rooms(&["lobby"]);
    let (viewer, _) = run_script(api.clone(), "t #1\nt #1\n").await;

    assert_eq!(api.messages_fetched().len(), 1);
    assert_eq!(viewer.controller().expanded(), None);
}

#[tokio::test]
async fn refresh_of_collapsed_room_fills_cache_without_expanding() {
    let api = ScriptedApi::with_rooms(&["lobby", "help"]);
    let (viewer, _) = run_script(api.clone(), "refresh #2\n").await;

    let help = RoomName::from("help");
    assert_eq!(api.messages_fetched(), vec!["help".to_string()]);
    assert_eq!(viewer.controller().expanded(), None);
    assert_eq!(
        viewer.controller().cached_messages(&help).map(<[_]>::len),
        Some(1)
    );
    assert_eq!(
        viewer.controller().cached_messages(&RoomName::from("lobby")),
        None
    );
}

#[tokio::test]
async fn refresh_rooms_fetches_the_list_again() {
    let api = ScriptedApi::with_rooms(&["lobby"]);
    run_script(api.clone(), "rooms\n").await;
    assert_eq!(api.rooms_fetched.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unknown_rooms_and_commands_are_reported_not_fetched() {
    let api = ScriptedApi::with_rooms(&["lobby"]);
    let (_, output) = run_script(api.clone(), "toggle attic\ndance\nhelp\n").await;

    assert!(api.messages_fetched().is_empty());
    assert!(output.contains("no room matches 'attic'"));
    assert!(output.contains("unknown command 'dance'"));
    assert!(output.contains("commands:"));
}

#[tokio::test]
async fn quit_stops_reading_input() {
    let api = ScriptedApi::with_rooms(&["lobby"]);
    let (viewer, _) = run_script(api.clone(), "quit\ntoggle lobby\n").await;

    assert!(api.messages_fetched().is_empty());
    assert_eq!(viewer.controller().expanded(), None);
}
