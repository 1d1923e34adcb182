use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct HabitSummary {
    id: String,
    name: String,
    completed_today: bool,
    current_streak: u32,
    longest_streak: u32,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    today: String,
    active_habits: usize,
    habits: Vec<HabitSummary>,
}

#[derive(Debug, Deserialize)]
struct Habit {
    id: String,
    name: String,
    icon: String,
    color: String,
    completed_dates: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ToggleResponse {
    habit_id: String,
    date: String,
    completed: bool,
    current_streak: u32,
    longest_streak: u32,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("habit_tracker_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/habits")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_habit_tracker"))
        .env("PORT", port.to_string())
        .env("HABIT_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn create_habit(client: &Client, base_url: &str, name: &str) -> Habit {
    let response = client
        .post(format!("{base_url}/api/habits"))
        .json(&json!({ "name": name, "icon": "🎵", "color": "#B388FF" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.unwrap()
}

async fn toggle(client: &Client, base_url: &str, id: &str, date: &str, today: &str) -> ToggleResponse {
    let response = client
        .post(format!("{base_url}/api/habits/{id}/toggle"))
        .json(&json!({ "date": date, "today": today }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_seeded_habits_report_streaks() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let stats: StatsResponse = client
        .get(format!("{}/api/habits?today=2025-10-24", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(stats.today, "2025-10-24");
    assert!(stats.active_habits >= 3);

    let seeded: Vec<(&str, u32, u32)> = stats
        .habits
        .iter()
        .filter(|habit| ["1", "2", "3"].contains(&habit.id.as_str()))
        .map(|habit| (habit.name.as_str(), habit.current_streak, habit.longest_streak))
        .collect();
    assert_eq!(
        seeded,
        vec![
            ("Morning Exercise", 5, 5),
            ("Read 30 Minutes", 3, 3),
            ("Drink Water", 2, 2),
        ]
    );
    assert!(stats.habits.iter().take(3).all(|habit| habit.completed_today));
}

#[tokio::test]
async fn http_create_habit_starts_empty() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let habit = create_habit(&client, &server.base_url, "  Practice piano ").await;
    assert_eq!(habit.name, "Practice piano");
    assert_eq!(habit.icon, "🎵");
    assert_eq!(habit.color, "#B388FF");
    assert!(habit.completed_dates.is_empty());
    assert!(!habit.id.is_empty());
}

#[tokio::test]
async fn http_blank_name_is_rejected_without_change() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before: StatsResponse = client
        .get(format!("{}/api/habits", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let response = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&json!({ "name": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let after: StatsResponse = client
        .get(format!("{}/api/habits", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after.active_habits, before.active_habits);
}

#[tokio::test]
async fn http_toggle_twice_restores_completion() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let habit = create_habit(&client, &server.base_url, "Stretch").await;

    let first = toggle(&client, &server.base_url, &habit.id, "2025-11-04", "2025-11-05").await;
    assert_eq!(first.habit_id, habit.id);
    assert_eq!(first.date, "2025-11-04");
    assert!(first.completed);
    assert_eq!(first.current_streak, 1);
    assert_eq!(first.longest_streak, 1);

    let second = toggle(&client, &server.base_url, &habit.id, "2025-11-05", "2025-11-05").await;
    assert!(second.completed);
    assert_eq!(second.current_streak, 2);
    assert_eq!(second.longest_streak, 2);

    let undone = toggle(&client, &server.base_url, &habit.id, "2025-11-05", "2025-11-05").await;
    assert!(!undone.completed);
    assert_eq!(undone.current_streak, 1);
    assert_eq!(undone.longest_streak, 1);

    let stats: StatsResponse = client
        .get(format!("{}/api/habits?today=2025-11-05", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let summary = stats
        .habits
        .iter()
        .find(|summary| summary.id == habit.id)
        .expect("created habit listed");
    assert!(!summary.completed_today);
    assert_eq!(summary.current_streak, 1);
}

#[tokio::test]
async fn http_toggle_on_earliest_supported_day_keeps_serving() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let habit = create_habit(&client, &server.base_url, "Ancient history").await;

    let first = "-262143-01-01";
    let toggled = toggle(&client, &server.base_url, &habit.id, first, first).await;
    assert!(toggled.completed);
    assert_eq!(toggled.current_streak, 1);
    assert_eq!(toggled.longest_streak, 1);

    for today in [first, "-262143-01-02"] {
        let response = client
            .get(format!("{}/api/habits?today={today}", server.base_url))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        let stats: StatsResponse = response.json().await.unwrap();
        let summary = stats
            .habits
            .iter()
            .find(|summary| summary.id == habit.id)
            .expect("created habit listed");
        assert_eq!(summary.current_streak, 1);
    }

    let undone = toggle(&client, &server.base_url, &habit.id, first, first).await;
    assert!(!undone.completed);
    assert_eq!(undone.current_streak, 0);
}

#[tokio::test]
async fn http_toggle_unknown_habit_is_not_found() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/habits/does-not-exist/toggle", server.base_url))
        .json(&json!({ "date": "2025-10-24" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_calendar_lays_out_october_2025() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let calendar: Value = client
        .get(format!(
            "{}/api/calendar?year=2025&month=10&today=2025-10-24",
            server.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(calendar["title"], "October 2025");
    assert_eq!(calendar["previous"], json!({ "year": 2025, "month": 9 }));
    assert_eq!(calendar["next"], json!({ "year": 2025, "month": 11 }));
    let cells = calendar["cells"].as_array().expect("cells");
    assert_eq!(cells.len(), 34);
    assert!(cells[..3].iter().all(|cell| cell["kind"] == "blank"));
    assert_eq!(cells[3]["day"], 1);

    let day_24 = &cells[3 + 23];
    assert_eq!(day_24["date"], "2025-10-24");
    assert_eq!(day_24["is_today"], true);
    assert_eq!(day_24["completion"]["mode"], "all");
    assert_eq!(day_24["completion"]["count"], 3);
    assert_eq!(
        day_24["completion"]["colors"],
        json!(["#E91E8C", "#DDA5E8", "#C77DFF"])
    );

    let filtered: Value = client
        .get(format!(
            "{}/api/calendar?year=2025&month=10&habit=1&today=2025-10-24",
            server.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let cells = filtered["cells"].as_array().expect("cells");
    assert_eq!(cells[3 + 19]["completion"]["mode"], "single");
    assert_eq!(cells[3 + 19]["completion"]["completed"], true);
    assert_eq!(cells[3 + 18]["completion"]["completed"], false);
    assert_eq!(cells[3 + 19]["completion"]["color"], "#E91E8C");
}

#[tokio::test]
async fn http_calendar_rejects_invalid_month() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/calendar?year=2025&month=13", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_index_serves_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client.get(&server.base_url).send().await.unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Habit Tracker"));
}
