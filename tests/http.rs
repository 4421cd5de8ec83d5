use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode, redirect};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

const AMINA: &str = "amina@kibocatering.co.ke";
const BRIAN: &str = "brian@lakesidegrill.co.ke";
const WANJIRU: &str = "wanjiru@newtonhotels.co.ke";

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
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

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

fn unique_db_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("gasconnect_http_{}_{}.db", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

fn browser_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("client")
}

fn no_redirect_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .expect("client")
}

fn location(resp: &reqwest::Response) -> String {
    resp.headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/login")).send().await {
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
    let db_path = unique_db_path();
    let child = Command::new(env!("CARGO_BIN_EXE_gasconnect"))
        .env("PORT", port.to_string())
        .env("APP_DB_PATH", db_path)
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

async fn sign_in(client: &Client, base_url: &str, email: &str) {
    let resp = client
        .post(format!("{base_url}/login"))
        .form(&[("email", email)])
        .send()
        .await
        .unwrap();
    if resp.status() == StatusCode::SEE_OTHER {
        assert_eq!(location(&resp), "/dashboard");
    } else {
        assert!(resp.status().is_success());
    }
}

#[tokio::test]
async fn http_protected_pages_redirect_to_login() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = no_redirect_client();

    for path in ["/dashboard", "/track_order"] {
        let resp = client
            .get(format!("{}{path}", server.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/login");
    }
}

#[tokio::test]
async fn http_login_opens_session_and_dashboard_renders() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = no_redirect_client();

    let resp = client
        .post(format!("{}/login", server.base_url))
        .form(&[("email", AMINA)])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/dashboard");

    let resp = client
        .get(format!("{}/dashboard", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Welcome back, Amina!"));
    assert!(body.contains("Kibo Catering"));
    assert!(body.contains(AMINA));
}

#[tokio::test]
async fn http_unknown_account_bounces_back_to_login() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = no_redirect_client();

    let resp = client
        .post(format!("{}/login", server.base_url))
        .form(&[("email", "nobody@example.com")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login?error=unknown-account");

    let body = client
        .get(format!("{}{}", server.base_url, location(&resp)))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("No account found for that email."));
}

#[tokio::test]
async fn http_track_order_defaults_to_most_recent() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = browser_client();
    sign_in(&client, &server.base_url, AMINA).await;

    let resp = client
        .get(format!("{}/track_order", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.unwrap();

    // Amina's latest order is #3, currently on the way.
    assert!(body.contains("Tracking Order #0003"));
    assert!(body.contains("<div class=\"step completed\">Pending</div>"));
    assert!(body.contains("<div class=\"step completed\">Confirmed</div>"));
    assert!(body.contains("<div class=\"step active\">On The Way</div>"));
    assert!(body.contains("<div class=\"step\">Delivered</div>"));
}

#[tokio::test]
async fn http_spend_series_comes_from_the_store() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = browser_client();
    sign_in(&client, &server.base_url, AMINA).await;

    let body = client
        .get(format!("{}/track_order", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    // lpg 100 + 50, cng 30, grouped by the store and ordered by type.
    assert!(body.contains(r#"{"labels":["Cng","Lpg"],"totals":[30.0,150.0]}"#));
}

#[tokio::test]
async fn http_foreign_order_is_treated_as_missing() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = no_redirect_client();
    sign_in(&client, &server.base_url, BRIAN).await;

    // Order #3 belongs to Amina.
    let resp = client
        .get(format!("{}/track_order?order_id=3", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/dashboard?notice=no-active-order");

    let body = client
        .get(format!("{}/dashboard?notice=no-active-order", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("No active order found."));
}

#[tokio::test]
async fn http_zero_orders_redirects_with_notice() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = no_redirect_client();
    sign_in(&client, &server.base_url, WANJIRU).await;

    let resp = client
        .get(format!("{}/track_order", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/dashboard?notice=no-active-order");
}

#[tokio::test]
async fn http_logout_closes_the_session() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = no_redirect_client();
    sign_in(&client, &server.base_url, AMINA).await;

    let resp = client
        .get(format!("{}/logout", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");

    let resp = client
        .get(format!("{}/dashboard", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}
