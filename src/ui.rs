use crate::models::{MapView, Order, SessionUser, SpendSeries, Step, StepState};
use crate::spend::capitalize;
use serde::Serialize;

/// Driver position and name are mocked; a live tracking feed would fill the
/// same shape.
pub const MAP_VIEW: MapView = MapView {
    center: [-1.2921, 36.8219],
    driver: [-1.28, 36.815],
    customer: [-1.2921, 36.8219],
    driver_name: "John K.",
    vehicle: "Bike",
};

pub fn render_login(error: Option<&str>) -> String {
    let banner = match error {
        Some(message) => format!("<div class=\"notice error\">{}</div>", escape_html(message)),
        None => String::new(),
    };

    LOGIN_HTML
        .replace("{{BASE_CSS}}", BASE_CSS)
        .replace("{{BANNER}}", &banner)
}

pub fn render_dashboard(user: &SessionUser, notice: Option<&str>) -> String {
    let banner = match notice {
        Some(message) => format!("<div class=\"notice\">{}</div>", escape_html(message)),
        None => String::new(),
    };

    DASHBOARD_HTML
        .replace("{{BASE_CSS}}", BASE_CSS)
        .replace("{{AVATAR}}", &escape_html(&user.avatar_letter()))
        .replace("{{FIRSTNAME}}", &escape_html(&user.firstname))
        .replace("{{EMAIL}}", &escape_html(&user.email))
        .replace("{{COMPANY}}", &escape_html(&user.companyname))
        .replace("{{BANNER}}", &banner)
}

pub fn render_track_order(order: &Order, steps: &[Step], spend: &SpendSeries) -> String {
    TRACK_HTML
        .replace("{{BASE_CSS}}", BASE_CSS)
        .replace("{{ORDER_ID}}", &format!("{:04}", order.id))
        .replace("{{ORDER_META}}", &order_meta(order))
        .replace("{{STEPS}}", &render_steps(steps))
        .replace("{{SPEND_SERIES}}", &json_for_script(spend))
        .replace("{{MAP_VIEW}}", &json_for_script(&MAP_VIEW))
        .replace("{{DRIVER_NAME}}", MAP_VIEW.driver_name)
        .replace("{{VEHICLE}}", MAP_VIEW.vehicle)
}

fn order_meta(order: &Order) -> String {
    format!(
        "{} cylinder &middot; KSh {:.2} &middot; placed {}",
        escape_html(&capitalize(&order.cylinder_type)),
        order.total_price,
        order.created_at.format("%d %b %Y"),
    )
}

fn render_steps(steps: &[Step]) -> String {
    steps
        .iter()
        .map(|step| {
            let class = match step.state {
                StepState::Active => " active",
                StepState::Completed => " completed",
                StepState::Upcoming => "",
            };
            format!("<div class=\"step{class}\">{}</div>", step.status.label())
        })
        .collect()
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// JSON for an inline script block. `<` is escaped so user-sourced strings
/// cannot close the surrounding tag.
fn json_for_script<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
}

const BASE_CSS: &str = r#"
    * { box-sizing: border-box; }
    body {
      margin: 0;
      min-height: 100vh;
      display: flex;
      background: #f4f6fb;
      color: #1f2933;
      font-family: "Segoe UI", "Trebuchet MS", sans-serif;
    }
    .sidebar {
      width: 230px;
      min-height: 100vh;
      background: #15314b;
      color: white;
      display: flex;
      flex-direction: column;
      padding: 24px 18px;
    }
    .logo { font-size: 22px; font-weight: bold; margin-bottom: 32px; }
    .nav-item {
      display: block;
      color: #cbd5e1;
      text-decoration: none;
      padding: 10px 12px;
      border-radius: 8px;
      margin-bottom: 6px;
    }
    .nav-item:hover { background: rgba(255, 255, 255, 0.08); }
    .nav-item.active { background: #ff9800; color: white; }
    .logout-section { margin-top: auto; }
    .logout-btn {
      display: block;
      text-align: center;
      color: white;
      text-decoration: none;
      border: 1px solid rgba(255, 255, 255, 0.4);
      border-radius: 8px;
      padding: 10px;
    }
    .main-content { flex: 1; padding: 28px 36px; }
    .top-bar {
      display: flex;
      justify-content: space-between;
      align-items: center;
      margin-bottom: 24px;
    }
    .top-bar h1 { margin: 0; font-size: 26px; }
    .user-profile { display: flex; align-items: center; gap: 12px; }
    .user-avatar {
      width: 44px;
      height: 44px;
      border-radius: 50%;
      background: #ff9800;
      color: white;
      display: grid;
      place-items: center;
      font-size: 20px;
      font-weight: bold;
    }
    .user-name { font-weight: 600; }
    .user-email { color: #64748b; font-size: 0.9rem; }
    .notice {
      background: #fff7e6;
      border: 1px solid #ffd591;
      border-radius: 10px;
      padding: 12px 16px;
      margin-bottom: 20px;
    }
    .notice.error { background: #fdecea; border-color: #f5b5ae; }
    .card {
      background: white;
      padding: 20px;
      border-radius: 15px;
      box-shadow: 0 4px 15px rgba(0, 0, 0, 0.05);
    }
"#;

const LOGIN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Sign In - GasConnect</title>
  <style>
    {{BASE_CSS}}
    body { display: grid; place-items: center; }
    .login-card { width: min(400px, 92vw); }
    .login-card h1 { margin: 0 0 6px; font-size: 24px; }
    .login-card p { margin: 0 0 18px; color: #64748b; }
    label { display: block; margin-bottom: 6px; font-weight: 600; }
    input[type="email"] {
      width: 100%;
      padding: 11px 12px;
      border: 1px solid #cbd5e1;
      border-radius: 8px;
      font-size: 1rem;
      margin-bottom: 16px;
    }
    button {
      width: 100%;
      padding: 12px;
      border: none;
      border-radius: 8px;
      background: #ff9800;
      color: white;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
    }
  </style>
</head>
<body>
  <div class="card login-card">
    <h1>GasConnect</h1>
    <p>Sign in with your account email to manage gas orders.</p>
    {{BANNER}}
    <form method="post" action="/login">
      <label for="email">Account email</label>
      <input type="email" id="email" name="email" required autofocus />
      <button type="submit">Sign In</button>
    </form>
  </div>
</body>
</html>
"#;

const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Dashboard - GasConnect</title>
  <style>
    {{BASE_CSS}}
    .welcome-section { margin-bottom: 24px; }
    .welcome-section h2 { margin: 0 0 6px; }
    .welcome-section p { margin: 0; color: #64748b; }
    .dashboard-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
      gap: 20px;
    }
    .dashboard-card {
      display: block;
      text-decoration: none;
      color: inherit;
    }
    .dashboard-card h3 { margin: 0 0 6px; }
    .dashboard-card p { margin: 0; color: #64748b; font-size: 0.95rem; }
  </style>
</head>
<body>
  <div class="sidebar">
    <div class="logo">GasConnect</div>
    <nav class="nav-section">
      <a href="/dashboard" class="nav-item active">Dashboard</a>
      <a href="/track_order" class="nav-item">Track Delivery</a>
      <a href="#" class="nav-item">Invoices</a>
      <a href="#" class="nav-item">Profile</a>
    </nav>
    <div class="logout-section">
      <a href="/logout" class="logout-btn">Logout</a>
    </div>
  </div>

  <div class="main-content">
    <div class="top-bar">
      <h1>Dashboard</h1>
      <div class="user-profile">
        <div class="user-avatar">{{AVATAR}}</div>
        <div class="user-details">
          <div class="user-name">{{COMPANY}}</div>
          <div class="user-email">{{EMAIL}}</div>
        </div>
      </div>
    </div>

    {{BANNER}}

    <div class="welcome-section">
      <h2>Welcome back, {{FIRSTNAME}}!</h2>
      <p>Manage your gas orders, track deliveries, and view invoices all in one place.</p>
    </div>

    <div class="dashboard-grid">
      <a href="/track_order" class="card dashboard-card">
        <h3>Track Delivery</h3>
        <p>Monitor your orders and delivery status in real-time</p>
      </a>
      <a href="#" class="card dashboard-card">
        <h3>View Invoices</h3>
        <p>Access and download all your payment receipts</p>
      </a>
    </div>
  </div>
</body>
</html>
"##;

const TRACK_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Track Order #{{ORDER_ID}}</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
  <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
  <style>
    {{BASE_CSS}}
    .order-meta { color: #64748b; margin: 4px 0 0; }
    .status-bar {
      display: flex;
      justify-content: space-between;
      background: white;
      padding: 20px;
      border-radius: 15px;
      margin-bottom: 20px;
    }
    .step { color: #ccc; font-weight: 500; }
    .step.active { color: #ff9800; font-weight: bold; }
    .step.completed { color: #10b981; }
    .tracking-grid {
      display: grid;
      grid-template-columns: 2fr 1fr;
      gap: 20px;
      margin-top: 20px;
    }
    #map { height: 400px; width: 100%; border-radius: 10px; z-index: 1; }
    .driver-line {
      margin-top: 15px;
      display: flex;
      justify-content: space-between;
    }
    @media (max-width: 900px) { .tracking-grid { grid-template-columns: 1fr; } }
  </style>
</head>
<body>
  <div class="sidebar">
    <div class="logo">GasConnect</div>
    <nav class="nav-section">
      <a href="/dashboard" class="nav-item">&larr; Back to Dashboard</a>
    </nav>
    <div class="logout-section">
      <a href="/logout" class="logout-btn">Logout</a>
    </div>
  </div>

  <div class="main-content">
    <div class="top-bar">
      <div>
        <h1>Tracking Order #{{ORDER_ID}}</h1>
        <p class="order-meta">{{ORDER_META}}</p>
      </div>
    </div>

    <div class="status-bar">{{STEPS}}</div>

    <div class="tracking-grid">
      <div class="card">
        <h2>Live Delivery Map</h2>
        <div id="map"></div>
        <div class="driver-line">
          <p><strong>Driver:</strong> {{DRIVER_NAME}} ({{VEHICLE}})</p>
          <p><strong>ETA:</strong> <span id="eta">Calculating...</span></p>
        </div>
      </div>

      <div class="card">
        <h2>Spending History</h2>
        <canvas id="spendingChart"></canvas>
      </div>
    </div>
  </div>

  <script>
    const mapView = {{MAP_VIEW}};
    const spendSeries = {{SPEND_SERIES}};

    // Map embed; marker data comes from the server payload above.
    const map = L.map('map').setView(mapView.center, 13);
    L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png').addTo(map);

    const driverIcon = L.icon({
      iconUrl: 'https://cdn-icons-png.flaticon.com/512/758/758863.png',
      iconSize: [40, 40]
    });
    L.marker(mapView.driver, { icon: driverIcon }).addTo(map).bindPopup('Driver');
    L.marker(mapView.customer).addTo(map).bindPopup('Your Location');

    document.getElementById('eta').textContent = '25 min';

    new Chart(document.getElementById('spendingChart'), {
      type: 'bar',
      data: {
        labels: spendSeries.labels,
        datasets: [{
          label: 'Total spend (KSh)',
          data: spendSeries.totals,
          backgroundColor: '#ff9800'
        }]
      },
      options: {
        plugins: { legend: { display: false } },
        scales: { y: { beginAtZero: true } }
      }
    });
  </script>
</body>
</html>
"#;
