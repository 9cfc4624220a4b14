use crate::entry::FitnessEntry;
use html_escape::{encode_safe, encode_text};
use std::fmt::Write;

const NAV: &str = r#"<nav><a href="/">Log</a> | <a href="/chat">Coach</a> | <a href="/device">Device</a> | <a href="/documentation">Docs</a> | <a href="/export">Export CSV</a></nav>"#;

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{NAV}\n{body}\n</body>\n</html>\n",
        encode_text(title)
    )
}

/// the entry table plus add and delete forms
pub fn index_page(entries: &[FitnessEntry]) -> String {
    let mut body = String::from(
        r#"<h1>Fitness Log</h1>
<form method="post" action="/add">
<input type="date" name="date" required>
<input type="number" name="steps" placeholder="Steps" required>
<input type="number" name="calories" placeholder="Calories" required>
<input type="number" step="any" name="distance" placeholder="Distance (km)" required>
<input type="number" name="active_minutes" placeholder="Active minutes" required>
<button type="submit">Add</button>
</form>
"#,
    );

    if entries.is_empty() {
        body.push_str("<p>No entries yet.</p>");
        return layout("Fitness Log", &body);
    }

    body.push_str(
        "<table>\n<tr><th>Date</th><th>Steps</th><th>Calories</th><th>Distance</th><th>Active minutes</th><th></th></tr>\n",
    );
    for e in entries {
        let _ = writeln!(
            body,
            r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><form method="post" action="/delete"><input type="hidden" name="date" value="{}"><button type="submit">Delete</button></form></td></tr>"#,
            encode_safe(&e.date),
            e.steps,
            e.calories,
            e.distance,
            e.active_minutes,
            encode_safe(&e.date),
        );
    }
    body.push_str("</table>");

    layout("Fitness Log", &body)
}

pub fn chat_page() -> String {
    layout(
        "Fitness Coach",
        r#"<h1>Fitness Coach</h1>
<div id="log"></div>
<form id="chat"><input id="message" autocomplete="off"><button type="submit">Send</button></form>
<script>
document.getElementById("chat").addEventListener("submit", async (ev) => {
  ev.preventDefault();
  const input = document.getElementById("message");
  const log = document.getElementById("log");
  const message = input.value;
  input.value = "";
  const you = document.createElement("p");
  you.textContent = "You: " + message;
  log.appendChild(you);
  const res = await fetch("/chat", {
    method: "POST",
    headers: {"Content-Type": "application/json"},
    body: JSON.stringify({message}),
  });
  const data = await res.json();
  const bot = document.createElement("p");
  bot.textContent = "Coach: " + (data.response ?? data.error);
  log.appendChild(bot);
});
</script>"#,
    )
}

pub fn device_page() -> String {
    layout(
        "Devices",
        "<h1>Devices</h1>\n<p>Copy the daily totals from your tracker or phone into the log form.</p>",
    )
}

pub fn documentation_page() -> String {
    layout(
        "Documentation",
        r#"<h1>Documentation</h1>
<ul>
<li><code>POST /add</code> form fields <code>date, steps, calories, distance, active_minutes</code></li>
<li><code>POST /delete</code> form field <code>date</code>, removes the first entry with that date</li>
<li><code>POST /chat</code> json <code>{"message": "..."}</code>, replies <code>{"response": "..."}</code></li>
<li><code>GET /export</code> all entries as csv</li>
<li><code>GET /stats</code> entry count with the first and last entries</li>
</ul>"#,
    )
}
