use crate::chart::render_weight_chart;
use crate::models::{DailySummary, Drafts, ExerciseEntry, FoodEntry, Snapshot};
use std::fmt::Write;

pub fn render_index(snapshot: &Snapshot, drafts: &Drafts, today: &DailySummary) -> String {
    fill_template(
        INDEX_HTML,
        &[
            ("CURRENT", scalar_value(snapshot.current)),
            ("GOAL", scalar_value(snapshot.goal)),
            ("CHART", render_weight_chart(&snapshot.weight)),
            ("FOOD_NAME", escape_html(&drafts.food.name)),
            ("FOOD_CALORIES", draft_value(drafts.food.calories)),
            ("FOOD_PROTEIN", draft_value(drafts.food.protein)),
            ("FOOD_LIST", food_list(&snapshot.food)),
            ("EXERCISE_NAME", escape_html(&drafts.exercise.name)),
            ("EXERCISE_DURATION", draft_value(drafts.exercise.duration)),
            ("EXERCISE_BURNED", draft_value(drafts.exercise.calories_burned)),
            ("EXERCISE_LIST", exercise_list(&snapshot.exercise)),
            ("DATE", today.date.to_string()),
            ("CONSUMED", today.calories_consumed.to_string()),
            ("BURNED", today.calories_burned.to_string()),
        ],
    )
}

/// Single pass over `{{KEY}}` placeholders, so substituted user text is
/// never scanned for placeholders itself.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = &after[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Draft number fields show blank rather than 0.
fn draft_value(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        String::new()
    } else {
        value.to_string()
    }
}

fn scalar_value(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}

fn food_list(entries: &[FoodEntry]) -> String {
    let mut html = String::new();
    for entry in entries {
        let _ = write!(
            html,
            r#"<li data-id="{}"><span>{}</span><span>{} calories</span></li>"#,
            escape_html(&entry.id),
            escape_html(&entry.name),
            entry.calories,
        );
    }
    html
}

fn exercise_list(entries: &[ExerciseEntry]) -> String {
    let mut html = String::new();
    for entry in entries {
        let _ = write!(
            html,
            r#"<li data-id="{}"><span>{} ({} mins)</span><span>{} calories</span></li>"#,
            escape_html(&entry.id),
            escape_html(&entry.name),
            entry.duration,
            entry.calories_burned,
        );
    }
    html
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Fitness &amp; Nutrition Tracker</title>
  <style>
    :root {
      --bg: #f4f5f7;
      --ink: #1f2933;
      --muted: #616e7c;
      --card: #ffffff;
      --blue: #3b82f6;
      --green: #22c55e;
      --purple: #8b5cf6;
      --shadow: 0 10px 30px rgba(31, 41, 51, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", "Helvetica Neue", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      margin: 0;
    }

    .card {
      background: var(--card);
      border-radius: 14px;
      box-shadow: var(--shadow);
      padding: 24px;
      display: grid;
      gap: 16px;
    }

    .card h2 {
      margin: 0;
      font-size: 1.25rem;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 12px;
      align-items: end;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.9rem;
      color: var(--muted);
    }

    input {
      width: 100%;
      padding: 10px;
      border: 1px solid #cbd2d9;
      border-radius: 8px;
      font-size: 1rem;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 8px;
      padding: 11px 16px;
      font-size: 1rem;
      font-weight: 600;
      color: white;
      cursor: pointer;
    }

    .btn-weight {
      background: var(--blue);
    }

    .btn-food {
      background: var(--green);
    }

    .btn-exercise {
      background: var(--purple);
    }

    ul.entries {
      list-style: none;
      margin: 0;
      padding: 0;
      max-height: 12rem;
      overflow-y: auto;
    }

    ul.entries li {
      display: flex;
      justify-content: space-between;
      padding: 8px;
      border-bottom: 1px solid #e4e7eb;
    }

    #chart {
      width: 100%;
      height: 240px;
      display: block;
    }

    .chart-line {
      fill: none;
      stroke: var(--blue);
      stroke-width: 2;
    }

    .chart-point {
      fill: white;
      stroke: var(--blue);
      stroke-width: 2;
    }

    .chart-grid {
      stroke: rgba(31, 41, 51, 0.1);
      stroke-dasharray: 3 3;
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    .summary {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 12px;
    }

    .stat {
      border-radius: 10px;
      padding: 16px;
    }

    .stat.consumed {
      background: #eff6ff;
    }

    .stat.burned {
      background: #f0fdf4;
    }

    .stat .label {
      margin: 0;
      font-size: 1.05rem;
      font-weight: 500;
    }

    .stat .value {
      margin: 4px 0 0;
      font-size: 1.6rem;
      font-weight: 700;
    }

    .stat.consumed .value {
      color: #2563eb;
    }

    .stat.burned .value {
      color: #16a34a;
    }

    .hint {
      margin: 0;
      color: var(--muted);
      font-size: 0.85rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>Fitness &amp; Nutrition Tracker</h1>

    <section class="card">
      <h2>Weight Goals</h2>
      <div class="grid">
        <form method="post" action="/weight/update">
          <label>Current Weight (kg)
            <input type="number" step="any" name="value" value="{{CURRENT}}" data-bind="/api/current" data-field="value" />
          </label>
          <button class="btn-weight" type="submit">Update Weight</button>
        </form>
        <form method="post" action="/weight/goal">
          <label>Weight Goal (kg)
            <input type="number" step="any" name="value" value="{{GOAL}}" data-bind="/api/goal" data-field="value" />
          </label>
        </form>
      </div>
    </section>

    <section class="card">
      <h2>Weight Progress</h2>
      {{CHART}}
    </section>

    <section class="card">
      <h2>Food Diary</h2>
      <form class="grid" method="post" action="/food/add">
        <input type="text" name="name" placeholder="Food name" value="{{FOOD_NAME}}" data-bind="/api/draft/food" data-field="name" />
        <input type="number" step="any" name="calories" placeholder="Calories" value="{{FOOD_CALORIES}}" data-bind="/api/draft/food" data-field="calories" />
        <input type="number" step="any" name="protein" placeholder="Protein (g)" value="{{FOOD_PROTEIN}}" data-bind="/api/draft/food" data-field="protein" />
        <button class="btn-food" type="submit">Add Food</button>
      </form>
      <ul class="entries" id="food-list">{{FOOD_LIST}}</ul>
    </section>

    <section class="card">
      <h2>Exercise Log</h2>
      <form class="grid" method="post" action="/exercise/add">
        <input type="text" name="name" placeholder="Exercise name" value="{{EXERCISE_NAME}}" data-bind="/api/draft/exercise" data-field="name" />
        <input type="number" step="any" name="duration" placeholder="Duration (minutes)" value="{{EXERCISE_DURATION}}" data-bind="/api/draft/exercise" data-field="duration" />
        <input type="number" step="any" name="calories_burned" placeholder="Calories burned" value="{{EXERCISE_BURNED}}" data-bind="/api/draft/exercise" data-field="caloriesBurned" />
        <button class="btn-exercise" type="submit">Add Exercise</button>
      </form>
      <ul class="entries" id="exercise-list">{{EXERCISE_LIST}}</ul>
    </section>

    <section class="card">
      <h2>Daily Summary</h2>
      <div class="summary">
        <div class="stat consumed">
          <p class="label">Calories Consumed</p>
          <p class="value" id="consumed">{{CONSUMED}}</p>
        </div>
        <div class="stat burned">
          <p class="label">Calories Burned</p>
          <p class="value" id="burned">{{BURNED}}</p>
        </div>
      </div>
      <p class="hint">Totals for {{DATE}} (UTC).</p>
    </section>
  </main>

  <script>
    // Edits go to the server one at a time, in order. A form only submits
    // once every earlier edit has landed, so a late edit cannot refill a
    // draft the submit just cleared.
    let pending = Promise.resolve();

    document.querySelectorAll('[data-bind]').forEach((input) => {
      input.addEventListener('input', () => {
        const body = JSON.stringify({ [input.dataset.field]: input.value });
        pending = pending
          .then(() => fetch(input.dataset.bind, {
            method: 'PUT',
            headers: { 'content-type': 'application/json' },
            body
          }))
          .catch(() => {});
      });
    });

    document.querySelectorAll('form').forEach((form) => {
      form.addEventListener('submit', (event) => {
        event.preventDefault();
        pending.then(() => form.submit());
      });
    });
  </script>
</body>
</html>
"#;
