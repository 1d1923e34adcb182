use crate::calendar::{MonthRef, WEEKDAY_LABELS};
use crate::dates::CalendarDate;
use crate::habits::{COLOR_OPTIONS, ICON_OPTIONS};

pub fn render_index(today: CalendarDate) -> String {
    let month = MonthRef::containing(today);
    INDEX_HTML
        .replace("{{TODAY}}", &today.key())
        .replace("{{YEAR}}", &month.year.to_string())
        .replace("{{MONTH}}", &month.month.to_string())
        .replace("{{ICONS}}", &options_json(&ICON_OPTIONS))
        .replace("{{COLORS}}", &options_json(&COLOR_OPTIONS))
        .replace("{{WEEKDAYS}}", &weekday_header())
}

fn options_json(options: &[&str]) -> String {
    serde_json::to_string(options).unwrap_or_else(|_| "[]".to_string())
}

fn weekday_header() -> String {
    WEEKDAY_LABELS
        .iter()
        .map(|label| format!(r#"<div class="weekday">{label}</div>"#))
        .collect()
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Tracker</title>
  <style>
    :root {
      --bg-1: #fff0f7;
      --bg-2: #f3e5ff;
      --ink: #3a2a3f;
      --muted: #8a7a90;
      --accent: #e91e8c;
      --card: rgba(255, 255, 255, 0.9);
      --cell: #fff9fb;
      --shadow: 0 24px 60px rgba(120, 60, 140, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), var(--bg-2) 60%, #ffe4f1 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(900px, 100%);
      display: grid;
      gap: 24px;
    }

    header {
      text-align: center;
    }

    h1 {
      margin: 0;
      color: var(--accent);
      font-size: clamp(2rem, 4vw, 2.6rem);
    }

    .subtitle {
      margin: 6px 0 0;
      color: var(--muted);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 20px;
    }

    .stat {
      text-align: center;
    }

    .stat .value {
      display: block;
      font-size: 2rem;
      color: var(--accent);
    }

    .stat .label {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .tabs {
      display: flex;
      justify-content: center;
      gap: 8px;
    }

    .tab, button {
      border: 2px solid var(--accent);
      background: white;
      color: var(--accent);
      border-radius: 999px;
      padding: 8px 18px;
      font: inherit;
      cursor: pointer;
    }

    .tab.active, button.primary {
      background: var(--accent);
      color: white;
    }

    .hidden {
      display: none;
    }

    form.add {
      display: grid;
      gap: 12px;
    }

    form.add input[type=text] {
      border: 2px solid #f5c6de;
      border-radius: 12px;
      padding: 10px 12px;
      font: inherit;
    }

    .choices {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    .choice {
      width: 40px;
      height: 40px;
      padding: 0;
      border-radius: 12px;
      border: 2px solid transparent;
    }

    .choice.selected {
      border-color: var(--ink);
    }

    .habit {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
      border: 2px solid;
    }

    .habit .icon {
      font-size: 1.8rem;
    }

    .habit .badges {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .check {
      width: 48px;
      height: 48px;
      padding: 0;
      font-size: 1.4rem;
    }

    .calendar-head {
      display: flex;
      align-items: center;
      justify-content: space-between;
    }

    .filters {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
      margin: 12px 0;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
    }

    .weekday {
      text-align: center;
      color: var(--muted);
      padding: 4px;
    }

    .day {
      aspect-ratio: 1;
      border-radius: 12px;
      background: var(--cell);
      display: flex;
      flex-direction: column;
      align-items: center;
      justify-content: center;
    }

    .day.today {
      outline: 2px solid var(--accent);
      font-weight: bold;
    }

    .dots {
      display: flex;
      gap: 2px;
      margin-top: 4px;
    }

    .dot {
      width: 6px;
      height: 6px;
      border-radius: 50%;
    }

    .status {
      min-height: 1.2em;
      text-align: center;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: #c62828;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Habit Tracker</h1>
      <p class="subtitle">Build habits one day at a time.</p>
    </header>

    <section class="panel">
      <div class="card stat">
        <span id="active" class="value">0</span>
        <span class="label">Active habits</span>
      </div>
      <div class="card stat">
        <span id="done-today" class="value">0</span>
        <span class="label">Completed today</span>
      </div>
      <div class="card stat">
        <span id="streak-days" class="value">0</span>
        <span class="label">Total streak days</span>
      </div>
    </section>

    <nav class="tabs" role="tablist">
      <button class="tab active" type="button" data-tab="habits" role="tab">My habits</button>
      <button class="tab" type="button" data-tab="calendar" role="tab">Calendar</button>
    </nav>

    <section id="tab-habits">
      <form class="add card" id="add-form">
        <input type="text" id="name" placeholder="e.g., Morning Exercise" autocomplete="off" />
        <div class="choices" id="icons"></div>
        <div class="choices" id="colors"></div>
        <button class="primary" id="create" type="submit" disabled>Create habit</button>
      </form>
      <div id="habits"></div>
    </section>

    <section id="tab-calendar" class="card hidden">
      <div class="calendar-head">
        <button type="button" id="prev">&lsaquo;</button>
        <h2 id="month-title"></h2>
        <button type="button" id="next">&rsaquo;</button>
      </div>
      <div class="filters" id="filters"></div>
      <div class="grid">{{WEEKDAYS}}</div>
      <div class="grid" id="grid"></div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const TODAY = '{{TODAY}}';
    const ICONS = {{ICONS}};
    const COLORS = {{COLORS}};

    const state = {
      year: {{YEAR}},
      month: {{MONTH}},
      habit: null,
      habits: [],
      icon: ICONS[0],
      color: COLORS[0],
    };

    const $ = (id) => document.getElementById(id);
    const statusEl = $('status');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const postJson = (url, body) => request(url, {
      method: 'POST',
      headers: { 'content-type': 'application/json' },
      body: JSON.stringify(body),
    });

    const renderChoices = () => {
      $('icons').replaceChildren(...ICONS.map((icon) => {
        const button = document.createElement('button');
        button.type = 'button';
        button.className = 'choice' + (icon === state.icon ? ' selected' : '');
        button.textContent = icon;
        button.onclick = () => { state.icon = icon; renderChoices(); };
        return button;
      }));
      $('colors').replaceChildren(...COLORS.map((color) => {
        const button = document.createElement('button');
        button.type = 'button';
        button.className = 'choice' + (color === state.color ? ' selected' : '');
        button.style.background = color;
        button.onclick = () => { state.color = color; renderChoices(); };
        return button;
      }));
    };

    const renderHabits = (stats) => {
      $('active').textContent = stats.active_habits;
      $('done-today').textContent = stats.completed_today;
      $('streak-days').textContent = stats.total_streak_days;
      state.habits = stats.habits;

      if (!stats.habits.length) {
        $('habits').innerHTML = '<div class="card stat">No habits yet! Create your first one above.</div>';
        return;
      }

      $('habits').replaceChildren(...stats.habits.map((habit) => {
        const card = document.createElement('div');
        card.className = 'card habit';
        card.style.borderColor = habit.color;

        const info = document.createElement('div');
        const title = document.createElement('h3');
        title.textContent = habit.icon + ' ' + habit.name;
        const badges = document.createElement('div');
        badges.className = 'badges';
        const days = habit.current_streak === 1 ? 'day' : 'days';
        badges.textContent = `🔥 ${habit.current_streak} ${days} · Best: ${habit.longest_streak}`;
        info.append(title, badges);

        const check = document.createElement('button');
        check.type = 'button';
        check.className = 'check' + (habit.completed_today ? ' primary' : '');
        check.style.borderColor = habit.color;
        check.style.background = habit.completed_today ? habit.color : 'white';
        check.textContent = habit.completed_today ? '✓' : '';
        check.onclick = () => toggle(habit.id).catch((err) => setStatus(err.message, 'error'));

        card.append(info, check);
        return card;
      }));
    };

    const renderCalendar = (calendar) => {
      $('month-title').textContent = calendar.title;
      $('prev').disabled = !calendar.previous;
      $('next').disabled = !calendar.next;
      $('prev').onclick = () => goToMonth(calendar.previous);
      $('next').onclick = () => goToMonth(calendar.next);

      const all = document.createElement('button');
      all.type = 'button';
      all.textContent = 'All habits';
      all.className = state.habit === null ? 'primary' : '';
      all.onclick = () => { state.habit = null; loadCalendar(); };
      $('filters').replaceChildren(all, ...state.habits.map((habit) => {
        const button = document.createElement('button');
        button.type = 'button';
        button.textContent = habit.icon + ' ' + habit.name;
        button.style.borderColor = habit.color;
        button.style.background = state.habit === habit.id ? habit.color : 'white';
        button.style.color = state.habit === habit.id ? 'white' : habit.color;
        button.onclick = () => { state.habit = habit.id; loadCalendar(); };
        return button;
      }));

      $('grid').replaceChildren(...calendar.cells.map((cell) => {
        const el = document.createElement('div');
        if (cell.kind === 'blank') {
          return el;
        }
        el.className = 'day' + (cell.is_today ? ' today' : '');
        const label = document.createElement('span');
        label.textContent = cell.day;
        el.append(label);

        const dots = document.createElement('div');
        dots.className = 'dots';
        const completion = cell.completion;
        if (completion.mode === 'all') {
          completion.colors.forEach((color) => {
            const dot = document.createElement('div');
            dot.className = 'dot';
            dot.style.background = color;
            dots.append(dot);
          });
        } else if (completion.completed) {
          el.style.background = completion.color + '40';
          const dot = document.createElement('div');
          dot.className = 'dot';
          dot.style.background = completion.color;
          dots.append(dot);
        }
        el.append(dots);
        return el;
      }));
    };

    const loadHabits = async () => renderHabits(await request('/api/habits'));

    const loadCalendar = async () => {
      const params = new URLSearchParams({ year: state.year, month: state.month });
      if (state.habit) {
        params.set('habit', state.habit);
      }
      renderCalendar(await request('/api/calendar?' + params));
    };

    const toggle = async (id) => {
      await postJson(`/api/habits/${encodeURIComponent(id)}/toggle`, { date: TODAY });
      await loadHabits();
      await loadCalendar();
    };

    const goToMonth = (target) => {
      if (!target) {
        return;
      }
      state.year = target.year;
      state.month = target.month;
      loadCalendar().catch((err) => setStatus(err.message, 'error'));
    };

    $('name').addEventListener('input', () => {
      $('create').disabled = !$('name').value.trim();
    });

    $('add-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const name = $('name').value.trim();
      if (!name) {
        return;
      }
      postJson('/api/habits', { name, icon: state.icon, color: state.color })
        .then(() => {
          $('name').value = '';
          $('create').disabled = true;
          state.icon = ICONS[0];
          state.color = COLORS[0];
          renderChoices();
          return loadHabits();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    document.querySelectorAll('.tab').forEach((tab) => {
      tab.addEventListener('click', () => {
        document.querySelectorAll('.tab').forEach((other) => other.classList.toggle('active', other === tab));
        $('tab-habits').classList.toggle('hidden', tab.dataset.tab !== 'habits');
        $('tab-calendar').classList.toggle('hidden', tab.dataset.tab !== 'calendar');
        if (tab.dataset.tab === 'calendar') {
          loadCalendar().catch((err) => setStatus(err.message, 'error'));
        }
      });
    });

    renderChoices();
    loadHabits().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
