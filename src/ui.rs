use crate::consent::ConsentState;
use crate::models::StatsResponse;

pub fn render_index(stats: &StatsResponse, consent: ConsentState) -> String {
    INDEX_HTML
        .replace("{{TOTAL_TASKS}}", &stats.total_tasks.to_string())
        .replace("{{ACTIVE_TASKS}}", &stats.active_tasks.to_string())
        .replace("{{TOTAL_TIME}}", &format_hms(stats.total_time_ms))
        .replace("{{CONSENT_STATE}}", consent_attr(consent))
}

pub fn format_hms(ms: i64) -> String {
    let total_seconds = ms.max(0) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

fn consent_attr(consent: ConsentState) -> &'static str {
    match consent {
        ConsentState::Unset => "unset",
        ConsentState::EssentialOnly => "essential_only",
        ConsentState::Full => "full",
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en" data-theme="light">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Task Timer</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --muted: #6b645d;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --tile: #ffffff;
      --border: rgba(47, 72, 88, 0.08);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    [data-theme="dark"] {
      --bg-1: #1c1b22;
      --bg-2: #2f2a3d;
      --ink: #f3efe9;
      --muted: #a8a199;
      --accent: #ff8a6b;
      --accent-2: #9fc0d4;
      --card: rgba(34, 32, 40, 0.92);
      --tile: #2a2831;
      --border: rgba(159, 192, 212, 0.14);
      --shadow: 0 24px 60px rgba(0, 0, 0, 0.5);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%), var(--bg-1);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      align-items: flex-start;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: var(--muted);
      font-size: 1rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(170px, 1fr));
      gap: 16px;
    }

    .stat {
      background: var(--tile);
      border-radius: 18px;
      padding: 18px;
      border: 1px solid var(--border);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.live {
      color: var(--accent);
    }

    form.create {
      display: grid;
      grid-template-columns: 2fr 3fr 1fr auto;
      gap: 12px;
      align-items: end;
    }

    form.create label {
      display: grid;
      gap: 6px;
      font-size: 0.85rem;
      color: var(--muted);
    }

    input, select, textarea {
      font: inherit;
      color: var(--ink);
      background: var(--tile);
      border: 1px solid var(--border);
      border-radius: 12px;
      padding: 10px 12px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    .btn-primary {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    .btn-quiet {
      background: transparent;
      color: var(--accent-2);
      border: 1px solid var(--border);
    }

    .columns {
      display: grid;
      grid-template-columns: 3fr 2fr;
      gap: 20px;
      align-items: start;
    }

    .task-item, .running-item {
      background: var(--tile);
      border: 1px solid var(--border);
      border-radius: 18px;
      padding: 16px;
      display: grid;
      gap: 10px;
      margin-bottom: 12px;
    }

    .task-head {
      display: flex;
      justify-content: space-between;
      align-items: baseline;
      gap: 12px;
    }

    .task-name {
      margin: 0;
      font-size: 1.1rem;
      font-weight: 600;
    }

    .task-times {
      text-align: right;
      display: grid;
    }

    .session-time {
      font-variant-numeric: tabular-nums;
      font-weight: 600;
      color: var(--accent);
    }

    .total-time {
      font-size: 0.8rem;
      color: var(--muted);
      font-variant-numeric: tabular-nums;
    }

    .task-desc {
      margin: 0;
      color: var(--muted);
      font-size: 0.92rem;
    }

    .task-category {
      display: inline-block;
      font-size: 0.75rem;
      padding: 2px 10px;
      border-radius: 999px;
      background: var(--border);
      color: var(--accent-2);
    }

    .task-controls {
      display: flex;
      gap: 8px;
      flex-wrap: wrap;
    }

    .task-controls button {
      padding: 8px 14px;
      font-size: 0.85rem;
      background: var(--tile);
      border: 1px solid var(--border);
      color: var(--ink);
    }

    .task-controls button[data-action="toggle"] {
      background: var(--accent-2);
      color: var(--bg-1);
      border: none;
    }

    .empty {
      color: var(--muted);
      font-size: 0.95rem;
      padding: 12px 4px;
    }

    .chart-card {
      background: var(--tile);
      border-radius: 20px;
      padding: 16px;
      border: 1px solid var(--border);
      display: grid;
      gap: 10px;
    }

    .chart-card h2 {
      margin: 0;
      font-size: 1.1rem;
    }

    .charts {
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 20px;
    }

    svg text {
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      fill: var(--muted);
      font-size: 11px;
    }

    .bar {
      fill: var(--accent);
    }

    .axis {
      stroke: var(--border);
    }

    .legend {
      display: grid;
      gap: 6px;
      font-size: 0.85rem;
    }

    .legend-row {
      display: flex;
      align-items: center;
      gap: 8px;
    }

    .legend-swatch {
      width: 12px;
      height: 12px;
      border-radius: 3px;
      flex: none;
    }

    .status {
      font-size: 0.95rem;
      color: var(--muted);
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .toolbar {
      display: flex;
      gap: 10px;
      flex-wrap: wrap;
      align-items: center;
    }

    .consent-banner {
      display: none;
      position: fixed;
      left: 50%;
      bottom: 24px;
      transform: translateX(-50%);
      width: min(640px, calc(100% - 32px));
      background: var(--tile);
      border: 1px solid var(--border);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 20px;
      gap: 14px;
      z-index: 20;
    }

    .consent-banner.active {
      display: grid;
    }

    .consent-banner p {
      margin: 0;
      font-size: 0.92rem;
      color: var(--muted);
    }

    .consent-actions {
      display: flex;
      gap: 10px;
      flex-wrap: wrap;
    }

    .modal-overlay {
      display: none;
      position: fixed;
      inset: 0;
      background: rgba(0, 0, 0, 0.4);
      place-items: center;
      z-index: 30;
    }

    .modal-overlay.active {
      display: grid;
    }

    .modal {
      width: min(480px, calc(100% - 32px));
      background: var(--tile);
      border-radius: 20px;
      padding: 24px;
      display: grid;
      gap: 16px;
    }

    .modal h2 {
      margin: 0;
    }

    .consent-option {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
      font-size: 0.92rem;
    }

    .consent-option small {
      display: block;
      color: var(--muted);
    }

    @media (max-width: 720px) {
      .columns, .charts {
        grid-template-columns: 1fr;
      }
      form.create {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body data-consent="{{CONSENT_STATE}}">
  <main class="app">
    <header>
      <div>
        <h1>Task Timer</h1>
        <p class="subtitle">Name a task, start its stopwatch, see where the hours go.</p>
      </div>
      <button class="btn-quiet" id="dark-toggle" type="button">Dark mode</button>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Total tasks</span>
        <span class="value" id="total-tasks">{{TOTAL_TASKS}}</span>
      </div>
      <div class="stat">
        <span class="label">Active now</span>
        <span class="value" id="active-tasks">{{ACTIVE_TASKS}}</span>
      </div>
      <div class="stat">
        <span class="label">Total time</span>
        <span class="value live" id="total-time">{{TOTAL_TIME}}</span>
      </div>
    </section>

    <form class="create" id="create-form">
      <label>Task name
        <input id="task-name" type="text" placeholder="Write report" />
      </label>
      <label>Description
        <input id="task-description" type="text" placeholder="Optional notes" />
      </label>
      <label>Category
        <select id="task-category">
          <option value=""></option>
          <option>Work</option>
          <option>Study</option>
          <option>Personal</option>
          <option>Health</option>
          <option>Chores</option>
        </select>
      </label>
      <button class="btn-primary" type="submit">Add task</button>
    </form>

    <div class="columns">
      <section>
        <h2>Tasks</h2>
        <div id="task-list"></div>
      </section>
      <section>
        <h2>Running</h2>
        <div id="running-list"></div>
      </section>
    </div>

    <section class="charts">
      <div class="chart-card">
        <h2>Time by category</h2>
        <svg id="pie-chart" viewBox="0 0 200 200" role="img" aria-label="Time by category"></svg>
        <div class="legend" id="pie-legend"></div>
      </div>
      <div class="chart-card">
        <h2>Hours, last 7 days</h2>
        <svg id="bar-chart" viewBox="0 0 320 200" role="img" aria-label="Hours per day"></svg>
      </div>
    </section>

    <div class="toolbar">
      <button class="btn-quiet" id="export-btn" type="button">Export JSON</button>
      <button class="btn-quiet" id="import-btn" type="button">Import JSON</button>
      <input id="import-file" type="file" accept="application/json" hidden />
      <button class="btn-quiet" id="settings-btn" type="button">Storage settings</button>
    </div>

    <div class="status" id="status"></div>
  </main>

  <div class="consent-banner" id="consent-banner">
    <p>This app can keep your tasks in the server's storage so they survive a reload,
       and can back them up to a file you download. Nothing is stored until you choose.</p>
    <div class="consent-actions">
      <button class="btn-primary" id="consent-accept" type="button">Accept all</button>
      <button class="btn-quiet" id="consent-essential" type="button">Essential only</button>
      <button class="btn-quiet" id="consent-settings" type="button">Settings</button>
    </div>
  </div>

  <div class="modal-overlay" id="settings-modal">
    <div class="modal">
      <h2>Storage settings</h2>
      <label class="consent-option">
        <span>Essential<small>Required for the app to work. Always on.</small></span>
        <input type="checkbox" id="opt-essential" checked disabled />
      </label>
      <label class="consent-option">
        <span>Task storage<small>Keep tasks on the server between visits. Turning this
          off deletes anything already stored.</small></span>
        <input type="checkbox" id="opt-task-storage" />
      </label>
      <label class="consent-option">
        <span>File backup<small>Allow JSON export and import.</small></span>
        <input type="checkbox" id="opt-file-storage" />
      </label>
      <div class="consent-actions">
        <button class="btn-primary" id="settings-save" type="button">Save preferences</button>
        <button class="btn-quiet" id="settings-close" type="button">Close</button>
      </div>
    </div>
  </div>

  <script>
    const totalTasksEl = document.getElementById('total-tasks');
    const activeTasksEl = document.getElementById('active-tasks');
    const totalTimeEl = document.getElementById('total-time');
    const taskListEl = document.getElementById('task-list');
    const runningListEl = document.getElementById('running-list');
    const statusEl = document.getElementById('status');
    const pieEl = document.getElementById('pie-chart');
    const pieLegendEl = document.getElementById('pie-legend');
    const barEl = document.getElementById('bar-chart');
    const bannerEl = document.getElementById('consent-banner');
    const modalEl = document.getElementById('settings-modal');
    const optTaskStorage = document.getElementById('opt-task-storage');
    const optFileStorage = document.getElementById('opt-file-storage');

    const PIE_COLORS = [
      '#3b82f6', '#ef4444', '#22c55e', '#f59e0b',
      '#6366f1', '#ec4899', '#8b5cf6', '#14b8a6'
    ];

    let tasks = [];
    let consent = { state: document.body.dataset.consent, preferences: { task_storage: false, file_storage: false } };
    let tickerActive = false;
    let statusTimer = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
      clearTimeout(statusTimer);
      if (message) {
        statusTimer = setTimeout(() => setStatus('', ''), 3000);
      }
    };

    const escapeHtml = (value) =>
      String(value).replace(/[&<>"']/g, (ch) => ({
        '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;'
      }[ch]));

    const formatTime = (ms) => {
      const total = Math.max(0, Math.floor(ms / 1000));
      const hours = Math.floor(total / 3600);
      const minutes = Math.floor((total % 3600) / 60);
      const seconds = total % 60;
      return [hours, minutes, seconds].map((n) => String(n).padStart(2, '0')).join(':');
    };

    const sessionNow = (task, now) =>
      task.current_session_time +
      (task.is_running && task.last_start_time ? Math.max(0, now - task.last_start_time) : 0);

    const totalNow = (task, now) =>
      task.total_time_spent +
      (task.is_running && task.last_start_time ? Math.max(0, now - task.last_start_time) : 0);

    const updateTiles = () => {
      const now = Date.now();
      totalTasksEl.textContent = tasks.length;
      activeTasksEl.textContent = tasks.filter((t) => t.is_running).length;
      totalTimeEl.textContent = formatTime(tasks.reduce((sum, t) => sum + totalNow(t, now), 0));
    };

    const updateRunningDisplays = () => {
      const now = Date.now();
      tasks.forEach((task) => {
        document.querySelectorAll('[data-session="' + task.id + '"]').forEach((el) => {
          el.textContent = formatTime(sessionNow(task, now));
        });
        document.querySelectorAll('[data-total="' + task.id + '"]').forEach((el) => {
          el.textContent = 'Total: ' + formatTime(totalNow(task, now));
        });
      });
    };

    // Display-only frame loop. Re-schedules itself only while something is
    // running; never fetches, never mutates.
    const tick = () => {
      updateTiles();
      updateRunningDisplays();
      if (tasks.some((t) => t.is_running)) {
        requestAnimationFrame(tick);
      } else {
        tickerActive = false;
      }
    };

    const ensureTicker = () => {
      updateTiles();
      updateRunningDisplays();
      if (!tickerActive && tasks.some((t) => t.is_running)) {
        tickerActive = true;
        requestAnimationFrame(tick);
      }
    };

    const renderTasks = () => {
      if (!tasks.length) {
        taskListEl.innerHTML = '<div class="empty">No tasks yet. Add one above.</div>';
      } else {
        taskListEl.innerHTML = tasks.map((task) => `
          <div class="task-item">
            <div class="task-head">
              <h3 class="task-name">${escapeHtml(task.name)}</h3>
              <div class="task-times">
                <span class="session-time" data-session="${task.id}"></span>
                <small class="total-time" data-total="${task.id}"></small>
              </div>
            </div>
            ${task.description ? `<p class="task-desc">${escapeHtml(task.description)}</p>` : ''}
            ${task.category ? `<span class="task-category">${escapeHtml(task.category)}</span>` : ''}
            <div class="task-controls">
              <button type="button" data-action="toggle" data-id="${task.id}">${task.is_running ? 'Pause' : 'Start'}</button>
              <button type="button" data-action="reset" data-id="${task.id}">Reset</button>
              <button type="button" data-action="delete" data-id="${task.id}">Delete</button>
            </div>
          </div>
        `).join('');
      }

      const running = tasks.filter((t) => t.is_running);
      runningListEl.innerHTML = running.length
        ? running.map((task) => `
            <div class="running-item">
              <div class="task-head">
                <span class="task-name">${escapeHtml(task.name)}</span>
                ${task.category ? `<span class="task-category">${escapeHtml(task.category)}</span>` : ''}
              </div>
              <span class="session-time" data-session="${task.id}"></span>
              <div class="task-controls">
                <button type="button" data-action="toggle" data-id="${task.id}">Pause</button>
                <button type="button" data-action="reset" data-id="${task.id}">Reset</button>
              </div>
            </div>
          `).join('')
        : '<div class="empty">No active tasks</div>';

      ensureTicker();
    };

    const renderPie = (slices) => {
      pieLegendEl.innerHTML = '';
      const total = slices.reduce((sum, s) => sum + s.total_ms, 0);
      if (!total) {
        pieEl.innerHTML = '<text x="100" y="104" text-anchor="middle">No time recorded yet</text>';
        return;
      }

      const cx = 100, cy = 100, r = 84;
      let markup = '';
      if (slices.filter((s) => s.total_ms > 0).length === 1) {
        const only = slices.findIndex((s) => s.total_ms > 0);
        markup = `<circle cx="${cx}" cy="${cy}" r="${r}" fill="${PIE_COLORS[only % PIE_COLORS.length]}" />`;
      } else {
        let angle = -Math.PI / 2;
        markup = slices.map((slice, index) => {
          if (!slice.total_ms) return '';
          const sweep = (slice.total_ms / total) * Math.PI * 2;
          const x1 = cx + r * Math.cos(angle);
          const y1 = cy + r * Math.sin(angle);
          angle += sweep;
          const x2 = cx + r * Math.cos(angle);
          const y2 = cy + r * Math.sin(angle);
          const large = sweep > Math.PI ? 1 : 0;
          const color = PIE_COLORS[index % PIE_COLORS.length];
          return `<path d="M ${cx} ${cy} L ${x1.toFixed(2)} ${y1.toFixed(2)} A ${r} ${r} 0 ${large} 1 ${x2.toFixed(2)} ${y2.toFixed(2)} Z" fill="${color}" />`;
        }).join('');
      }
      pieEl.innerHTML = markup;

      pieLegendEl.innerHTML = slices.map((slice, index) => `
        <div class="legend-row">
          <span class="legend-swatch" style="background:${PIE_COLORS[index % PIE_COLORS.length]}"></span>
          <span>${escapeHtml(slice.category)} &mdash; ${formatTime(slice.total_ms)}</span>
        </div>
      `).join('');
    };

    const renderBars = (points) => {
      const width = 320, height = 200, padX = 16, padBottom = 28, padTop = 18;
      const max = Math.max(...points.map((p) => p.hours), 1);
      const slot = (width - padX * 2) / points.length;
      const barWidth = slot * 0.6;

      const bars = points.map((point, index) => {
        const h = (point.hours / max) * (height - padTop - padBottom);
        const x = padX + index * slot + (slot - barWidth) / 2;
        const y = height - padBottom - h;
        const value = point.hours ? `<text x="${x + barWidth / 2}" y="${y - 5}" text-anchor="middle">${point.hours.toFixed(1)}</text>` : '';
        return `
          <rect class="bar" x="${x.toFixed(1)}" y="${y.toFixed(1)}" width="${barWidth.toFixed(1)}" height="${h.toFixed(1)}" rx="4" />
          ${value}
          <text x="${x + barWidth / 2}" y="${height - 10}" text-anchor="middle">${point.label}</text>
        `;
      }).join('');

      barEl.innerHTML = `<line class="axis" x1="${padX}" y1="${height - padBottom}" x2="${width - padX}" y2="${height - padBottom}" />${bars}`;
    };

    const loadStats = async () => {
      const res = await fetch('/api/stats');
      if (!res.ok) {
        throw new Error('Unable to load stats');
      }
      const stats = await res.json();
      renderPie(stats.categories);
      renderBars(stats.weekday_hours);
    };

    const loadTasks = async () => {
      const res = await fetch('/api/tasks');
      if (!res.ok) {
        throw new Error('Unable to load tasks');
      }
      tasks = (await res.json()).tasks;
      renderTasks();
    };

    const applyMutation = (body) => {
      tasks = body.tasks;
      renderTasks();
      loadStats().catch((err) => setStatus(err.message, 'error'));
      if (body.storage && body.storage.error) {
        setStatus(body.storage.error, 'error');
      } else if (body.storage && body.storage.persisted) {
        setStatus('Tasks saved', 'ok');
      }
    };

    // Task buttons dispatch through this table; the markup carries only
    // data-action / data-id.
    const taskActions = {
      toggle: (id) => fetch(`/api/tasks/${id}/toggle`, { method: 'POST' }),
      reset: (id) => fetch(`/api/tasks/${id}/reset`, { method: 'POST' }),
      delete: (id) => fetch(`/api/tasks/${id}`, { method: 'DELETE' })
    };

    const dispatchTaskAction = async (event) => {
      const button = event.target.closest('button[data-action]');
      if (!button) return;
      const run = taskActions[button.dataset.action];
      if (!run) return;
      try {
        const res = await run(button.dataset.id);
        if (!res.ok) {
          throw new Error(await res.text() || 'Request failed');
        }
        applyMutation(await res.json());
      } catch (err) {
        setStatus(err.message, 'error');
      }
    };

    taskListEl.addEventListener('click', dispatchTaskAction);
    runningListEl.addEventListener('click', dispatchTaskAction);

    document.getElementById('create-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const payload = {
        name: document.getElementById('task-name').value,
        description: document.getElementById('task-description').value,
        category: document.getElementById('task-category').value
      };
      try {
        const res = await fetch('/api/tasks', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify(payload)
        });
        if (!res.ok) {
          throw new Error(await res.text() || 'Request failed');
        }
        applyMutation(await res.json());
        event.target.reset();
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    const applyConsent = (body) => {
      consent = body;
      bannerEl.classList.toggle('active', body.state === 'unset');
      optTaskStorage.checked = body.preferences.task_storage;
      optFileStorage.checked = body.preferences.file_storage;
      if (body.message) {
        setStatus(body.message, body.message.startsWith('error') ? 'error' : 'ok');
      }
    };

    const sendConsent = async (taskStorage, fileStorage) => {
      try {
        const res = await fetch('/api/consent', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ task_storage: taskStorage, file_storage: fileStorage })
        });
        if (!res.ok) {
          throw new Error(await res.text() || 'Request failed');
        }
        applyConsent(await res.json());
        modalEl.classList.remove('active');
        loadTasks().catch((err) => setStatus(err.message, 'error'));
      } catch (err) {
        setStatus(err.message, 'error');
      }
    };

    document.getElementById('consent-accept').addEventListener('click', () => sendConsent(true, true));
    document.getElementById('consent-essential').addEventListener('click', () => sendConsent(false, false));
    document.getElementById('consent-settings').addEventListener('click', () => modalEl.classList.add('active'));
    document.getElementById('settings-btn').addEventListener('click', () => modalEl.classList.add('active'));
    document.getElementById('settings-close').addEventListener('click', () => modalEl.classList.remove('active'));
    document.getElementById('settings-save').addEventListener('click', () =>
      sendConsent(optTaskStorage.checked, optFileStorage.checked));

    document.getElementById('export-btn').addEventListener('click', () => {
      if (!consent.preferences.file_storage) {
        setStatus('File storage is not enabled', 'error');
        return;
      }
      window.location.href = '/api/export';
    });

    const importFileEl = document.getElementById('import-file');
    document.getElementById('import-btn').addEventListener('click', () => {
      if (!consent.preferences.file_storage) {
        setStatus('File storage is not enabled', 'error');
        return;
      }
      importFileEl.click();
    });

    importFileEl.addEventListener('change', async () => {
      const file = importFileEl.files[0];
      importFileEl.value = '';
      if (!file) return;
      try {
        const res = await fetch('/api/import', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: await file.text()
        });
        if (!res.ok) {
          throw new Error(await res.text() || 'Import failed');
        }
        applyMutation(await res.json());
        setStatus('Tasks imported', 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    const darkToggle = document.getElementById('dark-toggle');
    const setTheme = (dark) => {
      document.documentElement.setAttribute('data-theme', dark ? 'dark' : 'light');
      darkToggle.textContent = dark ? 'Light mode' : 'Dark mode';
    };
    setTheme(localStorage.getItem('darkMode') === 'true');
    darkToggle.addEventListener('click', () => {
      const dark = document.documentElement.getAttribute('data-theme') !== 'dark';
      localStorage.setItem('darkMode', String(dark));
      setTheme(dark);
    });

    const loadConsent = async () => {
      const res = await fetch('/api/consent');
      if (!res.ok) {
        throw new Error('Unable to load preferences');
      }
      applyConsent(await res.json());
    };

    Promise.all([loadTasks(), loadStats(), loadConsent()])
      .catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_hms_pads_fields() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(1_000), "00:00:01");
        assert_eq!(format_hms(3_661_000), "01:01:01");
        assert_eq!(format_hms(-5), "00:00:00");
    }
}
