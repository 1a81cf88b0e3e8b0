//! Presentation layer: server-rendered pages for the public site and the
//! admin panel.
//!
//! Each page fetches its own list from the JSON API on load. Blog content is
//! additionally gated client-side by a localStorage flag set when the visitor
//! submits the name/email form; that flag is presentation-only and implies no
//! server-side authorization. Failures surface as a blocking alert with the
//! server message or a generic fallback.

use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::rest::AppState;

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/sessions", get(sessions))
        .route("/book", get(book))
        .route("/testimonials", get(testimonials))
        .route("/blog", get(blog_index))
        .route("/blog/:id", get(blog_post))
        .route("/retreats", get(retreats))
        .route("/admin/login", get(admin_login_page))
        .route("/admin", get(admin_dashboard))
        .route("/admin/add-blog", get(admin_add_blog))
        .route("/admin/edit-blog/:id", get(admin_edit_blog))
        .route("/admin/add-retreat", get(admin_add_retreat))
        .route("/admin/edit-retreat/:id", get(admin_edit_retreat))
}

const STYLE: &str = r##"
body { margin: 0; font-family: Georgia, serif; color: #2f3a2f; background: #e7eddc; }
nav { display: flex; gap: 1.5rem; padding: 1rem 2rem; background: #fff; }
nav a { color: #3c5a3c; text-decoration: none; }
main { max-width: 960px; margin: 0 auto; padding: 2rem 1rem; }
h1, h2 { color: #3c5a3c; font-weight: normal; }
.card { background: #fff; border-radius: 12px; padding: 1.5rem; margin: 1rem 0; }
.btn { display: inline-block; background: #3c5a3c; color: #fff; border: 0;
       padding: 0.6rem 1.2rem; border-radius: 8px; cursor: pointer; text-decoration: none; }
label { display: block; margin-top: 0.8rem; }
input, textarea { width: 100%; padding: 0.5rem; margin-top: 0.2rem; box-sizing: border-box; }
table { width: 100%; border-collapse: collapse; background: #fff; }
th, td { text-align: left; padding: 0.5rem; border-bottom: 1px solid #e0e0e0; }
.stats { display: flex; gap: 1rem; }
.stats .card { flex: 1; text-align: center; }
blockquote { font-size: 1.2rem; font-style: italic; }
"##;

const NAV: &str = r##"<nav>
<a href="/">Home</a>
<a href="/about">About</a>
<a href="/sessions">Sessions</a>
<a href="/retreats">Retreats</a>
<a href="/blog">Blog</a>
<a href="/testimonials">Testimonials</a>
<a href="/book">Book a Session</a>
</nav>"##;

fn page(title: &str, body: &str, script: &str) -> Html<String> {
    let mut out = String::with_capacity(STYLE.len() + body.len() + script.len() + 1024);
    out.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str("<title>");
    out.push_str(title);
    out.push_str(" · Ever Evolving Expression</title>\n<style>");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str(NAV);
    out.push_str("\n<main>\n");
    out.push_str(body);
    out.push_str("\n</main>\n<script>\n");
    out.push_str(script);
    out.push_str("\n</script>\n</body>\n</html>\n");
    Html(out)
}

/// Shared client-side helpers injected into every dynamic page.
const HELPERS_JS: &str = r##"
async function apiGet(url) {
  const res = await fetch(url);
  const data = await res.json();
  if (!res.ok) throw new Error(data.message || 'Something went wrong');
  return data;
}
async function apiSend(url, method, body) {
  const res = await fetch(url, {
    method, headers: { 'Content-Type': 'application/json' },
    body: body === undefined ? undefined : JSON.stringify(body),
  });
  const data = await res.json();
  if (!res.ok) throw new Error(data.message || 'Something went wrong');
  return data;
}
function esc(s) {
  return String(s).replace(/[&<>"]/g, c => ({'&':'&amp;','<':'&lt;','>':'&gt;','"':'&quot;'}[c]));
}
"##;

// --- public pages ---

async fn home() -> Html<String> {
    page(
        "Home",
        r##"<section>
<h1>ever evolving expression</h1>
<p>We are born with our own unique expression, a way of being true to
ourselves. Through conditioning and trauma our authentic expression is
masked, suppressed usually with the intent of protecting ourselves.</p>
<p>As we heal and free ourselves from these limiting belief structures we
built to protect us, we uncover our true selves and make conscious choices
of how to be. Let this work be one of the stepping stones to the unveiling
of your true self and the creator within.</p>
<a class="btn" href="/book">Book a Session</a>
</section>
<section class="card"><h2>Retreats</h2><div id="retreats">Loading…</div></section>
<section class="card"><h2>From the blog</h2><div id="blogs">Loading…</div></section>"##,
        &format!(
            "{HELPERS_JS}\n{}",
            r##"
(async () => {
  try {
    const [retreats, blogs] = await Promise.all([
      apiGet('/api/retreats?active=true'),
      apiGet('/api/blogs?published=true'),
    ]);
    document.getElementById('retreats').innerHTML = retreats.map(r =>
      `<p><strong>${esc(r.label)}</strong> — ${esc(r.title)} ($${r.price})</p>`
    ).join('') || '<p>No retreats scheduled right now.</p>';
    document.getElementById('blogs').innerHTML = blogs.map(b =>
      `<p><a href="/blog/${b._id}">${esc(b.title)}</a> — ${esc(b.subtitle)}</p>`
    ).join('') || '<p>No posts yet.</p>';
  } catch (err) { alert(err.message); }
})();
"##
        ),
    )
}

async fn about() -> Html<String> {
    page(
        "About",
        r##"<h1>About</h1>
<p>This practice grew out of years of inner work: somatic therapy, breathwork
and time spent in stillness. The sessions and retreats offered here are
invitations to meet yourself honestly and gently.</p>
<p>There is no method to sell, only accompaniment. Every path back to an
authentic expression looks different, and the work adapts to yours.</p>"##,
        "",
    )
}

async fn sessions() -> Html<String> {
    page(
        "Sessions",
        r##"<h1>Sessions</h1>
<div class="card"><h2>One-to-one</h2>
<p>Ninety minutes of guided inquiry, breath and body awareness. Online or in
person.</p></div>
<div class="card"><h2>Integration</h2>
<p>Shorter follow-up conversations to ground what surfaced in a session or a
retreat into daily life.</p></div>
<a class="btn" href="/book">Book a Session</a>"##,
        "",
    )
}

async fn book() -> Html<String> {
    page(
        "Book a Session",
        r##"<h1>Book a Session</h1>
<p>Leave your name and email and you will hear back within two days to find
a time together.</p>
<form id="book-form" class="card">
<label>Name<input name="name" required></label>
<label>Email<input name="email" type="email" required></label>
<p><button class="btn" type="submit">Request a session</button></p>
</form>"##,
        &format!(
            "{HELPERS_JS}\n{}",
            r##"
document.getElementById('book-form').addEventListener('submit', async (e) => {
  e.preventDefault();
  const form = new FormData(e.target);
  try {
    await apiSend('/api/users', 'POST', {
      name: form.get('name'), email: form.get('email'),
    });
    alert('Thank you! You will hear back soon.');
    e.target.reset();
  } catch (err) { alert(err.message); }
});
"##
        ),
    )
}

async fn testimonials() -> Html<String> {
    page(
        "Testimonials",
        r##"<h1>Kind words</h1>
<div class="card">
<blockquote id="quote"></blockquote>
<p><strong id="who"></strong> <span id="title"></span></p>
<button class="btn" id="prev">&#8592;</button>
<button class="btn" id="next">&#8594;</button>
</div>"##,
        r##"
const testimonials = [
  { quote: "My session shed new insights into how I've been operating in the world. It offered ways to identify issues in my personal life and presented a more constructive way forward. Super grateful for the experience!", name: "BEN", title: "35, Marketing Consultant" },
  { quote: "This approach to healing is truly transformative. It helped me uncover patterns I didn't even know existed and guided me toward authentic self-expression.", name: "SARAH", title: "42, Therapist" },
  { quote: "The retreat experience was life-changing. Such a safe space for deep healing and personal growth. I left feeling completely renewed.", name: "MICHAEL", title: "38, Entrepreneur" },
  { quote: "These sessions have been a game-changer for my personal development. The insights are profound and the guidance is gentle yet powerful.", name: "EMMA", title: "29, Yoga Instructor" },
];
let index = 0;
function show(i) {
  index = (i + testimonials.length) % testimonials.length;
  const t = testimonials[index];
  document.getElementById('quote').textContent = t.quote;
  document.getElementById('who').textContent = t.name;
  document.getElementById('title').textContent = t.title;
}
document.getElementById('prev').addEventListener('click', () => show(index - 1));
document.getElementById('next').addEventListener('click', () => show(index + 1));
setInterval(() => show(index + 1), 6000);
show(0);
"##,
    )
}

/// The email-gate form shown until the visitor has unlocked blog content.
/// Submitting it creates a User record and sets the local flag; the flag is
/// purely presentational and grants no server-side access.
const BLOG_GATE_JS: &str = r##"
function blogUnlocked() { return localStorage.getItem('blogAccess') === 'true'; }
function renderGate(container, onUnlock) {
  container.innerHTML = `
    <form id="gate-form" class="card">
      <h2>Read the blog</h2>
      <p>Leave your name and email to unlock the posts.</p>
      <label>Name<input name="name" required></label>
      <label>Email<input name="email" type="email" required></label>
      <p><button class="btn" type="submit">Unlock</button></p>
    </form>`;
  document.getElementById('gate-form').addEventListener('submit', async (e) => {
    e.preventDefault();
    const form = new FormData(e.target);
    try {
      await apiSend('/api/users', 'POST', {
        name: form.get('name'), email: form.get('email'),
      });
      localStorage.setItem('blogAccess', 'true');
      onUnlock();
    } catch (err) { alert(err.message); }
  });
}
"##;

async fn blog_index() -> Html<String> {
    page(
        "Blog",
        r##"<h1>Blog</h1><div id="content">Loading…</div>"##,
        &format!(
            "{HELPERS_JS}\n{BLOG_GATE_JS}\n{}",
            r##"
async function renderPosts() {
  const container = document.getElementById('content');
  try {
    const blogs = await apiGet('/api/blogs?published=true');
    container.innerHTML = blogs.map(b =>
      `<div class="card"><h2><a href="/blog/${b._id}">${esc(b.title)}</a></h2>
       <p>${esc(b.subtitle)}</p><p>${esc(b.description)}</p></div>`
    ).join('') || '<p>No posts yet.</p>';
  } catch (err) { alert(err.message); }
}
const container = document.getElementById('content');
if (blogUnlocked()) { renderPosts(); } else { renderGate(container, renderPosts); }
"##
        ),
    )
}

async fn blog_post(axum::extract::Path(id): axum::extract::Path<String>) -> Html<String> {
    // Quote the id through serde_json so it lands in the script as a safe
    // JS string literal.
    let id_literal = serde_json::to_string(&id).unwrap_or_else(|_| "\"\"".to_string());
    page(
        "Blog",
        r##"<div id="content">Loading…</div>"##,
        &format!(
            "{HELPERS_JS}\n{BLOG_GATE_JS}\nconst blogId = {id_literal};\n{}",
            r##"
async function renderPost() {
  const container = document.getElementById('content');
  try {
    const b = await apiGet(`/api/blogs/${blogId}`);
    container.innerHTML =
      `<h1>${esc(b.title)}</h1><p><em>${esc(b.subtitle)}</em></p>
       <p>${esc(b.description)}</p>` +
      b.sections.map(s =>
        `<div class="card"><h2>${esc(s.heading)}</h2><p>${esc(s.content)}</p></div>`
      ).join('');
  } catch (err) {
    container.innerHTML = `<p>${esc(err.message)}</p>`;
  }
}
const container = document.getElementById('content');
if (blogUnlocked()) { renderPost(); } else { renderGate(container, renderPost); }
"##
        ),
    )
}

async fn retreats() -> Html<String> {
    page(
        "Retreats",
        r##"<h1>Retreats</h1><div id="retreats">Loading…</div>"##,
        &format!(
            "{HELPERS_JS}\n{}",
            r##"
(async () => {
  try {
    const retreats = await apiGet('/api/retreats?active=true');
    document.getElementById('retreats').innerHTML = retreats.map(r =>
      `<div class="card"><p><strong>${esc(r.label)}</strong></p>
       <h2>${esc(r.title)}</h2><p>${esc(r.description)}</p>
       <p>$${r.price}</p><a class="btn" href="/book">Reserve a place</a></div>`
    ).join('') || '<p>No retreats scheduled right now.</p>';
  } catch (err) { alert(err.message); }
})();
"##
        ),
    )
}

// --- admin pages (behind the access gate, except the login page) ---

async fn admin_login_page() -> Html<String> {
    page(
        "Admin Login",
        r##"<h1>Admin login</h1>
<form id="login-form" class="card">
<label>Password<input name="password" type="password" required></label>
<p><button class="btn" type="submit">Log in</button></p>
</form>"##,
        &format!(
            "{HELPERS_JS}\n{}",
            r##"
document.getElementById('login-form').addEventListener('submit', async (e) => {
  e.preventDefault();
  const form = new FormData(e.target);
  try {
    const data = await apiSend('/api/admin/login', 'POST', {
      password: form.get('password'),
    });
    localStorage.setItem('adminToken', data.token);
    location.href = '/admin';
  } catch (err) { alert(err.message); }
});
"##
        ),
    )
}

async fn admin_dashboard() -> Html<String> {
    page(
        "Admin",
        r##"<h1>Admin panel</h1>
<p>
<a class="btn" href="/admin/add-blog">New blog post</a>
<a class="btn" href="/admin/add-retreat">New retreat</a>
<button class="btn" id="logout">Log out</button>
</p>
<div class="stats">
<div class="card"><h2 id="stat-users">–</h2><p>Subscribers</p></div>
<div class="card"><h2 id="stat-blogs">–</h2><p>Published blogs</p></div>
<div class="card"><h2 id="stat-retreats">–</h2><p>Active retreats</p></div>
</div>
<h2>Blogs</h2><div id="blogs">Loading…</div>
<h2>Retreats</h2><div id="retreats">Loading…</div>
<h2>Subscribers</h2><div id="users">Loading…</div>"##,
        &format!(
            "{HELPERS_JS}\n{}",
            r##"
async function refresh() {
  // Aggregates are recomputed from scratch on every refresh: all three
  // collections fetched in parallel, counts derived client-side.
  const [users, blogs, retreats] = await Promise.all([
    apiGet('/api/users'), apiGet('/api/blogs'), apiGet('/api/retreats'),
  ]);
  document.getElementById('stat-users').textContent = users.length;
  document.getElementById('stat-blogs').textContent =
    blogs.filter(b => b.isPublished).length;
  document.getElementById('stat-retreats').textContent =
    retreats.filter(r => r.isActive).length;

  document.getElementById('blogs').innerHTML = '<table><tr><th>Title</th><th>Status</th><th></th></tr>' +
    blogs.map(b => `<tr><td>${esc(b.title)}</td>
      <td>${b.isPublished ? 'published' : 'draft'}</td>
      <td><button class="btn" onclick="togglePublish('${b._id}', ${!b.isPublished})">${b.isPublished ? 'Unpublish' : 'Publish'}</button>
          <a class="btn" href="/admin/edit-blog/${b._id}">Edit</a>
          <button class="btn" onclick="removeDoc('/api/blogs/${b._id}')">Delete</button></td></tr>`).join('') + '</table>';

  document.getElementById('retreats').innerHTML = '<table><tr><th>Label</th><th>Title</th><th>Price</th><th>Status</th><th></th></tr>' +
    retreats.map(r => `<tr><td>${esc(r.label)}</td><td>${esc(r.title)}</td><td>$${r.price}</td>
      <td>${r.isActive ? 'active' : 'inactive'}</td>
      <td><button class="btn" onclick="toggleActive('${r._id}', ${!r.isActive})">${r.isActive ? 'Deactivate' : 'Activate'}</button>
          <a class="btn" href="/admin/edit-retreat/${r._id}">Edit</a>
          <button class="btn" onclick="removeDoc('/api/retreats/${r._id}')">Delete</button></td></tr>`).join('') + '</table>';

  document.getElementById('users').innerHTML = '<table><tr><th>Name</th><th>Email</th><th>Access</th><th></th></tr>' +
    users.map(u => `<tr><td>${esc(u.name)}</td><td>${esc(u.email)}</td>
      <td>${u.hasAccess ? 'yes' : 'no'}</td>
      <td><button class="btn" onclick="toggleAccess('${u._id}', ${!u.hasAccess})">${u.hasAccess ? 'Revoke' : 'Grant'}</button>
          <button class="btn" onclick="removeDoc('/api/users/${u._id}')">Delete</button></td></tr>`).join('') + '</table>';
}
async function togglePublish(id, isPublished) {
  try { await apiSend(`/api/blogs/${id}`, 'PATCH', { isPublished }); refresh(); }
  catch (err) { alert(err.message); }
}
async function toggleActive(id, isActive) {
  try { await apiSend(`/api/retreats/${id}`, 'PATCH', { isActive }); refresh(); }
  catch (err) { alert(err.message); }
}
async function toggleAccess(id, hasAccess) {
  try { await apiSend(`/api/users/${id}`, 'PATCH', { hasAccess }); refresh(); }
  catch (err) { alert(err.message); }
}
async function removeDoc(url) {
  if (!confirm('Delete this record?')) return;
  try { await apiSend(url, 'DELETE'); refresh(); }
  catch (err) { alert(err.message); }
}
document.getElementById('logout').addEventListener('click', async () => {
  try { await apiSend('/api/admin/logout', 'POST', {}); } catch (err) {}
  localStorage.removeItem('adminToken');
  location.href = '/admin/login';
});
refresh().catch(err => alert(err.message));
"##
        ),
    )
}

const BLOG_FORM: &str = r##"<form id="blog-form" class="card">
<label>Title<input name="title" required maxlength="100"></label>
<label>Subtitle<input name="subtitle" required maxlength="150"></label>
<label>Description<textarea name="description" required maxlength="300"></textarea></label>
<label>Image path<input name="image" placeholder="/images/default-blog.jpg"></label>
<label>Background color<input name="bgColor" placeholder="bg-white"></label>
<label><input type="checkbox" name="isPublished" style="width:auto"> Published</label>
<div id="sections"></div>
<p><button class="btn" type="button" id="add-section">Add section</button></p>
<p><button class="btn" type="submit">Save</button></p>
</form>"##;

const BLOG_FORM_JS: &str = r##"
function addSection(heading, content) {
  const div = document.createElement('div');
  div.className = 'card section';
  div.innerHTML = `
    <label>Heading<input class="sec-heading" required></label>
    <label>Content<textarea class="sec-content" required></textarea></label>`;
  document.getElementById('sections').appendChild(div);
  div.querySelector('.sec-heading').value = heading || '';
  div.querySelector('.sec-content').value = content || '';
}
document.getElementById('add-section').addEventListener('click', () => addSection());
function blogPayload(form) {
  const data = new FormData(form);
  return {
    title: data.get('title'),
    subtitle: data.get('subtitle'),
    description: data.get('description'),
    image: data.get('image') || undefined,
    bgColor: data.get('bgColor') || undefined,
    isPublished: form.querySelector('[name=isPublished]').checked,
    sections: Array.from(document.querySelectorAll('.section')).map(div => ({
      heading: div.querySelector('.sec-heading').value,
      content: div.querySelector('.sec-content').value,
    })),
  };
}
"##;

async fn admin_add_blog() -> Html<String> {
    page(
        "New Blog Post",
        &format!("<h1>New blog post</h1>{BLOG_FORM}"),
        &format!(
            "{HELPERS_JS}\n{BLOG_FORM_JS}\n{}",
            r##"
document.getElementById('blog-form').addEventListener('submit', async (e) => {
  e.preventDefault();
  try {
    await apiSend('/api/blogs', 'POST', blogPayload(e.target));
    location.href = '/admin';
  } catch (err) { alert(err.message); }
});
"##
        ),
    )
}

async fn admin_edit_blog(axum::extract::Path(id): axum::extract::Path<String>) -> Html<String> {
    let id_literal = serde_json::to_string(&id).unwrap_or_else(|_| "\"\"".to_string());
    page(
        "Edit Blog Post",
        &format!("<h1>Edit blog post</h1>{BLOG_FORM}"),
        &format!(
            "{HELPERS_JS}\n{BLOG_FORM_JS}\nconst blogId = {id_literal};\n{}",
            r##"
(async () => {
  try {
    const b = await apiGet(`/api/blogs/${blogId}`);
    const form = document.getElementById('blog-form');
    form.querySelector('[name=title]').value = b.title;
    form.querySelector('[name=subtitle]').value = b.subtitle;
    form.querySelector('[name=description]').value = b.description;
    form.querySelector('[name=image]').value = b.image;
    form.querySelector('[name=bgColor]').value = b.bgColor;
    form.querySelector('[name=isPublished]').checked = b.isPublished;
    b.sections.forEach(s => addSection(s.heading, s.content));
  } catch (err) { alert(err.message); }
})();
document.getElementById('blog-form').addEventListener('submit', async (e) => {
  e.preventDefault();
  try {
    await apiSend(`/api/blogs/${blogId}`, 'PATCH', blogPayload(e.target));
    location.href = '/admin';
  } catch (err) { alert(err.message); }
});
"##
        ),
    )
}

const RETREAT_FORM: &str = r##"<form id="retreat-form" class="card">
<label>Label<input name="label" required maxlength="50"></label>
<label>Title<input name="title" required maxlength="100"></label>
<label>Price<input name="price" type="number" min="0" step="0.01" required></label>
<label>Description<textarea name="description" required maxlength="500"></textarea></label>
<label>Background color<input name="bgColor" placeholder="bg-white"></label>
<label><input type="checkbox" name="isActive" style="width:auto" checked> Active</label>
<p><button class="btn" type="submit">Save</button></p>
</form>"##;

const RETREAT_FORM_JS: &str = r##"
function retreatPayload(form) {
  const data = new FormData(form);
  return {
    label: data.get('label'),
    title: data.get('title'),
    price: parseFloat(data.get('price')),
    description: data.get('description'),
    bgColor: data.get('bgColor') || undefined,
    isActive: form.querySelector('[name=isActive]').checked,
  };
}
"##;

async fn admin_add_retreat() -> Html<String> {
    page(
        "New Retreat",
        &format!("<h1>New retreat</h1>{RETREAT_FORM}"),
        &format!(
            "{HELPERS_JS}\n{RETREAT_FORM_JS}\n{}",
            r##"
document.getElementById('retreat-form').addEventListener('submit', async (e) => {
  e.preventDefault();
  try {
    await apiSend('/api/retreats', 'POST', retreatPayload(e.target));
    location.href = '/admin';
  } catch (err) { alert(err.message); }
});
"##
        ),
    )
}

async fn admin_edit_retreat(
    axum::extract::Path(id): axum::extract::Path<String>,
) -> Html<String> {
    let id_literal = serde_json::to_string(&id).unwrap_or_else(|_| "\"\"".to_string());
    page(
        "Edit Retreat",
        &format!("<h1>Edit retreat</h1>{RETREAT_FORM}"),
        &format!(
            "{HELPERS_JS}\n{RETREAT_FORM_JS}\nconst retreatId = {id_literal};\n{}",
            r##"
(async () => {
  try {
    const r = await apiGet(`/api/retreats/${retreatId}`);
    const form = document.getElementById('retreat-form');
    form.querySelector('[name=label]').value = r.label;
    form.querySelector('[name=title]').value = r.title;
    form.querySelector('[name=price]').value = r.price;
    form.querySelector('[name=description]').value = r.description;
    form.querySelector('[name=bgColor]').value = r.bgColor;
    form.querySelector('[name=isActive]').checked = r.isActive;
  } catch (err) { alert(err.message); }
})();
document.getElementById('retreat-form').addEventListener('submit', async (e) => {
  e.preventDefault();
  try {
    await apiSend(`/api/retreats/${retreatId}`, 'PATCH', retreatPayload(e.target));
    location.href = '/admin';
  } catch (err) { alert(err.message); }
});
"##
        ),
    )
}
