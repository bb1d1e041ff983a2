use super::{escape_html, render_controls_html, render_posts_html};
use crate::pagination::PageView;

const TIMELINE_BAR: &str =
    r#"<div class="absolute left-3 top-2 bottom-2 w-0.5 bg-gray-600"></div>"#;

fn shell(title: &str, body: &str) -> String {
    let title = escape_html(title);
    format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>{title}</title>
  <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-black text-gray-300 min-h-screen">
  <main class="max-w-3xl mx-auto px-6 py-12">
    <h1 class="text-3xl font-bold text-white mb-10">{title}</h1>
{body}
  </main>
</body>
</html>
"####
    )
}

/// Full listing page: the timeline of posts followed by the page controls.
pub fn render_page<F>(view: &PageView<'_>, title: &str, href: F) -> String
where
    F: Fn(usize) -> String,
{
    let posts = render_posts_html(view.posts);
    let controls = render_controls_html(&view.controls, href);
    let body = format!(
        r#"    <div id="blog-list-container" class="relative pl-8">
      {TIMELINE_BAR}
{posts}
    </div>
    <div id="pagination-controls" class="flex flex-wrap items-center justify-center gap-2 mt-12">
{controls}
    </div>"#
    );
    shell(title, &body)
}

/// Listing page whose list area only carries a status line, used when the
/// posts could not be loaded.
pub fn render_message(title: &str, message: &str) -> String {
    let message = escape_html(message);
    let body = format!(
        r#"    <div id="blog-list-container" class="relative pl-8">
      {TIMELINE_BAR}
      <p id="loading-message" class="text-gray-500">{message}</p>
    </div>
    <div id="pagination-controls" class="flex flex-wrap items-center justify-center gap-2 mt-12"></div>"#
    );
    shell(title, &body)
}
