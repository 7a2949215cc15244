//! HTML fragments for the htmx front end.
//!
//! Every function here is pure: it takes domain data and returns markup.
//! `index_page` is the only full document; everything else is swapped into
//! that page by htmx.

use shared::domain::Movie;

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.6";
const HTMX_INTEGRITY: &str =
    "sha384-FhXw7b6AlE/jyjlZH5iHa/tTe9EpJ1Y55RjcgPbjeWMskSxZt1v9qkxLJWNJaGni";
const HYPERSCRIPT_SRC: &str = "https://unpkg.com/hyperscript.org@0.9.11";

const INPUT_CLASS: &str = "block w-full rounded-md border-0 py-1.5 text-gray-900 shadow-sm ring-1 ring-inset ring-gray-300 placeholder:text-gray-400 focus:ring-2 focus:ring-inset focus:ring-indigo-600 sm:text-sm sm:leading-6";
const LABEL_CLASS: &str = "block text-sm font-medium leading-6 text-gray-900";

pub fn base_page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Favorite Movies</title>
  <script src="{HTMX_SRC}" integrity="{HTMX_INTEGRITY}" crossorigin="anonymous"></script>
  <script src="{HYPERSCRIPT_SRC}"></script>
  <link href="/styles.css" rel="stylesheet">
</head>
<body>
{body}
</body>
</html>
"#
    )
}

/// Page shell; the list is fetched by htmx as soon as `<main>` loads.
pub fn index_page() -> String {
    base_page(r#"<main hx-get="/movies" hx-trigger="load" hx-swap="innerHTML"></main>"#)
}

pub fn movie_list(movies: &[Movie]) -> String {
    let mut items = String::new();
    for movie in movies {
        items.push_str(&movie_item(movie));
    }

    format!(
        r#"<div class="p-10">
  <h1 class="text-4xl font-bold tracking-tight text-gray-900 sm:text-6xl">Favorite Movies</h1>
  <ul role="list" class="movie-list grid mt-8 grid-cols-1 gap-5 sm:grid-cols-2 sm:gap-6 lg:grid-cols-4">
{items}  </ul>
{form}</div>
"#,
        form = movie_form(),
    )
}

pub fn movie_item(movie: &Movie) -> String {
    format!(
        r#"<li class="col-span-1 flex rounded-md shadow-sm">
  <div class="flex flex-1 items-center justify-between truncate rounded-md border border-gray-200 bg-white">
    <div class="flex-1 truncate px-4 py-2 text-sm">
      <p class="font-medium text-gray-900 hover:text-gray-600">{title}</p>
      <p class="text-gray-500">{director}</p>
    </div>
    <div class="flex-shrink-0 pr-2">
      <button type="button" hx-delete="/movies/{id}" hx-target="closest li" hx-swap="outerHTML" class="inline-flex h-8 w-8 items-center justify-center rounded-full bg-transparent bg-white text-gray-400 hover:text-gray-500 focus:outline-none focus:ring-2 focus:ring-indigo-500 focus:ring-offset-2">
        <span class="sr-only">Delete movie</span>
        {icon}
      </button>
    </div>
  </div>
</li>
"#,
        id = movie.id,
        title = escape_html(&movie.title),
        director = escape_html(&movie.director),
        icon = trash_icon(),
    )
}

/// Posts to `/movies` and appends the returned item to `.movie-list`.
pub fn movie_form() -> String {
    let fields: String = [("title", "Title"), ("director", "Director")]
        .into_iter()
        .map(|(name, label)| {
            format!(
                r#"  <div>
    <label for="{name}" class="{LABEL_CLASS}">{label}</label>
    <div class="mt-2">
      <input id="{name}" name="{name}" type="text" required class="{INPUT_CLASS}">
    </div>
  </div>
"#
            )
        })
        .collect();

    format!(
        r#"<form class="space-y-6 mt-10 max-w-md" hx-post="/movies" hx-target=".movie-list" hx-swap="beforeend" _="on submit target.reset()">
  <h2 class="text-2xl font-bold tracking-tight text-gray-900 sm:text-3xl">Add movie</h2>
{fields}  <div>
    <button type="submit" class="flex w-full justify-center rounded-md bg-indigo-600 px-3 py-1.5 text-sm font-semibold leading-6 text-white shadow-sm hover:bg-indigo-500 focus-visible:outline focus-visible:outline-2 focus-visible:outline-offset-2 focus-visible:outline-indigo-600">Add</button>
  </div>
</form>
"#
    )
}

pub fn trash_icon() -> &'static str {
    r#"<svg class="w-5 h-5" xmlns="http://www.w3.org/2000/svg" fill="none" stroke-width="1.5" viewBox="0 0 20 20" color="currentColor"><path stroke="currentColor" stroke-width="1.5" stroke-linecap="round" stroke-linejoin="round" d="M6.758 17.243 12.001 12m5.243-5.243L12 12m0 0L6.758 6.757M12.001 12l5.243 5.243"></path></svg>"#
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

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
