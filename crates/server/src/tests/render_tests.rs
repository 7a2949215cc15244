use super::*;
use shared::domain::MovieId;

fn movie(id: i64, title: &str, director: &str) -> Movie {
    Movie {
        id: MovieId(id),
        title: title.into(),
        director: director.into(),
    }
}

#[test]
fn index_page_loads_list_via_htmx() {
    let page = index_page();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<title>Favorite Movies</title>"));
    assert!(page.contains(r#"hx-get="/movies" hx-trigger="load" hx-swap="innerHTML""#));
    assert!(page.contains(r#"<link href="/styles.css" rel="stylesheet">"#));
    assert!(page.contains("htmx.org@1.9.6"));
    assert!(page.contains("hyperscript.org@0.9.11"));
}

#[test]
fn movie_item_targets_its_own_delete_route() {
    let html = movie_item(&movie(7, "Inception", "Nolan"));
    assert!(html.starts_with("<li"));
    assert!(html.contains(r#"hx-delete="/movies/7""#));
    assert!(html.contains(r#"hx-target="closest li" hx-swap="outerHTML""#));
    assert!(html.contains(">Inception</p>"));
    assert!(html.contains(">Nolan</p>"));
    assert!(html.contains("Delete movie"));
    assert!(html.contains(trash_icon()));
}

#[test]
fn movie_list_renders_items_in_order_then_form() {
    let html = movie_list(&[movie(1, "Alien", "Scott"), movie(2, "Heat", "Mann")]);
    let alien = html.find(">Alien<").expect("alien");
    let heat = html.find(">Heat<").expect("heat");
    let form = html.find("<form").expect("form");
    assert!(alien < heat && heat < form);
    assert!(html.contains(r#"class="movie-list"#));
    assert_eq!(html.matches("<li").count(), 2);
}

#[test]
fn empty_movie_list_still_has_heading_and_form() {
    let html = movie_list(&[]);
    assert!(html.contains("Favorite Movies</h1>"));
    assert!(html.contains(r#"hx-post="/movies""#));
    assert_eq!(html.matches("<li").count(), 0);
}

#[test]
fn movie_form_appends_to_list_and_resets() {
    let html = movie_form();
    assert!(html.contains(r#"hx-target=".movie-list" hx-swap="beforeend""#));
    assert!(html.contains(r#"_="on submit target.reset()""#));
    assert!(html.contains(r#"name="title""#));
    assert!(html.contains(r#"name="director""#));
    assert!(html.contains(">Add</button>"));
}

#[test]
fn movie_form_renders_labelled_fields_in_order() {
    let html = movie_form();
    assert_eq!(html.matches("<input ").count(), 2);
    assert!(html.contains(r#"<label for="title" class="block text-sm"#));
    assert!(html.contains(">Director</label>"));
    let title = html.find(r#"id="title""#).expect("title input");
    let director = html.find(r#"id="director""#).expect("director input");
    let submit = html.find(r#"type="submit""#).expect("submit");
    assert!(title < director && director < submit);
}

#[test]
fn user_text_is_escaped() {
    let html = movie_item(&movie(3, "<script>alert(1)</script>", "Tom & \"Jerry\""));
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(html.contains("Tom &amp; &quot;Jerry&quot;"));
}

#[test]
fn escape_html_leaves_plain_text_alone() {
    assert_eq!(escape_html("Amélie"), "Amélie");
    assert_eq!(escape_html("it's"), "it&#39;s");
}
