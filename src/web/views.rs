//! Plain server-rendered pages. Every dynamic value goes through
//! `html_escape` before it reaches the markup.

use axum::response::Html;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::models::{FieldErrors, Genre, Movie, MovieFilter, MovieForm, Principal};

fn page(title: &str, principal: Option<&Principal>, body: &str) -> Html<String> {
    let nav = match principal {
        Some(p) => format!(
            r#"<a href="/">Movies</a> | <a href="/genre">Genres</a> | <a href="/movie/create">Add movie</a> | {} | <a href="/admin/logout">Log out</a>"#,
            text(&p.username)
        ),
        None => r#"<a href="/admin/login">Log in</a> | <a href="/admin/register">Register</a>"#
            .to_string(),
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title} - Cinedex</title></head>
<body>
<nav>{nav}</nav>
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>"#,
        title = text(title),
    ))
}

fn field_errors(errors: &FieldErrors, field: &str) -> String {
    errors
        .get(field)
        .iter()
        .map(|m| format!(r#"<span class="field-error">{}</span>"#, text(m)))
        .collect()
}

fn input(label: &str, name: &str, kind: &str, value: &str, errors: &FieldErrors) -> String {
    format!(
        r#"<p><label for="{name}">{label}</label> <input id="{name}" name="{name}" type="{kind}" value="{value}"> {errs}</p>"#,
        label = text(label),
        value = attr(value),
        errs = field_errors(errors, name),
    )
}

fn opt_num(value: Option<i32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn login_page(username: &str, error: Option<&str>, errors: &FieldErrors) -> Html<String> {
    let banner = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, text(e)))
        .unwrap_or_default();

    let body = format!(
        r#"{banner}<form method="post" action="/admin/login">
{username}{password}<button type="submit">Log in</button>
</form>"#,
        username = input("Username", "username", "text", username, errors),
        password = input("Password", "password", "password", "", errors),
    );
    page("Log in", None, &body)
}

pub fn register_page(username: &str, errors: &FieldErrors) -> Html<String> {
    let body = format!(
        r#"<form method="post" action="/admin/register">
{username}{password}{confirm}<button type="submit">Register</button>
</form>"#,
        username = input("Username", "username", "text", username, errors),
        password = input("Password", "password", "password", "", errors),
        confirm = input(
            "Confirm password",
            "confirm_password",
            "password",
            "",
            errors
        ),
    );
    page("Register", None, &body)
}

pub fn index_page(
    principal: &Principal,
    movies: &[Movie],
    genre_names: &[String],
    filter: &MovieFilter,
) -> Html<String> {
    let selected = filter.genre_name().unwrap_or_default();
    let options: String = genre_names
        .iter()
        .map(|name| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                attr(name),
                if name == selected { " selected" } else { "" },
                text(name)
            )
        })
        .collect();

    let rows: String = movies
        .iter()
        .map(|m| {
            format!(
                r#"<tr><td>{name}</td><td>{year}</td><td>{rating}</td><td>{genre}</td><td><a href="/movie/edit/{id}/{slug}">Edit</a> <a href="/movie/delete/{id}">Delete</a></td></tr>"#,
                name = text(&m.name),
                year = m.year,
                rating = m.rating,
                genre = text(&m.genre_name),
                id = m.id,
                slug = attr(&m.slug),
            )
        })
        .collect();

    let table = if movies.is_empty() {
        "<p>No movies found.</p>".to_string()
    } else {
        format!(
            "<table>\n<tr><th>Name</th><th>Year</th><th>Rating</th><th>Genre</th><th></th></tr>\n{rows}\n</table>"
        )
    };

    let body = format!(
        r#"<form method="get" action="/">
<input name="search_string" type="text" value="{search}" placeholder="Name">
<select name="genre"><option value="">All genres</option>{options}</select>
<button type="submit">Filter</button>
</form>
{table}"#,
        search = attr(filter.search_string.as_deref().unwrap_or_default()),
    );
    page("Movies", Some(principal), &body)
}

pub fn genres_page(
    principal: &Principal,
    genres: &[Genre],
    draft: &Genre,
    errors: &FieldErrors,
) -> Html<String> {
    let items: String = genres
        .iter()
        .map(|g| format!("<li>{} ({})</li>", text(&g.name), text(&g.genre_id)))
        .collect();

    let body = format!(
        r#"<ul>{items}</ul>
<h2>Add genre</h2>
<form method="post" action="/genre">
{code}{name}<button type="submit">Add</button>
</form>"#,
        code = input("Code", "genre_id", "text", &draft.genre_id, errors),
        name = input("Name", "name", "text", &draft.name, errors),
    );
    page("Genres", Some(principal), &body)
}

pub fn movie_form_page(
    principal: &Principal,
    form: &MovieForm,
    genres: &[Genre],
    errors: &FieldErrors,
) -> Html<String> {
    let title = if form.is_new() {
        "Add New Movie"
    } else {
        "Edit Movie"
    };
    let current = form.genre_id.as_deref().unwrap_or_default();

    let options: String = genres
        .iter()
        .map(|g| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                attr(&g.genre_id),
                if g.genre_id == current { " selected" } else { "" },
                text(&g.name)
            )
        })
        .collect();

    let body = format!(
        r#"<form method="post" action="/movie/edit">
<input name="movie_id" type="hidden" value="{id}">
{name}{year}{rating}<p><label for="genre_id">Genre</label> <select id="genre_id" name="genre_id"><option value="">Select a genre</option>{options}</select> {genre_errors}</p>
<button type="submit">Save</button> <a href="/">Cancel</a>
</form>"#,
        id = form.movie_id,
        name = input(
            "Name",
            "name",
            "text",
            form.name.as_deref().unwrap_or_default(),
            errors
        ),
        year = input("Year", "year", "number", &opt_num(form.year), errors),
        rating = input("Rating", "rating", "number", &opt_num(form.rating), errors),
        genre_errors = field_errors(errors, "genre_id"),
    );
    page(title, Some(principal), &body)
}

pub fn delete_page(principal: &Principal, movie: &Movie) -> Html<String> {
    let body = format!(
        r#"<p>Delete <strong>{name}</strong> ({year})?</p>
<form method="post" action="/movie/delete/{id}">
<button type="submit">Delete</button> <a href="/">Cancel</a>
</form>"#,
        name = text(&movie.name),
        year = movie.year,
        id = movie.id,
    );
    page("Delete Movie", Some(principal), &body)
}

pub fn message_page(title: &str, message: &str) -> Html<String> {
    page(title, None, &format!("<p>{}</p>", text(message)))
}
