//! Server-rendered HTML pages

use crate::provider::PlaylistSummary;
use crate::services::PlaylistResult;
use tunesift_common::AudioFeature;

const STYLE: &str = r#"
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #191414;
            color: #e0e0e0;
            line-height: 1.6;
            margin: 0;
        }
        header {
            background-color: #2a2a2a;
            border-bottom: 1px solid #3a3a3a;
            padding: 16px 20px;
        }
        header a { color: #888; float: right; }
        h1 { color: #1db954; margin: 0; font-size: 24px; }
        main { padding: 20px; max-width: 760px; }
        .message { background: #3a2a2a; border-left: 4px solid #e05555; padding: 10px 14px; }
        .feature { margin: 12px 0; }
        .feature label { display: inline-block; width: 180px; }
        ul.playlists li, ol.tracks li { margin: 6px 0; }
        .muted { color: #888; }
        button, input[type=submit] {
            background: #1db954; color: #fff; border: 0; border-radius: 16px;
            padding: 6px 16px; cursor: pointer;
        }
        a { color: #1db954; }
"#;

/// Escape text for HTML element and attribute content
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - TuneSift</title>
    <style>{style}</style>
</head>
<body>
    <header><a href="/logout">Sign out</a><h1>TuneSift</h1></header>
    <main>
{body}
    </main>
</body>
</html>
"#,
        title = escape(title),
        style = STYLE,
        body = body,
    )
}

fn message_block(message: Option<&str>) -> String {
    message
        .map(|m| format!(r#"<p class="message">{}</p>"#, escape(m)))
        .unwrap_or_default()
}

/// GET /search
pub fn search_page(message: Option<&str>) -> String {
    let body = format!(
        r#"        <h2>Find a playlist</h2>
        {message}
        <form method="post" action="/get_playlists">
            <p><input type="text" name="playlist_name" placeholder="Playlist name" required></p>
            <p>
                <label><input type="radio" name="location" value="local" checked> My playlists</label>
                <label><input type="radio" name="location" value="public"> Search Spotify</label>
            </p>
            <p><input type="submit" value="Search"></p>
        </form>"#,
        message = message_block(message),
    );
    layout("Search", &body)
}

/// POST /get_playlists
pub fn results_page(query: &str, playlists: &[PlaylistSummary]) -> String {
    if playlists.is_empty() {
        return search_page(Some(&format!("No playlists found for \"{}\"", query)));
    }

    let items: String = playlists
        .iter()
        .map(|p| {
            let details = match (p.owner_name(), p.track_count()) {
                (Some(owner), Some(count)) => format!("by {}, {} tracks", escape(owner), count),
                (Some(owner), None) => format!("by {}", escape(owner)),
                (None, Some(count)) => format!("{} tracks", count),
                (None, None) => String::new(),
            };
            format!(
                r#"            <li>
                <form method="post" action="/put_param/{id}">
                    <button type="submit">{name}</button> <span class="muted">{details}</span>
                </form>
            </li>
"#,
                id = escape(&p.id),
                name = escape(&p.name),
                details = details,
            )
        })
        .collect();

    let body = format!(
        r#"        <h2>Playlists matching "{query}"</h2>
        <ul class="playlists">
{items}        </ul>
        <p><a href="/search">New search</a></p>"#,
        query = escape(query),
        items = items,
    );
    layout("Results", &body)
}

/// GET /audio_features/:playlist_id
pub fn features_page(playlist_id: &str, message: Option<&str>) -> String {
    let sliders: String = AudioFeature::ALL
        .iter()
        .map(|feature| {
            let input = if feature.is_bpm() {
                format!(
                    r#"<input type="number" name="{field}" min="0" max="300" step="1" value="120"> BPM"#,
                    field = feature.form_field()
                )
            } else {
                format!(
                    r#"<input type="range" name="{field}" min="0" max="100" value="50">"#,
                    field = feature.form_field()
                )
            };
            format!(
                r#"            <div class="feature">
                <label><input type="checkbox" name="{check}"> {label}</label>
                {input}
            </div>
"#,
                check = feature.check_field(),
                label = feature.label(),
                input = input,
            )
        })
        .collect();

    let body = format!(
        r#"        <h2>Pick target features</h2>
        {message}
        <p class="muted">Checked features must be within 35% of the target (tempo within 30 BPM).</p>
        <form method="post" action="/new_playlist/{id}">
{sliders}            <p><input type="submit" value="Create playlist"></p>
        </form>"#,
        message = message_block(message),
        id = escape(playlist_id),
        sliders = sliders,
    );
    layout("Audio features", &body)
}

/// POST /new_playlist/:playlist_id
pub fn playlist_page(result: &PlaylistResult) -> String {
    let tracks: String = result
        .track_entries
        .iter()
        .map(|t| {
            let album = t
                .album
                .as_deref()
                .map(|a| format!(" <span class=\"muted\">({})</span>", escape(a)))
                .unwrap_or_default();
            format!(
                "            <li>{} - {}{}</li>\n",
                escape(&t.name),
                escape(&t.artists.join(", ")),
                album
            )
        })
        .collect();

    let link = result
        .external_link
        .as_deref()
        .map(|href| {
            format!(
                r#"<p><a href="{}" target="_blank" rel="noopener">Open in Spotify</a></p>"#,
                escape(href)
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"        <h2>Your new playlist</h2>
        {link}
        <ol class="tracks">
{tracks}        </ol>
        <p><a href="/search">Make another</a></p>"#,
        link = link,
        tracks = tracks,
    );
    layout("New playlist", &body)
}

/// Error page with a single way forward
pub fn error_page(title: &str, message: &str, action: (&str, &str)) -> String {
    let (href, label) = action;
    let body = format!(
        r#"        <h2>{title}</h2>
        <p class="message">{message}</p>
        <p><a href="{href}">{label}</a></p>"#,
        title = escape(title),
        message = escape(message),
        href = escape(href),
        label = escape(label),
    );
    layout(title, &body)
}

pub fn signed_out_page() -> String {
    let body = r#"        <h2>Signed out</h2>
        <p><a href="/">Sign in with Spotify</a></p>"#;
    layout("Signed out", body)
}
