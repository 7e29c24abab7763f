//! HTML page for the intake form.

use crate::constants::SUBMIT_PATH;
use crate::render::{DisplayStatus, RenderedForm};
use std::fmt::Write;

/// Escapes text for use in HTML element content and quoted attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Person Intake</title>
<style>
body { font-family: sans-serif; max-width: 28rem; margin: 2rem auto; }
label { display: block; margin-top: 0.75rem; }
input { width: 100%; padding: 0.3rem; }
.status { padding: 0.5rem; margin-bottom: 1rem; }
.status.error { background: #fde2e2; color: #8a1f1f; }
.status.success { background: #e2f5e4; color: #1f5f2a; }
</style>
</head>
<body>
<h1>Person Intake</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Renders the full form page with at most one status line.
pub fn render_page(form: &RenderedForm) -> String {
    let mut html = String::from(PAGE_HEAD);

    if let Some(line) = form.status.line() {
        let class = match form.status {
            DisplayStatus::Success => "success",
            _ => "error",
        };
        // Writing to a String cannot fail.
        let _ = writeln!(
            html,
            r#"<p class="status {class}">{}</p>"#,
            escape_html(&line)
        );
    }

    let _ = writeln!(html, r#"<form method="post" action="{SUBMIT_PATH}">"#);
    for (id, label, value, placeholder) in [
        ("name", "Name", &form.echo.name, ""),
        ("surname", "Surname", &form.echo.surname, ""),
        ("idNumber", "ID Number", &form.echo.id_number, "13 digits"),
        ("dob", "Date of Birth", &form.echo.date_of_birth, "dd/MM/yyyy"),
    ] {
        let _ = writeln!(
            html,
            r#"<label for="{id}">{label}</label>
<input type="text" id="{id}" name="{id}" value="{}" placeholder="{placeholder}">"#,
            escape_html(value)
        );
    }
    html.push_str("<p><button type=\"submit\">Submit</button></p>\n</form>\n");
    html.push_str(PAGE_TAIL);
    html
}
