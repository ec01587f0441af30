//! Server-side HTML rendering.
//!
//! Pages are plain `format!` templates sharing one layout. All user-supplied
//! text goes through [`html_escape`] before interpolation.

use tutorlog_core::{Learner, LearnerSummary, Note};

use crate::flash::{Notice, NoticeKind};

/// Simple HTML escaping for security.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Shared page chrome: header, flash notice banner, body.
pub fn layout(title: &str, notice: Option<&Notice>, body: &str) -> String {
    let notice_html = match notice {
        Some(n) => {
            let class = match n.kind {
                NoticeKind::Success => "notice notice-success",
                NoticeKind::Error => "notice notice-error",
            };
            format!(
                r#"<div class="{}">{}</div>"#,
                class,
                html_escape(&n.message)
            )
        }
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} · Tutorlog</title>
    <style>
        body {{ font-family: system-ui, sans-serif; max-width: 860px; margin: 2rem auto; padding: 0 1rem; color: #222; }}
        h1 {{ font-size: 1.5rem; }}
        a {{ color: #2563eb; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        table {{ border-collapse: collapse; width: 100%; }}
        th, td {{ text-align: left; padding: 6px 10px; border-bottom: 1px solid #e5e5e5; }}
        form.inline {{ display: inline; }}
        label {{ display: block; margin-top: 0.75rem; font-weight: 600; }}
        input[type=text], textarea {{ width: 100%; padding: 6px; box-sizing: border-box; }}
        button {{ margin-top: 1rem; padding: 6px 16px; }}
        .notice {{ padding: 10px 14px; border-radius: 4px; margin-bottom: 1rem; }}
        .notice-success {{ background: #ecfdf5; color: #065f46; }}
        .notice-error {{ background: #fef2f2; color: #991b1b; }}
        .muted {{ color: #777; }}
        .actions a {{ margin-right: 0.5rem; }}
        .topnav {{ margin-bottom: 1.5rem; }}
        .note {{ border-bottom: 1px solid #e5e5e5; padding: 0.75rem 0; }}
        .note .meta {{ font-size: 0.85rem; color: #777; }}
    </style>
</head>
<body>
    <div class="topnav"><a href="/">Learners</a> · <a href="/learners/new">New learner</a></div>
    {notice_html}
    {body}
</body>
</html>"#,
        title = html_escape(title),
        notice_html = notice_html,
        body = body,
    )
}

/// The learner list page, with the filter form and per-row action links.
pub fn learners_page(
    rows: &[LearnerSummary],
    q: Option<&str>,
    language: Option<&str>,
    notice: Option<&Notice>,
) -> String {
    let table = if rows.is_empty() {
        r#"<p class="muted">No learners yet. <a href="/learners/new">Add the first one</a>.</p>"#
            .to_string()
    } else {
        let body_rows: String = rows
            .iter()
            .map(|l| {
                format!(
                    r#"<tr>
    <td><a href="/learners/{id}">{name}</a></td>
    <td>{language}</td>
    <td>{level}</td>
    <td>{notes_count}</td>
    <td class="actions">
        <a href="/learners/{id}/edit">edit</a>
        <a href="/learners/{id}/export">export</a>
        <a href="/learners/{id}/delete">delete</a>
    </td>
</tr>"#,
                    id = l.id,
                    name = html_escape(&l.name),
                    language = html_escape(&l.language),
                    level = html_escape(l.level.as_deref().unwrap_or("—")),
                    notes_count = l.notes_count,
                )
            })
            .collect();
        format!(
            r#"<table>
<thead><tr><th>Name</th><th>Language</th><th>Level</th><th>Notes</th><th></th></tr></thead>
<tbody>{}</tbody>
</table>"#,
            body_rows
        )
    };

    let body = format!(
        r#"<h1>Learners</h1>
<form method="GET" action="/">
    <input type="text" name="q" placeholder="Filter by name" value="{q}">
    <input type="text" name="language" placeholder="Filter by language" value="{language}">
    <button type="submit">Filter</button>
</form>
{table}"#,
        q = html_escape(q.unwrap_or("")),
        language = html_escape(language.unwrap_or("")),
        table = table,
    );
    layout("Learners", notice, &body)
}

/// Create/edit learner form. `action` is the POST target; pre-filled values
/// are empty strings on the create path.
pub fn learner_form_page(
    heading: &str,
    action: &str,
    name: &str,
    language: &str,
    level: &str,
    notice: Option<&Notice>,
) -> String {
    let body = format!(
        r#"<h1>{heading}</h1>
<form method="POST" action="{action}">
    <label for="name">Name</label>
    <input type="text" id="name" name="name" value="{name}">
    <label for="language">Language</label>
    <input type="text" id="language" name="language" value="{language}" placeholder="English">
    <label for="level">Level</label>
    <input type="text" id="level" name="level" value="{level}" placeholder="e.g. B1">
    <button type="submit">Save</button>
</form>"#,
        heading = html_escape(heading),
        action = html_escape(action),
        name = html_escape(name),
        language = html_escape(language),
        level = html_escape(level),
    );
    layout(heading, notice, &body)
}

/// Learner detail page: attributes, add-note form, notes newest-first.
pub fn learner_detail_page(learner: &Learner, notes: &[Note], notice: Option<&Notice>) -> String {
    let notes_html = if notes.is_empty() {
        r#"<p class="muted">No notes yet.</p>"#.to_string()
    } else {
        notes
            .iter()
            .map(|n| {
                let tags = match n.tags.as_deref() {
                    Some(t) => format!(" · tags: {}", html_escape(t)),
                    None => String::new(),
                };
                format!(
                    r#"<div class="note">
    <div>{content}</div>
    <div class="meta">{created}{tags} · <a href="/note/{id}/delete">delete</a></div>
</div>"#,
                    content = html_escape(&n.content),
                    created = n.created_at_utc.format("%Y-%m-%d %H:%M UTC"),
                    tags = tags,
                    id = n.id,
                )
            })
            .collect()
    };

    let body = format!(
        r#"<h1>{name}</h1>
<p>{language} · level: {level} · <a href="/learners/{id}/edit">edit</a> · <a href="/learners/{id}/export">export CSV</a> · <a href="/learners/{id}/delete">delete</a></p>
<h2>Add note</h2>
<form method="POST" action="/learners/{id}/notes">
    <label for="content">Progress note</label>
    <textarea id="content" name="content" rows="3"></textarea>
    <label for="tags">Tags</label>
    <input type="text" id="tags" name="tags" placeholder="comma, separated">
    <button type="submit">Add note</button>
</form>
<h2>Notes</h2>
{notes}"#,
        name = html_escape(&learner.name),
        language = html_escape(&learner.language),
        level = html_escape(learner.level.as_deref().unwrap_or("—")),
        id = learner.id,
        notes = notes_html,
    );
    layout(&learner.name, notice, &body)
}

/// Minimal error page for terminal failures (404, 500).
pub fn error_page(status: u16, message: &str) -> String {
    let body = format!(
        r#"<h1>{status}</h1>
<p>{message}</p>
<p><a href="/">Back to learners</a></p>"#,
        status = status,
        message = html_escape(message),
    );
    layout("Error", None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_learners_page_empty_state() {
        let page = learners_page(&[], None, None, None);
        assert!(page.contains("No learners yet"));
    }

    #[test]
    fn test_learners_page_escapes_names() {
        let rows = vec![LearnerSummary {
            id: Uuid::new_v4(),
            name: "<script>alert(1)</script>".to_string(),
            language: "English".to_string(),
            level: None,
            notes_count: 0,
            created_at_utc: Utc::now(),
        }];
        let page = learners_page(&rows, None, None, None);
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_layout_renders_notice_once() {
        let notice = Notice::success("Learner created");
        let page = layout("Test", Some(&notice), "<p>body</p>");
        assert!(page.contains("notice-success"));
        assert!(page.contains("Learner created"));
    }

    #[test]
    fn test_error_page_contains_status() {
        let page = error_page(404, "Learner not found");
        assert!(page.contains("404"));
        assert!(page.contains("Learner not found"));
    }

    #[test]
    fn test_detail_page_lists_notes() {
        let learner = Learner {
            id: Uuid::new_v4(),
            name: "Ana".to_string(),
            language: "Spanish".to_string(),
            level: Some("B1".to_string()),
            created_at_utc: Utc::now(),
        };
        let notes = vec![Note {
            id: Uuid::new_v4(),
            learner_id: learner.id,
            content: "Great progress".to_string(),
            tags: Some("verbs".to_string()),
            created_at_utc: Utc::now(),
        }];
        let page = learner_detail_page(&learner, &notes, None);
        assert!(page.contains("Great progress"));
        assert!(page.contains("tags: verbs"));
    }
}
