//! Minimal server-rendered admin pages.

use std::fmt::Write as _;

use lead_core::dashboard::{Dashboard, DashboardFilter};
use lead_core::enums::{Category, FormType, SubmissionStatus};

/// Escape text for HTML element content and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
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
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"robots\" content=\"noindex\">\n<title>{}</title>\n</head>\n\
         <body>\n{body}\n</body>\n</html>\n",
        escape(title)
    )
}

const LOGIN_SCRIPT: &str = r"
document.getElementById('login').addEventListener('submit', async (event) => {
  event.preventDefault();
  const form = event.target;
  const error = document.getElementById('error');
  error.textContent = '';
  const res = await fetch('/api/admin/login', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ email: form.email.value, password: form.password.value }),
  });
  if (res.ok) {
    window.location.href = '/admin';
  } else {
    const body = await res.json().catch(() => ({}));
    error.textContent = body.error || 'Login failed';
  }
});
";

#[must_use]
pub fn login_page() -> String {
    let body = format!(
        "<h1>Admin login</h1>\n\
         <form id=\"login\">\n\
         <label>Email <input type=\"email\" name=\"email\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">Sign in</button>\n\
         </form>\n<p id=\"error\" role=\"alert\"></p>\n<script>{LOGIN_SCRIPT}</script>"
    );
    layout("Admin login", &body)
}

fn select(name: &str, label: &str, options: &[&str], selected: Option<&str>) -> String {
    let mut html = format!("<label>{label} <select name=\"{name}\"><option value=\"\">any</option>");
    for option in options {
        let marker = if selected == Some(*option) { " selected" } else { "" };
        let _ = write!(html, "<option value=\"{option}\"{marker}>{option}</option>");
    }
    html.push_str("</select></label>\n");
    html
}

#[must_use]
pub fn dashboard_page(dashboard: &Dashboard, filter: &DashboardFilter) -> String {
    let mut body = String::from("<h1>Submissions</h1>\n");

    let counts = &dashboard.counts;
    let _ = write!(body, "<p>Total: <strong>{}</strong></p>\n<ul>\n", counts.total);
    for (label, map) in [
        ("status", &counts.by_status),
        ("category", &counts.by_category),
        ("form", &counts.by_form_type),
    ] {
        let parts: Vec<String> = map
            .iter()
            .map(|(key, n)| format!("{} {n}", escape(key)))
            .collect();
        let _ = writeln!(body, "<li>By {label}: {}</li>", parts.join(", "));
    }
    body.push_str("</ul>\n");

    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    let statuses: Vec<&str> = SubmissionStatus::ALL.iter().map(|s| s.as_str()).collect();
    let forms: Vec<&str> = FormType::ALL.iter().map(|f| f.as_str()).collect();

    body.push_str("<form method=\"get\" action=\"/admin\">\n");
    body.push_str(&select(
        "category",
        "Category",
        &categories,
        filter.category.map(Category::as_str),
    ));
    body.push_str(&select(
        "status",
        "Status",
        &statuses,
        filter.status.map(SubmissionStatus::as_str),
    ));
    body.push_str(&select(
        "form",
        "Form",
        &forms,
        filter.form_type.map(FormType::as_str),
    ));
    let _ = writeln!(
        body,
        "<label>Search <input type=\"search\" name=\"q\" value=\"{}\"></label>\n\
         <button type=\"submit\">Filter</button>\n</form>",
        escape(filter.search.as_deref().unwrap_or_default())
    );

    if dashboard.rows.is_empty() {
        body.push_str("<p>No submissions match.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>Submitted</th><th>Category</th><th>Form</th>\
             <th>Status</th><th>Name</th><th>Email</th><th>Message</th></tr></thead>\n<tbody>\n",
        );
        for row in &dashboard.rows {
            let _ = writeln!(
                body,
                "<tr data-id=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&row.id),
                escape(&row.submitted_at),
                row.category,
                escape(&row.form),
                row.status,
                escape(&row.name),
                escape(&row.email),
                escape(&row.message),
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    body.push_str(
        "<form method=\"post\" action=\"/api/admin/logout\"><button type=\"submit\">Log out</button></form>",
    );
    layout("Submissions", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lead_core::submission::Submission;
    use serde_json::json;

    #[test]
    fn escape_handles_markup() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn login_page_posts_to_login_api() {
        let html = login_page();
        assert!(html.contains("/api/admin/login"));
        assert!(html.contains("name=\"password\""));
    }

    #[test]
    fn dashboard_escapes_visitor_input() {
        let sub: Submission = serde_json::from_value(json!({
            "id": "sub-1",
            "submittedAt": "2026-03-01T10:15:30.000Z",
            "status": "new",
            "name": "<b>Eve</b>",
            "email": "eve@x.io",
            "message": "hi <img src=x>"
        }))
        .unwrap();
        let dashboard = Dashboard::build(&[sub], &[], &DashboardFilter::default());
        let html = dashboard_page(&dashboard, &DashboardFilter::default());

        assert!(html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(!html.contains("<img src=x>"));
        assert!(html.contains("Total: <strong>1</strong>"));
    }

    #[test]
    fn dashboard_marks_selected_filter() {
        let filter = DashboardFilter {
            status: Some(SubmissionStatus::Closed),
            ..DashboardFilter::default()
        };
        let dashboard = Dashboard::build(&[], &[], &filter);
        let html = dashboard_page(&dashboard, &filter);
        assert!(html.contains("<option value=\"closed\" selected>"));
        assert!(html.contains("No submissions match."));
    }
}
