use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popularity {
    Popular,
    Standard,
}

impl Popularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Popularity::Popular => "Popular",
            Popularity::Standard => "Standard",
        }
    }
}

/// Text shown in a marker's info popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent<'a> {
    pub name: &'a str,
    pub category_label: &'a str,
    pub color: &'a str,
    pub address: &'a str,
    pub phone: &'a str,
    pub popularity: Popularity,
    pub website: Option<&'a str>,
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const ROW_STYLE: &str = "font-size: 0.875rem; color: #4a5568;";

pub fn render_popup(content: &PopupContent<'_>) -> String {
    let mut html = String::new();

    // write! into a String cannot fail
    let _ = write!(
        html,
        concat!(
            r#"<div class="poi-popup" style="background: white; padding: 1rem; border-radius: 0.5rem;">"#,
            r#"<div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 0.75rem;">"#,
            r#"<h3 style="font-size: 1.125rem; font-weight: bold; color: #1a202c;">{name}</h3>"#,
            r#"<span style="padding: 0.25rem 0.5rem; font-size: 0.75rem; font-weight: 600; color: white; border-radius: 0.25rem; background-color: {color}">{category}</span>"#,
            r#"</div><div style="display: flex; flex-direction: column; gap: 0.5rem;">"#,
        ),
        name = escape_html(content.name),
        color = escape_html(content.color),
        category = escape_html(content.category_label),
    );

    for (label, value) in [
        ("Address", content.address),
        ("Phone", content.phone),
        ("Popularity", content.popularity.as_str()),
    ] {
        let _ = write!(
            html,
            r#"<p style="{ROW_STYLE}"><span style="font-weight: 600;">{label}:</span> {}</p>"#,
            escape_html(value)
        );
    }

    if let Some(website) = content.website {
        let _ = write!(
            html,
            r#"<p style="{ROW_STYLE}"><span style="font-weight: 600;">Website:</span> <a href="{}" target="_blank" rel="noopener" style="color: #4299e1; text-decoration: underline;">Visit Website</a></p>"#,
            escape_html(website)
        );
    }

    html.push_str(concat!(
        r#"<div style="margin-top: 0.75rem; padding-top: 0.75rem; border-top: 1px solid #e2e8f0;">"#,
        r#"<p style="font-size: 0.75rem; color: #718096;">Click on the marker again to close this popup</p>"#,
        "</div></div></div>",
    ));

    html
}
