//! Text rendering: the table surface, page templates and page chrome

use crate::app::notify::{Notice, NoticeKind};
use crate::app::router::Route;
use crate::core::auth::AuthContext;
use crate::core::error::Result;
use crate::core::format::fit;
use crate::core::record::Record;
use crate::core::table::{LOADING_MESSAGE, TableBody, TableFrame, TableSurface};
use crate::core::theme::{Role, Theme};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use tera::{Context, Tera};

/// Widest a table column may grow before its cells are cut
pub const MAX_COLUMN_WIDTH: usize = 32;

/// Application name shown in the page header
pub const BRAND_NAME: &str = "AeroMaris";

fn ansi_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid ansi pattern"))
}

/// Number of visible characters, ignoring color escapes
pub fn visible_width(text: &str) -> usize {
    ansi_pattern().replace_all(text, "").chars().count()
}

/// Pad `text` to `width` visible columns; cut (dropping colors) when longer
fn pad_visible(text: &str, width: usize) -> String {
    let visible = visible_width(text);
    if visible > width {
        fit(&ansi_pattern().replace_all(text, ""), width)
    } else {
        format!("{}{}", text, " ".repeat(width - visible))
    }
}

/// Renders table frames as aligned plain text
///
/// Rows are numbered from 1 in display order so an interactive prompt can
/// refer to them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSurface {
    theme: Theme,
}

impl TextSurface {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }
}

impl<R: Record> TableSurface<R> for TextSurface {
    type Output = String;

    fn render(&mut self, frame: &TableFrame<'_, R>) -> String {
        let mut out = String::new();
        out.push_str(&self.theme.paint(Role::Accent, &frame.title));
        out.push('\n');

        let search = if frame.search_query.is_empty() {
            self.theme.paint(Role::Dimmed, &frame.search_placeholder)
        } else {
            frame.search_query.clone()
        };
        out.push_str(&format!("Search: {}\n\n", search));

        let captions: Vec<String> = frame.headers.iter().map(|h| h.caption()).collect();
        let rows = frame.rows();
        let index_width = rows.len().to_string().len().max(1);

        let widths: Vec<usize> = captions
            .iter()
            .enumerate()
            .map(|(i, caption)| {
                rows.iter()
                    .filter_map(|row| row.cells.get(i))
                    .map(|cell| visible_width(cell))
                    .chain(std::iter::once(caption.chars().count()))
                    .max()
                    .unwrap_or(0)
                    .min(MAX_COLUMN_WIDTH)
            })
            .collect();

        let header_line = captions
            .iter()
            .zip(&widths)
            .map(|(caption, width)| pad_visible(caption, *width))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(&format!("{}  {}\n", " ".repeat(index_width), header_line.trim_end()));

        match &frame.body {
            TableBody::Rows(rows) => {
                for (position, row) in rows.iter().enumerate() {
                    let line = row
                        .cells
                        .iter()
                        .zip(&widths)
                        .map(|(cell, width)| pad_visible(cell, *width))
                        .collect::<Vec<_>>()
                        .join("  ");
                    out.push_str(&format!(
                        "{:>width$}  {}\n",
                        position + 1,
                        line.trim_end(),
                        width = index_width
                    ));
                }
                if frame.loading {
                    out.push_str(&self.theme.paint(Role::Dimmed, LOADING_MESSAGE));
                    out.push('\n');
                }
            }
            body => {
                if let Some(message) = body.message() {
                    out.push('\n');
                    out.push_str(&self.theme.paint(Role::Dimmed, message));
                    out.push('\n');
                }
            }
        }
        out
    }
}

pub const SHIP_DETAIL: &str = "ship_detail.txt";
pub const ROCKET_DETAIL: &str = "rocket_detail.txt";
pub const ROCKET_CARD: &str = "rocket_card.txt";
pub const HOME: &str = "home.txt";
pub const LOGIN: &str = "login.txt";
pub const NOT_FOUND: &str = "not_found.txt";

const SHIP_DETAIL_TEMPLATE: &str = r#"{{ name }}
{{ ship_type }}  [{{ status }}]

Home Port:   {{ home_port }}
Year Built:  {{ year_built }}
Mass:        {{ mass }}
{%- if image %}
Image:       {{ image }}
{%- endif %}

Roles
{%- if roles | length > 0 %}
{%- for role in roles %}
  - {{ role }}
{%- endfor %}
{%- else %}
  No roles specified
{%- endif %}

Missions
{%- if missions | length > 0 %}
{%- for mission in missions %}
  - {{ mission.name }} (Flight: {{ mission.flight }})
{%- endfor %}
{%- else %}
  No missions recorded
{%- endif %}
"#;

const ROCKET_DETAIL_TEMPLATE: &str = r#"{{ name }}  [{{ status }}]
{{ description }}
{%- if slide %}

Image {{ slide_position }}/{{ slide_count }}: {{ slide }}
{{ indicators }}
{%- endif %}

Specifications :
  Height:    {{ height }}
  Diameter:  {{ diameter }}
  Mass:      {{ mass }}
  Stages:    {{ stages }}
  Boosters:  {{ boosters }}

Performance :
  Success Rate:     {{ success_rate }}%
  Cost per Launch:  {{ cost }} ({{ cost_gauge }} of $100,000,000)
  First Flight:     {{ first_flight }}

Company :
  Country:  {{ country }}
  Company:  {{ company }}
{%- if wikipedia %}
  Know more: {{ wikipedia }}
{%- endif %}
"#;

const ROCKET_CARD_TEMPLATE: &str = r#"{{ name }}  [{{ status }}]
{%- for slide in slides %}
  {{ slide.image }}
{%- endfor %}
{%- if slides | length > 0 %}
  {{ indicators }}
{%- endif %}
{{ summary }}
-> {{ path }}
"#;

const HOME_TEMPLATE: &str = r#"Explore Rockets
  Explore the rockets that carry humanity's dreams beyond Earth. From reusable
  boosters to powerful launch systems, learn how each rocket contributes to
  aerospace innovation.

Explore Ships
  Discover the fleet that supports SpaceX's ambitious missions. From drone ships
  that land rockets at sea to recovery vessels that help bring astronauts home
  safely, explore the vessels that make reusable spaceflight possible.

SpaceX Fleet Statistics
{%- for stat in stats %}
  {{ stat.title }}: {{ stat.value }}
{%- endfor %}
"#;

const LOGIN_TEMPLATE: &str = r#"Welcome to SpaceX Ships
Enter your credentials to access the SpaceX ships database.
For demo purposes, any valid username and password will work.
{%- if username_error %}
  Username: {{ username_error }}
{%- endif %}
{%- if password_error %}
  Password: {{ password_error }}
{%- endif %}
"#;

const NOT_FOUND_TEMPLATE: &str = r#"404
Houston, we have a problem
{%- if details %}
The {{ kind }} you are looking for could not be found.
Back to {{ back_to }}
{%- else %}
The page you are looking for may have been moved, deleted, or possibly never
existed. Let's get you back on track.
Take me back to home page: /
{%- endif %}
"#;

/// Text templates for the detail, card and static views
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (SHIP_DETAIL, SHIP_DETAIL_TEMPLATE),
            (ROCKET_DETAIL, ROCKET_DETAIL_TEMPLATE),
            (ROCKET_CARD, ROCKET_CARD_TEMPLATE),
            (HOME, HOME_TEMPLATE),
            (LOGIN, LOGIN_TEMPLATE),
            (NOT_FOUND, NOT_FOUND_TEMPLATE),
        ])?;
        Ok(Self { tera })
    }

    /// Render `name` with a serializable context
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        let context = Context::from_serialize(data)?;
        Ok(self.tera.render(name, &context)?)
    }
}

/// Header line: brand, navigation, auth status and theme
///
/// Guarded links are only listed for signed-in users.
pub fn page_header(theme: &Theme, auth: &AuthContext, current: &Route) -> String {
    let links = [
        (Route::Home, "Home"),
        (Route::Ships, "Ships"),
        (Route::Rockets, "Rockets"),
    ];
    let nav = links
        .iter()
        .filter(|(route, _)| route.policy().check(auth))
        .map(|(route, label)| {
            if route == current {
                theme.paint(Role::Accent, &format!("[{}]", label))
            } else {
                label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");

    let status = match auth.username() {
        Some(username) => format!("signed in as {}", username),
        None => "Login".to_string(),
    };

    format!(
        "{}  {}  | {} | theme: {}",
        theme.paint(Role::Accent, BRAND_NAME),
        nav,
        theme.paint(Role::Dimmed, &status),
        theme.mode
    )
}

/// A notice as one line, colored by kind
pub fn notice_line(theme: &Theme, notice: &Notice) -> String {
    let role = match notice.kind {
        NoticeKind::Info => Role::Accent,
        NoticeKind::Error => Role::Danger,
    };
    format!("{} {}", theme.paint(role, &format!("{}:", notice.title)), notice.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::QueryState;
    use crate::core::record::DynamicRecord;
    use crate::core::table::{Column, NO_RESULTS_MESSAGE};
    use crate::core::view::derive_view;
    use serde_json::json;

    fn columns() -> Vec<Column<DynamicRecord>> {
        vec![Column::raw("name", "Name"), Column::raw("type", "Type")]
    }

    #[test]
    fn test_text_surface_aligns_rows() {
        let data = vec![
            DynamicRecord::new("1").with("name", "GO Ms Tree").with("type", "High Speed Craft"),
            DynamicRecord::new("2").with("name", "Amy").with("type", "Tug"),
        ];
        let query = QueryState::sorted_by("name");
        let view = derive_view(&data, &query);
        let frame = TableFrame::build("Ships", &columns(), &view, &query, false);

        let out = TextSurface::default().render(&frame);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Ships");
        assert_eq!(lines[1], "Search: Search...");
        assert_eq!(lines[3], "   Name ↑      Type");
        assert_eq!(lines[4], "1  Amy         Tug");
        assert_eq!(lines[5], "2  GO Ms Tree  High Speed Craft");
    }

    #[test]
    fn test_text_surface_empty_states() {
        let data: Vec<DynamicRecord> = Vec::new();
        let query = QueryState::sorted_by("name");
        let view = derive_view(&data, &query);

        let loading = TableFrame::build("Ships", &columns(), &view, &query, true);
        assert!(TextSurface::default().render(&loading).contains(LOADING_MESSAGE));

        let empty = TableFrame::build("Ships", &columns(), &view, &query, false);
        let out = TextSurface::default().render(&empty);
        assert!(out.contains(NO_RESULTS_MESSAGE));
        assert!(!out.contains(LOADING_MESSAGE));
    }

    #[test]
    fn test_visible_width_ignores_escapes() {
        let theme = Theme::new(crate::core::theme::ThemeMode::Dark, true);
        let painted = theme.paint(Role::Success, "Active");
        assert_eq!(visible_width(&painted), 6);
        assert_eq!(pad_visible(&painted, 8).len(), painted.len() + 2);
        assert_eq!(pad_visible(&painted, 4), "Act…");
    }

    #[test]
    fn test_templates_render_not_found() {
        let templates = Templates::new().unwrap();
        let out = templates
            .render(NOT_FOUND, &json!({ "details": true, "kind": "rocket", "back_to": "rockets" }))
            .unwrap();
        assert!(out.contains("Houston, we have a problem"));
        assert!(out.contains("Back to rockets"));
    }

    #[test]
    fn test_unknown_template_is_render_error() {
        let templates = Templates::new().unwrap();
        let err = templates.render("missing.txt", &json!({})).unwrap_err();
        assert_eq!(err.error_code(), "RENDER_ERROR");
    }

    #[test]
    fn test_page_header_hides_guarded_links() {
        let theme = Theme::default();
        let anonymous = page_header(&theme, &AuthContext::Anonymous, &Route::Home);
        assert!(anonymous.contains("[Home]"));
        assert!(!anonymous.contains("Ships"));
        assert!(anonymous.contains("Login"));

        let user = AuthContext::User {
            username: "amy".to_string(),
        };
        let signed_in = page_header(&theme, &user, &Route::Ships);
        assert!(signed_in.contains("[Ships]"));
        assert!(signed_in.contains("signed in as amy"));
        assert!(signed_in.contains("theme: light"));
    }
}
