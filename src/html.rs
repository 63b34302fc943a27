//! HTML page generator for the waterfall scene
//!
//! The composed scene is serialized to markup here. Component nodes are
//! lowered onto native elements: the rolled-up popover becomes a
//! `<details>` disclosure, so the page needs no script to open it.

use crate::error::{Error, Result};
use chrono::Utc;
use minijinja::{context, Environment};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use url::Url;
use waterfall_core::{compose, GridIndex, Node, ViewOptions, COLLAPSE_TOGGLE_ID};

/// Page showing the expanded view
pub const EXPANDED_PAGE: &str = "index.html";
/// Page showing the collapsed view
pub const COLLAPSED_PAGE: &str = "collapsed.html";
/// Both scene trees as JSON
pub const SCENE_FILE: &str = "scene.json";

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input"];

/// HTML template for the waterfall page
const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <style>
        :root {
            --bg: #ffffff;
            --text: #333333;
            --muted: #777777;
            --border: #dddddd;
            --success: #44aa4a;
            --failed: #e45f5f;
            --system-failed: #800080;
            --dispatched: #ead47d;
            --undispatched: #bbbbbb;
            --inactive: #eeeeee;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
            background: var(--bg);
            color: var(--text);
            font-size: 12px;
            margin: 0;
            padding: 1rem;
        }

        header h1 {
            font-size: 1.5rem;
            font-weight: 600;
            margin: 0 0 0.25rem 0;
        }

        .stats {
            color: var(--muted);
            margin-bottom: 1rem;
        }

        .row {
            display: flex;
            align-items: flex-start;
        }

        .col-xs-2 {
            flex: 0 0 16.66%;
            max-width: 16.66%;
            padding: 0 4px;
            box-sizing: border-box;
        }

        .col-xs-10 {
            flex: 0 0 83.33%;
        }

        .build-cols > * {
            flex: 1 1 0;
            padding: 0 4px;
        }

        .version-header {
            border-bottom: 1px solid var(--border);
            padding-bottom: 0.5rem;
            margin-bottom: 0.5rem;
        }

        .version-header-full {
            font-weight: 600;
        }

        .text-right {
            text-align: right;
        }

        .btn-hash {
            font-family: 'SF Mono', 'Fira Code', monospace;
            border: 1px solid var(--border);
            border-radius: 3px;
            padding: 0 4px;
            margin-right: 4px;
        }

        .rolled-up-trigger summary {
            cursor: pointer;
            list-style: none;
        }

        .popover {
            position: absolute;
            background: var(--bg);
            border: 1px solid var(--border);
            border-radius: 4px;
            padding: 0.5rem;
            max-width: 320px;
            z-index: 10;
        }

        .rolled-up-version-summary {
            margin-bottom: 0.5rem;
        }

        .variant-row {
            border-bottom: 1px solid var(--border);
            padding: 4px 0;
        }

        .build-variant-name {
            text-align: right;
            font-weight: 600;
        }

        .active-build {
            display: flex;
            flex-wrap: wrap;
        }

        .waterfall-box a {
            display: block;
            width: 12px;
            height: 12px;
            margin: 1px;
            border-radius: 2px;
            background: var(--undispatched);
        }

        .inactive-build {
            color: var(--muted);
            font-style: italic;
            text-align: center;
        }

        .collapsed-bar {
            display: flex;
            height: 14px;
            margin-top: 2px;
        }

        .task-summary {
            color: #ffffff;
            font-size: 10px;
            text-align: center;
            overflow: hidden;
        }

        .success { background: var(--success); }
        .failed { background: var(--failed); }
        .system-failed { background: var(--system-failed); }
        .started, .dispatched { background: var(--dispatched); }
        .undispatched { background: var(--undispatched); }
        .inactive { background: var(--inactive); color: var(--muted); }
        .waterfall-box a.success { background: var(--success); }
        .waterfall-box a.failed { background: var(--failed); }
        .waterfall-box a.system-failed { background: var(--system-failed); }
    </style>
</head>
<body>
    <header>
        <h1>{{ title }}</h1>
        <p class="stats">{{ version_count }} versions, {{ variant_count }} build variants{% if collapsed %}, collapsed view{% endif %}. Generated {{ generated_at }}</p>
    </header>

    {{ grid | safe }}
</body>
</html>
"#;

/// Page configuration
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Title for the page
    pub title: String,
    /// Path to output directory
    pub output_dir: PathBuf,
    /// Base URL that relative links are joined onto
    pub base_url: Option<Url>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Waterfall".to_string(),
            output_dir: PathBuf::from("waterfall"),
            base_url: None,
        }
    }
}

impl PageConfig {
    /// Set the base URL for links (e.g. "https://evergreen.example.com")
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)?;
        if url.cannot_be_a_base() {
            return Err(Error::ConfigError(format!(
                "Base URL cannot hold paths: {}",
                base_url
            )));
        }
        self.base_url = Some(url);
        Ok(self)
    }
}

struct RenderContext<'a> {
    base_url: Option<&'a Url>,
    toggle_href: Option<&'a str>,
}

/// Serialize a scene tree to HTML
///
/// `toggle_href`, when set, makes the collapsed-view checkbox navigate to
/// the page showing the other view.
pub fn render_scene(node: &Node, base_url: Option<&Url>, toggle_href: Option<&str>) -> Result<String> {
    let ctx = RenderContext {
        base_url,
        toggle_href,
    };
    let mut out = String::new();
    write_node(node, &ctx, &mut out)?;
    Ok(out)
}

fn write_node(node: &Node, ctx: &RenderContext<'_>, out: &mut String) -> Result<()> {
    let element = match node {
        Node::Text { text } => {
            out.push_str(&html_escape(text));
            return Ok(());
        }
        Node::Element(element) => element,
    };

    let (tag, props) = lower(&element.tag, &element.props, element.is_component());
    let props = rewrite_props(props, ctx)?;

    out.push('<');
    out.push_str(tag);
    for (key, value) in &props {
        out.push_str(&format!(" {}=\"{}\"", key, html_escape(value)));
    }
    out.push('>');

    if VOID_TAGS.contains(&tag) {
        return Ok(());
    }

    for child in &element.children {
        write_node(child, ctx, out)?;
    }
    out.push_str(&format!("</{}>", tag));

    Ok(())
}

/// Map component nodes onto HTML elements
fn lower<'a>(
    tag: &'a str,
    props: &BTreeMap<String, String>,
    is_component: bool,
) -> (&'a str, BTreeMap<String, String>) {
    let mut props = props.clone();
    let tag = match tag {
        "OverlayTrigger" => {
            for key in ["trigger", "placement"] {
                if let Some(value) = props.remove(key) {
                    props.insert(format!("data-{}", key), value);
                }
            }
            add_class(&mut props, "rolled-up-trigger");
            "details"
        }
        "Button" => "summary",
        "Popover" => {
            add_class(&mut props, "popover");
            "div"
        }
        other if is_component => {
            props.insert("data-component".to_string(), other.to_string());
            "div"
        }
        other => other,
    };
    (tag, props)
}

fn add_class(props: &mut BTreeMap<String, String>, class: &str) {
    props
        .entry("class".to_string())
        .and_modify(|classes| {
            classes.push(' ');
            classes.push_str(class);
        })
        .or_insert_with(|| class.to_string());
}

fn rewrite_props(
    mut props: BTreeMap<String, String>,
    ctx: &RenderContext<'_>,
) -> Result<BTreeMap<String, String>> {
    if let Some(base) = ctx.base_url {
        let absolute = match props.get("href") {
            Some(href) if href.starts_with('/') => Some(base.join(href)?.to_string()),
            _ => None,
        };
        if let Some(absolute) = absolute {
            props.insert("href".to_string(), absolute);
        }
    }

    if let Some(target) = ctx.toggle_href {
        if props.get("id").map(String::as_str) == Some(COLLAPSE_TOGGLE_ID) {
            props.insert(
                "onchange".to_string(),
                format!("window.location.href='{}'", target),
            );
        }
    }

    Ok(props)
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate the full HTML page for one view state
pub fn generate_page(
    grid: &GridIndex,
    options: &ViewOptions,
    config: &PageConfig,
    toggle_href: Option<&str>,
) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("waterfall.html", PAGE_TEMPLATE)?;

    let template = env.get_template("waterfall.html")?;

    let scene = compose(grid, options);
    let grid_html = render_scene(&scene, config.base_url.as_ref(), toggle_href)?;

    let html = template.render(context! {
        title => &config.title,
        collapsed => options.collapsed,
        version_count => grid.version_count(),
        variant_count => grid.variant_count(),
        generated_at => Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        grid => grid_html,
    })?;

    Ok(html)
}

/// Write the expanded page, the collapsed page and the scene JSON
///
/// Each page's checkbox links to the other page. Returns the written paths.
pub fn write_pages(
    grid: &GridIndex,
    options: &ViewOptions,
    config: &PageConfig,
    base_path: &Path,
) -> Result<Vec<PathBuf>> {
    let output_dir = base_path.join(&config.output_dir);
    std::fs::create_dir_all(&output_dir).map_err(|e| Error::FileWriteError {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    let mut written = Vec::new();

    for (collapsed, page, other) in [
        (false, EXPANDED_PAGE, COLLAPSED_PAGE),
        (true, COLLAPSED_PAGE, EXPANDED_PAGE),
    ] {
        let view = options.clone().collapsed(collapsed);
        let html = generate_page(grid, &view, config, Some(other))?;
        written.push(write_file(&output_dir.join(page), &html)?);
    }

    let scenes = serde_json::json!({
        "expanded": compose(grid, &options.clone().collapsed(false)),
        "collapsed": compose(grid, &options.clone().collapsed(true)),
    });
    let json = serde_json::to_string_pretty(&scenes)?;
    written.push(write_file(&output_dir.join(SCENE_FILE), &json)?);

    Ok(written)
}

fn write_file(path: &Path, content: &str) -> Result<PathBuf> {
    std::fs::write(path, content).map_err(|e| Error::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(path.to_path_buf())
}
