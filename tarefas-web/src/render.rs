/// View rendering contract
///
/// HTML generation is an external collaborator with a narrow contract:
/// handlers produce a template name plus a serializable data context, and a
/// [`ViewRenderer`] turns that into an HTML string. Swapping in a real
/// template engine means implementing the trait and handing it to
/// `AppState`; handlers and tests never change.
///
/// The built-in [`BasicRenderer`] produces a bare-bones page that carries
/// the template name, the notices, and the context, which is enough for the
/// binary to be usable and for tests to assert on.

use serde_json::Value as JsonValue;

use crate::flash::Notice;

/// A page a handler wants rendered
#[derive(Debug, Clone)]
pub struct View {
    /// Template name, e.g. "tasks" or "login"
    pub template: &'static str,

    /// Data context handed to the template
    pub context: JsonValue,

    /// One-shot notices to surface on this page
    pub notices: Vec<Notice>,
}

impl View {
    /// Creates a view with an empty context
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            context: JsonValue::Null,
            notices: Vec::new(),
        }
    }

    /// Sets the data context
    pub fn with_context(mut self, context: JsonValue) -> Self {
        self.context = context;
        self
    }

    /// Attaches one-shot notices
    pub fn with_notices(mut self, notices: Vec<Notice>) -> Self {
        self.notices = notices;
        self
    }
}

/// Error type for view rendering
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The renderer does not know the requested template
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// Template evaluation failed
    #[error("Template failed: {0}")]
    TemplateFailed(String),
}

/// The rendering seam between handlers and HTML generation
pub trait ViewRenderer: Send + Sync + 'static {
    /// Renders a view into a complete HTML document
    fn render(&self, view: &View) -> Result<String, RenderError>;
}

/// Minimal built-in renderer
///
/// Emits a skeletal page: the template name as a `data-template` marker,
/// notices as a list tagged with their category, and the context as
/// escaped JSON. Not pretty, but complete and dependency-free.
#[derive(Debug, Clone, Default)]
pub struct BasicRenderer;

impl ViewRenderer for BasicRenderer {
    fn render(&self, view: &View) -> Result<String, RenderError> {
        let mut notices_html = String::new();
        if !view.notices.is_empty() {
            notices_html.push_str("<ul class=\"notices\">");
            for notice in &view.notices {
                notices_html.push_str(&format!(
                    "<li class=\"notice-{}\">{}</li>",
                    notice.category.as_str(),
                    escape_html(&notice.message)
                ));
            }
            notices_html.push_str("</ul>");
        }

        let context = serde_json::to_string_pretty(&view.context)
            .map_err(|e| RenderError::TemplateFailed(e.to_string()))?;

        Ok(format!(
            "<!doctype html>\n<html>\n<head><title>tarefas - {template}</title></head>\n\
             <body>\n<main data-template=\"{template}\">\n{notices}\n\
             <pre class=\"context\">{context}</pre>\n</main>\n</body>\n</html>\n",
            template = view.template,
            notices = notices_html,
            context = escape_html(&context),
        ))
    }
}

/// Escapes the five HTML-significant characters
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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
