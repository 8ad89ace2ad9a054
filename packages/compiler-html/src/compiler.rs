use lexis_editor::{walk_children, walk_node, EditorError, EditorState, LiveNode, NodeKey, Visitor};
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors that can occur during HTML compilation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Broken tree: {0}")]
    Tree(#[from] EditorError),
}

/// Options for HTML compilation
#[derive(Debug, Clone, PartialEq)]
pub struct CompileOptions {
    /// Put each block on its own indented line
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Wrap text in `<span style="white-space: pre-wrap;">` so runs of spaces survive
    pub preserve_whitespace: bool,
    /// Emit a complete page instead of a body fragment
    pub full_document: bool,
    /// `<title>` of the complete page
    pub title: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: "  ".to_string(),
            preserve_whitespace: true,
            full_document: false,
            title: "Lexis Document".to_string(),
        }
    }
}

impl CompileOptions {
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile the live tree to HTML
#[instrument(skip_all, fields(nodes = state.len(), full_document = options.full_document))]
pub fn compile_to_html(state: &EditorState, options: &CompileOptions) -> Result<String, CompileError> {
    let mut ctx = Context::new(options.clone());

    if ctx.options.full_document {
        ctx.add_line("<!DOCTYPE html>");
        ctx.add_line("<html>");
        ctx.indent();
        compile_head(&mut ctx);
        ctx.add_line("<body>");
        ctx.indent();
    }

    walk_node(&mut ctx, state, NodeKey::ROOT)?;

    if ctx.options.full_document {
        ctx.dedent();
        ctx.add_line("</body>");
        ctx.dedent();
        ctx.add_line("</html>");
    }

    let html = ctx.get_output();
    debug!(bytes = html.len(), "HTML compiled");
    Ok(html)
}

fn compile_head(ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    let title = format!("<title>{}</title>", escape_html(&ctx.options.title));
    ctx.add_line(&title);

    ctx.dedent();
    ctx.add_line("</head>");
}

impl Visitor for Context {
    fn visit_paragraph(&mut self, state: &EditorState, paragraph: &LiveNode) -> Result<(), EditorError> {
        if paragraph.children().is_empty() {
            self.add_line("<p><br></p>");
            return Ok(());
        }

        let has_blocks = has_block_children(state, paragraph)?;

        if self.options.pretty {
            self.add_indent();
        }
        self.add("<p>");

        if has_blocks && self.options.pretty {
            self.add("\n");
            self.indent();
            compile_inline_runs(self, state, paragraph)?;
            self.dedent();
            self.add_indent();
        } else {
            walk_children(self, state, paragraph)?;
        }

        self.add("</p>");
        if self.options.pretty {
            self.add("\n");
        }
        Ok(())
    }

    fn visit_text(&mut self, _node: &LiveNode, text: &str) -> Result<(), EditorError> {
        if self.options.preserve_whitespace {
            self.add("<span style=\"white-space: pre-wrap;\">");
            self.add(&escape_html(text));
            self.add("</span>");
        } else {
            self.add(&escape_html(text));
        }
        Ok(())
    }
}

/// Pretty mode for mixed content: text runs go on their own indented line,
/// nested blocks render themselves.
fn compile_inline_runs(ctx: &mut Context, state: &EditorState, paragraph: &LiveNode) -> Result<(), EditorError> {
    let mut in_run = false;
    for child in paragraph.children() {
        let node = state.node(*child)?;
        if node.kind().is_element() {
            if in_run {
                ctx.add("\n");
                in_run = false;
            }
            walk_node(ctx, state, *child)?;
        } else {
            if !in_run {
                ctx.add_indent();
                in_run = true;
            }
            walk_node(ctx, state, *child)?;
        }
    }
    if in_run {
        ctx.add("\n");
    }
    Ok(())
}

fn has_block_children(state: &EditorState, node: &LiveNode) -> Result<bool, EditorError> {
    for child in node.children() {
        if state.node(*child)?.kind().is_element() {
            return Ok(true);
        }
    }
    Ok(false)
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
