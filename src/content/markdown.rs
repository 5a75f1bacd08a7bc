//! Markdown rendering and reading-time estimation

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::html::{ClassedHTMLGenerator, ClassStyle};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Words-per-minute assumption behind reading-time labels.
pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

/// Renders markdown bodies to HTML with highlighted code blocks.
///
/// Output is deterministic: identical input yields byte-identical HTML.
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Render a markdown body to HTML.
    ///
    /// Tables, strikethrough, task lists, footnotes and the GFM extensions
    /// are enabled. Fenced code blocks are replaced with class-annotated
    /// highlighted HTML.
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_lang: Option<String> = None;
        let mut code_buf = String::new();

        for event in Parser::new_ext(markdown, options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_buf.clear();
                    code_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    let block = self.highlight(&code_buf, code_lang.take().as_deref());
                    events.push(Event::Html(CowStr::from(block)));
                }
                Event::Text(text) if in_code_block => code_buf.push_str(&text),
                other if !in_code_block => events.push(other),
                _ => {}
            }
        }

        let mut out = String::new();
        html::push_html(&mut out, events.into_iter());
        out
    }

    /// Highlight one code block, falling back to an escaped plain block when
    /// the language is unknown or highlighting fails.
    fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, ClassStyle::Spaced);
        for line in LinesWithEndings::from(code) {
            if generator
                .parse_html_for_line_which_includes_newline(line)
                .is_err()
            {
                return format!(
                    "<pre><code class=\"language-{}\">{}</code></pre>\n",
                    lang,
                    html_escape(code)
                );
            }
        }

        format!(
            "<pre><code class=\"language-{}\">{}</code></pre>\n",
            lang,
            generator.finalize()
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Reading-time label from the raw markdown body, e.g. "3 min read".
///
/// Word count is taken before rendering, rounded up to the nearest minute
/// with a one-minute floor.
pub fn reading_time(body: &str, words_per_minute: usize) -> String {
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(words_per_minute.max(1)).max(1);
    format!("{minutes} min read")
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello\n\nA paragraph.");
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<p>A paragraph.</p>"));
    }

    #[test]
    fn test_render_gfm_extensions() {
        let renderer = MarkdownRenderer::new();

        let table = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(table.contains("<table>"));

        let strike = renderer.render("~~gone~~");
        assert!(strike.contains("<del>gone</del>"));

        let tasks = renderer.render("- [x] done\n- [ ] todo");
        assert!(tasks.contains("checkbox"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains("language-rust"));
        assert!(html.contains("<pre>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = MarkdownRenderer::new();
        let input = "# Title\n\nSome *text* with `code`.\n\n```rust\nlet x = 1;\n```\n";
        assert_eq!(renderer.render(input), renderer.render(input));
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let body = "word ".repeat(400);
        assert_eq!(reading_time(&body, 200), "2 min read");

        let body = "word ".repeat(201);
        assert_eq!(reading_time(&body, 200), "2 min read");
    }

    #[test]
    fn test_reading_time_has_one_minute_floor() {
        assert_eq!(reading_time("word", 200), "1 min read");
        assert_eq!(reading_time("", 200), "1 min read");
    }
}
