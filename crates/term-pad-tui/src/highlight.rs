//! Syntax highlight modes.
//!
//! A mode is picked once from the file extension when the file is opened.
//! Highlighting works on what is on screen: after each repaint the mode
//! reads the visible text back from the surface and recolors matching
//! cells. Buffer state is never consulted.

use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use term_pad_core::{Color, Highlight, Surface};

const KEYWORD: Color = Color::Yellow;
const TYPE: Color = Color::Green;
const PREPROCESSOR: Color = Color::Magenta;
const STRING: Color = Color::Red;
const COMMENT: Color = Color::Cyan;

const INSTRUCTION: Color = Color::Yellow;
const REGISTER: Color = Color::Cyan;
const LABEL: Color = Color::Magenta;
const DIRECTIVE: Color = Color::Blue;

const TITLE: Color = Color::Blue;
const EMPHASIS: Color = Color::Yellow;
const INLINE_CODE: Color = Color::Green;

/// A pattern and the color its matches get. Later rules paint over earlier ones.
struct Rule {
    regex: Regex,
    color: Color,
}

fn compile(rules: &[(&str, Color)]) -> Vec<Rule> {
    rules
        .iter()
        .map(|&(pattern, color)| Rule {
            regex: Regex::new(pattern).expect("built-in highlight pattern"),
            color,
        })
        .collect()
}

static CPP_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    compile(&[
        (
            r"\b(?:auto|break|case|catch|class|const|constexpr|continue|default|delete|do|else|enum|false|for|if|namespace|new|nullptr|private|protected|public|return|sizeof|static|struct|switch|template|this|throw|true|try|typedef|using|virtual|while)\b",
            KEYWORD,
        ),
        (
            r"\b(?:bool|char|double|float|int|long|short|signed|size_t|unsigned|void)\b",
            TYPE,
        ),
        (r"^\s*#\s*[A-Za-z]+", PREPROCESSOR),
        (r#""(?:[^"\\]|\\.)*"?"#, STRING),
        (r"'(?:[^'\\]|\\.)*'?", STRING),
        (r"//.*", COMMENT),
    ])
});

static MIPS_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    compile(&[
        (
            r"\b(?:addiu|addi|addu|add|andi|and|beq|bne|div|jal|jr|j|la|lb|li|lw|move|mult|ori|or|sb|sw|syscall|subu|sub|sll|slt|srl|sra)\b",
            INSTRUCTION,
        ),
        (
            r"\$(?:zero|sp|fp|ra|t[0-9]|s[0-7]|a[0-3]|v[01])\b",
            REGISTER,
        ),
        (r"^\s*[A-Za-z_.][\w.]*:", LABEL),
        (r"\.(?:align|asciiz|ascii|byte|data|globl|space|text|word)\b", DIRECTIVE),
        (r"#.*", COMMENT),
    ])
});

/// Highlight mode for the open file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyntaxMode {
    /// No highlighting.
    #[default]
    Plain,
    /// C and C++ keywords, types, preprocessor lines, literals and comments.
    Cpp,
    /// MIPS assembly instructions, registers, labels and comments.
    Mips,
    /// Markdown titles, emphasis markers and inline code.
    Markdown,
}

impl SyntaxMode {
    /// Picks a mode from the file extension. Unknown extensions are plain text.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "c" | "cc" | "cpp" | "cxx" | "h" | "hpp" => Self::Cpp,
            "s" | "asm" => Self::Mips,
            "md" => Self::Markdown,
            _ => Self::Plain,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Cpp => "cpp",
            Self::Mips => "mips",
            Self::Markdown => "markdown",
        }
    }
}

impl Highlight for SyntaxMode {
    fn recolor(&self, surface: &mut dyn Surface, start_row: usize, end_row: usize) {
        let end_row = end_row.min(surface.height());
        match self {
            Self::Plain => {}
            Self::Cpp => apply_rules(&CPP_RULES, surface, start_row, end_row),
            Self::Mips => apply_rules(&MIPS_RULES, surface, start_row, end_row),
            Self::Markdown => markdown(surface, start_row, end_row),
        }
    }
}

fn screen_line(surface: &dyn Surface, y: usize) -> String {
    (0..surface.width()).map(|x| surface.get(x, y)).collect()
}

fn apply_rules(rules: &[Rule], surface: &mut dyn Surface, start_row: usize, end_row: usize) {
    for y in start_row..end_row {
        let line = screen_line(surface, y);
        for rule in rules {
            for m in rule.regex.find_iter(&line) {
                paint(surface, y, &line, m.range(), rule.color);
            }
        }
    }
}

/// Recolors the cells under a byte range of a screen line.
fn paint(surface: &mut dyn Surface, y: usize, line: &str, bytes: Range<usize>, color: Color) {
    let start = line[..bytes.start].chars().count();
    let len = line[bytes].chars().count();
    for x in start..start + len {
        surface.recolor(x, y, color);
    }
}

/// Marks `#` and `*`, and everything between backticks. Inline code may
/// continue across screen rows.
fn markdown(surface: &mut dyn Surface, start_row: usize, end_row: usize) {
    let width = surface.width();
    let mut in_code = false;
    for y in start_row..end_row {
        for x in 0..width {
            match surface.get(x, y) {
                '`' => {
                    surface.recolor(x, y, INLINE_CODE);
                    in_code = !in_code;
                }
                ' ' => {}
                _ if in_code => surface.recolor(x, y, INLINE_CODE),
                '#' => surface.recolor(x, y, TITLE),
                '*' => surface.recolor(x, y, EMPHASIS),
                _ => {}
            }
        }
    }
}
