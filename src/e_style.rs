use nu_ansi_term::{Color, Style};

/// Glyphs used to mark success and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbols {
    pub success: &'static str,
    pub error: &'static str,
}

impl Symbols {
    pub const UNICODE: Symbols = Symbols {
        success: "✔",
        error: "✖",
    };
    /// Fallbacks for consoles without the heavy check / cross glyphs.
    pub const FALLBACK: Symbols = Symbols {
        success: "√",
        error: "×",
    };

    /// The symbol set selected by the `unicode-symbols` feature.
    pub fn default_set() -> Symbols {
        if cfg!(feature = "unicode-symbols") {
            Symbols::UNICODE
        } else {
            Symbols::FALLBACK
        }
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Symbols::default_set()
    }
}

/// Styling primitives for the report.
///
/// With `uses_color` off every helper returns its input unchanged, hidden text
/// included, so a plain report still carries `./file:line:col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub uses_color: bool,
    pub symbols: Symbols,
}

impl Palette {
    pub fn new(uses_color: bool) -> Self {
        Palette {
            uses_color,
            symbols: Symbols::default_set(),
        }
    }

    pub fn plain() -> Self {
        Palette::new(false)
    }

    pub fn colored() -> Self {
        Palette::new(true)
    }

    pub fn with_symbols(mut self, symbols: Symbols) -> Self {
        self.symbols = symbols;
        self
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.uses_color {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn success_symbol(&self) -> String {
        self.paint(Color::Green.normal(), self.symbols.success)
    }

    pub fn error_symbol(&self) -> String {
        self.paint(Color::Red.normal(), self.symbols.error)
    }

    /// Zero-width but selectable text: present in the byte stream, invisible
    /// on screen.
    pub fn hidden(&self, text: &str) -> String {
        self.paint(Color::DarkGray.dimmed().hidden(), text)
    }

    pub fn dim_underline(&self, text: &str) -> String {
        self.paint(Style::new().dimmed().underline(), text)
    }

    pub fn gray(&self, text: &str) -> String {
        self.paint(Color::DarkGray.normal(), text)
    }

    pub fn dim_gray(&self, text: &str) -> String {
        self.paint(Color::DarkGray.dimmed(), text)
    }

    pub fn red_bright(&self, text: &str) -> String {
        self.paint(Color::LightRed.normal(), text)
    }

    pub fn cyan(&self, text: &str) -> String {
        self.paint(Color::Cyan.normal(), text)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::colored()
    }
}
