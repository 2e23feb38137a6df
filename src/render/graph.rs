use crate::error::{RecapError, Result};

/// Number of glyphs in every rendered bar
pub const GRAPH_WIDTH: usize = 25;

/// Glyph pair used to draw proportional bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolSet {
    /// `█` / `░`
    #[default]
    Blocks,
    /// `⣿` / `⣀`
    Braille,
    /// `⬛` / `⬜`
    Squares,
}

impl SymbolSet {
    /// Select a symbol set by its configured version number (1-3)
    pub fn from_version(version: u8) -> Result<Self> {
        match version {
            1 => Ok(Self::Blocks),
            2 => Ok(Self::Braille),
            3 => Ok(Self::Squares),
            other => Err(RecapError::invalid_input(format!(
                "unknown symbol version {} (expected 1-3)",
                other
            ))),
        }
    }

    /// (filled, empty) glyphs
    pub fn glyphs(self) -> (char, char) {
        match self {
            Self::Blocks => ('█', '░'),
            Self::Braille => ('⣿', '⣀'),
            Self::Squares => ('⬛', '⬜'),
        }
    }
}

/// Render `percent` (0-100) as a 25-glyph bar.
///
/// One glyph stands for four percent; the glyph count is rounded half to
/// even, so 2.0 renders no filled glyph while 6.0 renders two.
pub fn make_graph(percent: f64, symbols: SymbolSet) -> String {
    let (filled, empty) = symbols.glyphs();
    let quarters = (percent / 4.0).round_ties_even();
    let filled_count = if quarters.is_nan() {
        0
    } else {
        quarters.clamp(0.0, GRAPH_WIDTH as f64) as usize
    };

    let mut graph = String::with_capacity(GRAPH_WIDTH * 4);
    graph.extend(std::iter::repeat(filled).take(filled_count));
    graph.extend(std::iter::repeat(empty).take(GRAPH_WIDTH - filled_count));
    graph
}
