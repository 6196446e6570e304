//! Bitmap font glyphs and the buffered text writer.
//!
//! Each glyph is a 2x3 tile metatile. Writes are staged in the NMI's VRAM
//! buffer, so the writer tracks how full it is and flushes before it would
//! overrun.

use serde::{Deserialize, Serialize};

use crate::constants::{
    GLYPH_ROWS, GLYPH_STAGING_BYTES, SCORE_MAX, TEXT_WRAP_COLUMN, VRAM_FLUSH_THRESHOLD,
};
use crate::presentation::Presentation;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Glyph {
    Digit(u8),
    Letter(u8),
    Space,
}

impl Glyph {
    /// Upper and lower case fold together; anything unknown becomes a space.
    pub const fn from_ascii(byte: u8) -> Self {
        match byte {
            b'0'..=b'9' => Self::Digit(byte - b'0'),
            b'A'..=b'Z' => Self::Letter(byte - b'A'),
            b'a'..=b'z' => Self::Letter(byte - b'a'),
            _ => Self::Space,
        }
    }

    /// Index into the font table: digits, then A-Z, then space.
    pub const fn font_index(self) -> u8 {
        match self {
            Self::Digit(value) => value,
            Self::Letter(value) => 10 + value,
            Self::Space => 36,
        }
    }

    pub const fn to_ascii(self) -> char {
        match self {
            Self::Digit(value) => (b'0' + value) as char,
            Self::Letter(value) => (b'A' + value) as char,
            Self::Space => ' ',
        }
    }
}

pub fn glyphs(text: &str) -> impl Iterator<Item = Glyph> + '_ {
    text.bytes().map(Glyph::from_ascii)
}

/// HUD number field: a leading marker space then three zero-padded digits.
pub fn score_field(value: u16) -> [Glyph; 4] {
    let value = value.min(SCORE_MAX);
    [
        Glyph::Space,
        Glyph::Digit((value / 100) as u8),
        Glyph::Digit((value / 10 % 10) as u8),
        Glyph::Digit((value % 10) as u8),
    ]
}

/// Tracks the shared VRAM staging budget for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextWriter {
    staged: u8,
}

impl TextWriter {
    /// The NMI drains the buffer every frame.
    pub fn begin_frame(&mut self) {
        self.staged = 0;
    }

    pub fn staged(&self) -> u8 {
        self.staged
    }

    /// Lays out glyphs left to right, wrapping at the screen edge.
    ///
    /// Spaces are skipped and only advance one column; the area must already
    /// be blank. Coordinates wrap at 256 like the 8-bit registers they model.
    pub fn render<P, I>(&mut self, gfx: &mut P, column: u8, row: u8, text: I)
    where
        P: Presentation + ?Sized,
        I: IntoIterator<Item = Glyph>,
    {
        let mut x = column;
        let mut y = row;
        for glyph in text {
            if glyph == Glyph::Space {
                x = x.wrapping_add(1);
            } else {
                gfx.draw_glyph(x, y, glyph);
                self.staged = self.staged.saturating_add(GLYPH_STAGING_BYTES);
                x = x.wrapping_add(2);
            }
            if x >= TEXT_WRAP_COLUMN {
                x = 0;
                y = y.wrapping_add(GLYPH_ROWS);
            }
            if self.staged > VRAM_FLUSH_THRESHOLD {
                gfx.flush_pending_draws();
                self.staged = 0;
            }
        }
    }

    pub fn render_str<P>(&mut self, gfx: &mut P, column: u8, row: u8, text: &str)
    where
        P: Presentation + ?Sized,
    {
        self.render(gfx, column, row, glyphs(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::{DrawCommand, FrameRecorder};

    #[test]
    fn ascii_maps_into_font_order() {
        assert_eq!(Glyph::from_ascii(b'0').font_index(), 0);
        assert_eq!(Glyph::from_ascii(b'A').font_index(), 10);
        assert_eq!(Glyph::from_ascii(b'z').font_index(), 35);
        assert_eq!(Glyph::from_ascii(b'!'), Glyph::Space);
        assert_eq!(Glyph::from_ascii(b'q').to_ascii(), 'Q');
    }

    #[test]
    fn score_field_pads_and_saturates() {
        let text: alloc::string::String = score_field(7).iter().map(|g| g.to_ascii()).collect();
        assert_eq!(text, " 007");
        let capped: alloc::string::String =
            score_field(5000).iter().map(|g| g.to_ascii()).collect();
        assert_eq!(capped, " 999");
    }

    #[test]
    fn spaces_are_skipped_and_half_width() {
        let mut gfx = FrameRecorder::default();
        let mut writer = TextWriter::default();
        writer.render_str(&mut gfx, 4, 10, "A B");
        let glyphs: alloc::vec::Vec<_> = gfx
            .frame()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Glyph { column, row, glyph } => Some((*column, *row, *glyph)),
                _ => None,
            })
            .collect();
        assert_eq!(
            glyphs,
            [(4, 10, Glyph::Letter(0)), (7, 10, Glyph::Letter(1))]
        );
    }

    #[test]
    fn long_lines_wrap_three_rows_down() {
        let mut gfx = FrameRecorder::default();
        let mut writer = TextWriter::default();
        writer.render_str(&mut gfx, 26, 4, "ABCD");
        let positions: alloc::vec::Vec<_> = gfx
            .frame()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Glyph { column, row, .. } => Some((*column, *row)),
                _ => None,
            })
            .collect();
        assert_eq!(positions, [(26, 4), (28, 4), (30, 4), (0, 7)]);
    }

    #[test]
    fn coordinates_wrap_at_the_byte_edge() {
        let mut gfx = FrameRecorder::default();
        let mut writer = TextWriter::default();
        writer.render_str(&mut gfx, 255, 0, "A");
        writer.render_str(&mut gfx, 28, 253, "ABCD");
        let positions: alloc::vec::Vec<_> = gfx
            .frame()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Glyph { column, row, .. } => Some((*column, *row)),
                _ => None,
            })
            .collect();
        assert_eq!(positions, [(255, 0), (28, 253), (30, 253), (0, 0), (2, 0)]);
    }

    #[test]
    fn writer_flushes_before_buffer_overruns() {
        let mut gfx = FrameRecorder::default();
        let mut writer = TextWriter::default();
        writer.render_str(&mut gfx, 0, 0, "ABCDEFGHIJKL");
        let flushes = gfx
            .frame()
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Flush))
            .count();
        // 10 glyphs reach 120 staged bytes, past the 114 threshold.
        assert_eq!(flushes, 1);
        assert_eq!(writer.staged(), 2 * GLYPH_STAGING_BYTES);
    }
}
